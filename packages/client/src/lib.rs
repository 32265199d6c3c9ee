//! Terminal client for the Boardroom WebSocket lobby.

pub mod command;
mod domain;
pub mod error;
mod formatter;
mod runner;
mod session;
mod ui;

pub use runner::run_client;
