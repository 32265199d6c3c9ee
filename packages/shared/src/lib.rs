//! Utilities shared by the Boardroom server and client binaries.

pub mod logger;
pub mod time;
