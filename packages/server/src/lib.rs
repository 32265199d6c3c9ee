//! Boardroom server library.
//!
//! Hosts TicTacToe, ConnectFour, ManDontGetAngry and Battleships rooms over
//! HTTP and WebSocket.

pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;
