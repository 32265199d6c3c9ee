//! Data Transfer Objects (DTOs)
//!
//! DTOs are organized by protocol:
//! - `http`: per-game command endpoints and the room API
//! - `websocket`: lobby messages
//! - `conversion`: domain model → DTO

pub mod conversion;
pub mod http;
pub mod websocket;
