//! Data Transfer Objects (DTOs) for the admin HTTP API.
//!
//! The chat protocol itself is plain newline-terminated text and has no DTOs.

pub mod conversion;
pub mod http;
