//! Chat text formats.
//!
//! Every line the server writes is newline terminated. Payload bytes are
//! copied verbatim; they are never validated as UTF-8.

use crate::domain::DisplayName;

/// Private greeting written only to a newly opened connection
pub const WELCOME_MESSAGE: &[u8] = b"Welcome to the chatroom.\n";

/// `"<name> has entered the chatroom.\n"`
pub fn join_announcement(name: &DisplayName) -> Vec<u8> {
    format!("{} has entered the chatroom.\n", name).into_bytes()
}

/// `"<name> has left the chatroom.\n"`
pub fn departure_announcement(name: &DisplayName) -> Vec<u8> {
    format!("{} has left the chatroom.\n", name).into_bytes()
}

/// `"<name>: <payload>\n"`
pub fn chat_line(name: &DisplayName, payload: &[u8]) -> Vec<u8> {
    let mut line = Vec::with_capacity(name.as_str().len() + payload.len() + 3);
    line.extend_from_slice(name.as_str().as_bytes());
    line.extend_from_slice(b": ");
    line.extend_from_slice(payload);
    line.push(b'\n');
    line
}
