//! Multi-client chat relay library.
//!
//! Clients connect over TCP and send text; every chunk a client sends is
//! rebroadcast to every other connected client, and joins and departures
//! are announced.
//!
//! Messages are whatever bytes arrived together in one read. There is no
//! line reassembly across reads, so one message may span several logical
//! lines or only part of one.

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;

#[cfg(test)]
pub(crate) mod testing;
