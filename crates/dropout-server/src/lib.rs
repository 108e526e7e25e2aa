//! Dropout early-warning HTTP server
//!
//! Library half of the server binary, exposed so the router can be tested
//! without binding a socket.

pub mod api;
pub mod config;
pub mod error;
