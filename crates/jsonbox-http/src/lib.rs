//! jsonbox-http - HTTP-backed client for jsonbox-style JSON document stores.

mod client;
mod transport;

pub use client::Client;
pub use transport::HttpTransport;
