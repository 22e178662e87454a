//! CORS relay library.
//!
//! A stateless HTTP forwarding relay: callers describe a request (URL,
//! method, headers, body), the relay performs it and answers with a JSON
//! envelope of the upstream status, headers and classified body.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod relay;
pub mod security;

pub use config::RelayConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use relay::{Relay, RelayError};
