//! Relay subsystem.
//!
//! # Data Flow
//! ```text
//! inbound description (POST body or ?url=)
//!     → types.rs (RelayRequest, defaults, body encoding)
//!     → client.rs (validate, build outbound request, dispatch with deadline)
//!     → classify.rs (content-type branch, header flattening)
//!     → RelayResponse / SimpleRelayResponse
//!     → error.rs (RelayError on any failure)
//! ```
//!
//! # Design Decisions
//! - Stateless: one inbound request produces exactly one outbound call
//! - URL validation happens before dispatch on the structured path only
//! - Every failure after validation collapses into a single relay failure
//! - No retries, no caching, no streaming

pub mod classify;
pub mod client;
pub mod error;
pub mod types;

pub use client::Relay;
pub use error::{ErrorKind, RelayError, RelayResult};
pub use types::{RelayData, RelayRequest, RelayResponse, SimpleRelayQuery, SimpleRelayResponse};
