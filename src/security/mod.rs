//! Security subsystem.
//!
//! # Components
//! - `headers.rs`: optional allow-list for caller headers forwarded upstream
//!
//! # Design Decisions
//! - Permissive by default: every caller header is forwarded
//! - Body size limits are enforced as a tower layer in `http::server`

pub mod headers;

pub use headers::HeaderPolicy;
