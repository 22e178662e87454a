//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware stack)
//!     → request.rs (request ID assigned and propagated)
//!     → cors.rs (preflight answered, allow-origin added)
//!     → handlers.rs (liveness, structured and simple relay)
//!     → response.rs (error envelopes)
//!     → Send to client
//! ```

pub mod cors;
pub mod handlers;
pub mod request;
pub mod response;
pub mod server;

pub use request::{request_id, MakeRequestUuidV4, X_REQUEST_ID};
pub use response::ErrorEnvelope;
pub use server::{AppState, HttpServer};
