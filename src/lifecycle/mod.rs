//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Shutdown (shutdown.rs):
//!     trigger() → every subscriber's recv() completes
//!
//! Signals (signals.rs):
//!     SIGTERM/SIGINT or trigger() → axum stops accepting → in-flight relays drain
//! ```

pub mod shutdown;
pub mod signals;

pub use shutdown::Shutdown;
