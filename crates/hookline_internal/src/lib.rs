//! # hookline Internal Library
//!
//! Re-exports the core hookline crates for convenience.

/// Hook registry, retrieval, and dynamic invocation.
pub use hookline_hooks;

/// Logging configuration.
pub use hookline_tracing;

/// Re-export all common types for easy access.
pub mod prelude {
    pub use hookline_hooks::prelude::*;
    pub use hookline_tracing::{TracingConfig, TracingFormat};
}
