//! Named, priority-ordered extension points for Rust hosts.
//!

pub use hookline_internal::*;

/// Re-export all common types for easy access.
pub mod prelude {
    pub use hookline_internal::prelude::*;
}
