//! Identifier-keyed, priority-ordered hooks.
//!
//! `hookline_hooks` lets a host expose named extension points that third
//! parties fill with callables, without either side depending on the other
//! at compile time:
//!
//! - [`hook`] - The [`Hook`] wrapper and [`IntoHook`] conversions
//! - [`shape`] - [`HookShape`], the typed callables hooks are recovered as
//! - [`registry`] - [`HookRegistry`] storage, ordering, and retrieval
//! - [`value`] - [`Value`], the loosely-typed argument of [`Hook::call`]
//! - [`global`] - The process-wide default registry
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use hookline_hooks::HookRegistry;
//!
//! type ConstructIntList = Arc<dyn Fn(Vec<i32>) -> Vec<i32> + Send + Sync>;
//!
//! let registry = HookRegistry::new();
//! registry.register("construct_int_list", -1, |mut list: Vec<i32>| {
//!     list.push(1);
//!     list
//! });
//!
//! let mut list = vec![1, 2, 3];
//! for hook in registry.get::<ConstructIntList>(&["construct_int_list"]) {
//!     list = hook(list);
//! }
//! assert_eq!(list, vec![1, 2, 3, 1]);
//! ```
//!
//! # Failure modes
//!
//! Asking for a shape the registered hooks do not have is a programming
//! error: [`HookRegistry::get`] panics with the expected and actual
//! signatures. [`HookRegistry::try_get`] reports the same condition as a
//! [`HookError`] for hosts that isolate plugins.

/// Hook error types.
pub mod error;

/// The process-wide default registry.
pub mod global;

/// Hook wrapping and dynamic invocation.
pub mod hook;

/// Identifier-keyed storage and retrieval.
pub mod registry;

/// Callable shapes for typed retrieval.
pub mod shape;

/// Signature descriptors.
pub mod signature;

/// Loosely-typed values.
pub mod value;

pub use error::HookError;
pub use global::{default_registry, get, hooks, register, register_all, try_get, unregister};
pub use hook::{AlreadyWrapped, Hook, IntoHook, IntoVariadicHook};
pub use registry::HookRegistry;
pub use shape::HookShape;
pub use signature::{Signature, TypeInfo};
pub use value::Value;

/// Re-export all common types for easy access.
pub mod prelude {
    pub use crate::error::HookError;
    pub use crate::hook::{Hook, IntoHook, IntoVariadicHook};
    pub use crate::hook_args;
    pub use crate::registry::HookRegistry;
    pub use crate::shape::HookShape;
    pub use crate::value::Value;
}
