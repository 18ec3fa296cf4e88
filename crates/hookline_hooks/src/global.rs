//! The process-wide default registry.
//!
//! A [`HookRegistry`] created empty on first use and never torn down.
//! Registrations made here persist until they are unregistered or the
//! process exits, so tests and isolated subsystems should prefer an owned
//! [`HookRegistry`] over these free functions.

use std::sync::LazyLock;

use crate::error::HookError;
use crate::hook::{Hook, IntoHook};
use crate::registry::HookRegistry;
use crate::shape::HookShape;

static DEFAULT_REGISTRY: LazyLock<HookRegistry> = LazyLock::new(HookRegistry::new);

/// Returns the process-wide default registry.
#[must_use]
pub fn default_registry() -> &'static HookRegistry {
    &DEFAULT_REGISTRY
}

/// Registers a callable in the default registry.
///
/// See [`HookRegistry::register`].
pub fn register<M>(identifier: impl Into<String>, order: i32, hook: impl IntoHook<M>) {
    DEFAULT_REGISTRY.register(identifier, order, hook);
}

/// Registers several callables in the default registry.
///
/// See [`HookRegistry::register_all`].
pub fn register_all<M, H>(
    identifier: impl Into<String>,
    order: i32,
    hooks: impl IntoIterator<Item = H>,
) where
    H: IntoHook<M>,
{
    DEFAULT_REGISTRY.register_all(identifier, order, hooks);
}

/// Removes an identifier from the default registry.
///
/// See [`HookRegistry::unregister`].
pub fn unregister(identifier: &str) -> usize {
    DEFAULT_REGISTRY.unregister(identifier)
}

/// Retrieves typed hooks from the default registry.
///
/// # Panics
///
/// See [`HookRegistry::get`].
#[must_use]
pub fn get<T: HookShape>(identifiers: &[&str]) -> Vec<T> {
    DEFAULT_REGISTRY.get(identifiers)
}

/// Fallible retrieval from the default registry.
///
/// # Errors
///
/// See [`HookRegistry::try_get`].
pub fn try_get<T: HookShape>(identifiers: &[&str]) -> Result<Vec<T>, HookError> {
    DEFAULT_REGISTRY.try_get(identifiers)
}

/// Retrieves untyped hooks from the default registry.
///
/// # Panics
///
/// See [`HookRegistry::hooks`].
#[must_use]
pub fn hooks(identifiers: &[&str]) -> Vec<Hook> {
    DEFAULT_REGISTRY.hooks(identifiers)
}
