//! Identifier-keyed hook storage and typed retrieval.
//!
//! The [`HookRegistry`] maps identifiers (extension point names) to the hooks
//! registered under them. Producers register callables; consumers retrieve
//! them, sorted by order and recovered as a callable type of their choosing.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use hookline_hooks::HookRegistry;
//!
//! type Greeting = Arc<dyn Fn(String) -> String + Send + Sync>;
//!
//! let registry = HookRegistry::new();
//! registry
//!     .register("greet", 10, |s: String| format!("{s}!"))
//!     .register("greet", -5, |s: String| format!("hello, {s}"));
//!
//! let mut text = String::from("world");
//! for hook in registry.get::<Greeting>(&["greet"]) {
//!     text = hook(text);
//! }
//! assert_eq!(text, "hello, world!");
//! ```
//!
//! # Retrieval across identifiers
//!
//! Several identifiers can be retrieved in one call. The result is each
//! identifier's sorted hooks, concatenated in the order the identifiers were
//! given. If **any** identifier has no hooks the whole result is empty: an
//! identifier list is treated as a bundle that is only dispatched when every
//! extension point in it is populated.

use core::fmt;

use hashbrown::HashMap;
use parking_lot::RwLock;

use crate::error::HookError;
use crate::hook::{Hook, IntoHook};
use crate::shape::HookShape;
use crate::value::Value;

/// Thread-safe registry of hooks keyed by identifier.
///
/// # Thread Safety
///
/// All operations go through an internal [`RwLock`], so a registry can be
/// shared (for example behind an `Arc` or in a `static`) and registered into
/// from several threads. Retrieval reads a consistent snapshot; it never runs
/// hook code while holding the lock.
///
/// # Invariants
///
/// An identifier is either absent or maps to at least one hook. Hooks are
/// stored in registration order; sorting by order happens on retrieval and
/// never reorders the stored list.
#[derive(Default)]
pub struct HookRegistry {
    /// Maps identifier to the hooks registered under it.
    hooks: RwLock<HashMap<String, Vec<Hook>>>,
}

impl fmt::Debug for HookRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let hooks = self.hooks.read();
        f.debug_map()
            .entries(hooks.iter().map(|(id, entries)| (id, entries.len())))
            .finish()
    }
}

impl HookRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            hooks: RwLock::new(HashMap::new()),
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Registration
    // ─────────────────────────────────────────────────────────────────────────

    /// Registers a callable under `identifier` with the given order.
    ///
    /// The same callable may be registered any number of times; each
    /// registration is dispatched separately. Passing an existing [`Hook`]
    /// stores it with its own order.
    pub fn register<M>(
        &self,
        identifier: impl Into<String>,
        order: i32,
        hook: impl IntoHook<M>,
    ) -> &Self {
        self.append(identifier.into(), order, vec![hook.into_hook(order)])
    }

    /// Registers several callables of the same type under `identifier`.
    ///
    /// Registering an empty list leaves the registry untouched.
    pub fn register_all<M, H>(
        &self,
        identifier: impl Into<String>,
        order: i32,
        hooks: impl IntoIterator<Item = H>,
    ) -> &Self
    where
        H: IntoHook<M>,
    {
        let hooks = hooks
            .into_iter()
            .map(|hook| hook.into_hook(order))
            .collect();
        self.append(identifier.into(), order, hooks)
    }

    /// Registers hooks that arrive as loosely-typed [`Value`]s, for example
    /// from a plugin loader.
    ///
    /// Every value must hold a [`Hook`]; each keeps its own order. Nothing is
    /// registered unless all values are valid.
    ///
    /// # Errors
    ///
    /// Returns [`HookError::NotCallable`] for the first value that is not a
    /// hook.
    pub fn try_register_values(
        &self,
        identifier: impl Into<String>,
        values: impl IntoIterator<Item = Value>,
    ) -> Result<&Self, HookError> {
        let identifier = identifier.into();
        let hooks = values
            .into_iter()
            .map(Hook::from_value)
            .collect::<Result<Vec<_>, _>>()
            .inspect_err(|err| {
                tracing::warn!(identifier = %identifier, error = %err, "rejected hook registration");
            })?;

        tracing::debug!(identifier = %identifier, count = hooks.len(), "registered hooks from values");
        if !hooks.is_empty() {
            self.hooks.write().entry(identifier).or_default().extend(hooks);
        }
        Ok(self)
    }

    fn append(&self, identifier: String, order: i32, hooks: Vec<Hook>) -> &Self {
        if hooks.is_empty() {
            return self;
        }

        tracing::debug!(identifier = %identifier, order, count = hooks.len(), "registered hooks");
        self.hooks.write().entry(identifier).or_default().extend(hooks);
        self
    }

    /// Removes every hook registered under `identifier`.
    ///
    /// Returns how many hooks were removed; unknown identifiers are a no-op.
    pub fn unregister(&self, identifier: &str) -> usize {
        let removed = self
            .hooks
            .write()
            .remove(identifier)
            .map_or(0, |hooks| hooks.len());
        tracing::debug!(identifier, removed, "unregistered hooks");
        removed
    }

    /// Removes every identifier and hook.
    pub fn clear(&self) {
        self.hooks.write().clear();
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Inspection
    // ─────────────────────────────────────────────────────────────────────────

    /// Checks if any hook is registered under `identifier`.
    #[must_use]
    pub fn contains(&self, identifier: &str) -> bool {
        self.hooks.read().contains_key(identifier)
    }

    /// Returns the number of hooks registered under `identifier`.
    #[must_use]
    pub fn hook_count(&self, identifier: &str) -> usize {
        self.hooks.read().get(identifier).map_or(0, Vec::len)
    }

    /// Lists the identifiers that currently have hooks, in no particular order.
    #[must_use]
    pub fn identifiers(&self) -> Vec<String> {
        self.hooks.read().keys().cloned().collect()
    }

    /// Returns `true` if nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.hooks.read().is_empty()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Retrieval
    // ─────────────────────────────────────────────────────────────────────────

    /// Retrieves the hooks under `identifiers`, recovered as `T`.
    ///
    /// Hooks of one identifier are sorted by ascending order; equal orders
    /// keep their registration order. See the [module docs](crate::registry) for how
    /// several identifiers combine.
    ///
    /// # Panics
    ///
    /// Panics if `identifiers` is empty or if any selected hook does not have
    /// the shape `T`. Use [`try_get`](Self::try_get) to handle these instead.
    #[must_use]
    pub fn get<T: HookShape>(&self, identifiers: &[&str]) -> Vec<T> {
        self.try_get(identifiers).unwrap_or_else(|err| fail(&err))
    }

    /// Fallible form of [`get`](Self::get).
    ///
    /// # Errors
    ///
    /// - [`HookError::NoIdentifiers`] if `identifiers` is empty.
    /// - [`HookError::TypeMismatch`] for the first hook that is not a `T`.
    ///   Nothing is returned for the other hooks in that case.
    pub fn try_get<T: HookShape>(&self, identifiers: &[&str]) -> Result<Vec<T>, HookError> {
        let expected = T::signature();
        let cast = self.collect(identifiers, |identifier, index, hook| {
            hook.cast::<T>().ok_or_else(|| HookError::TypeMismatch {
                identifier: identifier.to_string(),
                index,
                expected: expected.to_string(),
                found: hook.signature().to_string(),
            })
        })?;

        tracing::trace!(?identifiers, count = cast.len(), shape = %expected, "retrieved hooks");
        Ok(cast)
    }

    /// Retrieves the hooks under `identifiers` without recovering a typed
    /// callable, for use with [`Hook::call`].
    ///
    /// Ordering and the all-or-nothing rule are the same as for
    /// [`get`](Self::get).
    ///
    /// # Panics
    ///
    /// Panics if `identifiers` is empty.
    #[must_use]
    pub fn hooks(&self, identifiers: &[&str]) -> Vec<Hook> {
        self.collect(identifiers, |_, _, hook| Ok(hook.clone()))
            .unwrap_or_else(|err| fail(&err))
    }

    /// Walks the identifiers in order, converting each one's sorted hooks.
    ///
    /// Stops with an empty result at the first identifier without hooks;
    /// hooks of identifiers before it have already been converted by then,
    /// so a conversion error there still surfaces.
    fn collect<T>(
        &self,
        identifiers: &[&str],
        mut convert: impl FnMut(&str, usize, &Hook) -> Result<T, HookError>,
    ) -> Result<Vec<T>, HookError> {
        if identifiers.is_empty() {
            return Err(HookError::NoIdentifiers);
        }

        let snapshot: Vec<Option<Vec<Hook>>> = {
            let map = self.hooks.read();
            identifiers.iter().map(|&id| map.get(id).cloned()).collect()
        };

        let mut collected = Vec::new();
        for (&identifier, hooks) in identifiers.iter().zip(snapshot) {
            let Some(mut hooks) = hooks else {
                tracing::trace!(identifier, "identifier has no hooks, retrieval is empty");
                return Ok(Vec::new());
            };

            // Stable: equal orders keep registration order.
            hooks.sort_by_key(Hook::order);
            for (index, hook) in hooks.iter().enumerate() {
                collected.push(convert(identifier, index, hook)?);
            }
        }

        Ok(collected)
    }
}

/// Aborts the calling code path on a boundary fault.
fn fail(err: &HookError) -> ! {
    tracing::error!(error = %err, "hook retrieval failed");
    panic!("{err}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hook_args;
    use std::sync::Arc;
    use std::sync::Mutex;

    type Step = Arc<dyn Fn(&'static str) + Send + Sync>;
    type Unit = Arc<dyn Fn() + Send + Sync>;

    fn recorder(
        log: &Arc<Mutex<Vec<String>>>,
        name: &'static str,
    ) -> impl Fn() + Send + Sync + 'static {
        let log = Arc::clone(log);
        move || log.lock().unwrap().push(name.to_string())
    }

    #[test]
    fn register_increments_count() {
        let registry = HookRegistry::new();
        assert!(registry.is_empty());

        registry.register("a", 0, || {});
        assert_eq!(registry.hook_count("a"), 1);

        registry.register("a", 0, || {});
        assert_eq!(registry.hook_count("a"), 2);
        assert!(registry.contains("a"));
        assert!(!registry.contains("b"));
    }

    #[test]
    fn register_chaining() {
        let registry = HookRegistry::new();
        registry
            .register("a", 1, || {})
            .register("b", 2, || {});

        let mut ids = registry.identifiers();
        ids.sort();
        assert_eq!(ids, vec!["a", "b"]);
    }

    #[test]
    fn register_all_wraps_each_callable() {
        let registry = HookRegistry::new();
        let fns: Vec<fn() -> i32> = vec![|| 1, || 2, || 3];
        registry.register_all("nums", 0, fns);
        assert_eq!(registry.hook_count("nums"), 3);

        let values: Vec<i32> = registry
            .get::<Arc<dyn Fn() -> i32 + Send + Sync>>(&["nums"])
            .iter()
            .map(|f| f())
            .collect();
        assert_eq!(values, vec![1, 2, 3]);
    }

    #[test]
    fn register_all_with_nothing_creates_no_entry() {
        let registry = HookRegistry::new();
        registry.register_all("empty", 0, Vec::<fn()>::new());
        assert!(!registry.contains("empty"));
    }

    #[test]
    fn same_callable_registered_twice_runs_twice() {
        let registry = HookRegistry::new();
        let log = Arc::new(Mutex::new(Vec::new()));
        let hook = Hook::new(0, recorder(&log, "dup"));
        registry.register("x", 0, &hook).register("x", 0, &hook);

        for f in registry.get::<Unit>(&["x"]) {
            f();
        }
        assert_eq!(*log.lock().unwrap(), vec!["dup", "dup"]);
    }

    #[test]
    fn get_sorts_by_order_and_keeps_ties_stable() {
        let registry = HookRegistry::new();
        let log = Arc::new(Mutex::new(Vec::new()));

        registry
            .register("x", 5, recorder(&log, "late"))
            .register("x", 0, recorder(&log, "tie-1"))
            .register("x", -2, recorder(&log, "early"))
            .register("x", 0, recorder(&log, "tie-2"));

        for f in registry.get::<Unit>(&["x"]) {
            f();
        }
        assert_eq!(
            *log.lock().unwrap(),
            vec!["early", "tie-1", "tie-2", "late"]
        );
    }

    #[test]
    fn retrieval_does_not_reorder_storage() {
        let registry = HookRegistry::new();
        registry.register("x", 3, || {}).register("x", 1, || {});
        let _ = registry.hooks(&["x"]);

        let stored: Vec<i32> = registry.hooks.read()["x"].iter().map(Hook::order).collect();
        assert_eq!(stored, vec![3, 1]);
    }

    #[test]
    fn missing_identifier_empties_whole_retrieval() {
        let registry = HookRegistry::new();
        registry.register("present", 0, || {});

        assert_eq!(registry.get::<Unit>(&["present"]).len(), 1);
        assert!(registry.get::<Unit>(&["present", "absent"]).is_empty());
        assert!(registry.get::<Unit>(&["absent", "present"]).is_empty());
        assert!(registry.hooks(&["present", "absent"]).is_empty());
    }

    #[test]
    fn identifiers_concatenate_in_given_order() {
        let registry = HookRegistry::new();
        let log = Arc::new(Mutex::new(Vec::new()));
        registry
            .register("a", 9, recorder(&log, "a9"))
            .register("a", 1, recorder(&log, "a1"))
            .register("b", -9, recorder(&log, "b-9"));

        for f in registry.get::<Unit>(&["a", "b"]) {
            f();
        }
        for f in registry.get::<Unit>(&["b", "a"]) {
            f();
        }
        assert_eq!(
            *log.lock().unwrap(),
            vec!["a1", "a9", "b-9", "b-9", "a1", "a9"]
        );
    }

    #[test]
    fn unregister_removes_entry() {
        let registry = HookRegistry::new();
        registry.register("x", 0, || {}).register("x", 1, || {});

        assert_eq!(registry.unregister("x"), 2);
        assert!(!registry.contains("x"));
        assert!(registry.get::<Unit>(&["x"]).is_empty());
        assert_eq!(registry.unregister("x"), 0);
    }

    #[test]
    fn try_get_reports_no_identifiers() {
        let registry = HookRegistry::new();
        let Err(err) = registry.try_get::<Unit>(&[]) else {
            panic!("retrieval without identifiers must fail");
        };
        assert_eq!(err, HookError::NoIdentifiers);
    }

    #[test]
    #[should_panic(expected = "no identifiers provided")]
    fn get_without_identifiers_panics() {
        let _ = HookRegistry::new().get::<Unit>(&[]);
    }

    #[test]
    fn try_get_reports_mismatch_position() {
        let registry = HookRegistry::new();
        registry
            .register("x", 0, || {})
            .register("x", 1, |_s: &'static str| {});

        let Err(err) = registry.try_get::<Unit>(&["x"]) else {
            panic!("second hook has a different shape");
        };
        let HookError::TypeMismatch {
            identifier,
            index,
            expected,
            found,
        } = err
        else {
            panic!("expected TypeMismatch, got {err:?}");
        };
        assert_eq!(identifier, "x");
        assert_eq!(index, 1);
        assert_eq!(expected, "fn()");
        assert_eq!(found, "fn(&str)");
    }

    #[test]
    fn mismatch_before_missing_identifier_still_fails() {
        let registry = HookRegistry::new();
        registry.register("x", 0, || 1_u8);
        assert!(registry.try_get::<Unit>(&["x", "absent"]).is_err());
        assert!(registry.try_get::<Unit>(&["absent", "x"]).unwrap().is_empty());
    }

    #[test]
    fn typed_step_receives_arguments() {
        let registry = HookRegistry::new();
        let log = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&log);
        registry.register("step", 0, move |s: &'static str| {
            sink.lock().unwrap().push(s.to_string());
        });

        for step in registry.get::<Step>(&["step"]) {
            step("ran");
        }
        assert_eq!(*log.lock().unwrap(), vec!["ran"]);
    }

    #[test]
    fn hooks_support_dynamic_calls() {
        let registry = HookRegistry::new();
        registry
            .register("math", 2, |a: i32, b: i32| a * b)
            .register("math", 1, |a: i32, b: i32| a + b);

        let results: Vec<i32> = registry
            .hooks(&["math"])
            .iter()
            .map(|hook| hook.call(hook_args![3, 4]).unwrap().downcast::<i32>().unwrap())
            .collect();
        assert_eq!(results, vec![7, 12]);
    }

    #[test]
    fn try_register_values_is_all_or_nothing() {
        let registry = HookRegistry::new();
        let good = Hook::new(4, || {});

        let err = registry
            .try_register_values("x", vec![Value::new(good.clone()), Value::new("nope")])
            .unwrap_err();
        assert_eq!(err, HookError::NotCallable { found: "&str" });
        assert!(!registry.contains("x"));

        registry
            .try_register_values("x", vec![Value::new(good)])
            .unwrap();
        assert_eq!(registry.hooks(&["x"])[0].order(), 4);
    }

    #[test]
    fn debug_lists_counts() {
        let registry = HookRegistry::new();
        registry.register("x", 0, || {});
        assert_eq!(format!("{registry:?}"), r#"{"x": 1}"#);
    }
}
