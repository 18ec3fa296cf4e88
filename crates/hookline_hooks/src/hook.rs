//! The [`Hook`] wrapper and the traits that build one from a callable.
//!
//! A hook owns three views of the same callable:
//!
//! - the typed callable, erased behind `Any`, recovered by retrieval
//!   (see [`HookShape`](crate::HookShape));
//! - an invoker taking [`Value`] arguments, used by [`Hook::call`];
//! - the [`Signature`] both are checked against.
//!
//! All three are fixed at construction. A `Hook` is immutable and cloning it
//! only bumps a reference count.

use core::any::Any;
use core::fmt;
use std::sync::Arc;
use std::vec;

use variadics_please::all_tuples;

use crate::error::HookError;
use crate::signature::{Signature, TypeInfo};
use crate::value::Value;

type Invoker = dyn Fn(Vec<Value>) -> Result<Value, HookError> + Send + Sync;

struct HookInner {
    order: i32,
    signature: Signature,
    /// `Arc<dyn Fn(..) -> R + Send + Sync>` matching `signature`.
    callable: Box<dyn Any + Send + Sync>,
    invoker: Box<Invoker>,
}

/// A callable wrapped with its signature and dispatch order.
///
/// Build one with [`Hook::new`] (or [`IntoHook::into_hook`]) for ordinary
/// callables and [`Hook::variadic`] for callables whose last parameter
/// collects any number of trailing arguments.
///
/// # Example
///
/// ```
/// use hookline_hooks::{Hook, hook_args};
///
/// let hook = Hook::new(-1, |list: Vec<i32>| {
///     let mut list = list;
///     list.push(1);
///     list
/// });
///
/// assert_eq!(hook.order(), -1);
/// assert_eq!(hook.num_args(), 1);
/// assert!(!hook.is_variadic());
///
/// let out = hook.call(hook_args![vec![1, 2, 3]]).unwrap();
/// assert_eq!(out.downcast::<Vec<i32>>().unwrap(), vec![1, 2, 3, 1]);
/// ```
#[derive(Clone)]
pub struct Hook {
    inner: Arc<HookInner>,
}

impl Hook {
    /// Wraps `f` with the given order.
    ///
    /// Passing an existing [`Hook`] returns it unchanged, keeping its own
    /// order.
    #[must_use]
    pub fn new<M>(order: i32, f: impl IntoHook<M>) -> Self {
        f.into_hook(order)
    }

    /// Wraps a callable whose last parameter is a `Vec<T>` collecting every
    /// argument past the fixed ones.
    ///
    /// ```
    /// use hookline_hooks::{Hook, hook_args};
    ///
    /// let join = Hook::variadic(0, |sep: &'static str, parts: Vec<String>| parts.join(sep));
    /// assert!(join.is_variadic());
    ///
    /// let out = join
    ///     .call(hook_args!["-", String::from("a"), String::from("b")])
    ///     .unwrap();
    /// assert_eq!(out.downcast::<String>().unwrap(), "a-b");
    /// ```
    #[must_use]
    pub fn variadic<M>(order: i32, f: impl IntoVariadicHook<M>) -> Self {
        f.into_variadic_hook(order)
    }

    /// Recovers a hook passed around as a loosely-typed [`Value`].
    ///
    /// # Errors
    ///
    /// Returns [`HookError::NotCallable`] if `value` does not hold a `Hook`.
    pub fn from_value(value: Value) -> Result<Self, HookError> {
        value.downcast::<Hook>().map_err(|value| HookError::NotCallable {
            found: value.type_name(),
        })
    }

    pub(crate) fn from_parts<F>(
        order: i32,
        signature: Signature,
        callable: F,
        invoker: Box<Invoker>,
    ) -> Self
    where
        F: Any + Send + Sync,
    {
        Self {
            inner: Arc::new(HookInner {
                order,
                signature,
                callable: Box::new(callable),
                invoker,
            }),
        }
    }

    /// Dispatch order; lower values run first.
    #[must_use]
    pub fn order(&self) -> i32 {
        self.inner.order
    }

    /// Number of declared parameters, including a variadic tail.
    #[must_use]
    pub fn num_args(&self) -> usize {
        self.inner.signature.param_count()
    }

    /// Whether the last parameter collects trailing arguments.
    #[must_use]
    pub fn is_variadic(&self) -> bool {
        self.inner.signature.is_variadic()
    }

    /// The signature recorded at construction.
    #[must_use]
    pub fn signature(&self) -> &Signature {
        &self.inner.signature
    }

    pub(crate) fn callable(&self) -> &(dyn Any + Send + Sync) {
        self.inner.callable.as_ref()
    }

    /// Invokes the hook with loosely-typed arguments.
    ///
    /// A variadic hook needs at least `num_args() - 1` arguments; any other
    /// hook needs exactly `num_args()`. The callable's own return value,
    /// whatever it is (including an `Err`), comes back as the `Ok` value.
    ///
    /// # Errors
    ///
    /// - [`HookError::TooFewArguments`] / [`HookError::ArgumentCount`] when
    ///   the argument count does not fit the signature.
    /// - [`HookError::ArgumentType`] when an argument holds the wrong type.
    pub fn call(&self, args: Vec<Value>) -> Result<Value, HookError> {
        let got = args.len();
        let declared = self.num_args();

        if self.is_variadic() {
            if got < declared - 1 {
                return Err(HookError::TooFewArguments {
                    expected: declared - 1,
                    got,
                });
            }
        } else if got != declared {
            return Err(HookError::ArgumentCount {
                expected: declared,
                got,
            });
        }

        (self.inner.invoker)(args)
    }

    /// Recovers the wrapped callable as `T`, if the shapes match.
    #[must_use]
    pub fn cast<T: crate::HookShape>(&self) -> Option<T> {
        if self.signature().same_shape(&T::signature()) {
            self.callable().downcast_ref::<T>().cloned()
        } else {
            None
        }
    }
}

impl fmt::Debug for Hook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Hook")
            .field("order", &self.inner.order)
            .field("signature", &format_args!("{}", self.inner.signature))
            .finish_non_exhaustive()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Argument unpacking
// ─────────────────────────────────────────────────────────────────────────────

/// Cursor over the arguments of one dynamic call.
struct Args {
    values: core::iter::Enumerate<vec::IntoIter<Value>>,
    declared: usize,
    supplied: usize,
}

impl Args {
    fn new(values: Vec<Value>, declared: usize) -> Self {
        let supplied = values.len();
        Self {
            values: values.into_iter().enumerate(),
            declared,
            supplied,
        }
    }

    fn take<T: Any>(&mut self) -> Result<T, HookError> {
        let Some((index, value)) = self.values.next() else {
            return Err(HookError::ArgumentCount {
                expected: self.declared,
                got: self.supplied,
            });
        };
        downcast_arg(index, value)
    }

    fn rest<T: Any>(&mut self) -> Result<Vec<T>, HookError> {
        self.values
            .by_ref()
            .map(|(index, value)| downcast_arg(index, value))
            .collect()
    }
}

fn downcast_arg<T: Any>(index: usize, value: Value) -> Result<T, HookError> {
    value.downcast::<T>().map_err(|value| HookError::ArgumentType {
        index,
        expected: core::any::type_name::<T>(),
        found: value.type_name(),
    })
}

// ─────────────────────────────────────────────────────────────────────────────
// IntoHook
// ─────────────────────────────────────────────────────────────────────────────

/// Conversion into a [`Hook`].
///
/// Implemented for every `Fn` of up to eight parameters that is
/// `Send + Sync + 'static`, and for [`Hook`] itself. The `Marker` parameter
/// only disambiguates the implementations and is always inferred.
///
/// Values that are not callable do not implement this trait, so they are
/// rejected when the registration is compiled rather than when it runs.
pub trait IntoHook<Marker>: Sized {
    /// Wraps `self` with the given order.
    fn into_hook(self, order: i32) -> Hook;
}

/// Marker for [`IntoHook`] on values that already are hooks.
pub struct AlreadyWrapped;

impl IntoHook<AlreadyWrapped> for Hook {
    fn into_hook(self, _order: i32) -> Hook {
        self
    }
}

impl IntoHook<AlreadyWrapped> for &Hook {
    fn into_hook(self, _order: i32) -> Hook {
        self.clone()
    }
}

impl<Func, Ret> IntoHook<fn() -> Ret> for Func
where
    Func: Fn() -> Ret + Send + Sync + 'static,
    Ret: Send + 'static,
{
    fn into_hook(self, order: i32) -> Hook {
        let typed: Arc<dyn Fn() -> Ret + Send + Sync> = Arc::new(self);
        let invoke = Arc::clone(&typed);
        Hook::from_parts(
            order,
            Signature::new(Vec::new(), TypeInfo::of::<Ret>()),
            typed,
            Box::new(move |_args: Vec<Value>| -> Result<Value, HookError> {
                Ok(Value::new(invoke()))
            }),
        )
    }
}

macro_rules! impl_into_hook {
    ($($P:ident),*) => {
        impl<Func, Ret, $($P),*> IntoHook<fn($($P),*) -> Ret> for Func
        where
            Func: Fn($($P),*) -> Ret + Send + Sync + 'static,
            Ret: Send + 'static,
            $($P: Send + 'static),*
        {
            fn into_hook(self, order: i32) -> Hook {
                let signature = Signature::new(
                    vec![$(TypeInfo::of::<$P>()),*],
                    TypeInfo::of::<Ret>(),
                );
                let declared = signature.param_count();
                let typed: Arc<dyn Fn($($P),*) -> Ret + Send + Sync> = Arc::new(self);
                let invoke = Arc::clone(&typed);
                Hook::from_parts(
                    order,
                    signature,
                    typed,
                    Box::new(move |values: Vec<Value>| -> Result<Value, HookError> {
                        let args = &mut Args::new(values, declared);
                        Ok(Value::new(invoke($(args.take::<$P>()?),*)))
                    }),
                )
            }
        }
    };
}

all_tuples!(impl_into_hook, 1, 8, P);

// ─────────────────────────────────────────────────────────────────────────────
// IntoVariadicHook
// ─────────────────────────────────────────────────────────────────────────────

/// Conversion into a variadic [`Hook`].
///
/// Implemented for every `Fn(P0, .., Pn, Vec<Item>) -> Ret` with up to seven
/// fixed parameters. Surplus arguments given to [`Hook::call`] are each
/// unpacked as `Item` and collected into the trailing `Vec`.
pub trait IntoVariadicHook<Marker>: Sized {
    /// Wraps `self` as a variadic hook with the given order.
    fn into_variadic_hook(self, order: i32) -> Hook;
}

macro_rules! impl_into_variadic_hook {
    ($($P:ident),*) => {
        impl<Func, Ret, Item, $($P),*> IntoVariadicHook<fn($($P,)* Vec<Item>) -> Ret> for Func
        where
            Func: Fn($($P,)* Vec<Item>) -> Ret + Send + Sync + 'static,
            Ret: Send + 'static,
            Item: Send + 'static,
            $($P: Send + 'static),*
        {
            fn into_variadic_hook(self, order: i32) -> Hook {
                let signature = Signature::variadic(
                    vec![$(TypeInfo::of::<$P>(),)* TypeInfo::of::<Vec<Item>>()],
                    TypeInfo::of::<Ret>(),
                    TypeInfo::of::<Item>(),
                );
                let declared = signature.param_count();
                let typed: Arc<dyn Fn($($P,)* Vec<Item>) -> Ret + Send + Sync> = Arc::new(self);
                let invoke = Arc::clone(&typed);
                Hook::from_parts(
                    order,
                    signature,
                    typed,
                    Box::new(move |values: Vec<Value>| -> Result<Value, HookError> {
                        let args = &mut Args::new(values, declared);
                        Ok(Value::new(invoke($(args.take::<$P>()?,)* args.rest::<Item>()?)))
                    }),
                )
            }
        }
    };
}

all_tuples!(impl_into_variadic_hook, 0, 7, P);
