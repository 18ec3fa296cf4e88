//! Loosely-typed values for the dynamic invocation path.
//!
//! [`Hook::call`](crate::Hook::call) takes its arguments as [`Value`]s and
//! returns its result as one. Hosts that know the callable shape statically
//! should retrieve typed callables instead and call them directly.

use core::any::Any;
use core::fmt;

/// A type-erased value tagged with its type name.
pub struct Value {
    inner: Box<dyn Any + Send>,
    type_name: &'static str,
}

impl Value {
    /// Wraps `value`.
    #[must_use]
    pub fn new<T: Any + Send>(value: T) -> Self {
        Self {
            inner: Box::new(value),
            type_name: core::any::type_name::<T>(),
        }
    }

    /// Name of the wrapped type.
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Returns `true` if the wrapped value is a `T`.
    #[must_use]
    pub fn is<T: Any>(&self) -> bool {
        self.inner.is::<T>()
    }

    /// Returns `true` if this is the unit value.
    #[must_use]
    pub fn is_unit(&self) -> bool {
        self.inner.is::<()>()
    }

    /// Borrows the wrapped value as a `T`.
    #[must_use]
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.inner.downcast_ref::<T>()
    }

    /// Takes the wrapped value out as a `T`.
    ///
    /// # Errors
    ///
    /// Returns the original `Value` unchanged if it does not hold a `T`.
    pub fn downcast<T: Any>(self) -> Result<T, Self> {
        let type_name = self.type_name;
        self.inner
            .downcast::<T>()
            .map(|boxed| *boxed)
            .map_err(|inner| Self { inner, type_name })
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Value")
            .field("type_name", &self.type_name)
            .finish_non_exhaustive()
    }
}

/// Builds a `Vec<Value>` argument list for [`Hook::call`](crate::Hook::call).
///
/// ```
/// use hookline_hooks::{IntoHook, hook_args};
///
/// let hook = (|a: i32, b: i32| a + b).into_hook(0);
/// let sum = hook.call(hook_args![2, 3]).unwrap();
/// assert_eq!(sum.downcast::<i32>().unwrap(), 5);
/// ```
#[macro_export]
macro_rules! hook_args {
    () => {
        ::std::vec::Vec::<$crate::Value>::new()
    };
    ($($arg:expr),+ $(,)?) => {
        ::std::vec![$($crate::Value::new($arg)),+]
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn downcast_recovers_value() {
        let value = Value::new(vec![1, 2, 3]);
        assert!(value.is::<Vec<i32>>());
        assert_eq!(value.downcast::<Vec<i32>>().unwrap(), vec![1, 2, 3]);
    }

    #[test]
    fn failed_downcast_returns_original() {
        let value = Value::new(String::from("hi"));
        let value = value.downcast::<i32>().unwrap_err();
        assert_eq!(value.type_name(), "alloc::string::String");
        assert_eq!(value.downcast_ref::<String>().map(String::as_str), Some("hi"));
    }

    #[test]
    fn unit_is_detected() {
        assert!(Value::new(()).is_unit());
        assert!(!Value::new(0_u8).is_unit());
    }

    #[test]
    fn hook_args_wraps_each_argument() {
        let args = hook_args![1_i32, "two", 3.0_f64];
        assert_eq!(args.len(), 3);
        assert!(args[0].is::<i32>());
        assert!(args[1].is::<&'static str>());
        assert!(args[2].is::<f64>());
        assert!(hook_args![].is_empty());
    }
}
