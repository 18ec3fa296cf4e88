//! Explicit signature descriptors for wrapped callables.
//!
//! A [`Signature`] is recorded once, when a callable is wrapped into a
//! [`Hook`](crate::Hook), and is what retrieval compares against the shape a
//! caller asks for. Comparison is by [`TypeId`], never by name.

use core::any::TypeId;
use core::fmt;

/// A type identity paired with its name for diagnostics.
#[derive(Debug, Clone, Copy)]
pub struct TypeInfo {
    id: TypeId,
    name: &'static str,
}

impl TypeInfo {
    /// Creates the `TypeInfo` for `T`.
    #[must_use]
    pub fn of<T: 'static>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: core::any::type_name::<T>(),
        }
    }

    /// Returns the type name for debugging.
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    fn is_unit(&self) -> bool {
        self.id == TypeId::of::<()>()
    }
}

impl PartialEq for TypeInfo {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TypeInfo {}

/// Parameter and return shape of a wrapped callable.
///
/// For variadic callables the trailing parameter is the `Vec<T>` that
/// collects surplus arguments; it counts towards [`param_count`](Self::param_count).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signature {
    params: Vec<TypeInfo>,
    output: TypeInfo,
    rest: Option<TypeInfo>,
}

impl Signature {
    /// Creates a signature for a callable taking `params` and returning `output`.
    #[must_use]
    pub fn new(params: Vec<TypeInfo>, output: TypeInfo) -> Self {
        Self {
            params,
            output,
            rest: None,
        }
    }

    /// Creates a variadic signature.
    ///
    /// `params` must already include the trailing collection parameter;
    /// `rest` is the element type of that collection.
    #[must_use]
    pub fn variadic(params: Vec<TypeInfo>, output: TypeInfo, rest: TypeInfo) -> Self {
        debug_assert!(!params.is_empty(), "variadic signature needs a trailing parameter");
        Self {
            params,
            output,
            rest: Some(rest),
        }
    }

    /// Declared parameters, in order.
    #[must_use]
    pub fn params(&self) -> &[TypeInfo] {
        &self.params
    }

    /// Declared return type.
    #[must_use]
    pub fn output(&self) -> TypeInfo {
        self.output
    }

    /// Number of declared parameters.
    #[must_use]
    pub fn param_count(&self) -> usize {
        self.params.len()
    }

    /// Whether the last parameter collects a variable number of arguments.
    #[must_use]
    pub fn is_variadic(&self) -> bool {
        self.rest.is_some()
    }

    /// Element type of the variadic tail, if any.
    #[must_use]
    pub fn rest(&self) -> Option<TypeInfo> {
        self.rest
    }

    /// Returns `true` when both signatures have identical parameter and
    /// return types.
    ///
    /// Variadic-ness is ignored: the tail is an ordinary `Vec<T>` parameter
    /// once the callable is recovered as a typed value.
    #[must_use]
    pub fn same_shape(&self, other: &Signature) -> bool {
        self.output == other.output && self.params == other.params
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("fn(")?;
        let last = self.params.len().saturating_sub(1);
        for (i, param) in self.params.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            match self.rest() {
                Some(rest) if i == last => write!(f, "...{}", rest.name())?,
                _ => f.write_str(param.name())?,
            }
        }
        f.write_str(")")?;
        if !self.output.is_unit() {
            write!(f, " -> {}", self.output.name())?;
        }
        Ok(())
    }
}
