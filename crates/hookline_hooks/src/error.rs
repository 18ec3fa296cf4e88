//! Errors produced while wrapping, invoking, and retrieving hooks.

/// Errors that can occur while working with hooks.
///
/// Two groups exist:
///
/// - **Boundary faults** ([`NotCallable`](Self::NotCallable),
///   [`NoIdentifiers`](Self::NoIdentifiers), [`TypeMismatch`](Self::TypeMismatch)):
///   the panicking APIs ([`HookRegistry::get`](crate::HookRegistry::get) and
///   friends) abort on these. The `try_*` variants hand them back so a plugin
///   loader can contain them.
/// - **Invocation errors** ([`ArgumentCount`](Self::ArgumentCount),
///   [`TooFewArguments`](Self::TooFewArguments), [`ArgumentType`](Self::ArgumentType)):
///   always returned from [`Hook::call`](crate::Hook::call).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HookError {
    /// A value handed to the dynamic registration path was not a hook.
    #[error("expected function, got {found}")]
    NotCallable {
        /// Type name of the rejected value.
        found: &'static str,
    },

    /// A non-variadic hook was called with the wrong number of arguments.
    #[error("expected {expected} arguments, got {got}")]
    ArgumentCount {
        /// Declared parameter count.
        expected: usize,
        /// Supplied argument count.
        got: usize,
    },

    /// A variadic hook was called with fewer than its fixed arguments.
    #[error("expected at least {expected} arguments, got {got}")]
    TooFewArguments {
        /// Number of fixed (non-variadic) parameters.
        expected: usize,
        /// Supplied argument count.
        got: usize,
    },

    /// An argument did not hold the type the hook declares at that position.
    #[error("argument {index}: expected {expected}, got {found}")]
    ArgumentType {
        /// Zero-based argument position.
        index: usize,
        /// Declared parameter type.
        expected: &'static str,
        /// Type actually held by the argument.
        found: &'static str,
    },

    /// Retrieval was requested without any identifier.
    #[error("no identifiers provided")]
    NoIdentifiers,

    /// A stored hook cannot be recovered as the requested callable type.
    #[error(
        "hook {index} under '{identifier}' is not of type {expected} but {found}, cannot convert"
    )]
    TypeMismatch {
        /// Identifier the hook was registered under.
        identifier: String,
        /// Position of the hook within the identifier's sorted list.
        index: usize,
        /// Shape requested by the caller.
        expected: String,
        /// Shape the hook was registered with.
        found: String,
    },
}

impl HookError {
    /// Returns `true` for errors the panicking API surface treats as fatal.
    #[must_use]
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::NotCallable { .. } | Self::NoIdentifiers | Self::TypeMismatch { .. }
        )
    }
}
