//! Callable shapes that hooks can be recovered as.

use std::sync::Arc;

use variadics_please::all_tuples;

use crate::signature::{Signature, TypeInfo};

/// A typed callable a [`Hook`](crate::Hook) can be recovered as.
///
/// Implemented for `Arc<dyn Fn(P0, .., Pn) -> R + Send + Sync>` with up to
/// eight parameters. Give frequently used shapes a name with a type alias;
/// the alias and the spelled-out type are the same shape.
///
/// ```
/// use std::sync::Arc;
/// use hookline_hooks::{HookShape, TypeInfo};
///
/// type Render = Arc<dyn Fn(String) -> String + Send + Sync>;
///
/// let sig = Render::signature();
/// assert_eq!(sig.params(), &[TypeInfo::of::<String>()]);
/// assert_eq!(sig.output(), TypeInfo::of::<String>());
/// ```
///
/// The trait is sealed. Hooks store their callable as one of these `Arc`
/// types, so no other type could be recovered from them:
///
/// ```compile_fail
/// use hookline_hooks::{HookShape, Signature, TypeInfo};
///
/// #[derive(Clone)]
/// struct Handler;
///
/// impl HookShape for Handler {
///     fn signature() -> Signature {
///         Signature::new(Vec::new(), TypeInfo::of::<()>())
///     }
/// }
/// ```
pub trait HookShape: sealed::Sealed + Clone + Send + Sync + 'static {
    /// The signature a hook must have to be recovered as `Self`.
    fn signature() -> Signature;
}

mod sealed {
    pub trait Sealed {}
}

macro_rules! impl_hook_shape {
    ($($P:ident),*) => {
        impl<Ret: 'static, $($P: 'static),*> sealed::Sealed for Arc<dyn Fn($($P),*) -> Ret + Send + Sync> {}

        impl<Ret: 'static, $($P: 'static),*> HookShape for Arc<dyn Fn($($P),*) -> Ret + Send + Sync> {
            fn signature() -> Signature {
                Signature::new(vec![$(TypeInfo::of::<$P>()),*], TypeInfo::of::<Ret>())
            }
        }
    };
}

all_tuples!(impl_hook_shape, 0, 8, P);
