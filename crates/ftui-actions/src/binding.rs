#![forbid(unsafe_code)]

//! Bindings: positional `(behavior, params)` pairs.
//!
//! A binding list is heterogeneous: each behavior has its own parameter type.
//! [`Binding`] erases both the behavior and its parameter type so the list
//! fits in a single `Vec<Binding<H>>`, while construction stays statically
//! typed (a binding can only be built from a behavior and parameters that
//! agree).
//!
//! Position in the list is the only identity. The controller routes the
//! parameters at index `i` of an update list to the handle created from index
//! `i` of the attach list, whatever behavior the update list names there.

use std::any::Any;
use std::fmt;
use std::marker::PhantomData;

use crate::behavior::{Behavior, ErasedHandle};
use crate::error::BehaviorError;

/// A type-erased parameter slot. Empty when a binding carries no parameters.
#[derive(Default)]
pub struct Params(Option<Box<dyn Any>>);

impl Params {
    /// An empty slot.
    #[must_use]
    pub const fn none() -> Self {
        Self(None)
    }

    /// A slot holding `params`.
    #[must_use]
    pub fn new<P: 'static>(params: P) -> Self {
        Self(Some(Box::new(params)))
    }

    #[must_use]
    pub fn from_option<P: 'static>(params: Option<P>) -> Self {
        params.map_or_else(Self::none, Self::new)
    }

    #[inline]
    #[must_use]
    pub fn is_none(&self) -> bool {
        self.0.is_none()
    }

    #[inline]
    #[must_use]
    pub fn is_some(&self) -> bool {
        self.0.is_some()
    }

    pub(crate) fn into_inner(self) -> Option<Box<dyn Any>> {
        self.0
    }

    /// Recover a typed value. An empty slot or a payload of another type
    /// yields `None`.
    fn downcast<P: 'static>(self) -> Option<P> {
        self.0.and_then(|p| p.downcast::<P>().ok()).map(|p| *p)
    }
}

impl fmt::Debug for Params {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(if self.is_some() {
            "Params(Some(..))"
        } else {
            "Params(None)"
        })
    }
}

// ---------------------------------------------------------------------------
// Erased behavior
// ---------------------------------------------------------------------------

pub(crate) type ErasedAttach = Result<Option<Box<dyn ErasedHandle>>, BehaviorError>;

trait ErasedBehavior<H: ?Sized> {
    fn attach_erased(&self, host: &H, params: Params) -> ErasedAttach;
}

struct Typed<B, P> {
    behavior: B,
    _params: PhantomData<fn(P)>,
}

impl<H, P, B> ErasedBehavior<H> for Typed<B, P>
where
    H: ?Sized,
    P: 'static,
    B: Behavior<H, P>,
{
    fn attach_erased(&self, host: &H, params: Params) -> ErasedAttach {
        let handle = self.behavior.attach(host, params.downcast::<P>())?;
        Ok(handle.map(|h| Box::new(h) as Box<dyn ErasedHandle>))
    }
}

// ---------------------------------------------------------------------------
// Binding
// ---------------------------------------------------------------------------

/// A behavior paired with its (possibly absent) parameters.
pub struct Binding<H: ?Sized> {
    behavior: Box<dyn ErasedBehavior<H>>,
    params: Params,
}

impl<H: ?Sized> Binding<H> {
    /// Pair `behavior` with an optional parameter value.
    #[must_use]
    pub fn new<P, B>(behavior: B, params: Option<P>) -> Self
    where
        P: 'static,
        B: Behavior<H, P> + 'static,
    {
        Self {
            behavior: Box::new(Typed {
                behavior,
                _params: PhantomData,
            }),
            params: Params::from_option(params),
        }
    }

    /// Pair `behavior` with `params`.
    #[must_use]
    pub fn with_params<P, B>(behavior: B, params: P) -> Self
    where
        P: 'static,
        B: Behavior<H, P> + 'static,
    {
        Self::new(behavior, Some(params))
    }

    /// A binding with no parameters. The behavior will see `None`.
    #[must_use]
    pub fn bare<P, B>(behavior: B) -> Self
    where
        P: 'static,
        B: Behavior<H, P> + 'static,
    {
        Self::new(behavior, None::<P>)
    }

    #[inline]
    #[must_use]
    pub fn params(&self) -> &Params {
        &self.params
    }

    #[inline]
    #[must_use]
    pub fn has_params(&self) -> bool {
        self.params.is_some()
    }

    /// Discard the behavior, keeping only the parameter slot.
    #[must_use]
    pub fn into_params(self) -> Params {
        self.params
    }

    pub(crate) fn invoke(self, host: &H) -> ErasedAttach {
        self.behavior.attach_erased(host, self.params)
    }
}

impl<H: ?Sized> fmt::Debug for Binding<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Binding")
            .field("params", &self.params)
            .finish_non_exhaustive()
    }
}

/// Build a `Vec<Binding<_>>` from `(behavior, params)` and `(behavior)`
/// entries.
///
/// ```
/// use ftui_actions::{AttachResult, Binding, bindings};
///
/// fn focus(_host: &str, _params: Option<()>) -> AttachResult<()> {
///     Ok(None)
/// }
/// fn pad(_host: &str, _width: Option<u16>) -> AttachResult<u16> {
///     Ok(None)
/// }
///
/// let list: Vec<Binding<str>> = bindings![(pad, 2u16), (focus)];
/// assert_eq!(list.len(), 2);
/// assert!(list[0].has_params());
/// assert!(!list[1].has_params());
/// ```
#[macro_export]
macro_rules! bindings {
    (@one $behavior:expr) => {
        $crate::Binding::bare($behavior)
    };
    (@one $behavior:expr, $params:expr) => {
        $crate::Binding::with_params($behavior, $params)
    };
    () => {
        ::std::vec::Vec::new()
    };
    ($( ( $behavior:expr $(, $params:expr)? ) ),+ $(,)?) => {
        ::std::vec![ $( $crate::bindings!(@one $behavior $(, $params)?) ),+ ]
    };
}
