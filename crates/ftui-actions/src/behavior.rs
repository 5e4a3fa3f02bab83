#![forbid(unsafe_code)]

//! Behaviors and the handles they return.
//!
//! A [`Behavior`] is a unit of setup logic run once against a host. It may
//! hand back a [`Handle`] holding the hooks the controller later forwards to:
//! an update hook receiving fresh parameters, and a destroy hook.
//!
//! # Invariants
//!
//! 1. A behavior is called exactly once per attach; the controller never
//!    calls it again for updates.
//! 2. Either hook may be absent. An absent hook silently ignores the call.
//! 3. Dropping a handle does not run its destroy hook.

use std::any::Any;
use std::fmt;

use crate::error::BehaviorError;

/// What a behavior returns: an optional handle, or the setup failure.
pub type AttachResult<P> = Result<Option<Handle<P>>, BehaviorError>;

/// Setup logic attached to a host of type `H`, taking parameters of type `P`.
///
/// Any closure `Fn(&H, Option<P>) -> AttachResult<P>` is a behavior:
///
/// ```
/// use ftui_actions::{AttachResult, Behavior, Handle};
/// use std::cell::Cell;
///
/// let highlight = |host: &Cell<u8>, level: Option<u8>| -> AttachResult<u8> {
///     host.set(level.unwrap_or(1));
///     Ok(Some(Handle::new().on_update(|_level: u8| {})))
/// };
///
/// let host = Cell::new(0);
/// let handle = highlight.attach(&host, Some(4)).unwrap();
/// assert_eq!(host.get(), 4);
/// assert!(handle.is_some_and(|h| h.has_update()));
/// ```
pub trait Behavior<H: ?Sized, P> {
    /// Run setup against `host`. `params` is `None` when the binding carries
    /// no parameters.
    ///
    /// # Errors
    ///
    /// Returns the behavior's own failure; the controller propagates it
    /// without cleaning up earlier behaviors.
    fn attach(&self, host: &H, params: Option<P>) -> AttachResult<P>;
}

impl<H, P, F> Behavior<H, P> for F
where
    H: ?Sized,
    F: Fn(&H, Option<P>) -> AttachResult<P>,
{
    fn attach(&self, host: &H, params: Option<P>) -> AttachResult<P> {
        self(host, params)
    }
}

/// Live state returned by a behavior: an optional update hook and an
/// optional destroy hook.
pub struct Handle<P> {
    update: Option<Box<dyn FnMut(P)>>,
    destroy: Option<Box<dyn FnMut()>>,
}

impl<P> Handle<P> {
    /// A handle with neither hook.
    #[must_use]
    pub fn new() -> Self {
        Self {
            update: None,
            destroy: None,
        }
    }

    /// A handle with only an update hook.
    #[must_use]
    pub fn updating(update: impl FnMut(P) + 'static) -> Self {
        Self::new().on_update(update)
    }

    /// A handle with only a destroy hook.
    #[must_use]
    pub fn destroying(destroy: impl FnMut() + 'static) -> Self {
        Self::new().on_destroy(destroy)
    }

    /// Set the update hook (builder pattern).
    #[must_use]
    pub fn on_update(mut self, update: impl FnMut(P) + 'static) -> Self {
        self.update = Some(Box::new(update));
        self
    }

    /// Set the destroy hook (builder pattern).
    #[must_use]
    pub fn on_destroy(mut self, destroy: impl FnMut() + 'static) -> Self {
        self.destroy = Some(Box::new(destroy));
        self
    }

    #[inline]
    #[must_use]
    pub fn has_update(&self) -> bool {
        self.update.is_some()
    }

    #[inline]
    #[must_use]
    pub fn has_destroy(&self) -> bool {
        self.destroy.is_some()
    }

    /// Forward `params` to the update hook. Returns whether a hook ran.
    pub fn update(&mut self, params: P) -> bool {
        match self.update.as_mut() {
            Some(update) => {
                update(params);
                true
            }
            None => false,
        }
    }

    /// Run the destroy hook. Returns whether a hook ran.
    ///
    /// Not idempotent: every call runs the hook again.
    pub fn destroy(&mut self) -> bool {
        match self.destroy.as_mut() {
            Some(destroy) => {
                destroy();
                true
            }
            None => false,
        }
    }
}

impl<P> Default for Handle<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P> fmt::Debug for Handle<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Handle")
            .field("update", &self.has_update())
            .field("destroy", &self.has_destroy())
            .finish()
    }
}

// ---------------------------------------------------------------------------
// Type erasure
// ---------------------------------------------------------------------------

/// Outcome of forwarding an erased update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum UpdateOutcome {
    Applied,
    NoHook,
    TypeMismatch,
}

/// A handle with its parameter type erased, so one controller can hold
/// handles of different behaviors.
pub(crate) trait ErasedHandle {
    fn update_any(&mut self, params: Box<dyn Any>) -> UpdateOutcome;
    fn destroy(&mut self) -> bool;
}

impl<P: 'static> ErasedHandle for Handle<P> {
    fn update_any(&mut self, params: Box<dyn Any>) -> UpdateOutcome {
        if !self.has_update() {
            return UpdateOutcome::NoHook;
        }
        match params.downcast::<P>() {
            Ok(params) => {
                self.update(*params);
                UpdateOutcome::Applied
            }
            Err(_) => UpdateOutcome::TypeMismatch,
        }
    }

    fn destroy(&mut self) -> bool {
        Handle::destroy(self)
    }
}
