#![forbid(unsafe_code)]

//! Attach a binding list to a host and drive the resulting handles.
//!
//! [`attach`] runs every behavior once, in list order, and returns a
//! [`Controller`] holding one slot per binding. The controller forwards
//! [`update`](Controller::update) and [`destroy`](Controller::destroy) calls
//! to the handles by position.
//!
//! # Invariants
//!
//! 1. The controller has exactly one slot per attach-time binding, in the same
//!    order. A slot is empty when its behavior returned no handle.
//! 2. Handles are never replaced. `update` calls a handle's own update hook
//!    and never re-runs a behavior.
//! 3. `update` at position `i` runs the hook iff slot `i` holds a handle with
//!    an update hook and the new parameter slot at `i` is non-empty.
//! 4. `destroy` runs every destroy hook once per call, in attach order.
//!
//! # Failure Modes
//!
//! - **Behavior fails during attach**: the error is returned at once with the
//!   failing position. Earlier handles are dropped without their destroy
//!   hooks running; later behaviors never run.
//! - **Update list shorter than the attach list**: trailing handles are left
//!   alone.
//! - **Update list longer than the attach list**: extra entries are ignored.
//! - **Parameters of the wrong type at a position**: skipped, logged at DEBUG.
//! - **Calls after `destroy`**: executed as usual (a second `destroy` runs the
//!   hooks again), logged at WARN when configured.

use std::fmt;
use std::marker::PhantomData;

use crate::behavior::{ErasedHandle, UpdateOutcome};
use crate::binding::{Binding, Params};
use crate::config::LifecycleConfig;
use crate::error::{AttachError, Result};

/// Lifecycle state of a [`Controller`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ControllerState {
    /// Handles are live; `update` and `destroy` are expected.
    #[default]
    Attached,
    /// `destroy` has run. Further calls are a contract violation.
    Spent,
}

/// Attach `bindings` to `host` with the default [`LifecycleConfig`].
///
/// # Errors
///
/// Returns [`AttachError::Behavior`] for the first behavior that fails.
pub fn attach<H: ?Sized>(
    host: &H,
    bindings: impl IntoIterator<Item = Binding<H>>,
) -> Result<Controller<H>> {
    attach_with(host, bindings, LifecycleConfig::default())
}

/// Attach `bindings` to `host` using `config`.
///
/// Each behavior is called with the host and its parameter slot, strictly in
/// list order.
///
/// # Errors
///
/// Returns [`AttachError::Behavior`] for the first behavior that fails.
/// Handles produced before the failure are dropped without being destroyed.
pub fn attach_with<H: ?Sized>(
    host: &H,
    bindings: impl IntoIterator<Item = Binding<H>>,
    config: LifecycleConfig,
) -> Result<Controller<H>> {
    let span = tracing::debug_span!(
        "actions.attach",
        label = %config.label,
        count = tracing::field::Empty
    );
    let _guard = span.enter();

    let bindings = bindings.into_iter();
    let mut slots: Vec<Option<Box<dyn ErasedHandle>>> =
        Vec::with_capacity(bindings.size_hint().0);

    for (index, binding) in bindings.enumerate() {
        tracing::trace!(index, has_params = binding.has_params(), "actions.invoke");
        match binding.invoke(host) {
            Ok(slot) => slots.push(slot),
            Err(source) => {
                span.record("count", index + 1);
                tracing::warn!(index, error = %source, "behavior failed to attach");
                return Err(AttachError::Behavior { index, source });
            }
        }
    }

    span.record("count", slots.len());
    let handles = slots.iter().filter(|s| s.is_some()).count();
    tracing::debug!(bindings = slots.len(), handles, "actions.attached");

    Ok(Controller {
        slots,
        config,
        state: ControllerState::Attached,
        _host: PhantomData,
    })
}

/// Owns the handles produced by [`attach`] and forwards calls to them by
/// position.
///
/// The host is not owned; the controller only remembers its type so update
/// lists are built for the same host type.
pub struct Controller<H: ?Sized> {
    slots: Vec<Option<Box<dyn ErasedHandle>>>,
    config: LifecycleConfig,
    state: ControllerState,
    _host: PhantomData<fn(&H)>,
}

impl<H: ?Sized> Controller<H> {
    /// Forward the parameters of `bindings` to the stored handles.
    ///
    /// Only the parameter slots are used; the behaviors in `bindings` are
    /// dropped without being called. Returns the number of update hooks run.
    pub fn update(&mut self, bindings: impl IntoIterator<Item = Binding<H>>) -> usize {
        self.update_params(bindings.into_iter().map(Binding::into_params))
    }

    /// Forward bare parameter slots to the stored handles by position.
    ///
    /// Returns the number of update hooks run.
    pub fn update_params(&mut self, params: impl IntoIterator<Item = Params>) -> usize {
        self.note_if_spent("update");

        let mut requested = 0usize;
        let mut applied = 0usize;
        for (index, params) in params.into_iter().enumerate() {
            requested += 1;
            let Some(Some(handle)) = self.slots.get_mut(index) else {
                continue;
            };
            let Some(params) = params.into_inner() else {
                continue;
            };
            match handle.update_any(params) {
                UpdateOutcome::Applied => applied += 1,
                UpdateOutcome::NoHook => {}
                UpdateOutcome::TypeMismatch => {
                    tracing::debug!(
                        label = %self.config.label,
                        index,
                        "params type does not match handle; update skipped"
                    );
                }
            }
        }

        tracing::debug!(
            label = %self.config.label,
            requested,
            slots = self.slots.len(),
            applied,
            "actions.update"
        );
        applied
    }

    /// Run every destroy hook in attach order and mark the controller spent.
    ///
    /// Not idempotent: calling it again runs the same hooks again. Returns the
    /// number of destroy hooks run.
    pub fn destroy(&mut self) -> usize {
        self.note_if_spent("destroy");

        let invoked = self
            .slots
            .iter_mut()
            .flatten()
            .map(|handle| handle.destroy())
            .filter(|ran| *ran)
            .count();
        self.state = ControllerState::Spent;

        tracing::debug!(label = %self.config.label, invoked, "actions.destroy");
        invoked
    }

    fn note_if_spent(&self, op: &'static str) {
        if self.state == ControllerState::Spent && self.config.warn_on_spent {
            tracing::warn!(label = %self.config.label, op, "call on spent controller");
        }
    }

    /// Number of slots (equal to the attach-time binding count).
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Number of slots holding a handle.
    #[must_use]
    pub fn handle_count(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    /// Whether the behavior at `index` returned a handle.
    #[must_use]
    pub fn has_handle(&self, index: usize) -> bool {
        matches!(self.slots.get(index), Some(Some(_)))
    }

    #[inline]
    #[must_use]
    pub fn state(&self) -> ControllerState {
        self.state
    }

    #[inline]
    #[must_use]
    pub fn is_spent(&self) -> bool {
        self.state == ControllerState::Spent
    }

    #[inline]
    #[must_use]
    pub fn config(&self) -> &LifecycleConfig {
        &self.config
    }
}

impl<H: ?Sized> fmt::Debug for Controller<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Controller")
            .field("label", &self.config.label)
            .field("slots", &self.len())
            .field("handles", &self.handle_count())
            .field("state", &self.state)
            .finish()
    }
}
