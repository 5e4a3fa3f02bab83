#![forbid(unsafe_code)]

//! Positional behavior lifecycle for FrankenTUI hosts.
//!
//! Attach an ordered list of independent behaviors to one host, run each
//! behavior's setup once, then forward updates and teardown to the handles
//! they returned, matched by list position.
//!
//! - [`Behavior`]: setup logic run once per host; closures qualify.
//! - [`Handle`]: optional update and destroy hooks returned by a behavior.
//! - [`Binding`]: a behavior plus its (possibly absent) parameters.
//! - [`Controller`]: returned by [`attach`]; forwards `update` and `destroy`.
//!
//! # Example
//!
//! ```
//! use std::cell::RefCell;
//! use std::rc::Rc;
//! use ftui_actions::{AttachResult, Handle, attach, bindings};
//!
//! #[derive(Default)]
//! struct Element {
//!     classes: RefCell<Vec<String>>,
//! }
//!
//! fn tooltip(el: &Element, text: Option<String>) -> AttachResult<String> {
//!     let current = Rc::new(RefCell::new(text.unwrap_or_default()));
//!     el.classes.borrow_mut().push("has-tooltip".into());
//!     let shown = Rc::clone(&current);
//!     Ok(Some(Handle::updating(move |text: String| *shown.borrow_mut() = text)))
//! }
//!
//! fn focusable(el: &Element, _: Option<()>) -> AttachResult<()> {
//!     el.classes.borrow_mut().push("focusable".into());
//!     Ok(None)
//! }
//!
//! let el = Element::default();
//! let mut ctl = attach(&el, bindings![(tooltip, "Save".to_string()), (focusable)]).unwrap();
//! assert_eq!(*el.classes.borrow(), ["has-tooltip", "focusable"]);
//!
//! assert_eq!(ctl.update(bindings![(tooltip, "Save all".to_string()), (focusable)]), 1);
//! assert_eq!(ctl.destroy(), 0);
//! ```
//!
//! # Contract
//!
//! Position is the only identity. An update list must name the same behaviors
//! in the same order as the attach list; mismatches are not detected and
//! route parameters to whichever handle sits at that position.

pub mod behavior;
pub mod binding;
pub mod config;
pub mod controller;
pub mod error;

pub use behavior::{AttachResult, Behavior, Handle};
pub use binding::{Binding, Params};
pub use config::LifecycleConfig;
pub use controller::{Controller, ControllerState, attach, attach_with};
pub use error::{AttachError, BehaviorError};
