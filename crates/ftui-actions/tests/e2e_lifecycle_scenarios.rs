#![forbid(unsafe_code)]

//! E2E lifecycle scenarios against a widget-like host.
//!
//! Validates:
//! 1. Mixed handle / no-handle bindings: attach order, update routing, destroy.
//! 2. A behavior without a handle never receives update or destroy.
//! 3. A failing behavior aborts attach without destroying earlier handles.
//! 4. Destroy is not idempotent.
//! 5. Behaviors mutate the host through their handles.

use std::cell::RefCell;
use std::rc::Rc;

use ftui_actions::{
    AttachResult, Behavior, BehaviorError, Binding, Handle, LifecycleConfig, Params, attach,
    attach_with, bindings,
};

// ============================================================================
// Helpers
// ============================================================================

/// Shared call journal.
#[derive(Clone, Default)]
struct Journal(Rc<RefCell<Vec<String>>>);

impl Journal {
    fn push(&self, entry: impl Into<String>) {
        self.0.borrow_mut().push(entry.into());
    }

    fn take(&self) -> Vec<String> {
        std::mem::take(&mut *self.0.borrow_mut())
    }
}

/// Minimal stand-in for a UI element.
#[derive(Default)]
struct Element {
    attrs: RefCell<Vec<(String, String)>>,
}

impl Element {
    fn set(&self, key: &str, value: impl Into<String>) {
        let mut attrs = self.attrs.borrow_mut();
        let value = value.into();
        match attrs.iter_mut().find(|(k, _)| k == key) {
            Some(entry) => entry.1 = value,
            None => attrs.push((key.to_string(), value)),
        }
    }

    fn get(&self, key: &str) -> Option<String> {
        self.attrs
            .borrow()
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.clone())
    }

    fn remove(&self, key: &str) {
        self.attrs.borrow_mut().retain(|(k, _)| k != key);
    }
}

/// B1 from the reference scenario: returns both hooks.
fn b1(journal: &Journal) -> impl Fn(&Element, Option<i32>) -> AttachResult<i32> + 'static {
    let journal = journal.clone();
    move |_el: &Element, params: Option<i32>| {
        journal.push(format!("B1({params:?})"));
        let u = journal.clone();
        let d = journal.clone();
        Ok(Some(
            Handle::new()
                .on_update(move |p: i32| u.push(format!("u1({p})")))
                .on_destroy(move || d.push("d1")),
        ))
    }
}

/// B2 from the reference scenario: returns nothing.
fn b2(journal: &Journal) -> impl Fn(&Element, Option<()>) -> AttachResult<()> + 'static {
    let journal = journal.clone();
    move |_el: &Element, params: Option<()>| {
        journal.push(format!("B2({params:?})"));
        Ok(None)
    }
}

/// A behavior implemented as a struct: sets an attribute and keeps it in sync.
struct Attr {
    key: &'static str,
    host: Rc<Element>,
}

impl Behavior<Element, String> for Attr {
    fn attach(&self, el: &Element, params: Option<String>) -> AttachResult<String> {
        el.set(self.key, params.unwrap_or_default());
        let key = self.key;
        let on_update = Rc::clone(&self.host);
        let on_destroy = Rc::clone(&self.host);
        Ok(Some(
            Handle::new()
                .on_update(move |value: String| on_update.set(key, value))
                .on_destroy(move || on_destroy.remove(key)),
        ))
    }
}

// ============================================================================
// Scenarios
// ============================================================================

#[test]
fn scenario_a_mixed_handles() {
    let journal = Journal::default();
    let el = Element::default();

    let mut ctl = attach(&el, bindings![(b1(&journal), 5), (b2(&journal))]).unwrap();
    assert_eq!(journal.take(), vec!["B1(Some(5))", "B2(None)"]);

    let applied = ctl.update(bindings![(b1(&journal), 6), (b2(&journal))]);
    assert_eq!(applied, 1);
    assert_eq!(journal.take(), vec!["u1(6)"]);

    assert_eq!(ctl.destroy(), 1);
    assert_eq!(journal.take(), vec!["d1"]);
}

#[test]
fn scenario_b_no_handle() {
    let journal = Journal::default();
    let el = Element::default();

    let mut ctl = attach(&el, bindings![(b2(&journal))]).unwrap();
    assert_eq!(journal.take(), vec!["B2(None)"]);
    assert_eq!(ctl.handle_count(), 0);

    assert_eq!(ctl.update(bindings![(b2(&journal))]), 0);
    assert_eq!(ctl.update_params([Params::new(())]), 0);
    assert_eq!(ctl.destroy(), 0);
    assert!(journal.take().is_empty());
}

#[test]
fn scenario_c_failure_leaves_earlier_handles_alive() {
    let journal = Journal::default();
    let el = Element::default();
    let failing = |_el: &Element, _: Option<()>| -> AttachResult<()> {
        Err(BehaviorError::new("element is detached"))
    };

    let result = attach(&el, bindings![(b1(&journal), 1), (failing)]);
    let err = match result {
        Ok(_) => panic!("attach should fail"),
        Err(err) => err,
    };

    assert_eq!(err.failed_index(), 1);
    assert!(err.to_string().contains("element is detached"));
    // B1 ran and produced a handle, but nothing destroyed it.
    assert_eq!(journal.take(), vec!["B1(Some(1))"]);
}

#[test]
fn double_destroy_invokes_hooks_twice() {
    let journal = Journal::default();
    let el = Element::default();

    let mut ctl = attach(&el, bindings![(b1(&journal)), (b2(&journal)), (b1(&journal))]).unwrap();
    journal.take();

    assert_eq!(ctl.destroy(), 2);
    assert_eq!(ctl.destroy(), 2);
    assert_eq!(journal.take(), vec!["d1", "d1", "d1", "d1"]);
}

#[test]
fn struct_behavior_drives_host() {
    let el = Rc::new(Element::default());
    let title = Attr {
        key: "title",
        host: Rc::clone(&el),
    };
    let role = Attr {
        key: "role",
        host: Rc::clone(&el),
    };

    let mut ctl = attach_with(
        el.as_ref(),
        vec![
            Binding::with_params(title, "Open".to_string()),
            Binding::new(role, Some("button".to_string())),
        ],
        LifecycleConfig::new().with_label("button#open"),
    )
    .unwrap();
    assert_eq!(el.get("title").as_deref(), Some("Open"));
    assert_eq!(el.get("role").as_deref(), Some("button"));

    ctl.update_params([Params::new("Open file".to_string()), Params::none()]);
    assert_eq!(el.get("title").as_deref(), Some("Open file"));
    assert_eq!(el.get("role").as_deref(), Some("button"));

    ctl.destroy();
    assert!(el.attrs.borrow().is_empty());
}

#[test]
fn reordered_update_list_routes_by_position() {
    let journal = Journal::default();
    let el = Element::default();

    let number = {
        let journal = journal.clone();
        move |_el: &Element, _: Option<i32>| -> AttachResult<i32> {
            let j = journal.clone();
            Ok(Some(Handle::updating(move |n: i32| j.push(format!("number({n})")))))
        }
    };
    let text = {
        let journal = journal.clone();
        move |_el: &Element, _: Option<String>| -> AttachResult<String> {
            let j = journal.clone();
            Ok(Some(Handle::updating(move |s: String| j.push(format!("text({s})")))))
        }
    };

    let mut ctl = attach(&el, bindings![(number, 1), (text, "a".to_string())]).unwrap();

    // Swapped parameter types land on handles that cannot take them.
    let applied = ctl.update_params([Params::new("b".to_string()), Params::new(2i32)]);
    assert_eq!(applied, 0);
    assert!(journal.take().is_empty());
}
