//! Single-writer observable values.
//!
//! Page-level state (pointer position, theme, per-section visibility) is held
//! in an [`Observable`]: one owner can write, any number of [`Watch`] handles
//! can read and subscribe. Subscribing returns a [`Subscription`] guard; the
//! callback stays registered for exactly as long as the guard lives, which
//! ties listener cleanup to the lifetime of whatever mounted it.
//!
//! ```rust
//! use folio::signal::Observable;
//! use std::cell::Cell;
//! use std::rc::Rc;
//!
//! let visible = Observable::new(false);
//! let seen = Rc::new(Cell::new(0));
//! let counter = seen.clone();
//! let sub = visible.watch().subscribe(move |_| counter.set(counter.get() + 1));
//!
//! visible.set(true);
//! visible.set(true); // unchanged, no notification
//! assert_eq!(seen.get(), 1);
//!
//! drop(sub);
//! visible.set(false);
//! assert_eq!(seen.get(), 1);
//! ```
//!
//! Everything here is `Rc`-based and `!Send`: the page runtime
//! is a single event loop and so is this model of it.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

type Callback<T> = Rc<dyn Fn(&T)>;

struct Slot<T> {
    value: T,
    subscribers: Vec<(usize, Callback<T>)>,
    next_id: usize,
}

impl<T> Slot<T> {
    fn next_id(&mut self) -> usize {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}

/// The writable end of an observable value. Not `Clone`: one writer per value.
pub struct Observable<T> {
    slot: Rc<RefCell<Slot<T>>>,
}

/// A read-only handle onto an [`Observable`].
pub struct Watch<T> {
    slot: Rc<RefCell<Slot<T>>>,
}

impl<T> Clone for Watch<T> {
    fn clone(&self) -> Self {
        Self {
            slot: Rc::clone(&self.slot),
        }
    }
}

impl<T: Clone + PartialEq + 'static> Observable<T> {
    pub fn new(value: T) -> Self {
        Self {
            slot: Rc::new(RefCell::new(Slot {
                value,
                subscribers: Vec::new(),
                next_id: 0,
            })),
        }
    }

    pub fn get(&self) -> T {
        self.slot.borrow().value.clone()
    }

    /// Store a new value. Subscribers run only if the value actually changed;
    /// the return value says whether it did.
    pub fn set(&self, value: T) -> bool {
        let callbacks: Vec<Callback<T>> = {
            let mut slot = self.slot.borrow_mut();
            if slot.value == value {
                return false;
            }
            slot.value = value.clone();
            slot.subscribers.iter().map(|(_, cb)| Rc::clone(cb)).collect()
        };
        // Borrow released: callbacks may read the value or drop subscriptions.
        for cb in callbacks {
            cb(&value);
        }
        true
    }

    /// Apply `f` to a copy of the current value and store the result.
    pub fn update(&self, f: impl FnOnce(&T) -> T) -> bool {
        let next = f(&self.slot.borrow().value);
        self.set(next)
    }

    pub fn watch(&self) -> Watch<T> {
        Watch {
            slot: Rc::clone(&self.slot),
        }
    }
}

impl<T: Clone + PartialEq + 'static> Watch<T> {
    pub fn get(&self) -> T {
        self.slot.borrow().value.clone()
    }

    /// Register `callback` for every future change.
    pub fn subscribe(&self, callback: impl Fn(&T) + 'static) -> Subscription {
        let id = {
            let mut slot = self.slot.borrow_mut();
            let id = slot.next_id();
            slot.subscribers.push((id, Rc::new(callback)));
            id
        };
        let weak: Weak<RefCell<Slot<T>>> = Rc::downgrade(&self.slot);
        Subscription {
            cancel: Some(Box::new(move || {
                if let Some(slot) = weak.upgrade() {
                    slot.borrow_mut().subscribers.retain(|(sid, _)| *sid != id);
                }
            })),
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.slot.borrow().subscribers.len()
    }
}

/// Keeps a callback registered. Dropping it unsubscribes.
#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription {
    cancel: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    /// Unsubscribe now. Same as dropping, but reads better at call sites.
    pub fn cancel(mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn set_reports_change() {
        let obs = Observable::new(1);
        assert!(obs.set(2));
        assert!(!obs.set(2));
        assert_eq!(obs.get(), 2);
    }

    #[test]
    fn watch_sees_writes() {
        let obs = Observable::new("light".to_string());
        let watch = obs.watch();
        obs.set("dark".to_string());
        assert_eq!(watch.get(), "dark");
    }

    #[test]
    fn subscriber_receives_new_value() {
        let obs = Observable::new(0);
        let last = Rc::new(Cell::new(-1));
        let sink = last.clone();
        let _sub = obs.watch().subscribe(move |v| sink.set(*v));
        obs.set(7);
        assert_eq!(last.get(), 7);
    }

    #[test]
    fn unchanged_value_does_not_notify() {
        let obs = Observable::new(false);
        let calls = Rc::new(Cell::new(0));
        let c = calls.clone();
        let _sub = obs.watch().subscribe(move |_| c.set(c.get() + 1));
        obs.set(false);
        obs.set(true);
        obs.set(true);
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn dropping_subscription_unsubscribes() {
        let obs = Observable::new(0);
        let watch = obs.watch();
        let sub = watch.subscribe(|_| {});
        assert_eq!(watch.subscriber_count(), 1);
        drop(sub);
        assert_eq!(watch.subscriber_count(), 0);
    }

    #[test]
    fn cancel_unsubscribes_only_that_callback() {
        let obs = Observable::new(0);
        let watch = obs.watch();
        let a = Rc::new(Cell::new(0));
        let b = Rc::new(Cell::new(0));
        let (ca, cb) = (a.clone(), b.clone());
        let sub_a = watch.subscribe(move |_| ca.set(ca.get() + 1));
        let _sub_b = watch.subscribe(move |_| cb.set(cb.get() + 1));

        sub_a.cancel();
        obs.set(1);
        assert_eq!(a.get(), 0);
        assert_eq!(b.get(), 1);
    }

    #[test]
    fn subscription_outliving_observable_is_harmless() {
        let obs = Observable::new(0);
        let sub = obs.watch().subscribe(|_| {});
        drop(obs);
        drop(sub);
    }

    #[test]
    fn update_derives_from_current() {
        let obs = Observable::new(3);
        obs.update(|v| v * 2);
        assert_eq!(obs.get(), 6);
    }
}
