//! Observable value store
//!
//! `Store<T>` holds the current value behind an `Rc` and calls every
//! subscriber synchronously, in subscription order, each time the value is
//! replaced. Handles are cheap clones of the same store. Everything runs on
//! one thread; subscribers may read any store (including this one) while
//! being notified.

use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::{Rc, Weak};

type Callback<T> = Box<dyn FnMut(&Rc<T>)>;

struct Inner<T> {
    value: Rc<T>,
    next_id: u64,
    subscribers: Vec<(u64, Callback<T>)>,
    /// Ids cancelled while their callbacks were checked out for a publish
    cancelled: HashSet<u64>,
}

/// Shared, observable value
pub struct Store<T> {
    inner: Rc<RefCell<Inner<T>>>,
}

impl<T> Clone for Store<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T: 'static> Store<T> {
    pub fn new(value: T) -> Self {
        Self {
            inner: Rc::new(RefCell::new(Inner {
                value: Rc::new(value),
                next_id: 0,
                subscribers: Vec::new(),
                cancelled: HashSet::new(),
            })),
        }
    }

    /// Current snapshot
    pub fn get(&self) -> Rc<T> {
        Rc::clone(&self.inner.borrow().value)
    }

    /// Replace the value and notify subscribers
    pub fn set(&self, value: T) {
        self.inner.borrow_mut().value = Rc::new(value);
        self.publish();
    }

    /// Derive a new value from the current one, then notify
    pub fn update(&self, f: impl FnOnce(&T) -> T) {
        let next = f(&self.get());
        self.set(next);
    }

    /// Register a callback for every future change
    ///
    /// The callback stays registered for as long as the returned
    /// [`Subscription`] is alive.
    pub fn subscribe(&self, callback: impl FnMut(&Rc<T>) + 'static) -> Subscription {
        let id = {
            let mut inner = self.inner.borrow_mut();
            let id = inner.next_id;
            inner.next_id += 1;
            inner.subscribers.push((id, Box::new(callback)));
            id
        };

        let weak: Weak<RefCell<Inner<T>>> = Rc::downgrade(&self.inner);
        Subscription::new(move || {
            if let Some(inner) = weak.upgrade() {
                if let Ok(mut inner) = inner.try_borrow_mut() {
                    let before = inner.subscribers.len();
                    inner.subscribers.retain(|(sid, _)| *sid != id);
                    if inner.subscribers.len() == before {
                        inner.cancelled.insert(id);
                    }
                }
            }
        })
    }

    pub fn subscriber_count(&self) -> usize {
        self.inner.borrow().subscribers.len()
    }

    fn publish(&self) {
        let (value, mut callbacks) = {
            let mut inner = self.inner.borrow_mut();
            (Rc::clone(&inner.value), std::mem::take(&mut inner.subscribers))
        };

        tracing::trace!(subscribers = callbacks.len(), "publishing store change");

        for (id, callback) in callbacks.iter_mut() {
            if self.inner.borrow().cancelled.contains(id) {
                continue;
            }
            callback(&value);
        }

        let mut inner = self.inner.borrow_mut();
        let cancelled = std::mem::take(&mut inner.cancelled);
        callbacks.retain(|(id, _)| !cancelled.contains(id));
        // Subscribers added during the publish were pushed onto the now-empty list.
        let added = std::mem::take(&mut inner.subscribers);
        callbacks.extend(added);
        inner.subscribers = callbacks;
    }
}

impl<T: Default + 'static> Default for Store<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

/// Guard that keeps a store subscription alive
///
/// Dropping it unregisters the callback, so views owned by a torn-down scope
/// stop recomputing.
#[must_use = "dropping a Subscription immediately unsubscribes"]
pub struct Subscription {
    cancel: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    fn new(cancel: impl FnOnce() + 'static) -> Self {
        Self {
            cancel: Some(Box::new(cancel)),
        }
    }

    /// Unsubscribe now
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

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.cancel.is_some())
            .finish()
    }
}
