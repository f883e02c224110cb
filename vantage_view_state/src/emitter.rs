// Copyright 2026 the Vantage Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A composed notification emitter.
//!
//! The adapter owns an emitter rather than inheriting an event-source base:
//! listeners register against one event kind and receive each emission by
//! shared reference, synchronously, in registration order.

use alloc::boxed::Box;
use core::fmt;

use smallvec::SmallVec;

/// Handle identifying one registered listener.
///
/// Returned by [`ViewStateAdapter::on_view_changed`] and accepted by
/// [`ViewStateAdapter::remove_view_changed_listener`].
///
/// [`ViewStateAdapter::on_view_changed`]: crate::ViewStateAdapter::on_view_changed
/// [`ViewStateAdapter::remove_view_changed_listener`]: crate::ViewStateAdapter::remove_view_changed_listener
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

type Listener<E> = Box<dyn FnMut(&E)>;

/// Listener registry for a single event kind.
///
/// One inline slot: the common case is a single subscriber wired up at
/// construction time.
pub(crate) struct Emitter<E> {
    next_id: u64,
    listeners: SmallVec<[(ListenerId, Listener<E>); 1]>,
}

impl<E> Emitter<E> {
    pub(crate) fn new() -> Self {
        Self {
            next_id: 0,
            listeners: SmallVec::new(),
        }
    }

    pub(crate) fn add(&mut self, listener: Listener<E>) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, listener));
        id
    }

    /// Removes a listener, returning whether the id was still registered.
    pub(crate) fn remove(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(listener_id, _)| *listener_id != id);
        self.listeners.len() != before
    }

    pub(crate) fn emit(&mut self, event: &E) {
        for (_, listener) in &mut self.listeners {
            listener(event);
        }
    }
}

impl<E> fmt::Debug for Emitter<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Emitter")
            .field("listeners", &self.listeners.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use alloc::boxed::Box;
    use alloc::rc::Rc;
    use alloc::vec::Vec;
    use core::cell::RefCell;

    use super::Emitter;

    #[test]
    fn listeners_fire_in_registration_order() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut emitter = Emitter::<u32>::new();

        let first = Rc::clone(&seen);
        emitter.add(Box::new(move |value| first.borrow_mut().push((1, *value))));
        let second = Rc::clone(&seen);
        emitter.add(Box::new(move |value| second.borrow_mut().push((2, *value))));

        emitter.emit(&7);
        assert_eq!(*seen.borrow(), [(1, 7), (2, 7)], "in-order delivery");
    }

    #[test]
    fn removal_is_idempotent() {
        let mut emitter = Emitter::<u32>::new();
        let id = emitter.add(Box::new(|_| {}));
        assert!(emitter.remove(id), "first removal succeeds");
        assert!(!emitter.remove(id), "second removal reports missing");
    }

    #[test]
    fn removed_listeners_no_longer_fire() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut emitter = Emitter::<u32>::new();

        let sink = Rc::clone(&seen);
        let id = emitter.add(Box::new(move |value| sink.borrow_mut().push(*value)));
        emitter.emit(&1);
        emitter.remove(id);
        emitter.emit(&2);

        assert_eq!(*seen.borrow(), [1], "no delivery after removal");
    }
}
