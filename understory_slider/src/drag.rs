// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drag session state: which handle is being dragged, by which modality.
//!
//! ## Usage
//!
//! 1) On pointer down, call [`DragState::activate`] with the handle key. This
//!    subscribes the move/end listeners for the event's modality.
//! 2) While [`DragState::accepts`] returns `true`, feed move events to the
//!    resolver for [`DragState::active_key`].
//! 3) On pointer up, call [`DragState::release`]; it unsubscribes exactly the
//!    listeners that activation subscribed.
//!
//! ## Minimal example
//!
//! ```
//! use kurbo::Point;
//! use understory_slider::{DragState, ListenerRegistry, PointerEvent, PointerKind};
//!
//! #[derive(Default)]
//! struct Listeners(Vec<PointerKind>);
//!
//! impl ListenerRegistry for Listeners {
//!     fn subscribe(&mut self, kind: PointerKind) {
//!         self.0.push(kind);
//!     }
//!     fn unsubscribe(&mut self, kind: PointerKind) {
//!         self.0.retain(|k| *k != kind);
//!     }
//! }
//!
//! let mut listeners = Listeners::default();
//! let mut drag = DragState::new();
//!
//! assert!(drag.activate(&mut listeners, "low", &PointerEvent::mouse(Point::ZERO)));
//! assert_eq!(drag.active_key(), Some(&"low"));
//! assert_eq!(listeners.0, [PointerKind::Mouse]);
//!
//! // A touch end does not end a mouse drag.
//! assert!(drag.release(&mut listeners, PointerKind::Touch).is_none());
//!
//! let session = drag.release(&mut listeners, PointerKind::Mouse).unwrap();
//! assert_eq!(session.active(), &"low");
//! assert!(listeners.0.is_empty());
//! ```

use crate::pointer::{PointerEvent, PointerKind};

/// Registers the move/end listener pair for one input modality.
///
/// For DOM-like hosts this is typically the document-level `mousemove` /
/// `mouseup` or `touchmove` / `touchend` pair. Hosts that already route every
/// pointer event to the slider can use `()`.
pub trait ListenerRegistry {
    /// Starts delivering move and end events of `kind`.
    fn subscribe(&mut self, kind: PointerKind);

    /// Stops delivering move and end events of `kind`.
    fn unsubscribe(&mut self, kind: PointerKind);
}

impl ListenerRegistry for () {
    fn subscribe(&mut self, _kind: PointerKind) {}

    fn unsubscribe(&mut self, _kind: PointerKind) {}
}

/// Ownership of one subscribed listener pair.
///
/// Created by [`Subscription::open`] and consumed by
/// [`Subscription::close`]. It cannot be cloned, so every open is matched by
/// at most one close.
#[derive(Debug, PartialEq, Eq)]
#[must_use = "dropping a subscription leaves its listeners registered"]
pub struct Subscription {
    kind: PointerKind,
}

impl Subscription {
    /// Subscribes the listener pair for `kind`.
    pub fn open<R: ListenerRegistry + ?Sized>(registry: &mut R, kind: PointerKind) -> Self {
        registry.subscribe(kind);
        Self { kind }
    }

    /// The modality this subscription listens to.
    #[must_use]
    pub fn kind(&self) -> PointerKind {
        self.kind
    }

    /// Unsubscribes the listener pair.
    pub fn close<R: ListenerRegistry + ?Sized>(self, registry: &mut R) {
        registry.unsubscribe(self.kind);
    }
}

/// The handle being dragged and the modality dragging it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DragSession<K> {
    active: K,
    kind: PointerKind,
}

impl<K> DragSession<K> {
    /// Key of the dragged handle.
    #[must_use]
    pub fn active(&self) -> &K {
        &self.active
    }

    /// Modality of the drag.
    #[must_use]
    pub fn kind(&self) -> PointerKind {
        self.kind
    }
}

#[derive(Debug)]
struct Active<K> {
    session: DragSession<K>,
    subscription: Subscription,
}

/// Idle or active drag state for one slider.
///
/// At most one session exists at a time. The state owns the session's
/// [`Subscription`]; [`release`](Self::release) and [`end`](Self::end) are the
/// only ways to drop it.
#[derive(Debug)]
pub struct DragState<K> {
    active: Option<Active<K>>,
}

impl<K> Default for DragState<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K> DragState<K> {
    /// Creates an idle state.
    #[must_use]
    pub const fn new() -> Self {
        Self { active: None }
    }

    /// Returns `true` while a session is active.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.active.is_some()
    }

    /// The active session, if any.
    #[must_use]
    pub fn session(&self) -> Option<&DragSession<K>> {
        self.active.as_ref().map(|a| &a.session)
    }

    /// Key of the dragged handle, if any.
    #[must_use]
    pub fn active_key(&self) -> Option<&K> {
        self.session().map(DragSession::active)
    }

    /// Starts a session for `key` driven by `event`'s modality.
    ///
    /// Returns `false` and stays idle if a session is already active, or if
    /// `event` is a touch with zero or several contacts.
    pub fn activate<R: ListenerRegistry + ?Sized>(
        &mut self,
        registry: &mut R,
        key: K,
        event: &PointerEvent,
    ) -> bool {
        if self.active.is_some() || event.is_multi_touch() || event.position().is_none() {
            return false;
        }
        let kind = event.kind();
        self.active = Some(Active {
            session: DragSession { active: key, kind },
            subscription: Subscription::open(registry, kind),
        });
        true
    }

    /// Returns `true` if `event` belongs to the active session.
    ///
    /// Events of the other modality and multi-contact touches are not
    /// accepted.
    #[must_use]
    pub fn accepts(&self, event: &PointerEvent) -> bool {
        self.session()
            .is_some_and(|s| s.kind == event.kind() && !event.is_multi_touch())
    }

    /// Ends the session if it was started by `kind`, unsubscribing its
    /// listeners. Returns the finished session.
    pub fn release<R: ListenerRegistry + ?Sized>(
        &mut self,
        registry: &mut R,
        kind: PointerKind,
    ) -> Option<DragSession<K>> {
        if self.session()?.kind != kind {
            return None;
        }
        self.end(registry)
    }

    /// Ends any active session regardless of modality, unsubscribing its
    /// listeners. Used for teardown.
    pub fn end<R: ListenerRegistry + ?Sized>(&mut self, registry: &mut R) -> Option<DragSession<K>> {
        let Active {
            session,
            subscription,
        } = self.active.take()?;
        subscription.close(registry);
        Some(session)
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use kurbo::Point;

    use super::*;

    #[derive(Default)]
    struct Log(Vec<(&'static str, PointerKind)>);

    impl ListenerRegistry for Log {
        fn subscribe(&mut self, kind: PointerKind) {
            self.0.push(("subscribe", kind));
        }

        fn unsubscribe(&mut self, kind: PointerKind) {
            self.0.push(("unsubscribe", kind));
        }
    }

    fn mouse() -> PointerEvent {
        PointerEvent::mouse(Point::new(1.0, 1.0))
    }

    #[test]
    fn new_state_is_idle() {
        let drag = DragState::<u32>::default();
        assert!(!drag.is_dragging());
        assert_eq!(drag.active_key(), None);
        assert!(!drag.accepts(&mouse()));
    }

    #[test]
    fn activation_subscribes_one_pair() {
        let mut log = Log::default();
        let mut drag = DragState::new();

        assert!(drag.activate(&mut log, 7_u32, &mouse()));
        assert!(drag.is_dragging());
        assert_eq!(drag.session().map(DragSession::kind), Some(PointerKind::Mouse));
        assert_eq!(log.0, [("subscribe", PointerKind::Mouse)]);
    }

    #[test]
    fn second_activation_is_rejected() {
        let mut log = Log::default();
        let mut drag = DragState::new();
        assert!(drag.activate(&mut log, 1_u32, &mouse()));
        assert!(!drag.activate(&mut log, 2, &PointerEvent::touch([Point::ZERO])));
        assert_eq!(drag.active_key(), Some(&1));
        assert_eq!(log.0.len(), 1);
    }

    #[test]
    fn multi_touch_does_not_activate() {
        let mut log = Log::default();
        let mut drag = DragState::new();
        let pinch = PointerEvent::touch([Point::ZERO, Point::new(3.0, 3.0)]);
        assert!(!drag.activate(&mut log, 1_u32, &pinch));
        assert!(!drag.activate(&mut log, 1_u32, &PointerEvent::touch([])));
        assert!(!drag.is_dragging());
        assert!(log.0.is_empty());
    }

    #[test]
    fn accepts_only_matching_modality() {
        let mut drag = DragState::new();
        assert!(drag.activate(&mut (), 1_u32, &PointerEvent::touch([Point::ZERO])));
        assert!(drag.accepts(&PointerEvent::touch([Point::new(4.0, 0.0)])));
        assert!(!drag.accepts(&mouse()));
        assert!(!drag.accepts(&PointerEvent::touch([Point::ZERO, Point::ZERO])));
    }

    #[test]
    fn release_pairs_with_activation() {
        let mut log = Log::default();
        let mut drag = DragState::new();
        assert!(drag.activate(&mut log, 1_u32, &PointerEvent::touch([Point::ZERO])));

        assert_eq!(drag.release(&mut log, PointerKind::Mouse), None);
        assert!(drag.is_dragging());

        let session = drag.release(&mut log, PointerKind::Touch).unwrap();
        assert_eq!(session.active(), &1);
        assert!(!drag.is_dragging());
        assert_eq!(
            log.0,
            [
                ("subscribe", PointerKind::Touch),
                ("unsubscribe", PointerKind::Touch)
            ]
        );

        // Releasing again is a no-op.
        assert_eq!(drag.release(&mut log, PointerKind::Touch), None);
        assert_eq!(log.0.len(), 2);
    }

    #[test]
    fn repeated_drags_do_not_leak_listeners() {
        let mut log = Log::default();
        let mut drag = DragState::new();
        for _ in 0..3 {
            assert!(drag.activate(&mut log, 1_u32, &mouse()));
            assert!(drag.release(&mut log, PointerKind::Mouse).is_some());
        }
        let subscribed = log.0.iter().filter(|(op, _)| *op == "subscribe").count();
        let unsubscribed = log.0.iter().filter(|(op, _)| *op == "unsubscribe").count();
        assert_eq!((subscribed, unsubscribed), (3, 3));
    }

    #[test]
    fn end_tears_down_any_modality() {
        let mut log = Log::default();
        let mut drag = DragState::new();
        assert!(drag.activate(&mut log, 1_u32, &mouse()));
        assert!(drag.end(&mut log).is_some());
        assert!(drag.end(&mut log).is_none());
        assert_eq!(log.0.last(), Some(&("unsubscribe", PointerKind::Mouse)));
    }
}
