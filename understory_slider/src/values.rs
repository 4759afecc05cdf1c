// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Handles and the ordered value set.

use alloc::vec::Vec;
use core::cmp::Ordering;
use core::slice;

use crate::range::Domain;

/// Sort direction of a [`ValueSet`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum Order {
    /// Smallest value first; used when the rail runs from `min` to `max`.
    #[default]
    Ascending,
    /// Largest value first; used when the rail is reversed.
    Descending,
}

impl Order {
    /// The order used for a rail with the given direction flag.
    #[must_use]
    pub const fn from_reversed(reversed: bool) -> Self {
        if reversed {
            Self::Descending
        } else {
            Self::Ascending
        }
    }

    /// Compares two values in this order.
    #[must_use]
    pub fn compare(self, a: f64, b: f64) -> Ordering {
        let ord = a.partial_cmp(&b).unwrap_or(Ordering::Equal);
        match self {
            Self::Ascending => ord,
            Self::Descending => ord.reverse(),
        }
    }

    /// Returns `true` if `a` sorts strictly before `b`.
    #[must_use]
    pub fn precedes(self, a: f64, b: f64) -> bool {
        self.compare(a, b) == Ordering::Less
    }
}

/// One draggable value on the rail, identified by a stable key.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Handle<K> {
    /// Identity of the handle. Unique within a [`ValueSet`].
    pub key: K,
    /// Current value; always a member of the quantized range once validated.
    pub value: f64,
}

impl<K> Handle<K> {
    /// Creates a handle.
    #[must_use]
    pub const fn new(key: K, value: f64) -> Self {
        Self { key, value }
    }
}

/// Handles sorted by value in a fixed [`Order`], with unique keys.
///
/// A value set is replaced wholesale on every change; callbacks always see a
/// complete snapshot rather than a delta.
#[derive(Clone, Debug, PartialEq)]
pub struct ValueSet<K> {
    handles: Vec<Handle<K>>,
    order: Order,
}

impl<K> ValueSet<K> {
    /// Creates an empty set.
    #[must_use]
    pub const fn new(order: Order) -> Self {
        Self {
            handles: Vec::new(),
            order,
        }
    }

    /// Creates a set from handles in any order.
    ///
    /// Handles are stably sorted by value; key uniqueness is the caller's
    /// responsibility (see [`validate_defaults`](crate::validate_defaults)).
    #[must_use]
    pub fn from_unsorted(mut handles: Vec<Handle<K>>, order: Order) -> Self {
        handles.sort_by(|a, b| order.compare(a.value, b.value));
        Self { handles, order }
    }

    pub(crate) fn from_sorted(handles: Vec<Handle<K>>, order: Order) -> Self {
        let set = Self { handles, order };
        debug_assert!(set.is_sorted(), "value set must stay sorted");
        set
    }

    /// The sort direction.
    #[must_use]
    pub fn order(&self) -> Order {
        self.order
    }

    /// The handles in sorted order.
    #[must_use]
    pub fn handles(&self) -> &[Handle<K>] {
        &self.handles
    }

    /// Consumes the set, returning its handles in sorted order.
    #[must_use]
    pub fn into_handles(self) -> Vec<Handle<K>> {
        self.handles
    }

    /// Number of handles.
    #[must_use]
    pub fn len(&self) -> usize {
        self.handles.len()
    }

    /// Returns `true` if there are no handles.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    /// Iterates the handles in sorted order.
    pub fn iter(&self) -> slice::Iter<'_, Handle<K>> {
        self.handles.iter()
    }

    /// Iterates the values in sorted order.
    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.handles.iter().map(|h| h.value)
    }

    /// Iterates the keys in value order.
    pub fn keys(&self) -> impl Iterator<Item = &K> + '_ {
        self.handles.iter().map(|h| &h.key)
    }

    /// Returns `true` if no adjacent pair is out of order.
    #[must_use]
    pub fn is_sorted(&self) -> bool {
        self.handles
            .windows(2)
            .all(|w| !self.order.precedes(w[1].value, w[0].value))
    }
}

impl<K: PartialEq> ValueSet<K> {
    /// Index of the handle with `key`.
    #[must_use]
    pub fn position(&self, key: &K) -> Option<usize> {
        self.handles.iter().position(|h| h.key == *key)
    }

    /// The handle with `key`.
    #[must_use]
    pub fn get(&self, key: &K) -> Option<&Handle<K>> {
        self.handles.iter().find(|h| h.key == *key)
    }

    /// Returns `true` if a handle with `key` exists.
    #[must_use]
    pub fn contains_key(&self, key: &K) -> bool {
        self.get(key).is_some()
    }
}

impl<K: Clone> ValueSet<K> {
    /// Segments between adjacent handles, in rail order.
    ///
    /// With `leading`, a segment runs from the rail start (the domain bound
    /// for this order) to the first handle; with `trailing`, one runs from
    /// the last handle to the rail end.
    ///
    /// ```
    /// use understory_slider::{Domain, Handle, Order, TrackEnd, ValueSet};
    ///
    /// let set = ValueSet::from_unsorted(
    ///     vec![Handle::new('b', 30.0), Handle::new('a', 10.0)],
    ///     Order::Ascending,
    /// );
    /// let domain = Domain::new(0.0, 100.0).unwrap();
    /// let tracks = set.tracks(domain, true, false);
    /// assert_eq!(tracks.len(), 2);
    /// assert_eq!(tracks[0].source, TrackEnd::Edge(0.0));
    /// assert_eq!(tracks[1].target, TrackEnd::Handle(Handle::new('b', 30.0)));
    /// ```
    #[must_use]
    pub fn tracks(&self, domain: Domain, leading: bool, trailing: bool) -> Vec<Track<K>> {
        let mut tracks = Vec::with_capacity(self.handles.len() + 1);
        let (Some(first), Some(last)) = (self.handles.first(), self.handles.last()) else {
            return tracks;
        };
        if leading {
            tracks.push(Track {
                source: TrackEnd::Edge(domain.start(self.order)),
                target: TrackEnd::Handle(first.clone()),
            });
        }
        tracks.extend(self.handles.windows(2).map(|w| Track {
            source: TrackEnd::Handle(w[0].clone()),
            target: TrackEnd::Handle(w[1].clone()),
        }));
        if trailing {
            tracks.push(Track {
                source: TrackEnd::Handle(last.clone()),
                target: TrackEnd::Edge(domain.end(self.order)),
            });
        }
        tracks
    }
}

impl<'a, K> IntoIterator for &'a ValueSet<K> {
    type Item = &'a Handle<K>;
    type IntoIter = slice::Iter<'a, Handle<K>>;

    fn into_iter(self) -> Self::IntoIter {
        self.handles.iter()
    }
}

/// One end of a [`Track`].
#[derive(Clone, Debug, PartialEq)]
pub enum TrackEnd<K> {
    /// A bound of the domain.
    Edge(f64),
    /// A handle.
    Handle(Handle<K>),
}

impl<K> TrackEnd<K> {
    /// The value at this end.
    #[must_use]
    pub fn value(&self) -> f64 {
        match self {
            Self::Edge(value) => *value,
            Self::Handle(handle) => handle.value,
        }
    }
}

/// A rail segment between two handles or between a handle and a domain bound.
#[derive(Clone, Debug, PartialEq)]
pub struct Track<K> {
    /// Rail-order start of the segment.
    pub source: TrackEnd<K>,
    /// Rail-order end of the segment.
    pub target: TrackEnd<K>,
}
