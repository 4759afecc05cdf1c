// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Live and committed value notifications.

use alloc::vec::Vec;
use core::fmt;

use crate::values::ValueSet;

/// Receives value sets produced by a drag.
///
/// [`on_update`](Self::on_update) fires once per input event that moved a
/// handle and may be called at pointer-event frequency.
/// [`on_change`](Self::on_change) fires exactly once when a drag completes.
/// Both receive the full ordered set.
pub trait UpdateSink<K> {
    /// A move changed the values.
    fn on_update(&mut self, values: &ValueSet<K>) {
        let _ = values;
    }

    /// A drag was released; `values` is the committed result.
    fn on_change(&mut self, values: &ValueSet<K>) {
        let _ = values;
    }
}

impl<K> UpdateSink<K> for () {}

/// An [`UpdateSink`] backed by two closures.
///
/// ```
/// use understory_slider::{Callbacks, Handle, Order, UpdateSink, ValueSet};
///
/// let mut updates = 0;
/// let mut last_commit: Vec<f64> = Vec::new();
/// let mut sink = Callbacks::new(
///     |_: &ValueSet<u8>| updates += 1,
///     |values: &ValueSet<u8>| last_commit = values.values().collect(),
/// );
///
/// let set = ValueSet::from_unsorted(vec![Handle::new(0, 4.0)], Order::Ascending);
/// sink.on_update(&set);
/// sink.on_change(&set);
/// drop(sink);
/// assert_eq!(updates, 1);
/// assert_eq!(last_commit, [4.0]);
/// ```
pub struct Callbacks<U, C> {
    /// Called for live updates.
    pub on_update: U,
    /// Called for committed changes.
    pub on_change: C,
}

impl<U, C> Callbacks<U, C> {
    /// Wraps the two callbacks.
    pub const fn new(on_update: U, on_change: C) -> Self {
        Self {
            on_update,
            on_change,
        }
    }
}

impl<U, C> fmt::Debug for Callbacks<U, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Callbacks").finish_non_exhaustive()
    }
}

impl<K, U, C> UpdateSink<K> for Callbacks<U, C>
where
    U: FnMut(&ValueSet<K>),
    C: FnMut(&ValueSet<K>),
{
    fn on_update(&mut self, values: &ValueSet<K>) {
        (self.on_update)(values);
    }

    fn on_change(&mut self, values: &ValueSet<K>) {
        (self.on_change)(values);
    }
}

/// An [`UpdateSink`] that keeps every set it receives.
///
/// Useful for tests and for hosts that apply updates on their next frame.
#[derive(Clone, Debug, Default)]
pub struct Recorder<K> {
    /// Live updates, oldest first.
    pub updates: Vec<ValueSet<K>>,
    /// Committed changes, oldest first.
    pub commits: Vec<ValueSet<K>>,
}

impl<K> Recorder<K> {
    /// Creates an empty recorder.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            updates: Vec::new(),
            commits: Vec::new(),
        }
    }

    /// The most recent live update.
    #[must_use]
    pub fn last_update(&self) -> Option<&ValueSet<K>> {
        self.updates.last()
    }

    /// The most recent commit.
    #[must_use]
    pub fn last_commit(&self) -> Option<&ValueSet<K>> {
        self.commits.last()
    }

    /// Forgets everything recorded so far.
    pub fn clear(&mut self) {
        self.updates.clear();
        self.commits.clear();
    }
}

impl<K: Clone> UpdateSink<K> for Recorder<K> {
    fn on_update(&mut self, values: &ValueSet<K>) {
        self.updates.push(values.clone());
    }

    fn on_change(&mut self, values: &ValueSet<K>) {
        self.commits.push(values.clone());
    }
}
