// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Collision resolution between handles that share a rail.
//!
//! [`resolve`] takes the previous [`ValueSet`], the key being dragged, and a
//! proposed value, and returns a conflict-free next set. It is a pure
//! function: replaying the same inputs always yields the same output.
//!
//! ## Push vs. swap
//!
//! ```
//! use understory_slider::{Domain, Handle, Mode, Order, Resolution, Scales, ValueSet, resolve};
//!
//! let scales = Scales::new(Domain::new(100.0, 500.0).unwrap(), 5.0, false).unwrap();
//! let prev = ValueSet::from_unsorted(
//!     vec![Handle::new("a", 150.0), Handle::new("b", 300.0)],
//!     Order::Ascending,
//! );
//!
//! // Push: "b" is shoved along so the order never inverts.
//! let Resolution::Changed(pushed) = resolve(Mode::Push, &scales, &prev, &"a", 310.0) else {
//!     unreachable!()
//! };
//! assert_eq!(pushed.handles(), [Handle::new("a", 310.0), Handle::new("b", 310.0)]);
//!
//! // Swap: "a" passes through "b" and the keys trade places.
//! let Resolution::Changed(swapped) = resolve(Mode::Swap, &scales, &prev, &"a", 310.0) else {
//!     unreachable!()
//! };
//! assert_eq!(swapped.handles(), [Handle::new("b", 300.0), Handle::new("a", 310.0)]);
//! ```

use crate::error::ConfigError;
use crate::scale::Scales;
use crate::values::{Handle, Order, ValueSet};

/// Collision policy between handles.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Mode {
    /// Handles shove their neighbours and never pass each other.
    Push,
    /// Handles pass through each other, trading positions in the order.
    Swap,
}

impl TryFrom<u8> for Mode {
    type Error = ConfigError;

    /// Maps the numeric selectors `1` (push) and `2` (swap).
    fn try_from(mode: u8) -> Result<Self, Self::Error> {
        match mode {
            1 => Ok(Self::Push),
            2 => Ok(Self::Swap),
            other => Err(ConfigError::InvalidMode(other)),
        }
    }
}

impl From<Mode> for u8 {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Push => 1,
            Mode::Swap => 2,
        }
    }
}

/// Outcome of [`resolve`].
#[derive(Clone, Debug, PartialEq)]
#[must_use]
pub enum Resolution<K> {
    /// Nothing moved; the previous set is still current.
    Unchanged,
    /// The new current set.
    Changed(ValueSet<K>),
}

impl<K> Resolution<K> {
    /// Returns `true` for [`Resolution::Changed`].
    #[must_use]
    pub fn is_changed(&self) -> bool {
        matches!(self, Self::Changed(_))
    }

    /// Returns the new set, if any.
    #[must_use]
    pub fn into_changed(self) -> Option<ValueSet<K>> {
        match self {
            Self::Changed(set) => Some(set),
            Self::Unchanged => None,
        }
    }
}

/// Moves `active` toward `proposed` and resolves collisions per `mode`.
///
/// `proposed` is clamped to the domain and quantized with
/// [`Scales::value_to_step`] first. Returns [`Resolution::Unchanged`] when
/// `active` is not in `previous` or already sits at the quantized value.
pub fn resolve<K: Clone + PartialEq>(
    mode: Mode,
    scales: &Scales,
    previous: &ValueSet<K>,
    active: &K,
    proposed: f64,
) -> Resolution<K> {
    let Some(index) = previous.position(active) else {
        return Resolution::Unchanged;
    };
    let value = scales.value_to_step(proposed);
    if previous.handles()[index].value == value {
        return Resolution::Unchanged;
    }

    let order = previous.order();
    let mut handles = previous.handles().to_vec();
    handles[index].value = value;
    match mode {
        Mode::Push => push_neighbours(&mut handles, index, order),
        Mode::Swap => handles.sort_by(|a, b| order.compare(a.value, b.value)),
    }
    Resolution::Changed(ValueSet::from_sorted(handles, order))
}

/// Drags every handle the moved one would cross along with it.
fn push_neighbours<K>(handles: &mut [Handle<K>], index: usize, order: Order) {
    let value = handles[index].value;
    for handle in &mut handles[index + 1..] {
        if !order.precedes(handle.value, value) {
            break;
        }
        handle.value = value;
    }
    for handle in handles[..index].iter_mut().rev() {
        if !order.precedes(value, handle.value) {
            break;
        }
        handle.value = value;
    }
}
