// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Domain validation and quantized range construction.

use alloc::vec::Vec;
use core::fmt;

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;

use crate::error::{ConfigError, Diagnostic};
use crate::scale::Scales;
use crate::values::{Handle, Order, ValueSet};

/// Upper bound on the number of discrete values a slider may have.
///
/// Larger ranges are rejected with [`ConfigError::TooManySteps`]; a pointer
/// cannot meaningfully address that many positions on a rail anyway.
pub const MAX_STEPS: usize = 10_001;

/// Most decimal places considered when cleaning up stepped values.
const MAX_DECIMALS: u32 = 12;

/// The continuous interval `[min, max]` a slider represents.
///
/// A `Domain` is always non-empty and finite: `min < max`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Domain {
    min: f64,
    max: f64,
}

impl Domain {
    /// Creates a domain, rejecting non-finite bounds and `max <= min`.
    pub fn new(min: f64, max: f64) -> Result<Self, ConfigError> {
        if !min.is_finite() || !max.is_finite() {
            return Err(ConfigError::NonFiniteDomain { min, max });
        }
        if max <= min {
            return Err(ConfigError::EmptyDomain { min, max });
        }
        Ok(Self { min, max })
    }

    /// Lower bound.
    #[must_use]
    pub fn min(self) -> f64 {
        self.min
    }

    /// Upper bound.
    #[must_use]
    pub fn max(self) -> f64 {
        self.max
    }

    /// Length of the interval.
    #[must_use]
    pub fn span(self) -> f64 {
        self.max - self.min
    }

    /// Returns `true` if `value` lies inside `[min, max]`.
    #[must_use]
    pub fn contains(self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    /// Clamps `value` into `[min, max]`.
    #[must_use]
    pub fn clamp(self, value: f64) -> f64 {
        value.clamp(self.min, self.max)
    }

    /// The bound the rail starts at for the given order.
    #[must_use]
    pub fn start(self, order: Order) -> f64 {
        match order {
            Order::Ascending => self.min,
            Order::Descending => self.max,
        }
    }

    /// The bound the rail ends at for the given order.
    #[must_use]
    pub fn end(self, order: Order) -> f64 {
        match order {
            Order::Ascending => self.max,
            Order::Descending => self.min,
        }
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.min, self.max)
    }
}

/// Computes the quantized range for `domain` and `step`.
///
/// Starting at `min`, `step` is added until the next value would pass `max`.
/// Both endpoints are included, and the sequence is descending when
/// `reversed` is set. Accumulated floating-point noise is rounded away using
/// the decimal precision of `min` and `step`, so `0.1` steps produce `0.3`
/// rather than `0.30000000000000004`.
///
/// ```
/// use understory_slider::{Domain, compute_range};
///
/// let domain = Domain::new(0.0, 1.0).unwrap();
/// assert_eq!(compute_range(domain, 0.25, false).unwrap(), [0.0, 0.25, 0.5, 0.75, 1.0]);
/// assert_eq!(compute_range(domain, 0.5, true).unwrap(), [1.0, 0.5, 0.0]);
/// ```
///
/// # Errors
///
/// - [`ConfigError::InvalidStep`] if `step` is not a finite positive number.
/// - [`ConfigError::TooManySteps`] if the range would exceed [`MAX_STEPS`].
/// - [`ConfigError::RangeMismatch`] if stepping from `min` does not land on `max`.
pub fn compute_range(domain: Domain, step: f64, reversed: bool) -> Result<Vec<f64>, ConfigError> {
    if !step.is_finite() || step <= 0.0 {
        return Err(ConfigError::InvalidStep(step));
    }
    let Domain { min, max } = domain;

    // Tolerate a little noise so that e.g. 0.3 / 0.1 still counts three steps.
    let steps = ((max - min) / step + 1e-9).floor();
    if steps + 1.0 > MAX_STEPS as f64 {
        #[expect(
            clippy::cast_possible_truncation,
            reason = "float to int casts saturate; the count is only reported"
        )]
        let count = (steps + 1.0) as u64;
        return Err(ConfigError::TooManySteps { count });
    }
    #[expect(
        clippy::cast_possible_truncation,
        reason = "steps is a non-negative integer below MAX_STEPS"
    )]
    let count = steps as usize + 1;

    let scale = precision_scale(min).max(precision_scale(step));
    let mut range: Vec<f64> = (0..count)
        .map(|i| snap(min + i as f64 * step, scale))
        .collect();

    let last = range[count - 1];
    if (last - max).abs() > step * 1e-6 {
        return Err(ConfigError::RangeMismatch {
            min,
            max,
            step,
            last,
        });
    }
    range[count - 1] = max;

    if reversed {
        range.reverse();
    }
    Ok(range)
}

/// Validates initial handles against the quantized grid.
///
/// Handles are processed in input order:
/// - A key that was already seen is dropped ([`Diagnostic::DuplicateKey`]).
/// - An off-grid value is replaced by the nearest legal value
///   ([`Diagnostic::OffGrid`]).
///
/// The surviving handles are sorted for the scales' direction. Each
/// diagnostic is also logged as a warning.
pub fn validate_defaults<K>(
    handles: impl IntoIterator<Item = Handle<K>>,
    scales: &Scales,
) -> (ValueSet<K>, Vec<Diagnostic<K>>)
where
    K: Clone + PartialEq + fmt::Debug,
{
    let mut kept: Vec<Handle<K>> = Vec::new();
    let mut diagnostics = Vec::new();

    for Handle { key, value } in handles {
        if kept.iter().any(|h| h.key == key) {
            diagnostics.push(Diagnostic::DuplicateKey { key, value });
            continue;
        }
        let corrected = scales.value_to_step(value);
        if corrected != value {
            diagnostics.push(Diagnostic::OffGrid {
                key: key.clone(),
                given: value,
                corrected,
            });
        }
        kept.push(Handle::new(key, corrected));
    }

    for diagnostic in &diagnostics {
        log::warn!("{diagnostic}");
    }

    (ValueSet::from_unsorted(kept, scales.order()), diagnostics)
}

/// Smallest power of ten that turns `x` into an integer (up to `MAX_DECIMALS`).
pub(crate) fn precision_scale(x: f64) -> f64 {
    let mut scale = 1.0;
    for _ in 0..MAX_DECIMALS {
        let scaled = x * scale;
        if (scaled - scaled.round()).abs() <= 1e-9 * scaled.abs().max(1.0) {
            break;
        }
        scale *= 10.0;
    }
    scale
}

/// Rounds `value` to the grid implied by `scale` (a power of ten).
pub(crate) fn snap(value: f64, scale: f64) -> f64 {
    (value * scale).round() / scale
}
