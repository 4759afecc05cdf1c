// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scale engine: value↔step, value↔percent, and pixel→step mappings.

use alloc::vec::Vec;
use core::ops::Range;

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;

use crate::error::ConfigError;
use crate::range::{Domain, compute_range, precision_scale, snap};
use crate::values::Order;

/// Continuous linear map from an input interval onto an output interval.
///
/// The map is not clamped: inputs outside the domain extrapolate.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Linear {
    domain: [f64; 2],
    range: [f64; 2],
}

impl Linear {
    /// Creates a map sending `domain[0]` to `range[0]` and `domain[1]` to `range[1]`.
    #[must_use]
    pub const fn new(domain: [f64; 2], range: [f64; 2]) -> Self {
        Self { domain, range }
    }

    /// Maps an input value onto the output interval.
    ///
    /// A degenerate domain maps everything to the middle of the range.
    #[must_use]
    pub fn map(&self, x: f64) -> f64 {
        let t = normalize(x, self.domain);
        self.range[0] + t * (self.range[1] - self.range[0])
    }

    /// Maps an output value back onto the input interval.
    #[must_use]
    pub fn invert(&self, y: f64) -> f64 {
        let t = normalize(y, self.range);
        self.domain[0] + t * (self.domain[1] - self.domain[0])
    }
}

fn normalize(x: f64, [a, b]: [f64; 2]) -> f64 {
    let width = b - a;
    if width == 0.0 { 0.5 } else { (x - a) / width }
}

/// Maps a continuous interval onto a discrete sequence of values.
///
/// The input interval is split into `range.len()` equal buckets; bucket `i`
/// maps to `range[i]`. Inputs before the start or past the end of the
/// interval land in the first or last bucket. The interval may run in either
/// direction (`start > end` is fine).
#[derive(Clone, Debug, PartialEq)]
pub struct Quantize {
    domain: Range<f64>,
    range: Vec<f64>,
}

impl Quantize {
    /// Creates a quantize map over `domain` onto `range`.
    #[must_use]
    pub fn new(domain: Range<f64>, range: Vec<f64>) -> Self {
        Self { domain, range }
    }

    /// Returns the input interval.
    #[must_use]
    pub fn domain(&self) -> Range<f64> {
        self.domain.clone()
    }

    /// Replaces the input interval.
    pub fn set_domain(&mut self, domain: Range<f64>) {
        self.domain = domain;
    }

    /// Returns the output values.
    #[must_use]
    pub fn range(&self) -> &[f64] {
        &self.range
    }

    /// Returns the bucket index for `x`.
    ///
    /// Returns `None` if `x` is NaN, the range is empty, or the interval has
    /// zero or non-finite length.
    #[must_use]
    pub fn bucket(&self, x: f64) -> Option<usize> {
        let last = self.range.len().checked_sub(1)?;
        let width = self.domain.end - self.domain.start;
        if x.is_nan() || !width.is_finite() || width == 0.0 {
            return None;
        }
        let t = (x - self.domain.start) / width * self.range.len() as f64;
        #[expect(
            clippy::cast_possible_truncation,
            reason = "clamped into 0..=last before the cast"
        )]
        let index = t.floor().clamp(0.0, last as f64) as usize;
        Some(index)
    }

    /// Maps `x` onto its bucket's value.
    #[must_use]
    pub fn map(&self, x: f64) -> Option<f64> {
        self.bucket(x).map(|i| self.range[i])
    }
}

/// The three mappings a slider needs, built from one domain, step, and direction.
///
/// - [`value_to_step`](Self::value_to_step) quantizes any number to the
///   nearest legal value, clamping to the domain.
/// - [`value_to_percent`](Self::value_to_percent) positions a value along the
///   rail, `0..=100` (or `100..=0` when reversed).
/// - [`pixel_to_step`](Self::pixel_to_step) converts a pointer coordinate to a
///   legal value, given the rail's measured pixel extent.
///
/// ```
/// use understory_slider::{Domain, Scales};
///
/// let mut scales = Scales::new(Domain::new(100.0, 500.0).unwrap(), 5.0, false).unwrap();
/// assert_eq!(scales.value_to_step(452.0), 450.0);
/// assert_eq!(scales.value_to_step(9_000.0), 500.0);
/// assert_eq!(scales.value_to_percent(300.0), 50.0);
///
/// scales.set_pixel_extent(0.0..400.0);
/// assert_eq!(scales.pixel_to_step(0.0), Some(100.0));
/// assert_eq!(scales.pixel_to_step(400.0), Some(500.0));
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Scales {
    domain: Domain,
    step: f64,
    reversed: bool,
    value_to_step: Quantize,
    value_to_percent: Linear,
    pixel_to_step: Quantize,
}

impl Scales {
    /// Builds the mappings for `domain` and `step`.
    ///
    /// The pixel extent starts out as `0.0..1.0`; call
    /// [`set_pixel_extent`](Self::set_pixel_extent) with the measured rail
    /// before converting pointer positions.
    ///
    /// # Errors
    ///
    /// Fails with the errors of [`compute_range`].
    pub fn new(domain: Domain, step: f64, reversed: bool) -> Result<Self, ConfigError> {
        let ascending = compute_range(domain, step, false)?;
        let half = step / 2.0;
        let value_to_step = Quantize::new(
            domain.min() - half..domain.max() + half,
            ascending.clone(),
        );

        let mut logical = ascending;
        let percent = if reversed {
            logical.reverse();
            [100.0, 0.0]
        } else {
            [0.0, 100.0]
        };

        Ok(Self {
            domain,
            step,
            reversed,
            value_to_step,
            value_to_percent: Linear::new([domain.min(), domain.max()], percent),
            pixel_to_step: Quantize::new(0.0..1.0, logical),
        })
    }

    /// The domain the scales were built for.
    #[must_use]
    pub fn domain(&self) -> Domain {
        self.domain
    }

    /// The quantization step.
    #[must_use]
    pub fn step(&self) -> f64 {
        self.step
    }

    /// Returns `true` if the rail runs from `max` to `min`.
    #[must_use]
    pub fn is_reversed(&self) -> bool {
        self.reversed
    }

    /// Ordering of handle values implied by the direction.
    #[must_use]
    pub fn order(&self) -> Order {
        Order::from_reversed(self.reversed)
    }

    /// The quantized range in rail order (descending when reversed).
    #[must_use]
    pub fn range(&self) -> &[f64] {
        self.pixel_to_step.range()
    }

    /// Quantizes `value` to the nearest legal value.
    ///
    /// Values beyond the domain clamp to the nearest bound. NaN maps to `min`.
    #[must_use]
    pub fn value_to_step(&self, value: f64) -> f64 {
        self.value_to_step
            .map(value)
            .unwrap_or_else(|| self.domain.min())
    }

    /// Position of `value` along the rail as a percentage.
    #[must_use]
    pub fn value_to_percent(&self, value: f64) -> f64 {
        self.value_to_percent.map(value)
    }

    /// The value at a rail percentage, before quantization.
    #[must_use]
    pub fn percent_to_value(&self, percent: f64) -> f64 {
        self.value_to_percent.invert(percent)
    }

    /// The rail's pixel extent currently used by [`pixel_to_step`](Self::pixel_to_step).
    #[must_use]
    pub fn pixel_extent(&self) -> Range<f64> {
        self.pixel_to_step.domain()
    }

    /// Sets the rail's pixel extent along the drag axis.
    ///
    /// `extent.start` is where the rail begins on screen (left or top).
    pub fn set_pixel_extent(&mut self, extent: Range<f64>) {
        self.pixel_to_step.set_domain(extent);
    }

    /// Converts a pointer coordinate on the drag axis to a legal value.
    ///
    /// Coordinates outside the rail clamp to the nearest end. Returns `None`
    /// when the coordinate is NaN or the rail extent is degenerate.
    #[must_use]
    pub fn pixel_to_step(&self, pixel: f64) -> Option<f64> {
        self.pixel_to_step.map(pixel)
    }

    /// Returns up to roughly `count` round values inside the domain, ascending.
    ///
    /// Tick spacing is 1, 2, or 5 times a power of ten.
    ///
    /// ```
    /// use understory_slider::{Domain, Scales};
    ///
    /// let scales = Scales::new(Domain::new(100.0, 500.0).unwrap(), 5.0, false).unwrap();
    /// assert_eq!(scales.ticks(4), [100.0, 200.0, 300.0, 400.0, 500.0]);
    /// ```
    #[must_use]
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        if count == 0 {
            return Vec::new();
        }
        let (min, max) = (self.domain.min(), self.domain.max());
        let spacing = tick_spacing((max - min) / count as f64);
        let scale = precision_scale(spacing);
        let first = -(-min / spacing).floor();
        let last = (max / spacing).floor();

        let mut ticks = Vec::new();
        let mut i = first;
        while i <= last {
            ticks.push(snap(i * spacing, scale));
            i += 1.0;
        }
        ticks
    }
}

/// Rounds a raw tick interval to 1, 2, or 5 times a power of ten.
fn tick_spacing(raw: f64) -> f64 {
    let mut power = 1.0;
    while power * 10.0 <= raw {
        power *= 10.0;
    }
    while power > raw {
        power /= 10.0;
    }
    let error = raw / power;
    let factor = if error >= 50_f64.sqrt() {
        10.0
    } else if error >= 10_f64.sqrt() {
        5.0
    } else if error >= 2_f64.sqrt() {
        2.0
    } else {
        1.0
    };
    factor * power
}
