// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Slider configuration.

use alloc::vec::Vec;
use core::fmt;

use crate::error::{ConfigError, Diagnostic};
use crate::pointer::Orientation;
use crate::range::{Domain, validate_defaults};
use crate::resolve::Mode;
use crate::scale::Scales;
use crate::values::{Handle, ValueSet};

/// Step used when none is configured.
pub const DEFAULT_STEP: f64 = 0.1;

/// Everything needed to build a [`Slider`](crate::Slider).
///
/// The collision [`Mode`] has no default and must be given up front; the
/// remaining options have builder methods.
///
/// ```
/// use understory_slider::{Handle, Mode, Orientation, SliderConfig};
///
/// let config = SliderConfig::new([0.0, 10.0], Mode::Swap)
///     .with_step(0.5)
///     .with_orientation(Orientation::Vertical)
///     .with_reversed(true)
///     .with_values([Handle::new("a", 2.0), Handle::new("b", 7.5)]);
/// assert_eq!(config.step, 0.5);
/// assert!(config.scales().is_ok());
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct SliderConfig<K> {
    /// `[min, max]`; `min < max` even when reversed.
    pub domain: [f64; 2],
    /// Quantization step; must be positive.
    pub step: f64,
    /// Collision policy.
    pub mode: Mode,
    /// Axis the rail lies along.
    pub orientation: Orientation,
    /// Runs the rail from `max` to `min`.
    pub reversed: bool,
    /// Ignore all pointer input.
    pub disabled: bool,
    /// Initial handles, in any order.
    pub default_values: Vec<Handle<K>>,
}

impl<K> SliderConfig<K> {
    /// A horizontal, forward, enabled slider over `domain` with no handles.
    #[must_use]
    pub fn new(domain: [f64; 2], mode: Mode) -> Self {
        Self {
            domain,
            step: DEFAULT_STEP,
            mode,
            orientation: Orientation::Horizontal,
            reversed: false,
            disabled: false,
            default_values: Vec::new(),
        }
    }

    /// Sets the quantization step.
    #[must_use]
    pub fn with_step(mut self, step: f64) -> Self {
        self.step = step;
        self
    }

    /// Sets the rail axis.
    #[must_use]
    pub fn with_orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = orientation;
        self
    }

    /// Sets the direction flag.
    #[must_use]
    pub fn with_reversed(mut self, reversed: bool) -> Self {
        self.reversed = reversed;
        self
    }

    /// Sets whether pointer input is ignored.
    #[must_use]
    pub fn with_disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Replaces the initial handles.
    #[must_use]
    pub fn with_values(mut self, values: impl IntoIterator<Item = Handle<K>>) -> Self {
        self.default_values = values.into_iter().collect();
        self
    }

    /// Validates the domain.
    ///
    /// # Errors
    ///
    /// See [`Domain::new`].
    pub fn domain(&self) -> Result<Domain, ConfigError> {
        let [min, max] = self.domain;
        Domain::new(min, max)
    }

    /// Validates the domain and step and builds the scales.
    ///
    /// # Errors
    ///
    /// See [`Domain::new`] and [`Scales::new`].
    pub fn scales(&self) -> Result<Scales, ConfigError> {
        Scales::new(self.domain()?, self.step, self.reversed)
    }
}

impl SliderConfig<usize> {
    /// Replaces the initial handles with plain values keyed by their index.
    #[must_use]
    pub fn with_indexed_values(self, values: impl IntoIterator<Item = f64>) -> Self {
        self.with_values(values.into_iter().enumerate().map(|(i, v)| Handle::new(i, v)))
    }
}

impl<K: Clone + PartialEq + fmt::Debug> SliderConfig<K> {
    /// Validates the whole configuration.
    ///
    /// Returns the scales, the initial value set, and any corrections made
    /// to the initial handles.
    ///
    /// # Errors
    ///
    /// See [`SliderConfig::scales`].
    pub fn validate(&self) -> Result<Validated<K>, ConfigError> {
        let scales = self.scales()?;
        let (values, diagnostics) = validate_defaults(self.default_values.iter().cloned(), &scales);
        Ok(Validated {
            scales,
            values,
            diagnostics,
        })
    }
}

/// Output of [`SliderConfig::validate`].
#[derive(Clone, Debug, PartialEq)]
pub struct Validated<K> {
    /// Mappings for the configured domain, step, and direction.
    pub scales: Scales,
    /// Initial handles, corrected and sorted.
    pub values: ValueSet<K>,
    /// Corrections applied to the initial handles.
    pub diagnostics: Vec<Diagnostic<K>>,
}
