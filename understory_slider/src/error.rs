// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Configuration errors and input-correction diagnostics.
//!
//! Two kinds of problems are reported:
//!
//! - [`ConfigError`]: the configuration cannot produce a usable slider. These
//!   are returned from constructors and no [`Slider`](crate::Slider) is built.
//! - [`Diagnostic`]: an initial handle was corrected or dropped. The slider is
//!   still built; the diagnostics describe what changed so the embedder can
//!   fix its inputs.

use core::fmt;

/// Error returned when a slider configuration is unusable.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ConfigError {
    /// `max <= min`. This applies even when the slider is reversed.
    EmptyDomain {
        /// Lower domain bound.
        min: f64,
        /// Upper domain bound.
        max: f64,
    },
    /// One of the domain bounds is NaN or infinite.
    NonFiniteDomain {
        /// Lower domain bound.
        min: f64,
        /// Upper domain bound.
        max: f64,
    },
    /// The step is NaN, infinite, zero, or negative.
    InvalidStep(f64),
    /// The domain and step produce more discrete values than [`MAX_STEPS`](crate::MAX_STEPS).
    TooManySteps {
        /// Number of values the configuration would produce (saturating).
        count: u64,
    },
    /// Stepping from the logical start does not land on the logical end.
    RangeMismatch {
        /// Lower domain bound.
        min: f64,
        /// Upper domain bound.
        max: f64,
        /// Configured step.
        step: f64,
        /// Last value reached before passing `max`.
        last: f64,
    },
    /// A numeric mode selector that is neither `1` (push) nor `2` (swap).
    InvalidMode(u8),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyDomain { min, max } => write!(
                f,
                "max must be greater than min (even if reversed): min is {min}, max is {max}"
            ),
            Self::NonFiniteDomain { min, max } => {
                write!(f, "domain bounds must be finite: min is {min}, max is {max}")
            }
            Self::InvalidStep(step) => {
                write!(f, "step must be a finite positive number, got {step}")
            }
            Self::TooManySteps { count } => write!(
                f,
                "found {count} values in range (limit is {}); increase the step",
                crate::MAX_STEPS
            ),
            Self::RangeMismatch {
                min,
                max,
                step,
                last,
            } => write!(
                f,
                "stepping from {min} by {step} ends at {last}, not {max}; check domain and step"
            ),
            Self::InvalidMode(mode) => {
                write!(f, "invalid mode {mode}: expected 1 (push) or 2 (swap)")
            }
        }
    }
}

impl core::error::Error for ConfigError {}

/// A correction applied to the initial handles.
#[derive(Clone, Debug, PartialEq)]
pub enum Diagnostic<K> {
    /// The value was not on the quantized grid and was moved to the nearest
    /// legal value.
    OffGrid {
        /// Key of the corrected handle.
        key: K,
        /// Value as configured.
        given: f64,
        /// Value the handle starts with.
        corrected: f64,
    },
    /// A later handle reused a key that was already taken and was dropped.
    DuplicateKey {
        /// The repeated key.
        key: K,
        /// Value of the dropped handle.
        value: f64,
    },
}

impl<K> Diagnostic<K> {
    /// Returns the key the diagnostic refers to.
    pub fn key(&self) -> &K {
        match self {
            Self::OffGrid { key, .. } | Self::DuplicateKey { key, .. } => key,
        }
    }
}

impl<K: fmt::Debug> fmt::Display for Diagnostic<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OffGrid {
                key,
                given,
                corrected,
            } => write!(
                f,
                "invalid default value for {key:?}: changing {given} to {corrected}"
            ),
            Self::DuplicateKey { key, value } => write!(
                f,
                "duplicate key {key:?} (value {value}) skipped; keys must be unique"
            ),
        }
    }
}
