// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_slider --heading-base-level=0

//! Understory Slider: a headless multi-handle slider engine.
//!
//! This crate owns the _logic_ of a range slider with any number of handles
//! on one rail. It knows nothing about rendering: the host draws the rail,
//! tracks, ticks, and handles, measures the rail, and forwards pointer
//! events. In return the slider produces quantized, conflict-free value sets.
//!
//! The pieces, bottom-up:
//!
//! - [`compute_range`] and [`Scales`]: the discrete set of legal values for a
//!   [`Domain`] and step, plus the value↔percent and pixel→value mappings.
//! - [`ValueSet`]: the handles, kept sorted in rail order, with
//!   [`tracks`](ValueSet::tracks) for drawing the segments between them.
//! - [`resolve`]: a pure function applying a proposed value for one handle
//!   under a collision [`Mode`] (push or swap).
//! - [`DragState`]: which handle is being dragged, by mouse or touch, and the
//!   listener [`Subscription`] that goes with it.
//! - [`Slider`]: ties everything together behind pointer down/move/up calls
//!   and reports to a [`SliderHost`].
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::{Point, Rect};
//! use understory_slider::{
//!     DragOutcome, Handle, ListenerRegistry, Mode, PointerEvent, PointerKind, Recorder, Slider,
//!     SliderConfig, SliderHost, UpdateSink, ValueSet,
//! };
//!
//! #[derive(Debug, Default)]
//! struct Host {
//!     recorder: Recorder<&'static str>,
//! }
//!
//! impl UpdateSink<&'static str> for Host {
//!     fn on_update(&mut self, values: &ValueSet<&'static str>) {
//!         self.recorder.on_update(values);
//!     }
//!     fn on_change(&mut self, values: &ValueSet<&'static str>) {
//!         self.recorder.on_change(values);
//!     }
//! }
//!
//! // Every event is routed to the slider already, so there is nothing to register.
//! impl ListenerRegistry for Host {
//!     fn subscribe(&mut self, _kind: PointerKind) {}
//!     fn unsubscribe(&mut self, _kind: PointerKind) {}
//! }
//!
//! impl SliderHost<&'static str> for Host {
//!     fn rail_bounds(&self) -> Rect {
//!         Rect::new(0.0, 0.0, 400.0, 8.0)
//!     }
//! }
//!
//! let config = SliderConfig::new([100.0, 500.0], Mode::Push)
//!     .with_step(5.0)
//!     .with_values([Handle::new("low", 150.0), Handle::new("high", 300.0)]);
//! let mut slider = Slider::new(config, Host::default()).unwrap();
//! assert_eq!(slider.percent_of(&"low"), Some(12.5));
//!
//! let at = |x| PointerEvent::mouse(Point::new(x, 4.0));
//! assert_eq!(slider.pointer_down(&"low", &at(50.0)), DragOutcome::Started);
//! assert_eq!(slider.pointer_move(&at(210.0)), DragOutcome::Updated);
//! assert_eq!(slider.pointer_up(&at(210.0)), DragOutcome::Committed);
//!
//! // "low" reached 310 and pushed "high" along with it.
//! let committed = slider.host().recorder.last_commit().unwrap();
//! assert_eq!(
//!     committed.handles(),
//!     [Handle::new("low", 310.0), Handle::new("high", 310.0)]
//! );
//! ```
//!
//! ## Values and order
//!
//! Every value a slider reports is a member of the quantized range, and the
//! handles are always sorted for the rail direction: ascending normally,
//! descending when the slider is reversed. Under [`Mode::Push`] a handle's
//! position in that order never changes; under [`Mode::Swap`] handles may
//! pass each other and the order is re-established by sorting.
//!
//! ## Configuration problems
//!
//! A domain, step, or mode that cannot produce a slider is a [`ConfigError`].
//! Initial handles that are off the grid or reuse a key are corrected and
//! reported as [`Diagnostic`]s (and logged through the `log` facade), since
//! the slider is still usable.
//!
//! ## Features
//!
//! - `std` (default): use the standard library.
//! - `libm`: `no_std` float math through Kurbo.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod config;
mod dispatch;
mod drag;
mod error;
mod pointer;
mod range;
mod resolve;
mod scale;
mod slider;
mod values;

pub use config::{DEFAULT_STEP, SliderConfig, Validated};
pub use dispatch::{Callbacks, Recorder, UpdateSink};
pub use drag::{DragSession, DragState, ListenerRegistry, Subscription};
pub use error::{ConfigError, Diagnostic};
pub use pointer::{Orientation, PointerEvent, PointerKind};
pub use range::{Domain, MAX_STEPS, compute_range, validate_defaults};
pub use resolve::{Mode, Resolution, resolve};
pub use scale::{Linear, Quantize, Scales};
pub use slider::{DragOutcome, Slider, SliderHost};
pub use values::{Handle, Order, Track, TrackEnd, ValueSet};
