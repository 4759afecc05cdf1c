// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The slider session: scales, values, and drag state bound to a host.

use alloc::vec::Vec;
use core::fmt;

use kurbo::Rect;

use crate::config::{SliderConfig, Validated};
use crate::dispatch::UpdateSink;
use crate::drag::{DragState, ListenerRegistry};
use crate::error::{ConfigError, Diagnostic};
use crate::pointer::{Orientation, PointerEvent};
use crate::range::Domain;
use crate::resolve::{Mode, Resolution, resolve};
use crate::scale::Scales;
use crate::values::ValueSet;

/// The presentation layer a [`Slider`] reports to.
///
/// Besides receiving value sets ([`UpdateSink`]) and registering drag
/// listeners ([`ListenerRegistry`]), the host measures the rail.
pub trait SliderHost<K>: UpdateSink<K> + ListenerRegistry {
    /// The rail's current bounds, in the same coordinate space as pointer
    /// event positions.
    ///
    /// Queried when a drag starts and on every move; never cached across
    /// drags, so layout changes between drags are picked up.
    fn rail_bounds(&self) -> Rect;
}

/// What a pointer handler did with an event.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DragOutcome {
    /// The event did not apply (disabled, wrong modality, multi-touch, no
    /// active drag, unknown key, ...).
    Ignored,
    /// A drag started.
    Started,
    /// A move changed the values; the host received a live update.
    Updated,
    /// A move belonged to the drag but resolved to the same values.
    Unchanged,
    /// The drag ended and the host received the committed values.
    Committed,
}

impl DragOutcome {
    /// Returns `true` if the slider handled the event.
    ///
    /// Hosts should stop propagation and suppress the default action for
    /// consumed events.
    #[must_use]
    pub fn is_consumed(self) -> bool {
        self != Self::Ignored
    }
}

/// A multi-handle slider bound to its host.
///
/// The slider turns pointer events into quantized handle values:
///
/// - [`pointer_down`](Self::pointer_down) on a handle starts a drag for that
///   handle's key.
/// - [`pointer_move`](Self::pointer_move) converts the pointer position to a
///   legal value, resolves collisions per [`Mode`], and sends a live update
///   when the values changed.
/// - [`pointer_up`](Self::pointer_up) ends the drag and commits the values.
///
/// Only one drag is active at a time. Dropping the slider mid-drag
/// unsubscribes the drag's listeners.
///
/// ```
/// use kurbo::{Point, Rect};
/// use understory_slider::{
///     Handle, ListenerRegistry, Mode, PointerEvent, PointerKind, Slider, SliderConfig,
///     SliderHost, UpdateSink, ValueSet,
/// };
///
/// #[derive(Default)]
/// struct Host {
///     committed: Vec<Vec<f64>>,
/// }
///
/// impl UpdateSink<&'static str> for Host {
///     fn on_change(&mut self, values: &ValueSet<&'static str>) {
///         self.committed.push(values.values().collect());
///     }
/// }
///
/// impl ListenerRegistry for Host {
///     fn subscribe(&mut self, _kind: PointerKind) {}
///     fn unsubscribe(&mut self, _kind: PointerKind) {}
/// }
///
/// impl SliderHost<&'static str> for Host {
///     fn rail_bounds(&self) -> Rect {
///         Rect::new(0.0, 0.0, 400.0, 8.0)
///     }
/// }
///
/// let config = SliderConfig::new([100.0, 500.0], Mode::Push)
///     .with_step(5.0)
///     .with_values([Handle::new("low", 150.0), Handle::new("high", 300.0)]);
/// let mut slider = Slider::new(config, Host::default()).unwrap();
///
/// slider.pointer_down(&"low", &PointerEvent::mouse(Point::new(50.0, 4.0)));
/// // 210px along a 400px rail over [100, 500] lands on 310.
/// slider.pointer_move(&PointerEvent::mouse(Point::new(210.0, 4.0)));
/// slider.pointer_up(&PointerEvent::mouse(Point::new(210.0, 4.0)));
///
/// assert_eq!(slider.host().committed, [[310.0, 310.0]]);
/// ```
#[derive(Debug)]
pub struct Slider<K, H>
where
    K: Clone + PartialEq + fmt::Debug,
    H: SliderHost<K>,
{
    scales: Scales,
    mode: Mode,
    orientation: Orientation,
    disabled: bool,
    values: ValueSet<K>,
    drag: DragState<K>,
    diagnostics: Vec<Diagnostic<K>>,
    host: H,
}

impl<K, H> Slider<K, H>
where
    K: Clone + PartialEq + fmt::Debug,
    H: SliderHost<K>,
{
    /// Validates `config` and builds an idle slider.
    ///
    /// Corrections to the initial handles are available from
    /// [`diagnostics`](Self::diagnostics).
    ///
    /// # Errors
    ///
    /// Returns the [`ConfigError`] from [`SliderConfig::validate`]; no
    /// slider is built.
    pub fn new(config: SliderConfig<K>, host: H) -> Result<Self, ConfigError> {
        let Validated {
            scales,
            values,
            diagnostics,
        } = config.validate()?;
        Ok(Self {
            scales,
            mode: config.mode,
            orientation: config.orientation,
            disabled: config.disabled,
            values,
            drag: DragState::new(),
            diagnostics,
            host,
        })
    }

    /// The current values.
    #[must_use]
    pub fn values(&self) -> &ValueSet<K> {
        &self.values
    }

    /// The scales built from the configuration.
    #[must_use]
    pub fn scales(&self) -> &Scales {
        &self.scales
    }

    /// The configured domain.
    #[must_use]
    pub fn domain(&self) -> Domain {
        self.scales.domain()
    }

    /// The collision policy.
    #[must_use]
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// The rail axis.
    #[must_use]
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Returns `true` if pointer input is ignored.
    #[must_use]
    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    /// Corrections made to the configured initial handles.
    #[must_use]
    pub fn diagnostics(&self) -> &[Diagnostic<K>] {
        &self.diagnostics
    }

    /// Key of the handle being dragged, if any.
    #[must_use]
    pub fn active_key(&self) -> Option<&K> {
        self.drag.active_key()
    }

    /// Returns `true` while a drag is active.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.drag.is_dragging()
    }

    /// Rail position of the handle with `key`, in percent.
    #[must_use]
    pub fn percent_of(&self, key: &K) -> Option<f64> {
        self.values
            .get(key)
            .map(|h| self.scales.value_to_percent(h.value))
    }

    /// The host.
    #[must_use]
    pub fn host(&self) -> &H {
        &self.host
    }

    /// The host, mutably.
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// Pointer pressed on the handle with `key`.
    ///
    /// Starts a drag unless the slider is disabled, a drag is already
    /// active, `key` is unknown, or the event is a multi-contact touch.
    pub fn pointer_down(&mut self, key: &K, event: &PointerEvent) -> DragOutcome {
        if self.disabled || !self.values.contains_key(key) {
            return DragOutcome::Ignored;
        }
        if !self.drag.activate(&mut self.host, key.clone(), event) {
            if event.is_multi_touch() {
                log::debug!("ignoring multi-touch press on {key:?}");
            }
            return DragOutcome::Ignored;
        }
        log::debug!("drag started on {key:?} ({:?})", event.kind());
        self.measure_rail();
        DragOutcome::Started
    }

    /// Pointer pressed on the rail or a track, away from any handle.
    ///
    /// The handle nearest to the pressed position jumps there and a drag
    /// starts for it, so the press can turn into a drag without lifting.
    pub fn rail_down(&mut self, event: &PointerEvent) -> DragOutcome {
        if self.disabled || self.drag.is_dragging() || event.is_multi_touch() {
            return DragOutcome::Ignored;
        }
        self.measure_rail();
        let Some(target) = self.pointer_value(event) else {
            return DragOutcome::Ignored;
        };
        let Some(key) = self.nearest_key(target) else {
            return DragOutcome::Ignored;
        };
        if !self.drag.activate(&mut self.host, key.clone(), event) {
            return DragOutcome::Ignored;
        }
        log::debug!("drag started from rail on {key:?} ({:?})", event.kind());
        self.apply(&key, target);
        DragOutcome::Started
    }

    /// Pointer moved during a drag.
    pub fn pointer_move(&mut self, event: &PointerEvent) -> DragOutcome {
        if !self.drag.accepts(event) {
            return DragOutcome::Ignored;
        }
        let Some(active) = self.drag.active_key().cloned() else {
            return DragOutcome::Ignored;
        };
        self.measure_rail();
        let Some(proposed) = self.pointer_value(event) else {
            return DragOutcome::Ignored;
        };
        self.apply(&active, proposed)
    }

    /// Pointer released.
    ///
    /// Ends a drag started by the same modality and commits the current
    /// values. There is no cancel: releasing anywhere commits the last
    /// resolved values.
    pub fn pointer_up(&mut self, event: &PointerEvent) -> DragOutcome {
        let Some(session) = self.drag.release(&mut self.host, event.kind()) else {
            return DragOutcome::Ignored;
        };
        log::debug!("drag on {:?} committed", session.active());
        self.host.on_change(&self.values);
        DragOutcome::Committed
    }

    /// Replaces the configuration.
    ///
    /// Scales and values are rebuilt from `config`. An active drag ends
    /// without a commit. On error the slider is left unchanged.
    ///
    /// # Errors
    ///
    /// Returns the [`ConfigError`] from [`SliderConfig::validate`].
    pub fn reconfigure(&mut self, config: SliderConfig<K>) -> Result<(), ConfigError> {
        let Validated {
            scales,
            values,
            diagnostics,
        } = config.validate()?;
        if let Some(session) = self.drag.end(&mut self.host) {
            log::debug!("drag on {:?} ended by reconfiguration", session.active());
        }
        self.scales = scales;
        self.values = values;
        self.diagnostics = diagnostics;
        self.mode = config.mode;
        self.orientation = config.orientation;
        self.disabled = config.disabled;
        Ok(())
    }

    fn measure_rail(&mut self) {
        let extent = self.orientation.extent(self.host.rail_bounds());
        self.scales.set_pixel_extent(extent);
    }

    fn pointer_value(&self, event: &PointerEvent) -> Option<f64> {
        let coordinate = event.coordinate(self.orientation)?;
        self.scales.pixel_to_step(coordinate)
    }

    /// Key of the handle closest to `value`; the first one wins ties.
    fn nearest_key(&self, value: f64) -> Option<K> {
        let mut best: Option<(&K, f64)> = None;
        for handle in &self.values {
            let distance = (handle.value - value).abs();
            if best.is_none_or(|(_, d)| distance < d) {
                best = Some((&handle.key, distance));
            }
        }
        best.map(|(key, _)| key.clone())
    }

    fn apply(&mut self, active: &K, proposed: f64) -> DragOutcome {
        match resolve(self.mode, &self.scales, &self.values, active, proposed) {
            Resolution::Unchanged => DragOutcome::Unchanged,
            Resolution::Changed(next) => {
                self.values = next;
                self.host.on_update(&self.values);
                DragOutcome::Updated
            }
        }
    }
}

impl<K, H> Drop for Slider<K, H>
where
    K: Clone + PartialEq + fmt::Debug,
    H: SliderHost<K>,
{
    fn drop(&mut self) {
        let _ = self.drag.end(&mut self.host);
    }
}
