// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pointer events: one shape for mouse and touch input.

use core::ops::Range;

use kurbo::{Point, Rect};
use smallvec::SmallVec;

/// Input modality that started or continues a drag.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PointerKind {
    /// Mouse or pen with a single position.
    Mouse,
    /// Touch screen, possibly with several simultaneous contacts.
    Touch,
}

/// Axis the rail is laid out along.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum Orientation {
    /// The rail runs left to right; pointer `x` drives the value.
    #[default]
    Horizontal,
    /// The rail runs top to bottom; pointer `y` drives the value.
    Vertical,
}

impl Orientation {
    /// The coordinate of `point` along this axis.
    #[must_use]
    pub fn coordinate(self, point: Point) -> f64 {
        match self {
            Self::Horizontal => point.x,
            Self::Vertical => point.y,
        }
    }

    /// The extent of `rect` along this axis, start to end.
    #[must_use]
    pub fn extent(self, rect: Rect) -> Range<f64> {
        match self {
            Self::Horizontal => rect.x0..rect.x1,
            Self::Vertical => rect.y0..rect.y1,
        }
    }
}

/// A pointer down, move, or up event.
///
/// Mouse events carry exactly one position. Touch events carry every active
/// contact; a touch end may carry none.
///
/// ```
/// use kurbo::Point;
/// use understory_slider::{Orientation, PointerEvent, PointerKind};
///
/// let tap = PointerEvent::touch([Point::new(12.0, 40.0)]);
/// assert_eq!(tap.kind(), PointerKind::Touch);
/// assert_eq!(tap.coordinate(Orientation::Vertical), Some(40.0));
///
/// let pinch = PointerEvent::touch([Point::new(0.0, 0.0), Point::new(5.0, 5.0)]);
/// assert!(pinch.is_multi_touch());
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct PointerEvent {
    kind: PointerKind,
    contacts: SmallVec<[Point; 2]>,
}

impl PointerEvent {
    /// A mouse event at `position`.
    #[must_use]
    pub fn mouse(position: Point) -> Self {
        let mut contacts = SmallVec::new();
        contacts.push(position);
        Self {
            kind: PointerKind::Mouse,
            contacts,
        }
    }

    /// A touch event with the given active contacts.
    #[must_use]
    pub fn touch(contacts: impl IntoIterator<Item = Point>) -> Self {
        Self {
            kind: PointerKind::Touch,
            contacts: contacts.into_iter().collect(),
        }
    }

    /// The input modality.
    #[must_use]
    pub fn kind(&self) -> PointerKind {
        self.kind
    }

    /// All contact positions.
    #[must_use]
    pub fn contacts(&self) -> &[Point] {
        &self.contacts
    }

    /// Position of the primary contact, if any.
    #[must_use]
    pub fn position(&self) -> Option<Point> {
        self.contacts.first().copied()
    }

    /// Returns `true` for a touch event with more than one contact.
    #[must_use]
    pub fn is_multi_touch(&self) -> bool {
        self.kind == PointerKind::Touch && self.contacts.len() > 1
    }

    /// The primary contact's coordinate along `orientation`.
    #[must_use]
    pub fn coordinate(&self, orientation: Orientation) -> Option<f64> {
        self.position().map(|p| orientation.coordinate(p))
    }
}
