#![forbid(unsafe_code)]

//! Pointer input events.
//!
//! Positions are viewport-local: the origin is the top-left corner of the
//! region the host attached pointer listeners to. The controller maps them
//! into the spine-centered frame.

use kurbo::Point;

/// Kind of pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerEventKind {
    /// Button pressed.
    Down,
    /// Button released.
    Up,
    /// Pointer moved, with or without a button held.
    Move,
    /// Pointer left the interactive region.
    Leave,
}

/// A pointer event in viewport-local coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub kind: PointerEventKind,
    pub x: f64,
    pub y: f64,
}

impl PointerEvent {
    #[must_use]
    pub const fn new(kind: PointerEventKind, x: f64, y: f64) -> Self {
        Self { kind, x, y }
    }

    #[must_use]
    pub const fn down(x: f64, y: f64) -> Self {
        Self::new(PointerEventKind::Down, x, y)
    }

    #[must_use]
    pub const fn up(x: f64, y: f64) -> Self {
        Self::new(PointerEventKind::Up, x, y)
    }

    #[must_use]
    pub const fn moved(x: f64, y: f64) -> Self {
        Self::new(PointerEventKind::Move, x, y)
    }

    #[must_use]
    pub const fn leave(x: f64, y: f64) -> Self {
        Self::new(PointerEventKind::Leave, x, y)
    }

    /// Position as a point.
    #[inline]
    #[must_use]
    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }
}
