#![forbid(unsafe_code)]

//! Pointer gesture classification for page turning.
//!
//! [`PointerController`] consumes spine-centered pointer positions and
//! press/release timing, decides which flip the pointer takes hold of, and on
//! release turns the gesture into a flip target and a page change.
//!
//! # State Machine
//!
//! ```text
//! Idle --press--> Watching --release/leave--> {Click | Drag} --> Idle
//! ```
//!
//! - A press inside the book hands control of at most one flip to the
//!   pointer: the previous page's flip on the left, the current page's flip
//!   on the right.
//! - A release less than `click_timeout` after the press is a click. A click
//!   turns toward the side it landed on, regardless of where the pointer is.
//! - A drag turns toward the side the pointer ends on. A drag that ends on
//!   the side it started on keeps the current page; the crease still springs
//!   back.
//!
//! # Invariants
//!
//! 1. At most one flip is dragging after any press.
//! 2. Every release clears `dragging` on every flip.
//! 3. The current page stays within `[0, page_count - 1]`.
//! 4. Leaving the region while watching behaves exactly like a release at
//!    the last known position; leaving while idle does nothing.

use std::time::Duration;

use kurbo::Point;
use web_time::Instant;

use crate::flip::{FlipStack, RESTING_RIGHT, TURNED_LEFT};
use crate::page::PageView;

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Thresholds for gesture classification.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GestureConfig {
    /// Presses held shorter than this are clicks (default: 500ms).
    pub click_timeout: Duration,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            click_timeout: Duration::from_millis(500),
        }
    }
}

impl GestureConfig {
    /// Builder: override the click timeout.
    #[must_use]
    pub const fn with_click_timeout(mut self, timeout: Duration) -> Self {
        self.click_timeout = timeout;
        self
    }

    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        if self.click_timeout.is_zero() {
            errors.push("gesture.click_timeout must be > 0".to_string());
        }
        errors
    }
}

// ---------------------------------------------------------------------------
// Outcomes
// ---------------------------------------------------------------------------

/// Whether the controller is tracking a press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GesturePhase {
    Idle,
    Watching,
}

/// Classification of a completed press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureKind {
    Click,
    Drag,
}

/// Side a dragged flip was sent to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnDirection {
    /// Target -1: the page turns over to the left.
    Left,
    /// Target +1: the page falls back to the right.
    Right,
}

/// Result of a release (or a leave while watching).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReleaseOutcome {
    pub gesture: GestureKind,
    /// The page change was cancelled because the drag ended where it began.
    pub stay_on_page: bool,
    /// Where the dragged flip was sent, if a flip was dragging.
    pub turn: Option<TurnDirection>,
    /// One-based current page after the release.
    pub page_number: usize,
}

#[derive(Debug, Clone, Copy)]
struct Press {
    at: Instant,
    right_side: bool,
}

// ---------------------------------------------------------------------------
// PointerController
// ---------------------------------------------------------------------------

/// Stateful click/drag classifier driving flip targets.
#[derive(Debug, Clone)]
pub struct PointerController {
    config: GestureConfig,
    half_book_width: f64,
    pointer: Point,
    press: Option<Press>,
}

impl PointerController {
    /// Create a controller for a book `book_width` wide.
    #[must_use]
    pub fn new(config: GestureConfig, book_width: f64) -> Self {
        Self {
            config,
            half_book_width: book_width / 2.0,
            pointer: Point::ZERO,
            press: None,
        }
    }

    /// Last known spine-centered pointer position.
    #[inline]
    #[must_use]
    pub fn pointer(&self) -> Point {
        self.pointer
    }

    #[inline]
    #[must_use]
    pub fn phase(&self) -> GesturePhase {
        if self.press.is_some() {
            GesturePhase::Watching
        } else {
            GesturePhase::Idle
        }
    }

    #[inline]
    #[must_use]
    pub fn config(&self) -> &GestureConfig {
        &self.config
    }

    /// Classify a press held for `held`.
    #[must_use]
    pub fn classify(&self, held: Duration) -> GestureKind {
        if held < self.config.click_timeout {
            GestureKind::Click
        } else {
            GestureKind::Drag
        }
    }

    /// Track pointer movement. Never touches flip state.
    pub fn on_move(&mut self, pos: Point) {
        self.pointer = pos;
    }

    /// Start watching a press at `pos`.
    ///
    /// Returns the index of the flip that started dragging, if any.
    pub fn on_press<V: PageView>(
        &mut self,
        pos: Point,
        now: Instant,
        flips: &mut FlipStack<V>,
    ) -> Option<usize> {
        self.pointer = pos;
        self.press = Some(Press {
            at: now,
            right_side: pos.x > 0.0,
        });

        if pos.x.abs() >= self.half_book_width {
            return None;
        }

        let current = flips.current_page();
        let candidate = if pos.x < 0.0 && current >= 1 {
            Some(current - 1)
        } else if pos.x > 0.0 && current + 1 < flips.len() {
            Some(current)
        } else {
            None
        };

        let index = candidate.filter(|&i| flips.begin_drag(i))?;
        #[cfg(feature = "tracing")]
        tracing::debug!(index, x = pos.x, "flip drag started");
        Some(index)
    }

    /// Finish the press being watched.
    ///
    /// Returns `None` when no press was in progress.
    pub fn on_release<V: PageView>(
        &mut self,
        now: Instant,
        flips: &mut FlipStack<V>,
    ) -> Option<ReleaseOutcome> {
        let press = self.press.take()?;
        let gesture = self.classify(now.saturating_duration_since(press.at));
        let click = gesture == GestureKind::Click;
        let x = self.pointer.x;

        let released_right = x >= 0.0;
        let stay_on_page = !click && released_right == press.right_side;

        let mut turn = None;
        if flips.dragging_index().is_some() {
            let left = (!click && x < 0.0) || (click && x >= 0.0);
            let (direction, side) = if left {
                (TurnDirection::Left, TURNED_LEFT)
            } else {
                (TurnDirection::Right, RESTING_RIGHT)
            };
            for flip in flips.flips_mut().iter_mut().filter(|f| f.dragging) {
                flip.target = side;
            }
            if !stay_on_page {
                match direction {
                    TurnDirection::Left => flips.advance(),
                    TurnDirection::Right => flips.retreat(),
                }
            }
            turn = Some(direction);
        }
        flips.end_drags();

        let outcome = ReleaseOutcome {
            gesture,
            stay_on_page,
            turn,
            page_number: flips.page_number(),
        };
        #[cfg(feature = "tracing")]
        tracing::debug!(?outcome, "pointer released");
        Some(outcome)
    }

    /// Pointer left the region: release if a press is being watched.
    pub fn on_leave<V: PageView>(
        &mut self,
        now: Instant,
        flips: &mut FlipStack<V>,
    ) -> Option<ReleaseOutcome> {
        if self.press.is_some() {
            self.on_release(now, flips)
        } else {
            None
        }
    }

    /// Forget any press in progress.
    pub fn reset(&mut self) {
        self.press = None;
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
