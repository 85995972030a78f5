#![forbid(unsafe_code)]

//! Per-page flip state and the ordered flip stack of a book.
//!
//! A [`FlipStack`] holds one [`FlipState`] per host page view, index-aligned
//! with the host's page order, plus the engine's notion of the current page.
//!
//! # Invariants
//!
//! 1. `progress` and `target` stay within `[-1, 1]`.
//! 2. At most one flip has `dragging = true`.
//! 3. The current page index is always a valid slot (or 0 for an empty stack).
//! 4. [`FlipStack::open_page`] with the current page on a settled stack
//!    changes nothing.

use std::cmp::Ordering;

use crate::animation::{EasingConfig, clamp_unit};
use crate::geometry::BookLayout;
use crate::page::PageView;

/// Progress of a page lying flat on the right side.
pub const RESTING_RIGHT: f64 = 1.0;
/// Progress of a page fully turned over to the left side.
pub const TURNED_LEFT: f64 = -1.0;
/// `last_progress` value that forces the next tick to consider a redraw.
pub const FORCE_REDRAW_SENTINEL: f64 = -1.0;

// ---------------------------------------------------------------------------
// FlipState
// ---------------------------------------------------------------------------

/// Animated turning state of one page.
#[derive(Debug, Clone, PartialEq)]
pub struct FlipState<V> {
    /// Current fold position: -1 turned left, +1 resting right, 0 mid-turn.
    pub progress: f64,
    /// Progress as of the last redraw.
    pub last_progress: f64,
    /// Value `progress` eases toward.
    pub target: f64,
    /// True while the pointer controls `target`.
    pub dragging: bool,
    /// Host page view this flip animates.
    pub page: V,
    /// Width of the page view captured at open time.
    pub page_width: f64,
}

impl<V: PageView> FlipState<V> {
    /// A flip resting on the right, showing its page at full width.
    pub fn resting(mut page: V) -> Self {
        let page_width = page.width();
        page.set_visible_width(page_width);
        page.set_displayed(true);
        Self {
            progress: RESTING_RIGHT,
            last_progress: RESTING_RIGHT,
            target: RESTING_RIGHT,
            dragging: false,
            page,
            page_width,
        }
    }

    /// Whether this flip must be animated on the current tick.
    ///
    /// A flip lying on the side opposite its target is not at rest, even
    /// though its progress is inside the settle band.
    #[inline]
    #[must_use]
    pub fn needs_rendering(&self, easing: &EasingConfig) -> bool {
        self.dragging || !easing.is_settled(self.progress) || self.progress * self.target < 0.0
    }

    /// Point the target at the pointer's spine-relative x.
    pub fn track_pointer(&mut self, pointer_x: f64, page_width: f64) {
        self.target = clamp_unit(pointer_x / page_width);
    }

    /// Advance progress one easing step toward the target.
    pub fn ease(&mut self, easing: &EasingConfig) {
        self.progress = easing.ease(self.progress, self.target);
    }

    /// Record a redraw if the flip is still animating and moved enough.
    ///
    /// Returns `true` when the caller should paint this flip.
    pub fn take_redraw(&mut self, easing: &EasingConfig) -> bool {
        if self.needs_rendering(easing)
            && (self.progress - self.last_progress).abs() >= easing.redraw_epsilon
        {
            self.last_progress = self.progress;
            true
        } else {
            false
        }
    }

    /// Snap to a resting side unless the flip is already heading there.
    ///
    /// Returns `true` if anything changed.
    fn force(&mut self, side: f64) -> bool {
        if self.target == side && !self.dragging {
            return false;
        }
        self.progress = side;
        self.target = side;
        self.last_progress = FORCE_REDRAW_SENTINEL;
        self.dragging = false;
        let width = if side == TURNED_LEFT {
            0.0
        } else {
            self.page_width
        };
        self.page.set_visible_width(width);
        true
    }

    /// Re-aim the flip straddling a navigation target.
    fn straddle(&mut self, direction: NavDirection) -> bool {
        match direction {
            NavDirection::Forward if self.target == TURNED_LEFT => {
                self.target = RESTING_RIGHT;
                self.progress = 0.0;
                true
            }
            NavDirection::Backward if self.target == RESTING_RIGHT => {
                self.target = TURNED_LEFT;
                self.progress = 0.0;
                true
            }
            _ => false,
        }
    }
}

// ---------------------------------------------------------------------------
// Navigation
// ---------------------------------------------------------------------------

/// Direction of a page change relative to the previous current page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavDirection {
    Forward,
    Backward,
    Stay,
}

impl NavDirection {
    #[must_use]
    pub fn between(previous: usize, next: usize) -> Self {
        match next.cmp(&previous) {
            Ordering::Greater => Self::Forward,
            Ordering::Less => Self::Backward,
            Ordering::Equal => Self::Stay,
        }
    }
}

/// What [`FlipStack::open_page`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpenPageReport {
    /// Zero-based page index now current.
    pub page_index: usize,
    pub direction: NavDirection,
    /// Number of flips whose state changed.
    pub changed: usize,
    /// True if the requested page number had to be clamped.
    pub clamped: bool,
}

// ---------------------------------------------------------------------------
// FlipStack
// ---------------------------------------------------------------------------

/// Ordered flips of an open book.
#[derive(Debug, Clone)]
pub struct FlipStack<V> {
    flips: Vec<FlipState<V>>,
    current: usize,
}

impl<V: PageView> FlipStack<V> {
    /// Build resting flips for `pages`, in host order.
    pub fn new(pages: Vec<V>) -> Self {
        Self {
            flips: pages.into_iter().map(FlipState::resting).collect(),
            current: 0,
        }
    }

    /// Stack earlier pages above later ones and place each on its slot.
    pub fn arrange(&mut self, layout: &BookLayout) {
        let len = self.flips.len();
        for (i, flip) in self.flips.iter_mut().enumerate() {
            flip.page.set_stack_order(len - i);
            flip.page.set_slot_offset(layout.slot_left(i));
        }
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.flips.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.flips.is_empty()
    }

    /// Zero-based index of the current page.
    #[inline]
    #[must_use]
    pub fn current_page(&self) -> usize {
        self.current
    }

    /// One-based number of the current page, as reported to the host.
    #[inline]
    #[must_use]
    pub fn page_number(&self) -> usize {
        self.current + 1
    }

    #[must_use]
    pub fn flips(&self) -> &[FlipState<V>] {
        &self.flips
    }

    pub fn flips_mut(&mut self) -> &mut [FlipState<V>] {
        &mut self.flips
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&FlipState<V>> {
        self.flips.get(index)
    }

    /// Clamp an index into the slot range.
    #[must_use]
    pub fn clamp_index(&self, index: usize) -> usize {
        index.min(self.flips.len().saturating_sub(1))
    }

    /// Move the current page one forward, stopping at the last slot.
    pub fn advance(&mut self) {
        self.current = self.clamp_index(self.current + 1);
    }

    /// Move the current page one back, stopping at the first slot.
    pub fn retreat(&mut self) {
        self.current = self.current.saturating_sub(1);
    }

    /// Index of the flip under pointer control, if any.
    #[must_use]
    pub fn dragging_index(&self) -> Option<usize> {
        self.flips.iter().position(|f| f.dragging)
    }

    /// Hand pointer control to the flip at `index`.
    ///
    /// Refused if another flip is already dragging or the index is out of range.
    pub fn begin_drag(&mut self, index: usize) -> bool {
        if self.dragging_index().is_some() {
            return false;
        }
        match self.flips.get_mut(index) {
            Some(flip) => {
                flip.dragging = true;
                true
            }
            None => false,
        }
    }

    /// Clear pointer control on every flip.
    pub fn end_drags(&mut self) {
        for flip in &mut self.flips {
            flip.dragging = false;
        }
    }

    /// Settle the stack on `page_number` (one-based).
    ///
    /// Flips before the page are forced to the left, flips after it to the
    /// right; the flip at the page itself is only re-aimed when its target
    /// contradicts the navigation direction. Flips already heading to their
    /// forced side keep animating.
    pub fn open_page(&mut self, page_number: usize) -> OpenPageReport {
        let requested = page_number.saturating_sub(1);
        let page_index = self.clamp_index(requested);
        let clamped = page_index != requested || page_number == 0;
        let direction = NavDirection::between(self.current, page_index);
        self.current = page_index;

        let mut changed = 0;
        for (i, flip) in self.flips.iter_mut().enumerate() {
            let did_change = match i.cmp(&page_index) {
                Ordering::Less => flip.force(TURNED_LEFT),
                Ordering::Greater => flip.force(RESTING_RIGHT),
                Ordering::Equal => flip.straddle(direction),
            };
            if did_change {
                changed += 1;
            }
        }

        OpenPageReport {
            page_index,
            direction,
            changed,
            clamped,
        }
    }

    /// Borrow the flip at `index` together with the page view it covers.
    pub fn split_for_draw(&mut self, index: usize) -> Option<(&mut FlipState<V>, Option<&mut V>)> {
        if index >= self.flips.len() {
            return None;
        }
        let (head, tail) = self.flips.split_at_mut(index + 1);
        let flip = head.last_mut()?;
        let covered = tail.first_mut().map(|f| &mut f.page);
        Some((flip, covered))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::SlotParity;
    use crate::page::StubPage;

    fn stack(n: usize) -> FlipStack<StubPage> {
        FlipStack::new((0..n).map(|_| StubPage::new(400.0, 250.0)).collect())
    }

    fn layout() -> BookLayout {
        BookLayout {
            book_width: 830.0,
            page_width: 400.0,
            page_height: 250.0,
            padding_left: 15.0,
            padding_top: 10.0,
            page_gap: 30.0,
            parity: SlotParity::EvenLeft,
        }
    }

    #[test]
    fn new_stack_is_resting() {
        let s = stack(3);
        for flip in s.flips() {
            assert_eq!(flip.progress, 1.0);
            assert_eq!(flip.target, 1.0);
            assert_eq!(flip.last_progress, 1.0);
            assert!(!flip.dragging);
            assert_eq!(flip.page.visible_width, Some(400.0));
            assert!(flip.page.displayed);
        }
        assert_eq!(s.current_page(), 0);
        assert_eq!(s.page_number(), 1);
    }

    #[test]
    fn arrange_stacks_earlier_pages_on_top() {
        let mut s = stack(4);
        s.arrange(&layout());
        let orders: Vec<_> = s.flips().iter().map(|f| f.page.stack_order).collect();
        assert_eq!(orders, vec![Some(4), Some(3), Some(2), Some(1)]);
        assert_eq!(s.flips()[0].page.slot_offset, Some(15.0));
        assert_eq!(s.flips()[1].page.slot_offset, Some(445.0));
    }

    #[test]
    fn open_page_forces_neighbours() {
        let mut s = stack(5);
        let report = s.open_page(3);
        assert_eq!(report.page_index, 2);
        assert_eq!(report.direction, NavDirection::Forward);
        assert!(!report.clamped);

        for i in 0..2 {
            let f = &s.flips()[i];
            assert_eq!((f.progress, f.target), (-1.0, -1.0));
            assert_eq!(f.last_progress, FORCE_REDRAW_SENTINEL);
            assert_eq!(f.page.visible_width, Some(0.0));
        }
        for i in 2..5 {
            let f = &s.flips()[i];
            assert_eq!((f.progress, f.target), (1.0, 1.0));
            assert_eq!(f.page.visible_width, Some(400.0));
        }
    }

    #[test]
    fn open_page_is_idempotent_on_settled_stack() {
        let mut s = stack(5);
        s.open_page(3);
        let before: Vec<_> = s.flips().to_vec();
        let report = s.open_page(3);
        assert_eq!(report.direction, NavDirection::Stay);
        assert_eq!(report.changed, 0);
        assert_eq!(s.flips(), &before[..]);
    }

    #[test]
    fn open_page_clamps_out_of_range() {
        let mut s = stack(3);
        let report = s.open_page(10);
        assert_eq!(report.page_index, 2);
        assert!(report.clamped);
        let report = s.open_page(0);
        assert_eq!(report.page_index, 0);
        assert!(report.clamped);
    }

    #[test]
    fn straddle_forward_recovers_turned_flip() {
        let mut s = stack(4);
        s.flips_mut()[2].target = -1.0;
        s.flips_mut()[2].progress = -1.0;
        s.open_page(3);
        let f = &s.flips()[2];
        assert_eq!(f.target, 1.0);
        assert_eq!(f.progress, 0.0);
    }

    #[test]
    fn straddle_backward_turns_resting_flip() {
        let mut s = stack(4);
        s.open_page(4);
        // Flip 1 is forced left by the first call; put it back at rest to
        // observe the backward re-aim.
        s.flips_mut()[1].target = 1.0;
        s.flips_mut()[1].progress = 1.0;
        s.open_page(2);
        let f = &s.flips()[1];
        assert_eq!(f.target, -1.0);
        assert_eq!(f.progress, 0.0);
    }

    #[test]
    fn force_keeps_flips_already_heading_there() {
        let mut s = stack(4);
        s.flips_mut()[0].target = -1.0;
        s.flips_mut()[0].progress = 0.4;
        s.open_page(2);
        let f = &s.flips()[0];
        assert_eq!(f.target, -1.0);
        assert_eq!(f.progress, 0.4);
    }

    #[test]
    fn force_leaves_released_flip_to_animate() {
        let easing = EasingConfig::default();
        let mut s = stack(4);
        // Released toward the left before any tick moved it.
        s.flips_mut()[0].target = -1.0;
        let report = s.open_page(2);
        assert_eq!(report.changed, 0);
        let f = &s.flips()[0];
        assert_eq!(f.progress, 1.0);
        assert!(f.needs_rendering(&easing));
    }

    #[test]
    fn flip_resting_opposite_its_target_needs_rendering() {
        let easing = EasingConfig::default();
        let mut flip = FlipState::resting(StubPage::new(400.0, 250.0));
        assert!(!flip.needs_rendering(&easing));
        flip.target = -1.0;
        assert!(flip.needs_rendering(&easing));

        let mut ticks = 0;
        while flip.needs_rendering(&easing) {
            flip.ease(&easing);
            ticks += 1;
            assert!(ticks < 60, "flip never settled");
        }
        assert!(flip.progress <= -0.997);
    }

    #[test]
    fn only_one_flip_may_drag() {
        let mut s = stack(3);
        assert!(s.begin_drag(1));
        assert!(!s.begin_drag(0));
        assert!(!s.begin_drag(7));
        assert_eq!(s.dragging_index(), Some(1));
        s.end_drags();
        assert_eq!(s.dragging_index(), None);
    }

    #[test]
    fn forced_flip_stops_dragging() {
        let mut s = stack(3);
        s.begin_drag(0);
        s.open_page(3);
        assert!(!s.flips()[0].dragging);
    }

    #[test]
    fn advance_and_retreat_clamp() {
        let mut s = stack(2);
        s.retreat();
        assert_eq!(s.current_page(), 0);
        s.advance();
        s.advance();
        assert_eq!(s.current_page(), 1);
    }

    #[test]
    fn split_for_draw_pairs_with_next_page() {
        let mut s = stack(2);
        let (flip, covered) = s.split_for_draw(0).expect("index in range");
        flip.progress = 0.5;
        assert!(covered.is_some());
        let (_, covered) = s.split_for_draw(1).expect("index in range");
        assert!(covered.is_none());
        assert!(s.split_for_draw(2).is_none());
    }

    #[test]
    fn redraw_threshold_suppresses_tiny_moves() {
        let easing = EasingConfig::default();
        let mut flip = FlipState::resting(StubPage::new(400.0, 250.0));
        flip.progress = 0.5;
        flip.last_progress = 0.5005;
        assert!(!flip.take_redraw(&easing));
        flip.progress = 0.49;
        assert!(flip.take_redraw(&easing));
        assert_eq!(flip.last_progress, 0.49);
    }

    #[test]
    fn track_pointer_clamps_target() {
        let mut flip = FlipState::resting(StubPage::new(400.0, 250.0));
        flip.track_pointer(-900.0, 400.0);
        assert_eq!(flip.target, -1.0);
        flip.track_pointer(100.0, 400.0);
        assert_eq!(flip.target, 0.25);
    }
}
