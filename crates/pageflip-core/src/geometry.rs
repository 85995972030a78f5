#![forbid(unsafe_code)]

//! Fold geometry and book slot layout.
//!
//! [`FoldGeometry::compute`] maps a flip's progress onto the visual
//! measurements of the paper fold: where the crease sits relative to the
//! spine, how wide the folded flap is, how strongly it bows, and how far each
//! drop shadow spreads. It is a pure function; the renderer and the page view
//! sizing both derive from it.
//!
//! # Invariants
//!
//! 1. `strength = 1 - |progress|`, so it peaks at 1 when progress is 0.
//! 2. `fold_width` is 0 at rest on the right (`progress = 1`).
//! 3. Shadow widths never exceed a quarter of the page width and are never
//!    negative, even if progress drifts slightly past 1.
//! 4. Identical inputs produce bit-identical outputs.

use kurbo::Point;

/// Perspective bow of the curling edge at full strength.
pub const MAX_VERTICAL_OUTDENT: f64 = 20.0;

/// Upper clamp for the shadow spread factor.
const MAX_SHADOW_SPREAD: f64 = 0.5;

// ---------------------------------------------------------------------------
// Fold basis
// ---------------------------------------------------------------------------

/// Which length drives the crease position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum FoldBasis {
    /// `fold_x = page_width * progress + fold_width`.
    #[default]
    Page,
    /// Wider-book variant: `fold_x = book_width / 2 * progress + fold_width`.
    HalfBook,
}

/// Measurements the fold is computed against.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FoldDimensions {
    pub page_width: f64,
    pub book_width: f64,
    pub page_height: f64,
    pub basis: FoldBasis,
}

impl FoldDimensions {
    /// Dimensions using the default [`FoldBasis::Page`].
    #[must_use]
    pub const fn new(page_width: f64, book_width: f64, page_height: f64) -> Self {
        Self {
            page_width,
            book_width,
            page_height,
            basis: FoldBasis::Page,
        }
    }

    /// Override the fold basis (builder pattern).
    #[must_use]
    pub const fn with_basis(mut self, basis: FoldBasis) -> Self {
        self.basis = basis;
        self
    }
}

// ---------------------------------------------------------------------------
// FoldGeometry
// ---------------------------------------------------------------------------

/// Visual geometry of one flip at a given progress.
///
/// All x values are relative to the spine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FoldGeometry {
    /// Horizontal position of the page's outer fold edge.
    pub fold_x: f64,
    /// Width of the folded flap; the crease sits at `fold_x - fold_width`.
    pub fold_width: f64,
    /// How pronounced the fold is, 1 at mid-turn and 0 at rest.
    pub strength: f64,
    /// Perspective bow of the curling edge.
    pub vertical_outdent: f64,
    /// Spread of the highlight gradient across the folded paper.
    pub paper_shadow_width: f64,
    /// Spread of the drop shadow left of the crease.
    pub left_shadow_width: f64,
    /// Spread of the drop shadow right of the fold edge.
    pub right_shadow_width: f64,
    /// Page height carried through for path construction.
    pub page_height: f64,
}

impl FoldGeometry {
    /// Compute the fold geometry for `progress` against `dims`.
    #[must_use]
    pub fn compute(progress: f64, dims: FoldDimensions) -> Self {
        let strength = 1.0 - progress.abs();
        let fold_width = dims.page_width * 0.5 * (1.0 - progress);
        let reach = match dims.basis {
            FoldBasis::Page => dims.page_width,
            FoldBasis::HalfBook => dims.book_width / 2.0,
        };
        let fold_x = reach * progress + fold_width;

        Self {
            fold_x,
            fold_width,
            strength,
            vertical_outdent: MAX_VERTICAL_OUTDENT * strength,
            paper_shadow_width: shadow_width(dims.page_width, 1.0 - progress),
            left_shadow_width: shadow_width(dims.page_width, strength),
            right_shadow_width: shadow_width(dims.page_width, strength),
            page_height: dims.page_height,
        }
    }

    /// X position of the crease line.
    #[inline]
    #[must_use]
    pub fn crease_x(&self) -> f64 {
        self.fold_x - self.fold_width
    }

    /// Width the turning page view should be cut to.
    #[inline]
    #[must_use]
    pub fn visible_width(&self, page_width: f64) -> f64 {
        self.fold_x.clamp(0.0, page_width.max(0.0))
    }
}

/// Convenience form of [`FoldGeometry::compute`] with [`FoldBasis::Page`].
#[must_use]
pub fn fold_geometry(
    progress: f64,
    page_width: f64,
    book_width: f64,
    page_height: f64,
) -> FoldGeometry {
    FoldGeometry::compute(
        progress,
        FoldDimensions::new(page_width, book_width, page_height),
    )
}

#[inline]
fn shadow_width(page_width: f64, spread: f64) -> f64 {
    page_width * 0.5 * spread.clamp(0.0, MAX_SHADOW_SPREAD)
}

// ---------------------------------------------------------------------------
// Slot layout
// ---------------------------------------------------------------------------

/// Side of the spine a page slot sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Left,
    Right,
}

/// Which index parity occupies the left slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum SlotParity {
    #[default]
    EvenLeft,
    OddLeft,
}

impl SlotParity {
    /// Side of the spine for the page at `index`.
    #[must_use]
    pub const fn side(self, index: usize) -> Side {
        let even = index % 2 == 0;
        match (self, even) {
            (Self::EvenLeft, true) | (Self::OddLeft, false) => Side::Left,
            _ => Side::Right,
        }
    }
}

/// Placement of the two page slots around the spine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BookLayout {
    pub book_width: f64,
    pub page_width: f64,
    pub page_height: f64,
    pub padding_left: f64,
    pub padding_top: f64,
    pub page_gap: f64,
    pub parity: SlotParity,
}

impl BookLayout {
    /// X of the spine measured from the book's left edge.
    #[inline]
    #[must_use]
    pub fn spine_x(&self) -> f64 {
        self.padding_left + self.page_width + self.page_gap / 2.0
    }

    /// Left offset of the slot holding the page at `index`.
    #[must_use]
    pub fn slot_left(&self, index: usize) -> f64 {
        let spine = self.spine_x();
        match self.parity.side(index) {
            Side::Left => spine - self.page_gap / 2.0 - self.page_width,
            Side::Right => spine + self.page_gap / 2.0,
        }
    }

    /// Half of the book width; presses beyond it are outside the book.
    #[inline]
    #[must_use]
    pub fn half_book_width(&self) -> f64 {
        self.book_width / 2.0
    }

    /// Fold dimensions for this layout.
    #[must_use]
    pub fn fold_dimensions(&self, basis: FoldBasis) -> FoldDimensions {
        FoldDimensions::new(self.page_width, self.book_width, self.page_height).with_basis(basis)
    }
}

// ---------------------------------------------------------------------------
// Spine frame
// ---------------------------------------------------------------------------

/// Converts viewport-local pointer positions into the spine-centered frame.
///
/// The origin defaults to the center of the viewport. When the book is laid
/// out from the viewport's left edge, [`SpineFrame::with_spine_x`] pins the
/// origin to the painted spine instead. Negative x is the left leaf.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SpineFrame {
    pub width: f64,
    pub height: f64,
    /// Viewport-local position of the spine-centered origin.
    pub origin: Point,
}

impl SpineFrame {
    #[must_use]
    pub const fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            origin: Point::new(width / 2.0, height / 2.0),
        }
    }

    /// Pin the horizontal origin to a viewport-local spine position.
    #[must_use]
    pub const fn with_spine_x(mut self, spine_x: f64) -> Self {
        self.origin.x = spine_x;
        self
    }

    /// Map a viewport-local point into spine coordinates.
    #[inline]
    #[must_use]
    pub fn to_spine(&self, local: Point) -> Point {
        Point::new(local.x - self.origin.x, local.y - self.origin.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-12;

    fn dims() -> FoldDimensions {
        FoldDimensions::new(400.0, 830.0, 250.0)
    }

    #[test]
    fn mid_turn_has_full_strength() {
        let g = FoldGeometry::compute(0.0, dims());
        assert!((g.strength - 1.0).abs() < EPS);
        assert!((g.vertical_outdent - MAX_VERTICAL_OUTDENT).abs() < EPS);
        assert!((g.fold_width - 200.0).abs() < EPS);
        assert!((g.fold_x - 200.0).abs() < EPS);
    }

    #[test]
    fn resting_right_has_no_fold() {
        let g = FoldGeometry::compute(1.0, dims());
        assert_eq!(g.fold_width, 0.0);
        assert_eq!(g.strength, 0.0);
        assert_eq!(g.fold_x, 400.0);
        assert_eq!(g.visible_width(400.0), 400.0);
    }

    #[test]
    fn turned_left_collapses_visible_width() {
        let g = FoldGeometry::compute(-1.0, dims());
        // fold_x = -400 + 400 = 0
        assert!(g.fold_x.abs() < EPS);
        assert_eq!(g.visible_width(400.0), 0.0);
        assert!((g.crease_x() + 400.0).abs() < EPS);
    }

    #[test]
    fn shadows_are_capped_at_quarter_page() {
        let g = FoldGeometry::compute(-1.0, dims());
        // 1 - progress = 2 clamps to 0.5
        assert!((g.paper_shadow_width - 100.0).abs() < EPS);
        let mid = FoldGeometry::compute(0.0, dims());
        assert!((mid.left_shadow_width - 100.0).abs() < EPS);
        assert!((mid.right_shadow_width - 100.0).abs() < EPS);
    }

    #[test]
    fn overshoot_never_produces_negative_shadow() {
        let g = FoldGeometry::compute(1.000_000_1, dims());
        assert!(g.paper_shadow_width >= 0.0);
        assert!(g.left_shadow_width >= 0.0);
        assert!(g.right_shadow_width >= 0.0);
    }

    #[test]
    fn half_book_basis_scales_crease_by_book() {
        let d = dims().with_basis(FoldBasis::HalfBook);
        let g = FoldGeometry::compute(0.5, d);
        // fold_width = 400 * 0.5 * 0.5 = 100; fold_x = 415 * 0.5 + 100
        assert!((g.fold_width - 100.0).abs() < EPS);
        assert!((g.fold_x - 307.5).abs() < EPS);
    }

    #[test]
    fn free_function_matches_page_basis() {
        let a = fold_geometry(0.3, 400.0, 830.0, 250.0);
        let b = FoldGeometry::compute(0.3, dims());
        assert_eq!(a, b);
    }

    #[test]
    fn slot_parity_sides() {
        assert_eq!(SlotParity::EvenLeft.side(0), Side::Left);
        assert_eq!(SlotParity::EvenLeft.side(1), Side::Right);
        assert_eq!(SlotParity::OddLeft.side(0), Side::Right);
        assert_eq!(SlotParity::OddLeft.side(3), Side::Left);
    }

    #[test]
    fn slot_offsets_straddle_spine() {
        let layout = BookLayout {
            book_width: 830.0,
            page_width: 400.0,
            page_height: 250.0,
            padding_left: 15.0,
            padding_top: 10.0,
            page_gap: 30.0,
            parity: SlotParity::EvenLeft,
        };
        assert_eq!(layout.spine_x(), 430.0);
        assert_eq!(layout.slot_left(0), 15.0);
        assert_eq!(layout.slot_left(1), 445.0);
        assert_eq!(layout.half_book_width(), 415.0);
    }

    #[test]
    fn spine_frame_centers_origin() {
        let frame = SpineFrame::new(800.0, 300.0);
        let p = frame.to_spine(Point::new(350.0, 150.0));
        assert_eq!(p, Point::new(-50.0, 0.0));
    }

    #[test]
    fn spine_frame_follows_layout_spine() {
        let layout = BookLayout {
            book_width: 830.0,
            page_width: 400.0,
            page_height: 250.0,
            padding_left: 15.0,
            padding_top: 10.0,
            page_gap: 30.0,
            parity: SlotParity::EvenLeft,
        };
        let frame = SpineFrame::new(830.0, 270.0).with_spine_x(layout.spine_x());
        assert_eq!(frame.to_spine(Point::new(430.0, 135.0)), Point::new(0.0, 0.0));
        // The outer edge of the right page sits half a book width out.
        let edge = frame.to_spine(Point::new(845.0, 135.0));
        assert_eq!(edge.x, layout.half_book_width());
    }
}
