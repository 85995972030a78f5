#![forbid(unsafe_code)]

//! Paper-fold painter.
//!
//! [`FoldRenderer::draw_flip`] turns one flip's progress into page view
//! sizing and a set of surface draws:
//!
//! 1. the turning page view is cut to `clamp(fold_x, 0, page_width)`;
//! 2. optionally the covered page view is clipped to the part right of the
//!    fold edge;
//! 3. in a frame whose origin is the top of the spine it paints, in order,
//!    the crease line, the right drop shadow, the left drop shadow and the
//!    folded paper with its outline.
//!
//! # Invariants
//!
//! 1. Every draw is bracketed by `save`/`restore`; the surface transform is
//!    unchanged afterwards.
//! 2. The flip's progress, target and dragging flag are never written.
//!
//! # Failure Modes
//!
//! A zero or negative page width yields degenerate (zero-area) shapes; the
//! painter still issues them rather than guessing a size.

use kurbo::{BezPath, Point, Rect, Vec2};

use pageflip_core::flip::FlipState;
use pageflip_core::geometry::{BookLayout, FoldBasis, FoldGeometry};
use pageflip_core::page::PageView;

use crate::paint::{ColorStop, LinearGradient, Paint, Rgba};
use crate::surface::Surface;

// ---------------------------------------------------------------------------
// Style
// ---------------------------------------------------------------------------

/// Colors, opacities and line widths of the fold.
///
/// Opacities marked "at full strength" are multiplied by the fold strength.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct FoldStyle {
    /// Crease line opacity at full strength. Default: 0.05.
    pub crease_alpha: f64,
    /// Crease line width at full strength. Default: 30.
    pub crease_width: f64,
    /// Right drop shadow opacity at the fold edge, at full strength. Default: 0.2.
    pub right_shadow_alpha: f64,
    /// Gradient offset where the right shadow has faded out. Default: 0.8.
    pub right_shadow_fade: f64,
    /// Left drop shadow opacity at the crease, at full strength. Default: 0.15.
    pub left_shadow_alpha: f64,
    /// Highlight bands across the folded paper.
    pub paper_stops: [ColorStop; 4],
    pub outline: Rgba,
    pub outline_width: f64,
    /// Clip the covered page view to the area right of the fold edge.
    pub clip_underlying: bool,
    /// Paint spine and page-edge guide lines.
    pub debug_guides: bool,
}

impl Default for FoldStyle {
    fn default() -> Self {
        Self {
            crease_alpha: 0.05,
            crease_width: 30.0,
            right_shadow_alpha: 0.2,
            right_shadow_fade: 0.8,
            left_shadow_alpha: 0.15,
            paper_stops: [
                ColorStop::new(0.35, Rgba::from_hex(0xfafafa)),
                ColorStop::new(0.73, Rgba::from_hex(0xeeeeee)),
                ColorStop::new(0.9, Rgba::from_hex(0xfafafa)),
                ColorStop::new(1.0, Rgba::from_hex(0xe2e2e2)),
            ],
            outline: Rgba::new(0, 0, 0, 0.06),
            outline_width: 0.5,
            clip_underlying: false,
            debug_guides: false,
        }
    }
}

impl FoldStyle {
    #[must_use]
    pub fn with_clip_underlying(mut self, on: bool) -> Self {
        self.clip_underlying = on;
        self
    }

    #[must_use]
    pub fn with_debug_guides(mut self, on: bool) -> Self {
        self.debug_guides = on;
        self
    }

    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        let unit = |v: f64| (0.0..=1.0).contains(&v);
        for (name, v) in [
            ("style.crease_alpha", self.crease_alpha),
            ("style.right_shadow_alpha", self.right_shadow_alpha),
            ("style.right_shadow_fade", self.right_shadow_fade),
            ("style.left_shadow_alpha", self.left_shadow_alpha),
        ] {
            if !unit(v) {
                errors.push(format!("{name} must be in [0, 1], got {v}"));
            }
        }
        if !(self.crease_width >= 0.0) {
            errors.push(format!("style.crease_width must be >= 0, got {}", self.crease_width));
        }
        if !(self.outline_width >= 0.0) {
            errors.push(format!("style.outline_width must be >= 0, got {}", self.outline_width));
        }
        if self.paper_stops.windows(2).any(|w| w[0].offset > w[1].offset) {
            errors.push("style.paper_stops offsets must be non-decreasing".to_string());
        }
        errors
    }
}

// ---------------------------------------------------------------------------
// Renderer
// ---------------------------------------------------------------------------

/// Paints flips onto a [`Surface`].
#[derive(Debug, Clone, Default)]
pub struct FoldRenderer {
    style: FoldStyle,
    basis: FoldBasis,
}

impl FoldRenderer {
    #[must_use]
    pub fn new(style: FoldStyle) -> Self {
        Self {
            style,
            basis: FoldBasis::Page,
        }
    }

    /// Override the fold basis (builder pattern).
    #[must_use]
    pub fn with_basis(mut self, basis: FoldBasis) -> Self {
        self.basis = basis;
        self
    }

    #[must_use]
    pub fn style(&self) -> &FoldStyle {
        &self.style
    }

    #[must_use]
    pub fn basis(&self) -> FoldBasis {
        self.basis
    }

    /// Size the page views for `flip` and paint its fold.
    pub fn draw_flip<V, S>(
        &self,
        surface: &mut S,
        layout: &BookLayout,
        flip: &mut FlipState<V>,
        covered: Option<&mut V>,
    ) -> FoldGeometry
    where
        V: PageView,
        S: Surface + ?Sized,
    {
        let g = FoldGeometry::compute(flip.progress, layout.fold_dimensions(self.basis));

        let visible = g.visible_width(flip.page_width);
        flip.page.set_visible_width(visible);

        if self.style.clip_underlying
            && let Some(page) = covered
        {
            let clip = (visible > 0.0).then(|| {
                Rect::new(visible, 0.0, page.width().max(visible), page.height())
            });
            page.set_clip(clip);
        }

        surface.save();
        surface.translate(Vec2::new(layout.spine_x(), layout.padding_top));
        self.paint_crease(surface, &g);
        self.paint_right_shadow(surface, &g);
        self.paint_left_shadow(surface, &g);
        self.paint_paper(surface, &g);
        if self.style.debug_guides {
            paint_guides(surface, layout);
        }
        surface.restore();

        #[cfg(feature = "tracing")]
        tracing::trace!(
            progress = flip.progress,
            fold_x = g.fold_x,
            visible,
            "flip drawn"
        );
        g
    }

    fn paint_crease<S: Surface + ?Sized>(&self, surface: &mut S, g: &FoldGeometry) {
        let x = g.crease_x();
        let mut path = BezPath::new();
        path.move_to((x, -g.vertical_outdent * 0.5));
        path.line_to((x, g.page_height + g.vertical_outdent * 0.5));
        let paint = Paint::Solid(Rgba::BLACK.with_alpha(self.style.crease_alpha * g.strength));
        surface.stroke(&path, &paint, self.style.crease_width * g.strength);
    }

    fn paint_right_shadow<S: Surface + ?Sized>(&self, surface: &mut S, g: &FoldGeometry) {
        let x0 = g.fold_x;
        let x1 = g.fold_x + g.right_shadow_width;
        let gradient = LinearGradient::new(Point::new(x0, 0.0), Point::new(x1, 0.0))
            .with_stop(
                0.0,
                Rgba::BLACK.with_alpha(self.style.right_shadow_alpha * g.strength),
            )
            .with_stop(self.style.right_shadow_fade, Rgba::TRANSPARENT);
        surface.fill_rect(Rect::new(x0, 0.0, x1, g.page_height), &gradient.into());
    }

    fn paint_left_shadow<S: Surface + ?Sized>(&self, surface: &mut S, g: &FoldGeometry) {
        let x1 = g.crease_x();
        let x0 = x1 - g.left_shadow_width;
        let gradient = LinearGradient::new(Point::new(x0, 0.0), Point::new(x1, 0.0))
            .with_stop(0.0, Rgba::TRANSPARENT)
            .with_stop(
                1.0,
                Rgba::BLACK.with_alpha(self.style.left_shadow_alpha * g.strength),
            );
        surface.fill_rect(Rect::new(x0, 0.0, x1, g.page_height), &gradient.into());
    }

    fn paint_paper<S: Surface + ?Sized>(&self, surface: &mut S, g: &FoldGeometry) {
        let gradient = LinearGradient::new(
            Point::new(g.fold_x - g.paper_shadow_width, 0.0),
            Point::new(g.fold_x, 0.0),
        )
        .with_stops(&self.style.paper_stops);
        let path = paper_path(g);
        surface.fill(&path, &gradient.into());
        surface.stroke(
            &path,
            &Paint::Solid(self.style.outline),
            self.style.outline_width,
        );
    }
}

/// Outline of the folded flap: a straight outer edge at `fold_x` and a
/// crease edge bowed out by the vertical outdent at both ends.
#[must_use]
pub fn paper_path(g: &FoldGeometry) -> BezPath {
    let h = g.page_height;
    let o = g.vertical_outdent;
    let crease = g.crease_x();
    let mut path = BezPath::new();
    path.move_to((g.fold_x, 0.0));
    path.line_to((g.fold_x, h));
    path.quad_to((g.fold_x, h + o * 2.0), (crease, h + o));
    path.line_to((crease, -o));
    path.quad_to((g.fold_x, -o * 2.0), (g.fold_x, 0.0));
    path
}

fn paint_guides<S: Surface + ?Sized>(surface: &mut S, layout: &BookLayout) {
    let half_gap = layout.page_gap / 2.0;
    let w = layout.page_width;
    let h = layout.page_height;
    let guides = [
        (Rgba::rgb(255, 0, 0), (half_gap, 0.0), (w + half_gap, h)),
        (Rgba::rgb(0, 255, 0), (-half_gap, 0.0), (-w - half_gap, 0.0)),
        (Rgba::rgb(0, 0, 255), (0.0, 0.0), (0.0, h)),
    ];
    for (color, from, to) in guides {
        let mut path = BezPath::new();
        path.move_to(from);
        path.line_to(to);
        surface.stroke(&path, &Paint::Solid(color), 2.0);
    }
}
