#![forbid(unsafe_code)]

//! Drawing surface abstraction.
//!
//! A [`Surface`] is the shared 2D canvas the fold painter draws on. It keeps
//! a transform stack like an immediate-mode canvas: `save`/`restore` bracket
//! a translation, and paths are given in the current frame.

use kurbo::{BezPath, Rect, Shape, Vec2};

use crate::paint::Paint;

/// Path flattening tolerance for shapes converted to paths.
const SHAPE_TOLERANCE: f64 = 0.1;

/// Immediate-mode 2D canvas owned by the host.
pub trait Surface {
    /// Erase everything painted so far.
    fn clear(&mut self);

    /// Push the current transform.
    fn save(&mut self);

    /// Pop to the last saved transform. Unbalanced calls are ignored.
    fn restore(&mut self);

    /// Translate the current frame by `offset`.
    fn translate(&mut self, offset: Vec2);

    fn fill(&mut self, path: &BezPath, paint: &Paint);

    fn stroke(&mut self, path: &BezPath, paint: &Paint, width: f64);

    /// Show or hide the surface.
    fn set_visible(&mut self, _visible: bool) {}

    /// Fill an axis-aligned rectangle.
    fn fill_rect(&mut self, rect: Rect, paint: &Paint) {
        self.fill(&rect.to_path(SHAPE_TOLERANCE), paint);
    }
}
