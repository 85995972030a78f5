#![forbid(unsafe_code)]

//! Headless recording surface.
//!
//! [`DisplayList`] implements [`Surface`] by recording every call as a
//! [`DrawCommand`]. Hosts without a native canvas can replay it onto their
//! own backend; tests inspect it directly.
//!
//! # Usage
//!
//! ```
//! use kurbo::{Rect, Vec2};
//! use pageflip_render::display_list::{DisplayList, DrawCommand};
//! use pageflip_render::paint::{Paint, Rgba};
//! use pageflip_render::surface::Surface;
//!
//! let mut list = DisplayList::new();
//! list.save();
//! list.translate(Vec2::new(430.0, 10.0));
//! list.fill_rect(Rect::new(0.0, 0.0, 10.0, 10.0), &Paint::Solid(Rgba::BLACK));
//! list.restore();
//!
//! assert_eq!(list.fills().count(), 1);
//! assert_eq!(list.offset(), Vec2::ZERO);
//! ```
//!
//! # Invariants
//!
//! 1. `clear` discards the recorded frame, so `commands()` always describes
//!    the frame painted since the last clear.
//! 2. The translation stack never underflows; an unbalanced `restore` is a
//!    no-op.

use kurbo::{BezPath, Vec2};

use crate::paint::Paint;
use crate::surface::Surface;

/// One recorded surface call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear,
    Save,
    Restore,
    Translate(Vec2),
    Fill {
        path: BezPath,
        paint: Paint,
        /// Translation in effect when the fill was issued.
        offset: Vec2,
    },
    Stroke {
        path: BezPath,
        paint: Paint,
        width: f64,
        offset: Vec2,
    },
}

/// Recording [`Surface`].
#[derive(Debug, Clone, Default)]
pub struct DisplayList {
    commands: Vec<DrawCommand>,
    offset: Vec2,
    saved: Vec<Vec2>,
    visible: bool,
    clears: usize,
}

impl DisplayList {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Commands recorded since the last clear.
    #[must_use]
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Number of times the surface has been cleared.
    #[must_use]
    pub fn clear_count(&self) -> usize {
        self.clears
    }

    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Translation currently in effect.
    #[must_use]
    pub fn offset(&self) -> Vec2 {
        self.offset
    }

    /// Recorded fills, in order.
    pub fn fills(&self) -> impl Iterator<Item = (&BezPath, &Paint)> {
        self.commands.iter().filter_map(|cmd| match cmd {
            DrawCommand::Fill { path, paint, .. } => Some((path, paint)),
            _ => None,
        })
    }

    /// Recorded strokes, in order, with their line widths.
    pub fn strokes(&self) -> impl Iterator<Item = (&BezPath, &Paint, f64)> {
        self.commands.iter().filter_map(|cmd| match cmd {
            DrawCommand::Stroke { path, paint, width, .. } => Some((path, paint, *width)),
            _ => None,
        })
    }

    /// Take the recorded commands, leaving the list empty.
    pub fn take(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }
}

impl Surface for DisplayList {
    fn clear(&mut self) {
        self.commands.clear();
        self.commands.push(DrawCommand::Clear);
        self.clears += 1;
    }

    fn save(&mut self) {
        self.saved.push(self.offset);
        self.commands.push(DrawCommand::Save);
    }

    fn restore(&mut self) {
        if let Some(offset) = self.saved.pop() {
            self.offset = offset;
            self.commands.push(DrawCommand::Restore);
        }
    }

    fn translate(&mut self, offset: Vec2) {
        self.offset += offset;
        self.commands.push(DrawCommand::Translate(offset));
    }

    fn fill(&mut self, path: &BezPath, paint: &Paint) {
        self.commands.push(DrawCommand::Fill {
            path: path.clone(),
            paint: paint.clone(),
            offset: self.offset,
        });
    }

    fn stroke(&mut self, path: &BezPath, paint: &Paint, width: f64) {
        self.commands.push(DrawCommand::Stroke {
            path: path.clone(),
            paint: paint.clone(),
            width,
            offset: self.offset,
        });
    }

    fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::paint::Rgba;
    use kurbo::Rect;

    #[test]
    fn clear_starts_a_new_frame() {
        let mut list = DisplayList::new();
        list.fill_rect(Rect::new(0.0, 0.0, 1.0, 1.0), &Rgba::BLACK.into());
        list.clear();
        assert_eq!(list.commands(), &[DrawCommand::Clear]);
        assert_eq!(list.clear_count(), 1);
    }

    #[test]
    fn unbalanced_restore_is_ignored() {
        let mut list = DisplayList::new();
        list.restore();
        assert!(list.is_empty());
        assert_eq!(list.offset(), Vec2::ZERO);
    }

    #[test]
    fn fills_capture_active_translation() {
        let mut list = DisplayList::new();
        list.save();
        list.translate(Vec2::new(5.0, 2.0));
        list.fill_rect(Rect::new(0.0, 0.0, 1.0, 1.0), &Rgba::BLACK.into());
        list.restore();
        let offset = list.commands().iter().find_map(|c| match c {
            DrawCommand::Fill { offset, .. } => Some(*offset),
            _ => None,
        });
        assert_eq!(offset, Some(Vec2::new(5.0, 2.0)));
        assert_eq!(list.offset(), Vec2::ZERO);
    }

    #[test]
    fn visibility_is_tracked() {
        let mut list = DisplayList::new();
        assert!(!list.is_visible());
        list.set_visible(true);
        assert!(list.is_visible());
    }
}
