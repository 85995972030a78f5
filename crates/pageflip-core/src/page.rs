#![forbid(unsafe_code)]

//! Host page view handles.
//!
//! The engine never creates or destroys page views. It reads their measured
//! size once at open time and afterwards only writes presentation
//! attributes: visible width, display, stacking order, slot offset and clip.

use kurbo::Rect;

/// A host-owned visual element showing one page.
pub trait PageView {
    /// Measured width of the page view.
    fn width(&self) -> f64;

    /// Measured height of the page view.
    fn height(&self) -> f64;

    /// Cut the page view to `width`, keeping its left edge in place.
    fn set_visible_width(&mut self, width: f64);

    /// Show or hide the page view.
    fn set_displayed(&mut self, displayed: bool);

    /// Stacking order; higher values draw above lower ones.
    fn set_stack_order(&mut self, order: usize);

    /// Horizontal offset of the page view within the book.
    fn set_slot_offset(&mut self, left: f64);

    /// Restrict drawing to `clip` in page-local coordinates, or lift the clip.
    fn set_clip(&mut self, _clip: Option<Rect>) {}
}

/// In-memory page view recording every attribute the engine writes.
///
/// `changes` counts writes that actually altered a value, which lets tests
/// assert that an operation caused no visual change.
#[cfg(any(test, feature = "test-helpers"))]
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StubPage {
    pub width: f64,
    pub height: f64,
    pub visible_width: Option<f64>,
    pub displayed: bool,
    pub stack_order: Option<usize>,
    pub slot_offset: Option<f64>,
    pub clip: Option<Rect>,
    pub changes: usize,
}

#[cfg(any(test, feature = "test-helpers"))]
impl StubPage {
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    fn record<T: PartialEq>(slot: &mut T, value: T, changes: &mut usize) {
        if *slot != value {
            *slot = value;
            *changes += 1;
        }
    }
}

#[cfg(any(test, feature = "test-helpers"))]
impl PageView for StubPage {
    fn width(&self) -> f64 {
        self.width
    }

    fn height(&self) -> f64 {
        self.height
    }

    fn set_visible_width(&mut self, width: f64) {
        Self::record(&mut self.visible_width, Some(width), &mut self.changes);
    }

    fn set_displayed(&mut self, displayed: bool) {
        Self::record(&mut self.displayed, displayed, &mut self.changes);
    }

    fn set_stack_order(&mut self, order: usize) {
        Self::record(&mut self.stack_order, Some(order), &mut self.changes);
    }

    fn set_slot_offset(&mut self, left: f64) {
        Self::record(&mut self.slot_offset, Some(left), &mut self.changes);
    }

    fn set_clip(&mut self, clip: Option<Rect>) {
        Self::record(&mut self.clip, clip, &mut self.changes);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stub_counts_only_real_changes() {
        let mut page = StubPage::new(400.0, 250.0);
        page.set_visible_width(400.0);
        page.set_visible_width(400.0);
        page.set_displayed(true);
        page.set_displayed(true);
        assert_eq!(page.changes, 2);
        page.set_visible_width(120.0);
        assert_eq!(page.changes, 3);
        assert_eq!(page.visible_width, Some(120.0));
    }

    #[test]
    fn default_clip_is_noop_for_minimal_views() {
        struct Bare;
        impl PageView for Bare {
            fn width(&self) -> f64 {
                1.0
            }
            fn height(&self) -> f64 {
                1.0
            }
            fn set_visible_width(&mut self, _: f64) {}
            fn set_displayed(&mut self, _: bool) {}
            fn set_stack_order(&mut self, _: usize) {}
            fn set_slot_offset(&mut self, _: f64) {}
        }
        let mut bare = Bare;
        bare.set_clip(Some(Rect::new(0.0, 0.0, 1.0, 1.0)));
        assert_eq!(bare.width(), 1.0);
    }
}
