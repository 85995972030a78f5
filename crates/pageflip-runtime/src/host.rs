#![forbid(unsafe_code)]

//! Host collaborator interface.
//!
//! The surrounding application (a document viewer, a canvas app, a test
//! harness) implements [`BookHost`] and hands it to the
//! [`BookController`](crate::controller::BookController). The controller
//! never looks anything up globally; everything it needs from the outside
//! world comes through this trait.

use pageflip_core::geometry::SpineFrame;
use pageflip_core::page::PageView;
use pageflip_render::surface::Surface;

/// Everything the book engine consumes from its host.
pub trait BookHost {
    /// Handle to one host page view.
    type Page: PageView;
    /// The shared drawing surface laid over the pages.
    type Surface: Surface;

    /// Page view handles in host order. Called once per `open`.
    fn page_views(&mut self) -> Vec<Self::Page>;

    /// One-based page the host currently shows, if it tracks one.
    ///
    /// When `Some`, `open` starts on this page instead of the configured
    /// initial page.
    fn current_page(&self) -> Option<usize> {
        None
    }

    /// Size of the region pointer events are reported against.
    ///
    /// The book is laid out from the region's left edge, so the controller
    /// moves the frame's horizontal origin onto the layout's spine.
    fn viewport(&self) -> SpineFrame;

    /// Start delivering pointer events to the controller.
    fn attach_pointer_listeners(&mut self);

    /// Stop delivering pointer events.
    fn detach_pointer_listeners(&mut self);

    fn surface_mut(&mut self) -> &mut Self::Surface;

    /// Switch the host's presentation into or out of book layout.
    fn set_book_mode(&mut self, _enabled: bool) {}
}
