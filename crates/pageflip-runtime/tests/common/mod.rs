//! Shared in-memory host for runtime integration tests.

#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;

use pageflip_core::geometry::SpineFrame;
use pageflip_core::page::StubPage;
use pageflip_render::display_list::DisplayList;
use pageflip_runtime::host::BookHost;

/// Viewport used by [`MockHost`]: as wide as the default book.
pub const VIEWPORT_W: f64 = 830.0;
pub const VIEWPORT_H: f64 = 270.0;

/// Viewport-local spine of the default layout: `15 + 400 + 30 / 2`.
pub const SPINE_X: f64 = 430.0;

/// Viewport-local x for a spine-relative `dx`.
pub fn at(dx: f64) -> f64 {
    SPINE_X + dx
}

/// Viewport-local y on the spine's vertical center.
pub const MID_Y: f64 = VIEWPORT_H / 2.0;

/// Host-side calls observed by the test, shared so they survive the host.
#[derive(Debug, Default)]
pub struct HostLog {
    pub attached: bool,
    pub attach_calls: usize,
    pub detach_calls: usize,
    pub book_mode: bool,
}

pub struct MockHost {
    pub pages: Vec<StubPage>,
    pub current: Option<usize>,
    pub surface: DisplayList,
    pub log: Rc<RefCell<HostLog>>,
}

impl MockHost {
    pub fn with_pages(count: usize) -> Self {
        Self {
            pages: (0..count).map(|_| StubPage::new(400.0, 250.0)).collect(),
            current: None,
            surface: DisplayList::new(),
            log: Rc::new(RefCell::new(HostLog::default())),
        }
    }
}

impl BookHost for MockHost {
    type Page = StubPage;
    type Surface = DisplayList;

    fn page_views(&mut self) -> Vec<StubPage> {
        self.pages.clone()
    }

    fn current_page(&self) -> Option<usize> {
        self.current
    }

    fn viewport(&self) -> SpineFrame {
        SpineFrame::new(VIEWPORT_W, VIEWPORT_H)
    }

    fn attach_pointer_listeners(&mut self) {
        let mut log = self.log.borrow_mut();
        log.attached = true;
        log.attach_calls += 1;
    }

    fn detach_pointer_listeners(&mut self) {
        let mut log = self.log.borrow_mut();
        log.attached = false;
        log.detach_calls += 1;
    }

    fn surface_mut(&mut self) -> &mut DisplayList {
        &mut self.surface
    }

    fn set_book_mode(&mut self, enabled: bool) {
        self.log.borrow_mut().book_mode = enabled;
    }
}

/// Callback that records every page number it is given.
pub fn recorder() -> (Rc<RefCell<Vec<usize>>>, impl FnMut(usize) + 'static) {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    (seen, move |page| sink.borrow_mut().push(page))
}
