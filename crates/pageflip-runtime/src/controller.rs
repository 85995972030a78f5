#![forbid(unsafe_code)]

//! Book controller: lifecycle, pointer routing and the tick entry point.
//!
//! # Lifecycle
//!
//! ```text
//! Closed --open--> Open --destroy--> Closed
//!                   |  ^
//!                   +--+ open (tears down, then reopens)
//! ```
//!
//! While open the controller owns the flip stack, the gesture classifier and
//! the animation scheduler. Pointer events and ticks arrive as `&mut self`
//! calls, so each handler runs to completion before the next starts.
//!
//! # Invariants
//!
//! 1. Listeners are attached exactly while a session is open.
//! 2. The page-turn callback fires once per pointer release, never from
//!    [`BookController::open_page`].
//! 3. After [`BookController::destroy`], pointer events and ticks are no-ops.
//!
//! # Failure Modes
//!
//! - `open` with an invalid config fails before touching the host; an open
//!   session stays open.
//! - `open` with no page views fails and leaves the controller closed.
//! - `open_page` on a closed controller fails with [`BookError::NotOpen`].

use std::fmt;
use std::time::Duration;

use web_time::Instant;

use pageflip_core::event::{PointerEvent, PointerEventKind};
use pageflip_core::flip::{FlipStack, OpenPageReport};
use pageflip_core::geometry::{BookLayout, SpineFrame};
use pageflip_core::gesture::{GesturePhase, PointerController, ReleaseOutcome};
use pageflip_render::fold::FoldRenderer;

use crate::book_config::BookConfig;
use crate::error::BookError;
use crate::host::BookHost;
use crate::scheduler::{AnimationScheduler, FrameReport};

/// Invoked with the one-based page number after every user-driven turn.
pub type PageTurnCallback = Box<dyn FnMut(usize)>;

struct Session<V> {
    config: BookConfig,
    layout: BookLayout,
    viewport: SpineFrame,
    flips: FlipStack<V>,
    pointer: PointerController,
    scheduler: AnimationScheduler,
    renderer: FoldRenderer,
    on_turn: PageTurnCallback,
    page_label: Option<String>,
}

/// Drives one book over a [`BookHost`].
pub struct BookController<H: BookHost> {
    host: H,
    session: Option<Session<H::Page>>,
}

impl<H: BookHost> fmt::Debug for BookController<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BookController")
            .field("open", &self.is_open())
            .field("page", &self.current_page())
            .finish_non_exhaustive()
    }
}

impl<H: BookHost> BookController<H> {
    #[must_use]
    pub fn new(host: H) -> Self {
        Self {
            host,
            session: None,
        }
    }

    #[must_use]
    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.session.is_some()
    }

    /// One-based current page, while open.
    #[must_use]
    pub fn current_page(&self) -> Option<usize> {
        self.session.as_ref().map(|s| s.flips.page_number())
    }

    #[must_use]
    pub fn flips(&self) -> Option<&FlipStack<H::Page>> {
        self.session.as_ref().map(|s| &s.flips)
    }

    #[must_use]
    pub fn config(&self) -> Option<&BookConfig> {
        self.session.as_ref().map(|s| &s.config)
    }

    #[must_use]
    pub fn layout(&self) -> Option<&BookLayout> {
        self.session.as_ref().map(|s| &s.layout)
    }

    /// Label passed with the last page change. Stored, not interpreted.
    #[must_use]
    pub fn page_label(&self) -> Option<&str> {
        self.session.as_ref().and_then(|s| s.page_label.as_deref())
    }

    #[must_use]
    pub fn gesture_phase(&self) -> GesturePhase {
        self.session
            .as_ref()
            .map_or(GesturePhase::Idle, |s| s.pointer.phase())
    }

    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.session.as_ref().is_some_and(|s| {
            s.flips
                .flips()
                .iter()
                .any(|f| f.needs_rendering(&s.config.easing))
        })
    }

    // -----------------------------------------------------------------------
    // Lifecycle
    // -----------------------------------------------------------------------

    /// Open the book over the host's page views.
    ///
    /// An already open book is torn down first.
    pub fn open(
        &mut self,
        config: BookConfig,
        on_turn: impl FnMut(usize) + 'static,
    ) -> Result<OpenPageReport, BookError> {
        let errors = config.validate();
        if !errors.is_empty() {
            tracing::warn!(?errors, "book config rejected");
            return Err(BookError::InvalidConfig(errors));
        }
        self.destroy();

        let pages = self.host.page_views();
        if pages.is_empty() {
            tracing::warn!("no page views to open");
            return Err(BookError::NoPages);
        }

        let layout = config.layout();
        let viewport = self.host.viewport().with_spine_x(layout.spine_x());
        let mut flips = FlipStack::new(pages);
        flips.arrange(&layout);

        let mut scheduler = AnimationScheduler::new(config.scheduler());
        scheduler.start();

        let initial = self.host.current_page().unwrap_or(config.initial_page);
        let page_label = config.initial_page_label.clone();
        let session = Session {
            layout,
            viewport,
            pointer: PointerController::new(config.gesture(), config.book_width),
            renderer: FoldRenderer::new(config.style.clone()).with_basis(config.fold_basis),
            scheduler,
            flips,
            on_turn: Box::new(on_turn),
            page_label,
            config,
        };
        self.host.attach_pointer_listeners();
        self.host.set_book_mode(true);

        tracing::debug!(
            pages = session.flips.len(),
            initial,
            book_width = session.config.book_width,
            "book opened"
        );
        let session = self.session.insert(session);
        let report = session.flips.open_page(initial);
        if report.clamped {
            tracing::warn!(requested = initial, page = report.page_index + 1, "initial page clamped");
        }
        Ok(report)
    }

    /// Host-driven page change. Never invokes the page-turn callback.
    ///
    /// `page_label` is recorded but not used for navigation.
    pub fn open_page(
        &mut self,
        page_number: usize,
        page_label: Option<&str>,
    ) -> Result<OpenPageReport, BookError> {
        let session = self.session.as_mut().ok_or(BookError::NotOpen)?;
        session.page_label = page_label.map(str::to_owned);
        let report = session.flips.open_page(page_number);
        if report.clamped {
            tracing::warn!(
                requested = page_number,
                page = report.page_index + 1,
                "page request clamped"
            );
        }
        tracing::debug!(
            page = report.page_index + 1,
            direction = ?report.direction,
            changed = report.changed,
            "page opened"
        );
        Ok(report)
    }

    /// Stop animating and detach from the host. No-op when closed.
    pub fn destroy(&mut self) {
        let Some(mut session) = self.session.take() else {
            return;
        };
        session.scheduler.stop();
        session.pointer.reset();
        self.host.detach_pointer_listeners();
        self.host.set_book_mode(false);
        tracing::debug!(ticks = session.scheduler.ticks(), "book destroyed");
    }

    // -----------------------------------------------------------------------
    // Input
    // -----------------------------------------------------------------------

    /// Route one viewport-local pointer event.
    ///
    /// Returns the release outcome when the event ended a press; the
    /// page-turn callback has already been invoked by then.
    pub fn handle_pointer(
        &mut self,
        event: PointerEvent,
        now: Instant,
    ) -> Option<ReleaseOutcome> {
        let session = self.session.as_mut()?;
        let pos = session.viewport.to_spine(event.position());
        let outcome = match event.kind {
            PointerEventKind::Move => {
                session.pointer.on_move(pos);
                None
            }
            PointerEventKind::Down => {
                if let Some(index) = session.pointer.on_press(pos, now, &mut session.flips) {
                    tracing::debug!(index, x = pos.x, "flip grabbed");
                }
                None
            }
            PointerEventKind::Up => {
                session.pointer.on_move(pos);
                session.pointer.on_release(now, &mut session.flips)
            }
            PointerEventKind::Leave => session.pointer.on_leave(now, &mut session.flips),
        }?;

        tracing::debug!(
            gesture = ?outcome.gesture,
            stay = outcome.stay_on_page,
            turn = ?outcome.turn,
            page = outcome.page_number,
            "pointer released"
        );
        (session.on_turn)(outcome.page_number);
        Some(outcome)
    }

    // -----------------------------------------------------------------------
    // Animation
    // -----------------------------------------------------------------------

    /// Feed elapsed wall time; runs every tick that became due.
    ///
    /// Returns the number of ticks run.
    pub fn tick(&mut self, dt: Duration) -> u32 {
        let Some(session) = self.session.as_mut() else {
            return 0;
        };
        let steps = session.scheduler.advance(dt);
        for _ in 0..steps {
            self.step();
        }
        steps
    }

    /// Run exactly one animation tick, regardless of elapsed time.
    pub fn step(&mut self) -> Option<FrameReport> {
        let session = self.session.as_mut()?;
        let report = session.scheduler.frame(
            &mut session.flips,
            session.pointer.pointer().x,
            &session.layout,
            &session.config.easing,
            &session.renderer,
            self.host.surface_mut(),
        );
        Some(report)
    }
}

impl<H: BookHost> Drop for BookController<H> {
    fn drop(&mut self) {
        self.destroy();
    }
}
