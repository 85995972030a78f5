#![forbid(unsafe_code)]

//! Fixed-rate animation scheduler.
//!
//! The host calls [`AnimationScheduler::advance`] with elapsed wall time (from
//! a timer, an animation-frame callback, or a test loop); the scheduler turns
//! it into whole fixed-length ticks. Each tick runs [`AnimationScheduler::frame`]:
//!
//! - flips are visited from the last index to the first, so a covering page
//!   is eased and queued before the page beneath it;
//! - a flip needing rendering tracks the pointer while dragging, eases one
//!   step, and is queued for redraw when it moved at least the redraw epsilon;
//! - the surface is cleared once, then queued flips are painted in queue order.
//!
//! # Invariants
//!
//! 1. A stopped scheduler runs no ticks and keeps no time backlog.
//! 2. One `advance` call runs at most `max_catch_up_steps` ticks; excess
//!    backlog is dropped rather than replayed later.
//! 3. A frame in which nothing needs rendering leaves the surface untouched.

use std::time::Duration;

use pageflip_core::animation::EasingConfig;
use pageflip_core::flip::FlipStack;
use pageflip_core::geometry::BookLayout;
use pageflip_core::page::PageView;
use pageflip_render::fold::FoldRenderer;
use pageflip_render::surface::Surface;

/// Default tick length, 1/60 s.
const DEFAULT_FRAME_INTERVAL: Duration = Duration::from_micros(16_667);

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

/// Tick timing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchedulerConfig {
    /// Length of one tick. Default: 1/60 s.
    pub frame_interval: Duration,
    /// Most ticks run for one `advance` call. Default: 4.
    pub max_catch_up_steps: u32,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            frame_interval: DEFAULT_FRAME_INTERVAL,
            max_catch_up_steps: 4,
        }
    }
}

impl SchedulerConfig {
    /// Tick length for `hz` ticks per second; falls back to 60 Hz for
    /// non-positive or non-finite rates.
    #[must_use]
    pub fn from_rate(hz: f64) -> Self {
        let frame_interval = Duration::try_from_secs_f64(1.0 / hz)
            .ok()
            .filter(|d| !d.is_zero())
            .unwrap_or(DEFAULT_FRAME_INTERVAL);
        Self {
            frame_interval,
            ..Self::default()
        }
    }

    #[must_use]
    pub const fn with_max_catch_up_steps(mut self, steps: u32) -> Self {
        self.max_catch_up_steps = steps;
        self
    }
}

// ---------------------------------------------------------------------------
// Frame report
// ---------------------------------------------------------------------------

/// What one animation tick did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FrameReport {
    /// Flips that needed rendering this tick.
    pub animating: usize,
    /// Flips painted this tick.
    pub redrawn: usize,
}

impl FrameReport {
    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.animating == 0
    }
}

// ---------------------------------------------------------------------------
// Scheduler
// ---------------------------------------------------------------------------

/// Fixed-step clock plus the per-tick easing and redraw pass.
#[derive(Debug, Clone, Default)]
pub struct AnimationScheduler {
    config: SchedulerConfig,
    running: bool,
    accumulator: Duration,
    ticks: u64,
}

impl AnimationScheduler {
    #[must_use]
    pub fn new(config: SchedulerConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    pub fn start(&mut self) {
        self.running = true;
        self.accumulator = Duration::ZERO;
    }

    pub fn stop(&mut self) {
        self.running = false;
        self.accumulator = Duration::ZERO;
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Ticks run since creation.
    #[must_use]
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Feed `dt` of wall time; returns how many ticks are now due.
    pub fn advance(&mut self, dt: Duration) -> u32 {
        if !self.running {
            return 0;
        }
        let interval = self.config.frame_interval;
        if interval.is_zero() {
            return 0;
        }
        self.accumulator = self.accumulator.saturating_add(dt);
        let mut steps = 0;
        while self.accumulator >= interval && steps < self.config.max_catch_up_steps {
            self.accumulator -= interval;
            steps += 1;
        }
        if self.accumulator >= interval {
            tracing::trace!(
                dropped = ?self.accumulator,
                "animation backlog dropped"
            );
            self.accumulator = Duration::ZERO;
        }
        steps
    }

    /// Run one animation tick over `flips` and paint the result.
    pub fn frame<V, S>(
        &mut self,
        flips: &mut FlipStack<V>,
        pointer_x: f64,
        layout: &BookLayout,
        easing: &EasingConfig,
        renderer: &FoldRenderer,
        surface: &mut S,
    ) -> FrameReport
    where
        V: PageView,
        S: Surface + ?Sized,
    {
        self.ticks += 1;

        if !flips.flips().iter().any(|f| f.needs_rendering(easing)) {
            for flip in flips.flips_mut() {
                flip.page.set_displayed(true);
            }
            return FrameReport::default();
        }

        let current = flips.current_page();
        let mut report = FrameReport::default();
        let mut queue = Vec::new();
        for i in (0..flips.len()).rev() {
            let Some((flip, covered)) = flips.split_for_draw(i) else {
                continue;
            };
            if flip.needs_rendering(easing) {
                report.animating += 1;
                flip.page.set_displayed(true);
                if let Some(page) = covered {
                    page.set_displayed(true);
                }
                if flip.dragging {
                    flip.track_pointer(pointer_x, layout.page_width);
                }
                flip.ease(easing);
                if flip.take_redraw(easing) {
                    queue.push(i);
                }
            } else if i == current {
                flip.page.set_displayed(true);
                flip.page.set_visible_width(flip.page_width);
            }
        }

        surface.set_visible(true);
        if !queue.is_empty() {
            surface.clear();
            for &i in &queue {
                if let Some((flip, covered)) = flips.split_for_draw(i) {
                    renderer.draw_flip(surface, layout, flip, covered);
                    report.redrawn += 1;
                }
            }
        }

        tracing::trace!(
            tick = self.ticks,
            animating = report.animating,
            redrawn = report.redrawn,
            "animation tick"
        );
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pageflip_core::geometry::SlotParity;
    use pageflip_core::page::StubPage;
    use pageflip_render::display_list::{DisplayList, DrawCommand};
    use pageflip_render::paint::Paint;

    const TICK: Duration = DEFAULT_FRAME_INTERVAL;

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

    fn stack(n: usize) -> FlipStack<StubPage> {
        FlipStack::new((0..n).map(|_| StubPage::new(400.0, 250.0)).collect())
    }

    fn run(
        sched: &mut AnimationScheduler,
        flips: &mut FlipStack<StubPage>,
        surface: &mut DisplayList,
        pointer_x: f64,
    ) -> FrameReport {
        sched.frame(
            flips,
            pointer_x,
            &layout(),
            &EasingConfig::default(),
            &FoldRenderer::default(),
            surface,
        )
    }

    #[test]
    fn stopped_scheduler_runs_nothing() {
        let mut sched = AnimationScheduler::default();
        assert_eq!(sched.advance(TICK * 3), 0);
        sched.start();
        assert_eq!(sched.advance(TICK * 3), 3);
    }

    #[test]
    fn partial_ticks_accumulate() {
        let mut sched = AnimationScheduler::default();
        sched.start();
        assert_eq!(sched.advance(TICK / 2), 0);
        assert_eq!(sched.advance(TICK / 2 + Duration::from_micros(1)), 1);
    }

    #[test]
    fn catch_up_is_capped_and_backlog_dropped() {
        let mut sched = AnimationScheduler::default();
        sched.start();
        assert_eq!(sched.advance(Duration::from_secs(1)), 4);
        assert_eq!(sched.advance(Duration::ZERO), 0);
    }

    #[test]
    fn stop_clears_backlog() {
        let mut sched = AnimationScheduler::default();
        sched.start();
        sched.advance(TICK / 2);
        sched.stop();
        sched.start();
        assert_eq!(sched.advance(TICK / 2), 0);
    }

    #[test]
    fn from_rate_rejects_nonsense() {
        assert_eq!(SchedulerConfig::from_rate(0.0).frame_interval, DEFAULT_FRAME_INTERVAL);
        assert_eq!(SchedulerConfig::from_rate(f64::NAN).frame_interval, DEFAULT_FRAME_INTERVAL);
        assert_eq!(SchedulerConfig::from_rate(-5.0).frame_interval, DEFAULT_FRAME_INTERVAL);
        let fifty = SchedulerConfig::from_rate(50.0).frame_interval;
        assert!((fifty.as_secs_f64() - 0.02).abs() < 1e-9);
    }

    #[test]
    fn idle_frame_leaves_surface_alone() {
        let mut sched = AnimationScheduler::default();
        let mut flips = stack(3);
        let mut surface = DisplayList::new();
        let report = run(&mut sched, &mut flips, &mut surface, 0.0);
        assert!(report.is_idle());
        assert!(surface.is_empty());
        assert!(!surface.is_visible());
        assert!(flips.flips().iter().all(|f| f.page.displayed));
    }

    #[test]
    fn animating_flip_is_eased_and_painted_once() {
        let mut sched = AnimationScheduler::default();
        let mut flips = stack(3);
        flips.flips_mut()[0].progress = 0.5;
        flips.flips_mut()[0].target = -1.0;
        let mut surface = DisplayList::new();
        let report = run(&mut sched, &mut flips, &mut surface, 0.0);
        assert_eq!(report, FrameReport { animating: 1, redrawn: 1 });
        assert!((flips.flips()[0].progress - 0.2).abs() < 1e-12);
        assert_eq!(surface.commands()[0], DrawCommand::Clear);
        assert!(surface.is_visible());
    }

    #[test]
    fn redraws_run_last_page_first() {
        let mut sched = AnimationScheduler::default();
        let mut flips = stack(4);
        flips.flips_mut()[0].progress = 0.5;
        flips.flips_mut()[0].target = -1.0;
        flips.flips_mut()[2].progress = 0.0;
        flips.flips_mut()[2].target = -1.0;
        let mut surface = DisplayList::new();
        run(&mut sched, &mut flips, &mut surface, 0.0);
        assert_eq!(surface.clear_count(), 1);
        // Flip 2 (progress -0.2, fold edge at 160) is painted before flip 0
        // (progress 0.2, fold edge at 240).
        let edges: Vec<f64> = surface
            .fills()
            .filter_map(|(_, paint)| match paint {
                Paint::Linear(g) if g.stops.len() == 2 && g.stops[1].offset == 0.8 => {
                    Some(g.start.x)
                }
                _ => None,
            })
            .collect();
        assert_eq!(edges.len(), 2, "{edges:?}");
        assert!((edges[0] - 160.0).abs() < 1e-9);
        assert!((edges[1] - 240.0).abs() < 1e-9);
    }

    #[test]
    fn dragging_flip_tracks_pointer() {
        let mut sched = AnimationScheduler::default();
        let mut flips = stack(3);
        flips.begin_drag(0);
        let mut surface = DisplayList::new();
        run(&mut sched, &mut flips, &mut surface, -200.0);
        assert_eq!(flips.flips()[0].target, -0.5);
        assert!((flips.flips()[0].progress - 0.7).abs() < 1e-12);
    }

    #[test]
    fn settled_current_page_restored_to_full_width() {
        let mut sched = AnimationScheduler::default();
        let mut flips = stack(3);
        flips.open_page(2);
        flips.flips_mut()[1].page.visible_width = Some(12.0);
        flips.flips_mut()[2].progress = 0.5;
        flips.flips_mut()[2].target = -1.0;
        let mut surface = DisplayList::new();
        run(&mut sched, &mut flips, &mut surface, 0.0);
        assert_eq!(flips.flips()[1].page.visible_width, Some(400.0));
    }

    #[test]
    fn tiny_moves_are_not_redrawn() {
        let mut sched = AnimationScheduler::default();
        let mut flips = stack(2);
        let flip = &mut flips.flips_mut()[0];
        flip.progress = 0.5;
        flip.target = 0.5;
        flip.last_progress = 0.5;
        let mut surface = DisplayList::new();
        let report = run(&mut sched, &mut flips, &mut surface, 0.0);
        assert_eq!(report, FrameReport { animating: 1, redrawn: 0 });
        assert!(surface.is_empty());
    }

    #[test]
    fn animation_settles() {
        let mut sched = AnimationScheduler::default();
        let mut flips = stack(2);
        flips.flips_mut()[0].progress = 0.5;
        flips.flips_mut()[0].target = -1.0;
        let mut surface = DisplayList::new();
        let mut ticks = 0;
        while !run(&mut sched, &mut flips, &mut surface, 0.0).is_idle() {
            ticks += 1;
            assert!(ticks < 100, "animation never settled");
        }
        assert!(flips.flips()[0].progress <= -0.997);
    }
}
