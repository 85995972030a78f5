#![forbid(unsafe_code)]

//! pageflip public facade crate.
//!
//! Re-exports the common types from `pageflip-core`, `pageflip-render` and
//! `pageflip-runtime`, plus a [`prelude`] for hosts.
//!
//! # Example
//!
//! ```ignore
//! use pageflip::prelude::*;
//!
//! let mut book = BookController::new(my_host);
//! book.open(BookConfig::default(), |page| println!("turned to {page}"))?;
//!
//! // From the host's pointer listeners:
//! book.handle_pointer(PointerEvent::down(620.0, 120.0), Instant::now());
//!
//! // From the host's frame callback:
//! book.tick(elapsed);
//! ```

pub mod error;

pub use error::{Error, Result};

pub use pageflip_core::{
    BookLayout, EasingConfig, FlipStack, FlipState, FoldBasis, FoldDimensions, FoldGeometry,
    GestureConfig, GestureKind, GesturePhase, NavDirection, OpenPageReport, PageView,
    PointerController, PointerEvent, PointerEventKind, ReleaseOutcome, Side, SlotParity,
    SpineFrame, TurnDirection, fold_geometry,
};
pub use pageflip_render::{
    ColorStop, DisplayList, DrawCommand, FoldRenderer, FoldStyle, LinearGradient, Paint, Rgba,
    Surface,
};
pub use pageflip_runtime::{
    AnimationScheduler, BookConfig, BookConfigError, BookController, BookError, BookHost,
    FrameReport, PageTurnCallback, SchedulerConfig,
};

pub use web_time::Instant;

pub use pageflip_core as core;
pub use pageflip_render as render;
pub use pageflip_runtime as runtime;

/// Prelude for hosts embedding a book.
pub mod prelude {
    pub use crate::{
        BookConfig, BookController, BookHost, DisplayList, Error, FoldStyle, Instant, PageView,
        PointerEvent, Result, SpineFrame, Surface,
    };
}
