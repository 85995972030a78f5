#![forbid(unsafe_code)]

//! Core: flip state, fold geometry, easing and pointer gestures.
//!
//! # Role in pageflip
//! `pageflip-core` is the pure model layer. It owns everything that can be
//! computed without a drawing surface or a host: the per-page flip records,
//! the fold geometry derived from a flip's progress, and the click/drag
//! classifier that turns pointer input into flip targets.
//!
//! # Primary responsibilities
//! - **FlipStack**: the ordered flip records of one open book and the
//!   page-navigation rules that force them left or right.
//! - **FoldGeometry**: crease position, fold width, bow and shadow spreads.
//! - **EasingConfig**: the per-tick exponential approach and settle rules.
//! - **PointerController**: press/release classification and page changes.
//! - **PageView**: the trait host page views implement.
//!
//! # How it fits in the system
//! The renderer (`pageflip-render`) reads [`geometry::FoldGeometry`] to paint
//! a flip, and the runtime (`pageflip-runtime`) drives [`flip::FlipStack`]
//! from a fixed-rate tick and host pointer events.

pub mod animation;
pub mod event;
pub mod flip;
pub mod geometry;
pub mod gesture;
pub mod logging;
pub mod page;

pub use animation::{EasingConfig, clamp_unit};
pub use event::{PointerEvent, PointerEventKind};
pub use flip::{FlipStack, FlipState, NavDirection, OpenPageReport};
pub use geometry::{
    BookLayout, FoldBasis, FoldDimensions, FoldGeometry, Side, SlotParity, SpineFrame,
    fold_geometry,
};
pub use gesture::{
    GestureConfig, GestureKind, GesturePhase, PointerController, ReleaseOutcome, TurnDirection,
};
pub use page::PageView;

#[cfg(any(test, feature = "test-helpers"))]
pub use page::StubPage;

// Re-export tracing macros at crate root for ergonomic use.
#[cfg(feature = "tracing")]
pub use logging::{
    debug, debug_span, error, error_span, info, info_span, trace, trace_span, warn, warn_span,
};
