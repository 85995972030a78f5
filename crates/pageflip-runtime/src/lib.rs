#![forbid(unsafe_code)]

//! Runtime: book controller, host interface and animation scheduler.
//!
//! # Role in pageflip
//! `pageflip-runtime` is the orchestrator. It owns an open book's state,
//! routes pointer events into the gesture classifier, runs the fixed-rate
//! easing loop, and tells the host about page turns.
//!
//! # Primary responsibilities
//! - **BookController**: `open`, `open_page`, `destroy`, pointer routing and
//!   the `tick`/`step` entry points.
//! - **BookHost**: the trait the surrounding application implements.
//! - **AnimationScheduler**: fixed-step clock and per-tick redraw pass.
//! - **BookConfig**: configuration as data, loadable from TOML or JSON with
//!   the `book-config` feature.
//!
//! # How it fits in the system
//! Model types come from `pageflip-core` and drawing from `pageflip-render`;
//! the host supplies page views, a surface and a tick source.

pub mod book_config;
pub mod controller;
pub mod error;
pub mod host;
pub mod scheduler;

pub use book_config::BookConfig;
pub use controller::{BookController, PageTurnCallback};
pub use error::{BookConfigError, BookError};
pub use host::BookHost;
pub use scheduler::{AnimationScheduler, FrameReport, SchedulerConfig};
