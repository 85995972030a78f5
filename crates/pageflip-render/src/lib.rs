#![forbid(unsafe_code)]

//! Render: surfaces, paints and the paper-fold painter.
//!
//! # Role in pageflip
//! `pageflip-render` turns fold geometry into drawing calls. It never decides
//! *when* a flip is drawn; the runtime's scheduler does that.
//!
//! # Primary responsibilities
//! - **Surface**: the immediate-mode canvas trait hosts implement.
//! - **Paint**: solid colors and linear gradients.
//! - **DisplayList**: a headless recording surface for tests and replay.
//! - **FoldRenderer**: sizes page views and paints crease, shadows and paper.

pub mod display_list;
pub mod fold;
pub mod paint;
pub mod surface;

pub use display_list::{DisplayList, DrawCommand};
pub use fold::{FoldRenderer, FoldStyle, paper_path};
pub use paint::{ColorStop, LinearGradient, Paint, Rgba};
pub use surface::Surface;
