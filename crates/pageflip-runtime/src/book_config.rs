#![forbid(unsafe_code)]

//! Book configuration as data.
//!
//! [`BookConfig`] gathers every tunable of one open session: book and page
//! dimensions, slot layout, the initial page, fold basis, easing, gesture
//! timing, tick rate and fold style. It can be loaded from TOML or JSON with
//! the `book-config` feature.
//!
//! # Loading
//!
//! ```toml
//! # book.toml
//! book_width = 1030.0
//! page_width = 500.0
//! initial_page = 3
//!
//! [easing]
//! rate = 0.25
//! ```
//!
//! ```rust,ignore
//! let config = BookConfig::from_toml_file("book.toml")?;
//! ```
//!
//! # Defaults
//!
//! The defaults describe an 830-wide book of 400x250 pages with a 30 px gap,
//! opened on page 1.

use std::time::Duration;

#[cfg(feature = "book-config")]
use std::path::Path;

#[cfg(feature = "book-config")]
use serde::{Deserialize, Serialize};

use pageflip_core::animation::EasingConfig;
use pageflip_core::geometry::{BookLayout, FoldBasis, SlotParity};
use pageflip_core::gesture::GestureConfig;
use pageflip_core::page::PageView;
use pageflip_render::fold::FoldStyle;

#[cfg(feature = "book-config")]
use crate::error::BookConfigError;
use crate::scheduler::SchedulerConfig;

/// Configuration for one open book.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "book-config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "book-config", serde(default))]
pub struct BookConfig {
    pub book_width: f64,
    pub book_height: f64,
    pub page_width: f64,
    pub page_height: f64,
    pub padding_left: f64,
    pub padding_top: f64,
    /// Horizontal distance between the left and right page slots.
    pub page_gap: f64,
    /// One-based page opened first.
    pub initial_page: usize,
    /// Label of the initial page. Accepted but not used for navigation.
    pub initial_page_label: Option<String>,
    pub parity: SlotParity,
    pub fold_basis: FoldBasis,
    pub easing: EasingConfig,
    /// Presses held shorter than this many milliseconds are clicks.
    pub click_timeout_ms: u64,
    /// Fixed animation tick rate.
    pub tick_rate_hz: f64,
    /// Upper bound on ticks run for one `tick(dt)` call.
    pub max_catch_up_steps: u32,
    pub style: FoldStyle,
}

impl Default for BookConfig {
    fn default() -> Self {
        Self {
            book_width: 830.0,
            book_height: 270.0,
            page_width: 400.0,
            page_height: 250.0,
            padding_left: 15.0,
            padding_top: 10.0,
            page_gap: 30.0,
            initial_page: 1,
            initial_page_label: None,
            parity: SlotParity::EvenLeft,
            fold_basis: FoldBasis::Page,
            easing: EasingConfig::default(),
            click_timeout_ms: 500,
            tick_rate_hz: 60.0,
            max_catch_up_steps: 4,
            style: FoldStyle::default(),
        }
    }
}

impl BookConfig {
    /// Slot layout derived from this configuration.
    #[must_use]
    pub fn layout(&self) -> BookLayout {
        BookLayout {
            book_width: self.book_width,
            page_width: self.page_width,
            page_height: self.page_height,
            padding_left: self.padding_left,
            padding_top: self.padding_top,
            page_gap: self.page_gap,
            parity: self.parity,
        }
    }

    #[must_use]
    pub fn gesture(&self) -> GestureConfig {
        GestureConfig::default().with_click_timeout(Duration::from_millis(self.click_timeout_ms))
    }

    #[must_use]
    pub fn scheduler(&self) -> SchedulerConfig {
        SchedulerConfig::from_rate(self.tick_rate_hz).with_max_catch_up_steps(self.max_catch_up_steps)
    }

    /// Size pages and book from the largest measured page view.
    ///
    /// Leaves the configuration unchanged when `pages` is empty.
    #[must_use]
    pub fn fit_pages<V: PageView>(mut self, pages: &[V]) -> Self {
        if pages.is_empty() {
            return self;
        }
        let (w, h) = pages.iter().fold((0.0f64, 0.0f64), |(w, h), page| {
            (w.max(page.width()), h.max(page.height()))
        });
        self.page_width = w;
        self.page_height = h;
        self.book_width = self.padding_left * 2.0 + w * 2.0 + self.page_gap;
        self.book_height = self.padding_top * 2.0 + h;
        self
    }

    /// Validate all values; an empty list means the config is usable.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        for (name, v) in [
            ("book_width", self.book_width),
            ("book_height", self.book_height),
            ("page_width", self.page_width),
            ("page_height", self.page_height),
        ] {
            if !(v.is_finite() && v > 0.0) {
                errors.push(format!("{name} must be a positive finite number, got {v}"));
            }
        }
        for (name, v) in [
            ("padding_left", self.padding_left),
            ("padding_top", self.padding_top),
            ("page_gap", self.page_gap),
        ] {
            if !(v.is_finite() && v >= 0.0) {
                errors.push(format!("{name} must be >= 0, got {v}"));
            }
        }
        if self.initial_page == 0 {
            errors.push("initial_page is one-based and must be >= 1".to_string());
        }
        if self.click_timeout_ms == 0 {
            errors.push("click_timeout_ms must be > 0".to_string());
        }
        if !(self.tick_rate_hz.is_finite() && self.tick_rate_hz > 0.0) {
            errors.push(format!("tick_rate_hz must be > 0, got {}", self.tick_rate_hz));
        }
        if self.max_catch_up_steps == 0 {
            errors.push("max_catch_up_steps must be >= 1".to_string());
        }
        errors.extend(self.easing.validate());
        errors.extend(self.style.validate());
        errors
    }

    /// Load from a TOML string.
    #[cfg(feature = "book-config")]
    pub fn from_toml_str(s: &str) -> Result<Self, BookConfigError> {
        toml::from_str(s).map_err(BookConfigError::Toml)
    }

    /// Load from a TOML file.
    #[cfg(feature = "book-config")]
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, BookConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(BookConfigError::Io)?;
        Self::from_toml_str(&content)
    }

    /// Load from a JSON string.
    #[cfg(feature = "book-config")]
    pub fn from_json_str(s: &str) -> Result<Self, BookConfigError> {
        serde_json::from_str(s).map_err(BookConfigError::Json)
    }

    /// Load from a JSON file.
    #[cfg(feature = "book-config")]
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, BookConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(BookConfigError::Io)?;
        Self::from_json_str(&content)
    }

    /// Load from a TOML file and reject invalid values.
    #[cfg(feature = "book-config")]
    pub fn load_validated(path: impl AsRef<Path>) -> Result<Self, BookConfigError> {
        let config = Self::from_toml_file(path)?;
        let errors = config.validate();
        if errors.is_empty() {
            Ok(config)
        } else {
            Err(BookConfigError::Validation(errors))
        }
    }
}
