//! zipai - deterministic Chinese-text reference-image rasterizer
//!
//! Converts a short Chinese string into a vertically-laid-out PNG,
//! returned as a base64 data URL. Each character independently picks a
//! font from the primary/fallback/system chain based on glyph coverage,
//! and the font size shrinks to fit the canvas.
//!
//! # Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────┐
//! │            TextImageRenderer               │
//! ├────────────────────────────────────────────┤
//! │  Layout (size, cell positions)             │
//! │        ↓ per character                     │
//! │  Resolver (primary → fallback → system)    │
//! │        ↓                                   │
//! │  Canvas (rasterize, blend)  →  PNG/base64  │
//! └────────────────────────────────────────────┘
//! ```
//!
//! The font registry loads once at construction and is immutable
//! afterwards; rendering is a pure function of its inputs, so identical
//! requests produce byte-identical output.

pub mod config;
pub mod constants;
pub mod error;
pub mod font;
pub mod render;
pub mod utils;

pub use config::Config;
pub use error::RenderError;
pub use font::{FontRegistry, FontSlot};
pub use render::{RenderOptions, TextImageRenderer, DATA_URL_PREFIX};
