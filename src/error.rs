//! Typed error surface for the rendering core
//!
//! Only invalid input is surfaced to callers; font problems degrade
//! through the fallback chain and are logged, never raised.

use thiserror::Error;

/// Errors returned by the rendering entry points.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("input text is empty; at least one character is required")]
    EmptyText,

    #[error("invalid canvas dimensions: {width}x{height} (both must be > 0)")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("invalid font size: {size} (must be > 0)")]
    InvalidFontSize { size: f32 },

    #[error("padding {padding} too large for {width}x{height} canvas (must be < half the smaller side)")]
    PaddingTooLarge {
        padding: u32,
        width: u32,
        height: u32,
    },

    #[error("PNG encoding failed: {source}")]
    Encode {
        #[from]
        source: png::EncodingError,
    },
}
