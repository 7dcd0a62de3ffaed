//! Global constants for zipai
//!
//! Consolidates render defaults, tile preset parameters, and self-test
//! constants to eliminate magic numbers throughout the codebase.

// ============================================================================
// Render Defaults
// ============================================================================

/// Default canvas width (pixels)
pub const DEFAULT_WIDTH: u32 = 300;

/// Default canvas height (pixels)
pub const DEFAULT_HEIGHT: u32 = 400;

/// Default requested font size (pixels). A soft upper bound: the layout
/// engine may shrink it to fit the canvas.
pub const DEFAULT_FONT_SIZE: f32 = 120.0;

/// Default background color (RRGGBB)
pub const DEFAULT_BACKGROUND: &str = "#FFFFFF";

/// Default text color (RRGGBB)
pub const DEFAULT_TEXT_COLOR: &str = "#000000";

/// Default canvas padding (pixels)
pub const DEFAULT_PADDING: u32 = 40;

/// Default vertical gap between consecutive characters (pixels)
pub const DEFAULT_CHAR_SPACING: f32 = 20.0;

/// Smallest font size the layout engine will ever emit. Very long input
/// would otherwise drive the computed size to zero or below.
pub const MIN_RENDER_FONT_SIZE: f32 = 1.0;

// ============================================================================
// Tile Preset (mahjong-tile-shaped reference images)
// ============================================================================

/// Tile canvas width (pixels)
pub const TILE_WIDTH: u32 = 300;

/// Tile canvas height (pixels)
pub const TILE_HEIGHT: u32 = 400;

/// Tile requested font size (pixels)
pub const TILE_FONT_SIZE: f32 = 100.0;

/// Tile background color: beige, close to an ivory mahjong tile face
pub const TILE_BACKGROUND: &str = "#F5E8C8";

/// Tile text color: near-black ink
pub const TILE_TEXT_COLOR: &str = "#2B2B2B";

/// Tile canvas padding (pixels)
pub const TILE_PADDING: u32 = 30;

// ============================================================================
// Font Registry Self-Test
// ============================================================================

/// Probe character for the fallback-font self-test. Chosen because a
/// decorative primary font is unlikely to cover it while any usable
/// kai-style fallback must: a fallback that cannot rasterize it is not
/// worth keeping in the chain.
pub const SELF_TEST_CHAR: char = '鬱';

/// Rasterization size for the self-test probe (pixels)
pub const SELF_TEST_SIZE: f32 = 64.0;

// ============================================================================
// Placeholder Glyph (system-default tier without a usable font)
// ============================================================================

/// Inset of the placeholder box from the character cell, as a fraction
/// of the cell size
pub const PLACEHOLDER_INSET: f32 = 0.1;

/// Stroke thickness of the placeholder box, as a fraction of the cell size
pub const PLACEHOLDER_STROKE: f32 = 0.08;
