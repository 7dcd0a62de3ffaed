//! Rasterization and encoding
//!
//! Draws a short string as a centered vertical column into an RGBA
//! canvas, one character per cell, using the per-character font choice
//! from the resolver, then encodes the canvas as a PNG data URL.

pub mod layout;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use log::{debug, info};
use unicode_segmentation::UnicodeSegmentation;

use crate::config::Config;
use crate::constants::{
    DEFAULT_BACKGROUND, DEFAULT_CHAR_SPACING, DEFAULT_FONT_SIZE, DEFAULT_HEIGHT, DEFAULT_PADDING,
    DEFAULT_TEXT_COLOR, DEFAULT_WIDTH, PLACEHOLDER_INSET, PLACEHOLDER_STROKE, TILE_BACKGROUND,
    TILE_FONT_SIZE, TILE_HEIGHT, TILE_PADDING, TILE_TEXT_COLOR, TILE_WIDTH,
};
use crate::error::RenderError;
use crate::font::{resolver, FontRegistry};
use crate::utils::color::{blend_channel, parse_color_or};
use layout::compute_layout;

/// Data URL prefix of every rendered image. Callers split on the first
/// comma to extract the payload, so this prefix must stay comma-free.
pub const DATA_URL_PREFIX: &str = "data:image/png;base64,";

/// Parameters for one render. All fields have usable defaults except
/// `text`.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Characters to draw, top to bottom
    pub text: String,
    /// Canvas width (pixels)
    pub width: u32,
    /// Canvas height (pixels)
    pub height: u32,
    /// Requested font size (soft upper bound)
    pub font_size: f32,
    /// Background color (RRGGBB)
    pub background: String,
    /// Text color (RRGGBB)
    pub text_color: String,
    /// Canvas padding (pixels)
    pub padding: u32,
    /// Vertical gap between characters (pixels)
    pub spacing: f32,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            text: String::new(),
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            font_size: DEFAULT_FONT_SIZE,
            background: DEFAULT_BACKGROUND.to_string(),
            text_color: DEFAULT_TEXT_COLOR.to_string(),
            padding: DEFAULT_PADDING,
            spacing: DEFAULT_CHAR_SPACING,
        }
    }
}

impl RenderOptions {
    /// Options for the given text with all defaults.
    pub fn new(text: &str) -> Self {
        Self {
            text: text.to_string(),
            ..Self::default()
        }
    }
}

/// The rendering service: an immutable font registry plus draw logic.
///
/// Construct once at startup and share by reference; rendering takes
/// `&self` and allocates per-call state only, so concurrent calls need
/// no locking.
pub struct TextImageRenderer {
    registry: FontRegistry,
}

impl TextImageRenderer {
    /// Build a renderer from configuration. Never fails: missing fonts
    /// degrade through the fallback chain.
    pub fn new(config: &Config) -> Self {
        Self {
            registry: FontRegistry::new(&config.fonts),
        }
    }

    /// Build a renderer over an explicit registry (isolated tests, or
    /// offline placeholder-only rendering).
    pub fn from_registry(registry: FontRegistry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &FontRegistry {
        &self.registry
    }

    /// Render `options.text` as a vertical column and return the image
    /// as a `data:image/png;base64,<payload>` string.
    pub fn generate_text_image(&self, options: &RenderOptions) -> Result<String, RenderError> {
        let chars = validate(options)?;

        let plan = compute_layout(
            chars.len(),
            options.width,
            options.height,
            options.padding,
            options.font_size,
            options.spacing,
        );
        debug!(
            "Rendering {} chars at font size {:.1} on {}x{}",
            chars.len(),
            plan.font_size,
            options.width,
            options.height
        );

        let background = parse_color_or(&options.background, DEFAULT_BACKGROUND);
        let text_color = parse_color_or(&options.text_color, DEFAULT_TEXT_COLOR);

        let mut canvas = Canvas::new(options.width, options.height, background);

        for (i, &ch) in chars.iter().enumerate() {
            let choice = resolver::resolve_for_char(&self.registry, ch);
            let cell_top = plan.cell_tops[i];

            match self.registry.font(choice.slot) {
                Some(font) => {
                    canvas.draw_glyph(font, ch, plan.font_size, plan.center_x, cell_top, text_color);
                }
                None => {
                    // System tier without a usable font: draw a hollow
                    // box in the character cell so output stays valid.
                    canvas.draw_placeholder(plan.center_x, cell_top, plan.font_size, text_color);
                }
            }
        }

        let png = canvas.encode_png()?;
        info!(
            "Rendered \"{}\" to {} byte PNG",
            options.text,
            png.len()
        );
        Ok(format!("{}{}", DATA_URL_PREFIX, BASE64.encode(&png)))
    }

    /// Fixed-parameter wrapper tuned for mahjong-tile-shaped output.
    pub fn generate_tile_preset(&self, text: &str) -> Result<String, RenderError> {
        self.generate_text_image(&RenderOptions {
            text: text.to_string(),
            width: TILE_WIDTH,
            height: TILE_HEIGHT,
            font_size: TILE_FONT_SIZE,
            background: TILE_BACKGROUND.to_string(),
            text_color: TILE_TEXT_COLOR.to_string(),
            padding: TILE_PADDING,
            spacing: DEFAULT_CHAR_SPACING,
        })
    }
}

/// Reject malformed input before any rasterization happens. Returns the
/// first code point of each user-perceived character.
fn validate(options: &RenderOptions) -> Result<Vec<char>, RenderError> {
    let chars: Vec<char> = options
        .text
        .graphemes(true)
        .filter_map(|g| g.chars().next())
        .collect();

    if chars.is_empty() {
        return Err(RenderError::EmptyText);
    }
    if options.width == 0 || options.height == 0 {
        return Err(RenderError::InvalidDimensions {
            width: options.width,
            height: options.height,
        });
    }
    if options.font_size <= 0.0 {
        return Err(RenderError::InvalidFontSize {
            size: options.font_size,
        });
    }
    if 2 * options.padding >= options.width.min(options.height) {
        return Err(RenderError::PaddingTooLarge {
            padding: options.padding,
            width: options.width,
            height: options.height,
        });
    }
    Ok(chars)
}

/// CPU-side RGBA canvas.
struct Canvas {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl Canvas {
    fn new(width: u32, height: u32, background: (u8, u8, u8)) -> Self {
        let (r, g, b) = background;
        let mut pixels = vec![0u8; width as usize * height as usize * 4];
        for px in pixels.chunks_exact_mut(4) {
            px[0] = r;
            px[1] = g;
            px[2] = b;
            px[3] = 255;
        }
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Blend one coverage value into the canvas at (x, y).
    #[inline]
    fn blend_pixel(&mut self, x: i64, y: i64, color: (u8, u8, u8), coverage: u8) {
        if coverage == 0 || x < 0 || y < 0 || x >= self.width as i64 || y >= self.height as i64 {
            return;
        }
        let idx = (y as usize * self.width as usize + x as usize) * 4;
        self.pixels[idx] = blend_channel(self.pixels[idx], color.0, coverage);
        self.pixels[idx + 1] = blend_channel(self.pixels[idx + 1], color.1, coverage);
        self.pixels[idx + 2] = blend_channel(self.pixels[idx + 2], color.2, coverage);
    }

    /// Rasterize one glyph and composite it into the character cell.
    ///
    /// Cell semantics are top-aligned: the em box's top edge sits at
    /// `cell_top`, so the baseline lands at `cell_top + ascent`. The
    /// glyph is centered horizontally on its advance width.
    fn draw_glyph(
        &mut self,
        font: &fontdue::Font,
        ch: char,
        font_size: f32,
        center_x: f32,
        cell_top: f32,
        color: (u8, u8, u8),
    ) {
        let ascent = font
            .horizontal_line_metrics(font_size)
            .map(|m| m.ascent)
            .unwrap_or(font_size);
        let baseline_y = cell_top + ascent;

        let (metrics, bitmap) = font.rasterize(ch, font_size);
        if metrics.width == 0 || metrics.height == 0 {
            return;
        }

        let left = (center_x - metrics.advance_width / 2.0 + metrics.xmin as f32).round() as i64;
        // fontdue's ymin is the bitmap's bottom edge relative to the
        // baseline, y-up; convert to the image's y-down top edge.
        let top = (baseline_y - metrics.ymin as f32 - metrics.height as f32).round() as i64;

        for row in 0..metrics.height {
            for col in 0..metrics.width {
                let coverage = bitmap[row * metrics.width + col];
                self.blend_pixel(left + col as i64, top + row as i64, color, coverage);
            }
        }
    }

    /// Hollow box filling the character cell, used when no font at all
    /// is usable.
    fn draw_placeholder(&mut self, center_x: f32, cell_top: f32, font_size: f32, color: (u8, u8, u8)) {
        let inset = font_size * PLACEHOLDER_INSET;
        let stroke = (font_size * PLACEHOLDER_STROKE).max(1.0);

        let left = center_x - font_size / 2.0 + inset;
        let right = center_x + font_size / 2.0 - inset;
        let top = cell_top + inset;
        let bottom = cell_top + font_size - inset;

        let (x0, x1) = (left.round() as i64, right.round() as i64);
        let (y0, y1) = (top.round() as i64, bottom.round() as i64);
        let s = stroke.round() as i64;

        for y in y0..=y1 {
            for x in x0..=x1 {
                let on_edge =
                    x < x0 + s || x > x1 - s || y < y0 + s || y > y1 - s;
                if on_edge {
                    self.blend_pixel(x, y, color, 255);
                }
            }
        }
    }

    /// Encode the canvas as a lossless PNG.
    fn encode_png(&self) -> Result<Vec<u8>, png::EncodingError> {
        let mut buf = Vec::new();
        {
            let mut encoder = png::Encoder::new(&mut buf, self.width, self.height);
            encoder.set_color(png::ColorType::Rgba);
            encoder.set_depth(png::BitDepth::Eight);
            let mut writer = encoder.write_header()?;
            writer.write_image_data(&self.pixels)?;
        }
        Ok(buf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn placeholder_renderer() -> TextImageRenderer {
        TextImageRenderer::from_registry(FontRegistry::empty())
    }

    #[test]
    fn test_empty_text_is_rejected() {
        let renderer = placeholder_renderer();
        let err = renderer
            .generate_text_image(&RenderOptions::new(""))
            .unwrap_err();
        assert!(matches!(err, RenderError::EmptyText));
    }

    #[test]
    fn test_zero_dimensions_are_rejected() {
        let renderer = placeholder_renderer();
        let opts = RenderOptions {
            width: 0,
            ..RenderOptions::new("字")
        };
        assert!(matches!(
            renderer.generate_text_image(&opts),
            Err(RenderError::InvalidDimensions { .. })
        ));
    }

    #[test]
    fn test_oversized_padding_is_rejected() {
        let renderer = placeholder_renderer();
        let opts = RenderOptions {
            padding: 150,
            ..RenderOptions::new("字")
        };
        assert!(matches!(
            renderer.generate_text_image(&opts),
            Err(RenderError::PaddingTooLarge { .. })
        ));
    }

    #[test]
    fn test_non_positive_font_size_is_rejected() {
        let renderer = placeholder_renderer();
        let opts = RenderOptions {
            font_size: 0.0,
            ..RenderOptions::new("字")
        };
        assert!(matches!(
            renderer.generate_text_image(&opts),
            Err(RenderError::InvalidFontSize { .. })
        ));
    }

    #[test]
    fn test_placeholder_render_produces_data_url() {
        // With zero fonts available the system tier still produces a
        // valid image.
        let renderer = placeholder_renderer();
        let url = renderer
            .generate_text_image(&RenderOptions::new("發財"))
            .unwrap();
        assert!(url.starts_with(DATA_URL_PREFIX));
        assert!(url.len() > DATA_URL_PREFIX.len());
    }

    #[test]
    fn test_placeholder_marks_non_background_pixels() {
        let mut canvas = Canvas::new(100, 100, (255, 255, 255));
        canvas.draw_placeholder(50.0, 20.0, 60.0, (0, 0, 0));
        let touched = canvas
            .pixels
            .chunks_exact(4)
            .filter(|px| px[0] != 255)
            .count();
        assert!(touched > 0);
    }

    #[test]
    fn test_canvas_fill_sets_background() {
        let canvas = Canvas::new(4, 4, (0xF5, 0xE8, 0xC8));
        for px in canvas.pixels.chunks_exact(4) {
            assert_eq!(px, &[0xF5, 0xE8, 0xC8, 0xFF][..]);
        }
    }
}
