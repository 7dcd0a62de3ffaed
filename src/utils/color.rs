//! Color parsing utilities
//!
//! Consolidates hex color parsing for render options and the tile preset.

use log::warn;

/// Parse 6-digit hex color (e.g., "ff0000" -> (255, 0, 0))
/// Also supports 3-digit short format (e.g., "f00" -> (255, 0, 0))
/// Returns None on invalid input.
pub fn parse_hex_color(hex: &str) -> Option<(u8, u8, u8)> {
    let hex = hex.trim_start_matches('#');
    match hex.len() {
        6 => {
            let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
            let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
            let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
            Some((r, g, b))
        }
        3 => {
            // Short format: expand F -> FF
            let r = u8::from_str_radix(&hex[0..1], 16).ok()? * 17;
            let g = u8::from_str_radix(&hex[1..2], 16).ok()? * 17;
            let b = u8::from_str_radix(&hex[2..3], 16).ok()? * 17;
            Some((r, g, b))
        }
        _ => None,
    }
}

/// Parse a hex color, falling back to a known-good default on invalid
/// input. A malformed color string degrades with a warning instead of
/// failing the render.
pub fn parse_color_or(hex: &str, default: &str) -> (u8, u8, u8) {
    if let Some(rgb) = parse_hex_color(hex) {
        return rgb;
    }
    warn!("Invalid color \"{}\", using \"{}\"", hex, default);
    parse_hex_color(default).unwrap_or((0, 0, 0))
}

/// Blend one channel of foreground over background with the given
/// coverage (0-255), e.g. a glyph's anti-aliasing value.
#[inline]
pub fn blend_channel(bg: u8, fg: u8, coverage: u8) -> u8 {
    let a = coverage as f32 / 255.0;
    (fg as f32 * a + bg as f32 * (1.0 - a)).round() as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_color() {
        assert_eq!(parse_hex_color("ff0000"), Some((255, 0, 0)));
        assert_eq!(parse_hex_color("00ff00"), Some((0, 255, 0)));
        assert_eq!(parse_hex_color("0000ff"), Some((0, 0, 255)));
        assert_eq!(parse_hex_color("#ff0000"), Some((255, 0, 0)));
        assert_eq!(parse_hex_color("f00"), Some((255, 0, 0)));
        assert_eq!(parse_hex_color("#f00"), Some((255, 0, 0)));
        assert_eq!(parse_hex_color("invalid"), None);
    }

    #[test]
    fn test_parse_color_or_falls_back() {
        assert_eq!(parse_color_or("#F5E8C8", "#000000"), (0xF5, 0xE8, 0xC8));
        assert_eq!(parse_color_or("not-a-color", "#FFFFFF"), (255, 255, 255));
    }

    #[test]
    fn test_blend_channel() {
        // Zero coverage leaves the background untouched
        assert_eq!(blend_channel(200, 10, 0), 200);
        // Full coverage replaces it with the foreground
        assert_eq!(blend_channel(200, 10, 255), 10);
        // Half coverage lands in between
        let mid = blend_channel(0, 255, 128);
        assert!(mid > 120 && mid < 136);
    }
}
