//! Vertical column layout
//!
//! Computes the font size and per-character cell positions for a single
//! centered column of characters inside a bounded canvas.

use crate::constants::MIN_RENDER_FONT_SIZE;

/// Layout for one render request. Derived per call, never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutPlan {
    /// Computed font size, <= the requested size
    pub font_size: f32,
    /// Horizontal center of the column
    pub center_x: f32,
    /// Top of the first character cell
    pub start_y: f32,
    /// Top of each character cell, in input order
    pub cell_tops: Vec<f32>,
}

/// Compute the layout for `num_chars` characters.
///
/// The requested font size is a soft upper bound: the size shrinks until
/// the column fits the padded canvas. Width constrains the size as the
/// raw available width, treating a glyph box as square; this is a loose
/// approximation kept for output compatibility, it only binds for a
/// single wide character in a narrow canvas.
///
/// Precondition: `num_chars >= 1` (callers validate input first).
pub fn compute_layout(
    num_chars: usize,
    width: u32,
    height: u32,
    padding: u32,
    requested_size: f32,
    spacing: f32,
) -> LayoutPlan {
    let n = num_chars as f32;
    let available_width = (width - 2 * padding) as f32;
    let available_height = (height - 2 * padding) as f32;

    let max_by_height = (available_height - (n - 1.0) * spacing) / n;
    let max_by_width = available_width;

    // Long input can drive the height bound to zero or below; clamp so
    // draw calls stay valid.
    let font_size = requested_size
        .min(max_by_height)
        .min(max_by_width)
        .max(MIN_RENDER_FONT_SIZE);

    let total_text_height = n * font_size + (n - 1.0) * spacing;
    let start_y = (height as f32 - total_text_height) / 2.0;

    let cell_tops = (0..num_chars)
        .map(|i| start_y + i as f32 * (font_size + spacing))
        .collect();

    LayoutPlan {
        font_size,
        center_x: width as f32 / 2.0,
        start_y,
        cell_tops,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_char_uses_requested_size() {
        // 300x400, padding 40: available 220x320, one char fits at 120.
        let plan = compute_layout(1, 300, 400, 40, 120.0, 20.0);
        assert_eq!(plan.font_size, 120.0);
        assert_eq!(plan.center_x, 150.0);
        assert_eq!(plan.start_y, 140.0);
        assert_eq!(plan.cell_tops, vec![140.0]);
    }

    #[test]
    fn test_height_bound_shrinks_font() {
        // Two chars in 320 available height with 20 spacing:
        // (320 - 20) / 2 = 150, under the requested 200.
        let plan = compute_layout(2, 300, 400, 40, 200.0, 20.0);
        assert_eq!(plan.font_size, 150.0);
        let total = 2.0 * 150.0 + 20.0;
        assert_eq!(plan.start_y, (400.0 - total) / 2.0);
        assert_eq!(plan.cell_tops[1] - plan.cell_tops[0], 170.0);
    }

    #[test]
    fn test_width_bound_binds_in_narrow_canvas() {
        // 100 wide, padding 10: available width 80 caps the size.
        let plan = compute_layout(1, 100, 400, 10, 300.0, 20.0);
        assert_eq!(plan.font_size, 80.0);
    }

    #[test]
    fn test_size_never_exceeds_requested() {
        for n in 1..=20 {
            let plan = compute_layout(n, 300, 400, 40, 120.0, 20.0);
            assert!(plan.font_size <= 120.0);
            assert!(plan.font_size > 0.0, "font size must stay positive for n={}", n);
        }
    }

    #[test]
    fn test_fewer_chars_never_get_smaller_font() {
        let one = compute_layout(1, 300, 400, 40, 120.0, 20.0);
        let two = compute_layout(2, 300, 400, 40, 120.0, 20.0);
        assert!(one.font_size >= two.font_size);
    }

    #[test]
    fn test_huge_input_clamps_to_minimum() {
        let plan = compute_layout(500, 300, 400, 40, 120.0, 20.0);
        assert_eq!(plan.font_size, MIN_RENDER_FONT_SIZE);
        assert_eq!(plan.cell_tops.len(), 500);
    }

    #[test]
    fn test_column_is_vertically_centered() {
        let plan = compute_layout(3, 300, 400, 40, 60.0, 20.0);
        let total = 3.0 * plan.font_size + 2.0 * 20.0;
        let bottom_gap = 400.0 - (plan.start_y + total);
        assert!((plan.start_y - bottom_gap).abs() < 1e-3);
    }
}
