use crate::foundation::core::{Canvas, HAlign, Point, Size, VAlign};

/// Lines break after this many characters, regardless of glyph widths.
pub const WRAP_WIDTH: usize = 40;
/// Vertical gap between consecutive lines, in pixels.
pub const LINE_SPACING: f64 = 20.0;
/// Distance from the canvas edge for non-centered alignments, in pixels.
pub const TEXT_MARGIN: f64 = 60.0;

/// Greedy word wrap by character count.
///
/// Runs of whitespace collapse to one space and words longer than `width` are split, filling
/// the remainder of the current line first. Blank input produces no lines.
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();
    let mut cur = String::new();
    let mut cur_len = 0usize;

    for word in text.split_whitespace() {
        let mut rest: Vec<char> = word.chars().collect();

        if cur_len > 0 {
            if cur_len + 1 + rest.len() <= width {
                cur.push(' ');
                cur.extend(rest.iter());
                cur_len += 1 + rest.len();
                continue;
            }
            if rest.len() > width {
                let space_left = width.saturating_sub(cur_len + 1);
                if space_left > 0 {
                    cur.push(' ');
                    cur.extend(rest.drain(..space_left));
                }
            }
            lines.push(std::mem::take(&mut cur));
        }

        while rest.len() > width {
            lines.push(rest.drain(..width).collect());
        }
        cur.extend(rest.iter());
        cur_len = rest.len();
    }

    if cur_len > 0 {
        lines.push(cur);
    }
    lines
}

/// Total height of a block of lines separated by [`LINE_SPACING`].
pub fn block_height(line_sizes: &[Size]) -> f64 {
    if line_sizes.is_empty() {
        return 0.0;
    }
    let sum: f64 = line_sizes.iter().map(|s| s.height).sum();
    sum + LINE_SPACING * (line_sizes.len() - 1) as f64
}

/// First line's top edge for a block of `block_h` pixels.
pub fn block_top(canvas: Canvas, block_h: f64, valign: VAlign) -> f64 {
    let h = f64::from(canvas.height);
    match valign {
        VAlign::Top => TEXT_MARGIN,
        VAlign::Bottom => h - block_h - TEXT_MARGIN,
        VAlign::Center => (h - block_h) / 2.0,
    }
}

/// Left edge of a line that is `line_w` pixels wide.
pub fn line_left(canvas: Canvas, line_w: f64, halign: HAlign) -> f64 {
    let w = f64::from(canvas.width);
    match halign {
        HAlign::Left => TEXT_MARGIN,
        HAlign::Right => w - line_w - TEXT_MARGIN,
        HAlign::Center => (w - line_w) / 2.0,
    }
}

/// Top-left origin of every line. Overflowing blocks are not clamped to the canvas.
pub fn place_lines(
    canvas: Canvas,
    line_sizes: &[Size],
    valign: VAlign,
    halign: HAlign,
) -> Vec<Point> {
    let mut y = block_top(canvas, block_height(line_sizes), valign);
    line_sizes
        .iter()
        .map(|s| {
            let origin = Point::new(line_left(canvas, s.width, halign), y);
            y += s.height + LINE_SPACING;
            origin
        })
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/render/layout.rs"]
mod tests;
