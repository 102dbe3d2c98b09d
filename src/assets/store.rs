use std::borrow::Cow;

use crate::foundation::core::{Rgb8, Size};
use crate::foundation::error::{QuoteError, QuoteResult};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
/// RGBA8 brush color used by Parley text layout.
pub struct TextBrushRgba8 {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

impl TextBrushRgba8 {
    pub fn opaque(c: Rgb8) -> Self {
        Self {
            r: c.r,
            g: c.g,
            b: c.b,
            a: 255,
        }
    }
}

/// A single shaped line and its measured box.
pub struct ShapedLine {
    pub layout: parley::Layout<TextBrushRgba8>,
    /// `advance` x (`ascent + descent + leading`).
    pub size: Size,
}

/// Stateful helper for building Parley text layouts from raw font bytes.
pub struct TextLayoutEngine {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<TextBrushRgba8>,
}

impl Default for TextLayoutEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl TextLayoutEngine {
    /// Construct a new layout engine with fresh Parley contexts.
    pub fn new() -> Self {
        Self {
            font_ctx: parley::FontContext::default(),
            layout_ctx: parley::LayoutContext::new(),
        }
    }

    /// Register font bytes and return the primary family name they expose.
    ///
    /// Bytes that do not parse as a font register no families and are rejected.
    pub fn register_font(&mut self, font_bytes: &[u8]) -> QuoteResult<String> {
        let families = self
            .font_ctx
            .collection
            .register_fonts(parley::fontique::Blob::from(font_bytes.to_vec()), None);
        let family_id = families.first().map(|(id, _)| *id).ok_or_else(|| {
            QuoteError::font_unavailable("no font families registered from font bytes")
        })?;

        self.font_ctx
            .collection
            .family_name(family_id)
            .map(str::to_owned)
            .ok_or_else(|| QuoteError::font_unavailable("registered font family has no name"))
    }

    /// Shape one line of text without line breaking and measure it.
    pub fn layout_line(
        &mut self,
        text: &str,
        family: &str,
        size_px: f32,
        brush: TextBrushRgba8,
    ) -> QuoteResult<ShapedLine> {
        if !size_px.is_finite() || size_px <= 0.0 {
            return Err(QuoteError::validation(
                "text size_px must be finite and > 0",
            ));
        }

        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(Cow::Owned(family.to_owned())),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(size_px));
        builder.push_default(parley::style::StyleProperty::Brush(brush));

        let mut layout: parley::Layout<TextBrushRgba8> = builder.build(text);
        layout.break_all_lines(None);

        let mut w = 0.0f64;
        let mut h = 0.0f64;
        for line in layout.lines() {
            let m = line.metrics();
            w = w.max(f64::from(m.advance));
            h += f64::from(m.ascent + m.descent + m.leading);
        }

        Ok(ShapedLine {
            layout,
            size: Size::new(w, h),
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/store.rs"]
mod tests;
