use image::RgbImage;

use crate::assets::store::{ShapedLine, TextBrushRgba8};
use crate::foundation::core::{Canvas, Point};
use crate::foundation::error::{QuoteError, QuoteResult};

/// Rasterize shaped lines onto a transparent premultiplied RGBA8 layer.
///
/// `origins[i]` is the top-left corner of `lines[i]`'s line box.
pub fn rasterize_lines(
    canvas: Canvas,
    font_bytes: &[u8],
    lines: &[ShapedLine],
    origins: &[Point],
) -> QuoteResult<vello_cpu::Pixmap> {
    let w: u16 = canvas
        .width
        .try_into()
        .map_err(|_| QuoteError::validation("canvas width exceeds u16"))?;
    let h: u16 = canvas
        .height
        .try_into()
        .map_err(|_| QuoteError::validation("canvas height exceeds u16"))?;
    if lines.len() != origins.len() {
        return Err(QuoteError::validation("every line needs exactly one origin"));
    }

    let mut pixmap = vello_cpu::Pixmap::new(w, h);
    if lines.is_empty() {
        return Ok(pixmap);
    }

    let font = vello_cpu::peniko::FontData::new(
        vello_cpu::peniko::Blob::from(font_bytes.to_vec()),
        0,
    );
    let mut ctx = vello_cpu::RenderContext::new(w, h);

    for (line, origin) in lines.iter().zip(origins) {
        let tr = kurbo::Affine::translate((origin.x, origin.y));
        ctx.set_transform(affine_to_cpu(tr));
        for visual in line.layout.lines() {
            for item in visual.items() {
                let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                    continue;
                };
                let brush: TextBrushRgba8 = run.style().brush;
                ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
                    brush.r, brush.g, brush.b, brush.a,
                ));
                let glyphs = run.positioned_glyphs().map(|g| vello_cpu::Glyph {
                    id: g.id,
                    x: g.x,
                    y: g.y,
                });
                ctx.glyph_run(&font)
                    .font_size(run.run().font_size())
                    .fill_glyphs(glyphs);
            }
        }
    }

    ctx.flush();
    ctx.render_to_pixmap(&mut pixmap);
    Ok(pixmap)
}

/// Source-over of a premultiplied RGBA8 layer onto an opaque RGB image.
pub fn composite_over_rgb(dst: &mut RgbImage, layer_premul: &[u8]) -> QuoteResult<()> {
    let expected = (dst.width() as usize)
        .saturating_mul(dst.height() as usize)
        .saturating_mul(4);
    if layer_premul.len() != expected {
        return Err(QuoteError::validation("text layer size does not match canvas"));
    }

    for (px, src) in dst.pixels_mut().zip(layer_premul.chunks_exact(4)) {
        let a = src[3];
        if a == 0 {
            continue;
        }
        let inv = 255 - u16::from(a);
        for c in 0..3 {
            px.0[c] = add_sat_u8(src[c], mul_div255_u8(u16::from(px.0[c]), inv));
        }
    }
    Ok(())
}

fn affine_to_cpu(a: kurbo::Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

fn mul_div255_u8(x: u16, y: u16) -> u8 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u8
}

fn add_sat_u8(a: u8, b: u8) -> u8 {
    a.saturating_add(b)
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
