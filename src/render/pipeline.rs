use std::io::{Cursor, Write as _};
use std::path::{Path, PathBuf};

use image::RgbImage;

use crate::assets::fonts::ResolvedFont;
use crate::assets::store::{TextBrushRgba8, TextLayoutEngine};
use crate::foundation::core::{Canvas, ColorPair, HAlign, Rgb8, VAlign};
use crate::foundation::error::{QuoteError, QuoteResult};
use crate::render::cpu::{composite_over_rgb, rasterize_lines};
use crate::render::gradient::vertical_gradient;
use crate::render::layout::{WRAP_WIDTH, place_lines, wrap_text};

/// Generated files are named `<OUTPUT_PREFIX>_<uuid>.png`.
pub const OUTPUT_PREFIX: &str = "temp_image";

/// Everything needed to draw one card, already validated.
#[derive(Clone, Debug)]
pub struct RenderRequest {
    pub text: String,
    pub font: ResolvedFont,
    pub colors: ColorPair,
    pub valign: VAlign,
    pub halign: HAlign,
}

/// Compose the card in memory.
#[tracing::instrument(skip(request), fields(font = request.font.spec.name))]
pub fn render_image(request: &RenderRequest, canvas: Canvas) -> QuoteResult<RgbImage> {
    let mut img = vertical_gradient(canvas, request.colors);

    let lines = wrap_text(&request.text, WRAP_WIDTH);
    if lines.is_empty() {
        tracing::debug!("no text to draw");
        return Ok(img);
    }

    let mut engine = TextLayoutEngine::new();
    let family = engine.register_font(&request.font.bytes)?;
    let brush = TextBrushRgba8::opaque(Rgb8::WHITE);
    let shaped = lines
        .iter()
        .map(|l| engine.layout_line(l, &family, request.font.size_px(), brush))
        .collect::<QuoteResult<Vec<_>>>()?;

    let sizes: Vec<_> = shaped.iter().map(|s| s.size).collect();
    let origins = place_lines(canvas, &sizes, request.valign, request.halign);
    tracing::debug!(lines = shaped.len(), "laid out text block");

    let layer = rasterize_lines(canvas, &request.font.bytes, &shaped, &origins)?;
    composite_over_rgb(&mut img, layer.data_as_u8_slice())?;
    Ok(img)
}

/// Compose the card and write it as a fresh PNG under `out_dir`.
pub fn render_to_file(
    request: &RenderRequest,
    canvas: Canvas,
    out_dir: &Path,
) -> QuoteResult<PathBuf> {
    let img = render_image(request, canvas)?;
    write_png_unique(&img, out_dir)
}

pub fn output_file_name() -> String {
    format!("{OUTPUT_PREFIX}_{}.png", uuid::Uuid::new_v4())
}

/// Encode `img` as PNG into a newly created file; never overwrites.
pub fn write_png_unique(img: &RgbImage, out_dir: &Path) -> QuoteResult<PathBuf> {
    let mut buf = Vec::new();
    img.write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .map_err(|e| QuoteError::render_io(format!("png encode: {e}")))?;

    let path = out_dir.join(output_file_name());
    let mut file = std::fs::File::create_new(&path)
        .map_err(|e| QuoteError::render_io(format!("create '{}': {e}", path.display())))?;
    if let Err(e) = file.write_all(&buf) {
        drop(file);
        let _ = std::fs::remove_file(&path);
        return Err(QuoteError::render_io(format!(
            "write '{}': {e}",
            path.display()
        )));
    }

    tracing::info!(path = %path.display(), bytes = buf.len(), "wrote image");
    Ok(path)
}

#[cfg(test)]
#[path = "../../tests/unit/render/pipeline.rs"]
mod tests;
