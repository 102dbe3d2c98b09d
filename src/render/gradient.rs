use image::{Rgb, RgbImage};

use crate::foundation::core::{Canvas, ColorPair};

/// Mask value for row `y`: `floor(255 * y / height)`, so row 0 is fully `top`.
pub fn row_mask(y: u32, height: u32) -> u8 {
    if height == 0 {
        return 0;
    }
    ((255u64 * u64::from(y)) / u64::from(height)).min(255) as u8
}

/// `base` under `over`, weighted by `mask` (0 keeps `base`, 255 takes `over`).
///
/// Integer blend with rounded division by 255, the same arithmetic a paste-with-mask uses.
pub fn blend_masked(base: u8, over: u8, mask: u8) -> u8 {
    let m = u32::from(mask);
    let v = u32::from(base) * (255 - m) + u32::from(over) * m + 128;
    (((v >> 8) + v) >> 8) as u8
}

/// Full-canvas vertical gradient: every row is uniform, blending `top` into `bottom`.
pub fn vertical_gradient(canvas: Canvas, colors: ColorPair) -> RgbImage {
    let mut img = RgbImage::new(canvas.width, canvas.height);
    let top = colors.top.to_array();
    let bottom = colors.bottom.to_array();

    for (y, row) in img.enumerate_rows_mut() {
        let m = row_mask(y, canvas.height);
        let px = Rgb([
            blend_masked(top[0], bottom[0], m),
            blend_masked(top[1], bottom[1], m),
            blend_masked(top[2], bottom[2], m),
        ]);
        for (_, _, p) in row {
            *p = px;
        }
    }
    img
}

#[cfg(test)]
#[path = "../../tests/unit/render/gradient.rs"]
mod tests;
