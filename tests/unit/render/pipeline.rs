use std::sync::Arc;

use super::*;
use crate::assets::fonts::font_by_name;

fn request(text: &str, font_bytes: Vec<u8>) -> RenderRequest {
    RenderRequest {
        text: text.to_owned(),
        font: ResolvedFont {
            spec: font_by_name("Poppins").unwrap(),
            path: PathBuf::from("Poppins-Bold.ttf"),
            bytes: Arc::new(font_bytes),
        },
        colors: ColorPair::new(Rgb8::new(23, 37, 84), Rgb8::new(67, 139, 222)),
        valign: VAlign::Center,
        halign: HAlign::Center,
    }
}

#[test]
fn blank_text_renders_plain_gradient() {
    let req = request("  \n\t ", Vec::new());
    let img = render_image(&req, Canvas::CARD).unwrap();
    let plain = vertical_gradient(Canvas::CARD, req.colors);
    assert_eq!(img, plain);
}

#[test]
fn output_names_follow_pattern_and_differ() {
    let a = output_file_name();
    let b = output_file_name();
    assert_ne!(a, b);
    assert!(a.starts_with("temp_image_"));
    assert!(a.ends_with(".png"));
}

#[test]
fn written_png_decodes_to_same_pixels() {
    let dir = tempfile::tempdir().unwrap();
    let img = vertical_gradient(
        Canvas::new(32, 16).unwrap(),
        ColorPair::new(Rgb8::BLACK, Rgb8::WHITE),
    );
    let path = write_png_unique(&img, dir.path()).unwrap();
    assert_eq!(path.parent(), Some(dir.path()));

    let decoded = image::open(&path).unwrap().to_rgb8();
    assert_eq!(decoded, img);
}

#[test]
fn missing_output_dir_is_render_io() {
    let dir = tempfile::tempdir().unwrap();
    let img = RgbImage::new(2, 2);
    let err = write_png_unique(&img, &dir.path().join("nope")).unwrap_err();
    assert!(matches!(err, QuoteError::RenderIo(_)));
}

#[test]
fn text_is_drawn_in_white_when_a_font_is_available() {
    let Some(font_path) = crate::test_support::system_font() else {
        eprintln!("skipping: no system TrueType font found");
        return;
    };
    let req = request("Hello World", std::fs::read(font_path).unwrap());
    let img = render_image(&req, Canvas::CARD).unwrap();
    let plain = vertical_gradient(Canvas::CARD, req.colors);

    assert_eq!(img.get_pixel(0, 0).0, [23, 37, 84]);
    let changed = img
        .pixels()
        .zip(plain.pixels())
        .filter(|(a, b)| a != b)
        .count();
    assert!(changed > 100, "expected glyph pixels, got {changed}");
    assert!(img.pixels().any(|p| p.0 == [255, 255, 255]));
}
