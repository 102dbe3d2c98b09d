use super::*;
use crate::test_support::system_font;

#[test]
fn register_font_rejects_garbage_bytes() {
    let mut engine = TextLayoutEngine::new();
    let err = engine.register_font(b"definitely not a font").unwrap_err();
    assert!(matches!(err, QuoteError::FontUnavailable(_)));
}

#[test]
fn layout_line_rejects_non_positive_size() {
    let mut engine = TextLayoutEngine::new();
    for size in [0.0, -4.0, f32::NAN] {
        let err = engine
            .layout_line("hi", "Anything", size, TextBrushRgba8::default())
            .err()
            .unwrap();
        assert!(matches!(err, QuoteError::Validation(_)));
    }
}

#[test]
fn opaque_brush_copies_channels() {
    let b = TextBrushRgba8::opaque(Rgb8::new(1, 2, 3));
    assert_eq!((b.r, b.g, b.b, b.a), (1, 2, 3, 255));
}

#[test]
fn longer_text_measures_wider() {
    let Some(path) = system_font() else {
        eprintln!("no system font found, skipping");
        return;
    };
    let bytes = std::fs::read(path).unwrap();
    let mut engine = TextLayoutEngine::new();
    let family = engine.register_font(&bytes).unwrap();
    let brush = TextBrushRgba8::opaque(Rgb8::WHITE);

    let short = engine.layout_line("Hi", &family, 80.0, brush).unwrap();
    let long = engine.layout_line("Hi there", &family, 80.0, brush).unwrap();

    assert!(short.size.width > 0.0);
    assert!(long.size.width > short.size.width);
    assert!(short.size.height > 0.0);
    assert!((short.size.height - long.size.height).abs() < 1e-3);
}
