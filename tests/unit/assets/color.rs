use super::*;

#[test]
fn parses_full_and_shorthand_hex() {
    assert_eq!(parse_hex("#1A2B3C").unwrap(), Rgb8::new(0x1a, 0x2b, 0x3c));
    assert_eq!(parse_hex("1a2b3c").unwrap(), Rgb8::new(0x1a, 0x2b, 0x3c));
    assert_eq!(parse_hex("#FFF").unwrap(), Rgb8::WHITE);
    assert_eq!(parse_hex("000").unwrap(), Rgb8::BLACK);
    assert_eq!(parse_hex("  #ff5733 ").unwrap(), Rgb8::new(255, 87, 51));
}

#[test]
fn shorthand_matches_expanded_form_for_every_digit() {
    let digits = "0123456789abcdefABCDEF";
    for a in digits.chars() {
        for b in ["0", "7", "f"] {
            let short = format!("#{a}{b}{a}");
            let long = format!("#{a}{a}{b}{b}{a}{a}");
            assert_eq!(parse_hex(&short).unwrap(), parse_hex(&long).unwrap());
        }
    }
}

#[test]
fn rejects_malformed_hex() {
    for bad in [
        "", "#", "#F", "#FF", "#FFFF", "#FFFFF", "#FFFFFFF", "#FFFFFFFF", "#GGG", "#12345G",
        "##FFF", "red", "#-12", "+12345", "#ＦＦＦ", "#1 2",
    ] {
        let err = parse_hex(bad).unwrap_err();
        assert!(
            matches!(err, QuoteError::InvalidHexColor(_)),
            "{bad:?} gave {err:?}"
        );
    }
}

#[test]
fn every_palette_resolves_to_its_table_entry() {
    for p in PALETTES {
        assert_eq!(resolve_colors(Some(p.name), None, None).unwrap(), p.colors);
    }
}

#[test]
fn ocean_deep_endpoints() {
    let pair = resolve_colors(Some("Ocean Deep"), None, None).unwrap();
    assert_eq!(pair.top, Rgb8::new(23, 37, 84));
    assert_eq!(pair.bottom, Rgb8::new(67, 139, 222));
}

#[test]
fn custom_pair_takes_precedence_over_palette() {
    let pair = resolve_colors(Some("Sunset"), Some("#FFF"), Some("#000")).unwrap();
    assert_eq!(pair, ColorPair::new(Rgb8::WHITE, Rgb8::BLACK));

    let pair = resolve_colors(Some("Not A Palette"), Some("#FFF"), Some("#000")).unwrap();
    assert_eq!(pair, ColorPair::new(Rgb8::WHITE, Rgb8::BLACK));
}

#[test]
fn invalid_custom_color_fails_even_with_valid_palette() {
    let err = resolve_colors(Some("Forest"), Some("#FFF"), Some("nope")).unwrap_err();
    assert!(matches!(err, QuoteError::InvalidHexColor(_)));
}

#[test]
fn single_custom_color_falls_back_to_palette() {
    let pair = resolve_colors(Some("Graphite"), Some("#FFF"), None).unwrap();
    assert_eq!(pair, palette_by_name("Graphite").unwrap().colors);
}

#[test]
fn unknown_or_missing_palette_is_reported() {
    let err = resolve_colors(Some("Neon"), None, None).unwrap_err();
    assert!(matches!(err, QuoteError::UnknownPalette(ref n) if n == "Neon"));
    assert!(resolve_colors(None, None, None).is_err());
}

#[test]
fn palette_names_follow_table_order() {
    let names: Vec<_> = palette_names().collect();
    assert_eq!(names.first(), Some(&"Ocean Deep"));
    assert_eq!(names.len(), PALETTES.len());
}
