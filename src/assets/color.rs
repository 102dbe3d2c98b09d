use crate::foundation::core::{ColorPair, Rgb8};
use crate::foundation::error::{QuoteError, QuoteResult};

/// A named gradient offered in the palette menu.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Palette {
    pub name: &'static str,
    pub colors: ColorPair,
}

const fn palette(name: &'static str, top: (u8, u8, u8), bottom: (u8, u8, u8)) -> Palette {
    Palette {
        name,
        colors: ColorPair::new(
            Rgb8::new(top.0, top.1, top.2),
            Rgb8::new(bottom.0, bottom.1, bottom.2),
        ),
    }
}

/// Menu order is table order.
pub static PALETTES: &[Palette] = &[
    palette("Ocean Deep", (23, 37, 84), (67, 139, 222)),
    palette("Royal Purple", (46, 11, 66), (3, 166, 166)),
    palette("Sunset", (106, 4, 15), (242, 126, 3)),
    palette("Forest", (10, 48, 6), (102, 179, 48)),
    palette("Graphite", (15, 15, 15), (80, 80, 80)),
];

pub fn palette_by_name(name: &str) -> Option<&'static Palette> {
    PALETTES.iter().find(|p| p.name == name)
}

pub fn palette_names() -> impl Iterator<Item = &'static str> {
    PALETTES.iter().map(|p| p.name)
}

/// Parse `#RGB`, `RGB`, `#RRGGBB` or `RRGGBB` (case-insensitive).
pub fn parse_hex(s: &str) -> QuoteResult<Rgb8> {
    let trimmed = s.trim();
    let digits = trimmed.strip_prefix('#').unwrap_or(trimmed);

    if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(QuoteError::invalid_hex(format!(
            "\"{s}\" contains non-hex characters"
        )));
    }

    let expanded: String = match digits.len() {
        3 => digits.chars().flat_map(|c| [c, c]).collect(),
        6 => digits.to_owned(),
        _ => {
            return Err(QuoteError::invalid_hex(format!(
                "\"{s}\" must be #RGB or #RRGGBB"
            )));
        }
    };

    // All chars are ASCII hex digits here, so byte slicing is on char boundaries.
    let channel = |i: usize| -> QuoteResult<u8> {
        u8::from_str_radix(&expanded[i..i + 2], 16)
            .map_err(|_| QuoteError::invalid_hex(format!("\"{s}\" has an invalid channel")))
    };

    Ok(Rgb8::new(channel(0)?, channel(2)?, channel(4)?))
}

/// Pick the gradient for a request.
///
/// Two custom colors win over the palette; a single custom color is ignored.
pub fn resolve_colors(
    palette_name: Option<&str>,
    custom1: Option<&str>,
    custom2: Option<&str>,
) -> QuoteResult<ColorPair> {
    if let (Some(c1), Some(c2)) = (custom1, custom2) {
        let top = parse_hex(c1)?;
        let bottom = parse_hex(c2)?;
        return Ok(ColorPair::new(top, bottom));
    }

    let name = palette_name.unwrap_or_default();
    palette_by_name(name)
        .map(|p| p.colors)
        .ok_or_else(|| QuoteError::unknown_palette(name))
}

#[cfg(test)]
#[path = "../../tests/unit/assets/color.rs"]
mod tests;
