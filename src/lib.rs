//! Quotecard renders short quotes onto gradient cards.
//!
//! A request is a handful of raw strings: the text, a font name, a palette name or two hex
//! colors, and two alignments. The pipeline is:
//!
//! 1. **Resolve**: validate the strings into a [`RenderRequest`] (colors from [`PALETTES`] or
//!    [`parse_hex`], fonts from [`FONTS`] through the on-disk [`FontCache`]).
//! 2. **Compose**: vertical gradient, character-count word wrap, per-line alignment, white
//!    glyphs rasterized with `vello_cpu`.
//! 3. **Persist**: a fresh `temp_image_<uuid>.png` that the caller owns.
//!
//! [`Engine::create_image`] runs all three. The [`bot`] module drives it from a Telegram chat
//! through a step-by-step [`Wizard`].
#![forbid(unsafe_code)]

mod assets;
/// Chat transport: wizard state machine, Telegram client and update dispatcher.
pub mod bot;
mod engine;
mod foundation;
mod render;

#[cfg(test)]
#[path = "../tests/support/mod.rs"]
mod test_support;

pub use assets::color::{PALETTES, Palette, palette_by_name, palette_names, parse_hex, resolve_colors};
pub use assets::fonts::{
    DEFAULT_FETCH_TIMEOUT, FONTS, FontCache, FontFetcher, FontSpec, HttpFontFetcher, ResolvedFont,
    font_by_name, font_names, resolve_font,
};
pub use assets::store::{ShapedLine, TextBrushRgba8, TextLayoutEngine};
pub use bot::dispatch::{Dispatcher, PollOpts, run_polling};
pub use bot::telegram::{BotApi, DEFAULT_API_BASE, TelegramClient, Update};
pub use bot::wizard::{CUSTOM_COLORS, Input, Keyboard, Prompt, Step, Wizard, WizardState};
pub use engine::{Engine, EngineOpts, RenderParams};
pub use foundation::core::{Canvas, ColorPair, HAlign, Point, Rgb8, Size, VAlign};
pub use foundation::error::{QuoteError, QuoteResult};
pub use render::gradient::{blend_masked, row_mask, vertical_gradient};
pub use render::layout::{
    LINE_SPACING, TEXT_MARGIN, WRAP_WIDTH, block_height, block_top, line_left, place_lines,
    wrap_text,
};
pub use render::pipeline::{
    OUTPUT_PREFIX, RenderRequest, render_image, render_to_file, write_png_unique,
};
