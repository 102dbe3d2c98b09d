use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::assets::color::resolve_colors;
use crate::assets::fonts::{
    DEFAULT_FETCH_TIMEOUT, FontCache, FontFetcher, HttpFontFetcher, resolve_font,
};
use crate::foundation::core::{Canvas, HAlign, VAlign};
use crate::foundation::error::QuoteResult;
use crate::render::pipeline::{RenderRequest, render_to_file};

/// Raw user choices as collected by a transport.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderParams {
    pub text: String,
    pub font: String,
    #[serde(default)]
    pub palette: Option<String>,
    pub v_align: String,
    pub h_align: String,
    #[serde(default)]
    pub custom_color1: Option<String>,
    #[serde(default)]
    pub custom_color2: Option<String>,
}

/// Where fonts are cached and cards are written.
#[derive(Clone, Debug)]
pub struct EngineOpts {
    pub(crate) font_dir: PathBuf,
    pub(crate) output_dir: PathBuf,
    pub(crate) fetch_timeout: Duration,
    pub(crate) canvas: Canvas,
}

impl Default for EngineOpts {
    fn default() -> Self {
        Self {
            font_dir: PathBuf::from("."),
            output_dir: PathBuf::from("."),
            fetch_timeout: DEFAULT_FETCH_TIMEOUT,
            canvas: Canvas::CARD,
        }
    }
}

impl EngineOpts {
    pub fn with_font_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.font_dir = dir.into();
        self
    }

    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    pub fn with_fetch_timeout(mut self, timeout: Duration) -> Self {
        self.fetch_timeout = timeout;
        self
    }
}

/// Validates raw choices and renders them to a PNG file.
pub struct Engine {
    fonts: FontCache,
    opts: EngineOpts,
}

impl Engine {
    /// Engine that downloads missing fonts over HTTP.
    pub fn new(opts: EngineOpts) -> QuoteResult<Self> {
        Ok(Self::with_fetcher(opts, Box::new(HttpFontFetcher::new()?)))
    }

    pub fn with_fetcher(opts: EngineOpts, fetcher: Box<dyn FontFetcher>) -> Self {
        let fonts = FontCache::new(opts.font_dir.clone(), fetcher).with_timeout(opts.fetch_timeout);
        Self { fonts, opts }
    }

    /// Turn raw choices into a validated request. The font is resolved last since it may
    /// touch the disk or the network.
    pub fn resolve(&self, params: &RenderParams) -> QuoteResult<RenderRequest> {
        let colors = resolve_colors(
            params.palette.as_deref(),
            params.custom_color1.as_deref(),
            params.custom_color2.as_deref(),
        )?;
        let valign: VAlign = params.v_align.parse()?;
        let halign: HAlign = params.h_align.parse()?;
        let font = resolve_font(&params.font, &self.fonts)?;

        Ok(RenderRequest {
            text: params.text.clone(),
            font,
            colors,
            valign,
            halign,
        })
    }

    /// Render a card and return the path of the new PNG. The caller owns the file.
    #[tracing::instrument(skip(self, params), fields(font = %params.font))]
    pub fn create_image(&self, params: &RenderParams) -> QuoteResult<PathBuf> {
        let request = self.resolve(params).inspect_err(|e| {
            tracing::warn!(error = %e, "rejected render request");
        })?;
        render_to_file(&request, self.opts.canvas, &self.opts.output_dir)
    }
}

#[cfg(test)]
#[path = "../tests/unit/engine.rs"]
mod tests;
