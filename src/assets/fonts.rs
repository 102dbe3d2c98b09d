use std::io::Write as _;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use crate::assets::store::TextLayoutEngine;
use crate::foundation::error::{QuoteError, QuoteResult};

/// Timeout applied to a single font download.
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// A downloadable TrueType font with its fixed point size.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FontSpec {
    pub name: &'static str,
    /// File name inside the font cache directory.
    pub filename: &'static str,
    pub url: &'static str,
    pub size_px: u32,
}

/// Menu order is table order.
pub static FONTS: &[FontSpec] = &[
    FontSpec {
        name: "Poppins",
        filename: "Poppins-Bold.ttf",
        url: "https://raw.githubusercontent.com/google/fonts/main/ofl/poppins/Poppins-Bold.ttf",
        size_px: 80,
    },
    FontSpec {
        name: "Lato",
        filename: "Lato-Bold.ttf",
        url: "https://raw.githubusercontent.com/google/fonts/main/ofl/lato/Lato-Bold.ttf",
        size_px: 85,
    },
];

pub fn font_by_name(name: &str) -> Option<&'static FontSpec> {
    FONTS.iter().find(|f| f.name == name)
}

pub fn font_names() -> impl Iterator<Item = &'static str> {
    FONTS.iter().map(|f| f.name)
}

/// Source of raw font bytes for cache misses.
pub trait FontFetcher: Send + Sync {
    /// Download `url`, giving up after `timeout`.
    fn fetch(&self, url: &str, timeout: Duration) -> QuoteResult<Vec<u8>>;
}

/// Fetches fonts over HTTP(S).
pub struct HttpFontFetcher {
    client: reqwest::blocking::Client,
}

impl HttpFontFetcher {
    pub fn new() -> QuoteResult<Self> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(concat!("quotecard/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| QuoteError::font_unavailable(format!("http client: {e}")))?;
        Ok(Self { client })
    }
}

impl FontFetcher for HttpFontFetcher {
    fn fetch(&self, url: &str, timeout: Duration) -> QuoteResult<Vec<u8>> {
        let resp = self
            .client
            .get(url)
            .timeout(timeout)
            .send()
            .map_err(|e| QuoteError::font_unavailable(format!("could not download font: {e}")))?;
        let status = resp.status();
        if !status.is_success() {
            return Err(QuoteError::font_unavailable(format!(
                "could not download font: {url} returned {status}"
            )));
        }
        let bytes = resp
            .bytes()
            .map_err(|e| QuoteError::font_unavailable(format!("could not download font: {e}")))?;
        Ok(bytes.to_vec())
    }
}

/// On-disk font memoization keyed by [`FontSpec::filename`].
///
/// Entries are written once and never refreshed. A present, non-empty file is a hit.
pub struct FontCache {
    dir: PathBuf,
    fetcher: Box<dyn FontFetcher>,
    timeout: Duration,
}

impl FontCache {
    pub fn new(dir: impl Into<PathBuf>, fetcher: Box<dyn FontFetcher>) -> Self {
        Self {
            dir: dir.into(),
            fetcher,
            timeout: DEFAULT_FETCH_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, spec: &FontSpec) -> PathBuf {
        self.dir.join(spec.filename)
    }

    /// Make sure the font file exists locally and return its path.
    #[tracing::instrument(skip(self, spec), fields(font = spec.name))]
    pub fn ensure(&self, spec: &FontSpec) -> QuoteResult<PathBuf> {
        let path = self.path_for(spec);
        if is_non_empty_file(&path) {
            return Ok(path);
        }

        tracing::info!(url = spec.url, "downloading font");
        let bytes = self.fetcher.fetch(spec.url, self.timeout).inspect_err(|e| {
            tracing::warn!(error = %e, "font download failed");
        })?;
        if bytes.is_empty() {
            return Err(QuoteError::font_unavailable(format!(
                "download of font '{}' returned no data",
                spec.name
            )));
        }

        write_atomic(&self.dir, &path, &bytes)?;
        tracing::info!(path = %path.display(), bytes = bytes.len(), "cached font");
        Ok(path)
    }
}

fn is_non_empty_file(path: &Path) -> bool {
    std::fs::metadata(path)
        .map(|m| m.is_file() && m.len() > 0)
        .unwrap_or(false)
}

/// Write to a unique sibling temp file, then rename over `dst`.
///
/// Concurrent writers of the same font each rename a complete file, so readers never see a
/// partial one.
fn write_atomic(dir: &Path, dst: &Path, bytes: &[u8]) -> QuoteResult<()> {
    let io_err = |what: &str, p: &Path, e: std::io::Error| {
        QuoteError::font_unavailable(format!("{what} '{}': {e}", p.display()))
    };

    std::fs::create_dir_all(dir).map_err(|e| io_err("create font dir", dir, e))?;

    let file_name = dst
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "font".to_owned());
    let tmp = dir.join(format!(".{file_name}.{}.part", uuid::Uuid::new_v4()));

    let result = std::fs::File::create_new(&tmp)
        .and_then(|mut f| {
            f.write_all(bytes)?;
            f.sync_all()
        })
        .and_then(|()| std::fs::rename(&tmp, dst));

    if let Err(e) = result {
        let _ = std::fs::remove_file(&tmp);
        return Err(io_err("write font", dst, e));
    }
    Ok(())
}

/// A catalog font that is present locally and parses.
#[derive(Clone, Debug)]
pub struct ResolvedFont {
    pub spec: &'static FontSpec,
    pub path: PathBuf,
    pub bytes: Arc<Vec<u8>>,
}

impl ResolvedFont {
    pub fn size_px(&self) -> f32 {
        self.spec.size_px as f32
    }
}

/// Look up `name`, ensure it is cached, and check that it loads as a font.
pub fn resolve_font(name: &str, cache: &FontCache) -> QuoteResult<ResolvedFont> {
    let spec = font_by_name(name).ok_or_else(|| QuoteError::unknown_font(name))?;
    let path = cache.ensure(spec)?;

    let bytes = std::fs::read(&path).map_err(|e| {
        QuoteError::font_unavailable(format!("font file '{}' is unreadable: {e}", path.display()))
    })?;

    TextLayoutEngine::new()
        .register_font(&bytes)
        .map_err(|_| {
            QuoteError::font_unavailable(format!("font file '{}' is bad", path.display()))
        })?;

    Ok(ResolvedFont {
        spec,
        path,
        bytes: Arc::new(bytes),
    })
}

#[cfg(test)]
#[path = "../../tests/unit/assets/fonts.rs"]
mod tests;
