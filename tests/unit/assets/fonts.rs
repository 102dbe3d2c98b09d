use std::sync::atomic::{AtomicUsize, Ordering};

use super::*;

struct StubFetcher {
    reply: Result<Vec<u8>, String>,
    calls: Arc<AtomicUsize>,
}

impl StubFetcher {
    fn boxed(reply: Result<Vec<u8>, String>) -> (Box<dyn FontFetcher>, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let f = Self {
            reply,
            calls: Arc::clone(&calls),
        };
        (Box::new(f), calls)
    }
}

impl FontFetcher for StubFetcher {
    fn fetch(&self, _url: &str, _timeout: Duration) -> QuoteResult<Vec<u8>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.reply.clone().map_err(QuoteError::font_unavailable)
    }
}

fn poppins() -> &'static FontSpec {
    font_by_name("Poppins").unwrap()
}

fn leftover_parts(dir: &Path) -> usize {
    std::fs::read_dir(dir)
        .unwrap()
        .filter_map(Result::ok)
        .filter(|e| e.file_name().to_string_lossy().ends_with(".part"))
        .count()
}

#[test]
fn catalog_sizes_are_fixed_per_font() {
    assert_eq!(font_by_name("Poppins").unwrap().size_px, 80);
    assert_eq!(font_by_name("Lato").unwrap().size_px, 85);
    assert!(font_by_name("Comic Sans").is_none());
    assert_eq!(font_names().collect::<Vec<_>>(), vec!["Poppins", "Lato"]);
}

#[test]
fn existing_non_empty_file_skips_fetch() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("Poppins-Bold.ttf"), b"cached").unwrap();
    let (fetcher, calls) = StubFetcher::boxed(Err("offline".into()));
    let cache = FontCache::new(dir.path(), fetcher);

    let path = cache.ensure(poppins()).unwrap();
    assert_eq!(path, dir.path().join("Poppins-Bold.ttf"));
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[test]
fn miss_downloads_once_then_hits() {
    let dir = tempfile::tempdir().unwrap();
    let (fetcher, calls) = StubFetcher::boxed(Ok(b"font-bytes".to_vec()));
    let cache = FontCache::new(dir.path().join("fonts"), fetcher);

    let first = cache.ensure(poppins()).unwrap();
    let second = cache.ensure(poppins()).unwrap();
    assert_eq!(first, second);
    assert_eq!(std::fs::read(&first).unwrap(), b"font-bytes");
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(leftover_parts(cache.dir()), 0);
}

#[test]
fn zero_byte_cache_entry_is_refetched() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("Poppins-Bold.ttf"), b"").unwrap();
    let (fetcher, calls) = StubFetcher::boxed(Ok(b"fresh".to_vec()));
    let cache = FontCache::new(dir.path(), fetcher);

    let path = cache.ensure(poppins()).unwrap();
    assert_eq!(std::fs::read(path).unwrap(), b"fresh");
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[test]
fn empty_download_is_rejected_without_writing() {
    let dir = tempfile::tempdir().unwrap();
    let (fetcher, _) = StubFetcher::boxed(Ok(Vec::new()));
    let cache = FontCache::new(dir.path(), fetcher);

    let err = cache.ensure(poppins()).unwrap_err();
    assert!(matches!(err, QuoteError::FontUnavailable(_)));
    assert!(!cache.path_for(poppins()).exists());
    assert_eq!(leftover_parts(dir.path()), 0);
}

#[test]
fn fetch_failure_is_font_unavailable() {
    let dir = tempfile::tempdir().unwrap();
    let (fetcher, _) = StubFetcher::boxed(Err("connection refused".into()));
    let cache = FontCache::new(dir.path(), fetcher);

    let err = cache.ensure(poppins()).unwrap_err();
    assert!(matches!(err, QuoteError::FontUnavailable(ref m) if m.contains("connection refused")));
}

#[test]
fn resolve_unknown_font_never_fetches() {
    let dir = tempfile::tempdir().unwrap();
    let (fetcher, calls) = StubFetcher::boxed(Ok(b"x".to_vec()));
    let cache = FontCache::new(dir.path(), fetcher);

    let err = resolve_font("Wingdings", &cache).unwrap_err();
    assert!(matches!(err, QuoteError::UnknownFont(_)));
    assert!(err.to_string().contains("font"));
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[test]
fn resolve_rejects_corrupt_font_file() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("Lato-Bold.ttf"), b"definitely not a font").unwrap();
    let (fetcher, _) = StubFetcher::boxed(Err("offline".into()));
    let cache = FontCache::new(dir.path(), fetcher);

    let err = resolve_font("Lato", &cache).unwrap_err();
    assert!(matches!(err, QuoteError::FontUnavailable(ref m) if m.contains("bad")));
}

#[test]
fn resolve_loads_a_real_font() {
    let Some(font_path) = crate::test_support::system_font() else {
        eprintln!("skipping: no system TrueType font found");
        return;
    };
    let dir = tempfile::tempdir().unwrap();
    std::fs::copy(&font_path, dir.path().join("Poppins-Bold.ttf")).unwrap();
    let (fetcher, calls) = StubFetcher::boxed(Err("offline".into()));
    let cache = FontCache::new(dir.path(), fetcher);

    let font = resolve_font("Poppins", &cache).unwrap();
    assert_eq!(font.spec.name, "Poppins");
    assert!((font.size_px() - 80.0).abs() < f32::EPSILON);
    assert!(!font.bytes.is_empty());
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}
