use once_cell::sync::Lazy;
use regex::Regex;

/// File extensions that never serve dynamic content.
pub const STATIC_EXTENSIONS: &[&str] = &[
    "jpg", "jpeg", "png", "gif", "bmp", "svg", "webp", "ico", "tiff", "tif", "avif",
    "woff", "woff2", "ttf", "otf", "eot", "fon",
    "mp4", "avi", "mov", "mkv", "webm", "flv", "m4v",
    "mp3", "wav", "ogg", "flac", "aac",
    "css", "less", "sass", "scss",
];

static STATIC_ASSET_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(r"(?i)\.({})(\?.*)?$", STATIC_EXTENSIONS.join("|"))).unwrap()
});

/// Shell fragment that drops static assets from a piped URL list.
pub fn static_filter_grep() -> String {
    let pattern = STATIC_EXTENSIONS.join("|");
    let cmd = format!(r"grep -Eiv '\.({pattern})(\?.*)?$'");
    tracing::debug!("generated grep pattern: {cmd}");
    cmd
}

/// True if the URL points at a static asset by extension.
pub fn is_static_asset(url: &str) -> bool {
    STATIC_ASSET_RE.is_match(url)
}
