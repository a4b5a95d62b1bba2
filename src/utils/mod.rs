//! Utility functions and helpers.

pub mod http;
pub mod log;

use scraper::ElementRef;
use url::Url;

/// Resolve a potentially relative URL against a base URL.
pub fn resolve_url(base: &Url, href: &str) -> String {
    base.join(href)
        .map(|u| u.to_string())
        .unwrap_or_else(|_| href.to_string())
}

/// Resolve a URL string against a base URL string.
pub fn resolve(base_url: &str, href: &str) -> Option<String> {
    Url::parse(base_url)
        .ok()
        .map(|base| resolve_url(&base, href))
}

/// Collapse runs of whitespace into single spaces and trim.
pub fn normalize_ws(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Collect an element's text content with normalized whitespace.
pub fn element_text(el: &ElementRef) -> String {
    normalize_ws(&el.text().collect::<Vec<_>>().join(" "))
}
