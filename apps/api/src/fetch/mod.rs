//! Content fetch. Turns a job posting or online CV URL into plain text.
//!
//! Best effort: any failure (bad URL, network, status, unparseable page) yields an
//! empty string and a log line. The caller decides what to tell the user.

pub mod handlers;
pub mod images;

use std::time::Duration;

use async_trait::async_trait;
use regex::Regex;
use reqwest::Client;
use tracing::{debug, warn};

/// Elements whose content is never page text.
const REMOVED_TAGS: &[&str] = &[
    "script", "style", "nav", "header", "footer", "aside", "form", "button", "noscript",
    "template", "svg",
];

const VOID_TAGS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source",
    "track", "wbr",
];

#[async_trait]
pub trait ContentFetcher: Send + Sync {
    /// Plain text of the page at `url`, or an empty string.
    async fn fetch_text(&self, url: &str) -> String;
}

/// Fetches pages directly over HTTP.
#[derive(Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(timeout: Duration) -> Self {
        Self {
            client: Client::builder()
                .user_agent("Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36")
                .timeout(timeout)
                .build()
                .unwrap_or_default(),
        }
    }
}

#[async_trait]
impl ContentFetcher for HttpFetcher {
    async fn fetch_text(&self, url: &str) -> String {
        let url = url.trim();
        if !url.starts_with("http") {
            warn!("Refusing to fetch non-http URL: {url:?}");
            return String::new();
        }

        let response = match self.client.get(url).send().await {
            Ok(r) => r,
            Err(e) => {
                warn!("Failed to fetch {url}: {e}");
                return String::new();
            }
        };
        if !response.status().is_success() {
            warn!("Fetching {url} returned {}", response.status());
            return String::new();
        }

        match response.text().await {
            Ok(html) => {
                let text = html_to_text(&html);
                debug!("Fetched {} chars of text from {url}", text.len());
                text
            }
            Err(e) => {
                warn!("Failed to read body of {url}: {e}");
                String::new()
            }
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// HTML → text
// ────────────────────────────────────────────────────────────────────────────

/// Extracts readable text from an HTML page.
///
/// Only the body is considered. Navigation chrome, scripts, forms, and elements
/// marked `aria-hidden="true"` are dropped along with their content; entities are
/// decoded; runs of two or more whitespace characters collapse to one space.
pub fn html_to_text(html: &str) -> String {
    let (Some(comment_re), Some(body_re), Some(tag_re), Some(hidden_re), Some(space_re)) = (
        Regex::new(r"(?s)<!--.*?-->").ok(),
        Regex::new(r"(?is)<body\b[^>]*>").ok(),
        Regex::new(r"<(/?)([a-zA-Z][a-zA-Z0-9-]*)([^>]*)>").ok(),
        Regex::new(r#"(?i)\baria-hidden\s*=\s*["']?true"#).ok(),
        Regex::new(r"\s\s+").ok(),
    ) else {
        return String::new();
    };

    let html = comment_re.replace_all(html, " ");
    let start = body_re.find(&html).map(|m| m.end()).unwrap_or(0);
    let html = &html[start..];

    let mut out = String::with_capacity(html.len() / 2);
    // (tag name, nesting depth) of the element being skipped
    let mut skipping: Option<(String, usize)> = None;
    let mut cursor = 0;

    for caps in tag_re.captures_iter(html) {
        let Some(whole) = caps.get(0) else { continue };
        if skipping.is_none() {
            out.push_str(&html_escape::decode_html_entities(&html[cursor..whole.start()]));
            out.push(' ');
        }
        cursor = whole.end();

        let closing = !caps[1].is_empty();
        let name = caps[2].to_ascii_lowercase();
        let attrs = &caps[3];
        let self_closing = attrs.trim_end().ends_with('/') || VOID_TAGS.contains(&name.as_str());

        match &mut skipping {
            Some((skipped, depth)) if *skipped == name => {
                if closing {
                    *depth -= 1;
                    if *depth == 0 {
                        skipping = None;
                    }
                } else if !self_closing {
                    *depth += 1;
                }
            }
            Some(_) => {}
            None => {
                let removed = REMOVED_TAGS.contains(&name.as_str()) || hidden_re.is_match(attrs);
                if !closing && !self_closing && removed {
                    skipping = Some((name, 1));
                }
            }
        }
    }
    if skipping.is_none() {
        out.push_str(&html_escape::decode_html_entities(&html[cursor..]));
    }

    space_re.replace_all(&out, " ").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_chrome_and_scripts() {
        let html = r#"<html><head><title>Ignored</title></head><body>
            <nav><a href="/">Home</a></nav>
            <header><h1>Site</h1></header>
            <main><h2>Senior Rust Engineer</h2><p>Build &amp; run   payment services.</p></main>
            <script>if (a < b) { alert("x") }</script>
            <style>p { color: red }</style>
            <footer>© 2024</footer>
        </body></html>"#;
        assert_eq!(
            html_to_text(html),
            "Senior Rust Engineer Build & run payment services."
        );
    }

    #[test]
    fn test_aria_hidden_subtree_removed_with_nesting() {
        let html = r#"<body><div aria-hidden="true"><div>icon</div><div>more</div></div><p>Visible</p></body>"#;
        assert_eq!(html_to_text(html), "Visible");
    }

    #[test]
    fn test_forms_and_buttons_dropped() {
        let html = "<body><p>Apply today</p><form><input name=q><button>Send</button></form></body>";
        assert_eq!(html_to_text(html), "Apply today");
    }

    #[test]
    fn test_fragment_without_body_is_accepted() {
        assert_eq!(html_to_text("<p>Hello<br/>world</p><!-- note -->"), "Hello world");
        assert_eq!(html_to_text(""), "");
    }

    #[tokio::test]
    async fn test_non_http_url_refused() {
        let fetcher = HttpFetcher::new(Duration::from_secs(1));
        assert_eq!(fetcher.fetch_text("ftp://example.com/job").await, "");
        assert_eq!(fetcher.fetch_text("example.com").await, "");
    }
}
