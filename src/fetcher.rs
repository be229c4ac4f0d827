//! Article fetching, main-text extraction, and local storage

use crate::error::{EvalError, Result};
use reqwest::blocking::Client;
use scraper::{ElementRef, Html, Selector};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use std::time::Duration;

const USER_AGENT: &str = concat!("blogeval/", env!("CARGO_PKG_VERSION"));

/// Source of raw HTML for a URL
pub trait PageSource {
    fn fetch_html(&self, url: &str) -> Result<String>;
}

/// Fetches pages over HTTP with a blocking client
pub struct HttpPageSource {
    client: Client,
}

impl HttpPageSource {
    pub fn new(timeout_secs: u64) -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| EvalError::Config(format!("failed to build HTTP client: {}", e)))?;
        Ok(Self { client })
    }
}

impl PageSource for HttpPageSource {
    fn fetch_html(&self, url: &str) -> Result<String> {
        let response = self.client.get(url).send().map_err(|e| EvalError::Fetch {
            url: url.to_string(),
            status: None,
            message: e.to_string(),
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(EvalError::Fetch {
                url: url.to_string(),
                status: Some(status.as_u16()),
                message: format!("HTTP {}", status),
            });
        }

        response.text().map_err(|e| EvalError::Fetch {
            url: url.to_string(),
            status: Some(status.as_u16()),
            message: e.to_string(),
        })
    }
}

fn article_selector() -> &'static Selector {
    static SEL: OnceLock<Selector> = OnceLock::new();
    SEL.get_or_init(|| Selector::parse("article").expect("valid selector"))
}

fn paragraph_selector() -> &'static Selector {
    static SEL: OnceLock<Selector> = OnceLock::new();
    SEL.get_or_init(|| Selector::parse("p").expect("valid selector"))
}

const NON_CONTENT_TAGS: [&str; 3] = ["script", "style", "noscript"];

/// Text nodes under `root`, skipping anything inside script, style, or noscript
fn visible_text<'a>(root: ElementRef<'a>) -> impl Iterator<Item = &'a str> + 'a {
    root.descendants().filter_map(move |node| {
        let text = node.value().as_text()?;
        let hidden = node
            .ancestors()
            .take_while(|ancestor| ancestor.id() != root.id())
            .chain(std::iter::once(*root))
            .filter_map(|ancestor| ancestor.value().as_element())
            .any(|element| NON_CONTENT_TAGS.contains(&element.name()));
        (!hidden).then_some(&**text)
    })
}

/// Best-guess main article text.
///
/// Uses the first `<article>` element's text nodes (trimmed, empties dropped)
/// when present; otherwise the text of every `<p>` in document order. Both are
/// joined with newlines. Script, style, and noscript contents are never text.
pub fn extract_article_text(html: &str) -> String {
    let document = Html::parse_document(html);

    if let Some(article) = document.select(article_selector()).next() {
        return visible_text(article)
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .collect::<Vec<_>>()
            .join("\n");
    }

    document
        .select(paragraph_selector())
        .map(|p| visible_text(p).collect::<String>().trim().to_string())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Fetch a page and extract its article text
pub fn fetch_article_content(source: &dyn PageSource, url: &str) -> Result<String> {
    let html = source.fetch_html(url)?;
    Ok(extract_article_text(&html))
}

/// Filesystem-safe base name derived from a URL
pub fn slugify(url: &str) -> String {
    let without_scheme = url.rsplit("//").next().unwrap_or(url);
    without_scheme.replace(['/', '?', '&', '='], "_")
}

/// Write article text to `<dir>/<slug>.txt`, creating `dir` if needed
pub fn save_article(text: &str, url: &str, dir: &Path) -> Result<PathBuf> {
    fs::create_dir_all(dir)?;
    let path = dir.join(format!("{}.txt", slugify(url)));
    fs::write(&path, text)?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_article_container_wins_over_siblings() {
        let html = r#"<html><body>
            <nav><p>Home</p><p>About</p></nav>
            <article>
              <h1>  The Title </h1>
              <p>First <em>paragraph</em>.</p>
              <p>Second paragraph.</p>
            </article>
            <footer><p>Copyright</p></footer>
        </body></html>"#;
        assert_eq!(
            extract_article_text(html),
            "The Title\nFirst\nparagraph\n.\nSecond paragraph."
        );
    }

    #[test]
    fn test_paragraph_fallback_in_document_order() {
        let html = r#"<html><body>
            <div><p> One. </p></div>
            <section><p>Two <b>bold</b> words.</p></section>
            <p>Three.</p>
        </body></html>"#;
        assert_eq!(extract_article_text(html), "One.\nTwo bold words.\nThree.");
    }

    #[test]
    fn test_script_and_style_are_not_article_text() {
        let html = r#"<html><body><article>
            <p>Real prose here.</p>
            <script>window.dataLayer=[];gtag('config','UA-1');</script>
            <style>.ad{color:red}</style>
            <noscript><img src="pixel.gif">Enable JavaScript</noscript>
            <script type="application/ld+json">{"@type":"BlogPosting"}</script>
            <p>More prose.</p>
        </article></body></html>"#;
        assert_eq!(extract_article_text(html), "Real prose here.\nMore prose.");
    }

    #[test]
    fn test_inline_script_inside_paragraph_is_dropped() {
        let html = "<html><body><p>Kept<script>track()</script> words.</p></body></html>";
        assert_eq!(extract_article_text(html), "Kept words.");
    }

    #[test]
    fn test_no_article_no_paragraphs_is_empty() {
        assert_eq!(extract_article_text("<html><body><div>Hi</div></body></html>"), "");
    }

    #[test]
    fn test_slugify_replaces_separators() {
        assert_eq!(
            slugify("https://example.com/blog/post?id=3&ref=x"),
            "example.com_blog_post_id_3_ref_x"
        );
        assert_eq!(slugify("example.com/a"), "example.com_a");
    }

    #[test]
    fn test_save_article_creates_dir_and_file() {
        let dir = TempDir::new().unwrap();
        let articles = dir.path().join("articles");
        let path = save_article("Body text", "https://example.com/post", &articles).unwrap();
        assert_eq!(path, articles.join("example.com_post.txt"));
        assert_eq!(fs::read_to_string(&path).unwrap(), "Body text");
    }

    struct StaticPage(&'static str);

    impl PageSource for StaticPage {
        fn fetch_html(&self, _url: &str) -> Result<String> {
            Ok(self.0.to_string())
        }
    }

    #[test]
    fn test_fetch_article_content_extracts() {
        let text = fetch_article_content(
            &StaticPage("<p>Alpha</p><p>Beta</p>"),
            "https://example.com",
        )
        .unwrap();
        assert_eq!(text, "Alpha\nBeta");
    }
}
