//! Unit content extraction
//!
//! Produces a [`ContentBlock`] from a fetched unit document: flattened text,
//! headings, code blocks, image metadata, and outbound links.

use crate::extract::{content_elements, content_text, element_text, images};
use crate::model::{ContentBlock, Heading, LinkRecord};
use chrono::Utc;
use scraper::{ElementRef, Html, Selector};
use tracing::debug;
use url::Url;

/// Minimum trimmed length for a code element to count as a code block;
/// shorter spans are inline noise
const MIN_CODE_LEN: usize = 10;

/// Extracts structured content from unit pages
///
/// Holds the site root used to resolve the page's relative image sources.
/// The extractor is a pure transform: document in, [`ContentBlock`] out.
pub struct ContentExtractor {
    site_root: String,
}

impl ContentExtractor {
    pub fn new(site_root: impl Into<String>) -> Self {
        Self {
            site_root: site_root.into(),
        }
    }

    /// Extracts the unit's content block
    ///
    /// The primary content region is `<main>`, then `<article>`, then the
    /// whole document. Script/style/nav/footer/header subtrees are invisible
    /// to every pass.
    pub fn extract_unit(&self, html: &str, unit_url: &Url) -> ContentBlock {
        let document = Html::parse_document(html);
        let region = content_region(&document);
        let elements = content_elements(region);

        let mut fragments = Vec::new();
        content_text(region, &mut fragments);
        let text = fragments.join("\n");

        let headings = extract_headings(&elements);
        let code_blocks = extract_code_blocks(&elements);
        let links = extract_links(&elements);
        let images = images::extract_images(&elements, unit_url, &self.site_root);

        debug!(
            "Extracted {} chars, {} headings, {} code blocks, {} images, {} links from {}",
            text.len(),
            headings.len(),
            code_blocks.len(),
            images.len(),
            links.len(),
            unit_url
        );

        ContentBlock {
            text,
            headings,
            code_blocks,
            images,
            links,
            extracted_at: Utc::now(),
        }
    }
}

/// Picks the primary content region for the document
fn content_region(document: &Html) -> ElementRef<'_> {
    for selector in ["main", "article"] {
        if let Ok(sel) = Selector::parse(selector) {
            if let Some(el) = document.select(&sel).next() {
                return el;
            }
        }
    }
    document.root_element()
}

/// Every heading element in document order, tagged with its level
fn extract_headings(elements: &[ElementRef<'_>]) -> Vec<Heading> {
    elements
        .iter()
        .filter_map(|el| {
            let level = heading_level(el.value().name())?;
            Some(Heading {
                level,
                text: element_text(*el),
            })
        })
        .collect()
}

pub(crate) fn heading_level(tag: &str) -> Option<u8> {
    let level: u8 = tag.strip_prefix('h')?.parse().ok()?;
    (1..=6).contains(&level).then_some(level)
}

/// Every code/pre element whose trimmed text exceeds the noise threshold
fn extract_code_blocks(elements: &[ElementRef<'_>]) -> Vec<String> {
    elements
        .iter()
        .filter(|el| matches!(el.value().name(), "code" | "pre"))
        .map(|el| element_text(*el))
        .filter(|text| text.len() > MIN_CODE_LEN)
        .collect()
}

/// Every anchor with both a non-empty href and non-empty visible text,
/// recorded as the raw href (not resolved)
fn extract_links(elements: &[ElementRef<'_>]) -> Vec<LinkRecord> {
    elements
        .iter()
        .filter(|el| el.value().name() == "a")
        .filter_map(|el| {
            let href = el.value().attr("href")?;
            let text = element_text(*el);
            if href.is_empty() || text.is_empty() {
                return None;
            }
            Some(LinkRecord {
                url: href.to_string(),
                text,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_url() -> Url {
        Url::parse("https://learn.microsoft.com/en-us/training/modules/intro/1-introduction/")
            .unwrap()
    }

    fn extract(html: &str) -> ContentBlock {
        ContentExtractor::new("https://learn.microsoft.com").extract_unit(html, &unit_url())
    }

    #[test]
    fn test_prefers_main_region() {
        let html = r#"<html><body>
            <nav>Site navigation</nav>
            <main><p>Main content</p></main>
            <article><p>Article content</p></article>
        </body></html>"#;
        let block = extract(html);
        assert!(block.text.contains("Main content"));
        assert!(!block.text.contains("Article content"));
    }

    #[test]
    fn test_falls_back_to_article_then_document() {
        let html = r#"<html><body><article><p>Article only</p></article></body></html>"#;
        assert!(extract(html).text.contains("Article only"));

        let html = r#"<html><body><div><p>Bare document</p></div></body></html>"#;
        assert!(extract(html).text.contains("Bare document"));
    }

    #[test]
    fn test_strips_non_content_regions() {
        let html = r#"<html><body><main>
            <script>var tracked = true;</script>
            <style>.x { color: red }</style>
            <nav>Breadcrumbs</nav>
            <header>Page header</header>
            <footer>Copyright</footer>
            <p>Real content</p>
        </main></body></html>"#;
        let block = extract(html);
        assert!(block.text.contains("Real content"));
        assert!(!block.text.contains("tracked"));
        assert!(!block.text.contains("Breadcrumbs"));
        assert!(!block.text.contains("Page header"));
        assert!(!block.text.contains("Copyright"));
    }

    #[test]
    fn test_text_joined_with_newlines() {
        let html = r#"<html><body><main><p>First</p><p>Second</p></main></body></html>"#;
        assert_eq!(extract(html).text, "First\nSecond");
    }

    #[test]
    fn test_headings_with_levels() {
        let html = r#"<html><body><main>
            <h1>Title</h1><p>x</p><h2>Section</h2><h6>Fine print</h6>
        </main></body></html>"#;
        let block = extract(html);
        let levels: Vec<u8> = block.headings.iter().map(|h| h.level).collect();
        assert_eq!(levels, vec![1, 2, 6]);
        assert_eq!(block.headings[0].text, "Title");
    }

    #[test]
    fn test_short_code_spans_are_noise() {
        let html = r#"<html><body><main>
            <code>az ml</code>
            <pre>az ml workspace create --name my-workspace</pre>
        </main></body></html>"#;
        let block = extract(html);
        assert_eq!(block.code_blocks.len(), 1);
        assert!(block.code_blocks[0].contains("workspace create"));
    }

    #[test]
    fn test_links_need_href_and_text() {
        let html = r##"<html><body><main>
            <a href="/training/modules/next/">Next module</a>
            <a href="/empty-text/"></a>
            <a href="">No href</a>
        </main></body></html>"##;
        let block = extract(html);
        assert_eq!(block.links.len(), 1);
        assert_eq!(block.links[0].url, "/training/modules/next/");
        assert_eq!(block.links[0].text, "Next module");
    }

    #[test]
    fn test_heading_level_bounds() {
        assert_eq!(heading_level("h1"), Some(1));
        assert_eq!(heading_level("h6"), Some(6));
        assert_eq!(heading_level("h7"), None);
        assert_eq!(heading_level("header"), None);
        assert_eq!(heading_level("p"), None);
    }
}
