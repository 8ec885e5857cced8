//! Page-level parsers for the three discovery ranks
//!
//! Each parser turns one fetched page into the references the next rank
//! crawls, driving the anchor classifiers and applying first-wins URL
//! deduplication. All parsers are total: a page that matches nothing yields
//! empty results, never an error.

use crate::extract::element_text;
use crate::links::{classify_module_link, classify_path_link, classify_unit_link, order_key};
use crate::links::{ModuleRef, PathRef};
use crate::model::Unit;
use scraper::{ElementRef, Html, Selector};
use std::collections::HashSet;
use tracing::debug;
use url::Url;

/// Parsed course overview page
#[derive(Debug, Clone)]
pub struct CoursePage {
    /// Course title from the page's `<h1>` (empty if none)
    pub title: String,

    /// Learning path references in discovery order
    pub paths: Vec<PathRef>,
}

/// Parsed learning path page
#[derive(Debug, Clone)]
pub struct PathPage {
    pub title: String,

    /// Module references, deduplicated by URL (first occurrence wins)
    pub modules: Vec<ModuleRef>,
}

/// Parsed module page
#[derive(Debug, Clone)]
pub struct ModulePage {
    pub title: String,
    pub description: String,
    pub learning_objectives: Vec<String>,
    pub prerequisites: Vec<String>,

    /// Units deduplicated by URL, sorted ascending by order key (stable)
    pub units: Vec<Unit>,
}

/// Parses the course overview page
///
/// Learning paths are recognized solely through `article` elements carrying
/// the structured `data-learn-uid` attribute; anchors without it are
/// ignored.
pub fn parse_course_page(html: &str, site_root: &str) -> CoursePage {
    let document = Html::parse_document(html);
    let title = first_h1(&document);

    let mut paths = Vec::new();
    if let Ok(sel) = Selector::parse("article[data-learn-uid]") {
        for article in document.select(&sel) {
            if let Some(uid) = article.value().attr("data-learn-uid") {
                if let Some(path_ref) = classify_path_link(uid, site_root) {
                    paths.push(path_ref);
                }
            }
        }
    }

    debug!("Found {} learning paths", paths.len());
    CoursePage { title, paths }
}

/// Parses a learning path page into module references
pub fn parse_path_page(html: &str, base: &Url, site_root: &str) -> PathPage {
    let document = Html::parse_document(html);
    let title = first_h1(&document);

    let mut seen = HashSet::new();
    let mut modules = Vec::new();

    if let Ok(sel) = Selector::parse("a[href]") {
        for anchor in document.select(&sel) {
            let href = anchor.value().attr("href").unwrap_or("");
            let text = element_text(anchor);

            if let Some(module_ref) = classify_module_link(href, &text, base, site_root) {
                // First anchor pointing at a URL wins, even when later
                // anchors carry different visible text
                if seen.insert(module_ref.url.clone()) {
                    modules.push(module_ref);
                }
            }
        }
    }

    debug!("Found {} modules", modules.len());
    PathPage { title, modules }
}

/// Parses a module page into its metadata and ordered unit list
pub fn parse_module_page(html: &str, base: &Url) -> ModulePage {
    let document = Html::parse_document(html);
    let title = first_h1(&document);
    let description = meta_description(&document);
    let learning_objectives = section_list(&document, "learning objectives");
    let prerequisites = section_list(&document, "prerequisites");

    let mut seen = HashSet::new();
    let mut units = Vec::new();

    if let Ok(sel) = Selector::parse("a[href]") {
        for anchor in document.select(&sel) {
            let href = anchor.value().attr("href").unwrap_or("");
            let text = element_text(anchor);

            if let Some(unit_ref) = classify_unit_link(href, &text, base) {
                if seen.insert(unit_ref.url.clone()) {
                    units.push(Unit {
                        order_key: order_key(&unit_ref.url, &unit_ref.title),
                        title: unit_ref.title,
                        url: unit_ref.url,
                        href: unit_ref.href,
                        content: None,
                    });
                }
            }
        }
    }

    // Stable sort: ties keep discovery order
    units.sort_by_key(|unit| unit.order_key);

    debug!("Found {} units", units.len());
    ModulePage {
        title,
        description,
        learning_objectives,
        prerequisites,
        units,
    }
}

/// Text of the document's first `<h1>`, empty if none
fn first_h1(document: &Html) -> String {
    Selector::parse("h1")
        .ok()
        .and_then(|sel| document.select(&sel).next().map(element_text))
        .unwrap_or_default()
}

/// Content of `<meta name="description">`, empty if absent
fn meta_description(document: &Html) -> String {
    Selector::parse(r#"meta[name="description"]"#)
        .ok()
        .and_then(|sel| {
            document
                .select(&sel)
                .next()
                .and_then(|el| el.value().attr("content"))
                .map(str::to_string)
        })
        .unwrap_or_default()
}

/// Items of the list following a section heading whose text contains
/// `section_name` (case-insensitive); empty when no such section exists
fn section_list(document: &Html, section_name: &str) -> Vec<String> {
    let heading_sel = match Selector::parse("h2, h3") {
        Ok(sel) => sel,
        Err(_) => return Vec::new(),
    };
    let item_sel = match Selector::parse("li") {
        Ok(sel) => sel,
        Err(_) => return Vec::new(),
    };

    for heading in document.select(&heading_sel) {
        if !element_text(heading).to_lowercase().contains(section_name) {
            continue;
        }

        // Walk forward through siblings until the next heading; the first
        // list found belongs to this section
        for sibling in heading.next_siblings() {
            let Some(el) = ElementRef::wrap(sibling) else {
                continue;
            };
            match el.value().name() {
                "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => break,
                "ul" | "ol" => {
                    return el
                        .select(&item_sel)
                        .map(element_text)
                        .filter(|text| !text.is_empty())
                        .collect();
                }
                _ => {}
            }
        }
    }

    Vec::new()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SITE_ROOT: &str = "https://learn.microsoft.com";

    fn path_url() -> Url {
        Url::parse("https://learn.microsoft.com/en-us/training/paths/explore-workspace/").unwrap()
    }

    fn module_url() -> Url {
        Url::parse("https://learn.microsoft.com/en-us/training/modules/intro-to-ml/").unwrap()
    }

    #[test]
    fn test_parse_course_page() {
        let html = r#"<html><body>
            <h1>Azure Data Scientist</h1>
            <article data-learn-uid="learn.wwl.explore-workspace"><h3>Explore</h3></article>
            <article data-learn-uid="learn.wwl.train-models"><h3>Train</h3></article>
            <article><h3>No uid, ignored</h3></article>
        </body></html>"#;

        let page = parse_course_page(html, SITE_ROOT);
        assert_eq!(page.title, "Azure Data Scientist");
        assert_eq!(page.paths.len(), 2);
        assert_eq!(
            page.paths[0].url,
            "https://learn.microsoft.com/en-us/training/paths/explore-workspace/"
        );
        assert_eq!(page.paths[1].title, "Train Models");
    }

    #[test]
    fn test_course_page_without_paths_is_empty() {
        let html = r#"<html><body><h1>Course</h1><p>Nothing here.</p></body></html>"#;
        let page = parse_course_page(html, SITE_ROOT);
        assert!(page.paths.is_empty());
    }

    #[test]
    fn test_parse_path_page_dedupes_by_url() {
        let html = r#"<html><body>
            <h1>Explore the workspace</h1>
            <a href="../../modules/intro-to-ml/">Intro to ML</a>
            <a href="../../modules/intro-to-ml/">Start here: intro</a>
            <a href="../../modules/train-models/">Train models</a>
            <a href="/training/paths/other/">Not a module</a>
        </body></html>"#;

        let page = parse_path_page(html, &path_url(), SITE_ROOT);
        assert_eq!(page.title, "Explore the workspace");
        assert_eq!(page.modules.len(), 2);
        // First anchor's title wins
        assert_eq!(page.modules[0].title, "Intro to ML");
        assert_eq!(page.modules[1].title, "Train models");
    }

    #[test]
    fn test_parse_module_page_orders_units() {
        let html = r#"<html><body>
            <h1>Intro to machine learning</h1>
            <a href="3-summary/">Summary</a>
            <a href="1-introduction/">Introduction</a>
            <a href="2-provision/">Provision resources</a>
        </body></html>"#;

        let page = parse_module_page(html, &module_url());
        let titles: Vec<&str> = page.units.iter().map(|u| u.title.as_str()).collect();
        assert_eq!(titles, vec!["Introduction", "Provision resources", "Summary"]);
        assert_eq!(page.units[0].order_key, 1);
        assert_eq!(page.units[2].order_key, 3);
    }

    #[test]
    fn test_parse_module_page_dedupes_units() {
        let html = r#"<html><body>
            <h1>Module</h1>
            <a href="1-introduction/">Introduction</a>
            <a href="1-introduction/">Intro (again)</a>
        </body></html>"#;

        let page = parse_module_page(html, &module_url());
        assert_eq!(page.units.len(), 1);
        assert_eq!(page.units[0].title, "Introduction");
    }

    #[test]
    fn test_module_metadata_extraction() {
        let html = r#"<html><head>
            <meta name="description" content="Learn to provision a workspace.">
        </head><body>
            <h1>Intro to machine learning</h1>
            <h2>Learning objectives</h2>
            <ul><li>Provision a workspace</li><li>Run an experiment</li></ul>
            <h2>Prerequisites</h2>
            <ul><li>Azure subscription</li></ul>
            <h2>Units</h2>
            <a href="1-introduction/">Introduction</a>
        </body></html>"#;

        let page = parse_module_page(html, &module_url());
        assert_eq!(page.description, "Learn to provision a workspace.");
        assert_eq!(
            page.learning_objectives,
            vec!["Provision a workspace", "Run an experiment"]
        );
        assert_eq!(page.prerequisites, vec!["Azure subscription"]);
    }

    #[test]
    fn test_missing_metadata_is_empty() {
        let html = r#"<html><body><h1>Module</h1></body></html>"#;
        let page = parse_module_page(html, &module_url());
        assert!(page.description.is_empty());
        assert!(page.learning_objectives.is_empty());
        assert!(page.prerequisites.is_empty());
    }
}
