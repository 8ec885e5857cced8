//! Structured content extraction from unit pages
//!
//! Extraction operates on the page's primary content region (`<main>`,
//! falling back to `<article>`, falling back to the whole document) and is
//! blind to non-content regions: the subtrees of the tags in [`STRIP_TAGS`]
//! are excluded from every pass (text, headings, code, images, links).

mod content;
mod images;

pub use content::ContentExtractor;
pub use images::{classify_image, image_basename, resolve_image_src};

use scraper::{ElementRef, Node};

/// Tags whose subtrees never contribute content
pub(crate) const STRIP_TAGS: &[&str] = &["script", "style", "nav", "footer", "header"];

/// Collects the region's elements in document order, skipping stripped subtrees
pub(crate) fn content_elements(root: ElementRef<'_>) -> Vec<ElementRef<'_>> {
    let mut out = Vec::new();
    descend(root, &mut out);
    out
}

fn descend<'a>(el: ElementRef<'a>, out: &mut Vec<ElementRef<'a>>) {
    for child in el.children() {
        if let Some(child_el) = ElementRef::wrap(child) {
            if STRIP_TAGS.contains(&child_el.value().name()) {
                continue;
            }
            out.push(child_el);
            descend(child_el, out);
        }
    }
}

/// Collects trimmed, non-empty text fragments in document order, skipping
/// stripped subtrees
pub(crate) fn content_text(el: ElementRef<'_>, out: &mut Vec<String>) {
    for child in el.children() {
        if let Some(child_el) = ElementRef::wrap(child) {
            if !STRIP_TAGS.contains(&child_el.value().name()) {
                content_text(child_el, out);
            }
        } else if let Node::Text(text) = child.value() {
            let trimmed = text.trim();
            if !trimmed.is_empty() {
                out.push(trimmed.to_string());
            }
        }
    }
}

/// Concatenated, trimmed text of a single element (no stripping applied)
pub(crate) fn element_text(el: ElementRef<'_>) -> String {
    el.text().collect::<String>().trim().to_string()
}
