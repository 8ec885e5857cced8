//! Image metadata extraction and classification
//!
//! Images are recorded as metadata only (no downloads): resolved URL,
//! filename, a heuristic type classification, and the surrounding context
//! (nearest preceding heading, figure caption, following paragraph).

use crate::extract::element_text;
use crate::model::{ImageContext, ImageRecord, ImageType};
use scraper::{ElementRef, Selector};

/// Following-paragraph text shorter than this is not worth recording
const MIN_CONTEXT_LEN: usize = 10;

/// Following-paragraph text is capped at this many characters
const MAX_CONTEXT_LEN: usize = 200;

/// Category substrings checked against the lower-cased filename
const FILENAME_PATTERNS: &[(ImageType, &[&str])] = &[
    (ImageType::Diagram, &["diagram", "architecture", "flowchart", "workflow"]),
    (ImageType::Screenshot, &["screenshot", "screen", "ui", "interface"]),
    (ImageType::Chart, &["chart", "graph", "plot"]),
    (ImageType::CodeExample, &["code", "snippet", "example"]),
    (ImageType::Icon, &["icon", "logo", "badge"]),
];

/// Category substrings checked against the lower-cased alt text, used only
/// when the filename matched nothing
const ALT_PATTERNS: &[(ImageType, &[&str])] = &[
    (ImageType::Diagram, &["diagram", "architecture", "flowchart", "workflow", "hierarchy"]),
    (ImageType::Screenshot, &["screenshot", "screen", "interface", "portal", "page", "window"]),
    (ImageType::Chart, &["chart", "graph", "plot", "visualization"]),
    (ImageType::CodeExample, &["code", "snippet", "example", "syntax"]),
    (ImageType::Icon, &["icon", "logo", "badge", "button"]),
];

/// Records every image element with a non-empty source
///
/// `elements` is the content region in document order (stripped subtrees
/// already excluded), which is what makes the context capture — "nearest
/// preceding heading", "next paragraph" — a simple scan.
pub(crate) fn extract_images(
    elements: &[ElementRef<'_>],
    unit_url: &url::Url,
    site_root: &str,
) -> Vec<ImageRecord> {
    let mut records = Vec::new();

    for (idx, el) in elements.iter().enumerate() {
        if el.value().name() != "img" {
            continue;
        }

        let src = el.value().attr("src").unwrap_or("");
        if src.is_empty() {
            continue;
        }

        let alt = el.value().attr("alt").unwrap_or("");
        let title = el.value().attr("title").unwrap_or("");

        let absolute_url = resolve_image_src(src, unit_url, site_root);
        let filename = image_basename(&absolute_url);
        let image_type = classify_image(&filename, alt);
        let context = capture_context(elements, idx, *el);

        records.push(ImageRecord {
            src: src.to_string(),
            absolute_url,
            alt_text: alt.to_string(),
            title: title.to_string(),
            filename,
            image_type,
            context,
        });
    }

    records
}

/// Resolves an image source to an absolute URL
///
/// - `../../…` is rewritten to the site root plus the locale prefix
/// - `/…` is prefixed with the site root
/// - already-absolute sources pass through
/// - anything else resolves against the unit URL
pub fn resolve_image_src(src: &str, unit_url: &url::Url, site_root: &str) -> String {
    if let Some(rest) = src.strip_prefix("../../") {
        format!("{}/en-us/{}", site_root, rest)
    } else if src.starts_with('/') {
        format!("{}{}", site_root, src)
    } else if src.starts_with("http") {
        src.to_string()
    } else {
        unit_url
            .join(src)
            .map(|u| u.to_string())
            .unwrap_or_else(|_| src.to_string())
    }
}

/// Basename of a resolved image URL, query string stripped
pub fn image_basename(url: &str) -> String {
    let name = url.rsplit('/').next().unwrap_or(url);
    name.split('?').next().unwrap_or(name).to_string()
}

/// Classifies an image from its filename, falling back to alt text
///
/// The filename (lower-cased) is checked against the category table first;
/// alt text is consulted only when the filename matches nothing. No match
/// at all means [`ImageType::Illustration`].
pub fn classify_image(filename: &str, alt: &str) -> ImageType {
    let filename_lower = filename.to_lowercase();
    for (image_type, patterns) in FILENAME_PATTERNS {
        if patterns.iter().any(|p| filename_lower.contains(p)) {
            return *image_type;
        }
    }

    let alt_lower = alt.to_lowercase();
    for (image_type, patterns) in ALT_PATTERNS {
        if patterns.iter().any(|p| alt_lower.contains(p)) {
            return *image_type;
        }
    }

    ImageType::Illustration
}

/// Captures the context around an image: nearest preceding heading, the
/// enclosing figure's caption, and the next paragraph's text
fn capture_context(elements: &[ElementRef<'_>], idx: usize, img: ElementRef<'_>) -> ImageContext {
    let preceding_heading = elements[..idx]
        .iter()
        .rev()
        .find(|el| super::content::heading_level(el.value().name()).is_some())
        .map(|el| element_text(*el))
        .unwrap_or_default();

    let figure_caption = enclosing_figure_caption(img).unwrap_or_default();

    let following_text = elements[idx + 1..]
        .iter()
        .find(|el| el.value().name() == "p")
        .map(|el| element_text(*el))
        .filter(|text| text.chars().count() > MIN_CONTEXT_LEN)
        .map(|text| text.chars().take(MAX_CONTEXT_LEN).collect())
        .unwrap_or_default();

    ImageContext {
        preceding_heading,
        figure_caption,
        following_text,
    }
}

/// Caption text when the image sits inside a `<figure>` with a `<figcaption>`
fn enclosing_figure_caption(img: ElementRef<'_>) -> Option<String> {
    let figure = img
        .ancestors()
        .filter_map(ElementRef::wrap)
        .find(|el| el.value().name() == "figure")?;

    let caption_sel = Selector::parse("figcaption").ok()?;
    figure
        .select(&caption_sel)
        .next()
        .map(|el| element_text(el))
}
