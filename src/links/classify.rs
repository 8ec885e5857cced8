//! Anchor classification for the three discovery ranks
//!
//! All classifiers are total functions over noisy markup: absence of a match
//! yields `None`, never an error, so callers compose them without
//! error-based control flow.

use url::Url;

/// Namespace prefix a path identifier attribute must carry
const PATH_UID_PREFIX: &str = "learn.";

/// Keyword that marks an anchor as a module link
const MODULE_KEYWORD: &str = "modules";

/// Href keywords that mark an anchor as a unit link
const UNIT_KEYWORDS: &[&str] = &["introduction", "summary", "assessment", "exercise"];

/// A discovered learning path reference
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathRef {
    /// Title generated from the uid slug (hyphen-split, title-cased);
    /// replaced by the path page's real title once that page is fetched
    pub title: String,

    /// Canonical path URL rebuilt from the uid slug
    pub url: String,

    /// The raw identifier attribute value
    pub learn_uid: String,
}

/// A discovered module reference
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleRef {
    pub title: String,
    pub url: String,
}

/// A discovered unit reference (order key assigned later)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnitRef {
    pub title: String,
    pub url: String,
    pub href: String,
}

/// Classifies a structured identifier attribute as a learning path reference
///
/// Path links are recognized only through the dot-delimited identifier
/// attribute (`data-learn-uid="learn.wwl.explore-workspace"`). The final dot
/// segment is the slug used to rebuild the canonical path URL under
/// `site_root`. There is no href fallback: anchors without the attribute are
/// ignored.
///
/// # Example
///
/// ```
/// use learn_harvest::links::classify_path_link;
///
/// let p = classify_path_link("learn.wwl.explore-workspace", "https://learn.microsoft.com").unwrap();
/// assert_eq!(p.url, "https://learn.microsoft.com/en-us/training/paths/explore-workspace/");
/// assert_eq!(p.title, "Explore Workspace");
/// ```
pub fn classify_path_link(uid: &str, site_root: &str) -> Option<PathRef> {
    if !uid.starts_with(PATH_UID_PREFIX) {
        return None;
    }

    let slug = uid.rsplit('.').next()?;
    if slug.is_empty() {
        return None;
    }

    Some(PathRef {
        title: title_from_slug(slug),
        url: format!("{}/en-us/training/paths/{}/", site_root, slug),
        learn_uid: uid.to_string(),
    })
}

/// Classifies an anchor as a module reference
///
/// Module links are recognized by substring containment of `modules` in the
/// href. Relative forms are normalized:
/// - `../../modules/…`      → `{site_root}/en-us/training/modules/…`
/// - `/modules/…`           → `{site_root}/en-us/training/modules/…`
/// - `/training/modules/…`  → `{site_root}/training/modules/…`
/// - anything else          → resolved against the current page URL
///
/// Resolved URLs always end with a trailing `/`. The visible text becomes
/// the module title, so anchors with empty text are dropped. Deduplication
/// by resolved URL is the page parser's job.
pub fn classify_module_link(href: &str, text: &str, base: &Url, site_root: &str) -> Option<ModuleRef> {
    if !href.contains(MODULE_KEYWORD) {
        return None;
    }

    let title = text.trim();
    if title.is_empty() {
        return None;
    }

    let mut url = if let Some(rest) = href.strip_prefix("../../modules/") {
        format!("{}/en-us/training/modules/{}", site_root, rest)
    } else if href.starts_with("/modules/") {
        format!("{}/en-us/training{}", site_root, href)
    } else if href.starts_with("/training/modules/") {
        format!("{}{}", site_root, href)
    } else {
        base.join(href).ok()?.to_string()
    };

    if !url.ends_with('/') {
        url.push('/');
    }

    Some(ModuleRef {
        title: title.to_string(),
        url,
    })
}

/// Classifies an anchor as a unit reference
///
/// A unit link is recognized when either:
/// - the href contains one of the unit keywords (introduction, summary,
///   assessment, exercise), or
/// - the href's last path segment starts with `<1..19>-` (numbered units).
///
/// The href is resolved against the module URL. Deduplication by resolved
/// URL happens in the page parser, before the ordering pass.
pub fn classify_unit_link(href: &str, text: &str, base: &Url) -> Option<UnitRef> {
    if href.is_empty() {
        return None;
    }

    let keyword_match = UNIT_KEYWORDS.iter().any(|kw| href.contains(kw));
    if !keyword_match && !has_numbered_segment(href) {
        return None;
    }

    let url = base.join(href).ok()?.to_string();

    Some(UnitRef {
        title: text.trim().to_string(),
        url,
        href: href.to_string(),
    })
}

/// Checks whether the href's last path segment starts with `<1..19>-`
fn has_numbered_segment(href: &str) -> bool {
    let last = href
        .trim_end_matches('/')
        .rsplit('/')
        .next()
        .unwrap_or_default();

    let digits: String = last.chars().take_while(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() || !last[digits.len()..].starts_with('-') {
        return false;
    }

    matches!(digits.parse::<u32>(), Ok(n) if (1..=19).contains(&n))
}

/// Generates a readable title from a hyphenated slug
fn title_from_slug(slug: &str) -> String {
    slug.split('-')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
