//! Unit ordering heuristics
//!
//! Units are discovered from anchor soup with no reliable document order, so
//! each one is assigned an integer sort key from URL/title numeric hints with
//! a keyword fallback. This is a heuristic, not a guarantee: two units can
//! legitimately tie at the undifferentiated middle value.

use once_cell::sync::Lazy;
use regex::Regex;

/// Sort key for units with no numeric or keyword hint
pub const DEFAULT_ORDER: u32 = 500;

/// Keyword fallback table, checked in order against the lower-cased title
const TITLE_ORDER_TABLE: &[(&str, u32)] = &[
    ("introduction", 1),
    ("summary", 999),
    ("assessment", 998),
    ("knowledge-check", 998),
    ("exercise", 900),
];

static URL_NUMBER_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"/(\d+)-").unwrap());
static TITLE_NUMBER_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(\d+)[.\s]").unwrap());

/// Assigns a deterministic sort key to a unit
///
/// Precedence, first match wins:
/// 1. A `/<digits>-` segment in the URL
/// 2. A leading `<digits>` token (followed by `.` or whitespace) in the title
/// 3. The keyword fallback table over the lower-cased title
/// 4. [`DEFAULT_ORDER`]
pub fn order_key(url: &str, title: &str) -> u32 {
    if let Some(n) = captured_number(&URL_NUMBER_RE, url) {
        return n;
    }

    if let Some(n) = captured_number(&TITLE_NUMBER_RE, title) {
        return n;
    }

    // Whitespace is normalized to hyphens so "Knowledge check" still hits
    // the knowledge-check entry
    let title_lower = title.to_lowercase().replace(char::is_whitespace, "-");
    for (keyword, order) in TITLE_ORDER_TABLE {
        if title_lower.contains(keyword) {
            return *order;
        }
    }

    DEFAULT_ORDER
}

/// First capture group of `re` in `text`, parsed as u32 (overflow ⇒ no match)
fn captured_number(re: &Regex, text: &str) -> Option<u32> {
    re.captures(text)?.get(1)?.as_str().parse().ok()
}
