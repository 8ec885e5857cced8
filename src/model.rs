//! Data model for the harvested course tree
//!
//! The nested tree (course → learning paths → modules → units) is the working
//! representation during a crawl and the on-disk resume record. External
//! consumers only ever see the flattened JSONL stream produced by the
//! `output` module.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Root of a harvested course
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CourseTree {
    /// Source URL the crawl started from
    pub url: String,

    /// Course title from the course page's `<h1>` (empty if none was found)
    pub title: String,

    #[serde(default)]
    pub learning_paths: Vec<LearningPath>,
}

/// A learning path within a course
///
/// Merge identity is the title (case-sensitive exact match). The `learn_uid`
/// is the opaque identifier the path was discovered through; it is carried so
/// the canonical path URL can be reconstructed, but it plays no part in
/// merge matching.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LearningPath {
    pub title: String,
    pub url: String,
    pub learn_uid: String,

    #[serde(default)]
    pub modules: Vec<Module>,
}

/// A module within a learning path
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Module {
    pub title: String,
    pub url: String,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub learning_objectives: Vec<String>,

    #[serde(default)]
    pub prerequisites: Vec<String>,

    /// Units sorted ascending by order key (stable on ties)
    #[serde(default)]
    pub units: Vec<Unit>,
}

/// A unit within a module
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Unit {
    /// Sort key assigned by the ordering heuristics
    pub order_key: u32,

    pub title: String,
    pub url: String,

    /// The raw href the unit was discovered through
    pub href: String,

    /// Extracted content; `None` when extraction was disabled or not yet run
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<ContentBlock>,
}

/// Structured content extracted from a unit page
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentBlock {
    #[serde(default)]
    pub text: String,

    #[serde(default)]
    pub headings: Vec<Heading>,

    #[serde(default)]
    pub code_blocks: Vec<String>,

    #[serde(default)]
    pub images: Vec<ImageRecord>,

    #[serde(default)]
    pub links: Vec<LinkRecord>,

    /// When this content was extracted; carried through resume so that a
    /// fully reused run emits byte-identical training records
    pub extracted_at: DateTime<Utc>,
}

impl ContentBlock {
    /// Creates an empty block, stamped now (used for failed unit fetches)
    pub fn empty() -> Self {
        Self {
            text: String::new(),
            headings: Vec::new(),
            code_blocks: Vec::new(),
            images: Vec::new(),
            links: Vec::new(),
            extracted_at: Utc::now(),
        }
    }

    /// A block counts as extracted only when it carries text; empty blocks
    /// (failed or skipped fetches) are re-attempted on resume
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// A heading within unit content
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Heading {
    /// Heading level, 1 through 6
    pub level: u8,
    pub text: String,
}

/// An outbound link found in unit content (raw href, not resolved)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinkRecord {
    pub url: String,
    pub text: String,
}

/// Image metadata captured from a unit page (metadata only, no download)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageRecord {
    /// Original src attribute as it appeared in the page
    pub src: String,

    /// Src resolved to an absolute URL
    pub absolute_url: String,

    pub alt_text: String,
    pub title: String,

    /// Basename of the resolved URL with any query string stripped
    pub filename: String,

    pub image_type: ImageType,
    pub context: ImageContext,
}

/// Heuristic classification of an image
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImageType {
    Diagram,
    Screenshot,
    Chart,
    CodeExample,
    Icon,
    Illustration,
}

/// Surrounding context captured for an image
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ImageContext {
    /// Nearest heading preceding the image in document order
    #[serde(default)]
    pub preceding_heading: String,

    /// Caption text when the image sits inside a `<figure>`
    #[serde(default)]
    pub figure_caption: String,

    /// Next paragraph's text, capped at 200 characters
    #[serde(default)]
    pub following_text: String,
}
