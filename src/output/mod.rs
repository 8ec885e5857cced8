//! Output module: artifact naming and serialization
//!
//! Consumers never see the nested tree directly; everything leaves through
//! this module as one of three artifacts derived from the course slug:
//! - `{slug}_complete.json` — the persisted tree (next run's resume input)
//! - `{slug}_training.jsonl` — flattened per-unit training records
//! - `{slug}_summary.json` — the run summary

mod jsonl;
mod summary;

pub use jsonl::{render_training_records, write_training_jsonl, TrainingRecord};
pub use summary::{write_complete_tree, write_summary, LimitsApplied, RunSummary};

use once_cell::sync::Lazy;
use regex::Regex;
use std::path::{Path, PathBuf};

static NON_SLUG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^\w\s-]").unwrap());
static SEPARATOR_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[-\s]+").unwrap());

/// Derives the filesystem slug for a course title
///
/// Characters outside word/whitespace/hyphen are dropped, runs of
/// whitespace and hyphens collapse to a single hyphen, and the result is
/// lower-cased. An empty result (or empty title) becomes `unknown-course`.
pub fn course_slug(title: &str) -> String {
    let cleaned = NON_SLUG_RE.replace_all(title, "");
    let slug = SEPARATOR_RE
        .replace_all(cleaned.trim(), "-")
        .to_lowercase();

    if slug.is_empty() {
        "unknown-course".to_string()
    } else {
        slug
    }
}

/// Path of the persisted tree artifact
pub fn tree_path(output_dir: &Path, slug: &str) -> PathBuf {
    output_dir.join(format!("{}_complete.json", slug))
}

/// Path of the training records artifact
pub fn training_path(output_dir: &Path, slug: &str) -> PathBuf {
    output_dir.join(format!("{}_training.jsonl", slug))
}

/// Path of the run summary artifact
pub fn summary_path(output_dir: &Path, slug: &str) -> PathBuf {
    output_dir.join(format!("{}_summary.json", slug))
}
