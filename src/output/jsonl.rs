//! Flattened training-record stream
//!
//! One self-contained JSON record per line for every unit that carries
//! non-empty content, in tree traversal order. Each record repeats its
//! ancestry titles so consumers never need the nested tree shape.

use crate::model::{CourseTree, Heading, ImageRecord};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::Path;
use tracing::info;

/// A single flattened training record
///
/// `scraped_at` is the content block's extraction timestamp, not the
/// serialization time — reused content keeps its original stamp, which is
/// what makes a fully resumed rerun byte-identical.
#[derive(Debug, Serialize)]
pub struct TrainingRecord<'a> {
    pub course_title: &'a str,
    pub learning_path: &'a str,
    pub module_title: &'a str,
    pub unit_title: &'a str,
    pub unit_url: &'a str,
    pub content: &'a str,
    pub headings: &'a [Heading],
    pub code_blocks: &'a [String],
    pub images: &'a [ImageRecord],
    pub scraped_at: DateTime<Utc>,
}

/// Renders the training records as newline-delimited JSON
pub fn render_training_records(tree: &CourseTree) -> crate::Result<String> {
    let mut out = String::new();

    for path in &tree.learning_paths {
        for module in &path.modules {
            for unit in &module.units {
                let block = match unit.content.as_ref() {
                    Some(block) if !block.is_empty() => block,
                    _ => continue,
                };

                let record = TrainingRecord {
                    course_title: &tree.title,
                    learning_path: &path.title,
                    module_title: &module.title,
                    unit_title: &unit.title,
                    unit_url: &unit.url,
                    content: &block.text,
                    headings: &block.headings,
                    code_blocks: &block.code_blocks,
                    images: &block.images,
                    scraped_at: block.extracted_at,
                };

                out.push_str(&serde_json::to_string(&record)?);
                out.push('\n');
            }
        }
    }

    Ok(out)
}

/// Writes the training records to `path`
pub fn write_training_jsonl(tree: &CourseTree, path: &Path) -> crate::Result<()> {
    let rendered = render_training_records(tree)?;
    std::fs::write(path, &rendered)?;

    info!(
        "Wrote {} training records to {}",
        rendered.lines().count(),
        path.display()
    );
    Ok(())
}
