//! Run summary and persisted-tree serialization

use crate::config::ScrapeConfig;
use crate::model::CourseTree;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::Path;
use tracing::info;

/// Summary of one harvest run
#[derive(Debug, Serialize)]
pub struct RunSummary {
    pub course_title: String,
    pub course_url: String,
    pub scraped_at: DateTime<Utc>,
    pub learning_paths_count: usize,
    pub total_modules: usize,
    pub total_units: usize,
    pub content_extracted: bool,
    pub limits_applied: LimitsApplied,
    pub files_created: Vec<String>,
}

/// The traversal limits that were in effect for the run
#[derive(Debug, Serialize)]
pub struct LimitsApplied {
    pub max_paths: Option<usize>,
    pub max_modules_per_path: Option<usize>,
    pub max_units_per_module: Option<usize>,
}

impl RunSummary {
    /// Builds the summary from the finished tree and run metadata
    pub fn new(
        tree: &CourseTree,
        started_at: DateTime<Utc>,
        config: &ScrapeConfig,
        files_created: Vec<String>,
    ) -> Self {
        let total_modules = tree
            .learning_paths
            .iter()
            .map(|path| path.modules.len())
            .sum();
        let total_units = tree
            .learning_paths
            .iter()
            .flat_map(|path| &path.modules)
            .map(|module| module.units.len())
            .sum();

        Self {
            course_title: tree.title.clone(),
            course_url: tree.url.clone(),
            scraped_at: started_at,
            learning_paths_count: tree.learning_paths.len(),
            total_modules,
            total_units,
            content_extracted: config.crawler.extract_content,
            limits_applied: LimitsApplied {
                max_paths: config.limits.max_paths,
                max_modules_per_path: config.limits.max_modules_per_path,
                max_units_per_module: config.limits.max_units_per_module,
            },
            files_created,
        }
    }
}

/// Writes the run summary as pretty-printed JSON
pub fn write_summary(summary: &RunSummary, path: &Path) -> crate::Result<()> {
    std::fs::write(path, serde_json::to_string_pretty(summary)?)?;
    info!("Wrote run summary to {}", path.display());
    Ok(())
}

/// Persists the complete tree as pretty-printed JSON
///
/// This artifact is the next run's resume input; the caller guarantees an
/// empty tree never reaches this point (an empty tree must not overwrite a
/// good prior one).
pub fn write_complete_tree(tree: &CourseTree, path: &Path) -> crate::Result<()> {
    std::fs::write(path, serde_json::to_string_pretty(tree)?)?;
    info!("Wrote course tree to {}", path.display());
    Ok(())
}
