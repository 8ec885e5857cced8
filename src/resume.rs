//! Resume/merge engine
//!
//! A previous run's persisted tree is consulted so already-extracted units
//! are reused instead of re-fetched. Lookup identity is the exact
//! (path title, module title, unit title) triple — a title edit at any rank
//! starts that subtree fresh. The engine only ever reads the prior tree; the
//! fresh tree is patched by the crawler.

use crate::model::{ContentBlock, CourseTree};
use crate::output::{course_slug, tree_path};
use std::path::Path;
use tracing::{info, warn};

/// Loads the prior tree persisted for a course, if any
///
/// Resume is keyed on course identity: the slug derived from the current
/// run's course title selects the file. A missing, unreadable, or malformed
/// file degrades to `None` (logged, never fatal), so a corrupt record simply
/// means a full re-harvest.
pub fn load_prior_tree(output_dir: &Path, course_title: &str) -> Option<CourseTree> {
    let slug = course_slug(course_title);
    let path = tree_path(output_dir, &slug);

    let content = match std::fs::read_to_string(&path) {
        Ok(content) => content,
        Err(_) => return None,
    };

    match serde_json::from_str::<CourseTree>(&content) {
        Ok(tree) => {
            info!("Found existing data at {} - resuming", path.display());
            Some(tree)
        }
        Err(e) => {
            warn!(
                "Ignoring corrupt persisted tree at {}: {}",
                path.display(),
                e
            );
            None
        }
    }
}

/// Looks up reusable content for a unit in the prior tree
///
/// Three-level linear scan by exact title equality. A previously skipped or
/// failed unit (empty block) counts as not-yet-done and is re-attempted, so
/// only non-empty blocks are returned.
pub fn find_reusable_content<'a>(
    prior: &'a CourseTree,
    path_title: &str,
    module_title: &str,
    unit_title: &str,
) -> Option<&'a ContentBlock> {
    prior
        .learning_paths
        .iter()
        .find(|path| path.title == path_title)?
        .modules
        .iter()
        .find(|module| module.title == module_title)?
        .units
        .iter()
        .find(|unit| unit.title == unit_title)?
        .content
        .as_ref()
        .filter(|block| !block.is_empty())
}
