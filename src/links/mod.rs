//! Link classification and unit ordering
//!
//! This module decides what a discovered anchor refers to:
//! - Learning path references (via the structured `data-learn-uid` attribute)
//! - Module references (href keyword plus relative-form rewriting)
//! - Unit references (href keyword or numbered path segment)
//!
//! and assigns the heuristic sort key used to order units within a module.

pub mod classify;
pub mod ordering;

pub use classify::{classify_module_link, classify_path_link, classify_unit_link};
pub use classify::{ModuleRef, PathRef, UnitRef};
pub use ordering::order_key;
