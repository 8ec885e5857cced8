//! Configuration module for Learn-Harvest
//!
//! Configuration comes from an optional TOML file (every field defaulted)
//! with CLI flags layered on top by the binary. Out-of-range traversal
//! selections degrade to safe defaults rather than failing the run.
//!
//! # Example
//!
//! ```no_run
//! use learn_harvest::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("harvest.toml")).unwrap();
//! println!("Politeness delay: {}ms", config.crawler.delay_ms);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{CrawlerConfig, LimitsConfig, OutputConfig, ScrapeConfig};

// Re-export parser and validation functions
pub use parser::load_config;
pub use validation::{normalize, validate};
