//! Crawler module for course traversal
//!
//! This module contains the crawl machinery:
//! - The fetcher capability and its reqwest-backed implementation
//! - Politeness pacing between fetches
//! - Page-level parsers for the course, path, and module ranks
//! - The coordinator driving the four-rank traversal

mod coordinator;
mod fetcher;
mod pacer;
pub mod parser;

pub use coordinator::{CourseDiscovery, Crawler};
pub use fetcher::{FetchOutcome, Fetcher, HttpFetcher};
pub use pacer::Pacer;
