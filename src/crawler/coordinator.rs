//! Crawl coordination - the four-rank traversal
//!
//! The crawl walks Course → Paths → Modules → Units depth-first on a single
//! execution path, applying per-rank traversal limits by truncating the
//! discovered sequences and patching units with previously harvested content
//! where the resume engine finds a match.
//!
//! Failure policy per rank:
//! - Course: a fetch failure (or a page with no path links) aborts the run
//! - Path / Module: the subtree is skipped (logged) and siblings continue;
//!   the failed entity does not appear in the output tree
//! - Unit: the unit is kept with an empty content block

use crate::config::ScrapeConfig;
use crate::crawler::fetcher::{FetchOutcome, Fetcher};
use crate::crawler::pacer::Pacer;
use crate::crawler::parser::{parse_course_page, parse_module_page, parse_path_page};
use crate::extract::ContentExtractor;
use crate::links::{ModuleRef, PathRef};
use crate::model::{ContentBlock, CourseTree, LearningPath, Module, Unit};
use crate::resume::find_reusable_content;
use crate::{HarvestError, Result};
use std::time::Duration;
use tracing::{debug, info, warn};
use url::Url;

/// The course rank's discovery result: everything needed to decide resume
/// identity before the deeper ranks are crawled
#[derive(Debug, Clone)]
pub struct CourseDiscovery {
    pub url: String,
    pub title: String,
    pub paths: Vec<PathRef>,
}

/// Drives the four-rank crawl over an injected fetcher
pub struct Crawler<F: Fetcher> {
    fetcher: F,
    config: ScrapeConfig,
    pacer: Pacer,
    extractor: ContentExtractor,
}

impl<F: Fetcher> Crawler<F> {
    pub fn new(fetcher: F, config: ScrapeConfig) -> Self {
        let pacer = Pacer::new(Duration::from_millis(config.crawler.delay_ms));
        let extractor = ContentExtractor::new(config.crawler.site_root.clone());

        Self {
            fetcher,
            config,
            pacer,
            extractor,
        }
    }

    /// Fetches and parses the course overview page
    ///
    /// # Returns
    ///
    /// * `Ok(CourseDiscovery)` - Course title and learning path references
    /// * `Err(HarvestError::NoData)` - Fetch failed or no paths were found;
    ///   the run has nothing to do and must not touch prior artifacts
    pub async fn discover(&mut self, course_url: &str) -> Result<CourseDiscovery> {
        info!("Starting course discovery: {}", course_url);

        let html = self
            .fetch_page(course_url)
            .await
            .ok_or_else(|| HarvestError::NoData {
                url: course_url.to_string(),
            })?;

        let page = parse_course_page(&html, &self.config.crawler.site_root);
        if page.paths.is_empty() {
            warn!("No learning paths found on {}", course_url);
            return Err(HarvestError::NoData {
                url: course_url.to_string(),
            });
        }

        info!("Found {} learning paths", page.paths.len());
        Ok(CourseDiscovery {
            url: course_url.to_string(),
            title: page.title,
            paths: page.paths,
        })
    }

    /// Crawls the remaining ranks and assembles the course tree
    ///
    /// The tree is built fresh from crawl results; `prior` is only read, to
    /// patch units with reusable content.
    pub async fn build_tree(
        &mut self,
        discovery: CourseDiscovery,
        prior: Option<&CourseTree>,
    ) -> CourseTree {
        let mut path_refs = discovery.paths;
        if let Some(max) = self.config.limits.max_paths {
            path_refs.truncate(max);
        }

        let mut learning_paths = Vec::new();
        for (idx, path_ref) in path_refs.into_iter().enumerate() {
            info!("Learning path {}: {}", idx + 1, path_ref.title);
            if let Some(path) = self.crawl_path(path_ref, prior).await {
                learning_paths.push(path);
            }
        }

        CourseTree {
            url: discovery.url,
            title: discovery.title,
            learning_paths,
        }
    }

    /// Crawls one learning path; `None` means the subtree is skipped
    async fn crawl_path(
        &mut self,
        path_ref: PathRef,
        prior: Option<&CourseTree>,
    ) -> Option<LearningPath> {
        let Some(html) = self.fetch_page(&path_ref.url).await else {
            warn!("Skipping learning path '{}': fetch failed", path_ref.title);
            return None;
        };

        let base = match Url::parse(&path_ref.url) {
            Ok(base) => base,
            Err(e) => {
                warn!("Skipping learning path '{}': bad URL: {}", path_ref.title, e);
                return None;
            }
        };

        let page = parse_path_page(&html, &base, &self.config.crawler.site_root);

        // The slug-generated title is a placeholder; the page's own title
        // replaces it when present
        let title = if page.title.is_empty() {
            path_ref.title
        } else {
            page.title
        };

        let mut module_refs = page.modules;
        if let Some(max) = self.config.limits.max_modules_per_path {
            module_refs.truncate(max);
        }

        let mut modules = Vec::new();
        for module_ref in module_refs {
            info!("  Module: {}", module_ref.title);
            if let Some(module) = self.crawl_module(module_ref, &title, prior).await {
                modules.push(module);
            }
        }

        Some(LearningPath {
            title,
            url: path_ref.url,
            learn_uid: path_ref.learn_uid,
            modules,
        })
    }

    /// Crawls one module; `None` means the subtree is skipped
    async fn crawl_module(
        &mut self,
        module_ref: ModuleRef,
        path_title: &str,
        prior: Option<&CourseTree>,
    ) -> Option<Module> {
        let Some(html) = self.fetch_page(&module_ref.url).await else {
            warn!("Skipping module '{}': fetch failed", module_ref.title);
            return None;
        };

        let base = match Url::parse(&module_ref.url) {
            Ok(base) => base,
            Err(e) => {
                warn!("Skipping module '{}': bad URL: {}", module_ref.title, e);
                return None;
            }
        };

        let page = parse_module_page(&html, &base);
        let title = if page.title.is_empty() {
            module_ref.title
        } else {
            page.title
        };

        let mut units = page.units;
        if let Some(max) = self.config.limits.max_units_per_module {
            units.truncate(max);
        }

        if self.config.crawler.extract_content {
            for unit in &mut units {
                info!("    Unit: {}", unit.title);
                self.populate_unit(unit, path_title, &title, prior).await;
            }
        }

        Some(Module {
            title,
            url: module_ref.url,
            description: page.description,
            learning_objectives: page.learning_objectives,
            prerequisites: page.prerequisites,
            units,
        })
    }

    /// Fills one unit's content: reuse from the prior tree when the resume
    /// engine finds a non-empty match, otherwise fetch and extract
    async fn populate_unit(
        &mut self,
        unit: &mut Unit,
        path_title: &str,
        module_title: &str,
        prior: Option<&CourseTree>,
    ) {
        if let Some(prior_tree) = prior {
            if let Some(block) =
                find_reusable_content(prior_tree, path_title, module_title, &unit.title)
            {
                debug!("Reusing harvested content for '{}'", unit.title);
                unit.content = Some(block.clone());
                return;
            }
        }

        match self.fetch_page(&unit.url).await {
            Some(html) => match Url::parse(&unit.url) {
                Ok(unit_url) => {
                    unit.content = Some(self.extractor.extract_unit(&html, &unit_url));
                }
                Err(e) => {
                    warn!("Bad unit URL '{}': {}", unit.url, e);
                    unit.content = Some(ContentBlock::empty());
                }
            },
            None => {
                warn!("Fetch failed for unit '{}': recording empty content", unit.title);
                unit.content = Some(ContentBlock::empty());
            }
        }
    }

    /// Fetches one page, honoring the politeness delay; any failure is
    /// logged and mapped to `None` so each rank applies its own policy
    async fn fetch_page(&mut self, url: &str) -> Option<String> {
        self.pacer.pause().await;
        debug!("Fetching: {}", url);

        match self.fetcher.fetch(url).await {
            FetchOutcome::Success { body, .. } => Some(body),
            FetchOutcome::HttpError { status_code } => {
                warn!("HTTP {} for {}", status_code, url);
                None
            }
            FetchOutcome::NetworkError { error } => {
                warn!("Error fetching {}: {}", url, error);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// Fetcher serving canned bodies from a map, recording every request
    struct StubFetcher {
        pages: HashMap<String, String>,
        requests: Mutex<Vec<String>>,
    }

    impl StubFetcher {
        fn new(pages: Vec<(&str, String)>) -> Self {
            Self {
                pages: pages
                    .into_iter()
                    .map(|(url, body)| (url.to_string(), body))
                    .collect(),
                requests: Mutex::new(Vec::new()),
            }
        }

        fn requested(&self, url: &str) -> bool {
            self.requests.lock().unwrap().iter().any(|r| r == url)
        }
    }

    #[async_trait]
    impl Fetcher for StubFetcher {
        async fn fetch(&self, url: &str) -> FetchOutcome {
            self.requests.lock().unwrap().push(url.to_string());
            match self.pages.get(url) {
                Some(body) => FetchOutcome::Success {
                    body: body.clone(),
                    status_code: 200,
                },
                None => FetchOutcome::HttpError { status_code: 404 },
            }
        }
    }

    const ROOT: &str = "https://learn.example.com";

    fn fast_config() -> ScrapeConfig {
        let mut config = ScrapeConfig::default();
        config.crawler.site_root = ROOT.to_string();
        config.crawler.delay_ms = 0;
        config
    }

    fn course_html() -> String {
        r#"<html><body><h1>Test Course</h1>
            <article data-learn-uid="learn.wwl.path-one"></article>
        </body></html>"#
            .to_string()
    }

    fn path_html() -> String {
        r#"<html><body><h1>Path One</h1>
            <a href="../../modules/mod-a/">Module A</a>
        </body></html>"#
            .to_string()
    }

    fn module_html() -> String {
        r#"<html><body><h1>Module A</h1>
            <a href="1-introduction/">Introduction</a>
        </body></html>"#
            .to_string()
    }

    fn unit_html() -> String {
        r#"<html><body><main><h1>Introduction</h1><p>Unit body text</p></main></body></html>"#
            .to_string()
    }

    fn full_site() -> StubFetcher {
        StubFetcher::new(vec![
            ("https://learn.example.com/course", course_html()),
            (
                "https://learn.example.com/en-us/training/paths/path-one/",
                path_html(),
            ),
            (
                "https://learn.example.com/en-us/training/modules/mod-a/",
                module_html(),
            ),
            (
                "https://learn.example.com/en-us/training/modules/mod-a/1-introduction/",
                unit_html(),
            ),
        ])
    }

    #[tokio::test]
    async fn test_full_traversal() {
        let mut crawler = Crawler::new(full_site(), fast_config());

        let discovery = crawler.discover("https://learn.example.com/course").await.unwrap();
        assert_eq!(discovery.title, "Test Course");
        assert_eq!(discovery.paths.len(), 1);

        let tree = crawler.build_tree(discovery, None).await;
        assert_eq!(tree.learning_paths.len(), 1);
        assert_eq!(tree.learning_paths[0].title, "Path One");
        assert_eq!(tree.learning_paths[0].modules.len(), 1);

        let unit = &tree.learning_paths[0].modules[0].units[0];
        let content = unit.content.as_ref().expect("content extracted");
        assert!(content.text.contains("Unit body text"));
    }

    #[tokio::test]
    async fn test_course_fetch_failure_aborts() {
        let fetcher = StubFetcher::new(vec![]);
        let mut crawler = Crawler::new(fetcher, fast_config());

        let result = crawler.discover("https://learn.example.com/missing").await;
        assert!(matches!(result, Err(HarvestError::NoData { .. })));
    }

    #[tokio::test]
    async fn test_course_without_paths_is_no_data() {
        let fetcher = StubFetcher::new(vec![(
            "https://learn.example.com/course",
            "<html><body><h1>Course</h1></body></html>".to_string(),
        )]);
        let mut crawler = Crawler::new(fetcher, fast_config());

        let result = crawler.discover("https://learn.example.com/course").await;
        assert!(matches!(result, Err(HarvestError::NoData { .. })));
    }

    #[tokio::test]
    async fn test_failed_path_is_dropped_not_fatal() {
        // Course advertises two paths; only the second one resolves
        let course = r#"<html><body><h1>Course</h1>
            <article data-learn-uid="learn.wwl.broken-path"></article>
            <article data-learn-uid="learn.wwl.path-one"></article>
        </body></html>"#
            .to_string();
        let fetcher = StubFetcher::new(vec![
            ("https://learn.example.com/course", course),
            (
                "https://learn.example.com/en-us/training/paths/path-one/",
                path_html(),
            ),
            (
                "https://learn.example.com/en-us/training/modules/mod-a/",
                module_html(),
            ),
            (
                "https://learn.example.com/en-us/training/modules/mod-a/1-introduction/",
                unit_html(),
            ),
        ]);
        let mut crawler = Crawler::new(fetcher, fast_config());

        let discovery = crawler.discover("https://learn.example.com/course").await.unwrap();
        let tree = crawler.build_tree(discovery, None).await;

        assert_eq!(tree.learning_paths.len(), 1);
        assert_eq!(tree.learning_paths[0].title, "Path One");
    }

    #[tokio::test]
    async fn test_failed_unit_gets_empty_content() {
        let module = r#"<html><body><h1>Module A</h1>
            <a href="1-introduction/">Introduction</a>
            <a href="2-missing/">Missing unit</a>
        </body></html>"#
            .to_string();
        let fetcher = StubFetcher::new(vec![
            ("https://learn.example.com/course", course_html()),
            (
                "https://learn.example.com/en-us/training/paths/path-one/",
                path_html(),
            ),
            ("https://learn.example.com/en-us/training/modules/mod-a/", module),
            (
                "https://learn.example.com/en-us/training/modules/mod-a/1-introduction/",
                unit_html(),
            ),
        ]);
        let mut crawler = Crawler::new(fetcher, fast_config());

        let discovery = crawler.discover("https://learn.example.com/course").await.unwrap();
        let tree = crawler.build_tree(discovery, None).await;

        let units = &tree.learning_paths[0].modules[0].units;
        assert_eq!(units.len(), 2);
        assert!(!units[0].content.as_ref().unwrap().is_empty());
        assert!(units[1].content.as_ref().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_reused_content_skips_fetch() {
        let mut block = ContentBlock::empty();
        block.text = "Previously harvested".to_string();

        let prior = CourseTree {
            url: "https://learn.example.com/course".to_string(),
            title: "Test Course".to_string(),
            learning_paths: vec![LearningPath {
                title: "Path One".to_string(),
                url: "https://learn.example.com/en-us/training/paths/path-one/".to_string(),
                learn_uid: "learn.wwl.path-one".to_string(),
                modules: vec![Module {
                    title: "Module A".to_string(),
                    url: "https://learn.example.com/en-us/training/modules/mod-a/".to_string(),
                    description: String::new(),
                    learning_objectives: vec![],
                    prerequisites: vec![],
                    units: vec![Unit {
                        order_key: 1,
                        title: "Introduction".to_string(),
                        url: "https://learn.example.com/en-us/training/modules/mod-a/1-introduction/"
                            .to_string(),
                        href: "1-introduction/".to_string(),
                        content: Some(block),
                    }],
                }],
            }],
        };

        let fetcher = full_site();
        let unit_url = "https://learn.example.com/en-us/training/modules/mod-a/1-introduction/";
        let mut crawler = Crawler::new(fetcher, fast_config());

        let discovery = crawler.discover("https://learn.example.com/course").await.unwrap();
        let tree = crawler.build_tree(discovery, Some(&prior)).await;

        let unit = &tree.learning_paths[0].modules[0].units[0];
        assert_eq!(unit.content.as_ref().unwrap().text, "Previously harvested");
        assert!(!crawler.fetcher.requested(unit_url));
    }

    #[tokio::test]
    async fn test_content_toggle_off_leaves_units_bare() {
        let mut config = fast_config();
        config.crawler.extract_content = false;
        let fetcher = full_site();
        let unit_url = "https://learn.example.com/en-us/training/modules/mod-a/1-introduction/";
        let mut crawler = Crawler::new(fetcher, config);

        let discovery = crawler.discover("https://learn.example.com/course").await.unwrap();
        let tree = crawler.build_tree(discovery, None).await;

        let unit = &tree.learning_paths[0].modules[0].units[0];
        assert!(unit.content.is_none());
        assert!(!crawler.fetcher.requested(unit_url));
    }

    #[tokio::test]
    async fn test_unit_limit_truncates() {
        let module = r#"<html><body><h1>Module A</h1>
            <a href="1-introduction/">Introduction</a>
            <a href="2-second/">Second</a>
            <a href="3-third/">Third</a>
        </body></html>"#
            .to_string();
        let fetcher = StubFetcher::new(vec![
            ("https://learn.example.com/course", course_html()),
            (
                "https://learn.example.com/en-us/training/paths/path-one/",
                path_html(),
            ),
            ("https://learn.example.com/en-us/training/modules/mod-a/", module),
        ]);

        let mut config = fast_config();
        config.crawler.extract_content = false;
        config.limits.max_units_per_module = Some(2);
        let mut crawler = Crawler::new(fetcher, config);

        let discovery = crawler.discover("https://learn.example.com/course").await.unwrap();
        let tree = crawler.build_tree(discovery, None).await;

        let units = &tree.learning_paths[0].modules[0].units;
        assert_eq!(units.len(), 2);
        assert_eq!(units[0].title, "Introduction");
        assert_eq!(units[1].title, "Second");
    }
}
