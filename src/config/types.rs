use serde::Deserialize;

/// Browser-like user agent the harvester identifies as by default
const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Main configuration structure for Learn-Harvest
///
/// Every field is defaulted, so an absent or empty config file yields a
/// working configuration; CLI flags override file values.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ScrapeConfig {
    pub crawler: CrawlerConfig,
    pub limits: LimitsConfig,
    pub output: OutputConfig,
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        Self {
            crawler: CrawlerConfig::default(),
            limits: LimitsConfig::default(),
            output: OutputConfig::default(),
        }
    }
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct CrawlerConfig {
    /// Root of the site the course lives on; canonical path and module URLs
    /// are rebuilt under it
    pub site_root: String,

    /// User agent string sent with every request
    pub user_agent: String,

    /// Minimum spacing between consecutive fetches (milliseconds)
    pub delay_ms: u64,

    /// Per-request timeout (seconds)
    pub timeout_secs: u64,

    /// Whether unit content is fetched and extracted (structure only when off)
    pub extract_content: bool,

    /// Whether previously harvested content is reused
    pub resume: bool,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            site_root: "https://learn.microsoft.com".to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            delay_ms: 500,
            timeout_secs: 30,
            extract_content: true,
            resume: true,
        }
    }
}

/// Traversal limits; `None` means unlimited
///
/// Limits truncate the discovered sequence at each rank, they do not stop
/// discovery early.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct LimitsConfig {
    pub max_paths: Option<usize>,
    pub max_modules_per_path: Option<usize>,
    pub max_units_per_module: Option<usize>,
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory the tree, training, and summary artifacts are written to
    pub directory: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: "output".to_string(),
        }
    }
}
