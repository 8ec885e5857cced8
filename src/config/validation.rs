use crate::config::types::ScrapeConfig;
use crate::ConfigError;
use tracing::warn;
use url::Url;

/// Validates the configuration
///
/// Structural problems (unusable site root, empty user agent) are errors;
/// out-of-range traversal selections are not — they fall back to safe
/// defaults via [`normalize`].
pub fn validate(config: &ScrapeConfig) -> Result<(), ConfigError> {
    let site_root = Url::parse(&config.crawler.site_root)
        .map_err(|e| ConfigError::Validation(format!("invalid site-root: {}", e)))?;

    if site_root.scheme() != "http" && site_root.scheme() != "https" {
        return Err(ConfigError::Validation(format!(
            "site-root must be an HTTP(S) URL, got scheme '{}'",
            site_root.scheme()
        )));
    }

    if config.crawler.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user-agent cannot be empty".to_string(),
        ));
    }

    if config.output.directory.trim().is_empty() {
        return Err(ConfigError::Validation(
            "output directory cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Normalizes selections to safe values
///
/// A zero limit cannot mean anything useful (the run would do nothing), so
/// it degrades to unlimited with a warning. A zero timeout degrades to the
/// default. The site root is trimmed of its trailing slash so URL rebuilding
/// can concatenate paths uniformly.
pub fn normalize(config: &mut ScrapeConfig) {
    while config.crawler.site_root.ends_with('/') {
        config.crawler.site_root.pop();
    }

    for (name, limit) in [
        ("max-paths", &mut config.limits.max_paths),
        ("max-modules-per-path", &mut config.limits.max_modules_per_path),
        ("max-units-per-module", &mut config.limits.max_units_per_module),
    ] {
        if *limit == Some(0) {
            warn!("{} = 0 is not a usable selection; treating as unlimited", name);
            *limit = None;
        }
    }

    if config.crawler.timeout_secs == 0 {
        warn!("timeout-secs = 0 is not usable; falling back to 30");
        config.crawler.timeout_secs = 30;
    }
}
