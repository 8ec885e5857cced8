use crate::config::types::ScrapeConfig;
use crate::config::validation::{normalize, validate};
use crate::ConfigError;
use std::path::Path;

/// Loads a configuration file from the given path
///
/// The file is TOML with every field optional; parsed values are normalized
/// (zero selections degrade to safe defaults) and then validated.
///
/// # Arguments
///
/// * `path` - Path to the TOML configuration file
///
/// # Returns
///
/// * `Ok(ScrapeConfig)` - Successfully loaded and validated configuration
/// * `Err(ConfigError)` - Failed to read, parse, or validate the file
pub fn load_config(path: &Path) -> Result<ScrapeConfig, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    let mut config: ScrapeConfig = toml::from_str(&content)?;

    normalize(&mut config);
    validate(&config)?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_temp_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_load_valid_config() {
        let config_content = r#"
[crawler]
site-root = "https://learn.microsoft.com/"
delay-ms = 250
extract-content = false

[limits]
max-paths = 2
max-modules-per-path = 5

[output]
directory = "./harvested"
"#;

        let file = create_temp_config(config_content);
        let config = load_config(file.path()).unwrap();

        assert_eq!(config.crawler.site_root, "https://learn.microsoft.com");
        assert_eq!(config.crawler.delay_ms, 250);
        assert!(!config.crawler.extract_content);
        assert_eq!(config.limits.max_paths, Some(2));
        assert_eq!(config.limits.max_units_per_module, None);
        assert_eq!(config.output.directory, "./harvested");
    }

    #[test]
    fn test_empty_file_yields_defaults() {
        let file = create_temp_config("");
        let config = load_config(file.path()).unwrap();

        assert_eq!(config.crawler.delay_ms, 500);
        assert!(config.crawler.extract_content);
        assert!(config.crawler.resume);
        assert_eq!(config.limits.max_paths, None);
    }

    #[test]
    fn test_load_config_with_invalid_path() {
        let result = load_config(Path::new("/nonexistent/harvest.toml"));
        assert!(result.is_err());
    }

    #[test]
    fn test_load_config_with_invalid_toml() {
        let file = create_temp_config("this is not valid TOML {{{");
        assert!(load_config(file.path()).is_err());
    }

    #[test]
    fn test_zero_limit_degrades_instead_of_failing() {
        let config_content = r#"
[limits]
max-paths = 0
"#;
        let file = create_temp_config(config_content);
        let config = load_config(file.path()).unwrap();
        assert_eq!(config.limits.max_paths, None);
    }

    #[test]
    fn test_load_config_with_validation_error() {
        let config_content = r#"
[crawler]
site-root = "ftp://example.com"
"#;
        let file = create_temp_config(config_content);
        let result = load_config(file.path());
        assert!(matches!(result, Err(crate::ConfigError::Validation(_))));
    }
}
