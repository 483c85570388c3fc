use crate::config::types::{Config, CrawlerConfig, OutputConfig};
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
///
/// This runs before any network activity so that a misconfigured run fails
/// fast instead of producing an empty index.
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_crawler(&config.crawler)?;
    validate_output_config(&config.output)?;
    Ok(())
}

/// Validates the crawler section on its own, seeds included
pub fn validate_crawler(config: &CrawlerConfig) -> Result<(), ConfigError> {
    validate_limits(config)?;
    validate_start_urls(&config.start_urls)?;
    Ok(())
}

/// Validates crawler limits and identification, ignoring seeds
pub fn validate_limits(config: &CrawlerConfig) -> Result<(), ConfigError> {
    if config.max_pages < 1 {
        return Err(ConfigError::Validation(format!(
            "max_pages must be >= 1, got {}",
            config.max_pages
        )));
    }

    if config.retry_attempts < 1 {
        return Err(ConfigError::Validation(format!(
            "retry_attempts must be >= 1, got {}",
            config.retry_attempts
        )));
    }

    if config.timeout < 1 {
        return Err(ConfigError::Validation(
            "timeout must be >= 1ms".to_string(),
        ));
    }

    if config.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user_agent cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates seed URLs: at least one, each an http(s) URL with a host
pub fn validate_start_urls(seeds: &[String]) -> Result<(), ConfigError> {
    if seeds.is_empty() {
        return Err(ConfigError::Validation(
            "at least one start URL is required".to_string(),
        ));
    }

    for seed in seeds {
        let url = Url::parse(seed)
            .map_err(|e| ConfigError::InvalidUrl(format!("Invalid start URL '{}': {}", seed, e)))?;

        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(ConfigError::InvalidUrl(format!(
                "Start URL '{}' must use http or https",
                seed
            )));
        }

        if url.host_str().is_none() {
            return Err(ConfigError::InvalidUrl(format!(
                "Start URL '{}' has no host",
                seed
            )));
        }
    }

    Ok(())
}

fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.index_path.is_empty() {
        return Err(ConfigError::Validation(
            "index_path cannot be empty".to_string(),
        ));
    }

    Ok(())
}
