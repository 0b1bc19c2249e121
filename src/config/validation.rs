use crate::config::types::CrawlConfig;
use crate::url::is_fetchable;
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &CrawlConfig) -> Result<(), ConfigError> {
    validate_start_url(&config.start_url)?;
    validate_run_id(&config.run_id)?;

    if config.workers < 1 {
        return Err(ConfigError::Validation(format!(
            "workers must be >= 1, got {}",
            config.workers
        )));
    }

    Ok(())
}

/// Validates the start URL: it must parse and use http or https
fn validate_start_url(start_url: &str) -> Result<(), ConfigError> {
    if start_url.trim().is_empty() {
        return Err(ConfigError::InvalidUrl("start URL cannot be empty".to_string()));
    }

    Url::parse(start_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("'{}': {}", start_url, e)))?;

    if !is_fetchable(start_url) {
        return Err(ConfigError::InvalidUrl(format!(
            "'{}' must use the http or https scheme",
            start_url
        )));
    }

    Ok(())
}

/// Validates the run identifier, which becomes a directory name
fn validate_run_id(run_id: &str) -> Result<(), ConfigError> {
    if run_id.is_empty() {
        return Err(ConfigError::Validation("run id cannot be empty".to_string()));
    }

    if run_id.contains(['/', '\\']) || run_id == "." || run_id == ".." {
        return Err(ConfigError::Validation(format!(
            "run id '{}' must be a single path component",
            run_id
        )));
    }

    Ok(())
}
