use super::models::Config;
use std::collections::HashSet;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("site.docroot must not be empty")]
    EmptyDocroot,

    #[error("site.doctype must not be empty")]
    EmptyDoctype,

    #[error("Middleware '{name}' is enabled more than once")]
    DuplicateMiddleware { name: String },

    #[error("middleware.hidden_prefix must not contain '/': {prefix}")]
    InvalidHiddenPrefix { prefix: String },
}

/// Validate the entire configuration
pub fn validate(config: &Config) -> Result<(), ValidationError> {
    validate_site(config)?;
    validate_middleware(config)?;
    Ok(())
}

fn validate_site(config: &Config) -> Result<(), ValidationError> {
    if config.site.docroot.as_os_str().is_empty() {
        return Err(ValidationError::EmptyDocroot);
    }

    if config.site.doctype.trim().is_empty() {
        return Err(ValidationError::EmptyDoctype);
    }

    Ok(())
}

/// Unknown names are rejected later, when the site enables them against its
/// registry; here we only catch what is wrong regardless of the registry.
fn validate_middleware(config: &Config) -> Result<(), ValidationError> {
    let mut seen = HashSet::new();
    for name in &config.middleware.enabled {
        if !seen.insert(name.as_str()) {
            return Err(ValidationError::DuplicateMiddleware { name: name.clone() });
        }
    }

    if config.middleware.hidden_prefix.contains('/') {
        return Err(ValidationError::InvalidHiddenPrefix {
            prefix: config.middleware.hidden_prefix.clone(),
        });
    }

    Ok(())
}
