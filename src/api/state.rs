use std::sync::Arc;

use crate::config::Config;
use crate::site::{Site, SiteError};

#[derive(Clone)]
pub struct AppState {
    pub site: Arc<Site>,
}

impl AppState {
    pub fn new(config: Config) -> Result<Self, SiteError> {
        let site = Site::new(Arc::new(config))?;

        Ok(Self {
            site: Arc::new(site),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_owns_configured_site() {
        let mut config = Config::default();
        config.site.doctype = "text".to_string();

        let state = AppState::new(config).unwrap();
        assert_eq!(state.site.config().site.doctype, "text");
        assert_eq!(state.site.middleware().enabled(), vec!["hidden_paths", "access_log"]);
    }

    #[test]
    fn test_unknown_middleware_fails_state() {
        let mut config = Config::default();
        config.middleware.enabled.push("gzip".to_string());

        assert!(AppState::new(config).is_err());
    }
}
