use std::sync::Arc;

use super::models::Config;

/// Per-request view of the configuration
///
/// Besides read access to [`Config`], it carries the name of the middleware
/// currently running so diagnostics further down can report it.
#[derive(Debug, Clone)]
pub struct RequestSettings {
    config: Arc<Config>,
    middleware: Option<String>,
}

impl RequestSettings {
    pub fn new(config: Arc<Config>) -> Self {
        Self {
            config,
            middleware: None,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Configured default view path (used for the root URL)
    pub fn view_path(&self) -> &str {
        &self.config.view.path
    }

    pub fn middleware(&self) -> Option<&str> {
        self.middleware.as_deref()
    }

    pub fn set_middleware(&mut self, name: &str) {
        self.middleware = Some(name.to_string());
    }

    pub fn reset(&mut self) {
        self.middleware = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_middleware_slot() {
        let mut cfg = RequestSettings::new(Arc::new(Config::default()));
        assert!(cfg.middleware().is_none());

        cfg.set_middleware("access_log");
        assert_eq!(cfg.middleware(), Some("access_log"));

        cfg.reset();
        assert!(cfg.middleware().is_none());
    }

    #[test]
    fn test_view_path() {
        let mut config = Config::default();
        config.view.path = "/welcome".to_string();

        let cfg = RequestSettings::new(Arc::new(config));
        assert_eq!(cfg.view_path(), "/welcome");
    }
}
