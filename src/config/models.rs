use serde::{Deserialize, Serialize};
use std::net::{Ipv4Addr, SocketAddr};
use std::path::PathBuf;

/// Top-level configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub site: SiteConfig,
    #[serde(default)]
    pub view: ViewConfig,
    #[serde(default)]
    pub middleware: MiddlewareConfig,
}

/// Server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_bind_addr")]
    pub bind_addr: SocketAddr,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
        }
    }
}

fn default_bind_addr() -> SocketAddr {
    SocketAddr::from((Ipv4Addr::UNSPECIFIED, 8080))
}

/// Site being served: where its documents live and which engine renders them
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SiteConfig {
    /// Display name, exposed to templates as `site`
    #[serde(default = "default_site_name")]
    pub name: String,
    #[serde(default = "default_docroot")]
    pub docroot: PathBuf,
    /// Doctype engine used for every request (e.g. "templates", "text")
    #[serde(default = "default_doctype")]
    pub doctype: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            name: default_site_name(),
            docroot: default_docroot(),
            doctype: default_doctype(),
        }
    }
}

fn default_site_name() -> String {
    "tplserve".to_string()
}

fn default_docroot() -> PathBuf {
    PathBuf::from("site")
}

fn default_doctype() -> String {
    "templates".to_string()
}

/// View resolution settings
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ViewConfig {
    /// View rendered for the root path; empty falls back to `index`
    #[serde(default)]
    pub path: String,
}

/// Middleware chain settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MiddlewareConfig {
    /// Middleware to enable, by registered name
    #[serde(default = "default_enabled_middleware")]
    pub enabled: Vec<String>,
    /// Path segments starting with this prefix are hidden (empty disables)
    #[serde(default = "default_hidden_prefix")]
    pub hidden_prefix: String,
}

impl Default for MiddlewareConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled_middleware(),
            hidden_prefix: default_hidden_prefix(),
        }
    }
}

fn default_enabled_middleware() -> Vec<String> {
    vec!["hidden_paths".to_string(), "access_log".to_string()]
}

fn default_hidden_prefix() -> String {
    ".".to_string()
}
