//! Client configuration
//!
//! Every field has a default, so a YAML file only needs the values it
//! changes:
//!
//! ```yaml
//! http:
//!   user_agent: my-app/1.0
//!   timeout_secs: 10
//! languages: [fr-fr, en-gb]
//! prefixes:
//!   ex: http://example.org/
//! ```

use crate::error::{LodError, LodResult};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Default `Accept` header: Turtle > RDF/XML > HTML
pub const DEFAULT_ACCEPT: &str = "text/turtle;q=0.95, application/rdf+xml;q=0.5, text/html;q=0.1";

/// Default `User-Agent` header
pub const DEFAULT_USER_AGENT: &str = "liblod/Rust";

/// HTTP fetch configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpClientConfig {
    /// User-Agent header sent with every request
    pub user_agent: String,
    /// Accept header sent with every request
    pub accept: String,
    /// Ceiling for HTTP redirects, and for HTML → RDF link hops
    pub max_redirects: usize,
    /// Maximum requests in flight per batch
    pub concurrency: usize,
    /// Per-request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            accept: DEFAULT_ACCEPT.to_string(),
            max_redirects: 10,
            concurrency: 10,
            timeout_secs: 30,
        }
    }
}

impl HttpClientConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Check values that would make the client unusable
    pub fn validate(&self) -> LodResult<()> {
        if self.concurrency == 0 {
            return Err(LodError::ConfigError("concurrency must be at least 1".to_string()));
        }
        if self.timeout_secs == 0 {
            return Err(LodError::ConfigError("timeout_secs must be at least 1".to_string()));
        }
        Ok(())
    }
}

/// Configuration for a [`crate::Lod`] session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LodConfig {
    /// HTTP fetch settings
    pub http: HttpClientConfig,
    /// Preferred literal languages, most preferred first
    pub languages: Vec<String>,
    /// Prefixes added on top of the common prefix table
    pub prefixes: IndexMap<String, String>,
}

impl Default for LodConfig {
    fn default() -> Self {
        Self {
            http: HttpClientConfig::default(),
            languages: vec!["en-gb".to_string(), "en".to_string()],
            prefixes: IndexMap::new(),
        }
    }
}

impl LodConfig {
    /// Parse a YAML document
    pub fn from_yaml_str(yaml: &str) -> LodResult<Self> {
        let config: LodConfig = serde_yaml::from_str(yaml)?;
        config.http.validate()?;
        Ok(config)
    }

    /// Load a YAML file
    pub fn from_file(path: impl AsRef<Path>) -> LodResult<Self> {
        let yaml = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&yaml)
    }
}
