//! Run configuration

use crate::destination::{EndpointTable, REMOTE_KEY_SEPARATOR};
use crate::error::ConfigError;
use crate::traversal::DEFAULT_PAGE_SIZE;

/// Which source system a run reads from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum SourceSystem {
    Joomla,
    Wordpress,
}

impl SourceSystem {
    /// Label used for remote keys when none is configured.
    pub fn default_label(self) -> &'static str {
        match self {
            Self::Joomla => "JOOMLA",
            Self::Wordpress => "WORDPRESS",
        }
    }
}

impl std::fmt::Display for SourceSystem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Joomla => write!(f, "joomla"),
            Self::Wordpress => write!(f, "wordpress"),
        }
    }
}

/// A remote system's base URL and optional bearer token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteConfig {
    pub base_url: String,
    pub bearer_token: Option<String>,
}

impl RemoteConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            bearer_token: None,
        }
    }

    pub fn with_bearer_token(mut self, token: impl Into<String>) -> Self {
        self.bearer_token = Some(token.into());
        self
    }
}

/// Everything one migration run needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationConfig {
    pub source_system: SourceSystem,
    pub source: RemoteConfig,
    pub destination: RemoteConfig,
    /// Remote key label; `<label>|<source id>` identifies migrated entities
    pub label: String,
    pub page_size: usize,
    pub endpoints: EndpointTable,
}

impl MigrationConfig {
    pub fn new(source_system: SourceSystem, source: RemoteConfig, destination: RemoteConfig) -> Self {
        Self {
            source_system,
            source,
            destination,
            label: source_system.default_label().to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            endpoints: EndpointTable::default(),
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.label.is_empty() || self.label.contains(REMOTE_KEY_SEPARATOR) {
            return Err(ConfigError::InvalidLabel(self.label.clone()));
        }
        if self.page_size == 0 {
            return Err(ConfigError::InvalidPageSize);
        }
        if self.destination.base_url.is_empty() {
            return Err(ConfigError::Missing("destination URL"));
        }
        if self.destination.bearer_token.as_deref().map_or(true, str::is_empty) {
            return Err(ConfigError::Missing("destination bearer token"));
        }
        if self.source.base_url.is_empty() {
            return Err(ConfigError::Missing("source URL"));
        }
        if self.source_system == SourceSystem::Joomla
            && self.source.bearer_token.as_deref().map_or(true, str::is_empty)
        {
            return Err(ConfigError::Missing("Joomla bearer token"));
        }
        Ok(())
    }
}
