//! Configuration for resource manager behavior.

use infra_core::{Error, Result, DEFAULT_MANAGER_NAME, DEFAULT_STACK_CAPACITY};

/// Configuration for a [`ResourceManager`](super::ResourceManager)
#[derive(Debug, Clone)]
pub struct ManagerConfig {
    /// Name recorded on every log event emitted by the manager
    pub name: String,
    /// Number of stack entries to pre-allocate
    pub initial_capacity: usize,
    /// Whether to emit a debug event for every successful release
    pub log_releases: bool,
}

impl Default for ManagerConfig {
    fn default() -> Self {
        Self {
            name: DEFAULT_MANAGER_NAME.to_string(),
            initial_capacity: DEFAULT_STACK_CAPACITY,
            log_releases: false,
        }
    }
}

impl ManagerConfig {
    /// Create a default config with the given manager name
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Pre-allocate room for `capacity` entries
    #[must_use]
    pub fn with_initial_capacity(mut self, capacity: usize) -> Self {
        self.initial_capacity = capacity;
        self
    }

    #[must_use]
    pub fn with_release_logging(mut self, enabled: bool) -> Self {
        self.log_releases = enabled;
        self
    }

    /// Check that the config can be used to build a manager
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(Error::configuration("resource manager name must not be empty"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = ManagerConfig::default();
        assert_eq!(config.name, "resources");
        assert_eq!(config.initial_capacity, 2);
        assert!(!config.log_releases);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_blank_name_is_rejected() {
        let err = ManagerConfig::named("  ").validate().unwrap_err();
        assert!(matches!(err, Error::Configuration { .. }));
        assert!(err.to_string().contains("must not be empty"));
    }

    #[test]
    fn test_builder_methods() {
        let config = ManagerConfig::named("request")
            .with_initial_capacity(16)
            .with_release_logging(true);
        assert_eq!(config.name, "request");
        assert_eq!(config.initial_capacity, 16);
        assert!(config.log_releases);
    }
}
