//! Federation source configuration.

use fedmirror_core::Timestamp;
use serde::{Deserialize, Serialize};

/// Configuration for one federated source.
///
/// The configuration is owned by an external store and read-only here.
/// `last_sync_time` is the instant up to which the mirror is known to be
/// consistent with the source; the store advances it after a successful
/// cycle, never this crate. An absent value means the source has never
/// been synchronized and is treated as the epoch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FederationConfig {
    /// Identifier of the federated source.
    pub source_id: String,
    /// Endpoint the remote catalog is fetched from.
    pub source_endpoint: String,
    /// Client name this mirror authenticates as against the source.
    pub app_client_name: String,
    /// Whether synchronization for this source is enabled.
    pub active: bool,
    /// Instant of the last successful synchronization.
    pub last_sync_time: Option<Timestamp>,
}

impl FederationConfig {
    /// Creates an active configuration that has never been synchronized.
    pub fn new(source_id: impl Into<String>, source_endpoint: impl Into<String>) -> Self {
        Self {
            source_id: source_id.into(),
            source_endpoint: source_endpoint.into(),
            app_client_name: String::new(),
            active: true,
            last_sync_time: None,
        }
    }

    /// Sets the client name used against the source.
    #[must_use]
    pub fn with_app_client_name(mut self, name: impl Into<String>) -> Self {
        self.app_client_name = name.into();
        self
    }

    /// Sets whether synchronization is enabled.
    #[must_use]
    pub fn with_active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }

    /// Sets the last successful synchronization instant.
    #[must_use]
    pub fn with_last_sync_time(mut self, last_sync_time: Timestamp) -> Self {
        self.last_sync_time = Some(last_sync_time);
        self
    }

    /// Returns true if the source has never been synchronized.
    #[must_use]
    pub fn never_synced(&self) -> bool {
        self.last_sync_time.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_builder() {
        let config = FederationConfig::new("upstream-1", "https://catalog.example.org")
            .with_app_client_name("mirror-sync")
            .with_last_sync_time(Timestamp::from_millis(1_000));

        assert_eq!(config.source_id, "upstream-1");
        assert_eq!(config.source_endpoint, "https://catalog.example.org");
        assert_eq!(config.app_client_name, "mirror-sync");
        assert!(config.active);
        assert_eq!(config.last_sync_time, Some(Timestamp::from_millis(1_000)));
        assert!(!config.never_synced());
    }

    #[test]
    fn new_config_is_never_synced() {
        let config = FederationConfig::new("upstream-1", "https://catalog.example.org");
        assert!(config.never_synced());
    }

    #[test]
    fn serde_roundtrip() {
        let config = FederationConfig::new("upstream-1", "https://catalog.example.org")
            .with_active(false)
            .with_last_sync_time(Timestamp::from_millis(42));

        let json = serde_json::to_string(&config).unwrap();
        let decoded: FederationConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, config);
    }
}
