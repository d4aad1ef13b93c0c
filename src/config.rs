//! Discovery configuration.
//!
//! Environment variables are read exactly once, in
//! [`DiscoveryConfig::from_env`]; the resolver itself only ever sees this
//! struct, so resolution behavior is fully determined by its fields.

use std::time::Duration;

/// Environment variable holding a directly configured service URL.
pub const SERVICE_URL_ENV: &str = "KNOWLEDGE_BASE_SERVICE_URL";
/// Environment variable toggling registry lookups (`false`/`0`/`no` disable).
pub const REGISTRY_ENABLED_ENV: &str = "CONSUL_ENABLED";
/// Environment variable for the registry host.
pub const REGISTRY_HOST_ENV: &str = "CONSUL_HOST";
/// Environment variable for the registry port.
pub const REGISTRY_PORT_ENV: &str = "CONSUL_PORT";

/// Registered name of the backing service in the registry catalog.
pub const DEFAULT_SERVICE_NAME: &str = "workflow-knowledge-base";
/// Port of the compiled-in default address.
pub const DEFAULT_SERVICE_PORT: u16 = 8000;

const DEFAULT_REGISTRY_HOST: &str = "localhost";
const DEFAULT_REGISTRY_PORT: u16 = 8500;
const DEFAULT_LOOKUP_TIMEOUT: Duration = Duration::from_secs(2);

/// Connection settings for the optional service registry (Consul).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistryConfig {
    /// Whether registry lookups are attempted at all.
    pub enabled: bool,
    pub host: String,
    pub port: u16,
    /// Upper bound on the whole registry round trip; on expiry the registry
    /// tier is skipped, never surfaced as an error.
    pub lookup_timeout: Duration,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            host: DEFAULT_REGISTRY_HOST.to_string(),
            port: DEFAULT_REGISTRY_PORT,
            lookup_timeout: DEFAULT_LOOKUP_TIMEOUT,
        }
    }
}

impl RegistryConfig {
    /// A config with registry lookups switched off.
    pub fn disabled() -> Self {
        Self { enabled: false, ..Self::default() }
    }
}

/// Inputs to service-address resolution, in fallback order: explicit
/// override, registry lookup, configured URL, compiled-in default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveryConfig {
    /// Directly supplied base URL. When set it always wins; when malformed,
    /// resolution fails instead of falling through.
    pub override_url: Option<String>,
    /// URL captured from the environment (or equivalent configuration
    /// source). Malformed values are skipped with a warning.
    pub configured_url: Option<String>,
    pub registry: RegistryConfig,
    /// Service name used for both the registry query and the default address.
    pub service_name: String,
    pub default_port: u16,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            override_url: None,
            configured_url: None,
            registry: RegistryConfig::default(),
            service_name: DEFAULT_SERVICE_NAME.to_string(),
            default_port: DEFAULT_SERVICE_PORT,
        }
    }
}

impl DiscoveryConfig {
    /// Capture discovery settings from the process environment.
    ///
    /// This is the only place the crate touches environment variables.
    pub fn from_env() -> Self {
        let registry = RegistryConfig {
            enabled: std::env::var(REGISTRY_ENABLED_ENV)
                .map(|v| parse_enabled_flag(&v))
                .unwrap_or(true),
            host: std::env::var(REGISTRY_HOST_ENV)
                .unwrap_or_else(|_| DEFAULT_REGISTRY_HOST.to_string()),
            port: std::env::var(REGISTRY_PORT_ENV)
                .ok()
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(DEFAULT_REGISTRY_PORT),
            lookup_timeout: DEFAULT_LOOKUP_TIMEOUT,
        };

        Self {
            override_url: None,
            configured_url: std::env::var(SERVICE_URL_ENV).ok().filter(|v| !v.is_empty()),
            registry,
            ..Self::default()
        }
    }

    /// A config that resolves straight to the compiled-in default (no
    /// override, no registry, no configured URL).
    pub fn offline() -> Self {
        Self { registry: RegistryConfig::disabled(), ..Self::default() }
    }
}

/// `false`, `0` and `no` (any casing) disable the registry; everything else
/// leaves it enabled.
fn parse_enabled_flag(value: &str) -> bool {
    !matches!(value.trim().to_ascii_lowercase().as_str(), "false" | "0" | "no")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enabled_flag_falsy_values() {
        for v in ["false", "FALSE", "0", "no", " No "] {
            assert!(!parse_enabled_flag(v), "{v} should disable the registry");
        }
    }

    #[test]
    fn test_enabled_flag_truthy_values() {
        for v in ["true", "1", "yes", "on", "anything"] {
            assert!(parse_enabled_flag(v), "{v} should leave the registry enabled");
        }
    }

    #[test]
    fn test_default_config_targets_knowledge_base_service() {
        let config = DiscoveryConfig::default();
        assert_eq!(config.service_name, "workflow-knowledge-base");
        assert_eq!(config.default_port, 8000);
        assert!(config.registry.enabled);
    }

    #[test]
    fn test_offline_config_disables_registry() {
        let config = DiscoveryConfig::offline();
        assert!(!config.registry.enabled);
        assert!(config.override_url.is_none());
        assert!(config.configured_url.is_none());
    }
}
