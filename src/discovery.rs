//! Service-address resolution.
//!
//! The base URL of the datastore service is resolved through an ordered
//! fallback chain: explicit override, registry (Consul) lookup, configured
//! URL, compiled-in default. The first syntactically valid URL wins and the
//! result is memoized for the lifetime of the client that triggered it.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use serde::Deserialize;
use snafu::ResultExt;
use url::Url;

use crate::config::{DiscoveryConfig, RegistryConfig};
use crate::error::{ConfigurationSnafu, ConstructUrlSnafu, Error, Result};

/// A resolved base address of the datastore service.
///
/// Immutable once constructed; a client memoizes one of these on first use
/// and never re-resolves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceAddress {
    url: Url,
}

impl ServiceAddress {
    /// Parse a base URL, requiring a scheme and a host.
    pub fn parse(raw: &str) -> Result<Self> {
        let url = Url::parse(raw.trim()).map_err(|source| Error::Configuration {
            message: format!("invalid service URL '{raw}': {source}"),
        })?;
        if !url.has_host() {
            return ConfigurationSnafu {
                message: format!("service URL '{raw}' has no host"),
            }
            .fail();
        }
        Ok(Self { url })
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn scheme(&self) -> &str {
        self.url.scheme()
    }

    pub fn host(&self) -> &str {
        self.url.host_str().unwrap_or_default()
    }

    pub fn port(&self) -> Option<u16> {
        self.url.port_or_known_default()
    }

    /// Join an absolute endpoint path onto this address.
    pub(crate) fn endpoint(&self, path: &str) -> Result<Url> {
        self.url.join(path).context(ConstructUrlSnafu { path })
    }
}

impl std::fmt::Display for ServiceAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.url.fmt(f)
    }
}

/// Resolve the service address through the fallback chain.
///
/// Fails only when an explicit override is present but malformed; every other
/// tier either produces an address or is skipped, and the final tier is a
/// compiled-in default.
#[tracing::instrument(skip_all, err)]
pub async fn resolve(config: &DiscoveryConfig) -> Result<ServiceAddress> {
    if let Some(raw) = &config.override_url {
        let address = ServiceAddress::parse(raw)?;
        tracing::debug!(%address, "using override service URL");
        return Ok(address);
    }

    if config.registry.enabled {
        if let Some(address) = lookup_registry(&config.registry, &config.service_name).await {
            tracing::debug!(%address, "service URL resolved from registry");
            return Ok(address);
        }
    }

    if let Some(raw) = &config.configured_url {
        match ServiceAddress::parse(raw) {
            Ok(address) => {
                tracing::debug!(%address, "using configured service URL");
                return Ok(address);
            }
            Err(err) => {
                tracing::warn!(%err, url = %raw, "ignoring malformed configured service URL");
            }
        }
    }

    let fallback = format!("http://{}:{}", config.service_name, config.default_port);
    let address = ServiceAddress::parse(&fallback)?;
    tracing::debug!(%address, "using default service URL");
    Ok(address)
}

/// One instance record from the registry's service catalog.
#[derive(Debug, Deserialize)]
struct CatalogService {
    #[serde(rename = "ServiceAddress", default)]
    service_address: Option<String>,
    #[serde(rename = "Address", default)]
    address: Option<String>,
    #[serde(rename = "ServicePort")]
    service_port: u16,
}

/// One key/value record from the registry's KV store; values are base64.
#[derive(Debug, Deserialize)]
struct KvPair {
    #[serde(rename = "Value", default)]
    value: Option<String>,
}

/// Query the registry for the service address: catalog first, KV fallback.
///
/// Every failure path (unreachable registry, timeout, bad payload, no
/// instances) logs a warning and yields `None` so resolution moves on to the
/// next tier.
async fn lookup_registry(registry: &RegistryConfig, service_name: &str) -> Option<ServiceAddress> {
    let client = match reqwest::Client::builder().timeout(registry.lookup_timeout).build() {
        Ok(client) => client,
        Err(err) => {
            tracing::warn!(%err, "failed to build registry HTTP client, skipping registry tier");
            return None;
        }
    };
    let base = format!("http://{}:{}", registry.host, registry.port);

    match catalog_lookup(&client, &base, service_name).await {
        Ok(Some(address)) => return Some(address),
        Ok(None) => {
            tracing::debug!(service = service_name, "registry catalog has no instances");
        }
        Err(err) => {
            tracing::warn!(%err, service = service_name, "registry catalog lookup failed");
            return None;
        }
    }

    match kv_lookup(&client, &base, service_name).await {
        Ok(found) => found,
        Err(err) => {
            tracing::warn!(%err, service = service_name, "registry KV lookup failed");
            None
        }
    }
}

async fn catalog_lookup(
    client: &reqwest::Client,
    base: &str,
    service_name: &str,
) -> std::result::Result<Option<ServiceAddress>, reqwest::Error> {
    let url = format!("{base}/v1/catalog/service/{service_name}");
    let response = client.get(&url).send().await?;
    if !response.status().is_success() {
        return Ok(None);
    }
    let instances: Vec<CatalogService> = response.json().await?;

    let Some(instance) = instances.first() else {
        return Ok(None);
    };
    let host = instance
        .service_address
        .as_deref()
        .filter(|a| !a.is_empty())
        .or(instance.address.as_deref())
        .filter(|a| !a.is_empty());
    let Some(host) = host else {
        return Ok(None);
    };

    Ok(ServiceAddress::parse(&format!("http://{}:{}", host, instance.service_port)).ok())
}

async fn kv_lookup(
    client: &reqwest::Client,
    base: &str,
    service_name: &str,
) -> std::result::Result<Option<ServiceAddress>, reqwest::Error> {
    let url = format!("{base}/v1/kv/config/dev/services/{service_name}/url");
    let response = client.get(&url).send().await?;
    if !response.status().is_success() {
        return Ok(None);
    }
    let pairs: Vec<KvPair> = response.json().await?;

    let Some(encoded) = pairs.first().and_then(|p| p.value.as_deref()) else {
        return Ok(None);
    };
    let Ok(decoded) = BASE64.decode(encoded) else {
        tracing::warn!(service = service_name, "registry KV value is not valid base64");
        return Ok(None);
    };
    let Ok(raw) = String::from_utf8(decoded) else {
        tracing::warn!(service = service_name, "registry KV value is not valid UTF-8");
        return Ok(None);
    };

    Ok(ServiceAddress::parse(&raw).ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_accepts_host_and_port() {
        let address = ServiceAddress::parse("http://datastore.internal:9000").unwrap();
        assert_eq!(address.scheme(), "http");
        assert_eq!(address.host(), "datastore.internal");
        assert_eq!(address.port(), Some(9000));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        let err = ServiceAddress::parse("not a url").unwrap_err();
        assert!(matches!(err, Error::Configuration { .. }));
    }

    #[test]
    fn test_parse_rejects_hostless_url() {
        let err = ServiceAddress::parse("file:///tmp/socket").unwrap_err();
        assert!(matches!(err, Error::Configuration { .. }));
    }

    #[test]
    fn test_endpoint_joins_absolute_paths() {
        let address = ServiceAddress::parse("http://svc:8000").unwrap();
        let url = address.endpoint("/api/datastore/collections").unwrap();
        assert_eq!(url.as_str(), "http://svc:8000/api/datastore/collections");
    }

    #[tokio::test]
    async fn test_malformed_override_fails_without_fallthrough() {
        let config = DiscoveryConfig {
            override_url: Some("::definitely-not-a-url::".to_string()),
            ..DiscoveryConfig::offline()
        };
        let err = resolve(&config).await.unwrap_err();
        assert!(matches!(err, Error::Configuration { .. }));
    }

    #[tokio::test]
    async fn test_malformed_configured_url_falls_through_to_default() {
        let config = DiscoveryConfig {
            configured_url: Some("%%%".to_string()),
            ..DiscoveryConfig::offline()
        };
        let address = resolve(&config).await.unwrap();
        assert_eq!(address.url().as_str(), "http://workflow-knowledge-base:8000/");
    }
}
