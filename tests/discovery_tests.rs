//! Integration tests for service-address resolution, with wiremock standing
//! in for the Consul registry.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use datastore_client::config::DEFAULT_SERVICE_NAME;
use datastore_client::{DiscoveryConfig, RegistryConfig, resolve};

/// Registry settings pointing at the given mock server.
fn registry_for(server: &MockServer) -> RegistryConfig {
    let address = server.address();
    RegistryConfig {
        enabled: true,
        host: address.ip().to_string(),
        port: address.port(),
        ..RegistryConfig::default()
    }
}

fn catalog_path() -> String {
    format!("/v1/catalog/service/{DEFAULT_SERVICE_NAME}")
}

fn kv_path() -> String {
    format!("/v1/kv/config/dev/services/{DEFAULT_SERVICE_NAME}/url")
}

#[tokio::test]
async fn test_catalog_hit_resolves_service_address() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(catalog_path()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "ServiceAddress": "10.0.0.5", "Address": "10.0.0.1", "ServicePort": 9000 }
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let config = DiscoveryConfig { registry: registry_for(&server), ..DiscoveryConfig::default() };
    let address = resolve(&config).await.unwrap();
    assert_eq!(address.url().as_str(), "http://10.0.0.5:9000/");
}

#[tokio::test]
async fn test_catalog_falls_back_to_node_address() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(catalog_path()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "ServiceAddress": "", "Address": "10.0.0.1", "ServicePort": 9000 }
        ])))
        .mount(&server)
        .await;

    let config = DiscoveryConfig { registry: registry_for(&server), ..DiscoveryConfig::default() };
    let address = resolve(&config).await.unwrap();
    assert_eq!(address.url().as_str(), "http://10.0.0.1:9000/");
}

#[tokio::test]
async fn test_empty_catalog_falls_back_to_kv() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(catalog_path()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(kv_path()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "Value": BASE64.encode("http://kv-resolved:8123") }
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let config = DiscoveryConfig { registry: registry_for(&server), ..DiscoveryConfig::default() };
    let address = resolve(&config).await.unwrap();
    assert_eq!(address.url().as_str(), "http://kv-resolved:8123/");
}

#[tokio::test]
async fn test_override_wins_without_touching_registry() {
    let server = MockServer::start().await;
    // Any registry traffic fails the test on drop.
    Mock::given(method("GET")).respond_with(ResponseTemplate::new(200)).expect(0).mount(&server).await;

    let config = DiscoveryConfig {
        override_url: Some("http://explicit:9999".to_string()),
        registry: registry_for(&server),
        ..DiscoveryConfig::default()
    };
    let address = resolve(&config).await.unwrap();
    assert_eq!(address.url().as_str(), "http://explicit:9999/");
}

#[tokio::test]
async fn test_registry_miss_falls_through_to_configured_url() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(catalog_path()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(kv_path()))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let config = DiscoveryConfig {
        configured_url: Some("http://configured:8000".to_string()),
        registry: registry_for(&server),
        ..DiscoveryConfig::default()
    };
    let address = resolve(&config).await.unwrap();
    assert_eq!(address.url().as_str(), "http://configured:8000/");
}

#[tokio::test]
async fn test_unreachable_registry_falls_through_to_configured_url() {
    // Bind and drop a listener so the port is (almost certainly) closed.
    let closed_port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };

    let config = DiscoveryConfig {
        configured_url: Some("http://configured:8000".to_string()),
        registry: RegistryConfig {
            enabled: true,
            host: "127.0.0.1".to_string(),
            port: closed_port,
            ..RegistryConfig::default()
        },
        ..DiscoveryConfig::default()
    };
    let address = resolve(&config).await.unwrap();
    assert_eq!(address.url().as_str(), "http://configured:8000/");
}

#[tokio::test]
async fn test_everything_disabled_resolves_compiled_in_default() {
    let address = resolve(&DiscoveryConfig::offline()).await.unwrap();
    assert_eq!(address.url().as_str(), "http://workflow-knowledge-base:8000/");
    assert_eq!(address.host(), "workflow-knowledge-base");
    assert_eq!(address.port(), Some(8000));
}

#[tokio::test]
async fn test_garbage_kv_value_falls_through() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(catalog_path()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(kv_path()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "Value": "!!! not base64 !!!" }
        ])))
        .mount(&server)
        .await;

    let config = DiscoveryConfig { registry: registry_for(&server), ..DiscoveryConfig::default() };
    let address = resolve(&config).await.unwrap();
    assert_eq!(address.url().as_str(), "http://workflow-knowledge-base:8000/");
}

#[tokio::test]
async fn test_client_memoizes_resolved_address() {
    let server = MockServer::start().await;
    // The catalog must be consulted exactly once even across many requests.
    Mock::given(method("GET"))
        .and(path(catalog_path()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "ServiceAddress": "10.1.1.1", "ServicePort": 8000 }
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let client = datastore_client::DataStoreClient::builder()
        .with_discovery(DiscoveryConfig {
            registry: registry_for(&server),
            ..DiscoveryConfig::default()
        })
        .build()
        .unwrap();

    let first = client.service_address().await.unwrap().clone();
    let second = client.service_address().await.unwrap().clone();
    assert_eq!(first, second);
    assert_eq!(first.url().as_str(), "http://10.1.1.1:8000/");
}
