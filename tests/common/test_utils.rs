use iris_console::{
    api::{HttpPredictionService, PredictionService},
    config::{Config, ServiceConfig},
    widgets::{HealthSettings, HealthSnapshot},
};
use serde_json::{Value, json};
use std::{sync::Arc, time::Duration};
use tokio::sync::watch;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path},
};

/// Upper bound for anything a test waits on
pub const WAIT: Duration = Duration::from_secs(5);

/// Create a test configuration pointing at `base_url`
pub fn create_test_config(base_url: &str) -> Config {
    let mut config = Config::default();
    config.service.base_url = base_url.to_string();
    config
}

/// HTTP client for a mock server, without any request timeout
pub fn http_service(base_url: &str) -> Arc<dyn PredictionService> {
    let service = HttpPredictionService::new(&ServiceConfig {
        base_url: base_url.to_string(),
        request_timeout_secs: None,
    })
    .expect("Failed to build HTTP client");
    Arc::new(service)
}

/// Health settings small enough for tests
pub fn fast_health(interval_ms: u64, timeout_ms: u64) -> HealthSettings {
    HealthSettings {
        interval: Duration::from_millis(interval_ms),
        timeout: Duration::from_millis(timeout_ms),
    }
}

/// Base URL nothing listens on
pub fn unreachable_base_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("Failed to bind");
    let port = listener.local_addr().expect("No local addr").port();
    drop(listener);
    format!("http://127.0.0.1:{}", port)
}

pub fn sample_model_info() -> Value {
    json!({
        "model_type": "RandomForestClassifier",
        "classes": ["setosa", "versicolor", "virginica"]
    })
}

pub fn prediction(class: &str) -> Value {
    json!({ "predicted_class": class })
}

/// Mount a GET responder
pub async fn mock_get(server: &MockServer, endpoint: &str, response: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path(endpoint))
        .respond_with(response)
        .mount(server)
        .await;
}

/// Number of requests the mock server has seen for `endpoint`
pub async fn request_count(server: &MockServer, endpoint: &str) -> usize {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .iter()
        .filter(|r| r.url.path() == endpoint)
        .count()
}

/// Wait until the mock server has seen at least `count` requests for `endpoint`
pub async fn wait_for_requests(server: &MockServer, endpoint: &str, count: usize) {
    tokio::time::timeout(WAIT, async {
        while request_count(server, endpoint).await < count {
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    })
    .await
    .unwrap_or_else(|_| panic!("Timed out waiting for {} requests to {}", count, endpoint));
}

/// Wait until the health snapshot satisfies `predicate`
pub async fn wait_for_health(
    mut rx: watch::Receiver<HealthSnapshot>,
    predicate: impl FnMut(&HealthSnapshot) -> bool,
) -> HealthSnapshot {
    let snapshot = tokio::time::timeout(WAIT, rx.wait_for(predicate))
        .await
        .expect("Timed out waiting for health state")
        .expect("Health monitor dropped its sender")
        .clone();
    snapshot
}

/// Sample configuration YAML for testing
pub const SAMPLE_CONFIG_YAML: &str = r#"
service:
  base_url: "http://iris.internal:9000"
  request_timeout_secs: 10

health:
  interval_secs: 15
  timeout_secs: 2

logs:
  level: "debug"
  file: "/tmp/iris-console-test.log"
"#;

/// Configuration that only sets the base URL
pub const MINIMAL_CONFIG_YAML: &str = r#"
service:
  base_url: "http://127.0.0.1:8000"
"#;

/// Invalid configuration YAML for testing error cases
pub const INVALID_CONFIG_YAML: &str = r#"
service:
  base_url: 42
health:
  interval_secs: "often"
"#;
