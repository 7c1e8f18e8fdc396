use super::mocks::{MockTransport, RecordingSink};
use idea_forge::{Result, config::BackendConfig, orchestrator::Orchestrator};
use std::sync::Arc;
use tempfile::TempDir;
use tokio::fs;

/// Build an orchestrator around a mock transport and a recording sink
pub fn create_test_orchestrator(transport: MockTransport) -> (Orchestrator, Arc<RecordingSink>) {
    let sink = Arc::new(RecordingSink::new());
    let orchestrator = Orchestrator::new(Box::new(transport), sink.clone());
    (orchestrator, sink)
}

/// Backend config pointing at the given endpoint
pub fn create_backend_config(endpoint: &str) -> BackendConfig {
    BackendConfig {
        endpoint: endpoint.to_string(),
        send_accept_header: true,
        timeout_secs: None,
    }
}

/// Create a temporary directory for test files
pub fn create_temp_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp directory")
}

/// Create a test config YAML file
pub async fn create_test_config_file(dir: &TempDir, content: &str) -> Result<String> {
    let config_path = dir.path().join("idea-forge.yaml");
    fs::write(&config_path, content).await?;
    Ok(config_path.to_string_lossy().to_string())
}

/// An address nothing is listening on
pub async fn unused_local_endpoint() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind probe listener");
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    format!("http://127.0.0.1:{}/generate", port)
}

/// Sample configuration YAML for testing
pub const SAMPLE_CONFIG_YAML: &str = r#"
backend:
  endpoint: "http://127.0.0.1:5055/generate"
  send_accept_header: false
  timeout_secs: 15
logs:
  level: "debug"
display:
  color: false
"#;
