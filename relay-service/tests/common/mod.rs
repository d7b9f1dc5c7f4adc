use relay_service::config::RelayConfig;
use relay_service::startup::Application;
use service_core::config::Config;
use std::collections::HashMap;

pub struct TestApp {
    pub address: String,
    pub port: u16,
    pub client: reqwest::Client,
}

impl TestApp {
    /// Spawn the relay on a random port, pointed at `inference_url`.
    pub async fn spawn(inference_url: Option<&str>) -> Self {
        Self::spawn_with(inference_url, &[]).await
    }

    pub async fn spawn_with(inference_url: Option<&str>, extra: &[(&str, &str)]) -> Self {
        let mut vars: HashMap<String, String> = extra
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        if let Some(url) = inference_url {
            vars.insert("INFERENCE_API_URL".to_string(), url.to_string());
        }

        let config = RelayConfig::from_lookup(Config { port: 0 }, |key| vars.get(key).cloned())
            .expect("Failed to build test configuration");

        let app = Application::build(config)
            .await
            .expect("Failed to build test application");
        let port = app.port();
        let address = format!("http://127.0.0.1:{}", port);

        tokio::spawn(async move {
            app.run_until_stopped().await.ok();
        });

        // Wait for HTTP server to be ready by polling health endpoint
        let client = reqwest::Client::new();
        let health_url = format!("{}/health", address);
        for _ in 0..50 {
            if client.get(&health_url).send().await.is_ok() {
                break;
            }
            tokio::time::sleep(tokio::time::Duration::from_millis(20)).await;
        }

        TestApp {
            address,
            port,
            client,
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.address, path)
    }
}
