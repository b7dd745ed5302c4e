use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;

use crate::application::ports::service_directory::{ServiceDirectory, ServiceRegistration};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RegisterBody<'a> {
    name: &'a str,
    capabilities: &'a [String],
    callback_url: &'a str,
}

pub struct ReqwestServiceDirectory {
    client: reqwest::Client,
    register_url: String,
    api_key: String,
}

impl ReqwestServiceDirectory {
    pub fn new(base_url: &str, api_key: &str, timeout: Duration) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| anyhow::anyhow!("failed to build directory client: {e}"))?;
        Ok(Self {
            client,
            register_url: format!("{}/register", base_url.trim_end_matches('/')),
            api_key: api_key.to_string(),
        })
    }

    pub fn register_url(&self) -> &str {
        &self.register_url
    }
}

#[async_trait]
impl ServiceDirectory for ReqwestServiceDirectory {
    async fn register(&self, registration: &ServiceRegistration) -> anyhow::Result<()> {
        let body = RegisterBody {
            name: &registration.name,
            capabilities: &registration.capabilities,
            callback_url: &registration.callback_url,
        };
        let resp = self
            .client
            .post(&self.register_url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| anyhow::anyhow!("request failed: {e}"))?;
        if !resp.status().is_success() {
            anyhow::bail!("directory returned status {}", resp.status());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{Json, Router, extract::State, http::HeaderMap, http::StatusCode, routing::post};
    use std::sync::{Arc, Mutex};

    type Seen = Arc<Mutex<Vec<(Option<String>, serde_json::Value)>>>;

    async fn spawn_directory(status: StatusCode) -> (String, Seen) {
        let seen: Seen = Arc::default();
        let app = Router::new()
            .route(
                "/register",
                post(
                    move |State(seen): State<Seen>,
                          headers: HeaderMap,
                          Json(body): Json<serde_json::Value>| async move {
                        let auth = headers
                            .get(http::header::AUTHORIZATION)
                            .and_then(|v| v.to_str().ok())
                            .map(str::to_owned);
                        seen.lock().unwrap().push((auth, body));
                        status
                    },
                ),
            )
            .with_state(seen.clone());
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        (format!("http://{addr}/"), seen)
    }

    fn registration() -> ServiceRegistration {
        ServiceRegistration {
            name: "Ku Research".into(),
            capabilities: vec!["get-research".into(), "add-paper".into()],
            callback_url: "http://localhost:8083".into(),
        }
    }

    #[tokio::test]
    async fn posts_registration_with_credential() {
        let (base, seen) = spawn_directory(StatusCode::OK).await;
        let directory =
            ReqwestServiceDirectory::new(&base, "shared-key", Duration::from_secs(5)).unwrap();
        assert!(!directory.register_url().ends_with("//register"));

        directory.register(&registration()).await.unwrap();

        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        let (auth, body) = &seen[0];
        assert_eq!(auth.as_deref(), Some("Bearer shared-key"));
        assert_eq!(body["name"], "Ku Research");
        assert_eq!(
            body["capabilities"],
            serde_json::json!(["get-research", "add-paper"])
        );
        assert_eq!(body["callbackUrl"], "http://localhost:8083");
    }

    #[tokio::test]
    async fn non_success_status_is_an_error() {
        let (base, _seen) = spawn_directory(StatusCode::SERVICE_UNAVAILABLE).await;
        let directory =
            ReqwestServiceDirectory::new(&base, "shared-key", Duration::from_secs(5)).unwrap();
        let err = directory.register(&registration()).await.unwrap_err();
        assert!(err.to_string().contains("503"));
    }

    #[tokio::test]
    async fn unreachable_directory_is_an_error() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        let directory = ReqwestServiceDirectory::new(
            &format!("http://{addr}"),
            "shared-key",
            Duration::from_secs(1),
        )
        .unwrap();
        assert!(directory.register(&registration()).await.is_err());
    }
}
