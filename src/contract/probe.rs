use anyhow::{Context, Result};
use async_trait::async_trait;
use axum::{body::Body, http::Request, Router};
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use tower::ServiceExt;
use tracing::debug;

/// Status and (if parseable) JSON body of a probed endpoint
#[derive(Debug, Clone, PartialEq)]
pub struct ProbeResponse {
    pub status: u16,
    pub body: Option<Value>,
}

impl ProbeResponse {
    pub fn from_bytes(status: u16, bytes: &[u8]) -> Self {
        Self {
            status,
            body: serde_json::from_slice(bytes).ok(),
        }
    }
}

/// Transport used to issue contract checks
#[async_trait]
pub trait Probe: Send + Sync {
    async fn get(&self, path: &str) -> Result<ProbeResponse>;

    /// Human readable target, used in reports
    fn target(&self) -> String;
}

/// Drives an in-process router without opening a socket
#[derive(Clone)]
pub struct RouterProbe {
    router: Router,
}

impl RouterProbe {
    pub fn new(router: Router) -> Self {
        Self { router }
    }
}

#[async_trait]
impl Probe for RouterProbe {
    async fn get(&self, path: &str) -> Result<ProbeResponse> {
        let request = Request::builder()
            .method("GET")
            .uri(path)
            .body(Body::empty())
            .context("Invalid request path")?;

        // fresh clone per request, like a new test client
        let response = self.router.clone().oneshot(request).await?;
        let status = response.status().as_u16();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .context("Failed to read response body")?;
        Ok(ProbeResponse::from_bytes(status, &bytes))
    }

    fn target(&self) -> String {
        "in-process router".to_string()
    }
}

/// Talks to a running instance over HTTP
#[derive(Clone)]
pub struct RemoteProbe {
    client: Client,
    base_url: String,
}

impl RemoteProbe {
    pub fn new(base_url: impl Into<String>, timeout_secs: u64) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .context("Failed to create HTTP client")?;
        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    fn build_url(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }
}

#[async_trait]
impl Probe for RemoteProbe {
    async fn get(&self, path: &str) -> Result<ProbeResponse> {
        let url = self.build_url(path);
        debug!("GET {}", url);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .with_context(|| format!("Request to {} failed", url))?;
        let status = response.status().as_u16();
        let bytes = response.bytes().await?;
        Ok(ProbeResponse::from_bytes(status, &bytes))
    }

    fn target(&self) -> String {
        self.base_url.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::routing::get;

    #[test]
    fn non_json_body_is_none() {
        let resp = ProbeResponse::from_bytes(200, b"<html>");
        assert!(resp.body.is_none());
        let resp = ProbeResponse::from_bytes(200, br#"{"status":"ok"}"#);
        assert_eq!(resp.body.unwrap()["status"], "ok");
    }

    #[test]
    fn joins_base_url_and_path() {
        let probe = RemoteProbe::new("http://localhost:8000/", 5).unwrap();
        assert_eq!(probe.build_url("/health"), "http://localhost:8000/health");
    }

    #[tokio::test]
    async fn router_probe_reads_status_and_body() {
        let router = Router::new().route("/ping", get(|| async { r#"{"pong":true}"# }));
        let probe = RouterProbe::new(router);

        let resp = probe.get("/ping").await.unwrap();
        assert_eq!(resp.status, 200);
        assert_eq!(resp.body.unwrap()["pong"], true);

        let resp = probe.get("/nope").await.unwrap();
        assert_eq!(resp.status, 404);
    }

    #[tokio::test]
    async fn remote_probe_reports_connection_errors() {
        // port 9 (discard) is essentially never listening locally
        let probe = RemoteProbe::new("http://127.0.0.1:9", 2).unwrap();
        assert!(probe.get("/health").await.is_err());
    }
}
