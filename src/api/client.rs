use async_trait::async_trait;
use reqwest::{Client, ClientBuilder, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::time::Instant;

use crate::api::models::{
    AnalysisResult, AnalyzeRequest, ChatRequest, ChatResponse, ErrorBody, HealthResponse,
};
use crate::config::Config;
use crate::error::{ApiFailure, AppError, Result};

/// The remote analysis service as seen by the controller and chat panel.
#[async_trait]
pub trait AnalysisBackend: Send + Sync {
    async fn analyze(&self, request: &AnalyzeRequest) -> std::result::Result<AnalysisResult, ApiFailure>;

    async fn chat(&self, request: &ChatRequest) -> std::result::Result<ChatResponse, ApiFailure>;
}

/// `AnalysisBackend` over HTTP.
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
    config: Config,
}

impl HttpClient {
    pub fn new(config: Config) -> Result<Self> {
        let mut builder = ClientBuilder::new().pool_max_idle_per_host(10);
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| AppError::ConfigError(format!("Failed to build HTTP client: {}", e)))?;
        Ok(HttpClient { client, config })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub async fn health(&self) -> std::result::Result<HealthResponse, ApiFailure> {
        let url = self.config.endpoint("/health");
        tracing::debug!(%url, "checking service health");
        let response = self.client.get(&url).send().await?;
        read_json(response).await
    }

    async fn post_json<B, T>(&self, path: &str, body: &B) -> std::result::Result<T, ApiFailure>
    where
        B: Serialize + Sync + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.config.endpoint(path);
        let start = Instant::now();
        tracing::debug!(%url, "sending request");

        let result = match self.client.post(&url).json(body).send().await {
            Ok(response) => read_json(response).await,
            Err(err) => Err(err.into()),
        };

        match &result {
            Ok(_) => tracing::debug!(%url, elapsed = ?start.elapsed(), "request succeeded"),
            Err(failure) => tracing::warn!(
                %url,
                elapsed = ?start.elapsed(),
                status = failure.response.as_ref().map(|r| r.status),
                error = %failure,
                "request failed"
            ),
        }
        result
    }
}

#[async_trait]
impl AnalysisBackend for HttpClient {
    async fn analyze(&self, request: &AnalyzeRequest) -> std::result::Result<AnalysisResult, ApiFailure> {
        self.post_json("/analyze", request).await
    }

    async fn chat(&self, request: &ChatRequest) -> std::result::Result<ChatResponse, ApiFailure> {
        self.post_json("/chat", request).await
    }
}

async fn read_json<T: DeserializeOwned>(response: Response) -> std::result::Result<T, ApiFailure> {
    let status = response.status();
    let body = response.text().await?;

    if !status.is_success() {
        return Err(ApiFailure::status(status.as_u16(), ErrorBody::detail_text(&body)));
    }

    serde_json::from_str(&body).map_err(|e| {
        ApiFailure::decode(
            status.as_u16(),
            format!("Invalid response from analysis service: {}", e),
        )
    })
}
