//! reqwest-backed implementation of [`FarmBackend`]

use super::types::{
    Diagnosis, FeedbackRequest, FeedbackResponse, LoginRequest, LoginResponse, ProcessList,
    ProcessQuery, ProcessRecord, RecommendRequest, Recommendation, RegisterRequest,
    SuitabilityReport, SuitabilityRequest, SymptomRequest,
};
use super::{BackendError, FarmBackend};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::{Duration, Instant};

/// HTTP client for the farm REST API
pub struct HttpBackend {
    client: Client,
    base_url: String,
}

impl HttpBackend {
    /// `base_url` must not end with a slash; paths are appended verbatim.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn post_json<B, R>(&self, operation: &'static str, path: &str, body: &B) -> Result<R, BackendError>
    where
        B: Serialize + Sync + ?Sized,
        R: DeserializeOwned,
    {
        let body = self.call(operation, self.client.post(self.url(path)).json(body)).await?;
        parse_body(operation, &body)
    }

    async fn post_unit<B>(&self, operation: &'static str, path: &str, body: &B) -> Result<(), BackendError>
    where
        B: Serialize + Sync + ?Sized,
    {
        self.call(operation, self.client.post(self.url(path)).json(body))
            .await
            .map(|_| ())
    }

    async fn get_json<Q, R>(&self, operation: &'static str, path: &str, query: &Q) -> Result<R, BackendError>
    where
        Q: Serialize + Sync + ?Sized,
        R: DeserializeOwned,
    {
        let body = self.call(operation, self.client.get(self.url(path)).query(query)).await?;
        parse_body(operation, &body)
    }

    /// Send a request and return the body of a 2xx response.
    async fn call(&self, operation: &'static str, request: RequestBuilder) -> Result<String, BackendError> {
        let start = Instant::now();
        let result = execute(request).await;
        let duration = start.elapsed();

        match &result {
            Ok(_) => {
                tracing::info!(
                    operation,
                    duration_ms = %duration.as_millis(),
                    "Backend call completed"
                );
            }
            Err(e) => {
                tracing::warn!(
                    operation,
                    duration_ms = %duration.as_millis(),
                    reason = %e.reason,
                    "Backend call failed"
                );
            }
        }

        result
    }
}

async fn execute(request: RequestBuilder) -> Result<String, BackendError> {
    let response = request
        .send()
        .await
        .map_err(|e| BackendError::from_transport(&e))?;

    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| BackendError::from_transport(&e))?;

    if !status.is_success() {
        return Err(BackendError::from_response(status.as_u16(), &body));
    }

    Ok(body)
}

fn parse_body<R: DeserializeOwned>(operation: &'static str, body: &str) -> Result<R, BackendError> {
    let body = if body.trim().is_empty() { "{}" } else { body };
    serde_json::from_str(body).map_err(|e| {
        tracing::warn!(operation, error = %e, "Backend returned an unreadable body");
        BackendError::new("Unexpected response from server")
    })
}

#[async_trait]
impl FarmBackend for HttpBackend {
    async fn authenticate(&self, request: &LoginRequest) -> Result<LoginResponse, BackendError> {
        self.post_json("authenticate", "/api/login", request).await
    }

    async fn create_account(&self, request: &RegisterRequest) -> Result<(), BackendError> {
        self.post_unit("create_account", "/api/register", request).await
    }

    async fn recommend_crop(
        &self,
        request: &RecommendRequest,
    ) -> Result<Recommendation, BackendError> {
        self.post_json("recommend_crop", "/api/ml-recommend", request).await
    }

    async fn save_process(&self, record: &ProcessRecord) -> Result<(), BackendError> {
        self.post_unit("save_process", "/api/Evaluation", record).await
    }

    async fn fetch_processes(&self, query: &ProcessQuery) -> Result<ProcessList, BackendError> {
        self.get_json("fetch_processes", "/api/get-processes", query).await
    }

    async fn diagnose_symptoms(
        &self,
        request: &SymptomRequest,
    ) -> Result<Diagnosis, BackendError> {
        self.post_json("diagnose_symptoms", "/api/diagnose-symptoms", request)
            .await
    }

    async fn submit_feedback(
        &self,
        request: &FeedbackRequest,
    ) -> Result<FeedbackResponse, BackendError> {
        self.post_json("submit_feedback", "/api/feedback", request).await
    }

    async fn evaluate_suitability(
        &self,
        request: &SuitabilityRequest,
    ) -> Result<SuitabilityReport, BackendError> {
        self.post_json("evaluate_suitability", "/api/process-eval", request)
            .await
    }
}
