//! Mock backend for testing
//!
//! Records every call with its JSON payload and answers from queued results.

use super::types::{
    Diagnosis, FeedbackRequest, FeedbackResponse, LoginRequest, LoginResponse, ProcessList,
    ProcessQuery, ProcessRecord, RecommendRequest, Recommendation, RegisterRequest,
    SuitabilityReport, SuitabilityRequest, SymptomRequest,
};
use super::{BackendError, FarmBackend};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

/// A call observed by [`MockBackend`]
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    pub operation: &'static str,
    pub payload: Value,
}

/// Mock backend that returns queued responses per operation
#[derive(Default)]
pub struct MockBackend {
    responses: Mutex<HashMap<&'static str, VecDeque<Result<Value, BackendError>>>>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl MockBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a successful JSON body for an operation
    pub fn respond(self, operation: &'static str, body: Value) -> Self {
        self.push(operation, Ok(body));
        self
    }

    /// Queue a failure for an operation
    pub fn fail(self, operation: &'static str, reason: &str) -> Self {
        self.push(operation, Err(BackendError::new(reason)));
        self
    }

    fn push(&self, operation: &'static str, result: Result<Value, BackendError>) {
        self.responses
            .lock()
            .unwrap()
            .entry(operation)
            .or_default()
            .push_back(result);
    }

    /// Get recorded calls
    pub fn recorded_calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    fn answer<P: Serialize, R: DeserializeOwned>(
        &self,
        operation: &'static str,
        payload: &P,
    ) -> Result<R, BackendError> {
        self.calls.lock().unwrap().push(RecordedCall {
            operation,
            payload: serde_json::to_value(payload).unwrap(),
        });

        let queued = self
            .responses
            .lock()
            .unwrap()
            .get_mut(operation)
            .and_then(VecDeque::pop_front)
            .unwrap_or_else(|| Err(BackendError::new(format!("No mock response queued for {operation}"))))?;

        Ok(serde_json::from_value(queued).unwrap())
    }
}

#[async_trait]
impl FarmBackend for MockBackend {
    async fn authenticate(&self, request: &LoginRequest) -> Result<LoginResponse, BackendError> {
        self.answer("authenticate", request)
    }

    async fn create_account(&self, request: &RegisterRequest) -> Result<(), BackendError> {
        self.answer::<_, Value>("create_account", request).map(|_| ())
    }

    async fn recommend_crop(
        &self,
        request: &RecommendRequest,
    ) -> Result<Recommendation, BackendError> {
        self.answer("recommend_crop", request)
    }

    async fn save_process(&self, record: &ProcessRecord) -> Result<(), BackendError> {
        self.answer::<_, Value>("save_process", record).map(|_| ())
    }

    async fn fetch_processes(&self, query: &ProcessQuery) -> Result<ProcessList, BackendError> {
        self.answer("fetch_processes", query)
    }

    async fn diagnose_symptoms(
        &self,
        request: &SymptomRequest,
    ) -> Result<Diagnosis, BackendError> {
        self.answer("diagnose_symptoms", request)
    }

    async fn submit_feedback(
        &self,
        request: &FeedbackRequest,
    ) -> Result<FeedbackResponse, BackendError> {
        self.answer("submit_feedback", request)
    }

    async fn evaluate_suitability(
        &self,
        request: &SuitabilityRequest,
    ) -> Result<SuitabilityReport, BackendError> {
        self.answer("evaluate_suitability", request)
    }
}
