//! Client for the farm REST backend
//!
//! Every terminal action of a USSD flow performs exactly one call through
//! [`FarmBackend`]. Failures are normalized to [`BackendError`] here so that
//! nothing above this layer inspects raw response shapes.

mod error;
mod http;
mod types;

#[cfg(test)]
pub mod testing;

pub use error::BackendError;
pub use http::HttpBackend;
pub use types::*;

use async_trait::async_trait;

/// Operations the USSD flows call on the farm backend
#[async_trait]
pub trait FarmBackend: Send + Sync {
    /// Check a farmer's credentials
    async fn authenticate(&self, request: &LoginRequest) -> Result<LoginResponse, BackendError>;

    /// Create a farmer account
    async fn create_account(&self, request: &RegisterRequest) -> Result<(), BackendError>;

    /// Ask the crop model what to plant
    async fn recommend_crop(
        &self,
        request: &RecommendRequest,
    ) -> Result<Recommendation, BackendError>;

    /// Store a crop process record
    async fn save_process(&self, record: &ProcessRecord) -> Result<(), BackendError>;

    /// List a farmer's process records, newest first
    async fn fetch_processes(&self, query: &ProcessQuery) -> Result<ProcessList, BackendError>;

    /// Diagnose a disease from a symptom description
    async fn diagnose_symptoms(&self, request: &SymptomRequest)
        -> Result<Diagnosis, BackendError>;

    /// Record farmer feedback
    async fn submit_feedback(
        &self,
        request: &FeedbackRequest,
    ) -> Result<FeedbackResponse, BackendError>;

    /// Score how suitable conditions are for a crop at a growth stage
    async fn evaluate_suitability(
        &self,
        request: &SuitabilityRequest,
    ) -> Result<SuitabilityReport, BackendError>;
}
