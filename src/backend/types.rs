//! Request and response payloads for the farm REST backend
//!
//! Field names here are the backend's wire names and must not drift.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// `POST /api/login`
#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub farmers_id: String,
    pub password: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginResponse {
    #[serde(rename = "redirectTo", default)]
    #[allow(dead_code)] // Only meaningful to the web front end
    pub redirect_to: Option<String>,
}

/// `POST /api/register`
#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    pub farmers_id: String,
    #[serde(rename = "fullName")]
    pub full_name: String,
    pub contact: String,
    /// Sent as typed; the backend stores the text
    pub land_size: String,
    pub soil_type: String,
    pub password: String,
    #[serde(rename = "confirmPassword")]
    pub confirm_password: String,
}

/// Soil and climate readings shared by the recommendation and suitability models
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SoilReadings {
    #[serde(rename = "N")]
    pub nitrogen: f64,
    #[serde(rename = "P")]
    pub phosphorus: f64,
    #[serde(rename = "K")]
    pub potassium: f64,
    pub temperature: f64,
    pub humidity: f64,
    pub ph: f64,
    pub rainfall: f64,
}

/// `POST /api/ml-recommend`
#[derive(Debug, Clone, Serialize)]
pub struct RecommendRequest {
    #[serde(flatten)]
    pub readings: SoilReadings,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Recommendation {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub alternatives: Option<Vec<String>>,
}

/// `POST /api/Evaluation`
#[derive(Debug, Clone, Serialize)]
pub struct ProcessRecord {
    pub farmers_id: String,
    pub crop: String,
    pub process_type: String,
    pub process_date: String,
}

/// Query for `GET /api/get-processes`
#[derive(Debug, Clone, Serialize)]
pub struct ProcessQuery {
    pub farmers_id: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProcessList {
    #[serde(default, deserialize_with = "null_as_default")]
    pub processes: Vec<ProcessEntry>,
}

/// One stored crop process, newest first in a [`ProcessList`]
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProcessEntry {
    #[serde(default)]
    pub process_date: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub crop: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub process_type: String,
}

/// `POST /api/diagnose-symptoms`
#[derive(Debug, Clone, Serialize)]
pub struct SymptomRequest {
    pub symptoms: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Diagnosis {
    #[serde(default)]
    pub disease: Option<String>,
    #[serde(default)]
    pub remedies: Option<Vec<String>>,
}

/// `POST /api/feedback`
#[derive(Debug, Clone, Serialize)]
pub struct FeedbackRequest {
    pub farmers_id: String,
    pub status: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct FeedbackResponse {
    #[serde(default)]
    pub message: Option<String>,
}

/// Crop growth stage the suitability model is trained on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GrowthStage {
    Preplant,
    Planting,
    Vegetative,
    Harvest,
}

impl GrowthStage {
    /// Stage a recorded process type belongs to. Unknown types count as vegetative.
    pub fn for_process_type(process_type: &str) -> Self {
        match process_type {
            "land_prep" | "soil_management" => GrowthStage::Preplant,
            "planting" => GrowthStage::Planting,
            "harvest" => GrowthStage::Harvest,
            // irrigation, weed_control, pest_management, fertilization
            _ => GrowthStage::Vegetative,
        }
    }
}

/// `POST /api/process-eval`
#[derive(Debug, Clone, Serialize)]
pub struct SuitabilityRequest {
    pub crop: String,
    pub stage: GrowthStage,
    #[serde(flatten)]
    pub readings: SoilReadings,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SuitabilityReport {
    #[serde(default)]
    pub prediction: Option<String>,
    #[serde(default)]
    pub suitability_score: Option<f64>,
    /// field name -> `"ok"` or an issue label, in the backend's order
    #[serde(default, deserialize_with = "null_as_default")]
    pub flags: Map<String, Value>,
}

/// Treat an explicit `null` like a missing key.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
