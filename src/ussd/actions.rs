//! Terminal actions: one backend call per completed flow
//!
//! Each action turns validated answers into exactly one [`FarmBackend`]
//! request and renders the outcome as the dialogue's final reply. Backend
//! failures become `END` replies carrying the failure reason.

use super::error::UssdError;
use super::evaluator::FieldValues;
use super::flows::TerminalAction;
use super::reply::Reply;
use crate::backend::{
    FarmBackend, FeedbackRequest, GrowthStage, LoginRequest, ProcessEntry, ProcessQuery,
    ProcessRecord, RecommendRequest, RegisterRequest, SoilReadings, SuitabilityReport,
    SuitabilityRequest, SymptomRequest,
};
use chrono::{DateTime, NaiveDate};
use serde_json::Value;

const MAX_ALTERNATIVES: usize = 5;
const MAX_PROCESS_ROWS: usize = 5;
const MAX_SUITABILITY_ISSUES: usize = 3;

const EXPERT_DIRECTORY: &str =
    "Agro Hotline: 0700 000 000\nSoil Lab: 0711 111 111\nCounty Ext: 0722 222 222";

/// Run `action` with the flow's validated answers.
///
/// `Err` means the flow table and the action disagree about field names,
/// which is a programming error rather than a user or backend failure.
pub async fn run(
    action: TerminalAction,
    values: &FieldValues,
    backend: &dyn FarmBackend,
) -> Result<Reply, UssdError> {
    match action {
        TerminalAction::Login => login(values, backend).await,
        TerminalAction::Register => register(values, backend).await,
        TerminalAction::CropAdvice => crop_advice(values, backend).await,
        TerminalAction::RecordProcess => record_process(values, backend).await,
        TerminalAction::ViewProcesses => view_processes(values, backend).await,
        TerminalAction::DiseaseAdvice => disease_advice(values, backend).await,
        TerminalAction::Feedback => feedback(values, backend).await,
        TerminalAction::ExpertDirectory => Ok(Reply::end(EXPERT_DIRECTORY)),
        TerminalAction::SuitabilityCheck => suitability_check(values, backend).await,
    }
}

async fn login(values: &FieldValues, backend: &dyn FarmBackend) -> Result<Reply, UssdError> {
    let request = LoginRequest {
        farmers_id: values.text("farmers_id")?,
        password: values.text("password")?,
    };
    Ok(match backend.authenticate(&request).await {
        Ok(_) => Reply::end("Login successful."),
        Err(e) => Reply::end(format!("Login failed: {e}")),
    })
}

async fn register(values: &FieldValues, backend: &dyn FarmBackend) -> Result<Reply, UssdError> {
    let password = values.text("password")?;
    let request = RegisterRequest {
        farmers_id: values.text("farmers_id")?,
        full_name: values.text("full_name")?,
        contact: values.text("contact")?,
        land_size: values.text("land_size")?,
        soil_type: values.text("soil_type")?,
        confirm_password: password.clone(),
        password,
    };
    Ok(match backend.create_account(&request).await {
        Ok(()) => Reply::end("Registration successful."),
        Err(e) => Reply::end(format!("Registration failed: {e}")),
    })
}

fn soil_readings(values: &FieldValues) -> Result<SoilReadings, UssdError> {
    Ok(SoilReadings {
        nitrogen: values.number("N")?,
        phosphorus: values.number("P")?,
        potassium: values.number("K")?,
        temperature: values.number("temperature")?,
        humidity: values.number("humidity")?,
        ph: values.number("ph")?,
        rainfall: values.number("rainfall")?,
    })
}

async fn crop_advice(values: &FieldValues, backend: &dyn FarmBackend) -> Result<Reply, UssdError> {
    // The city only feeds the web weather lookup; the model takes raw readings
    let city = values.text("city")?;
    tracing::debug!(city = %city, "Crop advice requested");

    let request = RecommendRequest {
        readings: soil_readings(values)?,
    };
    let recommendation = match backend.recommend_crop(&request).await {
        Ok(r) => r,
        Err(e) => return Ok(Reply::end(format!("Could not get recommendation: {e}"))),
    };

    let mut message = recommendation
        .message
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| "Recommendation ready.".to_string());

    let alternatives: Vec<String> = recommendation
        .alternatives
        .unwrap_or_default()
        .into_iter()
        .take(MAX_ALTERNATIVES)
        .collect();
    if !alternatives.is_empty() {
        message.push_str("\nAlternatives: ");
        message.push_str(&alternatives.join(", "));
    }

    Ok(Reply::end(message))
}

async fn record_process(
    values: &FieldValues,
    backend: &dyn FarmBackend,
) -> Result<Reply, UssdError> {
    let record = ProcessRecord {
        farmers_id: values.text("farmers_id")?,
        crop: values.text("crop")?,
        process_type: values.text("process_type")?,
        process_date: values.text("process_date")?,
    };
    Ok(match backend.save_process(&record).await {
        Ok(()) => Reply::end("Process saved."),
        Err(e) => Reply::end(format!("Save failed: {e}")),
    })
}

/// Calendar day of a stored timestamp or date, `-` if unreadable
fn format_process_date(raw: Option<&str>) -> String {
    let Some(raw) = raw.map(str::trim).filter(|r| !r.is_empty()) else {
        return "-".to_string();
    };
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(raw) {
        return timestamp.naive_utc().date().format("%Y-%m-%d").to_string();
    }
    match NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        Ok(date) => date.format("%Y-%m-%d").to_string(),
        Err(_) => "-".to_string(),
    }
}

fn process_row(entry: &ProcessEntry) -> String {
    format!(
        "{} • {} • {}",
        format_process_date(entry.process_date.as_deref()),
        entry.crop,
        entry.process_type
    )
}

async fn view_processes(
    values: &FieldValues,
    backend: &dyn FarmBackend,
) -> Result<Reply, UssdError> {
    let query = ProcessQuery {
        farmers_id: values.text("farmers_id")?,
    };
    let list = match backend.fetch_processes(&query).await {
        Ok(list) => list,
        Err(e) => return Ok(Reply::end(format!("Lookup failed: {e}"))),
    };

    let rows: Vec<String> = list
        .processes
        .iter()
        .take(MAX_PROCESS_ROWS)
        .map(process_row)
        .collect();

    if rows.is_empty() {
        return Ok(Reply::end("No processes found."));
    }
    Ok(Reply::end(rows.join("\n")))
}

async fn disease_advice(
    values: &FieldValues,
    backend: &dyn FarmBackend,
) -> Result<Reply, UssdError> {
    let request = SymptomRequest {
        symptoms: values.text("symptoms")?,
    };
    let diagnosis = match backend.diagnose_symptoms(&request).await {
        Ok(d) => d,
        Err(e) => return Ok(Reply::end(format!("Error: {e}"))),
    };

    let disease = diagnosis.disease.unwrap_or_else(|| "Unknown".to_string());
    let remedies = match diagnosis.remedies {
        Some(remedies) => remedies.join(", "),
        None => "-".to_string(),
    };
    Ok(Reply::end(format!("Disease: {disease}\nRemedies: {remedies}")))
}

async fn feedback(values: &FieldValues, backend: &dyn FarmBackend) -> Result<Reply, UssdError> {
    let farmers_id = values.text("farmers_id")?;
    // Collected for the farmer's benefit; the backend only stores a status
    let comment = values.text("comment")?;
    tracing::info!(farmers_id = %farmers_id, comment = %comment, "Feedback received");

    let request = FeedbackRequest {
        farmers_id,
        status: "true".to_string(),
    };
    Ok(match backend.submit_feedback(&request).await {
        Ok(response) => Reply::end(
            response
                .message
                .filter(|m| !m.is_empty())
                .unwrap_or_else(|| "Thanks for your feedback.".to_string()),
        ),
        Err(e) => Reply::end(format!("Could not save feedback: {e}")),
    })
}

fn flag_label(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn suitability_message(report: &SuitabilityReport) -> String {
    let status = if report.prediction.as_deref() == Some("suitable") {
        "Suitable"
    } else {
        "Not suitable"
    };
    let pct = (report.suitability_score.unwrap_or(0.0) * 100.0).round();
    let mut message = format!("{status}. Score: {pct}%");

    let issues: Vec<(&String, &Value)> = report
        .flags
        .iter()
        .filter(|(_, v)| v.as_str() != Some("ok"))
        .collect();
    if !issues.is_empty() {
        message.push_str("\nIssues:");
        for (field, label) in issues.into_iter().take(MAX_SUITABILITY_ISSUES) {
            message.push_str(&format!("\n- {field}: {}", flag_label(label)));
        }
    }
    message
}

async fn suitability_check(
    values: &FieldValues,
    backend: &dyn FarmBackend,
) -> Result<Reply, UssdError> {
    let process_type = values.text("process_type")?;
    let request = SuitabilityRequest {
        crop: values.text("crop")?.to_lowercase(),
        stage: GrowthStage::for_process_type(&process_type),
        readings: soil_readings(values)?,
    };
    Ok(match backend.evaluate_suitability(&request).await {
        Ok(report) => Reply::end(suitability_message(&report)),
        Err(e) => Reply::end(format!("Check failed: {e}")),
    })
}
