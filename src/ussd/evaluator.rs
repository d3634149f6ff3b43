//! Positional step evaluation
//!
//! The next step is decided purely by how many answers exist, never by
//! what they say. This function is pure: the same flow and state always
//! produce the same step.

use super::error::UssdError;
use super::flows::{Field, FieldKind, FlowDefinition};
use super::session::SessionState;

/// What the dialogue does next
#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    /// Ask the prompt for the next unanswered field
    Prompt(&'static str),
    /// All answers are present but some failed validation
    Rejected(Vec<FieldError>),
    /// All answers are present and valid; run the terminal action
    Ready(FieldValues),
}

/// A single validation failure
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub label: &'static str,
    pub problem: &'static str,
}

impl FieldError {
    fn describe(&self) -> String {
        format!("{} {}", self.label, self.problem)
    }
}

/// Describe failures for an `END` reply
pub fn rejection_message(errors: &[FieldError]) -> String {
    let parts: Vec<String> = errors.iter().map(FieldError::describe).collect();
    format!("Invalid input: {}", parts.join(", "))
}

/// A validated answer
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    /// Parsed value plus the text the farmer typed
    Number { value: f64, raw: String },
}

/// Validated answers keyed by field name, in prompt order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldValues {
    values: Vec<(&'static str, FieldValue)>,
}

impl FieldValues {
    fn get(&self, name: &'static str) -> Result<&FieldValue, UssdError> {
        self.values
            .iter()
            .find(|(field, _)| *field == name)
            .map(|(_, value)| value)
            .ok_or(UssdError::MissingField(name))
    }

    /// Answer exactly as typed, numeric fields included
    pub fn text(&self, name: &'static str) -> Result<String, UssdError> {
        match self.get(name)? {
            FieldValue::Text(text) | FieldValue::Number { raw: text, .. } => Ok(text.clone()),
        }
    }

    pub fn number(&self, name: &'static str) -> Result<f64, UssdError> {
        match self.get(name)? {
            FieldValue::Number { value, .. } => Ok(*value),
            FieldValue::Text(_) => Err(UssdError::NotNumeric(name)),
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }
}

fn validate(field: &Field, raw: &str) -> Result<FieldValue, FieldError> {
    match field.kind {
        FieldKind::Any => Ok(FieldValue::Text(raw.to_string())),
        FieldKind::Text if raw.trim().is_empty() => Err(FieldError {
            label: field.label,
            problem: "is required",
        }),
        FieldKind::Text => Ok(FieldValue::Text(raw.to_string())),
        FieldKind::Number => match raw.trim().parse::<f64>() {
            Ok(value) if value.is_finite() => Ok(FieldValue::Number {
                value,
                raw: raw.to_string(),
            }),
            _ => Err(FieldError {
                label: field.label,
                problem: "must be a number",
            }),
        },
    }
}

/// Decide the next step for `flow` given the answers in `state`.
///
/// Answers beyond the flow's field count are ignored.
pub fn evaluate(flow: &FlowDefinition, state: &SessionState) -> Step {
    if let Some(prompt) = flow.prompt(state.step()) {
        return Step::Prompt(prompt);
    }

    let mut values = Vec::with_capacity(flow.fields.len());
    let mut errors = Vec::new();

    for (field, raw) in flow.fields.iter().zip(&state.answers) {
        match validate(field, raw) {
            Ok(value) => values.push((field.name, value)),
            Err(e) => errors.push(e),
        }
    }

    if errors.is_empty() {
        Step::Ready(FieldValues { values })
    } else {
        Step::Rejected(errors)
    }
}
