//! Declarative flow table
//!
//! Each top-level menu entry is one [`FlowDefinition`] row: the prompts it
//! asks in order, how each answer is validated, and which terminal action
//! runs once all answers are in. Flows are linear and never nest.

use std::collections::HashMap;

const WELCOME: &str = "Welcome to SmartFarm";

const PROCESS_TYPE_PROMPT: &str = "Process Type (land_prep/planting/irrigation/weed_control/pest_management/fertilization/harvest/soil_management):";

/// Validation applied to one answer at the final step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Accepted as given
    Any,
    /// Must be non-empty after trimming
    Text,
    /// Must parse as a finite number
    Number,
}

/// One answer a flow collects
#[derive(Debug, Clone, Copy)]
pub struct Field {
    /// Key terminal actions use to read the answer
    pub name: &'static str,
    /// Human name used in validation messages
    pub label: &'static str,
    pub prompt: &'static str,
    pub kind: FieldKind,
}

impl Field {
    const fn new(name: &'static str, label: &'static str, prompt: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            label,
            prompt,
            kind,
        }
    }

    const fn text(name: &'static str, label: &'static str, prompt: &'static str) -> Self {
        Self::new(name, label, prompt, FieldKind::Text)
    }

    const fn number(name: &'static str, label: &'static str, prompt: &'static str) -> Self {
        Self::new(name, label, prompt, FieldKind::Number)
    }
}

/// Backend operation run when a flow has all of its answers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TerminalAction {
    Login,
    Register,
    CropAdvice,
    RecordProcess,
    ViewProcesses,
    DiseaseAdvice,
    Feedback,
    ExpertDirectory,
    SuitabilityCheck,
}

/// A menu flow, selected by the first token of the input
#[derive(Debug, Clone)]
pub struct FlowDefinition {
    pub id: &'static str,
    /// Root menu label
    pub title: &'static str,
    pub fields: Vec<Field>,
    pub action: TerminalAction,
}

impl FlowDefinition {
    /// Selector plus one token per field
    pub fn required_token_count(&self) -> usize {
        self.fields.len() + 1
    }

    pub fn prompt(&self, step: usize) -> Option<&'static str> {
        self.fields.get(step).map(|f| f.prompt)
    }
}

/// Read-only table of flows keyed by selector, built once at startup
pub struct FlowRegistry {
    flows: Vec<FlowDefinition>,
    by_id: HashMap<&'static str, usize>,
    root_menu: String,
}

impl FlowRegistry {
    pub fn new(flows: Vec<FlowDefinition>) -> Self {
        let by_id = flows
            .iter()
            .enumerate()
            .map(|(index, flow)| (flow.id, index))
            .collect();

        let root_menu = std::iter::once(WELCOME.to_string())
            .chain(flows.iter().map(|f| format!("{}. {}", f.id, f.title)))
            .collect::<Vec<_>>()
            .join("\n");

        Self {
            flows,
            by_id,
            root_menu,
        }
    }

    /// The SmartFarm menu
    pub fn builtin() -> Self {
        Self::new(builtin_flows())
    }

    pub fn get(&self, selector: &str) -> Option<&FlowDefinition> {
        self.by_id.get(selector).map(|&index| &self.flows[index])
    }

    pub fn root_menu(&self) -> &str {
        &self.root_menu
    }

    pub fn flows(&self) -> &[FlowDefinition] {
        &self.flows
    }
}

fn builtin_flows() -> Vec<FlowDefinition> {
    vec![
        FlowDefinition {
            id: "1",
            title: "Login",
            fields: vec![
                Field::text("farmers_id", "Farmer ID", "Enter Farmer ID:"),
                Field::text("password", "Password", "Enter Password:"),
            ],
            action: TerminalAction::Login,
        },
        FlowDefinition {
            id: "2",
            title: "Register",
            fields: vec![
                Field::text("farmers_id", "Farmer ID", "Enter Farmer ID:"),
                Field::text("full_name", "Full Name", "Enter Full Name:"),
                Field::text("contact", "Contact", "Enter Contact (phone):"),
                Field::number("land_size", "Land Size", "Enter Land Size (acres):"),
                Field::text("soil_type", "Soil Type", "Enter Soil Type:"),
                Field::text("password", "Password", "Set Password:"),
            ],
            action: TerminalAction::Register,
        },
        FlowDefinition {
            id: "3",
            title: "Weather → ML Crop Advice",
            fields: vec![
                Field::text("city", "City/Town", "Enter City/Town:"),
                Field::number("temperature", "Temperature", "Enter Temperature (°C):"),
                Field::number("humidity", "Humidity", "Enter Humidity (%):"),
                Field::number("N", "Nitrogen", "Enter Nitrogen (N):"),
                Field::number("P", "Phosphorus", "Enter Phosphorus (P):"),
                Field::number("K", "Potassium", "Enter Potassium (K):"),
                Field::number("ph", "Soil pH", "Enter soil pH:"),
                Field::number("rainfall", "Rainfall", "Enter Rainfall (mm):"),
            ],
            action: TerminalAction::CropAdvice,
        },
        FlowDefinition {
            id: "4",
            title: "Record Crop Process",
            fields: vec![
                Field::text("farmers_id", "Farmer ID", "Enter Farmer ID:"),
                Field::text("crop", "Crop", "Enter Crop (e.g., maize):"),
                Field::text("process_type", "Process Type", PROCESS_TYPE_PROMPT),
                Field::text("process_date", "Process Date", "Enter Process Date (YYYY-MM-DD):"),
            ],
            action: TerminalAction::RecordProcess,
        },
        FlowDefinition {
            id: "5",
            title: "View My Processes",
            fields: vec![Field::text("farmers_id", "Farmer ID", "Enter Farmer ID:")],
            action: TerminalAction::ViewProcesses,
        },
        FlowDefinition {
            id: "6",
            title: "Quick Disease Advice",
            fields: vec![Field::text(
                "symptoms",
                "Symptoms",
                "Describe crop symptoms (short):",
            )],
            action: TerminalAction::DiseaseAdvice,
        },
        FlowDefinition {
            id: "7",
            title: "Feedback",
            fields: vec![
                Field::text("farmers_id", "Farmer ID", "Enter Farmer ID:"),
                Field::new("comment", "Feedback", "Share your feedback (short):", FieldKind::Any),
            ],
            action: TerminalAction::Feedback,
        },
        FlowDefinition {
            id: "8",
            title: "Expert Profiles",
            fields: vec![],
            action: TerminalAction::ExpertDirectory,
        },
        FlowDefinition {
            id: "9",
            title: "Process Suitability Check",
            fields: vec![
                Field::text("crop", "Crop", "Crop (e.g., maize):"),
                Field::text("process_type", "Process Type", PROCESS_TYPE_PROMPT),
                Field::number("N", "Nitrogen", "Nitrogen (N):"),
                Field::number("P", "Phosphorus", "Phosphorus (P):"),
                Field::number("K", "Potassium", "Potassium (K):"),
                Field::number("temperature", "Temperature", "Temperature (°C):"),
                Field::number("humidity", "Humidity", "Humidity (%):"),
                Field::number("ph", "Soil pH", "Soil pH:"),
                Field::number("rainfall", "Rainfall", "Rainfall (mm):"),
            ],
            action: TerminalAction::SuitabilityCheck,
        },
    ]
}
