//! API request types

use serde::Deserialize;

/// One dialogue step as posted by the USSD gateway.
///
/// Every field is optional; the gateway omits `text` on the first step.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UssdParams {
    #[serde(default)]
    pub session_id: Option<String>,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub service_code: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
}
