use serde::{Deserialize, Serialize};

/// Untrusted wire payload for `POST /contact`. The site sends camelCase
/// keys; fields are optional at the serde level so missing values turn into
/// validation messages rather than deserialization failures.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitContactRequest {
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub service: Option<String>,
    #[serde(default)]
    pub heard_from: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitContactResponse {
    pub success: bool,
    pub tracking_id: String,
    pub message: String,
}

/// What the contact service hands back after a successful intake.
#[derive(Debug, Clone)]
pub struct ContactSubmissionReceipt {
    pub tracking_id: String,
    pub confirmation: String,
}
