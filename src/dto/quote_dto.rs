use serde::{Deserialize, Serialize};

/// Untrusted wire payload for `POST /quotes`. Every field is optional at the
/// serde level so that a missing value surfaces as a validation message in
/// the accumulated error list instead of a deserialization failure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SubmitQuoteRequest {
    #[serde(default)]
    pub customer_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub service_requested: Option<String>,
    #[serde(default)]
    pub property_city: Option<String>,
    #[serde(default)]
    pub property_state: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub image_urls: Option<Vec<String>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitQuoteResponse {
    pub success: bool,
    pub id: String,
}

/// What the quote service hands back after a successful intake.
#[derive(Debug, Clone)]
pub struct QuoteSubmissionReceipt {
    pub id: String,
    pub tracking_id: String,
}

/// Trimmed projection served to the confirmation view; the client re-fetches
/// this by id instead of carrying submission state across navigation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuoteConfirmationDto {
    pub tracking_id: String,
    pub service_requested: String,
    pub property_city: Option<String>,
    pub property_state: Option<String>,
    pub photo_count: usize,
    pub created_at: Option<String>,
}

/// Response for a stored wizard photo upload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadResponse {
    pub success: bool,
    pub url: String,
}
