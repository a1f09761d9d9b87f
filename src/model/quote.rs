use bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// One prospective customer's request for an estimate. Inserted once by the
/// intake workflow and never mutated or deleted by it; the `status` field is
/// consumed by the office dashboard.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuoteRequest {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub customer_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub service_requested: String,
    pub property_city: Option<String>,
    pub property_state: Option<String>,
    pub message: Option<String>,
    pub image_urls: Option<Vec<String>>,
    pub status: Option<String>,
    pub created_at: Option<String>,
}
