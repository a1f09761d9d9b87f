use bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// A general inquiry from the contact form. Inserted once, never mutated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactMessage {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub service: Option<String>,
    pub heard_from: Option<String>,
    pub message: String,
    pub created_at: Option<String>,
}
