use bson::oid::ObjectId;
use chrono::{DateTime, Datelike, Utc};

/// Prefix for quote request references
pub const QUOTE_PREFIX: &str = "QR";
/// Prefix for contact message references
pub const CONTACT_PREFIX: &str = "MSG";

/// Human-shareable reference built from the creation year and the tail of
/// the store-assigned id, e.g. `MSG-2024-A1B2`. Derived on demand, never
/// stored alongside the record.
pub fn tracking_id(prefix: &str, id: &ObjectId, created_at: Option<&str>) -> String {
    let year = created_at
        .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
        .map(|dt| dt.year())
        .unwrap_or_else(|| Utc::now().year());
    let hex = id.to_hex();
    let frag = hex[hex.len() - 4..].to_uppercase();
    format!("{}-{}-{}", prefix, year, frag)
}
