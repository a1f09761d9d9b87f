use bson::oid::ObjectId;
use oakridge_backend::util::tracking::{tracking_id, CONTACT_PREFIX, QUOTE_PREFIX};

#[test]
fn test_tracking_id_uses_year_and_id_tail() {
    let id = ObjectId::parse_str("507f1f77bcf86cd799439abc").unwrap();
    let reference = tracking_id(CONTACT_PREFIX, &id, Some("2024-06-01T12:00:00+00:00"));
    assert_eq!(reference, "MSG-2024-9ABC");
}

#[test]
fn test_tracking_id_prefixes_differ_per_record_kind() {
    let id = ObjectId::parse_str("507f1f77bcf86cd799439011").unwrap();
    let quote = tracking_id(QUOTE_PREFIX, &id, Some("2025-01-15T09:30:00+00:00"));
    let contact = tracking_id(CONTACT_PREFIX, &id, Some("2025-01-15T09:30:00+00:00"));
    assert_eq!(quote, "QR-2025-9011");
    assert_eq!(contact, "MSG-2025-9011");
}

#[test]
fn test_tracking_id_is_stable_for_same_record() {
    let id = ObjectId::new();
    let a = tracking_id(QUOTE_PREFIX, &id, Some("2024-03-03T00:00:00+00:00"));
    let b = tracking_id(QUOTE_PREFIX, &id, Some("2024-03-03T00:00:00+00:00"));
    assert_eq!(a, b);
}

#[test]
fn test_unparseable_timestamp_falls_back_to_current_year() {
    let id = ObjectId::new();
    let reference = tracking_id(QUOTE_PREFIX, &id, None);
    let parts: Vec<&str> = reference.split('-').collect();
    assert_eq!(parts.len(), 3);
    assert_eq!(parts[0], "QR");
    assert_eq!(parts[1].len(), 4);
    assert_eq!(parts[2].len(), 4);
}
