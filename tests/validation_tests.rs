use oakridge_backend::dto::contact_dto::SubmitContactRequest;
use oakridge_backend::dto::quote_dto::SubmitQuoteRequest;
use oakridge_backend::util::validation::{
    format_phone, is_contact_phone, normalize_phone, validate_contact_submission,
    validate_email, validate_image_upload, validate_quote_submission, MAX_IMAGE_BYTES,
    MAX_IMAGE_COUNT, NAME_MAX_LEN,
};

fn valid_quote() -> SubmitQuoteRequest {
    SubmitQuoteRequest {
        customer_name: Some("Jane Doe".to_string()),
        email: Some("jane@example.com".to_string()),
        service_requested: Some("Kitchen Remodeling".to_string()),
        ..Default::default()
    }
}

fn valid_contact() -> SubmitContactRequest {
    SubmitContactRequest {
        full_name: Some("John Smith".to_string()),
        email: Some("john@example.com".to_string()),
        phone: Some("(555) 123-4567".to_string()),
        message: Some("I would like to talk about my basement.".to_string()),
        ..Default::default()
    }
}

#[cfg(test)]
mod email_tests {
    use super::*;

    #[test]
    fn test_accepts_plain_addresses() {
        assert!(validate_email("jane@example.com"));
        assert!(validate_email("first.last+tag@sub.domain.org"));
    }

    #[test]
    fn test_rejects_malformed_addresses() {
        assert!(!validate_email(""));
        assert!(!validate_email("not-an-email"));
        assert!(!validate_email("missing@tld"));
        assert!(!validate_email("@example.com"));
        assert!(!validate_email("jane@.com"));
    }

    #[test]
    fn test_rejects_over_length_address() {
        let local = "a".repeat(250);
        let email = format!("{}@example.com", local);
        assert!(!validate_email(&email));
    }
}

#[cfg(test)]
mod phone_tests {
    use super::*;

    #[test]
    fn test_normalize_accepts_ten_digits() {
        assert_eq!(normalize_phone("5551234567").as_deref(), Some("5551234567"));
        assert_eq!(
            normalize_phone("(555) 123-4567").as_deref(),
            Some("5551234567")
        );
        assert_eq!(
            normalize_phone("555.123.4567").as_deref(),
            Some("5551234567")
        );
    }

    #[test]
    fn test_normalize_rejects_other_lengths() {
        assert!(normalize_phone("").is_none());
        assert!(normalize_phone("123").is_none());
        assert!(normalize_phone("1 (555) 123-4567").is_none());
    }

    #[test]
    fn test_format_round_trip() {
        // Any accepted phone re-formats and re-normalizes to the same digits
        for input in ["5551234567", "(555) 123-4567", "555-123-4567 "] {
            let digits = normalize_phone(input).expect("should normalize");
            let formatted = format_phone(&digits);
            assert_eq!(formatted, "(555) 123-4567");
            assert_eq!(normalize_phone(&formatted).as_deref(), Some(&digits[..]));
        }
    }

    #[test]
    fn test_contact_phone_pattern() {
        assert!(is_contact_phone("(555) 123-4567"));
        assert!(!is_contact_phone("555-123-4567"));
        assert!(!is_contact_phone("(555)123-4567"));
        assert!(!is_contact_phone("(555) 123-45678"));
    }
}

#[cfg(test)]
mod quote_rule_tests {
    use super::*;

    #[test]
    fn test_valid_payload_has_no_errors() {
        assert!(validate_quote_submission(&valid_quote()).is_empty());
    }

    #[test]
    fn test_validation_is_deterministic() {
        let mut payload = valid_quote();
        payload.email = Some("nope".to_string());
        payload.customer_name = None;
        let first = validate_quote_submission(&payload);
        let second = validate_quote_submission(&payload);
        assert_eq!(first, second);
    }

    #[test]
    fn test_missing_required_fields_all_reported() {
        let payload = SubmitQuoteRequest::default();
        let errors = validate_quote_submission(&payload);
        assert!(errors.iter().any(|e| e.contains("Name")));
        assert!(errors.iter().any(|e| e.contains("email")));
        assert!(errors.iter().any(|e| e.contains("service")));
        assert_eq!(errors.len(), 3);
    }

    #[test]
    fn test_over_length_name_rejected() {
        let mut payload = valid_quote();
        payload.customer_name = Some("x".repeat(NAME_MAX_LEN + 1));
        let errors = validate_quote_submission(&payload);
        assert!(errors.iter().any(|e| e.contains("at most 100")));
    }

    #[test]
    fn test_bad_optional_phone_rejected() {
        let mut payload = valid_quote();
        payload.phone = Some("12345".to_string());
        let errors = validate_quote_submission(&payload);
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("10 digits"));
    }

    #[test]
    fn test_absent_phone_is_fine() {
        let mut payload = valid_quote();
        payload.phone = Some("   ".to_string());
        assert!(validate_quote_submission(&payload).is_empty());
    }

    #[test]
    fn test_too_many_photos_rejected() {
        let mut payload = valid_quote();
        payload.image_urls = Some(vec!["https://cdn.example.com/a.jpg".to_string(); 9]);
        let errors = validate_quote_submission(&payload);
        assert!(errors.iter().any(|e| e.contains("8 photos")));
    }
}

#[cfg(test)]
mod contact_rule_tests {
    use super::*;

    #[test]
    fn test_valid_payload_has_no_errors() {
        assert!(validate_contact_submission(&valid_contact()).is_empty());
    }

    #[test]
    fn test_short_message_rejected() {
        let mut payload = valid_contact();
        payload.message = Some("Hello".to_string());
        let errors = validate_contact_submission(&payload);
        assert!(errors.iter().any(|e| e.contains("at least 10")));
    }

    #[test]
    fn test_long_message_rejected() {
        let mut payload = valid_contact();
        payload.message = Some("x".repeat(501));
        let errors = validate_contact_submission(&payload);
        assert!(errors.iter().any(|e| e.contains("at most 500")));
    }

    #[test]
    fn test_unformatted_phone_rejected() {
        let mut payload = valid_contact();
        payload.phone = Some("5551234567".to_string());
        let errors = validate_contact_submission(&payload);
        assert!(errors.iter().any(|e| e.contains("(XXX) XXX-XXXX")));
    }

    #[test]
    fn test_every_failure_reported_together() {
        let payload = SubmitContactRequest::default();
        let errors = validate_contact_submission(&payload);
        // name, email, phone, and message all fail at once
        assert_eq!(errors.len(), 4);
    }
}

#[cfg(test)]
mod image_rule_tests {
    use super::*;

    #[test]
    fn test_accepted_formats() {
        assert!(validate_image_upload("a.jpg", "image/jpeg", 1024).is_ok());
        assert!(validate_image_upload("a.png", "image/png", 1024).is_ok());
        assert!(validate_image_upload("a.webp", "image/webp", 1024).is_ok());
    }

    #[test]
    fn test_rejected_format_names_the_file() {
        let err = validate_image_upload("notes.pdf", "application/pdf", 10).unwrap_err();
        assert!(err.contains("notes.pdf"));
        assert!(err.contains("unsupported"));
    }

    #[test]
    fn test_oversized_file_rejected() {
        let err = validate_image_upload("big.jpg", "image/jpeg", MAX_IMAGE_BYTES + 1).unwrap_err();
        assert!(err.contains("big.jpg"));
        assert!(err.contains("larger"));
    }

    #[test]
    fn test_count_cap_is_eight() {
        assert_eq!(MAX_IMAGE_COUNT, 8);
    }
}
