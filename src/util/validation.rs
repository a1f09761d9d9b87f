//! Field rules shared by the intake handlers and the quote wizard.
//!
//! Both sides must enforce the same constraints (the wizard for immediate
//! feedback, the handlers because client input is untrusted), so the rules
//! live here once and are called from both. Every validator accumulates all
//! failures instead of stopping at the first one.

use regex::Regex;
use std::sync::LazyLock;

use crate::dto::contact_dto::SubmitContactRequest;
use crate::dto::quote_dto::SubmitQuoteRequest;

pub const NAME_MAX_LEN: usize = 100;
pub const CONTACT_NAME_MIN_LEN: usize = 2;
pub const EMAIL_MAX_LEN: usize = 255;
pub const SERVICE_MAX_LEN: usize = 100;
pub const CITY_MAX_LEN: usize = 100;
pub const STATE_MAX_LEN: usize = 50;
pub const QUOTE_MESSAGE_MAX_LEN: usize = 2000;
pub const CONTACT_MESSAGE_MIN_LEN: usize = 10;
pub const CONTACT_MESSAGE_MAX_LEN: usize = 500;
pub const PHONE_DIGITS: usize = 10;

/// Media constraints for project photos, enforced in the wizard and again
/// by the upload endpoint.
pub const MAX_IMAGE_COUNT: usize = 8;
pub const MAX_IMAGE_BYTES: usize = 10 * 1024 * 1024;
pub const ACCEPTED_IMAGE_TYPES: [&str; 3] = ["image/jpeg", "image/png", "image/webp"];

static EMAIL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").unwrap());

/// Contact form phones must arrive pre-formatted as `(XXX) XXX-XXXX`.
static CONTACT_PHONE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\(\d{3}\) \d{3}-\d{4}$").unwrap());

pub fn validate_email(email: &str) -> bool {
    !email.is_empty() && email.len() <= EMAIL_MAX_LEN && EMAIL_REGEX.is_match(email)
}

/// Digits-only rendition of a phone number; accepted iff exactly ten digits.
pub fn normalize_phone(phone: &str) -> Option<String> {
    let digits: String = phone.chars().filter(|c| c.is_ascii_digit()).collect();
    (digits.len() == PHONE_DIGITS).then_some(digits)
}

/// Render ten digits back to the `(XXX) XXX-XXXX` display form.
pub fn format_phone(digits: &str) -> String {
    if digits.len() != PHONE_DIGITS || !digits.chars().all(|c| c.is_ascii_digit()) {
        return digits.to_string();
    }
    format!("({}) {}-{}", &digits[..3], &digits[3..6], &digits[6..])
}

pub fn is_contact_phone(phone: &str) -> bool {
    CONTACT_PHONE_REGEX.is_match(phone)
}

fn trimmed(value: &Option<String>) -> &str {
    value.as_deref().map(str::trim).unwrap_or("")
}

/// All failures for a quote submission payload; an empty list means valid.
pub fn validate_quote_submission(payload: &SubmitQuoteRequest) -> Vec<String> {
    let mut errors = Vec::new();

    let name = trimmed(&payload.customer_name);
    if name.is_empty() {
        errors.push("Name is required".to_string());
    } else if name.chars().count() > NAME_MAX_LEN {
        errors.push(format!("Name must be at most {} characters", NAME_MAX_LEN));
    }

    let email = trimmed(&payload.email);
    if !validate_email(email) {
        errors.push("A valid email address is required".to_string());
    }

    let phone = trimmed(&payload.phone);
    if !phone.is_empty() && normalize_phone(phone).is_none() {
        errors.push(format!(
            "Phone number must contain exactly {} digits",
            PHONE_DIGITS
        ));
    }

    let service = trimmed(&payload.service_requested);
    if service.is_empty() {
        errors.push("A requested service is required".to_string());
    } else if service.chars().count() > SERVICE_MAX_LEN {
        errors.push(format!(
            "Requested service must be at most {} characters",
            SERVICE_MAX_LEN
        ));
    }

    if trimmed(&payload.property_city).chars().count() > CITY_MAX_LEN {
        errors.push(format!("City must be at most {} characters", CITY_MAX_LEN));
    }

    if trimmed(&payload.property_state).chars().count() > STATE_MAX_LEN {
        errors.push(format!("State must be at most {} characters", STATE_MAX_LEN));
    }

    if trimmed(&payload.message).chars().count() > QUOTE_MESSAGE_MAX_LEN {
        errors.push(format!(
            "Project description must be at most {} characters",
            QUOTE_MESSAGE_MAX_LEN
        ));
    }

    if let Some(urls) = &payload.image_urls {
        if urls.len() > MAX_IMAGE_COUNT {
            errors.push(format!(
                "At most {} photos may be attached",
                MAX_IMAGE_COUNT
            ));
        }
    }

    errors
}

/// All failures for a contact submission payload; an empty list means valid.
pub fn validate_contact_submission(payload: &SubmitContactRequest) -> Vec<String> {
    let mut errors = Vec::new();

    let name = trimmed(&payload.full_name);
    let name_len = name.chars().count();
    if name_len < CONTACT_NAME_MIN_LEN {
        errors.push(format!(
            "Full name must be at least {} characters",
            CONTACT_NAME_MIN_LEN
        ));
    } else if name_len > NAME_MAX_LEN {
        errors.push(format!(
            "Full name must be at most {} characters",
            NAME_MAX_LEN
        ));
    }

    let email = trimmed(&payload.email);
    if !validate_email(email) {
        errors.push("A valid email address is required".to_string());
    }

    let phone = trimmed(&payload.phone);
    if !is_contact_phone(phone) {
        errors.push("Phone number must use the format (XXX) XXX-XXXX".to_string());
    }

    let message = trimmed(&payload.message);
    let message_len = message.chars().count();
    if message_len < CONTACT_MESSAGE_MIN_LEN {
        errors.push(format!(
            "Message must be at least {} characters",
            CONTACT_MESSAGE_MIN_LEN
        ));
    } else if message_len > CONTACT_MESSAGE_MAX_LEN {
        errors.push(format!(
            "Message must be at most {} characters",
            CONTACT_MESSAGE_MAX_LEN
        ));
    }

    if trimmed(&payload.service).chars().count() > SERVICE_MAX_LEN {
        errors.push(format!(
            "Service must be at most {} characters",
            SERVICE_MAX_LEN
        ));
    }

    if trimmed(&payload.heard_from).chars().count() > NAME_MAX_LEN {
        errors.push(format!(
            "Referral source must be at most {} characters",
            NAME_MAX_LEN
        ));
    }

    errors
}

/// Per-file check for a project photo before it enters the upload pipeline.
pub fn validate_image_upload(
    file_name: &str,
    content_type: &str,
    size: usize,
) -> Result<(), String> {
    if !ACCEPTED_IMAGE_TYPES.contains(&content_type) {
        return Err(format!(
            "{}: unsupported format (use JPEG, PNG, or WebP)",
            file_name
        ));
    }
    if size > MAX_IMAGE_BYTES {
        return Err(format!(
            "{}: file is larger than {} MB",
            file_name,
            MAX_IMAGE_BYTES / (1024 * 1024)
        ));
    }
    Ok(())
}
