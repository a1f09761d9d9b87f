use async_trait::async_trait;
use bson::oid::ObjectId;
use std::sync::Arc;
use tracing::{info, instrument, warn};

use crate::dto::quote_dto::{QuoteConfirmationDto, QuoteSubmissionReceipt, SubmitQuoteRequest};
use crate::model::quote::QuoteRequest;
use crate::repository::quote_repo::QuoteRepository;
use crate::service::notification::NotificationQueue;
use crate::util::error::{ServiceError, GENERIC_FAILURE_MESSAGE};
use crate::util::minio::MinioService;
use crate::util::tracking;
use crate::util::validation::{
    validate_image_upload, validate_quote_submission, CITY_MAX_LEN, EMAIL_MAX_LEN, NAME_MAX_LEN,
    QUOTE_MESSAGE_MAX_LEN, SERVICE_MAX_LEN, STATE_MAX_LEN,
};
use crate::wizard::machine::{QuoteSubmitter, SubmissionReceipt, SubmitError};

#[async_trait]
pub trait QuoteService: Send + Sync {
    /// Validate, normalize, persist, and queue notifications for one quote
    /// submission.
    async fn register_quote(
        &self,
        payload: SubmitQuoteRequest,
    ) -> Result<QuoteSubmissionReceipt, ServiceError>;

    /// Trimmed read-back for the confirmation view.
    async fn get_confirmation(&self, id: ObjectId) -> Result<QuoteConfirmationDto, ServiceError>;

    /// Store one wizard photo and hand back its public link.
    async fn store_wizard_image(
        &self,
        file_name: &str,
        content_type: &str,
        data: Vec<u8>,
    ) -> Result<String, ServiceError>;
}

pub struct QuoteServiceImpl {
    pub quote_repo: Arc<dyn QuoteRepository>,
    pub notifications: Arc<NotificationQueue>,
    pub media: Option<Arc<MinioService>>,
}

fn truncate(value: &str, max: usize) -> String {
    value.chars().take(max).collect()
}

fn clean_optional(value: &Option<String>, max: usize) -> Option<String> {
    let trimmed = value.as_deref().map(str::trim).unwrap_or("");
    (!trimmed.is_empty()).then(|| truncate(trimmed, max))
}

/// Shape a validated payload into the stored document: trim everything,
/// lowercase the email, keep only digit/paren/dash characters of the phone,
/// and clamp every field to its cap.
fn normalize_quote(payload: &SubmitQuoteRequest) -> QuoteRequest {
    let phone = payload
        .phone
        .as_deref()
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(|p| {
            p.chars()
                .filter(|c| c.is_ascii_digit() || matches!(c, '(' | ')' | '-'))
                .collect::<String>()
        });

    let image_urls = payload.image_urls.as_ref().map(|urls| {
        urls.iter()
            .map(|u| u.trim().to_string())
            .filter(|u| !u.is_empty())
            .collect::<Vec<_>>()
    });

    QuoteRequest {
        id: None,
        customer_name: truncate(
            payload.customer_name.as_deref().unwrap_or("").trim(),
            NAME_MAX_LEN,
        ),
        email: truncate(
            &payload
                .email
                .as_deref()
                .unwrap_or("")
                .trim()
                .to_lowercase(),
            EMAIL_MAX_LEN,
        ),
        phone,
        service_requested: truncate(
            payload.service_requested.as_deref().unwrap_or("").trim(),
            SERVICE_MAX_LEN,
        ),
        property_city: clean_optional(&payload.property_city, CITY_MAX_LEN),
        property_state: clean_optional(&payload.property_state, STATE_MAX_LEN),
        message: clean_optional(&payload.message, QUOTE_MESSAGE_MAX_LEN),
        image_urls,
        status: None,
        created_at: None,
    }
}

#[async_trait]
impl QuoteService for QuoteServiceImpl {
    #[instrument(skip(self, payload))]
    async fn register_quote(
        &self,
        payload: SubmitQuoteRequest,
    ) -> Result<QuoteSubmissionReceipt, ServiceError> {
        info!("Registering new quote request");

        let errors = validate_quote_submission(&payload);
        if !errors.is_empty() {
            warn!(
                "Quote submission rejected with {} validation errors",
                errors.len()
            );
            return Err(ServiceError::Validation(errors));
        }

        let quote = normalize_quote(&payload);
        let inserted = self
            .quote_repo
            .create(quote)
            .await
            .map_err(ServiceError::from)?;
        let id = inserted.id.ok_or_else(|| {
            ServiceError::InternalError("Inserted quote request has no id".to_string())
        })?;
        let tracking_id =
            tracking::tracking_id(tracking::QUOTE_PREFIX, &id, inserted.created_at.as_deref());

        // The record is durable at this point; delivery runs off the request
        // path and must not affect the response.
        let image_refs = inserted.image_urls.clone().unwrap_or_default();
        self.notifications
            .enqueue_quote(inserted, tracking_id.clone(), image_refs);

        info!(tracking_id = %tracking_id, "Quote request registered successfully");
        Ok(QuoteSubmissionReceipt {
            id: id.to_hex(),
            tracking_id,
        })
    }

    #[instrument(skip(self), fields(id = %id))]
    async fn get_confirmation(&self, id: ObjectId) -> Result<QuoteConfirmationDto, ServiceError> {
        let quote = self
            .quote_repo
            .get_by_id(id)
            .await
            .map_err(ServiceError::from)?;
        let quote_id = quote.id.ok_or_else(|| {
            ServiceError::InternalError("Stored quote request has no id".to_string())
        })?;

        Ok(QuoteConfirmationDto {
            tracking_id: tracking::tracking_id(
                tracking::QUOTE_PREFIX,
                &quote_id,
                quote.created_at.as_deref(),
            ),
            service_requested: quote.service_requested,
            property_city: quote.property_city,
            property_state: quote.property_state,
            photo_count: quote.image_urls.map(|urls| urls.len()).unwrap_or(0),
            created_at: quote.created_at,
        })
    }

    #[instrument(skip(self, data), fields(file_name = %file_name, size = data.len()))]
    async fn store_wizard_image(
        &self,
        file_name: &str,
        content_type: &str,
        data: Vec<u8>,
    ) -> Result<String, ServiceError> {
        let media = self.media.as_ref().ok_or_else(|| {
            ServiceError::InternalError("Media storage is not configured".to_string())
        })?;

        validate_image_upload(file_name, content_type, data.len())
            .map_err(|msg| ServiceError::Validation(vec![msg]))?;

        let extension = file_name
            .rsplit('.')
            .next()
            .filter(|s| *s != file_name)
            .map(|ext| format!(".{}", ext.to_lowercase()))
            .unwrap_or_default();
        let object_name = format!("quotes/{}{}", uuid::Uuid::new_v4(), extension);

        media
            .put_object(&object_name, data, Some(content_type))
            .await
            .map_err(|e| ServiceError::InternalError(format!("Media upload error: {}", e)))?;

        Ok(media.generate_download_link(&object_name))
    }
}

/// The wizard's view of the intake contract, served in-process.
#[async_trait]
impl QuoteSubmitter for QuoteServiceImpl {
    async fn upload_image(
        &self,
        file_name: &str,
        content_type: &str,
        data: Vec<u8>,
    ) -> Result<String, SubmitError> {
        self.store_wizard_image(file_name, content_type, data)
            .await
            .map_err(|e| match e {
                ServiceError::Validation(errors) => SubmitError::Rejected(errors),
                other => SubmitError::Unavailable(other.to_string()),
            })
    }

    async fn submit(&self, payload: SubmitQuoteRequest) -> Result<SubmissionReceipt, SubmitError> {
        match self.register_quote(payload).await {
            Ok(receipt) => Ok(SubmissionReceipt { id: receipt.id }),
            Err(ServiceError::Validation(errors)) => Err(SubmitError::Rejected(errors)),
            Err(_) => Err(SubmitError::Unavailable(
                GENERIC_FAILURE_MESSAGE.to_string(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_lowercases_and_trims_email() {
        let payload = SubmitQuoteRequest {
            customer_name: Some("  Jane Doe ".to_string()),
            email: Some("  Jane@Example.COM ".to_string()),
            service_requested: Some("Kitchen Remodeling".to_string()),
            ..Default::default()
        };
        let quote = normalize_quote(&payload);
        assert_eq!(quote.customer_name, "Jane Doe");
        assert_eq!(quote.email, "jane@example.com");
    }

    #[test]
    fn test_normalize_phone_keeps_digits_parens_dashes() {
        let payload = SubmitQuoteRequest {
            phone: Some(" (555) 123-4567 ".to_string()),
            ..Default::default()
        };
        let quote = normalize_quote(&payload);
        assert_eq!(quote.phone.as_deref(), Some("(555)123-4567"));
    }

    #[test]
    fn test_normalize_drops_blank_optionals() {
        let payload = SubmitQuoteRequest {
            property_city: Some("   ".to_string()),
            message: None,
            ..Default::default()
        };
        let quote = normalize_quote(&payload);
        assert!(quote.property_city.is_none());
        assert!(quote.message.is_none());
    }
}
