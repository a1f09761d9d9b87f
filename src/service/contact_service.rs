use async_trait::async_trait;
use std::sync::Arc;
use tracing::{info, instrument, warn};

use crate::dto::contact_dto::{ContactSubmissionReceipt, SubmitContactRequest};
use crate::model::contact::ContactMessage;
use crate::repository::contact_repo::ContactRepository;
use crate::service::notification::NotificationDispatcher;
use crate::util::error::ServiceError;
use crate::util::tracking;
use crate::util::validation::{
    validate_contact_submission, CONTACT_MESSAGE_MAX_LEN, EMAIL_MAX_LEN, NAME_MAX_LEN,
    SERVICE_MAX_LEN,
};

const CONFIRMATION_MESSAGE: &str =
    "Thanks for reaching out! We typically reply within one business day.";

#[async_trait]
pub trait ContactService: Send + Sync {
    /// Validate, persist, and send both contact emails. Delivery failures
    /// are logged but never fail the submission once the record is stored.
    async fn submit_contact(
        &self,
        payload: SubmitContactRequest,
    ) -> Result<ContactSubmissionReceipt, ServiceError>;
}

pub struct ContactServiceImpl {
    pub contact_repo: Arc<dyn ContactRepository>,
    pub dispatcher: Arc<NotificationDispatcher>,
}

fn truncate(value: &str, max: usize) -> String {
    value.chars().take(max).collect()
}

fn normalize_contact(payload: &SubmitContactRequest) -> ContactMessage {
    let clean_optional = |value: &Option<String>, max: usize| {
        let trimmed = value.as_deref().map(str::trim).unwrap_or("");
        (!trimmed.is_empty()).then(|| truncate(trimmed, max))
    };

    ContactMessage {
        id: None,
        full_name: truncate(
            payload.full_name.as_deref().unwrap_or("").trim(),
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
        phone: payload.phone.as_deref().unwrap_or("").trim().to_string(),
        service: clean_optional(&payload.service, SERVICE_MAX_LEN),
        heard_from: clean_optional(&payload.heard_from, NAME_MAX_LEN),
        message: truncate(
            payload.message.as_deref().unwrap_or("").trim(),
            CONTACT_MESSAGE_MAX_LEN,
        ),
        created_at: None,
    }
}

#[async_trait]
impl ContactService for ContactServiceImpl {
    #[instrument(skip(self, payload))]
    async fn submit_contact(
        &self,
        payload: SubmitContactRequest,
    ) -> Result<ContactSubmissionReceipt, ServiceError> {
        info!("Registering new contact message");

        let errors = validate_contact_submission(&payload);
        if !errors.is_empty() {
            warn!(
                "Contact submission rejected with {} validation errors",
                errors.len()
            );
            return Err(ServiceError::Validation(errors));
        }

        let message = normalize_contact(&payload);
        let inserted = self
            .contact_repo
            .create(message)
            .await
            .map_err(ServiceError::from)?;
        let id = inserted.id.ok_or_else(|| {
            ServiceError::InternalError("Inserted contact message has no id".to_string())
        })?;
        let tracking_id =
            tracking::tracking_id(tracking::CONTACT_PREFIX, &id, inserted.created_at.as_deref());

        // The record is durable; send both emails now and tolerate partial
        // delivery.
        let outcome = self.dispatcher.dispatch_contact(&inserted, &tracking_id).await;
        info!(
            tracking_id = %tracking_id,
            business_email = outcome.business_email,
            customer_email = outcome.customer_email,
            "Contact notification dispatch finished"
        );

        Ok(ContactSubmissionReceipt {
            tracking_id,
            confirmation: CONFIRMATION_MESSAGE.to_string(),
        })
    }
}
