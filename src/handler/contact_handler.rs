use axum::{
    extract::{rejection::JsonRejection, State},
    response::IntoResponse,
    Json,
};
use std::sync::Arc;
use tracing::{error, info};

use crate::dto::contact_dto::{SubmitContactRequest, SubmitContactResponse};
use crate::service::contact_service::{ContactService, ContactServiceImpl};
use crate::util::error::{ContactIntakeError, ServiceError};

pub async fn submit_contact_handler(
    State(service): State<Arc<ContactServiceImpl>>,
    body: Result<Json<SubmitContactRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ContactIntakeError> {
    info!("[submit_contact_handler] Handler called");

    let Json(payload) = body.map_err(|e| {
        error!("[submit_contact_handler] Invalid request body: {}", e);
        ContactIntakeError::bad_request("Invalid request body".to_string())
    })?;

    let receipt = match service.submit_contact(payload).await {
        Ok(receipt) => receipt,
        Err(e) => {
            if let ServiceError::InternalError(detail) = &e {
                error!(
                    "[submit_contact_handler] Failed to register contact message: {}",
                    detail
                );
            }
            return Err(ContactIntakeError::from(e));
        }
    };

    Ok(Json(SubmitContactResponse {
        success: true,
        tracking_id: receipt.tracking_id,
        message: receipt.confirmation,
    }))
}
