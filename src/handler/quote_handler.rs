use axum::{
    extract::{rejection::JsonRejection, Multipart, Path, State},
    response::IntoResponse,
    Json,
};
use bson::oid::ObjectId;
use bytes::BytesMut;
use std::sync::Arc;
use tracing::{error, info};

use crate::dto::quote_dto::{SubmitQuoteRequest, SubmitQuoteResponse, UploadResponse};
use crate::service::quote_service::{QuoteService, QuoteServiceImpl};
use crate::util::error::{QuoteIntakeError, ServiceError};

pub async fn submit_quote_handler(
    State(service): State<Arc<QuoteServiceImpl>>,
    body: Result<Json<SubmitQuoteRequest>, JsonRejection>,
) -> Result<impl IntoResponse, QuoteIntakeError> {
    info!("[submit_quote_handler] Handler called");

    // A body that does not parse as the expected shape becomes a generic
    // failure; parse detail never reaches the caller.
    let Json(payload) = body.map_err(|e| {
        error!("[submit_quote_handler] Invalid request body: {}", e);
        QuoteIntakeError::bad_request("Invalid request body")
    })?;

    let receipt = match service.register_quote(payload).await {
        Ok(receipt) => receipt,
        Err(e) => {
            if let ServiceError::InternalError(detail) = &e {
                error!("[submit_quote_handler] Failed to register quote: {}", detail);
            }
            return Err(QuoteIntakeError::from(e));
        }
    };

    Ok(Json(SubmitQuoteResponse {
        success: true,
        id: receipt.id,
    }))
}

pub async fn quote_confirmation_handler(
    State(service): State<Arc<QuoteServiceImpl>>,
    Path((id,)): Path<(String,)>,
) -> Result<impl IntoResponse, QuoteIntakeError> {
    let id = ObjectId::parse_str(&id).map_err(|_| QuoteIntakeError::bad_request("Invalid quote id"))?;

    let confirmation = match service.get_confirmation(id).await {
        Ok(confirmation) => confirmation,
        Err(e) => {
            if let ServiceError::InternalError(detail) = &e {
                error!("[quote_confirmation_handler] Failed to load quote: {}", detail);
            }
            return Err(QuoteIntakeError::from(e));
        }
    };

    Ok(Json(confirmation))
}

pub async fn upload_image_handler(
    State(service): State<Arc<QuoteServiceImpl>>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, QuoteIntakeError> {
    info!("[upload_image_handler] Handler called");
    let mut upload: Option<(String, String, Vec<u8>)> = None;

    while let Some(field) = match multipart.next_field().await {
        Ok(f) => f,
        Err(e) => {
            error!("[upload_image_handler] Error getting next field: {}", e);
            return Err(QuoteIntakeError::bad_request("Failed to read upload"));
        }
    } {
        let name = field.name().map(|s| s.to_string()).unwrap_or_default();
        if name.starts_with("file") {
            let filename = field.file_name().map(|s| s.to_string()).unwrap_or_default();
            let content_type = field.content_type().map(|s| s.to_string()).unwrap_or_default();
            let mut buf = BytesMut::new();
            let mut stream = field;
            while let Some(chunk) = match stream.chunk().await {
                Ok(c) => c,
                Err(e) => {
                    error!("[upload_image_handler] Error reading file chunk: {}", e);
                    return Err(QuoteIntakeError::bad_request("Failed to read upload"));
                }
            } {
                buf.extend_from_slice(&chunk);
            }
            info!(
                "[upload_image_handler] Received file: {} ({} bytes)",
                filename,
                buf.len()
            );
            upload = Some((filename, content_type, buf.to_vec()));
        }
    }

    let (filename, content_type, data) = upload.ok_or_else(|| {
        error!("[upload_image_handler] Missing file field");
        QuoteIntakeError::bad_request("Missing file field")
    })?;

    let url = match service
        .store_wizard_image(&filename, &content_type, data)
        .await
    {
        Ok(url) => url,
        Err(e) => {
            if let ServiceError::InternalError(detail) = &e {
                error!("[upload_image_handler] Failed to store upload: {}", detail);
            }
            return Err(QuoteIntakeError::from(e));
        }
    };

    Ok(Json(UploadResponse { success: true, url }))
}
