use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::handler::quote_handler::{
    quote_confirmation_handler, submit_quote_handler, upload_image_handler,
};
use crate::service::quote_service::QuoteServiceImpl;

pub fn quote_router(service: Arc<QuoteServiceImpl>) -> Router {
    Router::new()
        .route("/quotes", post(submit_quote_handler))
        .route("/quotes/{id}/confirmation", get(quote_confirmation_handler))
        .route("/uploads", post(upload_image_handler))
        .with_state(service)
}
