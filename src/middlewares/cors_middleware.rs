use axum::{
    body::Body,
    extract::{Request, State},
    http::{header, HeaderValue, Method, StatusCode},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;
use tracing::debug;

pub struct CorsState {
    pub allowed_origins: Vec<String>,
}

const ALLOW_METHODS: &str = "GET, POST, OPTIONS";
const ALLOW_HEADERS: &str = "Content-Type";

/// Cross-origin policy for the intake endpoints. An allow-listed origin is
/// reflected back; every other origin receives the list's first entry (and
/// no `Vary`), so its browser-side CORS check fails without the server
/// refusing the request outright.
pub async fn cors(
    State(state): State<Arc<CorsState>>,
    req: Request,
    next: Next,
) -> Response {
    let origin = req
        .headers()
        .get(header::ORIGIN)
        .and_then(|v| v.to_str().ok())
        .map(|s| s.to_string());

    let allow_origin = match origin {
        Some(o) if state.allowed_origins.iter().any(|a| a == &o) => o,
        other => {
            if let Some(o) = other {
                debug!("Origin '{}' not on the allow-list", o);
            }
            state.allowed_origins.first().cloned().unwrap_or_default()
        }
    };

    let mut response = if req.method() == Method::OPTIONS {
        // Preflight is answered here; it never reaches a handler.
        let mut response = Response::new(Body::empty());
        *response.status_mut() = StatusCode::NO_CONTENT;
        response
    } else {
        next.run(req).await
    };

    let headers = response.headers_mut();
    if let Ok(value) = HeaderValue::from_str(&allow_origin) {
        headers.insert(header::ACCESS_CONTROL_ALLOW_ORIGIN, value);
    }
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static(ALLOW_METHODS),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static(ALLOW_HEADERS),
    );

    response
}
