use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    middleware, Router,
};
use bson::oid::ObjectId;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};
use tower::ServiceExt; // for .oneshot()

use oakridge_backend::middlewares::cors_middleware::{cors, CorsState};
use oakridge_backend::model::contact::ContactMessage;
use oakridge_backend::model::quote::QuoteRequest;
use oakridge_backend::repository::contact_repo::ContactRepository;
use oakridge_backend::repository::quote_repo::QuoteRepository;
use oakridge_backend::repository::repository_error::{RepositoryError, RepositoryResult};
use oakridge_backend::router::contact_router::contact_router;
use oakridge_backend::router::quote_router::quote_router;
use oakridge_backend::service::contact_service::ContactServiceImpl;
use oakridge_backend::service::notification::{NotificationDispatcher, NotificationQueue};
use oakridge_backend::service::quote_service::QuoteServiceImpl;
use oakridge_backend::util::email::{EmailError, EmailMessage, EmailSender};

#[derive(Default)]
struct MemoryQuoteRepo {
    items: Mutex<Vec<QuoteRequest>>,
}

impl MemoryQuoteRepo {
    fn count(&self) -> usize {
        self.items.lock().unwrap().len()
    }
}

#[async_trait]
impl QuoteRepository for MemoryQuoteRepo {
    async fn create(&self, quote: QuoteRequest) -> RepositoryResult<QuoteRequest> {
        let mut stored = quote.clone();
        stored.id = Some(ObjectId::new());
        stored.status = Some("new".to_string());
        stored.created_at = Some(chrono::Utc::now().to_rfc3339());
        self.items.lock().unwrap().push(stored.clone());
        Ok(stored)
    }

    async fn get_by_id(&self, id: ObjectId) -> RepositoryResult<QuoteRequest> {
        self.items
            .lock()
            .unwrap()
            .iter()
            .find(|q| q.id == Some(id))
            .cloned()
            .ok_or_else(|| RepositoryError::not_found(format!("no quote {}", id)))
    }
}

#[derive(Default)]
struct MemoryContactRepo {
    items: Mutex<Vec<ContactMessage>>,
}

impl MemoryContactRepo {
    fn count(&self) -> usize {
        self.items.lock().unwrap().len()
    }
}

#[async_trait]
impl ContactRepository for MemoryContactRepo {
    async fn create(&self, message: ContactMessage) -> RepositoryResult<ContactMessage> {
        let mut stored = message.clone();
        stored.id = Some(ObjectId::new());
        stored.created_at = Some(chrono::Utc::now().to_rfc3339());
        self.items.lock().unwrap().push(stored.clone());
        Ok(stored)
    }
}

#[derive(Default)]
struct RecordingSender {
    sent: Mutex<Vec<EmailMessage>>,
    fail: bool,
}

#[async_trait]
impl EmailSender for RecordingSender {
    async fn send(&self, message: EmailMessage) -> Result<(), EmailError> {
        if self.fail {
            return Err(EmailError::SmtpError("simulated outage".to_string()));
        }
        self.sent.lock().unwrap().push(message);
        Ok(())
    }
}

struct TestHarness {
    router: Router,
    quote_repo: Arc<MemoryQuoteRepo>,
    contact_repo: Arc<MemoryContactRepo>,
}

fn harness_with(fail_email: bool) -> TestHarness {
    let sender = Arc::new(RecordingSender {
        sent: Mutex::new(Vec::new()),
        fail: fail_email,
    });
    let dispatcher = Arc::new(NotificationDispatcher::new(
        sender as Arc<dyn EmailSender>,
        None,
        "office@example.com".to_string(),
    ));
    let notifications = NotificationQueue::start(dispatcher.clone());

    let quote_repo = Arc::new(MemoryQuoteRepo::default());
    let contact_repo = Arc::new(MemoryContactRepo::default());

    let quote_service = Arc::new(QuoteServiceImpl {
        quote_repo: quote_repo.clone() as Arc<dyn QuoteRepository>,
        notifications,
        media: None,
    });
    let contact_service = Arc::new(ContactServiceImpl {
        contact_repo: contact_repo.clone() as Arc<dyn ContactRepository>,
        dispatcher,
    });

    let router = Router::new()
        .merge(quote_router(quote_service))
        .merge(contact_router(contact_service));

    TestHarness {
        router,
        quote_repo,
        contact_repo,
    }
}

fn harness() -> TestHarness {
    harness_with(false)
}

fn json_request(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn response_json(response: axum::response::Response) -> (StatusCode, Value) {
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value: Value = serde_json::from_slice(&bytes).unwrap();
    (status, value)
}

#[tokio::test]
async fn test_submit_quote_happy_path() {
    let harness = harness();
    let request = json_request(
        "/quotes",
        json!({
            "customer_name": "Jane Doe",
            "email": "jane@example.com",
            "service_requested": "Kitchen Remodeling"
        }),
    );

    let response = harness.router.oneshot(request).await.unwrap();
    let (status, body) = response_json(response).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], json!(true));
    assert!(!body["id"].as_str().unwrap().is_empty());
    assert_eq!(harness.quote_repo.count(), 1);
}

#[tokio::test]
async fn test_submit_quote_bad_email_creates_nothing() {
    let harness = harness();
    let request = json_request(
        "/quotes",
        json!({
            "customer_name": "Jane Doe",
            "email": "not-an-email",
            "service_requested": "Kitchen Remodeling"
        }),
    );

    let response = harness.router.oneshot(request).await.unwrap();
    let (status, body) = response_json(response).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], json!(false));
    let errors = body["errors"].as_array().unwrap();
    assert!(errors
        .iter()
        .any(|e| e.as_str().unwrap().contains("email")));
    assert_eq!(harness.quote_repo.count(), 0);
}

#[tokio::test]
async fn test_submit_quote_over_length_name_creates_nothing() {
    let harness = harness();
    let request = json_request(
        "/quotes",
        json!({
            "customer_name": "x".repeat(101),
            "email": "jane@example.com",
            "service_requested": "Kitchen Remodeling"
        }),
    );

    let response = harness.router.oneshot(request).await.unwrap();
    let (status, body) = response_json(response).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let errors = body["errors"].as_array().unwrap();
    assert!(errors
        .iter()
        .any(|e| e.as_str().unwrap().contains("at most 100")));
    assert_eq!(harness.quote_repo.count(), 0);
}

#[tokio::test]
async fn test_submit_quote_reports_every_error_at_once() {
    let harness = harness();
    let request = json_request("/quotes", json!({ "phone": "123" }));

    let response = harness.router.oneshot(request).await.unwrap();
    let (status, body) = response_json(response).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    // name, email, service, and phone problems all come back together
    assert_eq!(body["errors"].as_array().unwrap().len(), 4);
}

#[tokio::test]
async fn test_submit_quote_malformed_body_is_generic_failure() {
    let harness = harness();
    let request = Request::builder()
        .method("POST")
        .uri("/quotes")
        .header("content-type", "application/json")
        .body(Body::from("{not json"))
        .unwrap();

    let response = harness.router.oneshot(request).await.unwrap();
    let (status, body) = response_json(response).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], json!(false));
    assert_eq!(body["errors"], json!(["Invalid request body"]));
    assert_eq!(harness.quote_repo.count(), 0);
}

#[tokio::test]
async fn test_submit_quote_succeeds_when_email_delivery_is_down() {
    let harness = harness_with(true);
    let request = json_request(
        "/quotes",
        json!({
            "customer_name": "Jane Doe",
            "email": "jane@example.com",
            "service_requested": "Kitchen Remodeling",
            "image_urls": ["https://cdn.example.com/a.jpg"]
        }),
    );

    let response = harness.router.oneshot(request).await.unwrap();
    let (status, body) = response_json(response).await;

    // delivery runs off the request path; the stored record wins
    assert_eq!(status, StatusCode::OK);
    assert!(!body["id"].as_str().unwrap().is_empty());
    assert_eq!(harness.quote_repo.count(), 1);
}

#[tokio::test]
async fn test_quote_confirmation_round_trip() {
    let harness = harness();
    let request = json_request(
        "/quotes",
        json!({
            "customer_name": "Jane Doe",
            "email": "jane@example.com",
            "service_requested": "Kitchen Remodeling",
            "property_city": "Portland",
            "property_state": "OR",
            "image_urls": ["https://cdn.example.com/a.jpg", "https://cdn.example.com/b.jpg"]
        }),
    );
    let response = harness.router.clone().oneshot(request).await.unwrap();
    let (_, body) = response_json(response).await;
    let id = body["id"].as_str().unwrap().to_string();

    let request = Request::builder()
        .uri(format!("/quotes/{}/confirmation", id))
        .body(Body::empty())
        .unwrap();
    let response = harness.router.oneshot(request).await.unwrap();
    let (status, confirmation) = response_json(response).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(confirmation["service_requested"], json!("Kitchen Remodeling"));
    assert_eq!(confirmation["property_city"], json!("Portland"));
    assert_eq!(confirmation["photo_count"], json!(2));
    assert!(confirmation["tracking_id"]
        .as_str()
        .unwrap()
        .starts_with("QR-"));
}

#[tokio::test]
async fn test_quote_confirmation_bad_and_unknown_ids() {
    let harness = harness();

    let request = Request::builder()
        .uri("/quotes/not-an-id/confirmation")
        .body(Body::empty())
        .unwrap();
    let response = harness.router.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let request = Request::builder()
        .uri(format!("/quotes/{}/confirmation", ObjectId::new()))
        .body(Body::empty())
        .unwrap();
    let response = harness.router.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_submit_contact_happy_path() {
    let harness = harness();
    let request = json_request(
        "/contact",
        json!({
            "fullName": "John Smith",
            "email": "john@example.com",
            "phone": "(555) 123-4567",
            "message": "I would like to talk about my basement.",
            "service": "basement",
            "heardFrom": "friend"
        }),
    );

    let response = harness.router.oneshot(request).await.unwrap();
    let (status, body) = response_json(response).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], json!(true));
    assert!(body["trackingId"].as_str().unwrap().starts_with("MSG-"));
    assert!(!body["message"].as_str().unwrap().is_empty());
    assert_eq!(harness.contact_repo.count(), 1);
}

#[tokio::test]
async fn test_submit_contact_short_message_rejected() {
    let harness = harness();
    let request = json_request(
        "/contact",
        json!({
            "fullName": "John Smith",
            "email": "john@example.com",
            "phone": "(555) 123-4567",
            "message": "Hello"
        }),
    );

    let response = harness.router.oneshot(request).await.unwrap();
    let (status, body) = response_json(response).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("at least 10"));
    assert_eq!(harness.contact_repo.count(), 0);
}

#[tokio::test]
async fn test_submit_contact_still_succeeds_when_delivery_fails() {
    let harness = harness_with(true);
    let request = json_request(
        "/contact",
        json!({
            "fullName": "John Smith",
            "email": "john@example.com",
            "phone": "(555) 123-4567",
            "message": "I would like to talk about my basement."
        }),
    );

    let response = harness.router.oneshot(request).await.unwrap();
    let (status, body) = response_json(response).await;

    // the message is durably stored before any email is attempted
    assert_eq!(status, StatusCode::OK);
    assert!(body["trackingId"].as_str().unwrap().starts_with("MSG-"));
    assert_eq!(harness.contact_repo.count(), 1);
}

#[tokio::test]
async fn test_upload_without_media_store_fails_generically() {
    let harness = harness();
    let boundary = "X-BOUNDARY";
    let mut body = Vec::new();
    body.extend(
        format!(
            "--{}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"deck.jpg\"\r\nContent-Type: image/jpeg\r\n\r\n",
            boundary
        )
        .as_bytes(),
    );
    body.extend(b"dummy image content");
    body.extend(format!("\r\n--{}--\r\n", boundary).as_bytes());

    let request = Request::builder()
        .method("POST")
        .uri("/uploads")
        .header(
            "content-type",
            format!("multipart/form-data; boundary={}", boundary),
        )
        .body(Body::from(body))
        .unwrap();

    let response = harness.router.oneshot(request).await.unwrap();
    let (status, body) = response_json(response).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["success"], json!(false));
    // internal detail never leaks
    assert_eq!(body["errors"], json!(["Something went wrong. Please try again."]));
}

#[tokio::test]
async fn test_cors_reflects_allowed_origin() {
    let harness = harness();
    let cors_state = Arc::new(CorsState {
        allowed_origins: vec![
            "https://www.oakridgeremodeling.com".to_string(),
            "https://staging.oakridgeremodeling.com".to_string(),
        ],
    });
    let router = harness
        .router
        .layer(middleware::from_fn_with_state(cors_state, cors));

    let request = Request::builder()
        .uri("/health")
        .header(header::ORIGIN, "https://staging.oakridgeremodeling.com")
        .body(Body::empty())
        .unwrap();
    // the harness router has no /health route; CORS headers are set anyway
    let response = router.oneshot(request).await.unwrap();
    assert_eq!(
        response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .unwrap(),
        "https://staging.oakridgeremodeling.com"
    );
}

#[tokio::test]
async fn test_cors_disallowed_origin_gets_first_entry() {
    let harness = harness();
    let cors_state = Arc::new(CorsState {
        allowed_origins: vec![
            "https://www.oakridgeremodeling.com".to_string(),
            "https://staging.oakridgeremodeling.com".to_string(),
        ],
    });
    let router = harness
        .router
        .layer(middleware::from_fn_with_state(cors_state, cors));

    let request = Request::builder()
        .method("OPTIONS")
        .uri("/quotes")
        .header(header::ORIGIN, "https://evil.example.com")
        .body(Body::empty())
        .unwrap();
    let response = router.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    // not the caller's origin: its browser-side CORS check will fail
    assert_eq!(
        response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .unwrap(),
        "https://www.oakridgeremodeling.com"
    );
    assert!(response.headers().get(header::VARY).is_none());
}
