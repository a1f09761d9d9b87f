use axum::{middleware, routing::get, Router};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{info, warn};

use crate::config::app_conf::AppConfig;
use crate::service::contact_service::ContactServiceImpl;
use crate::service::quote_service::QuoteServiceImpl;

pub struct App {
    config: AppConfig,
    router: Router,
    pub quote_service: Arc<QuoteServiceImpl>,
    pub contact_service: Arc<ContactServiceImpl>,
}

impl App {
    pub async fn new() -> Self {
        let config = AppConfig::from_env();

        use crate::config::{EmailConfig, MinioConfig, MongoConfig};
        use crate::middlewares::cors_middleware::CorsState;
        use crate::repository::contact_repo::MongoContactRepository;
        use crate::repository::quote_repo::MongoQuoteRepository;
        use crate::service::notification::{NotificationDispatcher, NotificationQueue};
        use crate::util::email::{EmailSender, SmtpEmailService};
        use crate::util::minio::MinioService;

        let mongo_config = MongoConfig::from_env().expect("Mongo config error");
        let email_config = EmailConfig::from_env().expect("Email config error");

        let email_service = Arc::new(
            SmtpEmailService::new(email_config.clone()).expect("Email service error"),
        ) as Arc<dyn EmailSender>;

        // Media storage is optional at boot: without it, photo uploads fail
        // generically and email galleries fall back to raw references.
        let media = match MinioConfig::from_env() {
            Ok(minio_config) => match MinioService::new(minio_config).await {
                Ok(service) => Some(Arc::new(service)),
                Err(e) => {
                    warn!("Media storage unavailable: {e}");
                    None
                }
            },
            Err(e) => {
                warn!("Media storage not configured: {e}");
                None
            }
        };

        let dispatcher = Arc::new(NotificationDispatcher::new(
            email_service,
            media.clone(),
            email_config.business_email.clone(),
        ));
        let notifications = NotificationQueue::start(dispatcher.clone());

        let quote_repo =
            Arc::new(MongoQuoteRepository::new(&mongo_config).await.expect("Quote repo error"));
        let contact_repo = Arc::new(
            MongoContactRepository::new(&mongo_config)
                .await
                .expect("Contact repo error"),
        );

        let quote_service = Arc::new(QuoteServiceImpl {
            quote_repo,
            notifications,
            media,
        });
        let contact_service = Arc::new(ContactServiceImpl {
            contact_repo,
            dispatcher,
        });

        let cors_state = Arc::new(CorsState {
            allowed_origins: config.allowed_origins.clone(),
        });

        let router = Self::create_router(quote_service.clone(), contact_service.clone())
            .layer(middleware::from_fn_with_state(
                cors_state,
                crate::middlewares::cors_middleware::cors,
            ));

        App {
            config,
            router,
            quote_service,
            contact_service,
        }
    }

    fn create_router(
        quote_service: Arc<QuoteServiceImpl>,
        contact_service: Arc<ContactServiceImpl>,
    ) -> Router {
        use crate::router::contact_router::contact_router;
        use crate::router::quote_router::quote_router;
        Router::new()
            .merge(quote_router(quote_service))
            .merge(contact_router(contact_service))
            .route("/health", get(|| async { "OK" }))
    }

    pub async fn start(self) {
        let addr = SocketAddr::new(self.config.host.parse().expect("Invalid host"), self.config.port);
        info!("🚀 Server running at http://{}", addr);
        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .expect("Failed to bind address");
        axum::serve(listener, self.router).await.expect("Failed to start server");
    }
}
