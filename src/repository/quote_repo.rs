use crate::config::mongo_conf::MongoConfig;
use crate::model::quote::QuoteRequest;
use crate::repository::repository_error::{RepositoryError, RepositoryResult};
use async_trait::async_trait;
use bson::{doc, oid::ObjectId};
use tracing::{error, info};

/// Persistence seam for quote requests. The intake workflow performs exactly
/// one insert per submission and one read for the confirmation view.
#[async_trait]
pub trait QuoteRepository: Send + Sync {
    async fn create(&self, quote: QuoteRequest) -> RepositoryResult<QuoteRequest>;
    async fn get_by_id(&self, id: ObjectId) -> RepositoryResult<QuoteRequest>;
}

pub struct MongoQuoteRepository {
    collection: mongodb::Collection<QuoteRequest>,
}

impl MongoQuoteRepository {
    /// Create a new MongoQuoteRepository using MongoConfig
    pub async fn new(config: &MongoConfig) -> Result<Self, mongodb::error::Error> {
        use mongodb::{
            options::{ClientOptions, Credential, ResolverConfig},
            Client,
        };

        let mut client_options =
            ClientOptions::parse_with_resolver_config(&config.uri, ResolverConfig::cloudflare())
                .await?;
        client_options.app_name = Some("OakridgeBackend".to_string());
        client_options.max_pool_size = Some(config.pool_size);
        client_options.connect_timeout =
            Some(std::time::Duration::from_secs(config.connection_timeout_secs));

        if let (Some(ref username), Some(ref password)) = (&config.username, &config.password) {
            client_options.credential = Some(
                Credential::builder()
                    .username(username.clone())
                    .password(password.clone())
                    .build(),
            );
        }

        let client = Client::with_options(client_options)?;
        let db = client.database(&config.database);
        let collection_name = config.quote_collection.as_deref().unwrap_or("quote_requests");
        let collection = db.collection::<QuoteRequest>(collection_name);
        Ok(MongoQuoteRepository { collection })
    }
}

#[async_trait]
impl QuoteRepository for MongoQuoteRepository {
    #[tracing::instrument(skip(self, quote), fields(email = %quote.email))]
    async fn create(&self, quote: QuoteRequest) -> RepositoryResult<QuoteRequest> {
        info!("Creating new quote request");
        let mut new_quote = quote.clone();
        // Set id and timestamps before inserting
        new_quote.id = Some(ObjectId::new());
        new_quote.status = Some("new".to_string());
        new_quote.created_at = Some(chrono::Utc::now().to_rfc3339());

        let result = self.collection.insert_one(new_quote.clone(), None).await;
        match result {
            Ok(_) => {
                info!("Quote request created successfully");
                Ok(new_quote)
            }
            Err(e) => {
                error!("Failed to create quote request: {}", e);
                Err(RepositoryError::database(format!(
                    "Failed to create quote request: {}",
                    e
                )))
            }
        }
    }

    #[tracing::instrument(skip(self), fields(id = %id))]
    async fn get_by_id(&self, id: ObjectId) -> RepositoryResult<QuoteRequest> {
        let filter = doc! { "_id": id };
        let result = self.collection.find_one(filter, None).await;
        match result {
            Ok(Some(quote)) => Ok(quote),
            Ok(None) => {
                error!("Quote request not found for ID: {}", id);
                Err(RepositoryError::not_found(format!(
                    "Quote request not found for ID: {}",
                    id
                )))
            }
            Err(e) => {
                error!("Failed to fetch quote request by ID: {}", e);
                Err(RepositoryError::database(format!(
                    "Failed to fetch quote request by ID: {}",
                    e
                )))
            }
        }
    }
}
