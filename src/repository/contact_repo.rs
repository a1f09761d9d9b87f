use crate::config::mongo_conf::MongoConfig;
use crate::model::contact::ContactMessage;
use crate::repository::repository_error::{RepositoryError, RepositoryResult};
use async_trait::async_trait;
use bson::oid::ObjectId;
use tracing::{error, info};

/// Persistence seam for contact messages; insert-only from this workflow.
#[async_trait]
pub trait ContactRepository: Send + Sync {
    async fn create(&self, message: ContactMessage) -> RepositoryResult<ContactMessage>;
}

pub struct MongoContactRepository {
    collection: mongodb::Collection<ContactMessage>,
}

impl MongoContactRepository {
    /// Create a new MongoContactRepository using MongoConfig
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
        let collection_name = config
            .contact_collection
            .as_deref()
            .unwrap_or("contact_messages");
        let collection = db.collection::<ContactMessage>(collection_name);
        Ok(MongoContactRepository { collection })
    }
}

#[async_trait]
impl ContactRepository for MongoContactRepository {
    #[tracing::instrument(skip(self, message), fields(email = %message.email))]
    async fn create(&self, message: ContactMessage) -> RepositoryResult<ContactMessage> {
        info!("Creating new contact message");
        let mut new_message = message.clone();
        new_message.id = Some(ObjectId::new());
        new_message.created_at = Some(chrono::Utc::now().to_rfc3339());

        let result = self.collection.insert_one(new_message.clone(), None).await;
        match result {
            Ok(_) => {
                info!("Contact message created successfully");
                Ok(new_message)
            }
            Err(e) => {
                error!("Failed to create contact message: {}", e);
                Err(RepositoryError::database(format!(
                    "Failed to create contact message: {}",
                    e
                )))
            }
        }
    }
}
