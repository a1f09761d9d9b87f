use serde::Serialize;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{error, info, instrument, warn};

use crate::model::contact::ContactMessage;
use crate::model::quote::QuoteRequest;
use crate::util::email::{EmailMessage, EmailSender};
use crate::util::minio::MinioService;
use crate::util::sanitize::{sanitize_for_email, sanitize_message, sanitize_url};
use crate::util::templates::{
    render_contact_business, render_contact_customer, render_quote_business,
    render_quote_customer, ContactEmailData, QuoteEmailData,
};

/// Which outbound channels succeeded for one dispatch. Dispatch never fails
/// as a whole; callers get this report instead.
#[derive(Debug, Clone, Serialize)]
pub struct DispatchOutcome {
    pub business_email: bool,
    pub customer_email: bool,
    /// No SMS provider is wired up; kept in the report for parity with the
    /// dashboard's expectations.
    pub sms: bool,
}

/// Turns a persisted record into rendered, sent emails.
pub struct NotificationDispatcher {
    email: Arc<dyn EmailSender>,
    media: Option<Arc<MinioService>>,
    business_email: String,
}

impl NotificationDispatcher {
    pub fn new(
        email: Arc<dyn EmailSender>,
        media: Option<Arc<MinioService>>,
        business_email: String,
    ) -> Self {
        Self {
            email,
            media,
            business_email,
        }
    }

    /// Resolve raw media references into embeddable links. References that
    /// survive neither resolution nor the URL allow-list are dropped from
    /// the gallery; resolution failures alone keep the original reference.
    async fn resolve_image_links(&self, refs: &[String]) -> Vec<String> {
        let mut links = Vec::with_capacity(refs.len());
        for reference in refs {
            let resolved = match &self.media {
                Some(media) => media.resolve_image_link(reference).await,
                None => reference.clone(),
            };
            let safe = sanitize_url(&resolved);
            if safe.is_empty() {
                warn!("Skipping media reference with disallowed scheme: {}", resolved);
            } else {
                links.push(safe);
            }
        }
        links
    }

    fn quote_email_data(
        &self,
        quote: &QuoteRequest,
        tracking_id: &str,
        image_links: Vec<String>,
    ) -> QuoteEmailData {
        let location = match (
            quote.property_city.as_deref().unwrap_or("").trim(),
            quote.property_state.as_deref().unwrap_or("").trim(),
        ) {
            ("", "") => String::new(),
            (city, "") => city.to_string(),
            ("", state) => state.to_string(),
            (city, state) => format!("{}, {}", city, state),
        };

        QuoteEmailData {
            tracking_id: sanitize_for_email(Some(tracking_id)),
            customer_name: sanitize_for_email(Some(&quote.customer_name)),
            email: sanitize_for_email(Some(&quote.email)),
            phone: sanitize_for_email(quote.phone.as_deref()),
            service: sanitize_for_email(Some(&quote.service_requested)),
            location: sanitize_for_email(Some(&location)),
            message_html: sanitize_message(quote.message.as_deref()),
            message_text: quote
                .message
                .as_deref()
                .map(str::trim)
                .unwrap_or("")
                .to_string(),
            image_links,
            submitted_at: sanitize_for_email(quote.created_at.as_deref()),
        }
    }

    fn contact_email_data(&self, message: &ContactMessage, tracking_id: &str) -> ContactEmailData {
        ContactEmailData {
            tracking_id: sanitize_for_email(Some(tracking_id)),
            full_name: sanitize_for_email(Some(&message.full_name)),
            email: sanitize_for_email(Some(&message.email)),
            phone: sanitize_for_email(Some(&message.phone)),
            service: sanitize_for_email(message.service.as_deref()),
            heard_from: sanitize_for_email(message.heard_from.as_deref()),
            message_html: sanitize_message(Some(&message.message)),
            message_text: message.message.trim().to_string(),
            submitted_at: sanitize_for_email(message.created_at.as_deref()),
        }
    }

    /// Render and send both quote emails. The two sends run concurrently and
    /// fail independently; the persisted record is unaffected either way.
    #[instrument(skip(self, quote, image_refs), fields(tracking_id = %tracking_id))]
    pub async fn dispatch_quote(
        &self,
        quote: &QuoteRequest,
        tracking_id: &str,
        image_refs: &[String],
    ) -> DispatchOutcome {
        let image_links = self.resolve_image_links(image_refs).await;
        let data = self.quote_email_data(quote, tracking_id, image_links);

        let customer = render_quote_customer(&data);
        let business = render_quote_business(&data);

        let customer_message = EmailMessage::new(quote.email.clone(), customer.subject)
            .with_text_body(customer.text)
            .with_html_body(customer.html);
        let business_message = EmailMessage::new(self.business_email.clone(), business.subject)
            .with_text_body(business.text)
            .with_html_body(business.html);

        let (customer_sent, business_sent) = tokio::join!(
            self.email.send(customer_message),
            self.email.send(business_message)
        );

        if let Err(e) = &customer_sent {
            error!("Customer confirmation email failed: {}", e);
        }
        if let Err(e) = &business_sent {
            error!("Business alert email failed: {}", e);
        }

        DispatchOutcome {
            business_email: business_sent.is_ok(),
            customer_email: customer_sent.is_ok(),
            sms: false,
        }
    }

    /// Render and send both contact emails; same independence guarantees as
    /// quote dispatch.
    #[instrument(skip(self, message), fields(tracking_id = %tracking_id))]
    pub async fn dispatch_contact(
        &self,
        message: &ContactMessage,
        tracking_id: &str,
    ) -> DispatchOutcome {
        let data = self.contact_email_data(message, tracking_id);

        let customer = render_contact_customer(&data);
        let business = render_contact_business(&data);

        let customer_message = EmailMessage::new(message.email.clone(), customer.subject)
            .with_text_body(customer.text)
            .with_html_body(customer.html);
        let business_message = EmailMessage::new(self.business_email.clone(), business.subject)
            .with_text_body(business.text)
            .with_html_body(business.html);

        let (customer_sent, business_sent) = tokio::join!(
            self.email.send(customer_message),
            self.email.send(business_message)
        );

        if let Err(e) = &customer_sent {
            error!("Contact confirmation email failed: {}", e);
        }
        if let Err(e) = &business_sent {
            error!("Contact business alert email failed: {}", e);
        }

        DispatchOutcome {
            business_email: business_sent.is_ok(),
            customer_email: customer_sent.is_ok(),
            sms: false,
        }
    }
}

/// A unit of notification work taken off the request path.
#[derive(Debug)]
pub enum DispatchJob {
    Quote {
        quote: QuoteRequest,
        tracking_id: String,
        image_refs: Vec<String>,
    },
}

/// Hands dispatch jobs to a background worker so a submission response never
/// waits on (or fails with) email delivery. Every outcome is logged.
pub struct NotificationQueue {
    tx: mpsc::UnboundedSender<DispatchJob>,
}

impl NotificationQueue {
    /// Spawn the worker and return the enqueue side.
    pub fn start(dispatcher: Arc<NotificationDispatcher>) -> Arc<Self> {
        let (tx, mut rx) = mpsc::unbounded_channel::<DispatchJob>();
        tokio::spawn(async move {
            while let Some(job) = rx.recv().await {
                match job {
                    DispatchJob::Quote {
                        quote,
                        tracking_id,
                        image_refs,
                    } => {
                        let outcome = dispatcher
                            .dispatch_quote(&quote, &tracking_id, &image_refs)
                            .await;
                        info!(
                            tracking_id = %tracking_id,
                            business_email = outcome.business_email,
                            customer_email = outcome.customer_email,
                            "Quote notification dispatch finished"
                        );
                    }
                }
            }
        });
        Arc::new(Self { tx })
    }

    pub fn enqueue_quote(&self, quote: QuoteRequest, tracking_id: String, image_refs: Vec<String>) {
        let job = DispatchJob::Quote {
            quote,
            tracking_id: tracking_id.clone(),
            image_refs,
        };
        if self.tx.send(job).is_err() {
            error!(
                "Notification worker is gone; dropping dispatch for {}",
                tracking_id
            );
        }
    }
}
