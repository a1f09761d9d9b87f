use oakridge_backend::config::EmailConfig;
use oakridge_backend::util::email::{EmailError, EmailMessage, SmtpEmailService};

/// Initialize tracing for tests
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("debug")
        .try_init();
}

/// Create test email config
fn create_test_config() -> EmailConfig {
    EmailConfig::from_test_env()
}

#[cfg(test)]
mod unit_tests {
    use super::*;

    #[tokio::test]
    async fn test_email_service_creation() {
        init_tracing();
        // The transport builds eagerly from config; no connection is made yet
        let config = create_test_config();
        let service = SmtpEmailService::new(config);
        assert!(service.is_ok());
    }

    #[test]
    fn test_email_message_creation() {
        let message = EmailMessage::new(
            "test@example.com".to_string(),
            "Test Subject".to_string(),
        );

        assert_eq!(message.to, "test@example.com");
        assert_eq!(message.subject, "Test Subject");
        assert!(message.text_body.is_none());
        assert!(message.html_body.is_none());
    }

    #[test]
    fn test_email_message_with_bodies() {
        let message = EmailMessage::new(
            "test@example.com".to_string(),
            "Test Subject".to_string(),
        )
        .with_text_body("Text body content".to_string())
        .with_html_body("<h1>HTML body content</h1>".to_string());

        assert!(message.text_body.is_some());
        assert!(message.html_body.is_some());
        assert_eq!(message.text_body.unwrap(), "Text body content");
        assert_eq!(message.html_body.unwrap(), "<h1>HTML body content</h1>");
    }
}

#[cfg(test)]
mod error_tests {
    use super::*;

    #[test]
    fn test_email_error_types() {
        let errors = vec![
            EmailError::ConfigError("Config error".to_string()),
            EmailError::SmtpError("SMTP error".to_string()),
            EmailError::MessageError("Message error".to_string()),
            EmailError::AddressError("Address error".to_string()),
        ];

        for error in errors {
            assert!(!error.to_string().is_empty());
        }
    }

    #[test]
    fn test_invalid_config_rejected() {
        let mut config = create_test_config();
        config.smtp_host = String::new();
        let service = SmtpEmailService::new(config);
        assert!(matches!(service, Err(EmailError::ConfigError(_))));
    }
}
