//! Transactional email via SMTP.
//!
//! [`Mailer`] wraps the `lettre` async SMTP transport. It is only constructed
//! when `SMTP_HOST` is set; otherwise handlers skip sending and log a warning.

use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use greenlight_core::types::DbId;

use crate::config::{parse_or, ConfigError};

/// Error type for email delivery failures.
#[derive(Debug, thiserror::Error)]
pub enum MailError {
    /// SMTP transport-level failure (authentication, connection, etc.).
    #[error("SMTP transport error: {0}")]
    Transport(#[from] lettre::transport::smtp::Error),

    /// The recipient or sender address could not be parsed.
    #[error("Email address parse error: {0}")]
    Address(#[from] lettre::address::AddressError),

    /// The MIME message could not be assembled.
    #[error("Email build error: {0}")]
    Build(#[from] lettre::error::Error),
}

/// Default SMTP port (STARTTLS).
const DEFAULT_SMTP_PORT: u16 = 587;

const DEFAULT_FROM_ADDRESS: &str = "Greenlight <no-reply@greenlight.local>";

/// SMTP connection settings.
#[derive(Debug, Clone)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    /// RFC 5322 "From" mailbox.
    pub from_address: String,
    pub username: Option<String>,
    pub password: Option<String>,
}

impl SmtpConfig {
    /// Read SMTP settings. Returns `Ok(None)` if `SMTP_HOST` is not set.
    ///
    /// | Variable        | Required | Default                                  |
    /// |-----------------|----------|------------------------------------------|
    /// | `SMTP_HOST`     | yes      |                                          |
    /// | `SMTP_PORT`     | no       | `587`                                    |
    /// | `SMTP_FROM`     | no       | `Greenlight <no-reply@greenlight.local>` |
    /// | `SMTP_USER`     | no       |                                          |
    /// | `SMTP_PASSWORD` | no       |                                          |
    pub fn from_lookup<F>(lookup: &F) -> Result<Option<Self>, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let Some(host) = lookup("SMTP_HOST").filter(|h| !h.is_empty()) else {
            return Ok(None);
        };
        Ok(Some(Self {
            host,
            port: parse_or(lookup, "SMTP_PORT", DEFAULT_SMTP_PORT)?,
            from_address: lookup("SMTP_FROM").unwrap_or_else(|| DEFAULT_FROM_ADDRESS.into()),
            username: lookup("SMTP_USER"),
            password: lookup("SMTP_PASSWORD"),
        }))
    }
}

/// Sends account emails.
pub struct Mailer {
    from_address: String,
    transport: AsyncSmtpTransport<Tokio1Executor>,
}

impl Mailer {
    /// Build the SMTP transport. No connection is made until the first send.
    pub fn new(config: &SmtpConfig) -> Result<Self, MailError> {
        let mut builder = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)?
            .port(config.port);

        if let (Some(user), Some(pass)) = (&config.username, &config.password) {
            builder = builder.credentials(Credentials::new(user.clone(), pass.clone()));
        }

        Ok(Self {
            from_address: config.from_address.clone(),
            transport: builder.build(),
        })
    }

    /// Send the post-registration email carrying the activation token.
    pub async fn send_welcome(
        &self,
        to: &str,
        user_id: DbId,
        activation_token: &str,
    ) -> Result<(), MailError> {
        let email = Message::builder()
            .from(self.from_address.parse()?)
            .to(to.parse()?)
            .subject("Welcome to Greenlight!")
            .header(ContentType::TEXT_PLAIN)
            .body(welcome_body(user_id, activation_token))?;

        self.transport.send(email).await?;

        tracing::info!(user_id, "Welcome email sent");
        Ok(())
    }
}

fn welcome_body(user_id: DbId, activation_token: &str) -> String {
    format!(
        "Hi,\n\n\
         Thanks for signing up for a Greenlight account. We're excited to have you on board!\n\n\
         For future reference, your user ID number is {user_id}.\n\n\
         Please send a request to the `PUT /v1/users/activated` endpoint with the \
         following JSON body to activate your account:\n\n\
         {{\"token\": \"{activation_token}\"}}\n\n\
         Please note that this is a one-time use token and it will expire in 3 days.\n\n\
         Thanks,\n\nThe Greenlight Team\n"
    )
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    #[test]
    fn smtp_disabled_without_host() {
        let lookup = |_: &str| None;
        assert!(SmtpConfig::from_lookup(&lookup).unwrap().is_none());
    }

    #[test]
    fn smtp_defaults() {
        let map = HashMap::from([("SMTP_HOST".to_string(), "smtp.test".to_string())]);
        let lookup = |key: &str| map.get(key).cloned();
        let config = SmtpConfig::from_lookup(&lookup).unwrap().unwrap();
        assert_eq!(config.port, DEFAULT_SMTP_PORT);
        assert_eq!(config.from_address, DEFAULT_FROM_ADDRESS);
        assert!(config.username.is_none());
    }

    #[test]
    fn welcome_body_contains_token_payload() {
        let body = welcome_body(42, "abc123");
        assert!(body.contains("user ID number is 42"));
        assert!(body.contains(r#"{"token": "abc123"}"#));
    }

    #[test]
    fn default_from_address_parses() {
        let parsed: Result<lettre::message::Mailbox, _> = DEFAULT_FROM_ADDRESS.parse();
        assert!(parsed.is_ok());
    }
}
