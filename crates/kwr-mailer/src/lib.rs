//! Outbound HTML email over authenticated SMTPS.
//!
//! One fixed provider endpoint, credentials via app password. The blocking
//! `lettre` transport runs on the blocking pool so the async caller is never
//! stalled.

use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Message, SmtpTransport, Transport};
use thiserror::Error;

const SMTP_HOST: &str = "smtp.gmail.com";
const FROM_DISPLAY_NAME: &str = "Keyword Bot";

#[derive(Debug, Error)]
pub enum MailError {
    #[error("invalid email address: {0}")]
    Address(#[from] lettre::address::AddressError),

    #[error("could not build message: {0}")]
    Message(#[from] lettre::error::Error),

    #[error("SMTP error: {0}")]
    Smtp(#[from] lettre::transport::smtp::Error),

    #[error("send task failed: {0}")]
    Join(String),
}

/// Send one HTML email to the full recipient list.
///
/// # Errors
///
/// Returns [`MailError`] when an address does not parse, the message cannot
/// be built, or the SMTP session fails. Callers log the error and translate
/// it into a non-zero exit; it never panics.
pub async fn send_html_email(
    subject: &str,
    html_body: &str,
    sender: &str,
    recipients: &[String],
    app_password: &str,
) -> Result<(), MailError> {
    let from = Mailbox::new(Some(FROM_DISPLAY_NAME.to_string()), sender.parse()?);

    let mut builder = Message::builder()
        .from(from)
        .subject(subject)
        .header(ContentType::TEXT_HTML);
    for recipient in recipients {
        builder = builder.to(recipient.parse()?);
    }
    let message = builder.body(html_body.to_string())?;

    let credentials = Credentials::new(sender.to_string(), app_password.to_string());
    let transport = SmtpTransport::relay(SMTP_HOST)?
        .credentials(credentials)
        .build();

    let recipient_count = recipients.len();
    tokio::task::spawn_blocking(move || transport.send(&message))
        .await
        .map_err(|e| MailError::Join(e.to_string()))??;

    tracing::info!(recipients = recipient_count, "digest email sent");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn invalid_sender_address_is_rejected() {
        let result = send_html_email(
            "Subject",
            "<html></html>",
            "not-an-address",
            &["team@example.com".to_string()],
            "password",
        )
        .await;
        assert!(
            matches!(result, Err(MailError::Address(_))),
            "expected MailError::Address, got: {result:?}"
        );
    }

    #[tokio::test]
    async fn invalid_recipient_address_is_rejected() {
        let result = send_html_email(
            "Subject",
            "<html></html>",
            "bot@example.com",
            &["@@".to_string()],
            "password",
        )
        .await;
        assert!(
            matches!(result, Err(MailError::Address(_))),
            "expected MailError::Address, got: {result:?}"
        );
    }

    /// Builds a transport against a port nothing listens on: the send must
    /// come back as an `Err`, not a panic, so the caller can log and exit
    /// with a distinguishable status.
    #[tokio::test]
    async fn connection_failure_returns_smtp_error_without_panicking() {
        let message = Message::builder()
            .from("Keyword Bot <bot@example.com>".parse().unwrap())
            .to("team@example.com".parse().unwrap())
            .subject("Subject")
            .header(ContentType::TEXT_HTML)
            .body("<html></html>".to_string())
            .unwrap();

        let transport = SmtpTransport::builder_dangerous("127.0.0.1").port(9).build();
        let result = tokio::task::spawn_blocking(move || transport.send(&message))
            .await
            .expect("send task must not panic");

        assert!(result.is_err(), "expected an SMTP connection error");
    }
}
