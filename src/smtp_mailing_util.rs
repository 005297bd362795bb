use async_trait::async_trait;
use chrono::{DateTime, Local};
use lettre::message::{Mailbox, MultiPart, SinglePart};
use lettre::transport::smtp::authentication::{Credentials, Mechanism};
use lettre::transport::smtp::PoolConfig;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use thiserror::Error;

use crate::data_structs::app_config::{ContactConfig, SmtpConfig};
use crate::data_structs::requests::contact_submission::ValidatedSubmission;

#[derive(Debug, Error)]
pub enum MailError {
    #[error("invalid address: {0}")]
    Address(#[from] lettre::address::AddressError),
    #[error("could not build message: {0}")]
    Build(#[from] lettre::error::Error),
    #[error("smtp error: {0}")]
    Transport(#[from] lettre::transport::smtp::Error),
}

/// Hands a finished email to the outbound relay.
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, email: &ContactEmail) -> Result<(), MailError>;
}

/// A contact form submission rendered as an email to the company inbox.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactEmail {
    pub from: String,
    pub to: String,
    pub reply_to: String,
    pub subject: String,
    pub text_body: String,
    pub html_body: String,
}

impl ContactEmail {

    pub fn render(submission: &ValidatedSubmission, config: &ContactConfig, sent_at: DateTime<Local>) -> ContactEmail {
        let timestamp = sent_at.format("%-m/%-d/%Y, %-I:%M:%S %p").to_string();

        let text_body = format!(
            "New Contact Form Submission\n\nName: {}\nEmail: {}\nMessage: {}\n\nSent: {}\n",
            submission.name, submission.email, submission.message, timestamp
        );

        let html_body = format!(
            r#"<div style="font-family: Arial, sans-serif; max-width: 600px; margin: 0 auto;">
  <h2 style="color: #0ea5e9;">New Contact Form Submission</h2>
  <div style="background: #f3f4f6; padding: 20px; border-radius: 8px; margin: 20px 0;">
    <p><strong>Name:</strong> {}</p>
    <p><strong>Email:</strong> {}</p>
    <p><strong>Message:</strong></p>
    <p style="white-space: pre-wrap;">{}</p>
  </div>
  <p style="color: #6b7280; font-size: 12px;">
    Sent from multikor.ai contact form on {}
  </p>
</div>
"#,
            html_escape(submission.name),
            html_escape(submission.email),
            html_escape(submission.message),
            timestamp
        );

        return ContactEmail {
            from: config.from_address.clone(),
            to: config.recipient.clone(),
            reply_to: submission.email.to_string(),
            subject: format!("New Contact Form Submission from {}", submission.name),
            text_body,
            html_body,
        };
    }

    pub fn to_message(&self) -> Result<Message, MailError> {
        let message = Message::builder()
            .from(self.from.parse::<Mailbox>()?)
            .reply_to(self.reply_to.parse::<Mailbox>()?)
            .to(self.to.parse::<Mailbox>()?)
            .subject(&self.subject)
            .multipart(
                MultiPart::alternative()
                    .singlepart(
                        SinglePart::builder()
                            .header(lettre::message::header::ContentType::TEXT_PLAIN)
                            .body(self.text_body.clone())
                    )
                    .singlepart(
                        SinglePart::builder()
                            .header(lettre::message::header::ContentType::TEXT_HTML)
                            .body(self.html_body.clone())
                    )
            )?;
        return Ok(message);
    }
}

fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

#[derive(Clone)]
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
}

impl SmtpMailer {
    pub fn new(transport: AsyncSmtpTransport<Tokio1Executor>) -> Self {
        SmtpMailer { transport }
    }

    pub async fn test_connection(&self) -> Result<bool, MailError> {
        Ok(self.transport.test_connection().await?)
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, email: &ContactEmail) -> Result<(), MailError> {
        let message = email.to_message()?;
        self.transport.send(message).await?;
        Ok(())
    }
}

pub fn create_smtp_transport(config: &SmtpConfig) -> Result<AsyncSmtpTransport<Tokio1Executor>, MailError> {
    let builder = if config.secure {
        AsyncSmtpTransport::<Tokio1Executor>::relay(&config.host)?
    } else {
        AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)?
    };

    let mut builder = builder
        .port(config.port)
        .pool_config(PoolConfig::new().max_size(5));

    // credentials are only sent when both halves are configured
    if let (Some(username), Some(password)) = (&config.username, &config.password) {
        builder = builder
            .credentials(Credentials::new(username.to_owned(), password.to_owned()))
            .authentication(vec![Mechanism::Plain, Mechanism::Login]);
    }

    return Ok(builder.build());
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;
    use crate::data_structs::app_config::{DEFAULT_FROM_ADDRESS, DEFAULT_VERIFY_URL, RECIPIENT_ADDRESS};

    fn contact_config() -> ContactConfig {
        ContactConfig {
            recaptcha_secret: "s3cret".to_string(),
            verify_url: DEFAULT_VERIFY_URL.to_string(),
            from_address: DEFAULT_FROM_ADDRESS.to_string(),
            recipient: RECIPIENT_ADDRESS.to_string(),
        }
    }

    fn submission<'a>(name: &'a str, email: &'a str, message: &'a str) -> ValidatedSubmission<'a> {
        ValidatedSubmission { name, email, message, recaptcha_token: "tok1" }
    }

    fn afternoon() -> DateTime<Local> {
        Local.with_ymd_and_hms(2024, 3, 7, 14, 5, 9).unwrap()
    }

    #[test]
    fn render_routes_replies_to_submitter() {
        let email = ContactEmail::render(&submission("Ada", "ada@example.com", "Hello"), &contact_config(), afternoon());

        assert_eq!(email.from, "noreply@multikor.ai");
        assert_eq!(email.to, "info@multikor.ai");
        assert_eq!(email.reply_to, "ada@example.com");
        assert_eq!(email.subject, "New Contact Form Submission from Ada");
    }

    #[test]
    fn both_bodies_carry_fields_and_timestamp() {
        let email = ContactEmail::render(&submission("Ada", "ada@example.com", "Hello"), &contact_config(), afternoon());

        for body in [&email.text_body, &email.html_body] {
            assert!(body.contains("Ada"));
            assert!(body.contains("ada@example.com"));
            assert!(body.contains("Hello"));
            assert!(body.contains("3/7/2024, 2:05:09 PM"));
        }
    }

    #[test]
    fn html_body_escapes_user_content() {
        let email = ContactEmail::render(
            &submission("<b>Eve</b>", "eve@example.com", "a & b <script>"),
            &contact_config(),
            afternoon(),
        );

        assert!(email.html_body.contains("&lt;b&gt;Eve&lt;/b&gt;"));
        assert!(email.html_body.contains("a &amp; b &lt;script&gt;"));
        assert!(!email.html_body.contains("<script>"));
        // the plain-text part is left as typed
        assert!(email.text_body.contains("a & b <script>"));
    }

    #[test]
    fn message_sets_reply_to_and_envelope() {
        let email = ContactEmail::render(&submission("Ada", "ada@example.com", "Hello"), &contact_config(), afternoon());
        let message = email.to_message().unwrap();

        assert_eq!(message.headers().get_raw("Reply-To"), Some("ada@example.com"));
        assert_eq!(message.headers().get_raw("Subject"), Some("New Contact Form Submission from Ada"));
        let recipients: Vec<String> = message.envelope().to().iter().map(|a| a.to_string()).collect();
        assert_eq!(recipients, vec!["info@multikor.ai"]);
        let formatted = String::from_utf8(message.formatted()).unwrap();
        assert!(formatted.contains("multipart/alternative"));
    }

    #[test]
    fn unparseable_reply_to_fails_to_build() {
        let email = ContactEmail::render(&submission("Ada", "not an address", "Hello"), &contact_config(), afternoon());

        assert!(matches!(email.to_message(), Err(MailError::Address(_))));
    }

    // the pooled transport spawns its reaper task, so it needs a runtime
    #[tokio::test]
    async fn transport_builds_for_both_tls_modes() {
        let mut config = SmtpConfig {
            host: "smtp.example.com".to_string(),
            port: 587,
            secure: false,
            username: Some("mailer".to_string()),
            password: Some("hunter2".to_string()),
        };
        assert!(create_smtp_transport(&config).is_ok());

        config.secure = true;
        config.port = 465;
        config.password = None;
        assert!(create_smtp_transport(&config).is_ok());
    }
}
