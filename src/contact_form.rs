use async_trait::async_trait;
use log::{info, warn};
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::data_structs::requests::contact_submission::ContactSubmission;

/// Where the contact form is in its submit cycle. Drives which banner the page shows.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[derive(Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum FormStatus {
    #[default]
    Idle,
    Sending,
    Success,
    Error,
    CaptchaError,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Name,
    Email,
    Message,
}

/// The client-side bot-mitigation widget.
pub trait CaptchaWidget {
    /// The proof token, or `None` while the challenge is not completed.
    fn token(&self) -> Option<String>;
    fn reset(&mut self);
}

#[derive(Debug, Error)]
#[error("contact request failed: {0}")]
pub struct TransportError(pub String);

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        TransportError(err.to_string())
    }
}

/// Delivers a submission to the contact endpoint and reports the HTTP status.
#[async_trait]
pub trait ContactTransport: Send + Sync {
    async fn post_contact(&self, submission: &ContactSubmission) -> Result<StatusCode, TransportError>;
}

#[derive(Debug, Clone)]
pub struct HttpContactClient {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpContactClient {
    pub fn new(base_url: &str) -> Self {
        return HttpContactClient {
            client: reqwest::Client::new(),
            endpoint: format!("{}/api/contact", base_url.trim_end_matches('/')),
        };
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl ContactTransport for HttpContactClient {
    async fn post_contact(&self, submission: &ContactSubmission) -> Result<StatusCode, TransportError> {
        let response = self.client.post(&self.endpoint)
            .json(submission)
            .send().await?;
        Ok(response.status())
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ContactForm {
    name: String,
    email: String,
    message: String,
    status: FormStatus,
}

impl ContactForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(&self) -> FormStatus {
        self.status
    }

    pub fn field(&self, field: FormField) -> &str {
        match field {
            FormField::Name => &self.name,
            FormField::Email => &self.email,
            FormField::Message => &self.message,
        }
    }

    // the submit button is disabled while a request is in flight
    pub fn can_submit(&self) -> bool {
        self.status != FormStatus::Sending
    }

    /// Updates a field. A finished outcome banner is cleared so it does not
    /// linger over the new input; an in-flight request is left alone.
    pub fn edit(&mut self, field: FormField, value: &str) {
        let slot = match field {
            FormField::Name => &mut self.name,
            FormField::Email => &mut self.email,
            FormField::Message => &mut self.message,
        };
        *slot = value.to_string();

        if matches!(self.status, FormStatus::Success | FormStatus::Error | FormStatus::CaptchaError) {
            self.status = FormStatus::Idle;
        }
    }

    /// Starts a submission with the widget's current token.
    ///
    /// Returns the request to send, or `None` when nothing should go out: the
    /// widget is incomplete (status becomes `CaptchaError`), a request is already
    /// in flight, or the last one just succeeded and nothing has been edited since.
    pub fn begin_submission(&mut self, token: Option<String>) -> Option<ContactSubmission> {
        if matches!(self.status, FormStatus::Sending | FormStatus::Success) {
            return None;
        }

        let Some(token) = token.filter(|token| !token.is_empty()) else {
            self.status = FormStatus::CaptchaError;
            return None;
        };

        self.status = FormStatus::Sending;
        return Some(ContactSubmission::new(&self.name, &self.email, &self.message, &token));
    }

    /// Applies the endpoint's answer to an in-flight submission.
    pub fn finish_submission<W: CaptchaWidget>(&mut self, outcome: Result<StatusCode, TransportError>, widget: &mut W) {
        if self.status != FormStatus::Sending {
            return;
        }

        match outcome {
            Ok(status) if status.is_success() => {
                self.name.clear();
                self.email.clear();
                self.message.clear();
                widget.reset();
                self.status = FormStatus::Success;
            }
            Ok(status) => {
                warn!("Contact endpoint answered {}", status);
                self.status = FormStatus::Error;
            }
            Err(err) => {
                warn!("{}", err);
                self.status = FormStatus::Error;
            }
        }
    }

    /// Runs one full submit cycle and returns the resulting status.
    pub async fn submit<W, T>(&mut self, widget: &mut W, transport: &T) -> FormStatus
    where
        W: CaptchaWidget,
        T: ContactTransport + ?Sized,
    {
        let Some(submission) = self.begin_submission(widget.token()) else {
            return self.status;
        };

        let outcome = transport.post_contact(&submission).await;
        self.finish_submission(outcome, widget);
        info!("Contact form is now {:?}", self.status);
        return self.status;
    }
}
