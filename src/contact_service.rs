use std::sync::Arc;

use chrono::Local;
use log::{error, info, warn};

use crate::data_structs::app_config::ContactConfig;
use crate::data_structs::requests::contact_submission::ContactSubmission;
use crate::errors::ContactError;
use crate::recaptcha::Verifier;
use crate::smtp_mailing_util::{ContactEmail, Mailer};

/// The contact pipeline: validate, then verify the proof token, then relay.
/// Holds no per-request state, so one instance serves every worker.
#[derive(Clone)]
pub struct ContactService {
    config: ContactConfig,
    verifier: Arc<dyn Verifier>,
    mailer: Arc<dyn Mailer>,
}

impl ContactService {
    pub fn new(config: ContactConfig, verifier: Arc<dyn Verifier>, mailer: Arc<dyn Mailer>) -> Self {
        return ContactService { config, verifier, mailer };
    }

    pub async fn submit(&self, submission: &ContactSubmission) -> Result<(), ContactError> {
        let validated = submission.validate()?;

        let verdict = match self.verifier.verify(validated.recaptcha_token).await {
            Ok(verdict) => verdict,
            Err(err) => {
                error!("Error verifying reCAPTCHA: {}", err);
                return Err(ContactError::Verification(err.to_string()));
            }
        };

        if !verdict.success {
            let error_codes = verdict.error_codes.unwrap_or_default();
            warn!("reCAPTCHA rejected contact submission: {:?}", error_codes);
            return Err(ContactError::InvalidCaptcha(error_codes));
        }

        let email = ContactEmail::render(&validated, &self.config, Local::now());
        if let Err(err) = self.mailer.send(&email).await {
            error!("Error sending email: {}", err);
            return Err(ContactError::Relay(err.to_string()));
        }

        info!("Relayed contact submission to {}", email.to);
        Ok(())
    }
}
