use async_trait::async_trait;
use reqwest::StatusCode;
use thiserror::Error;

use crate::data_structs::recaptcha_response::RecaptchaResponse;

#[derive(Debug, Error)]
pub enum VerifyError {
    #[error("verification request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("verification service answered {0}")]
    Status(StatusCode),
}

/// Redeems a proof token with the bot-mitigation provider.
///
/// `Ok` carries the provider's verdict (which may still be `success: false`);
/// `Err` means the provider could not be asked or its answer could not be read.
#[async_trait]
pub trait Verifier: Send + Sync {
    async fn verify(&self, token: &str) -> Result<RecaptchaResponse, VerifyError>;
}

#[derive(Debug, Clone)]
pub struct RecaptchaVerifier {
    client: reqwest::Client,
    verify_url: String,
    secret: String,
}

impl RecaptchaVerifier {
    pub fn new(verify_url: &str, secret: &str) -> Self {
        return RecaptchaVerifier {
            client: reqwest::Client::new(),
            verify_url: verify_url.to_string(),
            secret: secret.to_string(),
        };
    }
}

#[async_trait]
impl Verifier for RecaptchaVerifier {
    async fn verify(&self, token: &str) -> Result<RecaptchaResponse, VerifyError> {
        let response = self.client.post(&self.verify_url)
            .form(&[("secret", self.secret.as_str()), ("response", token)])
            .send().await?;

        if !response.status().is_success() {
            return Err(VerifyError::Status(response.status()));
        }

        let verdict = response.json::<RecaptchaResponse>().await?;
        return Ok(verdict);
    }
}
