#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use reqwest::StatusCode;

use multikor_contact::contact_service::ContactService;
use multikor_contact::data_structs::app_config::{
    ContactConfig, ServerConfig, DEFAULT_FROM_ADDRESS, DEFAULT_VERIFY_URL, RECIPIENT_ADDRESS,
};
use multikor_contact::data_structs::recaptcha_response::RecaptchaResponse;
use multikor_contact::recaptcha::{Verifier, VerifyError};
use multikor_contact::smtp_mailing_util::{ContactEmail, MailError, Mailer};

pub enum Verdict {
    Pass,
    Reject,
    // the provider is down and answers with an error status
    Unavailable,
}

pub struct FakeVerifier {
    verdict: Verdict,
    pub tokens: Mutex<Vec<String>>,
}

impl FakeVerifier {
    pub fn new(verdict: Verdict) -> Arc<Self> {
        Arc::new(FakeVerifier { verdict, tokens: Mutex::new(Vec::new()) })
    }

    pub fn calls(&self) -> usize {
        self.tokens.lock().unwrap().len()
    }
}

#[async_trait]
impl Verifier for FakeVerifier {
    async fn verify(&self, token: &str) -> Result<RecaptchaResponse, VerifyError> {
        self.tokens.lock().unwrap().push(token.to_string());
        match self.verdict {
            Verdict::Pass => Ok(RecaptchaResponse { success: true, ..RecaptchaResponse::default() }),
            Verdict::Reject => Ok(RecaptchaResponse {
                success: false,
                error_codes: Some(vec!["timeout-or-duplicate".to_string()]),
                ..RecaptchaResponse::default()
            }),
            Verdict::Unavailable => Err(VerifyError::Status(StatusCode::SERVICE_UNAVAILABLE)),
        }
    }
}

#[derive(Default)]
pub struct FakeMailer {
    fail: bool,
    pub sent: Mutex<Vec<ContactEmail>>,
    attempts: AtomicUsize,
}

impl FakeMailer {
    pub fn working() -> Arc<Self> {
        Arc::new(FakeMailer::default())
    }

    pub fn broken() -> Arc<Self> {
        Arc::new(FakeMailer { fail: true, ..FakeMailer::default() })
    }

    pub fn attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Mailer for FakeMailer {
    async fn send(&self, email: &ContactEmail) -> Result<(), MailError> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            // the relay's detail must never reach the caller
            return Err("535 secret-relay-password rejected".parse::<lettre::Address>().unwrap_err().into());
        }
        self.sent.lock().unwrap().push(email.clone());
        Ok(())
    }
}

pub fn contact_config() -> ContactConfig {
    ContactConfig {
        recaptcha_secret: "s3cret".to_string(),
        verify_url: DEFAULT_VERIFY_URL.to_string(),
        from_address: DEFAULT_FROM_ADDRESS.to_string(),
        recipient: RECIPIENT_ADDRESS.to_string(),
    }
}

pub fn contact_service(verifier: &Arc<FakeVerifier>, mailer: &Arc<FakeMailer>) -> ContactService {
    ContactService::new(contact_config(), verifier.clone(), mailer.clone())
}

pub fn server_config(allowed_origins: &[&str]) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        allowed_origins: allowed_origins.iter().map(|origin| origin.to_string()).collect(),
    }
}
