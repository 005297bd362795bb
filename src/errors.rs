use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use thiserror::Error;

use crate::data_structs::responses::status_response::StatusResponse;

/// Every way a contact request can fail. The `Display` output is for the log;
/// callers only ever see [`ContactError::public_message`].
#[derive(Debug, Error)]
pub enum ContactError {
    #[error("method not allowed")]
    MethodNotAllowed,
    #[error("missing required fields")]
    MissingFields,
    #[error("reCAPTCHA rejected the token (error codes: {0:?})")]
    InvalidCaptcha(Vec<String>),
    #[error("reCAPTCHA verification failed: {0}")]
    Verification(String),
    #[error("email relay failed: {0}")]
    Relay(String),
}

impl ContactError {
    pub fn public_message(&self) -> &'static str {
        match self {
            ContactError::MethodNotAllowed => "Method not allowed",
            ContactError::MissingFields => "Missing required fields",
            ContactError::InvalidCaptcha(_) => "Invalid reCAPTCHA",
            ContactError::Verification(_) | ContactError::Relay(_) => "Error sending email",
        }
    }
}

impl ResponseError for ContactError {
    fn status_code(&self) -> StatusCode {
        match self {
            ContactError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            ContactError::MissingFields | ContactError::InvalidCaptcha(_) => StatusCode::BAD_REQUEST,
            ContactError::Verification(_) | ContactError::Relay(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(StatusResponse::new(self.public_message()))
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} is not set")]
    Missing(&'static str),
    #[error("{key} has an invalid value: {value}")]
    Invalid { key: &'static str, value: String },
}
