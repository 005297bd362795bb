use serde::{Deserialize, Serialize};

pub const EMAIL_SENT: &str = "Email sent successfully";

// every response from the contact endpoint is just {"message": "..."}
#[derive(Debug, PartialEq, Eq)]
#[derive(Deserialize, Serialize)]
pub struct StatusResponse {
    pub message: String,
}

impl StatusResponse {
    pub fn new(message: &str) -> Self {
        Self { message: message.to_string() }
    }

    pub fn email_sent() -> Self {
        Self::new(EMAIL_SENT)
    }
}
