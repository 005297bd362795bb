use serde::{Deserialize, Serialize};

// https://developers.google.com/recaptcha/docs/verify#api-response
#[derive(Debug, Default, PartialEq, Eq)]
#[derive(Deserialize, Serialize)]
pub struct RecaptchaResponse {
    pub success: bool,
    #[serde(default)]
    pub challenge_ts: Option<String>,
    #[serde(default)]
    pub hostname: Option<String>,
    #[serde(rename = "error-codes", default)]
    pub error_codes: Option<Vec<String>>,
}
