use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::errors::ContactError;

/// The JSON body posted by the contact form.
///
/// Every field is optional on the wire so a missing field surfaces as
/// [`ContactError::MissingFields`] instead of a deserialization failure.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
#[derive(Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactSubmission {
    #[serde(default, deserialize_with = "truthy_text")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "truthy_text")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "truthy_text")]
    pub message: Option<String>,
    #[serde(default, deserialize_with = "truthy_text")]
    pub recaptcha_token: Option<String>,
}

/// A submission where all four fields are present and non-empty.
#[derive(Debug, PartialEq, Eq)]
pub struct ValidatedSubmission<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub message: &'a str,
    pub recaptcha_token: &'a str,
}

impl ContactSubmission {
    pub fn new(name: &str, email: &str, message: &str, recaptcha_token: &str) -> Self {
        return ContactSubmission {
            name: Some(name.to_string()),
            email: Some(email.to_string()),
            message: Some(message.to_string()),
            recaptcha_token: Some(recaptcha_token.to_string()),
        };
    }

    pub fn validate(&self) -> Result<ValidatedSubmission<'_>, ContactError> {
        let (Some(name), Some(email), Some(message), Some(recaptcha_token)) = (
            present(&self.name),
            present(&self.email),
            present(&self.message),
            present(&self.recaptcha_token),
        ) else {
            return Err(ContactError::MissingFields);
        };

        Ok(ValidatedSubmission { name, email, message, recaptcha_token })
    }
}

// Form posts are loosely typed: a truthy non-string (42, true, {...}) is kept as its
// JSON text, while null, false and 0 count as missing.
fn truthy_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(Value::Null) | Some(Value::Bool(false)) => None,
        Some(Value::String(text)) => Some(text),
        Some(Value::Number(number)) if number.as_f64() == Some(0.0) => None,
        Some(other) => Some(other.to_string()),
    })
}

// an empty string counts as missing
fn present(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|value| !value.is_empty())
}
