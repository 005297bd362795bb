use crate::errors::ConfigError;

pub const RECIPIENT_ADDRESS: &str = "info@multikor.ai";
pub const DEFAULT_FROM_ADDRESS: &str = "noreply@multikor.ai";
pub const DEFAULT_VERIFY_URL: &str = "https://www.google.com/recaptcha/api/siteverify";
pub const DEFAULT_SMTP_PORT: u16 = 587;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    // true means implicit TLS (usually port 465), otherwise STARTTLS
    pub secure: bool,
    pub username: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactConfig {
    pub recaptcha_secret: String,
    pub verify_url: String,
    pub from_address: String,
    pub recipient: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub allowed_origins: Vec<String>,
}

/// Everything the process reads from its environment, loaded once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub contact: ContactConfig,
    pub smtp: SmtpConfig,
    pub server: ServerConfig,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup. Unset and empty values are
    /// treated the same.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.is_empty());
        let require = |key: &'static str| get(key).ok_or(ConfigError::Missing(key));

        let contact = ContactConfig {
            recaptcha_secret: require("RECAPTCHA_SECRET_KEY")?,
            verify_url: get("RECAPTCHA_VERIFY_URL").unwrap_or_else(|| DEFAULT_VERIFY_URL.to_string()),
            from_address: get("SMTP_FROM").unwrap_or_else(|| DEFAULT_FROM_ADDRESS.to_string()),
            recipient: RECIPIENT_ADDRESS.to_string(),
        };

        let smtp = SmtpConfig {
            host: require("SMTP_HOST")?,
            port: parse_port("SMTP_PORT", get("SMTP_PORT"), DEFAULT_SMTP_PORT)?,
            secure: get("SMTP_SECURE").as_deref() == Some("true"),
            username: get("SMTP_USER"),
            password: get("SMTP_PASS"),
        };

        let server = ServerConfig {
            host: get("BIND_HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: parse_port("BIND_PORT", get("BIND_PORT"), 8080)?,
            allowed_origins: get("CORS_ALLOWED_ORIGINS")
                .map(|origins| {
                    origins.split(',')
                        .map(|origin| origin.trim().to_string())
                        .filter(|origin| !origin.is_empty())
                        .collect()
                })
                .unwrap_or_default(),
        };

        return Ok(AppConfig { contact, smtp, server });
    }
}

fn parse_port(key: &'static str, value: Option<String>, default: u16) -> Result<u16, ConfigError> {
    match value {
        None => Ok(default),
        Some(value) => value.trim().parse::<u16>()
            .map_err(|_| ConfigError::Invalid { key, value }),
    }
}
