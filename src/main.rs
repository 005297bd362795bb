use std::io;
use std::sync::Arc;

use actix_web::HttpServer;
use dotenv::dotenv;
use log::{info, warn};

use multikor_contact::api;
use multikor_contact::contact_service::ContactService;
use multikor_contact::data_structs::app_config::AppConfig;
use multikor_contact::recaptcha::RecaptchaVerifier;
use multikor_contact::smtp_mailing_util::{create_smtp_transport, SmtpMailer};

fn load() -> io::Result<(AppConfig, SmtpMailer)> {
    info!("Loading configuration...");
    let config = AppConfig::from_env()
        .map_err(|err| io::Error::new(io::ErrorKind::InvalidInput, err))?;

    info!("Loading SMTP configuration for {}:{}", config.smtp.host, config.smtp.port);
    let transport = create_smtp_transport(&config.smtp)
        .map_err(|err| io::Error::new(io::ErrorKind::InvalidInput, err))?;

    return Ok((config, SmtpMailer::new(transport)));
}

#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenv().ok();
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let (config, mailer) = load()?;

    // a bad relay shouldn't keep the page from serving; each send reports its own failure
    match mailer.test_connection().await {
        Ok(true) => info!("SMTP relay is reachable"),
        Ok(false) => warn!("SMTP relay did not accept a test connection"),
        Err(err) => warn!("Failed to connect to SMTP server: {}", err),
    }

    let verifier = RecaptchaVerifier::new(&config.contact.verify_url, &config.contact.recaptcha_secret);
    let service = ContactService::new(config.contact.clone(), Arc::new(verifier), Arc::new(mailer));
    let server_config = config.server.clone();

    info!("Starting HTTP server on {}:{}...", server_config.host, server_config.port);
    HttpServer::new(move || api::build_app(service.clone(), &server_config))
        .bind((config.server.host.as_str(), config.server.port))?
        .run()
        .await
}
