pub mod contact_api;

use actix_cors::Cors;
use actix_web::body::MessageBody;
use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::http::header;
use actix_web::middleware::{Condition, Logger};
use actix_web::{web, App, Error};

use crate::contact_service::ContactService;
use crate::data_structs::app_config::ServerConfig;

// roughly what a serverless platform accepts; messages themselves are not capped
pub const JSON_BODY_LIMIT: usize = 1024 * 1024;

/// The whole application as the server runs it: shared service, CORS, access log, routes.
pub fn build_app(service: ContactService, server: &ServerConfig) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = Error,
        InitError = (),
    >,
> {
    // without configured origins the page and api share an origin and need no CORS at all
    let cors_enabled = !server.allowed_origins.is_empty();

    App::new()
        .app_data(web::Data::new(service))
        .wrap(Condition::new(cors_enabled, configure_cors(server)))
        .wrap(Logger::new("%a \"%r\" %s %b \"%{User-Agent}i\" %T"))
        .configure(configure_routes)
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::scope("/api")
        .route("/ping", web::get().to(contact_api::debug_ping))
        .service(web::resource("/contact")
            .app_data(web::JsonConfig::default()
                .limit(JSON_BODY_LIMIT)
                .error_handler(contact_api::json_error_handler))
            .route(web::post().to(contact_api::contact))
            .default_service(web::to(contact_api::method_not_allowed))
        )
    );
}

pub fn configure_cors(config: &ServerConfig) -> Cors {
    let mut cors = Cors::default()
        .allowed_methods(vec!["POST"])
        .allowed_headers(vec![header::CONTENT_TYPE])
        // unlisted origins (including our own page) still reach the handler, just without CORS headers
        .block_on_origin_mismatch(false)
        .max_age(3600); // cache preflight responses for 1 hour
    for origin in &config.allowed_origins {
        cors = cors.allowed_origin(origin);
    }
    return cors;
}
