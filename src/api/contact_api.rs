use actix_web::error::JsonPayloadError;
use actix_web::http::header;
use actix_web::{web, HttpRequest, HttpResponse, Responder};
use log::warn;

use crate::contact_service::ContactService;
use crate::data_structs::requests::contact_submission::ContactSubmission;
use crate::data_structs::responses::status_response::StatusResponse;
use crate::errors::ContactError;

pub async fn debug_ping() -> impl Responder {
    // just to test that the server is running
    "Pong!"
}

pub async fn contact(service: web::Data<ContactService>, payload: web::Json<ContactSubmission>) -> Result<HttpResponse, ContactError> {
    service.submit(&payload).await?;
    Ok(HttpResponse::Ok().json(StatusResponse::email_sent()))
}

pub async fn method_not_allowed(req: HttpRequest) -> HttpResponse {
    warn!("Rejected {} {}", req.method(), req.path());
    let error = ContactError::MethodNotAllowed;
    HttpResponse::MethodNotAllowed()
        .insert_header((header::ALLOW, "POST"))
        .json(StatusResponse::new(error.public_message()))
}

// a body we can't read as json has, as far as we're concerned, no fields at all
pub fn json_error_handler(err: JsonPayloadError, req: &HttpRequest) -> actix_web::Error {
    warn!("Unreadable contact payload on {}: {}", req.path(), err);
    ContactError::MissingFields.into()
}
