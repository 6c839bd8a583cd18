pub mod company;
pub mod login;
pub mod user;

use std::future::{Ready, ready};

use actix_web::http::StatusCode;
use actix_web::{
    FromRequest, HttpRequest, HttpResponse, Responder, ResponseError,
    body::BoxBody, dev::HttpServiceFactory, dev::Payload, get, web,
};
use serde_json::json;

use crate::store::{Actor, CrmStore, StoreError};

pub fn api_services() -> impl HttpServiceFactory {
    web::scope("/api/v1")
        .service(health_check)
        .service(uploads)
        .service(login::login)
        .service(login::reset_password)
        .service(company::list_companies)
        .service(company::get_company)
        .service(company::create_company)
        .service(company::delete_company)
        .service(company::toggle_status)
        .service(company::update_company)
        .service(user::list_rops)
        .service(user::create_rop)
        .service(user::update_rop)
        .service(user::delete_rop)
        .service(user::list_sales_managers)
        .service(user::list_sales_managers_admin)
        .service(user::create_sales_manager)
        .service(user::update_sales_manager)
        .service(user::delete_sales_manager)
}

#[get("/health_check")]
pub async fn health_check() -> impl Responder {
    HttpResponse::Ok().body("healthy")
}

#[get("/uploads/{name}")]
pub async fn uploads(
    name: web::Path<String>,
    store: web::Data<CrmStore>,
) -> Result<HttpResponse, APIError> {
    let file = store
        .logo(&name)
        .ok_or_else(|| APIError::NotFound("File not found".into()))?;
    Ok(HttpResponse::Ok()
        .content_type(file.content_type)
        .body(file.bytes))
}

/// Errors in the upstream's shape: `{"statusCode", "message", "error"}`,
/// with validation problems as a list of messages.
#[derive(Debug, thiserror::Error)]
pub enum APIError {
    #[error("Unauthorized")]
    Unauthorized,
    #[error("{0}")]
    BadRequest(String),
    #[error("Validation failed")]
    Validation(Vec<String>),
    #[error("Forbidden resource")]
    Forbidden,
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Conflict(String),
    #[error("Injected failure")]
    Injected(StatusCode),
    #[error("Internal server error")]
    UnexpectedError(#[from] anyhow::Error),
}

impl ResponseError for APIError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::BadRequest(_) | Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::Injected(status) => *status,
            Self::UnexpectedError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse<BoxBody> {
        let status = self.status_code();
        let message = match self {
            Self::Validation(problems) => json!(problems),
            Self::UnexpectedError(e) => {
                crate::telemetry::log_error(anyhow::anyhow!("{e:#}"));
                json!(self.to_string())
            }
            _ => json!(self.to_string()),
        };
        HttpResponse::build(status).json(json!({
            "statusCode": status.as_u16(),
            "message": message,
            "error": status.canonical_reason().unwrap_or_default(),
        }))
    }
}

impl From<StoreError> for APIError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::InvalidToken => APIError::Unauthorized,
            StoreError::UnknownEmail
            | StoreError::UserNotFound
            | StoreError::CompanyNotFound
            | StoreError::WrongOldPassword => APIError::NotFound(e.to_string()),
            StoreError::WrongPassword | StoreError::AccountNotActive => {
                APIError::BadRequest(e.to_string())
            }
            StoreError::Forbidden => APIError::Forbidden,
            StoreError::EmailTaken | StoreError::CompanyNameTaken => {
                APIError::Conflict(e.to_string())
            }
            StoreError::HasDependents => APIError::UnexpectedError(e.into()),
            StoreError::Validation(problems) => APIError::Validation(problems),
        }
    }
}

impl From<actix_multipart::MultipartError> for APIError {
    fn from(e: actix_multipart::MultipartError) -> Self {
        APIError::BadRequest(e.to_string())
    }
}

/// Fail with an injected status if one is registered for this request.
pub fn check_fault(request: &HttpRequest) -> Result<(), APIError> {
    let Some(store) = request.app_data::<web::Data<CrmStore>>() else {
        return Ok(());
    };
    match store.fault_for(request.method(), request.path()) {
        Some(status) => {
            tracing::debug!(path = request.path(), %status, "serving injected fault");
            Err(APIError::Injected(status))
        }
        None => Ok(()),
    }
}

fn authenticate(request: &HttpRequest) -> Result<Actor, APIError> {
    check_fault(request)?;
    let store = request
        .app_data::<web::Data<CrmStore>>()
        .ok_or_else(|| APIError::UnexpectedError(anyhow::anyhow!("store missing")))?;
    let token = request
        .headers()
        .get(actix_web::http::header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .ok_or(APIError::Unauthorized)?;
    let actor = store.authenticate(token.trim())?;
    tracing::Span::current().record("user_id", tracing::field::display(&actor.id));
    Ok(actor)
}

/// The authenticated caller. Extract it first so that injected faults and
/// auth failures win over body errors.
impl FromRequest for Actor {
    type Error = APIError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(request: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(authenticate(request))
    }
}

/// Reply for writes that do not echo the record.
pub fn message(status: StatusCode, text: &str) -> HttpResponse {
    HttpResponse::build(status).json(json!({ "message": text }))
}

/// Error handler for JSON bodies: upstream-shaped 400.
pub fn json_error(
    err: actix_web::error::JsonPayloadError,
    _request: &HttpRequest,
) -> actix_web::Error {
    APIError::BadRequest(err.to_string()).into()
}
