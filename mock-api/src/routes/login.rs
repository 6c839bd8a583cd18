use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse, post, web};
use payloads::requests::{LoginCredentials, ResetPassword};
use serde_json::json;

use crate::store::{Actor, CrmStore};

use super::{APIError, check_fault, message};

#[tracing::instrument(
    skip(request, credentials, store),
    fields(email = %credentials.email, user_id = tracing::field::Empty)
)]
#[post("/auth/login")]
pub async fn login(
    request: HttpRequest,
    credentials: web::Json<LoginCredentials>,
    store: web::Data<CrmStore>,
) -> Result<HttpResponse, APIError> {
    check_fault(&request)?;
    let (account, token) = store.login(&credentials)?;
    tracing::Span::current().record("user_id", tracing::field::display(&account.id));
    Ok(HttpResponse::Created().json(json!({
        "user": {
            "id": account.id,
            "email": account.email,
            "role": account.role,
            "companyId": account.company_id,
        },
        "accessToken": token,
    })))
}

#[tracing::instrument(skip(actor, details, store), fields(user_id = %actor.id))]
#[post("/auth/reset-password")]
pub async fn reset_password(
    actor: Actor,
    details: web::Json<ResetPassword>,
    store: web::Data<CrmStore>,
) -> Result<HttpResponse, APIError> {
    store.reset_password(&actor, &details)?;
    Ok(message(StatusCode::CREATED, "Password updated"))
}
