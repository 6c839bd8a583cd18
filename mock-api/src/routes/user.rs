//! Account routes. The two families answer with different envelopes, as
//! the upstream does: ROP listings under `safeUsers`, sales-manager
//! listings under `users` (or bare for the admin listing), created ROPs
//! with the `campanyId` spelling.

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, delete, get, patch, post, web};
use payloads::requests::{NewManagedUser, UpdateManagedUser};
use payloads::{CompanyId, UserFamily, UserId};
use serde_json::{Value, json};

use crate::store::user::{ListScope, account_json};
use crate::store::{Account, Actor, CrmStore};

use super::{APIError, message};

fn listing(accounts: &[Account]) -> Vec<Value> {
    accounts.iter().map(account_json).collect()
}

/// The created ROP as the upstream echoes it.
fn rop_json(account: &Account) -> Value {
    json!({
        "id": account.id,
        "email": account.email,
        "role": account.role,
        "campanyId": account.company_id,
        "permissions": ["CRM"],
    })
}

/// Created or updated sales managers come back without their company.
fn sales_manager_json(account: &Account) -> Value {
    json!({
        "id": account.id,
        "email": account.email,
        "role": account.role,
        "permissions": ["CRM"],
    })
}

#[tracing::instrument(skip(actor, store), fields(user_id = %actor.id))]
#[get("/user/all/rop")]
pub async fn list_rops(
    actor: Actor,
    store: web::Data<CrmStore>,
) -> Result<HttpResponse, APIError> {
    let accounts = store.list_accounts(&actor, UserFamily::Rop, ListScope::Own)?;
    Ok(HttpResponse::Ok().json(json!({ "safeUsers": listing(&accounts) })))
}

#[tracing::instrument(skip(actor, details, store), fields(user_id = %actor.id))]
#[post("/user/rop")]
pub async fn create_rop(
    actor: Actor,
    details: web::Json<NewManagedUser>,
    store: web::Data<CrmStore>,
) -> Result<HttpResponse, APIError> {
    let account = store.create_account(&actor, UserFamily::Rop, &details)?;
    Ok(HttpResponse::Created().json(json!({ "safeRop": rop_json(&account) })))
}

#[tracing::instrument(skip(actor, details, store), fields(user_id = %actor.id))]
#[patch("/user/update-rop/{id}")]
pub async fn update_rop(
    actor: Actor,
    id: web::Path<i64>,
    details: web::Json<UpdateManagedUser>,
    store: web::Data<CrmStore>,
) -> Result<HttpResponse, APIError> {
    let account =
        store.update_account(&actor, UserFamily::Rop, UserId(*id), &details)?;
    Ok(HttpResponse::Ok().json(json!({ "safeRop": rop_json(&account) })))
}

#[tracing::instrument(skip(actor, store), fields(user_id = %actor.id))]
#[delete("/user/remove-rop/{id}")]
pub async fn delete_rop(
    actor: Actor,
    id: web::Path<i64>,
    store: web::Data<CrmStore>,
) -> Result<HttpResponse, APIError> {
    store.delete_account(&actor, UserFamily::Rop, UserId(*id))?;
    Ok(message(StatusCode::OK, "Rop removed"))
}

#[tracing::instrument(skip(actor, store), fields(user_id = %actor.id))]
#[get("/user/all/sales-manager")]
pub async fn list_sales_managers(
    actor: Actor,
    store: web::Data<CrmStore>,
) -> Result<HttpResponse, APIError> {
    let accounts =
        store.list_accounts(&actor, UserFamily::SalesManager, ListScope::Own)?;
    Ok(HttpResponse::Ok().json(json!({ "users": listing(&accounts) })))
}

/// Admin listing; company `0` means all companies.
#[tracing::instrument(skip(actor, store), fields(user_id = %actor.id))]
#[get("/user/admin/all/sales-manager/{company_id}")]
pub async fn list_sales_managers_admin(
    actor: Actor,
    company_id: web::Path<i64>,
    store: web::Data<CrmStore>,
) -> Result<HttpResponse, APIError> {
    let company = Some(CompanyId(*company_id)).filter(|id| id.0 != 0);
    let accounts = store.list_accounts(
        &actor,
        UserFamily::SalesManager,
        ListScope::Company(company),
    )?;
    Ok(HttpResponse::Ok().json(listing(&accounts)))
}

#[tracing::instrument(skip(actor, details, store), fields(user_id = %actor.id))]
#[post("/user/sales-manager")]
pub async fn create_sales_manager(
    actor: Actor,
    details: web::Json<NewManagedUser>,
    store: web::Data<CrmStore>,
) -> Result<HttpResponse, APIError> {
    let account = store.create_account(&actor, UserFamily::SalesManager, &details)?;
    Ok(HttpResponse::Created()
        .json(json!({ "safeSalesManager": sales_manager_json(&account) })))
}

#[tracing::instrument(skip(actor, details, store), fields(user_id = %actor.id))]
#[patch("/user/update-sales-manager/{id}")]
pub async fn update_sales_manager(
    actor: Actor,
    id: web::Path<i64>,
    details: web::Json<UpdateManagedUser>,
    store: web::Data<CrmStore>,
) -> Result<HttpResponse, APIError> {
    let account = store.update_account(
        &actor,
        UserFamily::SalesManager,
        UserId(*id),
        &details,
    )?;
    Ok(HttpResponse::Ok()
        .json(json!({ "safeSalesManager": account_json(&account) })))
}

#[tracing::instrument(skip(actor, store), fields(user_id = %actor.id))]
#[delete("/user/remove-sales-maneger/{id}")]
pub async fn delete_sales_manager(
    actor: Actor,
    id: web::Path<i64>,
    store: web::Data<CrmStore>,
) -> Result<HttpResponse, APIError> {
    store.delete_account(&actor, UserFamily::SalesManager, UserId(*id))?;
    Ok(message(StatusCode::OK, "Sales manager removed"))
}
