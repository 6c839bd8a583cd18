use actix_multipart::Multipart;
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, delete, get, patch, post, web};
use futures::StreamExt;
use payloads::CompanyId;
use serde::Deserialize;
use serde_json::json;

use crate::store::{Actor, CompanyFields, CrmStore, LogoFile};

use super::{APIError, message};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery {
    page: Option<usize>,
    limit: Option<usize>,
    company_name: Option<String>,
}

#[tracing::instrument(skip(actor, store), fields(user_id = %actor.id))]
#[get("/company/all")]
pub async fn list_companies(
    actor: Actor,
    query: web::Query<ListQuery>,
    store: web::Data<CrmStore>,
) -> Result<HttpResponse, APIError> {
    let page = query.page.unwrap_or(1).max(1);
    let limit = query.limit.unwrap_or(10).max(1);
    let name = query.company_name.as_deref().filter(|n| !n.trim().is_empty());
    let (companies, total) = store.list_companies(&actor, name, page, limit)?;
    Ok(HttpResponse::Ok().json(json!({
        "data": companies,
        "total": total,
        "page": page,
        "limit": limit,
    })))
}

#[tracing::instrument(skip(actor, store), fields(user_id = %actor.id))]
#[get("/company/one/{id}")]
pub async fn get_company(
    actor: Actor,
    id: web::Path<i64>,
    store: web::Data<CrmStore>,
) -> Result<HttpResponse, APIError> {
    let company = store.get_company(&actor, CompanyId(*id))?;
    Ok(HttpResponse::Ok().json(json!({ "data": company })))
}

#[tracing::instrument(skip(actor, form, store), fields(user_id = %actor.id))]
#[post("/company")]
pub async fn create_company(
    actor: Actor,
    form: Multipart,
    store: web::Data<CrmStore>,
) -> Result<HttpResponse, APIError> {
    let fields = read_company_form(form).await?;
    let company = store.create_company(&actor, fields)?;
    Ok(HttpResponse::Created().json(json!({
        "message": "Company created",
        "data": company,
    })))
}

#[tracing::instrument(skip(actor, form, store), fields(user_id = %actor.id))]
#[patch("/company/{id}")]
pub async fn update_company(
    actor: Actor,
    id: web::Path<i64>,
    form: Multipart,
    store: web::Data<CrmStore>,
) -> Result<HttpResponse, APIError> {
    let fields = read_company_form(form).await?;
    let company = store.update_company(&actor, CompanyId(*id), fields)?;
    Ok(HttpResponse::Ok().json(json!({ "company": company })))
}

#[tracing::instrument(skip(actor, store), fields(user_id = %actor.id))]
#[delete("/company/delete/{id}")]
pub async fn delete_company(
    actor: Actor,
    id: web::Path<i64>,
    store: web::Data<CrmStore>,
) -> Result<HttpResponse, APIError> {
    store.delete_company(&actor, CompanyId(*id))?;
    Ok(message(StatusCode::OK, "Company deleted"))
}

#[tracing::instrument(skip(actor, store), fields(user_id = %actor.id))]
#[patch("/company/status/{id}")]
pub async fn toggle_status(
    actor: Actor,
    id: web::Path<i64>,
    store: web::Data<CrmStore>,
) -> Result<HttpResponse, APIError> {
    let status = store.toggle_company(&actor, CompanyId(*id))?;
    tracing::debug!(status, "company status toggled");
    Ok(message(StatusCode::OK, "Status updated"))
}

/// Collect the multipart company form. Unknown fields (such as
/// `permissions`) are ignored; an empty `logo` text field clears the logo.
async fn read_company_form(mut form: Multipart) -> Result<CompanyFields, APIError> {
    let mut fields = CompanyFields::default();
    while let Some(field) = form.next().await {
        let mut field = field?;
        let name = field.name().unwrap_or_default().to_string();
        let file_name = field
            .content_disposition()
            .and_then(|disposition| disposition.get_filename())
            .map(str::to_string);
        let content_type = field
            .content_type()
            .map(|mime| mime.to_string())
            .unwrap_or_else(|| "application/octet-stream".to_string());

        let mut bytes = Vec::new();
        while let Some(chunk) = field.next().await {
            bytes.extend_from_slice(&chunk?);
        }

        if name == "logo" {
            fields.logo = Some(match file_name {
                Some(file_name) if !bytes.is_empty() => {
                    Some((file_name, LogoFile { content_type, bytes }))
                }
                _ => None,
            });
            continue;
        }
        let text = String::from_utf8(bytes)
            .map_err(|_| APIError::BadRequest(format!("{name} must be text")))?;
        match name.as_str() {
            "name" => fields.name = Some(text),
            "managerName" => fields.manager_name = Some(text),
            "phoneNumber" => fields.phone_number = Some(text),
            "description" => fields.description = Some(text),
            _ => {}
        }
    }
    Ok(fields)
}
