use crate::{
    CompanyId, CompanyRecord, ManagedUserRecord, SalesManagerScope, UserFamily,
    UserId, endpoints, requests, responses,
};
use reqwest::StatusCode;
use reqwest::multipart::{Form, Part};
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use serde_json::Value;

/// Fixed pagination for the company listing; the console shows everything.
const COMPANY_PAGE: &str = "1";
const COMPANY_PAGE_LIMIT: &str = "1000";

/// Sent when the browser reports no type for a picked file.
pub const FALLBACK_LOGO_TYPE: &str = "application/octet-stream";

/// An API client for the upstream CRM backend.
pub struct APIClient {
    pub address: String,
    pub inner_client: reqwest::Client,
    /// Bearer credential. Without it every authenticated call fails with
    /// [`ClientError::NoCredential`] before touching the network.
    pub token: Option<SecretString>,
}

/// Helper methods for http actions
impl APIClient {
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            inner_client: reqwest::Client::new(),
            token: None,
        }
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        let token: String = token.into();
        self.token = Some(SecretString::from(token));
        self
    }

    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }

    fn format_url(&self, path: &str) -> String {
        format!("{}/api/v1/{path}", &self.address)
    }

    fn authorized(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<reqwest::RequestBuilder, ClientError> {
        let token = self.token.as_ref().ok_or(ClientError::NoCredential)?;
        Ok(request.bearer_auth(token.expose_secret()))
    }

    fn get(&self, path: &str) -> Result<reqwest::RequestBuilder, ClientError> {
        self.authorized(self.inner_client.get(self.format_url(path)))
    }

    fn post_json(
        &self,
        path: &str,
        body: &impl Serialize,
    ) -> Result<reqwest::RequestBuilder, ClientError> {
        self.authorized(self.inner_client.post(self.format_url(path)).json(body))
    }

    fn patch(&self, path: &str) -> Result<reqwest::RequestBuilder, ClientError> {
        self.authorized(self.inner_client.patch(self.format_url(path)))
    }

    fn delete(&self, path: &str) -> Result<reqwest::RequestBuilder, ClientError> {
        self.authorized(self.inner_client.delete(self.format_url(path)))
    }

    /// Send a request and return its body as JSON (`Null` when empty), or the
    /// classified failure.
    async fn execute(
        &self,
        operation: Operation,
        request: reqwest::RequestBuilder,
    ) -> Result<Value, ClientError> {
        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;
        tracing::debug!(?operation, %status, "api response");

        if !status.is_success() {
            let error =
                classify(operation, status, responses::error_message(&text));
            tracing::warn!(?operation, %status, "request failed: {error}");
            return Err(error);
        }
        if text.trim().is_empty() {
            return Ok(Value::Null);
        }
        Ok(serde_json::from_str(&text)?)
    }
}

/// Methods on the upstream API
impl APIClient {
    pub async fn login(
        &self,
        details: &requests::LoginCredentials,
    ) -> Result<responses::LoginResponse, ClientError> {
        let request = self
            .inner_client
            .post(self.format_url(endpoints::LOGIN))
            .json(details);
        let body = self.execute(Operation::Login, request).await?;
        Ok(serde_json::from_value(body)?)
    }

    /// Change the signed-in account's password.
    pub async fn reset_password(
        &self,
        details: &requests::ResetPassword,
    ) -> Result<(), ClientError> {
        let request = self.post_json(endpoints::RESET_PASSWORD, details)?;
        self.execute(Operation::ResetPassword, request).await?;
        Ok(())
    }

    /// List companies, filtered server-side by name when `search` is not
    /// empty.
    pub async fn list_companies(
        &self,
        search: &str,
    ) -> Result<Vec<CompanyRecord>, ClientError> {
        let mut query = vec![("page", COMPANY_PAGE), ("limit", COMPANY_PAGE_LIMIT)];
        let search = search.trim();
        if !search.is_empty() {
            query.push(("companyName", search));
        }
        let request = self.get(endpoints::COMPANY_LIST)?.query(&query);
        let body = self.execute(Operation::List, request).await?;
        Ok(responses::parse_list(body)?)
    }

    pub async fn get_company(
        &self,
        id: CompanyId,
    ) -> Result<CompanyRecord, ClientError> {
        let request = self.get(&endpoints::company_one(id))?;
        let body = self.execute(Operation::Get, request).await?;
        responses::parse_record(body, &["data"])
            .ok_or(ClientError::NotFound)
    }

    /// Create a company. The upstream does not always echo the record back,
    /// hence the `Option`.
    pub async fn create_company(
        &self,
        form: &requests::CompanyForm,
    ) -> Result<Option<CompanyRecord>, ClientError> {
        let request = self
            .authorized(
                self.inner_client.post(self.format_url(endpoints::COMPANY_CREATE)),
            )?
            .multipart(company_multipart(form)?);
        let body = self.execute(Operation::Create, request).await?;
        Ok(responses::parse_record(body, &["data", "company"]))
    }

    pub async fn update_company(
        &self,
        id: CompanyId,
        form: &requests::CompanyForm,
    ) -> Result<Option<CompanyRecord>, ClientError> {
        let request = self
            .patch(&endpoints::company_update(id))?
            .multipart(company_multipart(form)?);
        let body = self.execute(Operation::Update, request).await?;
        Ok(responses::parse_record(body, &["data", "company"]))
    }

    pub async fn delete_company(&self, id: CompanyId) -> Result<(), ClientError> {
        let request = self.delete(&endpoints::company_delete(id))?;
        self.execute(Operation::Delete, request).await?;
        Ok(())
    }

    /// Flip the company's active flag server-side.
    pub async fn toggle_company_status(
        &self,
        id: CompanyId,
    ) -> Result<(), ClientError> {
        let request = self.patch(&endpoints::company_status(id))?;
        self.execute(Operation::ToggleStatus, request).await?;
        Ok(())
    }

    pub async fn list_users(
        &self,
        family: UserFamily,
        scope: SalesManagerScope,
    ) -> Result<Vec<ManagedUserRecord>, ClientError> {
        let request = self.get(&family.list_path(scope))?;
        let body = self.execute(Operation::List, request).await?;
        Ok(responses::parse_list(body)?)
    }

    /// Create an account. A returned record without a company inherits the
    /// requested one.
    pub async fn create_user(
        &self,
        family: UserFamily,
        details: &requests::NewManagedUser,
    ) -> Result<Option<ManagedUserRecord>, ClientError> {
        let request = self.post_json(family.create_path(), details)?;
        let body = self.execute(Operation::Create, request).await?;
        let record: Option<ManagedUserRecord> =
            responses::parse_record(body, &[family.record_key(), "data"]);
        Ok(record.map(|mut user| {
            user.company_id.get_or_insert(details.company_id);
            user
        }))
    }

    pub async fn update_user(
        &self,
        family: UserFamily,
        id: UserId,
        details: &requests::UpdateManagedUser,
    ) -> Result<Option<ManagedUserRecord>, ClientError> {
        let request = self
            .patch(&family.update_path(id))?
            .json(details);
        let body = self.execute(Operation::Update, request).await?;
        Ok(responses::parse_record(body, &[family.record_key(), "data"]))
    }

    pub async fn delete_user(
        &self,
        family: UserFamily,
        id: UserId,
    ) -> Result<(), ClientError> {
        let request = self.delete(&family.delete_path(id))?;
        self.execute(Operation::Delete, request).await?;
        Ok(())
    }
}

fn company_multipart(form: &requests::CompanyForm) -> Result<Form, ClientError> {
    let mut multipart = Form::new();
    for (name, value) in form.text_fields() {
        multipart = multipart.text(name, value);
    }
    if let requests::LogoUpload::Replace {
        file_name,
        content_type,
        bytes,
    } = &form.logo
    {
        let content_type = match content_type.trim() {
            "" => FALLBACK_LOGO_TYPE,
            content_type => content_type,
        };
        let part = Part::bytes(bytes.clone())
            .file_name(file_name.clone())
            .mime_str(content_type)?;
        multipart = multipart.part("logo", part);
    }
    Ok(multipart)
}

/// The logical operation a request performs. Status codes mean different
/// things per operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Login,
    ResetPassword,
    List,
    Get,
    Create,
    Update,
    Delete,
    ToggleStatus,
}

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("Not signed in")]
    NoCredential,
    #[error("Session expired")]
    AuthExpired,
    #[error("Email is already registered")]
    DuplicateEmail,
    #[error("Invalid data: {0}")]
    InvalidPayload(String),
    #[error("Permission denied")]
    Forbidden,
    #[error("Not found")]
    NotFound,
    #[error("Record still has dependent records")]
    HasDependentRecords,
    #[error("Could not load data ({0})")]
    FetchFailure(StatusCode, String),
    #[error("Invalid email or password")]
    InvalidCredentials,
    #[error("Account is not active")]
    AccountInactive,
    #[error("Current password is wrong")]
    WrongCurrentPassword,
    /// An unhandled API error to display, containing the response message.
    #[error("Unexpected error ({0}): {1}")]
    UnknownFailure(StatusCode, String),
    #[error("Malformed response: {0}")]
    Decode(#[from] serde_json::Error),
    /// The request could not be assembled; nothing was sent.
    #[error("Invalid request: {0}")]
    Request(reqwest::Error),
    #[error("Network error. Please check your connection.")]
    Network(reqwest::Error),
}

impl From<reqwest::Error> for ClientError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_builder() {
            ClientError::Request(error)
        } else {
            ClientError::Network(error)
        }
    }
}

impl ClientError {
    /// True when no response was received at all.
    pub fn is_network(&self) -> bool {
        matches!(self, ClientError::Network(_))
    }

    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ClientError::FetchFailure(status, _)
            | ClientError::UnknownFailure(status, _) => Some(*status),
            ClientError::Network(e) => e.status(),
            _ => None,
        }
    }
}

/// Classify a non-success status for the given operation.
pub fn classify(
    operation: Operation,
    status: StatusCode,
    message: String,
) -> ClientError {
    match operation {
        Operation::Login => match status {
            StatusCode::BAD_REQUEST
            | StatusCode::NOT_FOUND
            | StatusCode::UNAUTHORIZED => {
                if message.to_lowercase().contains("not active") {
                    ClientError::AccountInactive
                } else {
                    ClientError::InvalidCredentials
                }
            }
            _ => ClientError::UnknownFailure(status, message),
        },
        _ if status == StatusCode::UNAUTHORIZED => ClientError::AuthExpired,
        Operation::ResetPassword => match status {
            StatusCode::BAD_REQUEST => ClientError::InvalidPayload(message),
            StatusCode::NOT_FOUND => ClientError::WrongCurrentPassword,
            StatusCode::FORBIDDEN => ClientError::Forbidden,
            _ => ClientError::UnknownFailure(status, message),
        },
        Operation::List => ClientError::FetchFailure(status, message),
        Operation::Get => match status {
            StatusCode::NOT_FOUND => ClientError::NotFound,
            StatusCode::FORBIDDEN => ClientError::Forbidden,
            _ => ClientError::FetchFailure(status, message),
        },
        Operation::Create => classify_write(status, message),
        Operation::Update | Operation::ToggleStatus => match status {
            StatusCode::NOT_FOUND => ClientError::NotFound,
            _ => classify_write(status, message),
        },
        Operation::Delete => match status {
            StatusCode::NOT_FOUND => ClientError::NotFound,
            StatusCode::INTERNAL_SERVER_ERROR => ClientError::HasDependentRecords,
            _ => classify_write(status, message),
        },
    }
}

fn classify_write(status: StatusCode, message: String) -> ClientError {
    match status {
        StatusCode::CONFLICT => ClientError::DuplicateEmail,
        StatusCode::BAD_REQUEST => ClientError::InvalidPayload(message),
        StatusCode::FORBIDDEN => ClientError::Forbidden,
        _ => ClientError::UnknownFailure(status, message),
    }
}
