//! In-memory state of the mock backend.
//!
//! Everything sits behind one mutex; handlers take the lock, do their work
//! and release it before responding.

pub mod company;
pub mod user;

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use actix_web::http::{Method, StatusCode};
use payloads::{CompanyId, CompanyRecord, Role, UserId};
use secrecy::SecretString;

pub use company::{CompanyFields, LogoFile};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Unauthorized")]
    InvalidToken,
    #[error("User not found")]
    UnknownEmail,
    #[error("Invalid password")]
    WrongPassword,
    #[error("User is not active")]
    AccountNotActive,
    #[error("Old password is incorrect")]
    WrongOldPassword,
    #[error("Forbidden resource")]
    Forbidden,
    #[error("Company not found")]
    CompanyNotFound,
    #[error("User not found")]
    UserNotFound,
    #[error("Email already exists")]
    EmailTaken,
    #[error("Company name already exists")]
    CompanyNameTaken,
    #[error("update or delete violates foreign key constraint")]
    HasDependents,
    #[error("Validation failed")]
    Validation(Vec<String>),
}

/// A login-capable account.
#[derive(Debug, Clone)]
pub struct Account {
    pub id: UserId,
    pub email: String,
    pub password: SecretString,
    pub role: Role,
    pub company_id: Option<CompanyId>,
    pub active: bool,
    /// Clients and sales attached to the account. Non-zero blocks deletion.
    pub clients: u32,
    pub created_at: jiff::Timestamp,
}

/// The caller of an authenticated request.
#[derive(Debug, Clone)]
pub struct Actor {
    pub id: UserId,
    pub email: String,
    pub role: Role,
    pub company_id: Option<CompanyId>,
}

impl Actor {
    pub fn require(&self, allowed: &[Role]) -> Result<(), StoreError> {
        if allowed.contains(&self.role) {
            Ok(())
        } else {
            Err(StoreError::Forbidden)
        }
    }
}

impl From<&Account> for Actor {
    fn from(account: &Account) -> Self {
        Self {
            id: account.id,
            email: account.email.clone(),
            role: account.role,
            company_id: account.company_id,
        }
    }
}

#[derive(Default)]
pub(crate) struct Inner {
    next_company: i64,
    next_user: i64,
    /// Newest first, like the upstream listing.
    companies: Vec<CompanyRecord>,
    accounts: Vec<Account>,
    tokens: HashMap<String, UserId>,
    logos: HashMap<String, LogoFile>,
    faults: HashMap<(Method, String), StatusCode>,
}

impl Inner {
    fn account(&self, id: UserId) -> Option<&Account> {
        self.accounts.iter().find(|account| account.id == id)
    }

    fn company(&self, id: CompanyId) -> Option<&CompanyRecord> {
        self.companies.iter().find(|company| company.id == id)
    }

    fn email_taken(&self, email: &str, except: Option<UserId>) -> bool {
        self.accounts.iter().any(|account| {
            Some(account.id) != except && account.email.eq_ignore_ascii_case(email)
        })
    }
}

/// Shared mock state, handed to actix as `web::Data`.
#[derive(Default)]
pub struct CrmStore {
    inner: Mutex<Inner>,
}

impl CrmStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Answer every `method` request to `path` (e.g.
    /// `/api/v1/company/delete/3`) with `status` until cleared.
    pub fn inject_fault(&self, method: Method, path: impl Into<String>, status: StatusCode) {
        tracing::info!(%method, %status, "fault injected");
        self.lock().faults.insert((method, path.into()), status);
    }

    pub fn clear_faults(&self) {
        self.lock().faults.clear();
    }

    pub fn fault_for(&self, method: &Method, path: &str) -> Option<StatusCode> {
        self.lock()
            .faults
            .get(&(method.clone(), path.to_string()))
            .copied()
    }

    /// Resolve a bearer token to its account.
    pub fn authenticate(&self, token: &str) -> Result<Actor, StoreError> {
        let inner = self.lock();
        let id = inner.tokens.get(token).ok_or(StoreError::InvalidToken)?;
        inner
            .account(*id)
            .map(Actor::from)
            .ok_or(StoreError::InvalidToken)
    }

    /// Forget every issued token, as if they had all expired.
    pub fn expire_sessions(&self) {
        self.lock().tokens.clear();
    }

    pub fn logo(&self, name: &str) -> Option<LogoFile> {
        self.lock().logos.get(name).cloned()
    }
}

fn validate_email(email: &str, problems: &mut Vec<String>) {
    let email = email.trim();
    let well_formed = email
        .split_once('@')
        .is_some_and(|(local, domain)| !local.is_empty() && domain.contains('.'));
    if !well_formed {
        problems.push("email must be an email".to_string());
    }
}

fn validate_password(password: &str, field: &str, problems: &mut Vec<String>) {
    if password.chars().count() < 6 {
        problems.push(format!(
            "{field} must be longer than or equal to 6 characters"
        ));
    }
}

fn into_result(problems: Vec<String>) -> Result<(), StoreError> {
    if problems.is_empty() {
        Ok(())
    } else {
        Err(StoreError::Validation(problems))
    }
}
