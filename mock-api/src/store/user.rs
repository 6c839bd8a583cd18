use payloads::requests::{LoginCredentials, NewManagedUser, ResetPassword, UpdateManagedUser};
use payloads::{CompanyId, Role, UserFamily, UserId};
use secrecy::{ExposeSecret, SecretString};
use serde_json::{Value, json};

use super::{Account, Actor, CrmStore, Inner, StoreError, into_result, validate_email, validate_password};

/// Which sales managers a listing asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListScope {
    /// Whatever the caller may see.
    Own,
    /// Admin listing; `None` means every company.
    Company(Option<CompanyId>),
}

/// Upstream list-item shape of an account.
pub fn account_json(account: &Account) -> Value {
    json!({
        "id": account.id,
        "email": account.email,
        "role": account.role,
        "companyId": account.company_id,
        "permissions": ["CRM"],
        "createdAt": account.created_at,
    })
}

fn family_role(family: UserFamily) -> Role {
    match family {
        UserFamily::Rop => Role::Rop,
        UserFamily::SalesManager => Role::SalesManager,
    }
}

/// Who may manage accounts of `family`.
fn managers_of(family: UserFamily) -> &'static [Role] {
    match family {
        UserFamily::Rop => &[Role::SuperAdmin],
        UserFamily::SalesManager => &[Role::SuperAdmin, Role::Rop],
    }
}

impl Inner {
    /// The account `id` of `family`, provided `actor` may manage it.
    fn managed_account(
        &mut self,
        actor: &Actor,
        family: UserFamily,
        id: UserId,
    ) -> Result<&mut Account, StoreError> {
        let role = family_role(family);
        let account = self
            .accounts
            .iter_mut()
            .find(|account| account.id == id && account.role == role)
            .ok_or(StoreError::UserNotFound)?;
        if actor.role == Role::Rop && account.company_id != actor.company_id {
            return Err(StoreError::Forbidden);
        }
        Ok(account)
    }
}

impl CrmStore {
    pub fn insert_account(
        &self,
        email: &str,
        password: &str,
        role: Role,
        company_id: Option<CompanyId>,
    ) -> UserId {
        let mut inner = self.lock();
        inner.next_user += 1;
        let id = UserId(inner.next_user);
        inner.accounts.push(Account {
            id,
            email: email.to_string(),
            password: SecretString::from(password),
            role,
            company_id,
            active: true,
            clients: 0,
            created_at: jiff::Timestamp::now(),
        });
        id
    }

    /// Attach `count` clients to an account so that deleting it fails.
    pub fn set_clients(&self, id: UserId, count: u32) {
        if let Some(account) = self.lock().accounts.iter_mut().find(|a| a.id == id) {
            account.clients = count;
        }
    }

    pub fn set_account_active(&self, id: UserId, active: bool) {
        if let Some(account) = self.lock().accounts.iter_mut().find(|a| a.id == id) {
            account.active = active;
        }
    }

    /// Check credentials and issue a bearer token.
    pub fn login(
        &self,
        credentials: &LoginCredentials,
    ) -> Result<(Account, String), StoreError> {
        let mut inner = self.lock();
        let account = inner
            .accounts
            .iter()
            .find(|account| account.email.eq_ignore_ascii_case(credentials.email.trim()))
            .ok_or(StoreError::UnknownEmail)?
            .clone();
        if account.password.expose_secret() != credentials.password {
            return Err(StoreError::WrongPassword);
        }
        let company_active = account
            .company_id
            .and_then(|id| inner.company(id))
            .is_none_or(|company| company.status);
        if !account.active || !company_active {
            return Err(StoreError::AccountNotActive);
        }
        let token = uuid::Uuid::new_v4().to_string();
        inner.tokens.insert(token.clone(), account.id);
        Ok((account, token))
    }

    pub fn reset_password(
        &self,
        actor: &Actor,
        details: &ResetPassword,
    ) -> Result<(), StoreError> {
        let mut problems = Vec::new();
        validate_password(&details.new_password, "newPassword", &mut problems);
        into_result(problems)?;

        let mut inner = self.lock();
        let account = inner
            .accounts
            .iter_mut()
            .find(|account| account.id == actor.id)
            .ok_or(StoreError::UserNotFound)?;
        if account.password.expose_secret() != details.old_password {
            return Err(StoreError::WrongOldPassword);
        }
        account.password = SecretString::from(details.new_password.as_str());
        Ok(())
    }

    pub fn list_accounts(
        &self,
        actor: &Actor,
        family: UserFamily,
        scope: ListScope,
    ) -> Result<Vec<Account>, StoreError> {
        match scope {
            ListScope::Own => actor.require(managers_of(family))?,
            ListScope::Company(_) => actor.require(&[Role::SuperAdmin])?,
        }
        let role = family_role(family);
        let company = match (scope, actor.role) {
            (ListScope::Company(company), _) => company,
            (ListScope::Own, Role::Rop) => actor.company_id,
            (ListScope::Own, _) => None,
        };
        let inner = self.lock();
        Ok(inner
            .accounts
            .iter()
            .rev()
            .filter(|account| account.role == role)
            .filter(|account| company.is_none() || account.company_id == company)
            .cloned()
            .collect())
    }

    pub fn create_account(
        &self,
        actor: &Actor,
        family: UserFamily,
        details: &NewManagedUser,
    ) -> Result<Account, StoreError> {
        actor.require(managers_of(family))?;
        let mut problems = Vec::new();
        validate_email(&details.email, &mut problems);
        validate_password(&details.password, "password", &mut problems);
        into_result(problems)?;

        let company_id = match actor.role {
            Role::Rop => actor.company_id.ok_or(StoreError::Forbidden)?,
            _ => details.company_id,
        };
        {
            let inner = self.lock();
            if inner.company(company_id).is_none() {
                return Err(StoreError::CompanyNotFound);
            }
            if inner.email_taken(&details.email, None) {
                return Err(StoreError::EmailTaken);
            }
        }
        let id = self.insert_account(
            details.email.trim(),
            &details.password,
            family_role(family),
            Some(company_id),
        );
        tracing::info!(%id, ?family, "account created");
        let inner = self.lock();
        inner.account(id).cloned().ok_or(StoreError::UserNotFound)
    }

    pub fn update_account(
        &self,
        actor: &Actor,
        family: UserFamily,
        id: UserId,
        details: &UpdateManagedUser,
    ) -> Result<Account, StoreError> {
        actor.require(managers_of(family))?;
        let mut problems = Vec::new();
        validate_email(&details.email, &mut problems);
        into_result(problems)?;

        let mut inner = self.lock();
        if inner.email_taken(&details.email, Some(id)) {
            // 404 takes precedence when the target does not exist
            inner.managed_account(actor, family, id)?;
            return Err(StoreError::EmailTaken);
        }
        let account = inner.managed_account(actor, family, id)?;
        account.email = details.email.trim().to_string();
        Ok(account.clone())
    }

    pub fn delete_account(
        &self,
        actor: &Actor,
        family: UserFamily,
        id: UserId,
    ) -> Result<(), StoreError> {
        actor.require(managers_of(family))?;
        let mut inner = self.lock();
        let account = inner.managed_account(actor, family, id)?;
        if account.clients > 0 {
            return Err(StoreError::HasDependents);
        }
        inner.accounts.retain(|account| account.id != id);
        inner.tokens.retain(|_, owner| *owner != id);
        Ok(())
    }
}
