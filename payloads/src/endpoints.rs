//! Path map of the upstream API, relative to `{address}/api/v1/`.
//!
//! The upstream is not uniformly RESTful, so every family spells out its own
//! routes. `remove-sales-maneger` is the upstream's literal path.

use crate::{CompanyId, UserId};

pub const LOGIN: &str = "auth/login";
pub const RESET_PASSWORD: &str = "auth/reset-password";

pub const COMPANY_CREATE: &str = "company";
pub const COMPANY_LIST: &str = "company/all";

pub fn company_one(id: CompanyId) -> String {
    format!("company/one/{id}")
}

pub fn company_update(id: CompanyId) -> String {
    format!("company/{id}")
}

pub fn company_delete(id: CompanyId) -> String {
    format!("company/delete/{id}")
}

pub fn company_status(id: CompanyId) -> String {
    format!("company/status/{id}")
}

/// One of the three manageable entity types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Company,
    Rop,
    SalesManager,
}

impl From<UserFamily> for ResourceKind {
    fn from(family: UserFamily) -> Self {
        match family {
            UserFamily::Rop => ResourceKind::Rop,
            UserFamily::SalesManager => ResourceKind::SalesManager,
        }
    }
}

/// The two account families that share the managed-user shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UserFamily {
    Rop,
    SalesManager,
}

/// Which sales managers a listing covers. Only a super-administrator may
/// use the admin variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SalesManagerScope {
    /// Whatever the caller's own role is entitled to.
    #[default]
    Own,
    /// Every company (admin endpoint with company `0`).
    AllCompanies,
    /// A single company (admin endpoint).
    Company(CompanyId),
}

impl UserFamily {
    pub fn create_path(&self) -> &'static str {
        match self {
            UserFamily::Rop => "user/rop",
            UserFamily::SalesManager => "user/sales-manager",
        }
    }

    pub fn list_path(&self, scope: SalesManagerScope) -> String {
        match (self, scope) {
            (UserFamily::Rop, _) => "user/all/rop".into(),
            (UserFamily::SalesManager, SalesManagerScope::Own) => {
                "user/all/sales-manager".into()
            }
            (UserFamily::SalesManager, SalesManagerScope::AllCompanies) => {
                "user/admin/all/sales-manager/0".into()
            }
            (UserFamily::SalesManager, SalesManagerScope::Company(id)) => {
                format!("user/admin/all/sales-manager/{id}")
            }
        }
    }

    pub fn update_path(&self, id: UserId) -> String {
        match self {
            UserFamily::Rop => format!("user/update-rop/{id}"),
            UserFamily::SalesManager => {
                format!("user/update-sales-manager/{id}")
            }
        }
    }

    pub fn delete_path(&self, id: UserId) -> String {
        match self {
            UserFamily::Rop => format!("user/remove-rop/{id}"),
            UserFamily::SalesManager => {
                format!("user/remove-sales-maneger/{id}")
            }
        }
    }

    /// Envelope key under which create/update responses nest the record.
    pub fn record_key(&self) -> &'static str {
        match self {
            UserFamily::Rop => "safeRop",
            UserFamily::SalesManager => "safeSalesManager",
        }
    }
}
