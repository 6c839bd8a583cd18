pub mod api_client;
pub mod endpoints;
pub mod requests;
pub mod responses;

pub use api_client::{APIClient, ClientError, Operation, classify};
pub use endpoints::{ResourceKind, SalesManagerScope, UserFamily};
pub use reqwest::StatusCode;

use jiff::Timestamp;
use serde::{Deserialize, Deserializer, Serialize};

/// The only permission the console grants to managed accounts.
pub const CRM_PERMISSION: &str = "CRM";

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    derive_more::Display,
)]
#[serde(transparent)]
pub struct CompanyId(pub i64);

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    derive_more::Display,
)]
#[serde(transparent)]
pub struct UserId(pub i64);

impl<'de> Deserialize<'de> for CompanyId {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        lenient_id(d).map(CompanyId)
    }
}

impl<'de> Deserialize<'de> for UserId {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        lenient_id(d).map(UserId)
    }
}

/// The upstream sends ids as numbers, but form-derived values occasionally
/// arrive as numeric strings.
fn lenient_id<'de, D: Deserializer<'de>>(d: D) -> Result<i64, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumberOrString {
        Number(i64),
        String(String),
    }

    match NumberOrString::deserialize(d)? {
        NumberOrString::Number(n) => Ok(n),
        NumberOrString::String(s) => {
            s.trim().parse().map_err(serde::de::Error::custom)
        }
    }
}

/// Account role. Decides the reachable navigation and endpoint family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Role {
    SuperAdmin,
    Rop,
    SalesManager,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::SuperAdmin => "SUPERADMIN",
            Role::Rop => "ROP",
            Role::SalesManager => "SALESMANAGER",
        }
    }

    pub fn is_super_admin(&self) -> bool {
        matches!(self, Role::SuperAdmin)
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().replace(['-', '_'], "").as_str() {
            "SUPERADMIN" => Ok(Role::SuperAdmin),
            "ROP" => Ok(Role::Rop),
            "SALESMANAGER" => Ok(Role::SalesManager),
            other => Err(format!("unknown role: {other}")),
        }
    }
}

impl TryFrom<String> for Role {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Role> for String {
    fn from(role: Role) -> Self {
        role.as_str().to_string()
    }
}

/// The signed-in account as returned by the login endpoint.
///
/// `campanyId` is accepted as a spelling of `companyId` on the way in and
/// never written back out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "wire::UserRecordWire")]
pub struct UserRecord {
    pub id: UserId,
    pub email: String,
    pub role: Role,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_id: Option<CompanyId>,
    /// Tokens are kept in their own storage slot, never inside the
    /// persisted session.
    #[serde(skip_serializing)]
    pub access_token: Option<String>,
}

/// A tenant company.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyRecord {
    pub id: CompanyId,
    pub name: String,
    #[serde(default)]
    pub manager_name: String,
    #[serde(default)]
    pub phone_number: String,
    #[serde(default)]
    pub description: String,
    /// Server-relative path of the uploaded logo.
    #[serde(default, deserialize_with = "empty_as_none")]
    pub logo: Option<String>,
    #[serde(default)]
    pub status: bool,
    #[serde(default)]
    pub created_at: Option<Timestamp>,
}

impl CompanyRecord {
    /// Absolute logo URL for `<img src>` given the API address.
    pub fn logo_url(&self, address: &str) -> Option<String> {
        self.logo
            .as_ref()
            .map(|path| format!("{address}/api/v1/{}", path.trim_start_matches('/')))
    }
}

/// An ROP or sales-manager account managed from the console.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "wire::ManagedUserWire")]
pub struct ManagedUserRecord {
    pub id: UserId,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_id: Option<CompanyId>,
    pub permissions: Vec<String>,
}

fn empty_as_none<'de, D: Deserializer<'de>>(
    d: D,
) -> Result<Option<String>, D::Error> {
    let value = Option::<String>::deserialize(d)?;
    Ok(value.filter(|s| !s.trim().is_empty()))
}

/// Raw upstream shapes, normalized into the public records.
mod wire {
    use super::*;

    #[derive(Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct UserRecordWire {
        id: UserId,
        #[serde(default)]
        email: String,
        role: Role,
        #[serde(default)]
        company_id: Option<CompanyId>,
        #[serde(default)]
        campany_id: Option<CompanyId>,
        #[serde(default)]
        access_token: Option<String>,
    }

    impl From<UserRecordWire> for UserRecord {
        fn from(w: UserRecordWire) -> Self {
            UserRecord {
                id: w.id,
                email: w.email,
                role: w.role,
                company_id: w.company_id.or(w.campany_id),
                access_token: w.access_token,
            }
        }
    }

    #[derive(Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct ManagedUserWire {
        id: UserId,
        #[serde(default)]
        email: String,
        #[serde(default)]
        company_id: Option<CompanyId>,
        #[serde(default)]
        campany_id: Option<CompanyId>,
        #[serde(default)]
        permissions: Vec<String>,
    }

    impl From<ManagedUserWire> for ManagedUserRecord {
        fn from(w: ManagedUserWire) -> Self {
            ManagedUserRecord {
                id: w.id,
                email: w.email,
                company_id: w.company_id.or(w.campany_id),
                permissions: w.permissions,
            }
        }
    }
}
