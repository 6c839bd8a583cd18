use crate::{CRM_PERMISSION, CompanyId};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginCredentials {
    pub email: String,
    pub password: String,
}

/// Password change for the signed-in account.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResetPassword {
    pub old_password: String,
    pub new_password: String,
    pub email: String,
}

/// The logo part of a company form.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LogoUpload {
    /// Leave the stored logo alone (field omitted).
    #[default]
    Keep,
    /// Clear the stored logo (empty field).
    Remove,
    /// Upload a new file.
    Replace {
        file_name: String,
        content_type: String,
        bytes: Vec<u8>,
    },
}

/// Multipart body for company create and partial update. Unset text fields
/// are left out of the form.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CompanyForm {
    pub name: Option<String>,
    pub manager_name: Option<String>,
    pub phone_number: Option<String>,
    pub description: Option<String>,
    pub logo: LogoUpload,
}

impl CompanyForm {
    /// Text fields in upstream naming, in submission order. `permissions`
    /// is always sent.
    pub fn text_fields(&self) -> Vec<(&'static str, String)> {
        let mut fields = Vec::new();
        let non_empty = |v: &Option<String>| {
            v.as_ref().filter(|s| !s.is_empty()).cloned()
        };
        if let Some(name) = non_empty(&self.name) {
            fields.push(("name", name));
        }
        if let Some(manager) = non_empty(&self.manager_name) {
            fields.push(("managerName", manager));
        }
        if let Some(phone) = non_empty(&self.phone_number) {
            fields.push(("phoneNumber", phone));
        }
        if let Some(description) = &self.description {
            fields.push(("description", description.clone()));
        }
        fields.push(("permissions", CRM_PERMISSION.to_string()));
        if self.logo == LogoUpload::Remove {
            fields.push(("logo", String::new()));
        }
        fields
    }
}

/// JSON body for creating an ROP or sales-manager account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewManagedUser {
    pub email: String,
    pub password: String,
    pub company_id: CompanyId,
    pub permissions: Vec<String>,
}

impl NewManagedUser {
    pub fn new(email: String, password: String, company_id: CompanyId) -> Self {
        Self {
            email,
            password,
            company_id,
            permissions: vec![CRM_PERMISSION.to_string()],
        }
    }
}

/// JSON body for editing an account. Only the email is editable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateManagedUser {
    pub email: String,
    pub permissions: Vec<String>,
}

impl UpdateManagedUser {
    pub fn new(email: String) -> Self {
        Self {
            email,
            permissions: vec![CRM_PERMISSION.to_string()],
        }
    }
}
