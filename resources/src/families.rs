//! The concrete resource families. They differ only in endpoints, envelope
//! keys and search strategy; the store logic is shared.

use std::rc::Rc;

use payloads::requests::{CompanyForm, LogoUpload, NewManagedUser, UpdateManagedUser};
use payloads::{
    APIClient, ClientError, CompanyId, CompanyRecord, ManagedUserRecord, ResourceKind,
    SalesManagerScope, UserFamily, UserId,
};

use crate::config::{COMPANY_SEARCH_DEBOUNCE, USER_SEARCH_DEBOUNCE};
use crate::store::{Record, ResourceApi, SearchStrategy, StatusToggle, Toggleable};

impl Record for CompanyRecord {
    type Id = CompanyId;

    fn id(&self) -> CompanyId {
        self.id
    }
}

impl Toggleable for CompanyRecord {
    fn toggle(&mut self) {
        self.status = !self.status;
    }
}

impl Record for ManagedUserRecord {
    type Id = UserId;

    fn id(&self) -> UserId {
        self.id
    }
}

/// Companies, searched server-side by name.
#[derive(Clone)]
pub struct Companies {
    client: Rc<APIClient>,
}

impl Companies {
    pub fn new(client: Rc<APIClient>) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &APIClient {
        &self.client
    }
}

impl ResourceApi for Companies {
    type Record = CompanyRecord;
    /// Server-side name filter.
    type Query = String;
    type Create = CompanyForm;
    type Update = CompanyForm;

    fn kind(&self) -> ResourceKind {
        ResourceKind::Company
    }

    fn search(&self) -> SearchStrategy {
        SearchStrategy::Remote(COMPANY_SEARCH_DEBOUNCE)
    }

    async fn list(&self, query: &String) -> Result<Vec<CompanyRecord>, ClientError> {
        self.client.list_companies(query).await
    }

    async fn create(
        &self,
        payload: &CompanyForm,
    ) -> Result<Option<CompanyRecord>, ClientError> {
        self.client.create_company(payload).await
    }

    async fn update(
        &self,
        id: CompanyId,
        payload: &CompanyForm,
    ) -> Result<Option<CompanyRecord>, ClientError> {
        self.client.update_company(id, payload).await
    }

    async fn delete(&self, id: CompanyId) -> Result<(), ClientError> {
        self.client.delete_company(id).await
    }

    fn merge(existing: &CompanyRecord, payload: &CompanyForm) -> CompanyRecord {
        let pick = |value: &Option<String>, fallback: &String| {
            value
                .as_ref()
                .filter(|v| !v.is_empty())
                .unwrap_or(fallback)
                .clone()
        };
        CompanyRecord {
            name: pick(&payload.name, &existing.name),
            manager_name: pick(&payload.manager_name, &existing.manager_name),
            phone_number: pick(&payload.phone_number, &existing.phone_number),
            description: payload
                .description
                .clone()
                .unwrap_or_else(|| existing.description.clone()),
            logo: match payload.logo {
                LogoUpload::Remove => None,
                LogoUpload::Keep | LogoUpload::Replace { .. } => existing.logo.clone(),
            },
            ..existing.clone()
        }
    }

    fn query_for_search(&self, term: &str, _current: &String) -> Option<String> {
        Some(term.trim().to_string())
    }

    fn label(payload: &CompanyForm) -> Option<String> {
        payload.name.clone()
    }
}

impl StatusToggle for Companies {
    async fn toggle_status(&self, id: CompanyId) -> Result<(), ClientError> {
        self.client.toggle_company_status(id).await
    }
}

/// ROP or sales-manager accounts, filtered in memory.
#[derive(Clone)]
pub struct ManagedUsers {
    client: Rc<APIClient>,
    family: UserFamily,
}

impl ManagedUsers {
    pub fn new(client: Rc<APIClient>, family: UserFamily) -> Self {
        Self { client, family }
    }

    pub fn family(&self) -> UserFamily {
        self.family
    }
}

impl ResourceApi for ManagedUsers {
    type Record = ManagedUserRecord;
    /// Only meaningful for sales managers; ROP listings ignore it.
    type Query = SalesManagerScope;
    type Create = NewManagedUser;
    type Update = UpdateManagedUser;

    fn kind(&self) -> ResourceKind {
        self.family.into()
    }

    fn search(&self) -> SearchStrategy {
        SearchStrategy::Local(USER_SEARCH_DEBOUNCE)
    }

    async fn list(
        &self,
        query: &SalesManagerScope,
    ) -> Result<Vec<ManagedUserRecord>, ClientError> {
        self.client.list_users(self.family, *query).await
    }

    async fn create(
        &self,
        payload: &NewManagedUser,
    ) -> Result<Option<ManagedUserRecord>, ClientError> {
        self.client.create_user(self.family, payload).await
    }

    async fn update(
        &self,
        id: UserId,
        payload: &UpdateManagedUser,
    ) -> Result<Option<ManagedUserRecord>, ClientError> {
        self.client.update_user(self.family, id, payload).await
    }

    async fn delete(&self, id: UserId) -> Result<(), ClientError> {
        self.client.delete_user(self.family, id).await
    }

    fn merge(
        existing: &ManagedUserRecord,
        payload: &UpdateManagedUser,
    ) -> ManagedUserRecord {
        ManagedUserRecord {
            email: payload.email.clone(),
            ..existing.clone()
        }
    }

    fn label(payload: &NewManagedUser) -> Option<String> {
        Some(payload.email.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn company() -> CompanyRecord {
        CompanyRecord {
            id: CompanyId(1),
            name: "Acme".into(),
            manager_name: "Ali".into(),
            phone_number: "+998901234567".into(),
            description: "Old".into(),
            logo: Some("uploads/acme.png".into()),
            status: true,
            created_at: None,
        }
    }

    #[test]
    fn company_merge_keeps_unset_fields() {
        let form = CompanyForm {
            name: Some("Acme Group".into()),
            phone_number: Some(String::new()),
            ..Default::default()
        };
        let merged = Companies::merge(&company(), &form);
        assert_eq!(merged.name, "Acme Group");
        assert_eq!(merged.phone_number, "+998901234567");
        assert_eq!(merged.description, "Old");
        assert_eq!(merged.logo.as_deref(), Some("uploads/acme.png"));
    }

    #[test]
    fn company_merge_can_clear_the_logo() {
        let form = CompanyForm {
            logo: LogoUpload::Remove,
            ..Default::default()
        };
        assert_eq!(Companies::merge(&company(), &form).logo, None);
    }

    #[test]
    fn toggling_a_company_flips_status() {
        let mut record = company();
        record.toggle();
        assert!(!record.status);
    }

    #[test]
    fn families_pick_their_search_strategy() {
        let client = Rc::new(APIClient::new("http://localhost"));
        let companies = Companies::new(client.clone());
        let rops = ManagedUsers::new(client, UserFamily::Rop);

        assert_eq!(
            companies.search(),
            SearchStrategy::Remote(COMPANY_SEARCH_DEBOUNCE)
        );
        assert_eq!(rops.search(), SearchStrategy::Local(USER_SEARCH_DEBOUNCE));
        assert_eq!(rops.kind(), ResourceKind::Rop);
        assert_eq!(
            companies.query_for_search(" acme ", &String::new()),
            Some("acme".to_string())
        );
        assert_eq!(rops.query_for_search("acme", &SalesManagerScope::Own), None);
    }

    #[test]
    fn user_merge_replaces_the_email() {
        let existing = ManagedUserRecord {
            id: UserId(4),
            email: "old@acme.uz".into(),
            company_id: Some(CompanyId(1)),
            permissions: vec!["CRM".into()],
        };
        let merged =
            ManagedUsers::merge(&existing, &UpdateManagedUser::new("new@acme.uz".into()));
        assert_eq!(merged.email, "new@acme.uz");
        assert_eq!(merged.company_id, Some(CompanyId(1)));
    }
}
