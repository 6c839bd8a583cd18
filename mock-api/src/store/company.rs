use payloads::{CompanyId, CompanyRecord, Role};

use super::{Actor, CrmStore, StoreError, into_result};

/// An uploaded logo, served back from `/uploads/{name}`.
#[derive(Debug, Clone)]
pub struct LogoFile {
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// Fields parsed from a company multipart form. `None` leaves a field alone.
#[derive(Debug, Clone, Default)]
pub struct CompanyFields {
    pub name: Option<String>,
    pub manager_name: Option<String>,
    pub phone_number: Option<String>,
    pub description: Option<String>,
    /// `Some(None)` clears the logo.
    pub logo: Option<Option<(String, LogoFile)>>,
}

pub const LOGO_LIMIT: usize = 2 * 1024 * 1024;

impl CrmStore {
    pub fn insert_company(
        &self,
        name: &str,
        manager_name: &str,
        phone_number: &str,
        status: bool,
    ) -> CompanyId {
        let mut inner = self.lock();
        inner.next_company += 1;
        let id = CompanyId(inner.next_company);
        inner.companies.insert(
            0,
            CompanyRecord {
                id,
                name: name.to_string(),
                manager_name: manager_name.to_string(),
                phone_number: phone_number.to_string(),
                description: String::new(),
                logo: None,
                status,
                created_at: Some(jiff::Timestamp::now()),
            },
        );
        id
    }

    pub fn list_companies(
        &self,
        actor: &Actor,
        name: Option<&str>,
        page: usize,
        limit: usize,
    ) -> Result<(Vec<CompanyRecord>, usize), StoreError> {
        actor.require(&[Role::SuperAdmin])?;
        let needle = name.map(str::to_lowercase).unwrap_or_default();
        let inner = self.lock();
        let matching: Vec<_> = inner
            .companies
            .iter()
            .filter(|company| company.name.to_lowercase().contains(&needle))
            .cloned()
            .collect();
        let total = matching.len();
        let page = matching
            .into_iter()
            .skip(page.saturating_sub(1) * limit)
            .take(limit)
            .collect();
        Ok((page, total))
    }

    pub fn get_company(
        &self,
        actor: &Actor,
        id: CompanyId,
    ) -> Result<CompanyRecord, StoreError> {
        actor.require(&[Role::SuperAdmin])?;
        self.lock()
            .company(id)
            .cloned()
            .ok_or(StoreError::CompanyNotFound)
    }

    pub fn create_company(
        &self,
        actor: &Actor,
        fields: CompanyFields,
    ) -> Result<CompanyRecord, StoreError> {
        actor.require(&[Role::SuperAdmin])?;
        let mut problems = Vec::new();
        for (value, field) in [
            (&fields.name, "name"),
            (&fields.manager_name, "managerName"),
            (&fields.phone_number, "phoneNumber"),
        ] {
            if value.as_deref().is_none_or(|v| v.trim().is_empty()) {
                problems.push(format!("{field} should not be empty"));
            }
        }
        check_logo(&fields, &mut problems);
        into_result(problems)?;

        let name = fields.name.clone().unwrap_or_default();
        if self.name_taken(&name, None) {
            return Err(StoreError::CompanyNameTaken);
        }
        let id = self.insert_company(
            &name,
            fields.manager_name.as_deref().unwrap_or_default(),
            fields.phone_number.as_deref().unwrap_or_default(),
            true,
        );
        let fields = CompanyFields {
            name: None,
            manager_name: None,
            phone_number: None,
            ..fields
        };
        let record = self.apply(id, fields)?;
        tracing::info!(%id, "company created");
        Ok(record)
    }

    pub fn update_company(
        &self,
        actor: &Actor,
        id: CompanyId,
        fields: CompanyFields,
    ) -> Result<CompanyRecord, StoreError> {
        actor.require(&[Role::SuperAdmin])?;
        if self.lock().company(id).is_none() {
            return Err(StoreError::CompanyNotFound);
        }
        let mut problems = Vec::new();
        check_logo(&fields, &mut problems);
        into_result(problems)?;
        if let Some(name) = &fields.name
            && self.name_taken(name, Some(id))
        {
            return Err(StoreError::CompanyNameTaken);
        }
        self.apply(id, fields)
    }

    pub fn delete_company(&self, actor: &Actor, id: CompanyId) -> Result<(), StoreError> {
        actor.require(&[Role::SuperAdmin])?;
        let mut inner = self.lock();
        if inner.company(id).is_none() {
            return Err(StoreError::CompanyNotFound);
        }
        if inner
            .accounts
            .iter()
            .any(|account| account.company_id == Some(id))
        {
            return Err(StoreError::HasDependents);
        }
        inner.companies.retain(|company| company.id != id);
        Ok(())
    }

    /// Flip the active flag, returning the new value.
    pub fn toggle_company(&self, actor: &Actor, id: CompanyId) -> Result<bool, StoreError> {
        actor.require(&[Role::SuperAdmin])?;
        let mut inner = self.lock();
        let company = inner
            .companies
            .iter_mut()
            .find(|company| company.id == id)
            .ok_or(StoreError::CompanyNotFound)?;
        company.status = !company.status;
        Ok(company.status)
    }

    fn name_taken(&self, name: &str, except: Option<CompanyId>) -> bool {
        self.lock().companies.iter().any(|company| {
            Some(company.id) != except && company.name.eq_ignore_ascii_case(name.trim())
        })
    }

    fn apply(&self, id: CompanyId, fields: CompanyFields) -> Result<CompanyRecord, StoreError> {
        let mut inner = self.lock();
        let mut upload = None;
        let company = inner
            .companies
            .iter_mut()
            .find(|company| company.id == id)
            .ok_or(StoreError::CompanyNotFound)?;
        let non_empty = |value: Option<String>| value.filter(|v| !v.trim().is_empty());
        if let Some(name) = non_empty(fields.name) {
            company.name = name.trim().to_string();
        }
        if let Some(manager) = non_empty(fields.manager_name) {
            company.manager_name = manager.trim().to_string();
        }
        if let Some(phone) = non_empty(fields.phone_number) {
            company.phone_number = phone.trim().to_string();
        }
        if let Some(description) = fields.description {
            company.description = description;
        }
        match fields.logo {
            Some(Some((file_name, file))) => {
                let stored = format!("{}-{}", uuid::Uuid::new_v4(), file_name);
                company.logo = Some(format!("uploads/{stored}"));
                upload = Some((stored, file));
            }
            Some(None) => company.logo = None,
            None => {}
        }
        let record = company.clone();
        if let Some((name, file)) = upload {
            inner.logos.insert(name, file);
        }
        Ok(record)
    }
}

fn check_logo(fields: &CompanyFields, problems: &mut Vec<String>) {
    if let Some(Some((_, file))) = &fields.logo
        && file.bytes.len() > LOGO_LIMIT
    {
        problems.push("File too large".to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use payloads::UserId;

    fn admin() -> Actor {
        Actor {
            id: UserId(1),
            email: "admin@procrm.uz".into(),
            role: Role::SuperAdmin,
            company_id: None,
        }
    }

    fn fields(name: &str) -> CompanyFields {
        CompanyFields {
            name: Some(name.into()),
            manager_name: Some("Ali".into()),
            phone_number: Some("+998901112233".into()),
            description: Some("Ma'lumot mavjud emas".into()),
            logo: None,
        }
    }

    #[test]
    fn listing_filters_by_name_and_keeps_newest_first() {
        let store = CrmStore::new();
        store.create_company(&admin(), fields("Acme")).unwrap();
        store.create_company(&admin(), fields("Globex")).unwrap();
        store.create_company(&admin(), fields("Acme Logistics")).unwrap();

        let (all, total) = store.list_companies(&admin(), None, 1, 1000).unwrap();
        assert_eq!(total, 3);
        assert_eq!(all[0].name, "Acme Logistics");

        let (acme, _) = store.list_companies(&admin(), Some("ACME"), 1, 1000).unwrap();
        assert_eq!(acme.len(), 2);
    }

    #[test]
    fn missing_fields_are_reported_together() {
        let store = CrmStore::new();
        let result = store.create_company(
            &admin(),
            CompanyFields {
                name: Some("Acme".into()),
                ..Default::default()
            },
        );
        match result {
            Err(StoreError::Validation(problems)) => assert_eq!(problems.len(), 2),
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn a_company_with_accounts_cannot_be_deleted() {
        let store = CrmStore::new();
        let company = store.create_company(&admin(), fields("Acme")).unwrap();
        store.insert_account("rop@acme.uz", "secret1", Role::Rop, Some(company.id));
        let result = store.delete_company(&admin(), company.id);
        assert!(matches!(result, Err(StoreError::HasDependents)));
    }

    #[test]
    fn logos_can_be_replaced_and_cleared() {
        let store = CrmStore::new();
        let company = store.create_company(&admin(), fields("Acme")).unwrap();
        let file = LogoFile {
            content_type: "image/png".into(),
            bytes: vec![1, 2, 3],
        };
        let updated = store
            .update_company(
                &admin(),
                company.id,
                CompanyFields {
                    logo: Some(Some(("logo.png".into(), file))),
                    ..Default::default()
                },
            )
            .unwrap();
        let path = updated.logo.clone().unwrap();
        let stored = path.trim_start_matches("uploads/");
        assert_eq!(store.logo(stored).map(|f| f.bytes), Some(vec![1, 2, 3]));

        let cleared = store
            .update_company(
                &admin(),
                company.id,
                CompanyFields {
                    logo: Some(None),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(cleared.logo, None);
        assert_eq!(cleared.name, "Acme");
    }
}
