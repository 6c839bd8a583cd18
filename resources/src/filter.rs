use std::collections::HashMap;

use payloads::{CompanyId, CompanyRecord, ManagedUserRecord};

/// A record the user pages can search: by its own text, or by the name of
/// the company it belongs to.
pub trait Searchable {
    fn search_text(&self) -> &str;

    fn company_id(&self) -> Option<CompanyId>;
}

impl Searchable for ManagedUserRecord {
    fn search_text(&self) -> &str {
        &self.email
    }

    fn company_id(&self) -> Option<CompanyId> {
        self.company_id
    }
}

/// Records whose text or company name contains `term`, case-insensitively.
/// An empty term matches everything; a record without a company can only
/// match on its own text.
pub fn filter_view<'a, T: Searchable>(
    items: &'a [T],
    companies: &[CompanyRecord],
    term: &str,
) -> Vec<&'a T> {
    let needle = term.trim().to_lowercase();
    if needle.is_empty() {
        return items.iter().collect();
    }

    let names: HashMap<CompanyId, String> = companies
        .iter()
        .map(|company| (company.id, company.name.to_lowercase()))
        .collect();

    items
        .iter()
        .filter(|item| {
            item.search_text().to_lowercase().contains(&needle)
                || item
                    .company_id()
                    .and_then(|id| names.get(&id))
                    .is_some_and(|name| name.contains(&needle))
        })
        .collect()
}

/// Display name of the company with this id.
pub fn company_name(companies: &[CompanyRecord], id: Option<CompanyId>) -> Option<&str> {
    let id = id?;
    companies
        .iter()
        .find(|company| company.id == id)
        .map(|company| company.name.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;
    use payloads::UserId;

    fn user(id: i64, email: &str, company: Option<i64>) -> ManagedUserRecord {
        ManagedUserRecord {
            id: UserId(id),
            email: email.into(),
            company_id: company.map(CompanyId),
            permissions: vec!["CRM".into()],
        }
    }

    fn company(id: i64, name: &str) -> CompanyRecord {
        CompanyRecord {
            id: CompanyId(id),
            name: name.into(),
            manager_name: String::new(),
            phone_number: String::new(),
            description: String::new(),
            logo: None,
            status: true,
            created_at: None,
        }
    }

    fn emails(view: Vec<&ManagedUserRecord>) -> Vec<&str> {
        view.into_iter().map(|u| u.email.as_str()).collect()
    }

    #[test]
    fn matches_email_or_company_name() {
        let users = [user(1, "a@x.com", Some(1)), user(2, "b@y.com", Some(2))];
        let companies = [company(1, "Acme"), company(2, "Globex")];

        assert_eq!(emails(filter_view(&users, &companies, "acme")), ["a@x.com"]);
        assert_eq!(emails(filter_view(&users, &companies, "y.com")), ["b@y.com"]);
        assert_eq!(
            emails(filter_view(&users, &companies, "")),
            ["a@x.com", "b@y.com"]
        );
    }

    #[test]
    fn matching_ignores_case() {
        let users = [user(1, "Ops@Acme.uz", Some(1))];
        let companies = [company(1, "ACME")];
        assert_eq!(filter_view(&users, &companies, "OPS").len(), 1);
        assert_eq!(filter_view(&users, &companies, "acMe").len(), 1);
    }

    #[test]
    fn unset_or_unknown_company_never_matches_by_name() {
        let users = [user(1, "a@x.com", None), user(2, "b@x.com", Some(9))];
        let companies = [company(1, "Acme")];
        assert!(filter_view(&users, &companies, "acme").is_empty());
    }

    #[test]
    fn looks_up_company_names() {
        let companies = [company(1, "Acme")];
        assert_eq!(company_name(&companies, Some(CompanyId(1))), Some("Acme"));
        assert_eq!(company_name(&companies, Some(CompanyId(2))), None);
        assert_eq!(company_name(&companies, None), None);
    }
}
