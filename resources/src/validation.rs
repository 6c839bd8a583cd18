//! Form checks run before anything is sent. Each failure message is shown
//! as a warning notice.

use payloads::requests::{
    CompanyForm, LoginCredentials, LogoUpload, NewManagedUser, UpdateManagedUser,
};
use payloads::{CompanyId, Role};

use crate::config::{DEFAULT_DESCRIPTION, LOGO_MAX_BYTES, MIN_PASSWORD_LEN};
use crate::messages::Notice;
use crate::session::Session;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormError {
    #[error("Email kiritilmadi!")]
    MissingLoginEmail,
    #[error("Parol kiritilmadi!")]
    MissingLoginPassword,
    #[error("Iltimos, email manzilini kiriting!")]
    MissingEmail,
    #[error("Parol juda qisqa! Kamida 6 ta belgidan iborat bo'lishi kerak.")]
    PasswordTooShort,
    #[error("Parollar mos kelmadi! Iltimos, qayta tekshiring.")]
    PasswordMismatch,
    #[error("Kompaniya aniqlanmadi!")]
    CompanyUnresolved,
    #[error("Majburiy maydonlarni to'ldiring!")]
    MissingRequiredFields,
    #[error("Rasm hajmi 2MB dan oshmasligi kerak!")]
    LogoTooLarge,
    #[error("Eski parolni kiriting!")]
    MissingOldPassword,
    #[error("Yangi parolni kiriting!")]
    MissingNewPassword,
    #[error("Yangi parol kamida 6 ta belgidan iborat bo'lsin!")]
    NewPasswordTooShort,
}

impl FormError {
    pub fn notice(&self) -> Notice {
        match self {
            FormError::MissingLoginEmail
            | FormError::MissingLoginPassword
            | FormError::MissingOldPassword
            | FormError::MissingNewPassword => Notice::info(self.to_string()),
            FormError::LogoTooLarge => Notice::error(self.to_string()),
            _ => Notice::warning(self.to_string()),
        }
    }
}

fn blank(value: &str) -> bool {
    value.trim().is_empty()
}

pub fn login(email: &str, password: &str) -> Result<LoginCredentials, FormError> {
    if blank(email) {
        return Err(FormError::MissingLoginEmail);
    }
    if password.is_empty() {
        return Err(FormError::MissingLoginPassword);
    }
    Ok(LoginCredentials {
        email: email.trim().to_string(),
        password: password.to_string(),
    })
}

/// Raw contents of the account form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserInput {
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    /// Only offered to a super-administrator.
    pub company_id: Option<CompanyId>,
}

/// The company a new account is attached to: the picked one for a
/// super-administrator, otherwise the caller's own.
pub fn target_company(session: &Session, picked: Option<CompanyId>) -> Option<CompanyId> {
    match session.role() {
        Some(Role::SuperAdmin) => picked,
        _ => session.company_id(),
    }
}

pub fn new_user(input: &UserInput, session: &Session) -> Result<NewManagedUser, FormError> {
    if blank(&input.email) {
        return Err(FormError::MissingEmail);
    }
    if input.password.chars().count() < MIN_PASSWORD_LEN {
        return Err(FormError::PasswordTooShort);
    }
    if input.password != input.confirm_password {
        return Err(FormError::PasswordMismatch);
    }
    let company_id =
        target_company(session, input.company_id).ok_or(FormError::CompanyUnresolved)?;
    Ok(NewManagedUser::new(
        input.email.trim().to_string(),
        input.password.clone(),
        company_id,
    ))
}

pub fn edited_user(input: &UserInput) -> Result<UpdateManagedUser, FormError> {
    if blank(&input.email) {
        return Err(FormError::MissingEmail);
    }
    Ok(UpdateManagedUser::new(input.email.trim().to_string()))
}

/// Raw contents of the company form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompanyInput {
    pub name: String,
    pub manager_name: String,
    pub phone_number: String,
    pub description: String,
    pub logo: LogoUpload,
}

fn check_company(input: &CompanyInput) -> Result<(), FormError> {
    if blank(&input.name) || blank(&input.manager_name) || blank(&input.phone_number) {
        return Err(FormError::MissingRequiredFields);
    }
    if let LogoUpload::Replace { bytes, .. } = &input.logo
        && bytes.len() > LOGO_MAX_BYTES
    {
        return Err(FormError::LogoTooLarge);
    }
    Ok(())
}

/// Form for a new company. A blank description gets the placeholder text.
pub fn new_company(input: CompanyInput) -> Result<CompanyForm, FormError> {
    check_company(&input)?;
    let description = if blank(&input.description) {
        DEFAULT_DESCRIPTION.to_string()
    } else {
        input.description.trim().to_string()
    };
    Ok(CompanyForm {
        name: Some(input.name.trim().to_string()),
        manager_name: Some(input.manager_name.trim().to_string()),
        phone_number: Some(input.phone_number.trim().to_string()),
        description: Some(description),
        logo: input.logo,
    })
}

/// Form for editing a company. The description is sent as typed.
pub fn edited_company(input: CompanyInput) -> Result<CompanyForm, FormError> {
    check_company(&input)?;
    Ok(CompanyForm {
        name: Some(input.name.trim().to_string()),
        manager_name: Some(input.manager_name.trim().to_string()),
        phone_number: Some(input.phone_number.trim().to_string()),
        description: Some(input.description.trim().to_string()),
        logo: input.logo,
    })
}

/// Settings form: old and new password, new one long enough.
pub fn password_change(old: &str, new: &str) -> Result<(), FormError> {
    if old.is_empty() {
        return Err(FormError::MissingOldPassword);
    }
    if new.is_empty() {
        return Err(FormError::MissingNewPassword);
    }
    if new.chars().count() < MIN_PASSWORD_LEN {
        return Err(FormError::NewPasswordTooShort);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::messages::NoticeLevel;
    use payloads::{UserId, UserRecord};

    fn session(role: Role, company: Option<i64>) -> Session {
        Session {
            user: Some(UserRecord {
                id: UserId(1),
                email: "me@acme.uz".into(),
                role,
                company_id: company.map(CompanyId),
                access_token: None,
            }),
        }
    }

    fn input(company: Option<i64>) -> UserInput {
        UserInput {
            email: " new@acme.uz ".into(),
            password: "secret1".into(),
            confirm_password: "secret1".into(),
            company_id: company.map(CompanyId),
        }
    }

    #[test]
    fn login_needs_both_fields() {
        assert_eq!(login(" ", "x"), Err(FormError::MissingLoginEmail));
        assert_eq!(login("a@b.uz", ""), Err(FormError::MissingLoginPassword));
        assert_eq!(login(" a@b.uz ", "x").unwrap().email, "a@b.uz");
    }

    #[test]
    fn super_admin_picks_the_company() {
        let admin = session(Role::SuperAdmin, None);
        let user = new_user(&input(Some(5)), &admin).unwrap();
        assert_eq!(user.company_id, CompanyId(5));
        assert_eq!(user.email, "new@acme.uz");
        assert_eq!(user.permissions, vec!["CRM".to_string()]);

        assert_eq!(
            new_user(&input(None), &admin),
            Err(FormError::CompanyUnresolved)
        );
    }

    #[test]
    fn other_roles_use_their_own_company() {
        let rop = session(Role::Rop, Some(3));
        assert_eq!(new_user(&input(Some(5)), &rop).unwrap().company_id, CompanyId(3));

        let orphan = session(Role::Rop, None);
        assert_eq!(
            new_user(&input(None), &orphan),
            Err(FormError::CompanyUnresolved)
        );
    }

    #[test]
    fn new_user_password_rules() {
        let admin = session(Role::SuperAdmin, None);
        let mut short = input(Some(1));
        short.password = "12345".into();
        short.confirm_password = "12345".into();
        assert_eq!(new_user(&short, &admin), Err(FormError::PasswordTooShort));

        let mut mismatch = input(Some(1));
        mismatch.confirm_password = "secret2".into();
        assert_eq!(new_user(&mismatch, &admin), Err(FormError::PasswordMismatch));
    }

    #[test]
    fn edits_only_need_an_email() {
        let edit = UserInput {
            email: "x@acme.uz".into(),
            ..Default::default()
        };
        assert_eq!(edited_user(&edit).unwrap().email, "x@acme.uz");
        assert_eq!(
            edited_user(&UserInput::default()),
            Err(FormError::MissingEmail)
        );
    }

    fn company_input() -> CompanyInput {
        CompanyInput {
            name: "Acme".into(),
            manager_name: "Ali".into(),
            phone_number: "+998901234567".into(),
            ..Default::default()
        }
    }

    #[test]
    fn company_description_defaults() {
        let form = new_company(company_input()).unwrap();
        assert_eq!(form.description.as_deref(), Some(DEFAULT_DESCRIPTION));
    }

    #[test]
    fn company_required_fields_and_logo_size() {
        let mut missing = company_input();
        missing.phone_number = "  ".into();
        assert_eq!(new_company(missing), Err(FormError::MissingRequiredFields));

        let mut large = company_input();
        large.logo = LogoUpload::Replace {
            file_name: "logo.png".into(),
            content_type: "image/png".into(),
            bytes: vec![0; LOGO_MAX_BYTES + 1],
        };
        assert_eq!(edited_company(large), Err(FormError::LogoTooLarge));
    }

    #[test]
    fn password_change_rules() {
        assert_eq!(password_change("", "secret1"), Err(FormError::MissingOldPassword));
        assert_eq!(password_change("old", ""), Err(FormError::MissingNewPassword));
        assert_eq!(password_change("old", "12345"), Err(FormError::NewPasswordTooShort));
        assert_eq!(password_change("old", "123456"), Ok(()));
        assert_eq!(
            FormError::NewPasswordTooShort.notice().level,
            NoticeLevel::Warning
        );
    }
}
