//! User-facing notices. The console is localized in Uzbek; only the generic
//! fallback carries the status code.

use payloads::{ClientError, Operation, ResourceKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Info,
    Warning,
    Error,
}

/// A transient notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            message: message.into(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            message: message.into(),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Warning,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }
}

/// Sink for notices; the ui implements it with toasts.
pub trait Notifier {
    fn notify(&self, notice: Notice);
}

pub const SIGN_IN_REQUIRED: &str = "Tizimga kiring";
pub const SESSION_EXPIRED: &str = "Sessiya tugadi. Qaytadan kiring";
pub const LOAD_FAILED: &str =
    "⚠️ Ma'lumotlarni yuklashda xatolik! Iltimos, sahifani yangilang 🔄";
pub const LOAD_UNREACHABLE: &str = "⚠️ Server bilan aloqa yo'q. Internetni tekshiring, muammo davom etsa adminga murojaat qiling.";
pub const UNREACHABLE: &str =
    "⚠️ Server bilan aloqa yo'q. Internetni tekshiring!";
pub const DETAILS_FAILED: &str = "Ma'lumotlarni olishda xatolik";
pub const ONLINE_AGAIN: &str = "Internet aloqasi tiklandi!";
pub const WENT_OFFLINE: &str = "Internet aloqasi uzildi!";

fn with_detail(prefix: &str, status: impl std::fmt::Display, detail: &str) -> String {
    format!("{prefix} (Kod: {status}). {detail}").trim_end().to_string()
}

/// Message for a list/get failure, also used as the page-level error.
pub fn load_error(error: &ClientError) -> String {
    match error {
        ClientError::NoCredential => SIGN_IN_REQUIRED.into(),
        ClientError::AuthExpired => SESSION_EXPIRED.into(),
        ClientError::Network(_) => LOAD_UNREACHABLE.into(),
        ClientError::NotFound => "Ma'lumot topilmadi!".into(),
        ClientError::Forbidden => {
            "Sizda ushbu ma'lumotlarni ko'rish huquqi yo'q!".into()
        }
        _ => LOAD_FAILED.into(),
    }
}

/// Success message after a write. `label` names the record (an email for
/// accounts) when the wording needs it.
pub fn write_success(
    kind: ResourceKind,
    operation: Operation,
    label: Option<&str>,
) -> Notice {
    let message = match (kind, operation) {
        (ResourceKind::Company, Operation::Create) => {
            "Kompaniya muvaffaqiyatli qo'shildi!".to_string()
        }
        (ResourceKind::Company, Operation::Update) => {
            "Ma'lumot yangilandi!".to_string()
        }
        (ResourceKind::Company, Operation::Delete) => {
            "Kompaniya o'chirildi!".to_string()
        }
        (_, Operation::ToggleStatus) => "Status o'zgartirildi!".to_string(),
        (_, Operation::Create) => match label {
            Some(email) => format!("{email} muvaffaqiyatli qo'shildi!"),
            None => "Foydalanuvchi muvaffaqiyatli qo'shildi!".to_string(),
        },
        (_, Operation::Update) => {
            "Ma'lumotlar muvaffaqiyatli yangilandi!".to_string()
        }
        (_, Operation::Delete) => {
            "Foydalanuvchi muvaffaqiyatli o'chirildi!".to_string()
        }
        _ => "Bajarildi!".to_string(),
    };
    Notice::success(message)
}

/// Error message after a failed write.
pub fn write_error(
    kind: ResourceKind,
    operation: Operation,
    error: &ClientError,
) -> Notice {
    let company = kind == ResourceKind::Company;
    let message = match (operation, error) {
        (_, ClientError::NoCredential) => SIGN_IN_REQUIRED.to_string(),
        (_, ClientError::AuthExpired) => SESSION_EXPIRED.to_string(),
        (_, ClientError::Network(_)) => UNREACHABLE.to_string(),

        (Operation::Create, ClientError::DuplicateEmail) if company => {
            "Bunday kompaniya allaqachon mavjud!".to_string()
        }
        (Operation::Create, ClientError::DuplicateEmail) => {
            "Ushbu email manzili allaqachon ro'yxatdan o'tgan! Boshqa email ishlating.".to_string()
        }
        (_, ClientError::DuplicateEmail) => {
            "Bu email band qilingan! Boshqa email kiriting.".to_string()
        }
        (_, ClientError::InvalidPayload(detail)) => {
            let detail = if detail.is_empty() {
                "Tekshirib qaytadan urinib ko'ring."
            } else {
                detail.as_str()
            };
            format!("Ma'lumotlar noto'g'ri kiritildi: {detail}")
        }

        (Operation::Create, ClientError::Forbidden) if company => {
            "Sizda kompaniya qo'shish huquqi yo'q!".to_string()
        }
        (Operation::Create, ClientError::Forbidden) => {
            "Sizda foydalanuvchi qo'shish huquqi yo'q!".to_string()
        }
        (Operation::Delete, ClientError::Forbidden) if company => {
            "Sizda ushbu kompaniyani o'chirish huquqi mavjud emas!".to_string()
        }
        (Operation::Delete, ClientError::Forbidden) => {
            "Sizda ushbu foydalanuvchini o'chirish huquqi mavjud emas!".to_string()
        }
        (_, ClientError::Forbidden) => "Sizda tahrirlash huquqi yo'q!".to_string(),

        (Operation::Delete, ClientError::NotFound) if company => {
            "Kompaniya tizimda topilmadi (404).".to_string()
        }
        (Operation::Delete, ClientError::NotFound) => {
            "Foydalanuvchi tizimda topilmadi (404).".to_string()
        }
        (_, ClientError::NotFound) if company => "Kompaniya topilmadi!".to_string(),
        (_, ClientError::NotFound) => "Foydalanuvchi topilmadi!".to_string(),

        (_, ClientError::HasDependentRecords) if company => {
            "O'chirib bo'lmadi! Ushbu kompaniyaga foydalanuvchilar yoki mijozlar biriktirilgan bo'lishi mumkin. Avval ularni boshqa kompaniyaga o'tkazing.".to_string()
        }
        (_, ClientError::HasDependentRecords) => {
            "O'chirib bo'lmadi! Ushbu foydalanuvchiga mijozlar yoki savdolar biriktirilgan bo'lishi mumkin. Avval ularni boshqa xodimga o'tkazing.".to_string()
        }

        (operation, ClientError::UnknownFailure(status, detail)) => {
            let prefix = match operation {
                Operation::Update => "Tahrirlashda xatolik!",
                Operation::Delete => "O'chirishda kutilmagan xatolik!",
                _ => "Xatolik yuz berdi!",
            };
            with_detail(prefix, status.as_u16(), detail)
        }
        _ => "Xatolik yuz berdi!".to_string(),
    };
    Notice::error(message)
}

pub fn login_success() -> Notice {
    Notice::success("Tizimga muvaffaqiyatli kirdingiz! Xush kelibsiz.")
}

pub fn login_error(error: &ClientError) -> Notice {
    let message = match error {
        ClientError::AccountInactive => {
            "Sizning hisobingiz nofaol holatda! Tizimga kirish uchun Adminga murojaat qiling."
        }
        ClientError::InvalidCredentials => {
            "Kirishda xatolik yuz berdi! Kiritilgan email yoki parol noto'g'ri."
        }
        ClientError::Network(_) => {
            "Server bilan aloqa yo'q! Internet aloqasini tekshiring."
        }
        _ => "Tizimda xatolik! Iltimos, birozdan so'ng qayta urinib ko'ring.",
    };
    Notice::error(message)
}

pub fn password_success() -> Notice {
    Notice::success("Parolingiz muvaffaqiyatli yangilandi!")
}

pub fn password_error(error: &ClientError) -> Notice {
    match error {
        ClientError::InvalidPayload(_) => Notice::warning("Parol juda qisqa!"),
        ClientError::WrongCurrentPassword => {
            Notice::error("Amaldagi parolingiz noto'g'ri!")
        }
        ClientError::AuthExpired => Notice::error(SESSION_EXPIRED),
        ClientError::Network(_) => Notice::error("Server bilan aloqa yo'q!"),
        _ => Notice::error("Xatolik yuz berdi!"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use payloads::StatusCode;

    fn status(code: u16) -> StatusCode {
        StatusCode::from_u16(code).unwrap()
    }

    #[test]
    fn status_code_only_in_generic_fallback() {
        let generic = write_error(
            ResourceKind::Rop,
            Operation::Create,
            &ClientError::UnknownFailure(status(502), "upstream down".into()),
        );
        assert_eq!(
            generic.message,
            "Xatolik yuz berdi! (Kod: 502). upstream down"
        );

        let duplicate = write_error(
            ResourceKind::Rop,
            Operation::Create,
            &ClientError::DuplicateEmail,
        );
        assert!(!duplicate.message.contains("Kod"));
        assert_eq!(duplicate.level, NoticeLevel::Error);
    }

    #[test]
    fn dependent_records_guidance_names_the_family() {
        let user = write_error(
            ResourceKind::SalesManager,
            Operation::Delete,
            &ClientError::HasDependentRecords,
        );
        assert!(user.message.contains("boshqa xodimga"));

        let company = write_error(
            ResourceKind::Company,
            Operation::Delete,
            &ClientError::HasDependentRecords,
        );
        assert!(company.message.contains("boshqa kompaniyaga"));
    }

    #[test]
    fn invalid_payload_passes_server_message_through() {
        let notice = write_error(
            ResourceKind::Rop,
            Operation::Create,
            &ClientError::InvalidPayload("email must be an email".into()),
        );
        assert_eq!(
            notice.message,
            "Ma'lumotlar noto'g'ri kiritildi: email must be an email"
        );
    }

    #[test]
    fn create_success_names_the_account() {
        let notice = write_success(
            ResourceKind::Rop,
            Operation::Create,
            Some("rop@acme.uz"),
        );
        assert_eq!(notice.message, "rop@acme.uz muvaffaqiyatli qo'shildi!");
    }

    #[test]
    fn empty_detail_leaves_no_trailing_space() {
        let notice = write_error(
            ResourceKind::Company,
            Operation::Update,
            &ClientError::UnknownFailure(status(418), String::new()),
        );
        assert_eq!(notice.message, "Tahrirlashda xatolik! (Kod: 418).");
    }
}
