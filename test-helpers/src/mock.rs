//! Development dataset for the dev-server.
//!
//! Built through the public API on top of the seeded fixtures, so that what
//! the UI sees went through the same routes it will use.

use anyhow::Result;
use payloads::requests::{CompanyForm, LogoUpload, NewManagedUser};
use payloads::{CompanyRecord, ManagedUserRecord, UserFamily};

use crate::{ADMIN_EMAIL, BUSY_SALES_MANAGER_EMAIL, INACTIVE_ROP_EMAIL, PASSWORD, ROP_EMAIL, TestApp};

const COMPANIES: [(&str, &str, &str, &str); 4] = [
    (
        "Samarqand Savdo",
        "Jasur Toshmatov",
        "+998912223344",
        "Ulgurji oziq-ovqat savdosi",
    ),
    (
        "Buxoro Tekstil",
        "Malika Yusupova",
        "+998933334455",
        "",
    ),
    (
        "Farg'ona Mebel",
        "Sardor Qodirov",
        "+998944445566",
        "Ofis va uy mebellari",
    ),
    (
        "Toshkent Logistika",
        "Nigora Ismoilova",
        "+998955556677",
        "Yuk tashish xizmatlari",
    ),
];

pub struct DevDataset {
    pub companies: Vec<CompanyRecord>,
    pub rops: Vec<ManagedUserRecord>,
    pub sales_managers: Vec<ManagedUserRecord>,
}

impl DevDataset {
    pub async fn create(app: &TestApp) -> Result<Self> {
        let admin = app.login_admin().await?;

        tracing::info!("🏢 Creating companies");
        let mut companies = Vec::new();
        for (name, manager, phone, description) in COMPANIES {
            let form = CompanyForm {
                name: Some(name.to_string()),
                manager_name: Some(manager.to_string()),
                phone_number: Some(phone.to_string()),
                description: Some(if description.is_empty() {
                    "Ma'lumot mavjud emas".to_string()
                } else {
                    description.to_string()
                }),
                logo: LogoUpload::Keep,
            };
            if let Some(company) = admin.create_company(&form).await? {
                companies.push(company);
            }
        }

        tracing::info!("👥 Creating accounts");
        let mut rops = Vec::new();
        let mut sales_managers = Vec::new();
        for (index, company) in companies.iter().enumerate() {
            let rop = NewManagedUser::new(
                format!("rop{}@procrm.uz", index + 1),
                PASSWORD.to_string(),
                company.id,
            );
            if let Some(user) = admin.create_user(UserFamily::Rop, &rop).await? {
                rops.push(user);
            }
            for seat in 1..=2 {
                let manager = NewManagedUser::new(
                    format!("sm{}.{seat}@procrm.uz", index + 1),
                    PASSWORD.to_string(),
                    company.id,
                );
                if let Some(user) = admin
                    .create_user(UserFamily::SalesManager, &manager)
                    .await?
                {
                    sales_managers.push(user);
                }
            }
        }

        Ok(Self {
            companies,
            rops,
            sales_managers,
        })
    }

    pub fn print_summary(&self) {
        tracing::info!("📋 Development data:");
        tracing::info!(
            "   {} extra companies, {} ROPs, {} sales managers",
            self.companies.len(),
            self.rops.len(),
            self.sales_managers.len()
        );
        tracing::info!("   Password for every account: {PASSWORD}");
        tracing::info!("   Super-administrator: {ADMIN_EMAIL}");
        tracing::info!("   ROP (Acme): {ROP_EMAIL}");
        tracing::info!("   Undeletable sales manager: {BUSY_SALES_MANAGER_EMAIL}");
        tracing::info!("   Inactive company ROP: {INACTIVE_ROP_EMAIL}");
    }
}
