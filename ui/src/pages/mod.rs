pub mod companies;
pub mod company_detail;
pub mod home;
pub mod login;
pub mod not_found;
pub mod settings;
pub mod user_management;

pub use companies::CompaniesPage;
pub use company_detail::CompanyDetailPage;
pub use home::HomePage;
pub use login::LoginPage;
pub use not_found::NotFoundPage;
pub use settings::SettingsPage;
pub use user_management::UserManagementPage;
