pub mod company_form;
pub mod confirmation_modal;
pub mod layout;
pub mod list_status;
pub mod network_boundary;
pub mod route_guard;
pub mod search_input;
pub mod toast;
pub mod user_form;

pub use company_form::{CompanyFormModal, CompanyFormMode};
pub use confirmation_modal::ConfirmationModal;
pub use list_status::{ListStatus, Spinner};
pub use network_boundary::NetworkBoundary;
pub use route_guard::{ProtectedRoute, PublicRoute};
pub use search_input::SearchInput;
pub use toast::ToastContainer;
pub use user_form::{UserFormModal, UserFormMode};
