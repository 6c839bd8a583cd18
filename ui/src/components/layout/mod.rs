pub mod header;
pub mod main_layout;
pub mod sidebar;

pub use header::Header;
pub use main_layout::MainLayout;
pub use sidebar::Sidebar;
