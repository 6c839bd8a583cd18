pub mod use_network_status;
pub mod use_resource_store;
pub mod use_title;

pub use use_network_status::use_network_status;
pub use use_resource_store::{spawn_with, use_resource_store};
pub use use_title::use_title;
