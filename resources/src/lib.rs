//! Console state and behavior shared by every resource page.
//!
//! Nothing in here knows about the DOM: the ui crate supplies timers,
//! storage and notification sinks through the traits defined here.

pub mod config;
pub mod debounce;
pub mod families;
pub mod filter;
pub mod guard;
pub mod list_state;
pub mod messages;
pub mod navigation;
pub mod session;
pub mod store;
pub mod validation;

pub use debounce::Debouncer;
pub use families::{Companies, ManagedUsers};
pub use filter::{Searchable, company_name, filter_view};
pub use guard::{GuardDecision, RouteGuard};
pub use list_state::{BusyFlags, ListState, OpKind};
pub use messages::{Notice, NoticeLevel, Notifier};
pub use navigation::NavLink;
pub use session::{
    AuthState, MemoryStorage, Session, SessionError, SessionService, SessionStorage,
    StorageError,
};
pub use store::{
    Record, ResourceApi, ResourceStore, SearchStrategy, StatusToggle, Toggleable,
};
pub use validation::FormError;
