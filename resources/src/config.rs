//! Fixed client-side settings.

use std::time::Duration;

/// Quiet period before the in-memory user filter is recomputed.
pub const USER_SEARCH_DEBOUNCE: Duration = Duration::from_millis(300);
/// Quiet period before the company list is re-fetched with a new term.
pub const COMPANY_SEARCH_DEBOUNCE: Duration = Duration::from_millis(500);

pub const MIN_PASSWORD_LEN: usize = 6;
pub const LOGO_MAX_BYTES: usize = 2 * 1024 * 1024;

/// Stored when a company is created without a description.
pub const DEFAULT_DESCRIPTION: &str = "Ma'lumot mavjud emas";

/// Storage key of the serialized session.
pub const SESSION_KEY: &str = "procrm-storage";
/// Storage key of the bearer token.
pub const TOKEN_KEY: &str = "accessToken";
/// Storage key of the theme preference (`"dark"` / `"light"`).
pub const THEME_KEY: &str = "theme";
