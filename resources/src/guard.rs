use crate::session::Session;

pub const LOGIN_PATH: &str = "/login";
pub const HOME_PATH: &str = "/";

/// Route wrappers gating on the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteGuard {
    /// Needs a signed-in user.
    Protected,
    /// Only for visitors, e.g. the login page.
    Public,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    Render,
    Redirect(&'static str),
}

impl RouteGuard {
    pub fn decide(&self, session: &Session) -> GuardDecision {
        match (self, session.is_authenticated()) {
            (RouteGuard::Protected, false) => GuardDecision::Redirect(LOGIN_PATH),
            (RouteGuard::Public, true) => GuardDecision::Redirect(HOME_PATH),
            _ => GuardDecision::Render,
        }
    }
}
