//! The signed-in session, provided to the component tree.
//!
//! Restored from `localStorage` on mount and written back by
//! [`SessionService`]; components read it through [`use_session`].

use std::rc::Rc;

use payloads::{APIClient, Role};
use resources::{Session, SessionService};
use yew::prelude::*;

use crate::api_address;
use crate::storage::LocalStorage;

pub fn session_service() -> SessionService<LocalStorage> {
    SessionService::new(LocalStorage)
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct SessionState {
    pub session: Session,
}

pub enum SessionAction {
    SignedIn(Session),
    SignedOut,
}

impl Reducible for SessionState {
    type Action = SessionAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let session = match action {
            SessionAction::SignedIn(session) => session,
            SessionAction::SignedOut => Session::default(),
        };
        Rc::new(SessionState { session })
    }
}

pub type SessionContext = UseReducerHandle<SessionState>;

#[derive(Properties, PartialEq)]
pub struct SessionProviderProps {
    pub children: Children,
}

#[function_component]
pub fn SessionProvider(props: &SessionProviderProps) -> Html {
    let state = use_reducer(|| SessionState {
        session: session_service().restore(),
    });

    html! {
        <ContextProvider<SessionContext> context={state}>
            {props.children.clone()}
        </ContextProvider<SessionContext>>
    }
}

#[derive(Clone, PartialEq)]
pub struct SessionHandle {
    context: SessionContext,
}

impl SessionHandle {
    pub fn session(&self) -> Session {
        self.context.session.clone()
    }

    pub fn role(&self) -> Option<Role> {
        self.context.session.role()
    }

    /// A client carrying the stored credential, if any.
    pub fn client(&self) -> APIClient {
        session_service().client(&api_address(), &self.context.session)
    }

    pub fn signed_in(&self, session: Session) {
        self.context.dispatch(SessionAction::SignedIn(session));
    }

    pub fn logout(&self) {
        if let Err(e) = session_service().logout() {
            tracing::warn!("stored session not cleared: {e}");
        }
        tracing::info!("logged out");
        self.context.dispatch(SessionAction::SignedOut);
    }
}

#[hook]
pub fn use_session() -> SessionHandle {
    let context = use_context::<SessionContext>()
        .expect("use_session must be used within a SessionProvider");
    SessionHandle { context }
}
