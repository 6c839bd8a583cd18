use resources::navigation::may_visit;
use resources::{GuardDecision, RouteGuard};
use yew::prelude::*;
use yew_router::prelude::*;

use crate::Route;
use crate::contexts::session::use_session;

#[derive(Properties, PartialEq)]
pub struct ProtectedRouteProps {
    /// The route being rendered, for the role check.
    pub route: Route,
    pub children: Children,
}

/// Renders its children only for a signed-in user whose role may open
/// `route`. Visitors go to the login page, other roles to the home page.
#[function_component]
pub fn ProtectedRoute(props: &ProtectedRouteProps) -> Html {
    let session = use_session().session();

    match RouteGuard::Protected.decide(&session) {
        GuardDecision::Redirect(path) => {
            html! { <Redirect<Route> to={Route::from_path(path)} /> }
        }
        GuardDecision::Render => {
            let allowed = session
                .role()
                .is_some_and(|role| may_visit(role, &props.route.to_path()));
            if allowed {
                html! { <>{for props.children.iter()}</> }
            } else {
                tracing::debug!(route = ?props.route, "role may not open this page");
                html! { <Redirect<Route> to={Route::Home} /> }
            }
        }
    }
}

#[derive(Properties, PartialEq)]
pub struct PublicRouteProps {
    pub children: Children,
}

/// Renders its children only while nobody is signed in.
#[function_component]
pub fn PublicRoute(props: &PublicRouteProps) -> Html {
    let session = use_session().session();

    match RouteGuard::Public.decide(&session) {
        GuardDecision::Redirect(path) => {
            html! { <Redirect<Route> to={Route::from_path(path)} /> }
        }
        GuardDecision::Render => html! { <>{for props.children.iter()}</> },
    }
}
