use yew::prelude::*;
use yew_router::prelude::*;

mod components;
mod contexts;
mod hooks;
mod logs;
mod pages;
mod storage;
mod theme;
mod utils;

use components::layout::MainLayout;
use components::{NetworkBoundary, ProtectedRoute, PublicRoute, ToastContainer};
use contexts::session::SessionProvider;
use contexts::toast::ToastProvider;
use pages::*;

/// Base address of the CRM backend: `BACKEND_URL` at build time, else the
/// page's own origin.
pub fn api_address() -> String {
    option_env!("BACKEND_URL")
        .map(|url| url.trim_end_matches('/').to_string())
        .or_else(|| web_sys::window()?.location().origin().ok())
        .unwrap_or_default()
}

#[function_component]
pub fn App() -> Html {
    use_effect_with((), |_| logs::init_logging());
    // Applies the stored light/dark preference before any page renders.
    theme::use_theme();

    html! {
        <BrowserRouter>
            <ToastProvider>
                <SessionProvider>
                    <NetworkBoundary>
                        <div class="min-h-screen bg-white dark:bg-gray-900 text-gray-900 dark:text-gray-100 transition-colors">
                            <Switch<Route> render={switch} />
                        </div>
                    </NetworkBoundary>
                    <ToastContainer />
                </SessionProvider>
            </ToastProvider>
        </BrowserRouter>
    }
}

#[derive(Clone, Routable, PartialEq, Debug)]
pub enum Route {
    #[at("/")]
    Home,
    #[at("/login")]
    Login,
    #[at("/company")]
    Companies,
    #[at("/company/:id")]
    CompanyDetail { id: i64 },
    #[at("/rop")]
    Rops,
    #[at("/salesmanager")]
    SalesManagers,
    #[at("/settings")]
    Settings,
    #[not_found]
    #[at("/404")]
    NotFound,
}

impl Route {
    /// The route for a path handed out by the guards.
    pub fn from_path(path: &str) -> Self {
        Self::recognize(path).unwrap_or(Route::Home)
    }
}

fn switch(route: Route) -> Html {
    let page = match route.clone() {
        Route::Login => {
            return html! { <PublicRoute><LoginPage /></PublicRoute> };
        }
        Route::NotFound => return html! { <NotFoundPage /> },
        Route::Home => html! { <HomePage /> },
        Route::Companies => html! { <CompaniesPage /> },
        Route::CompanyDetail { id } => {
            html! { <CompanyDetailPage id={payloads::CompanyId(id)} /> }
        }
        Route::Rops => {
            html! { <UserManagementPage key="rop" family={payloads::UserFamily::Rop} /> }
        }
        Route::SalesManagers => html! {
            <UserManagementPage key="salesmanager" family={payloads::UserFamily::SalesManager} />
        },
        Route::Settings => html! { <SettingsPage /> },
    };

    html! {
        <ProtectedRoute route={route}>
            <MainLayout>{page}</MainLayout>
        </ProtectedRoute>
    }
}
