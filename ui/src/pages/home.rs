use resources::navigation::links_for;
use yew::prelude::*;
use yew_router::prelude::*;

use crate::Route;
use crate::contexts::session::use_session;
use crate::hooks::use_title;

#[function_component]
pub fn HomePage() -> Html {
    use_title("Bosh sahifa");
    let session = use_session().session();
    let email = session.email().unwrap_or_default().to_string();
    let links = session.role().map(links_for).unwrap_or_default();

    html! {
        <div class="space-y-6">
            <div>
                <h1 class="text-2xl font-bold text-neutral-900 dark:text-neutral-100">
                    {"Xush kelibsiz!"}
                </h1>
                <p class="text-neutral-600 dark:text-neutral-400">{email}</p>
            </div>
            <div class="grid gap-4 sm:grid-cols-2 lg:grid-cols-3">
                {for links.iter().filter(|link| link.path != "/").map(|link| html! {
                    <Link<Route>
                        to={Route::from_path(link.path)}
                        classes="block p-6 rounded-lg border border-neutral-200 dark:border-neutral-700 bg-white dark:bg-neutral-800 hover:shadow-md transition-shadow"
                    >
                        <span class="text-lg font-medium text-neutral-900 dark:text-neutral-100">
                            {link.label}
                        </span>
                    </Link<Route>>
                })}
            </div>
        </div>
    }
}
