use yew::prelude::*;
use yew_router::prelude::*;

use crate::Route;
use crate::contexts::session::use_session;
use crate::theme::ThemeToggle;

#[function_component]
pub fn Header() -> Html {
    let session = use_session();
    let navigator = use_navigator();
    let email = session.session().email().map(str::to_string).unwrap_or_default();
    let role = session.role().map(|role| role.as_str()).unwrap_or_default();

    let on_logout = Callback::from(move |_: MouseEvent| {
        session.logout();
        if let Some(navigator) = &navigator {
            navigator.push(&Route::Login);
        }
    });

    html! {
        <header class="bg-white dark:bg-gray-800 border-b border-gray-200 dark:border-gray-700">
            <div class="px-4 sm:px-6 lg:px-8">
                <div class="flex justify-end items-center h-16 gap-4">
                    <div class="text-right">
                        <p class="text-sm font-medium text-gray-900 dark:text-white">{email}</p>
                        <p class="text-xs text-gray-500 dark:text-gray-400">{role}</p>
                    </div>
                    <ThemeToggle />
                    <button
                        onclick={on_logout}
                        class="px-3 py-1.5 text-sm font-medium rounded-md border border-gray-300 dark:border-gray-600 hover:bg-gray-100 dark:hover:bg-gray-700"
                    >
                        {"Chiqish"}
                    </button>
                </div>
            </div>
        </header>
    }
}
