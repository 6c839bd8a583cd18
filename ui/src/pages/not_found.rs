use yew::prelude::*;
use yew_router::prelude::*;

use crate::Route;
use crate::hooks::use_title;

#[function_component]
pub fn NotFoundPage() -> Html {
    use_title("404");

    html! {
        <main class="max-w-7xl mx-auto px-4 sm:px-6 lg:px-8 py-16">
            <div class="text-center space-y-4">
                <h1 class="text-4xl font-bold text-gray-900 dark:text-white">{"404"}</h1>
                <p class="text-gray-600 dark:text-gray-300">{"Sahifa topilmadi"}</p>
                <Link<Route> to={Route::Home} classes="text-blue-600 dark:text-blue-400 underline">
                    {"Bosh sahifaga qaytish"}
                </Link<Route>>
            </div>
        </main>
    }
}
