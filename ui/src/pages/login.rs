use payloads::APIClient;
use resources::{SessionError, messages, validation};
use web_sys::HtmlInputElement;
use yew::prelude::*;
use yew_router::prelude::*;

use crate::contexts::session::{session_service, use_session};
use crate::contexts::toast::use_toast;
use crate::hooks::use_title;
use crate::utils::is_dev_mode;
use crate::{Route, api_address};

#[function_component]
pub fn LoginPage() -> Html {
    use_title("Kirish");
    let session = use_session();
    let toasts = use_toast();
    let navigator = use_navigator();

    let email_ref = use_node_ref();
    let password_ref = use_node_ref();
    let is_loading = use_state(|| false);

    let on_submit = {
        let email_ref = email_ref.clone();
        let password_ref = password_ref.clone();
        let is_loading = is_loading.clone();

        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let value = |node: &NodeRef| {
                node.cast::<HtmlInputElement>()
                    .map(|input| input.value())
                    .unwrap_or_default()
            };
            let credentials =
                match validation::login(&value(&email_ref), &value(&password_ref)) {
                    Ok(credentials) => credentials,
                    Err(e) => {
                        toasts.add(e.notice());
                        return;
                    }
                };

            let session = session.clone();
            let toasts = toasts.clone();
            let navigator = navigator.clone();
            let is_loading = is_loading.clone();
            yew::platform::spawn_local(async move {
                is_loading.set(true);
                let client = APIClient::new(api_address());
                match session_service().login(&client, &credentials).await {
                    Ok(signed_in) => {
                        toasts.add(messages::login_success());
                        session.signed_in(signed_in);
                        if let Some(navigator) = &navigator {
                            navigator.push(&Route::Home);
                        }
                    }
                    Err(SessionError::Client(e)) => {
                        tracing::debug!("login refused: {e}");
                        toasts.add(messages::login_error(&e));
                    }
                    Err(SessionError::Storage(e)) => {
                        tracing::error!("session not stored: {e}");
                        toasts.error("Sessiyani saqlab bo'lmadi!");
                    }
                }
                is_loading.set(false);
            });
        })
    };

    let field_class = "w-full px-3 py-2 border border-neutral-300 dark:border-neutral-600 rounded-md bg-white dark:bg-neutral-700 text-neutral-900 dark:text-neutral-100 focus:outline-none focus:ring-2 focus:ring-blue-500";

    html! {
        <div class="flex items-center justify-center min-h-screen px-4">
            <div class="max-w-md w-full bg-white dark:bg-neutral-800 p-8 rounded-lg shadow-md">
                <div class="text-center mb-6">
                    <h2 class="text-2xl font-bold text-neutral-900 dark:text-neutral-100">{"ProCRM"}</h2>
                    <p class="mt-1 text-sm text-neutral-600 dark:text-neutral-400">
                        {"Tizimga kirish uchun ma'lumotlaringizni kiriting"}
                    </p>
                </div>
                <form onsubmit={on_submit} class="space-y-4">
                    <div>
                        <label for="email" class="block text-sm font-medium text-neutral-700 dark:text-neutral-300 mb-1">
                            {"Email"}
                        </label>
                        <input ref={email_ref} id="email" type="email" autocomplete="username"
                            disabled={*is_loading} class={field_class} />
                    </div>
                    <div>
                        <label for="password" class="block text-sm font-medium text-neutral-700 dark:text-neutral-300 mb-1">
                            {"Parol"}
                        </label>
                        <input ref={password_ref} id="password" type="password"
                            autocomplete="current-password" disabled={*is_loading} class={field_class} />
                    </div>
                    <button type="submit" disabled={*is_loading}
                        class="w-full py-2 px-4 rounded-md text-white font-medium bg-blue-600 hover:bg-blue-700 disabled:opacity-50">
                        {if *is_loading { "Kirilmoqda..." } else { "Kirish" }}
                    </button>
                </form>
                if is_dev_mode() {
                    <p class="mt-6 text-xs text-neutral-500 dark:text-neutral-400 text-center">
                        {"Dev: admin@procrm.uz / secret123"}
                    </p>
                }
            </div>
        </div>
    }
}
