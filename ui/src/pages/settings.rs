use resources::{messages, validation};
use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::contexts::session::{session_service, use_session};
use crate::contexts::toast::use_toast;
use crate::hooks::use_title;
use crate::theme::ThemePicker;

#[function_component]
pub fn SettingsPage() -> Html {
    use_title("Sozlamalar");
    let session = use_session();
    let toasts = use_toast();

    let email = session.session().email().unwrap_or_default().to_string();
    let old_password = use_state(String::new);
    let new_password = use_state(String::new);
    let is_saving = use_state(|| false);

    let text_field = |target: &UseStateHandle<String>| {
        let target = target.clone();
        Callback::from(move |e: InputEvent| {
            target.set(e.target_unchecked_into::<HtmlInputElement>().value());
        })
    };

    let on_submit = {
        let old_password = old_password.clone();
        let new_password = new_password.clone();
        let is_saving = is_saving.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            if let Err(e) = validation::password_change(&old_password, &new_password) {
                toasts.add(e.notice());
                return;
            }

            let client = session.client();
            let current = session.session();
            let old = (*old_password).clone();
            let new = (*new_password).clone();
            let old_password = old_password.clone();
            let new_password = new_password.clone();
            let is_saving = is_saving.clone();
            let toasts = toasts.clone();
            yew::platform::spawn_local(async move {
                is_saving.set(true);
                match session_service()
                    .change_password(&client, &current, old, new)
                    .await
                {
                    Ok(()) => {
                        toasts.add(messages::password_success());
                        old_password.set(String::new());
                        new_password.set(String::new());
                    }
                    Err(e) => {
                        tracing::debug!("password change refused: {e}");
                        toasts.add(messages::password_error(&e));
                    }
                }
                is_saving.set(false);
            });
        })
    };

    let field_class = "w-full px-3 py-2 text-sm border border-neutral-300 dark:border-neutral-600 rounded-md bg-white dark:bg-neutral-700 text-neutral-900 dark:text-neutral-100 focus:outline-none focus:ring-2 focus:ring-blue-500";
    let label_class = "block text-sm font-medium text-neutral-700 dark:text-neutral-300 mb-1";

    html! {
        <div class="max-w-xl space-y-8">
            <h1 class="text-2xl font-bold text-neutral-900 dark:text-neutral-100">{"Sozlamalar"}</h1>

            <section class="p-6 rounded-lg border border-neutral-200 dark:border-neutral-700 bg-white dark:bg-neutral-800 space-y-4">
                <h2 class="text-lg font-semibold text-neutral-900 dark:text-neutral-100">{"Parolni o'zgartirish"}</h2>
                <p class="text-sm text-neutral-500 dark:text-neutral-400">{email}</p>
                <form onsubmit={on_submit} class="space-y-4">
                    <div>
                        <label class={label_class}>{"Amaldagi parol"}</label>
                        <input type="password" autocomplete="current-password" class={field_class}
                            value={(*old_password).clone()} oninput={text_field(&old_password)} />
                    </div>
                    <div>
                        <label class={label_class}>{"Yangi parol"}</label>
                        <input type="password" autocomplete="new-password" class={field_class}
                            value={(*new_password).clone()} oninput={text_field(&new_password)} />
                    </div>
                    <button type="submit" disabled={*is_saving}
                        class="px-4 py-2 rounded-md bg-blue-600 hover:bg-blue-700 text-white text-sm font-medium disabled:opacity-50">
                        {if *is_saving { "Saqlanmoqda..." } else { "Saqlash" }}
                    </button>
                </form>
            </section>

            <section class="p-6 rounded-lg border border-neutral-200 dark:border-neutral-700 bg-white dark:bg-neutral-800 flex items-center justify-between">
                <h2 class="text-lg font-semibold text-neutral-900 dark:text-neutral-100">{"Mavzu"}</h2>
                <ThemePicker />
            </section>
        </div>
    }
}
