use std::rc::Rc;

use payloads::requests::CompanyForm;
use payloads::{CompanyId, CompanyRecord, Operation, ResourceKind};
use resources::messages;
use yew::prelude::*;
use yew_router::prelude::*;

use crate::Route;
use crate::api_address;
use crate::components::{CompanyFormModal, CompanyFormMode, ConfirmationModal, Spinner};
use crate::contexts::session::use_session;
use crate::contexts::toast::use_toast;
use crate::hooks::use_title;
use crate::utils::format_date;

#[derive(Properties, PartialEq)]
pub struct CompanyDetailPageProps {
    pub id: CompanyId,
}

#[derive(Clone, PartialEq)]
enum Details {
    Loading,
    Loaded(CompanyRecord),
    Failed(String),
}

#[function_component]
pub fn CompanyDetailPage(props: &CompanyDetailPageProps) -> Html {
    use_title("Kompaniya");
    let session = use_session();
    let toasts = use_toast();
    let navigator = use_navigator();

    let details = use_state(|| Details::Loading);
    let editing = use_state(|| false);
    let confirm_delete = use_state(|| false);
    let busy = use_state(|| false);
    // Responses for an older id or session are dropped.
    let generation = use_mut_ref(|| 0u64);

    let load = {
        let details = details.clone();
        let generation = generation.clone();
        let client = Rc::new(session.client());
        let id = props.id;
        Callback::from(move |_: ()| {
            *generation.borrow_mut() += 1;
            let mine = *generation.borrow();
            let details = details.clone();
            let generation = generation.clone();
            let client = client.clone();
            details.set(Details::Loading);
            yew::platform::spawn_local(async move {
                let result = client.get_company(id).await;
                if *generation.borrow() != mine {
                    return;
                }
                match result {
                    Ok(company) => details.set(Details::Loaded(company)),
                    Err(e) => {
                        tracing::debug!(?id, "company details failed: {e}");
                        details.set(Details::Failed(messages::load_error(&e)));
                    }
                }
            });
        })
    };

    {
        let load = load.clone();
        use_effect_with((props.id, session.session()), move |_| load.emit(()));
    }

    let company = match &*details {
        Details::Loaded(company) => company.clone(),
        Details::Loading => {
            return html! {
                <div class="flex justify-center py-16"><Spinner /></div>
            };
        }
        Details::Failed(message) => {
            let on_retry = load.reform(|_: MouseEvent| ());
            return html! {
                <div class="p-6 rounded-lg border border-red-200 dark:border-red-800 bg-red-50 dark:bg-red-900/20 space-y-3">
                    <p class="text-red-700 dark:text-red-300">{message.clone()}</p>
                    <div class="flex gap-4">
                        <button onclick={on_retry} class="text-sm text-blue-600 dark:text-blue-400 underline">
                            {"Qayta urinish"}
                        </button>
                        <Link<Route> to={Route::Companies} classes="text-sm text-neutral-600 dark:text-neutral-400 underline">
                            {"Orqaga"}
                        </Link<Route>>
                    </div>
                </div>
            };
        }
    };

    let on_submit = {
        let client = Rc::new(session.client());
        let details = details.clone();
        let editing = editing.clone();
        let busy = busy.clone();
        let toasts = toasts.clone();
        let load = load.clone();
        let id = company.id;
        Callback::from(move |form: CompanyForm| {
            let client = client.clone();
            let details = details.clone();
            let editing = editing.clone();
            let busy = busy.clone();
            let toasts = toasts.clone();
            let load = load.clone();
            busy.set(true);
            yew::platform::spawn_local(async move {
                match client.update_company(id, &form).await {
                    Ok(updated) => {
                        toasts.add(
                            messages::write_success(ResourceKind::Company, Operation::Update, None),
                        );
                        editing.set(false);
                        match updated {
                            Some(company) => details.set(Details::Loaded(company)),
                            None => load.emit(()),
                        }
                    }
                    Err(e) => toasts.add(
                        messages::write_error(ResourceKind::Company, Operation::Update, &e),
                    ),
                }
                busy.set(false);
            });
        })
    };

    let on_toggle = {
        let client = Rc::new(session.client());
        let details = details.clone();
        let toasts = toasts.clone();
        let company = company.clone();
        Callback::from(move |_: MouseEvent| {
            let client = client.clone();
            let details = details.clone();
            let toasts = toasts.clone();
            let before = company.clone();
            details.set(Details::Loaded(CompanyRecord {
                status: !before.status,
                ..before.clone()
            }));
            yew::platform::spawn_local(async move {
                match client.toggle_company_status(before.id).await {
                    Ok(()) => toasts.add(
                        messages::write_success(ResourceKind::Company, Operation::ToggleStatus, None),
                    ),
                    Err(e) => {
                        details.set(Details::Loaded(before));
                        toasts.add(
                            messages::write_error(ResourceKind::Company, Operation::ToggleStatus, &e),
                        );
                    }
                }
            });
        })
    };

    let on_delete = {
        let client = Rc::new(session.client());
        let confirm_delete = confirm_delete.clone();
        let busy = busy.clone();
        let toasts = toasts.clone();
        let navigator = navigator.clone();
        let id = company.id;
        Callback::from(move |_: ()| {
            let client = client.clone();
            let confirm_delete = confirm_delete.clone();
            let busy = busy.clone();
            let toasts = toasts.clone();
            let navigator = navigator.clone();
            busy.set(true);
            yew::platform::spawn_local(async move {
                let result = client.delete_company(id).await;
                busy.set(false);
                confirm_delete.set(false);
                match result {
                    Ok(()) => {
                        toasts.add(
                            messages::write_success(ResourceKind::Company, Operation::Delete, None),
                        );
                        if let Some(navigator) = &navigator {
                            navigator.push(&Route::Companies);
                        }
                    }
                    Err(e) => toasts.add(
                        messages::write_error(ResourceKind::Company, Operation::Delete, &e),
                    ),
                }
            });
        })
    };

    let open_edit = {
        let editing = editing.clone();
        Callback::from(move |_: MouseEvent| editing.set(true))
    };
    let close_edit = {
        let editing = editing.clone();
        Callback::from(move |_| editing.set(false))
    };
    let open_delete = {
        let confirm_delete = confirm_delete.clone();
        Callback::from(move |_: MouseEvent| confirm_delete.set(true))
    };
    let close_delete = {
        let confirm_delete = confirm_delete.clone();
        Callback::from(move |_| confirm_delete.set(false))
    };

    let field = |label: &'static str, value: String| {
        html! {
            <div>
                <dt class="text-sm text-neutral-500 dark:text-neutral-400">{label}</dt>
                <dd class="mt-1 text-neutral-900 dark:text-neutral-100">{value}</dd>
            </div>
        }
    };

    html! {
        <div class="space-y-6">
            <Link<Route> to={Route::Companies} classes="text-sm text-blue-600 dark:text-blue-400 hover:underline">
                {"← Kompaniyalar"}
            </Link<Route>>

            <div class="flex flex-col sm:flex-row sm:items-center gap-6 p-6 rounded-lg border border-neutral-200 dark:border-neutral-700 bg-white dark:bg-neutral-800">
                if let Some(src) = company.logo_url(&api_address()) {
                    <img src={src} alt={company.name.clone()} class="h-24 w-24 rounded-lg object-cover" />
                } else {
                    <div class="h-24 w-24 rounded-lg bg-neutral-200 dark:bg-neutral-700" />
                }
                <div class="flex-1">
                    <h1 class="text-2xl font-bold text-neutral-900 dark:text-neutral-100">{&company.name}</h1>
                    <button onclick={on_toggle}
                        class={if company.status {
                            "mt-2 px-2 py-1 rounded text-xs font-medium bg-green-100 text-green-800 dark:bg-green-900/30 dark:text-green-300"
                        } else {
                            "mt-2 px-2 py-1 rounded text-xs font-medium bg-neutral-200 text-neutral-700 dark:bg-neutral-700 dark:text-neutral-300"
                        }}>
                        {if company.status { "Faol" } else { "Nofaol" }}
                    </button>
                </div>
                <div class="flex gap-3">
                    <button onclick={open_edit} disabled={*busy}
                        class="px-4 py-2 rounded-md bg-blue-600 hover:bg-blue-700 text-white text-sm font-medium disabled:opacity-50">
                        {"Tahrirlash"}
                    </button>
                    <button onclick={open_delete} disabled={*busy}
                        class="px-4 py-2 rounded-md bg-red-600 hover:bg-red-700 text-white text-sm font-medium disabled:opacity-50">
                        {"O'chirish"}
                    </button>
                </div>
            </div>

            <dl class="grid gap-6 sm:grid-cols-2 p-6 rounded-lg border border-neutral-200 dark:border-neutral-700 bg-white dark:bg-neutral-800">
                {field("Rahbar", company.manager_name.clone())}
                {field("Telefon", company.phone_number.clone())}
                {field("Tavsif", company.description.clone())}
                {field("Yaratilgan", company.created_at.map(format_date).unwrap_or_default())}
            </dl>

            if *editing {
                <CompanyFormModal mode={CompanyFormMode::Edit(company.clone())} busy={*busy}
                    on_submit={on_submit} on_close={close_edit} />
            }
            if *confirm_delete {
                <ConfirmationModal
                    title="Kompaniyani o'chirish"
                    message={format!("\"{}\" kompaniyasini o'chirmoqchimisiz?", company.name)}
                    on_confirm={on_delete}
                    on_close={close_delete}
                    is_loading={*busy}
                />
            }
        </div>
    }
}
