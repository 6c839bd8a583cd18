use gloo_timers::future::TimeoutFuture;
use payloads::CompanyRecord;
use payloads::requests::CompanyForm;
use resources::{Companies, ResourceApi};
use yew::prelude::*;
use yew_router::prelude::*;

use crate::Route;
use crate::api_address;
use crate::components::{
    CompanyFormModal, CompanyFormMode, ConfirmationModal, ListStatus, SearchInput,
};
use crate::contexts::session::use_session;
use crate::hooks::{spawn_with, use_resource_store, use_title};
use crate::utils::format_date;

#[function_component]
pub fn CompaniesPage() -> Html {
    use_title("Kompaniyalar");
    let session = use_session().session();
    let store = use_resource_store(Companies::new);

    let form_mode = use_state(|| None::<CompanyFormMode>);
    let pending_delete = use_state(|| None::<CompanyRecord>);

    {
        let store = store.clone();
        use_effect_with(session, move |_| {
            spawn_with(&store, |store| async move {
                store.refresh(String::new()).await;
            });
        });
    }

    let on_search = {
        let store = store.clone();
        Callback::from(move |raw: String| {
            let pause = store.api().search().interval().as_millis() as u32;
            spawn_with(&store, move |store| async move {
                store.search(raw, TimeoutFuture::new(pause)).await;
            });
        })
    };

    let on_retry = {
        let store = store.clone();
        Callback::from(move |_| spawn_with(&store, |store| async move { store.retry().await }))
    };

    let on_submit = {
        let store = store.clone();
        let form_mode = form_mode.clone();
        Callback::from(move |form: CompanyForm| {
            let Some(mode) = (*form_mode).clone() else {
                return;
            };
            let form_mode = form_mode.clone();
            spawn_with(&store, move |store| async move {
                let saved = match mode {
                    CompanyFormMode::Create => store.add(form).await,
                    CompanyFormMode::Edit(company) => store.edit(company.id, form).await,
                };
                if saved.is_some() {
                    form_mode.set(None);
                }
            });
        })
    };

    let on_confirm_delete = {
        let store = store.clone();
        let pending_delete = pending_delete.clone();
        Callback::from(move |_| {
            let Some(company) = (*pending_delete).clone() else {
                return;
            };
            pending_delete.set(None);
            spawn_with(&store, move |store| async move {
                store.remove(company.id).await;
            });
        })
    };

    let busy = store.busy();
    let state = store.state();
    let address = api_address();

    let rows = state.items().iter().map(|company| {
        let on_toggle = {
            let store = store.clone();
            let id = company.id;
            Callback::from(move |_| {
                spawn_with(&store, move |store| async move {
                    store.toggle_status(id).await;
                });
            })
        };
        let on_edit = {
            let form_mode = form_mode.clone();
            let company = company.clone();
            Callback::from(move |_| form_mode.set(Some(CompanyFormMode::Edit(company.clone()))))
        };
        let on_delete = {
            let pending_delete = pending_delete.clone();
            let company = company.clone();
            Callback::from(move |_| pending_delete.set(Some(company.clone())))
        };
        let (status_label, status_class) = if company.status {
            ("Faol", "bg-green-100 text-green-800 dark:bg-green-900/30 dark:text-green-300")
        } else {
            ("Nofaol", "bg-neutral-200 text-neutral-700 dark:bg-neutral-700 dark:text-neutral-300")
        };

        html! {
            <tr key={company.id.0} class="border-b border-neutral-200 dark:border-neutral-700">
                <td class="px-4 py-3">
                    if let Some(src) = company.logo_url(&address) {
                        <img src={src} alt={company.name.clone()} class="h-10 w-10 rounded object-cover" />
                    } else {
                        <div class="h-10 w-10 rounded bg-neutral-200 dark:bg-neutral-700" />
                    }
                </td>
                <td class="px-4 py-3 font-medium">
                    <Link<Route> to={Route::CompanyDetail { id: company.id.0 }}
                        classes="text-blue-600 dark:text-blue-400 hover:underline">
                        {&company.name}
                    </Link<Route>>
                </td>
                <td class="px-4 py-3">{&company.manager_name}</td>
                <td class="px-4 py-3">{&company.phone_number}</td>
                <td class="px-4 py-3 text-sm text-neutral-500">
                    {company.created_at.map(format_date).unwrap_or_default()}
                </td>
                <td class="px-4 py-3">
                    <button onclick={on_toggle} disabled={busy.edit}
                        class={format!("px-2 py-1 rounded text-xs font-medium {status_class}")}>
                        {status_label}
                    </button>
                </td>
                <td class="px-4 py-3 text-right space-x-2">
                    <button onclick={on_edit} class="text-sm text-blue-600 dark:text-blue-400 hover:underline">
                        {"Tahrirlash"}
                    </button>
                    <button onclick={on_delete} disabled={busy.remove}
                        class="text-sm text-red-600 dark:text-red-400 hover:underline disabled:opacity-50">
                        {"O'chirish"}
                    </button>
                </td>
            </tr>
        }
    });

    let on_add = {
        let form_mode = form_mode.clone();
        Callback::from(move |_| form_mode.set(Some(CompanyFormMode::Create)))
    };
    let on_close_form = {
        let form_mode = form_mode.clone();
        Callback::from(move |_| form_mode.set(None))
    };
    let on_close_delete = {
        let pending_delete = pending_delete.clone();
        Callback::from(move |_| pending_delete.set(None))
    };

    html! {
        <div class="space-y-6">
            <div class="flex flex-col sm:flex-row sm:items-center sm:justify-between gap-4">
                <div>
                    <h1 class="text-2xl font-bold text-neutral-900 dark:text-neutral-100">{"Kompaniyalar"}</h1>
                    <p class="text-sm text-neutral-500">{format!("Jami: {} ta", state.len())}</p>
                </div>
                <div class="flex gap-3">
                    <SearchInput value={AttrValue::from(state.search_raw().to_string())}
                        placeholder="Kompaniya nomi bo'yicha qidirish" on_input={on_search} />
                    <button onclick={on_add} disabled={busy.add}
                        class="px-4 py-2 rounded-md bg-blue-600 hover:bg-blue-700 text-white text-sm font-medium disabled:opacity-50">
                        {"Qo'shish"}
                    </button>
                </div>
            </div>

            <ListStatus loading={busy.get}
                error={state.last_error().map(|e| AttrValue::from(e.to_string()))}
                on_retry={on_retry} empty={state.is_empty()}>
                <div class="overflow-x-auto rounded-lg border border-neutral-200 dark:border-neutral-700">
                    <table class="min-w-full text-left text-sm">
                        <thead class="bg-neutral-50 dark:bg-neutral-800 text-neutral-600 dark:text-neutral-300">
                            <tr>
                                <th class="px-4 py-3">{"Logo"}</th>
                                <th class="px-4 py-3">{"Nomi"}</th>
                                <th class="px-4 py-3">{"Rahbar"}</th>
                                <th class="px-4 py-3">{"Telefon"}</th>
                                <th class="px-4 py-3">{"Yaratilgan"}</th>
                                <th class="px-4 py-3">{"Holati"}</th>
                                <th class="px-4 py-3" />
                            </tr>
                        </thead>
                        <tbody>{for rows}</tbody>
                    </table>
                </div>
            </ListStatus>

            if let Some(mode) = (*form_mode).clone() {
                <CompanyFormModal mode={mode} busy={busy.add || busy.edit}
                    on_submit={on_submit} on_close={on_close_form} />
            }
            if let Some(company) = (*pending_delete).clone() {
                <ConfirmationModal
                    title="Kompaniyani o'chirish"
                    message={format!("\"{}\" kompaniyasini o'chirmoqchimisiz?", company.name)}
                    on_confirm={on_confirm_delete}
                    on_close={on_close_delete}
                    is_loading={busy.remove}
                />
            }
        </div>
    }
}
