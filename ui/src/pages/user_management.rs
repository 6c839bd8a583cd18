use gloo_timers::future::TimeoutFuture;
use payloads::requests::{NewManagedUser, UpdateManagedUser};
use payloads::{CompanyId, ManagedUserRecord, Role, SalesManagerScope, UserFamily};
use resources::{Companies, ManagedUsers, ResourceApi, company_name, filter_view};
use web_sys::HtmlSelectElement;
use yew::prelude::*;

use crate::components::user_form::family_title;
use crate::components::{ConfirmationModal, ListStatus, SearchInput, UserFormModal, UserFormMode};
use crate::contexts::session::use_session;
use crate::hooks::{spawn_with, use_resource_store, use_title};

#[derive(Properties, PartialEq)]
pub struct UserManagementPageProps {
    pub family: UserFamily,
}

fn page_title(family: UserFamily) -> &'static str {
    match family {
        UserFamily::Rop => "Boshqaruvchilar",
        UserFamily::SalesManager => "Sotuv operatorlari",
    }
}

/// The listing a page opens with. A super-administrator sees sales managers
/// of every company until one is picked.
fn initial_scope(role: Option<Role>, family: UserFamily) -> SalesManagerScope {
    match (role, family) {
        (Some(Role::SuperAdmin), UserFamily::SalesManager) => SalesManagerScope::AllCompanies,
        _ => SalesManagerScope::Own,
    }
}

/// ROP or sales-manager accounts. A super-administrator also gets the
/// company column, the company picker and search by company name.
#[function_component]
pub fn UserManagementPage(props: &UserManagementPageProps) -> Html {
    let family = props.family;
    use_title(page_title(family));
    let session = use_session().session();
    let is_admin = session.role().is_some_and(|role| role.is_super_admin());

    let users = use_resource_store(move |client| ManagedUsers::new(client, family));
    let companies = use_resource_store(Companies::new);

    let form_mode = use_state(|| None::<UserFormMode>);
    let pending_delete = use_state(|| None::<ManagedUserRecord>);

    {
        let users = users.clone();
        let companies = companies.clone();
        let scope = initial_scope(session.role(), family);
        use_effect_with(session.clone(), move |_| {
            spawn_with(&users, move |users| async move { users.refresh(scope).await });
            if is_admin {
                spawn_with(&companies, |companies| async move {
                    companies.refresh(String::new()).await;
                });
            }
        });
    }

    let on_search = {
        let users = users.clone();
        Callback::from(move |raw: String| {
            let pause = users.api().search().interval().as_millis() as u32;
            spawn_with(&users, move |users| async move {
                users.search(raw, TimeoutFuture::new(pause)).await;
            });
        })
    };

    let on_retry = {
        let users = users.clone();
        Callback::from(move |_| spawn_with(&users, |users| async move { users.retry().await }))
    };

    let on_scope = {
        let users = users.clone();
        Callback::from(move |e: Event| {
            let value = e.target_unchecked_into::<HtmlSelectElement>().value();
            let scope = value
                .parse::<i64>()
                .ok()
                .filter(|id| *id != 0)
                .map(|id| SalesManagerScope::Company(CompanyId(id)))
                .unwrap_or(SalesManagerScope::AllCompanies);
            spawn_with(&users, move |users| async move { users.refresh(scope).await });
        })
    };

    let on_create = {
        let users = users.clone();
        let form_mode = form_mode.clone();
        Callback::from(move |user: NewManagedUser| {
            let form_mode = form_mode.clone();
            spawn_with(&users, move |users| async move {
                if users.add(user).await.is_some() {
                    form_mode.set(None);
                }
            });
        })
    };

    let on_edit = {
        let users = users.clone();
        let form_mode = form_mode.clone();
        Callback::from(move |update: UpdateManagedUser| {
            let Some(UserFormMode::Edit(user)) = (*form_mode).clone() else {
                return;
            };
            let form_mode = form_mode.clone();
            spawn_with(&users, move |users| async move {
                if users.edit(user.id, update).await.is_some() {
                    form_mode.set(None);
                }
            });
        })
    };

    let on_confirm_delete = {
        let users = users.clone();
        let pending_delete = pending_delete.clone();
        Callback::from(move |_| {
            let Some(user) = (*pending_delete).clone() else {
                return;
            };
            pending_delete.set(None);
            spawn_with(&users, move |users| async move {
                users.remove(user.id).await;
            });
        })
    };

    let busy = users.busy();
    let state = users.state();
    let company_list = if is_admin { companies.items() } else { Vec::new() };
    let visible = filter_view(state.items(), &company_list, state.search_debounced());
    let scope = users.last_query();

    let rows = visible.iter().map(|user| {
        let on_edit = {
            let form_mode = form_mode.clone();
            let user = (*user).clone();
            Callback::from(move |_| form_mode.set(Some(UserFormMode::Edit(user.clone()))))
        };
        let on_delete = {
            let pending_delete = pending_delete.clone();
            let user = (*user).clone();
            Callback::from(move |_| pending_delete.set(Some(user.clone())))
        };
        html! {
            <tr key={user.id.0} class="border-b border-neutral-200 dark:border-neutral-700">
                <td class="px-4 py-3 font-medium">{&user.email}</td>
                if is_admin {
                    <td class="px-4 py-3">
                        {company_name(&company_list, user.company_id).unwrap_or("-").to_string()}
                    </td>
                }
                <td class="px-4 py-3 text-sm text-neutral-500">{user.permissions.join(", ")}</td>
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

    let scope_picker = (is_admin && family == UserFamily::SalesManager).then(|| {
        let selected = match scope {
            SalesManagerScope::Company(id) => id.to_string(),
            _ => "0".to_string(),
        };
        html! {
            <select onchange={on_scope}
                class="px-3 py-2 text-sm border border-neutral-300 dark:border-neutral-600 rounded-md bg-white dark:bg-neutral-700 text-neutral-900 dark:text-neutral-100">
                <option value="0" selected={selected == "0"}>{"Barcha kompaniyalar"}</option>
                {for company_list.iter().map(|company| {
                    let id = company.id.to_string();
                    html! {
                        <option key={id.clone()} value={id.clone()} selected={id == selected}>
                            {&company.name}
                        </option>
                    }
                })}
            </select>
        }
    });

    let on_add = {
        let form_mode = form_mode.clone();
        Callback::from(move |_| form_mode.set(Some(UserFormMode::Create)))
    };
    let on_close_form = {
        let form_mode = form_mode.clone();
        Callback::from(move |_| form_mode.set(None))
    };
    let on_close_delete = {
        let pending_delete = pending_delete.clone();
        Callback::from(move |_| pending_delete.set(None))
    };

    let total = if visible.len() == state.len() {
        format!("Jami: {} ta", state.len())
    } else {
        format!("Topildi: {} / {} ta", visible.len(), state.len())
    };

    html! {
        <div class="space-y-6">
            <div class="flex flex-col sm:flex-row sm:items-center sm:justify-between gap-4">
                <div>
                    <h1 class="text-2xl font-bold text-neutral-900 dark:text-neutral-100">{page_title(family)}</h1>
                    <p class="text-sm text-neutral-500">{total}</p>
                </div>
                <div class="flex flex-wrap gap-3">
                    {scope_picker.unwrap_or_default()}
                    <SearchInput value={AttrValue::from(state.search_raw().to_string())}
                        placeholder={if is_admin { "Email yoki kompaniya bo'yicha qidirish" } else { "Email bo'yicha qidirish" }}
                        on_input={on_search} />
                    <button onclick={on_add} disabled={busy.add}
                        class="px-4 py-2 rounded-md bg-blue-600 hover:bg-blue-700 text-white text-sm font-medium disabled:opacity-50">
                        {"Qo'shish"}
                    </button>
                </div>
            </div>

            <ListStatus loading={busy.get}
                error={state.last_error().map(|e| AttrValue::from(e.to_string()))}
                on_retry={on_retry} empty={visible.is_empty()}>
                <div class="overflow-x-auto rounded-lg border border-neutral-200 dark:border-neutral-700">
                    <table class="min-w-full text-left text-sm">
                        <thead class="bg-neutral-50 dark:bg-neutral-800 text-neutral-600 dark:text-neutral-300">
                            <tr>
                                <th class="px-4 py-3">{"Email"}</th>
                                if is_admin {
                                    <th class="px-4 py-3">{"Kompaniya"}</th>
                                }
                                <th class="px-4 py-3">{"Ruxsatlar"}</th>
                                <th class="px-4 py-3" />
                            </tr>
                        </thead>
                        <tbody>{for rows}</tbody>
                    </table>
                </div>
            </ListStatus>

            if let Some(mode) = (*form_mode).clone() {
                <UserFormModal mode={mode} family={family} companies={company_list.clone()}
                    busy={busy.add || busy.edit}
                    on_create={on_create} on_edit={on_edit} on_close={on_close_form} />
            }
            if let Some(user) = (*pending_delete).clone() {
                <ConfirmationModal
                    title={format!("{}ni o'chirish", family_title(family))}
                    message={format!("{} hisobini o'chirmoqchimisiz?", user.email)}
                    on_confirm={on_confirm_delete}
                    on_close={on_close_delete}
                    is_loading={busy.remove}
                />
            }
        </div>
    }
}
