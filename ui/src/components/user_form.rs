use payloads::requests::{NewManagedUser, UpdateManagedUser};
use payloads::{CompanyId, CompanyRecord, ManagedUserRecord, UserFamily};
use resources::validation::{self, UserInput};
use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::prelude::*;

use crate::contexts::session::use_session;
use crate::contexts::toast::use_toast;

#[derive(Clone, PartialEq)]
pub enum UserFormMode {
    Create,
    Edit(ManagedUserRecord),
}

#[derive(Properties, PartialEq)]
pub struct UserFormModalProps {
    pub mode: UserFormMode,
    pub family: UserFamily,
    /// Offered in the company picker; empty hides it.
    #[prop_or_default]
    pub companies: Vec<CompanyRecord>,
    #[prop_or_default]
    pub busy: bool,
    pub on_create: Callback<NewManagedUser>,
    pub on_edit: Callback<UpdateManagedUser>,
    pub on_close: Callback<()>,
}

pub fn family_title(family: UserFamily) -> &'static str {
    match family {
        UserFamily::Rop => "Boshqaruvchi",
        UserFamily::SalesManager => "Sotuv operatori",
    }
}

/// Create an account (email, password twice, company) or edit its email.
#[function_component]
pub fn UserFormModal(props: &UserFormModalProps) -> Html {
    let session = use_session();
    let toasts = use_toast();
    let input = use_state(|| match &props.mode {
        UserFormMode::Create => UserInput::default(),
        UserFormMode::Edit(user) => UserInput {
            email: user.email.clone(),
            company_id: user.company_id,
            ..UserInput::default()
        },
    });
    let creating = props.mode == UserFormMode::Create;

    let text_field = |apply: fn(&mut UserInput, String)| {
        let input = input.clone();
        Callback::from(move |e: InputEvent| {
            let value = e.target_unchecked_into::<HtmlInputElement>().value();
            let mut next = (*input).clone();
            apply(&mut next, value);
            input.set(next);
        })
    };

    let on_company = {
        let input = input.clone();
        Callback::from(move |e: Event| {
            let value = e.target_unchecked_into::<HtmlSelectElement>().value();
            input.set(UserInput {
                company_id: value.parse().ok().map(CompanyId),
                ..(*input).clone()
            });
        })
    };

    let on_submit = {
        let input = input.clone();
        let on_create = props.on_create.clone();
        let on_edit = props.on_edit.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let result = if creating {
                validation::new_user(&input, &session.session()).map(|user| on_create.emit(user))
            } else {
                validation::edited_user(&input).map(|user| on_edit.emit(user))
            };
            if let Err(e) = result {
                toasts.add(e.notice());
            }
        })
    };

    let on_cancel = props.on_close.reform(|_: MouseEvent| ());
    let title = if creating {
        format!("Yangi {}", family_title(props.family).to_lowercase())
    } else {
        format!("{}ni tahrirlash", family_title(props.family))
    };
    let field_class = "w-full px-3 py-2 text-sm border border-neutral-300 dark:border-neutral-600 rounded-md bg-white dark:bg-neutral-700 text-neutral-900 dark:text-neutral-100 focus:outline-none focus:ring-2 focus:ring-blue-500";
    let label_class = "block text-sm font-medium text-neutral-700 dark:text-neutral-300 mb-1";
    let selected = input.company_id.map(|id| id.to_string()).unwrap_or_default();

    html! {
        <div class="fixed inset-0 bg-neutral-900/50 z-50 flex items-center justify-center p-4">
            <form
                onsubmit={on_submit}
                class="bg-white dark:bg-neutral-800 rounded-lg shadow-xl max-w-md w-full p-6 space-y-4"
            >
                <h3 class="text-lg font-semibold text-neutral-900 dark:text-neutral-100">{title}</h3>

                <div>
                    <label class={label_class}>{"Email *"}</label>
                    <input type="email" class={field_class} value={input.email.clone()}
                        oninput={text_field(|i, v| i.email = v)} />
                </div>

                if creating {
                    <div>
                        <label class={label_class}>{"Parol *"}</label>
                        <input type="password" class={field_class} value={input.password.clone()}
                            oninput={text_field(|i, v| i.password = v)} />
                    </div>
                    <div>
                        <label class={label_class}>{"Parolni tasdiqlang *"}</label>
                        <input type="password" class={field_class}
                            value={input.confirm_password.clone()}
                            oninput={text_field(|i, v| i.confirm_password = v)} />
                    </div>
                    if !props.companies.is_empty() {
                        <div>
                            <label class={label_class}>{"Kompaniya *"}</label>
                            <select class={field_class} onchange={on_company}>
                                <option value="" selected={selected.is_empty()}>
                                    {"Kompaniyani tanlang"}
                                </option>
                                {for props.companies.iter().map(|company| {
                                    let id = company.id.to_string();
                                    html! {
                                        <option key={id.clone()} value={id.clone()} selected={id == selected}>
                                            {&company.name}
                                        </option>
                                    }
                                })}
                            </select>
                        </div>
                    }
                }

                <div class="flex justify-end gap-3 pt-2">
                    <button type="button" onclick={on_cancel} disabled={props.busy}
                        class="px-4 py-2 text-sm font-medium rounded-md border border-neutral-300 dark:border-neutral-600 text-neutral-700 dark:text-neutral-300 hover:bg-neutral-50 dark:hover:bg-neutral-700 disabled:opacity-50">
                        {"Bekor qilish"}
                    </button>
                    <button type="submit" disabled={props.busy}
                        class="px-4 py-2 text-sm font-medium rounded-md text-white bg-blue-600 hover:bg-blue-700 disabled:opacity-50">
                        {if props.busy { "Saqlanmoqda..." } else { "Saqlash" }}
                    </button>
                </div>
            </form>
        </div>
    }
}
