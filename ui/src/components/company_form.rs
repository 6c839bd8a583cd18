use payloads::CompanyRecord;
use payloads::requests::{CompanyForm, LogoUpload};
use resources::validation::{self, CompanyInput};
use web_sys::{HtmlInputElement, HtmlTextAreaElement};
use yew::prelude::*;

use crate::contexts::toast::use_toast;
use crate::utils::read_logo;

#[derive(Clone, PartialEq)]
pub enum CompanyFormMode {
    Create,
    Edit(CompanyRecord),
}

#[derive(Properties, PartialEq)]
pub struct CompanyFormModalProps {
    pub mode: CompanyFormMode,
    #[prop_or_default]
    pub busy: bool,
    pub on_submit: Callback<CompanyForm>,
    pub on_close: Callback<()>,
}

fn initial_input(mode: &CompanyFormMode) -> CompanyInput {
    match mode {
        CompanyFormMode::Create => CompanyInput::default(),
        CompanyFormMode::Edit(company) => CompanyInput {
            name: company.name.clone(),
            manager_name: company.manager_name.clone(),
            phone_number: company.phone_number.clone(),
            description: company.description.clone(),
            logo: LogoUpload::Keep,
        },
    }
}

/// Create or edit a company. Submits only a validated form.
#[function_component]
pub fn CompanyFormModal(props: &CompanyFormModalProps) -> Html {
    let toasts = use_toast();
    let input = use_state(|| initial_input(&props.mode));
    let has_logo = matches!(&props.mode, CompanyFormMode::Edit(c) if c.logo.is_some());

    let text_field = |apply: fn(&mut CompanyInput, String)| {
        let input = input.clone();
        Callback::from(move |e: InputEvent| {
            let value = e.target_unchecked_into::<HtmlInputElement>().value();
            let mut next = (*input).clone();
            apply(&mut next, value);
            input.set(next);
        })
    };

    let on_description = {
        let input = input.clone();
        Callback::from(move |e: InputEvent| {
            let value = e.target_unchecked_into::<HtmlTextAreaElement>().value();
            input.set(CompanyInput {
                description: value,
                ..(*input).clone()
            });
        })
    };

    let on_file = {
        let input = input.clone();
        let toasts = toasts.clone();
        Callback::from(move |e: Event| {
            let element: HtmlInputElement = e.target_unchecked_into();
            let Some(file) = element.files().and_then(|files| files.get(0)) else {
                return;
            };
            let input = input.clone();
            let toasts = toasts.clone();
            yew::platform::spawn_local(async move {
                match read_logo(file).await {
                    Ok(logo) => input.set(CompanyInput {
                        logo,
                        ..(*input).clone()
                    }),
                    Err(e) => {
                        tracing::warn!("could not read logo: {e:?}");
                        toasts.error("Rasmni o'qib bo'lmadi!");
                    }
                }
            });
        })
    };

    let on_remove_logo = {
        let input = input.clone();
        Callback::from(move |e: Event| {
            let checked = e.target_unchecked_into::<HtmlInputElement>().checked();
            input.set(CompanyInput {
                logo: if checked { LogoUpload::Remove } else { LogoUpload::Keep },
                ..(*input).clone()
            });
        })
    };

    let on_submit = {
        let input = input.clone();
        let mode = props.mode.clone();
        let on_submit = props.on_submit.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let checked = match &mode {
                CompanyFormMode::Create => validation::new_company((*input).clone()),
                CompanyFormMode::Edit(_) => validation::edited_company((*input).clone()),
            };
            match checked {
                Ok(form) => on_submit.emit(form),
                Err(e) => toasts.add(e.notice()),
            }
        })
    };

    let on_cancel = props.on_close.reform(|_: MouseEvent| ());
    let title = match props.mode {
        CompanyFormMode::Create => "Yangi kompaniya",
        CompanyFormMode::Edit(_) => "Kompaniyani tahrirlash",
    };
    let field_class = "w-full px-3 py-2 text-sm border border-neutral-300 dark:border-neutral-600 rounded-md bg-white dark:bg-neutral-700 text-neutral-900 dark:text-neutral-100 focus:outline-none focus:ring-2 focus:ring-blue-500";
    let label_class = "block text-sm font-medium text-neutral-700 dark:text-neutral-300 mb-1";

    html! {
        <div class="fixed inset-0 bg-neutral-900/50 z-50 flex items-center justify-center p-4">
            <form
                onsubmit={on_submit}
                class="bg-white dark:bg-neutral-800 rounded-lg shadow-xl max-w-lg w-full p-6 space-y-4"
            >
                <h3 class="text-lg font-semibold text-neutral-900 dark:text-neutral-100">{title}</h3>

                <div>
                    <label class={label_class}>{"Kompaniya nomi *"}</label>
                    <input class={field_class} value={input.name.clone()}
                        oninput={text_field(|i, v| i.name = v)} />
                </div>
                <div>
                    <label class={label_class}>{"Rahbar ismi *"}</label>
                    <input class={field_class} value={input.manager_name.clone()}
                        oninput={text_field(|i, v| i.manager_name = v)} />
                </div>
                <div>
                    <label class={label_class}>{"Telefon raqami *"}</label>
                    <input type="tel" class={field_class} value={input.phone_number.clone()}
                        oninput={text_field(|i, v| i.phone_number = v)} />
                </div>
                <div>
                    <label class={label_class}>{"Tavsif"}</label>
                    <textarea class={field_class} rows="3" value={input.description.clone()}
                        oninput={on_description} />
                </div>
                <div>
                    <label class={label_class}>{"Logotip (2MB gacha)"}</label>
                    <input type="file" accept="image/*" onchange={on_file}
                        class="block w-full text-sm text-neutral-600 dark:text-neutral-300" />
                    if has_logo {
                        <label class="mt-2 flex items-center gap-2 text-sm text-neutral-600 dark:text-neutral-400">
                            <input type="checkbox"
                                checked={input.logo == LogoUpload::Remove}
                                onchange={on_remove_logo} />
                            {"Logotipni o'chirish"}
                        </label>
                    }
                </div>

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
