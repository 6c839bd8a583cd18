use yew::prelude::*;

#[function_component]
pub fn Spinner() -> Html {
    html! {
        <div class="text-center py-8">
            <div class="inline-block animate-spin rounded-full h-8 w-8 border-2 border-neutral-900 dark:border-neutral-100 border-t-transparent dark:border-t-transparent"></div>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct ListStatusProps {
    pub loading: bool,
    /// Page-level load error
    #[prop_or_default]
    pub error: Option<AttrValue>,
    pub on_retry: Callback<()>,
    /// Nothing to show once loaded
    pub empty: bool,
    #[prop_or(AttrValue::from("Ma'lumot topilmadi"))]
    pub empty_text: AttrValue,
    pub children: Children,
}

/// Loading, error-with-retry and empty states around a list. Rows stay
/// visible while a refresh is running.
#[function_component]
pub fn ListStatus(props: &ListStatusProps) -> Html {
    if let Some(error) = &props.error {
        let on_retry = props.on_retry.reform(|_: MouseEvent| ());
        return html! {
            <div class="p-4 rounded-md bg-red-50 dark:bg-red-900/20 border border-red-200 dark:border-red-800 space-y-3">
                <p class="text-sm text-red-700 dark:text-red-400">{error}</p>
                <button
                    onclick={on_retry}
                    disabled={props.loading}
                    class="px-3 py-1.5 text-sm font-medium rounded-md bg-red-600 text-white hover:bg-red-700 disabled:opacity-50"
                >
                    {"Qayta urinish"}
                </button>
            </div>
        };
    }
    if props.empty {
        if props.loading {
            return html! { <Spinner /> };
        }
        return html! {
            <div class="text-center py-12">
                <p class="text-neutral-600 dark:text-neutral-400">{&props.empty_text}</p>
            </div>
        };
    }
    html! { <>{for props.children.iter()}</> }
}
