use web_sys::HtmlInputElement;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct SearchInputProps {
    /// What was typed, shown as-is
    pub value: AttrValue,
    pub placeholder: AttrValue,
    pub on_input: Callback<String>,
}

#[function_component]
pub fn SearchInput(props: &SearchInputProps) -> Html {
    let oninput = props.on_input.reform(|e: InputEvent| {
        let input: HtmlInputElement = e.target_unchecked_into();
        input.value()
    });

    html! {
        <input
            type="search"
            value={props.value.clone()}
            {oninput}
            placeholder={props.placeholder.clone()}
            class="w-full sm:w-72 px-3 py-2 text-sm border border-neutral-300 dark:border-neutral-600
                   rounded-md bg-white dark:bg-neutral-700 text-neutral-900 dark:text-neutral-100
                   placeholder-neutral-400 focus:outline-none focus:ring-2 focus:ring-blue-500"
        />
    }
}
