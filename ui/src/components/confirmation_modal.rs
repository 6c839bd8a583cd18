use yew::prelude::*;

/// Asks before a destructive action. Clicking outside the dialog or pressing
/// Escape cancels, except while the action is running.
#[derive(Properties, PartialEq)]
pub struct ConfirmationModalProps {
    pub title: AttrValue,
    pub message: AttrValue,
    #[prop_or(AttrValue::from("O'chirish"))]
    pub confirm_text: AttrValue,
    pub on_confirm: Callback<()>,
    pub on_close: Callback<()>,
    #[prop_or_default]
    pub is_loading: bool,
}

#[function_component]
pub fn ConfirmationModal(props: &ConfirmationModalProps) -> Html {
    let busy = props.is_loading;

    // Only clicks on the backdrop itself, not bubbled ones from the dialog.
    let on_backdrop = props.on_close.filter_reform(move |e: MouseEvent| {
        let outside = e.target().is_some() && e.target() == e.current_target();
        (outside && !busy).then_some(())
    });
    let on_key = props.on_close.filter_reform(move |e: KeyboardEvent| {
        (e.key() == "Escape" && !busy).then_some(())
    });
    let on_backdrop = Callback::from(move |e: MouseEvent| {
        on_backdrop.emit(e);
    });
    let on_key = Callback::from(move |e: KeyboardEvent| {
        on_key.emit(e);
    });
    let on_cancel = props.on_close.reform(|_: MouseEvent| ());
    let on_confirm = props.on_confirm.reform(|_: MouseEvent| ());

    let confirm_label = if busy {
        AttrValue::from("Kuting...")
    } else {
        props.confirm_text.clone()
    };

    html! {
        <div onclick={on_backdrop} onkeydown={on_key} tabindex="-1"
            class="fixed inset-0 bg-neutral-900/50 z-50 flex items-center justify-center p-4">
            <div role="alertdialog" aria-modal="true"
                class="bg-white dark:bg-neutral-800 rounded-lg shadow-xl max-w-md w-full p-6 space-y-4">
                <h3 class="text-lg font-semibold text-neutral-900 dark:text-neutral-100">{&props.title}</h3>
                <p class="text-sm text-neutral-600 dark:text-neutral-400">{&props.message}</p>
                <div class="flex justify-end gap-3 pt-2">
                    <button onclick={on_cancel} disabled={busy}
                        class="px-4 py-2 text-sm font-medium rounded-md border border-neutral-300 dark:border-neutral-600 text-neutral-700 dark:text-neutral-300 hover:bg-neutral-50 dark:hover:bg-neutral-700 disabled:opacity-50">
                        {"Bekor qilish"}
                    </button>
                    <button onclick={on_confirm} disabled={busy}
                        class="px-4 py-2 text-sm font-medium rounded-md text-white bg-red-600 hover:bg-red-700 disabled:opacity-50">
                        {confirm_label}
                    </button>
                </div>
            </div>
        </div>
    }
}
