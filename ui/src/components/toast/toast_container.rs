use yew::prelude::*;

use super::ToastItem;
use crate::contexts::toast::ToastContext;

/// Stack of live notices, newest at the bottom.
#[function_component]
pub fn ToastContainer() -> Html {
    let toasts = use_context::<ToastContext>()
        .map(|context| context.toasts.clone())
        .unwrap_or_default();

    if toasts.is_empty() {
        return Html::default();
    }

    html! {
        <div aria-live="polite" class="fixed top-4 right-4 z-50 flex flex-col gap-3 max-w-sm w-full">
            {for toasts.into_iter().map(|toast| html! {
                <ToastItem key={toast.id.to_string()} toast={toast.clone()} />
            })}
        </div>
    }
}
