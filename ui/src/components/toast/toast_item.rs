use resources::NoticeLevel;
use yew::prelude::*;

use crate::contexts::toast::{Toast, use_toast};

#[derive(Properties, PartialEq)]
pub struct ToastItemProps {
    pub toast: Toast,
}

fn palette(level: NoticeLevel) -> (&'static str, &'static str) {
    match level {
        NoticeLevel::Error => (
            "bg-red-50 dark:bg-red-900 border-red-200 dark:border-red-800 text-red-700 dark:text-red-300",
            "✕",
        ),
        NoticeLevel::Warning => (
            "bg-amber-50 dark:bg-amber-900 border-amber-200 dark:border-amber-800 text-amber-800 dark:text-amber-300",
            "!",
        ),
        NoticeLevel::Success => (
            "bg-green-50 dark:bg-green-900 border-green-200 dark:border-green-800 text-green-700 dark:text-green-300",
            "✓",
        ),
        NoticeLevel::Info => (
            "bg-neutral-50 dark:bg-neutral-800 border-neutral-200 dark:border-neutral-700 text-neutral-700 dark:text-neutral-300",
            "ℹ",
        ),
    }
}

#[function_component]
pub fn ToastItem(props: &ToastItemProps) -> Html {
    let toasts = use_toast();
    let Toast { id, notice } = &props.toast;
    let (colors, icon) = palette(notice.level);
    let role = if notice.level == NoticeLevel::Error { "alert" } else { "status" };

    let on_close = {
        let id = *id;
        Callback::from(move |_: MouseEvent| toasts.dismiss(id))
    };

    html! {
        <div role={role} class={format!("flex items-start gap-3 p-4 rounded-lg border shadow-lg {colors}")}>
            <span class="text-sm font-medium">{icon}</span>
            <p class="flex-1 min-w-0 text-sm font-medium leading-5">{&notice.message}</p>
            <button onclick={on_close} title="Yopish"
                class="text-lg leading-none text-neutral-400 hover:text-neutral-600 dark:hover:text-neutral-200">
                {"×"}
            </button>
        </div>
    }
}
