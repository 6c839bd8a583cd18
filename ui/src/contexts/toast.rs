//! On-screen notices. Anything that produces a [`Notice`] can show it here,
//! including the resource stores through [`Notifier`].

use std::rc::Rc;

use resources::{Notice, NoticeLevel, Notifier};
use uuid::Uuid;
use yew::prelude::*;

/// At most this many notices stay stacked; the oldest is dropped first.
const MAX_VISIBLE: usize = 5;

fn lifetime_ms(level: NoticeLevel) -> u32 {
    match level {
        NoticeLevel::Error | NoticeLevel::Warning => 6000,
        NoticeLevel::Success | NoticeLevel::Info => 4000,
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub id: Uuid,
    pub notice: Notice,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ToastState {
    /// Oldest first.
    pub toasts: Vec<Toast>,
}

pub enum ToastAction {
    Show(Toast),
    Dismiss(Uuid),
}

impl Reducible for ToastState {
    type Action = ToastAction;

    fn reduce(self: Rc<Self>, action: ToastAction) -> Rc<Self> {
        let toasts = match action {
            ToastAction::Show(toast) => {
                let skip = (self.toasts.len() + 1).saturating_sub(MAX_VISIBLE);
                self.toasts
                    .iter()
                    .skip(skip)
                    .cloned()
                    .chain(std::iter::once(toast))
                    .collect()
            }
            ToastAction::Dismiss(id) => {
                if !self.toasts.iter().any(|toast| toast.id == id) {
                    return self;
                }
                self.toasts.iter().filter(|t| t.id != id).cloned().collect()
            }
        };
        Rc::new(ToastState { toasts })
    }
}

pub type ToastContext = UseReducerHandle<ToastState>;

#[derive(Properties, PartialEq)]
pub struct ToastProviderProps {
    pub children: Children,
}

#[function_component]
pub fn ToastProvider(props: &ToastProviderProps) -> Html {
    let state = use_reducer(ToastState::default);

    html! {
        <ContextProvider<ToastContext> context={state}>
            {props.children.clone()}
        </ContextProvider<ToastContext>>
    }
}

#[derive(Clone)]
pub struct ToastHandle {
    context: ToastContext,
}

impl ToastHandle {
    /// Show `notice` and dismiss it once its lifetime is over.
    pub fn add(&self, notice: Notice) {
        let id = Uuid::new_v4();
        let lifetime = lifetime_ms(notice.level);
        self.context.dispatch(ToastAction::Show(Toast { id, notice }));

        let context = self.context.clone();
        yew::platform::spawn_local(async move {
            gloo_timers::future::TimeoutFuture::new(lifetime).await;
            context.dispatch(ToastAction::Dismiss(id));
        });
    }

    pub fn error(&self, message: impl Into<String>) {
        self.add(Notice::error(message));
    }

    pub fn dismiss(&self, id: Uuid) {
        self.context.dispatch(ToastAction::Dismiss(id));
    }
}

impl Notifier for ToastHandle {
    fn notify(&self, notice: Notice) {
        self.add(notice);
    }
}

#[hook]
pub fn use_toast() -> ToastHandle {
    let context = use_context::<ToastContext>()
        .expect("use_toast must be used within a ToastProvider");
    ToastHandle { context }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn toast(message: &str) -> Toast {
        Toast {
            id: Uuid::new_v4(),
            notice: Notice::info(message),
        }
    }

    fn messages(state: &ToastState) -> Vec<&str> {
        state.toasts.iter().map(|t| t.notice.message.as_str()).collect()
    }

    #[test]
    fn keeps_arrival_order_and_drops_the_oldest() {
        let mut state = Rc::new(ToastState::default());
        for n in 0..=MAX_VISIBLE {
            state = state.reduce(ToastAction::Show(toast(&n.to_string())));
        }
        assert_eq!(messages(&state), ["1", "2", "3", "4", "5"]);
    }

    #[test]
    fn dismissing_an_unknown_toast_changes_nothing() {
        let state = Rc::new(ToastState::default()).reduce(ToastAction::Show(toast("a")));
        let same = state.clone().reduce(ToastAction::Dismiss(Uuid::new_v4()));
        assert!(Rc::ptr_eq(&state, &same));

        let id = state.toasts[0].id;
        assert!(state.reduce(ToastAction::Dismiss(id)).toasts.is_empty());
    }
}
