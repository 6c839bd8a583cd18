//! Light/dark appearance. The preference lives in `localStorage` under
//! [`THEME_KEY`]; "system" follows `prefers-color-scheme` and is stored as
//! the absence of the key.

use std::rc::Rc;

use resources::config::THEME_KEY;
use web_sys::window;
use yew::prelude::*;
use yewdux::prelude::*;

use crate::storage::{read_item, remove_item, write_item};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    Light,
    Dark,
    #[default]
    System,
}

impl Theme {
    const ALL: [Theme; 3] = [Theme::Light, Theme::Dark, Theme::System];

    fn key(self) -> Option<&'static str> {
        match self {
            Theme::Light => Some("light"),
            Theme::Dark => Some("dark"),
            Theme::System => None,
        }
    }

    fn label(self) -> &'static str {
        match self {
            Theme::Light => "Yorug'",
            Theme::Dark => "Tungi",
            Theme::System => "Tizim",
        }
    }

    fn stored() -> Self {
        match read_item(THEME_KEY).as_deref() {
            Some("light") => Theme::Light,
            Some("dark") => Theme::Dark,
            _ => Theme::System,
        }
    }

    fn save(self) {
        let result = match self.key() {
            Some(key) => write_item(THEME_KEY, key),
            None => remove_item(THEME_KEY),
        };
        if let Err(e) = result {
            tracing::warn!("theme preference not saved: {e}");
        }
    }

    /// Whether the page ends up dark.
    fn is_dark(self) -> bool {
        match self {
            Theme::Light => false,
            Theme::Dark => true,
            Theme::System => window()
                .and_then(|w| w.match_media("(prefers-color-scheme: dark)").ok().flatten())
                .is_some_and(|query| query.matches()),
        }
    }
}

#[derive(Default, Clone, PartialEq, Store)]
pub struct ThemeState {
    pub preference: Theme,
    pub dark: bool,
    loaded: bool,
}

fn apply(dark: bool) {
    let Some(root) = window()
        .and_then(|w| w.document())
        .and_then(|d| d.document_element())
    else {
        return;
    };
    let result = if dark {
        root.class_list().add_1("dark")
    } else {
        root.class_list().remove_1("dark")
    };
    if result.is_err() {
        tracing::debug!("could not update the document theme class");
    }
}

/// The current preference and a setter that persists and applies a new one.
/// The stored preference is picked up on first use.
#[hook]
pub fn use_theme() -> (Rc<ThemeState>, Callback<Theme>) {
    let (state, dispatch) = use_store::<ThemeState>();
    let set = use_callback(dispatch, |theme: Theme, dispatch: &Dispatch<ThemeState>| {
        theme.save();
        let dark = theme.is_dark();
        apply(dark);
        dispatch.reduce_mut(|state| {
            state.preference = theme;
            state.dark = dark;
            state.loaded = true;
        });
    });

    {
        let set = set.clone();
        let loaded = state.loaded;
        use_effect_with(loaded, move |loaded| {
            if !loaded {
                set.emit(Theme::stored());
            }
        });
    }

    (state, set)
}

/// Header button flipping between light and dark.
#[function_component]
pub fn ThemeToggle() -> Html {
    let (state, set) = use_theme();
    let dark = state.dark;
    let onclick = set.reform(move |_: MouseEvent| if dark { Theme::Light } else { Theme::Dark });
    let (icon, title) = if dark {
        ("☀️", "Yorug' rejim")
    } else {
        ("🌙", "Tungi rejim")
    };

    html! {
        <button onclick={onclick} title={title} aria-label={title}
            class="p-2 rounded-lg hover:bg-gray-200 dark:hover:bg-gray-700 transition-colors">
            <span class="text-xl">{icon}</span>
        </button>
    }
}

/// All three preferences, for the settings page.
#[function_component]
pub fn ThemePicker() -> Html {
    let (state, set) = use_theme();

    html! {
        <div class="inline-flex rounded-md border border-neutral-300 dark:border-neutral-600 overflow-hidden">
            {for Theme::ALL.into_iter().map(|theme| {
                let active = state.preference == theme;
                let onclick = set.reform(move |_: MouseEvent| theme);
                html! {
                    <button onclick={onclick} aria-pressed={active.to_string()}
                        class={if active {
                            "px-3 py-1.5 text-sm bg-blue-600 text-white"
                        } else {
                            "px-3 py-1.5 text-sm text-neutral-700 dark:text-neutral-300 hover:bg-neutral-100 dark:hover:bg-neutral-700"
                        }}>
                        {theme.label()}
                    </button>
                }
            })}
        </div>
    }
}
