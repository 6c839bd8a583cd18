use resources::messages::{ONLINE_AGAIN, WENT_OFFLINE};
use resources::Notice;
use wasm_bindgen::prelude::*;
use web_sys::Event;
use yew::prelude::*;

use crate::contexts::toast::use_toast;

fn browser_online() -> bool {
    web_sys::window().is_none_or(|w| w.navigator().on_line())
}

/// Tracks the browser's connectivity and announces every change.
#[hook]
pub fn use_network_status() -> bool {
    let online = use_state(browser_online);
    let toasts = use_toast();

    {
        let online = online.clone();
        use_effect_with((), move |_| {
            let window = web_sys::window();

            let listen = |went_online: bool| {
                let online = online.clone();
                let toasts = toasts.clone();
                Closure::wrap(Box::new(move |_: Event| {
                    if went_online {
                        tracing::info!("network back");
                        toasts.add(Notice::success(ONLINE_AGAIN));
                    } else {
                        tracing::warn!("network lost");
                        toasts.add(Notice::error(WENT_OFFLINE));
                    }
                    online.set(went_online);
                }) as Box<dyn FnMut(Event)>)
            };
            let on_online = listen(true);
            let on_offline = listen(false);

            if let Some(window) = &window {
                let _ = window.add_event_listener_with_callback(
                    "online",
                    on_online.as_ref().unchecked_ref(),
                );
                let _ = window.add_event_listener_with_callback(
                    "offline",
                    on_offline.as_ref().unchecked_ref(),
                );
            }

            move || {
                if let Some(window) = &window {
                    let _ = window.remove_event_listener_with_callback(
                        "online",
                        on_online.as_ref().unchecked_ref(),
                    );
                    let _ = window.remove_event_listener_with_callback(
                        "offline",
                        on_offline.as_ref().unchecked_ref(),
                    );
                }
                drop(on_online);
                drop(on_offline);
            }
        });
    }

    *online
}
