use yew::prelude::*;

const APP_NAME: &str = "ProCRM";

/// `"{page} | ProCRM"` while the page is mounted.
#[hook]
pub fn use_title(page: &str) {
    let title = if page.is_empty() {
        APP_NAME.to_string()
    } else {
        format!("{page} | {APP_NAME}")
    };
    use_effect_with(title, |title| {
        let document = web_sys::window().and_then(|w| w.document());
        if let Some(document) = &document {
            document.set_title(title);
        }
    });
}
