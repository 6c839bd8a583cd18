use yew::prelude::*;

use crate::hooks::use_network_status;

#[derive(Properties, PartialEq)]
pub struct NetworkBoundaryProps {
    pub children: Children,
}

/// Shows a banner while the browser is offline.
#[function_component]
pub fn NetworkBoundary(props: &NetworkBoundaryProps) -> Html {
    let online = use_network_status();

    html! {
        <>
            if !online {
                <div class="fixed bottom-0 inset-x-0 z-40 bg-amber-500 text-white text-sm text-center py-2">
                    {"Internet aloqasi yo'q. Ma'lumotlar yangilanmasligi mumkin."}
                </div>
            }
            {for props.children.iter()}
        </>
    }
}
