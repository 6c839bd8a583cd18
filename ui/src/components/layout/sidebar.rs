use resources::navigation::{SETTINGS, links_for};
use resources::NavLink;
use yew::prelude::*;
use yew_router::prelude::*;

use crate::Route;
use crate::contexts::session::use_session;

fn is_active(link: &NavLink, current: &str) -> bool {
    if link.path == "/" {
        current == "/"
    } else {
        current.starts_with(link.path)
    }
}

/// Navigation for the signed-in role.
#[function_component]
pub fn Sidebar() -> Html {
    let role = use_session().role();
    let current = use_route::<Route>()
        .map(|route| route.to_path())
        .unwrap_or_default();

    let links = role.map(links_for).unwrap_or_default();
    let entry = |link: &NavLink| {
        let class = if is_active(link, &current) {
            "block px-3 py-2 rounded-md text-sm font-medium bg-blue-600 text-white"
        } else {
            "block px-3 py-2 rounded-md text-sm font-medium text-gray-300 hover:bg-gray-700 hover:text-white"
        };
        html! {
            <li key={link.path}>
                <Link<Route> to={Route::from_path(link.path)} classes={class}>
                    {link.label}
                </Link<Route>>
            </li>
        }
    };

    html! {
        <aside class="hidden md:flex md:flex-col w-64 bg-gray-900 text-white">
            <div class="h-16 flex items-center px-6 text-xl font-semibold">{"ProCRM"}</div>
            <nav class="flex-1 px-3 py-4">
                <ul class="space-y-1">
                    {for links.iter().map(entry)}
                </ul>
            </nav>
            <ul class="px-3 py-4 border-t border-gray-800">
                {entry(&SETTINGS)}
            </ul>
        </aside>
    }
}
