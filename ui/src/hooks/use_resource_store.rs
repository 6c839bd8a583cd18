use std::future::Future;
use std::rc::Rc;

use payloads::APIClient;
use resources::{ResourceApi, ResourceStore};
use yew::prelude::*;

use crate::contexts::session::{session_service, use_session};
use crate::contexts::toast::use_toast;

/// A [`ResourceStore`] owned by the calling component, rebuilt when the
/// session changes. Every state change re-renders the component; failures
/// surface as toasts.
#[hook]
pub fn use_resource_store<A, F>(make: F) -> Rc<ResourceStore<A>>
where
    A: ResourceApi + 'static,
    F: FnOnce(Rc<APIClient>) -> A + 'static,
{
    let session = use_session().session();
    let toasts = use_toast();
    let update = use_force_update();

    use_memo(session, move |session| {
        let client = session_service().client(&crate::api_address(), session);
        let store = ResourceStore::new(make(Rc::new(client)), Rc::new(toasts));
        store.subscribe(move || update.force_update());
        store
    })
}

/// Run a store operation in the background.
pub fn spawn_with<A, Fut>(
    store: &Rc<ResourceStore<A>>,
    operation: impl FnOnce(Rc<ResourceStore<A>>) -> Fut,
) where
    A: ResourceApi + 'static,
    Fut: Future<Output = ()> + 'static,
{
    yew::platform::spawn_local(operation(store.clone()));
}
