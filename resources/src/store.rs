//! One store per page and resource family.
//!
//! Creates and edits are pessimistic: the list only changes once the server
//! confirms. Deletes and status toggles are optimistic: the list changes at
//! once and is rolled back when the request fails.

use std::cell::{Ref, RefCell};
use std::fmt::Debug;
use std::future::Future;
use std::hash::Hash;
use std::rc::Rc;
use std::time::Duration;

use payloads::{ClientError, Operation, ResourceKind};

use crate::debounce::{Debouncer, debounced};
use crate::list_state::{BusyFlags, ListState, OpKind};
use crate::messages::{self, Notice, Notifier};

/// A record with a stable identity.
pub trait Record: Clone + PartialEq + Debug + 'static {
    type Id: Copy + Eq + Hash + Debug + 'static;

    fn id(&self) -> Self::Id;
}

/// A record carrying an active/inactive flag.
pub trait Toggleable {
    fn toggle(&mut self);
}

/// Where the search term is applied, and after how long a pause.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchStrategy {
    /// Filter the loaded collection in memory.
    Local(Duration),
    /// Re-fetch with the term as a query parameter.
    Remote(Duration),
}

impl SearchStrategy {
    pub fn interval(&self) -> Duration {
        match self {
            SearchStrategy::Local(interval) | SearchStrategy::Remote(interval) => {
                *interval
            }
        }
    }
}

/// The remote half of a resource family.
#[allow(async_fn_in_trait)]
pub trait ResourceApi {
    type Record: Record;
    type Query: Clone + Default + Debug;
    type Create;
    type Update;

    fn kind(&self) -> ResourceKind;

    fn search(&self) -> SearchStrategy;

    async fn list(
        &self,
        query: &Self::Query,
    ) -> Result<Vec<Self::Record>, ClientError>;

    /// `Ok(None)` when the server confirmed without echoing the record.
    async fn create(
        &self,
        payload: &Self::Create,
    ) -> Result<Option<Self::Record>, ClientError>;

    async fn update(
        &self,
        id: <Self::Record as Record>::Id,
        payload: &Self::Update,
    ) -> Result<Option<Self::Record>, ClientError>;

    async fn delete(
        &self,
        id: <Self::Record as Record>::Id,
    ) -> Result<(), ClientError>;

    /// The record as it looks after a confirmed update that returned no
    /// body.
    fn merge(existing: &Self::Record, payload: &Self::Update) -> Self::Record;

    /// Query for a settled search term. `None` keeps the search local.
    fn query_for_search(
        &self,
        _term: &str,
        _current: &Self::Query,
    ) -> Option<Self::Query> {
        None
    }

    /// Name used in the creation notice.
    fn label(_payload: &Self::Create) -> Option<String> {
        None
    }
}

/// Families whose records can be flipped active/inactive server-side.
#[allow(async_fn_in_trait)]
pub trait StatusToggle: ResourceApi
where
    Self::Record: Toggleable,
{
    async fn toggle_status(
        &self,
        id: <Self::Record as Record>::Id,
    ) -> Result<(), ClientError>;
}

type Id<A> = <<A as ResourceApi>::Record as Record>::Id;

/// List state plus the operations that mutate it.
///
/// Shared as `Rc<ResourceStore<_>>` between the page and the tasks it
/// spawns. Borrows of the inner state never span an await point.
pub struct ResourceStore<A: ResourceApi> {
    api: A,
    state: RefCell<ListState<A::Record>>,
    last_query: RefCell<A::Query>,
    debouncer: RefCell<Debouncer<String>>,
    notifier: Rc<dyn Notifier>,
    listener: RefCell<Option<Rc<dyn Fn()>>>,
}

impl<A: ResourceApi> ResourceStore<A> {
    pub fn new(api: A, notifier: Rc<dyn Notifier>) -> Self {
        Self {
            api,
            state: RefCell::new(ListState::new()),
            last_query: RefCell::new(A::Query::default()),
            debouncer: RefCell::new(Debouncer::new()),
            notifier,
            listener: RefCell::new(None),
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    /// Called after every observable change.
    pub fn subscribe(&self, listener: impl Fn() + 'static) {
        *self.listener.borrow_mut() = Some(Rc::new(listener));
    }

    fn changed(&self) {
        let listener = self.listener.borrow().clone();
        if let Some(listener) = listener {
            listener();
        }
    }

    fn notify(&self, notice: Notice) {
        self.notifier.notify(notice);
    }

    pub fn state(&self) -> Ref<'_, ListState<A::Record>> {
        self.state.borrow()
    }

    pub fn items(&self) -> Vec<A::Record> {
        self.state.borrow().items().to_vec()
    }

    pub fn get(&self, id: Id<A>) -> Option<A::Record> {
        self.state.borrow().get(id).cloned()
    }

    pub fn busy(&self) -> BusyFlags {
        self.state.borrow().busy()
    }

    pub fn last_error(&self) -> Option<String> {
        self.state.borrow().last_error().map(str::to_string)
    }

    pub fn clear_error(&self) {
        self.state.borrow_mut().clear_error();
        self.changed();
    }

    pub fn last_query(&self) -> A::Query {
        self.last_query.borrow().clone()
    }

    /// Load the collection for `query`. Only the newest refresh is applied;
    /// a missing credential is silently ignored.
    pub async fn refresh(&self, query: A::Query) {
        *self.last_query.borrow_mut() = query.clone();
        let ticket = self.state.borrow_mut().begin(OpKind::Get, None);
        self.changed();

        let result = self.api.list(&query).await;

        let current = self.state.borrow_mut().finish(&ticket);
        if !current {
            tracing::debug!(kind = ?self.api.kind(), "discarding stale list response");
            self.changed();
            return;
        }
        match result {
            Ok(items) => {
                let mut state = self.state.borrow_mut();
                state.replace_all(items);
                state.clear_error();
            }
            Err(ClientError::NoCredential) => {}
            Err(error) => {
                let message = messages::load_error(&error);
                self.state.borrow_mut().set_error(message.clone());
                self.notify(Notice::error(message));
            }
        }
        self.changed();
    }

    /// Re-run the last refresh.
    pub async fn retry(&self) {
        self.refresh(self.last_query()).await;
    }

    /// Record a keystroke and, after `pause` completes with no newer
    /// keystroke, publish the term. Remote families re-fetch with it.
    pub async fn search<F>(&self, raw: impl Into<String>, pause: F)
    where
        F: Future<Output = ()>,
    {
        let raw = raw.into();
        self.state.borrow_mut().set_search_raw(raw.clone());
        self.changed();

        let Some(term) = debounced(&self.debouncer, raw, pause).await else {
            return;
        };
        self.state.borrow_mut().set_search_debounced(term.clone());
        let query = self.api.query_for_search(&term, &self.last_query.borrow());
        match query {
            Some(query) => self.refresh(query).await,
            None => self.changed(),
        }
    }

    /// Create a record; it is prepended once confirmed. When the server
    /// confirms without echoing it, the list is reloaded instead.
    pub async fn add(&self, payload: A::Create) -> Option<A::Record> {
        let ticket = self.state.borrow_mut().begin(OpKind::Add, None);
        self.changed();

        let result = self.api.create(&payload).await;
        self.state.borrow_mut().finish(&ticket);

        let kind = self.api.kind();
        match result {
            Ok(record) => {
                let label = A::label(&payload);
                self.notify(messages::write_success(
                    kind,
                    Operation::Create,
                    label.as_deref(),
                ));
                match record {
                    Some(record) => {
                        self.state.borrow_mut().prepend(record.clone());
                        self.changed();
                        Some(record)
                    }
                    None => {
                        self.changed();
                        self.retry().await;
                        None
                    }
                }
            }
            Err(error) => {
                self.write_failed(Operation::Create, &error);
                None
            }
        }
    }

    /// Update a record in place once confirmed. A confirmation that was
    /// overtaken by a newer edit of the same record is not applied.
    pub async fn edit(&self, id: Id<A>, payload: A::Update) -> Option<A::Record> {
        let ticket = self.state.borrow_mut().begin(OpKind::Edit, Some(id));
        self.changed();

        let result = self.api.update(id, &payload).await;
        let current = self.state.borrow_mut().finish(&ticket);

        match result {
            Ok(returned) => {
                self.notify(messages::write_success(
                    self.api.kind(),
                    Operation::Update,
                    None,
                ));
                if !current {
                    tracing::debug!(?id, "discarding stale edit response");
                    self.changed();
                    return None;
                }
                let record = {
                    let mut state = self.state.borrow_mut();
                    let record = returned
                        .or_else(|| state.get(id).map(|existing| A::merge(existing, &payload)));
                    if let Some(record) = &record {
                        state.replace(record.clone());
                    }
                    record
                };
                self.changed();
                record
            }
            Err(error) => {
                self.write_failed(Operation::Update, &error);
                None
            }
        }
    }

    /// Delete a record, removing it from the list straight away.
    ///
    /// On failure the list is put back as it was. If it changed meanwhile,
    /// a listing that landed in between is kept as is; otherwise the record
    /// goes back where it was.
    pub async fn remove(&self, id: Id<A>) -> bool {
        let (ticket, snapshot, mark, removed) = {
            let mut state = self.state.borrow_mut();
            let ticket = state.begin(OpKind::Remove, Some(id));
            let snapshot = state.items().to_vec();
            let removed = state.remove(id);
            (ticket, snapshot, Mark::of(&state), removed)
        };
        self.changed();

        let result = self.api.delete(id).await;
        self.state.borrow_mut().finish(&ticket);

        match result {
            Ok(()) => {
                self.notify(messages::write_success(
                    self.api.kind(),
                    Operation::Delete,
                    None,
                ));
                self.changed();
                true
            }
            Err(error) => {
                {
                    let mut state = self.state.borrow_mut();
                    match mark.compare(&state) {
                        Drift::None => state.restore(snapshot),
                        Drift::Reloaded => {
                            tracing::debug!(?id, "list reloaded during delete, keeping it");
                        }
                        Drift::Edited => {
                            if let Some((index, item)) = removed
                                && !state.contains(id)
                            {
                                tracing::debug!(?id, "list changed during delete, re-inserting");
                                state.insert_at(index, item);
                            }
                        }
                    }
                }
                tracing::debug!(?id, "delete failed, rolled back");
                self.write_failed(Operation::Delete, &error);
                false
            }
        }
    }

    fn write_failed(&self, operation: Operation, error: &ClientError) {
        self.notify(messages::write_error(self.api.kind(), operation, error));
        self.changed();
    }
}

impl<A> ResourceStore<A>
where
    A: StatusToggle,
    A::Record: Toggleable,
{
    /// Flip a record's status, updating the list straight away.
    ///
    /// On failure the flip is undone only while the record still looks the
    /// way the flip left it. A listing or edit that landed in between wins.
    pub async fn toggle_status(&self, id: Id<A>) -> bool {
        let (ticket, snapshot, mark, flipped) = {
            let mut state = self.state.borrow_mut();
            let ticket = state.begin(OpKind::Toggle, Some(id));
            let snapshot = state.items().to_vec();
            state.update(id, |record| record.toggle());
            let flipped = state.get(id).cloned();
            (ticket, snapshot, Mark::of(&state), flipped)
        };
        self.changed();

        let result = self.api.toggle_status(id).await;
        self.state.borrow_mut().finish(&ticket);

        match result {
            Ok(()) => {
                self.notify(messages::write_success(
                    self.api.kind(),
                    Operation::ToggleStatus,
                    None,
                ));
                self.changed();
                true
            }
            Err(error) => {
                {
                    let mut state = self.state.borrow_mut();
                    match mark.compare(&state) {
                        Drift::None => state.restore(snapshot),
                        Drift::Reloaded => {
                            tracing::debug!(?id, "list reloaded during toggle, keeping it");
                        }
                        Drift::Edited => {
                            if flipped.is_some() && state.get(id) == flipped.as_ref() {
                                tracing::debug!(?id, "list changed during toggle, flipping back");
                                state.update(id, |record| record.toggle());
                            }
                        }
                    }
                }
                self.write_failed(Operation::ToggleStatus, &error);
                false
            }
        }
    }
}

/// How the list looked right after an optimistic change.
#[derive(Debug, Clone, Copy)]
struct Mark {
    revision: u64,
    loads: u64,
}

/// What happened to the list since a `Mark` was taken.
enum Drift {
    None,
    Reloaded,
    Edited,
}

impl Mark {
    fn of<T: Record>(state: &ListState<T>) -> Self {
        Self {
            revision: state.revision(),
            loads: state.loads(),
        }
    }

    fn compare<T: Record>(&self, state: &ListState<T>) -> Drift {
        if state.loads() != self.loads {
            Drift::Reloaded
        } else if state.revision() != self.revision {
            Drift::Edited
        } else {
            Drift::None
        }
    }
}
