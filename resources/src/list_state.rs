use std::collections::HashMap;

use crate::store::Record;

/// Operation kinds that carry their own busy flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OpKind {
    Get,
    Add,
    Edit,
    Remove,
    /// Status flip. Raises the `edit` flag but is sequenced on its own.
    Toggle,
}

impl OpKind {
    fn index(self) -> usize {
        match self {
            OpKind::Get => 0,
            OpKind::Add => 1,
            OpKind::Edit | OpKind::Toggle => 2,
            OpKind::Remove => 3,
        }
    }
}

/// Independent in-flight indicators. Unrelated operations never block each
/// other's controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BusyFlags {
    pub get: bool,
    pub add: bool,
    pub edit: bool,
    pub remove: bool,
}

impl BusyFlags {
    pub fn is_busy(&self, kind: OpKind) -> bool {
        match kind {
            OpKind::Get => self.get,
            OpKind::Add => self.add,
            OpKind::Edit | OpKind::Toggle => self.edit,
            OpKind::Remove => self.remove,
        }
    }
}

/// What a generation counter is tracking: the whole collection for one
/// kind of request, or one entity for one kind of write.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum Slot<Id> {
    Collection(OpKind),
    Entity(OpKind, Id),
}

/// Proof that a request was started. Compare it against the list state when
/// the response arrives to find out whether a newer request superseded it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ticket<Id> {
    kind: OpKind,
    slot: Slot<Id>,
    generation: u64,
}

/// Local copy of one resource family's collection.
///
/// Items are kept in server order; creations are prepended.
#[derive(Debug, Clone)]
pub struct ListState<T: Record> {
    items: Vec<T>,
    search_raw: String,
    search_debounced: String,
    last_error: Option<String>,
    in_flight: [usize; 4],
    /// Latest generation per slot with a request still outstanding.
    generations: HashMap<Slot<T::Id>, u64>,
    /// Shared by all slots so a released slot never reissues a number.
    next_generation: u64,
    /// Bumped on every change to `items`.
    revision: u64,
    /// Bumped each time a server listing replaces `items`.
    loads: u64,
}

impl<T: Record> Default for ListState<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            search_raw: String::new(),
            search_debounced: String::new(),
            last_error: None,
            in_flight: [0; 4],
            generations: HashMap::new(),
            next_generation: 0,
            revision: 0,
            loads: 0,
        }
    }
}

impl<T: Record> ListState<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, id: T::Id) -> Option<&T> {
        self.items.iter().find(|item| item.id() == id)
    }

    pub fn contains(&self, id: T::Id) -> bool {
        self.get(id).is_some()
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// How many server listings have been applied.
    pub fn loads(&self) -> u64 {
        self.loads
    }

    pub fn search_raw(&self) -> &str {
        &self.search_raw
    }

    pub fn search_debounced(&self) -> &str {
        &self.search_debounced
    }

    pub fn set_search_raw(&mut self, raw: impl Into<String>) {
        self.search_raw = raw.into();
    }

    pub fn set_search_debounced(&mut self, term: impl Into<String>) {
        self.search_debounced = term.into();
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn set_error(&mut self, message: impl Into<String>) {
        self.last_error = Some(message.into());
    }

    pub fn clear_error(&mut self) {
        self.last_error = None;
    }

    pub fn busy(&self) -> BusyFlags {
        BusyFlags {
            get: self.in_flight[OpKind::Get.index()] > 0,
            add: self.in_flight[OpKind::Add.index()] > 0,
            edit: self.in_flight[OpKind::Edit.index()] > 0,
            remove: self.in_flight[OpKind::Remove.index()] > 0,
        }
    }

    /// Register a request. Refreshes share one generation counter; entity
    /// writes are counted per (kind, id) so that edits to two different
    /// records never supersede each other.
    pub fn begin(&mut self, kind: OpKind, id: Option<T::Id>) -> Ticket<T::Id> {
        self.in_flight[kind.index()] += 1;
        let slot = match id {
            Some(id) => Slot::Entity(kind, id),
            None => Slot::Collection(kind),
        };
        self.next_generation += 1;
        self.generations.insert(slot.clone(), self.next_generation);
        Ticket {
            kind,
            slot,
            generation: self.next_generation,
        }
    }

    /// True if no request for the same slot was started after this one.
    pub fn is_current(&self, ticket: &Ticket<T::Id>) -> bool {
        self.generations.get(&ticket.slot) == Some(&ticket.generation)
    }

    /// Mark the request as finished and report whether it is still current.
    /// The newest request for a slot releases it.
    pub fn finish(&mut self, ticket: &Ticket<T::Id>) -> bool {
        let counter = &mut self.in_flight[ticket.kind.index()];
        *counter = counter.saturating_sub(1);
        let current = self.is_current(ticket);
        if current {
            self.generations.remove(&ticket.slot);
        }
        current
    }

    /// Apply a server listing.
    pub fn replace_all(&mut self, items: Vec<T>) {
        self.items = items;
        self.revision += 1;
        self.loads += 1;
    }

    pub fn prepend(&mut self, item: T) {
        self.items.insert(0, item);
        self.revision += 1;
    }

    /// Replace the record with the same id in place.
    pub fn replace(&mut self, item: T) -> bool {
        let id = item.id();
        match self.items.iter_mut().find(|existing| existing.id() == id) {
            Some(existing) => {
                *existing = item;
                self.revision += 1;
                true
            }
            None => false,
        }
    }

    /// Apply `f` to the record with this id.
    pub fn update(&mut self, id: T::Id, f: impl FnOnce(&mut T)) -> bool {
        match self.items.iter_mut().find(|item| item.id() == id) {
            Some(item) => {
                f(item);
                self.revision += 1;
                true
            }
            None => false,
        }
    }

    /// Remove the record, returning it with the position it held.
    pub fn remove(&mut self, id: T::Id) -> Option<(usize, T)> {
        let index = self.items.iter().position(|item| item.id() == id)?;
        let item = self.items.remove(index);
        self.revision += 1;
        Some((index, item))
    }

    pub fn insert_at(&mut self, index: usize, item: T) {
        let index = index.min(self.items.len());
        self.items.insert(index, item);
        self.revision += 1;
    }

    /// Put back a previously captured collection.
    pub fn restore(&mut self, snapshot: Vec<T>) {
        self.items = snapshot;
        self.revision += 1;
    }
}
