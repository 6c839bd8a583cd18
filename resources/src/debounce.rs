use std::future::Future;

/// Trailing-edge debouncer for a single-threaded event loop.
///
/// Each `push` cancels whatever was pending. Only the value of the last push
/// before a full quiet period survives `settle`.
#[derive(Debug, Default)]
pub struct Debouncer<T> {
    generation: u64,
    pending: Option<T>,
}

impl<T> Debouncer<T> {
    pub fn new() -> Self {
        Self {
            generation: 0,
            pending: None,
        }
    }

    /// Schedule `value`, replacing any pending one. The returned ticket must
    /// be handed to `settle` once the quiet period has elapsed.
    pub fn push(&mut self, value: T) -> u64 {
        self.generation += 1;
        self.pending = Some(value);
        self.generation
    }

    /// Take the pending value if nothing was pushed after `ticket`.
    pub fn settle(&mut self, ticket: u64) -> Option<T> {
        if ticket != self.generation {
            return None;
        }
        self.pending.take()
    }
}

/// Run one debounced step with an externally supplied timer: push `value`,
/// wait on `pause`, then settle. The debouncer lives behind a `RefCell` so
/// that overlapping calls on the same loop observe each other's pushes.
pub async fn debounced<T, F>(
    debouncer: &std::cell::RefCell<Debouncer<T>>,
    value: T,
    pause: F,
) -> Option<T>
where
    F: Future<Output = ()>,
{
    let ticket = debouncer.borrow_mut().push(value);
    pause.await;
    debouncer.borrow_mut().settle(ticket)
}
