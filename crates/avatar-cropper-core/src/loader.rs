//! Bookkeeping for asynchronous image loads.
//!
//! Decoding runs off the interaction thread, so a user who picks a second
//! image before the first finishes decoding can see the completions arrive
//! out of order. [`LoadTracker`] tags every load with a monotonically
//! increasing id; only the completion of the most recently started load is
//! accepted.

use std::fmt::Debug;

use log::{debug, warn};

/// Receipt for one started load. Hand it back to [`LoadTracker::complete`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadTicket<S> {
    id: u64,
    source: S,
}

impl<S> LoadTicket<S> {
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn source(&self) -> &S {
        &self.source
    }
}

/// Tracks which load is current and which source is on screen.
#[derive(Debug)]
pub struct LoadTracker<S> {
    next_id: u64,
    pending: Option<u64>,
    loaded: Option<S>,
}

impl<S> Default for LoadTracker<S> {
    fn default() -> Self {
        Self {
            next_id: 0,
            pending: None,
            loaded: None,
        }
    }
}

impl<S: Debug> LoadTracker<S> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start loading `source`. Any earlier load still in flight becomes stale.
    pub fn begin(&mut self, source: S) -> LoadTicket<S> {
        self.next_id += 1;
        if let Some(previous) = self.pending.replace(self.next_id) {
            debug!("Load {} superseded by load {}", previous, self.next_id);
        }
        debug!("Begin load {} of {:?}", self.next_id, source);
        LoadTicket {
            id: self.next_id,
            source,
        }
    }

    /// Deliver the result of a load.
    ///
    /// Returns the result if `ticket` is the latest load; stale results are
    /// dropped and `None` is returned.
    pub fn complete<T>(&mut self, ticket: LoadTicket<S>, result: T) -> Option<T> {
        if self.pending != Some(ticket.id) {
            warn!(
                "Discarding stale load {} of {:?}",
                ticket.id, ticket.source
            );
            return None;
        }
        self.pending = None;
        self.loaded = Some(ticket.source);
        Some(result)
    }

    /// Whether a load has been started and not yet completed.
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// The source of the last accepted load.
    pub fn loaded(&self) -> Option<&S> {
        self.loaded.as_ref()
    }
}
