use std::{
    future::Future,
    sync::{
        atomic::{AtomicU64, Ordering},
        Arc,
    },
};

use log::debug;

/// Hands out tickets for refreshes so that a response which arrives after a
/// newer request was issued can be recognized and dropped
#[derive(Clone, Debug, Default)]
pub struct RequestGuard {
    generation: Arc<AtomicU64>,
}

/// Marks one issued request
#[derive(Clone, Debug)]
pub struct RequestTicket {
    generation: u64,
    current: Arc<AtomicU64>,
}

impl RequestGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a ticket; every ticket issued before it becomes stale
    pub fn begin(&self) -> RequestTicket {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        RequestTicket {
            generation,
            current: self.generation.clone(),
        }
    }

    /// Make every outstanding ticket stale without issuing a new one
    pub fn invalidate(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
    }
}

impl RequestTicket {
    pub fn is_current(&self) -> bool {
        self.current.load(Ordering::SeqCst) == self.generation
    }

    /// Await `request` and hand back its output only if no newer ticket was
    /// issued in the meantime
    pub async fn run<F>(self, request: F) -> Option<F::Output>
    where
        F: Future,
    {
        let output = request.await;
        if !self.is_current() {
            debug!("Dropping response of superseded request {}", self.generation);
            return None;
        }
        Some(output)
    }
}

/// The most recent accepted result of a guarded request
#[derive(Debug)]
pub struct Latest<T> {
    guard: RequestGuard,
    value: Option<T>,
}

impl<T> Default for Latest<T> {
    fn default() -> Self {
        Latest {
            guard: RequestGuard::default(),
            value: None,
        }
    }
}

impl<T> Latest<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin(&self) -> RequestTicket {
        self.guard.begin()
    }

    /// Store `value` if `ticket` is still the newest one issued. Returns
    /// whether the value was kept.
    pub fn settle(&mut self, ticket: &RequestTicket, value: T) -> bool {
        if !ticket.is_current() || !Arc::ptr_eq(&ticket.current, &self.guard.generation) {
            return false;
        }

        self.value = Some(value);
        true
    }

    pub fn get(&self) -> Option<&T> {
        self.value.as_ref()
    }

    pub fn take(&mut self) -> Option<T> {
        self.value.take()
    }
}
