//! Remote Store Adapter
//!
//! Boundary between the app and the hosted document store. The production
//! implementation talks REST plus an event stream; tests substitute a fake
//! behind the same trait.

mod rtdb;

pub use rtdb::RealtimeDb;

use std::sync::Arc;

use async_trait::async_trait;
use send_wrapper::SendWrapper;
use serde_json::Value;
use thiserror::Error;
use wasm_bindgen::JsValue;

/// Errors surfaced by store operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AdapterError {
    #[error("network error: {0}")]
    Network(String),
    #[error("record not found: {0}")]
    NotFound(String),
    #[error("malformed payload: {0}")]
    Decode(String),
}

/// Snapshot callback. Receives the full decoded collection payload
/// (JSON `null` when the collection is empty).
pub type SnapshotHandler = Box<dyn FnMut(Value)>;

/// Release capability for an active subscription.
///
/// Releasing (or dropping) it closes the underlying stream. The capability
/// is consumed on release, so the owner can release at most once.
pub struct Subscription {
    release: Option<SendWrapper<Box<dyn FnOnce()>>>,
}

impl Subscription {
    pub fn new(release: impl FnOnce() + 'static) -> Self {
        Self {
            release: Some(SendWrapper::new(Box::new(release))),
        }
    }

    /// Explicitly close the stream.
    pub fn release(mut self) {
        if let Some(release) = self.release.take() {
            release.take()();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(release) = self.release.take() {
            release.take()();
        }
    }
}

/// Contract with the hosted document store.
///
/// Mutations suspend the calling task until the remote round-trip completes
/// or fails; none of them blocks the event loop.
#[async_trait(?Send)]
pub trait RemoteStore {
    /// Register a snapshot listener for the collection at `path`. Fires once
    /// with current state and again on every subsequent remote change.
    /// Returns the release capability for the stream.
    fn subscribe(&self, path: &str, on_snapshot: SnapshotHandler) -> Subscription;

    /// Insert a record; the store assigns and returns the new id.
    async fn create(&self, path: &str, payload: Value) -> Result<String, AdapterError>;

    /// Merge fields into the record at `path/id`.
    async fn update(&self, path: &str, id: &str, payload: Value) -> Result<(), AdapterError>;

    /// Remove the record at `path/id`.
    async fn delete(&self, path: &str, id: &str) -> Result<(), AdapterError>;
}

/// Shared handle to a store implementation.
pub type StoreHandle = Arc<dyn RemoteStore + Send + Sync>;

/// Human-readable text for a JS error value.
pub(crate) fn js_error_text(value: &JsValue) -> String {
    value
        .as_string()
        .unwrap_or_else(|| format!("{value:?}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn test_release_runs_exactly_once() {
        let released = Rc::new(Cell::new(0));
        let counter = Rc::clone(&released);
        let subscription = Subscription::new(move || counter.set(counter.get() + 1));

        subscription.release();
        assert_eq!(released.get(), 1);
    }

    #[test]
    fn test_drop_releases_exactly_once() {
        let released = Rc::new(Cell::new(0));
        let counter = Rc::clone(&released);
        {
            let _subscription = Subscription::new(move || counter.set(counter.get() + 1));
        }
        assert_eq!(released.get(), 1);
    }
}
