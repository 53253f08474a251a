//! Menu Synchronization
//!
//! Owns the in-memory mirror of the remote menu collection. The mirror is
//! replaced wholesale on every snapshot; mutations never touch it directly,
//! so the list always shows confirmed-then-synced state rather than
//! requested state.

use leptos::prelude::*;
use log::{debug, error};
use serde_json::Value;

use crate::models::{MenuItem, MenuItemDraft};
use crate::remote::{StoreHandle, SnapshotHandler};

/// Remote collection path for menu records.
pub const MENU_PATH: &str = "menu";

/// Decode a raw collection snapshot into mirror order.
///
/// The wire shape is an object keyed by store-assigned id, or `null` when
/// the collection is empty. Push keys sort chronologically, so ascending key
/// order gives a stable creation-ordered list.
pub fn decode_snapshot(snapshot: Value) -> Result<Vec<MenuItem>, String> {
    match snapshot {
        Value::Null => Ok(Vec::new()),
        Value::Object(records) => {
            let mut items = records
                .into_iter()
                .map(|(id, record)| {
                    let draft: MenuItemDraft = serde_json::from_value(record)
                        .map_err(|err| format!("record {id}: {err}"))?;
                    Ok(MenuItem::from_record(id, draft))
                })
                .collect::<Result<Vec<_>, String>>()?;
            items.sort_by(|a, b| a.id.cmp(&b.id));
            Ok(items)
        }
        other => Err(format!("expected an object of records, got {other}")),
    }
}

/// Mirror of the remote collection plus derived flags.
#[derive(Debug, Clone, PartialEq)]
pub struct SyncState {
    pub items: Vec<MenuItem>,
    pub loading: bool,
    pub error: Option<String>,
}

impl SyncState {
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            loading: true,
            error: None,
        }
    }

    /// Feed one snapshot event into the mirror.
    ///
    /// A good snapshot replaces the items wholesale and clears any earlier
    /// error. A decode failure records the error but keeps the last good
    /// items, so the list does not flash empty on a transient parse issue.
    /// Either way the first event ends the loading phase for good.
    pub fn apply(&mut self, snapshot: Value) {
        match decode_snapshot(snapshot) {
            Ok(items) => {
                self.items = items;
                self.error = None;
            }
            Err(err) => {
                error!("menu snapshot rejected: {err}");
                self.error = Some("Failed to fetch menu items".to_string());
            }
        }
        self.loading = false;
    }
}

impl Default for SyncState {
    fn default() -> Self {
        Self::new()
    }
}

/// Outcome of a menu mutation, surfaced to the caller instead of thrown.
#[derive(Debug, Clone, PartialEq)]
pub struct ActionResult {
    pub success: bool,
    pub error: Option<String>,
}

impl ActionResult {
    fn ok() -> Self {
        Self {
            success: true,
            error: None,
        }
    }

    fn failed(message: &str) -> Self {
        Self {
            success: false,
            error: Some(message.to_string()),
        }
    }
}

/// CRUD wrapper over the store. Failures come back as an [`ActionResult`]
/// with a user-facing message; nothing propagates past this boundary.
#[derive(Clone)]
pub struct MenuApi {
    store: StoreHandle,
}

impl MenuApi {
    pub fn new(store: StoreHandle) -> Self {
        Self { store }
    }

    pub async fn add(&self, draft: &MenuItemDraft) -> ActionResult {
        let payload = match serde_json::to_value(draft) {
            Ok(payload) => payload,
            Err(err) => {
                error!("unserializable menu item: {err}");
                return ActionResult::failed("Failed to add menu item");
            }
        };
        match self.store.create(MENU_PATH, payload).await {
            Ok(id) => {
                debug!("menu item created: {id}");
                ActionResult::ok()
            }
            Err(err) => {
                error!("create failed: {err}");
                ActionResult::failed("Failed to add menu item")
            }
        }
    }

    pub async fn update(&self, id: &str, draft: &MenuItemDraft) -> ActionResult {
        let payload = match serde_json::to_value(draft) {
            Ok(payload) => payload,
            Err(err) => {
                error!("unserializable menu item: {err}");
                return ActionResult::failed("Failed to update menu item");
            }
        };
        match self.store.update(MENU_PATH, id, payload).await {
            Ok(()) => {
                debug!("menu item updated: {id}");
                ActionResult::ok()
            }
            Err(err) => {
                error!("update {id} failed: {err}");
                ActionResult::failed("Failed to update menu item")
            }
        }
    }

    pub async fn remove(&self, id: &str) -> ActionResult {
        match self.store.delete(MENU_PATH, id).await {
            Ok(()) => {
                debug!("menu item deleted: {id}");
                ActionResult::ok()
            }
            Err(err) => {
                error!("delete {id} failed: {err}");
                ActionResult::failed("Failed to delete menu item")
            }
        }
    }
}

/// Handle returned by [`use_menu`].
#[derive(Clone)]
pub struct MenuHandle {
    pub items: Signal<Vec<MenuItem>>,
    pub loading: Signal<bool>,
    pub error: Signal<Option<String>>,
    api: MenuApi,
}

impl MenuHandle {
    pub async fn add(&self, draft: &MenuItemDraft) -> ActionResult {
        self.api.add(draft).await
    }

    pub async fn update(&self, id: &str, draft: &MenuItemDraft) -> ActionResult {
        self.api.update(id, draft).await
    }

    pub async fn remove(&self, id: &str) -> ActionResult {
        self.api.remove(id).await
    }
}

/// Menu state and mutations for one page.
///
/// Subscribes on mount; the subscription capability is handed to the
/// cleanup hook, which consumes it, so release happens exactly once when
/// the owning view is dropped. Snapshots that arrive after disposal are
/// discarded by `try_update`.
pub fn use_menu(store: StoreHandle) -> MenuHandle {
    let (state, set_state) = signal(SyncState::new());

    let on_snapshot: SnapshotHandler = Box::new(move |snapshot| {
        let _ = set_state.try_update(|state| state.apply(snapshot));
    });
    let subscription = store.subscribe(MENU_PATH, on_snapshot);
    on_cleanup(move || subscription.release());

    MenuHandle {
        items: Signal::derive(move || state.with(|s| s.items.clone())),
        loading: Signal::derive(move || state.with(|s| s.loading)),
        error: Signal::derive(move || state.with(|s| s.error.clone())),
        api: MenuApi::new(store),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::remote::{AdapterError, RemoteStore, Subscription};
    use async_trait::async_trait;
    use futures::executor::block_on;
    use serde_json::json;
    use std::sync::{Arc, Mutex};

    fn draft(name: &str) -> MenuItemDraft {
        MenuItemDraft {
            name: name.to_string(),
            price: 1500.0,
            category: "Main Course".to_string(),
            description: None,
            image: None,
        }
    }

    #[test]
    fn test_initial_state_is_loading() {
        let state = SyncState::new();
        assert!(state.items.is_empty());
        assert!(state.loading);
        assert_eq!(state.error, None);
    }

    #[test]
    fn test_empty_snapshot_is_valid() {
        let mut state = SyncState::new();
        state.apply(Value::Null);

        assert!(state.items.is_empty());
        assert!(!state.loading);
        assert_eq!(state.error, None);
    }

    #[test]
    fn test_mirror_equals_latest_snapshot() {
        let mut state = SyncState::new();
        state.apply(json!({
            "-N1": {"name": "Rice", "price": 1500.0, "category": "Main Course"},
            "-N2": {"name": "Coke", "price": 500.0, "category": "Drinks"},
        }));
        assert_eq!(state.items.len(), 2);

        // The next snapshot fully replaces the previous one.
        state.apply(json!({
            "-N3": {"name": "Beans", "price": 1200.0, "category": "Main Course"},
        }));
        assert_eq!(state.items.len(), 1);
        assert_eq!(state.items[0].id, "-N3");
        assert_eq!(state.items[0].name, "Beans");
    }

    #[test]
    fn test_snapshot_decodes_in_key_order() {
        let mut state = SyncState::new();
        state.apply(json!({
            "-N2": {"name": "Second", "price": 1.0, "category": "A"},
            "-N1": {"name": "First", "price": 1.0, "category": "A"},
        }));

        let ids: Vec<&str> = state.items.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, ["-N1", "-N2"]);
    }

    #[test]
    fn test_decode_failure_keeps_last_good_items() {
        let mut state = SyncState::new();
        state.apply(json!({
            "-N1": {"name": "Rice", "price": 1500.0, "category": "Main Course"},
        }));
        assert_eq!(state.items.len(), 1);

        // Malformed record shape: price is a string.
        state.apply(json!({
            "-N1": {"name": "Rice", "price": "soup", "category": "Main Course"},
        }));
        assert_eq!(state.items.len(), 1);
        assert_eq!(state.items[0].name, "Rice");
        assert!(state.error.is_some());
        assert!(!state.loading);
    }

    #[test]
    fn test_good_snapshot_clears_error() {
        let mut state = SyncState::new();
        state.apply(json!({"-N1": {"name": 1}}));
        assert!(state.error.is_some());

        state.apply(Value::Null);
        assert_eq!(state.error, None);
    }

    #[test]
    fn test_loading_ends_on_first_event_even_on_failure() {
        let mut state = SyncState::new();
        state.apply(json!("not an object"));
        assert!(!state.loading);
        assert!(state.error.is_some());
        assert!(state.items.is_empty());
    }

    #[test]
    fn test_decode_rejects_non_object_snapshot() {
        assert!(decode_snapshot(json!([1, 2, 3])).is_err());
        assert!(decode_snapshot(json!("text")).is_err());
    }

    /// Store double recording calls; every mutation answers with `outcome`.
    struct FakeStore {
        outcome: Result<(), AdapterError>,
        calls: Mutex<Vec<String>>,
    }

    impl FakeStore {
        fn succeeding() -> Self {
            Self {
                outcome: Ok(()),
                calls: Mutex::new(Vec::new()),
            }
        }

        fn failing(error: AdapterError) -> Self {
            Self {
                outcome: Err(error),
                calls: Mutex::new(Vec::new()),
            }
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait(?Send)]
    impl RemoteStore for FakeStore {
        fn subscribe(&self, _path: &str, _on_snapshot: SnapshotHandler) -> Subscription {
            Subscription::new(|| {})
        }

        async fn create(&self, path: &str, _payload: Value) -> Result<String, AdapterError> {
            self.calls.lock().unwrap().push(format!("create {path}"));
            self.outcome.clone().map(|_| "-Nnew".to_string())
        }

        async fn update(&self, path: &str, id: &str, _payload: Value) -> Result<(), AdapterError> {
            self.calls.lock().unwrap().push(format!("update {path}/{id}"));
            self.outcome.clone()
        }

        async fn delete(&self, path: &str, id: &str) -> Result<(), AdapterError> {
            self.calls.lock().unwrap().push(format!("delete {path}/{id}"));
            self.outcome.clone()
        }
    }

    #[test]
    fn test_add_success_reports_ok() {
        let store = Arc::new(FakeStore::succeeding());
        let api = MenuApi::new(store.clone());

        let result = block_on(api.add(&draft("Rice")));
        assert!(result.success);
        assert_eq!(result.error, None);
        assert_eq!(store.calls(), ["create menu"]);
    }

    #[test]
    fn test_add_failure_maps_to_user_message() {
        let store = Arc::new(FakeStore::failing(AdapterError::Network("offline".into())));
        let api = MenuApi::new(store);

        let result = block_on(api.add(&draft("Rice")));
        assert!(!result.success);
        assert_eq!(result.error.as_deref(), Some("Failed to add menu item"));
    }

    #[test]
    fn test_update_missing_record_maps_to_user_message() {
        let store = Arc::new(FakeStore::failing(AdapterError::NotFound("menu/-Ngone".into())));
        let api = MenuApi::new(store.clone());

        let result = block_on(api.update("-Ngone", &draft("Rice")));
        assert!(!result.success);
        assert_eq!(result.error.as_deref(), Some("Failed to update menu item"));
        assert_eq!(store.calls(), ["update menu/-Ngone"]);
    }

    #[test]
    fn test_remove_outcomes() {
        let store = Arc::new(FakeStore::succeeding());
        let api = MenuApi::new(store.clone());
        let result = block_on(api.remove("-N1"));
        assert!(result.success);
        assert_eq!(store.calls(), ["delete menu/-N1"]);

        let store = Arc::new(FakeStore::failing(AdapterError::Network("offline".into())));
        let api = MenuApi::new(store);
        let result = block_on(api.remove("-N1"));
        assert_eq!(result.error.as_deref(), Some("Failed to delete menu item"));
    }
}
