//! Realtime Database Client
//!
//! REST + event-stream client for the hosted document store. Records live
//! at `{base}/{path}/{id}.json`; the change stream delivers `put`/`patch`
//! events scoped to the subscribed path.

use std::cell::RefCell;
use std::rc::Rc;

use async_trait::async_trait;
use log::{debug, error, warn};
use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use serde::Deserialize;
use serde_json::Value;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys::{EventSource, MessageEvent, Request, RequestInit, Response};

use super::{js_error_text, AdapterError, RemoteStore, SnapshotHandler, Subscription};

/// Characters escaped in record-id path segments.
const SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'\\');

/// One event from the change stream: the path that changed (relative to the
/// subscribed location) and the data now at that path.
#[derive(Debug, Deserialize)]
struct StreamEvent {
    path: String,
    #[serde(default)]
    data: Value,
}

fn parse_stream_event(text: &str) -> Result<StreamEvent, String> {
    serde_json::from_str(text).map_err(|err| err.to_string())
}

/// Client for the hosted realtime database.
///
/// One instance is created at startup from [`crate::config::Config`] and
/// shared via context.
#[derive(Debug, Clone)]
pub struct RealtimeDb {
    base_url: String,
}

impl RealtimeDb {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// REST endpoint for a collection or record.
    fn endpoint(&self, segments: &[&str]) -> String {
        let mut url = self.base_url.clone();
        for segment in segments {
            url.push('/');
            url.push_str(&utf8_percent_encode(segment, SEGMENT).to_string());
        }
        url.push_str(".json");
        url
    }

    async fn request(
        &self,
        method: &str,
        url: &str,
        body: Option<&Value>,
    ) -> Result<Value, AdapterError> {
        let init = RequestInit::new();
        init.set_method(method);
        if let Some(body) = body {
            init.set_body(&JsValue::from_str(&body.to_string()));
        }

        let request = Request::new_with_str_and_init(url, &init)
            .map_err(|err| AdapterError::Network(js_error_text(&err)))?;
        let window = web_sys::window()
            .ok_or_else(|| AdapterError::Network("no window".to_string()))?;

        let response = JsFuture::from(window.fetch_with_request(&request))
            .await
            .map_err(|err| AdapterError::Network(js_error_text(&err)))?;
        let response: Response = response
            .dyn_into()
            .map_err(|_| AdapterError::Network("fetch returned a non-response".to_string()))?;

        if response.status() == 404 {
            return Err(AdapterError::NotFound(url.to_string()));
        }
        if !response.ok() {
            return Err(AdapterError::Network(format!("HTTP {}", response.status())));
        }

        let text = JsFuture::from(
            response
                .text()
                .map_err(|err| AdapterError::Network(js_error_text(&err)))?,
        )
        .await
        .map_err(|err| AdapterError::Network(js_error_text(&err)))?;
        let text = text.as_string().unwrap_or_default();

        if text.trim().is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_str(&text).map_err(|err| AdapterError::Decode(err.to_string()))
    }

    async fn fetch_collection(&self, path: &str) -> Result<Value, AdapterError> {
        self.request("GET", &self.endpoint(&[path]), None).await
    }

    /// Whether a record currently exists at `path/id`.
    async fn exists(&self, path: &str, id: &str) -> Result<bool, AdapterError> {
        let value = self.request("GET", &self.endpoint(&[path, id]), None).await?;
        Ok(value != Value::Null)
    }
}

#[async_trait(?Send)]
impl RemoteStore for RealtimeDb {
    fn subscribe(&self, path: &str, on_snapshot: SnapshotHandler) -> Subscription {
        let url = self.endpoint(&[path]);
        let source = match EventSource::new(&url) {
            Ok(source) => source,
            Err(err) => {
                error!("failed to open change stream {url}: {}", js_error_text(&err));
                return Subscription::new(|| {});
            }
        };
        debug!("change stream opened: {url}");

        let handler = Rc::new(RefCell::new(on_snapshot));
        let client = self.clone();
        let collection = path.to_string();

        // One callback serves both `put` and `patch`. A root-path event
        // carries the whole collection; anything narrower triggers a full
        // re-fetch so subscribers only ever see complete snapshots.
        let on_change = Closure::<dyn FnMut(MessageEvent)>::new(move |event: MessageEvent| {
            let Some(text) = event.data().as_string() else {
                return;
            };
            match parse_stream_event(&text) {
                Ok(event) if event.path == "/" => (handler.borrow_mut())(event.data),
                Ok(_) => {
                    let handler = Rc::clone(&handler);
                    let client = client.clone();
                    let collection = collection.clone();
                    spawn_local(async move {
                        match client.fetch_collection(&collection).await {
                            Ok(snapshot) => (handler.borrow_mut())(snapshot),
                            Err(err) => warn!("snapshot refresh failed: {err}"),
                        }
                    });
                }
                Err(err) => warn!("unparseable stream event: {err}"),
            }
        });
        let on_error = Closure::<dyn FnMut(web_sys::Event)>::new(move |_| {
            // The browser reconnects EventSource streams on its own.
            warn!("change stream interrupted, waiting for reconnect");
        });

        let listener = on_change.as_ref().unchecked_ref();
        if let Err(err) = source.add_event_listener_with_callback("put", listener) {
            error!("failed to attach put listener: {}", js_error_text(&err));
        }
        if let Err(err) = source.add_event_listener_with_callback("patch", listener) {
            error!("failed to attach patch listener: {}", js_error_text(&err));
        }
        source.set_onerror(Some(on_error.as_ref().unchecked_ref()));

        Subscription::new(move || {
            source.close();
            debug!("change stream closed");
            drop(on_change);
            drop(on_error);
        })
    }

    async fn create(&self, path: &str, payload: Value) -> Result<String, AdapterError> {
        let url = self.endpoint(&[path]);
        let value = self.request("POST", &url, Some(&payload)).await?;
        value
            .get("name")
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or_else(|| AdapterError::Decode("create response missing record id".to_string()))
    }

    async fn update(&self, path: &str, id: &str, payload: Value) -> Result<(), AdapterError> {
        if !self.exists(path, id).await? {
            return Err(AdapterError::NotFound(format!("{path}/{id}")));
        }
        self.request("PATCH", &self.endpoint(&[path, id]), Some(&payload))
            .await?;
        Ok(())
    }

    async fn delete(&self, path: &str, id: &str) -> Result<(), AdapterError> {
        if !self.exists(path, id).await? {
            return Err(AdapterError::NotFound(format!("{path}/{id}")));
        }
        self.request("DELETE", &self.endpoint(&[path, id]), None)
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_endpoint_joins_segments() {
        let db = RealtimeDb::new("https://db.example/");
        assert_eq!(db.endpoint(&["menu"]), "https://db.example/menu.json");
        assert_eq!(
            db.endpoint(&["menu", "-Nabc123"]),
            "https://db.example/menu/-Nabc123.json"
        );
    }

    #[test]
    fn test_endpoint_escapes_hostile_segments() {
        let db = RealtimeDb::new("https://db.example");
        let url = db.endpoint(&["menu", "a/b?c"]);
        assert_eq!(url, "https://db.example/menu/a%2Fb%3Fc.json");
    }

    #[test]
    fn test_parse_stream_event_root_put() {
        let event = parse_stream_event(r#"{"path":"/","data":{"-N1":{"name":"Rice"}}}"#)
            .expect("parse failed");
        assert_eq!(event.path, "/");
        assert_eq!(event.data, json!({"-N1": {"name": "Rice"}}));
    }

    #[test]
    fn test_parse_stream_event_child_delete() {
        let event = parse_stream_event(r#"{"path":"/-N1","data":null}"#).expect("parse failed");
        assert_eq!(event.path, "/-N1");
        assert_eq!(event.data, Value::Null);
    }

    #[test]
    fn test_parse_stream_event_rejects_garbage() {
        assert!(parse_stream_event("not json").is_err());
    }
}
