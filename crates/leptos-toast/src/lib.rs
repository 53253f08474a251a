//! Leptos Toast Notifications
//!
//! Self-expiring status messages for Leptos apps. Each toast lives for a
//! fixed window or until the user closes it, whichever comes first; closing
//! an already-expired toast is a no-op.

use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;

/// How long a toast stays on screen, in milliseconds.
pub const TOAST_DURATION_MS: u32 = 5_000;

/// Toast severity, controls the card styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Severity {
    Success,
    Error,
    #[default]
    Info,
}

impl Severity {
    pub fn class(&self) -> &'static str {
        match self {
            Severity::Success => "toast success",
            Severity::Error => "toast error",
            Severity::Info => "toast info",
        }
    }
}

/// A single notification.
#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    /// Random token, unique among currently-live toasts.
    pub id: String,
    pub message: String,
    pub severity: Severity,
}

/// Plain queue state. Reactive wiring lives in [`Toasts`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ToastQueue {
    toasts: Vec<Toast>,
}

impl ToastQueue {
    /// Append a toast; display order is insertion order.
    pub fn push(&mut self, toast: Toast) {
        self.toasts.push(toast);
    }

    /// Remove the toast with `id`. Returns whether anything was removed;
    /// removing an unknown id is a no-op, which covers the race between
    /// auto-expiry and a user-initiated close.
    pub fn dismiss(&mut self, id: &str) -> bool {
        let before = self.toasts.len();
        self.toasts.retain(|toast| toast.id != id);
        before != self.toasts.len()
    }

    pub fn as_slice(&self) -> &[Toast] {
        &self.toasts
    }

    pub fn len(&self) -> usize {
        self.toasts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.toasts.is_empty()
    }
}

/// Reactive handle to the toast queue.
#[derive(Clone, Copy)]
pub struct Toasts {
    queue: RwSignal<ToastQueue>,
}

impl Toasts {
    pub fn new() -> Self {
        Self {
            queue: RwSignal::new(ToastQueue::default()),
        }
    }

    /// Show a toast. It removes itself after [`TOAST_DURATION_MS`] unless
    /// dismissed earlier. Returns the toast id.
    pub fn show(&self, message: impl Into<String>, severity: Severity) -> String {
        let toast = Toast {
            id: random_id(),
            message: message.into(),
            severity,
        };
        let id = toast.id.clone();
        self.queue.update(|queue| queue.push(toast));

        let queue = self.queue;
        let expired = id.clone();
        spawn_local(async move {
            TimeoutFuture::new(TOAST_DURATION_MS).await;
            // Already-dismissed toasts are simply not found here.
            let _ = queue.try_update(|queue| queue.dismiss(&expired));
        });
        id
    }

    /// Show a toast with the default severity.
    pub fn notify(&self, message: impl Into<String>) -> String {
        self.show(message, Severity::default())
    }

    pub fn success(&self, message: impl Into<String>) -> String {
        self.show(message, Severity::Success)
    }

    pub fn error(&self, message: impl Into<String>) -> String {
        self.show(message, Severity::Error)
    }

    pub fn info(&self, message: impl Into<String>) -> String {
        self.show(message, Severity::Info)
    }

    /// Remove a toast early. Unknown ids are a no-op.
    pub fn dismiss(&self, id: &str) {
        self.queue.update(|queue| {
            queue.dismiss(id);
        });
    }

    /// Current toasts in display order. Reactive when read inside a view.
    pub fn snapshot(&self) -> Vec<Toast> {
        self.queue.with(|queue| queue.as_slice().to_vec())
    }
}

impl Default for Toasts {
    fn default() -> Self {
        Self::new()
    }
}

/// Create the queue and provide it via context. Call once near the root.
pub fn provide_toasts() -> Toasts {
    let toasts = Toasts::new();
    provide_context(toasts);
    toasts
}

/// The toast handle from context.
pub fn use_toasts() -> Toasts {
    expect_context::<Toasts>()
}

/// Short random base-36 token, same shape as a JS `Math.random()` slug.
fn random_id() -> String {
    const CHARS: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    let mut id = String::with_capacity(9);
    for _ in 0..9 {
        let index = (js_sys::Math::random() * CHARS.len() as f64) as usize % CHARS.len();
        id.push(CHARS[index] as char);
    }
    id
}

/// Renders the live toasts in insertion order.
#[component]
pub fn ToastContainer() -> impl IntoView {
    let toasts = use_toasts();
    view! {
        <div class="toast-container">
            <For
                each=move || toasts.snapshot()
                key=|toast| toast.id.clone()
                children=move |toast| view! { <ToastCard toast=toast/> }
            />
        </div>
    }
}

/// One toast card with a close button.
#[component]
fn ToastCard(toast: Toast) -> impl IntoView {
    let toasts = use_toasts();
    let id = toast.id.clone();
    view! {
        <div class=toast.severity.class()>
            <span class="toast-message">{toast.message.clone()}</span>
            <button class="toast-close" on:click=move |_| toasts.dismiss(&id)>
                "×"
            </button>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_toast(id: &str, severity: Severity) -> Toast {
        Toast {
            id: id.to_string(),
            message: format!("toast {id}"),
            severity,
        }
    }

    #[test]
    fn test_insertion_order_kept() {
        let mut queue = ToastQueue::default();
        queue.push(make_toast("a", Severity::Success));
        queue.push(make_toast("b", Severity::Error));
        queue.push(make_toast("c", Severity::Info));

        let ids: Vec<&str> = queue.as_slice().iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, ["a", "b", "c"]);
    }

    #[test]
    fn test_dismiss_keeps_order_of_rest() {
        let mut queue = ToastQueue::default();
        queue.push(make_toast("a", Severity::Info));
        queue.push(make_toast("b", Severity::Info));
        queue.push(make_toast("c", Severity::Info));

        assert!(queue.dismiss("b"));

        let ids: Vec<&str> = queue.as_slice().iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, ["a", "c"]);
    }

    #[test]
    fn test_dismiss_twice_is_noop() {
        let mut queue = ToastQueue::default();
        queue.push(make_toast("a", Severity::Info));

        assert!(queue.dismiss("a"));
        assert!(!queue.dismiss("a"));
        assert!(queue.is_empty());
    }

    #[test]
    fn test_dismiss_unknown_id_is_noop() {
        let mut queue = ToastQueue::default();
        queue.push(make_toast("a", Severity::Info));

        assert!(!queue.dismiss("missing"));
        assert_eq!(queue.len(), 1);
    }

    #[test]
    fn test_default_severity_is_info() {
        assert_eq!(Severity::default(), Severity::Info);
    }
}
