//! QR Share Modal
//!
//! Lets diners pull the menu up on their own phone by scanning the page's
//! URL. The code is rendered by an external endpoint so the client carries
//! no QR dependency.

use leptos::prelude::*;
use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};

const QR_ENDPOINT: &str = "https://api.qrserver.com/v1/create-qr-code/";

/// Image URL encoding `target` as a scannable code.
fn qr_image_url(target: &str) -> String {
    format!(
        "{QR_ENDPOINT}?size=200x200&data={}",
        utf8_percent_encode(target, NON_ALPHANUMERIC)
    )
}

#[component]
pub fn QrModal(#[prop(into)] on_close: Callback<()>) -> impl IntoView {
    let target = web_sys::window()
        .and_then(|window| window.location().href().ok())
        .unwrap_or_default();

    view! {
        <div class="modal-backdrop">
            <div class="modal qr-modal">
                <h3 class="modal-title">"Share Our Menu"</h3>
                <img class="qr-image" src=qr_image_url(&target) alt="Menu QR code"/>
                <button class="modal-close" on:click=move |_| on_close.run(())>
                    "Close"
                </button>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_qr_url_encodes_target() {
        let url = qr_image_url("https://menu.example/?table=4");
        assert!(url.starts_with(QR_ENDPOINT));
        assert!(url.ends_with("data=https%3A%2F%2Fmenu%2Eexample%2F%3Ftable%3D4"));
    }
}
