//! Image Upload
//!
//! Unsigned upload to the external image host. The save path runs only
//! after a successful upload, so an upload failure never leaves a
//! half-saved item.

use log::{debug, error};
use serde::Deserialize;
use thiserror::Error;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{File, FormData, Request, RequestInit, Response};

use crate::config::Config;
use crate::remote::js_error_text;

/// Upload failures, kept separate from save errors so the form can tell the
/// user the item was not saved.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum UploadError {
    #[error("upload request failed: {0}")]
    Network(String),
    #[error("upload rejected: HTTP {0}")]
    Rejected(u16),
    #[error("upload response missing image url")]
    MissingUrl,
}

#[derive(Debug, Deserialize)]
struct UploadResponse {
    #[serde(default)]
    secure_url: Option<String>,
    #[serde(default)]
    url: Option<String>,
}

impl UploadResponse {
    fn into_url(self) -> Option<String> {
        self.secure_url.or(self.url)
    }
}

/// Upload one image file, returning its publicly resolvable URL.
pub async fn upload_image(config: &Config, file: &File) -> Result<String, UploadError> {
    let form = FormData::new().map_err(|err| UploadError::Network(js_error_text(&err)))?;
    form.append_with_blob("file", file)
        .map_err(|err| UploadError::Network(js_error_text(&err)))?;
    form.append_with_str("upload_preset", &config.upload_preset)
        .map_err(|err| UploadError::Network(js_error_text(&err)))?;

    let init = RequestInit::new();
    init.set_method("POST");
    init.set_body(form.as_ref());

    let request = Request::new_with_str_and_init(&config.upload_url, &init)
        .map_err(|err| UploadError::Network(js_error_text(&err)))?;
    let window = web_sys::window().ok_or_else(|| UploadError::Network("no window".to_string()))?;

    let response = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(|err| UploadError::Network(js_error_text(&err)))?;
    let response: Response = response
        .dyn_into()
        .map_err(|_| UploadError::Network("fetch returned a non-response".to_string()))?;

    if !response.ok() {
        error!("image upload rejected with HTTP {}", response.status());
        return Err(UploadError::Rejected(response.status()));
    }

    let json = JsFuture::from(
        response
            .json()
            .map_err(|err| UploadError::Network(js_error_text(&err)))?,
    )
    .await
    .map_err(|err| UploadError::Network(js_error_text(&err)))?;

    let parsed: UploadResponse =
        serde_wasm_bindgen::from_value(json).map_err(|_| UploadError::MissingUrl)?;
    let url = parsed.into_url().ok_or(UploadError::MissingUrl)?;
    debug!("image uploaded: {url}");
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_prefers_secure_url() {
        let response = UploadResponse {
            secure_url: Some("https://img.example/a.png".to_string()),
            url: Some("http://img.example/a.png".to_string()),
        };
        assert_eq!(
            response.into_url().as_deref(),
            Some("https://img.example/a.png")
        );
    }

    #[test]
    fn test_response_falls_back_to_plain_url() {
        let response = UploadResponse {
            secure_url: None,
            url: Some("http://img.example/a.png".to_string()),
        };
        assert_eq!(
            response.into_url().as_deref(),
            Some("http://img.example/a.png")
        );
    }

    #[test]
    fn test_response_without_url_is_none() {
        let response = UploadResponse {
            secure_url: None,
            url: None,
        };
        assert_eq!(response.into_url(), None);
    }
}
