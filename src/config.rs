//! Build-Time Configuration
//!
//! External endpoints the app talks to, resolved when the WASM bundle is
//! built. A browser bundle has no runtime environment, so unset variables
//! fall back to the development defaults.

use log::info;

const DEFAULT_DATABASE_URL: &str = "https://chefly-menu-default-rtdb.firebaseio.com";
const DEFAULT_UPLOAD_URL: &str = "https://api.cloudinary.com/v1_1/chefly/image/upload";
const DEFAULT_UPLOAD_PRESET: &str = "chefly_unsigned";

/// External service endpoints.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the realtime database, without a trailing slash.
    pub database_url: String,
    /// Image upload endpoint.
    pub upload_url: String,
    /// Unsigned upload preset sent with every upload.
    pub upload_preset: String,
}

impl Config {
    pub fn load() -> Self {
        let config = Self {
            database_url: pick(
                option_env!("CHEFLY_DATABASE_URL"),
                "CHEFLY_DATABASE_URL",
                DEFAULT_DATABASE_URL,
            )
            .trim_end_matches('/')
            .to_string(),
            upload_url: pick(
                option_env!("CHEFLY_UPLOAD_URL"),
                "CHEFLY_UPLOAD_URL",
                DEFAULT_UPLOAD_URL,
            ),
            upload_preset: pick(
                option_env!("CHEFLY_UPLOAD_PRESET"),
                "CHEFLY_UPLOAD_PRESET",
                DEFAULT_UPLOAD_PRESET,
            ),
        };
        info!("config loaded: database={}", config.database_url);
        config
    }
}

fn pick(value: Option<&'static str>, key: &str, default: &'static str) -> String {
    match value {
        Some(value) if !value.is_empty() => value.to_string(),
        _ => {
            info!("{key} not set at build time, using default: {default}");
            default.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pick_prefers_build_value() {
        assert_eq!(pick(Some("https://db.example"), "KEY", "fallback"), "https://db.example");
    }

    #[test]
    fn test_pick_falls_back_when_unset_or_empty() {
        assert_eq!(pick(None, "KEY", "fallback"), "fallback");
        assert_eq!(pick(Some(""), "KEY", "fallback"), "fallback");
    }
}
