/// Application-level constants
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default analysis backend, matching the local development server.
pub const DEFAULT_API_BASE: &str = "http://localhost:9090";

/// Default request timeout for backend calls.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Environment variable overriding the backend base URL.
pub const API_BASE_ENV: &str = "LABPANEL_API_BASE";

/// Environment variable holding the identity cookie key (base64, 32 bytes).
pub const IDENTITY_KEY_ENV: &str = "LABPANEL_IDENTITY_KEY";

/// Base URL of the analysis/identity backend.
pub fn api_base_url() -> String {
    std::env::var(API_BASE_ENV).unwrap_or_else(|_| DEFAULT_API_BASE.to_string())
}

/// Raw base64 identity key, if configured.
pub fn identity_key_b64() -> Option<String> {
    std::env::var(IDENTITY_KEY_ENV).ok()
}

/// Default tracing filter when RUST_LOG is unset.
pub fn default_log_filter() -> &'static str {
    "info,labpanel=debug"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_api_base_is_local() {
        assert_eq!(DEFAULT_API_BASE, "http://localhost:9090");
    }

    #[test]
    fn api_base_url_falls_back_to_default() {
        // Env-var overrides are covered manually; the unset path must
        // produce the development default.
        if std::env::var(API_BASE_ENV).is_err() {
            assert_eq!(api_base_url(), DEFAULT_API_BASE);
        }
    }

    #[test]
    fn app_version_matches_cargo() {
        assert_eq!(APP_VERSION, "0.1.0");
    }
}
