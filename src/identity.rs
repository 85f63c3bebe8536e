//! User-identity enrichment for report headers.
//!
//! Peripheral to the analysis pipeline: the email travels in an encrypted
//! cookie (base64 of 12-byte nonce + AES-256-GCM ciphertext under a static
//! process-wide key), and the name comes from a remote user lookup. Any
//! failure here is logged and leaves the header blank — it never blocks
//! submission or rendering, and the rest of the crate has no dependency on
//! key material.

use aes_gcm::aead::{Aead, KeyInit};
use aes_gcm::{Aes256Gcm, Key, Nonce};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use serde::{Deserialize, Serialize};

use crate::config;
use crate::report::ReportHeader;

pub const KEY_LENGTH: usize = 32;
const NONCE_LENGTH: usize = 12;

#[derive(Debug, thiserror::Error)]
pub enum IdentityError {
    #[error("Identity cookie is not valid base64")]
    CookieEncoding,

    #[error("Identity cookie is too short")]
    CookieTooShort,

    #[error("Failed to decrypt identity cookie")]
    DecryptionFailed,

    #[error("Decrypted email is not valid UTF-8")]
    InvalidEmail,

    #[error("Identity key must be {KEY_LENGTH} bytes of base64")]
    InvalidKey,

    #[error("Identity key not configured ({0} unset)")]
    KeyNotConfigured(&'static str),

    #[error("User lookup failed: {0}")]
    Lookup(String),
}

/// Decrypt the email carried in the session cookie.
///
/// Cookie layout: base64( [12-byte nonce][ciphertext + GCM tag] ).
pub fn decrypt_email_cookie(
    cookie: &str,
    key_bytes: &[u8; KEY_LENGTH],
) -> Result<String, IdentityError> {
    let bytes = BASE64
        .decode(cookie)
        .map_err(|_| IdentityError::CookieEncoding)?;
    if bytes.len() < NONCE_LENGTH + 16 {
        // AES-GCM auth tag is 16 bytes minimum
        return Err(IdentityError::CookieTooShort);
    }

    let key = Key::<Aes256Gcm>::from_slice(key_bytes);
    let cipher = Aes256Gcm::new(key);
    let nonce = Nonce::from_slice(&bytes[..NONCE_LENGTH]);

    let plaintext = cipher
        .decrypt(nonce, &bytes[NONCE_LENGTH..])
        .map_err(|_| IdentityError::DecryptionFailed)?;

    String::from_utf8(plaintext).map_err(|_| IdentityError::InvalidEmail)
}

/// Load the cookie decryption key from configuration.
pub fn key_from_env() -> Result<[u8; KEY_LENGTH], IdentityError> {
    let encoded = config::identity_key_b64()
        .ok_or(IdentityError::KeyNotConfigured(config::IDENTITY_KEY_ENV))?;
    let bytes = BASE64
        .decode(encoded.trim())
        .map_err(|_| IdentityError::InvalidKey)?;
    bytes.try_into().map_err(|_| IdentityError::InvalidKey)
}

/// Name pair returned by the user lookup endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserName {
    pub first_name: String,
    pub last_name: String,
}

#[derive(Serialize)]
struct UserByEmailRequest<'a> {
    email: &'a str,
}

/// Seam to the identity service.
pub trait UserLookup {
    fn user_by_email(&self, email: &str) -> Result<UserName, IdentityError>;
}

/// Blocking reqwest client for the `/api/userByEmail` endpoint.
pub struct HttpUserLookup {
    base_url: String,
    client: reqwest::blocking::Client,
}

impl HttpUserLookup {
    pub fn new(base_url: &str, timeout_secs: u64) -> Self {
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(timeout_secs))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        }
    }

    pub fn from_config() -> Self {
        Self::new(&config::api_base_url(), config::DEFAULT_TIMEOUT_SECS)
    }
}

impl UserLookup for HttpUserLookup {
    fn user_by_email(&self, email: &str) -> Result<UserName, IdentityError> {
        let url = format!("{}/api/userByEmail", self.base_url);

        let response = self
            .client
            .post(&url)
            .json(&UserByEmailRequest { email })
            .send()
            .map_err(|e| IdentityError::Lookup(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(IdentityError::Lookup(format!("status {}", status.as_u16())));
        }

        response
            .json::<UserName>()
            .map_err(|e| IdentityError::Lookup(e.to_string()))
    }
}

/// Mock lookup for testing.
pub struct MockUserLookup {
    result: Result<UserName, String>,
}

impl MockUserLookup {
    pub fn returning(first_name: &str, last_name: &str) -> Self {
        Self {
            result: Ok(UserName {
                first_name: first_name.to_string(),
                last_name: last_name.to_string(),
            }),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            result: Err(message.to_string()),
        }
    }
}

impl UserLookup for MockUserLookup {
    fn user_by_email(&self, _email: &str) -> Result<UserName, IdentityError> {
        self.result
            .clone()
            .map_err(IdentityError::Lookup)
    }
}

/// Resolve the report header from the encrypted email cookie.
///
/// Every failure path logs and returns None; callers render a blank header
/// and continue.
pub fn resolve_header(
    cookie: Option<&str>,
    key_bytes: &[u8; KEY_LENGTH],
    lookup: &impl UserLookup,
) -> Option<ReportHeader> {
    let cookie = match cookie {
        Some(c) if !c.is_empty() => c,
        _ => {
            tracing::debug!("no identity cookie present; report header left blank");
            return None;
        }
    };

    let resolved = decrypt_email_cookie(cookie, key_bytes).and_then(|email| {
        let name = lookup.user_by_email(&email)?;
        Ok(ReportHeader::new(
            format!("{} {}", name.first_name, name.last_name),
            email,
        ))
    });

    match resolved {
        Ok(header) => Some(header),
        Err(e) => {
            tracing::warn!(error = %e, "identity enrichment failed; report header left blank");
            None
        }
    }
}
