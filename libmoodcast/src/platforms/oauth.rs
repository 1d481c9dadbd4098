//! OAuth 1.0a request signing (HMAC-SHA1)
//!
//! Twitter's v2 `POST /2/tweets` needs user-context auth. JSON bodies are not
//! part of the signature base string, so only the OAuth parameters and any
//! query parameters are signed.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use hmac::{Hmac, Mac};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use rand::distributions::Alphanumeric;
use rand::Rng;
use secrecy::{ExposeSecret, SecretString};
use sha1::Sha1;

use crate::error::PlatformError;

type HmacSha1 = Hmac<Sha1>;

/// RFC 3986 unreserved characters stay as-is; everything else is encoded
const OAUTH_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

pub fn percent_encode(input: &str) -> String {
    utf8_percent_encode(input, OAUTH_SET).to_string()
}

/// Consumer and access credentials for user-context requests
#[derive(Debug, Clone)]
pub struct OAuthCredentials {
    pub consumer_key: SecretString,
    pub consumer_secret: SecretString,
    pub access_token: SecretString,
    pub access_secret: SecretString,
}

/// Per-request values that make each signature unique
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Nonce {
    pub nonce: String,
    pub timestamp: i64,
}

impl Nonce {
    pub fn generate() -> Self {
        let nonce: String = rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(32)
            .map(char::from)
            .collect();

        Self {
            nonce,
            timestamp: chrono::Utc::now().timestamp(),
        }
    }
}

impl OAuthCredentials {
    /// Build the `Authorization` header value for a request
    ///
    /// `params` holds query or form parameters that must be covered by the
    /// signature.
    pub fn authorization_header(
        &self,
        method: &str,
        url: &str,
        params: &[(&str, &str)],
        nonce: &Nonce,
    ) -> Result<String, PlatformError> {
        let timestamp = nonce.timestamp.to_string();
        let oauth_params: [(&str, &str); 6] = [
            ("oauth_consumer_key", self.consumer_key.expose_secret()),
            ("oauth_nonce", nonce.nonce.as_str()),
            ("oauth_signature_method", "HMAC-SHA1"),
            ("oauth_timestamp", timestamp.as_str()),
            ("oauth_token", self.access_token.expose_secret()),
            ("oauth_version", "1.0"),
        ];

        let mut signed: Vec<(&str, &str)> = oauth_params.to_vec();
        signed.extend_from_slice(params);
        let signature = self.sign(method, url, &signed)?;

        let header = oauth_params
            .iter()
            .copied()
            .chain(std::iter::once(("oauth_signature", signature.as_str())))
            .map(|(k, v)| format!("{}=\"{}\"", percent_encode(k), percent_encode(v)))
            .collect::<Vec<_>>()
            .join(", ");

        Ok(format!("OAuth {}", header))
    }

    fn sign(&self, method: &str, url: &str, params: &[(&str, &str)]) -> Result<String, PlatformError> {
        let base = signature_base_string(method, url, params);
        let key = format!(
            "{}&{}",
            percent_encode(self.consumer_secret.expose_secret()),
            percent_encode(self.access_secret.expose_secret())
        );

        let mut mac = HmacSha1::new_from_slice(key.as_bytes())
            .map_err(|e| PlatformError::Authentication(format!("Invalid HMAC key: {}", e)))?;
        mac.update(base.as_bytes());

        Ok(STANDARD.encode(mac.finalize().into_bytes()))
    }
}

/// `METHOD&url&params`, each part percent-encoded, params sorted after encoding
pub fn signature_base_string(method: &str, url: &str, params: &[(&str, &str)]) -> String {
    let mut encoded: Vec<(String, String)> = params
        .iter()
        .map(|(k, v)| (percent_encode(k), percent_encode(v)))
        .collect();
    encoded.sort();

    let param_string = encoded
        .iter()
        .map(|(k, v)| format!("{}={}", k, v))
        .collect::<Vec<_>>()
        .join("&");

    format!(
        "{}&{}&{}",
        method.to_uppercase(),
        percent_encode(url),
        percent_encode(&param_string)
    )
}
