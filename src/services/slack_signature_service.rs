//! Slack request signing (`X-Slack-Signature` / `X-Slack-Request-Timestamp`).
//!
//! Slack signs `v0:{timestamp}:{raw body}` with HMAC-SHA256 using the app's
//! signing secret and sends `v0={hex digest}`.

use hmac::{Hmac, Mac};
use secrecy::{ExposeSecret, SecretString};
use sha2::Sha256;
use thiserror::Error;

use crate::config::DeploymentMode;

type HmacSha256 = Hmac<Sha256>;

pub const SIGNATURE_HEADER: &str = "x-slack-signature";
pub const TIMESTAMP_HEADER: &str = "x-slack-request-timestamp";
const SIGNATURE_VERSION: &str = "v0";

#[derive(Error, Debug, PartialEq, Eq)]
pub enum SignatureError {
    #[error("missing {0} header")]
    MissingHeader(&'static str),

    #[error("request timestamp is not a unix time")]
    MalformedTimestamp,

    #[error("request timestamp is outside the allowed window")]
    StaleTimestamp,

    #[error("signature is not in v0=<hex> form")]
    MalformedSignature,

    #[error("signature does not match")]
    Mismatch,

    #[error("no signing secret configured")]
    MissingSecret,
}

/// Verifies Slack signatures. In development mode every request passes.
#[derive(Clone)]
pub struct SlackSignatureVerifier {
    secret: Option<SecretString>,
    mode: DeploymentMode,
    tolerance_secs: u64,
}

impl SlackSignatureVerifier {
    pub fn new(secret: Option<SecretString>, mode: DeploymentMode, tolerance_secs: u64) -> Self {
        Self {
            secret,
            mode,
            tolerance_secs,
        }
    }

    pub fn mode(&self) -> DeploymentMode {
        self.mode
    }

    /// Check a request. `now` is the current unix time in seconds.
    pub fn verify(
        &self,
        timestamp: Option<&str>,
        signature: Option<&str>,
        body: &[u8],
        now: i64,
    ) -> Result<(), SignatureError> {
        if !self.mode.verifies_signatures() {
            return Ok(());
        }

        let secret = self.secret.as_ref().ok_or(SignatureError::MissingSecret)?;
        let timestamp = timestamp.ok_or(SignatureError::MissingHeader(TIMESTAMP_HEADER))?;
        let signature = signature.ok_or(SignatureError::MissingHeader(SIGNATURE_HEADER))?;

        let sent_at: i64 = timestamp
            .trim()
            .parse()
            .map_err(|_| SignatureError::MalformedTimestamp)?;
        if now.abs_diff(sent_at) > self.tolerance_secs {
            return Err(SignatureError::StaleTimestamp);
        }

        let provided = signature
            .strip_prefix(SIGNATURE_VERSION)
            .and_then(|s| s.strip_prefix('='))
            .and_then(|hex_digest| hex::decode(hex_digest).ok())
            .ok_or(SignatureError::MalformedSignature)?;

        let mac = signing_mac(secret.expose_secret().as_bytes(), timestamp.trim(), body)?;
        mac.verify_slice(&provided)
            .map_err(|_| SignatureError::Mismatch)
    }
}

/// Compute the `v0=<hex>` signature Slack would send for this body.
pub fn sign(secret: &str, timestamp: &str, body: &[u8]) -> String {
    match signing_mac(secret.as_bytes(), timestamp, body) {
        Ok(mac) => format!(
            "{SIGNATURE_VERSION}={}",
            hex::encode(mac.finalize().into_bytes())
        ),
        Err(_) => String::new(),
    }
}

fn signing_mac(secret: &[u8], timestamp: &str, body: &[u8]) -> Result<HmacSha256, SignatureError> {
    let mut mac = HmacSha256::new_from_slice(secret).map_err(|_| SignatureError::MissingSecret)?;
    mac.update(SIGNATURE_VERSION.as_bytes());
    mac.update(b":");
    mac.update(timestamp.as_bytes());
    mac.update(b":");
    mac.update(body);
    Ok(mac)
}
