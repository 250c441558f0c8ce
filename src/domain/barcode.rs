//! Barcode payload generation for member cards.
//!
//! The payload is `{login_id}:{token}` where the token is a truncated
//! SHA-256 digest over the user id, the issue timestamp and a server
//! secret. No password material is embedded; the token is opaque to
//! the scanner and verifiable only server-side. Rendering the payload
//! to an actual barcode image is the client's job.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sha2::{Digest, Sha256};
use utoipa::ToSchema;

use super::user::UserId;

/// Hex characters kept from the full digest.
const TOKEN_LEN: usize = 12;

/// A generated barcode payload plus its issue time.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct BarcodePayload {
    /// Scannable payload string, `{login_id}:{token}`.
    pub payload: String,
    /// Token issue timestamp; part of the token derivation.
    pub issued_at: DateTime<Utc>,
}

/// Builds the barcode payload for a user.
#[must_use]
pub fn build_payload(
    user_id: UserId,
    login_id: &str,
    secret: &str,
    issued_at: DateTime<Utc>,
) -> BarcodePayload {
    let mut hasher = Sha256::new();
    hasher.update(user_id.as_uuid().as_bytes());
    hasher.update(issued_at.to_rfc3339().as_bytes());
    hasher.update(secret.as_bytes());
    let digest = format!("{:x}", hasher.finalize());
    let token: String = digest.chars().take(TOKEN_LEN).collect();

    BarcodePayload {
        payload: format!("{login_id}:{token}"),
        issued_at,
    }
}

/// Recomputes and compares the token for server-side verification.
#[must_use]
pub fn verify_payload(
    payload: &BarcodePayload,
    user_id: UserId,
    login_id: &str,
    secret: &str,
) -> bool {
    build_payload(user_id, login_id, secret, payload.issued_at).payload == payload.payload
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn payload_shape() {
        let id = UserId::new();
        let p = build_payload(id, "jiwoo.kim", "secret", Utc::now());
        let mut parts = p.payload.splitn(2, ':');
        assert_eq!(parts.next(), Some("jiwoo.kim"));
        let token = parts.next().unwrap_or_default();
        assert_eq!(token.len(), TOKEN_LEN);
        assert!(token.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn payload_contains_no_password_material() {
        let id = UserId::new();
        let p = build_payload(id, "jiwoo.kim", "server-secret", Utc::now());
        assert!(!p.payload.contains("server-secret"));
    }

    #[test]
    fn verification_round_trip() {
        let id = UserId::new();
        let p = build_payload(id, "jiwoo.kim", "secret", Utc::now());
        assert!(verify_payload(&p, id, "jiwoo.kim", "secret"));
        assert!(!verify_payload(&p, id, "jiwoo.kim", "other-secret"));
        assert!(!verify_payload(&p, UserId::new(), "jiwoo.kim", "secret"));
    }

    #[test]
    fn token_differs_per_issue_time() {
        let id = UserId::new();
        let t1 = Utc::now();
        let Some(t2) = t1.checked_add_signed(chrono::Duration::seconds(1)) else {
            panic!("timestamp overflow");
        };
        let a = build_payload(id, "jiwoo.kim", "secret", t1);
        let b = build_payload(id, "jiwoo.kim", "secret", t2);
        assert_ne!(a.payload, b.payload);
    }
}
