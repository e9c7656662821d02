//! Session cookie and anti-forgery token handling.
//!
//! Each browser session gets an opaque id in a cookie; the form embeds an
//! HMAC-SHA256 of that id under the process signing secret. A submission is
//! accepted only when the posted token matches the session cookie it was
//! issued for, which rejects forged cross-site posts.

use hmac::{Hmac, Mac};
use http::{header, HeaderMap};
use sha2::Sha256;
use uuid::Uuid;

type HmacSha256 = Hmac<Sha256>;

/// Cookie carrying the opaque session id.
pub const SESSION_COOKIE: &str = "lead_session";

/// Generate a fresh opaque session id.
pub fn new_session_id() -> String {
    Uuid::new_v4().simple().to_string()
}

/// Compute the anti-forgery token for a session id.
pub fn issue_token(secret: &str, session_id: &str) -> String {
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .expect("HMAC accepts keys of any length");
    mac.update(session_id.as_bytes());
    hex::encode(mac.finalize().into_bytes())
}

/// Verify a submitted token against the session it was issued for.
///
/// Comparison happens inside the MAC verification, which is constant-time.
pub fn verify_token(secret: &str, session_id: &str, token: &str) -> bool {
    let Ok(decoded) = hex::decode(token) else {
        return false;
    };
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .expect("HMAC accepts keys of any length");
    mac.update(session_id.as_bytes());
    mac.verify_slice(&decoded).is_ok()
}

/// `Set-Cookie` value establishing the session cookie.
pub fn session_cookie(session_id: &str) -> String {
    format!(
        "{}={}; Path=/; HttpOnly; SameSite=Lax",
        SESSION_COOKIE, session_id
    )
}

/// Extract the session id from the request headers, if present.
pub fn session_from_headers(headers: &HeaderMap) -> Option<String> {
    cookie_value(headers, SESSION_COOKIE)
}

/// Look up a single cookie by name in the `Cookie` request header.
pub fn cookie_value(headers: &HeaderMap, name: &str) -> Option<String> {
    let raw = headers.get(header::COOKIE)?.to_str().ok()?;
    raw.split(';').find_map(|pair| {
        let (key, value) = pair.trim().split_once('=')?;
        (key == name).then(|| value.to_string())
    })
}
