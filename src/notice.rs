//! One-shot notices carried across the post-submit redirect.
//!
//! The submit handler attaches the notice to the redirect as a short-lived
//! cookie; the next form render displays it once and clears the cookie.

use http::HeaderMap;
use serde::{Deserialize, Serialize};

use crate::session;

/// Cookie carrying the pending notice between redirect and next render.
pub const NOTICE_COOKIE: &str = "lead_notice";

/// Notices are transient; the cookie expires on its own if the browser
/// never comes back to render it.
const NOTICE_MAX_AGE_SECS: u32 = 60;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Success,
    Error,
}

impl Severity {
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Success => "success",
            Severity::Error => "error",
        }
    }

    fn parse(raw: &str) -> Option<Self> {
        match raw {
            "success" => Some(Severity::Success),
            "error" => Some(Severity::Error),
            _ => None,
        }
    }
}

/// A severity-tagged message rendered exactly once on the next page view.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub severity: Severity,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            message: message.into(),
        }
    }

    /// Cookie-safe encoding: severity tag plus hex of the message bytes.
    fn encode(&self) -> String {
        format!("{}.{}", self.severity.as_str(), hex::encode(&self.message))
    }

    fn decode(raw: &str) -> Option<Self> {
        let (severity, message_hex) = raw.split_once('.')?;
        let severity = Severity::parse(severity)?;
        let message = String::from_utf8(hex::decode(message_hex).ok()?).ok()?;
        Some(Self { severity, message })
    }

    /// `Set-Cookie` value attaching this notice to a redirect.
    pub fn set_cookie(&self) -> String {
        format!(
            "{}={}; Path=/; HttpOnly; SameSite=Lax; Max-Age={}",
            NOTICE_COOKIE,
            self.encode(),
            NOTICE_MAX_AGE_SECS
        )
    }

    /// Read the pending notice from the request headers, if any.
    pub fn from_headers(headers: &HeaderMap) -> Option<Self> {
        let raw = session::cookie_value(headers, NOTICE_COOKIE)?;
        Self::decode(&raw)
    }
}

/// `Set-Cookie` value discarding a consumed notice.
pub fn clear_cookie() -> String {
    format!("{}=; Path=/; HttpOnly; Max-Age=0", NOTICE_COOKIE)
}
