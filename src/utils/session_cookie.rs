//! Signed session cookie encoding.
//!
//! Cookie value format: `<session id>.<hex HMAC-SHA256(session id)>`.

use hmac::{Hmac, Mac};
use sha2::Sha256;
use std::time::Duration;

type HmacSha256 = Hmac<Sha256>;

/// Name of the session cookie.
pub const SESSION_COOKIE: &str = "sid";

/// Signs session ids and renders `Set-Cookie` values.
#[derive(Clone)]
pub struct CookieSigner {
    secret: Vec<u8>,
    max_age: Duration,
    secure: bool,
}

impl CookieSigner {
    /// # Arguments
    ///
    /// - `secret` - HMAC key (`SESSION_SECRET`)
    /// - `max_age` - cookie lifetime, normally the session TTL
    /// - `secure` - add the `Secure` attribute
    pub fn new(secret: &str, max_age: Duration, secure: bool) -> Self {
        Self {
            secret: secret.as_bytes().to_vec(),
            max_age,
            secure,
        }
    }

    fn mac(&self) -> HmacSha256 {
        HmacSha256::new_from_slice(&self.secret).expect("HMAC accepts any key length")
    }

    /// Returns `id.signature`.
    pub fn sign(&self, session_id: &str) -> String {
        let mut mac = self.mac();
        mac.update(session_id.as_bytes());
        format!("{}.{}", session_id, hex::encode(mac.finalize().into_bytes()))
    }

    /// Returns the session id if the signature is valid.
    pub fn verify(&self, cookie_value: &str) -> Option<String> {
        let (session_id, signature) = cookie_value.rsplit_once('.')?;
        let signature = hex::decode(signature).ok()?;

        let mut mac = self.mac();
        mac.update(session_id.as_bytes());
        mac.verify_slice(&signature).ok()?;

        Some(session_id.to_string())
    }

    /// `Set-Cookie` value carrying a signed session id.
    pub fn set_cookie(&self, session_id: &str) -> String {
        let mut cookie = format!(
            "{}={}; Path=/; HttpOnly; SameSite=Lax; Max-Age={}",
            SESSION_COOKIE,
            self.sign(session_id),
            self.max_age.as_secs()
        );
        if self.secure {
            cookie.push_str("; Secure");
        }
        cookie
    }
}

impl std::fmt::Debug for CookieSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CookieSigner")
            .field("max_age", &self.max_age)
            .field("secure", &self.secure)
            .finish_non_exhaustive()
    }
}

/// Extracts the raw session cookie value from a `Cookie` header.
///
/// Handles multiple cookies separated by semicolons and ignores the others.
pub fn find_session_cookie(cookie_header: &str) -> Option<&str> {
    cookie_header.split(';').find_map(|cookie| {
        let mut parts = cookie.trim().splitn(2, '=');
        match (parts.next(), parts.next()) {
            (Some(SESSION_COOKIE), Some(value)) if !value.is_empty() => Some(value),
            _ => None,
        }
    })
}
