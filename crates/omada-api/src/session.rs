// Session state for one controller connection.
//
// Holds the controller id, the CSRF token returned by login, and the
// cookie jar. The jar is replaced wholesale by every response that
// carries `Set-Cookie`; the controller always resends the full set.

use reqwest::header::{HeaderMap, SET_COOKIE};
use tracing::trace;

use crate::error::Error;

/// Where a session is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Unauthenticated,
    Authenticated,
}

/// Ordered `name=value` cookie pairs, attributes stripped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CookieJar {
    pairs: Vec<String>,
}

impl CookieJar {
    /// Replace the jar with the cookies set by a response.
    ///
    /// Only the `name=value` segment of each `Set-Cookie` header is kept
    /// (`Path`, `Expires`, `HttpOnly`, ... are dropped). Returns `false`
    /// and leaves the jar untouched when the response set no cookies.
    pub fn replace_from_headers(&mut self, headers: &HeaderMap) -> bool {
        let mut set_cookies = headers.get_all(SET_COOKIE).iter().peekable();
        if set_cookies.peek().is_none() {
            return false;
        }

        self.pairs = set_cookies
            .filter_map(|value| value.to_str().ok())
            .filter_map(cookie_pair)
            .collect();
        trace!(count = self.pairs.len(), "cookie jar replaced");
        true
    }

    /// The `Cookie` header value, or `None` when the jar is empty.
    pub fn header_value(&self) -> Option<String> {
        if self.pairs.is_empty() {
            None
        } else {
            Some(self.pairs.join("; "))
        }
    }

    pub fn pairs(&self) -> &[String] {
        &self.pairs
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn clear(&mut self) {
        self.pairs.clear();
    }
}

fn cookie_pair(raw: &str) -> Option<String> {
    let pair = raw.split(';').next().unwrap_or_default().trim();
    (!pair.is_empty()).then(|| pair.to_owned())
}

/// Session-scoped data obtained by the authentication handshake.
#[derive(Debug, Clone, Default)]
pub(crate) struct Session {
    pub(crate) controller_id: Option<String>,
    pub(crate) csrf_token: Option<String>,
    pub(crate) cookies: CookieJar,
}

impl Session {
    pub(crate) fn state(&self) -> SessionState {
        let present = |v: Option<&str>| v.is_some_and(|s| !s.is_empty());
        if present(self.controller_id.as_deref()) && present(self.csrf_token.as_deref()) {
            SessionState::Authenticated
        } else {
            SessionState::Unauthenticated
        }
    }

    pub(crate) fn clear(&mut self) {
        self.controller_id = None;
        self.csrf_token = None;
        self.cookies.clear();
    }

    /// Snapshot the headers an authenticated call needs.
    ///
    /// Fails with [`Error::NotConnected`] unless both the controller id and
    /// the CSRF token are present.
    pub(crate) fn auth_context(&self) -> Result<AuthContext, Error> {
        if self.state() != SessionState::Authenticated {
            return Err(Error::NotConnected);
        }
        Ok(self.handshake_context())
    }

    /// Headers for the handshake, before a token exists.
    pub(crate) fn handshake_context(&self) -> AuthContext {
        AuthContext {
            controller_id: self.controller_id.clone().unwrap_or_default(),
            csrf_token: self.csrf_token.clone(),
            cookie_header: self.cookies.header_value(),
        }
    }
}

/// Owned copy of the per-request session headers.
///
/// Taken out of the session lock before sending so no lock is held
/// across an `.await`.
#[derive(Debug, Clone)]
pub(crate) struct AuthContext {
    pub(crate) controller_id: String,
    pub(crate) csrf_token: Option<String>,
    pub(crate) cookie_header: Option<String>,
}
