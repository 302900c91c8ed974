// Omada controller HTTP client
//
// Composes the transport and the session state into the login handshake
// (controller id -> login -> CSRF token + cookies) and the three site
// operations. Envelope unwrapping and error mapping live here too.

use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use reqwest::Method;
use reqwest::header::{ACCEPT, CONTENT_TYPE, COOKIE, HeaderMap};
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use serde_json::json;
use tracing::{debug, info, warn};
use url::Url;

use crate::error::Error;
use crate::models::{
    AccessPoint, ApiEnvelope, ControllerInfo, DEVICE_TYPE_AP, LoginResult, SsidSettings,
    WlanGroup, display_order,
};
use crate::session::{AuthContext, CookieJar, Session, SessionState};
use crate::transport::TransportConfig;

/// The only site this client addresses.
pub const SITE: &str = "Default";

const CSRF_TOKEN_HEADER: &str = "Csrf-Token";
const JSON: &str = "application/json";
const BODY_PREVIEW_CHARS: usize = 200;

/// Client for one Omada controller and one authenticated session.
///
/// Create it with the controller URL and credentials, call
/// [`connect`](Self::connect), then use the site operations. The session is
/// owned by this value; there is no shared or global state, and a second
/// `connect()` replaces whatever the first one established.
///
/// All methods take `&self`, so the two list operations can run
/// concurrently once connected.
pub struct ControllerClient {
    http: reqwest::Client,
    base_url: Url,
    username: String,
    password: SecretString,
    session: RwLock<Session>,
}

impl ControllerClient {
    /// Create a client, building its HTTP stack from `transport`.
    pub fn new(
        base_url: Url,
        username: impl Into<String>,
        password: SecretString,
        transport: &TransportConfig,
    ) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Ok(Self::with_client(http, base_url, username, password))
    }

    /// Create a client around a pre-built `reqwest::Client`.
    ///
    /// The HTTP client must not carry its own cookie store; the session jar
    /// is managed here.
    pub fn with_client(
        http: reqwest::Client,
        base_url: Url,
        username: impl Into<String>,
        password: SecretString,
    ) -> Self {
        Self {
            http,
            base_url,
            username: username.into(),
            password,
            session: RwLock::new(Session::default()),
        }
    }

    /// The controller base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn state(&self) -> SessionState {
        self.read_session().state()
    }

    pub fn is_connected(&self) -> bool {
        self.state() == SessionState::Authenticated
    }

    /// The controller identifier (`omadacId`) of the current session.
    pub fn controller_id(&self) -> Option<String> {
        self.read_session().controller_id.clone()
    }

    /// The CSRF token of the current session.
    pub fn csrf_token(&self) -> Option<String> {
        self.read_session().csrf_token.clone()
    }

    /// A copy of the current session cookies.
    pub fn cookies(&self) -> CookieJar {
        self.read_session().cookies.clone()
    }

    // ── Session lifecycle ────────────────────────────────────────────

    /// Authenticate against the controller.
    ///
    /// 1. `GET /api/info` for the controller id.
    /// 2. `POST /{omadacId}/api/v2/login` with the credentials for the token.
    ///
    /// All or nothing: the session is cleared first and only populated when
    /// both steps succeed.
    pub async fn connect(&self) -> Result<(), Error> {
        self.write_session().clear();

        match self.handshake().await {
            Ok(session) => {
                info!(
                    controller_id = session.controller_id.as_deref().unwrap_or_default(),
                    "connected to controller"
                );
                *self.write_session() = session;
                Ok(())
            }
            Err(err) => {
                warn!(url = %self.base_url, error = %err, "controller login failed");
                Err(err)
            }
        }
    }

    /// Forget the session. Idempotent, never fails.
    pub fn disconnect(&self) {
        self.write_session().clear();
        debug!("session cleared");
    }

    async fn handshake(&self) -> Result<Session, Error> {
        let mut staging = Session::default();

        let url = self.url("/api/info")?;
        let ctx = staging.handshake_context();
        let info = self
            .exchange(Method::GET, url, None, &ctx, |headers| {
                staging.cookies.replace_from_headers(headers);
            })
            .await?;

        let info: Option<ControllerInfo> = if info.is_success() {
            info.decode_result()?
        } else {
            None
        };
        let controller_id = info
            .and_then(|i| i.omadac_id)
            .filter(|id| !id.is_empty())
            .ok_or_else(|| Error::Authentication {
                message: "missing controller id".into(),
            })?;
        debug!(controller_id, "discovered controller id");
        staging.controller_id = Some(controller_id);

        let url = self.url(&format!(
            "/{}/api/v2/login",
            staging.controller_id.as_deref().unwrap_or_default()
        ))?;
        let body = json!({
            "username": self.username,
            "password": self.password.expose_secret(),
        });
        let ctx = staging.handshake_context();
        let login = self
            .exchange(Method::POST, url, Some(&body), &ctx, |headers| {
                staging.cookies.replace_from_headers(headers);
            })
            .await?;

        if !login.is_success() {
            return Err(Error::Authentication {
                message: login.message(),
            });
        }

        let login: Option<LoginResult> = login.decode_result()?;
        let token = login
            .and_then(|r| r.token)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| Error::Authentication {
                message: "missing token".into(),
            })?;
        staging.csrf_token = Some(token);

        Ok(staging)
    }

    // ── Site operations ──────────────────────────────────────────────

    /// List the site's access points, sorted by name.
    ///
    /// `GET /{omadacId}/api/v2/sites/Default/devices`, keeping only devices
    /// whose `type` is `"ap"`.
    pub async fn list_access_points(&self) -> Result<Vec<AccessPoint>, Error> {
        let devices: Vec<serde_json::Value> = self
            .site_call(Method::GET, "devices", None)
            .await?
            .unwrap_or_default();

        let mut aps = devices
            .into_iter()
            .filter(|d| d.get("type").and_then(serde_json::Value::as_str) == Some(DEVICE_TYPE_AP))
            .map(|d| {
                serde_json::from_value::<AccessPoint>(d.clone()).map_err(|e| Error::Parse {
                    message: format!("invalid access point entry: {e}"),
                    body: d.to_string(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        aps.sort_by(|a, b| display_order(&a.name, &b.name));
        debug!(count = aps.len(), "listed access points");
        Ok(aps)
    }

    /// List the site's WLAN groups, sorted by name.
    ///
    /// `GET /{omadacId}/api/v2/sites/Default/setting/ssids`; the groups sit
    /// under `result.ssids`.
    pub async fn list_wlan_groups(&self) -> Result<Vec<WlanGroup>, Error> {
        let settings: Option<SsidSettings> =
            self.site_call(Method::GET, "setting/ssids", None).await?;

        let mut groups = settings.map(|s| s.ssids).unwrap_or_default();
        groups.sort_by(|a, b| display_order(&a.wlan_name, &b.wlan_name));
        debug!(count = groups.len(), "listed WLAN groups");
        Ok(groups)
    }

    /// Bind an access point to a WLAN group.
    ///
    /// `PATCH /{omadacId}/api/v2/sites/Default/eaps/{mac}` with
    /// `{"wlanId": ...}`. The controller is authoritative; nothing is
    /// validated or cached locally, so callers refetch to see the change.
    pub async fn reassign_wlan_group(&self, mac: &str, wlan_group_id: &str) -> Result<(), Error> {
        debug!(mac, wlan_group_id, "reassigning WLAN group");
        let body = json!({ "wlanId": wlan_group_id });
        let _: Option<serde_json::Value> = self
            .site_call(Method::PATCH, &format!("eaps/{mac}"), Some(&body))
            .await?;
        Ok(())
    }

    // ── Request helpers ──────────────────────────────────────────────

    /// Authenticated call against a site-scoped path.
    ///
    /// Fails with [`Error::NotConnected`] before touching the network when
    /// the session is not authenticated.
    async fn site_call<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<&serde_json::Value>,
    ) -> Result<Option<T>, Error> {
        let ctx = self.read_session().auth_context()?;
        let url = self.url(&format!(
            "/{}/api/v2/sites/{SITE}/{path}",
            ctx.controller_id
        ))?;

        let envelope = self
            .exchange(method, url, body, &ctx, |headers| {
                let mut session = self.write_session();
                // Skip if the session was replaced or cleared meanwhile.
                if session.controller_id.as_deref() == Some(ctx.controller_id.as_str()) {
                    session.cookies.replace_from_headers(headers);
                }
            })
            .await?;

        envelope.into_result()
    }

    /// Send one request and parse the envelope, leaving `result` untyped.
    ///
    /// `on_headers` sees the response headers before the body is read, so
    /// cookies are captured even when the body turns out to be garbage.
    async fn exchange(
        &self,
        method: Method,
        url: Url,
        body: Option<&serde_json::Value>,
        ctx: &AuthContext,
        on_headers: impl FnOnce(&HeaderMap),
    ) -> Result<ApiEnvelope, Error> {
        debug!(%method, %url, "sending request");
        let url_str = url.to_string();
        let transport_err = |source| Error::Transport {
            url: url_str.clone(),
            source,
        };

        let mut builder = self
            .http
            .request(method, url)
            .header(CONTENT_TYPE, JSON)
            .header(ACCEPT, JSON);
        if let Some(token) = ctx.csrf_token.as_deref() {
            builder = builder.header(CSRF_TOKEN_HEADER, token);
        }
        if let Some(cookie) = ctx.cookie_header.as_deref() {
            builder = builder.header(COOKIE, cookie);
        }
        if let Some(body) = body {
            builder = builder.json(body);
        }

        let resp = builder.send().await.map_err(transport_err)?;
        let status = resp.status();
        on_headers(resp.headers());

        let text = resp.text().await.map_err(transport_err)?;
        let parsed = serde_json::from_str::<ApiEnvelope>(&text);
        parsed.map_err(|e| {
            let preview: String = text.chars().take(BODY_PREVIEW_CHARS).collect();
            Error::Parse {
                message: format!("{e} (HTTP {status}, body preview: {preview:?})"),
                body: text,
            }
        })
    }

    /// `{base}{path}` with any trailing `/` on the base dropped.
    fn url(&self, path: &str) -> Result<Url, Error> {
        let base = self.base_url.as_str().trim_end_matches('/');
        Ok(Url::parse(&format!("{base}{path}"))?)
    }

    fn read_session(&self) -> RwLockReadGuard<'_, Session> {
        self.session.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_session(&self) -> RwLockWriteGuard<'_, Session> {
        self.session.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl std::fmt::Debug for ControllerClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ControllerClient")
            .field("base_url", &self.base_url.as_str())
            .field("username", &self.username)
            .field("state", &self.state())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    fn client(base: &str) -> ControllerClient {
        ControllerClient::with_client(
            reqwest::Client::new(),
            Url::parse(base).unwrap(),
            "admin",
            SecretString::from("secret".to_string()),
        )
    }

    #[test]
    fn url_drops_trailing_slash() {
        let c = client("https://omada.local:8043/");
        assert_eq!(
            c.url("/api/info").unwrap().as_str(),
            "https://omada.local:8043/api/info"
        );
    }

    #[test]
    fn new_client_is_unauthenticated() {
        let c = client("https://omada.local:8043");
        assert_eq!(c.state(), SessionState::Unauthenticated);
        assert!(c.controller_id().is_none());
        c.disconnect();
        c.disconnect();
        assert!(!c.is_connected());
    }

    #[test]
    fn debug_hides_password() {
        let c = client("https://omada.local:8043");
        let out = format!("{c:?}");
        assert!(!out.contains("secret"));
    }
}
