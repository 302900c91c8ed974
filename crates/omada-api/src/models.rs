// Omada API response types
//
// Every endpoint answers with the `{ errorCode, msg, result }` envelope.
// Fields use `#[serde(default)]` where firmware versions disagree about
// presence; only the identifiers are required.

use std::cmp::Ordering;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::Error;

// ── Response Envelope ────────────────────────────────────────────────

/// Standard Omada response envelope.
///
/// ```json
/// { "errorCode": 0, "msg": "Success.", "result": { ... } }
/// ```
///
/// `result` stays untyped until `errorCode` has been checked.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiEnvelope<T = serde_json::Value> {
    pub error_code: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub msg: String,
    pub result: Option<T>,
}

impl<T> ApiEnvelope<T> {
    pub fn is_success(&self) -> bool {
        self.error_code == 0
    }

    /// The controller message, or a generic one naming the code.
    pub fn message(&self) -> String {
        if self.msg.is_empty() {
            format!("controller returned error code {}", self.error_code)
        } else {
            self.msg.clone()
        }
    }
}

impl ApiEnvelope {
    /// Unwrap the envelope: `Error::Api` on a nonzero `errorCode`, otherwise
    /// decode `result` into `T` (`Error::Parse` if it has the wrong shape).
    pub fn into_result<T: DeserializeOwned>(self) -> Result<Option<T>, Error> {
        if !self.is_success() {
            return Err(Error::Api {
                code: self.error_code,
                message: self.message(),
            });
        }
        self.decode_result()
    }

    /// Decode `result` into `T` without looking at `errorCode`.
    pub fn decode_result<T: DeserializeOwned>(self) -> Result<Option<T>, Error> {
        let Some(value) = self.result else {
            return Ok(None);
        };
        let body = value.to_string();
        serde_json::from_value(value)
            .map(Some)
            .map_err(|e| Error::Parse {
                message: format!("unexpected result shape: {e}"),
                body,
            })
    }
}

/// `null` and absent both mean "use the default".
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// `result` of `GET /api/info`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ControllerInfo {
    #[serde(default)]
    pub omadac_id: Option<String>,
}

/// `result` of `POST /{omadacId}/api/v2/login`.
#[derive(Debug, Deserialize)]
pub(crate) struct LoginResult {
    #[serde(default)]
    pub token: Option<String>,
}

/// `result` of the SSID settings endpoint: an object, not a bare list.
#[derive(Debug, Deserialize)]
pub(crate) struct SsidSettings {
    #[serde(default, deserialize_with = "null_as_default")]
    pub ssids: Vec<WlanGroup>,
}

// ── Access Point ─────────────────────────────────────────────────────

/// Device type string the controller uses for access points.
pub const DEVICE_TYPE_AP: &str = "ap";

/// A device from the site devices endpoint.
///
/// Only entries whose `type` is `"ap"` survive `list_access_points`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessPoint {
    pub mac: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(rename = "type", default, deserialize_with = "null_as_default")]
    pub device_type: String,
    /// Name of the assigned WLAN group; empty (or `null` on the wire) when unassigned.
    #[serde(rename = "wlanGroup", default, deserialize_with = "null_as_default")]
    pub wlan_group_name: String,
    /// 0=disconnected, 1=connected, 2=pending, others vendor-specific.
    #[serde(default, deserialize_with = "null_as_default")]
    pub status_category: i64,
}

impl AccessPoint {
    /// Status categories 1 and 2 count as online.
    pub fn is_online(&self) -> bool {
        matches!(self.status_category, 1 | 2)
    }

    pub fn wlan_group(&self) -> Option<&str> {
        (!self.wlan_group_name.is_empty()).then_some(self.wlan_group_name.as_str())
    }

    /// Case-insensitive substring match on name or WLAN group name.
    pub fn matches_filter(&self, text: &str) -> bool {
        let needle = text.to_lowercase();
        self.name.to_lowercase().contains(&needle)
            || self.wlan_group_name.to_lowercase().contains(&needle)
    }
}

// ── WLAN Group ───────────────────────────────────────────────────────

/// A named bundle of SSIDs assignable to an access point.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WlanGroup {
    pub wlan_id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub wlan_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub ssid_list: Vec<Ssid>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ssid {
    #[serde(default, deserialize_with = "null_as_default")]
    pub ssid_name: String,
}

impl WlanGroup {
    pub fn ssid_names(&self) -> impl Iterator<Item = &str> {
        self.ssid_list.iter().map(|s| s.ssid_name.as_str())
    }

    /// Case-insensitive substring match on the group name or any SSID.
    pub fn matches_filter(&self, text: &str) -> bool {
        let needle = text.to_lowercase();
        self.wlan_name.to_lowercase().contains(&needle)
            || self
                .ssid_names()
                .any(|s| s.to_lowercase().contains(&needle))
    }
}

// ── Ordering ─────────────────────────────────────────────────────────

/// Display-name ordering shared by the AP and WLAN listings.
///
/// Lowercase form first, so `"alpha" < "Beta"`. Names equal ignoring case
/// put lowercase before uppercase (`"alpha" < "Alpha"`), as locale
/// collation does.
pub fn display_order(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| b.cmp(a))
}
