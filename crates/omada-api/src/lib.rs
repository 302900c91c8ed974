// omada-api: Async client for the TP-Link Omada SDN controller API

pub mod client;
pub mod error;
pub mod models;
pub mod session;
pub mod transport;

pub use client::ControllerClient;
pub use error::Error;
pub use models::{AccessPoint, ApiEnvelope, Ssid, WlanGroup};
pub use session::{CookieJar, SessionState};
pub use transport::{TlsMode, TransportConfig};
