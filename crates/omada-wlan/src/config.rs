//! CLI configuration: a thin wrapper around `omada_config`.
//!
//! Adds the resolution steps that respect `GlobalOpts` flag overrides
//! (--url, --username, --password, --ca-cert, --timeout, --lang).

use std::time::Duration;

use omada_api::{TlsMode, TransportConfig};
use omada_config::ConnectionSettings;

use crate::cli::{GlobalOpts, LanguageArg};
use crate::error::CliError;

// ── Re-exports from shared crate ────────────────────────────────────

pub use omada_config::{Config, Language, config_path, load_config, save_config};

// ── CLI-specific helpers ────────────────────────────────────────────

/// Message language: flag > config.
pub fn language(global: &GlobalOpts, cfg: &Config) -> Language {
    match global.lang {
        Some(LanguageArg::Es) => Language::Es,
        Some(LanguageArg::En) => Language::En,
        None => cfg.language,
    }
}

/// Merge flag overrides into the loaded config and validate the result.
pub fn resolve_connection(
    global: &GlobalOpts,
    cfg: &Config,
) -> Result<ConnectionSettings, CliError> {
    let mut merged = cfg.clone();
    if let Some(ref url) = global.url {
        merged.url.clone_from(url);
    }
    if let Some(ref username) = global.username {
        merged.username.clone_from(username);
    }
    if let Some(ref password) = global.password {
        merged.password.clone_from(password);
    }
    Ok(merged.connection_settings()?)
}

/// Transport settings from flags.
///
/// Without `--ca-cert` the controller's self-signed certificate is accepted.
pub fn transport(global: &GlobalOpts) -> TransportConfig {
    let tls = global
        .ca_cert
        .clone()
        .map_or(TlsMode::DangerAcceptInvalid, TlsMode::CustomCa);

    let config = TransportConfig::default().with_tls(tls);
    match global.timeout {
        Some(secs) => config.with_timeout(Duration::from_secs(secs)),
        None => config,
    }
}
