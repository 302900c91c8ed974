//! Shared helpers for command handlers.

use std::io::IsTerminal;

use omada_api::{AccessPoint, WlanGroup};

use crate::error::CliError;

/// Normalise a MAC for comparison: uppercase, `-` separated.
fn normalize_mac(mac: &str) -> String {
    mac.trim().to_ascii_uppercase().replace(':', "-")
}

/// Find an access point by MAC (any separator, any case) or exact name.
pub fn resolve_access_point<'a>(
    aps: &'a [AccessPoint],
    identifier: &str,
) -> Result<&'a AccessPoint, CliError> {
    let mac = normalize_mac(identifier);
    if let Some(ap) = aps.iter().find(|ap| normalize_mac(&ap.mac) == mac) {
        return Ok(ap);
    }
    unique_by_name(aps.iter().filter(|ap| ap.name == identifier), identifier).ok_or_else(|| {
        CliError::NotFound {
            resource_type: "access point".into(),
            identifier: identifier.into(),
            list_command: "aps list".into(),
        }
    })?
}

/// Find a WLAN group by id or exact name.
pub fn resolve_wlan_group<'a>(
    groups: &'a [WlanGroup],
    identifier: &str,
) -> Result<&'a WlanGroup, CliError> {
    if let Some(group) = groups.iter().find(|g| g.wlan_id == identifier) {
        return Ok(group);
    }
    unique_by_name(groups.iter().filter(|g| g.wlan_name == identifier), identifier).ok_or_else(
        || CliError::NotFound {
            resource_type: "WLAN group".into(),
            identifier: identifier.into(),
            list_command: "wlans list".into(),
        },
    )?
}

/// `None` if nothing matched, an error if the name is shared by several entries.
fn unique_by_name<'a, T>(
    mut matches: impl Iterator<Item = &'a T>,
    name: &str,
) -> Option<Result<&'a T, CliError>> {
    let first = matches.next()?;
    if matches.next().is_some() {
        return Some(Err(CliError::Validation {
            field: "name".into(),
            reason: format!("'{name}' matches more than one entry; use the MAC address or id"),
        }));
    }
    Some(Ok(first))
}

/// Prompt for confirmation, auto-approving if `--yes` was passed.
pub fn confirm(message: &str, yes_flag: bool) -> Result<bool, CliError> {
    if yes_flag {
        return Ok(true);
    }
    if !std::io::stdin().is_terminal() {
        return Err(CliError::Validation {
            field: "confirmation".into(),
            reason: "not running interactively; pass --yes to confirm".into(),
        });
    }
    let confirmed = dialoguer::Confirm::new()
        .with_prompt(message)
        .default(false)
        .interact()
        .map_err(|e| CliError::Io(std::io::Error::other(e)))?;
    Ok(confirmed)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    fn ap(mac: &str, name: &str) -> AccessPoint {
        AccessPoint {
            mac: mac.into(),
            name: name.into(),
            device_type: "ap".into(),
            wlan_group_name: String::new(),
            status_category: 1,
        }
    }

    fn group(id: &str, name: &str) -> WlanGroup {
        WlanGroup {
            wlan_id: id.into(),
            wlan_name: name.into(),
            ssid_list: Vec::new(),
        }
    }

    #[test]
    fn access_point_by_mac_ignores_separator_and_case() {
        let aps = [ap("AA-BB-CC-DD-EE-01", "Lobby")];
        let found = resolve_access_point(&aps, "aa:bb:cc:dd:ee:01").unwrap();
        assert_eq!(found.name, "Lobby");
    }

    #[test]
    fn access_point_by_name() {
        let aps = [ap("AA-BB-CC-DD-EE-01", "Lobby"), ap("AA-BB-CC-DD-EE-02", "Office")];
        assert_eq!(resolve_access_point(&aps, "Office").unwrap().mac, "AA-BB-CC-DD-EE-02");
    }

    #[test]
    fn duplicate_names_are_ambiguous() {
        let aps = [ap("AA-BB-CC-DD-EE-01", "AP"), ap("AA-BB-CC-DD-EE-02", "AP")];
        assert!(matches!(
            resolve_access_point(&aps, "AP"),
            Err(CliError::Validation { .. })
        ));
    }

    #[test]
    fn unknown_wlan_group_is_not_found() {
        let groups = [group("w1", "Default")];
        assert_eq!(resolve_wlan_group(&groups, "Default").unwrap().wlan_id, "w1");
        assert_eq!(resolve_wlan_group(&groups, "w1").unwrap().wlan_name, "Default");
        assert!(matches!(
            resolve_wlan_group(&groups, "Guests"),
            Err(CliError::NotFound { .. })
        ));
    }
}
