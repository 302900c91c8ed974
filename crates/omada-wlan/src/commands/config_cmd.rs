//! Config subcommand handlers.

use std::fmt::Write as _;

use dialoguer::{Input, Password, Select};

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts};
use crate::config::{self, Config, Language};
use crate::error::CliError;
use crate::i18n;
use crate::output;

// ── Helpers ─────────────────────────────────────────────────────────

/// Format config for display, masking the password.
fn format_config_redacted(cfg: &Config) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "url      = \"{}\"", cfg.url);
    let _ = writeln!(out, "username = \"{}\"", cfg.username);
    let _ = writeln!(
        out,
        "password = {}",
        if cfg.password.is_empty() { "(not set)" } else { "\"****\"" }
    );
    let _ = write!(out, "language = \"{}\"", cfg.language);
    out
}

/// Map a dialoguer / interactive I/O failure into CliError.
fn prompt_err(e: impl std::fmt::Display) -> CliError {
    CliError::Validation {
        field: "interactive".into(),
        reason: format!("prompt failed: {e}"),
    }
}

fn save(cfg: &Config, global: &GlobalOpts, lang: Language) -> Result<(), CliError> {
    config::save_config(cfg)?;
    let m = i18n::messages(lang);
    output::print_notice(
        &format!("{} {}", m.config_saved, config::config_path().display()),
        global.quiet,
    );
    Ok(())
}

/// Prompt for every field, prefilled with the current values.
fn prompt_config(current: &Config, lang: Language) -> Result<Config, CliError> {
    let m = i18n::messages(lang);

    let url: String = Input::new()
        .with_prompt(m.controller_url)
        .with_initial_text(current.url.clone())
        .validate_with(|input: &String| -> Result<(), String> {
            url_is_valid(input)
        })
        .interact_text()
        .map_err(prompt_err)?;

    let username: String = Input::new()
        .with_prompt(m.username)
        .with_initial_text(current.username.clone())
        .interact_text()
        .map_err(prompt_err)?;

    let password = Password::new()
        .with_prompt(m.password)
        .allow_empty_password(!current.password.is_empty())
        .interact()
        .map_err(prompt_err)?;

    let languages = [Language::Es, Language::En];
    let default_idx = languages
        .iter()
        .position(|l| *l == current.language)
        .unwrap_or_default();
    let choice = Select::new()
        .with_prompt(m.language)
        .items(&["Español", "English"])
        .default(default_idx)
        .interact()
        .map_err(prompt_err)?;

    let mut cfg = Config {
        url: url.trim_end_matches('/').to_owned(),
        username,
        password: current.password.clone(),
        language: languages.get(choice).copied().unwrap_or_default(),
    };
    if !password.is_empty() {
        cfg.password = password;
    }
    Ok(cfg)
}

fn url_is_valid(input: &str) -> Result<(), String> {
    let probe = Config {
        url: input.to_owned(),
        username: "-".into(),
        password: "-".into(),
        language: Language::default(),
    };
    probe
        .connection_settings()
        .map(|_| ())
        .map_err(|e| e.to_string())
}

// ── Handler ─────────────────────────────────────────────────────────

pub fn handle(args: ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        ConfigCommand::Show => {
            let cfg = config::load_config()?;
            output::print_output(&format_config_redacted(&cfg), global.quiet);
            Ok(())
        }

        ConfigCommand::Path => {
            output::print_output(&config::config_path().display().to_string(), global.quiet);
            Ok(())
        }

        ConfigCommand::Set { key, value } => {
            let mut cfg = config::load_config()?;
            cfg.set(key.as_str(), &value)?;
            let lang = config::language(global, &cfg);
            save(&cfg, global, lang)
        }

        ConfigCommand::Init => {
            let current = config::load_config()?;
            let lang = config::language(global, &current);
            let cfg = prompt_config(&current, lang)?;
            save(&cfg, global, config::language(global, &cfg))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn redacted_output_masks_password() {
        let cfg = Config {
            url: "https://omada.local:8043".into(),
            username: "admin".into(),
            password: "hunter2".into(),
            language: Language::En,
        };
        let out = format_config_redacted(&cfg);
        assert!(out.contains("\"****\""));
        assert!(!out.contains("hunter2"));
        assert!(out.contains("language = \"en\""));
    }

    #[test]
    fn url_validation_rejects_bare_host() {
        assert!(url_is_valid("omada.local").is_err());
        assert!(url_is_valid("https://omada.local:8043").is_ok());
    }
}
