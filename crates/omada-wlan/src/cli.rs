//! Clap derive structures for the `omada-wlan` CLI.
//!
//! Defines the command tree, global flags, and shared value enums. This file
//! is also compiled by `build.rs` for man page generation, so it must only
//! depend on `clap` and `clap_complete`.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// omada-wlan -- move TP-Link Omada access points between WLAN groups
#[derive(Debug, Parser)]
#[command(
    name = "omada-wlan",
    version,
    about = "Reassign WLAN groups on TP-Link Omada access points",
    long_about = "Lists the access points and WLAN groups of an Omada SDN controller\n\
        and re-binds an access point to a different WLAN group.\n\n\
        Connection settings come from ~/.omada-wlan-manager/config.json,\n\
        OMADA_* environment variables, or the flags below.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Controller URL, e.g. https://192.168.0.10:8043 (overrides config)
    #[arg(long, short = 'u', env = "OMADA_URL", global = true)]
    pub url: Option<String>,

    /// Controller username (overrides config)
    #[arg(long, env = "OMADA_USERNAME", global = true)]
    pub username: Option<String>,

    /// Controller password (overrides config)
    #[arg(long, env = "OMADA_PASSWORD", global = true, hide_env_values = true)]
    pub password: Option<String>,

    /// Verify the controller certificate against this CA instead of accepting it as-is
    #[arg(long, global = true, value_name = "PEM")]
    pub ca_cert: Option<PathBuf>,

    /// Request timeout in seconds (default: none)
    #[arg(long, env = "OMADA_TIMEOUT", global = true)]
    pub timeout: Option<u64>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "OMADA_OUTPUT",
        default_value = "table",
        global = true
    )]
    pub output: OutputFormat,

    /// Message language (overrides config)
    #[arg(long, global = true)]
    pub lang: Option<LanguageArg>,

    /// When to use color output
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorMode,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Skip confirmation prompts
    #[arg(long, short = 'y', global = true)]
    pub yes: bool,
}

// ── Value Enums ──────────────────────────────────────────────────────

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one identifier per line (scripting)
    Plain,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LanguageArg {
    /// Español
    Es,
    /// English
    En,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ConfigKey {
    Url,
    Username,
    Password,
    Language,
}

impl ConfigKey {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Url => "url",
            Self::Username => "username",
            Self::Password => "password",
            Self::Language => "language",
        }
    }
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List access points and their WLAN groups
    #[command(alias = "ap")]
    Aps(ApsArgs),

    /// List WLAN groups and their SSIDs
    #[command(alias = "wlan", alias = "w")]
    Wlans(WlansArgs),

    /// Assign a WLAN group to an access point
    Assign(AssignArgs),

    /// Manage the connection configuration
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── Shared List Arguments ────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct FilterArgs {
    /// Only show entries whose name (or WLAN group / SSID) contains TEXT
    #[arg(long, short = 'f', value_name = "TEXT")]
    pub filter: Option<String>,
}

// ── Access Points ────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ApsArgs {
    #[command(subcommand)]
    pub command: ApsCommand,
}

#[derive(Debug, Subcommand)]
pub enum ApsCommand {
    /// List access points, sorted by name
    #[command(alias = "ls")]
    List(FilterArgs),
}

// ── WLAN Groups ──────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct WlansArgs {
    #[command(subcommand)]
    pub command: WlansCommand,
}

#[derive(Debug, Subcommand)]
pub enum WlansCommand {
    /// List WLAN groups, sorted by name
    #[command(alias = "ls")]
    List(FilterArgs),
}

// ── Assign ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct AssignArgs {
    /// Access point MAC address or exact name
    pub ap: String,

    /// WLAN group id or exact name
    pub wlan: String,
}

// ── Config ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show the current configuration (password masked)
    Show,

    /// Print the configuration file path
    Path,

    /// Set a single configuration value
    Set {
        /// Key to set
        key: ConfigKey,
        /// New value
        value: String,
    },

    /// Interactively create or update the configuration
    Init,
}

// ── Completions ──────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
