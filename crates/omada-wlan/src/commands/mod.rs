//! Command dispatch: bridges CLI args -> controller client -> output formatting.

pub mod aps;
pub mod assign;
pub mod config_cmd;
pub mod util;
pub mod wlans;

use omada_api::ControllerClient;

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;
use crate::i18n::Messages;

/// Per-invocation settings every handler needs.
pub struct Context<'a> {
    pub global: &'a GlobalOpts,
    pub messages: &'static Messages,
    pub color: bool,
}

/// Dispatch a controller-bound command to the appropriate handler.
///
/// The client is already connected; it is passed in explicitly rather than
/// kept in any global.
pub async fn dispatch(
    cmd: Command,
    client: &ControllerClient,
    ctx: &Context<'_>,
) -> Result<(), CliError> {
    match cmd {
        Command::Aps(args) => aps::handle(client, args, ctx).await,
        Command::Wlans(args) => wlans::handle(client, args, ctx).await,
        Command::Assign(args) => assign::handle(client, args, ctx).await,
        // Config and Completions are handled before dispatch
        Command::Config(_) | Command::Completions(_) => unreachable!(),
    }
}
