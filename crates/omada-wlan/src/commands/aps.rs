//! Access point command handlers.

use omada_api::{AccessPoint, ControllerClient};
use tabled::Tabled;

use crate::cli::{ApsArgs, ApsCommand, OutputFormat};
use crate::error::CliError;
use crate::output;

use super::Context;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
pub(super) struct ApRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "MAC")]
    mac: String,
    #[tabled(rename = "WLAN")]
    wlan: String,
    #[tabled(rename = "Status")]
    status: String,
}

pub(super) fn row(ap: &AccessPoint, ctx: &Context<'_>) -> ApRow {
    let m = ctx.messages;
    ApRow {
        name: ap.name.clone(),
        mac: ap.mac.clone(),
        wlan: ap.wlan_group().unwrap_or(m.unassigned).to_owned(),
        status: output::status_cell(
            ap.is_online(),
            if ap.is_online() { m.online } else { m.offline },
            ctx.color,
        ),
    }
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    client: &ControllerClient,
    args: ApsArgs,
    ctx: &Context<'_>,
) -> Result<(), CliError> {
    match args.command {
        ApsCommand::List(list) => {
            let aps = client.list_access_points().await?;
            let shown: Vec<AccessPoint> = match list.filter.as_deref() {
                Some(text) => aps
                    .into_iter()
                    .filter(|ap| ap.matches_filter(text))
                    .collect(),
                None => aps,
            };

            if shown.is_empty() && matches!(ctx.global.output, OutputFormat::Table) {
                let notice = list.filter.as_deref().map_or_else(
                    || ctx.messages.no_access_points.to_owned(),
                    |f| ctx.messages.no_results(f),
                );
                output::print_notice(&notice, ctx.global.quiet);
                return Ok(());
            }

            let out = output::render_list(
                &ctx.global.output,
                &shown,
                |ap| row(ap, ctx),
                |ap| ap.mac.clone(),
            );
            output::print_output(&out, ctx.global.quiet);
            Ok(())
        }
    }
}
