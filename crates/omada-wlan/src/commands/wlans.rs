//! WLAN group command handlers.

use omada_api::{ControllerClient, WlanGroup};
use tabled::Tabled;

use crate::cli::{OutputFormat, WlansArgs, WlansCommand};
use crate::error::CliError;
use crate::output;

use super::Context;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct WlanRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "SSIDs")]
    ssids: String,
}

fn row(group: &WlanGroup, ctx: &Context<'_>) -> WlanRow {
    let ssids = group.ssid_names().collect::<Vec<_>>().join(", ");
    WlanRow {
        id: group.wlan_id.clone(),
        name: group.wlan_name.clone(),
        ssids: if ssids.is_empty() {
            ctx.messages.no_ssids.to_owned()
        } else {
            ssids
        },
    }
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    client: &ControllerClient,
    args: WlansArgs,
    ctx: &Context<'_>,
) -> Result<(), CliError> {
    match args.command {
        WlansCommand::List(list) => {
            let groups = client.list_wlan_groups().await?;
            let shown: Vec<WlanGroup> = match list.filter.as_deref() {
                Some(text) => groups
                    .into_iter()
                    .filter(|g| g.matches_filter(text))
                    .collect(),
                None => groups,
            };

            if shown.is_empty() && matches!(ctx.global.output, OutputFormat::Table) {
                let notice = list.filter.as_deref().map_or_else(
                    || ctx.messages.no_wlan_groups.to_owned(),
                    |f| ctx.messages.no_results(f),
                );
                output::print_notice(&notice, ctx.global.quiet);
                return Ok(());
            }

            let out = output::render_list(
                &ctx.global.output,
                &shown,
                |g| row(g, ctx),
                |g| g.wlan_id.clone(),
            );
            output::print_output(&out, ctx.global.quiet);
            Ok(())
        }
    }
}
