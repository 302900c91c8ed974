//! WLAN group assignment handler.

use omada_api::ControllerClient;
use tracing::debug;

use crate::cli::AssignArgs;
use crate::error::CliError;
use crate::output;

use super::{Context, aps, util};

pub async fn handle(
    client: &ControllerClient,
    args: AssignArgs,
    ctx: &Context<'_>,
) -> Result<(), CliError> {
    let (access_points, groups) =
        tokio::try_join!(client.list_access_points(), client.list_wlan_groups())?;

    let ap = util::resolve_access_point(&access_points, &args.ap)?;
    let group = util::resolve_wlan_group(&groups, &args.wlan)?;

    let prompt = ctx.messages.confirm_assign(&group.wlan_name, &ap.name);
    if !util::confirm(&prompt, ctx.global.yes)? {
        return Ok(());
    }

    client.reassign_wlan_group(&ap.mac, &group.wlan_id).await?;
    output::print_notice(ctx.messages.change_applied, ctx.global.quiet);

    // Show the controller's view of the AP after the change.
    let refreshed = client.list_access_points().await?;
    let updated: Vec<_> = refreshed.into_iter().filter(|a| a.mac == ap.mac).collect();
    if updated.is_empty() {
        debug!(mac = %ap.mac, "access point missing from refreshed list");
        return Ok(());
    }

    let out = output::render_list(
        &ctx.global.output,
        &updated,
        |a| aps::row(a, ctx),
        |a| a.mac.clone(),
    );
    output::print_output(&out, ctx.global.quiet);
    Ok(())
}
