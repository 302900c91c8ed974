mod cli;
mod commands;
mod config;
mod error;
mod i18n;
mod output;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use omada_api::ControllerClient;

use crate::cli::{Cli, Command};
use crate::commands::Context;
use crate::error::CliError;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    init_tracing(cli.global.verbose);

    if let Err(err) = run(cli).await {
        let code = err.exit_code();
        eprintln!("{:?}", miette::Report::new(err));
        std::process::exit(code);
    }
}

fn init_tracing(verbosity: u8) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        // Config commands don't need a controller connection
        Command::Config(args) => commands::config_cmd::handle(args, &cli.global),

        Command::Completions(args) => {
            use clap::CommandFactory;
            use clap_complete::generate;

            let mut cmd = Cli::command();
            generate(args.shell, &mut cmd, "omada-wlan", &mut std::io::stdout());
            Ok(())
        }

        cmd => {
            let cfg = config::load_config()?;
            let settings = config::resolve_connection(&cli.global, &cfg)?;
            let client = ControllerClient::new(
                settings.url,
                settings.username,
                settings.password,
                &config::transport(&cli.global),
            )?;

            let ctx = Context {
                global: &cli.global,
                messages: i18n::messages(config::language(&cli.global, &cfg)),
                color: output::should_color(&cli.global.color),
            };

            client.connect().await?;
            tracing::debug!(command = ?cmd, "dispatching command");
            let result = commands::dispatch(cmd, &client, &ctx).await;
            client.disconnect();
            result
        }
    }
}
