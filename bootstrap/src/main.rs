mod args;
mod command;
mod locator;
mod telemetry;

use crate::args::CommonArgs;
use crate::command::Command;
use clap::Parser;

/// Issues Stream chat tokens and coordinates group channels on behalf of
/// authenticated users.
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    #[command(flatten)]
    common_args: CommonArgs,
    #[command(subcommand)]
    command: Command,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    let Cli {
        common_args,
        command,
    } = Cli::parse();

    let _sentry_guard = telemetry::init(&common_args)?;

    command.run(common_args).await
}
