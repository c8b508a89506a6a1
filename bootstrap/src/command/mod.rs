pub mod issue_token;
pub mod serve;

use crate::args::CommonArgs;
use crate::command::issue_token::IssueTokenArgs;
use crate::command::serve::ServeArgs;
use clap::Subcommand;
use tracing::instrument;

#[derive(Subcommand)]
pub enum Command {
    /// Serve the chat API over HTTP
    #[command(name = "serve")]
    Serve(ServeArgs),
    /// Print a chat token for a single user
    #[command(name = "issue-token")]
    IssueToken(IssueTokenArgs),
}

impl Command {
    #[instrument(level = "trace", skip(self, common_args))]
    pub async fn run(self, common_args: CommonArgs) -> anyhow::Result<()> {
        match self {
            Command::Serve(args) => serve::run(common_args, args).await,
            Command::IssueToken(args) => issue_token::run(common_args, args).await,
        }
    }
}
