use crate::args::CommonArgs;
use application::token::TokenService;
use application_ports::token::TokenPort;
use clap::Args;
use domain_shared::authentication::UserId;
use infrastructure::stream::token::StreamTokenSigner;
use std::sync::Arc;
use tracing::instrument;

#[derive(Args)]
pub struct IssueTokenArgs {
    /// User the token is issued for
    #[arg(long)]
    pub user_id: String,
}

#[instrument(level = "trace", skip(common_args, args))]
pub async fn run(common_args: CommonArgs, args: IssueTokenArgs) -> anyhow::Result<()> {
    let token_signer = Arc::new(StreamTokenSigner::new(
        common_args.stream_api_secret,
        chrono::Duration::seconds(common_args.token_ttl_seconds),
    ));
    let token_service = TokenService::new(token_signer);

    let token = token_service.issue_token(UserId(args.user_id)).await?;
    println!("{}", token.0);

    Ok(())
}
