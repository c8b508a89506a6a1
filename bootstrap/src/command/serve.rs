use crate::args::CommonArgs;
use crate::locator;
use anyhow::anyhow;
use clap::Args;
use infrastructure::stream::token::StreamTokenSigner;
use infrastructure::stream::{StreamChatAdapter, StreamChatAdapterConfig, DEFAULT_STREAM_BASE_URL};
use presentation::api::run_api;
use std::net::IpAddr;
use std::sync::Arc;
use tracing::{info, instrument};
use url::Url;

#[derive(Args)]
pub struct ServeArgs {
    /// Public key of the Stream application
    #[arg(long, env = "STREAM_API_KEY")]
    pub stream_api_key: String,
    #[arg(long, env = "STREAM_BASE_URL", default_value = DEFAULT_STREAM_BASE_URL)]
    pub stream_base_url: String,
    /// Stream channel type used for group channels
    #[arg(long, env = "STREAM_CHANNEL_TYPE", default_value = "messaging")]
    pub stream_channel_type: String,
    #[arg(long, env = "BIND_ADDRESS", default_value = "0.0.0.0")]
    pub bind_address: IpAddr,
    #[arg(long, env = "PORT", default_value_t = 8080)]
    pub port: u16,
}

#[instrument(level = "trace", skip(common_args, args))]
pub async fn run(common_args: CommonArgs, args: ServeArgs) -> anyhow::Result<()> {
    let CommonArgs {
        stream_api_secret,
        token_ttl_seconds,
        log_filter: _,
        sentry_dsn: _,
        sentry_environment: _,
        sentry_sample_rate: _,
        sentry_traces_sample_rate: _,
    } = common_args;
    let ServeArgs {
        stream_api_key,
        stream_base_url,
        stream_channel_type,
        bind_address,
        port,
    } = args;
    let stream_base_url = Url::parse(&stream_base_url)?;

    let token_signer = Arc::new(StreamTokenSigner::new(
        stream_api_secret.clone(),
        chrono::Duration::seconds(token_ttl_seconds),
    ));
    let stream_adapter = Arc::new(StreamChatAdapter::new(StreamChatAdapterConfig {
        base_url: stream_base_url,
        api_key: stream_api_key,
        api_secret: stream_api_secret,
        channel_type: stream_channel_type,
    }));

    let locator = locator::ApplicationPortLocator::new(token_signer, stream_adapter);

    info!(%bind_address, port, "Starting chat API");
    let api = tokio::spawn(run_api(locator, bind_address, port));

    api.await?.map_err(|e| anyhow!(e))?;

    Ok(())
}
