use clap::Args;

#[derive(Args)]
pub struct CommonArgs {
    /// Secret shared with Stream, used to sign user and server tokens
    #[arg(long, env = "STREAM_API_SECRET", hide_env_values = true)]
    pub stream_api_secret: String,
    /// Lifetime of issued user tokens
    #[arg(
        long,
        env = "TOKEN_TTL_SECONDS",
        default_value_t = 3600,
        value_parser = clap::value_parser!(i64).range(1..)
    )]
    pub token_ttl_seconds: i64,
    #[arg(long, env = "LOG_FILTER", default_value = "info")]
    pub log_filter: String,
    #[arg(long, env = "SENTRY_DSN")]
    pub sentry_dsn: Option<String>,
    #[arg(long, env = "SENTRY_ENVIRONMENT")]
    pub sentry_environment: Option<String>,
    #[arg(long, env = "SENTRY_SAMPLE_RATE")]
    pub sentry_sample_rate: Option<f32>,
    #[arg(long, env = "SENTRY_TRACES_SAMPLE_RATE")]
    pub sentry_traces_sample_rate: Option<f32>,
}
