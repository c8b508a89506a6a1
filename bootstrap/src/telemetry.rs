use crate::args::CommonArgs;
use sentry::ClientInitGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Installs the tracing subscriber and, when a DSN is configured, the Sentry
/// client. The returned guard flushes Sentry on drop and must outlive `main`'s work.
pub fn init(common_args: &CommonArgs) -> anyhow::Result<Option<ClientInitGuard>> {
    let sentry_guard = common_args.sentry_dsn.as_deref().map(|dsn| {
        sentry::init((
            dsn,
            sentry::ClientOptions {
                release: sentry::release_name!(),
                environment: common_args.sentry_environment.clone().map(Into::into),
                sample_rate: common_args.sentry_sample_rate.unwrap_or(1.0),
                traces_sample_rate: common_args.sentry_traces_sample_rate.unwrap_or(0.0),
                ..Default::default()
            },
        ))
    });

    tracing_subscriber::registry()
        .with(EnvFilter::try_new(&common_args.log_filter)?)
        .with(tracing_subscriber::fmt::layer())
        .with(sentry_guard.as_ref().map(|_| sentry_tracing::layer()))
        .try_init()?;

    Ok(sentry_guard)
}
