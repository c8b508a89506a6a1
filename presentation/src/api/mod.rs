use crate::application_ports::Locator;
use axum::routing::{get, post};
use axum::Router;
use std::net::IpAddr;
use tower_http::trace::TraceLayer;
use tracing::info;

pub mod error;
pub mod group;
pub mod identity;
pub mod token;

pub fn create_router<L: Locator + Send + Sync + Clone + 'static>() -> Router<L> {
    let chat = Router::new()
        .route("/token", get(token::token_handler::<L>))
        .route("/group/create", post(group::create_group_handler::<L>))
        .route("/group/add", post(group::add_members_handler::<L>))
        .route("/group/remove", post(group::remove_members_handler::<L>));

    Router::new()
        .nest("/api/chat", chat)
        .layer(TraceLayer::new_for_http())
}

pub async fn run_api<L: Locator + Send + Sync + Clone + 'static>(
    locator: L,
    bind_address: IpAddr,
    port: u16,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let router: Router<()> = create_router::<L>().with_state(locator);

    let listener = tokio::net::TcpListener::bind((bind_address, port)).await?;
    info!(address = %listener.local_addr()?, "Listening for chat API requests");

    axum::serve(listener, router.into_make_service()).await?;

    Ok(())
}
