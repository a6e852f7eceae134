//! HTTP + WebSocket gateway: axum `Router`, `AppState`, and the `/v1` route
//! table described in spec.md §6, grounded on the teacher's `gateway`
//! module layout and `original_source/app/api/v1/*` for exact route shapes.

pub mod auth;
pub mod handlers;
pub mod openapi;
pub mod state;
pub mod types;

use axum::routing::{get, post};
use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::config::Settings;
use crate::db::Database;
use crate::websocket::ws_handler;
use state::AppState;

async fn healthz() -> &'static str {
    "ok"
}

async fn readyz(axum::extract::State(state): axum::extract::State<AppState>) -> Result<&'static str, axum::http::StatusCode> {
    match sqlx::query("SELECT 1").execute(&state.pool).await {
        Ok(_) => Ok("ok"),
        Err(_) => Err(axum::http::StatusCode::SERVICE_UNAVAILABLE),
    }
}

fn v1_router() -> Router<AppState> {
    let mut router = Router::new()
        .route("/world/", get(handlers::world::get_world))
        .route(
            "/entities/",
            get(handlers::entities::list_entities),
        )
        .route("/entities/{id}", get(handlers::entities::get_entity))
        .route("/actions/", post(handlers::actions::submit_actions))
        .route(
            "/market/listings",
            get(handlers::market::list_listings).post(handlers::market::create_listing),
        )
        .route(
            "/market/listings/{id}/buy",
            post(handlers::market::buy_listing),
        )
        .route(
            "/market/listings/{id}/cancel",
            post(handlers::market::cancel_listing),
        )
        .route("/currency/", get(handlers::currency::currency_metadata))
        .route("/currency/balance", get(handlers::currency::get_balance))
        .route("/currency/transfer", post(handlers::currency::transfer))
        .route("/currency/packets", get(handlers::currency::list_packets))
        .route("/currency/decrypt", post(handlers::currency::decrypt))
        .route("/events", get(handlers::events::list_events));

    if cfg!(feature = "dev-admin") {
        router = router
            .route(
                "/currency/mint_encrypted",
                post(handlers::currency::mint_encrypted),
            )
            .route(
                "/admin/tick/advance",
                post(handlers::admin::advance_tick),
            )
            .route(
                "/admin/world/reset",
                post(handlers::admin::reset_world),
            )
            .route(
                "/admin/replay/verify",
                get(handlers::admin::verify_replay),
            );
    }

    router
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        .route("/ws", get(ws_handler))
        .nest("/v1", v1_router())
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", openapi::ApiDoc::openapi()))
        .with_state(state)
}

pub async fn run_server(settings: Settings, db: Database) -> anyhow::Result<()> {
    let bind_addr = settings.bind_addr.clone();
    let pool = db.pool().clone();
    let state = AppState::new(pool, settings);
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!(%bind_addr, "gateway listening");
    axum::serve(listener, app).await?;
    Ok(())
}
