//! Dev-mode only admin surface, grounded on `app/api/v1/routes_admin.py`.

use axum::extract::{Query, State};
use axum::Json;

use crate::error::{CoreError, CoreResult};
use crate::gateway::state::AppState;
use crate::gateway::types::{AdvanceTickResponse, ReplayVerifyQuery, ReplayVerifyResponse};
use crate::replay;
use crate::store::Session;
use crate::tick_manager;

fn require_dev_mode(state: &AppState) -> CoreResult<()> {
    if !state.settings.dev_mode {
        return Err(CoreError::NotFound("route not available".to_string()));
    }
    Ok(())
}

#[utoipa::path(post, path = "/v1/admin/tick/advance", responses((status = 200, body = AdvanceTickResponse)))]
pub async fn advance_tick(State(state): State<AppState>) -> CoreResult<Json<AdvanceTickResponse>> {
    require_dev_mode(&state)?;

    let mut session = Session::begin(&state.pool).await?;
    let result = tick_manager::advance_tick(&mut session, state.broadcaster.as_ref()).await?;
    session.commit().await?;

    Ok(Json(AdvanceTickResponse {
        tick: result.tick,
        applied: result.applied.len(),
    }))
}

/// Deletes events, actions, listings, packets, entities, replay log rows and
/// resets `world.tick` to 0. The world row itself is kept, matching
/// `routes_admin.py`'s reset semantics (it does not delete the world row).
#[utoipa::path(post, path = "/v1/admin/world/reset", responses((status = 200)))]
pub async fn reset_world(State(state): State<AppState>) -> CoreResult<Json<serde_json::Value>> {
    require_dev_mode(&state)?;

    let mut session = Session::begin(&state.pool).await?;
    session.ensure_world().await?;

    for table in [
        "event",
        "action",
        "market_listing",
        "currency_packet",
        "entity",
        "replay_log",
    ] {
        sqlx::query(&format!("DELETE FROM {table}"))
            .execute(&mut *session.tx)
            .await
            .map_err(CoreError::from)?;
    }

    session.set_world_tick(0).await?;
    session.commit().await?;

    Ok(Json(serde_json::json!({"reset": true})))
}

#[utoipa::path(get, path = "/v1/admin/replay/verify", responses((status = 200, body = ReplayVerifyResponse)))]
pub async fn verify_replay(
    State(state): State<AppState>,
    Query(query): Query<ReplayVerifyQuery>,
) -> CoreResult<Json<ReplayVerifyResponse>> {
    require_dev_mode(&state)?;

    let mut session = Session::begin(&state.pool).await?;
    let valid = replay::verify_range(&mut session, query.from, query.to).await?;
    session.commit().await?;

    Ok(Json(ReplayVerifyResponse { valid }))
}
