use axum::extract::State;
use axum::Json;

use crate::error::CoreResult;
use crate::gateway::state::AppState;
use crate::gateway::types::WorldResponse;
use crate::store::Session;

#[utoipa::path(get, path = "/v1/world/", responses((status = 200, body = WorldResponse)))]
pub async fn get_world(State(state): State<AppState>) -> CoreResult<Json<WorldResponse>> {
    let mut session = Session::begin(&state.pool).await?;
    let world = session.ensure_world().await?;
    session.commit().await?;
    Ok(Json(world.into()))
}
