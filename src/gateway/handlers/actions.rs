use axum::extract::State;
use axum::Json;

use crate::action_service::ActionInput;
use crate::error::{CoreError, CoreResult};
use crate::gateway::auth::AuthenticatedPlayer;
use crate::gateway::state::AppState;
use crate::gateway::types::{SubmitActionsRequest, SubmitActionsResponse};
use crate::store::Session;
use crate::tick_manager;

#[utoipa::path(
    post,
    path = "/v1/actions/",
    responses((status = 200, body = SubmitActionsResponse), (status = 403, description = "actor mismatch"))
)]
pub async fn submit_actions(
    State(state): State<AppState>,
    AuthenticatedPlayer(player): AuthenticatedPlayer,
    Json(body): Json<SubmitActionsRequest>,
) -> CoreResult<Json<SubmitActionsResponse>> {
    for action in &body.actions {
        if action.actor_id != player.id {
            return Err(CoreError::Forbidden);
        }
    }

    let inputs = body
        .actions
        .into_iter()
        .map(|a| ActionInput {
            actor_id: a.actor_id,
            action_type: a.action_type,
            payload: a.payload,
        })
        .collect();

    let mut session = Session::begin(&state.pool).await?;
    let inserted = tick_manager::enqueue_actions(&mut session, inputs).await?;
    let world = session.ensure_world().await?;
    session.commit().await?;

    Ok(Json(SubmitActionsResponse {
        accepted: inserted.into_iter().map(|a| a.id).collect(),
        tick: world.tick,
    }))
}
