use axum::extract::{Query, State};
use axum::Json;

use crate::domain::models::Event;
use crate::error::CoreError;
use crate::error::CoreResult;
use crate::gateway::state::AppState;
use crate::gateway::types::{EventResponse, EventsQuery};

#[utoipa::path(get, path = "/v1/events", responses((status = 200, body = [EventResponse])))]
pub async fn list_events(
    State(state): State<AppState>,
    Query(query): Query<EventsQuery>,
) -> CoreResult<Json<Vec<EventResponse>>> {
    let since_tick = query.since_tick.unwrap_or(0);

    let rows = sqlx::query_as::<_, Event>(
        "SELECT * FROM event WHERE tick >= $1 ORDER BY tick ASC, created_at ASC",
    )
    .bind(since_tick)
    .fetch_all(&state.pool)
    .await
    .map_err(CoreError::from)?;

    Ok(Json(
        rows.into_iter()
            .map(|e| EventResponse {
                id: e.id,
                tick: e.tick,
                kind: e.kind,
                subject_id: e.subject_id,
                payload: e.payload,
            })
            .collect(),
    ))
}
