use axum::extract::{Path, Query, State};
use axum::Json;
use uuid::Uuid;

use crate::domain::models::Entity;
use crate::error::{CoreError, CoreResult};
use crate::gateway::state::AppState;
use crate::gateway::types::{EntityQuery, EntityResponse};

#[utoipa::path(get, path = "/v1/entities/", responses((status = 200, body = [EntityResponse])))]
pub async fn list_entities(
    State(state): State<AppState>,
    Query(query): Query<EntityQuery>,
) -> CoreResult<Json<Vec<EntityResponse>>> {
    let rows = sqlx::query_as::<_, Entity>(
        "SELECT * FROM entity
         WHERE ($1::uuid IS NULL OR owner_id = $1)
           AND ($2::text IS NULL OR type = $2)
         ORDER BY id ASC",
    )
    .bind(query.owner_id)
    .bind(query.entity_type)
    .fetch_all(&state.pool)
    .await
    .map_err(CoreError::from)?;

    Ok(Json(rows.into_iter().map(EntityResponse::from).collect()))
}

#[utoipa::path(get, path = "/v1/entities/{id}", responses((status = 200, body = EntityResponse)))]
pub async fn get_entity(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> CoreResult<Json<EntityResponse>> {
    let row = sqlx::query_as::<_, Entity>("SELECT * FROM entity WHERE id = $1")
        .bind(id)
        .fetch_optional(&state.pool)
        .await
        .map_err(CoreError::from)?
        .ok_or_else(|| CoreError::NotFound(format!("entity {id} not found")))?;

    Ok(Json(row.into()))
}
