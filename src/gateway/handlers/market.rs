use axum::extract::{Path, Query, State};
use axum::Json;
use uuid::Uuid;

use crate::error::CoreResult;
use crate::gateway::auth::AuthenticatedPlayer;
use crate::gateway::state::AppState;
use crate::gateway::types::{CreateListingRequest, ListingQuery, ListingResponse};
use crate::market;
use crate::store::Session;

#[utoipa::path(get, path = "/v1/market/listings", responses((status = 200, body = [ListingResponse])))]
pub async fn list_listings(
    State(state): State<AppState>,
    Query(query): Query<ListingQuery>,
) -> CoreResult<Json<Vec<ListingResponse>>> {
    let mut session = Session::begin(&state.pool).await?;
    let rows = market::list_listings(
        &mut session,
        query.status,
        query.seller_id,
        query.item_type.as_deref(),
    )
    .await?;
    session.commit().await?;
    Ok(Json(rows.into_iter().map(ListingResponse::from).collect()))
}

#[utoipa::path(post, path = "/v1/market/listings", responses((status = 200, body = ListingResponse)))]
pub async fn create_listing(
    State(state): State<AppState>,
    AuthenticatedPlayer(player): AuthenticatedPlayer,
    Json(body): Json<CreateListingRequest>,
) -> CoreResult<Json<ListingResponse>> {
    let mut session = Session::begin(&state.pool).await?;
    let world = session.ensure_world().await?;
    let listing = market::create_listing(
        &mut session,
        player.id,
        &body.item_type,
        body.item_attrs,
        body.price_amp,
        world.tick,
    )
    .await?;
    session.commit().await?;
    Ok(Json(listing.into()))
}

#[utoipa::path(post, path = "/v1/market/listings/{id}/buy", responses((status = 200, body = ListingResponse)))]
pub async fn buy_listing(
    State(state): State<AppState>,
    AuthenticatedPlayer(player): AuthenticatedPlayer,
    Path(id): Path<Uuid>,
) -> CoreResult<Json<ListingResponse>> {
    let mut session = Session::begin(&state.pool).await?;
    let world = session.ensure_world().await?;
    let listing = market::buy_listing(&mut session, id, player.id, world.tick).await?;
    session.commit().await?;
    Ok(Json(listing.into()))
}

#[utoipa::path(post, path = "/v1/market/listings/{id}/cancel", responses((status = 200, body = ListingResponse)))]
pub async fn cancel_listing(
    State(state): State<AppState>,
    AuthenticatedPlayer(player): AuthenticatedPlayer,
    Path(id): Path<Uuid>,
) -> CoreResult<Json<ListingResponse>> {
    let mut session = Session::begin(&state.pool).await?;
    let world = session.ensure_world().await?;
    let listing = market::cancel_listing(&mut session, id, player.id, world.tick).await?;
    session.commit().await?;
    Ok(Json(listing.into()))
}
