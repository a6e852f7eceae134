use axum::extract::State;
use axum::Json;

use crate::domain::models::Denomination;
use crate::error::{CoreError, CoreResult};
use crate::gateway::auth::AuthenticatedPlayer;
use crate::gateway::state::AppState;
use crate::gateway::types::{
    BalanceResponse, CurrencyMetadataResponse, DecryptRequest, DecryptResponse, DenominationInfo,
    MintEncryptedRequest, PacketResponse, TransferRequest,
};
use crate::ledger;
use crate::store::Session;

/// Unauthenticated currency metadata, grounded on
/// `app/api/v1/routes_currency.py`'s `metadata()` — distinct from the
/// authenticated balance lookup below.
#[utoipa::path(get, path = "/v1/currency/", responses((status = 200, body = CurrencyMetadataResponse)))]
pub async fn currency_metadata() -> Json<CurrencyMetadataResponse> {
    Json(CurrencyMetadataResponse {
        base_unit: "mAMP",
        denominations: vec![
            DenominationInfo {
                name: Denomination::MilliAmp,
                multiplier_mamp: Denomination::MilliAmp.multiplier(),
            },
            DenominationInfo {
                name: Denomination::KiloAmp,
                multiplier_mamp: Denomination::KiloAmp.multiplier(),
            },
            DenominationInfo {
                name: Denomination::MegaAmp,
                multiplier_mamp: Denomination::MegaAmp.multiplier(),
            },
            DenominationInfo {
                name: Denomination::GigaAmp,
                multiplier_mamp: Denomination::GigaAmp.multiplier(),
            },
        ],
        lore: "Anonymous Market Packets: the dark-grid's only currency, denominated in mAMP.",
    })
}

#[utoipa::path(get, path = "/v1/currency/balance", responses((status = 200, body = BalanceResponse)))]
pub async fn get_balance(
    State(state): State<AppState>,
    AuthenticatedPlayer(player): AuthenticatedPlayer,
) -> CoreResult<Json<BalanceResponse>> {
    balance(state, player).await
}

async fn balance(
    state: AppState,
    player: crate::domain::models::Player,
) -> CoreResult<Json<BalanceResponse>> {
    let mut session = Session::begin(&state.pool).await?;
    let balance_mamp = ledger::get_balance(&mut session, player.id).await?;
    session.commit().await?;
    Ok(Json(BalanceResponse { balance_mamp }))
}

#[utoipa::path(post, path = "/v1/currency/transfer", responses((status = 200)))]
pub async fn transfer(
    State(state): State<AppState>,
    AuthenticatedPlayer(player): AuthenticatedPlayer,
    Json(body): Json<TransferRequest>,
) -> CoreResult<Json<BalanceResponse>> {
    let mut session = Session::begin(&state.pool).await?;
    ledger::transfer(&mut session, player.id, body.recipient_id, body.amount).await?;
    let balance_mamp = ledger::get_balance(&mut session, player.id).await?;
    session.commit().await?;
    Ok(Json(BalanceResponse { balance_mamp }))
}

/// Dev-mode only: mints an encrypted packet directly, without a puzzle
/// having been solved. Gated at the router level by the `dev-admin` feature
/// / `settings.dev_mode`.
#[utoipa::path(post, path = "/v1/currency/mint_encrypted", responses((status = 200, body = PacketResponse)))]
pub async fn mint_encrypted(
    State(state): State<AppState>,
    Json(body): Json<MintEncryptedRequest>,
) -> CoreResult<Json<PacketResponse>> {
    if !state.settings.dev_mode {
        return Err(CoreError::NotFound("route not available".to_string()));
    }

    let mut session = Session::begin(&state.pool).await?;
    let world = session.ensure_world().await?;
    let packet = ledger::mint_encrypted_packet(&mut session, body.owner_id, body.denom, body.payload, world.tick)
        .await?;
    session.commit().await?;
    Ok(Json(packet.into()))
}

#[utoipa::path(get, path = "/v1/currency/packets", responses((status = 200, body = [PacketResponse])))]
pub async fn list_packets(
    State(state): State<AppState>,
    AuthenticatedPlayer(player): AuthenticatedPlayer,
) -> CoreResult<Json<Vec<PacketResponse>>> {
    let mut session = Session::begin(&state.pool).await?;
    let packets = ledger::list_packets(&mut session, player.id).await?;
    session.commit().await?;
    Ok(Json(packets.into_iter().map(PacketResponse::from).collect()))
}

#[utoipa::path(post, path = "/v1/currency/decrypt", responses((status = 200, body = DecryptResponse)))]
pub async fn decrypt(
    State(state): State<AppState>,
    AuthenticatedPlayer(player): AuthenticatedPlayer,
    Json(body): Json<DecryptRequest>,
) -> CoreResult<Json<DecryptResponse>> {
    let mut session = Session::begin(&state.pool).await?;
    let reward_mamp =
        ledger::decrypt_packet(&mut session, player.id, body.packet_id, body.solution).await?;
    session.commit().await?;
    Ok(Json(DecryptResponse { reward_mamp }))
}
