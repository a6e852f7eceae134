//! Request/response DTOs, mirroring `app/core/schemas.py`.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;
use utoipa::ToSchema;

use crate::domain::models::{CurrencyPacket, Denomination, Entity, MarketListing, MarketStatus, World};

/// One entry of the currency metadata table, grounded on
/// `app/api/v1/routes_currency.py`'s `CurrencyMetadataSchema`.
#[derive(Debug, Serialize, ToSchema)]
pub struct DenominationInfo {
    pub name: Denomination,
    pub multiplier_mamp: i64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CurrencyMetadataResponse {
    pub base_unit: &'static str,
    pub denominations: Vec<DenominationInfo>,
    pub lore: &'static str,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct WorldResponse {
    pub tick: i64,
    pub seed: i64,
    pub ruleset_version: String,
}

impl From<World> for WorldResponse {
    fn from(w: World) -> Self {
        Self {
            tick: w.tick,
            seed: w.seed,
            ruleset_version: w.ruleset_version,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct EntityQuery {
    pub owner_id: Option<Uuid>,
    #[serde(rename = "type")]
    pub entity_type: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct EntityResponse {
    pub id: Uuid,
    #[serde(rename = "type")]
    pub entity_type: String,
    pub owner_id: Option<Uuid>,
    pub pos: Option<Value>,
    pub attrs: Value,
    pub version: i64,
}

impl From<Entity> for EntityResponse {
    fn from(e: Entity) -> Self {
        Self {
            id: e.id,
            entity_type: e.entity_type,
            owner_id: e.owner_id,
            pos: e.pos,
            attrs: e.attrs,
            version: e.version,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct SubmittedAction {
    #[serde(rename = "type")]
    pub action_type: String,
    pub actor_id: Uuid,
    pub payload: Value,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct SubmitActionsRequest {
    pub actions: Vec<SubmittedAction>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SubmitActionsResponse {
    pub accepted: Vec<Uuid>,
    pub tick: i64,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct ListingQuery {
    pub status: Option<MarketStatus>,
    pub seller_id: Option<Uuid>,
    pub item_type: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ListingResponse {
    pub id: Uuid,
    pub seller_id: Uuid,
    pub item_type: String,
    pub item_attrs: Value,
    pub price_amp: i64,
    pub status: MarketStatus,
    pub created_tick: i64,
    pub filled_tick: Option<i64>,
}

impl From<MarketListing> for ListingResponse {
    fn from(l: MarketListing) -> Self {
        Self {
            id: l.id,
            seller_id: l.seller_id,
            item_type: l.item_type,
            item_attrs: l.item_attrs,
            price_amp: l.price_amp,
            status: l.status,
            created_tick: l.created_tick,
            filled_tick: l.filled_tick,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateListingRequest {
    pub item_type: String,
    #[serde(default)]
    pub item_attrs: Value,
    pub price_amp: i64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct BalanceResponse {
    pub balance_mamp: i64,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct TransferRequest {
    pub recipient_id: Uuid,
    pub amount: i64,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct MintEncryptedRequest {
    pub owner_id: Uuid,
    pub denom: Denomination,
    pub payload: Value,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PacketResponse {
    pub id: Uuid,
    pub denom: Denomination,
    pub encrypted: bool,
    pub payload: Value,
    pub owner_id: Uuid,
    pub created_tick: i64,
}

impl From<CurrencyPacket> for PacketResponse {
    fn from(p: CurrencyPacket) -> Self {
        Self {
            id: p.id,
            denom: p.denom,
            encrypted: p.encrypted,
            payload: p.payload,
            owner_id: p.owner_id,
            created_tick: p.created_tick,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct DecryptRequest {
    pub packet_id: Uuid,
    pub solution: Value,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DecryptResponse {
    pub reward_mamp: i64,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct EventsQuery {
    pub since_tick: Option<i64>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct EventResponse {
    pub id: Uuid,
    pub tick: i64,
    pub kind: String,
    pub subject_id: Option<Uuid>,
    pub payload: Value,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct ReplayVerifyQuery {
    pub from: i64,
    pub to: i64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ReplayVerifyResponse {
    pub valid: bool,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AdvanceTickResponse {
    pub tick: i64,
    pub applied: usize,
}
