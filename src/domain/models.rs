//! Plain data types for world state, grounded on
//! `original_source/app/domain/models.py`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use uuid::Uuid;

/// Singleton world row (id=1). Created on first access at tick 0.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct World {
    pub id: i32,
    pub tick: i64,
    pub seed: i64,
    pub ruleset_version: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A registered player. Never destroyed; balance mutated only under lock by
/// the ledger.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Player {
    pub id: Uuid,
    pub handle: String,
    pub token_hash: String,
    pub balance_mamp: i64,
    pub created_at: DateTime<Utc>,
}

/// A generic world object. Read-only from this core's perspective.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Entity {
    pub id: Uuid,
    #[sqlx(rename = "type")]
    pub entity_type: String,
    pub owner_id: Option<Uuid>,
    pub pos: Option<Value>,
    pub attrs: Value,
    pub version: i64,
}

/// A submitted action, immutable once inserted.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Action {
    pub id: Uuid,
    pub tick: i64,
    pub actor_id: Uuid,
    #[sqlx(rename = "type")]
    pub action_type: String,
    pub payload: Value,
    pub received_at: DateTime<Utc>,
    /// Reserved, unused — cryptographic authentication of actions is a
    /// documented non-goal; the column exists so schemas stay forward
    /// compatible with an implementation that fills it in.
    pub signature: Option<String>,
}

/// An append-only event record.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Event {
    pub id: Uuid,
    pub tick: i64,
    pub kind: String,
    pub subject_id: Option<Uuid>,
    pub payload: Value,
    pub created_at: DateTime<Utc>,
}

/// Listing lifecycle status. `Pending` is reserved and never produced by the
/// default ruleset; kept for forward compatibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, utoipa::ToSchema)]
#[sqlx(type_name = "market_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum MarketStatus {
    Pending,
    Open,
    Filled,
    Cancelled,
}

impl std::fmt::Display for MarketStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            MarketStatus::Pending => "pending",
            MarketStatus::Open => "open",
            MarketStatus::Filled => "filled",
            MarketStatus::Cancelled => "cancelled",
        };
        write!(f, "{s}")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct MarketListing {
    pub id: Uuid,
    pub seller_id: Uuid,
    pub item_type: String,
    pub item_attrs: Value,
    pub price_amp: i64,
    pub status: MarketStatus,
    pub created_tick: i64,
    pub filled_tick: Option<i64>,
}

/// Currency denomination. Ratios to mAMP: 1, 1e3, 1e6, 1e9.
///
/// The on-wire string is authoritative; `mAMP` and `MAMP` collide under
/// case-insensitive comparison in some client languages, so implementations
/// must compare the wire string exactly, never case-folded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, utoipa::ToSchema)]
#[sqlx(type_name = "denomination")]
pub enum Denomination {
    #[serde(rename = "mAMP")]
    #[sqlx(rename = "mAMP")]
    MilliAmp,
    #[serde(rename = "kAMP")]
    #[sqlx(rename = "kAMP")]
    KiloAmp,
    #[serde(rename = "MAMP")]
    #[sqlx(rename = "MAMP")]
    MegaAmp,
    #[serde(rename = "GAMP")]
    #[sqlx(rename = "GAMP")]
    GigaAmp,
}

impl Denomination {
    /// Multiplier to convert a count of this denomination into mAMP.
    pub const fn multiplier(self) -> i64 {
        match self {
            Denomination::MilliAmp => 1,
            Denomination::KiloAmp => 1_000,
            Denomination::MegaAmp => 1_000_000,
            Denomination::GigaAmp => 1_000_000_000,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CurrencyPacket {
    pub id: Uuid,
    pub denom: Denomination,
    pub encrypted: bool,
    pub payload: Value,
    pub owner_id: Uuid,
    pub created_tick: i64,
}

/// One row of the hash-chained replay log. At most one row per tick.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ReplayLog {
    pub tick: i64,
    pub state_hash: String,
    pub prev_hash: String,
    pub actions: Value,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn denomination_multipliers() {
        assert_eq!(Denomination::MilliAmp.multiplier(), 1);
        assert_eq!(Denomination::KiloAmp.multiplier(), 1_000);
        assert_eq!(Denomination::MegaAmp.multiplier(), 1_000_000);
        assert_eq!(Denomination::GigaAmp.multiplier(), 1_000_000_000);
    }

    #[test]
    fn denomination_wire_strings_are_case_sensitive() {
        let milli = serde_json::to_string(&Denomination::MilliAmp).unwrap();
        let mega = serde_json::to_string(&Denomination::MegaAmp).unwrap();
        assert_eq!(milli, "\"mAMP\"");
        assert_eq!(mega, "\"MAMP\"");
        assert_ne!(milli, mega);
    }
}
