//! Listing lifecycle state machine, grounded on
//! `app/domain/services/market_service.py`.
//!
//! ```text
//! create → open ──buy──→ filled (terminal)
//!              └cancel→ cancelled (terminal)
//! ```
//! `pending` is reserved and never originated by the default ruleset.

use serde_json::Value;
use uuid::Uuid;

use crate::domain::models::{MarketListing, MarketStatus};
use crate::error::{CoreError, CoreResult};
use crate::ledger;
use crate::store::Session;

pub async fn create_listing(
    session: &mut Session<'_>,
    seller: Uuid,
    item_type: &str,
    item_attrs: Value,
    price_amp: i64,
    tick: i64,
) -> CoreResult<MarketListing> {
    let id = Uuid::new_v4();
    sqlx::query(
        "INSERT INTO market_listing
            (id, seller_id, item_type, item_attrs, price_amp, status, created_tick, filled_tick)
         VALUES ($1, $2, $3, $4, $5, 'open', $6, NULL)",
    )
    .bind(id)
    .bind(seller)
    .bind(item_type)
    .bind(&item_attrs)
    .bind(price_amp)
    .bind(tick)
    .execute(&mut *session.tx)
    .await
    .map_err(CoreError::from)?;

    Ok(MarketListing {
        id,
        seller_id: seller,
        item_type: item_type.to_string(),
        item_attrs,
        price_amp,
        status: MarketStatus::Open,
        created_tick: tick,
        filled_tick: None,
    })
}

pub async fn list_listings(
    session: &mut Session<'_>,
    status: Option<MarketStatus>,
    seller: Option<Uuid>,
    item_type: Option<&str>,
) -> CoreResult<Vec<MarketListing>> {
    // Filters are optional; applied in Rust rather than dynamic SQL so the
    // query stays a single prepared statement.
    let rows = sqlx::query_as::<_, MarketListing>(
        "SELECT * FROM market_listing ORDER BY created_tick ASC",
    )
    .fetch_all(&mut *session.tx)
    .await
    .map_err(CoreError::from)?;

    Ok(rows
        .into_iter()
        .filter(|row| status.is_none_or(|s| row.status == s))
        .filter(|row| seller.is_none_or(|s| row.seller_id == s))
        .filter(|row| item_type.is_none_or(|t| row.item_type == t))
        .collect())
}

async fn lock_listing(session: &mut Session<'_>, listing_id: Uuid) -> CoreResult<MarketListing> {
    sqlx::query_as::<_, MarketListing>("SELECT * FROM market_listing WHERE id = $1 FOR UPDATE")
        .bind(listing_id)
        .fetch_optional(&mut *session.tx)
        .await
        .map_err(CoreError::from)?
        .ok_or_else(|| CoreError::NotFound("listing not found".to_string()))
}

async fn set_listing_status(
    session: &mut Session<'_>,
    listing_id: Uuid,
    status: MarketStatus,
    filled_tick: i64,
) -> CoreResult<()> {
    sqlx::query("UPDATE market_listing SET status = $1, filled_tick = $2 WHERE id = $3")
        .bind(status)
        .bind(filled_tick)
        .bind(listing_id)
        .execute(&mut *session.tx)
        .await
        .map_err(CoreError::from)?;
    Ok(())
}

pub async fn buy_listing(
    session: &mut Session<'_>,
    listing_id: Uuid,
    buyer: Uuid,
    tick: i64,
) -> CoreResult<MarketListing> {
    let mut listing = lock_listing(session, listing_id).await?;

    if listing.status != MarketStatus::Open {
        return Err(CoreError::Domain("listing is not open".to_string()));
    }
    if listing.seller_id == buyer {
        return Err(CoreError::Domain("cannot buy your own listing".to_string()));
    }

    ledger::transfer(session, buyer, listing.seller_id, listing.price_amp).await?;

    set_listing_status(session, listing_id, MarketStatus::Filled, tick).await?;
    listing.status = MarketStatus::Filled;
    listing.filled_tick = Some(tick);

    Ok(listing)
}

pub async fn cancel_listing(
    session: &mut Session<'_>,
    listing_id: Uuid,
    actor: Uuid,
    tick: i64,
) -> CoreResult<MarketListing> {
    let mut listing = lock_listing(session, listing_id).await?;

    if listing.seller_id != actor {
        return Err(CoreError::Domain("only the seller may cancel".to_string()));
    }
    if listing.status != MarketStatus::Open {
        return Err(CoreError::Domain("listing is not open".to_string()));
    }

    set_listing_status(session, listing_id, MarketStatus::Cancelled, tick).await?;
    listing.status = MarketStatus::Cancelled;
    listing.filled_tick = Some(tick);

    Ok(listing)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_transitions_are_terminal() {
        assert_ne!(MarketStatus::Filled, MarketStatus::Open);
        assert_ne!(MarketStatus::Cancelled, MarketStatus::Open);
    }
}
