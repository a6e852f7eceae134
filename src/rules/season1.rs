//! Default ruleset, grounded one-to-one on
//! `app/domain/rules/season1_dark_grid.py`.

use std::collections::HashMap;

use async_trait::async_trait;
use serde_json::{json, Value};

use crate::error::{CoreError, CoreResult};
use crate::events::record_event;
use crate::ledger;
use crate::market;
use crate::rules::{RuleContext, RuleHandler, RulesetRegistry};

pub struct Work;

#[async_trait]
impl RuleHandler for Work {
    async fn validate(&self, _payload: &Value) -> CoreResult<()> {
        Ok(())
    }

    async fn apply(&self, ctx: &mut RuleContext<'_, '_>, payload: &Value) -> CoreResult<Value> {
        let reward = payload.get("reward").and_then(Value::as_i64).unwrap_or(100);
        let new_balance = ledger::adjust_balance(ctx.session, ctx.actor_id, reward).await?;

        record_event(
            ctx.session,
            ctx.broadcaster,
            ctx.tick,
            "action.work",
            Some(ctx.actor_id),
            json!({"reward": reward, "balance_mamp": new_balance}),
        )
        .await?;

        Ok(json!({"reward": reward, "balance_mamp": new_balance}))
    }
}

pub struct ListItem;

#[async_trait]
impl RuleHandler for ListItem {
    async fn validate(&self, payload: &Value) -> CoreResult<()> {
        payload
            .get("item_type")
            .and_then(Value::as_str)
            .ok_or_else(|| CoreError::Validation("item_type is required".to_string()))?;

        let price_amp = payload
            .get("price_amp")
            .and_then(Value::as_i64)
            .ok_or_else(|| CoreError::Validation("price_amp must be a positive integer".to_string()))?;
        if price_amp <= 0 {
            return Err(CoreError::Validation(
                "price_amp must be a positive integer".to_string(),
            ));
        }

        Ok(())
    }

    async fn apply(&self, ctx: &mut RuleContext<'_, '_>, payload: &Value) -> CoreResult<Value> {
        let item_type = payload.get("item_type").and_then(Value::as_str).unwrap();
        let price_amp = payload.get("price_amp").and_then(Value::as_i64).unwrap();
        let item_attrs = payload.get("item_attrs").cloned().unwrap_or_else(|| json!({}));

        let listing = market::create_listing(
            ctx.session,
            ctx.actor_id,
            item_type,
            item_attrs,
            price_amp,
            ctx.tick,
        )
        .await?;

        record_event(
            ctx.session,
            ctx.broadcaster,
            ctx.tick,
            "market.listing_created",
            Some(listing.id),
            json!({"listing_id": listing.id, "price_amp": listing.price_amp}),
        )
        .await?;

        Ok(json!({"listing_id": listing.id}))
    }
}

pub struct BuyItem;

#[async_trait]
impl RuleHandler for BuyItem {
    async fn validate(&self, payload: &Value) -> CoreResult<()> {
        if payload.get("listing_id").and_then(Value::as_str).is_none() {
            return Err(CoreError::Validation("listing_id is required".to_string()));
        }
        Ok(())
    }

    async fn apply(&self, ctx: &mut RuleContext<'_, '_>, payload: &Value) -> CoreResult<Value> {
        let listing_id = parse_listing_id(payload)?;
        let listing = market::buy_listing(ctx.session, listing_id, ctx.actor_id, ctx.tick).await?;

        record_event(
            ctx.session,
            ctx.broadcaster,
            ctx.tick,
            "market.listing_filled",
            Some(listing.id),
            json!({"listing_id": listing.id, "buyer_id": ctx.actor_id}),
        )
        .await?;

        Ok(json!({"listing_id": listing.id, "status": listing.status.to_string()}))
    }
}

pub struct CancelListing;

#[async_trait]
impl RuleHandler for CancelListing {
    async fn validate(&self, payload: &Value) -> CoreResult<()> {
        if payload.get("listing_id").and_then(Value::as_str).is_none() {
            return Err(CoreError::Validation("listing_id is required".to_string()));
        }
        Ok(())
    }

    async fn apply(&self, ctx: &mut RuleContext<'_, '_>, payload: &Value) -> CoreResult<Value> {
        let listing_id = parse_listing_id(payload)?;
        let listing = market::cancel_listing(ctx.session, listing_id, ctx.actor_id, ctx.tick).await?;

        record_event(
            ctx.session,
            ctx.broadcaster,
            ctx.tick,
            "market.listing_cancelled",
            Some(listing.id),
            json!({"listing_id": listing.id}),
        )
        .await?;

        Ok(json!({"listing_id": listing.id, "status": listing.status.to_string()}))
    }
}

fn parse_listing_id(payload: &Value) -> CoreResult<uuid::Uuid> {
    payload
        .get("listing_id")
        .and_then(Value::as_str)
        .and_then(|s| s.parse().ok())
        .ok_or_else(|| CoreError::Validation("listing_id must be a valid id".to_string()))
}

pub(crate) fn build_registry() -> RulesetRegistry {
    let mut handlers: HashMap<&'static str, Box<dyn RuleHandler>> = HashMap::new();
    handlers.insert("work", Box::new(Work));
    handlers.insert("list_item", Box::new(ListItem));
    handlers.insert("buy_item", Box::new(BuyItem));
    handlers.insert("cancel_listing", Box::new(CancelListing));
    RulesetRegistry::from_handlers(handlers)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn list_item_rejects_non_positive_price() {
        let handler = ListItem;
        let payload = json!({"item_type": "raw-data", "price_amp": 0});
        assert!(handler.validate(&payload).await.is_err());
    }

    #[tokio::test]
    async fn list_item_rejects_missing_item_type() {
        let handler = ListItem;
        let payload = json!({"price_amp": 100});
        assert!(handler.validate(&payload).await.is_err());
    }

    #[tokio::test]
    async fn work_validator_is_a_no_op() {
        let handler = Work;
        assert!(handler.validate(&json!({})).await.is_ok());
    }

    #[tokio::test]
    async fn buy_item_requires_listing_id() {
        let handler = BuyItem;
        assert!(handler.validate(&json!({})).await.is_err());
        assert!(handler
            .validate(&json!({"listing_id": "not-a-uuid"}))
            .await
            .is_ok());
    }
}
