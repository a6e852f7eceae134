//! Per-tick action intake and dispatch, grounded on
//! `app/domain/services/action_service.py`.

use std::collections::HashMap;

use serde_json::Value;
use uuid::Uuid;

use crate::broadcaster::Broadcaster;
use crate::domain::models::Action;
use crate::error::{CoreError, CoreResult};
use crate::rules::{self, AppliedDescriptor, RuleContext};
use crate::store::Session;

/// Per-(batch, actor) action cap. The quota is enforced within a single
/// batch only — nothing prevents a client from submitting several batches
/// of 3 against the same open tick; see DESIGN.md for the accepted gap.
pub const PER_TICK_ACTION_LIMIT: usize = 3;

pub struct ActionInput {
    pub actor_id: Uuid,
    pub action_type: String,
    pub payload: Value,
}

/// Inserts a batch of actions tagged with `tick`, rejecting the whole batch
/// if any actor exceeds `PER_TICK_ACTION_LIMIT` within it.
pub async fn enqueue_actions(
    session: &mut Session<'_>,
    tick: i64,
    actions: Vec<ActionInput>,
) -> CoreResult<Vec<Action>> {
    let mut counts: HashMap<Uuid, usize> = HashMap::new();
    for action in &actions {
        let count = counts.entry(action.actor_id).or_insert(0);
        *count += 1;
        if *count > PER_TICK_ACTION_LIMIT {
            return Err(CoreError::Validation("Action quota exceeded".to_string()));
        }
    }

    let mut inserted = Vec::with_capacity(actions.len());
    for action in actions {
        let id = Uuid::new_v4();
        let received_at = chrono::Utc::now();

        sqlx::query(
            "INSERT INTO action (id, tick, actor_id, type, payload, received_at, signature)
             VALUES ($1, $2, $3, $4, $5, $6, NULL)",
        )
        .bind(id)
        .bind(tick)
        .bind(action.actor_id)
        .bind(&action.action_type)
        .bind(&action.payload)
        .bind(received_at)
        .execute(&mut *session.tx)
        .await
        .map_err(CoreError::from)?;

        inserted.push(Action {
            id,
            tick,
            actor_id: action.actor_id,
            action_type: action.action_type,
            payload: action.payload,
            received_at,
            signature: None,
        });
    }

    Ok(inserted)
}

/// Fetches all actions for `tick` in received-at order and dispatches each
/// through the ruleset registry (validate, then apply). Any error aborts the
/// whole advance — the caller's transaction rolls back and the tick does not move.
pub async fn apply_actions(
    session: &mut Session<'_>,
    broadcaster: &dyn Broadcaster,
    tick: i64,
) -> CoreResult<Vec<AppliedDescriptor>> {
    let actions = sqlx::query_as::<_, Action>(
        "SELECT * FROM action WHERE tick = $1 ORDER BY received_at ASC, id ASC",
    )
    .bind(tick)
    .fetch_all(&mut *session.tx)
    .await
    .map_err(CoreError::from)?;

    let registry = rules::registry();
    let mut descriptors = Vec::with_capacity(actions.len());

    for action in actions {
        let handler = registry.get(&action.action_type).ok_or_else(|| {
            CoreError::Validation(format!("unknown action type '{}'", action.action_type))
        })?;

        handler.validate(&action.payload).await?;

        let mut ctx = RuleContext {
            session,
            broadcaster,
            tick,
            actor_id: action.actor_id,
        };
        let result = handler.apply(&mut ctx, &action.payload).await?;

        descriptors.push(AppliedDescriptor {
            id: action.id,
            action_type: action.action_type,
            payload: action.payload,
            result,
        });
    }

    Ok(descriptors)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn actor(n: u8) -> Uuid {
        Uuid::from_bytes([n; 16])
    }

    #[test]
    fn quota_check_rejects_fourth_action_by_same_actor() {
        let mut counts: HashMap<Uuid, usize> = HashMap::new();
        let a = actor(1);
        for _ in 0..PER_TICK_ACTION_LIMIT {
            let count = counts.entry(a).or_insert(0);
            *count += 1;
            assert!(*count <= PER_TICK_ACTION_LIMIT);
        }
        let count = counts.entry(a).or_insert(0);
        *count += 1;
        assert!(*count > PER_TICK_ACTION_LIMIT);
    }
}
