//! Orchestration only, grounded on `app/core/ticks.py`'s `TickManager`.

use serde_json::json;

use crate::action_service::{self, ActionInput};
use crate::broadcaster::Broadcaster;
use crate::domain::models::{Action, World};
use crate::error::CoreResult;
use crate::events::record_event;
use crate::replay::{self};
use crate::rules::AppliedDescriptor;
use crate::store::Session;

pub async fn get_world_state(session: &mut Session<'_>) -> CoreResult<World> {
    session.ensure_world().await
}

pub async fn enqueue_actions(
    session: &mut Session<'_>,
    actions: Vec<ActionInput>,
) -> CoreResult<Vec<Action>> {
    let world = session.ensure_world().await?;
    action_service::enqueue_actions(session, world.tick, actions).await
}

pub struct AdvanceResult {
    pub tick: i64,
    pub applied: Vec<AppliedDescriptor>,
}

/// Applies all queued actions for the current tick, advances the tick
/// counter, records a `tick.advance` event at the new tick, and appends the
/// replay log row. Atomic: any failure rolls back the whole advance and the
/// tick does not move.
pub async fn advance_tick(
    session: &mut Session<'_>,
    broadcaster: &dyn Broadcaster,
) -> CoreResult<AdvanceResult> {
    let world = session.ensure_world().await?;
    let current_tick = world.tick;

    let applied = action_service::apply_actions(session, broadcaster, current_tick).await?;

    let new_tick = current_tick + 1;
    session.set_world_tick(new_tick).await?;

    record_event(
        session,
        broadcaster,
        new_tick,
        "tick.advance",
        None,
        json!({"tick": new_tick}),
    )
    .await?;

    replay::append_replay_log(session, new_tick, &applied).await?;

    Ok(AdvanceResult {
        tick: new_tick,
        applied,
    })
}
