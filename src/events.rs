//! Event recording: insert then best-effort publish.

use serde_json::Value;
use uuid::Uuid;

use crate::broadcaster::Broadcaster;
use crate::domain::models::Event;
use crate::error::{CoreError, CoreResult};
use crate::store::{event_message, Session};

/// Inserts an event row, then publishes its JSON shape to the `"events"`
/// channel. Publish failure is logged, never propagated — the inserted row
/// is the durable record regardless of delivery.
pub async fn record_event(
    session: &mut Session<'_>,
    broadcaster: &dyn Broadcaster,
    tick: i64,
    kind: &str,
    subject_id: Option<Uuid>,
    payload: Value,
) -> CoreResult<Event> {
    let id = Uuid::new_v4();
    let created_at = chrono::Utc::now();

    sqlx::query(
        "INSERT INTO event (id, tick, kind, subject_id, payload, created_at)
         VALUES ($1, $2, $3, $4, $5, $6)",
    )
    .bind(id)
    .bind(tick)
    .bind(kind)
    .bind(subject_id)
    .bind(&payload)
    .bind(created_at)
    .execute(&mut *session.tx)
    .await
    .map_err(CoreError::from)?;

    let event = Event {
        id,
        tick,
        kind: kind.to_string(),
        subject_id,
        payload: payload.clone(),
        created_at,
    };

    let message = event_message(id, tick, kind, subject_id, &payload);
    broadcaster.publish("events", message);

    Ok(event)
}
