//! Hash-chained replay log, grounded on `app/core/replay.py`.
//!
//! The append and verify paths both hash the *reduced* snapshot
//! `{"tick": T}` — see DESIGN.md for why this form (not the richer
//! `{tick, players, listings}` snapshot spec.md §4.8 also describes) was
//! picked as canonical: the verifier in the source service only ever
//! rehashes the reduced form, so that is the one actually load-bearing for
//! round-trip correctness.

use serde_json::{json, Value};
use sha2::{Digest, Sha256};

use crate::canonical_json::canonical_bytes;
use crate::domain::models::ReplayLog;
use crate::error::{CoreError, CoreResult};
use crate::rules::AppliedDescriptor;
use crate::store::Session;

fn genesis_hash() -> String {
    "0".repeat(64)
}

/// The minimal, deterministic snapshot hashed at every tick.
pub fn snapshot_state(tick: i64) -> Value {
    json!({ "tick": tick })
}

fn compute_hash(snapshot: &Value, actions: &Value, prev_hash: &str) -> String {
    let payload = json!({
        "state": snapshot,
        "actions": actions,
        "prev": prev_hash,
    });
    let digest = Sha256::digest(canonical_bytes(&payload));
    hex::encode(digest)
}

/// Appends one replay row for `tick`, chaining off the previous tick's
/// stored hash (or the genesis hash at tick 1 / when no prior row exists).
pub async fn append_replay_log(
    session: &mut Session<'_>,
    tick: i64,
    applied: &[AppliedDescriptor],
) -> CoreResult<ReplayLog> {
    let prev_hash = fetch_prev_hash(session, tick).await?;
    let actions_json = serde_json::to_value(applied).map_err(|e| CoreError::Internal(e.to_string()))?;
    let snapshot = snapshot_state(tick);
    let state_hash = compute_hash(&snapshot, &actions_json, &prev_hash);

    sqlx::query(
        "INSERT INTO replay_log (tick, state_hash, prev_hash, actions) VALUES ($1, $2, $3, $4)",
    )
    .bind(tick)
    .bind(&state_hash)
    .bind(&prev_hash)
    .bind(&actions_json)
    .execute(&mut *session.tx)
    .await
    .map_err(CoreError::from)?;

    Ok(ReplayLog {
        tick,
        state_hash,
        prev_hash,
        actions: actions_json,
    })
}

async fn fetch_prev_hash(session: &mut Session<'_>, tick: i64) -> CoreResult<String> {
    if tick <= 1 {
        return Ok(genesis_hash());
    }
    let prev = sqlx::query_as::<_, ReplayLog>("SELECT * FROM replay_log WHERE tick = $1")
        .bind(tick - 1)
        .fetch_optional(&mut *session.tx)
        .await
        .map_err(CoreError::from)?;
    Ok(prev.map(|row| row.state_hash).unwrap_or_else(genesis_hash))
}

/// Recomputes the hash chain over `[start, end]` and compares against the
/// stored `state_hash` for each row. Returns `false` on the first mismatch.
pub async fn verify_range(session: &mut Session<'_>, start: i64, end: i64) -> CoreResult<bool> {
    let rows = sqlx::query_as::<_, ReplayLog>(
        "SELECT * FROM replay_log WHERE tick >= $1 AND tick <= $2 ORDER BY tick ASC",
    )
    .bind(start)
    .bind(end)
    .fetch_all(&mut *session.tx)
    .await
    .map_err(CoreError::from)?;

    let mut running_prev = genesis_hash();
    for row in rows {
        let snapshot = snapshot_state(row.tick);
        let expected = compute_hash(&snapshot, &row.actions, &running_prev);
        if expected != row.state_hash {
            return Ok(false);
        }
        running_prev = row.state_hash;
    }

    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn genesis_hash_is_64_zero_chars() {
        assert_eq!(genesis_hash().len(), 64);
        assert!(genesis_hash().chars().all(|c| c == '0'));
    }

    #[test]
    fn compute_hash_is_deterministic() {
        let snapshot = snapshot_state(1);
        let actions = json!([]);
        let a = compute_hash(&snapshot, &actions, &genesis_hash());
        let b = compute_hash(&snapshot, &actions, &genesis_hash());
        assert_eq!(a, b);
        assert_eq!(a.len(), 64);
    }

    #[test]
    fn compute_hash_changes_with_prev() {
        let snapshot = snapshot_state(2);
        let actions = json!([]);
        let a = compute_hash(&snapshot, &actions, &genesis_hash());
        let b = compute_hash(&snapshot, &actions, "1".repeat(64).as_str());
        assert_ne!(a, b);
    }
}
