//! Transactional session and shared row-lock helpers.
//!
//! One `Session` wraps one `sqlx::Transaction`, opened per externally
//! originated request (or per test). Callers `commit()` on success; the
//! underlying transaction rolls back on `Drop` otherwise, matching
//! `app/infra/db.py`'s `lifespan_session` semantics.

use chrono::Utc;
use serde_json::{json, Value};
use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use crate::domain::models::{Player, World};
use crate::error::{CoreError, CoreResult};

pub struct Session<'a> {
    pub tx: Transaction<'a, Postgres>,
}

impl<'a> Session<'a> {
    pub async fn begin(pool: &PgPool) -> CoreResult<Session<'static>> {
        let tx = pool.begin().await.map_err(CoreError::from)?;
        Ok(Session { tx })
    }

    pub async fn commit(self) -> CoreResult<()> {
        self.tx.commit().await.map_err(CoreError::from)
    }

    /// Reads the singleton world row, creating it at tick 0 if absent. Locks
    /// the row so concurrent `advance_tick` calls serialize on it, per
    /// spec.md's "at most one advance_tick may run concurrently per world
    /// instance" requirement.
    pub async fn ensure_world(&mut self) -> CoreResult<World> {
        if let Some(world) = sqlx::query_as::<_, World>("SELECT * FROM world WHERE id = 1 FOR UPDATE")
            .fetch_optional(&mut *self.tx)
            .await
            .map_err(CoreError::from)?
        {
            return Ok(world);
        }

        let now = Utc::now();
        sqlx::query(
            "INSERT INTO world (id, tick, seed, ruleset_version, created_at, updated_at)
             VALUES (1, 0, 0, 'season1_dark_grid', $1, $1)
             ON CONFLICT (id) DO NOTHING",
        )
        .bind(now)
        .execute(&mut *self.tx)
        .await
        .map_err(CoreError::from)?;

        sqlx::query_as::<_, World>("SELECT * FROM world WHERE id = 1")
            .fetch_one(&mut *self.tx)
            .await
            .map_err(CoreError::from)
    }

    /// Locks and returns a player row by id, failing with `NotFound` if missing.
    pub async fn lock_player(&mut self, player_id: Uuid) -> CoreResult<Player> {
        sqlx::query_as::<_, Player>("SELECT * FROM player WHERE id = $1 FOR UPDATE")
            .bind(player_id)
            .fetch_optional(&mut *self.tx)
            .await
            .map_err(CoreError::from)?
            .ok_or_else(|| CoreError::NotFound(format!("player {player_id} not found")))
    }

    pub async fn fetch_player(&mut self, player_id: Uuid) -> CoreResult<Player> {
        sqlx::query_as::<_, Player>("SELECT * FROM player WHERE id = $1")
            .bind(player_id)
            .fetch_optional(&mut *self.tx)
            .await
            .map_err(CoreError::from)?
            .ok_or_else(|| CoreError::NotFound(format!("player {player_id} not found")))
    }

    pub async fn fetch_player_by_token_hash(&mut self, token_hash: &str) -> CoreResult<Player> {
        sqlx::query_as::<_, Player>("SELECT * FROM player WHERE token_hash = $1")
            .bind(token_hash)
            .fetch_optional(&mut *self.tx)
            .await
            .map_err(CoreError::from)?
            .ok_or(CoreError::Auth)
    }

    pub async fn set_player_balance(&mut self, player_id: Uuid, balance: i64) -> CoreResult<()> {
        sqlx::query("UPDATE player SET balance_mamp = $1 WHERE id = $2")
            .bind(balance)
            .bind(player_id)
            .execute(&mut *self.tx)
            .await
            .map_err(CoreError::from)?;
        Ok(())
    }

    pub async fn set_world_tick(&mut self, tick: i64) -> CoreResult<()> {
        sqlx::query("UPDATE world SET tick = $1, updated_at = $2 WHERE id = 1")
            .bind(tick)
            .bind(Utc::now())
            .execute(&mut *self.tx)
            .await
            .map_err(CoreError::from)?;
        Ok(())
    }
}

/// Builds the `{id, tick, kind, subject_id, payload}` JSON shape published to
/// the broadcaster's `events` channel.
pub fn event_message(id: Uuid, tick: i64, kind: &str, subject_id: Option<Uuid>, payload: &Value) -> Value {
    json!({
        "id": id,
        "tick": tick,
        "kind": kind,
        "subject_id": subject_id,
        "payload": payload,
    })
}
