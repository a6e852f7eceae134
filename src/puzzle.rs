//! Proof-of-work verification for encrypted currency packets, grounded on
//! `app/domain/services/encryption_service.py`.

use serde_json::Value;
use sha2::{Digest, Sha256};

/// Checks a `{type: "hash-chain", ...}` puzzle payload against a claimed
/// solution. Returns the reward in mAMP on a valid match, `None` on any
/// mismatch or malformed payload — this function never errors, it only
/// distinguishes accept/reject.
pub fn verify(payload: &Value, solution: &Value) -> Option<i64> {
    if payload.get("type")?.as_str()? != "hash-chain" {
        return None;
    }

    let seed = payload.get("seed")?.as_str()?;
    let target_prefix = payload.get("target_prefix")?.as_str()?;
    let difficulty = payload.get("difficulty")?.as_u64()? as usize;
    let reward_mamp = payload.get("reward_mamp")?.as_i64()?;
    if reward_mamp < 0 {
        return None;
    }

    let nonce = solution.get("nonce")?.as_str()?;

    let digest_input = format!("{seed}:{nonce}");
    let digest = Sha256::digest(digest_input.as_bytes());
    let hex_digest = hex::encode(digest);

    let prefix_len = difficulty.min(target_prefix.len());
    if hex_digest.len() < prefix_len {
        return None;
    }

    if hex_digest[..prefix_len] == target_prefix[..prefix_len] {
        Some(reward_mamp)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn matching_prefix_returns_reward() {
        let payload = json!({
            "type": "hash-chain",
            "difficulty": 2,
            "target_prefix": "00",
            "seed": "seed",
            "reward_mamp": 2000,
        });
        // SHA-256("seed:293") is known (from the original service's fixture)
        // to start with "00".
        let solution = json!({"nonce": "293"});
        assert_eq!(verify(&payload, &solution), Some(2000));
    }

    #[test]
    fn mismatched_prefix_returns_none() {
        let payload = json!({
            "type": "hash-chain",
            "difficulty": 4,
            "target_prefix": "ffff",
            "seed": "seed",
            "reward_mamp": 2000,
        });
        let solution = json!({"nonce": "1"});
        assert_eq!(verify(&payload, &solution), None);
    }

    #[test]
    fn wrong_type_returns_none() {
        let payload = json!({"type": "other", "seed": "s", "difficulty": 1, "target_prefix": "0", "reward_mamp": 1});
        let solution = json!({"nonce": "1"});
        assert_eq!(verify(&payload, &solution), None);
    }

    #[test]
    fn negative_reward_returns_none() {
        let payload = json!({
            "type": "hash-chain",
            "difficulty": 0,
            "target_prefix": "",
            "seed": "seed",
            "reward_mamp": -5,
        });
        let solution = json!({"nonce": "anything"});
        assert_eq!(verify(&payload, &solution), None);
    }

    #[test]
    fn missing_nonce_returns_none() {
        let payload = json!({
            "type": "hash-chain",
            "difficulty": 1,
            "target_prefix": "0",
            "seed": "seed",
            "reward_mamp": 10,
        });
        assert_eq!(verify(&payload, &json!({})), None);
    }
}
