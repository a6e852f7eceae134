//! Bearer-token authentication, grounded on `app/core/auth.py`.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use sha2::{Digest, Sha256};

use crate::domain::models::Player;
use crate::error::CoreError;
use crate::gateway::state::AppState;

/// The authenticated player, extracted from the `Authorization: Bearer <token>` header.
pub struct AuthenticatedPlayer(pub Player);

pub fn hash_token(token: &str) -> String {
    hex::encode(Sha256::digest(token.as_bytes()))
}

impl FromRequestParts<AppState> for AuthenticatedPlayer {
    type Rejection = CoreError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(axum::http::header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or(CoreError::Auth)?;

        let token = header.strip_prefix("Bearer ").ok_or(CoreError::Auth)?;
        let token_hash = hash_token(token);

        let player = sqlx::query_as::<_, Player>("SELECT * FROM player WHERE token_hash = $1")
            .bind(&token_hash)
            .fetch_optional(&state.pool)
            .await
            .map_err(CoreError::from)?
            .ok_or(CoreError::Auth)?;

        Ok(AuthenticatedPlayer(player))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_token_is_deterministic_hex_sha256() {
        let a = hash_token("my-secret-token");
        let b = hash_token("my-secret-token");
        assert_eq!(a, b);
        assert_eq!(a.len(), 64);
        assert!(a.chars().all(|c| c.is_ascii_hexdigit()));
    }
}
