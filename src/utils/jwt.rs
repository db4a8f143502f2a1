use anyhow::{Context, Result};
use chrono::Utc;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::entities::sea_orm_active_enums::RoleEnum;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenClaims {
    /// User id.
    pub sub: i32,
    /// Display name ("First Last").
    pub name: String,
    pub role: RoleEnum,
    pub iat: i64,
    pub exp: i64,
}

pub struct JwtManager {
    secret: String,
}

impl JwtManager {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
        }
    }

    pub fn create_jwt(
        &self,
        user_id: i32,
        name: &str,
        role: RoleEnum,
        ttl_seconds: i64,
    ) -> Result<String> {
        let now = Utc::now().timestamp();
        let claims = TokenClaims {
            sub: user_id,
            name: name.to_string(),
            role,
            iat: now,
            exp: now + ttl_seconds,
        };

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
        .context("Failed to encode JWT")
    }

    pub fn decode_jwt(&self, token: &str) -> Result<TokenClaims> {
        let data = decode::<TokenClaims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &Validation::default(),
        )
        .context("Failed to decode JWT")?;

        Ok(data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trip_preserves_claims() {
        let manager = JwtManager::new("test-secret");
        let token = manager
            .create_jwt(42, "Ana Reyes", RoleEnum::Student, 3600)
            .unwrap();

        let claims = manager.decode_jwt(&token).unwrap();
        assert_eq!(claims.sub, 42);
        assert_eq!(claims.name, "Ana Reyes");
        assert_eq!(claims.role, RoleEnum::Student);
    }

    #[test]
    fn expired_token_is_rejected() {
        let manager = JwtManager::new("test-secret");
        let token = manager
            .create_jwt(1, "Old Token", RoleEnum::Admin, -3600)
            .unwrap();
        assert!(manager.decode_jwt(&token).is_err());
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let token = JwtManager::new("secret-a")
            .create_jwt(1, "Ana Reyes", RoleEnum::Admin, 3600)
            .unwrap();
        assert!(JwtManager::new("secret-b").decode_jwt(&token).is_err());
    }
}
