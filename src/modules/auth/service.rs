use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use chrono::{Duration, Utc};
use jsonwebtoken::{encode, EncodingKey, Header};
use serde::{Deserialize, Serialize};

use crate::modules::users::entities::enums::Role;
use crate::shared::config::Config;
use crate::shared::error::{AppError, AppResult};

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// User UUID.
    pub sub: String,
    pub role: String,
    pub exp: usize,
    pub iat: usize,
}

pub struct AuthService;

impl AuthService {
    pub fn generate_jwt(config: &Config, user_uuid: &str, role: Role) -> AppResult<String> {
        let now = Utc::now();
        let expiration = now
            .checked_add_signed(Duration::hours(config.jwt_expiry_hours))
            .ok_or_else(|| AppError::InternalServerError("invalid expiry".to_string()))?
            .timestamp() as usize;

        let claims = Claims {
            sub: user_uuid.to_string(),
            role: role.as_str().to_string(),
            exp: expiration,
            iat: now.timestamp() as usize,
        };

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(config.jwt_secret.as_bytes()),
        )
        .map_err(|e| AppError::InternalServerError(format!("JWT generation failed: {}", e)))
    }

    pub fn hash_password(password: &str) -> AppResult<String> {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| AppError::InternalServerError(format!("Password hashing failed: {}", e)))
    }

    pub fn verify_password(password: &str, hash: &str) -> AppResult<()> {
        let parsed = PasswordHash::new(hash)
            .map_err(|e| AppError::InternalServerError(format!("Corrupt password hash: {}", e)))?;
        Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .map_err(|_| AppError::Unauthorized("Invalid credentials".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_then_verify_round_trip() {
        let hash = AuthService::hash_password("hunter2").unwrap();
        assert!(AuthService::verify_password("hunter2", &hash).is_ok());
        assert!(matches!(
            AuthService::verify_password("hunter3", &hash),
            Err(AppError::Unauthorized(_))
        ));
    }
}
