use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::config::SecurityConfig;
use crate::database::models::Id;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub user_id: Id,
    pub exp: i64,
    pub iat: i64,
}

impl Claims {
    pub fn new(user_id: Id, ttl: Duration) -> Self {
        let now = Utc::now();
        Self {
            user_id,
            exp: (now + ttl).timestamp(),
            iat: now.timestamp(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum JwtError {
    #[error("JWT generation error: {0}")]
    TokenGeneration(String),
    #[error("Invalid JWT secret")]
    InvalidSecret,
    /// Bad signature, malformed input and expiry all collapse here
    #[error("Invalid or expired token")]
    InvalidToken,
}

/// Signs and verifies HS256 access tokens
pub struct TokenIssuer {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    ttl: Duration,
}

impl TokenIssuer {
    pub fn new(secret: &str, ttl: Duration) -> Result<Self, JwtError> {
        if secret.is_empty() {
            return Err(JwtError::InvalidSecret);
        }
        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            ttl,
        })
    }

    pub fn from_config(security: &SecurityConfig) -> Result<Self, JwtError> {
        Self::new(&security.jwt_secret, Duration::minutes(security.jwt_expiry_minutes))
    }

    /// Seconds a freshly issued token stays valid
    pub fn ttl_secs(&self) -> i64 {
        self.ttl.num_seconds()
    }

    pub fn issue(&self, user_id: Id) -> Result<String, JwtError> {
        self.sign(&Claims::new(user_id, self.ttl))
    }

    pub fn sign(&self, claims: &Claims) -> Result<String, JwtError> {
        encode(&Header::new(Algorithm::HS256), claims, &self.encoding_key)
            .map_err(|e| JwtError::TokenGeneration(e.to_string()))
    }

    pub fn validate(&self, token: &str) -> Result<Claims, JwtError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| {
                tracing::debug!("Rejected access token: {}", e);
                JwtError::InvalidToken
            })
    }
}

/// Hash with an explicit bcrypt cost (`bcrypt::DEFAULT_COST` in production)
pub fn hash_password(plain: &str, cost: u32) -> Result<String, bcrypt::BcryptError> {
    bcrypt::hash(plain, cost)
}

pub fn verify_password(plain: &str, hash: &str) -> Result<bool, bcrypt::BcryptError> {
    bcrypt::verify(plain, hash)
}
