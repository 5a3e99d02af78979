use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::config::AuthConfig;
use crate::types::User;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    pub sub: i64,
    pub username: String,
    pub admin: bool,
    pub exp: usize,
}

pub fn issue(cfg: &AuthConfig, user: &User) -> anyhow::Result<String> {
    let claims = Claims {
        sub: user.id,
        username: user.username.clone(),
        admin: user.admin,
        exp: (Utc::now() + Duration::hours(cfg.token_ttl_hours)).timestamp() as usize,
    };

    let token = encode(&Header::default(), &claims, &EncodingKey::from_secret(cfg.jwt_secret.as_bytes()))?;
    Ok(token)
}

pub fn verify(cfg: &AuthConfig, token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
    let data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(cfg.jwt_secret.as_bytes()),
        &Validation::default(),
    )?;
    Ok(data.claims)
}
