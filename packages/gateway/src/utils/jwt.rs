use anyhow::Result;
use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Issuer stamped into, and required on, every access token.
pub const ISSUER: &str = "assetgate-access";

/// JWT Claims structure.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub iss: String,
    pub sub: String, // User ID
    pub iat: usize,
    pub exp: usize,
}

/// Sign an access token for a user.
///
/// The gateway only verifies tokens; issuing them belongs to the identity
/// service. This is kept for minting tokens in tests and local tooling.
pub fn sign(user_id: Uuid, secret: &str, ttl: Duration) -> Result<String> {
    let now = Utc::now();
    let expiration = now
        .checked_add_signed(ttl)
        .ok_or_else(|| anyhow::anyhow!("token expiry out of range"))?;

    let claims = Claims {
        iss: ISSUER.to_string(),
        sub: user_id.to_string(),
        iat: now.timestamp() as usize,
        exp: expiration.timestamp() as usize,
    };

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )?;

    Ok(token)
}

/// Verify a token and return the user ID it was issued to.
pub fn verify(token: &str, secret: &str) -> Result<Uuid> {
    let mut validation = Validation::default();
    validation.set_issuer(&[ISSUER]);

    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )?;
    Ok(Uuid::parse_str(&token_data.claims.sub)?)
}
