//! Signed session tokens (JWT, HS256).

use argon2::password_hash::rand_core::{OsRng, RngCore};
use chrono::Utc;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use quill_core::ports::{AuthError, SessionClaims, SessionTokenService};

/// Session token signing configuration.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub issuer: String,
}

/// Internal JWT claims structure for serialization.
#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sid: String,
    sub: String, // user id
    exp: i64,
    iat: i64,
    iss: String,
}

/// JWT-backed session token service.
pub struct JwtSessionTokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    issuer: String,
}

impl JwtSessionTokenService {
    pub fn new(config: JwtConfig) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(config.secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.secret.as_bytes()),
            issuer: config.issuer,
        }
    }
}

/// A 256-bit random secret, hex encoded. Tokens signed with it die with the
/// process.
pub fn random_secret() -> String {
    let mut bytes = [0u8; 32];
    OsRng.fill_bytes(&mut bytes);
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

impl SessionTokenService for JwtSessionTokenService {
    fn issue(&self, session_id: Uuid, user_id: i32, exp: i64) -> Result<String, AuthError> {
        let claims = Claims {
            sid: session_id.to_string(),
            sub: user_id.to_string(),
            exp,
            iat: Utc::now().timestamp(),
            iss: self.issuer.clone(),
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AuthError::InvalidToken(e.to_string()))
    }

    fn verify(&self, token: &str) -> Result<SessionClaims, AuthError> {
        let mut validation = Validation::default();
        validation.set_issuer(&[&self.issuer]);
        validation.leeway = 0;

        let token_data = decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
            match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::SessionExpired,
                _ => AuthError::InvalidToken(e.to_string()),
            }
        })?;

        let session_id = Uuid::parse_str(&token_data.claims.sid)
            .map_err(|e| AuthError::InvalidToken(e.to_string()))?;
        let user_id = token_data
            .claims
            .sub
            .parse()
            .map_err(|_| AuthError::InvalidToken("malformed subject".to_string()))?;

        Ok(SessionClaims {
            session_id,
            user_id,
            exp: token_data.claims.exp,
        })
    }
}
