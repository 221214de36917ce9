//! JWT encoding and verification.
//!
//! Session tokens are compact JWTs signed with HS256 and a shared secret.
//! Verification distinguishes why a token was rejected (see [`TokenError`])
//! so the reason can be logged, while the HTTP boundary folds every variant
//! into the same `401 Invalid token` response.
//!
//! The header algorithm is checked before anything else: a token whose
//! header names any algorithm other than [`ALGORITHM`] is rejected even when
//! it is otherwise well-formed, which rules out algorithm-substitution
//! attacks (`alg: none`, RS256 with the secret as a public key, ...).
//!
//! Expiry is checked without leeway: a token is accepted up to one second
//! before its `exp` and rejected from `exp` onwards.
//!
//! # Example
//!
//! ```ignore
//! let issued = create_token("user@example.com", &jwt_config)?;
//! let claims = verify_token(&issued.token, &jwt_config)?;
//! ```

use chrono::{Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{
    Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, decode_header, encode,
};
use thiserror::Error;

use rollcall_config::JwtConfig;
use rollcall_core::AppError;

use crate::claims::Claims;

/// The only algorithm accepted for session tokens.
pub const ALGORITHM: Algorithm = Algorithm::HS256;

/// Why a token failed to encode or verify.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    #[error("token signature does not verify")]
    InvalidSignature,
    #[error("token has expired")]
    Expired,
    #[error("token is malformed")]
    Malformed,
    #[error("token algorithm is not HS256")]
    AlgorithmMismatch,
    #[error("failed to encode token: {0}")]
    Encoding(String),
}

impl From<jsonwebtoken::errors::Error> for TokenError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        match err.kind() {
            ErrorKind::InvalidSignature => TokenError::InvalidSignature,
            ErrorKind::ExpiredSignature => TokenError::Expired,
            ErrorKind::InvalidAlgorithm
            | ErrorKind::InvalidAlgorithmName
            | ErrorKind::MissingAlgorithm => TokenError::AlgorithmMismatch,
            _ => TokenError::Malformed,
        }
    }
}

impl From<TokenError> for AppError {
    fn from(err: TokenError) -> Self {
        match err {
            TokenError::Encoding(_) => AppError::internal(err),
            _ => AppError::unauthorized("Invalid token"),
        }
    }
}

/// A freshly signed token together with the claims it carries.
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub claims: Claims,
}

pub fn encode_claims(claims: &Claims, secret: &[u8]) -> Result<String, TokenError> {
    encode(
        &Header::new(ALGORITHM),
        claims,
        &EncodingKey::from_secret(secret),
    )
    .map_err(|e| TokenError::Encoding(e.to_string()))
}

/// Verifies `token` against `secret` as of the current time.
pub fn decode_claims(token: &str, secret: &[u8]) -> Result<Claims, TokenError> {
    decode_claims_at(token, secret, Utc::now().timestamp())
}

/// Verifies `token` against `secret` as of `now` (Unix seconds).
pub fn decode_claims_at(token: &str, secret: &[u8], now: i64) -> Result<Claims, TokenError> {
    let header = decode_header(token).map_err(|_| TokenError::Malformed)?;
    if header.alg != ALGORITHM {
        return Err(TokenError::AlgorithmMismatch);
    }

    let mut validation = Validation::new(ALGORITHM);
    // Expiry is checked below against `now`, without leeway.
    validation.validate_exp = false;
    validation.leeway = 0;

    let claims = decode::<Claims>(token, &DecodingKey::from_secret(secret), &validation)?.claims;

    if claims.is_expired_at(now) {
        return Err(TokenError::Expired);
    }

    Ok(claims)
}

/// Issues a session token for `email`, valid for the configured lifetime.
pub fn create_token(email: &str, jwt_config: &JwtConfig) -> Result<IssuedToken, AppError> {
    let claims = Duration::try_seconds(jwt_config.token_expiry)
        .and_then(|lifetime| Claims::new(email, Utc::now(), lifetime))
        .ok_or_else(|| {
            TokenError::Encoding(format!(
                "token lifetime of {}s is out of range",
                jwt_config.token_expiry
            ))
        })?;

    let token = encode_claims(&claims, jwt_config.secret.as_bytes())?;

    Ok(IssuedToken { token, claims })
}

pub fn verify_token(token: &str, jwt_config: &JwtConfig) -> Result<Claims, TokenError> {
    decode_claims(token, jwt_config.secret.as_bytes())
}
