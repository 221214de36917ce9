//! # Rollcall Auth
//!
//! Session token types and the JWT codec for the Rollcall API.
//!
//! - [`claims`]: the [`Claims`] embedded in every session token
//! - [`jwt`]: HS256 token encoding and verification
//!
//! Tokens are stateless: nothing is stored server-side, a token is valid
//! until its embedded expiry and is verified with the shared secret alone.
//!
//! # Example
//!
//! ```ignore
//! use rollcall_auth::{create_token, verify_token};
//! use rollcall_config::JwtConfig;
//!
//! let config = JwtConfig::from_env();
//!
//! let issued = create_token("user@example.com", &config)?;
//! let claims = verify_token(&issued.token, &config)?;
//! assert_eq!(claims.sub, "user@example.com");
//! ```

pub mod claims;
pub mod jwt;

pub use claims::Claims;
pub use jwt::{
    ALGORITHM, IssuedToken, TokenError, create_token, decode_claims, decode_claims_at,
    encode_claims, verify_token,
};
