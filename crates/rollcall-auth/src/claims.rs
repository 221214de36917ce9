//! JWT claim structure for session tokens.

use chrono::{DateTime, Duration, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Claims carried by a session token.
///
/// - `sub`: the authenticated user's email address
/// - `iat`: issued-at timestamp (Unix seconds)
/// - `exp`: expiry timestamp (Unix seconds)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Claims {
    /// Subject: the user's email address
    pub sub: String,
    /// Token issued-at timestamp (Unix timestamp)
    pub iat: i64,
    /// Token expiration timestamp (Unix timestamp)
    pub exp: i64,
}

impl Claims {
    /// Returns `None` when `issued_at + lifetime` falls outside the
    /// representable date range.
    pub fn new(
        email: impl Into<String>,
        issued_at: DateTime<Utc>,
        lifetime: Duration,
    ) -> Option<Self> {
        let expires_at = issued_at.checked_add_signed(lifetime)?;
        Some(Self {
            sub: email.into(),
            iat: issued_at.timestamp(),
            exp: expires_at.timestamp(),
        })
    }

    pub fn email(&self) -> &str {
        &self.sub
    }

    pub fn expires_at(&self) -> DateTime<Utc> {
        Utc.timestamp_opt(self.exp, 0)
            .single()
            .unwrap_or(DateTime::<Utc>::MAX_UTC)
    }

    /// A token is expired from its expiry instant onwards.
    pub fn is_expired_at(&self, now: i64) -> bool {
        now >= self.exp
    }
}
