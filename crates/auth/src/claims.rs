//! JWT claims types

use std::fmt;

use serde::{Deserialize, Serialize};

/// The two token kinds the codec issues.
///
/// Kinds are never interchangeable: an access token presented where a
/// refresh token is expected is rejected, and vice versa.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    Access,
    Refresh,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Access => write!(f, "access"),
            TokenKind::Refresh => write!(f, "refresh"),
        }
    }
}

/// Claims carried by every Yachay token.
///
/// `user_id` duplicates `sub` on the wire for clients that read the
/// non-standard claim name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,
    /// Same value as `sub`, under the legacy wire name
    #[serde(rename = "userId")]
    pub user_id: String,
    /// Email, present on access tokens only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Token kind discriminator
    #[serde(rename = "type")]
    pub kind: TokenKind,
    /// Issued at (epoch seconds)
    pub iat: i64,
    /// Expires at (epoch seconds)
    pub exp: i64,
}
