//! HS256 token issuance and verification

use axum::http::HeaderValue;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};

use crate::claims::{Claims, TokenKind};
use crate::config::TokenConfig;
use crate::error::TokenError;

/// An access + refresh token pair scoped to one subject
#[derive(Debug, Clone)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

/// Issues and verifies the service's tokens.
///
/// All tokens are HS256-signed with one process-wide secret. Expiry is
/// checked with zero leeway: a token whose lifetime has passed fails
/// verification immediately, including tokens issued with a negative
/// lifetime.
pub struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    access_ttl: Duration,
    refresh_ttl: Duration,
}

impl TokenCodec {
    pub fn new(config: &TokenConfig) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(config.secret.as_ref()),
            decoding_key: DecodingKey::from_secret(config.secret.as_ref()),
            access_ttl: Duration::milliseconds(config.access_ttl_ms),
            refresh_ttl: Duration::milliseconds(config.refresh_ttl_ms),
        }
    }

    /// Issue an access token carrying the subject's email claim
    pub fn issue_access(&self, subject: &str, email: &str) -> Result<String, TokenError> {
        self.issue(subject, Some(email), TokenKind::Access, self.access_ttl)
    }

    /// Issue a refresh token (subject only, no email claim)
    pub fn issue_refresh(&self, subject: &str) -> Result<String, TokenError> {
        self.issue(subject, None, TokenKind::Refresh, self.refresh_ttl)
    }

    /// Issue a fresh access + refresh pair for one subject
    pub fn issue_pair(&self, subject: &str, email: &str) -> Result<TokenPair, TokenError> {
        Ok(TokenPair {
            access_token: self.issue_access(subject, email)?,
            refresh_token: self.issue_refresh(subject)?,
        })
    }

    fn issue(
        &self,
        subject: &str,
        email: Option<&str>,
        kind: TokenKind,
        ttl: Duration,
    ) -> Result<String, TokenError> {
        let now = Utc::now();
        let expires_at = now + ttl;

        let claims = Claims {
            sub: subject.to_owned(),
            user_id: subject.to_owned(),
            email: email.map(str::to_owned),
            kind,
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key).map_err(|e| {
            tracing::error!(error = %e, kind = %kind, "token issuance failed");
            TokenError::Issuance
        })
    }

    /// Verify a token's signature, expiry, and kind, returning its claims.
    ///
    /// Expiry wins over kind: an expired refresh token presented as an
    /// access token reports `Expired`, not `WrongKind`.
    pub fn verify(&self, token: &str, expected: TokenKind) -> Result<Claims, TokenError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_aud = false;
        validation.leeway = 0;

        let token_data =
            decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
                tracing::debug!(error = %e, "token validation failed");
                match e.kind() {
                    jsonwebtoken::errors::ErrorKind::ExpiredSignature => TokenError::Expired,
                    jsonwebtoken::errors::ErrorKind::InvalidSignature => {
                        TokenError::InvalidSignature
                    }
                    _ => TokenError::Malformed,
                }
            })?;

        // exp carries whole seconds; the token is invalid from the exp
        // second onward, so sub-second negative lifetimes fail here even
        // when truncation lands exp in the current second.
        if Utc::now().timestamp() >= token_data.claims.exp {
            return Err(TokenError::Expired);
        }

        if token_data.claims.kind != expected {
            return Err(TokenError::WrongKind {
                expected,
                found: token_data.claims.kind,
            });
        }

        Ok(token_data.claims)
    }

    /// Read the subject without checking signature or expiry.
    ///
    /// Diagnostics only. The result must never feed an authorization
    /// decision.
    pub fn extract_subject_unverified(&self, token: &str) -> Option<String> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.insecure_disable_signature_validation();
        validation.validate_exp = false;
        validation.required_spec_claims.clear();

        decode::<Claims>(token, &self.decoding_key, &validation)
            .ok()
            .map(|data| data.claims.sub)
    }
}

/// Extract a bearer token from an Authorization header value
pub fn extract_bearer_token(header: &HeaderValue) -> Option<String> {
    let header_str = header.to_str().ok()?;
    header_str
        .strip_prefix("Bearer ")
        .map(|token| token.to_string())
}
