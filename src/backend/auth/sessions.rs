/*!
 * Session Tokens
 *
 * This module issues and validates the signed bearer tokens that carry a
 * caller's identity between requests.
 *
 * # Wire Format
 *
 * `base64url(header).base64url(payload).base64url(signature)`, unpadded.
 * The header announces HS256, the payload is a flat JSON object with at
 * least `id`, `login` and `exp` (unix seconds), and the signature is
 * HMAC-SHA256 over `header.payload` keyed by the configured secret.
 *
 * # Failure Semantics
 *
 * Every validation failure (malformed structure, foreign algorithm, bad
 * signature, expiry, empty secret) surfaces as the single
 * [`TokenError::InvalidToken`]. The reason is logged at debug level only.
 */

use std::fmt;

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

/// Lifetime of tokens issued at signup/signin
pub const TOKEN_TTL_HOURS: i64 = 24;

/// Token errors
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TokenError {
    /// The signing secret is empty
    #[error("signing secret is not configured")]
    Configuration,

    /// The token could not be serialized or signed
    #[error("failed to encode token")]
    Encoding,

    /// The token was rejected; deliberately carries no reason
    #[error("invalid token")]
    InvalidToken,

    /// A claim is absent or has the wrong type
    #[error("claim `{0}` is missing or has the wrong type")]
    MissingClaim(&'static str),
}

/// Claims carried by every issued token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (credential) id
    pub id: String,
    /// Subject login
    pub login: String,
    /// Expiration time (unix seconds)
    pub exp: i64,
}

impl Claims {
    /// Claims for a subject expiring [`TOKEN_TTL_HOURS`] from now
    pub fn for_subject(id: impl Into<String>, login: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            login: login.into(),
            exp: (Utc::now() + Duration::hours(TOKEN_TTL_HOURS)).timestamp(),
        }
    }
}

/// Claims of a token whose signature and expiry have been checked
///
/// Kept as the raw flat map; use [`extract_subject_id`] and
/// [`extract_login`] to read typed values out of it.
#[derive(Debug, Clone, PartialEq)]
pub struct VerifiedClaims(Map<String, Value>);

impl VerifiedClaims {
    /// Raw claim lookup
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    /// Expiration time (unix seconds)
    pub fn expires_at(&self) -> Result<i64, TokenError> {
        self.get("exp")
            .and_then(Value::as_i64)
            .ok_or(TokenError::MissingClaim("exp"))
    }
}

impl TryFrom<&VerifiedClaims> for Claims {
    type Error = TokenError;

    fn try_from(claims: &VerifiedClaims) -> Result<Self, Self::Error> {
        Ok(Self {
            id: extract_subject_id(claims)?.to_string(),
            login: extract_login(claims)?.to_string(),
            exp: claims.expires_at()?,
        })
    }
}

/// Read the `id` claim, which must be a string
pub fn extract_subject_id(claims: &VerifiedClaims) -> Result<&str, TokenError> {
    claims
        .get("id")
        .and_then(Value::as_str)
        .ok_or(TokenError::MissingClaim("id"))
}

/// Read the `login` claim, which must be a string
pub fn extract_login(claims: &VerifiedClaims) -> Result<&str, TokenError> {
    claims
        .get("login")
        .and_then(Value::as_str)
        .ok_or(TokenError::MissingClaim("login"))
}

/// Sign `claims` with `secret`
pub fn issue(claims: &Claims, secret: &[u8]) -> Result<String, TokenError> {
    if secret.is_empty() {
        return Err(TokenError::Configuration);
    }

    let key = EncodingKey::from_secret(secret);
    encode(&Header::new(Algorithm::HS256), claims, &key).map_err(|e| {
        tracing::error!("Failed to encode token: {:?}", e);
        TokenError::Encoding
    })
}

/// Validate `token` against `secret`
///
/// Only HS256 is accepted, whatever the header asks for. The token must
/// still be unexpired at the current second.
pub fn validate(token: &str, secret: &[u8]) -> Result<VerifiedClaims, TokenError> {
    if secret.is_empty() {
        tracing::debug!("Rejecting token: signing secret is not configured");
        return Err(TokenError::InvalidToken);
    }

    let key = DecodingKey::from_secret(secret);
    let mut validation = Validation::new(Algorithm::HS256);
    validation.leeway = 0;

    let data = decode::<Map<String, Value>>(token, &key, &validation).map_err(|e| {
        tracing::debug!("Rejecting token: {:?}", e.kind());
        TokenError::InvalidToken
    })?;

    let claims = VerifiedClaims(data.claims);
    match claims.expires_at() {
        Ok(exp) if exp > Utc::now().timestamp() => Ok(claims),
        _ => {
            tracing::debug!("Rejecting token: expired or missing exp");
            Err(TokenError::InvalidToken)
        }
    }
}

/// Issues and validates tokens with one injected secret
///
/// Stateless apart from the secret; share it behind an `Arc`.
#[derive(Clone)]
pub struct TokenService {
    secret: Vec<u8>,
}

impl TokenService {
    /// Create a service signing with `secret`
    ///
    /// An empty secret is accepted here so that misconfiguration surfaces
    /// per request as [`TokenError::Configuration`] / [`TokenError::InvalidToken`].
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into().into_bytes(),
        }
    }

    /// Whether a non-empty secret is configured
    pub fn is_configured(&self) -> bool {
        !self.secret.is_empty()
    }

    /// Sign the given claims
    pub fn issue(&self, claims: &Claims) -> Result<String, TokenError> {
        issue(claims, &self.secret)
    }

    /// Sign a token for a subject with the default lifetime
    pub fn issue_for(&self, id: &str, login: &str) -> Result<String, TokenError> {
        self.issue(&Claims::for_subject(id, login))
    }

    /// Validate a token signed by this service
    pub fn validate(&self, token: &str) -> Result<VerifiedClaims, TokenError> {
        validate(token, &self.secret)
    }
}

impl fmt::Debug for TokenService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenService")
            .field("secret", &"[REDACTED]")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
    use pretty_assertions::assert_eq;

    fn claims_in(seconds: i64) -> Claims {
        Claims {
            id: "u1".to_string(),
            login: "bob".to_string(),
            exp: Utc::now().timestamp() + seconds,
        }
    }

    #[test]
    fn test_issue_and_validate() {
        let service = TokenService::new("s1");
        let claims = claims_in(3600);

        let token = service.issue(&claims).unwrap();
        assert_eq!(token.split('.').count(), 3);
        assert!(!token.contains('='));

        let verified = service.validate(&token).unwrap();
        assert_eq!(Claims::try_from(&verified).unwrap(), claims);
    }

    #[test]
    fn test_issue_for_uses_default_lifetime() {
        let service = TokenService::new("s1");
        let token = service.issue_for("u1", "bob").unwrap();

        let verified = service.validate(&token).unwrap();
        let exp = verified.expires_at().unwrap();
        let expected = Utc::now().timestamp() + TOKEN_TTL_HOURS * 3600;
        assert!((expected - exp).abs() <= 5);
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let token = TokenService::new("s1").issue(&claims_in(3600)).unwrap();

        let result = TokenService::new("s2").validate(&token);
        assert_eq!(result, Err(TokenError::InvalidToken));
    }

    #[test]
    fn test_expired_token_rejected() {
        let service = TokenService::new("s1");
        let token = service.issue(&claims_in(-3600)).unwrap();

        assert_eq!(service.validate(&token), Err(TokenError::InvalidToken));
    }

    #[test]
    fn test_token_expiring_now_rejected() {
        let service = TokenService::new("s1");
        let token = service.issue(&claims_in(0)).unwrap();

        assert_eq!(service.validate(&token), Err(TokenError::InvalidToken));
    }

    #[test]
    fn test_empty_secret() {
        let service = TokenService::new("");
        assert!(!service.is_configured());
        assert_eq!(service.issue(&claims_in(3600)), Err(TokenError::Configuration));

        let token = TokenService::new("s1").issue(&claims_in(3600)).unwrap();
        assert_eq!(validate(&token, b""), Err(TokenError::InvalidToken));
    }

    #[test]
    fn test_malformed_tokens_rejected() {
        let service = TokenService::new("s1");
        for token in ["", "invalid.token.here", "a.b", "a.b.c.d", "...."] {
            assert_eq!(service.validate(token), Err(TokenError::InvalidToken), "{token}");
        }
    }

    #[test]
    fn test_tampered_payload_rejected() {
        let service = TokenService::new("s1");
        let token = service.issue(&claims_in(3600)).unwrap();
        let parts: Vec<&str> = token.split('.').collect();

        let forged = URL_SAFE_NO_PAD.encode(
            serde_json::to_vec(&Claims {
                id: "admin".to_string(),
                ..claims_in(3600)
            })
            .unwrap(),
        );
        let tampered = format!("{}.{}.{}", parts[0], forged, parts[2]);

        assert_eq!(service.validate(&tampered), Err(TokenError::InvalidToken));
    }

    #[test]
    fn test_alg_none_rejected() {
        let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"none","typ":"JWT"}"#);
        let payload = URL_SAFE_NO_PAD.encode(serde_json::to_vec(&claims_in(3600)).unwrap());
        let token = format!("{header}.{payload}.");

        assert_eq!(
            TokenService::new("s1").validate(&token),
            Err(TokenError::InvalidToken)
        );
    }

    #[test]
    fn test_other_hmac_algorithm_rejected() {
        let token = encode(
            &Header::new(Algorithm::HS512),
            &claims_in(3600),
            &EncodingKey::from_secret(b"s1"),
        )
        .unwrap();

        assert_eq!(
            TokenService::new("s1").validate(&token),
            Err(TokenError::InvalidToken)
        );
    }

    #[test]
    fn test_wrong_typed_claim_is_missing() {
        let payload = serde_json::json!({
            "id": 42,
            "login": "bob",
            "exp": Utc::now().timestamp() + 3600,
        });
        let token = encode(
            &Header::new(Algorithm::HS256),
            &payload,
            &EncodingKey::from_secret(b"s1"),
        )
        .unwrap();

        let verified = TokenService::new("s1").validate(&token).unwrap();
        assert_eq!(extract_subject_id(&verified), Err(TokenError::MissingClaim("id")));
        assert_eq!(extract_login(&verified), Ok("bob"));
    }

    #[test]
    fn test_absent_login_is_missing() {
        let payload = serde_json::json!({
            "id": "u1",
            "exp": Utc::now().timestamp() + 3600,
        });
        let token = encode(
            &Header::new(Algorithm::HS256),
            &payload,
            &EncodingKey::from_secret(b"s1"),
        )
        .unwrap();

        let verified = TokenService::new("s1").validate(&token).unwrap();
        assert_eq!(extract_login(&verified), Err(TokenError::MissingClaim("login")));
    }

    #[test]
    fn test_end_to_end_secret_rotation() {
        let token = issue(&claims_in(3600), b"s1").unwrap();

        let verified = validate(&token, b"s1").unwrap();
        assert_eq!(extract_subject_id(&verified), Ok("u1"));
        assert_eq!(extract_login(&verified), Ok("bob"));

        assert_eq!(validate(&token, b"s2"), Err(TokenError::InvalidToken));
    }

    #[test]
    fn test_debug_redacts_secret() {
        let rendered = format!("{:?}", TokenService::new("super-secret"));
        assert!(!rendered.contains("super-secret"));
    }
}
