//! Signed Session Tokens
//!
//! Stateless bearer tokens: an HS256 JWT carrying the subject and an absolute
//! expiry. Only HS256 is accepted on validation, so a token whose header names
//! any other algorithm (including `none`) is rejected before its signature is
//! even considered.

use std::fmt;
use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};
use jsonwebtoken::errors::ErrorKind as JwtErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default token lifetime (24 hours)
pub const DEFAULT_TOKEN_TTL: Duration = Duration::from_secs(24 * 3600);

const ALGORITHM: Algorithm = Algorithm::HS256;

/// Token issuance / validation errors
///
/// Callers collapse everything except [`TokenError::MissingSecret`] into a
/// single "invalid token" response; the variants exist for logs.
#[derive(Debug, Error)]
pub enum TokenError {
    #[error("Token signing secret is not configured")]
    MissingSecret,

    #[error("Token signature is invalid")]
    InvalidSignature,

    #[error("Token was not signed with HS256")]
    WrongAlgorithm,

    #[error("Token has expired")]
    Expired,

    #[error("Token is malformed: {0}")]
    Malformed(String),

    #[error("Token encoding failed: {0}")]
    Encoding(String),
}

impl TokenError {
    /// Stable short label for structured logs
    pub fn reason(&self) -> &'static str {
        match self {
            TokenError::MissingSecret => "missing_secret",
            TokenError::InvalidSignature => "invalid_signature",
            TokenError::WrongAlgorithm => "wrong_algorithm",
            TokenError::Expired => "expired",
            TokenError::Malformed(_) => "malformed",
            TokenError::Encoding(_) => "encoding",
        }
    }
}

impl From<jsonwebtoken::errors::Error> for TokenError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        match err.kind() {
            JwtErrorKind::InvalidSignature => TokenError::InvalidSignature,
            JwtErrorKind::InvalidAlgorithm | JwtErrorKind::InvalidAlgorithmName => {
                TokenError::WrongAlgorithm
            }
            JwtErrorKind::ExpiredSignature => TokenError::Expired,
            _ => TokenError::Malformed(err.to_string()),
        }
    }
}

/// Claims carried by every token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Subject (stable account identifier)
    pub sub: String,
    /// Issued at (Unix seconds)
    pub iat: i64,
    /// Expiry (Unix seconds, inclusive)
    pub exp: i64,
}

/// A freshly signed token
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

struct SigningKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

/// Issues and validates HS256 session tokens.
///
/// Built once from configuration. A missing secret is not an error at
/// construction time; every issue/validate call fails with
/// [`TokenError::MissingSecret`] instead.
pub struct TokenIssuer {
    keys: Option<SigningKeys>,
    ttl: Duration,
}

impl TokenIssuer {
    /// `secret` of `None` or empty leaves the issuer unconfigured.
    pub fn new(secret: Option<&[u8]>, ttl: Duration) -> Self {
        let keys = secret.filter(|s| !s.is_empty()).map(|s| SigningKeys {
            encoding: EncodingKey::from_secret(s),
            decoding: DecodingKey::from_secret(s),
        });

        Self { keys, ttl }
    }

    pub fn is_configured(&self) -> bool {
        self.keys.is_some()
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    fn keys(&self) -> Result<&SigningKeys, TokenError> {
        self.keys.as_ref().ok_or(TokenError::MissingSecret)
    }

    /// Sign a token for `subject`, valid from now for the configured TTL
    pub fn issue(&self, subject: &str) -> Result<IssuedToken, TokenError> {
        self.issue_at(subject, Utc::now())
    }

    /// Sign a token as if issued at `now`
    pub fn issue_at(&self, subject: &str, now: DateTime<Utc>) -> Result<IssuedToken, TokenError> {
        let keys = self.keys()?;

        if subject.is_empty() {
            return Err(TokenError::Malformed("empty subject".to_string()));
        }

        let ttl = i64::try_from(self.ttl.as_secs())
            .ok()
            .and_then(TimeDelta::try_seconds)
            .ok_or_else(|| TokenError::Encoding("token TTL out of range".to_string()))?;
        let expires_at = now
            .checked_add_signed(ttl)
            .ok_or_else(|| TokenError::Encoding("token expiry out of range".to_string()))?;

        let claims = TokenClaims {
            sub: subject.to_string(),
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
        };

        let token = encode(&Header::new(ALGORITHM), &claims, &keys.encoding)
            .map_err(|e| TokenError::Encoding(e.to_string()))?;

        Ok(IssuedToken { token, expires_at })
    }

    /// Verify `token` and return its subject
    pub fn validate(&self, token: &str) -> Result<String, TokenError> {
        self.validate_at(token, Utc::now()).map(|claims| claims.sub)
    }

    /// Verify `token` against the clock value `now` and return its claims.
    ///
    /// The token is valid while `now <= exp`.
    pub fn validate_at(&self, token: &str, now: DateTime<Utc>) -> Result<TokenClaims, TokenError> {
        let keys = self.keys()?;

        let mut validation = Validation::new(ALGORITHM);
        // Expiry is checked below against the caller's clock, without leeway
        validation.validate_exp = false;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        let claims = decode::<TokenClaims>(token, &keys.decoding, &validation)?.claims;

        if claims.sub.is_empty() {
            return Err(TokenError::Malformed("empty subject".to_string()));
        }

        if now.timestamp() > claims.exp {
            return Err(TokenError::Expired);
        }

        Ok(claims)
    }
}

impl fmt::Debug for TokenIssuer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenIssuer")
            .field("configured", &self.is_configured())
            .field("ttl", &self.ttl)
            .finish()
    }
}

/// Strip a leading `Bearer ` scheme (any case) from an `Authorization` value
pub fn strip_bearer_prefix(value: &str) -> &str {
    let value = value.trim_start();
    let has_scheme = value
        .get(..6)
        .is_some_and(|scheme| scheme.eq_ignore_ascii_case("bearer"))
        && value[6..].chars().next().is_none_or(char::is_whitespace);

    if has_scheme {
        value[6..].trim()
    } else {
        value.trim()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::Engine;
    use base64::engine::general_purpose::URL_SAFE_NO_PAD;

    const SECRET: &[u8] = b"test-secret-key-at-least-32-bytes";

    fn issuer() -> TokenIssuer {
        TokenIssuer::new(Some(SECRET), DEFAULT_TOKEN_TTL)
    }

    #[test]
    fn test_issue_then_validate_returns_subject() {
        let issuer = issuer();
        let issued = issuer.issue("subject-1").unwrap();

        assert_eq!(issuer.validate(&issued.token).unwrap(), "subject-1");
    }

    #[test]
    fn test_expiry_is_issue_time_plus_ttl() {
        let issuer = issuer();
        let now = Utc::now();
        let issued = issuer.issue_at("subject-1", now).unwrap();

        let claims = issuer.validate_at(&issued.token, now).unwrap();
        assert_eq!(claims.iat, now.timestamp());
        assert_eq!(claims.exp, now.timestamp() + 24 * 3600);
        assert_eq!(issued.expires_at.timestamp(), claims.exp);
    }

    #[test]
    fn test_valid_until_expiry_inclusive() {
        let issuer = issuer();
        let now = Utc::now();
        let issued = issuer.issue_at("subject-1", now).unwrap();

        let at_expiry = issued.expires_at;
        assert!(issuer.validate_at(&issued.token, at_expiry).is_ok());

        let after_expiry = at_expiry + TimeDelta::seconds(1);
        assert!(matches!(
            issuer.validate_at(&issued.token, after_expiry),
            Err(TokenError::Expired)
        ));
    }

    #[test]
    fn test_token_issued_beyond_ttl_ago_is_expired() {
        let issuer = issuer();
        let long_ago = Utc::now() - TimeDelta::hours(25);
        let issued = issuer.issue_at("subject-1", long_ago).unwrap();

        assert!(matches!(
            issuer.validate(&issued.token),
            Err(TokenError::Expired)
        ));
    }

    #[test]
    fn test_tampered_signature_is_rejected() {
        let issuer = issuer();
        let issued = issuer.issue("subject-1").unwrap();

        let (body, signature) = issued.token.rsplit_once('.').unwrap();
        let mut sig_bytes = URL_SAFE_NO_PAD.decode(signature).unwrap();
        sig_bytes[0] ^= 0x01;
        let tampered = format!("{}.{}", body, URL_SAFE_NO_PAD.encode(&sig_bytes));

        assert!(matches!(
            issuer.validate(&tampered),
            Err(TokenError::InvalidSignature)
        ));
    }

    #[test]
    fn test_tampered_payload_is_rejected() {
        let issuer = issuer();
        let issued = issuer.issue("subject-1").unwrap();
        let parts: Vec<&str> = issued.token.split('.').collect();

        let forged_claims = TokenClaims {
            sub: "someone-else".to_string(),
            iat: 0,
            exp: i64::MAX / 2,
        };
        let forged_payload = URL_SAFE_NO_PAD.encode(serde_json::to_vec(&forged_claims).unwrap());
        let forged = format!("{}.{}.{}", parts[0], forged_payload, parts[2]);

        assert!(matches!(
            issuer.validate(&forged),
            Err(TokenError::InvalidSignature)
        ));
    }

    #[test]
    fn test_wrong_secret_is_rejected() {
        let issued = issuer().issue("subject-1").unwrap();
        let other = TokenIssuer::new(Some(b"another-secret-key-32-bytes-long!"), DEFAULT_TOKEN_TTL);

        assert!(matches!(
            other.validate(&issued.token),
            Err(TokenError::InvalidSignature)
        ));
    }

    #[test]
    fn test_other_hmac_algorithm_is_rejected() {
        let claims = TokenClaims {
            sub: "subject-1".to_string(),
            iat: Utc::now().timestamp(),
            exp: Utc::now().timestamp() + 3600,
        };
        let token = encode(
            &Header::new(Algorithm::HS384),
            &claims,
            &EncodingKey::from_secret(SECRET),
        )
        .unwrap();

        assert!(matches!(
            issuer().validate(&token),
            Err(TokenError::WrongAlgorithm)
        ));
    }

    #[test]
    fn test_alg_none_is_rejected() {
        let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"none","typ":"JWT"}"#);
        let exp = Utc::now().timestamp() + 3600;
        let payload = URL_SAFE_NO_PAD.encode(format!(r#"{{"sub":"admin","iat":0,"exp":{exp}}}"#));
        let token = format!("{header}.{payload}.");

        assert!(issuer().validate(&token).is_err());
    }

    #[test]
    fn test_missing_subject_claim_is_rejected() {
        #[derive(Serialize)]
        struct NoSubject {
            exp: i64,
        }
        let token = encode(
            &Header::new(ALGORITHM),
            &NoSubject {
                exp: Utc::now().timestamp() + 3600,
            },
            &EncodingKey::from_secret(SECRET),
        )
        .unwrap();

        assert!(matches!(
            issuer().validate(&token),
            Err(TokenError::Malformed(_))
        ));
    }

    #[test]
    fn test_garbage_is_malformed() {
        assert!(matches!(
            issuer().validate("not.a.token"),
            Err(TokenError::Malformed(_))
        ));
        assert!(matches!(
            issuer().validate(""),
            Err(TokenError::Malformed(_))
        ));
    }

    #[test]
    fn test_missing_secret() {
        let unconfigured = TokenIssuer::new(None, DEFAULT_TOKEN_TTL);
        assert!(!unconfigured.is_configured());
        assert!(matches!(
            unconfigured.issue("subject-1"),
            Err(TokenError::MissingSecret)
        ));
        assert!(matches!(
            unconfigured.validate("a.b.c"),
            Err(TokenError::MissingSecret)
        ));

        let empty = TokenIssuer::new(Some(b""), DEFAULT_TOKEN_TTL);
        assert!(!empty.is_configured());
    }

    #[test]
    fn test_empty_subject_is_not_issued() {
        assert!(matches!(
            issuer().issue(""),
            Err(TokenError::Malformed(_))
        ));
    }

    #[test]
    fn test_strip_bearer_prefix() {
        assert_eq!(strip_bearer_prefix("Bearer abc.def.ghi"), "abc.def.ghi");
        assert_eq!(strip_bearer_prefix("bearer abc"), "abc");
        assert_eq!(strip_bearer_prefix("  Bearer   abc "), "abc");
        assert_eq!(strip_bearer_prefix("abc.def.ghi"), "abc.def.ghi");
        assert_eq!(strip_bearer_prefix("Bearer "), "");
        assert_eq!(strip_bearer_prefix(""), "");
    }

    #[test]
    fn test_debug_hides_secret() {
        let debug = format!("{:?}", issuer());
        assert!(debug.contains("configured: true"));
        assert!(!debug.contains("test-secret"));
    }
}
