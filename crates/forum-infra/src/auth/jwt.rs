//! JWT token service implementation.

use chrono::{TimeDelta, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use forum_core::ports::{AuthError, TokenClaims, TokenService};

const DEFAULT_SECRET: &str = "change-me-in-production";

/// JWT token service configuration.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub expiration_minutes: i64,
    pub issuer: String,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: DEFAULT_SECRET.to_string(),
            expiration_minutes: 15,
            issuer: "forum-api".to_string(),
        }
    }
}

impl JwtConfig {
    pub fn from_env() -> Self {
        let secret = std::env::var("JWT_SECRET").unwrap_or_else(|_| DEFAULT_SECRET.to_string());

        if secret == DEFAULT_SECRET {
            let is_production = std::env::var("RUST_ENV")
                .map(|v| v == "production" || v == "prod")
                .unwrap_or(false);

            if is_production {
                tracing::error!(
                    "SECURITY: Using default JWT secret in production! Set JWT_SECRET environment variable."
                );
            } else {
                tracing::warn!("Using default JWT secret. Set JWT_SECRET for production use.");
            }
        }

        Self {
            secret,
            expiration_minutes: std::env::var("JWT_EXPIRATION_MINUTES")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(15),
            issuer: std::env::var("JWT_ISSUER").unwrap_or_else(|_| "forum-api".to_string()),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String, // user_name
    exp: i64,
    iat: i64,
    iss: String,
}

/// HS256 bearer tokens. No server-side session state.
pub struct JwtTokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    config: JwtConfig,
}

impl JwtTokenService {
    pub fn new(config: JwtConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());

        Self {
            encoding_key,
            decoding_key,
            config,
        }
    }
}

impl TokenService for JwtTokenService {
    fn generate_token(&self, user_name: &str) -> Result<String, AuthError> {
        let now = Utc::now();
        let exp = now + TimeDelta::minutes(self.config.expiration_minutes);

        let claims = Claims {
            sub: user_name.to_string(),
            exp: exp.timestamp(),
            iat: now.timestamp(),
            iss: self.config.issuer.clone(),
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AuthError::InvalidToken(e.to_string()))
    }

    fn validate_token(&self, token: &str) -> Result<TokenClaims, AuthError> {
        let mut validation = Validation::default();
        validation.set_issuer(&[&self.config.issuer]);

        let token_data = decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
            match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::TokenExpired,
                _ => AuthError::InvalidToken(e.to_string()),
            }
        })?;

        if token_data.claims.sub.is_empty() {
            return Err(AuthError::InvalidToken("empty subject".to_string()));
        }

        Ok(TokenClaims {
            user_name: token_data.claims.sub,
            issued_at: token_data.claims.iat,
            expires_at: token_data.claims.exp,
        })
    }

    fn expiration_seconds(&self) -> i64 {
        self.config.expiration_minutes * 60
    }
}

#[cfg(test)]
mod tests {
    use jsonwebtoken::Algorithm;

    use super::*;

    const SECRET: &str = "forum-test-secret";
    const ISSUER: &str = "forum-test";

    fn service() -> JwtTokenService {
        JwtTokenService::new(JwtConfig {
            secret: SECRET.to_string(),
            expiration_minutes: 15,
            issuer: ISSUER.to_string(),
        })
    }

    /// Sign arbitrary claims with the service secret, bypassing `generate_token`.
    fn sign(header: &Header, sub: &str, exp_offset_secs: i64, iss: &str) -> String {
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: sub.to_string(),
            exp: now + exp_offset_secs,
            iat: now,
            iss: iss.to_string(),
        };
        encode(header, &claims, &EncodingKey::from_secret(SECRET.as_bytes())).unwrap()
    }

    #[test]
    fn test_subject_is_the_exact_user_name() {
        let service = service();

        let upper = service.validate_token(&service.generate_token("Alice").unwrap()).unwrap();
        let lower = service.validate_token(&service.generate_token("alice").unwrap()).unwrap();

        assert_eq!(upper.user_name, "Alice");
        assert_eq!(lower.user_name, "alice");
        assert_eq!(upper.expires_at - upper.issued_at, 15 * 60);
    }

    #[test]
    fn test_hand_signed_subject_is_accepted() {
        let token = sign(&Header::default(), "bob42", 300, ISSUER);

        let claims = service().validate_token(&token).unwrap();

        assert_eq!(claims.user_name, "bob42");
    }

    #[test]
    fn test_empty_subject_is_rejected() {
        let token = sign(&Header::default(), "", 300, ISSUER);

        let err = service().validate_token(&token).unwrap_err();

        assert!(matches!(err, AuthError::InvalidToken(msg) if msg == "empty subject"));
    }

    #[test]
    fn test_expired_past_leeway() {
        // Default validation allows 60 seconds of clock skew.
        let token = sign(&Header::default(), "alice", -120, ISSUER);

        assert!(matches!(service().validate_token(&token), Err(AuthError::TokenExpired)));
    }

    #[test]
    fn test_foreign_issuer_is_rejected() {
        let token = sign(&Header::default(), "alice", 300, "someone-else");

        assert!(matches!(service().validate_token(&token), Err(AuthError::InvalidToken(_))));
    }

    #[test]
    fn test_only_hs256_is_accepted() {
        let token = sign(&Header::new(Algorithm::HS512), "alice", 300, ISSUER);

        assert!(matches!(service().validate_token(&token), Err(AuthError::InvalidToken(_))));
    }

    #[test]
    fn test_token_from_another_deployment_is_rejected() {
        let other = JwtTokenService::new(JwtConfig {
            secret: "other-secret".to_string(),
            issuer: ISSUER.to_string(),
            ..JwtConfig::default()
        });
        let token = other.generate_token("alice").unwrap();

        assert!(matches!(service().validate_token(&token), Err(AuthError::InvalidToken(_))));
        assert!(matches!(service().validate_token("alice"), Err(AuthError::InvalidToken(_))));
    }

    #[test]
    fn test_expires_in_follows_configured_minutes() {
        let service = JwtTokenService::new(JwtConfig {
            expiration_minutes: 30,
            ..JwtConfig::default()
        });

        assert_eq!(service.expiration_seconds(), 1800);
        assert_eq!(JwtTokenService::new(JwtConfig::default()).expiration_seconds(), 900);
    }
}
