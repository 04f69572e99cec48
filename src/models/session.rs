//! Signed session token carried by the client

use serde::{Deserialize, Serialize};

/// Name of the cookie holding the signed session token (scope = whole site)
pub const SESSION_COOKIE: &str = "session";

/// Session payload carried in a signed cookie.
///
/// `user_id` is set by user login, `is_admin` by admin login; the two are
/// independent and an admin login on top of a user session keeps the user id.
/// Logout clears both. No expiry is encoded: the token lives as long as the
/// cookie does.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Session {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(default)]
    pub is_admin: bool,
}

impl Session {
    /// Sign the payload into a token suitable for a cookie value
    pub fn encode(&self, secret: &str) -> Result<String, jsonwebtoken::errors::Error> {
        use jsonwebtoken::{encode, EncodingKey, Header};
        encode(
            &Header::default(),
            self,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
    }

    /// Verify a token's signature and recover the payload.
    ///
    /// Expiry is not validated; there is no `exp` claim.
    pub fn decode(token: &str, secret: &str) -> Result<Self, jsonwebtoken::errors::Error> {
        use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
        let mut validation = Validation::new(Algorithm::HS256);
        validation.required_spec_claims.clear();
        validation.validate_exp = false;
        let token_data = decode::<Self>(
            token,
            &DecodingKey::from_secret(secret.as_bytes()),
            &validation,
        )?;
        Ok(token_data.claims)
    }

    pub fn is_anonymous(&self) -> bool {
        self.user_id.is_none() && !self.is_admin
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret";

    #[test]
    fn round_trip_user_session() {
        let session = Session {
            user_id: Some("65a1b2c3d4e5f60718293a4b".to_string()),
            is_admin: false,
        };
        let token = session.encode(SECRET).unwrap();
        let decoded = Session::decode(&token, SECRET).unwrap();
        assert_eq!(decoded, session);
    }

    #[test]
    fn round_trip_keeps_both_fields() {
        let session = Session {
            user_id: Some("65a1b2c3d4e5f60718293a4b".to_string()),
            is_admin: true,
        };
        let token = session.encode(SECRET).unwrap();
        let decoded = Session::decode(&token, SECRET).unwrap();
        assert_eq!(decoded.user_id.as_deref(), Some("65a1b2c3d4e5f60718293a4b"));
        assert!(decoded.is_admin);
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let session = Session {
            user_id: Some("65a1b2c3d4e5f60718293a4b".to_string()),
            is_admin: false,
        };
        let token = session.encode(SECRET).unwrap();
        assert!(Session::decode(&token, "other-secret").is_err());
    }

    #[test]
    fn tampered_token_is_rejected() {
        let session = Session {
            user_id: Some("65a1b2c3d4e5f60718293a4b".to_string()),
            is_admin: false,
        };
        let mut token = session.encode(SECRET).unwrap();
        token.push('x');
        assert!(Session::decode(&token, SECRET).is_err());
    }

    #[test]
    fn default_session_is_anonymous() {
        let session = Session::default();
        assert!(session.is_anonymous());
        let token = session.encode(SECRET).unwrap();
        assert!(Session::decode(&token, SECRET).unwrap().is_anonymous());
    }
}
