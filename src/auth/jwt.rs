use std::time::{SystemTime, UNIX_EPOCH};

use crate::models::Claims;
use derive_more::Display;
use jsonwebtoken::{
    DecodingKey, EncodingKey, Header, Validation, decode, encode, errors::ErrorKind,
};
use uuid::Uuid;

#[derive(Debug, Display, PartialEq, Eq)]
pub enum AuthError {
    #[display(fmt = "token expired")]
    Expired,
    #[display(fmt = "invalid token")]
    Invalid,
}

fn now() -> usize {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_secs() as usize
}

pub fn issue_token(user_id: u64, email: String, role: u8, secret: &str, ttl: usize) -> String {
    let claims = Claims {
        user_id,
        sub: email,
        role,
        exp: now() + ttl,
        jti: Uuid::new_v4().to_string(),
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .unwrap()
}

/// Signature mismatch, malformed tokens, and a missing subject claim all
/// collapse into `Invalid`; only expiry is reported separately. Either way
/// the caller treats the bearer as unauthenticated.
pub fn verify_token(token: &str, secret: &str) -> Result<Claims, AuthError> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|e| match e.kind() {
        ErrorKind::ExpiredSignature => AuthError::Expired,
        _ => AuthError::Invalid,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret";

    #[test]
    fn round_trip_preserves_claims() {
        let token = issue_token(7, "jane@school.com".to_string(), 2, SECRET, 3600);
        let claims = verify_token(&token, SECRET).unwrap();

        assert_eq!(claims.user_id, 7);
        assert_eq!(claims.sub, "jane@school.com");
        assert_eq!(claims.role, 2);
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let token = issue_token(1, "jane@school.com".to_string(), 2, SECRET, 3600);
        assert_eq!(verify_token(&token, "other-secret"), Err(AuthError::Invalid));
    }

    #[test]
    fn tampered_token_is_rejected() {
        let token = issue_token(1, "jane@school.com".to_string(), 2, SECRET, 3600);

        let mut chars: Vec<char> = token.chars().collect();
        let last = chars.len() - 1;
        chars[last] = if chars[last] == 'A' { 'B' } else { 'A' };
        let tampered: String = chars.into_iter().collect();

        assert!(verify_token(&tampered, SECRET).is_err());
    }

    #[test]
    fn expired_token_is_rejected() {
        // one hour past expiry, well outside the default leeway
        let claims = Claims {
            user_id: 1,
            sub: "jane@school.com".to_string(),
            role: 2,
            exp: now() - 3600,
            jti: "test".to_string(),
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap();

        assert_eq!(verify_token(&token, SECRET), Err(AuthError::Expired));
    }

    #[test]
    fn missing_subject_is_rejected() {
        #[derive(serde::Serialize)]
        struct NoSubject {
            user_id: u64,
            role: u8,
            exp: usize,
            jti: String,
        }

        let token = encode(
            &Header::default(),
            &NoSubject {
                user_id: 1,
                role: 2,
                exp: now() + 3600,
                jti: "test".to_string(),
            },
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap();

        assert_eq!(verify_token(&token, SECRET), Err(AuthError::Invalid));
    }

    #[test]
    fn garbage_is_rejected() {
        assert_eq!(verify_token("not-a-token", SECRET), Err(AuthError::Invalid));
    }
}
