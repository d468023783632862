use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

fn default_role() -> String {
    "staff".to_string()
}

#[derive(Deserialize, ToSchema)]
pub struct RegisterReq {
    pub full_name: String,
    pub email: String,
    pub password: String,
    /// Requested role. Anything other than "staff" is refused.
    #[serde(default = "default_role")]
    pub role: String,
}

/// OAuth2-style password form: `username` carries the email.
#[derive(Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

#[derive(Serialize, ToSchema)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
    pub role: String,
}

#[derive(Deserialize, ToSchema)]
pub struct ForgotPasswordReq {
    pub email: String,
}

#[derive(Deserialize, ToSchema)]
pub struct ResetPasswordReq {
    pub token: String,
    pub new_password: String,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct Claims {
    pub user_id: u64,
    /// Subject: the user's email.
    pub sub: String,
    pub role: u8, // role id
    pub exp: usize,
    pub jti: String,
}
