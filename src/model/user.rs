use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    pub id: u64,
    pub full_name: String,
    pub email: String,
    pub password_hash: String,
    pub role: u8,
    pub reset_token: Option<String>,
}

/// Listing row for admin views. Never carries credential material.
#[derive(Debug, Serialize, sqlx::FromRow, ToSchema)]
pub struct StaffSummary {
    pub id: u64,
    pub full_name: String,
    pub email: String,
}
