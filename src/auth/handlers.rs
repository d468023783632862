use crate::{
    auth::{
        auth::AuthUser,
        jwt::issue_token,
        password::{hash_password, verify_password},
    },
    config::Config,
    error::ApiError,
    model::{role::Role, user::User},
    models::{ForgotPasswordReq, LoginForm, RegisterReq, ResetPasswordReq, TokenResponse},
    utils::{email_cache, email_filter},
};
use actix_web::{HttpResponse, web};
use serde_json::json;
use sqlx::MySqlPool;
use tracing::{debug, error, info, instrument};
use uuid::Uuid;

// auth end points

/// Inserts a new staff user and updates the email filter/cache
async fn insert_staff(
    full_name: &str,
    email: &str,
    password: &str,
    pool: &MySqlPool,
) -> Result<(), ApiError> {
    let hashed = hash_password(password);

    let result = sqlx::query(
        r#"INSERT INTO users (full_name, email, password_hash, role) VALUES (?, ?, ?, ?)"#,
    )
    .bind(full_name)
    .bind(email)
    .bind(&hashed)
    .bind(Role::Staff.id())
    .execute(pool)
    .await;

    match result {
        Ok(_) => {
            // if insert success, populate filter and cache with the new email
            email_filter::insert(email);
            email_cache::mark_taken(email).await;
            Ok(())
        }
        Err(e) => {
            // the UNIQUE email key reports a concurrent duplicate here
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.code() == Some("23000".into()) {
                    return Err(ApiError::Conflict("Email already registered".to_string()));
                }
            }

            error!(error = %e, "Failed to register user");
            Err(ApiError::Internal)
        }
    }
}

/// true  => email AVAILABLE
/// false => email TAKEN
pub async fn is_email_available(email: &str, pool: &MySqlPool) -> bool {
    // 1️⃣ Cuckoo filter — fast negative
    // if the filter says not present, the email cannot be registered yet.
    if !email_filter::might_exist(email) {
        return true;
    }

    // 2️⃣ Moka cache — fast positive
    if email_cache::is_taken(email).await {
        return false;
    }

    // 3️⃣ Database fallback
    let exists = sqlx::query_scalar::<_, bool>(
        "SELECT EXISTS(SELECT 1 FROM users WHERE email = ? LIMIT 1)",
    )
    .bind(email)
    .fetch_one(pool)
    .await
    .unwrap_or(true); // fail-safe

    !exists
}

/// Staff registration handler. Admin accounts are never created here.
pub async fn register(
    user: web::Json<RegisterReq>,
    pool: web::Data<MySqlPool>,
) -> Result<HttpResponse, ApiError> {
    // Block admin registration publicly
    if user.role.eq_ignore_ascii_case("admin") {
        return Err(ApiError::Forbidden(
            "Admin registration not allowed".to_string(),
        ));
    }

    let full_name = user.full_name.trim();
    let email = user.email.trim();

    if full_name.is_empty() || email.is_empty() || user.password.is_empty() {
        return Err(ApiError::Validation(
            "Full name, email and password must not be empty".to_string(),
        ));
    }

    if !is_email_available(email, pool.get_ref()).await {
        return Err(ApiError::Conflict("Email already registered".to_string()));
    }

    // Safe to insert after DB check; the unique key still backstops races
    insert_staff(full_name, email, &user.password, pool.get_ref()).await?;

    Ok(HttpResponse::Created().json(json!({
        "message": "Staff registered successfully"
    })))
}

#[instrument(
    name = "auth_login",
    skip(pool, config, form),
    fields(username = %form.username)
)]
pub async fn login(
    form: web::Form<LoginForm>,
    pool: web::Data<MySqlPool>,
    config: web::Data<Config>,
) -> Result<HttpResponse, ApiError> {
    info!("Login request received");

    if form.username.trim().is_empty() || form.password.is_empty() {
        return Err(ApiError::BadCredentials);
    }

    debug!("Fetching user from database");

    let db_user = sqlx::query_as::<_, User>(
        r#"
        SELECT id, full_name, email, password_hash, role, reset_token
        FROM users
        WHERE email = ?
        "#,
    )
    .bind(&form.username)
    .fetch_optional(pool.get_ref())
    .await
    .map_err(|e| {
        error!(error = %e, "Database error while fetching user");
        ApiError::Internal
    })?;

    // unknown email and wrong password take the same exit, same body
    let Some(db_user) = db_user else {
        info!("Invalid credentials: user not found");
        return Err(ApiError::BadCredentials);
    };

    debug!(user_id = db_user.id, "User found, verifying password");

    if !verify_password(&form.password, &db_user.password_hash) {
        info!("Invalid credentials: password mismatch");
        return Err(ApiError::BadCredentials);
    }

    let role = Role::from_id(db_user.role).ok_or(ApiError::Internal)?;

    debug!("Password verified, generating access token");

    let access_token = issue_token(
        db_user.id,
        db_user.email.clone(),
        db_user.role,
        &config.jwt_secret,
        config.access_token_ttl,
    );

    info!("Login successful");

    Ok(HttpResponse::Ok().json(TokenResponse {
        access_token,
        token_type: "bearer".to_string(),
        role: role.as_str().to_string(),
    }))
}

pub async fn me(auth: AuthUser, pool: web::Data<MySqlPool>) -> Result<HttpResponse, ApiError> {
    let row = sqlx::query_as::<_, (String, u8)>("SELECT full_name, role FROM users WHERE email = ?")
        .bind(&auth.email)
        .fetch_optional(pool.get_ref())
        .await?;

    // the token subject may have been deleted since issuance
    let Some((full_name, role_id)) = row else {
        return Err(ApiError::Unauthenticated);
    };

    let role = Role::from_id(role_id).ok_or(ApiError::Internal)?;

    Ok(HttpResponse::Ok().json(json!({
        "full_name": full_name,
        "role": role.as_str()
    })))
}

pub async fn forgot_password(
    body: web::Json<ForgotPasswordReq>,
    pool: web::Data<MySqlPool>,
) -> Result<HttpResponse, ApiError> {
    let user_id: Option<u64> = sqlx::query_scalar("SELECT id FROM users WHERE email = ?")
        .bind(&body.email)
        .fetch_optional(pool.get_ref())
        .await?;

    if user_id.is_none() {
        return Err(ApiError::NotFound("Email not found".to_string()));
    }

    // opaque single-use token; overwrites any still-pending one
    let token = Uuid::new_v4().to_string();

    sqlx::query("UPDATE users SET reset_token = ? WHERE email = ?")
        .bind(&token)
        .bind(&body.email)
        .execute(pool.get_ref())
        .await?;

    // out-of-band delivery is up to the operator; the caller gets the token
    Ok(HttpResponse::Ok().json(json!({
        "message": "Reset token generated",
        "reset_token": token
    })))
}

pub async fn reset_password(
    body: web::Json<ResetPasswordReq>,
    pool: web::Data<MySqlPool>,
) -> Result<HttpResponse, ApiError> {
    if body.token.is_empty() || body.new_password.is_empty() {
        return Err(ApiError::Validation("Invalid token".to_string()));
    }

    let hashed = hash_password(&body.new_password);

    // one statement consumes the token and rewrites the hash, so a token
    // can never be spent twice
    let result =
        sqlx::query("UPDATE users SET password_hash = ?, reset_token = NULL WHERE reset_token = ?")
            .bind(&hashed)
            .bind(&body.token)
            .execute(pool.get_ref())
            .await?;

    if result.rows_affected() == 0 {
        return Err(ApiError::Validation("Invalid token".to_string()));
    }

    Ok(HttpResponse::Ok().json(json!({
        "message": "Password reset successful"
    })))
}
