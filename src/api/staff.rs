use crate::auth::auth::AuthUser;
use crate::auth::policy::Action;
use crate::error::ApiError;
use crate::model::role::Role;
use crate::model::user::StaffSummary;
use crate::utils::{email_cache, email_filter};
use actix_web::{HttpResponse, web};
use serde_json::json;
use sqlx::MySqlPool;

/// All staff users
#[utoipa::path(
    get,
    path = "/all-staff",
    responses(
        (status = 200, description = "Every staff user", body = Vec<StaffSummary>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Staff"
)]
pub async fn all_staff(auth: AuthUser, pool: web::Data<MySqlPool>) -> Result<HttpResponse, ApiError> {
    auth.require(Action::ListStaff)?;

    let staff = sqlx::query_as::<_, StaffSummary>(
        "SELECT id, full_name, email FROM users WHERE role = ?",
    )
    .bind(Role::Staff.id())
    .fetch_all(pool.get_ref())
    .await?;

    Ok(HttpResponse::Ok().json(staff))
}

/// Delete a staff user and their attendance history
#[utoipa::path(
    delete,
    path = "/delete-staff/{id}",
    params(
        ("id" = u64, Path, description = "Staff user id")
    ),
    responses(
        (status = 200, description = "Staff deleted", body = Object, example = json!({
            "message": "Staff deleted successfully"
        })),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Not a staff id")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Staff"
)]
pub async fn delete_staff(
    auth: AuthUser,
    path: web::Path<u64>,
    pool: web::Data<MySqlPool>,
) -> Result<HttpResponse, ApiError> {
    auth.require(Action::DeleteStaff)?;

    let staff_id = path.into_inner();

    // admins are not deletable, so the lookup is role-qualified
    let email: Option<String> =
        sqlx::query_scalar("SELECT email FROM users WHERE id = ? AND role = ?")
            .bind(staff_id)
            .bind(Role::Staff.id())
            .fetch_optional(pool.get_ref())
            .await?;

    let Some(email) = email else {
        return Err(ApiError::NotFound("Staff not found".to_string()));
    };

    // attendance rows first, then the user, in one transaction
    let mut tx = pool.get_ref().begin().await?;

    sqlx::query("DELETE FROM attendance WHERE user_id = ?")
        .bind(staff_id)
        .execute(&mut *tx)
        .await?;

    sqlx::query("DELETE FROM users WHERE id = ?")
        .bind(staff_id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;

    // the availability fast path must stop claiming this address is taken
    email_filter::remove(&email);
    email_cache::invalidate(&email).await;

    Ok(HttpResponse::Ok().json(json!({
        "message": "Staff deleted successfully"
    })))
}
