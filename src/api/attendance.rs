use crate::auth::auth::AuthUser;
use crate::auth::policy::Action;
use crate::config::Config;
use crate::error::ApiError;
use crate::model::attendance::{Attendance, classify_check_in};
use crate::utils::network;
use actix_web::{HttpRequest, HttpResponse, web};
use chrono::Local;
use serde_json::json;
use sqlx::MySqlPool;

/// Check-in endpoint
#[utoipa::path(
    post,
    path = "/mark-attendance",
    responses(
        (status = 200, description = "Attendance marked", body = Object, example = json!({
            "message": "Attendance marked",
            "status": "Present"
        })),
        (status = 400, description = "Already marked today", body = Object, example = json!({
            "error": "Already marked today"
        })),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Outside the allowed network, window closed, or not staff"),
        (status = 500, description = "Internal server error")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Attendance"
)]
pub async fn mark_attendance(
    req: HttpRequest,
    auth: AuthUser,
    pool: web::Data<MySqlPool>,
    config: web::Data<Config>,
) -> Result<HttpResponse, ApiError> {
    // LOCATION RESTRICTION: checked before any time-of-day rule, so an
    // off-network attempt is denied even inside the window
    match req.peer_addr() {
        Some(addr) if network::is_permitted(addr.ip(), &config.attendance_networks) => {}
        _ => return Err(ApiError::LocationDenied),
    }

    auth.require(Action::MarkAttendance)?;

    let now = Local::now().naive_local();
    let today = now.date();

    let already: bool = sqlx::query_scalar(
        "SELECT EXISTS(SELECT 1 FROM attendance WHERE user_id = ? AND date = ? LIMIT 1)",
    )
    .bind(auth.user_id)
    .bind(today)
    .fetch_one(pool.get_ref())
    .await?;

    if already {
        return Err(ApiError::Conflict("Already marked today".to_string()));
    }

    let Some(status) = classify_check_in(now.time()) else {
        return Err(ApiError::WindowClosed);
    };

    let result = sqlx::query(
        r#"
        INSERT INTO attendance (user_id, date, check_in, status)
        VALUES (?, ?, ?, ?)
        "#,
    )
    .bind(auth.user_id)
    .bind(today)
    .bind(now)
    .bind(status.as_str())
    .execute(pool.get_ref())
    .await;

    match result {
        Ok(_) => Ok(HttpResponse::Ok().json(json!({
            "message": "Attendance marked",
            "status": status.as_str()
        }))),

        Err(e) => {
            // Concurrent duplicate check-in for the same day: the unique
            // (user_id, date) key fires where the existence check raced
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.code().as_deref() == Some("23000") {
                    return Err(ApiError::Conflict("Already marked today".to_string()));
                }
            }

            tracing::error!(error = %e, user_id = auth.user_id, "Check-in failed");
            Err(ApiError::Internal)
        }
    }
}

/// Own attendance history, newest day first
#[utoipa::path(
    get,
    path = "/my-attendance",
    responses(
        (status = 200, description = "Own records, newest first", body = Object, example = json!([
            { "date": "2025-06-02", "check_in": "07:28:41", "status": "Present" },
            { "date": "2025-06-01", "check_in": "07:44:09", "status": "Late" }
        ])),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Attendance"
)]
pub async fn my_attendance(
    auth: AuthUser,
    pool: web::Data<MySqlPool>,
) -> Result<HttpResponse, ApiError> {
    auth.require(Action::ViewOwnAttendance)?;

    let records = sqlx::query_as::<_, Attendance>(
        r#"
        SELECT id, user_id, date, check_in, status
        FROM attendance
        WHERE user_id = ?
        ORDER BY date DESC
        "#,
    )
    .bind(auth.user_id)
    .fetch_all(pool.get_ref())
    .await?;

    let body: Vec<_> = records
        .iter()
        .map(|record| {
            json!({
                "date": record.date.to_string(),
                "check_in": record.check_in.format("%H:%M:%S").to_string(),
                "status": record.status,
            })
        })
        .collect();

    Ok(HttpResponse::Ok().json(body))
}
