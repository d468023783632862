use crate::auth::auth::AuthUser;
use crate::auth::policy::Action;
use crate::error::ApiError;
use crate::model::attendance::Status;
use crate::model::role::Role;
use crate::model::user::StaffSummary;
use actix_web::{HttpResponse, web};
use chrono::Local;
use serde::Serialize;
use serde_json::json;
use sqlx::MySqlPool;
use utoipa::ToSchema;

#[derive(Serialize, ToSchema)]
pub struct DailySummary {
    #[schema(example = 12)]
    pub total_staff: i64,
    #[schema(example = 7)]
    pub present_count: i64,
    #[schema(example = 2)]
    pub late_count: i64,
    #[schema(example = 3)]
    pub absent_count: i64,
}

#[derive(Serialize, ToSchema)]
pub struct StaffPercentage {
    pub full_name: String,
    pub present_days: i64,
    pub late_days: i64,
    #[schema(example = 91.67)]
    pub attendance_percentage: f64,
}

#[derive(sqlx::FromRow)]
struct StaffCounts {
    full_name: String,
    present_days: i64,
    late_days: i64,
    total_days: i64,
}

/// Attended share of a user's recorded days, as a 2-decimal percentage.
/// Zero records means 0, not a division error.
fn percentage(attended: i64, total: i64) -> f64 {
    if total == 0 {
        return 0.0;
    }

    ((attended as f64 / total as f64) * 100.0 * 100.0).round() / 100.0
}

/// Staff with no record today
#[utoipa::path(
    get,
    path = "/absentees",
    responses(
        (status = 200, description = "Absent staff for today", body = Object, example = json!({
            "date": "2025-06-02",
            "absentees": [{ "id": 4, "full_name": "Jane Doe", "email": "jane@school.com" }]
        })),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Reports"
)]
pub async fn absentees(
    auth: AuthUser,
    pool: web::Data<MySqlPool>,
) -> Result<HttpResponse, ApiError> {
    auth.require(Action::ViewAbsentees)?;

    let today = Local::now().date_naive();

    // all staff minus everyone with a record today
    let missing = sqlx::query_as::<_, StaffSummary>(
        r#"
        SELECT u.id, u.full_name, u.email
        FROM users u
        WHERE u.role = ?
          AND NOT EXISTS (
              SELECT 1 FROM attendance a
              WHERE a.user_id = u.id AND a.date = ?
          )
        "#,
    )
    .bind(Role::Staff.id())
    .bind(today)
    .fetch_all(pool.get_ref())
    .await?;

    Ok(HttpResponse::Ok().json(json!({
        "date": today.to_string(),
        "absentees": missing
    })))
}

/// Today's headcount broken down by status
#[utoipa::path(
    get,
    path = "/daily-summary",
    responses(
        (status = 200, description = "Counts for today", body = DailySummary),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Reports"
)]
pub async fn daily_summary(
    auth: AuthUser,
    pool: web::Data<MySqlPool>,
) -> Result<HttpResponse, ApiError> {
    auth.require(Action::DailySummary)?;

    let today = Local::now().date_naive();

    let total_staff: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE role = ?")
        .bind(Role::Staff.id())
        .fetch_one(pool.get_ref())
        .await?;

    let present_count: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM attendance WHERE date = ? AND status = ?")
            .bind(today)
            .bind(Status::Present.as_str())
            .fetch_one(pool.get_ref())
            .await?;

    let late_count: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM attendance WHERE date = ? AND status = ?")
            .bind(today)
            .bind(Status::Late.as_str())
            .fetch_one(pool.get_ref())
            .await?;

    // derived, never queried on its own; equals the absentee-set size
    let absent_count = total_staff - present_count - late_count;

    Ok(HttpResponse::Ok().json(DailySummary {
        total_staff,
        present_count,
        late_count,
        absent_count,
    }))
}

/// Per-staff attended share over all recorded days
#[utoipa::path(
    get,
    path = "/attendance-percentage",
    responses(
        (status = 200, description = "Per-staff attendance share", body = Vec<StaffPercentage>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Reports"
)]
pub async fn attendance_percentage(
    auth: AuthUser,
    pool: web::Data<MySqlPool>,
) -> Result<HttpResponse, ApiError> {
    auth.require(Action::AttendancePercentage)?;

    let rows = sqlx::query_as::<_, StaffCounts>(
        r#"
        SELECT u.full_name,
               COUNT(CASE WHEN a.status = 'Present' THEN a.id END) AS present_days,
               COUNT(CASE WHEN a.status = 'Late' THEN a.id END) AS late_days,
               COUNT(a.id) AS total_days
        FROM users u
        LEFT JOIN attendance a ON a.user_id = u.id
        WHERE u.role = ?
        GROUP BY u.id, u.full_name
        "#,
    )
    .bind(Role::Staff.id())
    .fetch_all(pool.get_ref())
    .await?;

    let results: Vec<StaffPercentage> = rows
        .into_iter()
        .map(|row| StaffPercentage {
            attendance_percentage: percentage(row.present_days + row.late_days, row.total_days),
            full_name: row.full_name,
            present_days: row.present_days,
            late_days: row.late_days,
        })
        .collect();

    Ok(HttpResponse::Ok().json(results))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_records_is_zero_percent() {
        assert_eq!(percentage(0, 0), 0.0);
    }

    #[test]
    fn rounds_to_two_decimals() {
        assert_eq!(percentage(1, 3), 33.33);
        assert_eq!(percentage(2, 3), 66.67);
        assert_eq!(percentage(3, 3), 100.0);
    }
}
