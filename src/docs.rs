use crate::api::reports::{DailySummary, StaffPercentage};
use crate::model::user::StaffSummary;
use crate::models::{ForgotPasswordReq, RegisterReq, ResetPasswordReq, TokenResponse};
use utoipa::Modify;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{OpenApi, openapi};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "School Attendance System API",
        version = "1.0.0",
        description = r#"
## School Attendance System

A secure attendance tracker for school staff.

### 🔹 Key Features
- **Staff Registration & Login**
  - Public staff registration, JWT-based login
- **Daily Check-in**
  - One check-in per staff member per day, inside a fixed morning window
  - On-time/late classification and a network restriction on check-ins
- **Admin Reports**
  - Absentees, daily summary, per-staff attendance percentage
- **Password Reset**
  - Single-use opaque reset tokens

### 🔐 Security
Protected endpoints use **JWT Bearer authentication**.
Reports and staff administration require the **admin** role.

---
Built with **Rust**, **Actix Web**, **SQLx**, and **Utoipa**.
"#,
    ),
    paths(
        crate::api::attendance::mark_attendance,
        crate::api::attendance::my_attendance,

        crate::api::reports::absentees,
        crate::api::reports::daily_summary,
        crate::api::reports::attendance_percentage,

        crate::api::staff::all_staff,
        crate::api::staff::delete_staff
    ),
    components(
        schemas(
            RegisterReq,
            TokenResponse,
            ForgotPasswordReq,
            ResetPasswordReq,
            StaffSummary,
            DailySummary,
            StaffPercentage
        )
    ),
    tags(
        (name = "Attendance", description = "Check-in and attendance history APIs"),
        (name = "Reports", description = "Admin reporting APIs"),
        (name = "Staff", description = "Staff administration APIs"),
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}
