use crate::{
    api::{attendance, reports, staff},
    auth::{handlers, middleware::auth_middleware},
    config::Config,
};
use actix_governor::{
    Governor, GovernorConfig, GovernorConfigBuilder, PeerIpKeyExtractor,
    governor::middleware::NoOpMiddleware,
};
use actix_web::{middleware::from_fn, web};

pub fn configure(cfg: &mut web::ServiceConfig, config: Config) {
    // Helper to build per-route limiter config
    fn build_limiter(requests_per_min: u32) -> GovernorConfig<PeerIpKeyExtractor, NoOpMiddleware> {
        let per_ms = if requests_per_min == 0 {
            1
        } else {
            60_000 / requests_per_min as u64
        };
        GovernorConfigBuilder::default()
            .per_millisecond(per_ms)
            .burst_size(requests_per_min)
            .key_extractor(PeerIpKeyExtractor)
            .finish()
            .unwrap()
    }

    let login_limiter = build_limiter(config.rate_login_per_min);
    let register_limiter = build_limiter(config.rate_register_per_min);
    let protected_limiter = build_limiter(config.rate_protected_per_min);

    // Public routes
    cfg.service(
        web::resource("/register")
            .wrap(Governor::new(&register_limiter))
            .route(web::post().to(handlers::register)),
    )
    .service(
        web::resource("/login")
            .wrap(Governor::new(&login_limiter))
            .route(web::post().to(handlers::login)),
    )
    .service(
        web::resource("/forgot-password")
            .wrap(Governor::new(&login_limiter))
            .route(web::post().to(handlers::forgot_password)),
    )
    .service(
        web::resource("/reset-password")
            .wrap(Governor::new(&login_limiter))
            .route(web::post().to(handlers::reset_password)),
    );

    // Protected routes
    cfg.service(
        web::scope("")
            .wrap(from_fn(auth_middleware)) // authentication
            .wrap(Governor::new(&protected_limiter)) // rate limiting
            .service(web::resource("/me").route(web::get().to(handlers::me)))
            .service(
                web::resource("/mark-attendance")
                    .route(web::post().to(attendance::mark_attendance)),
            )
            .service(
                web::resource("/my-attendance").route(web::get().to(attendance::my_attendance)),
            )
            .service(web::resource("/absentees").route(web::get().to(reports::absentees)))
            .service(web::resource("/daily-summary").route(web::get().to(reports::daily_summary)))
            .service(
                web::resource("/attendance-percentage")
                    .route(web::get().to(reports::attendance_percentage)),
            )
            .service(web::resource("/all-staff").route(web::get().to(staff::all_staff)))
            .service(
                web::resource("/delete-staff/{id}").route(web::delete().to(staff::delete_staff)),
            ),
    );
}
