use crate::{
    api::{attendance, dashboard, employee},
    config::Config,
    error,
};
use actix_governor::{Governor, GovernorConfigBuilder, PeerIpKeyExtractor};
use actix_web::web;

pub fn configure(cfg: &mut web::ServiceConfig, config: Config) {
    let per_ms = if config.rate_api_per_min == 0 {
        1
    } else {
        60_000 / config.rate_api_per_min as u64
    };
    let limiter = GovernorConfigBuilder::default()
        .per_millisecond(per_ms)
        .burst_size(config.rate_api_per_min)
        .key_extractor(PeerIpKeyExtractor)
        .finish()
        .unwrap();

    cfg.service(
        web::scope(&config.api_prefix)
            .wrap(Governor::new(&limiter)) // rate limiting
            .configure(register),
    );
}

/// Route table without the limiter wrapper; tests mount this directly.
pub fn register(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(error::json_error_handler))
        // /employees
        .service(
            web::resource("/employees")
                .route(web::get().to(employee::list_employees))
                .route(web::post().to(employee::create_employee)),
        )
        // /employees/{id}
        .service(
            web::resource("/employees/{id}")
                .route(web::get().to(employee::get_employee))
                .route(web::delete().to(employee::delete_employee)),
        )
        // /attendance
        .service(
            web::resource("/attendance")
                .route(web::get().to(attendance::list_attendance))
                .route(web::post().to(attendance::mark_attendance)),
        )
        // /attendance/{employee_id}
        .service(
            web::resource("/attendance/{employee_id}")
                .route(web::get().to(attendance::employee_attendance)),
        )
        // /dashboard-stats
        .service(web::resource("/dashboard-stats").route(web::get().to(dashboard::dashboard_stats)));
}
