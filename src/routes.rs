use crate::{
    api::{export, report},
    auth::middleware::auth_middleware,
    config::Config,
    error::ReportError,
};
use actix_governor::{
    Governor, GovernorConfig, GovernorConfigBuilder, PeerIpKeyExtractor,
    governor::middleware::NoOpMiddleware,
};
use actix_web::{middleware::from_fn, web};
use anyhow::{Context, Result};
use tracing::debug;

pub type LimiterConfig = GovernorConfig<PeerIpKeyExtractor, NoOpMiddleware>;

/// Per-peer limiter allowing `requests_per_min` requests a minute, with the
/// whole minute's allowance available as burst.
pub fn build_limiter_config(requests_per_min: u32) -> Result<LimiterConfig> {
    let requests_per_min = requests_per_min.max(1);
    let per_ms = 60_000 / u64::from(requests_per_min);
    GovernorConfigBuilder::default()
        .milliseconds_per_request(per_ms.max(1))
        .burst_size(requests_per_min)
        .key_extractor(PeerIpKeyExtractor)
        .finish()
        .context("invalid rate limiter configuration")
}

pub fn configure(cfg: &mut web::ServiceConfig, config: &Config, limiter: &LimiterConfig) {
    // Malformed bodies (bad ids, bad dates) answer with the failure envelope.
    let json_config = web::JsonConfig::default().error_handler(|err, req| {
        debug!(path = %req.path(), error = %err, "Rejected report filter body");
        ReportError::Validation(format!("Invalid filter: {err}")).into()
    });

    let prefix = config.api_prefix.trim_end_matches('/');

    cfg.service(
        web::scope(&format!("{prefix}/genarateReport"))
            .app_data(json_config)
            .wrap(from_fn(auth_middleware)) // authentication
            .wrap(Governor::new(limiter)) // rate limiting
            .service(
                web::resource("/get_dropdown_options")
                    .route(web::get().to(report::get_dropdown_options)),
            )
            .service(
                web::resource("/get_branch_details")
                    .route(web::post().to(report::get_branch_details)),
            )
            .service(
                web::resource("/get_employee_detail_by_department")
                    .route(web::post().to(report::get_employee_detail_by_department)),
            )
            .service(
                web::resource("/get_employee_detail_by_branch")
                    .route(web::post().to(report::get_employee_detail_by_branch)),
            )
            .service(
                web::resource("/get_employee_detail_by_pay_grade")
                    .route(web::post().to(report::get_employee_detail_by_pay_grade)),
            )
            .service(
                web::resource("/get_annual_leave_balance")
                    .route(web::post().to(report::get_annual_leave_balance)),
            )
            .service(
                web::resource("/get_leave_request_details")
                    .route(web::post().to(report::get_leave_request_details)),
            )
            .service(
                web::resource("/get_custom_field")
                    .route(web::post().to(report::get_custom_field)),
            )
            // /export/{report}
            .service(
                web::resource("/export/{report}").route(web::post().to(export::export_report)),
            ),
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn limiter_accepts_zero_and_large_rates() {
        assert!(build_limiter_config(0).is_ok());
        assert!(build_limiter_config(120).is_ok());
        assert!(build_limiter_config(120_000).is_ok());
    }
}
