use crate::{
    api::{application, employee, status},
    error::{ApiError, REQUEST_NOT_VALID},
};
use actix_governor::{GovernorConfig, GovernorConfigBuilder, PeerIpKeyExtractor};
use actix_governor::governor::middleware::NoOpMiddleware;
use actix_web::web;
use anyhow::{Result, anyhow};
use tracing::debug;

/// Per-peer-IP limiter config, shared by every worker.
pub fn build_limiter(
    requests_per_min: u32,
) -> Result<GovernorConfig<PeerIpKeyExtractor, NoOpMiddleware>> {
    let per_ms = if requests_per_min == 0 {
        1
    } else {
        (60_000 / requests_per_min as u64).max(1)
    };

    GovernorConfigBuilder::default()
        .per_millisecond(per_ms)
        .burst_size(requests_per_min.max(1))
        .key_extractor(PeerIpKeyExtractor)
        .finish()
        .ok_or_else(|| anyhow!("invalid rate limit: {requests_per_min} requests per minute"))
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    // malformed or non-JSON bodies get the same message as an invalid patch
    cfg.app_data(web::JsonConfig::default().error_handler(|err, _req| {
        debug!(error = %err, "Rejected JSON body");
        ApiError::BadRequest(REQUEST_NOT_VALID.to_string()).into()
    }));

    cfg.service(web::resource("/status").route(web::get().to(status::status)))
        .service(
            web::scope("/employee")
                // /employee/{id}
                .service(
                    web::resource("/{id}")
                        .route(web::get().to(employee::get_employee))
                        .route(web::patch().to(employee::patch_employee)),
                ),
        )
        .service(
            // /application
            web::resource("/application")
                .route(web::post().to(application::post_application))
                .route(web::get().to(application::search_applications)),
        );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{app, memory_pool};
    use actix_web::test::{TestRequest, call_service};

    #[test]
    fn test_build_limiter() {
        assert!(build_limiter(60).is_ok());
        assert!(build_limiter(0).is_ok());
        assert!(build_limiter(120_000).is_ok());
    }

    #[actix_web::test]
    async fn test_unknown_route() {
        let app = app(memory_pool().await).await;
        let req = TestRequest::get().uri("/employees").to_request();
        let resp = call_service(&app, req).await;
        assert_eq!(resp.status(), 404);
    }

    #[actix_web::test]
    async fn test_wrong_method() {
        let app = app(memory_pool().await).await;
        let req = TestRequest::delete().uri("/employee/1").to_request();
        let resp = call_service(&app, req).await;
        assert_eq!(resp.status(), 405);
    }
}
