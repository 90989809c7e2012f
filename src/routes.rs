use crate::{
    api::{attendance, payroll},
    config::Config,
};
use actix_governor::{
    Governor, GovernorConfigBuilder, PeerIpKeyExtractor, governor::middleware::NoOpMiddleware,
};
use actix_web::{HttpResponse, Responder, error::InternalError, get, web};
use serde_json::json;

#[get("/health")]
async fn health() -> impl Responder {
    HttpResponse::Ok().json(json!({ "status": "ok" }))
}

pub fn configure(cfg: &mut web::ServiceConfig, config: Config) {
    // Helper to build per-route limiter
    fn build_limiter(requests_per_min: u32) -> Governor<PeerIpKeyExtractor, NoOpMiddleware> {
        let burst = requests_per_min.max(1);
        let per_ms = 60_000 / u64::from(burst);
        let cfg = GovernorConfigBuilder::default()
            .per_millisecond(per_ms.max(1))
            .burst_size(burst)
            .key_extractor(PeerIpKeyExtractor)
            .finish()
            .unwrap_or_default();
        Governor::new(&cfg)
    }

    let json_cfg = web::JsonConfig::default()
        .limit(config.max_payload_bytes)
        .error_handler(|err, _req| {
            let resp = HttpResponse::BadRequest().json(json!({ "message": err.to_string() }));
            InternalError::from_response(err, resp).into()
        });

    cfg.app_data(json_cfg).service(health);

    cfg.service(
        web::scope(&config.api_prefix)
            .wrap(build_limiter(config.rate_derive_per_min))
            .service(
                web::scope("/attendance")
                    // /attendance/duration
                    .service(web::resource("/duration").route(web::post().to(attendance::duration)))
                    // /attendance/day
                    .service(web::resource("/day").route(web::post().to(attendance::classify)))
                    // /attendance/summary
                    .service(web::resource("/summary").route(web::post().to(attendance::summary))),
            )
            .service(
                web::scope("/payroll")
                    // /payroll/preview
                    .service(web::resource("/preview").route(web::post().to(payroll::preview))),
            ),
    );
}
