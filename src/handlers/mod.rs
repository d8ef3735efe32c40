pub mod api;
pub mod application_handlers;
pub mod board;

use actix_web::{web, HttpResponse};
use chrono::Utc;

async fn health() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "timestamp": Utc::now().to_rfc3339(),
    }))
}

async fn not_found() -> HttpResponse {
    let html = include_str!("../../templates/errors/404.html");
    HttpResponse::NotFound()
        .content_type("text/html; charset=utf-8")
        .body(html)
}

/// Register every route. Static files and middleware are wired in `main`.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(board::index))
        .route("/health", web::get().to(health))
        .route("/events/{id}/applications", web::post().to(application_handlers::create))
        .service(
            web::scope("/api/events")
                .route("", web::get().to(api::events_feed))
                .route("/{id}/roster", web::get().to(api::roster))
                .route("/{id}/gate", web::get().to(api::gate_status)),
        )
        .default_service(web::to(not_found));
}
