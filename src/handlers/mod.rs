pub mod poll_handlers;
pub mod record_handlers;

use actix_web::{
    Error, HttpResponse, web,
    body::MessageBody,
    dev::{ServiceRequest, ServiceResponse},
    middleware::{Next, from_fn},
};
use chrono::Utc;

/// Rejects POST/PUT requests whose Content-Type is not application/json.
///
/// DELETE and GET carry no body and pass through.
async fn require_json_content_type(
    req: ServiceRequest,
    next: Next<impl MessageBody + 'static>,
) -> Result<ServiceResponse<impl MessageBody>, Error> {
    let method = req.method().clone();

    if method == actix_web::http::Method::POST || method == actix_web::http::Method::PUT {
        let content_type = req
            .headers()
            .get("content-type")
            .and_then(|v| v.to_str().ok())
            .unwrap_or("");

        if !content_type.starts_with("application/json") {
            let body = serde_json::json!({
                "error": "VALIDATION_ERROR",
                "reason": "UNSUPPORTED_CONTENT_TYPE",
                "message": "Content-Type must be application/json for mutation requests",
            });
            let response = HttpResponse::BadRequest().json(body);
            return Ok(req.into_response(response).map_into_right_body());
        }
    }

    next.call(req).await.map(|res| res.map_into_left_body())
}

/// GET /health
pub async fn health() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "timestamp": Utc::now().to_rfc3339(),
    }))
}

/// Full API route table. Static files are mounted separately by the binary.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health));
    cfg.service(
        web::scope("/api")
            .wrap(from_fn(require_json_content_type))
            .configure(poll_handlers::configure)
            .configure(record_handlers::configure),
    );
}
