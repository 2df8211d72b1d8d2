//! JSON passthrough routes for the document collections that sit next to the
//! polls. No derived state lives here; see `models::records`.

use actix_web::{HttpResponse, web};
use serde::Deserialize;
use serde_json::{Map, Value, json};

use crate::errors::AppError;
use crate::models::records;
use crate::store::DocumentStore;

#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct ReportRequest {
    pub report_url: String,
}

/// GET /api/meetings
pub async fn list_meetings(store: web::Data<DocumentStore>) -> Result<HttpResponse, AppError> {
    Ok(HttpResponse::Ok().json(records::list_meetings(&store).await?))
}

/// POST /api/meetings
pub async fn create_meeting(
    store: web::Data<DocumentStore>,
    body: web::Json<Map<String, Value>>,
) -> Result<HttpResponse, AppError> {
    let meeting = records::create_meeting(&store, body.into_inner()).await?;
    log::info!("Meeting {} created", meeting.get("id").unwrap_or(&Value::Null));
    Ok(HttpResponse::Created().json(meeting))
}

/// DELETE /api/meetings/{id}
pub async fn delete_meeting(
    store: web::Data<DocumentStore>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    records::delete_meeting(&store, &path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(json!({ "success": true })))
}

/// GET /api/residents
pub async fn get_residents(store: web::Data<DocumentStore>) -> Result<HttpResponse, AppError> {
    Ok(HttpResponse::Ok().json(records::get_residents(&store).await?))
}

/// POST /api/residents - Replace the whole roster
pub async fn save_residents(
    store: web::Data<DocumentStore>,
    body: web::Json<Value>,
) -> Result<HttpResponse, AppError> {
    records::replace_residents(&store, &body).await?;
    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "message": "Residents saved",
    })))
}

/// GET /api/reports/{meeting_id}
pub async fn get_report(
    store: web::Data<DocumentStore>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let report = records::find_report(&store, &path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(report))
}

/// POST /api/reports/{meeting_id}
pub async fn update_report(
    store: web::Data<DocumentStore>,
    path: web::Path<String>,
    body: web::Json<ReportRequest>,
) -> Result<HttpResponse, AppError> {
    let report = records::upsert_report(&store, &path.into_inner(), &body.report_url).await?;
    Ok(HttpResponse::Ok().json(report))
}

/// GET /api/participant-stats
pub async fn get_participant_stats(store: web::Data<DocumentStore>) -> Result<HttpResponse, AppError> {
    Ok(HttpResponse::Ok().json(records::get_participant_stats(&store).await?))
}

/// POST /api/participant-stats - Replace all statistics
pub async fn save_participant_stats(
    store: web::Data<DocumentStore>,
    body: web::Json<Value>,
) -> Result<HttpResponse, AppError> {
    records::replace_participant_stats(&store, &body).await?;
    Ok(HttpResponse::Ok().json(json!({ "success": true })))
}

/// GET /api/past-meetings
pub async fn list_past_meetings(store: web::Data<DocumentStore>) -> Result<HttpResponse, AppError> {
    Ok(HttpResponse::Ok().json(records::list_past_meetings(&store).await?))
}

/// POST /api/past-meetings
pub async fn save_past_meeting(
    store: web::Data<DocumentStore>,
    body: web::Json<Value>,
) -> Result<HttpResponse, AppError> {
    let meeting = records::append_past_meeting(&store, body.into_inner()).await?;
    Ok(HttpResponse::Ok().json(json!({ "success": true, "meeting": meeting })))
}

/// DELETE /api/past-meetings/{id} - Remove an archived meeting and its report link
pub async fn delete_past_meeting(
    store: web::Data<DocumentStore>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let meeting_id = path.into_inner();
    let removed = records::delete_past_meeting(&store, &meeting_id).await?;
    log::info!("Past meeting {} deleted ({} records)", meeting_id, removed);
    Ok(HttpResponse::Ok().json(json!({ "success": true })))
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/meetings", web::get().to(list_meetings))
        .route("/meetings", web::post().to(create_meeting))
        .route("/meetings/{id}", web::delete().to(delete_meeting))
        .route("/residents", web::get().to(get_residents))
        .route("/residents", web::post().to(save_residents))
        .route("/reports/{meeting_id}", web::get().to(get_report))
        .route("/reports/{meeting_id}", web::post().to(update_report))
        .route("/participant-stats", web::get().to(get_participant_stats))
        .route("/participant-stats", web::post().to(save_participant_stats))
        .route("/past-meetings", web::get().to(list_past_meetings))
        .route("/past-meetings", web::post().to(save_past_meeting))
        .route("/past-meetings/{id}", web::delete().to(delete_past_meeting));
}
