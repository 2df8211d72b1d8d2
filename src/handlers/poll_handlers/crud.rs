use actix_web::{HttpResponse, web};

use crate::errors::AppError;
use crate::models::poll::{self, NewPoll};
use crate::store::DocumentStore;

use super::forms::MeetingFilter;
use super::live::PollFeed;

/// GET /api/votes - List polls, optionally filtered by `meetingId`
pub async fn list(
    store: web::Data<DocumentStore>,
    query: web::Query<MeetingFilter>,
) -> Result<HttpResponse, AppError> {
    let polls = poll::list(&store, query.meeting_id()).await?;
    Ok(HttpResponse::Ok().json(polls))
}

/// POST /api/votes - Create a poll
pub async fn create(
    store: web::Data<DocumentStore>,
    feed: web::Data<PollFeed>,
    body: web::Json<NewPoll>,
) -> Result<HttpResponse, AppError> {
    let created = poll::create(&store, body.into_inner()).await?;
    feed.publish(&created);
    Ok(HttpResponse::Created().json(created))
}

/// GET /api/votes/{id} - Get a single poll
pub async fn read(
    store: web::Data<DocumentStore>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let poll_id = path.into_inner();
    let found = poll::find_by_id(&store, &poll_id)
        .await?
        .ok_or_else(|| AppError::poll_not_found(&poll_id))?;
    Ok(HttpResponse::Ok().json(found))
}

/// DELETE /api/votes/{id} - Close a poll (repeat calls are no-ops)
pub async fn close(
    store: web::Data<DocumentStore>,
    feed: web::Data<PollFeed>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let closed = poll::close(&store, &path.into_inner()).await?;
    feed.publish(&closed);
    Ok(HttpResponse::Ok().json(closed))
}
