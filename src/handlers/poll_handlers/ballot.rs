use actix_web::{HttpResponse, web};

use crate::errors::AppError;
use crate::models::poll;
use crate::store::DocumentStore;

use super::forms::{CancelBallotRequest, SubmitBallotRequest};
use super::live::PollFeed;

/// POST /api/votes/{id}/submit - Record or replace a voter's ballot
pub async fn submit(
    store: web::Data<DocumentStore>,
    feed: web::Data<PollFeed>,
    path: web::Path<String>,
    body: web::Json<SubmitBallotRequest>,
) -> Result<HttpResponse, AppError> {
    let poll_id = path.into_inner();
    let updated =
        poll::submit_ballot(&store, &poll_id, &body.user_name, &body.selected_options).await?;
    feed.publish(&updated);
    Ok(HttpResponse::Ok().json(updated))
}

/// POST /api/votes/{id}/cancel - Withdraw a voter's ballot
pub async fn cancel(
    store: web::Data<DocumentStore>,
    feed: web::Data<PollFeed>,
    path: web::Path<String>,
    body: web::Json<CancelBallotRequest>,
) -> Result<HttpResponse, AppError> {
    let poll_id = path.into_inner();
    let updated = poll::cancel_ballot(&store, &poll_id, &body.user_name).await?;
    feed.publish(&updated);
    Ok(HttpResponse::Ok().json(updated))
}
