pub mod ballot;
pub mod crud;
pub mod forms;
pub mod live;

pub use live::PollFeed;

use actix_web::web;

/// Poll routes, mounted under `/api`. `/live` is registered before `/{id}`
/// so it is not taken for a poll id.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/votes")
            .route("", web::get().to(crud::list))
            .route("", web::post().to(crud::create))
            .route("/live", web::get().to(live::connect))
            .route("/{id}", web::get().to(crud::read))
            .route("/{id}", web::delete().to(crud::close))
            .route("/{id}/submit", web::post().to(ballot::submit))
            .route("/{id}/cancel", web::post().to(ballot::cancel)),
    );
}
