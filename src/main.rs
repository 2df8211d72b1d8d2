use actix_web::{App, HttpServer, middleware, web};

use menil::config::AppConfig;
use menil::handlers::{self, poll_handlers::PollFeed};
use menil::store::DocumentStore;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init();
    let config = AppConfig::from_env();

    let store = DocumentStore::open(&config.data_dir, config.lock_timeout)
        .map_err(|e| std::io::Error::other(format!("Failed to open data directory: {e}")))?;
    let created = store
        .init_collections()
        .map_err(|e| std::io::Error::other(format!("Failed to initialise collections: {e}")))?;
    log::info!(
        "Data directory {} ready ({} collections created)",
        store.data_dir().display(),
        created
    );

    let store = web::Data::new(store);
    let feed = web::Data::new(PollFeed::new());
    let static_dir = config.static_dir.clone();
    let (host, port) = config.bind_addr();

    log::info!("Starting server at http://{host}:{port}");

    HttpServer::new(move || {
        App::new()
            .wrap(middleware::Logger::default())
            .app_data(store.clone())
            .app_data(feed.clone())
            .configure(handlers::configure)
            // Static front-end, registered last so it only sees unmatched paths
            .service(actix_files::Files::new("/", static_dir.clone()).index_file("index.html"))
    })
    .bind((host, port))?
    .run()
    .await
}
