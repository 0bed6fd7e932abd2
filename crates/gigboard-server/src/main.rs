use axum::{
    http::{HeaderValue, Method, StatusCode},
    routing::{get, post},
    Json, Router,
};
use gigboard_db::AppState;
use sea_orm_migration::MigratorTrait;
use serde::Serialize;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

mod api;

#[derive(Serialize)]
struct ApiStatus {
    status: &'static str,
    version: &'static str,
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    // Database connection
    let db_config = gigboard_db::DatabaseConfig::from_env();
    tracing::info!("connecting to database...");
    let db = gigboard_db::connect(&db_config)
        .await
        .expect("failed to connect to database");

    // Run migrations
    tracing::info!("running database migrations...");
    gigboard_migration::Migrator::up(&db, None)
        .await
        .expect("failed to run migrations");
    tracing::info!("migrations complete");

    let state = Arc::new(AppState { db });
    let app = router(state);

    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(5000);
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!(%addr, "server started");

    axum::serve(tokio::net::TcpListener::bind(addr).await.unwrap(), app)
        .await
        .unwrap();
}

fn router(state: Arc<AppState>) -> Router {
    // CORS: same-origin unless CORS_ORIGINS lists cross-origin consumers
    let cors = {
        let allowed_origins_str = std::env::var("CORS_ORIGINS").unwrap_or_default();
        if allowed_origins_str.is_empty() {
            CorsLayer::new()
        } else {
            let origins: Vec<HeaderValue> = allowed_origins_str
                .split(',')
                .filter_map(|s| HeaderValue::from_str(s.trim()).ok())
                .collect();
            tracing::info!("CORS allowed origins: {:?}", origins);
            CorsLayer::new()
                .allow_origin(origins)
                .allow_methods([Method::GET, Method::POST])
                .allow_headers(tower_http::cors::Any)
        }
    };

    Router::new()
        .route("/healthz", get(healthz))
        .route("/venues", get(api::venues::list_venues))
        .route("/venues/search", post(api::venues::search_venues))
        .route(
            "/venues/create",
            get(api::venues::new_venue_form).post(api::venues::create_venue),
        )
        .route("/venues/{id}", get(api::venues::venue_detail))
        .route(
            "/venues/{id}/edit",
            get(api::venues::edit_venue_form).post(api::venues::update_venue),
        )
        .route("/venues/{id}/delete", get(api::venues::delete_venue))
        .route("/artists", get(api::artists::list_artists))
        .route("/artists/search", post(api::artists::search_artists))
        .route(
            "/artists/create",
            get(api::artists::new_artist_form).post(api::artists::create_artist),
        )
        .route("/artists/{id}", get(api::artists::artist_detail))
        .route(
            "/artists/{id}/edit",
            get(api::artists::edit_artist_form).post(api::artists::update_artist),
        )
        .route("/artists/{id}/delete", get(api::artists::delete_artist))
        .route("/shows", get(api::shows::list_shows))
        .route(
            "/shows/create",
            get(api::shows::new_show_form).post(api::shows::create_show),
        )
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

async fn healthz() -> Json<ApiStatus> {
    Json(ApiStatus {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

async fn not_found() -> (StatusCode, &'static str) {
    (StatusCode::NOT_FOUND, "Page not found")
}
