use axum::Router;
use axum::routing::{get, put};
use tokio::net::TcpListener;
use tracing::info;

use crate::handlers;
use crate::state::AppState;

/// Build the `/api` router over `state`.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route(
            "/api/courses",
            get(handlers::list_courses).post(handlers::create_course),
        )
        .route(
            "/api/courses/{id}",
            get(handlers::get_course).delete(handlers::delete_course),
        )
        .route("/api/courses/{id}/complete", put(handlers::complete_course))
        .route("/api/courses/{id}/reset", put(handlers::reset_course))
        .route(
            "/api/courses/{id}/lessons/{lesson_id}/toggle",
            put(handlers::toggle_lesson),
        )
        .route("/api/health", get(handlers::health))
        .with_state(state)
}

/// Serve the router on an already bound listener until the server stops.
///
/// # Errors
///
/// Returns the I/O error that stopped the server.
pub async fn serve(listener: TcpListener, state: AppState) -> std::io::Result<()> {
    if let Ok(addr) = listener.local_addr() {
        info!(%addr, "course api listening");
    }
    axum::serve(listener, router(state)).await
}
