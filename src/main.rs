// Registrar server - REST API over the in-memory academic records store.

use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use registrar::{
    api::{create_api_router, AppState},
    config::Config,
    storage::{seed_demo_data, MemoryStore, Storage},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    // Load configuration
    let config = Config::from_env()?;

    // The store lives here and is handed to the HTTP layer by reference.
    let storage: Arc<dyn Storage> = Arc::new(MemoryStore::new());
    if config.demo.seed {
        seed_demo_data(storage.as_ref()).await?;
    }

    let state = AppState::new(storage);

    // Build main application router
    let app = Router::new().nest("/api", create_api_router(state)).layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(CorsLayer::permissive()),
    );

    // Start server
    let addr = config.server_address();
    println!("🚀 Registrar server starting on http://{}", addr);
    println!("📋 API Documentation:");
    println!("  POST   /api/auth/login                - Log in, returns session token");
    println!("  GET    /api/users                     - List users (same shape for students,");
    println!("                                          faculty, courses, course-assignments,");
    println!("                                          enrollments, attendance, grades, events)");
    println!("  GET    /api/students/{{id}}/details     - Student with enrollments, grades, attendance");
    println!("  GET    /api/courses/{{id}}/details      - Course with offerings and faculty");
    println!("  GET    /api/faculty/{{id}}/details      - Faculty with their offerings");
    println!("  GET    /api/events/upcoming           - Events starting after now");
    println!("  GET    /api/dashboard/stats           - Dashboard aggregates");

    let listener = TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
