// HTTP collaborator layer - thin REST surface over the store.
//
// Every handler is a straight call into `Storage`; absence becomes 404,
// constraint violations keep the store's Conflict/Validation status codes.
// Sessions live here, not in the store: the core only answers the
// credential lookup.

pub mod auth;
pub mod handlers;

use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};
use chrono::Utc;
use tokio::sync::RwLock;

use crate::models::EntityId;
use crate::storage::Storage;

/// Token -> user id. Opaque uuid tokens handed out at login.
pub type SessionMap = Arc<RwLock<HashMap<String, EntityId>>>;

#[derive(Clone)]
pub struct AppState {
    pub storage: Arc<dyn Storage>,
    pub sessions: SessionMap,
}

impl AppState {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self {
            storage,
            sessions: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "registrar",
        "timestamp": Utc::now().to_rfc3339()
    }))
}

pub fn create_api_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        // Auth
        .route("/auth/login", post(auth::login))
        .route("/auth/logout", post(auth::logout))
        .route("/auth/me", get(auth::me))
        // Users
        .route(
            "/users",
            get(handlers::list_users).post(handlers::create_user),
        )
        .route(
            "/users/{id}",
            get(handlers::get_user)
                .put(handlers::update_user)
                .delete(handlers::delete_user),
        )
        // Students
        .route(
            "/students",
            get(handlers::list_students).post(handlers::create_student),
        )
        .route(
            "/students/{id}",
            get(handlers::get_student)
                .put(handlers::update_student)
                .delete(handlers::delete_student),
        )
        .route("/students/{id}/details", get(handlers::student_details))
        // Faculty
        .route(
            "/faculty",
            get(handlers::list_faculty).post(handlers::create_faculty),
        )
        .route(
            "/faculty/{id}",
            get(handlers::get_faculty)
                .put(handlers::update_faculty)
                .delete(handlers::delete_faculty),
        )
        .route("/faculty/{id}/details", get(handlers::faculty_details))
        // Courses
        .route(
            "/courses",
            get(handlers::list_courses).post(handlers::create_course),
        )
        .route(
            "/courses/{id}",
            get(handlers::get_course)
                .put(handlers::update_course)
                .delete(handlers::delete_course),
        )
        .route("/courses/{id}/details", get(handlers::course_details))
        // Course assignments
        .route(
            "/course-assignments",
            get(handlers::list_course_assignments).post(handlers::create_course_assignment),
        )
        .route(
            "/course-assignments/{id}",
            get(handlers::get_course_assignment)
                .put(handlers::update_course_assignment)
                .delete(handlers::delete_course_assignment),
        )
        // Enrollments
        .route(
            "/enrollments",
            get(handlers::list_enrollments).post(handlers::create_enrollment),
        )
        .route(
            "/enrollments/{id}",
            get(handlers::get_enrollment)
                .put(handlers::update_enrollment)
                .delete(handlers::delete_enrollment),
        )
        // Attendance
        .route(
            "/attendance",
            get(handlers::list_attendance).post(handlers::create_attendance),
        )
        .route(
            "/attendance/{id}",
            get(handlers::get_attendance)
                .put(handlers::update_attendance)
                .delete(handlers::delete_attendance),
        )
        // Grades
        .route(
            "/grades",
            get(handlers::list_grades).post(handlers::create_grade),
        )
        .route(
            "/grades/{id}",
            get(handlers::get_grade)
                .put(handlers::update_grade)
                .delete(handlers::delete_grade),
        )
        // Events
        .route(
            "/events",
            get(handlers::list_events).post(handlers::create_event),
        )
        .route("/events/upcoming", get(handlers::upcoming_events))
        .route(
            "/events/{id}",
            get(handlers::get_event)
                .put(handlers::update_event)
                .delete(handlers::delete_event),
        )
        // Dashboard
        .route("/dashboard/stats", get(handlers::dashboard_stats))
        .with_state(state)
}
