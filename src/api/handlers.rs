// Entity CRUD, composite views, and dashboard handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use chrono::Utc;
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{json, Value};
use tracing::info;

use crate::error::{AppError, AppResult};
use crate::models::*;
use crate::storage::{self, JoinMode, Storage};

use super::AppState;

static USERNAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9][A-Za-z0-9_.-]{2,31}$").expect("valid regex"));
static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("valid regex"));

fn validate_username(username: &str) -> AppResult<()> {
    if !USERNAME_RE.is_match(username) {
        return Err(AppError::Validation(format!(
            "invalid username '{}': 3-32 chars, letters, digits, '_', '.', '-'",
            username
        )));
    }
    Ok(())
}

fn validate_email(email: &str) -> AppResult<()> {
    if !EMAIL_RE.is_match(email) {
        return Err(AppError::Validation(format!("invalid email '{}'", email)));
    }
    Ok(())
}

fn not_found(what: &str, id: EntityId) -> AppError {
    AppError::NotFound(format!("{} {} not found", what, id))
}

// Users

pub async fn create_user(
    State(state): State<AppState>,
    Json(new): Json<NewUser>,
) -> AppResult<(StatusCode, Json<User>)> {
    validate_username(&new.username)?;
    validate_email(&new.email)?;
    let user = state.storage.create_user(new).await?;
    info!("Created user {} (id {})", user.username, user.id);
    Ok((StatusCode::CREATED, Json(user)))
}

pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<EntityId>,
) -> AppResult<Json<User>> {
    let user = state
        .storage
        .get_user(id)
        .await?
        .ok_or_else(|| not_found("user", id))?;
    Ok(Json(user))
}

pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<EntityId>,
    Json(patch): Json<UserPatch>,
) -> AppResult<Json<User>> {
    if let Some(username) = &patch.username {
        validate_username(username)?;
    }
    if let Some(email) = &patch.email {
        validate_email(email)?;
    }
    let user = state
        .storage
        .update_user(id, patch)
        .await?
        .ok_or_else(|| not_found("user", id))?;
    Ok(Json(user))
}

pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<EntityId>,
) -> AppResult<Json<Value>> {
    if !state.storage.delete_user(id).await? {
        return Err(not_found("user", id));
    }
    Ok(Json(json!({"id": id, "deleted": true})))
}

pub async fn list_users(State(state): State<AppState>) -> AppResult<Json<Vec<User>>> {
    Ok(Json(state.storage.list_users().await?))
}

// Students

pub async fn create_student(
    State(state): State<AppState>,
    Json(new): Json<NewStudent>,
) -> AppResult<(StatusCode, Json<Student>)> {
    // One student profile per user; checked here, ahead of the store.
    if state.storage.student_by_user(new.user_id).await?.is_some() {
        return Err(AppError::Conflict(format!(
            "user {} already has a student profile",
            new.user_id
        )));
    }
    let student = state.storage.create_student(new).await?;
    info!(
        "Created student {} (id {})",
        student.student_code, student.id
    );
    Ok((StatusCode::CREATED, Json(student)))
}

pub async fn get_student(
    State(state): State<AppState>,
    Path(id): Path<EntityId>,
) -> AppResult<Json<Student>> {
    let student = state
        .storage
        .get_student(id)
        .await?
        .ok_or_else(|| not_found("student", id))?;
    Ok(Json(student))
}

pub async fn update_student(
    State(state): State<AppState>,
    Path(id): Path<EntityId>,
    Json(patch): Json<StudentPatch>,
) -> AppResult<Json<Student>> {
    let student = state
        .storage
        .update_student(id, patch)
        .await?
        .ok_or_else(|| not_found("student", id))?;
    Ok(Json(student))
}

pub async fn delete_student(
    State(state): State<AppState>,
    Path(id): Path<EntityId>,
) -> AppResult<Json<Value>> {
    if !state.storage.delete_student(id).await? {
        return Err(not_found("student", id));
    }
    Ok(Json(json!({"id": id, "deleted": true})))
}

pub async fn list_students(State(state): State<AppState>) -> AppResult<Json<Vec<Student>>> {
    Ok(Json(state.storage.list_students().await?))
}

pub async fn student_details(
    State(state): State<AppState>,
    Path(id): Path<EntityId>,
) -> AppResult<Json<StudentDetails>> {
    let details = storage::student_details(state.storage.as_ref(), id, JoinMode::Lenient)
        .await?
        .ok_or_else(|| not_found("student", id))?;
    Ok(Json(details))
}

// Faculty

pub async fn create_faculty(
    State(state): State<AppState>,
    Json(new): Json<NewFaculty>,
) -> AppResult<(StatusCode, Json<Faculty>)> {
    // One faculty profile per user; checked here, ahead of the store.
    if state.storage.faculty_by_user(new.user_id).await?.is_some() {
        return Err(AppError::Conflict(format!(
            "user {} already has a faculty profile",
            new.user_id
        )));
    }
    let faculty = state.storage.create_faculty(new).await?;
    info!(
        "Created faculty {} (id {})",
        faculty.faculty_code, faculty.id
    );
    Ok((StatusCode::CREATED, Json(faculty)))
}

pub async fn get_faculty(
    State(state): State<AppState>,
    Path(id): Path<EntityId>,
) -> AppResult<Json<Faculty>> {
    let faculty = state
        .storage
        .get_faculty(id)
        .await?
        .ok_or_else(|| not_found("faculty", id))?;
    Ok(Json(faculty))
}

pub async fn update_faculty(
    State(state): State<AppState>,
    Path(id): Path<EntityId>,
    Json(patch): Json<FacultyPatch>,
) -> AppResult<Json<Faculty>> {
    let faculty = state
        .storage
        .update_faculty(id, patch)
        .await?
        .ok_or_else(|| not_found("faculty", id))?;
    Ok(Json(faculty))
}

pub async fn delete_faculty(
    State(state): State<AppState>,
    Path(id): Path<EntityId>,
) -> AppResult<Json<Value>> {
    if !state.storage.delete_faculty(id).await? {
        return Err(not_found("faculty", id));
    }
    Ok(Json(json!({"id": id, "deleted": true})))
}

pub async fn list_faculty(State(state): State<AppState>) -> AppResult<Json<Vec<Faculty>>> {
    Ok(Json(state.storage.list_faculty().await?))
}

pub async fn faculty_details(
    State(state): State<AppState>,
    Path(id): Path<EntityId>,
) -> AppResult<Json<FacultyDetails>> {
    let details = storage::faculty_details(state.storage.as_ref(), id, JoinMode::Lenient)
        .await?
        .ok_or_else(|| not_found("faculty", id))?;
    Ok(Json(details))
}

// Courses

pub async fn create_course(
    State(state): State<AppState>,
    Json(new): Json<NewCourse>,
) -> AppResult<(StatusCode, Json<Course>)> {
    let course = state.storage.create_course(new).await?;
    info!("Created course {} (id {})", course.code, course.id);
    Ok((StatusCode::CREATED, Json(course)))
}

pub async fn get_course(
    State(state): State<AppState>,
    Path(id): Path<EntityId>,
) -> AppResult<Json<Course>> {
    let course = state
        .storage
        .get_course(id)
        .await?
        .ok_or_else(|| not_found("course", id))?;
    Ok(Json(course))
}

pub async fn update_course(
    State(state): State<AppState>,
    Path(id): Path<EntityId>,
    Json(patch): Json<CoursePatch>,
) -> AppResult<Json<Course>> {
    let course = state
        .storage
        .update_course(id, patch)
        .await?
        .ok_or_else(|| not_found("course", id))?;
    Ok(Json(course))
}

pub async fn delete_course(
    State(state): State<AppState>,
    Path(id): Path<EntityId>,
) -> AppResult<Json<Value>> {
    if !state.storage.delete_course(id).await? {
        return Err(not_found("course", id));
    }
    Ok(Json(json!({"id": id, "deleted": true})))
}

pub async fn list_courses(State(state): State<AppState>) -> AppResult<Json<Vec<Course>>> {
    Ok(Json(state.storage.list_courses().await?))
}

pub async fn course_details(
    State(state): State<AppState>,
    Path(id): Path<EntityId>,
) -> AppResult<Json<CourseDetails>> {
    let details = storage::course_details(state.storage.as_ref(), id, JoinMode::Lenient)
        .await?
        .ok_or_else(|| not_found("course", id))?;
    Ok(Json(details))
}

// Course assignments

pub async fn create_course_assignment(
    State(state): State<AppState>,
    Json(new): Json<NewCourseAssignment>,
) -> AppResult<(StatusCode, Json<CourseAssignment>)> {
    let assignment = state.storage.create_course_assignment(new).await?;
    Ok((StatusCode::CREATED, Json(assignment)))
}

pub async fn get_course_assignment(
    State(state): State<AppState>,
    Path(id): Path<EntityId>,
) -> AppResult<Json<CourseAssignment>> {
    let assignment = state
        .storage
        .get_course_assignment(id)
        .await?
        .ok_or_else(|| not_found("course assignment", id))?;
    Ok(Json(assignment))
}

pub async fn update_course_assignment(
    State(state): State<AppState>,
    Path(id): Path<EntityId>,
    Json(patch): Json<CourseAssignmentPatch>,
) -> AppResult<Json<CourseAssignment>> {
    let assignment = state
        .storage
        .update_course_assignment(id, patch)
        .await?
        .ok_or_else(|| not_found("course assignment", id))?;
    Ok(Json(assignment))
}

pub async fn delete_course_assignment(
    State(state): State<AppState>,
    Path(id): Path<EntityId>,
) -> AppResult<Json<Value>> {
    if !state.storage.delete_course_assignment(id).await? {
        return Err(not_found("course assignment", id));
    }
    Ok(Json(json!({"id": id, "deleted": true})))
}

pub async fn list_course_assignments(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<CourseAssignment>>> {
    Ok(Json(state.storage.list_course_assignments().await?))
}

// Enrollments

pub async fn create_enrollment(
    State(state): State<AppState>,
    Json(new): Json<NewEnrollment>,
) -> AppResult<(StatusCode, Json<Enrollment>)> {
    let enrollment = state.storage.create_enrollment(new).await?;
    Ok((StatusCode::CREATED, Json(enrollment)))
}

pub async fn get_enrollment(
    State(state): State<AppState>,
    Path(id): Path<EntityId>,
) -> AppResult<Json<Enrollment>> {
    let enrollment = state
        .storage
        .get_enrollment(id)
        .await?
        .ok_or_else(|| not_found("enrollment", id))?;
    Ok(Json(enrollment))
}

pub async fn update_enrollment(
    State(state): State<AppState>,
    Path(id): Path<EntityId>,
    Json(patch): Json<EnrollmentPatch>,
) -> AppResult<Json<Enrollment>> {
    let enrollment = state
        .storage
        .update_enrollment(id, patch)
        .await?
        .ok_or_else(|| not_found("enrollment", id))?;
    Ok(Json(enrollment))
}

pub async fn delete_enrollment(
    State(state): State<AppState>,
    Path(id): Path<EntityId>,
) -> AppResult<Json<Value>> {
    if !state.storage.delete_enrollment(id).await? {
        return Err(not_found("enrollment", id));
    }
    Ok(Json(json!({"id": id, "deleted": true})))
}

pub async fn list_enrollments(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<Enrollment>>> {
    Ok(Json(state.storage.list_enrollments().await?))
}

// Attendance

pub async fn create_attendance(
    State(state): State<AppState>,
    Json(new): Json<NewAttendance>,
) -> AppResult<(StatusCode, Json<Attendance>)> {
    let attendance = state.storage.create_attendance(new).await?;
    Ok((StatusCode::CREATED, Json(attendance)))
}

pub async fn get_attendance(
    State(state): State<AppState>,
    Path(id): Path<EntityId>,
) -> AppResult<Json<Attendance>> {
    let attendance = state
        .storage
        .get_attendance(id)
        .await?
        .ok_or_else(|| not_found("attendance record", id))?;
    Ok(Json(attendance))
}

pub async fn update_attendance(
    State(state): State<AppState>,
    Path(id): Path<EntityId>,
    Json(patch): Json<AttendancePatch>,
) -> AppResult<Json<Attendance>> {
    let attendance = state
        .storage
        .update_attendance(id, patch)
        .await?
        .ok_or_else(|| not_found("attendance record", id))?;
    Ok(Json(attendance))
}

pub async fn delete_attendance(
    State(state): State<AppState>,
    Path(id): Path<EntityId>,
) -> AppResult<Json<Value>> {
    if !state.storage.delete_attendance(id).await? {
        return Err(not_found("attendance record", id));
    }
    Ok(Json(json!({"id": id, "deleted": true})))
}

pub async fn list_attendance(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<Attendance>>> {
    Ok(Json(state.storage.list_attendance().await?))
}

// Grades

pub async fn create_grade(
    State(state): State<AppState>,
    Json(new): Json<NewGrade>,
) -> AppResult<(StatusCode, Json<Grade>)> {
    let grade = state.storage.create_grade(new).await?;
    Ok((StatusCode::CREATED, Json(grade)))
}

pub async fn get_grade(
    State(state): State<AppState>,
    Path(id): Path<EntityId>,
) -> AppResult<Json<Grade>> {
    let grade = state
        .storage
        .get_grade(id)
        .await?
        .ok_or_else(|| not_found("grade", id))?;
    Ok(Json(grade))
}

pub async fn update_grade(
    State(state): State<AppState>,
    Path(id): Path<EntityId>,
    Json(patch): Json<GradePatch>,
) -> AppResult<Json<Grade>> {
    let grade = state
        .storage
        .update_grade(id, patch)
        .await?
        .ok_or_else(|| not_found("grade", id))?;
    Ok(Json(grade))
}

pub async fn delete_grade(
    State(state): State<AppState>,
    Path(id): Path<EntityId>,
) -> AppResult<Json<Value>> {
    if !state.storage.delete_grade(id).await? {
        return Err(not_found("grade", id));
    }
    Ok(Json(json!({"id": id, "deleted": true})))
}

pub async fn list_grades(State(state): State<AppState>) -> AppResult<Json<Vec<Grade>>> {
    Ok(Json(state.storage.list_grades().await?))
}

// Events

pub async fn create_event(
    State(state): State<AppState>,
    Json(new): Json<NewEvent>,
) -> AppResult<(StatusCode, Json<Event>)> {
    let event = state.storage.create_event(new).await?;
    Ok((StatusCode::CREATED, Json(event)))
}

pub async fn get_event(
    State(state): State<AppState>,
    Path(id): Path<EntityId>,
) -> AppResult<Json<Event>> {
    let event = state
        .storage
        .get_event(id)
        .await?
        .ok_or_else(|| not_found("event", id))?;
    Ok(Json(event))
}

pub async fn update_event(
    State(state): State<AppState>,
    Path(id): Path<EntityId>,
    Json(patch): Json<EventPatch>,
) -> AppResult<Json<Event>> {
    let event = state
        .storage
        .update_event(id, patch)
        .await?
        .ok_or_else(|| not_found("event", id))?;
    Ok(Json(event))
}

pub async fn delete_event(
    State(state): State<AppState>,
    Path(id): Path<EntityId>,
) -> AppResult<Json<Value>> {
    if !state.storage.delete_event(id).await? {
        return Err(not_found("event", id));
    }
    Ok(Json(json!({"id": id, "deleted": true})))
}

pub async fn list_events(State(state): State<AppState>) -> AppResult<Json<Vec<Event>>> {
    Ok(Json(state.storage.list_events().await?))
}

pub async fn upcoming_events(State(state): State<AppState>) -> AppResult<Json<Vec<Event>>> {
    let events = storage::upcoming_events(state.storage.as_ref(), Utc::now()).await?;
    Ok(Json(events))
}

// Dashboard

pub async fn dashboard_stats(State(state): State<AppState>) -> AppResult<Json<DashboardStats>> {
    let stats = storage::dashboard_stats(state.storage.as_ref()).await?;
    Ok(Json(stats))
}
