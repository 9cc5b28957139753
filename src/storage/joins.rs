// Composite views assembled by walking foreign keys across tables.
//
// Written against the `Storage` trait, not the in-memory internals, so the
// same traversal works over any backend. Traversal is eager and per-row:
// every foreign key is resolved with a direct lookup as it is met.

use chrono::{DateTime, Utc};

use crate::error::{AppError, AppResult};
use crate::models::*;

use super::Storage;

/// What a join does when a foreign key no longer resolves.
///
/// The store does not cascade deletes, so composite views can meet rows
/// whose referenced parent is gone. `Lenient` reproduces the store's
/// documented behavior: the dangling branch is omitted (or its enrichment
/// fields left `None`) and the rest of the result stands. `Strict` turns
/// the first dangling reference into a `NotFound` error naming the missing
/// row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JoinMode {
    #[default]
    Lenient,
    Strict,
}

fn dangling(what: &str, id: EntityId, referenced_by: &str, by_id: EntityId) -> AppError {
    AppError::NotFound(format!(
        "{} {} referenced by {} {} does not exist",
        what, id, referenced_by, by_id
    ))
}

/// Student identity plus every enrollment resolved through its offering to
/// the course, teaching faculty, attendance, and grades.
///
/// `Ok(None)` when the student or its user row is missing. In lenient mode
/// an enrollment whose offering or course is gone is dropped from the
/// result; a missing faculty member only blanks the faculty fields.
pub async fn student_details(
    store: &dyn Storage,
    id: EntityId,
    mode: JoinMode,
) -> AppResult<Option<StudentDetails>> {
    let Some(student) = store.get_student(id).await? else {
        return Ok(None);
    };
    let Some(user) = store.get_user(student.user_id).await? else {
        return Ok(None);
    };

    let mut enrollments = Vec::new();
    for enrollment in store.enrollments_by_student(id).await? {
        let assignment = match store
            .get_course_assignment(enrollment.course_assignment_id)
            .await?
        {
            Some(assignment) => assignment,
            None if mode == JoinMode::Strict => {
                return Err(dangling(
                    "course assignment",
                    enrollment.course_assignment_id,
                    "enrollment",
                    enrollment.id,
                ));
            }
            None => continue,
        };
        let course = match store.get_course(assignment.course_id).await? {
            Some(course) => course,
            None if mode == JoinMode::Strict => {
                return Err(dangling(
                    "course",
                    assignment.course_id,
                    "course assignment",
                    assignment.id,
                ));
            }
            None => continue,
        };

        let faculty = store.get_faculty(assignment.faculty_id).await?;
        if faculty.is_none() && mode == JoinMode::Strict {
            return Err(dangling(
                "faculty",
                assignment.faculty_id,
                "course assignment",
                assignment.id,
            ));
        }
        let faculty_name = match &faculty {
            Some(faculty) => {
                let faculty_user = store.get_user(faculty.user_id).await?;
                if faculty_user.is_none() && mode == JoinMode::Strict {
                    return Err(dangling("user", faculty.user_id, "faculty", faculty.id));
                }
                faculty_user.map(|u| u.name)
            }
            None => None,
        };

        let attendance = store.attendance_by_enrollment(enrollment.id).await?;
        let grades = store.grades_by_enrollment(enrollment.id).await?;

        enrollments.push(EnrollmentDetail {
            enrollment,
            course,
            faculty,
            faculty_name,
            attendance,
            grades,
            semester: assignment.semester,
            year: assignment.year,
        });
    }

    Ok(Some(StudentDetails {
        student,
        user,
        enrollments,
    }))
}

/// Course plus all its offerings, each enriched with the teaching faculty.
pub async fn course_details(
    store: &dyn Storage,
    id: EntityId,
    mode: JoinMode,
) -> AppResult<Option<CourseDetails>> {
    let Some(course) = store.get_course(id).await? else {
        return Ok(None);
    };

    let mut assignments = Vec::new();
    for assignment in store.assignments_by_course(id).await? {
        let faculty = store.get_faculty(assignment.faculty_id).await?;
        if faculty.is_none() && mode == JoinMode::Strict {
            return Err(dangling(
                "faculty",
                assignment.faculty_id,
                "course assignment",
                assignment.id,
            ));
        }
        let faculty_name = match &faculty {
            Some(faculty) => {
                let faculty_user = store.get_user(faculty.user_id).await?;
                if faculty_user.is_none() && mode == JoinMode::Strict {
                    return Err(dangling("user", faculty.user_id, "faculty", faculty.id));
                }
                faculty_user.map(|u| u.name)
            }
            None => None,
        };
        assignments.push(AssignmentWithFaculty {
            assignment,
            faculty,
            faculty_name,
        });
    }

    Ok(Some(CourseDetails {
        course,
        assignments,
    }))
}

/// Faculty identity plus all offerings they teach, each with its course.
pub async fn faculty_details(
    store: &dyn Storage,
    id: EntityId,
    mode: JoinMode,
) -> AppResult<Option<FacultyDetails>> {
    let Some(faculty) = store.get_faculty(id).await? else {
        return Ok(None);
    };
    let Some(user) = store.get_user(faculty.user_id).await? else {
        return Ok(None);
    };

    let mut assignments = Vec::new();
    for assignment in store.assignments_by_faculty(id).await? {
        let course = store.get_course(assignment.course_id).await?;
        if course.is_none() && mode == JoinMode::Strict {
            return Err(dangling(
                "course",
                assignment.course_id,
                "course assignment",
                assignment.id,
            ));
        }
        assignments.push(AssignmentWithCourse { assignment, course });
    }

    Ok(Some(FacultyDetails {
        faculty,
        user,
        assignments,
    }))
}

/// Events starting after `now`, ascending by start. `now` is a parameter so
/// callers own the clock.
pub async fn upcoming_events(
    store: &dyn Storage,
    now: DateTime<Utc>,
) -> AppResult<Vec<Event>> {
    let mut events: Vec<Event> = store
        .list_events()
        .await?
        .into_iter()
        .filter(|e| e.start_date > now)
        .collect();
    events.sort_by(|a, b| a.start_date.cmp(&b.start_date));
    Ok(events)
}
