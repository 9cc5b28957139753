// Storage layer - the store's public contract, its in-memory backend, and
// the join/aggregation operations written against the contract.

pub mod joins;
pub mod memory;
pub mod seed;
pub mod stats;
pub mod table;

pub use joins::{course_details, faculty_details, student_details, upcoming_events, JoinMode};
pub use memory::MemoryStore;
pub use seed::seed_demo_data;
pub use stats::dashboard_stats;
pub use table::Table;

use async_trait::async_trait;

use crate::error::AppResult;
use crate::models::*;

/// The store's boundary, consumed by the HTTP layer and the join/statistics
/// operations. Async so a durable backend can satisfy the same contract;
/// the in-memory implementation never suspends.
///
/// Expected absence is `Ok(None)` (or `Ok(false)` for deletes) - never an
/// error. Errors are reserved for constraint violations: inserting a
/// duplicate unique key (`Conflict`) or a child row whose parent does not
/// exist (`Validation`).
#[async_trait]
pub trait Storage: Send + Sync {
    // Users
    async fn create_user(&self, new: NewUser) -> AppResult<User>;
    async fn get_user(&self, id: EntityId) -> AppResult<Option<User>>;
    async fn update_user(&self, id: EntityId, patch: UserPatch) -> AppResult<Option<User>>;
    async fn delete_user(&self, id: EntityId) -> AppResult<bool>;
    async fn list_users(&self) -> AppResult<Vec<User>>;

    // Students
    async fn create_student(&self, new: NewStudent) -> AppResult<Student>;
    async fn get_student(&self, id: EntityId) -> AppResult<Option<Student>>;
    async fn update_student(&self, id: EntityId, patch: StudentPatch)
        -> AppResult<Option<Student>>;
    async fn delete_student(&self, id: EntityId) -> AppResult<bool>;
    async fn list_students(&self) -> AppResult<Vec<Student>>;

    // Faculty
    async fn create_faculty(&self, new: NewFaculty) -> AppResult<Faculty>;
    async fn get_faculty(&self, id: EntityId) -> AppResult<Option<Faculty>>;
    async fn update_faculty(&self, id: EntityId, patch: FacultyPatch)
        -> AppResult<Option<Faculty>>;
    async fn delete_faculty(&self, id: EntityId) -> AppResult<bool>;
    async fn list_faculty(&self) -> AppResult<Vec<Faculty>>;

    // Courses
    async fn create_course(&self, new: NewCourse) -> AppResult<Course>;
    async fn get_course(&self, id: EntityId) -> AppResult<Option<Course>>;
    async fn update_course(&self, id: EntityId, patch: CoursePatch) -> AppResult<Option<Course>>;
    async fn delete_course(&self, id: EntityId) -> AppResult<bool>;
    async fn list_courses(&self) -> AppResult<Vec<Course>>;

    // Course assignments
    async fn create_course_assignment(
        &self,
        new: NewCourseAssignment,
    ) -> AppResult<CourseAssignment>;
    async fn get_course_assignment(&self, id: EntityId) -> AppResult<Option<CourseAssignment>>;
    async fn update_course_assignment(
        &self,
        id: EntityId,
        patch: CourseAssignmentPatch,
    ) -> AppResult<Option<CourseAssignment>>;
    async fn delete_course_assignment(&self, id: EntityId) -> AppResult<bool>;
    async fn list_course_assignments(&self) -> AppResult<Vec<CourseAssignment>>;

    // Enrollments
    async fn create_enrollment(&self, new: NewEnrollment) -> AppResult<Enrollment>;
    async fn get_enrollment(&self, id: EntityId) -> AppResult<Option<Enrollment>>;
    async fn update_enrollment(
        &self,
        id: EntityId,
        patch: EnrollmentPatch,
    ) -> AppResult<Option<Enrollment>>;
    async fn delete_enrollment(&self, id: EntityId) -> AppResult<bool>;
    async fn list_enrollments(&self) -> AppResult<Vec<Enrollment>>;

    // Attendance
    async fn create_attendance(&self, new: NewAttendance) -> AppResult<Attendance>;
    async fn get_attendance(&self, id: EntityId) -> AppResult<Option<Attendance>>;
    async fn update_attendance(
        &self,
        id: EntityId,
        patch: AttendancePatch,
    ) -> AppResult<Option<Attendance>>;
    async fn delete_attendance(&self, id: EntityId) -> AppResult<bool>;
    async fn list_attendance(&self) -> AppResult<Vec<Attendance>>;

    // Grades
    async fn create_grade(&self, new: NewGrade) -> AppResult<Grade>;
    async fn get_grade(&self, id: EntityId) -> AppResult<Option<Grade>>;
    async fn update_grade(&self, id: EntityId, patch: GradePatch) -> AppResult<Option<Grade>>;
    async fn delete_grade(&self, id: EntityId) -> AppResult<bool>;
    async fn list_grades(&self) -> AppResult<Vec<Grade>>;

    // Events
    async fn create_event(&self, new: NewEvent) -> AppResult<Event>;
    async fn get_event(&self, id: EntityId) -> AppResult<Option<Event>>;
    async fn update_event(&self, id: EntityId, patch: EventPatch) -> AppResult<Option<Event>>;
    async fn delete_event(&self, id: EntityId) -> AppResult<bool>;
    async fn list_events(&self) -> AppResult<Vec<Event>>;

    // Secondary-key lookups and relationship queries. Default
    // implementations scan the full row set, so every backend gets them for
    // free; a backend with real indexes can override.

    /// Case-insensitive username match; first hit wins.
    async fn user_by_username(&self, username: &str) -> AppResult<Option<User>> {
        Ok(self
            .list_users()
            .await?
            .into_iter()
            .find(|u| u.username.eq_ignore_ascii_case(username)))
    }

    /// Case-insensitive username match plus exact password comparison.
    /// `None` on any mismatch; the caller maps that to an auth failure.
    async fn user_by_credentials(&self, username: &str, password: &str) -> AppResult<Option<User>> {
        Ok(self
            .list_users()
            .await?
            .into_iter()
            .find(|u| u.username.eq_ignore_ascii_case(username) && u.password == password))
    }

    async fn student_by_code(&self, student_code: &str) -> AppResult<Option<Student>> {
        Ok(self
            .list_students()
            .await?
            .into_iter()
            .find(|s| s.student_code == student_code))
    }

    async fn student_by_user(&self, user_id: EntityId) -> AppResult<Option<Student>> {
        Ok(self
            .list_students()
            .await?
            .into_iter()
            .find(|s| s.user_id == user_id))
    }

    async fn faculty_by_code(&self, faculty_code: &str) -> AppResult<Option<Faculty>> {
        Ok(self
            .list_faculty()
            .await?
            .into_iter()
            .find(|f| f.faculty_code == faculty_code))
    }

    async fn faculty_by_user(&self, user_id: EntityId) -> AppResult<Option<Faculty>> {
        Ok(self
            .list_faculty()
            .await?
            .into_iter()
            .find(|f| f.user_id == user_id))
    }

    async fn course_by_code(&self, code: &str) -> AppResult<Option<Course>> {
        Ok(self
            .list_courses()
            .await?
            .into_iter()
            .find(|c| c.code == code))
    }

    async fn assignments_by_course(
        &self,
        course_id: EntityId,
    ) -> AppResult<Vec<CourseAssignment>> {
        Ok(self
            .list_course_assignments()
            .await?
            .into_iter()
            .filter(|a| a.course_id == course_id)
            .collect())
    }

    async fn assignments_by_faculty(
        &self,
        faculty_id: EntityId,
    ) -> AppResult<Vec<CourseAssignment>> {
        Ok(self
            .list_course_assignments()
            .await?
            .into_iter()
            .filter(|a| a.faculty_id == faculty_id)
            .collect())
    }

    async fn enrollments_by_student(&self, student_id: EntityId) -> AppResult<Vec<Enrollment>> {
        Ok(self
            .list_enrollments()
            .await?
            .into_iter()
            .filter(|e| e.student_id == student_id)
            .collect())
    }

    async fn enrollments_by_assignment(
        &self,
        course_assignment_id: EntityId,
    ) -> AppResult<Vec<Enrollment>> {
        Ok(self
            .list_enrollments()
            .await?
            .into_iter()
            .filter(|e| e.course_assignment_id == course_assignment_id)
            .collect())
    }

    async fn attendance_by_enrollment(
        &self,
        enrollment_id: EntityId,
    ) -> AppResult<Vec<Attendance>> {
        Ok(self
            .list_attendance()
            .await?
            .into_iter()
            .filter(|a| a.enrollment_id == enrollment_id)
            .collect())
    }

    async fn grades_by_enrollment(&self, enrollment_id: EntityId) -> AppResult<Vec<Grade>> {
        Ok(self
            .list_grades()
            .await?
            .into_iter()
            .filter(|g| g.enrollment_id == enrollment_id)
            .collect())
    }
}
