// In-memory backend: nine tables behind a single lock.

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::{AppError, AppResult};
use crate::models::*;

use super::table::Table;
use super::Storage;

/// Volatile store. All tables share one `RwLock` so every single-entity
/// operation is atomic; identity counters reset with the process.
///
/// Deletes do not cascade. A deleted row leaves dangling foreign keys in
/// its dependents, which the join operations tolerate (see `joins`).
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

#[derive(Default)]
struct Tables {
    users: Table<User>,
    students: Table<Student>,
    faculty: Table<Faculty>,
    courses: Table<Course>,
    course_assignments: Table<CourseAssignment>,
    enrollments: Table<Enrollment>,
    attendance: Table<Attendance>,
    grades: Table<Grade>,
    events: Table<Event>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            tables: RwLock::new(Tables::default()),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Storage for MemoryStore {
    // Users

    async fn create_user(&self, new: NewUser) -> AppResult<User> {
        let mut t = self.tables.write().await;
        if t.users
            .iter()
            .any(|u| u.username.eq_ignore_ascii_case(&new.username))
        {
            return Err(AppError::Conflict(format!(
                "username '{}' is already taken",
                new.username
            )));
        }
        Ok(t.users.insert(|id| new.into_row(id)))
    }

    async fn get_user(&self, id: EntityId) -> AppResult<Option<User>> {
        Ok(self.tables.read().await.users.get(id))
    }

    async fn update_user(&self, id: EntityId, patch: UserPatch) -> AppResult<Option<User>> {
        let mut t = self.tables.write().await;
        if let Some(username) = &patch.username {
            if t.users
                .iter()
                .any(|u| u.id != id && u.username.eq_ignore_ascii_case(username))
            {
                return Err(AppError::Conflict(format!(
                    "username '{}' is already taken",
                    username
                )));
            }
        }
        Ok(t.users.update(id, |row| patch.apply(row)))
    }

    async fn delete_user(&self, id: EntityId) -> AppResult<bool> {
        Ok(self.tables.write().await.users.delete(id))
    }

    async fn list_users(&self) -> AppResult<Vec<User>> {
        Ok(self.tables.read().await.users.list())
    }

    // Students

    async fn create_student(&self, new: NewStudent) -> AppResult<Student> {
        let mut t = self.tables.write().await;
        if t.users.get(new.user_id).is_none() {
            return Err(AppError::Validation(format!(
                "user {} does not exist",
                new.user_id
            )));
        }
        if t.students
            .iter()
            .any(|s| s.student_code == new.student_code)
        {
            return Err(AppError::Conflict(format!(
                "student code '{}' is already taken",
                new.student_code
            )));
        }
        Ok(t.students.insert(|id| new.into_row(id)))
    }

    async fn get_student(&self, id: EntityId) -> AppResult<Option<Student>> {
        Ok(self.tables.read().await.students.get(id))
    }

    async fn update_student(
        &self,
        id: EntityId,
        patch: StudentPatch,
    ) -> AppResult<Option<Student>> {
        let mut t = self.tables.write().await;
        if let Some(code) = &patch.student_code {
            if t.students
                .iter()
                .any(|s| s.id != id && s.student_code == *code)
            {
                return Err(AppError::Conflict(format!(
                    "student code '{}' is already taken",
                    code
                )));
            }
        }
        Ok(t.students.update(id, |row| patch.apply(row)))
    }

    async fn delete_student(&self, id: EntityId) -> AppResult<bool> {
        Ok(self.tables.write().await.students.delete(id))
    }

    async fn list_students(&self) -> AppResult<Vec<Student>> {
        Ok(self.tables.read().await.students.list())
    }

    // Faculty

    async fn create_faculty(&self, new: NewFaculty) -> AppResult<Faculty> {
        let mut t = self.tables.write().await;
        if t.users.get(new.user_id).is_none() {
            return Err(AppError::Validation(format!(
                "user {} does not exist",
                new.user_id
            )));
        }
        if t.faculty
            .iter()
            .any(|f| f.faculty_code == new.faculty_code)
        {
            return Err(AppError::Conflict(format!(
                "faculty code '{}' is already taken",
                new.faculty_code
            )));
        }
        Ok(t.faculty.insert(|id| new.into_row(id)))
    }

    async fn get_faculty(&self, id: EntityId) -> AppResult<Option<Faculty>> {
        Ok(self.tables.read().await.faculty.get(id))
    }

    async fn update_faculty(
        &self,
        id: EntityId,
        patch: FacultyPatch,
    ) -> AppResult<Option<Faculty>> {
        let mut t = self.tables.write().await;
        if let Some(code) = &patch.faculty_code {
            if t.faculty
                .iter()
                .any(|f| f.id != id && f.faculty_code == *code)
            {
                return Err(AppError::Conflict(format!(
                    "faculty code '{}' is already taken",
                    code
                )));
            }
        }
        Ok(t.faculty.update(id, |row| patch.apply(row)))
    }

    async fn delete_faculty(&self, id: EntityId) -> AppResult<bool> {
        Ok(self.tables.write().await.faculty.delete(id))
    }

    async fn list_faculty(&self) -> AppResult<Vec<Faculty>> {
        Ok(self.tables.read().await.faculty.list())
    }

    // Courses

    async fn create_course(&self, new: NewCourse) -> AppResult<Course> {
        let mut t = self.tables.write().await;
        if t.courses.iter().any(|c| c.code == new.code) {
            return Err(AppError::Conflict(format!(
                "course code '{}' is already taken",
                new.code
            )));
        }
        Ok(t.courses.insert(|id| new.into_row(id)))
    }

    async fn get_course(&self, id: EntityId) -> AppResult<Option<Course>> {
        Ok(self.tables.read().await.courses.get(id))
    }

    async fn update_course(&self, id: EntityId, patch: CoursePatch) -> AppResult<Option<Course>> {
        let mut t = self.tables.write().await;
        if let Some(code) = &patch.code {
            if t.courses.iter().any(|c| c.id != id && c.code == *code) {
                return Err(AppError::Conflict(format!(
                    "course code '{}' is already taken",
                    code
                )));
            }
        }
        Ok(t.courses.update(id, |row| patch.apply(row)))
    }

    async fn delete_course(&self, id: EntityId) -> AppResult<bool> {
        Ok(self.tables.write().await.courses.delete(id))
    }

    async fn list_courses(&self) -> AppResult<Vec<Course>> {
        Ok(self.tables.read().await.courses.list())
    }

    // Course assignments

    async fn create_course_assignment(
        &self,
        new: NewCourseAssignment,
    ) -> AppResult<CourseAssignment> {
        let mut t = self.tables.write().await;
        if t.courses.get(new.course_id).is_none() {
            return Err(AppError::Validation(format!(
                "course {} does not exist",
                new.course_id
            )));
        }
        if t.faculty.get(new.faculty_id).is_none() {
            return Err(AppError::Validation(format!(
                "faculty {} does not exist",
                new.faculty_id
            )));
        }
        Ok(t.course_assignments.insert(|id| new.into_row(id)))
    }

    async fn get_course_assignment(&self, id: EntityId) -> AppResult<Option<CourseAssignment>> {
        Ok(self.tables.read().await.course_assignments.get(id))
    }

    async fn update_course_assignment(
        &self,
        id: EntityId,
        patch: CourseAssignmentPatch,
    ) -> AppResult<Option<CourseAssignment>> {
        let mut t = self.tables.write().await;
        Ok(t.course_assignments.update(id, |row| patch.apply(row)))
    }

    async fn delete_course_assignment(&self, id: EntityId) -> AppResult<bool> {
        Ok(self.tables.write().await.course_assignments.delete(id))
    }

    async fn list_course_assignments(&self) -> AppResult<Vec<CourseAssignment>> {
        Ok(self.tables.read().await.course_assignments.list())
    }

    // Enrollments

    async fn create_enrollment(&self, new: NewEnrollment) -> AppResult<Enrollment> {
        let mut t = self.tables.write().await;
        if t.students.get(new.student_id).is_none() {
            return Err(AppError::Validation(format!(
                "student {} does not exist",
                new.student_id
            )));
        }
        if t.course_assignments.get(new.course_assignment_id).is_none() {
            return Err(AppError::Validation(format!(
                "course assignment {} does not exist",
                new.course_assignment_id
            )));
        }
        Ok(t.enrollments.insert(|id| new.into_row(id)))
    }

    async fn get_enrollment(&self, id: EntityId) -> AppResult<Option<Enrollment>> {
        Ok(self.tables.read().await.enrollments.get(id))
    }

    async fn update_enrollment(
        &self,
        id: EntityId,
        patch: EnrollmentPatch,
    ) -> AppResult<Option<Enrollment>> {
        let mut t = self.tables.write().await;
        Ok(t.enrollments.update(id, |row| patch.apply(row)))
    }

    async fn delete_enrollment(&self, id: EntityId) -> AppResult<bool> {
        Ok(self.tables.write().await.enrollments.delete(id))
    }

    async fn list_enrollments(&self) -> AppResult<Vec<Enrollment>> {
        Ok(self.tables.read().await.enrollments.list())
    }

    // Attendance

    async fn create_attendance(&self, new: NewAttendance) -> AppResult<Attendance> {
        let mut t = self.tables.write().await;
        if t.enrollments.get(new.enrollment_id).is_none() {
            return Err(AppError::Validation(format!(
                "enrollment {} does not exist",
                new.enrollment_id
            )));
        }
        Ok(t.attendance.insert(|id| new.into_row(id)))
    }

    async fn get_attendance(&self, id: EntityId) -> AppResult<Option<Attendance>> {
        Ok(self.tables.read().await.attendance.get(id))
    }

    async fn update_attendance(
        &self,
        id: EntityId,
        patch: AttendancePatch,
    ) -> AppResult<Option<Attendance>> {
        let mut t = self.tables.write().await;
        Ok(t.attendance.update(id, |row| patch.apply(row)))
    }

    async fn delete_attendance(&self, id: EntityId) -> AppResult<bool> {
        Ok(self.tables.write().await.attendance.delete(id))
    }

    async fn list_attendance(&self) -> AppResult<Vec<Attendance>> {
        Ok(self.tables.read().await.attendance.list())
    }

    // Grades

    async fn create_grade(&self, new: NewGrade) -> AppResult<Grade> {
        let mut t = self.tables.write().await;
        if t.enrollments.get(new.enrollment_id).is_none() {
            return Err(AppError::Validation(format!(
                "enrollment {} does not exist",
                new.enrollment_id
            )));
        }
        Ok(t.grades.insert(|id| new.into_row(id)))
    }

    async fn get_grade(&self, id: EntityId) -> AppResult<Option<Grade>> {
        Ok(self.tables.read().await.grades.get(id))
    }

    async fn update_grade(&self, id: EntityId, patch: GradePatch) -> AppResult<Option<Grade>> {
        let mut t = self.tables.write().await;
        Ok(t.grades.update(id, |row| patch.apply(row)))
    }

    async fn delete_grade(&self, id: EntityId) -> AppResult<bool> {
        Ok(self.tables.write().await.grades.delete(id))
    }

    async fn list_grades(&self) -> AppResult<Vec<Grade>> {
        Ok(self.tables.read().await.grades.list())
    }

    // Events

    async fn create_event(&self, new: NewEvent) -> AppResult<Event> {
        let mut t = self.tables.write().await;
        Ok(t.events.insert(|id| new.into_row(id)))
    }

    async fn get_event(&self, id: EntityId) -> AppResult<Option<Event>> {
        Ok(self.tables.read().await.events.get(id))
    }

    async fn update_event(&self, id: EntityId, patch: EventPatch) -> AppResult<Option<Event>> {
        let mut t = self.tables.write().await;
        Ok(t.events.update(id, |row| patch.apply(row)))
    }

    async fn delete_event(&self, id: EntityId) -> AppResult<bool> {
        Ok(self.tables.write().await.events.delete(id))
    }

    async fn list_events(&self) -> AppResult<Vec<Event>> {
        Ok(self.tables.read().await.events.list())
    }
}
