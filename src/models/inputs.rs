// Write shapes: New* rows awaiting an id, and Patch* partial updates.
//
// Patches carry merge semantics: only supplied fields change. Foreign keys
// are fixed at insert and do not appear in patches.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::entities::*;
use super::EntityId;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewUser {
    pub username: String,
    pub password: String,
    pub email: String,
    pub role: UserRole,
    pub name: String,
    pub profile_image: Option<String>,
}

impl NewUser {
    pub fn into_row(self, id: EntityId) -> User {
        User {
            id,
            username: self.username,
            password: self.password,
            email: self.email,
            role: self.role,
            name: self.name,
            profile_image: self.profile_image,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserPatch {
    pub username: Option<String>,
    pub password: Option<String>,
    pub email: Option<String>,
    pub role: Option<UserRole>,
    pub name: Option<String>,
    pub profile_image: Option<String>,
}

impl UserPatch {
    pub fn apply(self, row: &mut User) {
        if let Some(username) = self.username {
            row.username = username;
        }
        if let Some(password) = self.password {
            row.password = password;
        }
        if let Some(email) = self.email {
            row.email = email;
        }
        if let Some(role) = self.role {
            row.role = role;
        }
        if let Some(name) = self.name {
            row.name = name;
        }
        if let Some(profile_image) = self.profile_image {
            row.profile_image = Some(profile_image);
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewStudent {
    pub user_id: EntityId,
    pub student_code: String,
    pub program: String,
    pub year_level: i32,
    pub status: ProfileStatus,
    pub enrollment_date: NaiveDate,
}

impl NewStudent {
    pub fn into_row(self, id: EntityId) -> Student {
        Student {
            id,
            user_id: self.user_id,
            student_code: self.student_code,
            program: self.program,
            year_level: self.year_level,
            status: self.status,
            enrollment_date: self.enrollment_date,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StudentPatch {
    pub student_code: Option<String>,
    pub program: Option<String>,
    pub year_level: Option<i32>,
    pub status: Option<ProfileStatus>,
    pub enrollment_date: Option<NaiveDate>,
}

impl StudentPatch {
    pub fn apply(self, row: &mut Student) {
        if let Some(student_code) = self.student_code {
            row.student_code = student_code;
        }
        if let Some(program) = self.program {
            row.program = program;
        }
        if let Some(year_level) = self.year_level {
            row.year_level = year_level;
        }
        if let Some(status) = self.status {
            row.status = status;
        }
        if let Some(enrollment_date) = self.enrollment_date {
            row.enrollment_date = enrollment_date;
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewFaculty {
    pub user_id: EntityId,
    pub faculty_code: String,
    pub department: String,
    pub position: String,
    pub join_date: NaiveDate,
    pub status: ProfileStatus,
}

impl NewFaculty {
    pub fn into_row(self, id: EntityId) -> Faculty {
        Faculty {
            id,
            user_id: self.user_id,
            faculty_code: self.faculty_code,
            department: self.department,
            position: self.position,
            join_date: self.join_date,
            status: self.status,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FacultyPatch {
    pub faculty_code: Option<String>,
    pub department: Option<String>,
    pub position: Option<String>,
    pub join_date: Option<NaiveDate>,
    pub status: Option<ProfileStatus>,
}

impl FacultyPatch {
    pub fn apply(self, row: &mut Faculty) {
        if let Some(faculty_code) = self.faculty_code {
            row.faculty_code = faculty_code;
        }
        if let Some(department) = self.department {
            row.department = department;
        }
        if let Some(position) = self.position {
            row.position = position;
        }
        if let Some(join_date) = self.join_date {
            row.join_date = join_date;
        }
        if let Some(status) = self.status {
            row.status = status;
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewCourse {
    pub code: String,
    pub title: String,
    pub description: Option<String>,
    pub credits: i32,
    pub department: String,
    pub status: CourseStatus,
}

impl NewCourse {
    pub fn into_row(self, id: EntityId) -> Course {
        Course {
            id,
            code: self.code,
            title: self.title,
            description: self.description,
            credits: self.credits,
            department: self.department,
            status: self.status,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CoursePatch {
    pub code: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub credits: Option<i32>,
    pub department: Option<String>,
    pub status: Option<CourseStatus>,
}

impl CoursePatch {
    pub fn apply(self, row: &mut Course) {
        if let Some(code) = self.code {
            row.code = code;
        }
        if let Some(title) = self.title {
            row.title = title;
        }
        if let Some(description) = self.description {
            row.description = Some(description);
        }
        if let Some(credits) = self.credits {
            row.credits = credits;
        }
        if let Some(department) = self.department {
            row.department = department;
        }
        if let Some(status) = self.status {
            row.status = status;
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewCourseAssignment {
    pub course_id: EntityId,
    pub faculty_id: EntityId,
    pub semester: String,
    pub year: i32,
}

impl NewCourseAssignment {
    pub fn into_row(self, id: EntityId) -> CourseAssignment {
        CourseAssignment {
            id,
            course_id: self.course_id,
            faculty_id: self.faculty_id,
            semester: self.semester,
            year: self.year,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CourseAssignmentPatch {
    pub semester: Option<String>,
    pub year: Option<i32>,
}

impl CourseAssignmentPatch {
    pub fn apply(self, row: &mut CourseAssignment) {
        if let Some(semester) = self.semester {
            row.semester = semester;
        }
        if let Some(year) = self.year {
            row.year = year;
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewEnrollment {
    pub student_id: EntityId,
    pub course_assignment_id: EntityId,
    pub enrollment_date: NaiveDate,
    pub status: EnrollmentStatus,
}

impl NewEnrollment {
    pub fn into_row(self, id: EntityId) -> Enrollment {
        Enrollment {
            id,
            student_id: self.student_id,
            course_assignment_id: self.course_assignment_id,
            enrollment_date: self.enrollment_date,
            status: self.status,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EnrollmentPatch {
    pub enrollment_date: Option<NaiveDate>,
    pub status: Option<EnrollmentStatus>,
}

impl EnrollmentPatch {
    pub fn apply(self, row: &mut Enrollment) {
        if let Some(enrollment_date) = self.enrollment_date {
            row.enrollment_date = enrollment_date;
        }
        if let Some(status) = self.status {
            row.status = status;
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewAttendance {
    pub enrollment_id: EntityId,
    pub date: NaiveDate,
    pub status: AttendanceStatus,
    pub notes: Option<String>,
}

impl NewAttendance {
    pub fn into_row(self, id: EntityId) -> Attendance {
        Attendance {
            id,
            enrollment_id: self.enrollment_id,
            date: self.date,
            status: self.status,
            notes: self.notes,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AttendancePatch {
    pub date: Option<NaiveDate>,
    pub status: Option<AttendanceStatus>,
    pub notes: Option<String>,
}

impl AttendancePatch {
    pub fn apply(self, row: &mut Attendance) {
        if let Some(date) = self.date {
            row.date = date;
        }
        if let Some(status) = self.status {
            row.status = status;
        }
        if let Some(notes) = self.notes {
            row.notes = Some(notes);
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewGrade {
    pub enrollment_id: EntityId,
    pub assignment_name: String,
    pub score: i32,
    pub max_score: i32,
    pub weight: i32,
    pub date: NaiveDate,
}

impl NewGrade {
    pub fn into_row(self, id: EntityId) -> Grade {
        Grade {
            id,
            enrollment_id: self.enrollment_id,
            assignment_name: self.assignment_name,
            score: self.score,
            max_score: self.max_score,
            weight: self.weight,
            date: self.date,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GradePatch {
    pub assignment_name: Option<String>,
    pub score: Option<i32>,
    pub max_score: Option<i32>,
    pub weight: Option<i32>,
    pub date: Option<NaiveDate>,
}

impl GradePatch {
    pub fn apply(self, row: &mut Grade) {
        if let Some(assignment_name) = self.assignment_name {
            row.assignment_name = assignment_name;
        }
        if let Some(score) = self.score {
            row.score = score;
        }
        if let Some(max_score) = self.max_score {
            row.max_score = max_score;
        }
        if let Some(weight) = self.weight {
            row.weight = weight;
        }
        if let Some(date) = self.date {
            row.date = date;
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewEvent {
    pub title: String,
    pub description: Option<String>,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub location: Option<String>,
    pub event_type: EventType,
}

impl NewEvent {
    pub fn into_row(self, id: EntityId) -> Event {
        Event {
            id,
            title: self.title,
            description: self.description,
            start_date: self.start_date,
            end_date: self.end_date,
            location: self.location,
            event_type: self.event_type,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EventPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub location: Option<String>,
    pub event_type: Option<EventType>,
}

impl EventPatch {
    pub fn apply(self, row: &mut Event) {
        if let Some(title) = self.title {
            row.title = title;
        }
        if let Some(description) = self.description {
            row.description = Some(description);
        }
        if let Some(start_date) = self.start_date {
            row.start_date = start_date;
        }
        if let Some(end_date) = self.end_date {
            row.end_date = end_date;
        }
        if let Some(location) = self.location {
            row.location = Some(location);
        }
        if let Some(event_type) = self.event_type {
            row.event_type = event_type;
        }
    }
}
