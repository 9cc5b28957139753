// The nine entity row types held by the store.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::EntityId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    Admin,
    Faculty,
    Student,
}

/// Root identity for every person in the system.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: EntityId,
    pub username: String,
    /// Plaintext, compared exactly at login. Never serialized outward.
    #[serde(skip_serializing)]
    pub password: String,
    pub email: String,
    pub role: UserRole,
    pub name: String,
    pub profile_image: Option<String>,
}

/// Shared by student and faculty profiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProfileStatus {
    Active,
    Inactive,
    OnLeave,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Student {
    pub id: EntityId,
    pub user_id: EntityId,
    /// Registrar-issued code, e.g. "S-2023-0114". Unique.
    pub student_code: String,
    pub program: String,
    pub year_level: i32,
    pub status: ProfileStatus,
    pub enrollment_date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Faculty {
    pub id: EntityId,
    pub user_id: EntityId,
    /// Registrar-issued code, e.g. "F-2019-007". Unique.
    pub faculty_code: String,
    pub department: String,
    pub position: String,
    pub join_date: NaiveDate,
    pub status: ProfileStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CourseStatus {
    Active,
    Pending,
    Archived,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Course {
    pub id: EntityId,
    /// Catalog code, e.g. "CS-301". Unique.
    pub code: String,
    pub title: String,
    pub description: Option<String>,
    pub credits: i32,
    pub department: String,
    pub status: CourseStatus,
}

/// One offering of a course: taught by one faculty member in one term.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CourseAssignment {
    pub id: EntityId,
    pub course_id: EntityId,
    pub faculty_id: EntityId,
    pub semester: String,
    pub year: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnrollmentStatus {
    Enrolled,
    Dropped,
    Completed,
}

/// A student's registration in one term-offering of a course.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enrollment {
    pub id: EntityId,
    pub student_id: EntityId,
    pub course_assignment_id: EntityId,
    pub enrollment_date: NaiveDate,
    pub status: EnrollmentStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttendanceStatus {
    Present,
    Absent,
    Late,
    Excused,
}

impl AttendanceStatus {
    /// Present and late both count toward the attendance rate.
    pub fn counts_as_attended(self) -> bool {
        matches!(self, AttendanceStatus::Present | AttendanceStatus::Late)
    }
}

/// One record per class session per enrollment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attendance {
    pub id: EntityId,
    pub enrollment_id: EntityId,
    pub date: NaiveDate,
    pub status: AttendanceStatus,
    pub notes: Option<String>,
}

/// One record per graded item per enrollment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Grade {
    pub id: EntityId,
    pub enrollment_id: EntityId,
    pub assignment_name: String,
    pub score: i32,
    pub max_score: i32,
    /// Percent weight of the final mark.
    pub weight: i32,
    pub date: NaiveDate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    Academic,
    Administrative,
    Extracurricular,
}

/// Calendar entry, independent of the academic entities.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: EntityId,
    pub title: String,
    pub description: Option<String>,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub location: Option<String>,
    pub event_type: EventType,
}
