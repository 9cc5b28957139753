// Composite views assembled by walking foreign keys, and the dashboard
// aggregates. Faculty fields are optional wherever the referenced row may
// have been deleted out from under the view.

use serde::{Deserialize, Serialize};

use super::entities::*;
use super::EntityId;

/// Full picture of one student: identity plus every enrollment, each
/// resolved through its offering to the course, the teaching faculty, and
/// the attendance/grade rows recorded against it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudentDetails {
    pub student: Student,
    pub user: User,
    pub enrollments: Vec<EnrollmentDetail>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnrollmentDetail {
    pub enrollment: Enrollment,
    pub course: Course,
    pub faculty: Option<Faculty>,
    pub faculty_name: Option<String>,
    pub attendance: Vec<Attendance>,
    pub grades: Vec<Grade>,
    pub semester: String,
    pub year: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CourseDetails {
    pub course: Course,
    pub assignments: Vec<AssignmentWithFaculty>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssignmentWithFaculty {
    pub assignment: CourseAssignment,
    pub faculty: Option<Faculty>,
    pub faculty_name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FacultyDetails {
    pub faculty: Faculty,
    pub user: User,
    pub assignments: Vec<AssignmentWithCourse>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssignmentWithCourse {
    pub assignment: CourseAssignment,
    pub course: Option<Course>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardStats {
    pub total_students: usize,
    pub total_faculty: usize,
    pub total_courses: usize,
    pub active_courses: usize,
    /// Percent of attendance rows marked present or late, one decimal.
    /// 0.0 when no attendance has been recorded.
    pub attendance_rate: f64,
    pub course_statistics: CourseStatistics,
    pub popular_courses: Vec<PopularCourse>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CourseStatistics {
    pub active: StatusBreakdown,
    pub pending: StatusBreakdown,
    pub archived: StatusBreakdown,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusBreakdown {
    pub count: usize,
    /// Percent of all courses, one decimal. 0.0 when there are no courses.
    pub percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PopularCourse {
    pub id: EntityId,
    pub code: String,
    pub title: String,
    /// Enrollments summed across every offering of the course.
    pub student_count: usize,
}
