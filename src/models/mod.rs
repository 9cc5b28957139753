// Entity model layer - typed rows, write shapes, and composite views

pub mod entities;
pub mod inputs;
pub mod views;

pub use entities::{
    Attendance, AttendanceStatus, Course, CourseAssignment, CourseStatus, Enrollment,
    EnrollmentStatus, Event, EventType, Faculty, Grade, ProfileStatus, Student, User, UserRole,
};
pub use inputs::{
    AttendancePatch, CoursePatch, CourseAssignmentPatch, EnrollmentPatch, EventPatch,
    FacultyPatch, GradePatch, NewAttendance, NewCourse, NewCourseAssignment, NewEnrollment,
    NewEvent, NewFaculty, NewGrade, NewStudent, NewUser, StudentPatch, UserPatch,
};
pub use views::{
    AssignmentWithCourse, AssignmentWithFaculty, CourseDetails, CourseStatistics, DashboardStats,
    EnrollmentDetail, FacultyDetails, PopularCourse, StatusBreakdown, StudentDetails,
};

/// Row identity. Assigned by the store at insert, monotonically increasing
/// per entity type, never reused.
pub type EntityId = i64;
