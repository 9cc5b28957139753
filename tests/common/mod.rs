// Fixture builders shared by the integration tests.
#![allow(dead_code)]

use chrono::NaiveDate;

use registrar::models::*;
use registrar::storage::Storage;

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn new_user(username: &str, role: UserRole) -> NewUser {
    NewUser {
        username: username.to_string(),
        password: "pw".to_string(),
        email: format!("{}@example.edu", username),
        role,
        name: format!("{} Name", username),
        profile_image: None,
    }
}

pub async fn create_student(store: &dyn Storage, username: &str, code: &str) -> Student {
    let user = store
        .create_user(new_user(username, UserRole::Student))
        .await
        .unwrap();
    store
        .create_student(NewStudent {
            user_id: user.id,
            student_code: code.to_string(),
            program: "Computer Science".to_string(),
            year_level: 2,
            status: ProfileStatus::Active,
            enrollment_date: date(2024, 9, 2),
        })
        .await
        .unwrap()
}

pub async fn create_faculty_member(store: &dyn Storage, username: &str, code: &str) -> Faculty {
    let user = store
        .create_user(new_user(username, UserRole::Faculty))
        .await
        .unwrap();
    store
        .create_faculty(NewFaculty {
            user_id: user.id,
            faculty_code: code.to_string(),
            department: "Computer Science".to_string(),
            position: "Professor".to_string(),
            join_date: date(2019, 8, 15),
            status: ProfileStatus::Active,
        })
        .await
        .unwrap()
}

pub async fn create_course(store: &dyn Storage, code: &str, status: CourseStatus) -> Course {
    store
        .create_course(NewCourse {
            code: code.to_string(),
            title: format!("Course {}", code),
            description: None,
            credits: 3,
            department: "Computer Science".to_string(),
            status,
        })
        .await
        .unwrap()
}

pub async fn create_assignment(
    store: &dyn Storage,
    course_id: EntityId,
    faculty_id: EntityId,
) -> CourseAssignment {
    store
        .create_course_assignment(NewCourseAssignment {
            course_id,
            faculty_id,
            semester: "Fall".to_string(),
            year: 2024,
        })
        .await
        .unwrap()
}

pub async fn enroll(
    store: &dyn Storage,
    student_id: EntityId,
    course_assignment_id: EntityId,
) -> Enrollment {
    store
        .create_enrollment(NewEnrollment {
            student_id,
            course_assignment_id,
            enrollment_date: date(2024, 9, 2),
            status: EnrollmentStatus::Enrolled,
        })
        .await
        .unwrap()
}

pub async fn mark_attendance(
    store: &dyn Storage,
    enrollment_id: EntityId,
    status: AttendanceStatus,
) -> Attendance {
    store
        .create_attendance(NewAttendance {
            enrollment_id,
            date: date(2024, 9, 9),
            status,
            notes: None,
        })
        .await
        .unwrap()
}

pub async fn record_grade(
    store: &dyn Storage,
    enrollment_id: EntityId,
    assignment_name: &str,
) -> Grade {
    store
        .create_grade(NewGrade {
            enrollment_id,
            assignment_name: assignment_name.to_string(),
            score: 88,
            max_score: 100,
            weight: 20,
            date: date(2024, 10, 4),
        })
        .await
        .unwrap()
}
