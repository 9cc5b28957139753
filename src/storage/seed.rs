// Fixed demo roster inserted at startup for development.

use chrono::{Duration, NaiveDate, Utc};
use tracing::info;

use crate::error::AppResult;
use crate::models::*;

use super::Storage;

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid seed date")
}

/// Populate an empty store with the demo roster: one admin, two faculty
/// members, three students, four courses with current-term offerings, and
/// enough enrollments, attendance, and grades to light up the dashboard.
/// Goes through the public store operations, so the seed exercises the same
/// constraints as API callers.
pub async fn seed_demo_data(store: &dyn Storage) -> AppResult<()> {
    // (username, password, email, role, name)
    let user_rows = vec![
        (
            "admin",
            "admin123",
            "admin@registrar.edu",
            UserRole::Admin,
            "System Administrator",
        ),
        (
            "evargas",
            "faculty123",
            "elena.vargas@registrar.edu",
            UserRole::Faculty,
            "Elena Vargas",
        ),
        (
            "mosei",
            "faculty123",
            "mark.osei@registrar.edu",
            UserRole::Faculty,
            "Mark Osei",
        ),
        (
            "jpark",
            "student123",
            "june.park@registrar.edu",
            UserRole::Student,
            "June Park",
        ),
        (
            "achen",
            "student123",
            "amy.chen@registrar.edu",
            UserRole::Student,
            "Amy Chen",
        ),
        (
            "rpatel",
            "student123",
            "ravi.patel@registrar.edu",
            UserRole::Student,
            "Ravi Patel",
        ),
    ];

    let mut users = Vec::new();
    for (username, password, email, role, name) in user_rows {
        let user = store
            .create_user(NewUser {
                username: username.to_string(),
                password: password.to_string(),
                email: email.to_string(),
                role,
                name: name.to_string(),
                profile_image: None,
            })
            .await?;
        users.push(user);
    }

    let vargas = store
        .create_faculty(NewFaculty {
            user_id: users[1].id,
            faculty_code: "F-2019-004".to_string(),
            department: "Computer Science".to_string(),
            position: "Associate Professor".to_string(),
            join_date: date(2019, 8, 15),
            status: ProfileStatus::Active,
        })
        .await?;
    let osei = store
        .create_faculty(NewFaculty {
            user_id: users[2].id,
            faculty_code: "F-2021-011".to_string(),
            department: "Mathematics".to_string(),
            position: "Assistant Professor".to_string(),
            join_date: date(2021, 1, 10),
            status: ProfileStatus::Active,
        })
        .await?;

    // (user index, code, program, year level)
    let student_rows = vec![
        (3, "S-2023-0114", "Computer Science", 2),
        (4, "S-2022-0087", "Computer Science", 3),
        (5, "S-2024-0031", "Mathematics", 1),
    ];
    let mut students = Vec::new();
    for (user_idx, code, program, year_level) in student_rows {
        let student = store
            .create_student(NewStudent {
                user_id: users[user_idx].id,
                student_code: code.to_string(),
                program: program.to_string(),
                year_level,
                status: ProfileStatus::Active,
                enrollment_date: date(2024, 9, 2),
            })
            .await?;
        students.push(student);
    }

    // (code, title, credits, department, status)
    let course_rows = vec![
        (
            "CS-210",
            "Data Structures",
            4,
            "Computer Science",
            CourseStatus::Active,
        ),
        (
            "CS-301",
            "Operating Systems",
            4,
            "Computer Science",
            CourseStatus::Active,
        ),
        (
            "MATH-140",
            "Linear Algebra",
            3,
            "Mathematics",
            CourseStatus::Pending,
        ),
        (
            "HIST-101",
            "World History",
            3,
            "History",
            CourseStatus::Archived,
        ),
    ];
    let mut courses = Vec::new();
    for (code, title, credits, department, status) in course_rows {
        let course = store
            .create_course(NewCourse {
                code: code.to_string(),
                title: title.to_string(),
                description: None,
                credits,
                department: department.to_string(),
                status,
            })
            .await?;
        courses.push(course);
    }

    // (course index, faculty id): current-term offerings.
    let assignment_rows = vec![
        (0, vargas.id),
        (1, vargas.id),
        (2, osei.id),
    ];
    let mut assignments = Vec::new();
    for (course_idx, faculty_id) in assignment_rows {
        let assignment = store
            .create_course_assignment(NewCourseAssignment {
                course_id: courses[course_idx].id,
                faculty_id,
                semester: "Fall".to_string(),
                year: 2024,
            })
            .await?;
        assignments.push(assignment);
    }

    // (student index, assignment index)
    let enrollment_rows = vec![(0, 0), (0, 1), (1, 0), (1, 1), (2, 2)];
    let mut enrollments = Vec::new();
    for (student_idx, assignment_idx) in enrollment_rows {
        let enrollment = store
            .create_enrollment(NewEnrollment {
                student_id: students[student_idx].id,
                course_assignment_id: assignments[assignment_idx].id,
                enrollment_date: date(2024, 9, 2),
                status: EnrollmentStatus::Enrolled,
            })
            .await?;
        enrollments.push(enrollment);
    }

    // (enrollment index, day of September 2024, status)
    let attendance_rows = vec![
        (0, 9, AttendanceStatus::Present),
        (0, 11, AttendanceStatus::Present),
        (0, 13, AttendanceStatus::Late),
        (1, 10, AttendanceStatus::Present),
        (1, 12, AttendanceStatus::Absent),
        (2, 9, AttendanceStatus::Present),
        (2, 11, AttendanceStatus::Excused),
        (3, 10, AttendanceStatus::Present),
        (4, 9, AttendanceStatus::Present),
    ];
    for (enrollment_idx, day, status) in attendance_rows {
        store
            .create_attendance(NewAttendance {
                enrollment_id: enrollments[enrollment_idx].id,
                date: date(2024, 9, day),
                status,
                notes: None,
            })
            .await?;
    }

    // (enrollment index, assignment name, score, max, weight)
    let grade_rows = vec![
        (0, "Problem Set 1", 88, 100, 10),
        (0, "Midterm", 79, 100, 30),
        (1, "Lab 1", 95, 100, 15),
        (2, "Problem Set 1", 91, 100, 10),
        (3, "Lab 1", 82, 100, 15),
        (4, "Quiz 1", 17, 20, 5),
    ];
    for (enrollment_idx, name, score, max_score, weight) in grade_rows {
        store
            .create_grade(NewGrade {
                enrollment_id: enrollments[enrollment_idx].id,
                assignment_name: name.to_string(),
                score,
                max_score,
                weight,
                date: date(2024, 10, 4),
            })
            .await?;
    }

    // Calendar entries relative to startup so the upcoming feed has rows.
    let now = Utc::now();
    let event_rows = vec![
        (
            "Fall Orientation",
            EventType::Academic,
            now - Duration::days(30),
            now - Duration::days(30) + Duration::hours(4),
        ),
        (
            "Midterm Week",
            EventType::Academic,
            now + Duration::days(7),
            now + Duration::days(12),
        ),
        (
            "Faculty Senate",
            EventType::Administrative,
            now + Duration::days(3),
            now + Duration::days(3) + Duration::hours(2),
        ),
        (
            "Chess Club Open Night",
            EventType::Extracurricular,
            now + Duration::days(14),
            now + Duration::days(14) + Duration::hours(3),
        ),
    ];
    for (title, event_type, start_date, end_date) in event_rows {
        store
            .create_event(NewEvent {
                title: title.to_string(),
                description: None,
                start_date,
                end_date,
                location: Some("Main Campus".to_string()),
                event_type,
            })
            .await?;
    }

    info!(
        "Seeded demo roster: {} users, {} students, {} courses",
        users.len(),
        students.len(),
        courses.len()
    );
    Ok(())
}
