mod common;

use common::*;
use registrar::models::*;
use registrar::storage::{MemoryStore, Storage};

#[tokio::test]
async fn username_lookup_is_case_insensitive() {
    let store = MemoryStore::new();
    let created = store
        .create_user(new_user("Admin", UserRole::Admin))
        .await
        .unwrap();

    let found = store.user_by_username("admin").await.unwrap().unwrap();
    assert_eq!(found.id, created.id);
    let found = store.user_by_username("ADMIN").await.unwrap().unwrap();
    assert_eq!(found.id, created.id);

    assert!(store.user_by_username("nobody").await.unwrap().is_none());
}

#[tokio::test]
async fn credential_check_matches_exact_password_only() {
    let store = MemoryStore::new();
    store
        .create_user(NewUser {
            username: "admin".to_string(),
            password: "admin123".to_string(),
            email: "admin@example.edu".to_string(),
            role: UserRole::Admin,
            name: "Admin".to_string(),
            profile_image: None,
        })
        .await
        .unwrap();

    let found = store
        .user_by_credentials("admin", "admin123")
        .await
        .unwrap();
    assert!(found.is_some());

    // Username is case-insensitive; the password is not.
    let found = store
        .user_by_credentials("ADMIN", "admin123")
        .await
        .unwrap();
    assert!(found.is_some());
    let found = store
        .user_by_credentials("admin", "Admin123")
        .await
        .unwrap();
    assert!(found.is_none());
    let found = store.user_by_credentials("admin", "wrong").await.unwrap();
    assert!(found.is_none());
}

#[tokio::test]
async fn code_and_user_lookups_resolve_profiles() {
    let store = MemoryStore::new();
    let student = create_student(&store, "jpark", "S-2023-0114").await;
    let faculty = create_faculty_member(&store, "evargas", "F-2019-004").await;
    let course = create_course(&store, "CS-210", CourseStatus::Active).await;

    let by_code = store.student_by_code("S-2023-0114").await.unwrap().unwrap();
    assert_eq!(by_code.id, student.id);
    let by_user = store.student_by_user(student.user_id).await.unwrap().unwrap();
    assert_eq!(by_user.id, student.id);

    let by_code = store.faculty_by_code("F-2019-004").await.unwrap().unwrap();
    assert_eq!(by_code.id, faculty.id);
    let by_user = store.faculty_by_user(faculty.user_id).await.unwrap().unwrap();
    assert_eq!(by_user.id, faculty.id);

    let by_code = store.course_by_code("CS-210").await.unwrap().unwrap();
    assert_eq!(by_code.id, course.id);

    assert!(store.student_by_code("S-9999").await.unwrap().is_none());
    assert!(store.course_by_code("cs-210").await.unwrap().is_none());
}

#[tokio::test]
async fn relationship_queries_filter_by_foreign_key() {
    let store = MemoryStore::new();
    let faculty = create_faculty_member(&store, "evargas", "F-2019-004").await;
    let cs210 = create_course(&store, "CS-210", CourseStatus::Active).await;
    let cs301 = create_course(&store, "CS-301", CourseStatus::Active).await;
    let a1 = create_assignment(&store, cs210.id, faculty.id).await;
    let a2 = create_assignment(&store, cs301.id, faculty.id).await;

    let s1 = create_student(&store, "jpark", "S-001").await;
    let s2 = create_student(&store, "achen", "S-002").await;
    let e1 = enroll(&store, s1.id, a1.id).await;
    let e2 = enroll(&store, s1.id, a2.id).await;
    let e3 = enroll(&store, s2.id, a1.id).await;

    mark_attendance(&store, e1.id, AttendanceStatus::Present).await;
    mark_attendance(&store, e1.id, AttendanceStatus::Absent).await;
    mark_attendance(&store, e3.id, AttendanceStatus::Late).await;
    record_grade(&store, e1.id, "Problem Set 1").await;
    record_grade(&store, e2.id, "Lab 1").await;

    let by_course: Vec<_> = store
        .assignments_by_course(cs210.id)
        .await
        .unwrap()
        .iter()
        .map(|a| a.id)
        .collect();
    assert_eq!(by_course, vec![a1.id]);

    let by_faculty = store.assignments_by_faculty(faculty.id).await.unwrap();
    assert_eq!(by_faculty.len(), 2);

    let of_student: Vec<_> = store
        .enrollments_by_student(s1.id)
        .await
        .unwrap()
        .iter()
        .map(|e| e.id)
        .collect();
    assert_eq!(of_student, vec![e1.id, e2.id]);

    let of_assignment: Vec<_> = store
        .enrollments_by_assignment(a1.id)
        .await
        .unwrap()
        .iter()
        .map(|e| e.id)
        .collect();
    assert_eq!(of_assignment, vec![e1.id, e3.id]);

    assert_eq!(store.attendance_by_enrollment(e1.id).await.unwrap().len(), 2);
    assert_eq!(store.attendance_by_enrollment(e2.id).await.unwrap().len(), 0);
    assert_eq!(store.grades_by_enrollment(e1.id).await.unwrap().len(), 1);
    assert_eq!(store.grades_by_enrollment(e3.id).await.unwrap().len(), 0);
}
