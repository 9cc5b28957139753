mod common;

use chrono::{TimeZone, Utc};
use common::*;

use registrar::error::AppError;
use registrar::models::*;
use registrar::storage::{
    course_details, faculty_details, student_details, upcoming_events, JoinMode, MemoryStore,
    Storage,
};

/// Student in two offerings, with attendance and grades on the first.
async fn two_course_fixture(store: &MemoryStore) -> (Student, CourseAssignment, CourseAssignment) {
    let faculty = create_faculty_member(store, "evargas", "F-2019-004").await;
    let cs210 = create_course(store, "CS-210", CourseStatus::Active).await;
    let cs301 = create_course(store, "CS-301", CourseStatus::Active).await;
    let a1 = create_assignment(store, cs210.id, faculty.id).await;
    let a2 = create_assignment(store, cs301.id, faculty.id).await;

    let student = create_student(store, "jpark", "S-2023-0114").await;
    let e1 = enroll(store, student.id, a1.id).await;
    enroll(store, student.id, a2.id).await;
    mark_attendance(store, e1.id, AttendanceStatus::Present).await;
    mark_attendance(store, e1.id, AttendanceStatus::Late).await;
    record_grade(store, e1.id, "Problem Set 1").await;

    (student, a1, a2)
}

#[tokio::test]
async fn student_details_assembles_the_nested_view() {
    let store = MemoryStore::new();
    let (student, _, _) = two_course_fixture(&store).await;

    let details = student_details(&store, student.id, JoinMode::Lenient)
        .await
        .unwrap()
        .unwrap();

    assert_eq!(details.student.id, student.id);
    assert_eq!(details.user.username, "jpark");
    assert_eq!(details.enrollments.len(), 2);

    let first = &details.enrollments[0];
    assert_eq!(first.course.code, "CS-210");
    assert_eq!(first.faculty_name.as_deref(), Some("evargas Name"));
    assert_eq!(first.semester, "Fall");
    assert_eq!(first.year, 2024);
    assert_eq!(first.attendance.len(), 2);
    assert_eq!(first.grades.len(), 1);
    assert_eq!(first.grades[0].assignment_name, "Problem Set 1");

    let second = &details.enrollments[1];
    assert_eq!(second.course.code, "CS-301");
    assert!(second.attendance.is_empty());
    assert!(second.grades.is_empty());
}

#[tokio::test]
async fn student_details_absent_when_student_or_user_missing() {
    let store = MemoryStore::new();
    let (student, _, _) = two_course_fixture(&store).await;

    assert!(student_details(&store, 999, JoinMode::Lenient)
        .await
        .unwrap()
        .is_none());

    // The user row backing the student is gone: the whole view is absent.
    store.delete_user(student.user_id).await.unwrap();
    assert!(student_details(&store, student.id, JoinMode::Lenient)
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn dangling_assignment_is_dropped_leniently() {
    let store = MemoryStore::new();
    let (student, a1, _) = two_course_fixture(&store).await;

    // Delete one offering out from under its enrollment. No cascade, so the
    // enrollment row still exists and now dangles.
    store.delete_course_assignment(a1.id).await.unwrap();

    let details = student_details(&store, student.id, JoinMode::Lenient)
        .await
        .unwrap()
        .unwrap();

    assert_eq!(details.enrollments.len(), 1);
    assert_eq!(details.enrollments[0].course.code, "CS-301");
}

#[tokio::test]
async fn dangling_course_is_dropped_leniently() {
    let store = MemoryStore::new();
    let (student, a1, _) = two_course_fixture(&store).await;

    let assignment = store.get_course_assignment(a1.id).await.unwrap().unwrap();
    store.delete_course(assignment.course_id).await.unwrap();

    let details = student_details(&store, student.id, JoinMode::Lenient)
        .await
        .unwrap()
        .unwrap();

    assert_eq!(details.enrollments.len(), 1);
    assert_eq!(details.enrollments[0].course.code, "CS-301");
}

#[tokio::test]
async fn missing_faculty_blanks_enrichment_fields_only() {
    let store = MemoryStore::new();
    let (student, a1, _) = two_course_fixture(&store).await;

    let assignment = store.get_course_assignment(a1.id).await.unwrap().unwrap();
    store.delete_faculty(assignment.faculty_id).await.unwrap();

    let details = student_details(&store, student.id, JoinMode::Lenient)
        .await
        .unwrap()
        .unwrap();

    // Both blocks survive; the one taught by the deleted faculty member
    // just loses its faculty enrichment.
    assert_eq!(details.enrollments.len(), 2);
    let first = &details.enrollments[0];
    assert!(first.faculty.is_none());
    assert!(first.faculty_name.is_none());
}

#[tokio::test]
async fn strict_mode_surfaces_dangling_references() {
    let store = MemoryStore::new();
    let (student, a1, _) = two_course_fixture(&store).await;
    store.delete_course_assignment(a1.id).await.unwrap();

    let err = student_details(&store, student.id, JoinMode::Strict)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn course_details_enriches_offerings_with_faculty() {
    let store = MemoryStore::new();
    let (_, a1, _) = two_course_fixture(&store).await;
    let assignment = store.get_course_assignment(a1.id).await.unwrap().unwrap();

    let details = course_details(&store, assignment.course_id, JoinMode::Lenient)
        .await
        .unwrap()
        .unwrap();

    assert_eq!(details.course.code, "CS-210");
    assert_eq!(details.assignments.len(), 1);
    let offering = &details.assignments[0];
    assert_eq!(offering.assignment.id, a1.id);
    assert_eq!(offering.faculty_name.as_deref(), Some("evargas Name"));

    assert!(course_details(&store, 999, JoinMode::Lenient)
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn faculty_details_enriches_offerings_with_courses() {
    let store = MemoryStore::new();
    two_course_fixture(&store).await;
    let faculty = store.faculty_by_code("F-2019-004").await.unwrap().unwrap();

    let details = faculty_details(&store, faculty.id, JoinMode::Lenient)
        .await
        .unwrap()
        .unwrap();

    assert_eq!(details.user.username, "evargas");
    assert_eq!(details.assignments.len(), 2);
    let codes: Vec<_> = details
        .assignments
        .iter()
        .filter_map(|a| a.course.as_ref().map(|c| c.code.clone()))
        .collect();
    assert_eq!(codes, vec!["CS-210", "CS-301"]);

    // A deleted course leaves its offering listed, without enrichment.
    let cs210 = store.course_by_code("CS-210").await.unwrap().unwrap();
    store.delete_course(cs210.id).await.unwrap();
    let details = faculty_details(&store, faculty.id, JoinMode::Lenient)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(details.assignments.len(), 2);
    assert!(details.assignments[0].course.is_none());
}

#[tokio::test]
async fn upcoming_events_excludes_past_and_sorts_ascending() {
    let store = MemoryStore::new();
    let now = Utc.with_ymd_and_hms(2024, 10, 1, 12, 0, 0).unwrap();

    let make = |title: &str, start| NewEvent {
        title: title.to_string(),
        description: None,
        start_date: start,
        end_date: start + chrono::Duration::hours(2),
        location: None,
        event_type: EventType::Academic,
    };

    let past = Utc.with_ymd_and_hms(2024, 9, 20, 9, 0, 0).unwrap();
    let soon = Utc.with_ymd_and_hms(2024, 10, 3, 9, 0, 0).unwrap();
    let later = Utc.with_ymd_and_hms(2024, 11, 15, 9, 0, 0).unwrap();

    // Inserted out of order on purpose.
    store.create_event(make("later", later)).await.unwrap();
    store.create_event(make("past", past)).await.unwrap();
    store.create_event(make("soon", soon)).await.unwrap();

    let events = upcoming_events(&store, now).await.unwrap();
    let titles: Vec<_> = events.iter().map(|e| e.title.as_str()).collect();
    assert_eq!(titles, vec!["soon", "later"]);
}
