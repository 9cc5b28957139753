// Dashboard aggregates, computed from full scans.
//
// O(courses x assignments x enrollments) plus O(attendance) - fine at the
// tens-to-hundreds-of-rows scale this store serves. A backend with real
// indexes would override the relationship queries this leans on.

use crate::error::AppResult;
use crate::models::*;

use super::Storage;

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

fn breakdown(count: usize, total: usize) -> StatusBreakdown {
    let percentage = if total == 0 {
        0.0
    } else {
        round1(count as f64 / total as f64 * 100.0)
    };
    StatusBreakdown { count, percentage }
}

pub async fn dashboard_stats(store: &dyn Storage) -> AppResult<DashboardStats> {
    let students = store.list_students().await?;
    let faculty = store.list_faculty().await?;
    let courses = store.list_courses().await?;
    let attendance = store.list_attendance().await?;

    let total_courses = courses.len();
    let count_status =
        |status: CourseStatus| courses.iter().filter(|c| c.status == status).count();

    let attended = attendance
        .iter()
        .filter(|a| a.status.counts_as_attended())
        .count();
    let attendance_rate = if attendance.is_empty() {
        0.0
    } else {
        round1(attended as f64 / attendance.len() as f64 * 100.0)
    };

    // Enrollment totals per course, summed across every offering. Courses
    // arrive in insertion order and the sort is stable, so ties keep it.
    let mut popular_courses = Vec::with_capacity(total_courses);
    for course in &courses {
        let mut student_count = 0;
        for assignment in store.assignments_by_course(course.id).await? {
            student_count += store.enrollments_by_assignment(assignment.id).await?.len();
        }
        popular_courses.push(PopularCourse {
            id: course.id,
            code: course.code.clone(),
            title: course.title.clone(),
            student_count,
        });
    }
    popular_courses.sort_by(|a, b| b.student_count.cmp(&a.student_count));
    popular_courses.truncate(3);

    Ok(DashboardStats {
        total_students: students.len(),
        total_faculty: faculty.len(),
        total_courses,
        active_courses: count_status(CourseStatus::Active),
        attendance_rate,
        course_statistics: CourseStatistics {
            active: breakdown(count_status(CourseStatus::Active), total_courses),
            pending: breakdown(count_status(CourseStatus::Pending), total_courses),
            archived: breakdown(count_status(CourseStatus::Archived), total_courses),
        },
        popular_courses,
    })
}
