use chrono::Utc;

use registrar::storage::{
    dashboard_stats, seed_demo_data, student_details, upcoming_events, JoinMode, MemoryStore,
    Storage,
};

#[tokio::test]
async fn seeded_store_supports_the_full_surface() {
    let store = MemoryStore::new();
    seed_demo_data(&store).await.unwrap();

    // The demo admin can log in.
    let admin = store
        .user_by_credentials("admin", "admin123")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(admin.name, "System Administrator");

    let stats = dashboard_stats(&store).await.unwrap();
    assert_eq!(stats.total_students, 3);
    assert_eq!(stats.total_faculty, 2);
    assert_eq!(stats.total_courses, 4);
    assert_eq!(stats.active_courses, 2);
    assert!(stats.attendance_rate > 0.0);
    assert!(!stats.popular_courses.is_empty());

    // Every seeded student resolves to a complete detail view.
    for student in store.list_students().await.unwrap() {
        let details = student_details(&store, student.id, JoinMode::Strict)
            .await
            .unwrap()
            .unwrap();
        assert!(!details.enrollments.is_empty());
    }

    // Three of the four seeded events lie ahead of the seeding instant.
    let events = upcoming_events(&store, Utc::now()).await.unwrap();
    assert_eq!(events.len(), 3);
    assert!(events.windows(2).all(|w| w[0].start_date <= w[1].start_date));
}
