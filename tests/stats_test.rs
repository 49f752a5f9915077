//! Derived-statistics tests — the dashboard numbers and the threshold
//! bands behind them.

mod common;

use chrono::NaiveDateTime;
use common::*;
use gymtrack::models::user::{User, UserRole, UserStatus};
use gymtrack::models::workout::SessionDetail;
use gymtrack::stats::*;

fn session(
    user_id: i64,
    machine_type: &str,
    start: NaiveDateTime,
    duration_min: i64,
    calories: i64,
    avg_heart_rate: Option<i64>,
    flag: bool,
) -> SessionDetail {
    SessionDetail {
        id: 0,
        user_id,
        user_name: format!("user{user_id}"),
        machine_id: 1,
        machine_name: format!("{machine_type}-001"),
        machine_type: machine_type.to_string(),
        start_time: start,
        duration_min,
        calories_burned: calories,
        avg_heart_rate,
        distance_km: None,
        avg_speed_kmh: None,
        data_quality_flag: flag,
        quality_issues: if flag { None } else { Some("issue".to_string()) },
    }
}

fn member(id: i64, username: &str) -> User {
    User {
        id,
        username: username.to_string(),
        password: String::new(),
        email: format!("{username}@example.com"),
        first_name: username.to_string(),
        last_name: "Test".to_string(),
        role: UserRole::Member,
        status: UserStatus::Active,
        last_login: None,
        created_at: test_now(),
        updated_at: test_now(),
    }
}

#[test]
fn test_average_heart_rate_excludes_non_positive() {
    let now = test_now();
    let sessions = vec![
        session(1, "Treadmill", now, 30, 200, Some(150), true),
        session(1, "Treadmill", now, 30, 200, Some(170), true),
        session(1, "Treadmill", now, 30, 200, Some(0), true),
        session(1, "Treadmill", now, 30, 200, Some(-5), true),
        session(1, "Treadmill", now, 30, 200, None, true),
    ];

    assert_eq!(average_heart_rate(&sessions), 160);
}

#[test]
fn test_average_heart_rate_empty() {
    assert_eq!(average_heart_rate(&[]), 0);

    let no_readings = vec![session(1, "Treadmill", test_now(), 30, 200, None, true)];
    assert_eq!(average_heart_rate(&no_readings), 0);
}

#[test]
fn test_data_quality_score() {
    assert_eq!(data_quality_score(&[]), 100.0);

    let now = test_now();
    let sessions = vec![
        session(1, "Treadmill", now, 30, 200, None, true),
        session(1, "Treadmill", now, 30, 200, None, true),
        session(1, "Treadmill", now, 30, 200, None, true),
        session(1, "Treadmill", now, 30, 200, None, false),
    ];
    assert_eq!(data_quality_score(&sessions), 75.0);
}

#[test]
fn test_maintenance_penalty_bands() {
    let now = test_now();
    let days_ago = |d: i64| Some(now - chrono::Duration::days(d));

    assert_eq!(maintenance_penalty(None, now), 50.0);
    assert_eq!(maintenance_penalty(days_ago(0), now), 0.0);
    assert_eq!(maintenance_penalty(days_ago(30), now), 0.0);
    assert_eq!(maintenance_penalty(days_ago(31), now), 20.0);
    assert_eq!(maintenance_penalty(days_ago(60), now), 20.0);
    assert_eq!(maintenance_penalty(days_ago(61), now), 40.0);
    assert_eq!(maintenance_penalty(days_ago(90), now), 40.0);
    assert_eq!(maintenance_penalty(days_ago(91), now), 60.0);
}

#[test]
fn test_performance_score_monotone_beyond_30_days() {
    let now = test_now();
    let sessions = 50;

    let mut previous = performance_score(sessions, Some(now - chrono::Duration::days(30)), now);
    for days in 31..=150 {
        let score = performance_score(sessions, Some(now - chrono::Duration::days(days)), now);
        assert!(
            score <= previous,
            "score rose from {previous} to {score} at {days} days"
        );
        previous = score;
    }
}

#[test]
fn test_performance_score_clamped() {
    let now = test_now();
    // Session bonus caps at 20, so a freshly maintained busy machine
    // cannot exceed 100.
    assert_eq!(performance_score(500, Some(now), now), 100.0);
    // Never maintained, no sessions: 100 + 0 - 50.
    assert_eq!(performance_score(0, None, now), 50.0);
}

#[test]
fn test_health_status_bands() {
    let now = test_now();
    let days_ago = |d: i64| Some(now - chrono::Duration::days(d));

    assert_eq!(health_status(None, now), HealthStatus::Unknown);
    assert_eq!(health_status(days_ago(7), now), HealthStatus::Excellent);
    assert_eq!(health_status(days_ago(8), now), HealthStatus::Good);
    assert_eq!(health_status(days_ago(30), now), HealthStatus::Good);
    assert_eq!(health_status(days_ago(31), now), HealthStatus::Fair);
    assert_eq!(health_status(days_ago(60), now), HealthStatus::Fair);
    assert_eq!(health_status(days_ago(61), now), HealthStatus::Poor);
}

#[test]
fn test_system_health() {
    assert_eq!(system_health(0, 0), 100);
    assert_eq!(system_health(3, 4), 75);
    assert_eq!(system_health(1, 3), 33);
    assert_eq!(system_health(4, 4), 100);
}

#[test]
fn test_weekly_activity_counts_by_weekday() {
    // TEST_NOW is Tuesday 2026-08-04.
    let now = test_now();
    let sessions = vec![
        session(1, "Treadmill", dt("2026-08-04 10:00:00"), 30, 200, None, true),
        session(1, "Treadmill", dt("2026-08-03 10:00:00"), 30, 200, None, true),
        session(1, "Treadmill", dt("2026-08-03 18:00:00"), 30, 200, None, true),
        // Outside the trailing week
        session(1, "Treadmill", dt("2026-07-20 10:00:00"), 30, 200, None, true),
    ];

    let weekly = weekly_activity(&sessions, now);
    assert_eq!(weekly.len(), 7);
    assert_eq!(weekly[0], ("Mon".to_string(), 2));
    assert_eq!(weekly[1], ("Tue".to_string(), 1));
    for (_, count) in &weekly[2..] {
        assert_eq!(*count, 0);
    }
}

#[test]
fn test_workout_type_distribution() {
    let now = test_now();
    let sessions = vec![
        session(1, "Treadmill", now, 30, 200, None, true),
        session(1, "Treadmill", now, 30, 200, None, true),
        session(1, "Exercise Bike", now, 30, 200, None, true),
    ];

    let dist = workout_type_distribution(&sessions);
    assert_eq!(dist, vec![
        ("Exercise Bike".to_string(), 1),
        ("Treadmill".to_string(), 2),
    ]);
}

#[test]
fn test_weekly_progress_labels_oldest_first() {
    let now = test_now();
    let sessions = vec![
        // Three weeks back: averages 300 cal / 30 min
        session(1, "Treadmill", dt("2026-07-15 10:00:00"), 20, 200, None, true),
        session(1, "Treadmill", dt("2026-07-15 11:00:00"), 40, 400, None, true),
        // Current week
        session(1, "Treadmill", dt("2026-08-04 10:00:00"), 60, 500, None, true),
    ];

    let progress = weekly_progress(&sessions, now);
    assert_eq!(progress.len(), 4);
    assert_eq!(progress[0].label, "Week 1");
    assert_eq!(progress[0].avg_calories, 300);
    assert_eq!(progress[0].avg_duration, 30);
    assert_eq!(progress[1].avg_calories, 0);
    assert_eq!(progress[2].avg_calories, 0);
    assert_eq!(progress[3].label, "Week 4");
    assert_eq!(progress[3].avg_calories, 500);
    assert_eq!(progress[3].avg_duration, 60);
}

#[test]
fn test_daily_calories_limits_to_seven_active_days() {
    let mut sessions = Vec::new();
    for day in 1..=9 {
        let start = dt(&format!("2026-07-{day:02} 10:00:00"));
        sessions.push(session(1, "Treadmill", start, 30, 100, None, true));
    }
    // Two sessions on the same day sum together
    sessions.push(session(1, "Treadmill", dt("2026-07-09 18:00:00"), 30, 150, None, true));

    let days = daily_calories(&sessions);
    assert_eq!(days.len(), 7);
    assert_eq!(days[0].0, dt("2026-07-03 00:00:00").date());
    assert_eq!(days[6].0, dt("2026-07-09 00:00:00").date());
    assert_eq!(days[6].1, 250);
}

#[test]
fn test_monthly_progress() {
    let sessions = vec![
        session(1, "Treadmill", dt("2026-06-10 10:00:00"), 30, 100, None, true),
        session(1, "Treadmill", dt("2026-07-01 10:00:00"), 30, 200, None, true),
        session(1, "Treadmill", dt("2026-07-20 10:00:00"), 30, 300, None, true),
    ];

    let months = monthly_progress(&sessions);
    assert_eq!(months.len(), 2);
    assert_eq!(months[0].label, "Jun 2026");
    assert_eq!(months[0].workouts, 1);
    assert_eq!(months[0].calories, 100);
    assert_eq!(months[1].label, "Jul 2026");
    assert_eq!(months[1].workouts, 2);
    assert_eq!(months[1].calories, 500);
}

#[test]
fn test_engagement_percent_caps_at_100() {
    assert_eq!(engagement_percent(0), 0);
    assert_eq!(engagement_percent(3), 30);
    assert_eq!(engagement_percent(10), 100);
    assert_eq!(engagement_percent(25), 100);
}

#[test]
fn test_progress_level_tiers() {
    assert_eq!(progress_level(0).0, "Beginner");
    assert_eq!(progress_level(5).0, "Beginner");
    assert_eq!(progress_level(6).0, "Moderate");
    assert_eq!(progress_level(10).0, "Moderate");
    assert_eq!(progress_level(11).0, "Active");
}

#[test]
fn test_avg_workouts_per_member() {
    assert_eq!(avg_workouts_per_member(0, 0), 0.0);
    assert_eq!(avg_workouts_per_member(7, 2), 3.5);
    assert_eq!(avg_workouts_per_member(10, 3), 3.3);
}

#[test]
fn test_sessions_and_active_this_week() {
    let now = test_now();
    let sessions = vec![
        session(1, "Treadmill", dt("2026-08-03 10:00:00"), 30, 200, None, true),
        session(1, "Treadmill", dt("2026-08-04 10:00:00"), 30, 200, None, true),
        session(2, "Treadmill", dt("2026-08-01 10:00:00"), 30, 200, None, true),
        session(3, "Treadmill", dt("2026-07-01 10:00:00"), 30, 200, None, true),
    ];

    assert_eq!(sessions_this_week(&sessions, now), 3);
    assert_eq!(active_this_week(&sessions, now), 2);
}

#[test]
fn test_member_activity_aggregates() {
    let members = vec![member(1, "alice"), member(2, "bob")];
    let sessions = vec![
        session(1, "Treadmill", dt("2026-08-01 10:00:00"), 30, 300, Some(140), true),
        session(1, "Treadmill", dt("2026-08-03 10:00:00"), 50, 500, Some(160), true),
    ];

    let summaries = member_activity(&members, &sessions);
    assert_eq!(summaries.len(), 2);

    let alice = &summaries[0];
    assert_eq!(alice.total_workouts, 2);
    assert_eq!(alice.total_calories, 800);
    assert_eq!(alice.avg_calories, 400);
    assert_eq!(alice.avg_duration, 40);
    assert_eq!(alice.avg_heart_rate, 150);
    assert_eq!(alice.last_activity, Some(dt("2026-08-03 10:00:00")));

    // Bob never worked out: zeroed aggregates, no last activity.
    let bob = &summaries[1];
    assert_eq!(bob.total_workouts, 0);
    assert_eq!(bob.total_calories, 0);
    assert_eq!(bob.last_activity, None);
}

#[test]
fn test_maintenance_overdue() {
    use gymtrack::models::machine::{MachineStatus, MachineUsage};

    let now = test_now();
    let usage = |last: Option<NaiveDateTime>| MachineUsage {
        id: 1,
        name: "M".to_string(),
        machine_type: "Treadmill".to_string(),
        location: String::new(),
        status: MachineStatus::Active,
        last_maintenance: last,
        total_sessions: 0,
        avg_calories: 0.0,
    };

    let machines = vec![
        usage(None),
        usage(Some(now - chrono::Duration::days(10))),
        usage(Some(now - chrono::Duration::days(31))),
    ];
    assert_eq!(maintenance_overdue(&machines, now), 2);
}
