//! Shared test infrastructure.
//!
//! `setup_test_db()` creates a temporary SQLite database with the full
//! schema; the seed helpers go through the model layer so tests
//! exercise the same code paths as the handlers.

#![allow(dead_code)]

use chrono::NaiveDateTime;
use rusqlite::Connection;
use tempfile::TempDir;

use gymtrack::db::MIGRATIONS;
use gymtrack::models::machine::{self, NewMachine};
use gymtrack::models::user::{self, NewUser, UserRole};
use gymtrack::models::workout::{self, NewWorkout};
use gymtrack::quality::QualityOutcome;

/// Fixed reference instant so date arithmetic in tests is
/// deterministic.
pub const TEST_NOW: &str = "2026-08-04 12:00:00";

/// Parse a `YYYY-MM-DD HH:MM:SS` literal.
pub fn dt(s: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").expect("bad test datetime literal")
}

pub fn test_now() -> NaiveDateTime {
    dt(TEST_NOW)
}

/// Temporary SQLite database with migrations applied.
///
/// The TempDir must be kept alive for the Connection to remain valid.
pub fn setup_test_db() -> (TempDir, Connection) {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = dir.path().join("test.db");
    let conn = Connection::open(&db_path).expect("Failed to open test DB");

    conn.execute_batch("PRAGMA foreign_keys=ON; PRAGMA journal_mode=WAL;")
        .expect("Failed to set pragmas");
    conn.execute_batch(MIGRATIONS)
        .expect("Failed to run migrations");

    (dir, conn)
}

/// Insert an ACTIVE user. The password column holds a placeholder; use
/// `auth::password::hash_password` in tests that exercise login.
pub fn seed_user(conn: &Connection, username: &str, role: UserRole) -> i64 {
    let new = NewUser {
        username: username.to_string(),
        password: "unused-hash".to_string(),
        email: format!("{username}@example.com"),
        first_name: username.to_string(),
        last_name: "Test".to_string(),
        role,
    };
    user::create(conn, &new, test_now()).expect("Failed to seed user")
}

/// Insert an ACTIVE machine with no maintenance record.
pub fn seed_machine(conn: &Connection, name: &str, machine_type: &str) -> i64 {
    let new = NewMachine {
        name: name.to_string(),
        machine_type: machine_type.to_string(),
        location: "Test Floor".to_string(),
    };
    machine::create(conn, &new, test_now()).expect("Failed to seed machine")
}

/// Insert a clean (unflagged) session with only the required readings.
pub fn seed_workout(
    conn: &Connection,
    user_id: i64,
    machine_id: i64,
    start: NaiveDateTime,
    duration_min: i64,
    calories: i64,
) -> i64 {
    let new = NewWorkout {
        user_id,
        machine_id,
        start_time: start,
        duration_min,
        calories_burned: calories,
        avg_heart_rate: None,
        distance_km: None,
        avg_speed_kmh: None,
        notes: None,
    };
    let outcome = QualityOutcome {
        flag: true,
        issues: None,
    };
    workout::create(conn, &new, &outcome, test_now()).expect("Failed to seed workout")
}

/// Insert a session whose quality flag is cleared.
pub fn seed_flagged_workout(
    conn: &Connection,
    user_id: i64,
    machine_id: i64,
    start: NaiveDateTime,
    issues: &str,
) -> i64 {
    let new = NewWorkout {
        user_id,
        machine_id,
        start_time: start,
        duration_min: 30,
        calories_burned: 250,
        avg_heart_rate: None,
        distance_km: None,
        avg_speed_kmh: None,
        notes: None,
    };
    let outcome = QualityOutcome {
        flag: false,
        issues: Some(issues.to_string()),
    };
    workout::create(conn, &new, &outcome, test_now()).expect("Failed to seed flagged workout")
}
