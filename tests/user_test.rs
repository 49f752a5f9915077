//! User model tests — creation, lookup, the three-state status cycle,
//! and the last-login stamp.

mod common;

use common::*;
use gymtrack::models::user::{self, NewUser, UserRole, UserStatus};

#[test]
fn test_create_and_find_user() {
    let (_dir, conn) = setup_test_db();

    let id = seed_user(&conn, "alice", UserRole::Member);
    assert!(id > 0);

    let u = user::find_by_id(&conn, id)
        .expect("Query failed")
        .expect("User not found");
    assert_eq!(u.username, "alice");
    assert_eq!(u.role, UserRole::Member);
    assert_eq!(u.status, UserStatus::Active);
    assert!(u.last_login.is_none());

    let by_name = user::find_by_username(&conn, "alice")
        .expect("Query failed")
        .expect("User not found by username");
    assert_eq!(by_name.id, id);

    assert!(user::find_by_username(&conn, "nobody").unwrap().is_none());
}

#[test]
fn test_duplicate_username_rejected() {
    let (_dir, conn) = setup_test_db();

    seed_user(&conn, "alice", UserRole::Member);

    let duplicate = NewUser {
        username: "alice".to_string(),
        password: "hash".to_string(),
        email: "other@example.com".to_string(),
        first_name: "Other".to_string(),
        last_name: "Alice".to_string(),
        role: UserRole::Member,
    };
    assert!(user::create(&conn, &duplicate, test_now()).is_err());
}

#[test]
fn test_status_cycle_three_states() {
    // The user toggle walks all three states and returns to the start.
    assert_eq!(UserStatus::Active.next(), UserStatus::Inactive);
    assert_eq!(UserStatus::Inactive.next(), UserStatus::Suspended);
    assert_eq!(UserStatus::Suspended.next(), UserStatus::Active);

    assert_eq!(UserStatus::Active.next().next().next(), UserStatus::Active);
}

#[test]
fn test_status_cycle_persists() {
    let (_dir, conn) = setup_test_db();
    let id = seed_user(&conn, "alice", UserRole::Member);

    for expected in [UserStatus::Inactive, UserStatus::Suspended, UserStatus::Active] {
        let current = user::find_by_id(&conn, id).unwrap().unwrap().status;
        user::update_status(&conn, id, current.next(), test_now())
            .expect("Failed to update status");
        let stored = user::find_by_id(&conn, id).unwrap().unwrap().status;
        assert_eq!(stored, expected);
    }
}

#[test]
fn test_touch_last_login() {
    let (_dir, conn) = setup_test_db();
    let id = seed_user(&conn, "alice", UserRole::Member);

    let stamp = dt("2026-08-04 08:30:00");
    user::touch_last_login(&conn, id, stamp).expect("Failed to stamp login");

    let u = user::find_by_id(&conn, id).unwrap().unwrap();
    assert_eq!(u.last_login, Some(stamp));
}

#[test]
fn test_find_members_filters_roles() {
    let (_dir, conn) = setup_test_db();

    seed_user(&conn, "admin", UserRole::Admin);
    seed_user(&conn, "coach", UserRole::Instructor);
    seed_user(&conn, "alice", UserRole::Member);
    seed_user(&conn, "bob", UserRole::Member);

    let members = user::find_members(&conn).expect("Query failed");
    assert_eq!(members.len(), 2);
    assert!(members.iter().all(|m| m.role == UserRole::Member));

    assert_eq!(user::find_all(&conn).unwrap().len(), 4);
    assert_eq!(user::count(&conn).unwrap(), 4);
}

#[test]
fn test_full_name_falls_back_to_username() {
    let (_dir, conn) = setup_test_db();

    let new = NewUser {
        username: "ghost".to_string(),
        password: "hash".to_string(),
        email: "ghost@example.com".to_string(),
        first_name: String::new(),
        last_name: String::new(),
        role: UserRole::Member,
    };
    let id = user::create(&conn, &new, test_now()).expect("Failed to create user");

    let u = user::find_by_id(&conn, id).unwrap().unwrap();
    assert_eq!(u.full_name(), "ghost");
}
