use chrono::Local;
use r2d2::Pool;
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::params;

use crate::auth::password;

pub type DbPool = Pool<SqliteConnectionManager>;

pub const MIGRATIONS: &str = include_str!("schema.sql");

pub fn init_pool(database_url: &str) -> DbPool {
    let manager = SqliteConnectionManager::file(database_url).with_init(|conn| {
        conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA foreign_keys=ON;")?;
        Ok(())
    });
    Pool::builder()
        .max_size(8)
        .build(manager)
        .expect("Failed to create DB pool")
}

pub fn run_migrations(pool: &DbPool) {
    let conn = pool.get().expect("Failed to get DB connection for migrations");
    conn.execute_batch(MIGRATIONS)
        .expect("Failed to run migrations");
    log::info!("Database migrations complete");
}

/// Seed the default accounts and machines if the database is empty.
///
/// Creates one account per role (admin/instructor/member) and a starter
/// set of machines, mirroring a fresh gym installation. Idempotent:
/// skipped entirely once any user exists.
pub fn seed_defaults(pool: &DbPool) {
    let conn = pool.get().expect("Failed to get DB connection for seeding");

    let count: i64 = conn
        .query_row("SELECT COUNT(*) FROM users", [], |row| row.get(0))
        .unwrap_or(0);
    if count > 0 {
        log::info!("Database already seeded ({count} users), skipping");
        return;
    }

    let now = Local::now().naive_local();

    let accounts = [
        ("admin", "admin123", "admin@gymtrack.local", "System", "Administrator", "ADMIN"),
        ("instructor", "instructor123", "instructor@gymtrack.local", "Fitness", "Instructor", "INSTRUCTOR"),
        ("member", "member123", "member@gymtrack.local", "John", "Member", "MEMBER"),
    ];
    for (username, pass, email, first, last, role) in accounts {
        let hash = password::hash_password(pass).expect("Failed to hash seed password");
        conn.execute(
            "INSERT INTO users (username, password, email, first_name, last_name, role, status, created_at, updated_at) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, 'ACTIVE', ?7, ?7)",
            params![username, hash, email, first, last, role, now],
        )
        .expect("Failed to seed user");
        log::info!("Seeded {role} account '{username}'");
    }

    let machines = [
        ("Treadmill-001", "Treadmill", "Main Floor"),
        ("Exercise Bike-001", "Exercise Bike", "Cardio Zone"),
        ("Elliptical-001", "Elliptical", "Cardio Zone"),
        ("Rowing Machine-001", "Rowing Machine", "Strength Zone"),
    ];
    for (name, machine_type, location) in machines {
        conn.execute(
            "INSERT INTO machines (name, machine_type, location, status, last_maintenance, created_at) \
             VALUES (?1, ?2, ?3, 'ACTIVE', ?4, ?4)",
            params![name, machine_type, location, now],
        )
        .expect("Failed to seed machine");
    }
    log::info!("Seeded {} machines", machines.len());
}
