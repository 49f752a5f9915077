use chrono::NaiveDateTime;
use rusqlite::{Connection, OptionalExtension, params};

use super::types::{NewUser, User, UserRole, UserStatus};

const SELECT_USER: &str = "\
    SELECT id, username, password, email, first_name, last_name, role, status, \
           last_login, created_at, updated_at \
    FROM users";

fn parse_role(idx: usize, s: String) -> rusqlite::Result<UserRole> {
    UserRole::parse(&s).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            idx,
            rusqlite::types::Type::Text,
            format!("unknown role '{s}'").into(),
        )
    })
}

fn parse_status(idx: usize, s: String) -> rusqlite::Result<UserStatus> {
    UserStatus::parse(&s).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            idx,
            rusqlite::types::Type::Text,
            format!("unknown status '{s}'").into(),
        )
    })
}

fn row_to_user(row: &rusqlite::Row) -> rusqlite::Result<User> {
    Ok(User {
        id: row.get(0)?,
        username: row.get(1)?,
        password: row.get(2)?,
        email: row.get(3)?,
        first_name: row.get(4)?,
        last_name: row.get(5)?,
        role: parse_role(6, row.get(6)?)?,
        status: parse_status(7, row.get(7)?)?,
        last_login: row.get(8)?,
        created_at: row.get(9)?,
        updated_at: row.get(10)?,
    })
}

pub fn find_by_username(conn: &Connection, username: &str) -> rusqlite::Result<Option<User>> {
    conn.query_row(
        &format!("{SELECT_USER} WHERE username = ?1"),
        params![username],
        row_to_user,
    )
    .optional()
}

pub fn find_by_id(conn: &Connection, id: i64) -> rusqlite::Result<Option<User>> {
    conn.query_row(&format!("{SELECT_USER} WHERE id = ?1"), params![id], row_to_user)
        .optional()
}

/// All users ordered by username, for the admin user table.
pub fn find_all(conn: &Connection) -> rusqlite::Result<Vec<User>> {
    let mut stmt = conn.prepare(&format!("{SELECT_USER} ORDER BY username"))?;
    let users = stmt
        .query_map([], row_to_user)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(users)
}

/// Users with the MEMBER role, for the instructor dashboard.
pub fn find_members(conn: &Connection) -> rusqlite::Result<Vec<User>> {
    let mut stmt = conn.prepare(&format!("{SELECT_USER} WHERE role = 'MEMBER' ORDER BY username"))?;
    let users = stmt
        .query_map([], row_to_user)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(users)
}

pub fn create(conn: &Connection, new: &NewUser, now: NaiveDateTime) -> rusqlite::Result<i64> {
    conn.execute(
        "INSERT INTO users (username, password, email, first_name, last_name, role, status, created_at, updated_at) \
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, 'ACTIVE', ?7, ?7)",
        params![
            new.username,
            new.password,
            new.email,
            new.first_name,
            new.last_name,
            new.role.as_str(),
            now,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn update_status(
    conn: &Connection,
    id: i64,
    status: UserStatus,
    now: NaiveDateTime,
) -> rusqlite::Result<usize> {
    conn.execute(
        "UPDATE users SET status = ?1, updated_at = ?2 WHERE id = ?3",
        params![status.as_str(), now, id],
    )
}

/// Stamp the last successful login time.
pub fn touch_last_login(conn: &Connection, id: i64, now: NaiveDateTime) -> rusqlite::Result<usize> {
    conn.execute(
        "UPDATE users SET last_login = ?1, updated_at = ?1 WHERE id = ?2",
        params![now, id],
    )
}

pub fn count(conn: &Connection) -> rusqlite::Result<i64> {
    conn.query_row("SELECT COUNT(*) FROM users", [], |row| row.get(0))
}
