use chrono::NaiveDateTime;
use rusqlite::{Connection, OptionalExtension, params};

use super::types::{NewWorkout, SessionDetail, WorkoutSession};
use crate::quality::QualityOutcome;

const SELECT_DETAIL: &str = "\
    SELECT w.id, w.user_id, TRIM(u.first_name || ' ' || u.last_name), \
           w.machine_id, m.name, m.machine_type, \
           w.start_time, w.duration_min, w.calories_burned, w.avg_heart_rate, \
           w.distance_km, w.avg_speed_kmh, w.data_quality_flag, w.quality_issues \
    FROM workout_sessions w \
    JOIN users u ON u.id = w.user_id \
    JOIN machines m ON m.id = w.machine_id";

fn row_to_detail(row: &rusqlite::Row) -> rusqlite::Result<SessionDetail> {
    Ok(SessionDetail {
        id: row.get(0)?,
        user_id: row.get(1)?,
        user_name: row.get(2)?,
        machine_id: row.get(3)?,
        machine_name: row.get(4)?,
        machine_type: row.get(5)?,
        start_time: row.get(6)?,
        duration_min: row.get(7)?,
        calories_burned: row.get(8)?,
        avg_heart_rate: row.get(9)?,
        distance_km: row.get(10)?,
        avg_speed_kmh: row.get(11)?,
        data_quality_flag: row.get(12)?,
        quality_issues: row.get(13)?,
    })
}

fn row_to_session(row: &rusqlite::Row) -> rusqlite::Result<WorkoutSession> {
    Ok(WorkoutSession {
        id: row.get(0)?,
        user_id: row.get(1)?,
        machine_id: row.get(2)?,
        start_time: row.get(3)?,
        duration_min: row.get(4)?,
        calories_burned: row.get(5)?,
        avg_heart_rate: row.get(6)?,
        distance_km: row.get(7)?,
        avg_speed_kmh: row.get(8)?,
        notes: row.get(9)?,
        data_quality_flag: row.get(10)?,
        quality_issues: row.get(11)?,
        created_at: row.get(12)?,
    })
}

/// Record a new session with its quality verdict. Out-of-range values
/// are stored flagged, never rejected.
pub fn create(
    conn: &Connection,
    new: &NewWorkout,
    quality: &QualityOutcome,
    now: NaiveDateTime,
) -> rusqlite::Result<i64> {
    conn.execute(
        "INSERT INTO workout_sessions \
         (user_id, machine_id, start_time, duration_min, calories_burned, avg_heart_rate, \
          distance_km, avg_speed_kmh, notes, data_quality_flag, quality_issues, created_at) \
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)",
        params![
            new.user_id,
            new.machine_id,
            new.start_time,
            new.duration_min,
            new.calories_burned,
            new.avg_heart_rate,
            new.distance_km,
            new.avg_speed_kmh,
            new.notes,
            quality.flag,
            quality.issues,
            now,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn find_by_id(conn: &Connection, id: i64) -> rusqlite::Result<Option<WorkoutSession>> {
    conn.query_row(
        "SELECT id, user_id, machine_id, start_time, duration_min, calories_burned, \
                avg_heart_rate, distance_km, avg_speed_kmh, notes, data_quality_flag, \
                quality_issues, created_at \
         FROM workout_sessions WHERE id = ?1",
        params![id],
        row_to_session,
    )
    .optional()
}

/// All sessions, newest first, with user and machine names.
pub fn find_all_detailed(conn: &Connection) -> rusqlite::Result<Vec<SessionDetail>> {
    let mut stmt = conn.prepare(&format!("{SELECT_DETAIL} ORDER BY w.start_time DESC"))?;
    let sessions = stmt
        .query_map([], row_to_detail)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(sessions)
}

/// One member's sessions, newest first.
pub fn find_for_user(conn: &Connection, user_id: i64) -> rusqlite::Result<Vec<SessionDetail>> {
    let mut stmt = conn.prepare(&format!(
        "{SELECT_DETAIL} WHERE w.user_id = ?1 ORDER BY w.start_time DESC"
    ))?;
    let sessions = stmt
        .query_map(params![user_id], row_to_detail)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(sessions)
}

/// Sessions with start_time in [start, end), newest first.
pub fn find_between(
    conn: &Connection,
    start: NaiveDateTime,
    end: NaiveDateTime,
) -> rusqlite::Result<Vec<SessionDetail>> {
    let mut stmt = conn.prepare(&format!(
        "{SELECT_DETAIL} WHERE w.start_time >= ?1 AND w.start_time < ?2 \
         ORDER BY w.start_time DESC"
    ))?;
    let sessions = stmt
        .query_map(params![start, end], row_to_detail)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(sessions)
}

/// One member's sessions with start_time in [start, end), oldest first
/// (report order).
pub fn find_for_user_between(
    conn: &Connection,
    user_id: i64,
    start: NaiveDateTime,
    end: NaiveDateTime,
) -> rusqlite::Result<Vec<SessionDetail>> {
    let mut stmt = conn.prepare(&format!(
        "{SELECT_DETAIL} WHERE w.user_id = ?1 AND w.start_time >= ?2 AND w.start_time < ?3 \
         ORDER BY w.start_time"
    ))?;
    let sessions = stmt
        .query_map(params![user_id, start, end], row_to_detail)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(sessions)
}

/// Mark a flagged session as reviewed and approved. This is the only
/// mutation a session supports after creation.
pub fn review_quality(conn: &Connection, id: i64) -> rusqlite::Result<usize> {
    conn.execute(
        "UPDATE workout_sessions \
         SET data_quality_flag = 1, quality_issues = 'Manually reviewed and approved' \
         WHERE id = ?1",
        params![id],
    )
}

pub fn count(conn: &Connection) -> rusqlite::Result<i64> {
    conn.query_row("SELECT COUNT(*) FROM workout_sessions", [], |row| row.get(0))
}
