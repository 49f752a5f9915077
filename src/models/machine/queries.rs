use chrono::NaiveDateTime;
use rusqlite::{Connection, OptionalExtension, params};

use super::types::{Machine, MachineStatus, MachineUsage, NewMachine};

const SELECT_MACHINE: &str = "\
    SELECT id, name, machine_type, location, status, last_maintenance, created_at \
    FROM machines";

fn parse_status(idx: usize, s: String) -> rusqlite::Result<MachineStatus> {
    MachineStatus::parse(&s).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            idx,
            rusqlite::types::Type::Text,
            format!("unknown machine status '{s}'").into(),
        )
    })
}

fn row_to_machine(row: &rusqlite::Row) -> rusqlite::Result<Machine> {
    Ok(Machine {
        id: row.get(0)?,
        name: row.get(1)?,
        machine_type: row.get(2)?,
        location: row.get(3)?,
        status: parse_status(4, row.get(4)?)?,
        last_maintenance: row.get(5)?,
        created_at: row.get(6)?,
    })
}

pub fn find_by_id(conn: &Connection, id: i64) -> rusqlite::Result<Option<Machine>> {
    conn.query_row(
        &format!("{SELECT_MACHINE} WHERE id = ?1"),
        params![id],
        row_to_machine,
    )
    .optional()
}

pub fn find_by_name(conn: &Connection, name: &str) -> rusqlite::Result<Option<Machine>> {
    conn.query_row(
        &format!("{SELECT_MACHINE} WHERE name = ?1"),
        params![name],
        row_to_machine,
    )
    .optional()
}

pub fn find_all(conn: &Connection) -> rusqlite::Result<Vec<Machine>> {
    let mut stmt = conn.prepare(&format!("{SELECT_MACHINE} ORDER BY name"))?;
    let machines = stmt
        .query_map([], row_to_machine)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(machines)
}

/// Machines currently available for workouts (member machine picker).
pub fn find_active(conn: &Connection) -> rusqlite::Result<Vec<Machine>> {
    let mut stmt =
        conn.prepare(&format!("{SELECT_MACHINE} WHERE status = 'ACTIVE' ORDER BY name"))?;
    let machines = stmt
        .query_map([], row_to_machine)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(machines)
}

/// All machines with per-machine session count and average calories.
pub fn find_usage(conn: &Connection) -> rusqlite::Result<Vec<MachineUsage>> {
    let mut stmt = conn.prepare(
        "SELECT m.id, m.name, m.machine_type, m.location, m.status, m.last_maintenance, \
                COUNT(w.id), COALESCE(AVG(w.calories_burned), 0.0) \
         FROM machines m \
         LEFT JOIN workout_sessions w ON w.machine_id = m.id \
         GROUP BY m.id \
         ORDER BY m.name",
    )?;
    let usage = stmt
        .query_map([], |row| {
            Ok(MachineUsage {
                id: row.get(0)?,
                name: row.get(1)?,
                machine_type: row.get(2)?,
                location: row.get(3)?,
                status: parse_status(4, row.get(4)?)?,
                last_maintenance: row.get(5)?,
                total_sessions: row.get(6)?,
                avg_calories: row.get(7)?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(usage)
}

pub fn create(conn: &Connection, new: &NewMachine, now: NaiveDateTime) -> rusqlite::Result<i64> {
    conn.execute(
        "INSERT INTO machines (name, machine_type, location, status, created_at) \
         VALUES (?1, ?2, ?3, 'ACTIVE', ?4)",
        params![new.name, new.machine_type, new.location, now],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Update a machine's status. Entering MAINTENANCE stamps the
/// maintenance time.
pub fn update_status(
    conn: &Connection,
    id: i64,
    status: MachineStatus,
    now: NaiveDateTime,
) -> rusqlite::Result<usize> {
    if status == MachineStatus::Maintenance {
        conn.execute(
            "UPDATE machines SET status = ?1, last_maintenance = ?2 WHERE id = ?3",
            params![status.as_str(), now, id],
        )
    } else {
        conn.execute(
            "UPDATE machines SET status = ?1 WHERE id = ?2",
            params![status.as_str(), id],
        )
    }
}

pub fn delete(conn: &Connection, id: i64) -> rusqlite::Result<usize> {
    conn.execute("DELETE FROM machines WHERE id = ?1", params![id])
}

/// Number of recorded sessions on a machine (guards deletion).
pub fn session_count(conn: &Connection, machine_id: i64) -> rusqlite::Result<i64> {
    conn.query_row(
        "SELECT COUNT(*) FROM workout_sessions WHERE machine_id = ?1",
        params![machine_id],
        |row| row.get(0),
    )
}

pub fn count(conn: &Connection) -> rusqlite::Result<i64> {
    conn.query_row("SELECT COUNT(*) FROM machines", [], |row| row.get(0))
}

pub fn count_by_status(conn: &Connection, status: MachineStatus) -> rusqlite::Result<i64> {
    conn.query_row(
        "SELECT COUNT(*) FROM machines WHERE status = ?1",
        params![status.as_str()],
        |row| row.get(0),
    )
}
