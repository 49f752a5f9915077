//! CSV report builders.
//!
//! Each builder returns the full CSV body as a string; the handlers
//! wrap it in an attachment response. Shapes are fixed: headers do not
//! vary with data volume.

use std::collections::BTreeMap;

use chrono::{NaiveDate, NaiveDateTime};

use crate::models::user::User;
use crate::models::workout::SessionDetail;
use crate::stats;

/// Machine usage over a period, one row per machine with sessions.
pub fn usage_csv(sessions: &[SessionDetail], start: NaiveDate, end: NaiveDate) -> String {
    let mut out = String::new();
    out.push_str("Machine Usage Report\n");
    out.push_str(&format!("Period: {start} to {end}\n\n"));
    out.push_str("Machine Name,Type,Total Sessions,Total Calories,Avg Heart Rate,Avg Duration (min)\n");

    let mut by_machine: BTreeMap<&str, Vec<&SessionDetail>> = BTreeMap::new();
    for s in sessions {
        by_machine.entry(&s.machine_name).or_default().push(s);
    }

    for (name, machine_sessions) in by_machine {
        let n = machine_sessions.len();
        let total_calories: i64 = machine_sessions.iter().map(|s| s.calories_burned).sum();
        let avg_heart_rate: f64 = machine_sessions
            .iter()
            .map(|s| s.avg_heart_rate.unwrap_or(0) as f64)
            .sum::<f64>()
            / n as f64;
        let avg_duration: f64 =
            machine_sessions.iter().map(|s| s.duration_min as f64).sum::<f64>() / n as f64;
        out.push_str(&format!(
            "{},{},{},{},{:.1},{:.1}\n",
            name, machine_sessions[0].machine_type, n, total_calories, avg_heart_rate, avg_duration,
        ));
    }

    out
}

/// One member's sessions over a period, with a trailing summary block.
pub fn member_progress_csv(
    member: &User,
    sessions: &[SessionDetail],
    start: NaiveDate,
    end: NaiveDate,
) -> String {
    let mut out = String::new();
    out.push_str("Member Progress Report\n");
    out.push_str(&format!("Member: {}\n", member.full_name()));
    out.push_str(&format!("Period: {start} to {end}\n\n"));
    out.push_str("Date,Machine,Duration (min),Calories,Heart Rate,Distance (km),Avg Speed (km/h)\n");

    for s in sessions {
        out.push_str(&format!(
            "{},{},{},{},{},{:.1},{:.1}\n",
            s.start_time.format("%Y-%m-%d"),
            s.machine_name,
            s.duration_min,
            s.calories_burned,
            s.avg_heart_rate.unwrap_or(0),
            s.distance_km.unwrap_or(0.0),
            s.avg_speed_kmh.unwrap_or(0.0),
        ));
    }

    let avg_duration = if sessions.is_empty() {
        0.0
    } else {
        sessions.iter().map(|s| s.duration_min as f64).sum::<f64>() / sessions.len() as f64
    };

    out.push_str("\nSummary:\n");
    out.push_str(&format!("Total Workouts: {}\n", sessions.len()));
    out.push_str(&format!("Total Calories: {}\n", stats::total_calories(sessions)));
    out.push_str(&format!("Total Distance: {:.1} km\n", stats::total_distance(sessions)));
    out.push_str(&format!("Avg Session Duration: {avg_duration:.1} min\n"));

    out
}

/// Flagged-session report. The header block and column row are fixed
/// regardless of how many sessions exist.
pub fn data_quality_csv(sessions: &[SessionDetail], generated: NaiveDateTime) -> String {
    let flagged: Vec<&SessionDetail> =
        sessions.iter().filter(|s| !s.data_quality_flag).collect();

    let mut out = String::new();
    out.push_str("Data Quality Report\n");
    out.push_str(&format!("Generated: {}\n\n", generated.format("%Y-%m-%dT%H:%M:%S")));
    out.push_str(&format!("Total Sessions: {}\n", sessions.len()));
    out.push_str(&format!("Sessions with Quality Issues: {}\n", flagged.len()));
    out.push_str(&format!(
        "Data Quality Score: {:.1}%\n\n",
        stats::data_quality_score(sessions)
    ));

    out.push_str("Quality Issues Details:\n");
    out.push_str("Member,Date,Machine,Issue Description\n");

    for s in flagged {
        out.push_str(&format!(
            "{},{},{},{}\n",
            s.user_name,
            s.start_time.format("%Y-%m-%d"),
            s.machine_name,
            s.quality_issues.as_deref().unwrap_or("Data validation failed"),
        ));
    }

    out
}

/// Key figures for the system report.
pub struct SystemReport {
    pub total_users: i64,
    pub total_machines: i64,
    pub total_sessions: i64,
    pub active_machines: i64,
    pub recent_sessions: i64,
    pub data_quality_score: f64,
}

/// System overview as key/value rows.
pub fn system_csv(report: &SystemReport, generated: NaiveDateTime) -> String {
    let mut out = String::new();
    out.push_str("System Report\n");
    out.push_str(&format!("Generated: {}\n\n", generated.format("%Y-%m-%dT%H:%M:%S")));
    out.push_str("Key,Value\n");
    out.push_str(&format!("Total Users,{}\n", report.total_users));
    out.push_str(&format!("Total Machines,{}\n", report.total_machines));
    out.push_str(&format!("Total Sessions,{}\n", report.total_sessions));
    out.push_str(&format!("Active Machines,{}\n", report.active_machines));
    out.push_str(&format!("Sessions Last 7 Days,{}\n", report.recent_sessions));
    out.push_str(&format!("Data Quality Score,{:.1}%\n", report.data_quality_score));
    out
}
