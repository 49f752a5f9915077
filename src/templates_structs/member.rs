use askama::Template;

use super::PageContext;
use crate::models::machine::Machine;
use crate::models::workout::SessionDetail;

#[derive(Template)]
#[template(path = "member.html")]
pub struct MemberDashboardTemplate {
    pub ctx: PageContext,
    pub total_workouts: i64,
    pub total_calories: i64,
    pub total_distance: String,
    pub avg_heart_rate: i64,
    pub machines: Vec<MachineOption>,
    pub recent: Vec<WorkoutRow>,
    pub history: Vec<WorkoutRow>,
    pub default_start: String,
    pub charts_json: String,
}

/// Entry in the machine picker of the workout form.
pub struct MachineOption {
    pub id: i64,
    pub label: String,
}

impl MachineOption {
    pub fn from_machine(m: &Machine) -> Self {
        MachineOption {
            id: m.id,
            label: format!("{} ({})", m.name, m.machine_type),
        }
    }
}

/// Pre-formatted row for the member's own workout tables.
pub struct WorkoutRow {
    pub start_time: String,
    pub machine_name: String,
    pub duration: String,
    pub calories: i64,
    pub heart_rate: String,
    pub distance: String,
    pub quality_good: bool,
}

impl WorkoutRow {
    pub fn from_session(s: &SessionDetail) -> Self {
        WorkoutRow {
            start_time: s.start_time.format("%Y-%m-%d %H:%M").to_string(),
            machine_name: s.machine_name.clone(),
            duration: format!("{} min", s.duration_min),
            calories: s.calories_burned,
            heart_rate: s
                .avg_heart_rate
                .map(|hr| hr.to_string())
                .unwrap_or_else(|| "N/A".to_string()),
            distance: s
                .distance_km
                .map(|d| format!("{d:.1} km"))
                .unwrap_or_else(|| "N/A".to_string()),
            quality_good: s.data_quality_flag,
        }
    }
}
