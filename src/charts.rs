//! Chart configurations for the dashboard canvases.
//!
//! The server builds plain data (kind, labels, datasets); the browser
//! side (`static/dashboard.js`) owns the canvas lifecycle and feeds
//! these straight into Chart.js. Each config names the canvas slot it
//! belongs to so a refresh can replace charts in place.

use serde::Serialize;
use serde_json::Value;

use crate::models::machine::{MachineStatus, MachineUsage};
use crate::stats::{MonthProgress, WeekProgress};

const SERIES_BLUE: &str = "#3498db";
const SERIES_RED: &str = "#e74c3c";
const SERIES_DARK: &str = "#2c3e50";
const STATUS_PALETTE: [&str; 5] = ["#2ecc71", "#f39c12", "#e74c3c", "#95a5a6", "#3498db"];
const TYPE_PALETTE: [&str; 6] = [
    "#3498db", "#e74c3c", "#2ecc71", "#f39c12", "#9b59b6", "#1abc9c",
];

#[derive(Debug, Serialize)]
pub struct Dataset {
    pub label: String,
    pub data: Vec<f64>,
    #[serde(rename = "backgroundColor", skip_serializing_if = "Option::is_none")]
    pub background_color: Option<Value>,
    #[serde(rename = "borderColor", skip_serializing_if = "Option::is_none")]
    pub border_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tension: Option<f64>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

impl Dataset {
    fn bar(label: &str, data: Vec<f64>) -> Self {
        Dataset {
            label: label.to_string(),
            data,
            background_color: Some(Value::String(SERIES_BLUE.to_string())),
            border_color: Some(SERIES_DARK.to_string()),
            fill: None,
            tension: None,
            kind: None,
        }
    }

    fn line(label: &str, data: Vec<f64>, color: &str) -> Self {
        Dataset {
            label: label.to_string(),
            data,
            background_color: None,
            border_color: Some(color.to_string()),
            fill: Some(false),
            tension: Some(0.4),
            kind: None,
        }
    }

    fn doughnut(data: Vec<f64>, palette: &[&str]) -> Self {
        Dataset {
            label: String::new(),
            data,
            background_color: Some(Value::Array(
                palette
                    .iter()
                    .map(|c| Value::String((*c).to_string()))
                    .collect(),
            )),
            border_color: None,
            fill: None,
            tension: None,
            kind: None,
        }
    }
}

/// One renderable chart, bound to a canvas by slot id.
#[derive(Debug, Serialize)]
pub struct ChartConfig {
    pub slot: String,
    pub kind: String,
    pub title: String,
    pub labels: Vec<String>,
    pub datasets: Vec<Dataset>,
}

/// Bar chart of total sessions per machine.
pub fn machine_usage(usage: &[MachineUsage]) -> ChartConfig {
    ChartConfig {
        slot: "machineUsageChart".to_string(),
        kind: "bar".to_string(),
        title: "Machine Usage by Total Sessions".to_string(),
        labels: usage.iter().map(|m| m.name.clone()).collect(),
        datasets: vec![Dataset::bar(
            "Total Sessions",
            usage.iter().map(|m| m.total_sessions as f64).collect(),
        )],
    }
}

/// Doughnut of machines per status.
pub fn machine_status(usage: &[MachineUsage]) -> ChartConfig {
    let statuses = [
        MachineStatus::Active,
        MachineStatus::Maintenance,
        MachineStatus::Inactive,
    ];
    let mut labels = Vec::new();
    let mut counts = Vec::new();
    for status in statuses {
        let n = usage.iter().filter(|m| m.status == status).count();
        if n > 0 {
            labels.push(status.as_str().to_string());
            counts.push(n as f64);
        }
    }
    ChartConfig {
        slot: "machineStatusChart".to_string(),
        kind: "doughnut".to_string(),
        title: "Machine Status Distribution".to_string(),
        labels,
        datasets: vec![Dataset::doughnut(counts, &STATUS_PALETTE)],
    }
}

/// Weekly activity as a line (admin) or bar (instructor) chart.
pub fn weekly_activity(slot: &str, kind: &str, weekly: &[(String, i64)]) -> ChartConfig {
    let data: Vec<f64> = weekly.iter().map(|(_, n)| *n as f64).collect();
    let labels: Vec<String> = weekly.iter().map(|(d, _)| d.clone()).collect();
    let dataset = if kind == "line" {
        Dataset::line("Workout Sessions", data, "#9b59b6")
    } else {
        Dataset::bar("Workout Sessions", data)
    };
    ChartConfig {
        slot: slot.to_string(),
        kind: kind.to_string(),
        title: "Weekly Activity".to_string(),
        labels,
        datasets: vec![dataset],
    }
}

/// Doughnut of sessions per machine type.
pub fn workout_types(distribution: &[(String, i64)]) -> ChartConfig {
    ChartConfig {
        slot: "workoutTypeChart".to_string(),
        kind: "doughnut".to_string(),
        title: "Workout Type Distribution".to_string(),
        labels: distribution.iter().map(|(t, _)| t.clone()).collect(),
        datasets: vec![Dataset::doughnut(
            distribution.iter().map(|(_, n)| *n as f64).collect(),
            &TYPE_PALETTE,
        )],
    }
}

/// Doughnut of flagged vs clean sessions.
pub fn quality_overview(good: i64, issues: i64) -> ChartConfig {
    ChartConfig {
        slot: "qualityChart".to_string(),
        kind: "doughnut".to_string(),
        title: "Data Quality Overview".to_string(),
        labels: vec!["Good Data".to_string(), "Quality Issues".to_string()],
        datasets: vec![Dataset::doughnut(
            vec![good as f64, issues as f64],
            &["#2ecc71", "#e74c3c"],
        )],
    }
}

/// Two-series line chart over the trailing four weeks.
pub fn weekly_progress(progress: &[WeekProgress]) -> ChartConfig {
    ChartConfig {
        slot: "progressChart".to_string(),
        kind: "line".to_string(),
        title: "Progress Overview (Last 4 Weeks)".to_string(),
        labels: progress.iter().map(|w| w.label.clone()).collect(),
        datasets: vec![
            Dataset::line(
                "Avg Calories",
                progress.iter().map(|w| w.avg_calories as f64).collect(),
                SERIES_RED,
            ),
            Dataset::line(
                "Avg Duration (min)",
                progress.iter().map(|w| w.avg_duration as f64).collect(),
                SERIES_BLUE,
            ),
        ],
    }
}

/// Line of calories burned per day (member dashboard).
pub fn daily_calories(days: &[(chrono::NaiveDate, i64)]) -> ChartConfig {
    ChartConfig {
        slot: "caloriesChart".to_string(),
        kind: "line".to_string(),
        title: "Calories Burned".to_string(),
        labels: days
            .iter()
            .map(|(d, _)| d.format("%Y-%m-%d").to_string())
            .collect(),
        datasets: vec![Dataset::line(
            "Calories Burned",
            days.iter().map(|(_, c)| *c as f64).collect(),
            SERIES_BLUE,
        )],
    }
}

/// Monthly workouts as bars with a calories line overlaid.
pub fn monthly_progress(months: &[MonthProgress]) -> ChartConfig {
    let mut calories_line = Dataset::line(
        "Calories",
        months.iter().map(|m| m.calories as f64).collect(),
        SERIES_RED,
    );
    calories_line.kind = Some("line".to_string());
    ChartConfig {
        slot: "monthlyChart".to_string(),
        kind: "bar".to_string(),
        title: "Monthly Progress".to_string(),
        labels: months.iter().map(|m| m.label.clone()).collect(),
        datasets: vec![
            Dataset::bar("Workouts", months.iter().map(|m| m.workouts as f64).collect()),
            calories_line,
        ],
    }
}
