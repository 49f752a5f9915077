use chrono::NaiveDateTime;
use serde::Deserialize;

/// A recorded workout session, immutable except for the quality review.
#[derive(Debug, Clone)]
pub struct WorkoutSession {
    pub id: i64,
    pub user_id: i64,
    pub machine_id: i64,
    pub start_time: NaiveDateTime,
    pub duration_min: i64,
    pub calories_burned: i64,
    pub avg_heart_rate: Option<i64>,
    pub distance_km: Option<f64>,
    pub avg_speed_kmh: Option<f64>,
    pub notes: Option<String>,
    pub data_quality_flag: bool,
    pub quality_issues: Option<String>,
    pub created_at: NaiveDateTime,
}

/// Session joined with its user and machine, for tables and reports.
#[derive(Debug, Clone)]
pub struct SessionDetail {
    pub id: i64,
    pub user_id: i64,
    pub user_name: String,
    pub machine_id: i64,
    pub machine_name: String,
    pub machine_type: String,
    pub start_time: NaiveDateTime,
    pub duration_min: i64,
    pub calories_burned: i64,
    pub avg_heart_rate: Option<i64>,
    pub distance_km: Option<f64>,
    pub avg_speed_kmh: Option<f64>,
    pub data_quality_flag: bool,
    pub quality_issues: Option<String>,
}

pub struct NewWorkout {
    pub user_id: i64,
    pub machine_id: i64,
    pub start_time: NaiveDateTime,
    pub duration_min: i64,
    pub calories_burned: i64,
    pub avg_heart_rate: Option<i64>,
    pub distance_km: Option<f64>,
    pub avg_speed_kmh: Option<f64>,
    pub notes: Option<String>,
}

/// Form data from the member workout log form. Numeric fields arrive as
/// strings so a half-filled form fails with a flash, not a 400.
#[derive(Debug, Deserialize)]
pub struct WorkoutForm {
    pub machine_id: String,
    pub start_time: String,
    pub duration_min: String,
    pub calories_burned: String,
    #[serde(default)]
    pub avg_heart_rate: String,
    #[serde(default)]
    pub distance_km: String,
    #[serde(default)]
    pub avg_speed_kmh: String,
    #[serde(default)]
    pub notes: String,
    pub csrf_token: String,
}
