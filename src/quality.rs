//! Data-quality validation for logged workouts.
//!
//! Out-of-range readings do not reject a session; they clear its quality
//! flag and record the issues for instructor review.

use chrono::{Duration, NaiveDateTime};

use crate::models::workout::NewWorkout;

pub const MIN_CALORIES: i64 = 1;
pub const MAX_CALORIES: i64 = 1500;
pub const MIN_HEART_RATE: i64 = 40;
pub const MAX_HEART_RATE: i64 = 220;
pub const MAX_DISTANCE_KM: f64 = 50.0;
pub const MAX_SPEED_KMH: f64 = 30.0;
pub const MIN_DURATION_MIN: i64 = 1;
pub const MAX_DURATION_MIN: i64 = 180;

/// Verdict stored alongside the session.
#[derive(Debug, Clone)]
pub struct QualityOutcome {
    pub flag: bool,
    pub issues: Option<String>,
}

/// Check a workout against the plausibility thresholds.
pub fn check(w: &NewWorkout, now: NaiveDateTime) -> QualityOutcome {
    let mut issues: Vec<&str> = Vec::new();

    if w.calories_burned < MIN_CALORIES {
        issues.push("Calories burned cannot be less than 1");
    }
    if w.calories_burned > MAX_CALORIES {
        issues.push("Calories burned cannot exceed 1500 per session");
    }

    if let Some(hr) = w.avg_heart_rate {
        if hr < MIN_HEART_RATE {
            issues.push("Heart rate cannot be less than 40 bpm");
        }
        if hr > MAX_HEART_RATE {
            issues.push("Heart rate cannot exceed 220 bpm");
        }
    }

    if let Some(d) = w.distance_km {
        if d < 0.0 {
            issues.push("Distance cannot be negative");
        }
        if d > MAX_DISTANCE_KM {
            issues.push("Distance cannot exceed 50 km per session");
        }
    }

    if let Some(s) = w.avg_speed_kmh {
        if s < 0.0 {
            issues.push("Speed cannot be negative");
        }
        if s > MAX_SPEED_KMH {
            issues.push("Speed cannot exceed 30 km/h");
        }
    }

    if w.duration_min < MIN_DURATION_MIN {
        issues.push("Workout duration must be at least 1 minute");
    }
    if w.duration_min > MAX_DURATION_MIN {
        issues.push("Workout duration cannot exceed 3 hours");
    }

    if w.start_time > now {
        issues.push("Start time cannot be in the future");
    }
    if w.start_time < now - Duration::days(365) {
        issues.push("Start time is too far in the past");
    }

    if issues.is_empty() {
        QualityOutcome {
            flag: true,
            issues: None,
        }
    } else {
        QualityOutcome {
            flag: false,
            issues: Some(issues.join("; ")),
        }
    }
}
