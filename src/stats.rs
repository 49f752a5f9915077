//! Derived statistics for the dashboards.
//!
//! Pure functions over already-fetched entity lists. These are
//! presentation heuristics (threshold bands, engagement bars), not
//! domain-verified metrics: the exact constants — the 30/60/90 day
//! maintenance penalty bands, the x10 engagement multiplier — are kept
//! as-is from the reference behavior.

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime, Weekday};

use crate::models::machine::MachineUsage;
use crate::models::user::User;
use crate::models::workout::SessionDetail;

/// Mean of the positive heart-rate readings, rounded. Sessions without
/// a reading, or with a non-positive one, are excluded.
pub fn average_heart_rate(sessions: &[SessionDetail]) -> i64 {
    let rates: Vec<i64> = sessions
        .iter()
        .filter_map(|s| s.avg_heart_rate)
        .filter(|&hr| hr > 0)
        .collect();
    if rates.is_empty() {
        return 0;
    }
    (rates.iter().sum::<i64>() as f64 / rates.len() as f64).round() as i64
}

/// Percentage of sessions whose quality flag is set. An empty list
/// scores 100.
pub fn data_quality_score(sessions: &[SessionDetail]) -> f64 {
    if sessions.is_empty() {
        return 100.0;
    }
    let good = sessions.iter().filter(|s| s.data_quality_flag).count();
    good as f64 / sessions.len() as f64 * 100.0
}

/// Penalty bands by days since maintenance: never=50, <=30d none,
/// <=60d 20, <=90d 40, beyond 60.
pub fn maintenance_penalty(last_maintenance: Option<NaiveDateTime>, now: NaiveDateTime) -> f64 {
    let Some(last) = last_maintenance else {
        return 50.0;
    };
    let days = (now - last).num_days();
    if days <= 30 {
        0.0
    } else if days <= 60 {
        20.0
    } else if days <= 90 {
        40.0
    } else {
        60.0
    }
}

/// Heuristic machine performance score in 0..=100: base 100, plus a
/// session bonus capped at 20, minus the maintenance penalty.
pub fn performance_score(
    total_sessions: i64,
    last_maintenance: Option<NaiveDateTime>,
    now: NaiveDateTime,
) -> f64 {
    let bonus = (total_sessions as f64 / 10.0).min(20.0);
    let penalty = maintenance_penalty(last_maintenance, now);
    (100.0 + bonus - penalty).clamp(0.0, 100.0)
}

pub fn performance_color(score: f64) -> &'static str {
    if score >= 80.0 {
        "success"
    } else if score >= 60.0 {
        "warning"
    } else {
        "danger"
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HealthStatus {
    Unknown,
    Excellent,
    Good,
    Fair,
    Poor,
}

impl HealthStatus {
    pub fn label(&self) -> &'static str {
        match self {
            HealthStatus::Unknown => "UNKNOWN",
            HealthStatus::Excellent => "EXCELLENT",
            HealthStatus::Good => "GOOD",
            HealthStatus::Fair => "FAIR",
            HealthStatus::Poor => "POOR",
        }
    }

    pub fn badge_color(&self) -> &'static str {
        match self {
            HealthStatus::Unknown => "secondary",
            HealthStatus::Excellent => "success",
            HealthStatus::Good => "primary",
            HealthStatus::Fair => "warning",
            HealthStatus::Poor => "danger",
        }
    }
}

/// Health label by days since maintenance: <=7d excellent, <=30d good,
/// <=60d fair, beyond poor.
pub fn health_status(last_maintenance: Option<NaiveDateTime>, now: NaiveDateTime) -> HealthStatus {
    let Some(last) = last_maintenance else {
        return HealthStatus::Unknown;
    };
    let days = (now - last).num_days();
    if days <= 7 {
        HealthStatus::Excellent
    } else if days <= 30 {
        HealthStatus::Good
    } else if days <= 60 {
        HealthStatus::Fair
    } else {
        HealthStatus::Poor
    }
}

/// System health as the percentage of machines that are ACTIVE.
/// 100 when there are no machines at all.
pub fn system_health(active_machines: i64, total_machines: i64) -> i64 {
    if total_machines == 0 {
        return 100;
    }
    (active_machines as f64 / total_machines as f64 * 100.0).round() as i64
}

/// Machines more than 30 days past maintenance (or never maintained).
pub fn maintenance_overdue(machines: &[MachineUsage], now: NaiveDateTime) -> usize {
    machines
        .iter()
        .filter(|m| match m.last_maintenance {
            None => true,
            Some(last) => (now - last).num_days() > 30,
        })
        .count()
}

const WEEKDAY_LABELS: [(Weekday, &str); 7] = [
    (Weekday::Mon, "Mon"),
    (Weekday::Tue, "Tue"),
    (Weekday::Wed, "Wed"),
    (Weekday::Thu, "Thu"),
    (Weekday::Fri, "Fri"),
    (Weekday::Sat, "Sat"),
    (Weekday::Sun, "Sun"),
];

/// Session counts per weekday over the trailing seven days, Mon..Sun.
pub fn weekly_activity(sessions: &[SessionDetail], now: NaiveDateTime) -> Vec<(String, i64)> {
    let cutoff = now - Duration::days(7);
    WEEKDAY_LABELS
        .iter()
        .map(|(day, label)| {
            let count = sessions
                .iter()
                .filter(|s| s.start_time > cutoff && s.start_time <= now)
                .filter(|s| s.start_time.weekday() == *day)
                .count() as i64;
            (label.to_string(), count)
        })
        .collect()
}

/// Session counts per machine type, alphabetical.
pub fn workout_type_distribution(sessions: &[SessionDetail]) -> Vec<(String, i64)> {
    let mut counts = std::collections::BTreeMap::new();
    for s in sessions {
        *counts.entry(s.machine_type.clone()).or_insert(0i64) += 1;
    }
    counts.into_iter().collect()
}

#[derive(Debug, Clone)]
pub struct WeekProgress {
    pub label: String,
    pub avg_calories: i64,
    pub avg_duration: i64,
}

/// Average calories and duration for each of the four trailing weeks,
/// oldest first ("Week 1".."Week 4").
pub fn weekly_progress(sessions: &[SessionDetail], now: NaiveDateTime) -> Vec<WeekProgress> {
    (0..4)
        .rev()
        .map(|i| {
            let start = (now - Duration::weeks(i)).date().and_time(NaiveTime::MIN);
            let end = start + Duration::days(7);
            let week: Vec<&SessionDetail> = sessions
                .iter()
                .filter(|s| s.start_time >= start && s.start_time < end)
                .collect();
            let (avg_calories, avg_duration) = if week.is_empty() {
                (0, 0)
            } else {
                let cal: i64 = week.iter().map(|s| s.calories_burned).sum();
                let dur: i64 = week.iter().map(|s| s.duration_min).sum();
                (
                    (cal as f64 / week.len() as f64).round() as i64,
                    (dur as f64 / week.len() as f64).round() as i64,
                )
            };
            WeekProgress {
                label: format!("Week {}", 4 - i),
                avg_calories,
                avg_duration,
            }
        })
        .collect()
}

/// Calories summed per day, limited to the seven most recent active
/// days, oldest first.
pub fn daily_calories(sessions: &[SessionDetail]) -> Vec<(NaiveDate, i64)> {
    let mut per_day = std::collections::BTreeMap::new();
    for s in sessions {
        *per_day.entry(s.start_time.date()).or_insert(0i64) += s.calories_burned;
    }
    let days: Vec<(NaiveDate, i64)> = per_day.into_iter().collect();
    let skip = days.len().saturating_sub(7);
    days.into_iter().skip(skip).collect()
}

#[derive(Debug, Clone)]
pub struct MonthProgress {
    pub label: String,
    pub workouts: i64,
    pub calories: i64,
}

/// Workout count and calories per calendar month, oldest first.
pub fn monthly_progress(sessions: &[SessionDetail]) -> Vec<MonthProgress> {
    let mut per_month = std::collections::BTreeMap::new();
    for s in sessions {
        let key = (s.start_time.year(), s.start_time.month());
        let entry = per_month.entry(key).or_insert((0i64, 0i64));
        entry.0 += 1;
        entry.1 += s.calories_burned;
    }
    per_month
        .into_iter()
        .map(|((year, month), (workouts, calories))| MonthProgress {
            label: NaiveDate::from_ymd_opt(year, month, 1)
                .map(|d| d.format("%b %Y").to_string())
                .unwrap_or_default(),
            workouts,
            calories,
        })
        .collect()
}

pub fn total_calories(sessions: &[SessionDetail]) -> i64 {
    sessions.iter().map(|s| s.calories_burned).sum()
}

pub fn total_distance(sessions: &[SessionDetail]) -> f64 {
    sessions.iter().filter_map(|s| s.distance_km).sum()
}

/// Sessions started within the trailing seven days.
pub fn sessions_this_week(sessions: &[SessionDetail], now: NaiveDateTime) -> i64 {
    let cutoff = now - Duration::days(7);
    sessions.iter().filter(|s| s.start_time > cutoff).count() as i64
}

/// Distinct members with at least one session this week.
pub fn active_this_week(sessions: &[SessionDetail], now: NaiveDateTime) -> i64 {
    let cutoff = now - Duration::days(7);
    let mut seen = std::collections::BTreeSet::new();
    for s in sessions.iter().filter(|s| s.start_time > cutoff) {
        seen.insert(s.user_id);
    }
    seen.len() as i64
}

/// Mean sessions per member, one decimal place. 0 with no members.
pub fn avg_workouts_per_member(total_sessions: usize, member_count: usize) -> f64 {
    if member_count == 0 {
        return 0.0;
    }
    (total_sessions as f64 / member_count as f64 * 10.0).round() / 10.0
}

/// Engagement bar width: ten percent per workout, capped at 100.
pub fn engagement_percent(total_workouts: i64) -> i64 {
    (total_workouts * 10).min(100)
}

/// Coarse activity tier for the progress table.
pub fn progress_level(total_workouts: i64) -> (&'static str, &'static str) {
    if total_workouts > 10 {
        ("Active", "success")
    } else if total_workouts > 5 {
        ("Moderate", "warning")
    } else {
        ("Beginner", "secondary")
    }
}

/// Per-member aggregates for the instructor tables.
#[derive(Debug, Clone)]
pub struct MemberSummary {
    pub user_id: i64,
    pub name: String,
    pub email: String,
    pub total_workouts: i64,
    pub total_calories: i64,
    pub avg_calories: i64,
    pub avg_duration: i64,
    pub avg_heart_rate: i64,
    pub last_activity: Option<NaiveDateTime>,
}

/// Fold every member's sessions into summary rows. Members without
/// sessions appear with zeroed aggregates. Heart-rate averaging here
/// counts missing readings as zero, matching the member-table figures
/// of the reference behavior (the headline stat uses
/// [`average_heart_rate`] instead).
pub fn member_activity(members: &[User], sessions: &[SessionDetail]) -> Vec<MemberSummary> {
    members
        .iter()
        .map(|member| {
            let own: Vec<&SessionDetail> = sessions
                .iter()
                .filter(|s| s.user_id == member.id)
                .collect();
            let total_workouts = own.len() as i64;
            let total_calories: i64 = own.iter().map(|s| s.calories_burned).sum();
            let (avg_calories, avg_duration, avg_heart_rate) = if own.is_empty() {
                (0, 0, 0)
            } else {
                let n = own.len() as f64;
                let dur: i64 = own.iter().map(|s| s.duration_min).sum();
                let hr: i64 = own.iter().map(|s| s.avg_heart_rate.unwrap_or(0)).sum();
                (
                    (total_calories as f64 / n).round() as i64,
                    (dur as f64 / n).round() as i64,
                    (hr as f64 / n).round() as i64,
                )
            };
            MemberSummary {
                user_id: member.id,
                name: member.full_name(),
                email: member.email.clone(),
                total_workouts,
                total_calories,
                avg_calories,
                avg_duration,
                avg_heart_rate,
                last_activity: own.iter().map(|s| s.start_time).max(),
            }
        })
        .collect()
}
