use askama::Template;

use super::PageContext;
use crate::models::workout::SessionDetail;
use crate::stats::{self, MemberSummary};

#[derive(Template)]
#[template(path = "instructor.html")]
pub struct InstructorDashboardTemplate {
    pub ctx: PageContext,
    pub total_members: i64,
    pub sessions_this_week: i64,
    pub quality_score: i64,
    pub avg_calories: i64,
    pub total_sessions: i64,
    pub avg_workouts_per_member: f64,
    pub recent: Vec<SessionRow>,
    pub members: Vec<MemberRow>,
    pub sessions: Vec<SessionRow>,
    pub issues: Vec<IssueRow>,
    pub common_issues: Vec<(String, i64)>,
    pub progress: Vec<ProgressRow>,
    pub charts_json: String,
}

/// Pre-formatted workout session row.
pub struct SessionRow {
    pub id: i64,
    pub user_name: String,
    pub machine_name: String,
    pub start_time: String,
    pub duration: String,
    pub calories: i64,
    pub heart_rate: String,
    pub distance: String,
    pub quality_good: bool,
}

impl SessionRow {
    pub fn from_session(s: &SessionDetail) -> Self {
        SessionRow {
            id: s.id,
            user_name: s.user_name.clone(),
            machine_name: s.machine_name.clone(),
            start_time: s.start_time.format("%Y-%m-%d %H:%M").to_string(),
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

pub struct MemberRow {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub total_workouts: i64,
    pub last_activity: String,
    pub avg_calories: i64,
    pub engagement: i64,
}

impl MemberRow {
    pub fn from_summary(m: &MemberSummary) -> Self {
        MemberRow {
            id: m.user_id,
            name: m.name.clone(),
            email: m.email.clone(),
            total_workouts: m.total_workouts,
            last_activity: m
                .last_activity
                .map(|t| t.format("%Y-%m-%d").to_string())
                .unwrap_or_else(|| "No activity".to_string()),
            avg_calories: m.avg_calories,
            engagement: stats::engagement_percent(m.total_workouts),
        }
    }
}

/// Row in the quality-issues table (sessions with a cleared flag).
pub struct IssueRow {
    pub id: i64,
    pub user_name: String,
    pub date: String,
    pub machine_name: String,
    pub issue: String,
}

impl IssueRow {
    pub fn from_session(s: &SessionDetail) -> Self {
        IssueRow {
            id: s.id,
            user_name: s.user_name.clone(),
            date: s.start_time.format("%Y-%m-%d").to_string(),
            machine_name: s.machine_name.clone(),
            issue: s
                .quality_issues
                .clone()
                .unwrap_or_else(|| "Data quality issues detected".to_string()),
        }
    }
}

pub struct ProgressRow {
    pub name: String,
    pub total_workouts: i64,
    pub total_calories: i64,
    pub avg_duration: i64,
    pub avg_heart_rate: String,
    pub level: &'static str,
    pub level_color: &'static str,
}

impl ProgressRow {
    pub fn from_summary(m: &MemberSummary) -> Self {
        let (level, level_color) = stats::progress_level(m.total_workouts);
        ProgressRow {
            name: m.name.clone(),
            total_workouts: m.total_workouts,
            total_calories: m.total_calories,
            avg_duration: m.avg_duration,
            avg_heart_rate: if m.avg_heart_rate > 0 {
                format!("{} bpm", m.avg_heart_rate)
            } else {
                "N/A".to_string()
            },
            level,
            level_color,
        }
    }
}

/// Tally of identical issue texts for the "common issues" list.
pub fn common_issue_counts(issues: &[SessionDetail]) -> Vec<(String, i64)> {
    let mut counts = std::collections::BTreeMap::new();
    for s in issues {
        let issue = s
            .quality_issues
            .clone()
            .unwrap_or_else(|| "Unknown Issue".to_string());
        *counts.entry(issue).or_insert(0i64) += 1;
    }
    counts.into_iter().collect()
}
