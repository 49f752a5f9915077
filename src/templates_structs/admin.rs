use askama::Template;
use chrono::NaiveDateTime;

use super::PageContext;
use crate::models::machine::MachineUsage;
use crate::models::user::User;
use crate::stats;

#[derive(Template)]
#[template(path = "admin.html")]
pub struct AdminDashboardTemplate {
    pub ctx: PageContext,
    pub total_users: i64,
    pub total_sessions: i64,
    pub active_machines: i64,
    pub system_health: i64,
    pub maintenance_due: usize,
    pub machines: Vec<MachineRow>,
    pub users: Vec<UserRow>,
    pub charts_json: String,
}

/// Pre-formatted machine table row.
pub struct MachineRow {
    pub id: i64,
    pub name: String,
    pub machine_type: String,
    pub location: String,
    pub status: &'static str,
    pub status_color: &'static str,
    pub next_status: &'static str,
    pub total_sessions: i64,
    pub avg_calories: i64,
    pub health: &'static str,
    pub health_color: &'static str,
    pub performance: i64,
    pub performance_color: &'static str,
    pub last_maintenance: String,
}

impl MachineRow {
    pub fn from_usage(m: &MachineUsage, now: NaiveDateTime) -> Self {
        let health = stats::health_status(m.last_maintenance, now);
        let score = stats::performance_score(m.total_sessions, m.last_maintenance, now);
        MachineRow {
            id: m.id,
            name: m.name.clone(),
            machine_type: m.machine_type.clone(),
            location: m.location.clone(),
            status: m.status.as_str(),
            status_color: m.status.badge_color(),
            next_status: m.status.toggled().as_str(),
            total_sessions: m.total_sessions,
            avg_calories: m.avg_calories.round() as i64,
            health: health.label(),
            health_color: health.badge_color(),
            performance: score.round() as i64,
            performance_color: stats::performance_color(score),
            last_maintenance: m
                .last_maintenance
                .map(|t| t.format("%Y-%m-%d").to_string())
                .unwrap_or_else(|| "Never".to_string()),
        }
    }
}

/// Pre-formatted user table row.
pub struct UserRow {
    pub id: i64,
    pub username: String,
    pub full_name: String,
    pub email: String,
    pub initials: String,
    pub role: &'static str,
    pub role_color: &'static str,
    pub status: &'static str,
    pub status_color: &'static str,
    pub next_status: &'static str,
    pub last_login: String,
    pub joined: String,
}

impl UserRow {
    pub fn from_user(u: &User) -> Self {
        UserRow {
            id: u.id,
            username: u.username.clone(),
            full_name: u.full_name(),
            email: u.email.clone(),
            initials: u.initials(),
            role: u.role.as_str(),
            role_color: u.role.badge_color(),
            status: u.status.as_str(),
            status_color: u.status.badge_color(),
            next_status: u.status.next().as_str(),
            last_login: u
                .last_login
                .map(|t| t.format("%Y-%m-%d").to_string())
                .unwrap_or_else(|| "Never".to_string()),
            joined: u.created_at.format("%Y-%m-%d").to_string(),
        }
    }
}
