use actix_session::Session;
use actix_web::{HttpResponse, web};
use chrono::{Duration, Local, NaiveDate, NaiveTime};
use serde::Deserialize;

use crate::auth::session::require_role;
use crate::db::DbPool;
use crate::errors::AppError;
use crate::models::machine::{self, MachineStatus};
use crate::models::user::{self, UserRole};
use crate::models::workout;
use crate::reports::{self, SystemReport};
use crate::stats;

const STAFF: &[UserRole] = &[UserRole::Instructor, UserRole::Admin];

#[derive(Debug, Deserialize)]
pub struct PeriodQuery {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct MemberQuery {
    pub user_id: i64,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

fn csv_attachment(filename: &str, body: String) -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/csv; charset=utf-8")
        .insert_header((
            "Content-Disposition",
            format!("attachment; filename=\"{filename}\""),
        ))
        .body(body)
}

/// Resolve the requested period, defaulting to the trailing 30 days.
fn parse_period(
    start: &Option<String>,
    end: &Option<String>,
    today: NaiveDate,
) -> Result<(NaiveDate, NaiveDate), AppError> {
    let parse = |value: &Option<String>, fallback: NaiveDate| match value {
        Some(s) if !s.trim().is_empty() => NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
            .map_err(|_| AppError::Validation(format!("Invalid date '{}'", s.trim()))),
        _ => Ok(fallback),
    };
    let end = parse(end, today)?;
    let start = parse(start, end - Duration::days(30))?;
    if start > end {
        return Err(AppError::Validation(
            "Start date must not be after end date".to_string(),
        ));
    }
    Ok((start, end))
}

/// GET /reports/usage.csv — machine usage over a period.
pub async fn usage(
    pool: web::Data<DbPool>,
    session: Session,
    query: web::Query<PeriodQuery>,
) -> Result<HttpResponse, AppError> {
    require_role(&session, STAFF)?;

    let now = Local::now().naive_local();
    let (start, end) = parse_period(&query.start_date, &query.end_date, now.date())?;

    let conn = pool.get()?;
    let sessions = workout::find_between(
        &conn,
        start.and_time(NaiveTime::MIN),
        (end + Duration::days(1)).and_time(NaiveTime::MIN),
    )?;

    Ok(csv_attachment(
        "machine-usage-report.csv",
        reports::usage_csv(&sessions, start, end),
    ))
}

/// GET /reports/member-progress.csv — one member's sessions and summary.
pub async fn member_progress(
    pool: web::Data<DbPool>,
    session: Session,
    query: web::Query<MemberQuery>,
) -> Result<HttpResponse, AppError> {
    require_role(&session, STAFF)?;

    let now = Local::now().naive_local();
    let (start, end) = parse_period(&query.start_date, &query.end_date, now.date())?;

    let conn = pool.get()?;
    let member = user::find_by_id(&conn, query.user_id)?.ok_or(AppError::NotFound)?;
    let sessions = workout::find_for_user_between(
        &conn,
        member.id,
        start.and_time(NaiveTime::MIN),
        (end + Duration::days(1)).and_time(NaiveTime::MIN),
    )?;

    Ok(csv_attachment(
        "member-progress-report.csv",
        reports::member_progress_csv(&member, &sessions, start, end),
    ))
}

/// GET /reports/data-quality.csv — flagged sessions, fixed header shape.
pub async fn data_quality(
    pool: web::Data<DbPool>,
    session: Session,
) -> Result<HttpResponse, AppError> {
    require_role(&session, STAFF)?;

    let conn = pool.get()?;
    let sessions = workout::find_all_detailed(&conn)?;

    Ok(csv_attachment(
        "data-quality-report.csv",
        reports::data_quality_csv(&sessions, Local::now().naive_local()),
    ))
}

/// GET /reports/system.csv — key figures for the whole installation.
pub async fn system(
    pool: web::Data<DbPool>,
    session: Session,
) -> Result<HttpResponse, AppError> {
    require_role(&session, STAFF)?;

    let conn = pool.get()?;
    let now = Local::now().naive_local();
    let sessions = workout::find_all_detailed(&conn)?;

    let report = SystemReport {
        total_users: user::count(&conn)?,
        total_machines: machine::count(&conn)?,
        total_sessions: sessions.len() as i64,
        active_machines: machine::count_by_status(&conn, MachineStatus::Active)?,
        recent_sessions: stats::sessions_this_week(&sessions, now),
        data_quality_score: stats::data_quality_score(&sessions),
    };

    Ok(csv_attachment(
        "system-report.csv",
        reports::system_csv(&report, now),
    ))
}
