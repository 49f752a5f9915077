use actix_session::Session;
use actix_web::{HttpResponse, web};
use chrono::{Local, NaiveDateTime};

use super::auth_handlers::{CsrfOnly, see_other};
use crate::auth::csrf;
use crate::auth::session::{require_role, set_flash};
use crate::charts::{self, ChartConfig};
use crate::db::DbPool;
use crate::errors::{AppError, render};
use crate::models::user::{self, UserRole};
use crate::models::workout::{self, SessionDetail};
use crate::stats;
use crate::templates_structs::{
    InstructorDashboardTemplate, IssueRow, MemberRow, PageContext, ProgressRow, SessionRow,
    common_issue_counts,
};

const STAFF: &[UserRole] = &[UserRole::Instructor, UserRole::Admin];

fn build_charts(sessions: &[SessionDetail], now: NaiveDateTime) -> Vec<ChartConfig> {
    let good = sessions.iter().filter(|s| s.data_quality_flag).count() as i64;
    let issues = sessions.len() as i64 - good;
    vec![
        charts::weekly_activity(
            "weeklyActivityChart",
            "bar",
            &stats::weekly_activity(sessions, now),
        ),
        charts::workout_types(&stats::workout_type_distribution(sessions)),
        charts::quality_overview(good, issues),
        charts::weekly_progress(&stats::weekly_progress(sessions, now)),
    ]
}

/// GET /instructor — the instructor dashboard page.
pub async fn dashboard(
    pool: web::Data<DbPool>,
    session: Session,
) -> Result<HttpResponse, AppError> {
    require_role(&session, STAFF)?;

    let conn = pool.get()?;
    let ctx = PageContext::build(&session)?;
    let now = Local::now().naive_local();

    let members = user::find_members(&conn)?;
    let sessions = workout::find_all_detailed(&conn)?;
    let summaries = stats::member_activity(&members, &sessions);

    let flagged: Vec<SessionDetail> = sessions
        .iter()
        .filter(|s| !s.data_quality_flag)
        .cloned()
        .collect();

    let avg_calories = if sessions.is_empty() {
        0
    } else {
        (stats::total_calories(&sessions) as f64 / sessions.len() as f64).round() as i64
    };

    let charts_json = serde_json::to_string(&build_charts(&sessions, now))?;

    let tmpl = InstructorDashboardTemplate {
        ctx,
        total_members: members.len() as i64,
        sessions_this_week: stats::sessions_this_week(&sessions, now),
        quality_score: stats::data_quality_score(&sessions).round() as i64,
        avg_calories,
        total_sessions: sessions.len() as i64,
        avg_workouts_per_member: stats::avg_workouts_per_member(sessions.len(), members.len()),
        recent: sessions.iter().take(5).map(SessionRow::from_session).collect(),
        members: summaries.iter().map(MemberRow::from_summary).collect(),
        sessions: sessions.iter().map(SessionRow::from_session).collect(),
        issues: flagged.iter().map(IssueRow::from_session).collect(),
        common_issues: common_issue_counts(&flagged),
        progress: summaries.iter().map(ProgressRow::from_summary).collect(),
        charts_json,
    };
    render(tmpl)
}

/// GET /instructor/api/charts — chart configs as JSON for the refresh
/// timer.
pub async fn charts_data(
    pool: web::Data<DbPool>,
    session: Session,
) -> Result<HttpResponse, AppError> {
    require_role(&session, STAFF)?;

    let conn = pool.get()?;
    let sessions = workout::find_all_detailed(&conn)?;

    Ok(HttpResponse::Ok().json(build_charts(&sessions, Local::now().naive_local())))
}

/// POST /instructor/sessions/{id}/review — approve a flagged session.
pub async fn review_session(
    pool: web::Data<DbPool>,
    session: Session,
    path: web::Path<i64>,
    form: web::Form<CsrfOnly>,
) -> Result<HttpResponse, AppError> {
    require_role(&session, STAFF)?;
    csrf::validate_csrf(&session, &form.csrf_token)?;

    let conn = pool.get()?;
    let id = path.into_inner();
    workout::find_by_id(&conn, id)?.ok_or(AppError::NotFound)?;
    workout::review_quality(&conn, id)?;

    set_flash(&session, "success", "Session marked as reviewed and approved");
    Ok(see_other("/instructor"))
}
