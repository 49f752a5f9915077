use actix_session::Session;
use actix_web::{HttpResponse, web};
use chrono::{Local, NaiveDateTime};

use super::auth_handlers::{CsrfOnly, see_other};
use crate::auth::csrf;
use crate::auth::session::{require_role, set_flash};
use crate::charts::{self, ChartConfig};
use crate::db::DbPool;
use crate::errors::{AppError, render};
use crate::models::machine::{self, MachineForm, MachineStatus, MachineUsage, NewMachine};
use crate::models::user::{self, UserRole};
use crate::models::workout::{self, SessionDetail};
use crate::stats;
use crate::templates_structs::{AdminDashboardTemplate, MachineRow, PageContext, UserRow};

const ADMIN_ONLY: &[UserRole] = &[UserRole::Admin];

fn build_charts(
    usage: &[MachineUsage],
    sessions: &[SessionDetail],
    now: NaiveDateTime,
) -> Vec<ChartConfig> {
    vec![
        charts::machine_usage(usage),
        charts::machine_status(usage),
        charts::weekly_activity(
            "userActivityChart",
            "line",
            &stats::weekly_activity(sessions, now),
        ),
    ]
}

/// GET /admin — the admin dashboard page.
pub async fn dashboard(
    pool: web::Data<DbPool>,
    session: Session,
) -> Result<HttpResponse, AppError> {
    require_role(&session, ADMIN_ONLY)?;

    let conn = pool.get()?;
    let ctx = PageContext::build(&session)?;
    let now = Local::now().naive_local();

    let users = user::find_all(&conn)?;
    let usage = machine::find_usage(&conn)?;
    let sessions = workout::find_all_detailed(&conn)?;

    let total_machines = usage.len() as i64;
    let active_machines = usage
        .iter()
        .filter(|m| m.status == MachineStatus::Active)
        .count() as i64;

    let charts_json = serde_json::to_string(&build_charts(&usage, &sessions, now))?;

    let tmpl = AdminDashboardTemplate {
        ctx,
        total_users: users.len() as i64,
        total_sessions: sessions.len() as i64,
        active_machines,
        system_health: stats::system_health(active_machines, total_machines),
        maintenance_due: stats::maintenance_overdue(&usage, now),
        machines: usage.iter().map(|m| MachineRow::from_usage(m, now)).collect(),
        users: users.iter().map(UserRow::from_user).collect(),
        charts_json,
    };
    render(tmpl)
}

/// GET /admin/api/charts — chart configs as JSON for the refresh timer.
pub async fn charts_data(
    pool: web::Data<DbPool>,
    session: Session,
) -> Result<HttpResponse, AppError> {
    require_role(&session, ADMIN_ONLY)?;

    let conn = pool.get()?;
    let now = Local::now().naive_local();
    let usage = machine::find_usage(&conn)?;
    let sessions = workout::find_all_detailed(&conn)?;

    Ok(HttpResponse::Ok().json(build_charts(&usage, &sessions, now)))
}

/// POST /admin/machines — create a machine.
pub async fn machine_create(
    pool: web::Data<DbPool>,
    session: Session,
    form: web::Form<MachineForm>,
) -> Result<HttpResponse, AppError> {
    require_role(&session, ADMIN_ONLY)?;
    csrf::validate_csrf(&session, &form.csrf_token)?;

    let name = form.name.trim();
    let machine_type = form.machine_type.trim();
    if name.is_empty() || machine_type.is_empty() {
        set_flash(&session, "error", "Please fill in all required fields");
        return Ok(see_other("/admin"));
    }

    let conn = pool.get()?;
    if machine::find_by_name(&conn, name)?.is_some() {
        set_flash(
            &session,
            "error",
            &format!("Machine with name {name} already exists"),
        );
        return Ok(see_other("/admin"));
    }

    let new = NewMachine {
        name: name.to_string(),
        machine_type: machine_type.to_string(),
        location: form.location.trim().to_string(),
    };
    machine::create(&conn, &new, Local::now().naive_local())?;
    set_flash(&session, "success", "Machine added successfully!");
    Ok(see_other("/admin"))
}

/// POST /admin/machines/{id}/status — toggle ACTIVE <-> MAINTENANCE.
pub async fn machine_status(
    pool: web::Data<DbPool>,
    session: Session,
    path: web::Path<i64>,
    form: web::Form<CsrfOnly>,
) -> Result<HttpResponse, AppError> {
    require_role(&session, ADMIN_ONLY)?;
    csrf::validate_csrf(&session, &form.csrf_token)?;

    let conn = pool.get()?;
    let m = machine::find_by_id(&conn, path.into_inner())?.ok_or(AppError::NotFound)?;
    let next = m.status.toggled();
    machine::update_status(&conn, m.id, next, Local::now().naive_local())?;

    set_flash(
        &session,
        "success",
        &format!("Machine status updated to {}", next.as_str()),
    );
    Ok(see_other("/admin"))
}

/// POST /admin/machines/{id}/delete — delete, unless sessions exist.
pub async fn machine_delete(
    pool: web::Data<DbPool>,
    session: Session,
    path: web::Path<i64>,
    form: web::Form<CsrfOnly>,
) -> Result<HttpResponse, AppError> {
    require_role(&session, ADMIN_ONLY)?;
    csrf::validate_csrf(&session, &form.csrf_token)?;

    let conn = pool.get()?;
    let m = machine::find_by_id(&conn, path.into_inner())?.ok_or(AppError::NotFound)?;

    if machine::session_count(&conn, m.id)? > 0 {
        set_flash(
            &session,
            "error",
            "Cannot delete a machine with recorded workout sessions",
        );
        return Ok(see_other("/admin"));
    }

    machine::delete(&conn, m.id)?;
    set_flash(&session, "success", "Machine deleted successfully");
    Ok(see_other("/admin"))
}

/// POST /admin/users/{id}/status — cycle ACTIVE -> INACTIVE ->
/// SUSPENDED -> ACTIVE.
pub async fn user_status(
    pool: web::Data<DbPool>,
    session: Session,
    path: web::Path<i64>,
    form: web::Form<CsrfOnly>,
) -> Result<HttpResponse, AppError> {
    require_role(&session, ADMIN_ONLY)?;
    csrf::validate_csrf(&session, &form.csrf_token)?;

    let conn = pool.get()?;
    let u = user::find_by_id(&conn, path.into_inner())?.ok_or(AppError::NotFound)?;
    let next = u.status.next();
    user::update_status(&conn, u.id, next, Local::now().naive_local())?;

    set_flash(
        &session,
        "success",
        &format!("User status updated to {}", next.as_str()),
    );
    Ok(see_other("/admin"))
}
