use actix_session::Session;
use actix_web::{HttpResponse, web};
use chrono::{Local, NaiveDateTime};

use super::auth_handlers::see_other;
use crate::auth::csrf;
use crate::auth::session::{require_role, set_flash};
use crate::db::DbPool;
use crate::errors::{AppError, render};
use crate::models::machine;
use crate::models::user::UserRole;
use crate::models::workout::{self, NewWorkout, WorkoutForm};
use crate::quality;
use crate::stats;
use crate::charts;
use crate::templates_structs::{MachineOption, MemberDashboardTemplate, PageContext, WorkoutRow};

const ANY_ROLE: &[UserRole] = &[UserRole::Member, UserRole::Instructor, UserRole::Admin];

/// Format accepted from `<input type="datetime-local">`.
const START_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M";

/// GET /member — the member's own dashboard page.
pub async fn dashboard(
    pool: web::Data<DbPool>,
    session: Session,
) -> Result<HttpResponse, AppError> {
    let (user_id, _) = require_role(&session, ANY_ROLE)?;

    let conn = pool.get()?;
    let ctx = PageContext::build(&session)?;
    let now = Local::now().naive_local();

    let machines = machine::find_active(&conn)?;
    let sessions = workout::find_for_user(&conn, user_id)?;

    let chart_configs = vec![
        charts::daily_calories(&stats::daily_calories(&sessions)),
        charts::workout_types(&stats::workout_type_distribution(&sessions)),
        charts::monthly_progress(&stats::monthly_progress(&sessions)),
    ];

    let tmpl = MemberDashboardTemplate {
        ctx,
        total_workouts: sessions.len() as i64,
        total_calories: stats::total_calories(&sessions),
        total_distance: format!("{:.1}", stats::total_distance(&sessions)),
        avg_heart_rate: stats::average_heart_rate(&sessions),
        machines: machines.iter().map(MachineOption::from_machine).collect(),
        recent: sessions.iter().take(5).map(WorkoutRow::from_session).collect(),
        history: sessions.iter().map(WorkoutRow::from_session).collect(),
        default_start: now.format(START_TIME_FORMAT).to_string(),
        charts_json: serde_json::to_string(&chart_configs)?,
    };
    render(tmpl)
}

fn parse_required<T: std::str::FromStr>(value: &str, field: &str) -> Result<T, AppError> {
    value
        .trim()
        .parse()
        .map_err(|_| AppError::Validation(format!("Invalid value for {field}")))
}

fn parse_optional<T: std::str::FromStr>(value: &str, field: &str) -> Result<Option<T>, AppError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    trimmed
        .parse()
        .map(Some)
        .map_err(|_| AppError::Validation(format!("Invalid value for {field}")))
}

fn parse_workout(form: &WorkoutForm, user_id: i64) -> Result<NewWorkout, AppError> {
    let start_time = NaiveDateTime::parse_from_str(form.start_time.trim(), START_TIME_FORMAT)
        .map_err(|_| AppError::Validation("Invalid start time".to_string()))?;
    let notes = form.notes.trim();
    Ok(NewWorkout {
        user_id,
        machine_id: parse_required(&form.machine_id, "machine")?,
        start_time,
        duration_min: parse_required(&form.duration_min, "duration")?,
        calories_burned: parse_required(&form.calories_burned, "calories")?,
        avg_heart_rate: parse_optional(&form.avg_heart_rate, "heart rate")?,
        distance_km: parse_optional(&form.distance_km, "distance")?,
        avg_speed_kmh: parse_optional(&form.avg_speed_kmh, "speed")?,
        notes: (!notes.is_empty()).then(|| notes.to_string()),
    })
}

/// POST /member/workouts — log a workout for the logged-in user.
///
/// Structurally invalid input (unparsable numbers, unknown machine) is
/// refused with an error flash. Values that merely fall outside the
/// plausibility thresholds are stored with a cleared quality flag.
pub async fn workout_create(
    pool: web::Data<DbPool>,
    session: Session,
    form: web::Form<WorkoutForm>,
) -> Result<HttpResponse, AppError> {
    let (user_id, _) = require_role(&session, ANY_ROLE)?;
    csrf::validate_csrf(&session, &form.csrf_token)?;

    let new = match parse_workout(&form, user_id) {
        Ok(new) => new,
        Err(AppError::Validation(msg)) => {
            set_flash(&session, "error", &msg);
            return Ok(see_other("/member"));
        }
        Err(e) => return Err(e),
    };

    let conn = pool.get()?;
    if machine::find_by_id(&conn, new.machine_id)?.is_none() {
        set_flash(&session, "error", "Selected machine does not exist");
        return Ok(see_other("/member"));
    }

    let now = Local::now().naive_local();
    let outcome = quality::check(&new, now);
    workout::create(&conn, &new, &outcome, now)?;

    if outcome.flag {
        set_flash(&session, "success", "Workout logged successfully!");
    } else {
        set_flash(
            &session,
            "warning",
            "Workout logged, but some readings look implausible and were flagged for review",
        );
    }
    Ok(see_other("/member"))
}
