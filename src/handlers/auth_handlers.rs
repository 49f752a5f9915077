use actix_session::Session;
use actix_web::{HttpResponse, web};
use chrono::Local;
use serde::Deserialize;

use crate::auth::session::{get_role, get_user_id};
use crate::auth::{csrf, password};
use crate::db::DbPool;
use crate::errors::{AppError, render};
use crate::models::user::{self, LoginForm, UserStatus};
use crate::templates_structs::LoginTemplate;

#[derive(Deserialize)]
pub struct CsrfOnly {
    pub csrf_token: String,
}

pub fn see_other(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header(("Location", location.to_string()))
        .finish()
}

/// GET / — send the browser to the session's dashboard, or the login
/// page when there is no session.
pub async fn root(session: Session) -> HttpResponse {
    match (get_user_id(&session), get_role(&session)) {
        (Some(_), Some(role)) => see_other(role.dashboard_path()),
        _ => see_other("/login"),
    }
}

pub async fn login_page(session: Session) -> Result<HttpResponse, AppError> {
    // If already logged in, go straight to the role's dashboard
    if let (Some(_), Some(role)) = (get_user_id(&session), get_role(&session)) {
        return Ok(see_other(role.dashboard_path()));
    }

    let csrf_token = csrf::get_or_create_token(&session);
    render(LoginTemplate {
        error: None,
        csrf_token,
    })
}

fn login_failed(session: &Session, message: &str) -> Result<HttpResponse, AppError> {
    let csrf_token = csrf::get_or_create_token(session);
    render(LoginTemplate {
        error: Some(message.to_string()),
        csrf_token,
    })
}

pub async fn login_submit(
    pool: web::Data<DbPool>,
    session: Session,
    form: web::Form<LoginForm>,
) -> Result<HttpResponse, AppError> {
    csrf::validate_csrf(&session, &form.csrf_token)?;

    let conn = pool.get()?;
    let found = user::find_by_username(&conn, &form.username)?;

    let Some(u) = found else {
        return login_failed(&session, "Invalid username or password");
    };

    match password::verify_password(&form.password, &u.password) {
        Ok(true) => {
            if u.status != UserStatus::Active {
                return login_failed(&session, "This account is inactive or suspended");
            }

            let now = Local::now().naive_local();
            user::touch_last_login(&conn, u.id, now)?;

            let _ = session.insert("user_id", u.id);
            let _ = session.insert("username", &u.username);
            let _ = session.insert("display_name", u.full_name());
            let _ = session.insert("role", u.role.as_str());
            Ok(see_other(u.role.dashboard_path()))
        }
        Ok(false) => login_failed(&session, "Invalid username or password"),
        // A stored hash that cannot be parsed is a data defect, not a
        // bad credential.
        Err(e) => Err(AppError::Hash(e)),
    }
}

pub async fn logout(
    session: Session,
    form: web::Form<CsrfOnly>,
) -> Result<HttpResponse, AppError> {
    csrf::validate_csrf(&session, &form.csrf_token)?;
    session.purge();
    Ok(see_other("/login"))
}
