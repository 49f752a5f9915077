use actix_session::Session;

use crate::errors::AppError;
use crate::models::user::UserRole;

/// A transient notification stored in the session and shown once on the
/// next rendered page.
#[derive(Debug, Clone)]
pub struct Flash {
    pub level: String,
    pub message: String,
}

impl Flash {
    /// Bootstrap alert class for this flash level.
    pub fn alert_class(&self) -> &'static str {
        match self.level.as_str() {
            "success" => "alert-success",
            "error" => "alert-danger",
            "warning" => "alert-warning",
            _ => "alert-info",
        }
    }
}

pub fn get_user_id(session: &Session) -> Option<i64> {
    session.get::<i64>("user_id").unwrap_or(None)
}

pub fn get_username(session: &Session) -> Result<String, String> {
    match session.get::<String>("username") {
        Ok(Some(username)) => Ok(username),
        Ok(None) => Err("No username in session".to_string()),
        Err(e) => Err(format!("Session error: {}", e)),
    }
}

pub fn get_display_name(session: &Session) -> Option<String> {
    session.get::<String>("display_name").unwrap_or(None)
}

pub fn get_role(session: &Session) -> Option<UserRole> {
    session
        .get::<String>("role")
        .unwrap_or(None)
        .and_then(|r| UserRole::parse(&r))
}

/// Store a flash message for the next page render.
pub fn set_flash(session: &Session, level: &str, message: &str) {
    let _ = session.insert("flash", format!("{level}|{message}"));
}

/// Take the pending flash message, removing it from the session.
pub fn take_flash(session: &Session) -> Option<Flash> {
    let raw = session.get::<String>("flash").unwrap_or(None)?;
    session.remove("flash");
    let (level, message) = raw.split_once('|').unwrap_or(("info", raw.as_str()));
    Some(Flash {
        level: level.to_string(),
        message: message.to_string(),
    })
}

/// Check that the session belongs to one of the allowed roles.
///
/// No session at all redirects to /login; an authenticated user with
/// the wrong role is sent back to their own dashboard.
pub fn require_role(session: &Session, allowed: &[UserRole]) -> Result<(i64, UserRole), AppError> {
    let user_id = get_user_id(session).ok_or(AppError::Unauthorized)?;
    let role = get_role(session).ok_or(AppError::Unauthorized)?;
    if allowed.contains(&role) {
        Ok((user_id, role))
    } else {
        Err(AppError::WrongRole(role.dashboard_path()))
    }
}
