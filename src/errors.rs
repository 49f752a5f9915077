use actix_web::{HttpResponse, ResponseError};
use askama::Template;
use std::fmt;

#[derive(Debug)]
pub enum AppError {
    Db(rusqlite::Error),
    Pool(r2d2::Error),
    Template(askama::Error),
    Json(serde_json::Error),
    Hash(String),
    Session(String),
    Validation(String),
    PermissionDenied(String),
    Unauthorized,
    /// Authenticated, but this page belongs to another role. Carries the
    /// path of the user's own dashboard.
    WrongRole(&'static str),
    NotFound,
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Db(e) => write!(f, "Database error: {e}"),
            AppError::Pool(e) => write!(f, "Pool error: {e}"),
            AppError::Template(e) => write!(f, "Template error: {e}"),
            AppError::Json(e) => write!(f, "JSON error: {e}"),
            AppError::Hash(e) => write!(f, "Hash error: {e}"),
            AppError::Session(e) => write!(f, "Session error: {e}"),
            AppError::Validation(e) => write!(f, "Validation error: {e}"),
            AppError::PermissionDenied(e) => write!(f, "Permission denied: {e}"),
            AppError::Unauthorized => write!(f, "Not authenticated"),
            AppError::WrongRole(path) => write!(f, "Wrong role for this page (home: {path})"),
            AppError::NotFound => write!(f, "Not found"),
        }
    }
}

impl ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        match self {
            AppError::NotFound => HttpResponse::NotFound().body("Not Found"),
            // No session or wrong role: send the browser back through the login gate
            AppError::Unauthorized => HttpResponse::SeeOther()
                .insert_header(("Location", "/login"))
                .finish(),
            // Logged in, wrong dashboard: send them to their own
            AppError::WrongRole(path) => HttpResponse::SeeOther()
                .insert_header(("Location", *path))
                .finish(),
            AppError::PermissionDenied(e) => {
                HttpResponse::Forbidden().body(format!("Forbidden: {e}"))
            }
            AppError::Validation(e) => HttpResponse::BadRequest().body(format!("Bad request: {e}")),
            _ => {
                log::error!("{self}");
                HttpResponse::InternalServerError().body("Internal Server Error")
            }
        }
    }
}

impl From<rusqlite::Error> for AppError {
    fn from(e: rusqlite::Error) -> Self {
        AppError::Db(e)
    }
}

impl From<r2d2::Error> for AppError {
    fn from(e: r2d2::Error) -> Self {
        AppError::Pool(e)
    }
}

impl From<askama::Error> for AppError {
    fn from(e: askama::Error) -> Self {
        AppError::Template(e)
    }
}

impl From<serde_json::Error> for AppError {
    fn from(e: serde_json::Error) -> Self {
        AppError::Json(e)
    }
}

/// Render an Askama template into an HTML response.
pub fn render<T: Template>(tmpl: T) -> Result<HttpResponse, AppError> {
    Ok(HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(tmpl.render()?))
}
