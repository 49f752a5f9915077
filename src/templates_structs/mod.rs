// Template context structures for Askama templates, organized by page.

use actix_session::Session;

use crate::auth::csrf;
use crate::auth::session::{Flash, get_display_name, get_role, get_username, take_flash};
use crate::errors::AppError;
use crate::models::user::UserRole;

/// Common context shared by all authenticated pages.
/// Templates access these as `ctx.display_name`, `ctx.flash`, etc.
pub struct PageContext {
    pub username: String,
    pub display_name: String,
    pub avatar_initials: String,
    pub role: UserRole,
    pub flash: Option<Flash>,
    pub csrf_token: String,
}

impl PageContext {
    pub fn build(session: &Session) -> Result<Self, AppError> {
        let username = get_username(session).map_err(AppError::Session)?;
        let display_name = get_display_name(session).unwrap_or_else(|| username.clone());
        let role = get_role(session).ok_or(AppError::Unauthorized)?;
        let flash = take_flash(session);
        let csrf_token = csrf::get_or_create_token(session);
        let avatar_initials = initials(&display_name);
        Ok(Self {
            username,
            display_name,
            avatar_initials,
            role,
            flash,
            csrf_token,
        })
    }

    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }

    /// Staff see the instructor tools and report downloads.
    pub fn is_staff(&self) -> bool {
        matches!(self.role, UserRole::Admin | UserRole::Instructor)
    }

    pub fn role_label(&self) -> &'static str {
        self.role.as_str()
    }
}

fn initials(display_name: &str) -> String {
    display_name
        .split_whitespace()
        .take(2)
        .filter_map(|word| word.chars().next())
        .collect::<String>()
        .to_uppercase()
}

mod admin;
mod common;
mod instructor;
mod member;

pub use self::admin::{AdminDashboardTemplate, MachineRow, UserRow};
pub use self::common::LoginTemplate;
pub use self::instructor::{
    InstructorDashboardTemplate, IssueRow, MemberRow, ProgressRow, SessionRow,
    common_issue_counts,
};
pub use self::member::{MachineOption, MemberDashboardTemplate, WorkoutRow};
