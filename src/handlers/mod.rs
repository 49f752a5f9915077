pub mod admin_handlers;
pub mod auth_handlers;
pub mod instructor_handlers;
pub mod member_handlers;
pub mod report_handlers;
