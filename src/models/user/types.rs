use chrono::NaiveDateTime;
use serde::Deserialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserRole {
    Admin,
    Instructor,
    Member,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Admin => "ADMIN",
            UserRole::Instructor => "INSTRUCTOR",
            UserRole::Member => "MEMBER",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "ADMIN" => Some(UserRole::Admin),
            "INSTRUCTOR" => Some(UserRole::Instructor),
            "MEMBER" => Some(UserRole::Member),
            _ => None,
        }
    }

    /// Landing page for this role after login.
    pub fn dashboard_path(&self) -> &'static str {
        match self {
            UserRole::Admin => "/admin",
            UserRole::Instructor => "/instructor",
            UserRole::Member => "/member",
        }
    }

    pub fn badge_color(&self) -> &'static str {
        match self {
            UserRole::Admin => "danger",
            UserRole::Instructor => "warning",
            UserRole::Member => "primary",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserStatus {
    Active,
    Inactive,
    Suspended,
}

impl UserStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserStatus::Active => "ACTIVE",
            UserStatus::Inactive => "INACTIVE",
            UserStatus::Suspended => "SUSPENDED",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "ACTIVE" => Some(UserStatus::Active),
            "INACTIVE" => Some(UserStatus::Inactive),
            "SUSPENDED" => Some(UserStatus::Suspended),
            _ => None,
        }
    }

    /// Next status in the admin toggle cycle:
    /// ACTIVE -> INACTIVE -> SUSPENDED -> ACTIVE.
    pub fn next(self) -> Self {
        match self {
            UserStatus::Active => UserStatus::Inactive,
            UserStatus::Inactive => UserStatus::Suspended,
            UserStatus::Suspended => UserStatus::Active,
        }
    }

    pub fn badge_color(&self) -> &'static str {
        match self {
            UserStatus::Active => "success",
            UserStatus::Inactive => "secondary",
            UserStatus::Suspended => "danger",
        }
    }
}

/// Internal user struct for authentication — includes password hash.
#[derive(Debug, Clone)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub password: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub role: UserRole,
    pub status: UserStatus,
    pub last_login: Option<NaiveDateTime>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl User {
    pub fn full_name(&self) -> String {
        let name = format!("{} {}", self.first_name, self.last_name);
        let name = name.trim().to_string();
        if name.is_empty() {
            self.username.clone()
        } else {
            name
        }
    }

    pub fn initials(&self) -> String {
        let first = self.first_name.chars().next().unwrap_or('U');
        let last = self.last_name.chars().next();
        match last {
            Some(l) => format!("{first}{l}"),
            None => first.to_string(),
        }
    }
}

/// New user data for creation.
pub struct NewUser {
    pub username: String,
    pub password: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub role: UserRole,
}

/// Form data from the login form.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
    pub csrf_token: String,
}
