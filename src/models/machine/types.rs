use chrono::NaiveDateTime;
use serde::Deserialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MachineStatus {
    Active,
    Maintenance,
    Inactive,
}

impl MachineStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            MachineStatus::Active => "ACTIVE",
            MachineStatus::Maintenance => "MAINTENANCE",
            MachineStatus::Inactive => "INACTIVE",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "ACTIVE" => Some(MachineStatus::Active),
            "MAINTENANCE" => Some(MachineStatus::Maintenance),
            "INACTIVE" => Some(MachineStatus::Inactive),
            _ => None,
        }
    }

    /// Next status in the admin toggle: ACTIVE <-> MAINTENANCE.
    /// An INACTIVE machine is brought back to ACTIVE.
    pub fn toggled(self) -> Self {
        match self {
            MachineStatus::Active => MachineStatus::Maintenance,
            MachineStatus::Maintenance => MachineStatus::Active,
            MachineStatus::Inactive => MachineStatus::Active,
        }
    }

    pub fn badge_color(&self) -> &'static str {
        match self {
            MachineStatus::Active => "success",
            MachineStatus::Maintenance => "warning",
            MachineStatus::Inactive => "secondary",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Machine {
    pub id: i64,
    pub name: String,
    pub machine_type: String,
    pub location: String,
    pub status: MachineStatus,
    pub last_maintenance: Option<NaiveDateTime>,
    pub created_at: NaiveDateTime,
}

/// Machine plus usage aggregates derived from its recorded sessions.
#[derive(Debug, Clone)]
pub struct MachineUsage {
    pub id: i64,
    pub name: String,
    pub machine_type: String,
    pub location: String,
    pub status: MachineStatus,
    pub last_maintenance: Option<NaiveDateTime>,
    pub total_sessions: i64,
    pub avg_calories: f64,
}

pub struct NewMachine {
    pub name: String,
    pub machine_type: String,
    pub location: String,
}

/// Form data for the admin "add machine" form.
#[derive(Debug, Deserialize)]
pub struct MachineForm {
    pub name: String,
    pub machine_type: String,
    pub location: String,
    pub csrf_token: String,
}
