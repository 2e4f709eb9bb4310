//! Health check payload.

use serde::Serialize;

/// Overall service state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceStatus {
    Healthy,
    Degraded,
}

/// State of a single dependency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ComponentStatus {
    Ok,
    Error,
}

#[derive(Debug, Serialize)]
pub struct ComponentCheck {
    pub status: ComponentStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<&'static str>,
}

impl ComponentCheck {
    pub fn ok(message: &'static str) -> Self {
        Self {
            status: ComponentStatus::Ok,
            message: Some(message),
        }
    }

    pub fn error(message: &'static str) -> Self {
        Self {
            status: ComponentStatus::Error,
            message: Some(message),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.status == ComponentStatus::Ok
    }
}

/// `GET /health` body.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: ServiceStatus,
    pub version: &'static str,
    pub checks: Checks,
}

#[derive(Debug, Serialize)]
pub struct Checks {
    pub database: ComponentCheck,
}

impl HealthResponse {
    /// Derives the overall status from the component checks.
    pub fn from_checks(checks: Checks) -> Self {
        let status = if checks.database.is_ok() {
            ServiceStatus::Healthy
        } else {
            ServiceStatus::Degraded
        };

        Self {
            status,
            version: env!("CARGO_PKG_VERSION"),
            checks,
        }
    }
}
