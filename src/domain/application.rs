//! Adoption application entity and its status lifecycle.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Lifecycle status of an adoption application.
///
/// `Submitted` is the only initial state. `Approved` and `Rejected` are
/// terminal: once reached, no further status change is permitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum ApplicationStatus {
    Submitted,
    Approved,
    Rejected,
}

impl ApplicationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ApplicationStatus::Submitted => "Submitted",
            ApplicationStatus::Approved => "Approved",
            ApplicationStatus::Rejected => "Rejected",
        }
    }

    /// A terminal status admits no further transitions.
    pub fn is_terminal(&self) -> bool {
        matches!(self, ApplicationStatus::Approved | ApplicationStatus::Rejected)
    }

    /// Check whether a transition to `target` is permitted.
    pub fn can_transition_to(&self, target: ApplicationStatus) -> bool {
        matches!(
            (self, target),
            (
                ApplicationStatus::Submitted,
                ApplicationStatus::Approved | ApplicationStatus::Rejected
            )
        )
    }
}

impl From<&str> for ApplicationStatus {
    fn from(s: &str) -> Self {
        match s {
            "Approved" => ApplicationStatus::Approved,
            "Rejected" => ApplicationStatus::Rejected,
            _ => ApplicationStatus::Submitted,
        }
    }
}

impl std::fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Adoption application domain entity
#[derive(Debug, Clone, Serialize)]
pub struct Application {
    pub id: Uuid,
    pub animal_id: Uuid,
    pub adopter_id: Uuid,
    pub reason: Option<String>,
    pub status: ApplicationStatus,
    pub created_at: DateTime<Utc>,
    pub created_by: String,
    pub updated_at: Option<DateTime<Utc>>,
    pub updated_by: Option<String>,
    /// Soft delete timestamp (None = active, Some = deleted)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Application {
    /// Check if the application is soft deleted
    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }
}

/// Fields required to persist a new application
#[derive(Debug, Clone)]
pub struct NewApplication {
    pub animal_id: Uuid,
    pub adopter_id: Uuid,
    pub reason: Option<String>,
    pub created_by: String,
}

/// An application joined with the names of its animal and adopter,
/// as surfaced by the list and detail endpoints.
#[derive(Debug, Clone)]
pub struct ApplicationDetails {
    pub application: Application,
    pub animal_name: String,
    pub adopter_name: String,
}

/// Application response (safe to return to client)
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ApplicationResponse {
    pub id: Uuid,
    pub animal_id: Uuid,
    #[schema(example = "Buddy")]
    pub animal_name: String,
    pub adopter_id: Uuid,
    #[schema(example = "Jane Doe")]
    pub adopter_name: String,
    pub reason: Option<String>,
    #[schema(example = "Submitted")]
    pub status: ApplicationStatus,
    pub created_at: DateTime<Utc>,
    pub created_by: String,
    pub updated_at: Option<DateTime<Utc>>,
    pub updated_by: Option<String>,
}

impl From<ApplicationDetails> for ApplicationResponse {
    fn from(details: ApplicationDetails) -> Self {
        let app = details.application;
        Self {
            id: app.id,
            animal_id: app.animal_id,
            animal_name: details.animal_name,
            adopter_id: app.adopter_id,
            adopter_name: details.adopter_name,
            reason: app.reason,
            status: app.status,
            created_at: app.created_at,
            created_by: app.created_by,
            updated_at: app.updated_at,
            updated_by: app.updated_by,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_submitted_is_not_terminal() {
        assert!(!ApplicationStatus::Submitted.is_terminal());
    }

    #[test]
    fn test_approved_and_rejected_are_terminal() {
        assert!(ApplicationStatus::Approved.is_terminal());
        assert!(ApplicationStatus::Rejected.is_terminal());
    }

    #[test]
    fn test_valid_transitions() {
        assert!(ApplicationStatus::Submitted.can_transition_to(ApplicationStatus::Approved));
        assert!(ApplicationStatus::Submitted.can_transition_to(ApplicationStatus::Rejected));
    }

    #[test]
    fn test_no_transition_out_of_terminal_states() {
        for terminal in [ApplicationStatus::Approved, ApplicationStatus::Rejected] {
            for target in [
                ApplicationStatus::Submitted,
                ApplicationStatus::Approved,
                ApplicationStatus::Rejected,
            ] {
                assert!(!terminal.can_transition_to(target));
            }
        }
    }

    #[test]
    fn test_no_self_transition_to_submitted() {
        assert!(!ApplicationStatus::Submitted.can_transition_to(ApplicationStatus::Submitted));
    }

    #[test]
    fn test_status_round_trip() {
        for status in [
            ApplicationStatus::Submitted,
            ApplicationStatus::Approved,
            ApplicationStatus::Rejected,
        ] {
            assert_eq!(ApplicationStatus::from(status.as_str()), status);
        }
    }
}
