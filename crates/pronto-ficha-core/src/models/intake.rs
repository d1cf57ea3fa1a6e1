//! Intake request model and boundary validation.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Age below which a companion is mandatory.
pub const COMPANION_AGE_LIMIT: u32 = 18;

/// Visit type that routes to the emergency branch. Any other value,
/// recognized or not, is treated as a scheduled consultation.
pub const EMERGENCY_VISIT: &str = "emergencia";

/// Validation failures reported before an intake enters the system.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("patient name is required")]
    MissingPatientName,

    #[error("patients under {COMPANION_AGE_LIMIT} must have a companion")]
    CompanionRequired,
}

/// Raw intake captured by the ticket-request form.
///
/// Ephemeral: it lives under the `pendingIntake` key only until the next
/// records-screen load reconciles it into an [`AttendanceRecord`].
///
/// [`AttendanceRecord`]: crate::models::AttendanceRecord
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct IntakeRequest {
    pub patient_name: String,
    pub patient_age: u32,
    pub cpf: Option<String>,
    pub allergy_note: Option<String>,
    /// Free text; only [`EMERGENCY_VISIT`] is recognized
    pub visit_type: String,
    pub insurance: Option<String>,
    /// Required iff `patient_age < COMPANION_AGE_LIMIT`
    pub companion: Option<String>,
    /// Present for the scheduled-consultation flow
    pub specialty_id: Option<i64>,
    pub entry_time: Option<DateTime<Local>>,
    pub exit_time: Option<DateTime<Local>>,
    /// Epoch millis at submission
    pub created_at: i64,
}

impl IntakeRequest {
    /// Create an intake with required fields; optional fields start empty.
    pub fn new(patient_name: String, patient_age: u32, visit_type: String) -> Self {
        Self {
            patient_name,
            patient_age,
            cpf: None,
            allergy_note: None,
            visit_type,
            insurance: None,
            companion: None,
            specialty_id: None,
            entry_time: None,
            exit_time: None,
            created_at: 0,
        }
    }

    /// Enforce the submission-time invariants.
    ///
    /// Invalid intakes are rejected here, before reconciliation; the
    /// reconciler itself has no failure modes.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.patient_name.trim().is_empty() {
            return Err(ValidationError::MissingPatientName);
        }
        if self.patient_age < COMPANION_AGE_LIMIT && !self.has_companion() {
            return Err(ValidationError::CompanionRequired);
        }
        Ok(())
    }

    /// Whether a non-empty companion was given.
    pub fn has_companion(&self) -> bool {
        self.companion
            .as_deref()
            .map(|c| !c.trim().is_empty())
            .unwrap_or(false)
    }

    /// Whether this intake routes to the emergency branch.
    pub fn is_emergency(&self) -> bool {
        self.visit_type == EMERGENCY_VISIT
    }
}
