//! Active ticket and closed-ticket archive models.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use crate::gateway::ConsultationResult;

use super::IntakeRequest;

/// The one ticket currently checked in for the session.
///
/// Created by a scheduled-consultation submission, destroyed when check-out
/// succeeds. At most one exists at a time; a new submission overwrites the
/// previous ticket (last writer wins).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ActiveTicket {
    pub patient_name: String,
    pub patient_age: u32,
    pub cpf: Option<String>,
    pub allergy_note: Option<String>,
    pub visit_type: String,
    pub insurance: Option<String>,
    pub companion: Option<String>,
    pub specialty_name: String,
    pub specialty_id: i64,
    pub health_unit_id: i64,
    pub entry_time: DateTime<Local>,
    /// Set when the check-out succeeds
    pub exit_time: Option<DateTime<Local>>,
    /// Epoch millis at submission
    pub created_at: i64,
}

impl ActiveTicket {
    /// Open a ticket from a validated intake.
    pub fn open(
        intake: IntakeRequest,
        specialty_name: String,
        specialty_id: i64,
        health_unit_id: i64,
        entry_time: DateTime<Local>,
    ) -> Self {
        Self {
            patient_name: intake.patient_name,
            patient_age: intake.patient_age,
            cpf: intake.cpf,
            allergy_note: intake.allergy_note,
            visit_type: intake.visit_type,
            insurance: intake.insurance,
            companion: intake.companion,
            specialty_name,
            specialty_id,
            health_unit_id,
            entry_time,
            exit_time: None,
            created_at: entry_time.timestamp_millis(),
        }
    }

    /// Human-readable waiting time: `"Xh Ym"`, `"Ym"`, or `"Em andamento"`
    /// while the ticket is still open.
    pub fn waiting_time(&self) -> String {
        let Some(exit) = self.exit_time else {
            return "Em andamento".to_string();
        };
        let minutes = (exit - self.entry_time).num_minutes().max(0);
        let hours = minutes / 60;
        let mins = minutes % 60;
        if hours > 0 {
            format!("{}h {}m", hours, mins)
        } else {
            format!("{}m", mins)
        }
    }

    /// Convert a closed ticket back into an intake so the records screen
    /// reconciles it like any other ficha.
    pub fn to_intake(&self) -> IntakeRequest {
        IntakeRequest {
            patient_name: self.patient_name.clone(),
            patient_age: self.patient_age,
            cpf: self.cpf.clone(),
            allergy_note: self.allergy_note.clone(),
            visit_type: self.visit_type.clone(),
            insurance: self.insurance.clone(),
            companion: self.companion.clone(),
            specialty_id: Some(self.specialty_id),
            entry_time: Some(self.entry_time),
            exit_time: self.exit_time,
            created_at: self.created_at,
        }
    }
}

/// A closed ticket plus whatever the consultation API returned, kept in the
/// append-only `finalizedTickets` archive.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FinalizedTicket {
    pub ticket: ActiveTicket,
    pub result: ConsultationResult,
}
