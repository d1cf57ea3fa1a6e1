//! Attendance lifecycle state machine.
//!
//! One transition exists: `em-andamento` → `finalizado`. Finalize is a pure
//! function over a single record; replacing it in the stored collection is
//! the caller's read-modify-write.

use chrono::{DateTime, Local};
use thiserror::Error;

use crate::format;
use crate::models::{AttendanceRecord, AttendanceStatus};
use crate::reconcile::{NOTES_ATTENDED, NOTES_AWAITING};

/// Health outcomes written on finalize. Any entry is valid.
pub const OUTCOME_ROSTER: &[&str] = &["estável", "bom", "razoável", "crítico", "recuperando"];

/// Transition failures. Not reachable through a well-behaved UI; the stored
/// collection is never touched when these occur.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LifecycleError {
    #[error("record {0} is already finalized")]
    AlreadyFinalized(String),

    #[error("record {0} not found")]
    RecordNotFound(String),
}

/// Close an in-progress record.
///
/// Sets the terminal status, stamps the end time, writes the outcome and
/// rewrites the awaiting phrase in the notes. A second call on the result is
/// rejected with [`LifecycleError::AlreadyFinalized`], so the substitution
/// and timestamps can never double-apply.
pub fn finalize(
    record: &AttendanceRecord,
    outcome: &str,
    now: DateTime<Local>,
) -> Result<AttendanceRecord, LifecycleError> {
    if record.is_finalized() {
        return Err(LifecycleError::AlreadyFinalized(record.id.clone()));
    }

    let time = format::clock_time(now);
    let mut updated = record.clone();
    updated.status = AttendanceStatus::Finalizado;
    updated.end_time = time.clone();
    updated.health_status = outcome.to_string();
    updated.last_update_time = format::date_time(now);
    updated.doctor_last_update = format!("Fim do atendimento: {}", time);
    updated.doctor_notes = record.doctor_notes.replacen(NOTES_AWAITING, NOTES_ATTENDED, 1);
    Ok(updated)
}
