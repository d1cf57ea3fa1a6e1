//! Intake reconciliation.
//!
//! Turns a raw intake into a fully-populated attendance record with derived
//! fields. Pure: the caller supplies the clock and the doctor assignment so
//! the same inputs always produce the same record.

use chrono::{DateTime, Local};

use crate::format;
use crate::models::{AttendanceRecord, AttendanceStatus, IntakeRequest, END_TIME_PENDING};

/// Placeholder doctor assignments. Not a real schedule; any entry is valid
/// and the chosen one persists unchanged until finalize.
pub const DOCTOR_ROSTER: &[&str] = &[
    "Dr. Carlos Silva",
    "Dra. Maria Santos",
    "Dr. João Oliveira",
    "Dra. Ana Costa",
    "Dr. Pedro Almeida",
];

/// Initial health status of every reconciled record.
pub const AWAITING_ATTENDANCE: &str = "aguardando atendimento";

/// Leading phrase of the composed notes; rewritten exactly once on finalize.
pub const NOTES_AWAITING: &str = "Paciente aguardando atendimento";

/// Replacement phrase written by finalize.
pub const NOTES_ATTENDED: &str = "Paciente atendido com sucesso";

const EMERGENCY_FILE: &str = "Ficha emergencial";
const EMERGENCY_ROLE: &str = "Médico emergencista";
const CONSULTATION_FILE: &str = "Ficha consulta";
const CONSULTATION_ROLE: &str = "Médico clínico geral";

/// File label and doctor role for a visit type.
///
/// Two-way branch on the exact string "emergencia"; every other value falls
/// into the consultation branch, there is no third case.
pub fn visit_labels(intake: &IntakeRequest) -> (&'static str, &'static str) {
    if intake.is_emergency() {
        (EMERGENCY_FILE, EMERGENCY_ROLE)
    } else {
        (CONSULTATION_FILE, CONSULTATION_ROLE)
    }
}

/// Build the attendance record for a validated intake.
///
/// The record id derives from `now` (epoch millis), status starts at
/// `em-andamento` and the end time at the `"-"` sentinel.
pub fn reconcile(
    intake: &IntakeRequest,
    doctor_name: &str,
    now: DateTime<Local>,
) -> AttendanceRecord {
    let date = format::short_date(now);
    let time = format::clock_time(now);
    let (file_kind, doctor_role) = visit_labels(intake);

    AttendanceRecord {
        id: now.timestamp_millis().to_string(),
        patient_name: intake.patient_name.clone(),
        patient_age: intake.patient_age,
        health_status: AWAITING_ATTENDANCE.to_string(),
        attendance_date: date.clone(),
        last_update_time: format!("{} {}", date, time),
        file_kind: file_kind.to_string(),
        assigned_doctor_role: doctor_role.to_string(),
        start_time: time.clone(),
        end_time: END_TIME_PENDING.to_string(),
        doctor_name: doctor_name.to_string(),
        doctor_specialty: doctor_role.to_string(),
        doctor_notes: compose_notes(intake),
        doctor_last_update: format!("Ficha retirada: {}", time),
        status: AttendanceStatus::EmAndamento,
    }
}

/// Compose the initial doctor notes from the intake.
fn compose_notes(intake: &IntakeRequest) -> String {
    let allergy = match intake.allergy_note.as_deref().filter(|a| !a.trim().is_empty()) {
        Some(allergy) => format!("Alergias relatadas: {}", allergy),
        None => "Sem alergias relatadas".to_string(),
    };
    let companion = match intake.companion.as_deref().filter(|c| !c.trim().is_empty()) {
        Some(companion) => format!(". Acompanhante: {}", companion),
        None => String::new(),
    };
    format!("{}. {}{}", NOTES_AWAITING, allergy, companion)
}
