//! Attendance record model.

use serde::{Deserialize, Serialize};

/// Sentinel shown for the end time while an attendance is still open.
pub const END_TIME_PENDING: &str = "-";

/// Lifecycle status of an attendance record.
///
/// The only legal transition is `EmAndamento` → `Finalizado`; `Finalizado`
/// is terminal.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum AttendanceStatus {
    /// Patient waiting or being seen
    #[serde(rename = "em-andamento")]
    EmAndamento,
    /// Consultation closed
    #[serde(rename = "finalizado")]
    Finalizado,
}

/// A durable attendance record, one per ticket pulled.
///
/// Records live in the `attendanceRecords` collection, newest first. The
/// `id` is derived from the creation time and never changes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceRecord {
    /// Epoch-millis derived identifier, unique within the collection
    pub id: String,
    pub patient_name: String,
    pub patient_age: u32,
    /// "aguardando atendimento" until finalized, then an outcome label
    pub health_status: String,
    /// `D/M/YYYY`, day and month unpadded
    pub attendance_date: String,
    /// `D/M/YYYY H:MM`
    pub last_update_time: String,
    /// "Ficha emergencial" or "Ficha consulta"
    pub file_kind: String,
    /// "Médico emergencista" or "Médico clínico geral"
    pub assigned_doctor_role: String,
    /// `H:MM` when the ficha was pulled
    pub start_time: String,
    /// [`END_TIME_PENDING`] until finalized, then `H:MM`
    pub end_time: String,
    /// Placeholder assignment from the fixed roster
    pub doctor_name: String,
    pub doctor_specialty: String,
    /// Composed note text; rewritten once on finalize
    pub doctor_notes: String,
    /// "Ficha retirada: H:MM" / "Fim do atendimento: H:MM"
    pub doctor_last_update: String,
    pub status: AttendanceStatus,
}

impl AttendanceRecord {
    /// Whether this record has reached its terminal state.
    pub fn is_finalized(&self) -> bool {
        self.status == AttendanceStatus::Finalizado
    }
}
