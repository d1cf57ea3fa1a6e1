//! Pronto-Ficha Core Library
//!
//! Ticket lifecycle and record reconciliation for a patient-queue
//! application. The UI is an external collaborator: it feeds raw form input
//! in and renders what comes back out.
//!
//! # Flow
//!
//! ```text
//! Request form ──▶ IntakeRequest ──▶ [pendingIntake]
//!                                         │
//!                            records screen load: reconcile
//!                                         │
//!                                         ▼
//!                      [attendanceRecords] (newest first)
//!                                         │
//!                               finalize (em-andamento → finalizado)
//!
//! Scheduled form ──▶ ActiveTicket ──▶ [activeTicket]
//!                                         │
//!                          check-out: POST consulta (gateway)
//!                                         │
//!                     [finalizedTickets] + staged [pendingIntake]
//! ```
//!
//! # Modules
//!
//! - [`store`]: SQLite-backed keyed JSON store (the device-local storage)
//! - [`models`]: Domain types (IntakeRequest, ActiveTicket, AttendanceRecord)
//! - [`reconcile`]: Intake → attendance record derivation
//! - [`lifecycle`]: The one legal transition, `em-andamento` → `finalizado`
//! - [`gateway`]: Remote consultation API contract
//! - [`service`]: Screen-level orchestration over all of the above
//! - [`pick`]: Injected roster-selection strategy
//! - [`format`]: Date/time display and wire formats

pub mod format;
pub mod gateway;
pub mod lifecycle;
pub mod models;
pub mod pick;
pub mod reconcile;
pub mod service;
pub mod store;

// Re-export commonly used types
pub use gateway::{ConsultationGateway, ConsultationRequest, ConsultationResult, GatewayError, Specialty};
pub use lifecycle::{finalize, LifecycleError, OUTCOME_ROSTER};
pub use models::{
    ActiveTicket, AttendanceRecord, AttendanceStatus, FinalizedTicket, IntakeRequest,
    ValidationError,
};
pub use pick::{FixedPicker, Picker, RandomPicker};
pub use reconcile::{reconcile, DOCTOR_ROSTER};
pub use service::{ServiceError, SpecialtyListing, TicketService};
pub use store::{Store, StoreError};
