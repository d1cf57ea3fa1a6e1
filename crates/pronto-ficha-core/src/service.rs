//! Screen-level orchestration.
//!
//! One method per UI action: submit an intake, load the records screen,
//! finalize a record, check a ticket out. Each method is a complete
//! read-modify-write over the store; the single-writer assumption is what
//! makes that safe.

use chrono::{DateTime, Local};
use thiserror::Error;

use crate::gateway::{ConsultationGateway, ConsultationRequest, GatewayError, Specialty};
use crate::lifecycle::{finalize, LifecycleError, OUTCOME_ROSTER};
use crate::models::{ActiveTicket, AttendanceRecord, FinalizedTicket, IntakeRequest, ValidationError};
use crate::pick::{Picker, RandomPicker};
use crate::reconcile::{reconcile, DOCTOR_ROSTER};
use crate::store::{Store, StoreError};

/// Anything a screen action can fail with.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Gateway(#[from] GatewayError),

    #[error(transparent)]
    Lifecycle(#[from] LifecycleError),

    #[error("no active ticket to check out")]
    NoActiveTicket,
}

/// Specialty listing with degradation: a gateway failure yields an empty
/// list plus the error notice so the form stays usable.
#[derive(Debug, Clone, PartialEq)]
pub struct SpecialtyListing {
    pub specialties: Vec<Specialty>,
    pub error: Option<String>,
}

/// Ticket service: owns the store and talks to the gateway through its
/// trait, so tests run against an in-memory store and a mock gateway.
pub struct TicketService<G, P = RandomPicker> {
    store: Store,
    gateway: G,
    picker: P,
}

impl<G: ConsultationGateway> TicketService<G> {
    pub fn new(store: Store, gateway: G) -> Self {
        Self {
            store,
            gateway,
            picker: RandomPicker,
        }
    }
}

impl<G: ConsultationGateway, P: Picker> TicketService<G, P> {
    /// Swap in a selection strategy (deterministic in tests).
    pub fn with_picker(store: Store, gateway: G, picker: P) -> Self {
        Self {
            store,
            gateway,
            picker,
        }
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    /// Ticket-request submission: validate and stage the intake for the
    /// records screen.
    pub fn submit_intake(
        &self,
        mut intake: IntakeRequest,
        now: DateTime<Local>,
    ) -> Result<(), ServiceError> {
        intake.validate()?;
        intake.created_at = now.timestamp_millis();
        self.store.set_pending_intake(&intake)?;
        Ok(())
    }

    /// Scheduled-consultation submission: validate and check the ticket in,
    /// replacing any previous one.
    pub fn open_scheduled_ticket(
        &self,
        intake: IntakeRequest,
        specialty: &Specialty,
        health_unit_id: i64,
        now: DateTime<Local>,
    ) -> Result<ActiveTicket, ServiceError> {
        intake.validate()?;
        let ticket = ActiveTicket::open(
            intake,
            specialty.name.clone(),
            specialty.id,
            health_unit_id,
            now,
        );
        self.store.set_active_ticket(&ticket)?;
        Ok(ticket)
    }

    /// Records-screen load: reconcile the staged intake, if any, into the
    /// record list and return the full list, newest first.
    pub fn ingest_pending(&self, now: DateTime<Local>) -> Result<Vec<AttendanceRecord>, ServiceError> {
        let mut records = self.store.attendance_records()?;
        if let Some(intake) = self.store.pending_intake()? {
            let doctor = self.picker.pick(DOCTOR_ROSTER);
            let record = reconcile(&intake, doctor, now);
            records.insert(0, record);
            self.store.save_attendance_records(&records)?;
            self.store.clear_pending_intake()?;
        }
        Ok(records)
    }

    /// Finalize the record with the given id, replacing it in place. The
    /// stored list is untouched when the transition is rejected.
    pub fn finalize_record(
        &self,
        id: &str,
        now: DateTime<Local>,
    ) -> Result<AttendanceRecord, ServiceError> {
        let mut records = self.store.attendance_records()?;
        let pos = records
            .iter()
            .position(|r| r.id == id)
            .ok_or_else(|| LifecycleError::RecordNotFound(id.to_string()))?;

        let outcome = self.picker.pick(OUTCOME_ROSTER);
        let updated = finalize(&records[pos], outcome, now)?;
        records[pos] = updated.clone();
        self.store.save_attendance_records(&records)?;
        Ok(updated)
    }

    /// Check-out: close the active ticket through the gateway, archive it,
    /// stage it for reconciliation and destroy it. A gateway failure leaves
    /// every key untouched.
    pub fn check_out(&self, now: DateTime<Local>) -> Result<FinalizedTicket, ServiceError> {
        let ticket = self
            .store
            .active_ticket()?
            .ok_or(ServiceError::NoActiveTicket)?;

        let request = ConsultationRequest {
            entry_time: ticket.entry_time,
            exit_time: now,
            health_unit_id: ticket.health_unit_id,
            specialty_id: ticket.specialty_id,
        };
        let result = self.gateway.submit_consultation(&request)?;

        let mut closed = ticket;
        closed.exit_time = Some(now);
        let archived = FinalizedTicket {
            ticket: closed.clone(),
            result,
        };
        self.store.push_finalized_ticket(&archived)?;
        self.store.set_pending_intake(&closed.to_intake())?;
        self.store.clear_active_ticket()?;
        Ok(archived)
    }

    /// Specialty listing for the request form. Never fails: a gateway error
    /// degrades to an empty list with the notice attached.
    pub fn specialty_listing(&self, health_unit_id: i64) -> SpecialtyListing {
        match self.gateway.list_specialties(health_unit_id) {
            Ok(specialties) => SpecialtyListing {
                specialties,
                error: None,
            },
            Err(e) => {
                tracing::warn!(health_unit_id, error = %e, "specialty listing unavailable");
                SpecialtyListing {
                    specialties: Vec::new(),
                    error: Some(e.to_string()),
                }
            }
        }
    }
}
