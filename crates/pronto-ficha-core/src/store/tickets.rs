//! Pending intake, active ticket and closed-ticket archive operations.

use super::{keys, Store, StoreResult};
use crate::models::{ActiveTicket, FinalizedTicket, IntakeRequest};

impl Store {
    /// The intake awaiting reconciliation, if any.
    pub fn pending_intake(&self) -> StoreResult<Option<IntakeRequest>> {
        self.load(keys::PENDING_INTAKE)
    }

    /// Stage an intake for the next records-screen load.
    pub fn set_pending_intake(&self, intake: &IntakeRequest) -> StoreResult<()> {
        self.save(keys::PENDING_INTAKE, intake)
    }

    /// Drop the staged intake once it has been reconciled.
    pub fn clear_pending_intake(&self) -> StoreResult<()> {
        self.remove(keys::PENDING_INTAKE)
    }

    /// The ticket currently checked in, if any.
    pub fn active_ticket(&self) -> StoreResult<Option<ActiveTicket>> {
        self.load(keys::ACTIVE_TICKET)
    }

    /// Check a ticket in, replacing any previous one.
    pub fn set_active_ticket(&self, ticket: &ActiveTicket) -> StoreResult<()> {
        self.save(keys::ACTIVE_TICKET, ticket)
    }

    /// Destroy the active ticket after a successful check-out.
    pub fn clear_active_ticket(&self) -> StoreResult<()> {
        self.remove(keys::ACTIVE_TICKET)
    }

    /// The archive of closed tickets, oldest first.
    pub fn finalized_tickets(&self) -> StoreResult<Vec<FinalizedTicket>> {
        Ok(self.load(keys::FINALIZED_TICKETS)?.unwrap_or_default())
    }

    /// Append a closed ticket to the archive.
    pub fn push_finalized_ticket(&self, ticket: &FinalizedTicket) -> StoreResult<()> {
        let mut archive = self.finalized_tickets()?;
        archive.push(ticket.clone());
        self.save(keys::FINALIZED_TICKETS, &archive)
    }
}
