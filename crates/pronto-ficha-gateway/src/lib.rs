//! Pronto-Ficha Gateway
//!
//! Blocking HTTP client for the remote consultation API: specialty listing
//! per health unit and consultation check-out. Implements the
//! [`ConsultationGateway`] trait from `pronto-ficha-core`.
//!
//! [`ConsultationGateway`]: pronto_ficha_core::gateway::ConsultationGateway

mod client;

pub use client::{ConsultationClient, DEFAULT_BASE_URL};
