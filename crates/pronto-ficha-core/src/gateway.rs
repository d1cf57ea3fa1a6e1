//! Remote consultation gateway contract.
//!
//! The remote API is an external collaborator with a fixed schema. The core
//! only sees this trait; the reqwest-backed implementation lives in the
//! `pronto-ficha-gateway` crate so tests can substitute [`MockGateway`].

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Gateway failures, mapped from transport and protocol conditions.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GatewayError {
    /// Could not reach the API at all (connect/timeout)
    #[error("consultation API unreachable: {0}")]
    Unreachable(String),

    /// Reached the API but the response could not be decoded
    #[error("consultation API returned an undecodable response: {0}")]
    BadResponse(String),

    /// The API answered with a non-2xx status
    #[error("consultation API rejected the request (status {status}): {message}")]
    Rejected { status: u16, message: String },
}

/// A specialty offered by a health unit.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Specialty {
    pub id: i64,
    pub name: String,
    /// Estimated wait as reported by the unit, display text
    pub estimated_wait: String,
}

/// Payload for closing a consultation.
///
/// Timestamps are carried as local datetimes here; the wire client formats
/// them as `YYYY-MM-DD HH:MM:SS` when serializing.
#[derive(Debug, Clone, PartialEq)]
pub struct ConsultationRequest {
    pub entry_time: DateTime<Local>,
    pub exit_time: DateTime<Local>,
    pub health_unit_id: i64,
    pub specialty_id: i64,
}

/// Whatever the API returned on a successful check-out.
///
/// A 2xx with an empty body is a success with an empty object, not a decode
/// failure.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct ConsultationResult(pub serde_json::Value);

impl Default for ConsultationResult {
    fn default() -> Self {
        Self(serde_json::Value::Object(serde_json::Map::new()))
    }
}

impl ConsultationResult {
    /// The `message` field of the response body, when present.
    pub fn message(&self) -> Option<&str> {
        self.0.get("message").and_then(|m| m.as_str())
    }
}

/// Client contract for the two remote endpoints.
pub trait ConsultationGateway {
    /// List the specialties a health unit offers, in the order the API
    /// reports them.
    fn list_specialties(&self, health_unit_id: i64) -> Result<Vec<Specialty>, GatewayError>;

    /// Close a consultation. Failures must leave no trace anywhere; the
    /// caller retries by resubmitting.
    fn submit_consultation(
        &self,
        request: &ConsultationRequest,
    ) -> Result<ConsultationResult, GatewayError>;
}

/// Mock gateway for testing: returns configurable results and records
/// submissions.
pub struct MockGateway {
    specialties: Result<Vec<Specialty>, GatewayError>,
    submit_result: Result<ConsultationResult, GatewayError>,
    submissions: std::cell::RefCell<Vec<ConsultationRequest>>,
}

impl Default for MockGateway {
    fn default() -> Self {
        Self {
            specialties: Ok(Vec::new()),
            submit_result: Ok(ConsultationResult::default()),
            submissions: std::cell::RefCell::new(Vec::new()),
        }
    }
}

impl MockGateway {
    pub fn with_specialties(mut self, specialties: Vec<Specialty>) -> Self {
        self.specialties = Ok(specialties);
        self
    }

    pub fn with_listing_error(mut self, error: GatewayError) -> Self {
        self.specialties = Err(error);
        self
    }

    pub fn with_submit_result(mut self, result: ConsultationResult) -> Self {
        self.submit_result = Ok(result);
        self
    }

    pub fn with_submit_error(mut self, error: GatewayError) -> Self {
        self.submit_result = Err(error);
        self
    }

    /// Consultation requests received so far.
    pub fn submissions(&self) -> Vec<ConsultationRequest> {
        self.submissions.borrow().clone()
    }
}

impl ConsultationGateway for MockGateway {
    fn list_specialties(&self, _health_unit_id: i64) -> Result<Vec<Specialty>, GatewayError> {
        self.specialties.clone()
    }

    fn submit_consultation(
        &self,
        request: &ConsultationRequest,
    ) -> Result<ConsultationResult, GatewayError> {
        self.submissions.borrow_mut().push(request.clone());
        self.submit_result.clone()
    }
}
