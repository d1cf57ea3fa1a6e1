//! End-to-end scenario tests for the ticket lifecycle.
//!
//! These run against an in-memory store, the mock gateway and a fixed
//! picker, so every assertion is deterministic.

use chrono::{DateTime, Local, TimeZone};

use pronto_ficha_core::gateway::MockGateway;
use pronto_ficha_core::models::AttendanceStatus;
use pronto_ficha_core::service::ServiceError;
use pronto_ficha_core::{
    ConsultationResult, FixedPicker, GatewayError, IntakeRequest, LifecycleError, Specialty,
    Store, TicketService, ValidationError, DOCTOR_ROSTER, OUTCOME_ROSTER,
};

fn service() -> TicketService<MockGateway, FixedPicker> {
    TicketService::with_picker(
        Store::open_in_memory().unwrap(),
        MockGateway::default(),
        FixedPicker::new(0),
    )
}

fn service_with(gateway: MockGateway) -> TicketService<MockGateway, FixedPicker> {
    TicketService::with_picker(Store::open_in_memory().unwrap(), gateway, FixedPicker::new(0))
}

fn at(hour: u32, minute: u32) -> DateTime<Local> {
    Local.with_ymd_and_hms(2024, 5, 3, hour, minute, 0).unwrap()
}

fn emergency_intake() -> IntakeRequest {
    IntakeRequest::new("Ana".into(), 30, "emergencia".into())
}

#[test]
fn emergency_intake_reconciles_into_open_record() {
    let service = service();
    service.submit_intake(emergency_intake(), at(9, 0)).unwrap();

    let records = service.ingest_pending(at(9, 5)).unwrap();
    assert_eq!(records.len(), 1);

    let record = &records[0];
    assert_eq!(record.file_kind, "Ficha emergencial");
    assert_eq!(record.assigned_doctor_role, "Médico emergencista");
    assert_eq!(record.status, AttendanceStatus::EmAndamento);
    assert_eq!(record.end_time, "-");
    assert_eq!(record.doctor_name, DOCTOR_ROSTER[0]);

    // Staged intake consumed
    assert!(service.store().pending_intake().unwrap().is_none());
}

#[test]
fn minor_without_companion_is_rejected_before_reconciliation() {
    let service = service();
    let intake = IntakeRequest::new("Lia".into(), 10, "emergencia".into());

    let result = service.submit_intake(intake, at(9, 0));
    assert!(matches!(
        result,
        Err(ServiceError::Validation(ValidationError::CompanionRequired))
    ));

    assert!(service.store().pending_intake().unwrap().is_none());
    assert!(service.ingest_pending(at(9, 5)).unwrap().is_empty());
}

#[test]
fn new_records_are_prepended() {
    let service = service();

    service.submit_intake(emergency_intake(), at(9, 0)).unwrap();
    service.ingest_pending(at(9, 5)).unwrap();

    let second = IntakeRequest::new("Bruno".into(), 45, "consulta".into());
    service.submit_intake(second, at(10, 0)).unwrap();
    let records = service.ingest_pending(at(10, 5)).unwrap();

    assert_eq!(records.len(), 2);
    assert_eq!(records[0].patient_name, "Bruno");
    assert_eq!(records[1].patient_name, "Ana");
}

#[test]
fn finalize_closes_record_and_keeps_its_index() {
    let service = service();
    service.submit_intake(emergency_intake(), at(9, 0)).unwrap();
    service.ingest_pending(at(9, 5)).unwrap();

    let second = IntakeRequest::new("Bruno".into(), 45, "consulta".into());
    service.submit_intake(second, at(10, 0)).unwrap();
    let records = service.ingest_pending(at(10, 5)).unwrap();
    let ana_id = records[1].id.clone();

    let closed = service.finalize_record(&ana_id, at(11, 30)).unwrap();
    assert_eq!(closed.status, AttendanceStatus::Finalizado);
    assert_eq!(closed.end_time, "11:30");
    assert_eq!(closed.health_status, OUTCOME_ROSTER[0]);
    assert!(!closed.doctor_notes.contains("aguardando atendimento"));

    let stored = service.store().attendance_records().unwrap();
    assert_eq!(stored.len(), 2);
    assert_eq!(stored[0].patient_name, "Bruno");
    assert_eq!(stored[0].status, AttendanceStatus::EmAndamento);
    assert_eq!(stored[1].id, ana_id);
    assert_eq!(stored[1].status, AttendanceStatus::Finalizado);
}

#[test]
fn second_finalize_is_rejected_and_store_untouched() {
    let service = service();
    service.submit_intake(emergency_intake(), at(9, 0)).unwrap();
    let records = service.ingest_pending(at(9, 5)).unwrap();
    let id = records[0].id.clone();

    service.finalize_record(&id, at(10, 0)).unwrap();
    let before = service.store().attendance_records().unwrap();

    let result = service.finalize_record(&id, at(12, 0));
    assert!(matches!(
        result,
        Err(ServiceError::Lifecycle(LifecycleError::AlreadyFinalized(_)))
    ));

    let after = service.store().attendance_records().unwrap();
    assert_eq!(before, after);
    assert_eq!(after[0].end_time, "10:00");
}

#[test]
fn finalize_unknown_id_is_rejected() {
    let service = service();
    let result = service.finalize_record("12345", at(10, 0));
    assert!(matches!(
        result,
        Err(ServiceError::Lifecycle(LifecycleError::RecordNotFound(_)))
    ));
}

#[test]
fn check_out_archives_and_restages_the_ticket() {
    let gateway = MockGateway::default()
        .with_submit_result(ConsultationResult(serde_json::json!({"message": "registrada"})));
    let service = service_with(gateway);

    let specialty = Specialty {
        id: 7,
        name: "Cardiologia".into(),
        estimated_wait: "40 min".into(),
    };
    service
        .open_scheduled_ticket(emergency_intake(), &specialty, 1, at(9, 0))
        .unwrap();

    let archived = service.check_out(at(10, 30)).unwrap();
    assert_eq!(archived.result.message(), Some("registrada"));
    assert_eq!(archived.ticket.exit_time, Some(at(10, 30)));
    assert_eq!(archived.ticket.waiting_time(), "1h 30m");

    // Ticket destroyed, archive grown, intake staged for the records screen
    assert!(service.store().active_ticket().unwrap().is_none());
    assert_eq!(service.store().finalized_tickets().unwrap().len(), 1);
    assert!(service.store().pending_intake().unwrap().is_some());

    let records = service.ingest_pending(at(10, 31)).unwrap();
    assert_eq!(records[0].patient_name, "Ana");
}

#[test]
fn check_out_failure_leaves_every_key_untouched() {
    let gateway = MockGateway::default().with_submit_error(GatewayError::Rejected {
        status: 500,
        message: "unidade desconhecida".into(),
    });
    let service = service_with(gateway);

    let specialty = Specialty {
        id: 7,
        name: "Cardiologia".into(),
        estimated_wait: "40 min".into(),
    };
    service
        .open_scheduled_ticket(emergency_intake(), &specialty, 1, at(9, 0))
        .unwrap();

    let result = service.check_out(at(10, 30));
    assert!(matches!(
        result,
        Err(ServiceError::Gateway(GatewayError::Rejected { status: 500, .. }))
    ));

    // Resubmittable: the ticket is still active and nothing was archived
    assert!(service.store().active_ticket().unwrap().is_some());
    assert!(service.store().finalized_tickets().unwrap().is_empty());
    assert!(service.store().pending_intake().unwrap().is_none());
}

#[test]
fn check_out_without_active_ticket_is_rejected() {
    let service = service();
    let result = service.check_out(at(10, 0));
    assert!(matches!(result, Err(ServiceError::NoActiveTicket)));
}

#[test]
fn specialty_listing_degrades_to_empty_list_on_failure() {
    let gateway = MockGateway::default()
        .with_listing_error(GatewayError::Unreachable("connection refused".into()));
    let service = service_with(gateway);

    let listing = service.specialty_listing(1);
    assert!(listing.specialties.is_empty());
    assert!(listing.error.is_some());
}

#[test]
fn specialty_listing_passes_through_on_success() {
    let specialties = vec![
        Specialty {
            id: 1,
            name: "Cardiologia".into(),
            estimated_wait: "40 min".into(),
        },
        Specialty {
            id: 2,
            name: "Pediatria".into(),
            estimated_wait: "25".into(),
        },
    ];
    let gateway = MockGateway::default().with_specialties(specialties.clone());
    let service = service_with(gateway);

    let listing = service.specialty_listing(1);
    assert_eq!(listing.specialties, specialties);
    assert!(listing.error.is_none());
}
