use super::*;
use serde_json::json;

fn sample_payload() -> Value {
    json!({
        "id": 42,
        "servicereq_no": "SR-0042",
        "title": "Boiler does not ignite",
        "details": "Pilot light goes out after a minute",
        "status": "in_progress",
        "priority": "High",
        "created_at": "2024-03-05T09:30:00+06:00",
        "files": "https://files.example.com/sr-0042.pdf",
        "customer": {
            "name": "Rahim Uddin",
            "email": "rahim@example.com",
            "phone": "01700000000",
            "reg_no": 1187
        }
    })
}

#[test]
fn decodes_server_work_order() {
    let order: WorkOrder = serde_json::from_value(sample_payload()).expect("decode");

    assert_eq!(order.id, WorkOrderId(42));
    assert_eq!(order.service_request_number, "SR-0042");
    assert_eq!(order.status, WorkOrderStatus::InProgress);
    assert_eq!(order.priority, Priority::High);
    assert_eq!(order.customer.registration_number, "1187");
    assert!(order.has_attachment());
    assert!(!order.can_create_invoice());
}

#[test]
fn unknown_status_and_priority_never_fail_decoding() {
    let mut payload = sample_payload();
    payload["status"] = json!("on_hold");
    payload["priority"] = json!(3);
    let order: WorkOrder = serde_json::from_value(payload).expect("decode");
    assert_eq!(order.status, WorkOrderStatus::Unknown);
    assert_eq!(order.priority, Priority::Unknown);

    let minimal: WorkOrder = serde_json::from_value(json!({ "id": 1, "status": null }))
        .expect("decode minimal");
    assert_eq!(minimal.status, WorkOrderStatus::Unknown);
    assert_eq!(minimal.priority, Priority::Unknown);
    assert_eq!(minimal.customer, Customer::default());
    assert!(!minimal.has_attachment());
}

#[test]
fn legacy_waiting_spelling_is_accepted() {
    assert_eq!(
        WorkOrderStatus::from_wire("waittingoncustomer"),
        WorkOrderStatus::WaitingOnCustomer
    );
    assert_eq!(
        WorkOrderStatus::from_wire("waiting_on_customer"),
        WorkOrderStatus::WaitingOnCustomer
    );
    assert_eq!(
        WorkOrderStatus::from_wire("waitingoncustomer"),
        WorkOrderStatus::Unknown
    );
}

#[test]
fn wire_values_match_exactly() {
    let order: WorkOrder =
        serde_json::from_value(json!({ "id": 7, "status": "CLOSED", "priority": "HIGH" }))
            .expect("decode");
    assert_eq!(order.status, WorkOrderStatus::Unknown);
    assert_eq!(order.priority, Priority::Unknown);
    assert_eq!(order.priority.label(), "None");
    assert_eq!(WorkOrderStatus::from_wire("Closed "), WorkOrderStatus::Unknown);
    assert_eq!(WorkOrderStatus::from_wire("NEW"), WorkOrderStatus::Unknown);
    assert_eq!(Priority::from_wire("high"), Priority::Unknown);
}

#[test]
fn attachment_flag_follows_file_url() {
    let mut order: WorkOrder = serde_json::from_value(sample_payload()).expect("decode");
    order.file_url = None;
    assert!(!order.has_attachment());
    order.file_url = Some("   ".to_string());
    assert!(!order.has_attachment());
    order.file_url = Some("https://files.example.com/a.png".to_string());
    assert!(order.has_attachment());
}

#[test]
fn only_closed_orders_can_be_invoiced() {
    let mut order: WorkOrder = serde_json::from_value(sample_payload()).expect("decode");
    for status in WorkOrderStatus::ALL {
        order.status = status;
        assert_eq!(order.can_create_invoice(), status == WorkOrderStatus::Closed);
    }
}

#[test]
fn created_at_display_falls_back_to_raw_value() {
    let mut order: WorkOrder = serde_json::from_value(sample_payload()).expect("decode");
    assert_eq!(order.created_at_display(), "2024-03-05 09:30");

    order.created_at = "yesterday".to_string();
    assert!(order.created_at_parsed().is_none());
    assert_eq!(order.created_at_display(), "yesterday");
}

#[test]
fn strict_parse_rejects_unknown_values() {
    assert_eq!("fixed".parse::<WorkOrderStatus>(), Ok(WorkOrderStatus::Fixed));
    assert_eq!(
        "on_hold".parse::<WorkOrderStatus>(),
        Err(ParseError::UnknownStatus("on_hold".to_string()))
    );
    assert_eq!("Medium".parse::<Priority>(), Ok(Priority::Medium));
    assert!("medium".parse::<Priority>().is_err());
    assert!("urgent".parse::<Priority>().is_err());
}

#[test]
fn status_serializes_to_wire_value() {
    assert_eq!(
        serde_json::to_value(WorkOrderStatus::WaitingOnCustomer).expect("encode"),
        json!("waiting_on_customer")
    );
    assert_eq!(
        serde_json::to_value(WorkOrderStatus::Unknown).expect("encode"),
        Value::Null
    );
}
