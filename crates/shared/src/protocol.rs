use serde::Serialize;

use crate::domain::{TechnicianId, WorkOrderId};

/// Multipart field carrying the new status in a patch request.
pub const STATUS_FIELD: &str = "status";

pub const WORK_ORDERS_PATH: &str = "/service_request/";

pub fn work_order_path(id: WorkOrderId) -> String {
    format!("{WORK_ORDERS_PATH}{}/", id.0)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListWorkOrdersQuery {
    pub technician: i64,
    pub search: String,
}

impl ListWorkOrdersQuery {
    pub fn new(technician: TechnicianId, search: &str) -> Self {
        Self {
            technician: technician.0,
            search: search.to_string(),
        }
    }
}
