use std::sync::Arc;

use shared::{
    domain::{TechnicianId, WorkOrder, WorkOrderId, WorkOrderStatus},
    error::FieldErrors,
};
use tracing::{debug, info, warn};

use crate::{
    api::{PatchResponse, WorkOrderApi},
    collaborators::ErrorReporter,
};

const HTTP_OK: u16 = 200;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// The server answered exactly `200 OK`.
    Updated,
    /// A 2xx other than 200. Not treated as success.
    Unexpected { status: u16 },
    /// The server rejected the write with per-field messages.
    Rejected(FieldErrors),
    /// No usable answer: transport failure or an error without a field map.
    Failed(String),
}

impl UpdateOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Updated)
    }
}

/// Repository over the work-order endpoints.
///
/// Reads never surface errors to the caller: failures go to the
/// [`ErrorReporter`] and the caller sees `None`. Writes are never retried.
pub struct WorkOrderRepository {
    api: Arc<dyn WorkOrderApi>,
    reporter: Arc<dyn ErrorReporter>,
}

impl WorkOrderRepository {
    pub fn new(api: Arc<dyn WorkOrderApi>, reporter: Arc<dyn ErrorReporter>) -> Self {
        Self { api, reporter }
    }

    pub async fn list_by_technician(
        &self,
        technician_id: TechnicianId,
        search_text: &str,
    ) -> Option<Vec<WorkOrder>> {
        match self.api.fetch_work_orders(technician_id, search_text).await {
            Ok(orders) => {
                debug!(
                    technician_id = technician_id.0,
                    search = search_text,
                    count = orders.len(),
                    "work order list loaded"
                );
                Some(orders)
            }
            Err(err) => {
                warn!(technician_id = technician_id.0, error = %err, "work order list failed");
                self.reporter.report(&err);
                None
            }
        }
    }

    pub async fn update_status(
        &self,
        work_order_id: WorkOrderId,
        new_status: WorkOrderStatus,
    ) -> UpdateOutcome {
        match self.api.patch_status(work_order_id, new_status).await {
            Ok(response) => {
                let outcome = classify_patch_response(response);
                match &outcome {
                    UpdateOutcome::Updated => {
                        info!(work_order_id = work_order_id.0, status = ?new_status, "status updated")
                    }
                    other => {
                        warn!(work_order_id = work_order_id.0, outcome = ?other, "status update not applied")
                    }
                }
                outcome
            }
            Err(err) => {
                warn!(work_order_id = work_order_id.0, error = %err, "status update failed");
                UpdateOutcome::Failed(err.to_string())
            }
        }
    }
}

pub fn classify_patch_response(response: PatchResponse) -> UpdateOutcome {
    match response.status {
        HTTP_OK => UpdateOutcome::Updated,
        200..=299 => UpdateOutcome::Unexpected {
            status: response.status,
        },
        status => match response.body.as_ref().and_then(FieldErrors::from_payload) {
            Some(errors) if !errors.is_empty() => UpdateOutcome::Rejected(errors),
            _ => UpdateOutcome::Failed(format!("server rejected the update ({status})")),
        },
    }
}

#[cfg(test)]
#[path = "tests/repository_tests.rs"]
mod tests;
