//! UI lifecycle events the screens react to.

use shared::domain::{WorkOrderId, WorkOrderStatus};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListEvent {
    Mounted,
    SearchChanged(String),
    OpenDetails(WorkOrderId),
    CreateInvoice(WorkOrderId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetailEvent {
    StatusSelected(WorkOrderStatus),
    Submit,
}
