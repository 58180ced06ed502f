pub mod domain;
pub mod error;
pub mod presentation;
pub mod protocol;

pub use domain::{Customer, Priority, TechnicianId, WorkOrder, WorkOrderId, WorkOrderStatus};
pub use presentation::{label_for, severity_tier_for, SeverityTier};
