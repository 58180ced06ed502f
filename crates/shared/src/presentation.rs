//! Display mapping for work-order status and priority.
//!
//! Both functions are total. This is where malformed upstream values are
//! absorbed: they render as "None" / the least severe tier and never error.

use crate::domain::{Priority, WorkOrderStatus};

pub const FALLBACK_LABEL: &str = "None";

/// Visual emphasis for a priority badge, most severe first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SeverityTier {
    Severe,
    Moderate,
    Minor,
}

impl SeverityTier {
    /// Colour scheme name of the badge the list row renders.
    pub fn color_scheme(self) -> &'static str {
        match self {
            Self::Severe => "error",
            Self::Moderate => "amber",
            Self::Minor => "lime",
        }
    }
}

pub fn label_for(status: WorkOrderStatus) -> &'static str {
    match status {
        WorkOrderStatus::New => "New",
        WorkOrderStatus::InProgress => "In Progress",
        WorkOrderStatus::WaitingOnCustomer => "Waiting on Customer",
        WorkOrderStatus::Fixed => "Fixed",
        WorkOrderStatus::Closed => "Closed",
        WorkOrderStatus::Cancelled => "Cancelled",
        WorkOrderStatus::Unknown => FALLBACK_LABEL,
    }
}

pub fn label_for_raw(raw: Option<&str>) -> &'static str {
    label_for(raw.map_or(WorkOrderStatus::Unknown, WorkOrderStatus::from_wire))
}

pub fn severity_tier_for(priority: Priority) -> SeverityTier {
    match priority {
        Priority::High => SeverityTier::Severe,
        Priority::Medium => SeverityTier::Moderate,
        Priority::Low | Priority::Unknown => SeverityTier::Minor,
    }
}

pub fn severity_tier_for_raw(raw: Option<&str>) -> SeverityTier {
    severity_tier_for(raw.map_or(Priority::Unknown, Priority::from_wire))
}

#[cfg(test)]
#[path = "tests/presentation_tests.rs"]
mod tests;
