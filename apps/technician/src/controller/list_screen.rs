use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc,
};

use client_core::{Navigator, Route, Session, WorkOrderRepository};
use shared::{
    domain::{WorkOrder, WorkOrderId},
    presentation::{label_for, severity_tier_for, SeverityTier},
};
use tokio::sync::Mutex;
use tracing::{debug, info};

use super::events::ListEvent;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListScreenState {
    pub search_text: String,
    pub work_orders: Vec<WorkOrder>,
    /// Sequence number of the fetch currently on screen; 0 before the first.
    pub applied_seq: u64,
}

impl ListScreenState {
    pub fn total(&self) -> usize {
        self.work_orders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.work_orders.is_empty()
    }
}

/// One card of the work list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkOrderRow {
    pub id: WorkOrderId,
    pub service_request_number: String,
    pub created_at: String,
    pub title: String,
    pub status_label: &'static str,
    pub priority_label: &'static str,
    pub severity: SeverityTier,
    pub can_create_invoice: bool,
}

impl From<&WorkOrder> for WorkOrderRow {
    fn from(order: &WorkOrder) -> Self {
        Self {
            id: order.id,
            service_request_number: order.service_request_number.clone(),
            created_at: order.created_at.clone(),
            title: order.title.clone(),
            status_label: label_for(order.status),
            priority_label: order.priority.label(),
            severity: severity_tier_for(order.priority),
            can_create_invoice: order.can_create_invoice(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    Applied { seq: u64, count: usize },
    /// A newer fetch was issued while this one was in flight.
    Superseded { seq: u64 },
    /// The repository reported the failure; the previous list stays up.
    Failed { seq: u64 },
}

/// Drives the work list: every search change refetches, and only the most
/// recently issued fetch may update the screen.
pub struct ListScreenController {
    repository: Arc<WorkOrderRepository>,
    session: Session,
    navigator: Arc<dyn Navigator>,
    state: Mutex<ListScreenState>,
    issued_seq: AtomicU64,
}

impl ListScreenController {
    pub fn new(
        repository: Arc<WorkOrderRepository>,
        session: Session,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        Self {
            repository,
            session,
            navigator,
            state: Mutex::new(ListScreenState::default()),
            issued_seq: AtomicU64::new(0),
        }
    }

    pub async fn handle(&self, event: ListEvent) {
        match event {
            ListEvent::Mounted => {
                self.load().await;
            }
            ListEvent::SearchChanged(text) => {
                self.set_search_text(text).await;
            }
            ListEvent::OpenDetails(id) => {
                self.open_details(id).await;
            }
            ListEvent::CreateInvoice(id) => {
                self.create_invoice(id).await;
            }
        }
    }

    pub async fn load(&self) -> FetchOutcome {
        let search = self.state.lock().await.search_text.clone();
        self.fetch(search).await
    }

    pub async fn set_search_text(&self, text: impl Into<String>) -> FetchOutcome {
        let text = text.into();
        self.state.lock().await.search_text = text.clone();
        self.fetch(text).await
    }

    async fn fetch(&self, search: String) -> FetchOutcome {
        let seq = self.issued_seq.fetch_add(1, Ordering::SeqCst) + 1;
        debug!(seq, search = %search, "work list fetch issued");

        let Some(orders) = self
            .repository
            .list_by_technician(self.session.technician_id, &search)
            .await
        else {
            return FetchOutcome::Failed { seq };
        };

        let mut state = self.state.lock().await;
        let latest = self.issued_seq.load(Ordering::SeqCst);
        if seq != latest || seq <= state.applied_seq {
            debug!(seq, latest, "discarding superseded work list response");
            return FetchOutcome::Superseded { seq };
        }

        let count = orders.len();
        state.work_orders = orders;
        state.applied_seq = seq;
        info!(seq, count, search = %search, "work list updated");
        FetchOutcome::Applied { seq, count }
    }

    pub async fn state(&self) -> ListScreenState {
        self.state.lock().await.clone()
    }

    pub async fn rows(&self) -> Vec<WorkOrderRow> {
        self.state
            .lock()
            .await
            .work_orders
            .iter()
            .map(WorkOrderRow::from)
            .collect()
    }

    /// Hands a snapshot of the row to the detail screen.
    pub async fn open_details(&self, id: WorkOrderId) -> bool {
        let Some(order) = self.find(id).await else {
            debug!(work_order_id = id.0, "open details for a row that is not listed");
            return false;
        };
        self.navigator.navigate(Route::WorkDetails(Box::new(order)));
        true
    }

    pub async fn create_invoice(&self, id: WorkOrderId) -> bool {
        match self.find(id).await {
            Some(order) if order.can_create_invoice() => {
                self.navigator
                    .replace(Route::CreateInvoice { work_id: order.id });
                true
            }
            _ => false,
        }
    }

    async fn find(&self, id: WorkOrderId) -> Option<WorkOrder> {
        self.state
            .lock()
            .await
            .work_orders
            .iter()
            .find(|order| order.id == id)
            .cloned()
    }
}

#[cfg(test)]
#[path = "../tests/list_screen_tests.rs"]
mod tests;
