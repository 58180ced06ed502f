use std::sync::Arc;

use client_core::{
    Alert, AlertSink, LoadingHandle, Navigator, Route, UpdateOutcome, WorkOrderRepository,
};
use shared::{
    domain::{Customer, Priority, WorkOrder, WorkOrderId, WorkOrderStatus},
    error::FieldErrors,
    presentation::{label_for, severity_tier_for, SeverityTier},
};
use tokio::sync::Mutex;
use tracing::{debug, info};

use super::events::DetailEvent;

pub const UPDATE_SUCCESS_MESSAGE: &str = "Service Status Updated successful!";
const REQUIRED_FIELD_MESSAGE: &str = "Field is required";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenPhase {
    Idle,
    Loading,
}

/// Form values, seeded from the record the list screen handed over.
/// Only `status` is editable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailForm {
    pub title: String,
    pub status: WorkOrderStatus,
    pub priority: Priority,
    pub details: String,
}

impl From<&WorkOrder> for DetailForm {
    fn from(order: &WorkOrder) -> Self {
        Self {
            title: order.title.clone(),
            status: order.status,
            priority: order.priority,
            details: order.details.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailSnapshot {
    pub id: WorkOrderId,
    pub form: DetailForm,
    pub status_label: &'static str,
    pub priority_label: &'static str,
    pub severity: SeverityTier,
    pub status_options: Vec<(WorkOrderStatus, &'static str)>,
    pub created_at: String,
    pub has_attachment: bool,
    pub attachment_url: Option<String>,
    pub customer: Customer,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetailView {
    /// Blocking overlay; nothing else is interactive.
    Loading,
    Form(Box<DetailSnapshot>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Rejected by form validation; nothing was sent.
    Invalid(FieldErrors),
    /// Another request holds the loading overlay.
    Busy,
    Submitted(UpdateOutcome),
}

pub struct DetailScreenController {
    work_order: WorkOrder,
    form: Mutex<DetailForm>,
    repository: Arc<WorkOrderRepository>,
    loading: LoadingHandle,
    navigator: Arc<dyn Navigator>,
    alerts: Arc<dyn AlertSink>,
}

impl DetailScreenController {
    pub fn new(
        work_order: WorkOrder,
        repository: Arc<WorkOrderRepository>,
        loading: LoadingHandle,
        navigator: Arc<dyn Navigator>,
        alerts: Arc<dyn AlertSink>,
    ) -> Self {
        let form = Mutex::new(DetailForm::from(&work_order));
        Self {
            work_order,
            form,
            repository,
            loading,
            navigator,
            alerts,
        }
    }

    pub async fn handle(&self, event: DetailEvent) -> Option<SubmitOutcome> {
        match event {
            DetailEvent::StatusSelected(status) => {
                self.select_status(status).await;
                None
            }
            DetailEvent::Submit => Some(self.submit().await),
        }
    }

    pub fn phase(&self) -> ScreenPhase {
        if self.loading.is_loading() {
            ScreenPhase::Loading
        } else {
            ScreenPhase::Idle
        }
    }

    pub async fn select_status(&self, status: WorkOrderStatus) {
        self.form.lock().await.status = status;
    }

    pub async fn form(&self) -> DetailForm {
        self.form.lock().await.clone()
    }

    pub async fn view(&self) -> DetailView {
        if self.phase() == ScreenPhase::Loading {
            return DetailView::Loading;
        }

        let form = self.form().await;
        let order = &self.work_order;
        DetailView::Form(Box::new(DetailSnapshot {
            id: order.id,
            status_label: label_for(form.status),
            priority_label: form.priority.label(),
            severity: severity_tier_for(form.priority),
            status_options: WorkOrderStatus::ALL
                .into_iter()
                .map(|status| (status, label_for(status)))
                .collect(),
            created_at: order.created_at_display(),
            has_attachment: order.has_attachment(),
            attachment_url: order.file_url.clone().filter(|_| order.has_attachment()),
            customer: order.customer.clone(),
            form,
        }))
    }

    /// Sends the selected status as a single-field patch.
    ///
    /// The loading flag is raised for the duration of the call and cleared
    /// when it ends, even if this future is dropped first. Nothing is retried.
    pub async fn submit(&self) -> SubmitOutcome {
        let status = self.form.lock().await.status;
        if !status.is_known() {
            debug!(work_order_id = self.work_order.id.0, "status missing, submit blocked");
            return SubmitOutcome::Invalid(FieldErrors::single("status", REQUIRED_FIELD_MESSAGE));
        }
        let Some(loading) = self.loading.try_raise() else {
            return SubmitOutcome::Busy;
        };

        let outcome = self
            .repository
            .update_status(self.work_order.id, status)
            .await;

        match &outcome {
            UpdateOutcome::Updated => {
                info!(work_order_id = self.work_order.id.0, "leaving detail screen after update");
                self.alerts.alert(Alert::success(UPDATE_SUCCESS_MESSAGE));
                self.navigator.replace(Route::WorkList);
            }
            UpdateOutcome::Rejected(errors) => {
                for error in errors.iter() {
                    self.alerts.alert(Alert::error(error.message.clone()));
                }
            }
            UpdateOutcome::Unexpected { status } => {
                self.alerts
                    .alert(Alert::error(format!("Unexpected server response ({status})")));
            }
            UpdateOutcome::Failed(message) => {
                self.alerts.alert(Alert::error(message.clone()));
            }
        }

        drop(loading);
        SubmitOutcome::Submitted(outcome)
    }
}

#[cfg(test)]
#[path = "../tests/detail_screen_tests.rs"]
mod tests;
