//! In-memory fakes of the work-order API and UI collaborators.

use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

use async_trait::async_trait;
use client_core::{
    Alert, AlertSink, ErrorReporter, LoadingHandle, Navigator, PatchResponse, Route,
    WorkOrderApi, WorkOrderApiError, WorkOrderRepository,
};
use serde_json::json;
use shared::domain::{TechnicianId, WorkOrder, WorkOrderId, WorkOrderStatus};
use tokio::sync::oneshot;

pub fn work_order(id: i64, status: &str) -> WorkOrder {
    serde_json::from_value(json!({
        "id": id,
        "servicereq_no": format!("SR-{id}"),
        "title": format!("Work order {id}"),
        "details": "Replace the pressure valve",
        "status": status,
        "priority": "Medium",
        "created_at": "2024-02-01T12:00:00Z",
        "files": null,
        "customer": { "name": "Karim", "email": "karim@example.com", "phone": "0171", "reg_no": "C-88" }
    }))
    .expect("work order fixture")
}

#[derive(Default)]
pub struct FakeApi {
    lists: Mutex<HashMap<String, Vec<WorkOrder>>>,
    gates: Mutex<HashMap<String, oneshot::Receiver<()>>>,
    patch_gate: Mutex<Option<oneshot::Receiver<()>>>,
    patch_reply: Mutex<Option<PatchResponse>>,
    loading_probe: Mutex<Option<LoadingHandle>>,
    pub list_calls: Mutex<Vec<(TechnicianId, String)>>,
    pub patch_calls: Mutex<Vec<(WorkOrderId, WorkOrderStatus)>>,
    pub loading_seen_during_patch: Mutex<Vec<bool>>,
}

impl FakeApi {
    /// Searches without a registered list fail with a transport error.
    pub fn with_list(self, search: &str, orders: Vec<WorkOrder>) -> Self {
        self.lists
            .lock()
            .expect("lock")
            .insert(search.to_string(), orders);
        self
    }

    /// Holds the response for `search` until the returned sender fires.
    pub fn hold(&self, search: &str) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        self.gates
            .lock()
            .expect("lock")
            .insert(search.to_string(), rx);
        tx
    }

    /// Holds the next patch until the returned sender fires or is dropped.
    pub fn hold_patch(&self) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        *self.patch_gate.lock().expect("lock") = Some(rx);
        tx
    }

    /// No reply configured means the patch fails in transport.
    pub fn with_patch_reply(self, status: u16, body: Option<serde_json::Value>) -> Self {
        *self.patch_reply.lock().expect("lock") = Some(PatchResponse { status, body });
        self
    }

    pub fn observe_loading(self, loading: LoadingHandle) -> Self {
        *self.loading_probe.lock().expect("lock") = Some(loading);
        self
    }
}

#[async_trait]
impl WorkOrderApi for FakeApi {
    async fn fetch_work_orders(
        &self,
        technician_id: TechnicianId,
        search: &str,
    ) -> Result<Vec<WorkOrder>, WorkOrderApiError> {
        self.list_calls
            .lock()
            .expect("lock")
            .push((technician_id, search.to_string()));

        let gate = self.gates.lock().expect("lock").remove(search);
        if let Some(gate) = gate {
            let _ = gate.await;
        }

        self.lists
            .lock()
            .expect("lock")
            .get(search)
            .cloned()
            .ok_or_else(|| WorkOrderApiError::Transport {
                url: "http://test/service_request/".to_string(),
                message: "network unreachable".to_string(),
            })
    }

    async fn patch_status(
        &self,
        id: WorkOrderId,
        status: WorkOrderStatus,
    ) -> Result<PatchResponse, WorkOrderApiError> {
        self.patch_calls.lock().expect("lock").push((id, status));
        if let Some(loading) = self.loading_probe.lock().expect("lock").as_ref() {
            self.loading_seen_during_patch
                .lock()
                .expect("lock")
                .push(loading.is_loading());
        }

        let gate = self.patch_gate.lock().expect("lock").take();
        if let Some(gate) = gate {
            let _ = gate.await;
        }

        self.patch_reply
            .lock()
            .expect("lock")
            .clone()
            .ok_or_else(|| WorkOrderApiError::Transport {
                url: format!("http://test/service_request/{}/", id.0),
                message: "connection reset by peer".to_string(),
            })
    }
}

#[derive(Default)]
pub struct RecordingReporter {
    pub reported: Mutex<Vec<String>>,
}

impl ErrorReporter for RecordingReporter {
    fn report(&self, error: &WorkOrderApiError) {
        self.reported.lock().expect("lock").push(error.to_string());
    }
}

#[derive(Default)]
pub struct RecordingAlerts {
    pub alerts: Mutex<Vec<Alert>>,
}

impl AlertSink for RecordingAlerts {
    fn alert(&self, alert: Alert) {
        self.alerts.lock().expect("lock").push(alert);
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Transition {
    Navigate(Route),
    Replace(Route),
}

#[derive(Default)]
pub struct RecordingNavigator {
    pub transitions: Mutex<Vec<Transition>>,
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, route: Route) {
        self.transitions
            .lock()
            .expect("lock")
            .push(Transition::Navigate(route));
    }

    fn replace(&self, route: Route) {
        self.transitions
            .lock()
            .expect("lock")
            .push(Transition::Replace(route));
    }
}

pub fn repository_over(api: Arc<FakeApi>) -> (Arc<WorkOrderRepository>, Arc<RecordingReporter>) {
    let reporter = Arc::new(RecordingReporter::default());
    let repository = Arc::new(WorkOrderRepository::new(api, reporter.clone()));
    (repository, reporter)
}
