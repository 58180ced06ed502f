//! Seams to the UI infrastructure the screens run inside: session, loading
//! overlay, navigation, alerts and error reporting.

use std::sync::Arc;

use shared::domain::{TechnicianId, WorkOrder, WorkOrderId};
use tokio::sync::watch;
use tracing::error;

use crate::api::WorkOrderApiError;

/// The signed-in technician, supplied by whoever owns authentication.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Session {
    pub technician_id: TechnicianId,
}

impl Session {
    pub fn new(technician_id: TechnicianId) -> Self {
        Self { technician_id }
    }
}

/// Shared loading flag backing the blocking overlay.
#[derive(Debug, Clone)]
pub struct LoadingHandle {
    tx: Arc<watch::Sender<bool>>,
}

impl Default for LoadingHandle {
    fn default() -> Self {
        Self::new()
    }
}

impl LoadingHandle {
    pub fn new() -> Self {
        let (tx, _) = watch::channel(false);
        Self { tx: Arc::new(tx) }
    }

    pub fn set(&self, loading: bool) {
        self.tx.send_replace(loading);
    }

    pub fn is_loading(&self) -> bool {
        *self.tx.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.tx.subscribe()
    }

    /// Raises the flag only if it is currently down. The returned guard
    /// lowers it again when dropped, including when the owning future is.
    pub fn try_raise(&self) -> Option<LoadingGuard> {
        let raised = self.tx.send_if_modified(|loading| {
            if *loading {
                false
            } else {
                *loading = true;
                true
            }
        });
        raised.then(|| LoadingGuard {
            tx: Arc::clone(&self.tx),
        })
    }
}

/// Holds the loading flag up; see [`LoadingHandle::try_raise`].
#[must_use = "the loading flag drops back as soon as the guard does"]
#[derive(Debug)]
pub struct LoadingGuard {
    tx: Arc<watch::Sender<bool>>,
}

impl Drop for LoadingGuard {
    fn drop(&mut self) {
        self.tx.send_replace(false);
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub title: String,
    pub message: String,
}

impl Alert {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            title: "Success".to_string(),
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            title: "Error".to_string(),
            message: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.title == "Error"
    }
}

pub trait AlertSink: Send + Sync {
    fn alert(&self, alert: Alert);
}

#[derive(Debug, Clone, PartialEq)]
pub enum Route {
    WorkList,
    WorkDetails(Box<WorkOrder>),
    CreateInvoice { work_id: WorkOrderId },
}

impl Route {
    pub fn name(&self) -> &'static str {
        match self {
            Self::WorkList => "Work List",
            Self::WorkDetails(_) => "Details Work",
            Self::CreateInvoice { .. } => "Create Invoice",
        }
    }
}

pub trait Navigator: Send + Sync {
    /// Pushes a route on top of the current one.
    fn navigate(&self, route: Route);
    /// Swaps the current route for another.
    fn replace(&self, route: Route);
}

pub trait ErrorReporter: Send + Sync {
    fn report(&self, error: &WorkOrderApiError);
}

pub struct TracingErrorReporter;

impl ErrorReporter for TracingErrorReporter {
    fn report(&self, error: &WorkOrderApiError) {
        error!(error = %error, "work order request failed");
    }
}

#[cfg(test)]
#[path = "tests/collaborators_tests.rs"]
mod tests;
