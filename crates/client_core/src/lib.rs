//! Work-order access for the technician app: HTTP transport, the repository
//! that applies the app's failure policy, and the UI collaborator seams.

pub mod api;
pub mod collaborators;
pub mod repository;

pub use api::{HttpWorkOrderApi, PatchResponse, WorkOrderApi, WorkOrderApiError};
pub use collaborators::{
    Alert, AlertSink, ErrorReporter, LoadingGuard, LoadingHandle, Navigator, Route, Session,
    TracingErrorReporter,
};
pub use repository::{UpdateOutcome, WorkOrderRepository};
