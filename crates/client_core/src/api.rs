use async_trait::async_trait;
use reqwest::{
    header::{HeaderValue, CONTENT_TYPE},
    multipart::Form,
    Client,
};
use serde_json::Value;
use shared::{
    domain::{TechnicianId, WorkOrder, WorkOrderId, WorkOrderStatus},
    protocol::{work_order_path, ListWorkOrdersQuery, STATUS_FIELD, WORK_ORDERS_PATH},
};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum WorkOrderApiError {
    #[error("request to {url} failed: {message}")]
    Transport { url: String, message: String },
    #[error("server answered {status} for {url}")]
    Status { url: String, status: u16 },
    #[error("failed to decode response from {url}: {message}")]
    Decode { url: String, message: String },
    #[error("status {0:?} has no wire value and cannot be sent")]
    UnsendableStatus(WorkOrderStatus),
}

/// Raw answer to a status patch. Classifying it is up to the caller.
#[derive(Debug, Clone, PartialEq)]
pub struct PatchResponse {
    pub status: u16,
    pub body: Option<Value>,
}

#[async_trait]
pub trait WorkOrderApi: Send + Sync {
    async fn fetch_work_orders(
        &self,
        technician_id: TechnicianId,
        search: &str,
    ) -> Result<Vec<WorkOrder>, WorkOrderApiError>;

    async fn patch_status(
        &self,
        id: WorkOrderId,
        status: WorkOrderStatus,
    ) -> Result<PatchResponse, WorkOrderApiError>;
}

pub struct HttpWorkOrderApi {
    http: Client,
    base_url: String,
}

impl HttpWorkOrderApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(http: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            http,
            base_url: base_url.trim().trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

fn transport_error(url: &str, err: reqwest::Error) -> WorkOrderApiError {
    WorkOrderApiError::Transport {
        url: url.to_string(),
        message: err.to_string(),
    }
}

#[async_trait]
impl WorkOrderApi for HttpWorkOrderApi {
    async fn fetch_work_orders(
        &self,
        technician_id: TechnicianId,
        search: &str,
    ) -> Result<Vec<WorkOrder>, WorkOrderApiError> {
        let url = format!("{}{WORK_ORDERS_PATH}", self.base_url);
        let response = self
            .http
            .get(&url)
            .header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
            .query(&ListWorkOrdersQuery::new(technician_id, search))
            .send()
            .await
            .map_err(|e| transport_error(&url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(WorkOrderApiError::Status {
                url,
                status: status.as_u16(),
            });
        }

        let orders: Vec<WorkOrder> = response.json().await.map_err(|e| {
            if e.is_decode() {
                WorkOrderApiError::Decode {
                    url: url.clone(),
                    message: e.to_string(),
                }
            } else {
                transport_error(&url, e)
            }
        })?;
        debug!(technician_id = technician_id.0, count = orders.len(), "fetched work orders");
        Ok(orders)
    }

    async fn patch_status(
        &self,
        id: WorkOrderId,
        status: WorkOrderStatus,
    ) -> Result<PatchResponse, WorkOrderApiError> {
        let wire = status
            .as_wire()
            .ok_or(WorkOrderApiError::UnsendableStatus(status))?;
        let url = format!("{}{}", self.base_url, work_order_path(id));

        let response = self
            .http
            .patch(&url)
            .multipart(Form::new().text(STATUS_FIELD, wire))
            .send()
            .await
            .map_err(|e| transport_error(&url, e))?;

        let code = response.status().as_u16();
        let bytes = response
            .bytes()
            .await
            .map_err(|e| transport_error(&url, e))?;
        let body = serde_json::from_slice::<Value>(&bytes).ok();
        debug!(work_order_id = id.0, status = code, "status patch answered");

        Ok(PatchResponse { status: code, body })
    }
}

#[cfg(test)]
#[path = "tests/api_tests.rs"]
mod tests;
