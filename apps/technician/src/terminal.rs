//! Terminal stand-ins for the app's alert, navigation and rendering layer.

use std::sync::Mutex;

use client_core::{Alert, AlertSink, Navigator, Route};
use tracing::info;

use crate::controller::{DetailView, ListScreenState, WorkOrderRow};

pub struct TerminalAlerts;

impl AlertSink for TerminalAlerts {
    fn alert(&self, alert: Alert) {
        if alert.is_error() {
            eprintln!("[{}] {}", alert.title, alert.message);
        } else {
            println!("[{}] {}", alert.title, alert.message);
        }
    }
}

/// Logs transitions and keeps the last one so the CLI can follow it.
#[derive(Default)]
pub struct TerminalNavigator {
    last: Mutex<Option<Route>>,
}

impl TerminalNavigator {
    pub fn take_last(&self) -> Option<Route> {
        self.last.lock().ok().and_then(|mut last| last.take())
    }

    fn record(&self, route: Route) {
        if let Ok(mut last) = self.last.lock() {
            *last = Some(route);
        }
    }
}

impl Navigator for TerminalNavigator {
    fn navigate(&self, route: Route) {
        info!(route = route.name(), "navigate");
        self.record(route);
    }

    fn replace(&self, route: Route) {
        info!(route = route.name(), "replace");
        self.record(route);
    }
}

pub fn render_list(state: &ListScreenState, rows: &[WorkOrderRow]) -> String {
    let mut out = format!("Work List View    Total List: {}\n", state.total());
    if state.is_empty() {
        out.push_str("  (no work orders)\n");
        return out;
    }
    for row in rows {
        out.push_str(&format!(
            "  #{:<6} {:<12} {:<24} {:<20} {:<7} ({}){}\n",
            row.id.0,
            row.service_request_number,
            row.title,
            row.status_label,
            row.priority_label,
            row.severity.color_scheme(),
            if row.can_create_invoice {
                "  [Create Invoice]"
            } else {
                ""
            },
        ));
    }
    out
}

pub fn render_detail(view: &DetailView) -> String {
    let snapshot = match view {
        DetailView::Loading => return "Loading...\n".to_string(),
        DetailView::Form(snapshot) => snapshot,
    };

    let mut out = format!("Details Service View (#{})\n", snapshot.id);
    out.push_str(&format!("  Service Title : {}\n", snapshot.form.title));
    let options: Vec<_> = snapshot
        .status_options
        .iter()
        .map(|(status, label)| {
            if *status == snapshot.form.status {
                format!("[{label}]")
            } else {
                label.to_string()
            }
        })
        .collect();
    out.push_str(&format!("  Status        : {}\n", options.join(" | ")));
    if !snapshot.form.status.is_known() {
        out.push_str(&format!("                  (currently {})\n", snapshot.status_label));
    }
    out.push_str(&format!(
        "  Priority      : {} ({})\n",
        snapshot.priority_label,
        snapshot.severity.color_scheme()
    ));
    out.push_str(&format!("  Details       : {}\n", snapshot.form.details));
    out.push_str(&format!("  Create Date   : {}\n", snapshot.created_at));
    match &snapshot.attachment_url {
        Some(url) => out.push_str(&format!("  Download File : {url}\n")),
        None if !snapshot.has_attachment => {
            out.push_str("  Download File : N.B: No file available!\n")
        }
        None => {}
    }
    let customer = &snapshot.customer;
    out.push_str("Customer Info:\n");
    out.push_str(&format!("  Name: {}\n", customer.name));
    out.push_str(&format!("  Email: {}\n", customer.email));
    out.push_str(&format!(
        "  Phone: {}    Reg No. {}\n",
        customer.phone, customer.registration_number
    ));
    out
}

#[cfg(test)]
#[path = "tests/terminal_tests.rs"]
mod tests;
