use std::{path::PathBuf, sync::Arc};

use anyhow::{anyhow, bail, Context, Result};
use clap::{Parser, Subcommand};
use client_core::{
    HttpWorkOrderApi, LoadingHandle, Route, Session, TracingErrorReporter, WorkOrderRepository,
};
use shared::domain::{TechnicianId, WorkOrder, WorkOrderId, WorkOrderStatus};
use tracing_subscriber::EnvFilter;

mod config;
mod controller;
mod terminal;

use config::{load_settings, normalize_base_url};
use controller::{DetailEvent, DetailScreenController, ListEvent, ListScreenController, SubmitOutcome};
use terminal::{render_detail, render_list, TerminalAlerts, TerminalNavigator};

#[derive(Parser, Debug)]
#[command(name = "technician", about = "Work orders assigned to a field technician")]
struct Args {
    #[arg(long, default_value = "technician.toml")]
    config: PathBuf,
    #[arg(long)]
    api_base_url: Option<String>,
    #[arg(long)]
    technician_id: Option<i64>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List work orders, optionally filtered by a search text.
    List {
        #[arg(long, default_value = "")]
        search: String,
    },
    /// Show the detail view of one listed work order.
    Show {
        id: i64,
        #[arg(long, default_value = "")]
        search: String,
    },
    /// Change the status of one listed work order.
    UpdateStatus {
        id: i64,
        status: WorkOrderStatus,
        #[arg(long, default_value = "")]
        search: String,
    },
}

struct App {
    repository: Arc<WorkOrderRepository>,
    session: Session,
    loading: LoadingHandle,
    navigator: Arc<TerminalNavigator>,
    alerts: Arc<TerminalAlerts>,
}

impl App {
    fn list_screen(&self) -> ListScreenController {
        ListScreenController::new(
            self.repository.clone(),
            self.session,
            self.navigator.clone(),
        )
    }

    fn detail_screen(&self, work_order: WorkOrder) -> DetailScreenController {
        DetailScreenController::new(
            work_order,
            self.repository.clone(),
            self.loading.clone(),
            self.navigator.clone(),
            self.alerts.clone(),
        )
    }

    /// Loads the list with `search` and follows "View Details" on `id`.
    async fn open_details(&self, search: String, id: i64) -> Result<DetailScreenController> {
        let list = self.list_screen();
        list.handle(ListEvent::SearchChanged(search)).await;
        list.handle(ListEvent::OpenDetails(WorkOrderId(id))).await;
        match self.navigator.take_last() {
            Some(Route::WorkDetails(order)) => Ok(self.detail_screen(*order)),
            _ => Err(anyhow!("work order {id} is not in the technician's list")),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let mut settings = load_settings(&args.config)?;
    if let Some(url) = args.api_base_url {
        settings.api_base_url = normalize_base_url(&url)?;
    }
    if let Some(id) = args.technician_id {
        settings.technician_id = Some(id);
    }

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&settings.log_filter))
        .context("invalid log filter")?;
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let technician_id = settings
        .technician_id
        .ok_or_else(|| anyhow!("technician id is not configured"))?;
    tracing::info!(api = %settings.api_base_url, technician_id, "starting technician client");

    let repository = Arc::new(WorkOrderRepository::new(
        Arc::new(HttpWorkOrderApi::new(settings.api_base_url.clone())),
        Arc::new(TracingErrorReporter),
    ));
    let app = App {
        repository,
        session: Session::new(TechnicianId(technician_id)),
        loading: LoadingHandle::new(),
        navigator: Arc::new(TerminalNavigator::default()),
        alerts: Arc::new(TerminalAlerts),
    };

    match args.command {
        Command::List { search } => {
            let list = app.list_screen();
            let event = if search.is_empty() {
                ListEvent::Mounted
            } else {
                ListEvent::SearchChanged(search)
            };
            list.handle(event).await;
            let state = list.state().await;
            print!("{}", render_list(&state, &list.rows().await));
        }
        Command::Show { id, search } => {
            let detail = app.open_details(search, id).await?;
            print!("{}", render_detail(&detail.view().await));
        }
        Command::UpdateStatus { id, status, search } => {
            let detail = app.open_details(search, id).await?;
            detail.handle(DetailEvent::StatusSelected(status)).await;
            match detail.handle(DetailEvent::Submit).await {
                Some(SubmitOutcome::Submitted(outcome)) if outcome.is_success() => {
                    if let Some(route) = app.navigator.take_last() {
                        tracing::debug!(route = route.name(), "returned to list");
                    }
                }
                Some(SubmitOutcome::Invalid(errors)) => {
                    let messages: Vec<_> = errors
                        .iter()
                        .map(|error| format!("{}: {}", error.field, error.message))
                        .collect();
                    bail!("invalid form: {}", messages.join("; "));
                }
                _ => bail!("status of work order {id} was not updated"),
            }
        }
    }

    Ok(())
}

#[cfg(test)]
#[path = "tests/support.rs"]
mod test_support;
