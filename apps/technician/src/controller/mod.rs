//! Controller layer: screen state, lifecycle events and repository orchestration.

pub mod detail_screen;
pub mod events;
pub mod list_screen;

pub use detail_screen::{DetailScreenController, DetailView, SubmitOutcome};
pub use events::{DetailEvent, ListEvent};
pub use list_screen::{ListScreenController, ListScreenState, WorkOrderRow};
