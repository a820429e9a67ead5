pub mod app_state;
pub mod worksheet_flow;

pub use app_state::AppState;
pub use worksheet_flow::{GeneratedWorksheet, WorksheetFlow};
