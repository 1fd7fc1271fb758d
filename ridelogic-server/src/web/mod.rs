//! Web layer for the RideLogic backend.
//!
//! JSON endpoints for timetable extraction, query interpretation,
//! location matching, crowd reports and the assistant.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;
