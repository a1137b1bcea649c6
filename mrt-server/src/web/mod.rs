//! Web layer for the route planner.
//!
//! Provides the HTTP endpoint for route search.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;
