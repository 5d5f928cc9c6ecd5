//! Web layer for the bus route viewer.
//!
//! Serves the viewer pages and the search, detail and selection endpoints
//! the browser calls as the user types and clicks.

mod dto;
mod routes;
mod state;
pub mod templates;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::{AppState, DatasetInfo};
pub use templates::*;
