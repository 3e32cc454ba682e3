//! HTTP surface of the birthday site: photo intake, photo lookup, the timeline, and the
//! Google Photos consent flow.

pub mod api_doc;
pub mod constants;
pub mod error;
pub mod handlers;
pub mod services;
pub mod setup;
pub mod state;
pub mod telemetry;
pub mod utils;

pub use error::{ErrorResponse, HttpAppError};
pub use state::{AppState, StorageState};
