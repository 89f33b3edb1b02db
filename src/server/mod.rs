pub mod app;
mod deserializers;
mod error;
mod routes;

pub use app::{build_router, run_server, AppState};
pub use error::ApiError;
