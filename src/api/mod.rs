//! HTTP API layer

mod extract;
mod handlers;
mod routes;

pub mod envelope;

pub use envelope::{Envelope, Keyed};
pub use extract::{ApiJson, ApiPath, ApiQuery};
pub use routes::{create_router, ApiDoc, AppState};
