mod error;
mod handlers;
mod route;
mod state;
mod status_page;
pub mod telemetry;

pub use error::ApiError;
pub use route::create_router;
pub use state::AppState;
pub use status_page::{PageData, StatusPage, Template, TemplateError};
