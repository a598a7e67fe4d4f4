//! Pokémon classifier web server
//!
//! Serves the form page, the action endpoints that drive the session
//! reducer, a JSON API mirroring them, and health/metrics endpoints.

pub mod api;
pub mod config;
pub mod error;
pub mod render;

pub use api::{create_router, serve, AppState, Background};
pub use config::ServerConfig;
pub use error::{ApiError, ApiResult};
pub use render::{PageContext, PageRenderer};
