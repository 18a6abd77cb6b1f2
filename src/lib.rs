pub mod config;
pub use config::{Config, ConfigError, ConfigResult};

pub mod api;
pub mod draft;
pub mod editor;
pub mod error;
pub mod reorder;
pub mod wire;

pub use draft::{CourseDraft, EditCommand};
pub use editor::EditorSession;

static APPLICATION_NAME: &str = "coursewright";

pub fn setup_trace() {
    use tracing_error::ErrorLayer;
    use tracing_subscriber::{filter::EnvFilter, fmt, prelude::*};

    // load .env file for RUST_LOG etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env())
        .with(ErrorLayer::default())
        .init();

    tracing::debug!("tracing initialized.");
}
