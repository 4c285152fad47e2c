pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::http::HttpDoctorSource;
pub use app::session::DirectorySession;
pub use config::DirectoryConfig;
pub use crate::core::{controller::PageController, query::filter_and_sort, suggest::suggest_names};
pub use utils::error::{DirectoryError, Result};
