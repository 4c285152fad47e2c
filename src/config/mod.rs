pub mod toml_config;

pub use toml_config::DirectoryConfig;

#[cfg(feature = "cli")]
use crate::core::controller::PageController;
#[cfg(feature = "cli")]
use crate::domain::model::{ConsultationType, SortBy};
#[cfg(feature = "cli")]
use clap::Parser;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "doctor-directory")]
#[command(about = "Search, filter and page through a remote doctor directory")]
pub struct CliConfig {
    /// Path to a TOML settings file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Override the doctor list endpoint
    #[arg(long)]
    pub endpoint: Option<String>,

    /// Restore a view from a query string, e.g. "page=2&sortBy=fees_low_to_high"
    #[arg(long)]
    pub query: Option<String>,

    #[arg(long)]
    pub search: Option<String>,

    #[arg(long, help = "Online, In-person or Home Visit")]
    pub consultation_type: Option<ConsultationType>,

    #[arg(long, value_delimiter = ',')]
    pub specialties: Vec<String>,

    #[arg(long, help = "fees_low_to_high, fees_high_to_low or experience_high_to_low")]
    pub sort_by: Option<String>,

    #[arg(long)]
    pub page: Option<usize>,

    #[arg(long)]
    pub per_page: Option<usize>,

    /// Print name suggestions for this partial input instead of a listing
    #[arg(long)]
    pub suggest: Option<String>,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub json_logs: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

#[cfg(feature = "cli")]
impl CliConfig {
    /// Load the settings file, if any, and layer command-line overrides on top.
    pub fn directory_config(&self) -> crate::utils::error::Result<DirectoryConfig> {
        let mut config = match &self.config {
            Some(path) => DirectoryConfig::from_file(path)?,
            None => DirectoryConfig::default(),
        };

        if let Some(endpoint) = &self.endpoint {
            config.source.endpoint = Some(endpoint.clone());
        }
        if let Some(per_page) = self.per_page {
            config.listing.per_page = Some(per_page);
        }

        Ok(config)
    }

    /// Apply the filter flags as user actions, page last so it survives the resets.
    pub fn apply_to(&self, controller: &mut PageController) {
        if let Some(search) = &self.search {
            controller.set_search_input(search.clone());
            controller.submit_search();
        }
        if let Some(consultation_type) = self.consultation_type {
            controller.set_consultation_type(Some(consultation_type));
        }
        if !self.specialties.is_empty() {
            controller.set_specialties(self.specialties.clone());
        }
        if let Some(sort_by) = &self.sort_by {
            let sort = SortBy::from_param(sort_by);
            if sort.is_none() {
                tracing::warn!("Unknown sort order '{}', leaving results unsorted", sort_by);
            }
            controller.set_sort(sort);
        }
        if let Some(page) = self.page {
            controller.go_to_page(page);
        }
    }
}
