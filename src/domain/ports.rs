use crate::domain::model::Doctor;
use crate::utils::error::Result;
use async_trait::async_trait;

/// Where the full doctor list comes from. Called once per page load.
#[async_trait]
pub trait DoctorSource: Send + Sync {
    async fn fetch_doctors(&self) -> Result<Vec<Doctor>>;
}
