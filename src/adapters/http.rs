use crate::domain::model::Doctor;
use crate::domain::ports::DoctorSource;
use crate::utils::error::{DirectoryError, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

pub const DEFAULT_ENDPOINT: &str = "https://srijandubey.github.io/campus-api-mock/SRM-C1-25.json";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Reads the whole doctor list from a single read-only JSON endpoint.
pub struct HttpDoctorSource {
    endpoint: String,
    client: Client,
}

impl HttpDoctorSource {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            endpoint: endpoint.into(),
            client,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl DoctorSource for HttpDoctorSource {
    async fn fetch_doctors(&self) -> Result<Vec<Doctor>> {
        tracing::debug!("Making API request to: {}", self.endpoint);
        let response = self.client.get(&self.endpoint).send().await?;

        let status = response.status();
        tracing::debug!("API response status: {}", status);
        if !status.is_success() {
            return Err(DirectoryError::HttpStatusError {
                endpoint: self.endpoint.clone(),
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        let doctors: Vec<Doctor> = serde_json::from_str(&body)?;
        tracing::debug!("Decoded {} doctor records ({} bytes)", doctors.len(), body.len());
        Ok(doctors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    fn doctor_json() -> serde_json::Value {
        serde_json::json!([
            {
                "id": "d1",
                "name": "Dr. Kavya Iyer",
                "specialty": "Neurologist",
                "consultationTypes": ["Online", "In-person"],
                "experience": 14,
                "rating": 4.8,
                "reviewCount": 320,
                "fees": 900,
                "qualification": "MBBS, DM Neurology",
                "imageUrl": "https://example.com/kavya.jpg",
                "availability": ["Mon", "Thu"],
                "location": "Bengaluru"
            }
        ])
    }

    #[tokio::test]
    async fn test_fetch_doctors_success() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(GET).path("/doctors.json");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(doctor_json());
        });

        let source = HttpDoctorSource::new(server.url("/doctors.json"), DEFAULT_TIMEOUT).unwrap();
        let doctors = source.fetch_doctors().await.unwrap();

        api_mock.assert();
        assert_eq!(doctors.len(), 1);
        assert_eq!(doctors[0].name, "Dr. Kavya Iyer");
        assert_eq!(doctors[0].location.as_deref(), Some("Bengaluru"));
    }

    #[tokio::test]
    async fn test_non_success_status_is_an_error() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(GET).path("/doctors.json");
            then.status(500);
        });

        let source = HttpDoctorSource::new(server.url("/doctors.json"), DEFAULT_TIMEOUT).unwrap();
        let err = source.fetch_doctors().await.unwrap_err();

        api_mock.assert();
        assert!(matches!(err, DirectoryError::HttpStatusError { status: 500, .. }));
        assert!(err.is_fetch_failure());
    }

    #[tokio::test]
    async fn test_malformed_body_is_an_error() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/doctors.json");
            then.status(200).json_body(serde_json::json!({"doctors": []}));
        });

        let source = HttpDoctorSource::new(server.url("/doctors.json"), DEFAULT_TIMEOUT).unwrap();
        let err = source.fetch_doctors().await.unwrap_err();
        assert!(matches!(err, DirectoryError::DecodeError(_)));
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_a_request_error() {
        let source = HttpDoctorSource::new("http://127.0.0.1:1/doctors.json", DEFAULT_TIMEOUT).unwrap();
        let err = source.fetch_doctors().await.unwrap_err();

        assert!(matches!(err, DirectoryError::RequestError(_)));
        assert!(err.is_fetch_failure());
        assert_eq!(err.user_friendly_message(), crate::utils::error::FETCH_FAILURE_MESSAGE);
    }
}
