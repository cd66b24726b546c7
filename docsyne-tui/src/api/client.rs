use anyhow::{Context, Result};
use doctor_directory::{DirectoryClient, DoctorRecord, FetchFailure};

use crate::api::dev_backend::DevBackend;
use crate::config::DocsyneConfig;

/// Where the doctor listing comes from: the configured endpoint, or bundled
/// sample data in dev mode.
#[derive(Debug, Clone)]
pub struct ApiClient {
    remote: Option<DirectoryClient>,
    dev_backend: Option<DevBackend>,
}

impl ApiClient {
    pub fn new(cfg: &DocsyneConfig) -> Result<Self> {
        let remote = DirectoryClient::new(&cfg.api_url, cfg.fetch_policy())
            .with_context(|| format!("Invalid API URL: {}", cfg.api_url))?;

        Ok(Self {
            remote: Some(remote),
            dev_backend: None,
        })
    }

    pub fn dev() -> Self {
        Self {
            remote: None,
            dev_backend: Some(DevBackend::new()),
        }
    }

    /// Short description of the data source for the header.
    pub fn source_label(&self) -> String {
        match &self.remote {
            Some(remote) => remote.url().to_string(),
            None => "dev sample data".to_string(),
        }
    }

    pub async fn fetch_doctors(&self) -> Result<Vec<DoctorRecord>, FetchFailure> {
        if let Some(dev) = &self.dev_backend {
            return dev.fetch_doctors().await;
        }
        match &self.remote {
            Some(remote) => remote.fetch_doctors().await,
            None => Ok(Vec::new()),
        }
    }
}
