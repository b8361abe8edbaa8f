use serde::Serialize;

use crate::error::ClientError;
use crate::http::ApiClient;
use crate::models::sync::{
    HierarchyByCompanyCode, SocCompanyApiData, SocJobApiData, SocSectorApiData, SocUnitApiData, SyncResponse,
};

pub const SYNC_URI: &str = "/api/soc/sync";

/// Triggers the server-side SOC synchronization jobs.
#[derive(Clone)]
pub struct SyncService {
    client: ApiClient,
}

impl SyncService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    async fn post<B: Serialize + ?Sized>(&self, endpoint: &str, body: Option<&B>) -> Result<SyncResponse, ClientError> {
        let path = format!("{}/{}", SYNC_URI, endpoint);
        let response: SyncResponse = self.client.post(&path, body).await?;
        tracing::info!("Sync '{}' finished with {:?}: {}", endpoint, response.status, response.message);
        Ok(response)
    }

    /// Pull everything from the SOC API and persist it.
    pub async fn full_from_api(&self) -> Result<SyncResponse, ClientError> {
        self.post("full-from-api", None::<&()>).await
    }

    pub async fn sync_companies(&self, companies: &[SocCompanyApiData]) -> Result<SyncResponse, ClientError> {
        self.post("companies", Some(companies)).await
    }

    pub async fn sync_units(&self, units: &[SocUnitApiData]) -> Result<SyncResponse, ClientError> {
        self.post("units", Some(units)).await
    }

    pub async fn sync_sectors(&self, sectors: &[SocSectorApiData]) -> Result<SyncResponse, ClientError> {
        self.post("sectors", Some(sectors)).await
    }

    pub async fn sync_jobs(&self, jobs: &[SocJobApiData]) -> Result<SyncResponse, ClientError> {
        self.post("jobs", Some(jobs)).await
    }

    pub async fn process_hierarchies(&self, hierarchies: &HierarchyByCompanyCode) -> Result<SyncResponse, ClientError> {
        self.post("hierarchies", Some(hierarchies)).await
    }
}
