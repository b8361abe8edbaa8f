use crate::error::ClientError;
use crate::http::ApiClient;
use crate::models::{Page, SocCompany};
use crate::query::QueryParams;

use super::resource::ResourceService;

pub const COMPANIES_URI: &str = "/api/soc/companies";

#[derive(Clone)]
pub struct CompanyService {
    resource: ResourceService<SocCompany>,
}

impl CompanyService {
    pub fn new(client: ApiClient) -> Self {
        Self { resource: ResourceService::new(client, COMPANIES_URI) }
    }

    pub async fn list(&self, params: &QueryParams) -> Result<Page<SocCompany>, ClientError> {
        self.resource.get_all(params).await
    }

    /// Company with its units, sectors and jobs.
    pub async fn get(&self, id: &str) -> Result<SocCompany, ClientError> {
        self.resource.get_by_id(id).await
    }
}
