use crate::error::ClientError;
use crate::http::ApiClient;
use crate::models::{ApiResponse, SocUnit};

pub const UNITS_URI: &str = "/api/soc/units";

#[derive(Clone)]
pub struct UnitService {
    client: ApiClient,
}

impl UnitService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn find_by_id(&self, id: &str) -> Result<SocUnit, ClientError> {
        let response: ApiResponse<SocUnit> = self.client.get(&format!("{}/{}", UNITS_URI, id)).await?;
        Ok(response.data)
    }
}
