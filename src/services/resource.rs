use std::marker::PhantomData;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::ClientError;
use crate::http::ApiClient;
use crate::models::{ApiResponse, Page};
use crate::query::QueryParams;

/// CRUD over one REST collection (`/api/users`, `/api/soc/companies`, ...).
///
/// Lists come back as bare pages; single records arrive wrapped in
/// `{ "success": true, "data": ... }`.
pub struct ResourceService<T> {
    client: ApiClient,
    uri: String,
    _phantom: PhantomData<T>,
}

impl<T> Clone for ResourceService<T> {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
            uri: self.uri.clone(),
            _phantom: PhantomData,
        }
    }
}

impl<T: DeserializeOwned> ResourceService<T> {
    pub fn new(client: ApiClient, uri: impl Into<String>) -> Self {
        Self {
            client,
            uri: uri.into(),
            _phantom: PhantomData,
        }
    }

    pub fn uri(&self) -> &str {
        &self.uri
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    fn record_path(&self, id: &str) -> String {
        format!("{}/{}", self.uri, id)
    }

    pub async fn get_all(&self, params: &QueryParams) -> Result<Page<T>, ClientError> {
        let path = self.client.path_with_query(&self.uri, params);
        self.client.get(&path).await
    }

    pub async fn get_by_id(&self, id: &str) -> Result<T, ClientError> {
        let response: ApiResponse<T> = self.client.get(&self.record_path(id)).await?;
        Ok(response.data)
    }

    pub async fn create<B: Serialize + ?Sized>(&self, data: &B) -> Result<T, ClientError> {
        let response: ApiResponse<T> = self.client.post(&self.uri, Some(data)).await?;
        Ok(response.data)
    }

    pub async fn update_by_id<B: Serialize + ?Sized>(&self, id: &str, data: &B) -> Result<T, ClientError> {
        let response: ApiResponse<T> = self.client.put(&self.record_path(id), data).await?;
        Ok(response.data)
    }

    pub async fn delete_by_id(&self, id: &str) -> Result<(), ClientError> {
        self.client.delete(&self.record_path(id)).await
    }
}
