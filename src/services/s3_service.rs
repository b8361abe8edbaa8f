use reqwest::header::{HeaderValue, CONTENT_TYPE};
use reqwest::multipart::{Form, Part};
use reqwest::Method;
use url::form_urlencoded;

use crate::error::ClientError;
use crate::http::ApiClient;
use crate::models::api::FieldError;
use crate::models::s3::{
    CopyMoveResponse, ListObjectsParams, ListObjectsResponse, ObjectExistsResponse, ObjectMetadata,
    PresignedUrlDownloadRequest, PresignedUrlResponse, PresignedUrlUploadRequest, UploadFileResponse,
};

pub const S3_URI: &str = "/api/s3";

/// File to send through `POST /api/s3/upload`.
#[derive(Debug, Clone)]
pub struct UploadFile {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
    pub folder: Option<String>,
}

impl UploadFile {
    pub fn new(file_name: impl Into<String>, content_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type.into(),
            bytes,
            folder: None,
        }
    }

    pub fn in_folder(mut self, folder: impl Into<String>) -> Self {
        self.folder = Some(folder.into());
        self
    }

    fn into_form(self) -> Result<Form, ClientError> {
        let file_size = self.bytes.len().to_string();
        let part = Part::bytes(self.bytes)
            .file_name(self.file_name.clone())
            .mime_str(&self.content_type)
            .map_err(|_| {
                ClientError::validation(
                    "Invalid upload",
                    vec![FieldError {
                        field: "contentType".to_string(),
                        message: format!("'{}' is not a valid content type", self.content_type),
                    }],
                )
            })?;

        let mut form = Form::new()
            .text("fileName", self.file_name)
            .text("contentType", self.content_type)
            .part("file", part)
            .text("fileSize", file_size);
        if let Some(folder) = self.folder.filter(|f| !f.is_empty()) {
            form = form.text("folder", folder);
        }
        Ok(form)
    }
}

/// Object storage operations proxied by the API.
#[derive(Clone)]
pub struct S3Service {
    client: ApiClient,
}

impl S3Service {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    fn path(endpoint: &str) -> String {
        format!("{}/{}", S3_URI, endpoint)
    }

    pub async fn upload_file(&self, file: UploadFile) -> Result<UploadFileResponse, ClientError> {
        let form = file.into_form()?;
        let request = self.client.request(Method::POST, &Self::path("upload")).await?.multipart(form);
        let response = self.client.send(request).await?;
        Ok(response.json().await?)
    }

    pub async fn download_file(&self, object_key: &str) -> Result<Vec<u8>, ClientError> {
        let path = Self::path(&format!("download/{}", object_key));
        let request = self.client.request(Method::GET, &path).await?;
        let response = self.client.send(request).await?;
        Ok(response.bytes().await?.to_vec())
    }

    pub async fn delete_file(&self, object_key: &str) -> Result<(), ClientError> {
        self.client.delete(&Self::path(object_key)).await
    }

    pub async fn generate_download_url(
        &self,
        request: &PresignedUrlDownloadRequest,
    ) -> Result<PresignedUrlResponse, ClientError> {
        self.client.post(&Self::path("presigned-url/download"), Some(request)).await
    }

    pub async fn generate_upload_url(
        &self,
        request: &PresignedUrlUploadRequest,
    ) -> Result<PresignedUrlResponse, ClientError> {
        self.client.post(&Self::path("presigned-url/upload"), Some(request)).await
    }

    pub async fn generate_view_url(
        &self,
        object_key: &str,
        duration_minutes: Option<u32>,
    ) -> Result<PresignedUrlResponse, ClientError> {
        let mut query = form_urlencoded::Serializer::new(String::new());
        if let Some(duration) = duration_minutes {
            query.append_pair("duration", &duration.to_string());
        }
        let path = with_query(Self::path(&format!("presigned-url/view/{}", object_key)), query.finish());
        self.client.get(&path).await
    }

    pub async fn list_objects(&self, params: &ListObjectsParams) -> Result<ListObjectsResponse, ClientError> {
        let mut query = form_urlencoded::Serializer::new(String::new());
        if let Some(prefix) = params.prefix.as_deref().filter(|p| !p.is_empty()) {
            query.append_pair("prefix", prefix);
        }
        if let Some(max_keys) = params.max_keys {
            query.append_pair("maxKeys", &max_keys.to_string());
        }
        self.client.get(&with_query(Self::path("list"), query.finish())).await
    }

    pub async fn object_exists(&self, object_key: &str) -> Result<ObjectExistsResponse, ClientError> {
        self.client.get(&Self::path(&format!("exists/{}", object_key))).await
    }

    pub async fn object_metadata(&self, object_key: &str) -> Result<ObjectMetadata, ClientError> {
        self.client.get(&Self::path(&format!("metadata/{}", object_key))).await
    }

    pub async fn copy_object(&self, source: &str, destination: &str) -> Result<CopyMoveResponse, ClientError> {
        self.transfer("copy", source, destination).await
    }

    pub async fn move_object(&self, source: &str, destination: &str) -> Result<CopyMoveResponse, ClientError> {
        self.transfer("move", source, destination).await
    }

    async fn transfer(&self, action: &str, source: &str, destination: &str) -> Result<CopyMoveResponse, ClientError> {
        let query = form_urlencoded::Serializer::new(String::new())
            .append_pair("source", source)
            .append_pair("destination", destination)
            .finish();
        self.client.post(&with_query(Self::path(action), query), None::<&()>).await
    }

    /// PUT straight to a presigned URL. The URL carries its own signature,
    /// so no bearer token is sent.
    pub async fn upload_to_presigned_url(
        &self,
        presigned_url: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<(), ClientError> {
        let url = self.client.resolve(presigned_url)?;
        let content_type = HeaderValue::from_str(content_type)
            .unwrap_or_else(|_| HeaderValue::from_static("application/octet-stream"));
        let response = self
            .client
            .http()
            .put(url)
            .header(CONTENT_TYPE, content_type)
            .body(bytes)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.bytes().await.unwrap_or_default();
            return Err(ClientError::from_response(status.as_u16(), &body));
        }
        Ok(())
    }
}

fn with_query(path: String, query: String) -> String {
    if query.is_empty() {
        path
    } else {
        format!("{}?{}", path, query)
    }
}
