use serde::{Deserialize, Serialize};

/// Envelope around single-record responses: `{ "success": true, "data": ... }`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    #[serde(default)]
    pub success: bool,
    pub data: T,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorEnvelope {
    #[serde(default)]
    pub success: bool,
    pub error: Option<ErrorBody>,
    /// Some endpoints (S3 upload/download) answer with a bare message
    pub message: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorBody {
    pub code: Option<String>,
    pub message: Option<String>,
    pub details: Option<Vec<FieldError>>,
}

/// One page of a list endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub content: Vec<T>,
    pub page: u32,
    pub size: u32,
    pub total_elements: u64,
    pub total_pages: u32,
    #[serde(default)]
    pub first: bool,
    #[serde(default)]
    pub last: bool,
    #[serde(default)]
    pub number_of_elements: u32,
    #[serde(default)]
    pub empty: bool,
}

impl<T> Page<T> {
    pub fn has_next(&self) -> bool {
        !self.last && self.page + 1 < self.total_pages
    }
}
