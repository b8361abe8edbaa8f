#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use axum::body::Bytes;
use axum::extract::{Path, RawQuery, Request, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};

use soc_admin::auth::TokenProvider;
use soc_admin::http::ApiClient;

/// One request as the mock API saw it.
#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: String,
    pub uri: String,
    pub authorization: Option<String>,
    pub content_type: Option<String>,
    pub body: Vec<u8>,
}

impl Recorded {
    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).unwrap_or(Value::Null)
    }
}

#[derive(Clone, Default)]
struct MockState {
    requests: Arc<Mutex<Vec<Recorded>>>,
}

/// In-process stand-in for the administration API.
///
/// Each test starts its own instance: the server task lives on the
/// test's runtime and stops with it.
pub struct MockApi {
    pub base_url: String,
    state: MockState,
}

impl MockApi {
    pub async fn start() -> Result<Self> {
        let port = portpicker::pick_unused_port().context("failed to pick free port")?;
        let listener = tokio::net::TcpListener::bind(("127.0.0.1", port))
            .await
            .context("failed to bind mock API")?;

        let state = MockState::default();
        let app = router(state.clone());
        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        Ok(Self {
            base_url: format!("http://127.0.0.1:{}", port),
            state,
        })
    }

    pub fn client(&self, tokens: Arc<dyn TokenProvider>) -> Result<ApiClient> {
        Ok(ApiClient::new(self.base_url.clone(), tokens)?)
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.state.requests.lock().unwrap().clone()
    }

    pub fn last(&self) -> Recorded {
        self.requests().pop().expect("no request reached the mock API")
    }
}

fn router(state: MockState) -> Router {
    Router::new()
        .route("/api/users", get(list_users).post(create_user))
        .route("/api/users/:id", get(get_user).put(update_user).delete(delete_user))
        .route("/api/soc/companies", get(list_companies))
        .route("/api/soc/companies/:id", get(get_company))
        .route("/api/soc/units/:id", get(get_unit))
        .route("/api/soc/sync/:endpoint", post(sync))
        .route("/api/s3/upload", post(s3_upload))
        .route("/api/s3/download/*key", get(s3_download))
        .route("/api/s3/list", get(s3_list))
        .route("/api/s3/exists/*key", get(s3_exists))
        .route("/api/s3/presigned-url/view/*key", get(s3_view_url))
        .route("/api/s3/presigned-url/download", post(s3_download_url))
        .route("/api/s3/copy", post(s3_copy))
        .route("/api/s3/move", post(s3_copy))
        .layer(middleware::from_fn_with_state(state.clone(), record))
        .with_state(state)
}

async fn record(State(state): State<MockState>, request: Request, next: Next) -> Response {
    let (parts, body) = request.into_parts();
    let bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap_or_default();
    state.requests.lock().unwrap().push(Recorded {
        method: parts.method.to_string(),
        uri: parts.uri.to_string(),
        authorization: header_value(&parts.headers, header::AUTHORIZATION),
        content_type: header_value(&parts.headers, header::CONTENT_TYPE),
        body: bytes.to_vec(),
    });

    next.run(Request::from_parts(parts, axum::body::Body::from(bytes))).await
}

fn header_value(headers: &HeaderMap, name: header::HeaderName) -> Option<String> {
    headers.get(name).and_then(|v| v.to_str().ok()).map(str::to_string)
}

pub fn user_json(id: &str) -> Value {
    json!({
        "id": id,
        "name": "Ana Silva",
        "email": "ana@example.com",
        "cpf": "12345678901",
        "roles": ["ADMIN"],
        "active": true,
        "emailVerified": true,
        "passwordMustChange": false,
        "createdAt": "2025-01-10T12:00:00Z"
    })
}

fn page_json(content: Vec<Value>) -> Value {
    let total = content.len();
    json!({
        "content": content,
        "page": 0,
        "size": 10,
        "totalElements": total,
        "totalPages": 1,
        "first": true,
        "last": true,
        "numberOfElements": total,
        "empty": total == 0
    })
}

fn error_json(code: &str, message: &str) -> Value {
    json!({ "success": false, "error": { "code": code, "message": message } })
}

async fn list_users() -> Json<Value> {
    Json(page_json(vec![user_json("u1"), user_json("u2")]))
}

async fn get_user(Path(id): Path<String>) -> Response {
    match id.as_str() {
        "missing" => (StatusCode::NOT_FOUND, Json(error_json("USER_NOT_FOUND", "User not found"))).into_response(),
        "expired" => (StatusCode::UNAUTHORIZED, Json(error_json("UNAUTHORIZED", "Token expired"))).into_response(),
        _ => Json(json!({ "success": true, "data": user_json(&id) })).into_response(),
    }
}

async fn create_user(Json(mut body): Json<Value>) -> Response {
    body["id"] = json!("new-user");
    (StatusCode::CREATED, Json(json!({ "success": true, "data": body }))).into_response()
}

async fn update_user(Path(id): Path<String>, Json(changes): Json<Value>) -> Json<Value> {
    let mut user = user_json(&id);
    if let (Some(user), Some(changes)) = (user.as_object_mut(), changes.as_object()) {
        for (key, value) in changes {
            user.insert(key.clone(), value.clone());
        }
    }
    Json(json!({ "success": true, "data": user }))
}

async fn delete_user() -> StatusCode {
    StatusCode::NO_CONTENT
}

fn company_json(id: &str) -> Value {
    json!({
        "id": id,
        "socCode": "1001",
        "name": "ACME",
        "companyName": "ACME Ltda",
        "cnpj": "00.000.000/0001-00",
        "active": true,
        "units": [{
            "id": "un1",
            "socCode": "2001",
            "socCompanyCode": "1001",
            "name": "Matriz",
            "active": true,
            "sectors": [{
                "id": "s1",
                "socCode": "3001",
                "socCompanyCode": "1001",
                "name": "Administrativo",
                "jobs": [
                    { "id": "j1", "socCode": "4001", "socCompanyCode": "1001", "name": "Analista" },
                    { "id": "j2", "socCode": "4002", "socCompanyCode": "1001", "name": "Gerente" }
                ]
            }]
        }]
    })
}

async fn list_companies() -> Json<Value> {
    Json(page_json(vec![company_json("c1")]))
}

async fn get_company(Path(id): Path<String>) -> Json<Value> {
    Json(json!({ "success": true, "data": company_json(&id) }))
}

async fn get_unit(Path(id): Path<String>) -> Json<Value> {
    let mut unit = company_json("c1")["units"][0].clone();
    unit["id"] = json!(id);
    Json(json!({ "success": true, "data": unit }))
}

async fn sync(Path(endpoint): Path<String>, body: Bytes) -> Json<Value> {
    let payload: Value = serde_json::from_slice(&body).unwrap_or(Value::Null);
    let count = match &payload {
        Value::Array(items) => items.len(),
        Value::Object(groups) => groups.len(),
        _ => 0,
    };
    let mut response = json!({ "message": format!("{} synchronized", endpoint), "status": "SUCCESS" });
    let counter = match endpoint.as_str() {
        "hierarchies" => "hierarchyCompanies",
        "full-from-api" => "companies",
        other => other,
    };
    response[counter] = json!(count);
    Json(response)
}

async fn s3_upload(headers: HeaderMap, body: Bytes) -> Response {
    let is_multipart = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|ct| ct.starts_with("multipart/form-data"))
        .unwrap_or(false);
    if !is_multipart {
        return (StatusCode::BAD_REQUEST, Json(json!({ "message": "Expected multipart upload" }))).into_response();
    }
    Json(json!({
        "objectKey": "docs/report.txt",
        "fileName": "report.txt",
        "contentType": "text/plain",
        "fileSize": body.len(),
        "url": "https://bucket.example.com/docs/report.txt",
        "uploadedAt": "2025-01-10T12:00:00Z"
    }))
    .into_response()
}

async fn s3_download(Path(key): Path<String>) -> Response {
    if key == "missing.txt" {
        return (StatusCode::NOT_FOUND, Json(json!({ "message": "Object not found" }))).into_response();
    }
    ([(header::CONTENT_TYPE, "application/octet-stream")], format!("contents of {}", key)).into_response()
}

async fn s3_list(RawQuery(query): RawQuery) -> Json<Value> {
    let max_keys = if query.unwrap_or_default().contains("maxKeys=5") { 5 } else { 1000 };
    Json(json!({
        "objects": [{ "key": "docs/a.pdf", "size": 10, "lastModified": "2025-01-10T12:00:00Z" }],
        "totalCount": 1,
        "prefix": "docs/",
        "maxKeys": max_keys
    }))
}

async fn s3_exists(Path(key): Path<String>) -> Json<Value> {
    Json(json!({ "objectKey": key, "exists": key.starts_with("docs/") }))
}

fn presigned(key: &str, minutes: u32) -> Value {
    json!({
        "presignedUrl": format!("https://bucket.example.com/{}?sig=abc", key),
        "objectKey": key,
        "expiresAt": "2025-01-10T13:00:00Z",
        "durationMinutes": minutes
    })
}

async fn s3_view_url(Path(key): Path<String>) -> Json<Value> {
    Json(presigned(&key, 60))
}

async fn s3_download_url(Json(request): Json<Value>) -> Json<Value> {
    let key = request["objectKey"].as_str().unwrap_or_default().to_string();
    let minutes = request["durationMinutes"].as_u64().unwrap_or(60) as u32;
    Json(presigned(&key, minutes))
}

async fn s3_copy(RawQuery(query): RawQuery) -> Json<Value> {
    Json(json!({ "message": format!("done: {}", query.unwrap_or_default()) }))
}
