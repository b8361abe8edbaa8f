mod common;

use std::collections::BTreeMap;
use std::sync::Arc;

use anyhow::Result;
use soc_admin::auth::{NoToken, StaticToken, TokenProvider};
use soc_admin::error::ClientError;
use soc_admin::filters;
use soc_admin::models::s3::{ListObjectsParams, PresignedUrlDownloadRequest};
use soc_admin::models::sync::{SocHierarchyApiData, SocSectorApiData, SyncStatus};
use soc_admin::models::{CreateUser, Role, UpdateRoles, UpdateUser};
use soc_admin::query::{gte, like, QueryParams};
use soc_admin::services::s3_service::UploadFile;
use soc_admin::services::{CompanyService, S3Service, SyncService, UnitService, UserService};

use common::MockApi;

#[tokio::test]
async fn user_list_forwards_the_built_query() -> Result<()> {
    let api = MockApi::start().await?;
    let users = UserService::new(api.client(Arc::new(StaticToken::new("t0ken")))?);

    let params = QueryParams {
        page: Some(0),
        size: Some(10),
        q: Some("  ana ".into()),
        sort: "-createdAt".into(),
        filters: filters! { "active" => true, "name" => like("joão"), "createdAt" => gte("2025-01-01") },
    };
    let page = users.list(&params).await?;

    assert_eq!(page.content.len(), 2);
    assert_eq!(page.content[0].roles, vec![Role::Admin]);
    assert!(!page.has_next());

    let request = api.last();
    assert_eq!(request.method, "GET");
    assert_eq!(
        request.uri,
        "/api/users?page=0&size=10&q=ana&sort=-createdAt&active=true&name%5Blike%5D=jo%C3%A3o&createdAt%5Bgte%5D=2025-01-01"
    );
    assert_eq!(request.authorization.as_deref(), Some("Bearer t0ken"));
    Ok(())
}

#[tokio::test]
async fn single_records_are_unwrapped() -> Result<()> {
    let api = MockApi::start().await?;
    let users = UserService::new(api.client(Arc::new(NoToken))?);

    let user = users.get("u42").await?;
    assert_eq!(user.id, "u42");
    assert!(user.email_verified);
    assert_eq!(api.last().authorization, None);
    Ok(())
}

#[tokio::test]
async fn error_envelopes_become_api_errors() -> Result<()> {
    let api = MockApi::start().await?;
    let users = UserService::new(api.client(Arc::new(NoToken))?);

    let err = users.get("missing").await.unwrap_err();
    assert_eq!(err.status_code(), Some(404));
    assert_eq!(err.error_code(), "USER_NOT_FOUND");
    assert_eq!(err.to_string(), "User not found");
    Ok(())
}

#[tokio::test]
async fn unauthorized_signs_the_provider_out() -> Result<()> {
    let api = MockApi::start().await?;
    let tokens = Arc::new(StaticToken::new("stale"));
    let users = UserService::new(api.client(tokens.clone())?);

    let err = users.get("expired").await.unwrap_err();
    assert!(err.is_unauthorized());
    assert_eq!(tokens.access_token().await?, None);

    users.get("u1").await?;
    assert_eq!(api.last().authorization, None);
    Ok(())
}

#[tokio::test]
async fn create_update_and_delete_users() -> Result<()> {
    let api = MockApi::start().await?;
    let users = UserService::new(api.client(Arc::new(NoToken))?);

    let created = users.create(&CreateUser::new("Bruno Lima", "bruno@example.com", "98765432100")).await?;
    assert_eq!(created.id, "new-user");
    let sent = api.last();
    assert_eq!(sent.method, "POST");
    assert_eq!(sent.content_type.as_deref(), Some("application/json"));
    assert_eq!(sent.json()["roles"], serde_json::json!(["USER"]));

    let updated = users
        .update("u1", &UpdateUser { active: Some(false), ..Default::default() })
        .await?;
    assert!(!updated.active);
    let sent = api.last();
    assert_eq!((sent.method.as_str(), sent.uri.as_str()), ("PUT", "/api/users/u1"));
    assert_eq!(sent.json(), serde_json::json!({ "active": false }));

    let updated = users.update_roles("u1", &UpdateRoles { roles: vec![Role::Manager] }).await?;
    assert_eq!(updated.roles, vec![Role::Manager]);

    users.delete("u1").await?;
    let sent = api.last();
    assert_eq!((sent.method.as_str(), sent.uri.as_str()), ("DELETE", "/api/users/u1"));
    Ok(())
}

#[tokio::test]
async fn invalid_payloads_never_leave_the_client() -> Result<()> {
    let api = MockApi::start().await?;
    let users = UserService::new(api.client(Arc::new(NoToken))?);

    let err = users.create(&CreateUser::new("A", "nope", "1")).await.unwrap_err();
    assert!(matches!(err, ClientError::Validation { .. }));
    assert_eq!(err.details().len(), 3);

    let err = users.update_roles("u1", &UpdateRoles { roles: vec![] }).await.unwrap_err();
    assert_eq!(err.error_code(), "VALIDATION_ERROR");

    assert!(api.requests().is_empty());
    Ok(())
}

#[tokio::test]
async fn companies_and_units() -> Result<()> {
    let api = MockApi::start().await?;
    let client = api.client(Arc::new(NoToken))?;

    let page = CompanyService::new(client.clone())
        .list(&QueryParams { page: Some(0), q: Some("acme".into()), ..Default::default() })
        .await?;
    assert_eq!(page.content[0].name, "ACME");
    assert_eq!(api.last().uri, "/api/soc/companies?page=0&q=acme");

    let company = CompanyService::new(client.clone()).get("c1").await?;
    assert_eq!(company.hierarchy_counts(), (1, 1, 2));

    let unit = UnitService::new(client).find_by_id("un9").await?;
    assert_eq!(unit.id, "un9");
    assert_eq!(unit.sectors[0].jobs.len(), 2);
    Ok(())
}

#[tokio::test]
async fn sync_endpoints_post_their_payloads() -> Result<()> {
    let api = MockApi::start().await?;
    let sync = SyncService::new(api.client(Arc::new(NoToken))?);

    let sectors = vec![SocSectorApiData {
        codigo: "1".into(),
        codigoempresa: "1001".into(),
        nomesetor: "Administrativo".into(),
        ativo: "1".into(),
    }];
    let response = sync.sync_sectors(&sectors).await?;
    assert_eq!(response.status, SyncStatus::Success);
    assert_eq!(response.sectors, Some(1));
    let sent = api.last();
    assert_eq!(sent.uri, "/api/soc/sync/sectors");
    assert_eq!(sent.json()[0]["NOMESETOR"], "Administrativo");

    let mut hierarchies = BTreeMap::new();
    hierarchies.insert(
        "1001".to_string(),
        vec![SocHierarchyApiData {
            nomeunidade: "Matriz".into(),
            nomesetor: "Administrativo".into(),
            nomecargo: "Analista".into(),
            descricaodetalhadapprapcmso: String::new(),
        }],
    );
    let response = sync.process_hierarchies(&hierarchies).await?;
    assert_eq!(response.hierarchy_companies, Some(1));

    sync.full_from_api().await?;
    let sent = api.last();
    assert_eq!((sent.method.as_str(), sent.uri.as_str()), ("POST", "/api/soc/sync/full-from-api"));
    assert!(sent.body.is_empty());
    Ok(())
}

#[tokio::test]
async fn s3_object_operations() -> Result<()> {
    let api = MockApi::start().await?;
    let s3 = S3Service::new(api.client(Arc::new(StaticToken::new("t0ken")))?);

    let listing = s3
        .list_objects(&ListObjectsParams { prefix: Some("docs/".into()), max_keys: Some(5) })
        .await?;
    assert_eq!(listing.max_keys, 5);
    assert_eq!(api.last().uri, "/api/s3/list?prefix=docs%2F&maxKeys=5");

    s3.list_objects(&ListObjectsParams::default()).await?;
    assert_eq!(api.last().uri, "/api/s3/list");

    assert!(s3.object_exists("docs/a.pdf").await?.exists);
    assert!(!s3.object_exists("tmp/b.pdf").await?.exists);

    let copied = s3.copy_object("docs/a.pdf", "archive/a b.pdf").await?;
    assert_eq!(api.last().uri, "/api/s3/copy?source=docs%2Fa.pdf&destination=archive%2Fa+b.pdf");
    assert!(copied.message.starts_with("done"));

    s3.move_object("docs/a.pdf", "old/a.pdf").await?;
    assert!(api.last().uri.starts_with("/api/s3/move?source="));

    let view = s3.generate_view_url("docs/a.pdf", Some(15)).await?;
    assert_eq!(view.object_key, "docs/a.pdf");
    assert_eq!(api.last().uri, "/api/s3/presigned-url/view/docs/a.pdf?duration=15");

    let request = PresignedUrlDownloadRequest {
        object_key: "docs/a.pdf".into(),
        duration_minutes: Some(30),
        content_type: None,
    };
    let url = s3.generate_download_url(&request).await?;
    assert_eq!(url.duration_minutes, 30);
    assert_eq!(api.last().json(), serde_json::json!({ "objectKey": "docs/a.pdf", "durationMinutes": 30 }));
    Ok(())
}

#[tokio::test]
async fn s3_upload_and_download_bytes() -> Result<()> {
    let api = MockApi::start().await?;
    let s3 = S3Service::new(api.client(Arc::new(StaticToken::new("t0ken")))?);

    let uploaded = s3
        .upload_file(UploadFile::new("report.txt", "text/plain", b"hello".to_vec()).in_folder("docs"))
        .await?;
    assert_eq!(uploaded.object_key, "docs/report.txt");
    let sent = api.last();
    assert!(sent.content_type.unwrap_or_default().starts_with("multipart/form-data"));
    assert_eq!(sent.authorization.as_deref(), Some("Bearer t0ken"));
    let body = String::from_utf8_lossy(&sent.body);
    assert!(body.contains("name=\"folder\""));
    assert!(body.contains("hello"));

    let bytes = s3.download_file("docs/report.txt").await?;
    assert_eq!(bytes, b"contents of docs/report.txt");

    let err = s3.download_file("missing.txt").await.unwrap_err();
    assert_eq!(err.status_code(), Some(404));
    assert_eq!(err.to_string(), "Object not found");
    Ok(())
}
