use crate::error::ClientError;
use crate::http::ApiClient;
use crate::models::{CreateUser, Page, UpdateRoles, UpdateUser, User};
use crate::query::QueryParams;

use super::resource::ResourceService;

pub const USERS_URI: &str = "/api/users";

/// User management; payloads are checked locally before they are sent.
#[derive(Clone)]
pub struct UserService {
    resource: ResourceService<User>,
}

impl UserService {
    pub fn new(client: ApiClient) -> Self {
        Self { resource: ResourceService::new(client, USERS_URI) }
    }

    pub async fn list(&self, params: &QueryParams) -> Result<Page<User>, ClientError> {
        self.resource.get_all(params).await
    }

    pub async fn get(&self, id: &str) -> Result<User, ClientError> {
        self.resource.get_by_id(id).await
    }

    pub async fn create(&self, user: &CreateUser) -> Result<User, ClientError> {
        user.validate()?;
        self.resource.create(user).await
    }

    pub async fn update(&self, id: &str, changes: &UpdateUser) -> Result<User, ClientError> {
        changes.validate()?;
        self.resource.update_by_id(id, changes).await
    }

    /// Replace the user's roles (at least one).
    pub async fn update_roles(&self, id: &str, roles: &UpdateRoles) -> Result<User, ClientError> {
        roles.validate()?;
        let changes = UpdateUser { roles: Some(roles.roles.clone()), ..Default::default() };
        self.resource.update_by_id(id, &changes).await
    }

    pub async fn delete(&self, id: &str) -> Result<(), ClientError> {
        self.resource.delete_by_id(id).await
    }
}
