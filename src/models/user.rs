use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::api::FieldError;
use crate::error::ClientError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    Admin,
    User,
    Manager,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "ADMIN",
            Role::User => "USER",
            Role::Manager => "MANAGER",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "ADMIN" => Ok(Role::Admin),
            "USER" => Ok(Role::User),
            "MANAGER" => Ok(Role::Manager),
            other => Err(format!("unknown role '{}' (expected ADMIN, USER or MANAGER)", other)),
        }
    }
}

/// Fields accepted by the user list `sort` parameter
pub const SORT_FIELDS: &[&str] = &["name", "email", "cpf", "phone", "createdAt", "updatedAt", "active"];

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub cpf: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub roles: Vec<Role>,
    #[serde(default)]
    pub email_verified: bool,
    #[serde(default)]
    pub password_must_change: bool,
    #[serde(default = "default_active")]
    pub active: bool,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

fn default_active() -> bool {
    true
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUser {
    pub name: String,
    pub email: String,
    pub cpf: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub roles: Vec<Role>,
    pub active: bool,
    pub email_verified: bool,
    pub password_must_change: bool,
}

impl CreateUser {
    /// New active user with the `USER` role.
    pub fn new(name: impl Into<String>, email: impl Into<String>, cpf: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            cpf: cpf.into(),
            phone: None,
            roles: vec![Role::User],
            active: true,
            email_verified: false,
            password_must_change: false,
        }
    }

    pub fn validate(&self) -> Result<(), ClientError> {
        let mut errors = Vec::new();
        check_name(&self.name, &mut errors);
        check_email(&self.email, &mut errors);
        check_cpf(&self.cpf, &mut errors);
        finish("Invalid user", errors)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUser {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cpf: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub roles: Option<Vec<Role>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email_verified: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password_must_change: Option<bool>,
}

impl UpdateUser {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.email.is_none()
            && self.cpf.is_none()
            && self.roles.is_none()
            && self.phone.is_none()
            && self.active.is_none()
            && self.email_verified.is_none()
            && self.password_must_change.is_none()
    }

    pub fn validate(&self) -> Result<(), ClientError> {
        let mut errors = Vec::new();
        if let Some(name) = &self.name {
            check_name(name, &mut errors);
        }
        if let Some(email) = &self.email {
            check_email(email, &mut errors);
        }
        if let Some(cpf) = &self.cpf {
            check_cpf(cpf, &mut errors);
        }
        finish("Invalid user update", errors)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateRoles {
    pub roles: Vec<Role>,
}

impl UpdateRoles {
    pub fn validate(&self) -> Result<(), ClientError> {
        let mut errors = Vec::new();
        if self.roles.is_empty() {
            errors.push(field_error("roles", "Select at least one role"));
        }
        finish("Invalid roles", errors)
    }
}

fn field_error(field: &str, message: &str) -> FieldError {
    FieldError { field: field.to_string(), message: message.to_string() }
}

fn check_name(name: &str, errors: &mut Vec<FieldError>) {
    let len = name.trim().chars().count();
    if len < 2 {
        errors.push(field_error("name", "Name must have at least 2 characters"));
    } else if len > 100 {
        errors.push(field_error("name", "Name cannot exceed 100 characters"));
    }
}

fn check_email(email: &str, errors: &mut Vec<FieldError>) {
    let valid = match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty() && domain.contains('.') && !domain.starts_with('.') && !domain.ends_with('.')
        }
        None => false,
    };
    if !valid {
        errors.push(field_error("email", "Invalid e-mail format"));
    }
}

fn check_cpf(cpf: &str, errors: &mut Vec<FieldError>) {
    if cpf.trim().chars().count() < 11 {
        errors.push(field_error("cpf", "Invalid CPF"));
    }
}

fn finish(message: &str, errors: Vec<FieldError>) -> Result<(), ClientError> {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(ClientError::validation(message, errors))
    }
}
