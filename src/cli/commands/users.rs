use clap::{Subcommand, ValueEnum};
use serde_json::json;

use crate::cli::config::api_client;
use crate::cli::utils::{output_page, output_record, output_success};
use crate::cli::OutputFormat;
use crate::config::config;
use crate::models::user::SORT_FIELDS;
use crate::models::{CreateUser, Role, UpdateRoles, UpdateUser};
use crate::query::{Filter, FilterValue, QueryParams, QuerySort, SortSpec};
use crate::services::UserService;

use super::query::QueryArgs;

const USER_COLUMNS: &[&str] = &["id", "name", "email", "cpf", "roles", "active"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StatusFilter {
    Active,
    Inactive,
    All,
}

#[derive(Subcommand)]
pub enum UsersCommands {
    #[command(about = "List users (newest first by default)")]
    List {
        #[command(flatten)]
        query: QueryArgs,
        #[arg(long = "role", help = "Only users with this role (repeatable)")]
        roles: Vec<Role>,
        #[arg(long, value_enum, default_value = "all", help = "Filter by account status")]
        status: StatusFilter,
    },

    #[command(about = "Show one user")]
    Get {
        #[arg(help = "User ID")]
        id: String,
    },

    #[command(about = "Create a user")]
    Create {
        #[arg(long, help = "Full name")]
        name: String,
        #[arg(long, help = "E-mail address")]
        email: String,
        #[arg(long, help = "CPF")]
        cpf: String,
        #[arg(long, help = "Phone number")]
        phone: Option<String>,
        #[arg(long = "role", help = "Role (repeatable, defaults to USER)")]
        roles: Vec<Role>,
        #[arg(long, help = "Create the account disabled")]
        inactive: bool,
    },

    #[command(about = "Update user fields")]
    Update {
        #[arg(help = "User ID")]
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        cpf: Option<String>,
        #[arg(long)]
        phone: Option<String>,
        #[arg(long, help = "Enable or disable the account")]
        active: Option<bool>,
        #[arg(long, help = "Mark the e-mail as verified")]
        email_verified: Option<bool>,
        #[arg(long, help = "Force a password change on next login")]
        password_must_change: Option<bool>,
    },

    #[command(about = "Replace the roles of a user")]
    Roles {
        #[arg(help = "User ID")]
        id: String,
        #[arg(long = "role", required = true, help = "Role (repeatable)")]
        roles: Vec<Role>,
    },

    #[command(about = "Delete a user")]
    Delete {
        #[arg(help = "User ID")]
        id: String,
    },
}

/// Query for the user list: defaults first, then the role/status shortcuts.
pub fn list_params(query: &QueryArgs, roles: &[Role], status: StatusFilter) -> anyhow::Result<QueryParams> {
    let mut params = query.to_params()?;
    params.page = params.page.or(Some(0));
    params.size = params.size.or(Some(config().query.default_page_size));
    if params.sort.is_empty() {
        params.sort = SortSpec::from("-createdAt");
    }

    for token in QuerySort::tokens(&params.sort) {
        let field = token.trim_start_matches('-');
        if !SORT_FIELDS.contains(&field) {
            tracing::warn!("'{}' is not a known user sort field", field);
        }
    }

    match roles {
        [] => {}
        [role] => {
            params.filters.insert("roles", role.as_str());
        }
        many => {
            params
                .filters
                .insert("roles", Filter::List(many.iter().map(|r| FilterValue::from(r.as_str())).collect()));
        }
    }
    match status {
        StatusFilter::Active => {
            params.filters.insert("active", true);
        }
        StatusFilter::Inactive => {
            params.filters.insert("active", false);
        }
        StatusFilter::All => {}
    }
    Ok(params)
}

pub async fn handle(cmd: UsersCommands, output_format: OutputFormat) -> anyhow::Result<()> {
    let users = UserService::new(api_client()?);

    match cmd {
        UsersCommands::List { query, roles, status } => {
            let params = list_params(&query, &roles, status)?;
            let page = users.list(&params).await?;
            output_page(&output_format, &page, USER_COLUMNS, "No users found")
        }
        UsersCommands::Get { id } => {
            let user = users.get(&id).await?;
            output_record(&output_format, &user)
        }
        UsersCommands::Create { name, email, cpf, phone, roles, inactive } => {
            let mut user = CreateUser::new(name, email, cpf);
            user.phone = phone;
            if !roles.is_empty() {
                user.roles = roles;
            }
            user.active = !inactive;
            let created = users.create(&user).await?;
            output_success(
                &output_format,
                &format!("User '{}' created", created.name),
                Some(json!({ "user": created })),
            )
        }
        UsersCommands::Update { id, name, email, cpf, phone, active, email_verified, password_must_change } => {
            let changes = UpdateUser {
                name,
                email,
                cpf,
                phone,
                active,
                email_verified,
                password_must_change,
                ..Default::default()
            };
            if changes.is_empty() {
                anyhow::bail!("Nothing to update; pass at least one field");
            }
            let updated = users.update(&id, &changes).await?;
            output_success(
                &output_format,
                &format!("User '{}' updated", updated.name),
                Some(json!({ "user": updated })),
            )
        }
        UsersCommands::Roles { id, roles } => {
            let updated = users.update_roles(&id, &UpdateRoles { roles }).await?;
            output_success(
                &output_format,
                &format!("Roles of '{}' updated", updated.name),
                Some(json!({ "user": updated })),
            )
        }
        UsersCommands::Delete { id } => {
            users.delete(&id).await?;
            output_success(&output_format, &format!("User '{}' deleted", id), None)
        }
    }
}
