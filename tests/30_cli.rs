use anyhow::Result;
use clap::Parser;
use soc_admin::cli::commands::users::{list_params, StatusFilter, UsersCommands};
use soc_admin::cli::config::{load_profile_from, save_profile_to, ProfileConfig};
use soc_admin::cli::{Cli, Commands};
use soc_admin::models::Role;
use soc_admin::query::build_query;

#[test]
fn users_list_flags_reach_the_query() -> Result<()> {
    let cli = Cli::try_parse_from([
        "soc-admin",
        "users",
        "list",
        "--size",
        "25",
        "--sort",
        "name",
        "--role",
        "admin",
        "--status",
        "active",
        "-f",
        "createdAt[gte]=2025-01-01",
    ])?;

    let Commands::Users { cmd: UsersCommands::List { query, roles, status } } = cli.command else {
        panic!("expected users list");
    };
    assert_eq!(roles, vec![Role::Admin]);
    assert_eq!(status, StatusFilter::Active);

    let params = list_params(&query, &roles, status)?;
    assert_eq!(
        build_query(&params),
        "?page=0&size=25&sort=name&createdAt%5Bgte%5D=2025-01-01&roles=ADMIN&active=true"
    );
    Ok(())
}

#[test]
fn repeated_filters_merge_into_or_lists() -> Result<()> {
    let cli = Cli::try_parse_from([
        "soc-admin", "companies", "list", "-f", "active=true", "-f", "uf=SP", "-f", "uf=TO",
    ])?;
    let Commands::Companies { cmd } = cli.command else {
        panic!("expected companies");
    };
    let soc_admin::cli::commands::companies::CompaniesCommands::List { query } = cmd else {
        panic!("expected companies list");
    };
    assert_eq!(build_query(&query.to_params()?), "?active=true&uf=SP&uf=TO");
    Ok(())
}

#[test]
fn unknown_roles_are_rejected_by_the_parser() {
    assert!(Cli::try_parse_from(["soc-admin", "users", "roles", "u1", "--role", "root"]).is_err());
    assert!(Cli::try_parse_from(["soc-admin", "users", "roles", "u1"]).is_err());
}

#[test]
fn profile_survives_a_restart() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let mut profile = ProfileConfig::default();
    profile.set_api_url("https://soc.example.com/");
    profile.set_token(Some("abc".into()));
    save_profile_to(dir.path(), &profile)?;

    let loaded = load_profile_from(dir.path())?;
    assert_eq!(loaded, profile);
    assert_eq!(loaded.api_url.as_deref(), Some("https://soc.example.com"));
    Ok(())
}
