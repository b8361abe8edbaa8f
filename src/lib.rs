pub mod auth;
pub mod cli;
pub mod config;
pub mod error;
pub mod http;
pub mod models;
pub mod query;
pub mod services;
