pub mod auth;
pub mod companies;
pub mod profile;
pub mod query;
pub mod s3;
pub mod sync;
pub mod units;
pub mod users;
