pub mod types;
pub mod builder;
pub mod query_filter;
pub mod query_sort;
pub mod helpers;
pub mod parse;
pub mod error;

pub use types::*;
pub use builder::{build_query, QueryBuilder};
pub use helpers::{eq, gt, gte, in_array, like, lt, lte, neq, sort_asc, sort_desc};
pub use parse::FilterExpr;
pub use query_sort::QuerySort;
pub use error::QueryError;
