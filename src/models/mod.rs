pub mod api;
pub mod user;
pub mod soc;
pub mod sync;
pub mod s3;

pub use api::{ApiResponse, FieldError, Page};
pub use user::{CreateUser, Role, UpdateRoles, UpdateUser, User};
pub use soc::{SocCompany, SocJob, SocSector, SocUnit};
