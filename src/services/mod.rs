pub mod resource;
pub mod user_service;
pub mod company_service;
pub mod unit_service;
pub mod sync_service;
pub mod s3_service;

pub use resource::ResourceService;
pub use user_service::UserService;
pub use company_service::CompanyService;
pub use unit_service::UnitService;
pub use sync_service::SyncService;
pub use s3_service::S3Service;
