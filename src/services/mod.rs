// Services layer - Business logic and orchestration
pub mod permission_service;

pub use permission_service::PermissionService;
