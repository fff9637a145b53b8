pub mod analytics_service;
pub mod export_service;
pub mod interview_service;
pub mod mail_service;
pub mod response_service;
pub mod session_service;
pub mod share_service;
pub mod user_service;
