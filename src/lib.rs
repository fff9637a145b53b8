pub mod config;
pub mod database;
pub mod dto;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod utils;

use crate::services::{
    analytics_service::AnalyticsService, interview_service::InterviewService,
    mail_service::MailService, response_service::ResponseService,
    session_service::SessionService, share_service::ShareService, user_service::UserService,
};
use sqlx::PgPool;

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub interview_service: InterviewService,
    pub session_service: SessionService,
    pub response_service: ResponseService,
    pub share_service: ShareService,
    pub analytics_service: AnalyticsService,
    pub user_service: UserService,
}

impl AppState {
    pub fn new(pool: PgPool) -> Self {
        let interview_service = InterviewService::new(pool.clone());
        let session_service = SessionService::new(pool.clone());
        let response_service = ResponseService::new(pool.clone());
        let share_service = ShareService::new(pool.clone(), MailService::from_config());
        let analytics_service = AnalyticsService::new(pool.clone());
        let user_service = UserService::new(pool.clone());

        Self {
            pool,
            interview_service,
            session_service,
            response_service,
            share_service,
            analytics_service,
            user_service,
        }
    }
}
