use crate::dto::share_dto::{
    CreateShareLinkRequest, InviteDetail, InviteReport, SendInvitesRequest, ShareLink,
    ShareLinkSummary, ShareOverview,
};
use crate::error::Result;
use crate::models::interview::Interview;
use crate::models::session::InterviewSession;
use crate::services::mail_service::MailService;
use crate::services::session_service::SessionService;
use crate::utils::token::generate_share_token;
use chrono::{Duration, Utc};
use sqlx::PgPool;
use uuid::Uuid;

const SHARE_TOKEN_LENGTH: usize = 16;

#[derive(Clone)]
pub struct ShareService {
    pool: PgPool,
    sessions: SessionService,
    mail: MailService,
}

impl ShareService {
    pub fn new(pool: PgPool, mail: MailService) -> Self {
        let sessions = SessionService::new(pool.clone());
        Self {
            pool,
            sessions,
            mail,
        }
    }

    pub async fn overview(&self, interview_id: Uuid) -> Result<ShareOverview> {
        let interview =
            sqlx::query_as::<_, Interview>("SELECT * FROM interviews WHERE id = $1")
                .bind(interview_id)
                .fetch_one(&self.pool)
                .await?;

        let sessions = sqlx::query_as::<_, InterviewSession>(
            r#"
            SELECT * FROM interview_sessions
            WHERE interview_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(interview_id)
        .fetch_all(&self.pool)
        .await?;

        let share_links = sessions
            .into_iter()
            .map(|s| ShareLinkSummary {
                id: s.id,
                token: s.access_token.clone(),
                created_at: s.created_at,
                max_uses: 1,
                current_uses: if s.is_completed() { 1 } else { 0 },
            })
            .collect();

        Ok(ShareOverview {
            interview,
            share_links,
        })
    }

    /// Issue a share token bound to a fresh pending session. max_uses and the
    /// computed expiry are echoed back for the UI; nothing downstream
    /// enforces them.
    pub async fn create_share_link(
        &self,
        interview_id: Uuid,
        req: CreateShareLinkRequest,
    ) -> Result<ShareLink> {
        let token = generate_share_token(SHARE_TOKEN_LENGTH);
        let expires_at = Utc::now() + Duration::days(req.expires_in_days);

        let session = self
            .sessions
            .create_session(interview_id, &token, None, None)
            .await?;

        tracing::info!(
            "Issued share token for interview {} (session {})",
            interview_id,
            session.id
        );

        Ok(ShareLink {
            id: session.id,
            token,
            expires_at,
            max_uses: req.max_uses,
            current_uses: 0,
        })
    }

    pub async fn delete_share_link(&self, session_id: Uuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM interview_sessions WHERE id = $1")
            .bind(session_id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(crate::error::Error::NotFound(
                "Share link not found".to_string(),
            ));
        }
        Ok(())
    }

    /// One token + session + email per address. The loop stops at the first
    /// mail failure; the report carries the partial count and the sessions
    /// already created are left in place.
    pub async fn send_invites(
        &self,
        interview_id: Uuid,
        req: SendInvitesRequest,
    ) -> Result<InviteReport> {
        let config = crate::config::get_config();
        let mut invites: Vec<InviteDetail> = Vec::new();

        for email in &req.emails {
            let token = generate_share_token(SHARE_TOKEN_LENGTH);
            let session = self
                .sessions
                .create_session(interview_id, &token, Some(email), None)
                .await?;

            let share_url = format!("{}/interview/access?token={}", config.app_url, token);
            let body = req.message.replace("[INTERVIEW_LINK]", &share_url);

            if let Err(e) = self.mail.send(email, &req.subject, &body).await {
                tracing::error!("Invite dispatch stopped at {}: {}", email, e);
                return Ok(InviteReport {
                    invites_sent: invites.len(),
                    invites,
                    failed_email: Some(email.clone()),
                    error: Some(e.to_string()),
                });
            }

            invites.push(InviteDetail {
                email: email.clone(),
                token,
                session_id: session.id,
                share_url,
            });
        }

        Ok(InviteReport {
            invites_sent: invites.len(),
            invites,
            failed_email: None,
            error: None,
        })
    }
}
