use crate::error::{Error, Result};
use crate::models::session::{InterviewSession, SessionWithInterview, STATUS_PENDING};
use sqlx::PgPool;
use uuid::Uuid;

const SESSION_WITH_INTERVIEW_SQL: &str = r#"
    SELECT s.id, s.interview_id, s.candidate_email, s.candidate_name,
           s.access_token, s.status, s.started_at, s.completed_at,
           i.title AS interview_title, i.description AS interview_description,
           i.instructions, i.thank_you_message
    FROM interview_sessions s
    JOIN interviews i ON s.interview_id = i.id
"#;

#[derive(Clone)]
pub struct SessionService {
    pool: PgPool,
}

impl SessionService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Resolve an access token to its session. Unknown tokens matching one of
    /// the reserved demo values synthesize a pending session against the demo
    /// interview; any other unknown token is NotFound. A session that already
    /// completed blocks re-entry.
    pub async fn resolve_token(&self, token: &str) -> Result<SessionWithInterview> {
        let mut session = self.get_by_token(token).await?;

        if session.is_none() {
            let config = crate::config::get_config();
            if config.demo_access_tokens.iter().any(|t| t == token) {
                tracing::info!("Creating demo session for reserved token {}", token);
                self.create_session(
                    config.demo_interview_id,
                    token,
                    Some("demo@example.com"),
                    Some("Demo User"),
                )
                .await?;
                session = self.get_by_token(token).await?;
            }
        }

        let session = session
            .ok_or_else(|| Error::NotFound("Invalid access token".to_string()))?;

        if session.status == crate::models::session::STATUS_COMPLETED {
            return Err(Error::AlreadyCompleted(
                "This interview has already been completed".to_string(),
            ));
        }

        Ok(session)
    }

    pub async fn get_by_token(&self, token: &str) -> Result<Option<SessionWithInterview>> {
        let session = sqlx::query_as::<_, SessionWithInterview>(&format!(
            "{} WHERE s.access_token = $1",
            SESSION_WITH_INTERVIEW_SQL
        ))
        .bind(token)
        .fetch_optional(&self.pool)
        .await?;
        Ok(session)
    }

    pub async fn get_by_id(&self, session_id: Uuid) -> Result<SessionWithInterview> {
        let session = sqlx::query_as::<_, SessionWithInterview>(&format!(
            "{} WHERE s.id = $1",
            SESSION_WITH_INTERVIEW_SQL
        ))
        .bind(session_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(session)
    }

    pub async fn create_session(
        &self,
        interview_id: Uuid,
        access_token: &str,
        candidate_email: Option<&str>,
        candidate_name: Option<&str>,
    ) -> Result<InterviewSession> {
        let session = sqlx::query_as::<_, InterviewSession>(
            r#"
            INSERT INTO interview_sessions (interview_id, candidate_email, candidate_name, access_token, status)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(interview_id)
        .bind(candidate_email)
        .bind(candidate_name)
        .bind(access_token)
        .bind(STATUS_PENDING)
        .fetch_one(&self.pool)
        .await?;
        Ok(session)
    }

    /// pending -> in_progress. Re-invoking while already in progress simply
    /// re-stamps started_at; there is no double-start guard.
    pub async fn start(&self, session_id: Uuid) -> Result<InterviewSession> {
        let session = sqlx::query_as::<_, InterviewSession>(
            r#"
            UPDATE interview_sessions
            SET status = 'in_progress', started_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(session_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(session)
    }

    pub async fn complete(&self, session_id: Uuid) -> Result<InterviewSession> {
        let session = sqlx::query_as::<_, InterviewSession>(
            r#"
            UPDATE interview_sessions
            SET status = 'completed', completed_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(session_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(session)
    }
}
