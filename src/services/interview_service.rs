use crate::dto::admin_dto::{CreateInterviewPayload, QuestionPayload, UpdateInterviewPayload};
use crate::error::{Error, Result};
use crate::models::interview::{Interview, InterviewSummary};
use crate::models::question::{Question, QuestionOption, QuestionType, QuestionWithOptions};
use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

#[derive(Clone)]
pub struct InterviewService {
    pool: PgPool,
}

impl InterviewService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        payload: CreateInterviewPayload,
        organization_id: Uuid,
        created_by: Uuid,
    ) -> Result<Interview> {
        let interview = sqlx::query_as::<_, Interview>(
            r#"
            INSERT INTO interviews (title, description, instructions, thank_you_message, organization_id, created_by, status)
            VALUES ($1, $2, $3, $4, $5, $6, 'draft')
            RETURNING *
            "#,
        )
        .bind(&payload.title)
        .bind(&payload.description)
        .bind(&payload.instructions)
        .bind(&payload.thank_you_message)
        .bind(organization_id)
        .bind(created_by)
        .fetch_one(&self.pool)
        .await?;
        Ok(interview)
    }

    pub async fn get(&self, interview_id: Uuid) -> Result<Interview> {
        let interview =
            sqlx::query_as::<_, Interview>("SELECT * FROM interviews WHERE id = $1")
                .bind(interview_id)
                .fetch_one(&self.pool)
                .await?;
        Ok(interview)
    }

    pub async fn list(&self, organization_id: Uuid) -> Result<Vec<InterviewSummary>> {
        let rows = sqlx::query_as::<_, InterviewSummary>(
            r#"
            SELECT i.id, i.title, i.description, i.status, i.created_at, i.updated_at,
                   COUNT(DISTINCT q.id) AS question_count,
                   COUNT(DISTINCT s.id) AS completed_session_count
            FROM interviews i
            LEFT JOIN questions q ON i.id = q.interview_id
            LEFT JOIN interview_sessions s ON i.id = s.interview_id AND s.status = 'completed'
            WHERE i.organization_id = $1
            GROUP BY i.id
            ORDER BY i.created_at DESC
            "#,
        )
        .bind(organization_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn update(
        &self,
        interview_id: Uuid,
        payload: UpdateInterviewPayload,
    ) -> Result<Interview> {
        let mut tx = self.pool.begin().await?;

        let interview = sqlx::query_as::<_, Interview>(
            r#"
            UPDATE interviews
            SET title = COALESCE($1, title),
                description = COALESCE($2, description),
                instructions = COALESCE($3, instructions),
                thank_you_message = COALESCE($4, thank_you_message),
                status = COALESCE($5, status),
                updated_at = NOW()
            WHERE id = $6
            RETURNING *
            "#,
        )
        .bind(&payload.title)
        .bind(&payload.description)
        .bind(&payload.instructions)
        .bind(&payload.thank_you_message)
        .bind(&payload.status)
        .bind(interview_id)
        .fetch_one(&mut *tx)
        .await?;

        if let Some(questions) = payload.questions {
            sqlx::query(
                r#"DELETE FROM question_options
                   WHERE question_id IN (SELECT id FROM questions WHERE interview_id = $1)"#,
            )
            .bind(interview_id)
            .execute(&mut *tx)
            .await?;
            sqlx::query("DELETE FROM questions WHERE interview_id = $1")
                .bind(interview_id)
                .execute(&mut *tx)
                .await?;

            insert_questions(&mut tx, interview_id, &questions).await?;
        }

        tx.commit().await?;
        Ok(interview)
    }

    /// Append the given questions to an interview, order_index 1..N, options
    /// 1..N within each multiple-choice question. One transaction: either the
    /// whole batch lands or none of it does.
    pub async fn save_questions(
        &self,
        interview_id: Uuid,
        questions: &[QuestionPayload],
    ) -> Result<Vec<QuestionWithOptions>> {
        let mut tx = self.pool.begin().await?;
        insert_questions(&mut tx, interview_id, questions).await?;
        tx.commit().await?;

        self.get_questions(interview_id).await
    }

    /// Questions with their options, ordered; options fetched in one query
    /// and grouped app-side.
    pub async fn get_questions(&self, interview_id: Uuid) -> Result<Vec<QuestionWithOptions>> {
        let questions = sqlx::query_as::<_, Question>(
            "SELECT * FROM questions WHERE interview_id = $1 ORDER BY order_index",
        )
        .bind(interview_id)
        .fetch_all(&self.pool)
        .await?;

        let options = sqlx::query_as::<_, QuestionOption>(
            r#"
            SELECT qo.* FROM question_options qo
            JOIN questions q ON qo.question_id = q.id
            WHERE q.interview_id = $1
            ORDER BY qo.order_index
            "#,
        )
        .bind(interview_id)
        .fetch_all(&self.pool)
        .await?;

        let mut grouped: std::collections::HashMap<Uuid, Vec<QuestionOption>> =
            std::collections::HashMap::new();
        for option in options {
            grouped.entry(option.question_id).or_default().push(option);
        }

        Ok(questions
            .into_iter()
            .map(|question| {
                let options = grouped.remove(&question.id).unwrap_or_default();
                QuestionWithOptions { question, options }
            })
            .collect())
    }

    /// Delete an interview and everything under it. The seven dependent
    /// tables are cleared leaf-first inside one transaction so a failure
    /// leaves the tree intact.
    pub async fn delete(&self, interview_id: Uuid) -> Result<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            DELETE FROM uploaded_files
            WHERE response_id IN (
                SELECT r.id FROM responses r
                JOIN interview_sessions s ON r.session_id = s.id
                WHERE s.interview_id = $1
            )
            "#,
        )
        .bind(interview_id)
        .execute(&mut *tx)
        .await?;

        sqlx::query(
            r#"
            DELETE FROM tracking_events
            WHERE session_id IN (SELECT id FROM interview_sessions WHERE interview_id = $1)
            "#,
        )
        .bind(interview_id)
        .execute(&mut *tx)
        .await?;

        sqlx::query(
            r#"
            DELETE FROM responses
            WHERE session_id IN (SELECT id FROM interview_sessions WHERE interview_id = $1)
            "#,
        )
        .bind(interview_id)
        .execute(&mut *tx)
        .await?;

        sqlx::query("DELETE FROM interview_sessions WHERE interview_id = $1")
            .bind(interview_id)
            .execute(&mut *tx)
            .await?;

        sqlx::query(
            r#"
            DELETE FROM question_options
            WHERE question_id IN (SELECT id FROM questions WHERE interview_id = $1)
            "#,
        )
        .bind(interview_id)
        .execute(&mut *tx)
        .await?;

        sqlx::query("DELETE FROM questions WHERE interview_id = $1")
            .bind(interview_id)
            .execute(&mut *tx)
            .await?;

        let result = sqlx::query("DELETE FROM interviews WHERE id = $1")
            .bind(interview_id)
            .execute(&mut *tx)
            .await?;

        if result.rows_affected() == 0 {
            tx.rollback().await?;
            return Err(Error::NotFound("Interview not found".to_string()));
        }

        tx.commit().await?;
        tracing::info!("Deleted interview {} and all dependent rows", interview_id);
        Ok(())
    }
}

async fn insert_questions(
    tx: &mut Transaction<'_, Postgres>,
    interview_id: Uuid,
    questions: &[QuestionPayload],
) -> Result<()> {
    for (i, question) in questions.iter().enumerate() {
        let settings = question
            .settings
            .clone()
            .unwrap_or_else(|| serde_json::json!({}));

        let question_id: Uuid = sqlx::query_scalar(
            r#"
            INSERT INTO questions (interview_id, type, title, description, order_index, required, time_limit, settings)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id
            "#,
        )
        .bind(interview_id)
        .bind(question.question_type)
        .bind(&question.title)
        .bind(question.description.as_deref().unwrap_or(""))
        .bind((i as i32) + 1)
        .bind(question.required.unwrap_or(true))
        .bind(question.time_limit)
        .bind(&settings)
        .fetch_one(&mut **tx)
        .await?;

        if question.question_type == QuestionType::MultipleChoice {
            let options = question.options.as_deref().unwrap_or_default();
            if options.is_empty() {
                tracing::warn!(
                    "Multiple choice question '{}' saved without options",
                    question.title
                );
            }
            for (j, option) in options.iter().enumerate() {
                sqlx::query(
                    r#"
                    INSERT INTO question_options (question_id, option_text, is_correct, order_index)
                    VALUES ($1, $2, $3, $4)
                    "#,
                )
                .bind(question_id)
                .bind(&option.option_text)
                .bind(option.is_correct.unwrap_or(false))
                .bind((j as i32) + 1)
                .execute(&mut **tx)
                .await?;
            }
        }
    }
    Ok(())
}
