//! End-to-end service flow against a live Postgres instance.
//!
//! Run with a database available:
//!   DATABASE_URL=postgres://... cargo test -- --ignored

use serde_json::json;
use std::env;
use uuid::Uuid;

use interview_backend::dto::admin_dto::{
    CreateInterviewPayload, OptionPayload, QuestionPayload,
};
use interview_backend::dto::public_dto::SubmitResponseRequest;
use interview_backend::models::question::QuestionType;
use interview_backend::services::interview_service::InterviewService;
use interview_backend::services::response_service::ResponseService;
use interview_backend::services::session_service::SessionService;

async fn table_count(pool: &sqlx::PgPool, sql: &str, id: Uuid) -> i64 {
    sqlx::query_scalar(sql)
        .bind(id)
        .fetch_one(pool)
        .await
        .expect("count query")
}

#[tokio::test]
#[ignore = "requires DATABASE_URL pointing at a migrated Postgres"]
async fn candidate_flow_and_cascade_delete() {
    dotenvy::dotenv().ok();
    env::set_var("SERVER_ADDRESS", "127.0.0.1:0");
    env::set_var("JWT_SECRET", "test_secret_key");
    env::set_var("MAIL_API_KEY", "re_test");
    env::set_var("ADMIN_RPS", "100");
    env::set_var("PUBLIC_RPS", "100");

    interview_backend::config::init_config().expect("init config");
    let pool = interview_backend::database::pool::create_pool()
        .await
        .expect("pool");
    sqlx::migrate!("./migrations").run(&pool).await.expect("migrations");

    let config = interview_backend::config::get_config();

    let interviews = InterviewService::new(pool.clone());
    let sessions = SessionService::new(pool.clone());
    let responses = ResponseService::new(pool.clone());

    let interview = interviews
        .create(
            CreateInterviewPayload {
                title: "Flow Test Interview".into(),
                description: Some("Integration flow".into()),
                instructions: None,
                thank_you_message: None,
            },
            config.organization_id,
            Uuid::parse_str("550e8400-e29b-41d4-a716-446655440001").unwrap(),
        )
        .await
        .expect("create interview");

    let saved = interviews
        .save_questions(
            interview.id,
            &[
                QuestionPayload {
                    question_type: QuestionType::MultipleChoice,
                    title: "Pick one".into(),
                    description: None,
                    required: Some(true),
                    time_limit: Some(60),
                    settings: None,
                    options: Some(vec![
                        OptionPayload {
                            option_text: "A".into(),
                            is_correct: Some(true),
                        },
                        OptionPayload {
                            option_text: "B".into(),
                            is_correct: Some(false),
                        },
                    ]),
                },
                QuestionPayload {
                    question_type: QuestionType::Text,
                    title: "Tell us".into(),
                    description: None,
                    required: Some(true),
                    time_limit: None,
                    settings: None,
                    options: None,
                },
            ],
        )
        .await
        .expect("save questions");
    assert_eq!(saved.len(), 2);
    assert_eq!(saved[0].question.order_index, 1);
    assert_eq!(saved[1].question.order_index, 2);
    assert_eq!(saved[0].options.len(), 2);

    // Candidate lifecycle: pending -> in_progress -> completed.
    let token = format!("FLOW{}", Uuid::new_v4().simple());
    let session = sessions
        .create_session(interview.id, &token, Some("alice@example.com"), Some("Alice"))
        .await
        .expect("create session");
    assert_eq!(session.status, "pending");

    let resolved = sessions.resolve_token(&token).await.expect("resolve");
    assert_eq!(resolved.id, session.id);

    let started = sessions.start(session.id).await.expect("start");
    assert_eq!(started.status, "in_progress");
    assert!(started.started_at.is_some());

    let question = &saved[0].question;
    let option = &saved[0].options[0];
    responses
        .submit(SubmitResponseRequest {
            session_id: session.id,
            question_id: question.id,
            response_data: json!({
                "selected_option_id": option.id,
                "selected_option_text": option.option_text,
            }),
            time_spent: Some(12),
            question_type: QuestionType::MultipleChoice,
        })
        .await
        .expect("submit response");

    let completed = sessions.complete(session.id).await.expect("complete");
    assert_eq!(completed.status, "completed");
    assert!(completed.completed_at.is_some());

    // Completed sessions block re-entry.
    let err = sessions.resolve_token(&token).await.unwrap_err();
    assert!(matches!(
        err,
        interview_backend::error::Error::AlreadyCompleted(_)
    ));

    // Cascade delete clears every dependent table.
    interviews.delete(interview.id).await.expect("delete");
    assert_eq!(
        table_count(
            &pool,
            "SELECT COUNT(*) FROM interviews WHERE id = $1",
            interview.id
        )
        .await,
        0
    );
    assert_eq!(
        table_count(
            &pool,
            "SELECT COUNT(*) FROM questions WHERE interview_id = $1",
            interview.id
        )
        .await,
        0
    );
    assert_eq!(
        table_count(
            &pool,
            "SELECT COUNT(*) FROM interview_sessions WHERE interview_id = $1",
            interview.id
        )
        .await,
        0
    );
    assert_eq!(
        table_count(
            &pool,
            "SELECT COUNT(*) FROM responses WHERE session_id = $1",
            session.id
        )
        .await,
        0
    );

    // Reserved demo token auto-creates a session against the demo interview.
    sqlx::query("DELETE FROM interview_sessions WHERE access_token = 'DEMO123'")
        .execute(&pool)
        .await
        .expect("clear demo session");
    let demo = sessions.resolve_token("DEMO123").await.expect("demo token");
    assert_eq!(demo.interview_id, config.demo_interview_id);
    assert_eq!(demo.status, "pending");
}
