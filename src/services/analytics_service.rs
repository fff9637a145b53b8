use crate::dto::analytics_dto::{
    InterviewAnalytics, InterviewOverview, KeystrokeAnalytics, MultipleChoiceDetails,
    QuestionAnalytics, SessionAnalyticsRow, SessionDetailHeader, SessionDetails,
    SessionResponseDetail,
};
use crate::error::Result;
use crate::models::interview::Interview;
use crate::models::question::{Question, QuestionOption, QuestionType};
use crate::models::response::{
    CodingResponse, FileResponse, MultipleChoiceResponse, ResponseWithQuestion, TextResponse,
};
use crate::models::session::{InterviewSession, SessionWithInterview};
use crate::models::tracking_event::{
    TrackingEvent, EVENT_FOCUS_CHANGE, EVENT_KEYSTROKE, EVENT_PASTE,
};
use crate::services::response_service::ResponseService;
use crate::services::session_service::SessionService;
use sqlx::PgPool;
use std::collections::{BTreeMap, HashMap};
use uuid::Uuid;

#[derive(Clone)]
pub struct AnalyticsService {
    pool: PgPool,
}

impl AnalyticsService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Read-only summary for one interview: four independent full scans, then
    /// in-process aggregation. Nothing here mutates state.
    pub async fn interview_analytics(&self, interview_id: Uuid) -> Result<InterviewAnalytics> {
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

        let responses = sqlx::query_as::<_, ResponseWithQuestion>(
            r#"
            SELECT r.id, r.session_id, r.question_id, r.response_data, r.time_spent,
                   q.title AS question_title, q.type AS question_type
            FROM responses r
            JOIN questions q ON r.question_id = q.id
            WHERE q.interview_id = $1
            ORDER BY r.created_at DESC
            "#,
        )
        .bind(interview_id)
        .fetch_all(&self.pool)
        .await?;

        let questions = sqlx::query_as::<_, Question>(
            "SELECT * FROM questions WHERE interview_id = $1 ORDER BY order_index",
        )
        .bind(interview_id)
        .fetch_all(&self.pool)
        .await?;

        let events = sqlx::query_as::<_, TrackingEvent>(
            r#"
            SELECT te.* FROM tracking_events te
            JOIN questions q ON te.question_id = q.id
            WHERE q.interview_id = $1
            ORDER BY te.timestamp DESC
            "#,
        )
        .bind(interview_id)
        .fetch_all(&self.pool)
        .await?;

        tracing::info!(
            "Analytics for interview {}: {} sessions, {} responses, {} questions, {} events",
            interview_id,
            sessions.len(),
            responses.len(),
            questions.len(),
            events.len()
        );

        Ok(build_interview_analytics(
            &interview, &sessions, &responses, &questions, &events,
        ))
    }

    /// One candidate's session with its responses, multiple-choice answers
    /// enriched with correctness against the question's options.
    pub async fn session_details(&self, session_id: Uuid) -> Result<SessionDetails> {
        let session = SessionService::new(self.pool.clone())
            .get_by_id(session_id)
            .await?;

        let responses = ResponseService::new(self.pool.clone())
            .responses_for_session(session_id)
            .await?;

        let options = sqlx::query_as::<_, QuestionOption>(
            r#"
            SELECT qo.* FROM question_options qo
            JOIN questions q ON qo.question_id = q.id
            WHERE q.interview_id = $1
            ORDER BY qo.order_index
            "#,
        )
        .bind(session.interview_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(build_session_details(&session, &responses, &options))
    }

    /// Sessions for one interview rendered as CSV, plus the filename the
    /// attachment should carry.
    pub async fn export_sessions(&self, interview_id: Uuid) -> Result<(String, String)> {
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

        let counts: Vec<(Uuid, i64)> = sqlx::query_as(
            r#"
            SELECT r.session_id, COUNT(*) FROM responses r
            JOIN interview_sessions s ON r.session_id = s.id
            WHERE s.interview_id = $1
            GROUP BY r.session_id
            "#,
        )
        .bind(interview_id)
        .fetch_all(&self.pool)
        .await?;
        let response_counts: HashMap<Uuid, usize> = counts
            .into_iter()
            .map(|(id, count)| (id, count as usize))
            .collect();

        crate::services::export_service::ExportService::generate_sessions_csv(
            &interview.title,
            &sessions,
            &response_counts,
        )
    }
}

pub fn build_interview_analytics(
    interview: &Interview,
    sessions: &[InterviewSession],
    responses: &[ResponseWithQuestion],
    questions: &[Question],
    events: &[TrackingEvent],
) -> InterviewAnalytics {
    let overview = compute_overview(interview, sessions);
    let total_sessions = sessions.len();

    let question_analytics = questions
        .iter()
        .map(|q| compute_question_analytics(q, responses, total_sessions))
        .collect();

    let session_rows = sessions
        .iter()
        .map(|s| compute_session_row(s, responses))
        .collect();

    let keystroke_analytics = questions
        .iter()
        .map(|q| compute_keystroke_analytics(q, events))
        .collect();

    InterviewAnalytics {
        interview: overview,
        questions: question_analytics,
        sessions: session_rows,
        keystroke_analytics,
    }
}

pub fn compute_overview(interview: &Interview, sessions: &[InterviewSession]) -> InterviewOverview {
    let total_sessions = sessions.len();
    let completed_sessions = sessions.iter().filter(|s| s.is_completed()).count();

    let durations: Vec<f64> = sessions
        .iter()
        .filter(|s| s.is_completed())
        .filter_map(|s| s.duration_seconds())
        .collect();
    let average_completion_time = if durations.is_empty() {
        0.0
    } else {
        durations.iter().sum::<f64>() / durations.len() as f64
    };

    let abandonment_rate = if total_sessions > 0 {
        (total_sessions - completed_sessions) as f64 / total_sessions as f64 * 100.0
    } else {
        0.0
    };

    InterviewOverview {
        id: interview.id,
        title: interview.title.clone(),
        description: interview.description.clone().unwrap_or_default(),
        total_sessions,
        completed_sessions,
        average_completion_time,
        abandonment_rate,
    }
}

pub fn compute_question_analytics(
    question: &Question,
    responses: &[ResponseWithQuestion],
    total_sessions: usize,
) -> QuestionAnalytics {
    let question_responses: Vec<&ResponseWithQuestion> = responses
        .iter()
        .filter(|r| r.question_id == question.id)
        .collect();

    let total_responses = question_responses.len();
    let completion_rate = if total_sessions > 0 {
        (total_responses as f64 / total_sessions as f64 * 100.0).min(100.0)
    } else {
        0.0
    };
    let average_time_spent = if total_responses > 0 {
        question_responses
            .iter()
            .map(|r| r.time_spent.unwrap_or(0) as f64)
            .sum::<f64>()
            / total_responses as f64
    } else {
        0.0
    };

    let mut response_distribution: BTreeMap<String, u64> = BTreeMap::new();
    for response in &question_responses {
        let bucket = distribution_bucket(question.question_type, &response.response_data);
        *response_distribution.entry(bucket).or_insert(0) += 1;
    }

    QuestionAnalytics {
        id: question.id,
        title: question.title.clone(),
        question_type: question.question_type,
        order_index: question.order_index,
        total_responses,
        average_time_spent,
        completion_rate,
        response_distribution,
    }
}

/// Which distribution bucket a single response falls into. Buckets partition
/// the responses of a question: every response lands in exactly one.
pub fn distribution_bucket(
    question_type: QuestionType,
    response_data: &serde_json::Value,
) -> String {
    match question_type {
        QuestionType::MultipleChoice => {
            let mc: MultipleChoiceResponse =
                serde_json::from_value(response_data.clone()).unwrap_or_default();
            mc.selected_option_text
                .unwrap_or_else(|| "No answer".to_string())
        }
        QuestionType::Text => {
            let text: TextResponse =
                serde_json::from_value(response_data.clone()).unwrap_or_default();
            let word_count = text.text.split_whitespace().count();
            match word_count {
                0 => "empty",
                1..=50 => "short",
                51..=150 => "medium",
                _ => "long",
            }
            .to_string()
        }
        QuestionType::Coding => {
            let coding: CodingResponse =
                serde_json::from_value(response_data.clone()).unwrap_or_default();
            let language = if coding.language.trim().is_empty() {
                "unknown"
            } else {
                coding.language.trim()
            };
            if coding.code.trim().is_empty() {
                format!("{} (empty)", language)
            } else {
                format!("{} (completed)", language)
            }
        }
        QuestionType::Video => {
            let file: FileResponse =
                serde_json::from_value(response_data.clone()).unwrap_or_default();
            if file.file_url.is_some() {
                "recorded".to_string()
            } else {
                "no_recording".to_string()
            }
        }
        QuestionType::FileUpload => {
            let file: FileResponse =
                serde_json::from_value(response_data.clone()).unwrap_or_default();
            if file.file_url.is_some() {
                "uploaded".to_string()
            } else {
                "no_file".to_string()
            }
        }
    }
}

pub fn compute_session_row(
    session: &InterviewSession,
    responses: &[ResponseWithQuestion],
) -> SessionAnalyticsRow {
    let responses_count = responses
        .iter()
        .filter(|r| r.session_id == session.id)
        .count();

    SessionAnalyticsRow {
        id: session.id,
        candidate_email: session
            .candidate_email
            .clone()
            .unwrap_or_else(|| "Unknown".to_string()),
        candidate_name: session.candidate_name.clone().unwrap_or_default(),
        status: session.status.clone(),
        started_at: session.started_at,
        completed_at: session.completed_at,
        total_time: session.duration_seconds().unwrap_or(0.0),
        responses_count,
    }
}

pub fn compute_keystroke_analytics(
    question: &Question,
    events: &[TrackingEvent],
) -> KeystrokeAnalytics {
    let question_events: Vec<&TrackingEvent> = events
        .iter()
        .filter(|e| e.question_id == question.id)
        .collect();

    let total_keystrokes = question_events
        .iter()
        .filter(|e| e.event_type == EVENT_KEYSTROKE)
        .count();
    let backspaces = question_events
        .iter()
        .filter(|e| e.event_type == EVENT_KEYSTROKE)
        .filter(|e| matches!(e.key(), Some("Backspace") | Some("Delete")))
        .count();

    let backspace_ratio = if total_keystrokes > 0 {
        backspaces as f64 / total_keystrokes as f64 * 100.0
    } else {
        0.0
    };

    // Rough WPM over a fixed divisor of 5; a documented heuristic, not a
    // time-normalized measurement.
    let average_typing_speed = if total_keystrokes > 0 {
        ((total_keystrokes as f64 - backspaces as f64) / 5.0).max(0.0)
    } else {
        0.0
    };

    let paste_events = question_events
        .iter()
        .filter(|e| e.event_type == EVENT_PASTE)
        .count();
    let focus_changes = question_events
        .iter()
        .filter(|e| e.event_type == EVENT_FOCUS_CHANGE)
        .count();

    KeystrokeAnalytics {
        question_id: question.id,
        question_title: question.title.clone(),
        total_keystrokes,
        average_typing_speed,
        paste_events,
        backspace_ratio,
        focus_changes,
    }
}

pub fn build_session_details(
    session: &SessionWithInterview,
    responses: &[ResponseWithQuestion],
    options: &[QuestionOption],
) -> SessionDetails {
    let total_time = match (session.started_at, session.completed_at) {
        (Some(started), Some(completed)) => {
            (completed - started).num_milliseconds() as f64 / 1000.0
        }
        _ => 0.0,
    };

    let responses = responses
        .iter()
        .map(|r| {
            let multiple_choice_details = if r.question_type == QuestionType::MultipleChoice {
                multiple_choice_details(r, options)
            } else {
                None
            };
            SessionResponseDetail {
                id: r.id,
                question_id: r.question_id,
                question_title: r.question_title.clone(),
                question_type: r.question_type,
                response_data: r.response_data.clone(),
                time_spent: r.time_spent.unwrap_or(0),
                multiple_choice_details,
            }
        })
        .collect();

    SessionDetails {
        session: SessionDetailHeader {
            id: session.id,
            candidate_email: session
                .candidate_email
                .clone()
                .unwrap_or_else(|| "Unknown".to_string()),
            candidate_name: session.candidate_name.clone().unwrap_or_default(),
            status: session.status.clone(),
            started_at: session.started_at,
            completed_at: session.completed_at,
            total_time,
        },
        responses,
    }
}

fn multiple_choice_details(
    response: &ResponseWithQuestion,
    options: &[QuestionOption],
) -> Option<MultipleChoiceDetails> {
    let mc: MultipleChoiceResponse =
        serde_json::from_value(response.response_data.clone()).unwrap_or_default();
    let selected_id = mc.selected_option_id?;

    let selected = options.iter().find(|o| o.id == selected_id);
    let correct_answer = options
        .iter()
        .find(|o| o.question_id == response.question_id && o.is_correct.unwrap_or(false))
        .map(|o| o.option_text.clone());

    Some(MultipleChoiceDetails {
        selected_option_id: Some(selected_id),
        selected_option_text: mc
            .selected_option_text
            .or_else(|| selected.map(|o| o.option_text.clone())),
        is_correct: selected.map(|o| o.is_correct.unwrap_or(false)),
        correct_answer,
    })
}
