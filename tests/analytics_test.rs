use chrono::{DateTime, Duration, TimeZone, Utc};
use serde_json::{json, Value as JsonValue};
use uuid::Uuid;

use interview_backend::models::interview::Interview;
use interview_backend::models::question::{Question, QuestionType};
use interview_backend::models::response::ResponseWithQuestion;
use interview_backend::models::session::InterviewSession;
use interview_backend::models::tracking_event::TrackingEvent;
use interview_backend::services::analytics_service::{
    build_interview_analytics, compute_keystroke_analytics, compute_overview,
    compute_question_analytics, distribution_bucket,
};

fn base_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 2, 1, 12, 0, 0).unwrap()
}

fn interview() -> Interview {
    Interview {
        id: Uuid::new_v4(),
        title: "Frontend Developer Assessment".to_string(),
        description: Some("Comprehensive evaluation".to_string()),
        organization_id: None,
        created_by: None,
        status: "active".to_string(),
        settings: None,
        instructions: None,
        thank_you_message: None,
        created_at: Some(base_time()),
        updated_at: None,
    }
}

fn session(status: &str, duration_secs: Option<i64>) -> InterviewSession {
    let started = base_time();
    InterviewSession {
        id: Uuid::new_v4(),
        interview_id: Uuid::new_v4(),
        candidate_email: Some("candidate@example.com".to_string()),
        candidate_name: Some("Candidate".to_string()),
        access_token: "TOKEN".to_string(),
        status: status.to_string(),
        started_at: duration_secs.map(|_| started),
        completed_at: duration_secs.map(|d| started + Duration::seconds(d)),
        ip_address: None,
        user_agent: None,
        browser_info: None,
        created_at: Some(started),
    }
}

fn question(question_type: QuestionType, order_index: i32) -> Question {
    Question {
        id: Uuid::new_v4(),
        interview_id: Uuid::new_v4(),
        question_type,
        title: format!("Question {}", order_index),
        description: None,
        order_index,
        required: Some(true),
        time_limit: None,
        settings: None,
        created_at: Some(base_time()),
    }
}

fn response(
    question: &Question,
    session_id: Uuid,
    data: JsonValue,
    time_spent: i32,
) -> ResponseWithQuestion {
    ResponseWithQuestion {
        id: Uuid::new_v4(),
        session_id,
        question_id: question.id,
        response_data: data,
        time_spent: Some(time_spent),
        question_title: question.title.clone(),
        question_type: question.question_type,
    }
}

fn keystroke_event(question_id: Uuid, key: &str) -> TrackingEvent {
    TrackingEvent {
        id: Uuid::new_v4(),
        session_id: Uuid::new_v4(),
        question_id,
        event_type: "keystroke".to_string(),
        event_data: json!({ "key": key }),
        timestamp: Some(base_time()),
    }
}

fn event(question_id: Uuid, event_type: &str) -> TrackingEvent {
    TrackingEvent {
        id: Uuid::new_v4(),
        session_id: Uuid::new_v4(),
        question_id,
        event_type: event_type.to_string(),
        event_data: json!({}),
        timestamp: Some(base_time()),
    }
}

#[test]
fn overview_matches_reference_scenario() {
    // 4 sessions, 3 completed with durations 100s/200s/300s.
    let sessions = vec![
        session("completed", Some(100)),
        session("completed", Some(200)),
        session("completed", Some(300)),
        session("in_progress", None),
    ];

    let overview = compute_overview(&interview(), &sessions);
    assert_eq!(overview.total_sessions, 4);
    assert_eq!(overview.completed_sessions, 3);
    assert_eq!(overview.average_completion_time, 200.0);
    assert_eq!(overview.abandonment_rate, 25.0);
}

#[test]
fn overview_with_no_sessions_is_all_zero() {
    let overview = compute_overview(&interview(), &[]);
    assert_eq!(overview.total_sessions, 0);
    assert_eq!(overview.average_completion_time, 0.0);
    assert_eq!(overview.abandonment_rate, 0.0);
}

#[test]
fn completed_session_without_timestamps_does_not_skew_average() {
    let sessions = vec![
        session("completed", Some(100)),
        session("completed", None),
    ];
    let overview = compute_overview(&interview(), &sessions);
    assert_eq!(overview.completed_sessions, 2);
    assert_eq!(overview.average_completion_time, 100.0);
}

#[test]
fn multiple_choice_distribution_counts_selected_options() {
    let q = question(QuestionType::MultipleChoice, 1);
    let mut responses = Vec::new();
    for _ in 0..6 {
        responses.push(response(
            &q,
            Uuid::new_v4(),
            json!({ "selected_option_text": "A" }),
            30,
        ));
    }
    for _ in 0..4 {
        responses.push(response(
            &q,
            Uuid::new_v4(),
            json!({ "selected_option_text": "B" }),
            30,
        ));
    }

    let analytics = compute_question_analytics(&q, &responses, 10);
    assert_eq!(analytics.total_responses, 10);
    assert_eq!(analytics.completion_rate, 100.0);
    assert_eq!(analytics.response_distribution.get("A"), Some(&6));
    assert_eq!(analytics.response_distribution.get("B"), Some(&4));
}

#[test]
fn unanswered_multiple_choice_lands_in_no_answer() {
    assert_eq!(
        distribution_bucket(QuestionType::MultipleChoice, &json!({})),
        "No answer"
    );
}

#[test]
fn completion_rate_is_capped_at_100() {
    let q = question(QuestionType::Text, 1);
    // Duplicate submissions can push the raw ratio over 1.
    let responses: Vec<_> = (0..12)
        .map(|_| response(&q, Uuid::new_v4(), json!({ "text": "hello" }), 10))
        .collect();
    let analytics = compute_question_analytics(&q, &responses, 10);
    assert_eq!(analytics.completion_rate, 100.0);
}

#[test]
fn text_buckets_partition_by_word_count() {
    let word = |n: usize| {
        let words: Vec<&str> = std::iter::repeat("word").take(n).collect();
        json!({ "text": words.join(" ") })
    };

    assert_eq!(distribution_bucket(QuestionType::Text, &json!({"text": ""})), "empty");
    assert_eq!(distribution_bucket(QuestionType::Text, &word(1)), "short");
    assert_eq!(distribution_bucket(QuestionType::Text, &word(50)), "short");
    assert_eq!(distribution_bucket(QuestionType::Text, &word(51)), "medium");
    assert_eq!(distribution_bucket(QuestionType::Text, &word(150)), "medium");
    assert_eq!(distribution_bucket(QuestionType::Text, &word(151)), "long");
}

#[test]
fn coding_buckets_key_on_language_and_completion() {
    assert_eq!(
        distribution_bucket(
            QuestionType::Coding,
            &json!({ "code": "fn main() {}", "language": "rust" })
        ),
        "rust (completed)"
    );
    assert_eq!(
        distribution_bucket(QuestionType::Coding, &json!({ "code": "   ", "language": "rust" })),
        "rust (empty)"
    );
    assert_eq!(
        distribution_bucket(QuestionType::Coding, &json!({ "code": "x" })),
        "unknown (completed)"
    );
}

#[test]
fn file_buckets_are_binary_on_file_presence() {
    assert_eq!(
        distribution_bucket(
            QuestionType::Video,
            &json!({ "file_url": "https://blob.example.com/a.webm" })
        ),
        "recorded"
    );
    assert_eq!(distribution_bucket(QuestionType::Video, &json!({})), "no_recording");
    assert_eq!(
        distribution_bucket(
            QuestionType::FileUpload,
            &json!({ "file_url": "https://blob.example.com/cv.pdf" })
        ),
        "uploaded"
    );
    assert_eq!(distribution_bucket(QuestionType::FileUpload, &json!({})), "no_file");
}

#[test]
fn keystroke_analytics_follow_the_documented_heuristic() {
    let q = question(QuestionType::Text, 1);
    let mut events: Vec<TrackingEvent> = Vec::new();
    for _ in 0..80 {
        events.push(keystroke_event(q.id, "a"));
    }
    for _ in 0..20 {
        events.push(keystroke_event(q.id, "Backspace"));
    }
    events.push(event(q.id, "paste"));
    events.push(event(q.id, "paste"));
    events.push(event(q.id, "focus_change"));
    // Noise for another question must not leak in.
    events.push(keystroke_event(Uuid::new_v4(), "a"));

    let analytics = compute_keystroke_analytics(&q, &events);
    assert_eq!(analytics.total_keystrokes, 100);
    assert_eq!(analytics.backspace_ratio, 20.0);
    assert_eq!(analytics.average_typing_speed, 16.0);
    assert_eq!(analytics.paste_events, 2);
    assert_eq!(analytics.focus_changes, 1);
}

#[test]
fn delete_key_counts_toward_backspace_ratio() {
    let q = question(QuestionType::Text, 1);
    let events = vec![
        keystroke_event(q.id, "a"),
        keystroke_event(q.id, "Delete"),
        keystroke_event(q.id, "Backspace"),
        keystroke_event(q.id, "b"),
    ];
    let analytics = compute_keystroke_analytics(&q, &events);
    assert_eq!(analytics.backspace_ratio, 50.0);
}

#[test]
fn quiet_question_reports_zeroes() {
    let q = question(QuestionType::Text, 1);
    let analytics = compute_keystroke_analytics(&q, &[]);
    assert_eq!(analytics.total_keystrokes, 0);
    assert_eq!(analytics.average_typing_speed, 0.0);
    assert_eq!(analytics.backspace_ratio, 0.0);
}

#[test]
fn full_report_assembles_all_sections() {
    let interview = interview();
    let q1 = question(QuestionType::MultipleChoice, 1);
    let q2 = question(QuestionType::Text, 2);

    let s1 = session("completed", Some(120));
    let s2 = session("pending", None);
    let sessions = vec![s1.clone(), s2.clone()];

    let responses = vec![
        response(&q1, s1.id, json!({ "selected_option_text": "A" }), 30),
        response(&q2, s1.id, json!({ "text": "short answer" }), 60),
    ];
    let events = vec![keystroke_event(q2.id, "a")];
    let questions = vec![q1.clone(), q2.clone()];

    let report = build_interview_analytics(&interview, &sessions, &responses, &questions, &events);

    assert_eq!(report.interview.total_sessions, 2);
    assert_eq!(report.interview.completed_sessions, 1);
    assert_eq!(report.interview.abandonment_rate, 50.0);
    assert_eq!(report.questions.len(), 2);
    assert_eq!(report.questions[0].completion_rate, 50.0);
    assert_eq!(report.sessions.len(), 2);
    assert_eq!(report.keystroke_analytics.len(), 2);

    let s1_row = report.sessions.iter().find(|r| r.id == s1.id).unwrap();
    assert_eq!(s1_row.responses_count, 2);
    assert_eq!(s1_row.total_time, 120.0);

    let s2_row = report.sessions.iter().find(|r| r.id == s2.id).unwrap();
    assert_eq!(s2_row.responses_count, 0);
    assert_eq!(s2_row.total_time, 0.0);
}

#[test]
fn average_time_spent_is_the_mean_over_responses() {
    let q = question(QuestionType::Text, 1);
    let responses = vec![
        response(&q, Uuid::new_v4(), json!({ "text": "a" }), 10),
        response(&q, Uuid::new_v4(), json!({ "text": "b" }), 20),
        response(&q, Uuid::new_v4(), json!({ "text": "c" }), 60),
    ];
    let analytics = compute_question_analytics(&q, &responses, 10);
    assert_eq!(analytics.average_time_spent, 30.0);
    assert_eq!(analytics.completion_rate, 30.0);
}
