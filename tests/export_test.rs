use chrono::{Duration, TimeZone, Utc};
use std::collections::HashMap;
use uuid::Uuid;

use interview_backend::models::session::InterviewSession;
use interview_backend::services::export_service::{ExportService, CSV_HEADERS};

fn session(status: &str, duration_secs: Option<i64>) -> InterviewSession {
    let started = Utc.with_ymd_and_hms(2026, 2, 1, 9, 30, 0).unwrap();
    InterviewSession {
        id: Uuid::new_v4(),
        interview_id: Uuid::new_v4(),
        candidate_email: Some("alice@example.com".to_string()),
        candidate_name: Some("Alice".to_string()),
        access_token: "SHARETOKEN1234".to_string(),
        status: status.to_string(),
        started_at: duration_secs.map(|_| started),
        completed_at: duration_secs.map(|d| started + Duration::seconds(d)),
        ip_address: None,
        user_agent: None,
        browser_info: None,
        created_at: Some(started),
    }
}

#[test]
fn csv_has_one_row_per_session_and_nine_columns() {
    let sessions = vec![
        session("completed", Some(300)),
        session("in_progress", None),
        session("pending", None),
    ];
    let mut counts = HashMap::new();
    counts.insert(sessions[0].id, 4usize);

    let (csv_text, _) =
        ExportService::generate_sessions_csv("Frontend Assessment", &sessions, &counts).unwrap();

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(csv_text.as_bytes());
    let headers = reader.headers().unwrap().clone();
    assert_eq!(headers.len(), 9);
    for (i, expected) in CSV_HEADERS.iter().enumerate() {
        assert_eq!(&headers[i], *expected);
    }

    let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
    assert_eq!(rows.len(), sessions.len());
    for row in &rows {
        assert_eq!(row.len(), 9);
    }
}

#[test]
fn completed_sessions_report_duration_and_full_completion() {
    let completed = session("completed", Some(300));
    let abandoned = session("in_progress", None);
    let mut counts = HashMap::new();
    counts.insert(completed.id, 2usize);

    let (csv_text, _) = ExportService::generate_sessions_csv(
        "Title",
        &[completed.clone(), abandoned.clone()],
        &counts,
    )
    .unwrap();

    let mut reader = csv::Reader::from_reader(csv_text.as_bytes());
    let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();

    let completed_row = rows
        .iter()
        .find(|r| r[0] == completed.id.to_string())
        .unwrap();
    assert_eq!(&completed_row[6], "300");
    assert_eq!(&completed_row[7], "2");
    assert_eq!(&completed_row[8], "100");

    let abandoned_row = rows
        .iter()
        .find(|r| r[0] == abandoned.id.to_string())
        .unwrap();
    assert_eq!(&abandoned_row[6], "0");
    assert_eq!(&abandoned_row[7], "0");
    assert_eq!(&abandoned_row[8], "0");
}

#[test]
fn every_field_is_quote_wrapped() {
    let sessions = vec![session("pending", None)];
    let (csv_text, _) =
        ExportService::generate_sessions_csv("Title", &sessions, &HashMap::new()).unwrap();

    for line in csv_text.lines() {
        assert!(line.starts_with('"'), "line not quoted: {}", line);
        assert!(line.ends_with('"'), "line not quoted: {}", line);
    }
}

#[test]
fn filename_is_sanitized_and_dated() {
    let (_, filename) = ExportService::generate_sessions_csv(
        "Frontend Developer Assessment (v2)!",
        &[],
        &HashMap::new(),
    )
    .unwrap();

    let date = Utc::now().format("%Y-%m-%d").to_string();
    assert_eq!(
        filename,
        format!("Frontend_Developer_Assessment__v2___sessions_{}.csv", date)
    );
}

#[test]
fn empty_interview_exports_header_only() {
    let (csv_text, _) =
        ExportService::generate_sessions_csv("Empty", &[], &HashMap::new()).unwrap();
    assert_eq!(csv_text.lines().count(), 1);
}
