use crate::error::{Error, Result};
use crate::models::session::InterviewSession;
use std::collections::HashMap;
use uuid::Uuid;

pub struct ExportService;

pub const CSV_HEADERS: [&str; 9] = [
    "Session ID",
    "Candidate Email",
    "Candidate Name",
    "Status",
    "Started At",
    "Completed At",
    "Duration (seconds)",
    "Total Responses",
    "Completion Rate (%)",
];

impl ExportService {
    /// One row per session, nine fixed columns, every field quote-wrapped.
    /// Returns the CSV text and a filename derived from the interview title.
    pub fn generate_sessions_csv(
        interview_title: &str,
        sessions: &[InterviewSession],
        response_counts: &HashMap<Uuid, usize>,
    ) -> Result<(String, String)> {
        let mut writer = csv::WriterBuilder::new()
            .quote_style(csv::QuoteStyle::Always)
            .from_writer(Vec::new());

        writer.write_record(CSV_HEADERS)?;

        for session in sessions {
            let duration = session.duration_seconds().unwrap_or(0.0);
            let completion_rate = if session.is_completed() { 100 } else { 0 };
            let responses = response_counts.get(&session.id).copied().unwrap_or(0);

            writer.write_record([
                session.id.to_string(),
                session.candidate_email.clone().unwrap_or_default(),
                session.candidate_name.clone().unwrap_or_default(),
                session.status.clone(),
                session.started_at.map(|t| t.to_rfc3339()).unwrap_or_default(),
                session
                    .completed_at
                    .map(|t| t.to_rfc3339())
                    .unwrap_or_default(),
                duration.to_string(),
                responses.to_string(),
                completion_rate.to_string(),
            ])?;
        }

        let bytes = writer
            .into_inner()
            .map_err(|e| Error::Internal(format!("Failed to flush CSV writer: {}", e)))?;
        let csv_text = String::from_utf8(bytes)
            .map_err(|e| Error::Internal(format!("CSV output was not UTF-8: {}", e)))?;

        let filename = format!(
            "{}_sessions_{}.csv",
            sanitize_title(interview_title),
            chrono::Utc::now().format("%Y-%m-%d")
        );

        Ok((csv_text, filename))
    }
}

fn sanitize_title(title: &str) -> String {
    title
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect()
}
