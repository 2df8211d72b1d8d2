//! Plain document collections around the polls: meetings, past meetings,
//! the resident roster, report links and participant statistics.
//!
//! None of these carry derived state. Each mutation is still a single
//! store transaction so concurrent writers cannot drop each other's changes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

use crate::errors::AppError;
use crate::models::timestamp;
use crate::store::DocumentStore;

pub const MEETINGS: &str = "meetings";
pub const PAST_MEETINGS: &str = "past_meetings";
pub const RESIDENTS: &str = "residents";
pub const REPORTS: &str = "reports";
pub const PARTICIPANT_STATS: &str = "participant_stats";

/// Link to a meeting's written report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub meeting_id: String,
    #[serde(default)]
    pub report_url: String,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "timestamp::deserialize_opt"
    )]
    pub updated_at: Option<DateTime<Utc>>,
}

fn id_of(doc: &Value) -> Option<&str> {
    doc.get("id").and_then(Value::as_str)
}

// ---------------------------------------------------------------------------
// Meetings
// ---------------------------------------------------------------------------

pub async fn list_meetings(store: &DocumentStore) -> Result<Vec<Value>, AppError> {
    Ok(store.load(MEETINGS).await?)
}

/// Append a meeting document, stamping `createdAt`.
pub async fn create_meeting(store: &DocumentStore, mut meeting: Map<String, Value>) -> Result<Value, AppError> {
    meeting.insert("createdAt".to_string(), Value::String(Utc::now().to_rfc3339()));
    let meeting = Value::Object(meeting);
    store
        .transact(MEETINGS, |meetings: &mut Vec<Value>| {
            meetings.push(meeting.clone());
            Ok::<_, AppError>(())
        })
        .await?;
    Ok(meeting)
}

/// Remove every meeting with the given id. Returns how many were removed.
pub async fn delete_meeting(store: &DocumentStore, id: &str) -> Result<usize, AppError> {
    store
        .transact(MEETINGS, |meetings: &mut Vec<Value>| {
            let before = meetings.len();
            meetings.retain(|m| id_of(m) != Some(id));
            Ok::<_, AppError>(before - meetings.len())
        })
        .await
}

// ---------------------------------------------------------------------------
// Past meetings
// ---------------------------------------------------------------------------

pub async fn list_past_meetings(store: &DocumentStore) -> Result<Vec<Value>, AppError> {
    Ok(store.load(PAST_MEETINGS).await?)
}

pub async fn append_past_meeting(store: &DocumentStore, meeting: Value) -> Result<Value, AppError> {
    store
        .transact(PAST_MEETINGS, |meetings: &mut Vec<Value>| {
            meetings.push(meeting.clone());
            Ok::<_, AppError>(())
        })
        .await?;
    Ok(meeting)
}

/// Drop an archived meeting and its report link.
pub async fn delete_past_meeting(store: &DocumentStore, id: &str) -> Result<usize, AppError> {
    let removed = store
        .transact(PAST_MEETINGS, |meetings: &mut Vec<Value>| {
            let before = meetings.len();
            meetings.retain(|m| id_of(m) != Some(id));
            Ok::<_, AppError>(before - meetings.len())
        })
        .await?;
    store
        .transact(REPORTS, |reports: &mut BTreeMap<String, Report>| {
            reports.remove(id);
            Ok::<_, AppError>(())
        })
        .await?;
    Ok(removed)
}

// ---------------------------------------------------------------------------
// Residents and participant statistics (replaced wholesale by the client)
// ---------------------------------------------------------------------------

pub async fn get_residents(store: &DocumentStore) -> Result<Value, AppError> {
    let residents: Option<Value> = store.load(RESIDENTS).await?;
    Ok(residents.unwrap_or_else(|| Value::Array(Vec::new())))
}

pub async fn replace_residents(store: &DocumentStore, residents: &Value) -> Result<(), AppError> {
    Ok(store.save(RESIDENTS, residents).await?)
}

pub async fn get_participant_stats(store: &DocumentStore) -> Result<Value, AppError> {
    let stats: Option<Value> = store.load(PARTICIPANT_STATS).await?;
    Ok(stats.unwrap_or_else(|| Value::Object(Map::new())))
}

pub async fn replace_participant_stats(store: &DocumentStore, stats: &Value) -> Result<(), AppError> {
    Ok(store.save(PARTICIPANT_STATS, stats).await?)
}

// ---------------------------------------------------------------------------
// Reports
// ---------------------------------------------------------------------------

/// The report link for a meeting, or an empty one if none was saved.
pub async fn find_report(store: &DocumentStore, meeting_id: &str) -> Result<Report, AppError> {
    let mut reports: BTreeMap<String, Report> = store.load(REPORTS).await?;
    Ok(reports.remove(meeting_id).unwrap_or_else(|| Report {
        meeting_id: meeting_id.to_string(),
        report_url: String::new(),
        updated_at: None,
    }))
}

pub async fn upsert_report(store: &DocumentStore, meeting_id: &str, report_url: &str) -> Result<Report, AppError> {
    let report = Report {
        meeting_id: meeting_id.to_string(),
        report_url: report_url.to_string(),
        updated_at: Some(Utc::now()),
    };
    store
        .transact(REPORTS, |reports: &mut BTreeMap<String, Report>| {
            reports.insert(meeting_id.to_string(), report.clone());
            Ok::<_, AppError>(())
        })
        .await?;
    Ok(report)
}
