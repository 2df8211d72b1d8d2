use serde::Deserialize;

/// Query string for poll listings and the live feed.
#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct MeetingFilter {
    pub meeting_id: Option<String>,
}

impl MeetingFilter {
    /// The meeting id, treating an empty value as absent.
    pub fn meeting_id(&self) -> Option<&str> {
        self.meeting_id.as_deref().filter(|m| !m.is_empty())
    }
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct SubmitBallotRequest {
    #[serde(default)]
    pub user_name: String,
    #[serde(default)]
    pub selected_options: Vec<String>,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct CancelBallotRequest {
    #[serde(default)]
    pub user_name: String,
}
