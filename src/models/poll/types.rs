use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize, Serializer};
use std::collections::{BTreeMap, HashSet};

use crate::errors::{AppError, ConflictError, ValidationError};
use crate::models::timestamp;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PollStatus {
    Active,
    Closed,
}

/// Caller-supplied fields for a new poll. Everything except `options` may be
/// left out and defaults to empty/false.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NewPoll {
    pub title: String,
    pub description: String,
    pub options: Vec<String>,
    pub allow_multiple: bool,
    pub created_by: String,
    pub meeting_id: String,
}

/// A poll and its ballots.
///
/// `selections` maps each voter to the options they currently hold, kept in
/// option order. `tally` is always recomputed from `selections` plus any
/// `carried` counts and is never edited on its own, so the two cannot
/// disagree. All fields are private; every change goes through
/// [`Poll::submit_ballot`], [`Poll::cancel_ballot`] or [`Poll::close`], and
/// each change bumps `revision`.
///
/// `carried` holds counts imported from records that only stored per-option
/// totals. Those ballots belong to `carried_voters` and stay fixed.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "PollRecord")]
pub struct Poll {
    id: String,
    title: String,
    description: String,
    options: Vec<String>,
    allow_multiple: bool,
    created_by: String,
    meeting_id: String,
    created_at: DateTime<Utc>,
    status: PollStatus,
    closed_at: Option<DateTime<Utc>>,
    revision: u64,
    selections: BTreeMap<String, Vec<String>>,
    carried: BTreeMap<String, u32>,
    carried_voters: Vec<String>,
    tally: BTreeMap<String, u32>,
}

/// Reject empty option lists, blank labels and duplicates.
pub fn validate_options(options: &[String]) -> Result<(), ValidationError> {
    if options.is_empty() {
        return Err(ValidationError::EmptyOptions);
    }
    let mut seen = HashSet::new();
    for option in options {
        if option.trim().is_empty() {
            return Err(ValidationError::BlankOption);
        }
        if !seen.insert(option.as_str()) {
            return Err(ValidationError::DuplicateOption(option.clone()));
        }
    }
    Ok(())
}

impl Poll {
    /// Build a fresh active poll with no ballots.
    pub fn create(id: String, draft: NewPoll, now: DateTime<Utc>) -> Result<Self, ValidationError> {
        validate_options(&draft.options)?;
        let mut poll = Poll {
            id,
            title: draft.title,
            description: draft.description,
            options: draft.options,
            allow_multiple: draft.allow_multiple,
            created_by: draft.created_by,
            meeting_id: draft.meeting_id,
            created_at: now,
            status: PollStatus::Active,
            closed_at: None,
            revision: 1,
            selections: BTreeMap::new(),
            carried: BTreeMap::new(),
            carried_voters: Vec::new(),
            tally: BTreeMap::new(),
        };
        poll.recount();
        Ok(poll)
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn options(&self) -> &[String] {
        &self.options
    }

    pub fn allow_multiple(&self) -> bool {
        self.allow_multiple
    }

    pub fn created_by(&self) -> &str {
        &self.created_by
    }

    pub fn meeting_id(&self) -> &str {
        &self.meeting_id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn status(&self) -> PollStatus {
        self.status
    }

    pub fn closed_at(&self) -> Option<DateTime<Utc>> {
        self.closed_at
    }

    /// Incremented by every committed change. Later snapshots of the same
    /// poll always carry a higher revision.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn is_active(&self) -> bool {
        self.status == PollStatus::Active
    }

    pub fn selections(&self) -> &BTreeMap<String, Vec<String>> {
        &self.selections
    }

    pub fn selection_of(&self, voter: &str) -> Option<&[String]> {
        self.selections.get(voter).map(Vec::as_slice)
    }

    pub fn tally(&self) -> &BTreeMap<String, u32> {
        &self.tally
    }

    pub fn count(&self, option: &str) -> u32 {
        self.tally.get(option).copied().unwrap_or(0)
    }

    /// Everyone with a ballot on this poll, carried voters first.
    pub fn voters(&self) -> impl Iterator<Item = &str> {
        self.carried_voters
            .iter()
            .map(String::as_str)
            .chain(self.selections.keys().map(String::as_str))
    }

    pub fn has_voted(&self, voter: &str) -> bool {
        self.selections.contains_key(voter) || self.carried_voters.iter().any(|v| v == voter)
    }

    pub fn voter_count(&self) -> usize {
        self.selections.len() + self.carried_voters.len()
    }

    /// Record `voter`'s ballot, replacing any earlier one.
    ///
    /// Validation runs before anything is touched, so a rejected ballot
    /// leaves the poll exactly as it was. An empty `chosen` removes the
    /// voter's entry, same as a cancellation.
    pub fn submit_ballot(&mut self, voter: &str, chosen: &[String]) -> Result<(), AppError> {
        self.ensure_active()?;
        if voter.trim().is_empty() {
            return Err(ValidationError::MissingVoter.into());
        }
        self.ensure_editable(voter)?;
        if let Some(unknown) = chosen.iter().find(|c| !self.options.contains(*c)) {
            return Err(ValidationError::InvalidOption(unknown.clone()).into());
        }

        let ballot: Vec<String> = self
            .options
            .iter()
            .filter(|o| chosen.contains(*o))
            .cloned()
            .collect();
        if !self.allow_multiple && ballot.len() > 1 {
            return Err(ValidationError::MultipleNotAllowed.into());
        }

        if ballot.is_empty() {
            self.selections.remove(voter);
        } else {
            self.selections.insert(voter.to_string(), ballot);
        }
        self.recount();
        self.revision += 1;
        Ok(())
    }

    /// Withdraw `voter`'s ballot entirely.
    pub fn cancel_ballot(&mut self, voter: &str) -> Result<(), AppError> {
        self.ensure_active()?;
        if voter.trim().is_empty() {
            return Err(ValidationError::MissingVoter.into());
        }
        self.ensure_editable(voter)?;
        if self.selections.remove(voter).is_none() {
            return Err(ValidationError::NoExistingBallot(voter.to_string()).into());
        }
        self.recount();
        self.revision += 1;
        Ok(())
    }

    /// Close the poll. Returns false if it was already closed, in which case
    /// nothing changes.
    pub fn close(&mut self, now: DateTime<Utc>) -> bool {
        if !self.is_active() {
            return false;
        }
        self.status = PollStatus::Closed;
        self.closed_at = Some(now);
        self.revision += 1;
        true
    }

    fn ensure_active(&self) -> Result<(), ConflictError> {
        if self.is_active() {
            Ok(())
        } else {
            Err(ConflictError::PollClosed(self.id.clone()))
        }
    }

    fn ensure_editable(&self, voter: &str) -> Result<(), ConflictError> {
        if self.carried_voters.iter().any(|v| v == voter) {
            Err(ConflictError::BallotLocked(voter.to_string()))
        } else {
            Ok(())
        }
    }

    fn recount(&mut self) {
        let mut tally: BTreeMap<String, u32> = self
            .options
            .iter()
            .map(|o| (o.clone(), self.carried.get(o).copied().unwrap_or(0)))
            .collect();
        for ballot in self.selections.values() {
            for option in ballot {
                if let Some(n) = tally.get_mut(option) {
                    *n += 1;
                }
            }
        }
        self.tally = tally;
    }
}

/// Serialized form of a poll. `votes` and `voters` repeat the tally and the
/// voter names under the field names the front-end reads.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PollView<'a> {
    id: &'a str,
    title: &'a str,
    description: &'a str,
    options: &'a [String],
    allow_multiple: bool,
    created_by: &'a str,
    meeting_id: &'a str,
    created_at: DateTime<Utc>,
    status: PollStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    closed_at: Option<DateTime<Utc>>,
    revision: u64,
    selections: &'a BTreeMap<String, Vec<String>>,
    tally: &'a BTreeMap<String, u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    carried_tally: Option<&'a BTreeMap<String, u32>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    carried_voters: Option<&'a [String]>,
    votes: &'a BTreeMap<String, u32>,
    voters: Vec<&'a str>,
}

impl Serialize for Poll {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        PollView {
            id: &self.id,
            title: &self.title,
            description: &self.description,
            options: &self.options,
            allow_multiple: self.allow_multiple,
            created_by: &self.created_by,
            meeting_id: &self.meeting_id,
            created_at: self.created_at,
            status: self.status,
            closed_at: self.closed_at,
            revision: self.revision,
            selections: &self.selections,
            tally: &self.tally,
            carried_tally: (!self.carried.is_empty()).then_some(&self.carried),
            carried_voters: (!self.carried_voters.is_empty()).then_some(self.carried_voters.as_slice()),
            votes: &self.tally,
            voters: self.voters().collect(),
        }
        .serialize(serializer)
    }
}

/// On-disk shape of a poll. Converting it into a [`Poll`] discards the
/// stored tally and repairs anything that breaks the ballot rules.
///
/// A record without `selections` comes from the earlier server, which kept
/// only `votes` (per-option totals) and `voters`. Its totals become the
/// carried counts.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PollRecord {
    id: String,
    #[serde(default)]
    title: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    options: Vec<String>,
    #[serde(default)]
    allow_multiple: bool,
    #[serde(default)]
    created_by: String,
    #[serde(default)]
    meeting_id: String,
    #[serde(deserialize_with = "timestamp::deserialize")]
    created_at: DateTime<Utc>,
    status: PollStatus,
    #[serde(default, deserialize_with = "timestamp::deserialize_opt")]
    closed_at: Option<DateTime<Utc>>,
    #[serde(default)]
    revision: u64,
    #[serde(default)]
    selections: Option<BTreeMap<String, Vec<String>>>,
    #[serde(default)]
    tally: BTreeMap<String, u32>,
    #[serde(default)]
    carried_tally: BTreeMap<String, u32>,
    #[serde(default)]
    carried_voters: Vec<String>,
    #[serde(default)]
    votes: BTreeMap<String, u32>,
    #[serde(default)]
    voters: Vec<String>,
}

impl From<PollRecord> for Poll {
    fn from(record: PollRecord) -> Self {
        let mut options: Vec<String> = Vec::with_capacity(record.options.len());
        for option in record.options {
            if !options.contains(&option) {
                options.push(option);
            }
        }

        let legacy = record.selections.is_none();
        let (stored_selections, stored_carried, stored_carried_voters) = match record.selections {
            Some(selections) => (selections, record.carried_tally, record.carried_voters),
            None => (BTreeMap::new(), record.votes, record.voters),
        };

        let mut selections = BTreeMap::new();
        for (voter, chosen) in &stored_selections {
            let mut ballot: Vec<String> = options
                .iter()
                .filter(|o| chosen.contains(*o))
                .cloned()
                .collect();
            if !record.allow_multiple {
                ballot.truncate(1);
            }
            if !ballot.is_empty() {
                selections.insert(voter.clone(), ballot);
            }
        }

        let carried: BTreeMap<String, u32> = stored_carried
            .into_iter()
            .filter(|(option, n)| *n > 0 && options.contains(option))
            .collect();
        let mut carried_voters: Vec<String> = Vec::new();
        if !carried.is_empty() {
            for voter in stored_carried_voters {
                if !voter.trim().is_empty()
                    && !selections.contains_key(&voter)
                    && !carried_voters.contains(&voter)
                {
                    carried_voters.push(voter);
                }
            }
        }

        let mut poll = Poll {
            id: record.id,
            title: record.title,
            description: record.description,
            options,
            allow_multiple: record.allow_multiple,
            created_by: record.created_by,
            meeting_id: record.meeting_id,
            created_at: record.created_at,
            status: record.status,
            closed_at: record.closed_at,
            revision: record.revision,
            selections,
            carried,
            carried_voters,
            tally: BTreeMap::new(),
        };
        poll.recount();

        if legacy {
            if !poll.carried.is_empty() {
                log::info!(
                    "Poll {} has no per-voter ballots; keeping {} stored votes as carried counts",
                    poll.id,
                    poll.carried.values().sum::<u32>()
                );
            }
        } else if poll.selections != stored_selections || poll.tally != record.tally {
            log::warn!("Poll {} had inconsistent ballots on disk; tally recomputed", poll.id);
        }
        poll
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opts(labels: &[&str]) -> Vec<String> {
        labels.iter().map(|s| s.to_string()).collect()
    }

    fn poll(options: &[&str], allow_multiple: bool) -> Poll {
        let draft = NewPoll {
            title: "Budget".into(),
            options: opts(options),
            allow_multiple,
            meeting_id: "m1".into(),
            ..NewPoll::default()
        };
        Poll::create("p1".into(), draft, Utc::now()).expect("valid poll")
    }

    fn tally_of(p: &Poll) -> Vec<(String, u32)> {
        p.options().iter().map(|o| (o.clone(), p.count(o))).collect()
    }

    fn assert_tally_matches_selections(p: &Poll) {
        for option in p.options() {
            let expected = p
                .selections()
                .values()
                .filter(|ballot| ballot.contains(option))
                .count() as u32;
            assert_eq!(p.count(option), expected, "tally drift on {option}");
        }
    }

    #[test]
    fn create_rejects_bad_options() {
        let empty = NewPoll::default();
        assert_eq!(
            Poll::create("x".into(), empty, Utc::now()).unwrap_err(),
            ValidationError::EmptyOptions
        );

        let dup = NewPoll { options: opts(&["A", "B", "A"]), ..NewPoll::default() };
        assert_eq!(
            Poll::create("x".into(), dup, Utc::now()).unwrap_err(),
            ValidationError::DuplicateOption("A".into())
        );

        let blank = NewPoll { options: opts(&["A", "  "]), ..NewPoll::default() };
        assert_eq!(
            Poll::create("x".into(), blank, Utc::now()).unwrap_err(),
            ValidationError::BlankOption
        );
    }

    #[test]
    fn new_poll_starts_active_with_zero_tally() {
        let p = poll(&["Yes", "No"], false);
        assert!(p.is_active());
        assert!(p.closed_at().is_none());
        assert_eq!(p.revision(), 1);
        assert_eq!(p.voter_count(), 0);
        assert_eq!(tally_of(&p), vec![("Yes".into(), 0), ("No".into(), 0)]);
    }

    #[test]
    fn yes_no_scenario() {
        let mut p = poll(&["Yes", "No"], false);

        p.submit_ballot("alice", &opts(&["Yes"])).unwrap();
        assert_eq!(tally_of(&p), vec![("Yes".into(), 1), ("No".into(), 0)]);

        p.submit_ballot("bob", &opts(&["No"])).unwrap();
        assert_eq!(tally_of(&p), vec![("Yes".into(), 1), ("No".into(), 1)]);

        p.submit_ballot("alice", &opts(&["No"])).unwrap();
        assert_eq!(tally_of(&p), vec![("Yes".into(), 0), ("No".into(), 2)]);

        p.cancel_ballot("bob").unwrap();
        assert_eq!(tally_of(&p), vec![("Yes".into(), 0), ("No".into(), 1)]);

        assert!(p.close(Utc::now()));
        let err = p.submit_ballot("carol", &opts(&["Yes"])).unwrap_err();
        assert!(matches!(err, AppError::Conflict(ConflictError::PollClosed(_))));
        assert_tally_matches_selections(&p);
    }

    #[test]
    fn cancel_restores_previous_tally() {
        let mut p = poll(&["A", "B", "C"], true);
        p.submit_ballot("v1", &opts(&["A", "B"])).unwrap();
        p.submit_ballot("v2", &opts(&["B"])).unwrap();
        let before = p.clone();

        p.submit_ballot("v3", &opts(&["B", "C"])).unwrap();
        p.cancel_ballot("v3").unwrap();

        assert_eq!(p.selections(), before.selections());
        assert_eq!(p.tally(), before.tally());
        assert_eq!(p.revision(), before.revision() + 2);
    }

    #[test]
    fn cancel_decrements_only_the_voters_options() {
        let mut p = poll(&["A", "B"], false);
        p.submit_ballot("v1", &opts(&["A"])).unwrap();
        p.submit_ballot("v2", &opts(&["B"])).unwrap();

        p.cancel_ballot("v2").unwrap();

        assert_eq!(p.count("A"), 1);
        assert_eq!(p.count("B"), 0);
    }

    #[test]
    fn resubmit_replaces_instead_of_adding() {
        let mut twice = poll(&["A", "B", "C"], true);
        twice.submit_ballot("v", &opts(&["A", "B"])).unwrap();
        twice.submit_ballot("v", &opts(&["C"])).unwrap();

        let mut once = poll(&["A", "B", "C"], true);
        once.submit_ballot("v", &opts(&["C"])).unwrap();

        assert_eq!(twice.selections(), once.selections());
        assert_eq!(twice.tally(), once.tally());
    }

    #[test]
    fn empty_submission_acts_as_cancel() {
        let mut p = poll(&["A", "B"], true);
        p.submit_ballot("v", &opts(&["A"])).unwrap();
        p.submit_ballot("v", &[]).unwrap();

        assert!(p.selection_of("v").is_none());
        assert_eq!(p.count("A"), 0);
        // A voter without a ballot has nothing to cancel.
        let err = p.cancel_ballot("v").unwrap_err();
        assert!(matches!(
            err,
            AppError::Validation(ValidationError::NoExistingBallot(_))
        ));
    }

    #[test]
    fn single_choice_rejects_multiple_without_change() {
        let mut p = poll(&["A", "B"], false);
        p.submit_ballot("v", &opts(&["A"])).unwrap();
        let before = p.clone();

        let err = p.submit_ballot("v", &opts(&["A", "B"])).unwrap_err();
        assert!(matches!(err, AppError::Validation(ValidationError::MultipleNotAllowed)));
        assert_eq!(p, before);
    }

    #[test]
    fn repeated_label_counts_once() {
        let mut p = poll(&["A", "B"], false);
        p.submit_ballot("v", &opts(&["A", "A"])).unwrap();
        assert_eq!(p.selection_of("v"), Some(&opts(&["A"])[..]));
        assert_eq!(p.count("A"), 1);
    }

    #[test]
    fn unknown_option_is_rejected() {
        let mut p = poll(&["A", "B"], true);
        let err = p.submit_ballot("v", &opts(&["A", "Z"])).unwrap_err();
        match err {
            AppError::Validation(ValidationError::InvalidOption(o)) => assert_eq!(o, "Z"),
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(p.voter_count(), 0);
    }

    #[test]
    fn blank_voter_is_rejected() {
        let mut p = poll(&["A"], false);
        let err = p.submit_ballot("   ", &opts(&["A"])).unwrap_err();
        assert!(matches!(err, AppError::Validation(ValidationError::MissingVoter)));
    }

    #[test]
    fn closed_poll_is_frozen() {
        let mut p = poll(&["A", "B"], false);
        p.submit_ballot("v", &opts(&["A"])).unwrap();
        let closed_at = Utc::now();
        assert!(p.close(closed_at));
        let frozen = p.clone();

        assert!(matches!(
            p.cancel_ballot("v").unwrap_err(),
            AppError::Conflict(ConflictError::PollClosed(_))
        ));
        assert!(!p.close(Utc::now()));
        assert_eq!(p, frozen);
        assert_eq!(p.closed_at(), Some(closed_at));
    }

    #[test]
    fn deserializing_repairs_inconsistent_record() {
        let raw = serde_json::json!({
            "id": "p9",
            "title": "Lunch",
            "options": ["Pizza", "Soup", "Pizza"],
            "allowMultiple": false,
            "createdAt": "2026-01-05T10:00:00Z",
            "status": "active",
            "selections": {
                "ann": ["Soup", "Pizza"],
                "ben": ["Salad"],
                "cid": []
            },
            "tally": { "Pizza": 7, "Soup": 0 }
        });

        let p: Poll = serde_json::from_value(raw).unwrap();

        assert_eq!(p.options(), &opts(&["Pizza", "Soup"])[..]);
        assert_eq!(p.selection_of("ann"), Some(&opts(&["Pizza"])[..]));
        assert!(p.selection_of("ben").is_none());
        assert!(p.selection_of("cid").is_none());
        assert_eq!(p.count("Pizza"), 1);
        assert_eq!(p.count("Soup"), 0);
        assert_tally_matches_selections(&p);
    }

    #[test]
    fn serializes_with_wire_field_names() {
        let mut p = poll(&["Yes", "No"], false);
        p.submit_ballot("alice", &opts(&["Yes"])).unwrap();

        let json = serde_json::to_value(&p).unwrap();
        assert_eq!(json["allowMultiple"], false);
        assert_eq!(json["meetingId"], "m1");
        assert_eq!(json["status"], "active");
        assert_eq!(json["selections"]["alice"][0], "Yes");
        assert_eq!(json["tally"]["Yes"], 1);
        assert_eq!(json["votes"]["Yes"], 1);
        assert_eq!(json["votes"]["No"], 0);
        assert_eq!(json["voters"], serde_json::json!(["alice"]));
        assert_eq!(json["revision"], 2);
        assert!(json.get("closedAt").is_none());
        assert!(json.get("carriedTally").is_none());
    }

    fn legacy_record(status: &str) -> serde_json::Value {
        serde_json::json!({
            "id": "a1b2c3d4",
            "title": "Repaint the hall?",
            "description": "",
            "options": ["Yes", "No"],
            "allowMultiple": false,
            "createdBy": "chair",
            "meetingId": "m1",
            "createdAt": "2025-03-01T18:30:12.123456",
            "closedAt": "2025-03-01T19:02:00.5",
            "status": status,
            "votes": { "Yes": 5, "No": 2 },
            "voters": ["ann", "ben", "cid", "dee", "eve", "fay", "gus"]
        })
    }

    #[test]
    fn legacy_totals_survive_a_rewrite() {
        let p: Poll = serde_json::from_value(legacy_record("closed")).unwrap();
        assert!(!p.is_active());
        assert_eq!(p.count("Yes"), 5);
        assert_eq!(p.count("No"), 2);
        assert_eq!(p.voter_count(), 7);
        assert!(p.has_voted("gus"));
        assert!(p.closed_at().is_some());

        // What gets written back must load to the same counts
        let rewritten = serde_json::to_value(&p).unwrap();
        assert_eq!(rewritten["votes"]["Yes"], 5);
        assert_eq!(rewritten["carriedTally"]["Yes"], 5);
        let reloaded: Poll = serde_json::from_value(rewritten).unwrap();
        assert_eq!(reloaded, p);
    }

    #[test]
    fn legacy_voters_cannot_change_their_ballot() {
        let mut p: Poll = serde_json::from_value(legacy_record("active")).unwrap();
        let before = p.clone();

        let err = p.submit_ballot("ann", &opts(&["No"])).unwrap_err();
        assert!(matches!(err, AppError::Conflict(ConflictError::BallotLocked(_))));
        let err = p.cancel_ballot("ann").unwrap_err();
        assert!(matches!(err, AppError::Conflict(ConflictError::BallotLocked(_))));
        assert_eq!(p, before);

        // New voters add on top of the carried totals
        p.submit_ballot("hal", &opts(&["No"])).unwrap();
        assert_eq!(p.count("Yes"), 5);
        assert_eq!(p.count("No"), 3);
        p.cancel_ballot("hal").unwrap();
        assert_eq!(p.tally(), before.tally());
    }

    #[test]
    fn legacy_record_without_votes_is_a_plain_poll() {
        let mut raw = legacy_record("active");
        raw["votes"] = serde_json::json!({ "Yes": 0, "No": 0 });
        raw["voters"] = serde_json::json!([]);

        let p: Poll = serde_json::from_value(raw).unwrap();
        assert_eq!(p.voter_count(), 0);
        let json = serde_json::to_value(&p).unwrap();
        assert!(json.get("carriedTally").is_none());
        assert!(json.get("carriedVoters").is_none());
    }
}
