use chrono::Utc;
use rand::Rng;

use crate::errors::AppError;
use crate::store::DocumentStore;

use super::types::*;

/// Collection holding every poll, in creation order.
pub const COLLECTION: &str = "votes";

const ID_BYTES: usize = 8;

/// Pick a random id that no poll in `polls` already uses. Runs inside the
/// create transaction, so the uniqueness check and the insert cannot race.
fn generate_id(polls: &[Poll]) -> String {
    let mut rng = rand::rng();
    loop {
        let bytes: [u8; ID_BYTES] = rng.random();
        let id = hex::encode(bytes);
        if !polls.iter().any(|p| p.id() == id) {
            return id;
        }
    }
}

fn find_mut<'a>(polls: &'a mut [Poll], id: &str) -> Result<&'a mut Poll, AppError> {
    polls
        .iter_mut()
        .find(|p| p.id() == id)
        .ok_or_else(|| AppError::poll_not_found(id))
}

/// Create a new active poll and append it to the collection.
pub async fn create(store: &DocumentStore, draft: NewPoll) -> Result<Poll, AppError> {
    validate_options(&draft.options)?;

    let poll = store
        .transact(COLLECTION, |polls: &mut Vec<Poll>| {
            let id = generate_id(polls);
            let poll = Poll::create(id, draft, Utc::now())?;
            polls.push(poll.clone());
            Ok::<_, AppError>(poll)
        })
        .await?;

    log::info!(
        "Poll {} created for meeting '{}' with {} options",
        poll.id(),
        poll.meeting_id(),
        poll.options().len()
    );
    Ok(poll)
}

/// All polls in creation order, optionally restricted to one meeting.
pub async fn list(store: &DocumentStore, meeting_id: Option<&str>) -> Result<Vec<Poll>, AppError> {
    let polls: Vec<Poll> = store.load(COLLECTION).await?;
    Ok(match meeting_id {
        Some(m) => polls.into_iter().filter(|p| p.meeting_id() == m).collect(),
        None => polls,
    })
}

pub async fn find_by_id(store: &DocumentStore, id: &str) -> Result<Option<Poll>, AppError> {
    let polls: Vec<Poll> = store.load(COLLECTION).await?;
    Ok(polls.into_iter().find(|p| p.id() == id))
}

/// Record or replace `voter`'s ballot. Returns the updated poll.
pub async fn submit_ballot(
    store: &DocumentStore,
    poll_id: &str,
    voter: &str,
    chosen: &[String],
) -> Result<Poll, AppError> {
    let poll = store
        .transact(COLLECTION, |polls: &mut Vec<Poll>| {
            let poll = find_mut(polls, poll_id)?;
            poll.submit_ballot(voter, chosen)?;
            Ok::<_, AppError>(poll.clone())
        })
        .await?;

    log::debug!(
        "Ballot from '{}' on poll {}: {:?}",
        voter,
        poll.id(),
        poll.selection_of(voter).unwrap_or_default()
    );
    Ok(poll)
}

/// Withdraw `voter`'s ballot. Returns the updated poll.
pub async fn cancel_ballot(store: &DocumentStore, poll_id: &str, voter: &str) -> Result<Poll, AppError> {
    let poll = store
        .transact(COLLECTION, |polls: &mut Vec<Poll>| {
            let poll = find_mut(polls, poll_id)?;
            poll.cancel_ballot(voter)?;
            Ok::<_, AppError>(poll.clone())
        })
        .await?;

    log::debug!("Ballot from '{}' on poll {} withdrawn", voter, poll.id());
    Ok(poll)
}

/// Close a poll. Closing an already closed poll returns it unchanged.
pub async fn close(store: &DocumentStore, poll_id: &str) -> Result<Poll, AppError> {
    let (poll, changed) = store
        .transact(COLLECTION, |polls: &mut Vec<Poll>| {
            let poll = find_mut(polls, poll_id)?;
            let changed = poll.close(Utc::now());
            Ok::<_, AppError>((poll.clone(), changed))
        })
        .await?;

    if changed {
        log::info!("Poll {} closed with {} voters", poll.id(), poll.voter_count());
    }
    Ok(poll)
}
