use actix_web::{HttpRequest, HttpResponse, web};
use actix_ws::Message;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use tokio::sync::mpsc;

use crate::models::poll::Poll;

use super::forms::MeetingFilter;

type Subscribers = HashMap<String, Vec<mpsc::UnboundedSender<String>>>;

#[derive(Default)]
struct FeedState {
    /// Keyed by meeting id.
    subscribers: Subscribers,
    /// Newest revision sent per poll id.
    sent: HashMap<String, u64>,
}

/// Live tally subscribers, keyed by meeting id.
///
/// Handlers publish after their transaction commits, so two updates to the
/// same poll can reach `publish` out of order. Snapshots older than the
/// newest one already sent for that poll are dropped, so subscribers never
/// step back to a stale tally.
#[derive(Clone, Default)]
pub struct PollFeed {
    state: Arc<RwLock<FeedState>>,
}

impl PollFeed {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a subscriber for every poll of `meeting_id`.
    pub fn subscribe(&self, meeting_id: &str) -> mpsc::UnboundedReceiver<String> {
        let (tx, rx) = mpsc::unbounded_channel();
        let mut state = self.state.write().unwrap_or_else(|e| e.into_inner());
        state.subscribers.entry(meeting_id.to_string()).or_default().push(tx);
        rx
    }

    /// Push a committed poll snapshot to its meeting's subscribers. Returns
    /// false if a newer snapshot of the poll was already published.
    pub fn publish(&self, poll: &Poll) -> bool {
        let mut guard = self.state.write().unwrap_or_else(|e| e.into_inner());
        let state = &mut *guard;

        if let Some(&sent) = state.sent.get(poll.id()) {
            if sent >= poll.revision() {
                log::debug!(
                    "Skipping revision {} of poll {}; revision {} already sent",
                    poll.revision(),
                    poll.id(),
                    sent
                );
                return false;
            }
        }
        state.sent.insert(poll.id().to_string(), poll.revision());

        let msg = serde_json::json!({
            "type": "poll_updated",
            "poll": poll,
        })
        .to_string();

        if let Some(senders) = state.subscribers.get_mut(poll.meeting_id()) {
            senders.retain(|s| s.send(msg.clone()).is_ok());
            if senders.is_empty() {
                state.subscribers.remove(poll.meeting_id());
            }
        }
        true
    }

    /// Drop closed channels for a meeting.
    pub fn prune(&self, meeting_id: &str) {
        let mut state = self.state.write().unwrap_or_else(|e| e.into_inner());
        if let Some(senders) = state.subscribers.get_mut(meeting_id) {
            senders.retain(|s| !s.is_closed());
            if senders.is_empty() {
                state.subscribers.remove(meeting_id);
            }
        }
    }

    pub fn subscriber_count(&self, meeting_id: &str) -> usize {
        let state = self.state.read().unwrap_or_else(|e| e.into_inner());
        state.subscribers.get(meeting_id).map_or(0, Vec::len)
    }
}

/// GET /api/votes/live?meetingId= - WebSocket upgrade for live tallies.
pub async fn connect(
    req: HttpRequest,
    body: web::Payload,
    query: web::Query<MeetingFilter>,
    feed: web::Data<PollFeed>,
) -> Result<HttpResponse, actix_web::Error> {
    let meeting_id = match query.meeting_id() {
        Some(m) => m.to_string(),
        None => {
            return Ok(HttpResponse::BadRequest().json(serde_json::json!({
                "error": "VALIDATION_ERROR",
                "reason": "MISSING_MEETING",
                "message": "meetingId is required",
            })));
        }
    };

    let (response, mut ws_session, mut msg_stream) = actix_ws::handle(&req, body)?;
    let mut rx = feed.subscribe(&meeting_id);
    let feed = feed.into_inner();
    log::debug!("Live feed opened for meeting '{}'", meeting_id);

    actix_web::rt::spawn(async move {
        loop {
            tokio::select! {
                Some(msg) = rx.recv() => {
                    if ws_session.text(msg).await.is_err() {
                        break;
                    }
                }
                Some(Ok(msg)) = msg_stream.recv() => {
                    match msg {
                        Message::Ping(bytes) => {
                            if ws_session.pong(&bytes).await.is_err() {
                                break;
                            }
                        }
                        Message::Close(_) => break,
                        // Votes arrive over HTTP, not the socket.
                        _ => {}
                    }
                }
                else => break,
            }
        }

        drop(rx);
        feed.prune(&meeting_id);
        log::debug!("Live feed closed for meeting '{}'", meeting_id);
    });

    Ok(response)
}
