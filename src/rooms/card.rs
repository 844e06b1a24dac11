use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio_stream::wrappers::WatchStream;
use tracing::error;
use crate::core::AppState;
use crate::errors::ClientError;
use crate::model::{JoinStatus, Room};
use crate::rooms::{NotFoundCallback, PageEvent, StatusPoller};
use crate::storage::PinnedRooms;

/// What a completed join action means for the frontend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JoinOutcome {
    /// The user is in; navigate to the room.
    Entered { room_id: String },
    /// A join request was submitted and now awaits approval.
    Requested,
    /// A previous request is still pending, nothing was sent.
    AlreadyPending,
}

/// State machine behind one room card: the displayed join status, the
/// pinned flag and the request/response actions. Every state transition
/// here follows a successful server response; failures emit an error notice
/// and leave the previous state intact.
pub struct RoomCard {
    state: Arc<AppState>,
    room: Room,
    pinned: PinnedRooms,
    status_tx: watch::Sender<Option<JoinStatus>>,
    status_rx: watch::Receiver<Option<JoinStatus>>,
    poller: Option<StatusPoller>,
}

impl RoomCard {

    pub fn new(state: Arc<AppState>, room: Room) -> Self {
        let pinned = PinnedRooms::new(state.storage.clone());
        let (status_tx, status_rx) = watch::channel(None);
        RoomCard { state, room, pinned, status_tx, status_rx, poller: None }
    }

    pub fn room(&self) -> &Room {
        &self.room
    }

    pub fn status(&self) -> Option<JoinStatus> {
        *self.status_rx.borrow()
    }

    /// Stream of status updates for subscribers, starting with the current
    /// value.
    pub fn status_stream(&self) -> WatchStream<Option<JoinStatus>> {
        WatchStream::new(self.status_rx.clone())
    }

    /// Begin refreshing the join status on the configured interval. The
    /// callback fires once if the server reports the room gone.
    pub fn start_polling(&mut self, on_not_found: Option<NotFoundCallback>) {
        if self.poller.is_some() {
            return;
        }
        let poll_interval = Duration::from_secs(self.state.env.poll_interval_secs);
        self.poller = Some(StatusPoller::start_with_sender(
            self.state.api.clone(),
            self.room.id.clone(),
            poll_interval,
            self.status_tx.clone(),
            on_not_found,
        ));
    }

    /// Releases the poll timer and the page event listener.
    pub fn stop_polling(&mut self) {
        self.poller = None;
    }

    pub fn is_polling(&self) -> bool {
        self.poller.as_ref().is_some_and(|poller| !poller.is_stopped())
    }

    /// Forward a page lifecycle event to the poller, if one is running.
    pub fn page_event(&self, event: PageEvent) {
        if let Some(poller) = &self.poller {
            poller.page_event(event);
        }
    }

    /// The join button. Public rooms join directly; private rooms branch on
    /// the current status: members enter, pending requests only produce an
    /// info notice, everyone else submits a join request.
    pub async fn join(&self) -> Result<JoinOutcome, ClientError> {
        if self.room.is_private {
            match self.status() {
                Some(JoinStatus::Member) => {
                    let response = self.guard(self.state.api.join(&self.room.id).await, "Failed to join room")?;
                    self.state.notices.success(response.message.unwrap_or_else(|| "Entering room...".to_string()));
                    Ok(JoinOutcome::Entered { room_id: self.room.id.clone() })
                }
                Some(JoinStatus::Pending) => {
                    self.state.notices.info("Your join request is pending approval.");
                    Ok(JoinOutcome::AlreadyPending)
                }
                _ => {
                    self.guard(self.state.api.request_join(&self.room.id).await, "Failed to join room")?;
                    self.set_status(JoinStatus::Pending);
                    self.state.notices.success("Join request sent.");
                    Ok(JoinOutcome::Requested)
                }
            }
        } else {
            self.guard(self.state.api.join(&self.room.id).await, "Failed to join room")?;
            self.state.notices.success("Joining room...");
            self.set_status(JoinStatus::Member);
            Ok(JoinOutcome::Entered { room_id: self.room.id.clone() })
        }
    }

    /// Withdraw a pending join request.
    pub async fn cancel_request(&self) -> Result<(), ClientError> {
        self.guard(self.state.api.cancel_request(&self.room.id).await, "Failed to cancel request")?;
        self.set_status(JoinStatus::None);
        self.state.notices.success("Join request canceled.");
        Ok(())
    }

    pub async fn leave(&self) -> Result<(), ClientError> {
        self.guard(self.state.api.leave(&self.room.id).await, "Failed to leave room")?;
        self.state.notices.success("Left room successfully");
        Ok(())
    }

    pub fn is_pinned(&self) -> bool {
        self.pinned.is_pinned(&self.room.id)
    }

    pub fn pin(&self) -> Result<bool, ClientError> {
        let added = self.pinned.pin(&self.room)?;
        if added {
            self.state.notices.success("Room pinned to home.");
        }
        Ok(added)
    }

    /// Unpin never surfaces a storage failure to the user, matching the
    /// card's silent handling; it is logged and reported as "not removed".
    pub fn unpin(&self) -> bool {
        match self.pinned.unpin(&self.room.id) {
            Ok(removed) => {
                if removed {
                    self.state.notices.info("Room unpinned.");
                }
                removed
            }
            Err(err) => {
                error!("Failed to unpin room {}: {err}", self.room.id);
                false
            }
        }
    }

    /// The shareable link for this room on the frontend.
    pub fn room_link(&self) -> String {
        format!("{}/session/{}", self.state.env.frontend_origin.trim_end_matches('/'), self.room.id)
    }

    fn set_status(&self, status: JoinStatus) {
        self.status_tx.send_replace(Some(status));
    }

    fn guard<T>(&self, result: Result<T, ClientError>, fallback: &str) -> Result<T, ClientError> {
        if let Err(err) = &result {
            self.state.notices.error(err.user_message(fallback));
        }
        result
    }
}
