use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{debug, error};
use crate::api::RoomServiceApi;
use crate::errors::ClientError;
use crate::model::JoinStatus;

/// Invoked at most once, when the server reports the polled room gone.
pub type NotFoundCallback = Arc<dyn Fn(&str) + Send + Sync>;

/// Page lifecycle events forwarded by the embedding frontend. The analog of
/// the browser's `visibilitychange` listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageEvent {
    Visible,
    Hidden,
}

/// Periodically refreshes the client's join status for one room while the
/// owning card is mounted.
///
/// The poller fetches once immediately, then on a fixed interval. It never
/// pauses while the page is hidden, but a `PageEvent::Visible` forces an
/// immediate out-of-cycle fetch. Fetch failures other than a 404 keep the
/// last known status and the schedule; a 404 fires the not-found callback
/// once and ends the task for good. Dropping the handle aborts the task, so
/// the timer and the event listener die with the card.
pub struct StatusPoller {
    room_id: String,
    status_rx: watch::Receiver<Option<JoinStatus>>,
    page_events: mpsc::UnboundedSender<PageEvent>,
    task: JoinHandle<()>,
}

impl StatusPoller {

    pub fn start(
        api: RoomServiceApi,
        room_id: impl Into<String>,
        poll_interval: Duration,
        on_not_found: Option<NotFoundCallback>,
    ) -> Self {
        let (status_tx, _) = watch::channel(None);
        Self::start_with_sender(api, room_id, poll_interval, status_tx, on_not_found)
    }

    /// Variant used by the room card so that poller updates and action
    /// transitions publish over the same channel.
    pub(crate) fn start_with_sender(
        api: RoomServiceApi,
        room_id: impl Into<String>,
        poll_interval: Duration,
        status_tx: watch::Sender<Option<JoinStatus>>,
        on_not_found: Option<NotFoundCallback>,
    ) -> Self {
        let room_id = room_id.into();
        let status_rx = status_tx.subscribe();
        let (page_tx, page_rx) = mpsc::unbounded_channel();

        let task = tokio::spawn(poll_loop(
            api,
            room_id.clone(),
            poll_interval,
            status_tx,
            page_rx,
            on_not_found,
        ));

        StatusPoller { room_id, status_rx, page_events: page_tx, task }
    }

    pub fn room_id(&self) -> &str {
        &self.room_id
    }

    /// Last status received from the server, `None` before the first
    /// successful fetch.
    pub fn status(&self) -> Option<JoinStatus> {
        *self.status_rx.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<Option<JoinStatus>> {
        self.status_rx.clone()
    }

    /// Forward a page lifecycle event. `Visible` triggers an immediate
    /// refresh; `Hidden` is accepted and ignored, polling continues.
    pub fn page_event(&self, event: PageEvent) {
        let _ = self.page_events.send(event);
    }

    /// True once the poller has shut down after a not-found response.
    pub fn is_stopped(&self) -> bool {
        self.task.is_finished()
    }

    pub fn stop(&self) {
        self.task.abort();
    }
}

impl Drop for StatusPoller {
    fn drop(&mut self) {
        self.task.abort();
    }
}

async fn poll_loop(
    api: RoomServiceApi,
    room_id: String,
    poll_interval: Duration,
    status_tx: watch::Sender<Option<JoinStatus>>,
    mut page_rx: mpsc::UnboundedReceiver<PageEvent>,
    on_not_found: Option<NotFoundCallback>,
) {
    let mut ticker = interval(poll_interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let mut page_events_closed = false;

    loop {
        //first tick fires immediately, every later round waits for the
        //interval or an early visibility wake-up
        tokio::select! {
            _ = ticker.tick() => {}
            event = page_rx.recv(), if !page_events_closed => {
                match event {
                    Some(PageEvent::Visible) => {
                        debug!("Page visible again, refreshing join status for room {room_id} early.");
                    }
                    Some(PageEvent::Hidden) => continue,
                    None => {
                        page_events_closed = true;
                        continue;
                    }
                }
            }
        }

        match api.join_status(&room_id).await {
            Ok(status) => {
                status_tx.send_replace(Some(status));
            }
            Err(ClientError::RoomNotFound { .. }) => {
                debug!("Room {room_id} no longer exists, stopping status polling.");
                if let Some(callback) = &on_not_found {
                    callback(&room_id);
                }
                break;
            }
            Err(err) => {
                //keep the last known status, next tick retries
                error!("Failed to refresh join status for room {room_id}: {err}");
            }
        }
    }
}
