use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};
use tracing::debug;
use crate::notify::{Notice, NoticeLevel};

/// Sending half of the notice channel. Cards and the session store push
/// notices here; the receiver is handed to the rendering layer. A card must
/// keep working headless, so a dropped receiver is not an error.
#[derive(Clone)]
pub struct NoticeSender {
    tx: UnboundedSender<Notice>,
}

impl NoticeSender {

    pub fn channel() -> (NoticeSender, UnboundedReceiver<Notice>) {
        let (tx, rx) = unbounded_channel();
        (NoticeSender { tx }, rx)
    }

    pub fn success(&self, message: impl Into<String>) {
        self.send(Notice::new(NoticeLevel::Success, message));
    }

    pub fn info(&self, message: impl Into<String>) {
        self.send(Notice::new(NoticeLevel::Info, message));
    }

    pub fn error(&self, message: impl Into<String>) {
        self.send(Notice::new(NoticeLevel::Error, message));
    }

    fn send(&self, notice: Notice) {
        if self.tx.send(notice).is_err() {
            debug!("No notice subscriber attached, dropping notice.");
        }
    }
}
