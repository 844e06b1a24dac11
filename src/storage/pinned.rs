use std::sync::Arc;
use crate::errors::ClientError;
use crate::model::Room;
use crate::storage::{LocalStore, PINNED_ROOMS_KEY};

/// The locally persisted set of pinned room snapshots, keyed by room id and
/// kept in pin order. Nothing here syncs with the server, so entries go
/// stale; the UI only uses them for marking and ordering.
#[derive(Clone)]
pub struct PinnedRooms {
    store: Arc<LocalStore>,
}

impl PinnedRooms {

    pub fn new(store: Arc<LocalStore>) -> Self {
        PinnedRooms { store }
    }

    /// Snapshot list in pin order. An unreadable stored value reads as empty.
    pub fn all(&self) -> Vec<Room> {
        self.store.get_json(PINNED_ROOMS_KEY).unwrap_or_default()
    }

    pub fn is_pinned(&self, room_id: &str) -> bool {
        self.all().iter().any(|room| room.id == room_id)
    }

    /// Adds a room snapshot. Idempotent: pinning an already pinned room
    /// keeps exactly one entry and returns `false`.
    pub fn pin(&self, room: &Room) -> Result<bool, ClientError> {
        let mut rooms = self.all();
        if rooms.iter().any(|entry| entry.id == room.id) {
            return Ok(false);
        }
        rooms.push(room.clone());
        self.store.set_json(PINNED_ROOMS_KEY, &rooms)?;
        Ok(true)
    }

    /// Removes by id. Returns whether an entry was actually removed.
    pub fn unpin(&self, room_id: &str) -> Result<bool, ClientError> {
        let rooms = self.all();
        let remaining: Vec<Room> = rooms.iter().filter(|entry| entry.id != room_id).cloned().collect();
        if remaining.len() == rooms.len() {
            return Ok(false);
        }
        self.store.set_json(PINNED_ROOMS_KEY, &remaining)?;
        Ok(true)
    }
}
