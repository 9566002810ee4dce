use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use uuid::Uuid;

use crate::errors::RoomError;
use crate::events::{EventBus, RoomId};
use crate::room::GameRoom;

/// Every open room, sharing one event bus.
#[derive(Debug, Default)]
pub struct RoomRegistry {
    rooms: RwLock<HashMap<RoomId, Arc<GameRoom>>>,
    bus: EventBus,
}

impl RoomRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_bus(bus: EventBus) -> Self {
        Self {
            rooms: RwLock::new(HashMap::new()),
            bus,
        }
    }

    pub fn bus(&self) -> &EventBus {
        &self.bus
    }

    /// The room for `id`, created on first use.
    pub fn open(&self, id: impl Into<RoomId>) -> Arc<GameRoom> {
        let id = id.into();
        let mut rooms = self.rooms.write().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(rooms.entry(id.clone()).or_insert_with(|| {
            tracing::debug!(room_id = %id, "room opened");
            Arc::new(GameRoom::new(id.clone(), self.bus.clone()))
        }))
    }

    /// A new room under a fresh random id.
    pub fn create(&self) -> Arc<GameRoom> {
        self.open(Uuid::new_v4().to_string())
    }

    pub fn get(&self, id: &str) -> Option<Arc<GameRoom>> {
        self.rooms
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(id)
            .cloned()
    }

    pub fn room_ids(&self) -> Vec<RoomId> {
        let mut ids: Vec<RoomId> = self
            .rooms
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .cloned()
            .collect();
        ids.sort();
        ids
    }

    pub async fn running_rooms(&self) -> Vec<RoomId> {
        let rooms: Vec<Arc<GameRoom>> = self
            .rooms
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .values()
            .cloned()
            .collect();
        let mut running = Vec::new();
        for room in rooms {
            if room.is_running().await {
                running.push(room.id().clone());
            }
        }
        running.sort();
        running
    }

    /// End any game in the room and forget it. Returns `false` for an
    /// unknown id.
    pub async fn close(&self, id: &str) -> Result<bool, RoomError> {
        let room = self
            .rooms
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(id);
        let Some(room) = room else {
            return Ok(false);
        };
        match room.end().await {
            Ok(()) | Err(RoomError::NoActiveGame) => {}
            Err(err) => return Err(err),
        }
        self.bus.drop_room(room.id());
        tracing::debug!(room_id = %id, "room closed");
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_returns_the_same_room() {
        let registry = RoomRegistry::new();
        let a = registry.open("lobby");
        let b = registry.open("lobby");
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(registry.room_ids(), vec!["lobby".to_string()]);
    }

    #[test]
    fn created_rooms_get_distinct_ids() {
        let registry = RoomRegistry::new();
        let a = registry.create();
        let b = registry.create();
        assert_ne!(a.id(), b.id());
        assert!(registry.get(a.id()).is_some());
    }

    #[tokio::test]
    async fn closing_unknown_room_is_not_an_error() {
        let registry = RoomRegistry::new();
        assert_eq!(registry.close("nowhere").await, Ok(false));
        registry.open("idle");
        assert_eq!(registry.close("idle").await, Ok(true));
        assert!(registry.get("idle").is_none());
    }
}
