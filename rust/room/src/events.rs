use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

use chipstack_engine::notify::Notifier;
use chipstack_engine::player::ParticipantId;
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

/// Rooms are addressed by the channel or session they serve.
pub type RoomId = String;

// Bounded so one stalled reader cannot grow memory without limit;
// a subscriber whose buffer fills up is dropped.
const EVENT_CHANNEL_BUFFER: usize = 1000;

pub type EventSender = mpsc::Sender<RoomEvent>;
pub type EventReceiver = mpsc::Receiver<RoomEvent>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RoomEvent {
    /// Text for everyone at the table
    Public { room_id: RoomId, text: String },
    /// Text for a single participant, hole cards only
    Private {
        room_id: RoomId,
        participant: ParticipantId,
        text: String,
    },
    GameEnded {
        room_id: RoomId,
        winner: Option<ParticipantId>,
        reason: String,
    },
}

impl RoomEvent {
    pub fn room_id(&self) -> &RoomId {
        match self {
            RoomEvent::Public { room_id, .. }
            | RoomEvent::Private { room_id, .. }
            | RoomEvent::GameEnded { room_id, .. } => room_id,
        }
    }

    /// Whether a front end may show this event to `participant`.
    pub fn is_visible_to(&self, participant: &ParticipantId) -> bool {
        match self {
            RoomEvent::Private {
                participant: owner, ..
            } => owner == participant,
            _ => true,
        }
    }
}

pub struct EventSubscription {
    bus: EventBus,
    room_id: RoomId,
    subscriber_id: usize,
    pub receiver: EventReceiver,
}

impl EventSubscription {
    pub fn receiver(&mut self) -> &mut EventReceiver {
        &mut self.receiver
    }

    pub async fn recv(&mut self) -> Option<RoomEvent> {
        self.receiver.recv().await
    }
}

impl Drop for EventSubscription {
    fn drop(&mut self) {
        self.bus.unsubscribe(&self.room_id, self.subscriber_id);
    }
}

#[derive(Debug, Clone, Default)]
pub struct EventBus {
    inner: Arc<EventBusInner>,
}

#[derive(Debug, Default)]
struct EventBusInner {
    subscribers: RwLock<HashMap<RoomId, Vec<(usize, EventSender)>>>,
    next_id: AtomicUsize,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&self, room_id: impl Into<RoomId>) -> EventSubscription {
        let room_id = room_id.into();
        let (subscriber_id, receiver) = self.subscribe_raw(room_id.clone());
        EventSubscription {
            bus: self.clone(),
            room_id,
            subscriber_id,
            receiver,
        }
    }

    fn subscribe_raw(&self, room_id: RoomId) -> (usize, EventReceiver) {
        let (tx, rx) = mpsc::channel(EVENT_CHANNEL_BUFFER);
        let id = self.inner.next_id.fetch_add(1, Ordering::AcqRel);
        let mut guard = self
            .inner
            .subscribers
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        guard.entry(room_id.clone()).or_default().push((id, tx));

        tracing::debug!(room_id = %room_id, subscriber_id = id, "subscribed to room events");
        (id, rx)
    }

    pub fn broadcast(&self, event: RoomEvent) {
        let room_id = event.room_id().clone();
        tracing::trace!(room_id = %room_id, event = ?event, "broadcasting room event");

        let subscribers = {
            let guard = self
                .inner
                .subscribers
                .read()
                .unwrap_or_else(PoisonError::into_inner);
            guard.get(&room_id).cloned()
        };
        let Some(list) = subscribers else {
            return;
        };

        let mut failed = Vec::new();
        for (id, sender) in list {
            if let Err(e) = sender.try_send(event.clone()) {
                tracing::warn!(
                    room_id = %room_id,
                    subscriber_id = id,
                    error = %e,
                    "dropping room event subscriber"
                );
                failed.push(id);
            }
        }
        if !failed.is_empty() {
            self.remove_subscribers(&room_id, &failed);
        }
    }

    pub fn unsubscribe(&self, room_id: &RoomId, subscriber_id: usize) {
        self.remove_subscribers(room_id, &[subscriber_id]);
    }

    pub fn drop_room(&self, room_id: &RoomId) {
        self.inner
            .subscribers
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(room_id);
    }

    pub fn subscriber_count(&self) -> usize {
        self.inner
            .subscribers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .values()
            .map(|list| list.len())
            .sum()
    }

    fn remove_subscribers(&self, room_id: &RoomId, ids: &[usize]) {
        let mut guard = self
            .inner
            .subscribers
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        if let Some(list) = guard.get_mut(room_id) {
            list.retain(|(id, _)| !ids.contains(id));
            if list.is_empty() {
                guard.remove(room_id);
            }
        }
    }
}

/// Engine notification sink that forwards table narration onto the bus.
#[derive(Debug, Clone)]
pub struct RoomNotifier {
    bus: EventBus,
    room_id: RoomId,
}

impl RoomNotifier {
    pub fn new(bus: EventBus, room_id: RoomId) -> Self {
        Self { bus, room_id }
    }
}

impl Notifier for RoomNotifier {
    fn send_public(&self, text: String) {
        self.bus.broadcast(RoomEvent::Public {
            room_id: self.room_id.clone(),
            text,
        });
    }

    fn send_private(&self, participant: &ParticipantId, text: String) {
        self.bus.broadcast(RoomEvent::Private {
            room_id: self.room_id.clone(),
            participant: participant.clone(),
            text,
        });
    }
}
