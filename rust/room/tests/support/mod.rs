#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use chipstack_engine::cards::Card;
use chipstack_engine::format::cards_text;
use chipstack_engine::hand::{HandEvaluator, Score};
use chipstack_engine::player::ParticipantId;
use chipstack_engine::table::{Table, TableConfig};
use chipstack_room::{EventSubscription, RoomEvent};

/// Table with the first seat as dealer and a fixed seed.
pub fn seated(names: &[&str], stacks: &[u32]) -> Table {
    let seats = names
        .iter()
        .map(|n| ParticipantId::new(*n))
        .zip(stacks.iter().copied())
        .collect();
    let config = TableConfig {
        small_blind: 10,
        seed: Some(3),
        first_dealer: Some(0),
        ..TableConfig::default()
    };
    Table::from_stacks(seats, &config).unwrap()
}

pub fn pid(name: &str) -> ParticipantId {
    ParticipantId::new(name)
}

/// Next event matching `pred`. The generous limit stays above every turn
/// timeout used with a paused clock.
pub async fn wait_for<F>(sub: &mut EventSubscription, mut pred: F) -> RoomEvent
where
    F: FnMut(&RoomEvent) -> bool,
{
    tokio::time::timeout(Duration::from_secs(300), async {
        loop {
            let event = sub.recv().await.expect("event stream closed");
            if pred(&event) {
                return event;
            }
        }
    })
    .await
    .expect("timed out waiting for event")
}

pub async fn wait_for_text(sub: &mut EventSubscription, text: &str) -> RoomEvent {
    wait_for(sub, |e| matches!(e, RoomEvent::Public { text: t, .. } if t == text)).await
}

/// Scores the hole cards whose text was set through [`favor_text`] highest.
#[derive(Debug, Default)]
pub struct FavorEvaluator {
    favored: Mutex<Option<String>>,
}

impl FavorEvaluator {
    pub fn favor_text(&self, cards: &str) {
        *self.favored.lock().unwrap() = Some(cards.to_string());
    }
}

impl HandEvaluator for FavorEvaluator {
    fn evaluate(&self, hole: [Card; 2], _board: &[Card]) -> Score {
        match self.favored.lock().unwrap().as_deref() {
            Some(text) if text == cards_text(&hole) => 10,
            _ => 1,
        }
    }
}

pub fn favor() -> Arc<FavorEvaluator> {
    Arc::new(FavorEvaluator::default())
}

/// Hole-card text from a private "Your cards: ..." message.
pub async fn hole_text_of(sub: &mut EventSubscription, who: &str) -> String {
    let event = wait_for(sub, |e| {
        matches!(e, RoomEvent::Private { participant, .. } if participant.as_str() == who)
    })
    .await;
    match event {
        RoomEvent::Private { text, .. } => text.trim_start_matches("Your cards: ").to_string(),
        _ => unreachable!(),
    }
}
