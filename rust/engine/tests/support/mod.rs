#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use chipstack_engine::cards::Card;
use chipstack_engine::hand::{HandEvaluator, Score};
use chipstack_engine::notify::Notifier;
use chipstack_engine::player::ParticipantId;
use chipstack_engine::table::{Table, TableConfig};

/// Captures every notification for later inspection.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    pub public: Mutex<Vec<String>>,
    pub private: Mutex<Vec<(ParticipantId, String)>>,
}

impl RecordingNotifier {
    pub fn public_lines(&self) -> Vec<String> {
        self.public.lock().unwrap().clone()
    }

    pub fn private_for(&self, who: &str) -> Vec<String> {
        self.private
            .lock()
            .unwrap()
            .iter()
            .filter(|(p, _)| p.as_str() == who)
            .map(|(_, t)| t.clone())
            .collect()
    }
}

impl Notifier for RecordingNotifier {
    fn send_public(&self, text: String) {
        self.public.lock().unwrap().push(text);
    }

    fn send_private(&self, participant: &ParticipantId, text: String) {
        self.private.lock().unwrap().push((participant.clone(), text));
    }
}

/// Every hand scores the same, so every showdown is a tie.
#[derive(Debug, Default)]
pub struct TieEvaluator {
    pub calls: AtomicUsize,
}

impl HandEvaluator for TieEvaluator {
    fn evaluate(&self, _hole: [Card; 2], _board: &[Card]) -> Score {
        self.calls.fetch_add(1, Ordering::SeqCst);
        1
    }
}

/// Scores one chosen pair of hole cards above everything else.
#[derive(Debug, Default)]
pub struct FavorEvaluator {
    pub favored: Mutex<Option<[Card; 2]>>,
}

impl FavorEvaluator {
    pub fn favor(&self, hole: [Card; 2]) {
        *self.favored.lock().unwrap() = Some(hole);
    }
}

impl HandEvaluator for FavorEvaluator {
    fn evaluate(&self, hole: [Card; 2], _board: &[Card]) -> Score {
        match *self.favored.lock().unwrap() {
            Some(f) if f == hole => 10,
            _ => 1,
        }
    }
}

pub fn ids(names: &[&str]) -> Vec<ParticipantId> {
    names.iter().map(|n| ParticipantId::new(*n)).collect()
}

pub fn config(small_blind: u32, seed: u64) -> TableConfig {
    TableConfig {
        starting_chips: 1000,
        small_blind,
        seed: Some(seed),
        first_dealer: Some(0),
    }
}

/// Table with the first seat as dealer, recording notifications.
pub fn table(names: &[&str], stacks: &[u32], small_blind: u32) -> (Table, Arc<RecordingNotifier>) {
    let seats = ids(names).into_iter().zip(stacks.iter().copied()).collect();
    let notifier = Arc::new(RecordingNotifier::default());
    let table = Table::from_stacks(seats, &config(small_blind, 42))
        .unwrap()
        .with_notifier(notifier.clone());
    (table, notifier)
}

pub fn current(table: &Table) -> String {
    table.current_player().unwrap().id().to_string()
}
