//! # chipstack-engine: Multiplayer Hold'em Table Core
//!
//! A synchronous Texas Hold'em engine for two or more seats. It runs the
//! per-hand state machine (blinds, streets, turn order, betting-round
//! completion, showdown and pot division) and leaves scheduling, command
//! parsing and message delivery to the caller.
//!
//! ## Core Modules
//!
//! - [`cards`] - Card representation (Suit, Rank, Card) and deck construction
//! - [`deck`] - Seeded 52-card deck with draw-without-replacement
//! - [`player`] - Participant identity, seat roles and per-seat chip state
//! - [`table`] - The hand lifecycle and betting-round completion
//! - [`actions`] - Call, bet, fold and all-in handlers
//! - [`hand`] - Hand evaluator trait and the standard 7-card evaluator
//! - [`notify`] - Notification sink for public and private text
//! - [`format`] - Card and board text
//! - [`history`] - Per-hand records
//! - [`errors`] - Error types for table operations
//!
//! ## Quick Start
//!
//! ```rust
//! use chipstack_engine::table::{Table, TableConfig};
//!
//! let config = TableConfig { seed: Some(7), first_dealer: Some(0), ..TableConfig::default() };
//! let mut table = Table::new(vec!["ann".into(), "bob".into()], &config).unwrap();
//!
//! table.preflop().unwrap();
//! assert_eq!(table.pot(), 30);
//! assert_eq!(table.min_bet(), 20);
//!
//! // ann (dealer and small blind) acts first heads-up
//! table.call().unwrap();
//! table.call().unwrap();
//! assert!(table.betting_complete().is_some());
//! ```

pub mod actions;
pub mod cards;
pub mod deck;
pub mod errors;
pub mod format;
pub mod hand;
pub mod history;
pub mod notify;
pub mod player;
pub mod table;

pub use actions::{ActionKind, ActionReport};
pub use errors::GameError;
pub use hand::{HandEvaluator, Score, StandardEvaluator};
pub use notify::{Notifier, SilentNotifier};
pub use player::{ParticipantId, Player, SeatRole};
pub use table::{BettingCompletion, Stage, Table, TableConfig};
