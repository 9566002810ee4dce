//! # chipstack-room: async game rooms for the Hold'em engine
//!
//! Each [`GameRoom`] runs at most one game. Starting a game spawns a table
//! actor that owns the engine [`Table`](chipstack_engine::table::Table),
//! drives the hand lifecycle and answers commands sent through the room.
//! Table narration is published on an [`EventBus`] as [`RoomEvent`]s.
//!
//! ```no_run
//! use chipstack_room::{GameRoom, GameSettings, EventBus};
//!
//! # async fn demo() -> Result<(), chipstack_room::RoomError> {
//! let room = GameRoom::new("table-1", EventBus::new());
//! let mut events = room.subscribe();
//! room.start(vec!["ann".into(), "bob".into()], &GameSettings::default()).await?;
//!
//! if let Some(player) = room.query_turn().await? {
//!     room.call(&player).await?;
//! }
//! while let Some(event) = events.recv().await {
//!     println!("{event:?}");
//! }
//! # Ok(())
//! # }
//! ```

pub mod errors;
pub mod events;
pub mod logging;
pub mod orchestrator;
pub mod registry;
pub mod room;
pub mod settings;

pub use errors::RoomError;
pub use events::{EventBus, EventSubscription, RoomEvent, RoomId, RoomNotifier};
pub use logging::{init_logging, init_logging_with, LogEntry, TestLogSubscriber};
pub use orchestrator::{Action, GameOutcome};
pub use registry::RoomRegistry;
pub use room::GameRoom;
pub use settings::{GameSettings, SettingsError};
