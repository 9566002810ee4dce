use std::sync::Arc;

use chipstack_engine::actions::ActionReport;
use chipstack_engine::player::ParticipantId;
use chipstack_engine::table::Table;
use tokio::sync::{mpsc, oneshot, watch, Mutex};

use crate::errors::RoomError;
use crate::events::{EventBus, EventSubscription, RoomId, RoomNotifier};
use crate::orchestrator::{Action, Command, GameOutcome, Orchestrator, Reply};
use crate::settings::GameSettings;

/// The command boundary for one channel: at most one game runs at a time.
///
/// Every method forwards to the table actor and waits for its answer, so
/// calls from many tasks are serialized by the actor's inbox.
#[derive(Debug)]
pub struct GameRoom {
    id: RoomId,
    bus: EventBus,
    active: Mutex<Option<ActiveGame>>,
}

#[derive(Debug)]
struct ActiveGame {
    commands: mpsc::Sender<Command>,
    outcome: watch::Receiver<Option<GameOutcome>>,
}

impl ActiveGame {
    fn is_running(&self) -> bool {
        self.outcome.borrow().is_none() && !self.commands.is_closed()
    }
}

impl GameRoom {
    pub fn new(id: impl Into<RoomId>, bus: EventBus) -> Self {
        Self {
            id: id.into(),
            bus,
            active: Mutex::new(None),
        }
    }

    pub fn id(&self) -> &RoomId {
        &self.id
    }

    pub fn bus(&self) -> &EventBus {
        &self.bus
    }

    pub fn subscribe(&self) -> EventSubscription {
        self.bus.subscribe(self.id.clone())
    }

    /// Seat `participants` and start playing in the background.
    pub async fn start(
        &self,
        participants: Vec<ParticipantId>,
        settings: &GameSettings,
    ) -> Result<(), RoomError> {
        settings.validate()?;
        settings.validate_seats(participants.len())?;
        let table = Table::new(participants, &settings.table_config())?;
        self.start_table(table, settings).await
    }

    /// Start a game on a table built by the caller, e.g. with fixed stacks or
    /// a custom evaluator. The table's notifier is replaced by the room's.
    pub async fn start_table(&self, table: Table, settings: &GameSettings) -> Result<(), RoomError> {
        settings.validate()?;
        let mut active = self.active.lock().await;
        if active.as_ref().is_some_and(ActiveGame::is_running) {
            tracing::warn!(room_id = %self.id, "start refused, game already running");
            return Err(RoomError::GameAlreadyRunning);
        }

        let notifier = RoomNotifier::new(self.bus.clone(), self.id.clone());
        let table = table.with_notifier(Arc::new(notifier));
        let (commands, inbox) = mpsc::channel(settings.inbox_capacity);
        let (done, outcome) = watch::channel(None);
        let orchestrator = Orchestrator::new(
            self.id.clone(),
            table,
            inbox,
            self.bus.clone(),
            settings.turn_timeout(),
        );
        tokio::spawn(async move {
            let result = orchestrator.run().await;
            let _ = done.send(Some(result));
        });

        *active = Some(ActiveGame { commands, outcome });
        Ok(())
    }

    pub async fn is_running(&self) -> bool {
        self.active
            .lock()
            .await
            .as_ref()
            .is_some_and(ActiveGame::is_running)
    }

    pub async fn call(&self, participant: &ParticipantId) -> Result<ActionReport, RoomError> {
        self.act(participant, Action::Call).await
    }

    pub async fn bet(&self, participant: &ParticipantId, amount: u32) -> Result<ActionReport, RoomError> {
        self.act(participant, Action::Bet(amount)).await
    }

    pub async fn fold(&self, participant: &ParticipantId) -> Result<ActionReport, RoomError> {
        self.act(participant, Action::Fold).await
    }

    pub async fn all_in(&self, participant: &ParticipantId) -> Result<ActionReport, RoomError> {
        self.act(participant, Action::AllIn).await
    }

    pub async fn act(&self, participant: &ParticipantId, action: Action) -> Result<ActionReport, RoomError> {
        let participant = participant.clone();
        self.request(|reply| Command::Act {
            participant,
            action,
            reply,
        })
        .await
    }

    pub async fn query_chips(&self, participant: &ParticipantId) -> Result<u32, RoomError> {
        let participant = participant.clone();
        self.request(|reply| Command::Chips { participant, reply })
            .await
    }

    pub async fn query_pot(&self) -> Result<u32, RoomError> {
        self.request(|reply| Command::Pot { reply }).await
    }

    /// Who the table is waiting on; `None` between betting rounds.
    pub async fn query_turn(&self) -> Result<Option<ParticipantId>, RoomError> {
        self.request(|reply| Command::Turn { reply }).await
    }

    /// Stop the running game. Returns once the termination notice is out.
    pub async fn end(&self) -> Result<(), RoomError> {
        self.request(|reply| Command::End { reply }).await
    }

    /// Wait for the current (or last) game to finish.
    pub async fn wait_finished(&self) -> Result<GameOutcome, RoomError> {
        let mut outcome = {
            let active = self.active.lock().await;
            let game = active.as_ref().ok_or(RoomError::NoActiveGame)?;
            game.outcome.clone()
        };
        let done = outcome
            .wait_for(Option::is_some)
            .await
            .map_err(|_| RoomError::TaskFailed("game task stopped without an outcome".into()))?;
        (*done)
            .clone()
            .ok_or_else(|| RoomError::TaskFailed("missing outcome".into()))
    }

    async fn request<T>(
        &self,
        command: impl FnOnce(Reply<T>) -> Command,
    ) -> Result<T, RoomError> {
        let sender = {
            let active = self.active.lock().await;
            match active.as_ref() {
                Some(game) if game.is_running() => game.commands.clone(),
                _ => return Err(RoomError::NoActiveGame),
            }
        };
        let (reply, answer) = oneshot::channel();
        sender
            .send(command(reply))
            .await
            .map_err(|_| RoomError::NoActiveGame)?;
        answer.await.map_err(|_| RoomError::NoActiveGame)?
    }
}
