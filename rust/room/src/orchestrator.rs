//! The table actor.
//!
//! One task owns the [`Table`] and walks it through every hand. Between
//! stages it parks on its command inbox; each command is handled to
//! completion before the betting-completion check runs again, so there is
//! never more than one action in flight for a table.

use std::time::Duration;

use chipstack_engine::actions::ActionReport;
use chipstack_engine::errors::GameError;
use chipstack_engine::player::ParticipantId;
use chipstack_engine::table::Table;
use serde::{Deserialize, Serialize};
use tokio::sync::{mpsc, oneshot};
use tokio::time::{timeout_at, Instant};

use crate::errors::RoomError;
use crate::events::{EventBus, RoomEvent, RoomId};

/// A betting action requested by a participant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", content = "amount", rename_all = "snake_case")]
pub enum Action {
    Call,
    Bet(u32),
    Fold,
    AllIn,
}

pub(crate) type Reply<T> = oneshot::Sender<Result<T, RoomError>>;

#[derive(Debug)]
pub(crate) enum Command {
    Act {
        participant: ParticipantId,
        action: Action,
        reply: Reply<ActionReport>,
    },
    Chips {
        participant: ParticipantId,
        reply: Reply<u32>,
    },
    Pot {
        reply: Reply<u32>,
    },
    Turn {
        reply: Reply<Option<ParticipantId>>,
    },
    End {
        reply: Reply<()>,
    },
}

/// How a game finished.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum GameOutcome {
    Winner {
        participant: ParticipantId,
        hands: u32,
    },
    Terminated {
        hands: u32,
        reason: String,
    },
}

enum Stop {
    Ended(Reply<()>),
    Disconnected,
    Failed(GameError),
}

impl Stop {
    fn reason(&self) -> String {
        match self {
            Stop::Ended(_) => "ended by command".to_string(),
            Stop::Disconnected => "every room handle was dropped".to_string(),
            Stop::Failed(err) => err.to_string(),
        }
    }
}

pub(crate) struct Orchestrator {
    room_id: RoomId,
    table: Table,
    inbox: mpsc::Receiver<Command>,
    bus: EventBus,
    turn_timeout: Option<Duration>,
}

impl Orchestrator {
    pub(crate) fn new(
        room_id: RoomId,
        table: Table,
        inbox: mpsc::Receiver<Command>,
        bus: EventBus,
        turn_timeout: Option<Duration>,
    ) -> Self {
        Self {
            room_id,
            table,
            inbox,
            bus,
            turn_timeout,
        }
    }

    /// Play hands until one stack remains or the game is stopped.
    pub(crate) async fn run(mut self) -> GameOutcome {
        tracing::info!(
            room_id = %self.room_id,
            players = self.table.players().len(),
            "game started"
        );
        let seated: Vec<&str> = self
            .table
            .players()
            .iter()
            .map(|p| p.id().as_str())
            .collect();
        self.publish(format!("Welcome to the table: {}.", seated.join(", ")));

        let stop = loop {
            if let Err(stop) = self.play_hand().await {
                break stop;
            }
            if let Some(winner) = self.table.winner().cloned() {
                let hands = self.table.hand_number();
                self.publish(format!("{winner} wins the game!"));
                self.publish("Game Over!".to_string());
                self.bus.broadcast(RoomEvent::GameEnded {
                    room_id: self.room_id.clone(),
                    winner: Some(winner.clone()),
                    reason: "last player with chips".to_string(),
                });
                tracing::info!(room_id = %self.room_id, winner = %winner, hands, "game finished");
                return GameOutcome::Winner {
                    participant: winner,
                    hands,
                };
            }
        };

        let hands = self.table.hand_number();
        let reason = stop.reason();
        if let Stop::Failed(err) = &stop {
            tracing::error!(room_id = %self.room_id, error = %err, "game aborted by engine fault");
        } else {
            tracing::info!(room_id = %self.room_id, reason = %reason, hands, "game terminated");
        }
        self.publish("The game has been terminated.".to_string());
        self.bus.broadcast(RoomEvent::GameEnded {
            room_id: self.room_id.clone(),
            winner: None,
            reason: reason.clone(),
        });
        if let Stop::Ended(ack) = stop {
            let _ = ack.send(Ok(()));
        }
        GameOutcome::Terminated { hands, reason }
    }

    async fn play_hand(&mut self) -> Result<(), Stop> {
        tokio::task::yield_now().await;

        self.publish(format!("Hand #{} begins.", self.table.hand_number() + 1));
        self.table.preflop().map_err(Stop::Failed)?;
        self.betting().await?;

        for street in [Table::flop, Table::turn, Table::river] {
            if !street(&mut self.table).map_err(Stop::Failed)? {
                break;
            }
            self.betting().await?;
        }

        let record = self.table.showdown();
        match record.to_json_line() {
            Ok(line) => tracing::info!(room_id = %self.room_id, record = %line, "hand finished"),
            Err(err) => tracing::warn!(room_id = %self.room_id, error = %err, "hand record not serializable"),
        }
        self.table.next_round();
        Ok(())
    }

    /// Wait for commands until the street's betting is over.
    async fn betting(&mut self) -> Result<(), Stop> {
        let mut deadline = self.turn_deadline();
        while self.table.betting_complete().is_none() {
            let received = match deadline {
                Some(at) => match timeout_at(at, self.inbox.recv()).await {
                    Ok(received) => received,
                    Err(_) => {
                        self.fold_idle_player()?;
                        deadline = self.turn_deadline();
                        continue;
                    }
                },
                None => self.inbox.recv().await,
            };
            let command = received.ok_or(Stop::Disconnected)?;
            if self.handle(command)? {
                deadline = self.turn_deadline();
            }
        }
        tracing::debug!(
            room_id = %self.room_id,
            completion = ?self.table.betting_complete(),
            stage = ?self.table.stage(),
            "betting closed"
        );
        Ok(())
    }

    fn turn_deadline(&self) -> Option<Instant> {
        self.turn_timeout.map(|t| Instant::now() + t)
    }

    fn fold_idle_player(&mut self) -> Result<(), Stop> {
        let Some(idle) = self.table.current_player().map(|p| p.id().clone()) else {
            return Ok(());
        };
        tracing::warn!(room_id = %self.room_id, participant = %idle, "turn timed out");
        self.publish(format!("{idle} ran out of time."));
        self.table.fold().map_err(Stop::Failed)?;
        Ok(())
    }

    /// Returns `true` when the command changed the table.
    fn handle(&mut self, command: Command) -> Result<bool, Stop> {
        match command {
            Command::Act {
                participant,
                action,
                reply,
            } => {
                let result = self.act(&participant, action);
                let applied = result.is_ok();
                if let Err(err) = &result {
                    tracing::warn!(
                        room_id = %self.room_id,
                        participant = %participant,
                        ?action,
                        error = %err,
                        "command rejected"
                    );
                }
                let _ = reply.send(result);
                Ok(applied)
            }
            Command::Chips { participant, reply } => {
                let chips = self.table.chips_of(&participant);
                let _ = reply.send(chips.ok_or(RoomError::UnknownParticipant(participant)));
                Ok(false)
            }
            Command::Pot { reply } => {
                let _ = reply.send(Ok(self.table.pot()));
                Ok(false)
            }
            Command::Turn { reply } => {
                let _ = reply.send(Ok(self.expected_player()));
                Ok(false)
            }
            Command::End { reply } => Err(Stop::Ended(reply)),
        }
    }

    fn expected_player(&self) -> Option<ParticipantId> {
        if self.table.betting_complete().is_some() {
            return None;
        }
        self.table.current_player().map(|p| p.id().clone())
    }

    fn act(&mut self, participant: &ParticipantId, action: Action) -> Result<ActionReport, RoomError> {
        if self.table.seat_of(participant).is_none() {
            return Err(RoomError::UnknownParticipant(participant.clone()));
        }
        let expected = self.expected_player();
        if expected.as_ref() != Some(participant) {
            return Err(RoomError::WrongTurn {
                participant: participant.clone(),
                expected,
            });
        }
        let report = match action {
            Action::Call => self.table.call(),
            Action::Bet(amount) => self.table.bet(amount),
            Action::Fold => self.table.fold(),
            Action::AllIn => self.table.all_in(),
        }?;
        Ok(report)
    }

    fn publish(&self, text: String) {
        self.bus.broadcast(RoomEvent::Public {
            room_id: self.room_id.clone(),
            text,
        });
    }
}
