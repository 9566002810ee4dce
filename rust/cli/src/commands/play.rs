//! # Play Command
//!
//! Hot-seat Hold'em: every participant shares one terminal and types their
//! actions as `<player> <action>` lines. The game itself runs in a room on a
//! background runtime; this module only relays input and prints room events.
//!
//! The session ends when one stack remains, when someone types `q`, or when
//! input runs out (reported as an interruption).

use crate::config::{self, ConfigOverrides};
use crate::error::CliError;
use crate::io_utils::read_stdin_line;
use crate::ui;
use crate::validation::{ParseResult, parse_input};
use chipstack_engine::player::ParticipantId;
use chipstack_room::{EventBus, EventSubscription, GameOutcome, GameRoom, GameSettings, RoomError};
use std::io::{BufRead, Write};

const ROOM_ID: &str = "local";

/// Arguments of `chipstack play`.
#[derive(Debug, Clone, Default)]
pub struct PlayArgs {
    pub players: Vec<String>,
    pub chips: Option<u32>,
    pub small_blind: Option<u32>,
    pub seed: Option<u64>,
    pub turn_timeout: Option<u64>,
}

enum SessionEnd {
    Finished,
    Quit,
    InputClosed,
}

/// Handle the play command.
///
/// Returns `Err(CliError::Interrupted)` if input ends while the game is
/// still running; the game is terminated first and its summary printed.
pub fn handle_play_command(
    args: PlayArgs,
    input: &mut dyn BufRead,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<(), CliError> {
    let participants = participants_from(&args.players)?;
    let resolved = config::load_with_overrides(ConfigOverrides {
        starting_chips: args.chips,
        small_blind: args.small_blind,
        seed: args.seed,
        turn_timeout_secs: args.turn_timeout,
    })?;

    let mut settings = resolved.config.to_settings();
    settings
        .validate_seats(participants.len())
        .map_err(|e| CliError::InvalidInput(e.to_string()))?;
    let seed = settings.seed.unwrap_or_else(rand::random);
    settings.seed = Some(seed);

    let names: Vec<&str> = participants.iter().map(ParticipantId::as_str).collect();
    writeln!(
        out,
        "play: players={} chips={} small_blind={} seed={}",
        names.join(","),
        settings.starting_chips,
        settings.small_blind,
        seed
    )?;
    if let Some(secs) = settings.turn_timeout_secs {
        ui::display_warning(
            err,
            &format!("Players who do not act within {secs}s are folded automatically."),
        )?;
    }

    // The room's timers must keep running while this thread blocks on input.
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(1)
        .enable_all()
        .build()?;
    let (outcome, end) = runtime.block_on(play_session(participants, &settings, input, out, err))?;

    writeln!(out, "{}", ui::format_outcome(&outcome))?;
    match end {
        SessionEnd::InputClosed => Err(CliError::Interrupted(
            "input closed before the game finished".to_string(),
        )),
        SessionEnd::Finished | SessionEnd::Quit => Ok(()),
    }
}

fn participants_from(names: &[String]) -> Result<Vec<ParticipantId>, CliError> {
    names
        .iter()
        .map(|name| {
            let name = name.trim();
            if name.is_empty() {
                Err(CliError::InvalidInput("player names must not be empty".to_string()))
            } else {
                Ok(ParticipantId::new(name))
            }
        })
        .collect()
}

async fn play_session(
    participants: Vec<ParticipantId>,
    settings: &GameSettings,
    input: &mut dyn BufRead,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<(GameOutcome, SessionEnd), CliError> {
    let room = GameRoom::new(ROOM_ID, EventBus::new());
    let mut events = room.subscribe();
    room.start(participants, settings).await?;

    let end = loop {
        let turn = match room.query_turn().await {
            Ok(turn) => turn,
            Err(RoomError::NoActiveGame) => break SessionEnd::Finished,
            Err(e) => return Err(e.into()),
        };
        print_events(&mut events, out)?;
        match &turn {
            Some(player) => write!(out, "{player} to act> ")?,
            None => write!(out, "> ")?,
        }
        out.flush()?;

        let Some(line) = read_stdin_line(input) else {
            break SessionEnd::InputClosed;
        };
        if line.is_empty() {
            continue;
        }

        match parse_input(&line) {
            ParseResult::Quit => break SessionEnd::Quit,
            ParseResult::Invalid(msg) => ui::write_error(err, &msg)?,
            ParseResult::Pot => {
                if let Some(pot) = settle(room.query_pot().await, err)? {
                    writeln!(out, "Pot: {pot}")?;
                }
            }
            ParseResult::Turn => {
                if let Some(turn) = settle(room.query_turn().await, err)? {
                    match turn {
                        Some(player) => writeln!(out, "Waiting on {player}.")?,
                        None => writeln!(out, "Nobody is up right now.")?,
                    }
                }
            }
            ParseResult::Chips(player) => {
                if let Some(chips) = settle(room.query_chips(&player).await, err)? {
                    writeln!(out, "{player} has {chips} chips.")?;
                }
            }
            ParseResult::Act { player, action } => {
                settle(room.act(&player, action).await, err)?;
            }
        }
    };

    if !matches!(end, SessionEnd::Finished) {
        match room.end().await {
            Ok(()) | Err(RoomError::NoActiveGame) => {}
            Err(e) => return Err(e.into()),
        }
    }
    let outcome = room.wait_finished().await?;
    print_events(&mut events, out)?;
    Ok((outcome, end))
}

/// Report recoverable refusals on stderr and keep going. A game that ended
/// between prompts is noticed at the top of the loop.
fn settle<T>(result: Result<T, RoomError>, err: &mut dyn Write) -> Result<Option<T>, CliError> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(RoomError::NoActiveGame) => Ok(None),
        Err(e) if e.is_recoverable() => {
            ui::write_error(err, &e.to_string())?;
            Ok(None)
        }
        Err(e) => Err(e.into()),
    }
}

fn print_events(events: &mut EventSubscription, out: &mut dyn Write) -> std::io::Result<()> {
    while let Ok(event) = events.receiver().try_recv() {
        writeln!(out, "{}", ui::format_event(&event))?;
    }
    Ok(())
}
