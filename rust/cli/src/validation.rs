//! Parsing of the lines typed at the table.
//!
//! Accepted forms (case-insensitive):
//! - `<player> call` / `check`, `<player> bet <n>` / `raise <n>`,
//!   `<player> fold`, `<player> allin` / `all-in`
//! - `pot`, `turn`, `chips <player>` (or `<player> chips`)
//! - `q` / `quit` / `end`

use chipstack_engine::player::ParticipantId;
use chipstack_room::Action;

#[derive(Debug, PartialEq, Eq)]
pub enum ParseResult {
    /// A betting action on behalf of `player`
    Act { player: ParticipantId, action: Action },
    Pot,
    Turn,
    Chips(ParticipantId),
    Quit,
    /// Invalid input with error message
    Invalid(String),
}

/// Parse one input line.
///
/// ```rust
/// # use chipstack_cli::validation::{parse_input, ParseResult};
/// use chipstack_room::Action;
///
/// assert_eq!(
///     parse_input("ann bet 40"),
///     ParseResult::Act { player: "ann".into(), action: Action::Bet(40) }
/// );
/// assert_eq!(parse_input("pot"), ParseResult::Pot);
/// assert_eq!(parse_input("q"), ParseResult::Quit);
/// ```
pub fn parse_input(input: &str) -> ParseResult {
    let parts: Vec<&str> = input.split_whitespace().collect();
    let Some(first) = parts.first() else {
        return ParseResult::Invalid("Empty input".to_string());
    };

    match (first.to_lowercase().as_str(), parts.len()) {
        ("q" | "quit" | "end", 1) => return ParseResult::Quit,
        ("pot", 1) => return ParseResult::Pot,
        ("turn", 1) => return ParseResult::Turn,
        ("chips", 2) => return ParseResult::Chips(ParticipantId::new(parts[1])),
        _ => {}
    }

    if parts.len() < 2 {
        return ParseResult::Invalid(format!(
            "Unrecognized command '{}'. Use '<player> <call|bet N|fold|allin>'",
            input.trim()
        ));
    }

    let player = ParticipantId::new(parts[0]);
    let verb = parts[1].to_lowercase();
    let amount = parts.get(2).copied();
    if parts.len() > 3 {
        return ParseResult::Invalid(format!("Too many arguments in '{}'", input.trim()));
    }

    let action = match (verb.as_str(), amount) {
        ("call" | "check", None) => Action::Call,
        ("fold", None) => Action::Fold,
        ("allin" | "all-in", None) => Action::AllIn,
        ("chips", None) => return ParseResult::Chips(player),
        ("bet" | "raise", Some(raw)) => match raw.parse::<u32>() {
            Ok(n) => Action::Bet(n),
            Err(_) => return ParseResult::Invalid(format!("Invalid bet amount '{raw}'")),
        },
        ("bet" | "raise", None) => {
            return ParseResult::Invalid(format!("{verb} requires an amount (e.g., '{verb} 100')"));
        }
        (_, Some(_)) if verb != "bet" && verb != "raise" => {
            return ParseResult::Invalid(format!("'{verb}' does not take an amount"));
        }
        _ => return ParseResult::Invalid(format!("Unrecognized action '{verb}'")),
    };
    ParseResult::Act { player, action }
}
