use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::player::ParticipantId;

/// Chips awarded to one participant at showdown.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct Payout {
    pub participant: ParticipantId,
    pub amount: u32,
}

/// Summary of one finished hand.
/// Serialized as a single JSON line by the orchestrator's hand log.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct HandRecord {
    /// 1-based hand counter within the game
    pub hand_number: u32,
    /// Community cards dealt before the hand ended (0 to 5)
    pub board: Vec<Card>,
    /// Pot contested at showdown
    pub pot: u32,
    /// Everyone tied for the best hand, in seat order
    pub winners: Vec<ParticipantId>,
    /// Actual chip distribution, including the odd-chip remainder
    pub payouts: Vec<Payout>,
    /// True when all opponents folded and no cards were compared
    pub uncontested: bool,
    /// RFC3339 timestamp
    #[serde(default)]
    pub ts: Option<String>,
}

impl HandRecord {
    pub fn stamped(mut self) -> Self {
        if self.ts.is_none() {
            self.ts = Some(Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true));
        }
        self
    }

    pub fn to_json_line(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn total_paid(&self) -> u32 {
        self.payouts.iter().map(|p| p.amount).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stamping_keeps_existing_timestamp() {
        let rec = HandRecord {
            hand_number: 1,
            board: vec![],
            pot: 30,
            winners: vec!["a".into()],
            payouts: vec![Payout {
                participant: "a".into(),
                amount: 30,
            }],
            uncontested: true,
            ts: Some("2024-01-01T00:00:00Z".into()),
        };
        let rec = rec.stamped();
        assert_eq!(rec.ts.as_deref(), Some("2024-01-01T00:00:00Z"));
        let line = rec.to_json_line().unwrap();
        assert!(line.contains("\"uncontested\":true"));
        assert_eq!(rec.total_paid(), 30);
    }
}
