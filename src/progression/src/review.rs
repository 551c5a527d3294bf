//! The inbound review event.

use error::EngineError;
use serde::{Deserialize, Serialize};
use std::time::SystemTime;

/// The ease button pressed on the reviewer side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Ease {
    Again,
    Hard,
    Good,
    Easy,
}

impl Ease {
    /// Good and Easy count as correct answers.
    pub fn is_passing(&self) -> bool {
        matches!(self, Ease::Good | Ease::Easy)
    }

    pub fn as_number(&self) -> u8 {
        match self {
            Ease::Again => 1,
            Ease::Hard => 2,
            Ease::Good => 3,
            Ease::Easy => 4,
        }
    }
}

impl TryFrom<u8> for Ease {
    type Error = EngineError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Ease::Again),
            2 => Ok(Ease::Hard),
            3 => Ok(Ease::Good),
            4 => Ok(Ease::Easy),
            other => Err(EngineError::Validation(format!(
                "ease must be 1..=4, got {other}"
            ))),
        }
    }
}

/// One completed review, emitted by the external reviewer. Immutable,
/// consumed exactly once.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewResult {
    pub card_id: String,
    pub deck_id: String,
    pub is_correct: bool,
    pub ease: Ease,
    pub timestamp: SystemTime,
}

impl ReviewResult {
    /// Build an event with correctness derived from the ease button.
    pub fn new(
        card_id: impl Into<String>,
        deck_id: impl Into<String>,
        ease: Ease,
        timestamp: SystemTime,
    ) -> Self {
        Self {
            card_id: card_id.into(),
            deck_id: deck_id.into(),
            is_correct: ease.is_passing(),
            ease,
            timestamp,
        }
    }
}
