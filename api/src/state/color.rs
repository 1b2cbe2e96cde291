use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::consts::{RED_GREEN_PAYOUT, VIOLET_PAYOUT};
use crate::error::GameError;

/// The three outcomes a round can settle on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    Red,
    Green,
    Violet,
}

impl Color {
    pub const ALL: [Color; 3] = [Color::Red, Color::Green, Color::Violet];

    pub fn as_str(&self) -> &'static str {
        match self {
            Color::Red => "red",
            Color::Green => "green",
            Color::Violet => "violet",
        }
    }

    /// Style class of the history badge for this color.
    pub fn badge_class(&self) -> &'static str {
        match self {
            Color::Red => "badge-red",
            Color::Green => "badge-green",
            Color::Violet => "badge-violet",
        }
    }

    /// Multiple of the stake returned when a wager on this color wins.
    pub fn payout_multiplier(&self) -> u64 {
        match self {
            Color::Red | Color::Green => RED_GREEN_PAYOUT,
            Color::Violet => VIOLET_PAYOUT,
        }
    }

    /// Total returned for a winning wager of `amount` (stake included).
    pub fn payout(&self, amount: u64) -> u64 {
        amount.saturating_mul(self.payout_multiplier())
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Color {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "red" | "r" => Ok(Color::Red),
            "green" | "g" => Ok(Color::Green),
            "violet" | "v" => Ok(Color::Violet),
            _ => Err(GameError::UnknownColor),
        }
    }
}
