use serde::{Deserialize, Serialize};

use crate::consts::MIN_WAGER;
use crate::error::GameError;

use super::Color;

/// A single bet on the open round. Built client-side, sent once.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Wager {
    /// The color the stake is placed on.
    pub prediction: Color,

    /// The stake, in tokens.
    pub amount: u64,
}

impl Wager {
    /// Validates raw amount-field input against the minimum stake.
    ///
    /// The input must be a base-10 integer (surrounding whitespace allowed) of
    /// at least [`MIN_WAGER`]. Nothing else is accepted.
    pub fn new(prediction: Color, raw_amount: &str) -> Result<Self, GameError> {
        let amount: i128 = raw_amount
            .trim()
            .parse()
            .map_err(|_| GameError::InvalidAmount)?;
        if amount < MIN_WAGER as i128 {
            return Err(GameError::WagerTooSmall);
        }
        let amount = u64::try_from(amount).map_err(|_| GameError::InvalidAmount)?;
        Ok(Self { prediction, amount })
    }

    /// Total returned if the round settles on the predicted color.
    pub fn potential_payout(&self) -> u64 {
        self.prediction.payout(self.amount)
    }
}
