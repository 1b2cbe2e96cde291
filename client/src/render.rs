//! The rendering seam. The coordinator never draws; it emits [`Update`]s.

use std::fmt;

use chroma_api::prelude::*;

/// Render model of one history entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Badge {
    pub round_id: u64,
    pub color: Color,
    pub class: &'static str,
}

impl From<&PastResult> for Badge {
    fn from(result: &PastResult) -> Self {
        Self {
            round_id: result.round_id,
            color: result.color,
            class: result.color.badge_class(),
        }
    }
}

/// Maps the server history to badges, keeping server order. At most
/// [`HISTORY_LIMIT`] are shown.
pub fn badges(results: &[PastResult]) -> Vec<Badge> {
    results.iter().take(HISTORY_LIMIT).map(Badge::from).collect()
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TimerDisplay {
    /// `MM:SS`
    Clock(String),
    /// The round is being settled.
    Processing,
    /// The last status poll failed.
    Unavailable,
}

impl fmt::Display for TimerDisplay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimerDisplay::Clock(clock) => f.write_str(clock),
            TimerDisplay::Processing => f.write_str("Processing..."),
            TimerDisplay::Unavailable => f.write_str("Error"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    Winner { round_id: Option<u64>, color: Color },
    Failed,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Winner {
                round_id: Some(id),
                color,
            } => write!(f, "Round #{id} result: {}", color.as_str().to_uppercase()),
            Outcome::Winner { round_id: None, color } => {
                write!(f, "Result: {}", color.as_str().to_uppercase())
            }
            Outcome::Failed => f.write_str("Error processing round result."),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Feedback {
    Placing(Wager),
    Placed { wager: Wager, new_balance: u64 },
    /// Refused before any request was made.
    Invalid(GameError),
    /// Refused by the server; the message is shown as sent.
    Rejected(String),
    Failed,
}

impl fmt::Display for Feedback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Feedback::Placing(wager) => {
                write!(f, "Placing {} tokens on {}...", wager.amount, wager.prediction)
            }
            Feedback::Placed { wager, .. } => write!(
                f,
                "Bet of {} tokens on {} placed. Pays {} if it wins.",
                wager.amount,
                wager.prediction,
                wager.potential_payout()
            ),
            Feedback::Invalid(err) => write!(f, "{err}"),
            Feedback::Rejected(message) => f.write_str(message),
            Feedback::Failed => f.write_str("Server Error. Please try again later."),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Update {
    Round(u64),
    History(Vec<Badge>),
    Timer(TimerDisplay),
    Outcome(Outcome),
    Balance(u64),
    /// Whether the prediction controls accept input.
    Betting(bool),
    /// New content of the amount field.
    AmountField(String),
    Feedback(Feedback),
    SignedOut,
}

pub trait Renderer {
    fn render(&mut self, update: Update);
}

impl<R: Renderer + ?Sized> Renderer for &mut R {
    fn render(&mut self, update: Update) {
        (**self).render(update)
    }
}

impl Renderer for Vec<Update> {
    fn render(&mut self, update: Update) {
        self.push(update);
    }
}
