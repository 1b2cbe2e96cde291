use std::{
    fmt::Display,
    io::{self, Stdout, Write},
};

use chroma::{
    render::{Badge, Feedback, Outcome, TimerDisplay},
    Renderer, Update,
};
use chroma_api::prelude::*;
use crossterm::{
    cursor::MoveToColumn,
    queue,
    style::{Print, StyledContent, Stylize},
    terminal::{Clear, ClearType},
};
use tracing::debug;

use crate::input::AmountField;

/// Line-oriented renderer. The timer redraws in place on its own line; every
/// other update is printed below it.
pub struct Terminal<W: Write> {
    out: W,
    field: AmountField,
    timer_open: bool,
}

impl Terminal<Stdout> {
    pub fn stdout(field: AmountField) -> Self {
        Self::new(io::stdout(), field)
    }
}

impl<W: Write> Terminal<W> {
    pub fn new(out: W, field: AmountField) -> Self {
        Self {
            out,
            field,
            timer_open: false,
        }
    }

    /// Ends an open timer line.
    pub fn finish(&mut self) -> io::Result<()> {
        if self.timer_open {
            writeln!(self.out)?;
            self.timer_open = false;
        }
        self.out.flush()
    }

    fn line(&mut self, text: impl Display) -> io::Result<()> {
        self.finish()?;
        writeln!(self.out, "{text}")?;
        self.out.flush()
    }

    fn timer(&mut self, display: &TimerDisplay) -> io::Result<()> {
        let text = match display {
            TimerDisplay::Clock(clock) => clock.clone().bold(),
            TimerDisplay::Processing => display.to_string().yellow(),
            TimerDisplay::Unavailable => display.to_string().red(),
        };
        queue!(
            self.out,
            MoveToColumn(0),
            Clear(ClearType::CurrentLine),
            Print(format!("Time left: {text}"))
        )?;
        self.timer_open = true;
        self.out.flush()
    }

    fn draw(&mut self, update: Update) -> io::Result<()> {
        match update {
            Update::Round(id) => self.line(format!("Round #{id}").bold()),
            Update::History(badges) => {
                let history = if badges.is_empty() {
                    "-".to_string()
                } else {
                    badges.iter().map(|b| badge(b).to_string()).collect::<Vec<_>>().join(" ")
                };
                self.line(format!("Recent: {history}"))
            }
            Update::Timer(display) => self.timer(&display),
            Update::Outcome(outcome @ Outcome::Winner { color, .. }) => {
                self.line(paint(color, outcome.to_string()))
            }
            Update::Outcome(outcome) => self.line(outcome.to_string().red()),
            Update::Balance(balance) => self.line(format!("Balance: {balance} Akshu Tokens")),
            // The feedback line that follows says the same.
            Update::Betting(_) => Ok(()),
            Update::AmountField(amount) => {
                self.field.set(amount);
                Ok(())
            }
            Update::Feedback(feedback) => {
                let text = feedback.to_string();
                match feedback {
                    Feedback::Placing(_) => self.line(text.dim()),
                    Feedback::Placed { .. } => self.line(text.green()),
                    Feedback::Invalid(_) => self.line(text.yellow()),
                    Feedback::Rejected(_) | Feedback::Failed => self.line(text.red()),
                }
            }
            Update::SignedOut => {
                self.line("Signed out. Log in again with --username and --password.".red())
            }
        }
    }
}

impl<W: Write> Renderer for Terminal<W> {
    fn render(&mut self, update: Update) {
        if let Err(err) = self.draw(update) {
            debug!(error = %err, "terminal write failed");
        }
    }
}

fn paint(color: Color, text: String) -> StyledContent<String> {
    match color {
        Color::Red => text.red(),
        Color::Green => text.green(),
        Color::Violet => text.magenta(),
    }
}

fn badge(badge: &Badge) -> StyledContent<String> {
    let text = format!(" {} ", badge.round_id);
    match badge.color {
        Color::Red => text.white().on_red(),
        Color::Green => text.black().on_green(),
        Color::Violet => text.white().on_magenta(),
    }
}
