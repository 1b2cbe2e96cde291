//! Line input for `chroma play`.

use std::{
    io::{self, BufRead},
    sync::{Arc, Mutex, PoisonError},
    thread,
};

use chroma::Command;
use chroma_api::prelude::*;
use tokio::sync::mpsc;
use tracing::debug;

pub fn help() -> String {
    let colors: Vec<&str> = Color::ALL.iter().map(Color::as_str).collect();
    let bet = format!("{} [amount]", colors.join("|"));
    format!(
        "Commands:\n  \
         {bet:<28}place a wager (amount defaults to the last one typed)\n  \
         {:<28}poll the round status now\n  \
         {:<28}show this text\n  \
         {:<28}leave",
        "refresh", "help", "quit"
    )
}

/// The amount field of the bet form, shared by the input reader and the
/// terminal renderer.
#[derive(Clone, Debug)]
pub struct AmountField(Arc<Mutex<String>>);

impl Default for AmountField {
    fn default() -> Self {
        Self(Arc::new(Mutex::new(DEFAULT_WAGER.to_string())))
    }
}

impl AmountField {
    pub fn get(&self) -> String {
        self.0.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    pub fn set(&self, amount: impl Into<String>) {
        *self.0.lock().unwrap_or_else(PoisonError::into_inner) = amount.into();
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Input {
    Command(Command),
    Help,
    Quit,
    Unknown(String),
}

/// Parses one line. Blank lines yield `None`.
///
/// A typed amount is kept in the field even if it turns out to be invalid,
/// so the next bare color retries it.
pub fn parse(line: &str, field: &AmountField) -> Option<Input> {
    let mut words = line.split_whitespace();
    let first = words.next()?;

    let input = match first.to_ascii_lowercase().as_str() {
        "quit" | "exit" => Input::Quit,
        "refresh" => Input::Command(Command::Refresh),
        "help" | "?" => Input::Help,
        word => match word.parse::<Color>() {
            Ok(prediction) => {
                let amount = match words.next() {
                    Some(amount) => {
                        field.set(amount);
                        amount.to_string()
                    }
                    None => field.get(),
                };
                Input::Command(Command::PlaceBet { prediction, amount })
            }
            Err(_) => Input::Unknown(first.to_string()),
        },
    };
    Some(input)
}

/// Reads stdin on a plain thread and forwards commands. The sender is dropped
/// on `quit` or end of input, which ends the coordinator loop.
pub fn spawn_reader(field: AmountField, commands: mpsc::Sender<Command>) {
    thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            let Ok(line) = line else { break };
            match parse(&line, &field) {
                None => {}
                Some(Input::Quit) => break,
                Some(Input::Help) => println!("{}", help()),
                Some(Input::Unknown(word)) => println!("Unknown input {word:?}. Type help for commands."),
                Some(Input::Command(command)) => {
                    if commands.blocking_send(command).is_err() {
                        break;
                    }
                }
            }
        }
        debug!("stdin reader finished");
    });
}
