//! Command input
//!
//! The terminal stands in for the search box, the two dropdowns, the back
//! control and card clicks. Each line typed by the user is parsed into an
//! [`Input`]. A reader thread forwards parsed lines to the event loop.

use crate::app::Event;
use crate::catalog::{EpisodeId, ShowId};
use crate::navigation::Action;
use std::io::BufRead;
use std::sync::mpsc::Sender;
use std::thread::{self, JoinHandle};
use thiserror::Error;
use tracing::debug;

/// Help text listing every command
pub const HELP_TEXT: &str = "\
Commands:
  search <text>   filter the current list (no text clears the search)
  show <id>       select a show from the show dropdown
  show            clear the show dropdown
  episode <id>    display a single episode from the episode dropdown
  episode         clear the episode dropdown
  open <n>        click the n-th card on screen
  back            go back to the show list
  help            show this help
  quit            exit";

/// Errors for lines that are not a valid command
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("Unknown command '{0}', type 'help' for a list of commands")]
    UnknownCommand(String),

    #[error("Invalid {what} '{value}'")]
    InvalidNumber { what: &'static str, value: String },

    #[error("Missing argument for '{0}'")]
    MissingArgument(&'static str),
}

/// A parsed command line
#[derive(Debug, Clone, PartialEq)]
pub enum Input {
    /// Forwarded to the navigator as is
    Dispatch(Action),
    /// Click the card at this 1-based position
    Open(usize),
    /// Redraw the current screen
    Redraw,
    Help,
    Quit,
}

/// Parses one line of user input
pub fn parse_input(line: &str) -> Result<Input, InputError> {
    let line = line.trim();
    let (command, argument) = match line.split_once(char::is_whitespace) {
        Some((command, argument)) => (command, argument.trim()),
        None => (line, ""),
    };

    match command.to_lowercase().as_str() {
        "" => Ok(Input::Redraw),
        "search" | "/" => Ok(Input::Dispatch(Action::SearchChanged(argument.to_string()))),
        "show" if argument.is_empty() => Ok(Input::Dispatch(Action::ShowCleared)),
        "show" => {
            let id = parse_number("show id", argument)?;
            Ok(Input::Dispatch(Action::ShowSelected(ShowId(id))))
        }
        "episode" if argument.is_empty() => Ok(Input::Dispatch(Action::EpisodeSelected(None))),
        "episode" => {
            let id = parse_number("episode id", argument)?;
            Ok(Input::Dispatch(Action::EpisodeSelected(Some(EpisodeId(id)))))
        }
        "open" if argument.is_empty() => Err(InputError::MissingArgument("open")),
        "open" => {
            let invalid = || InputError::InvalidNumber {
                what: "card number",
                value: argument.to_string(),
            };
            match parse_number("card number", argument)? {
                0 => Err(invalid()),
                position => usize::try_from(position)
                    .map(Input::Open)
                    .map_err(|_| invalid()),
            }
        }
        "back" => Ok(Input::Dispatch(Action::BackRequested)),
        "help" | "?" => Ok(Input::Help),
        "quit" | "exit" | "q" => Ok(Input::Quit),
        other => Err(InputError::UnknownCommand(other.to_string())),
    }
}

fn parse_number(what: &'static str, value: &str) -> Result<u64, InputError> {
    value.parse().map_err(|_| InputError::InvalidNumber {
        what,
        value: value.to_string(),
    })
}

/// Spawns a thread that reads lines and forwards them as events
///
/// Sends [`Event::InputClosed`] once the reader reaches end of input or fails.
pub fn spawn_reader<R>(reader: R, events: Sender<Event>) -> JoinHandle<()>
where
    R: BufRead + Send + 'static,
{
    thread::spawn(move || {
        for line in reader.lines() {
            let line = match line {
                Ok(line) => line,
                Err(e) => {
                    debug!(error = %e, "stopped reading input");
                    break;
                }
            };

            let event = match parse_input(&line) {
                Ok(input) => Event::Input(input),
                Err(e) => Event::InvalidInput(e),
            };

            if events.send(event).is_err() {
                // The event loop is gone
                return;
            }
        }

        let _ = events.send(Event::InputClosed);
    })
}
