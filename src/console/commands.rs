use crate::models::{FilterParseError, MinRating};
use std::str::FromStr;
use thiserror::Error;

/// Errors from parsing a REPL line
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CommandError {
    #[error("Unknown command: {0} (try `help`)")]
    Unknown(String),

    #[error("Missing argument: {0}")]
    MissingArgument(&'static str),

    #[error(transparent)]
    Filter(#[from] FilterParseError),

    #[error("Not a result number: {0}")]
    InvalidIndex(String),
}

/// One line of user input
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Search(String),
    Toggle { category: String, value: String },
    Rating(MinRating),
    Reset,
    /// Open the filter overlay
    Filters,
    Apply,
    Cancel,
    More,
    /// Detail lookup for the n-th visible result (1-based)
    Show(usize),
    Status,
    Help,
    Quit,
    Empty,
}

pub const HELP: &str = "\
Commands:
  search <location>           search restaurants near a location
  toggle <category> <value>   toggle a filter (budget, dietary, cuisines,
                              serviceType, accessibility, operational)
  rating <3.5|4.0|4.5>        set the minimum rating
  reset                       clear all filters
  filters                     open the filter overlay (apply / cancel)
  more                        show the next page of results
  show <n>                    fetch details for result n
  status                      show search state
  quit                        exit";

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (head, rest) = match line.split_once(char::is_whitespace) {
            Some((head, rest)) => (head, rest.trim()),
            None => (line, ""),
        };

        let command = match head.to_lowercase().as_str() {
            "" => Command::Empty,
            // The orchestrator reports blank locations itself
            "search" | "s" => Command::Search(rest.to_string()),
            "toggle" | "t" => {
                let (category, value) = rest
                    .split_once(char::is_whitespace)
                    .ok_or(CommandError::MissingArgument("toggle <category> <value>"))?;
                Command::Toggle {
                    category: category.to_string(),
                    value: value.trim().to_string(),
                }
            }
            "rating" => {
                if rest.is_empty() {
                    return Err(CommandError::MissingArgument("rating <3.5|4.0|4.5>"));
                }
                Command::Rating(rest.parse()?)
            }
            "reset" => Command::Reset,
            "filters" | "f" => Command::Filters,
            "apply" => Command::Apply,
            "cancel" => Command::Cancel,
            "more" | "m" => Command::More,
            "show" => {
                let index: usize = rest
                    .parse()
                    .map_err(|_| CommandError::InvalidIndex(rest.to_string()))?;
                if index == 0 {
                    return Err(CommandError::InvalidIndex(rest.to_string()));
                }
                Command::Show(index)
            }
            "status" => Command::Status,
            "help" | "?" => Command::Help,
            "quit" | "exit" | "q" => Command::Quit,
            other => return Err(CommandError::Unknown(other.to_string())),
        };

        Ok(command)
    }
}
