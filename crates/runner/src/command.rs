use marquee_core::{DEFAULT_QUANTITY, EventId};
use thiserror::Error;

pub const USAGE: &str = "\
usage: marquee events
       marquee buy <event-id> [qty] [--wait]";

#[derive(Error, Debug, PartialEq, Eq)]
pub enum CommandError {
    #[error("missing command")]
    Missing,
    #[error("unknown command '{0}'")]
    Unknown(String),
    #[error("buy needs an event id")]
    MissingEventId,
    #[error("invalid {what} '{value}'")]
    InvalidNumber { what: &'static str, value: String },
    #[error("unexpected argument '{0}'")]
    Unexpected(String),
}

/// What the user asked for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Load and render the inventory snapshot set
    Events,
    /// Send a purchase intent; `wait` asks for the engine's verdict
    Buy {
        event_id: EventId,
        qty: u32,
        wait: bool,
    },
    Help,
}

impl Command {
    /// Parse arguments, program name excluded
    pub fn parse<I, S>(args: I) -> Result<Self, CommandError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut args = args.into_iter().map(Into::into);
        let command = args.next().ok_or(CommandError::Missing)?;

        match command.as_str() {
            "events" => match args.next() {
                None => Ok(Command::Events),
                Some(extra) => Err(CommandError::Unexpected(extra)),
            },
            "buy" => parse_buy(args),
            "help" | "-h" | "--help" => Ok(Command::Help),
            _ => Err(CommandError::Unknown(command)),
        }
    }
}

fn parse_buy(args: impl Iterator<Item = String>) -> Result<Command, CommandError> {
    let mut event_id = None;
    let mut qty = None;
    let mut wait = false;

    for arg in args {
        if arg == "--wait" {
            wait = true;
        } else if event_id.is_none() {
            event_id = Some(parse_number::<u64>("event id", &arg)?);
        } else if qty.is_none() {
            qty = Some(parse_number::<u32>("quantity", &arg)?);
        } else {
            return Err(CommandError::Unexpected(arg));
        }
    }

    Ok(Command::Buy {
        event_id: EventId(event_id.ok_or(CommandError::MissingEventId)?),
        qty: qty.unwrap_or(DEFAULT_QUANTITY),
        wait,
    })
}

fn parse_number<T: std::str::FromStr>(what: &'static str, value: &str) -> Result<T, CommandError> {
    value.parse().map_err(|_| CommandError::InvalidNumber {
        what,
        value: value.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_events() {
        assert_eq!(Command::parse(["events"]), Ok(Command::Events));
        assert_eq!(
            Command::parse(["events", "now"]),
            Err(CommandError::Unexpected("now".into()))
        );
    }

    #[test]
    fn test_parse_buy_defaults() {
        assert_eq!(
            Command::parse(["buy", "42"]),
            Ok(Command::Buy {
                event_id: EventId(42),
                qty: 1,
                wait: false
            })
        );
    }

    #[test]
    fn test_parse_buy_with_qty_and_wait() {
        assert_eq!(
            Command::parse(["buy", "--wait", "7", "3"]),
            Ok(Command::Buy {
                event_id: EventId(7),
                qty: 3,
                wait: true
            })
        );
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(Command::parse(Vec::<String>::new()), Err(CommandError::Missing));
        assert_eq!(Command::parse(["buy"]), Err(CommandError::MissingEventId));
        assert!(matches!(
            Command::parse(["buy", "forty-two"]),
            Err(CommandError::InvalidNumber { what: "event id", .. })
        ));
        assert_eq!(
            Command::parse(["sell", "1"]),
            Err(CommandError::Unknown("sell".into()))
        );
    }
}
