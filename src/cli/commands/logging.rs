use clap::{builder::ValueParser, Arg, ArgAction, Command};

pub const ARG_VERBOSITY: &str = "verbosity";

/// Level names in verbosity order; the index is the `-v` count.
const LEVELS: [&str; 5] = ["error", "warn", "info", "debug", "trace"];

/// Accepts a level name or its index in [`LEVELS`].
#[must_use]
pub fn validator_log_level() -> ValueParser {
    ValueParser::from(|level: &str| -> std::result::Result<u8, String> {
        let index = match level.parse::<usize>() {
            Ok(index) => Some(index).filter(|index| *index < LEVELS.len()),
            Err(_) => LEVELS
                .iter()
                .position(|name| name.eq_ignore_ascii_case(level)),
        };

        index
            .and_then(|index| u8::try_from(index).ok())
            .ok_or_else(|| {
                format!(
                    "invalid log level {level:?}, expected 0-4 or one of: {}",
                    LEVELS.join(", ")
                )
            })
    })
}

#[must_use]
pub fn with_args(command: Command) -> Command {
    command.arg(
        Arg::new(ARG_VERBOSITY)
            .short('v')
            .long("verbose")
            .help("Verbosity level: ERROR, WARN, INFO, DEBUG, TRACE (default: ERROR)")
            .env("VERIKEY_LOG_LEVEL")
            .global(true)
            .action(ArgAction::Count)
            .value_parser(validator_log_level()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(level: &str) -> Result<u8, clap::Error> {
        Command::new("verikey")
            .arg(
                Arg::new(ARG_VERBOSITY)
                    .long("level")
                    .value_parser(validator_log_level()),
            )
            .try_get_matches_from(["verikey", "--level", level])
            .map(|matches| matches.get_one::<u8>(ARG_VERBOSITY).copied().unwrap_or(u8::MAX))
    }

    #[test]
    fn accepts_names_and_indexes() {
        assert_eq!(parse("DEBUG").ok(), Some(3));
        assert_eq!(parse("warn").ok(), Some(1));
        assert_eq!(parse("0").ok(), Some(0));
        assert_eq!(parse("4").ok(), Some(4));
    }

    #[test]
    fn rejects_out_of_range_and_unknown() {
        for level in ["5", "255", "-1", "verbose", ""] {
            assert!(parse(level).is_err(), "{level}");
        }
    }
}
