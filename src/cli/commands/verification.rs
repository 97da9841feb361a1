use chrono_tz::Tz;
use clap::{builder::ValueParser, Arg, Command};

pub const ARG_EXPIRES_AFTER: &str = "expires-after";
pub const ARG_TIMEZONE: &str = "timezone";
pub const ARG_VERIFICATION_TABLE: &str = "verification-table";
pub const ARG_PRIMARY_KEY: &str = "primary-key";
pub const ARG_VERIFY_KEY_FIELD: &str = "verify-key-field";
pub const ARG_VERIFY_CODE_FIELD: &str = "verify-code-field";
pub const ARG_VERIFY_TIME_FIELD: &str = "verify-time-field";

#[must_use]
pub fn validator_timezone() -> ValueParser {
    ValueParser::from(move |name: &str| -> std::result::Result<Tz, String> {
        name.parse::<Tz>()
            .map_err(|_| format!("unknown timezone: {name}"))
    })
}

#[must_use]
pub fn with_args(command: Command) -> Command {
    command
        .arg(
            Arg::new(ARG_EXPIRES_AFTER)
                .long(ARG_EXPIRES_AFTER)
                .help("Hours a verification key/code pair stays valid")
                .default_value("48")
                .env("VERIKEY_EXPIRES_AFTER")
                .value_parser(clap::value_parser!(u32)),
        )
        .arg(
            Arg::new(ARG_TIMEZONE)
                .long(ARG_TIMEZONE)
                .help("IANA timezone of stored verification timestamps, example: Europe/Madrid")
                .default_value("UTC")
                .env("VERIKEY_TIMEZONE")
                .value_parser(validator_timezone()),
        )
        .arg(
            Arg::new(ARG_VERIFICATION_TABLE)
                .long(ARG_VERIFICATION_TABLE)
                .help("Table holding the verification columns")
                .default_value("users")
                .env("VERIKEY_VERIFICATION_TABLE"),
        )
        .arg(
            Arg::new(ARG_PRIMARY_KEY)
                .long(ARG_PRIMARY_KEY)
                .help("Primary key column of the verification table")
                .default_value("id")
                .env("VERIKEY_PRIMARY_KEY"),
        )
        .arg(
            Arg::new(ARG_VERIFY_KEY_FIELD)
                .long(ARG_VERIFY_KEY_FIELD)
                .help("Verification key column")
                .default_value("verify_key")
                .env("VERIKEY_VERIFY_KEY_FIELD"),
        )
        .arg(
            Arg::new(ARG_VERIFY_CODE_FIELD)
                .long(ARG_VERIFY_CODE_FIELD)
                .help("Verification code column")
                .default_value("verify_code")
                .env("VERIKEY_VERIFY_CODE_FIELD"),
        )
        .arg(
            Arg::new(ARG_VERIFY_TIME_FIELD)
                .long(ARG_VERIFY_TIME_FIELD)
                .help("Verification timestamp column")
                .default_value("verify_time")
                .env("VERIKEY_VERIFY_TIME_FIELD"),
        )
}
