use clap::{Arg, Command};

pub const ARG_USER_MODEL: &str = "user-model";
pub const ARG_TOKEN_FIELD: &str = "token-field";
pub const ARG_PASSWORD_FIELD: &str = "password-field";
pub const ARG_AUTH_HEADER: &str = "auth-header";

#[must_use]
pub fn with_args(command: Command) -> Command {
    command
        .arg(
            Arg::new(ARG_USER_MODEL)
                .long(ARG_USER_MODEL)
                .help("Table holding authenticatable records")
                .default_value("users")
                .env("VERIKEY_USER_MODEL"),
        )
        .arg(
            Arg::new(ARG_TOKEN_FIELD)
                .long(ARG_TOKEN_FIELD)
                .help("Token column")
                .default_value("token")
                .env("VERIKEY_TOKEN_FIELD"),
        )
        .arg(
            Arg::new(ARG_PASSWORD_FIELD)
                .long(ARG_PASSWORD_FIELD)
                .help("Column removed from every authenticated identity")
                .default_value("password")
                .env("VERIKEY_PASSWORD_FIELD"),
        )
        .arg(
            Arg::new(ARG_AUTH_HEADER)
                .long(ARG_AUTH_HEADER)
                .help("Request header carrying the base64-encoded token")
                .default_value("Authorization")
                .env("VERIKEY_AUTH_HEADER"),
        )
}
