use crate::cli::{
    actions::Action,
    commands::{
        token as token_args, verification as verification_args, ARG_DSN, ARG_MEMORY_STORE,
        ARG_PORT,
    },
};
use crate::token::TokenConfig;
use crate::verification::{VerificationConfig, VerificationFields, DEFAULT_EXPIRES_AFTER_HOURS};
use anyhow::{anyhow, Context, Result};
use chrono_tz::Tz;

pub fn handler(matches: &clap::ArgMatches) -> Result<Action> {
    // Closure to fetch string arguments that always carry a default value
    let string_arg = |name: &str| -> Result<String> {
        matches
            .get_one::<String>(name)
            .cloned()
            .ok_or_else(|| anyhow!("missing required argument: --{name}"))
    };

    let dsn = if matches.get_flag(ARG_MEMORY_STORE) {
        None
    } else {
        Some(string_arg(ARG_DSN)?)
    };

    let verification = VerificationConfig::new()
        .with_expires_after_hours(
            matches
                .get_one::<u32>(verification_args::ARG_EXPIRES_AFTER)
                .copied()
                .unwrap_or(DEFAULT_EXPIRES_AFTER_HOURS),
        )
        .with_timezone(
            matches
                .get_one::<Tz>(verification_args::ARG_TIMEZONE)
                .copied()
                .unwrap_or(Tz::UTC),
        )
        .with_table(string_arg(verification_args::ARG_VERIFICATION_TABLE)?)
        .with_primary_key(string_arg(verification_args::ARG_PRIMARY_KEY)?)
        .with_fields(VerificationFields {
            key: string_arg(verification_args::ARG_VERIFY_KEY_FIELD)?,
            code: string_arg(verification_args::ARG_VERIFY_CODE_FIELD)?,
            timestamp: string_arg(verification_args::ARG_VERIFY_TIME_FIELD)?,
        });

    let auth_header = string_arg(token_args::ARG_AUTH_HEADER)?;
    let token = TokenConfig::new()
        .with_user_model(string_arg(token_args::ARG_USER_MODEL)?)
        .with_token_field(string_arg(token_args::ARG_TOKEN_FIELD)?)
        .with_password_field(string_arg(token_args::ARG_PASSWORD_FIELD)?)
        .with_auth_header(&auth_header)
        .with_context(|| format!("invalid --auth-header: {auth_header}"))?;

    Ok(Action::Server {
        port: matches.get_one::<u16>(ARG_PORT).copied().unwrap_or(8080),
        dsn,
        verification,
        token,
    })
}
