use crate::{token::TokenConfig, verification::VerificationConfig};

pub mod server;

#[derive(Debug)]
pub enum Action {
    Server {
        port: u16,
        /// `None` runs on the in-memory store.
        dsn: Option<String>,
        verification: VerificationConfig,
        token: TokenConfig,
    },
}
