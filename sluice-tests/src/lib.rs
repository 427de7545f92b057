mod connection;
mod driver;
mod journal;
mod statement;
mod transaction;

pub use connection::*;
pub use driver::*;
pub use journal::*;
pub use statement::*;
pub use transaction::*;

use log::LevelFilter;
use sluice::ServerError;
use std::env;

pub fn init_logs() {
    let mut logger = env_logger::builder();
    logger
        .is_test(true)
        .format_file(true)
        .format_line_number(true);
    if env::var("RUST_LOG").is_err() {
        logger.filter_level(LevelFilter::Warn);
    }
    let _ = logger.try_init();
}

/// A server failure as a MySQL backend would report it.
pub fn server_error(code: u16, message: impl Into<String>) -> ServerError {
    ServerError {
        code,
        state: "HY000".into(),
        message: message.into(),
    }
}
