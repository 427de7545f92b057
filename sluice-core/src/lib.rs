mod as_value;
mod clause;
mod connection;
mod crud;
mod driver;
mod entity;
mod error;
mod preparer;
mod query;
mod sql_writer;
mod statement;
mod transaction;
mod util;
mod value;

pub use ::anyhow::Context;
pub use as_value::*;
pub use clause::*;
pub use connection::*;
pub use crud::*;
pub use driver::*;
pub use entity::*;
pub use error::*;
pub use preparer::*;
pub use query::*;
pub use sql_writer::*;
pub use statement::*;
pub use transaction::*;
pub use util::*;
pub use value::*;
pub use ::futures::future;

pub type Result<T> = anyhow::Result<T>;
pub type Error = anyhow::Error;
