use crate::{SqlWriter, Statement, Transaction};

/// Ties together the types a backend provides.
pub trait Driver: Send + Sync {
    /// Dialect used to translate clauses into SQL for this backend.
    type SqlWriter: SqlWriter;
    type Statement: Statement;
    type Transaction<'c>: Transaction<Driver = Self>;

    const NAME: &'static str;

    fn sql_writer(&self) -> Self::SqlWriter;
}
