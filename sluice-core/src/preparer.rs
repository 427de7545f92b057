use crate::{Driver, Result, RowLabeled, Value};
use std::future::Future;

/// The minimal capability needed to run a statement: turn SQL text into a
/// prepared [`Statement`]. Both connections and open transactions are
/// preparers.
pub trait Preparer: Send {
    type Driver: Driver;

    fn driver(&self) -> &Self::Driver;

    fn prepare(
        &mut self,
        sql: &str,
    ) -> impl Future<Output = Result<<Self::Driver as Driver>::Statement>> + Send;
}

/// A backend prepared statement. Parameters are bound positionally, in the
/// order of the `?` placeholders.
///
/// A statement owns server side resources until [`Statement::close`] is
/// called, whoever created it is responsible for closing it on every path.
pub trait Statement: Send {
    type Cursor: Cursor;
    type Outcome: ExecResult;

    /// Run the statement and return its first row, `None` when it produced no
    /// rows.
    fn query_row(
        &mut self,
        params: &[Value],
    ) -> impl Future<Output = Result<Option<RowLabeled>>> + Send;

    /// Run the statement and return a cursor over its rows. The cursor does
    /// not borrow the statement, the two are closed independently.
    fn query(&mut self, params: &[Value]) -> impl Future<Output = Result<Self::Cursor>> + Send;

    fn exec(&mut self, params: &[Value]) -> impl Future<Output = Result<Self::Outcome>> + Send;

    fn close(self) -> impl Future<Output = Result<()>> + Send;
}

/// Forward only iterator over the rows of a query.
pub trait Cursor: Send {
    /// Fetch the next row. `Ok(None)` marks the end of the results, an error
    /// means fetching or decoding failed.
    fn next_row(&mut self) -> impl Future<Output = Result<Option<RowLabeled>>> + Send;

    fn close(self) -> impl Future<Output = Result<()>> + Send;
}

/// Outcome of a modify statement (INSERT/UPDATE/DELETE).
pub trait ExecResult: Send {
    /// Identifier generated by the statement. `Ok(None)` when the backend does
    /// not expose one.
    fn last_insert_id(&self) -> Result<Option<i64>>;
    fn rows_affected(&self) -> Result<u64>;
}

/// Statement type produced by a preparer.
pub type StatementOf<P> = <<P as Preparer>::Driver as Driver>::Statement;
/// Cursor type produced by the statements of a preparer.
pub type CursorOf<P> = <StatementOf<P> as Statement>::Cursor;
/// Execution result type produced by the statements of a preparer.
pub type OutcomeOf<P> = <StatementOf<P> as Statement>::Outcome;
