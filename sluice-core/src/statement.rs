use crate::{
    Context, Cursor, CursorOf, OutcomeOf, Preparer, Query, Result, RowLabeled, Statement,
    StatementOf,
};

/// Prepares `query`, executes it and closes the statement on every path.
pub async fn do_exec<P: Preparer>(preparer: &mut P, query: &Query) -> Result<OutcomeOf<P>> {
    log::trace!("{}", query);
    let context = || format!("While executing the query:\n{}", query);
    let mut statement = preparer.prepare(&query.sql).await.with_context(context)?;
    let result = statement.exec(&query.params).await;
    let closed = statement.close().await;
    release(result, closed).with_context(context)
}

/// Prepares `query` and runs it, handing both the cursor and the statement to
/// the caller, who must close them (see [`close_query`]).
///
/// If the query fails the statement is closed here, a failure to close it is
/// folded into the returned error.
pub async fn do_query<P: Preparer>(
    preparer: &mut P,
    query: &Query,
) -> Result<(CursorOf<P>, StatementOf<P>)> {
    log::trace!("{}", query);
    let context = || format!("While running the query:\n{}", query);
    let mut statement = preparer.prepare(&query.sql).await.with_context(context)?;
    match statement.query(&query.params).await {
        Ok(cursor) => Ok((cursor, statement)),
        Err(error) => {
            let closed = statement.close().await;
            release(Err(error), closed).with_context(context)
        }
    }
}

/// Single row path: prepares `query`, fetches its first row and closes the
/// statement on every path.
pub async fn do_query_row<P: Preparer>(
    preparer: &mut P,
    query: &Query,
) -> Result<Option<RowLabeled>> {
    log::trace!("{}", query);
    let context = || format!("While running the query:\n{}", query);
    let mut statement = preparer.prepare(&query.sql).await.with_context(context)?;
    let result = statement.query_row(&query.params).await;
    let closed = statement.close().await;
    release(result, closed).with_context(context)
}

/// Closes the handles returned by [`do_query`], the cursor first. Both are
/// closed even if the first close fails.
pub async fn close_query<C: Cursor, S: Statement>(cursor: C, statement: S) -> Result<()> {
    let cursor = cursor.close().await;
    let statement = statement.close().await;
    match (cursor, statement) {
        (Ok(()), Ok(())) => Ok(()),
        (Err(e), Ok(())) => Err(e.context("Could not close the cursor")),
        (Ok(()), Err(e)) => Err(e.context("Could not close the statement")),
        (Err(cursor), Err(statement)) => Err(cursor.context(format!(
            "Could not close the cursor, closing the statement also failed: {statement:#}"
        ))),
    }
}

/// Merges the outcome of an operation with the outcome of releasing its
/// resources. A release failure after a success does not undo the success and
/// is only logged, after a failure both errors are reported together.
pub(crate) fn release<T>(result: Result<T>, closed: Result<()>) -> Result<T> {
    match (result, closed) {
        (result, Ok(())) => result,
        (Ok(value), Err(e)) => {
            log::warn!("{:#}", e.context("Could not close the statement"));
            Ok(value)
        }
        (Err(error), Err(e)) => Err(error.context(format!(
            "Closing the statement also failed: {e:#}"
        ))),
    }
}
