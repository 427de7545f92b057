use crate::{
    AsValue, Checker, ColumnExtractor, CountOptions, Cursor, DeleteOptions, Driver, Error,
    ExecResult, GetOptions, PreconditionError, Preparer, Projection, Result, RowFactory,
    Selector, SqlWriter, UpdateField, check_error, close_query, do_exec, do_query,
    do_query_row, sql_writer::check_upsert_projections, statement::release,
};
use std::slice;

/// Fetches the first entity matching `options`. `Ok(None)` means no row
/// matched, which is not an error.
pub async fn get<P, T, F>(
    preparer: &mut P,
    table: &str,
    options: &GetOptions,
    factory: &F,
    checker: Checker<'_>,
) -> Result<Option<T>>
where
    P: Preparer,
    F: RowFactory<T> + ?Sized,
{
    let query = preparer.driver().sql_writer().write_get(table, options)?;
    let row = do_query_row(preparer, &query)
        .await
        .map_err(|e| check_error(checker, e))?;
    let Some(row) = row else {
        return Ok(None);
    };
    let mut entity = factory.make_empty();
    factory
        .materialize(&row, &mut entity)
        .map_err(|e| check_error(checker, e))?;
    Ok(Some(entity))
}

/// Fetches every entity matching `options`, an empty vector when none does.
pub async fn get_many<P, T, F>(
    preparer: &mut P,
    table: &str,
    options: &GetOptions,
    factory: &F,
    checker: Checker<'_>,
) -> Result<Vec<T>>
where
    P: Preparer,
    F: RowFactory<T> + ?Sized,
{
    let query = preparer.driver().sql_writer().write_get(table, options)?;
    let (mut cursor, statement) = do_query(preparer, &query)
        .await
        .map_err(|e| check_error(checker, e))?;
    let fetched = fetch_all(&mut cursor, factory).await;
    let closed = close_query(cursor, statement).await;
    release(fetched, closed).map_err(|e| check_error(checker, e))
}

async fn fetch_all<C, T, F>(cursor: &mut C, factory: &F) -> Result<Vec<T>>
where
    C: Cursor,
    F: RowFactory<T> + ?Sized,
{
    let mut result = Vec::new();
    while let Some(row) = cursor.next_row().await? {
        let mut entity = factory.make_empty();
        factory.materialize(&row, &mut entity)?;
        result.push(entity);
    }
    Ok(result)
}

pub async fn count<P>(
    preparer: &mut P,
    table: &str,
    options: &CountOptions,
    checker: Checker<'_>,
) -> Result<i64>
where
    P: Preparer,
{
    let query = preparer.driver().sql_writer().write_count(table, options)?;
    let row = do_query_row(preparer, &query)
        .await
        .map_err(|e| check_error(checker, e))?;
    row.and_then(|v| v.values.into_vec().into_iter().next())
        .ok_or_else(|| Error::msg(format!("The query did not return a count:\n{}", query)))
        .and_then(i64::try_from_value)
        .map_err(|e| check_error(checker, e))
}

/// Inserts one entity and returns the identifier generated by the database,
/// 0 when the backend does not expose one.
pub async fn insert<P, T, X>(
    preparer: &mut P,
    table: &str,
    entity: &T,
    extractor: &X,
    checker: Checker<'_>,
) -> Result<i64>
where
    P: Preparer,
    X: ColumnExtractor<T> + ?Sized,
{
    let query = preparer
        .driver()
        .sql_writer()
        .write_insert(table, extractor.extract(entity))?;
    let outcome = do_exec(preparer, &query)
        .await
        .map_err(|e| check_error(checker, e))?;
    inserted_id(&outcome).map_err(|e| check_error(checker, e))
}

/// Inserts all `entities` with a single statement. An empty slice is a no-op
/// that succeeds with 0 and never touches the preparer.
pub async fn insert_many<P, T, X>(
    preparer: &mut P,
    table: &str,
    entities: &[T],
    extractor: &X,
    checker: Checker<'_>,
) -> Result<i64>
where
    P: Preparer,
    X: ColumnExtractor<T> + ?Sized,
{
    if entities.is_empty() {
        return Ok(0);
    }
    let query = preparer
        .driver()
        .sql_writer()
        .write_insert_many(table, entities.iter().map(|v| extractor.extract(v)))?;
    let outcome = do_exec(preparer, &query)
        .await
        .map_err(|e| check_error(checker, e))?;
    inserted_id(&outcome).map_err(|e| check_error(checker, e))
}

fn inserted_id<R: ExecResult>(outcome: &R) -> Result<i64> {
    Ok(outcome.last_insert_id()?.unwrap_or_default())
}

pub async fn upsert<P, T, X>(
    preparer: &mut P,
    table: &str,
    entity: &T,
    extractor: &X,
    update: &[Projection],
    checker: Checker<'_>,
) -> Result<u64>
where
    P: Preparer,
    X: ColumnExtractor<T> + ?Sized,
{
    upsert_many(
        preparer,
        table,
        slice::from_ref(entity),
        extractor,
        update,
        checker,
    )
    .await
}

/// Inserts `entities`, updating the `update` columns of the rows that hit a
/// key conflict. Returns the rows affected as reported by the server.
pub async fn upsert_many<P, T, X>(
    preparer: &mut P,
    table: &str,
    entities: &[T],
    extractor: &X,
    update: &[Projection],
    checker: Checker<'_>,
) -> Result<u64>
where
    P: Preparer,
    X: ColumnExtractor<T> + ?Sized,
{
    if entities.is_empty() {
        return Err(PreconditionError::new("Upsert requires at least one entity").into());
    }
    check_upsert_projections(update)?;
    let query = preparer.driver().sql_writer().write_upsert_many(
        table,
        entities.iter().map(|v| extractor.extract(v)),
        update,
    )?;
    let outcome = do_exec(preparer, &query)
        .await
        .map_err(|e| check_error(checker, e))?;
    outcome.rows_affected().map_err(|e| check_error(checker, e))
}

/// Sets `fields` on the rows matching `selectors`. Nothing to set means
/// nothing to do: 0 rows, no statement.
pub async fn update<P>(
    preparer: &mut P,
    table: &str,
    fields: &[UpdateField],
    selectors: &[Selector],
    checker: Checker<'_>,
) -> Result<u64>
where
    P: Preparer,
{
    if fields.is_empty() {
        return Ok(0);
    }
    let query = preparer
        .driver()
        .sql_writer()
        .write_update(table, fields, selectors)?;
    let outcome = do_exec(preparer, &query)
        .await
        .map_err(|e| check_error(checker, e))?;
    outcome.rows_affected().map_err(|e| check_error(checker, e))
}

pub async fn delete<P>(
    preparer: &mut P,
    table: &str,
    selectors: &[Selector],
    options: &DeleteOptions,
    checker: Checker<'_>,
) -> Result<u64>
where
    P: Preparer,
{
    let query = preparer
        .driver()
        .sql_writer()
        .write_delete(table, selectors, options)?;
    let outcome = do_exec(preparer, &query)
        .await
        .map_err(|e| check_error(checker, e))?;
    outcome.rows_affected().map_err(|e| check_error(checker, e))
}
