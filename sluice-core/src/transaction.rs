use crate::{Error, Preparer, Result};
use futures::{FutureExt, future::BoxFuture};
use std::{
    any::Any,
    future::Future,
    panic::{self, AssertUnwindSafe},
};

/// An open transaction. It is a [`Preparer`] itself, statements prepared on it
/// run inside the transaction.
pub trait Transaction: Preparer {
    fn commit(self) -> impl Future<Output = Result<()>> + Send;
    fn rollback(self) -> impl Future<Output = Result<()>> + Send;
}

/// Runs `work` against an open transaction and finalizes it.
///
/// - `work` succeeds: commit. A commit failure discards the result and is
///   returned instead.
/// - `work` fails: rollback. A rollback failure is returned in place of the
///   original error, which is logged.
/// - `work` panics: rollback, then the panic is resumed. The transaction is
///   never left open on a panicking path.
///
/// The transaction is never opened here, only finalized.
///
/// ```rust,ignore
/// let id = execute_in_transaction(transaction, |tx| {
///     async move {
///         let id = insert(tx, "user", &user, &codec, None).await?;
///         update(tx, "stats", &fields, &selectors, None).await?;
///         Ok(id)
///     }
///     .boxed()
/// })
/// .await?;
/// ```
pub async fn execute_in_transaction<T, R, F>(mut transaction: T, work: F) -> Result<R>
where
    T: Transaction,
    F: for<'t> FnOnce(&'t mut T) -> BoxFuture<'t, Result<R>>,
{
    // The closure is called inside the guarded future, it may panic before
    // returning its own future.
    let tx = &mut transaction;
    let outcome = AssertUnwindSafe(async move { work(tx).await })
        .catch_unwind()
        .await;
    let (result, panic) = match outcome {
        Ok(result) => (result, None),
        Err(payload) => (Err(panic_error(payload.as_ref())), Some(payload)),
    };
    match result {
        Ok(value) => match transaction.commit().await {
            Ok(()) => Ok(value),
            Err(error) => Err(error.context("Could not commit the transaction")),
        },
        Err(error) => {
            let rollback = transaction.rollback().await;
            if let Some(payload) = panic {
                if let Err(e) = rollback {
                    log::error!("{:#}", e.context("Could not roll back after a panic"));
                }
                panic::resume_unwind(payload);
            }
            match rollback {
                Ok(()) => Err(error),
                Err(e) => {
                    log::warn!("{:#}", error.context("Discarded because the rollback failed"));
                    Err(e.context("Could not roll back the transaction"))
                }
            }
        }
    }
}

fn panic_error(payload: &(dyn Any + Send)) -> Error {
    let message = if let Some(v) = payload.downcast_ref::<&str>() {
        *v
    } else if let Some(v) = payload.downcast_ref::<String>() {
        v.as_str()
    } else {
        "unknown panic payload"
    };
    Error::msg(format!("Panic inside the transaction: {message}"))
}
