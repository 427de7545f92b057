use crate::{Journal, MockState, MockStatement, MockTransaction, Step};
use sluice::{Driver, MySQLSqlWriter, RowLabeled, RowsAffected, ServerError};
use std::{
    collections::VecDeque,
    sync::{Arc, Mutex, MutexGuard},
};

/// In-memory driver speaking the MySQL dialect. Result sets, execution
/// outcomes and failures are scripted upfront, every call is recorded in a
/// [`Journal`].
///
/// Clones share the same state: keep one to inspect what a connection did.
#[derive(Clone, Default)]
pub struct MockDriver {
    state: Arc<Mutex<MockState>>,
}

impl MockDriver {
    pub fn new() -> Self {
        Default::default()
    }

    pub(crate) fn state(&self) -> MutexGuard<'_, MockState> {
        self.state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Queues the rows returned by the next query.
    pub fn push_rows(&self, rows: VecDeque<RowLabeled>) -> &Self {
        self.state().results.push_back(rows);
        self
    }

    /// Queues the outcome of the next exec.
    pub fn push_outcome(&self, rows_affected: u64, last_affected_id: Option<i64>) -> &Self {
        self.state().outcomes.push_back(RowsAffected {
            rows_affected,
            last_affected_id,
        });
        self
    }

    /// Makes the next call reaching `step` fail with `error`.
    pub fn fail(&self, step: Step, error: ServerError) -> &Self {
        self.state().failures.push((step, error));
        self
    }

    pub fn journal(&self) -> Journal {
        self.state().journal.clone()
    }
}

impl Driver for MockDriver {
    type SqlWriter = MySQLSqlWriter;
    type Statement = MockStatement;
    type Transaction<'c> = MockTransaction<'c>;

    const NAME: &'static str = "mock";

    fn sql_writer(&self) -> Self::SqlWriter {
        MySQLSqlWriter::new()
    }
}
