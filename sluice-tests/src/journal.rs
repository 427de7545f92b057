use sluice::{Query, RowLabeled, RowNames, RowsAffected, ServerError, Value};
use std::collections::VecDeque;

/// Point of the driver where a scripted failure can be injected.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Step {
    Prepare,
    Exec,
    Query,
    NextRow,
    CloseCursor,
    CloseStatement,
    Begin,
    Commit,
    Rollback,
}

/// Everything the mock driver has been asked to do so far.
#[derive(Default, Clone, Debug, PartialEq)]
pub struct Journal {
    /// SQL text of every prepared statement, in order.
    pub prepared: Vec<String>,
    /// Every statement run (exec, query or single row query) with the
    /// parameters bound to it.
    pub executed: Vec<Query>,
    pub statements_closed: usize,
    pub cursors_closed: usize,
    pub begins: usize,
    pub commits: usize,
    pub rollbacks: usize,
}

impl Journal {
    /// Statements prepared and not closed.
    pub fn statements_open(&self) -> usize {
        self.prepared.len() - self.statements_closed
    }
}

#[derive(Default, Debug)]
pub(crate) struct MockState {
    pub(crate) journal: Journal,
    pub(crate) results: VecDeque<VecDeque<RowLabeled>>,
    pub(crate) outcomes: VecDeque<RowsAffected>,
    pub(crate) failures: Vec<(Step, ServerError)>,
}

impl MockState {
    /// Consumes the first failure scripted for `step`, if any.
    pub(crate) fn take_failure(&mut self, step: Step) -> Option<ServerError> {
        let position = self.failures.iter().position(|(s, _)| *s == step)?;
        let (_, error) = self.failures.remove(position);
        log::debug!("Mock failure injected at {:?}: {}", step, error);
        Some(error)
    }
}

/// Builds the rows of one scripted result set.
pub fn rows<const N: usize>(labels: [&str; N], values: Vec<[Value; N]>) -> VecDeque<RowLabeled> {
    let labels: RowNames = labels.iter().map(|v| v.to_string()).collect();
    values
        .into_iter()
        .map(|v| RowLabeled::new(labels.clone(), v.into()))
        .collect()
}
