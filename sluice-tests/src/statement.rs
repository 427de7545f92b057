use crate::{MockDriver, Step};
use sluice::{Cursor, Error, Query, Result, RowLabeled, RowsAffected, Statement, Value};
use std::collections::VecDeque;

pub struct MockStatement {
    driver: MockDriver,
    sql: String,
}

impl MockStatement {
    pub(crate) fn prepare(driver: &MockDriver, sql: &str) -> Result<Self> {
        let mut state = driver.state();
        if let Some(error) = state.take_failure(Step::Prepare) {
            return Err(Error::new(error));
        }
        state.journal.prepared.push(sql.to_string());
        Ok(Self {
            driver: driver.clone(),
            sql: sql.to_string(),
        })
    }

    /// Records the execution and hands back the next scripted result set.
    fn run(&self, step: Step, params: &[Value]) -> Result<VecDeque<RowLabeled>> {
        let mut state = self.driver.state();
        state
            .journal
            .executed
            .push(Query::new(self.sql.clone(), params.to_vec()));
        if let Some(error) = state.take_failure(step) {
            return Err(Error::new(error));
        }
        Ok(state.results.pop_front().unwrap_or_default())
    }
}

impl Statement for MockStatement {
    type Cursor = MockCursor;
    type Outcome = RowsAffected;

    async fn query_row(&mut self, params: &[Value]) -> Result<Option<RowLabeled>> {
        Ok(self.run(Step::Query, params)?.pop_front())
    }

    async fn query(&mut self, params: &[Value]) -> Result<MockCursor> {
        let rows = self.run(Step::Query, params)?;
        Ok(MockCursor {
            driver: self.driver.clone(),
            rows,
        })
    }

    async fn exec(&mut self, params: &[Value]) -> Result<RowsAffected> {
        let mut state = self.driver.state();
        state
            .journal
            .executed
            .push(Query::new(self.sql.clone(), params.to_vec()));
        if let Some(error) = state.take_failure(Step::Exec) {
            return Err(Error::new(error));
        }
        Ok(state.outcomes.pop_front().unwrap_or_default())
    }

    async fn close(self) -> Result<()> {
        let mut state = self.driver.state();
        state.journal.statements_closed += 1;
        match state.take_failure(Step::CloseStatement) {
            Some(error) => Err(Error::new(error)),
            None => Ok(()),
        }
    }
}

pub struct MockCursor {
    driver: MockDriver,
    rows: VecDeque<RowLabeled>,
}

impl Cursor for MockCursor {
    async fn next_row(&mut self) -> Result<Option<RowLabeled>> {
        if let Some(error) = self.driver.state().take_failure(Step::NextRow) {
            return Err(Error::new(error));
        }
        Ok(self.rows.pop_front())
    }

    async fn close(self) -> Result<()> {
        let mut state = self.driver.state();
        state.journal.cursors_closed += 1;
        match state.take_failure(Step::CloseCursor) {
            Some(error) => Err(Error::new(error)),
            None => Ok(()),
        }
    }
}
