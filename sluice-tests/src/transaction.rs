use crate::{MockConnection, MockDriver, MockStatement, Step};
use sluice::{Error, Preparer, Result, Transaction};

pub struct MockTransaction<'c> {
    connection: &'c mut MockConnection,
}

impl<'c> MockTransaction<'c> {
    pub(crate) fn new(connection: &'c mut MockConnection) -> Self {
        Self { connection }
    }

    fn finish(self, step: Step) -> Result<()> {
        let mut state = self.connection.driver.state();
        if let Some(error) = state.take_failure(step) {
            return Err(Error::new(error));
        }
        match step {
            Step::Commit => state.journal.commits += 1,
            _ => state.journal.rollbacks += 1,
        }
        Ok(())
    }
}

impl Preparer for MockTransaction<'_> {
    type Driver = MockDriver;

    fn driver(&self) -> &Self::Driver {
        &self.connection.driver
    }

    async fn prepare(&mut self, sql: &str) -> Result<MockStatement> {
        MockStatement::prepare(&self.connection.driver, sql)
    }
}

impl Transaction for MockTransaction<'_> {
    async fn commit(self) -> Result<()> {
        self.finish(Step::Commit)
    }

    async fn rollback(self) -> Result<()> {
        self.finish(Step::Rollback)
    }
}
