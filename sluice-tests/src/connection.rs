use crate::{MockDriver, MockStatement, MockTransaction, Step};
use sluice::{Connection, Error, Preparer, Result};

pub struct MockConnection {
    pub(crate) driver: MockDriver,
}

impl MockConnection {
    pub fn new(driver: MockDriver) -> Self {
        Self { driver }
    }
}

impl Preparer for MockConnection {
    type Driver = MockDriver;

    fn driver(&self) -> &Self::Driver {
        &self.driver
    }

    async fn prepare(&mut self, sql: &str) -> Result<MockStatement> {
        MockStatement::prepare(&self.driver, sql)
    }
}

impl Connection for MockConnection {
    #[allow(refining_impl_trait)]
    async fn begin(&mut self) -> Result<MockTransaction<'_>> {
        let mut state = self.driver.state();
        if let Some(error) = state.take_failure(Step::Begin) {
            return Err(Error::new(error).context("Could not begin the transaction"));
        }
        state.journal.begins += 1;
        drop(state);
        Ok(MockTransaction::new(self))
    }
}
