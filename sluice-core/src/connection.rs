use crate::{Driver, Preparer, Result};
use std::future::Future;

/// A live connection. Statements prepared directly on it run outside any
/// transaction.
pub trait Connection: Preparer {
    fn begin(
        &mut self,
    ) -> impl Future<Output = Result<<Self::Driver as Driver>::Transaction<'_>>> + Send;
}
