#[cfg(test)]
mod tests {
    use futures::FutureExt;
    use sluice::{
        Connection, DbError, Error, MySQLErrorChecker, Selector, UpdateField, Value,
        execute_in_transaction, update,
    };
    use sluice_tests::{MockConnection, MockDriver, Step, init_logs, server_error};
    use std::panic::AssertUnwindSafe;

    fn setup() -> (MockDriver, MockConnection) {
        init_logs();
        let driver = MockDriver::new();
        let connection = MockConnection::new(driver.clone());
        (driver, connection)
    }

    fn deactivate(id: i64) -> (Vec<UpdateField>, Vec<Selector>) {
        (
            vec![UpdateField::new("active", false)],
            vec![Selector::eq("", "id", id)],
        )
    }

    #[tokio::test]
    async fn commit_on_success() {
        let (driver, mut connection) = setup();
        driver.push_outcome(1, None).push_outcome(1, None);
        let transaction = connection.begin().await.unwrap();
        let affected = execute_in_transaction(transaction, |tx| {
            async move {
                let mut total = 0;
                for id in [1, 2] {
                    let (fields, selectors) = deactivate(id);
                    total += update(tx, "user", &fields, &selectors, None).await?;
                }
                Ok::<_, Error>(total)
            }
            .boxed()
        })
        .await
        .unwrap();
        assert_eq!(affected, 2);
        let journal = driver.journal();
        assert_eq!(journal.begins, 1);
        assert_eq!(journal.commits, 1);
        assert_eq!(journal.rollbacks, 0);
        assert_eq!(journal.executed.len(), 2);
        assert_eq!(
            journal.executed[1].params,
            [Value::Boolean(Some(false)), Value::Int64(Some(2))]
        );
        assert_eq!(journal.statements_open(), 0);
    }

    #[tokio::test]
    async fn rollback_on_failure() {
        let (driver, mut connection) = setup();
        driver
            .push_outcome(1, None)
            .fail(Step::Exec, server_error(1062, "Duplicate entry"));
        let transaction = connection.begin().await.unwrap();
        let error = execute_in_transaction(transaction, |tx| {
            async move {
                let checker = MySQLErrorChecker;
                let mut total = 0;
                for id in [1, 2] {
                    let (fields, selectors) = deactivate(id);
                    total += update(tx, "user", &fields, &selectors, Some(&checker)).await?;
                }
                Ok::<_, Error>(total)
            }
            .boxed()
        })
        .await
        .unwrap_err();
        assert!(matches!(
            error.downcast_ref::<DbError>(),
            Some(DbError::DuplicateKey(..))
        ));
        let journal = driver.journal();
        assert_eq!(journal.commits, 0);
        assert_eq!(journal.rollbacks, 1);
        assert_eq!(journal.statements_open(), 0);
    }

    #[tokio::test]
    async fn commit_failure_is_returned() {
        let (driver, mut connection) = setup();
        driver.fail(Step::Commit, server_error(2013, "Lost connection"));
        let transaction = connection.begin().await.unwrap();
        let error = execute_in_transaction(transaction, |_| async move { Ok(5) }.boxed())
            .await
            .unwrap_err();
        assert!(format!("{error:#}").contains("Lost connection"));
        let journal = driver.journal();
        assert_eq!(journal.commits, 0);
        assert_eq!(journal.rollbacks, 0);
    }

    #[tokio::test]
    async fn rollback_failure_replaces_the_error() {
        let (driver, mut connection) = setup();
        driver.fail(Step::Rollback, server_error(2013, "Lost connection"));
        let transaction = connection.begin().await.unwrap();
        let error = execute_in_transaction(transaction, |_| {
            async move { Err::<(), _>(Error::msg("Business rule violated")) }.boxed()
        })
        .await
        .unwrap_err();
        let message = format!("{error:#}");
        assert!(message.contains("Lost connection"), "{message}");
        assert!(!message.contains("Business rule violated"), "{message}");
    }

    #[tokio::test]
    async fn panic_rolls_back_and_resumes() {
        let (driver, mut connection) = setup();
        driver.push_outcome(1, None);
        let transaction = connection.begin().await.unwrap();
        let outcome = AssertUnwindSafe(execute_in_transaction(transaction, |tx| {
            async move {
                let (fields, selectors) = deactivate(1);
                update(tx, "user", &fields, &selectors, None).await?;
                if fields.len() == 1 {
                    panic!("Invariant broken");
                }
                Ok::<_, Error>(())
            }
            .boxed()
        }))
        .catch_unwind()
        .await;
        let payload = outcome.expect_err("The panic must reach the caller");
        assert_eq!(
            payload.downcast_ref::<&str>(),
            Some(&"Invariant broken")
        );
        let journal = driver.journal();
        assert_eq!(journal.commits, 0);
        assert_eq!(journal.rollbacks, 1);
        assert_eq!(journal.statements_open(), 0);
    }

    #[tokio::test]
    async fn panic_before_the_future_rolls_back() {
        let (driver, mut connection) = setup();
        let ids: Vec<i64> = Vec::new();
        let transaction = connection.begin().await.unwrap();
        let outcome = AssertUnwindSafe(execute_in_transaction(transaction, |_| {
            let first = ids[0];
            async move { Ok::<_, Error>(first) }.boxed()
        }))
        .catch_unwind()
        .await;
        assert!(outcome.is_err(), "The panic must reach the caller");
        let journal = driver.journal();
        assert_eq!(journal.commits, 0);
        assert_eq!(journal.rollbacks, 1);
    }

    #[tokio::test]
    async fn panic_survives_a_failed_rollback() {
        let (driver, mut connection) = setup();
        driver.fail(Step::Rollback, server_error(2013, "Lost connection"));
        let transaction = connection.begin().await.unwrap();
        let outcome = AssertUnwindSafe(execute_in_transaction(transaction, |_| {
            async move {
                if driver.journal().begins == 1 {
                    panic!("{}", String::from("Formatted panic"));
                }
                Ok(())
            }
            .boxed()
        }))
        .catch_unwind()
        .await;
        let payload = outcome.expect_err("The panic must reach the caller");
        assert_eq!(
            payload.downcast_ref::<String>().map(String::as_str),
            Some("Formatted panic")
        );
    }

    #[tokio::test]
    async fn begin_failure() {
        let (driver, mut connection) = setup();
        driver.fail(Step::Begin, server_error(1040, "Too many connections"));
        assert!(connection.begin().await.is_err());
        assert_eq!(driver.journal().begins, 0);
    }
}
