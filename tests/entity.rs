#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use sluice::{
        ColumnExtractor, CountOptions, Entity, EntityCodec, GetOptions, Projection, RowFactory,
        RowLabeled, Selector, Value,
    };
    use sluice_tests::{MockConnection, MockDriver, init_logs, rows};
    use std::str::FromStr;
    use time::{Date, Month};
    use uuid::Uuid;

    #[derive(Entity, Default, Debug, Clone, PartialEq)]
    struct Customer {
        id: i64,
        #[sluice(name = "full_name")]
        name: String,
        email: Option<String>,
        balance: Decimal,
        #[sluice(skip)]
        cached_score: u32,
    }

    #[derive(Entity, Default, Debug, Clone, PartialEq)]
    #[sluice(name = "audit_log")]
    struct AuditEntry {
        _id: Uuid,
        happened_on: Option<Date>,
    }

    #[derive(Entity, Default, Debug, Clone, PartialEq)]
    struct OrderLine {
        order_id: i32,
        quantity: u16,
    }

    fn customer() -> Customer {
        Customer {
            id: 9,
            name: "Dana".into(),
            email: None,
            balance: Decimal::from_str("12.50").unwrap(),
            cached_score: 77,
        }
    }

    #[test]
    fn table_and_column_names() {
        assert_eq!(Customer::table_name(), "customer");
        assert_eq!(
            Customer::column_names(),
            ["id", "full_name", "email", "balance"]
        );
        assert_eq!(AuditEntry::table_name(), "audit_log");
        assert_eq!(AuditEntry::column_names(), ["id", "happened_on"]);
        assert_eq!(OrderLine::table_name(), "order_line");
    }

    #[test]
    fn extract_skips_ignored_fields() {
        let (columns, values) = customer().extract();
        assert_eq!(columns, ["id", "full_name", "email", "balance"]);
        assert_eq!(
            values,
            [
                Value::Int64(Some(9)),
                Value::Varchar(Some("Dana".into())),
                Value::Varchar(None),
                Value::Decimal(Some(Decimal::from_str("12.50").unwrap())),
            ]
        );
    }

    #[test]
    fn materialize_from_row() {
        let row = rows(
            ["balance", "id", "email", "full_name", "extra"],
            vec![[
                Value::Decimal(Some(Decimal::from(3))),
                Value::Int32(Some(4)),
                Value::Varchar(Some("e@x.io".into())),
                Value::Varchar(Some("Eve".into())),
                Value::Boolean(Some(true)),
            ]],
        )
        .pop_front()
        .unwrap();
        let codec = EntityCodec::<Customer>::new();
        let mut customer = codec.make_empty();
        customer.cached_score = 5;
        codec.materialize(&row, &mut customer).unwrap();
        assert_eq!(
            customer,
            Customer {
                id: 4,
                name: "Eve".into(),
                email: Some("e@x.io".into()),
                balance: Decimal::from(3),
                cached_score: 5,
            }
        );
        let (columns, _) = codec.extract(&customer);
        assert_eq!(columns.len(), 4);
    }

    #[test]
    fn materialize_requires_every_column() {
        let row: RowLabeled = rows(["id"], vec![[Value::Int64(Some(1))]])
            .pop_front()
            .unwrap();
        let mut customer = Customer::make_empty();
        let error = customer.materialize(&row).unwrap_err();
        assert!(format!("{error:#}").contains("full_name"), "{error:#}");
    }

    #[test]
    fn materialize_converts_values() {
        let id = Uuid::from_str("6f1b0f5a-3c1e-4b8e-9a41-0c9d2f1e7b11").unwrap();
        let row = rows(
            ["id", "happened_on"],
            vec![[
                Value::Varchar(Some(id.to_string())),
                Value::Date(Some(Date::from_calendar_date(2025, Month::March, 14).unwrap())),
            ]],
        )
        .pop_front()
        .unwrap();
        let mut entry = AuditEntry::make_empty();
        entry.materialize(&row).unwrap();
        assert_eq!(entry._id, id);
        assert_eq!(
            entry.happened_on,
            Some(Date::from_calendar_date(2025, Month::March, 14).unwrap())
        );

        let row = rows(["order_id", "quantity"], vec![[70000i64.into(), 1i64.into()]])
            .pop_front()
            .unwrap();
        let mut line = OrderLine::make_empty();
        line.materialize(&row).unwrap();
        assert_eq!(line.order_id, 70000);

        let row = rows(["order_id", "quantity"], vec![[1i64.into(), 70000i64.into()]])
            .pop_front()
            .unwrap();
        assert!(line.materialize(&row).is_err());
    }

    #[tokio::test]
    async fn entity_operations() {
        init_logs();
        let driver = MockDriver::new();
        let mut connection = MockConnection::new(driver.clone());

        driver.push_outcome(1, Some(9));
        let id = customer().insert_one(&mut connection).await.unwrap();
        assert_eq!(id, 9);

        driver.push_rows(rows(
            ["id", "full_name", "email", "balance"],
            vec![customer().extract().1.try_into().unwrap()],
        ));
        let found = Customer::find_one(
            &mut connection,
            &GetOptions::new().selector(Selector::eq("", "id", 9i64)),
        )
        .await
        .unwrap();
        assert_eq!(
            found,
            Some(Customer {
                cached_score: 0,
                ..customer()
            })
        );

        driver.push_rows(rows(["COUNT(*)"], vec![[Value::Int64(Some(1))]]));
        let total = Customer::count(&mut connection, &CountOptions::new())
            .await
            .unwrap();
        assert_eq!(total, 1);

        driver.push_outcome(2, None);
        let affected =
            Customer::upsert_many(&mut connection, &[customer()], &[Projection::column("balance")])
                .await
                .unwrap();
        assert_eq!(affected, 2);

        driver.push_outcome(1, None);
        let deleted = Customer::delete_where(&mut connection, &[Selector::eq("", "id", 9i64)])
            .await
            .unwrap();
        assert_eq!(deleted, 1);

        let journal = driver.journal();
        assert_eq!(
            journal.prepared,
            [
                "INSERT INTO `customer` (`id`,`full_name`,`email`,`balance`) VALUES (?,?,?,?)",
                "SELECT * FROM `customer` WHERE `id` = ?",
                "SELECT COUNT(*) FROM `customer`",
                "INSERT INTO `customer` (`id`,`full_name`,`email`,`balance`) VALUES (?,?,?,?) \
                ON DUPLICATE KEY UPDATE `balance` = VALUES(`balance`)",
                "DELETE FROM `customer` WHERE `id` = ?",
            ]
        );
        assert_eq!(journal.statements_open(), 0);
    }

    #[tokio::test]
    async fn find_many_and_insert_many() {
        init_logs();
        let driver = MockDriver::new();
        let mut connection = MockConnection::new(driver.clone());
        let lines = vec![
            OrderLine {
                order_id: 1,
                quantity: 2,
            },
            OrderLine {
                order_id: 1,
                quantity: 5,
            },
        ];
        driver.push_outcome(2, Some(1));
        OrderLine::insert_many(&mut connection, &lines).await.unwrap();
        assert_eq!(
            OrderLine::insert_many(&mut connection, &[]).await.unwrap(),
            0
        );

        driver.push_rows(rows(
            ["order_id", "quantity"],
            lines
                .iter()
                .map(|v| v.extract().1.try_into().unwrap())
                .collect(),
        ));
        let fetched = OrderLine::find_many(&mut connection, &GetOptions::new())
            .await
            .unwrap();
        assert_eq!(fetched, lines);
        assert_eq!(driver.journal().prepared.len(), 2);
    }
}
