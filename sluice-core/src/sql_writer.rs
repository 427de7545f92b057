use crate::{
    ColumnValues, CountOptions, DeleteOptions, GetOptions, Join, Order, Page, PreconditionError,
    Predicate, Projection, Query, Result, Selector, SelectorValue, UpdateField, Value,
    separated_by,
};
use std::{borrow::Cow, fmt::Write};

/// Translates clause descriptions into SQL text plus positional parameters.
///
/// Every method is pure: identical inputs produce byte-identical SQL and
/// parameters. The provided methods implement the MySQL flavor (backtick
/// quoted identifiers, `?` placeholders, `ON DUPLICATE KEY UPDATE`), another
/// dialect overrides the hooks it needs.
///
/// Sections whose source list is empty are omitted entirely, so no dangling
/// `WHERE` or `ORDER BY` is ever produced.
pub trait SqlWriter {
    fn write_escaped(&self, out: &mut String, value: &str, search: char, replace: &str) {
        let mut position = 0;
        for (i, c) in value.char_indices() {
            if c == search {
                out.push_str(&value[position..i]);
                out.push_str(replace);
                position = i + c.len_utf8();
            }
        }
        out.push_str(&value[position..]);
    }

    fn write_identifier_quoted(&self, out: &mut String, value: &str) {
        out.push('`');
        self.write_escaped(out, value, '`', "``");
        out.push('`');
    }

    /// `` `table`.`column` ``, or just `` `column` `` when the table is empty.
    fn write_column_ref(&self, out: &mut String, table: &str, column: &str) {
        if !table.is_empty() {
            self.write_identifier_quoted(out, table);
            out.push('.');
        }
        if column == "*" {
            out.push('*');
        } else {
            self.write_identifier_quoted(out, column);
        }
    }

    fn write_placeholder(&self, out: &mut String, params: &mut Vec<Value>, value: Value) {
        out.push('?');
        params.push(value);
    }

    /// `(?,?,...)` binding `values` in order.
    fn write_values_tuple(&self, out: &mut String, params: &mut Vec<Value>, values: Vec<Value>) {
        out.push('(');
        separated_by(
            out,
            values,
            |out, v| self.write_placeholder(out, params, v),
            ",",
        );
        out.push(')');
    }

    fn write_projection(&self, out: &mut String, projection: &Projection) {
        self.write_column_ref(out, &projection.table, &projection.column);
        if !projection.alias.is_empty() {
            out.push_str(" AS ");
            self.write_identifier_quoted(out, &projection.alias);
        }
    }

    fn write_projections(&self, out: &mut String, projections: &[Projection]) {
        if projections.is_empty() {
            out.push('*');
            return;
        }
        separated_by(
            out,
            projections,
            |out, v| self.write_projection(out, v),
            ", ",
        );
    }

    fn write_join(&self, out: &mut String, join: &Join) {
        out.push_str(join.join.as_str());
        out.push_str(" JOIN ");
        self.write_identifier_quoted(out, &join.table);
        out.push_str(" ON ");
        self.write_column_ref(out, &join.left.table, &join.left.column);
        out.push_str(" = ");
        self.write_column_ref(out, &join.right.table, &join.right.column);
    }

    fn write_joins(&self, out: &mut String, joins: &[Join]) {
        for join in joins {
            out.push(' ');
            self.write_join(out, join);
        }
    }

    /// Renders one condition:
    /// - `IN`/`NOT IN` over a sequence gets one placeholder per element, a
    ///   scalar degrades to a single element list;
    /// - `=`/`!=` against NULL becomes `IS NULL`/`IS NOT NULL` with no parameter;
    /// - anything else is `column <predicate> ?`.
    fn write_selector(
        &self,
        out: &mut String,
        params: &mut Vec<Value>,
        selector: &Selector,
    ) -> Result<()> {
        let predicate = selector.predicate;
        match &selector.value {
            SelectorValue::Sequence(values) if predicate.is_membership() => {
                if values.is_empty() {
                    out.push_str(if predicate == Predicate::In {
                        "1 = 0"
                    } else {
                        "1 = 1"
                    });
                    return Ok(());
                }
                self.write_column_ref(out, &selector.table, &selector.field);
                out.push(' ');
                out.push_str(predicate.as_str());
                out.push(' ');
                self.write_values_tuple(out, params, values.clone());
            }
            SelectorValue::Scalar(value) if predicate.is_membership() => {
                self.write_column_ref(out, &selector.table, &selector.field);
                out.push(' ');
                out.push_str(predicate.as_str());
                out.push(' ');
                self.write_values_tuple(out, params, vec![value.clone()]);
            }
            SelectorValue::Scalar(value)
                if value.is_null() && matches!(predicate, Predicate::Eq | Predicate::NotEq) =>
            {
                self.write_column_ref(out, &selector.table, &selector.field);
                out.push_str(if predicate == Predicate::Eq {
                    " IS NULL"
                } else {
                    " IS NOT NULL"
                });
            }
            SelectorValue::Scalar(value) => {
                self.write_column_ref(out, &selector.table, &selector.field);
                out.push(' ');
                out.push_str(predicate.as_str());
                out.push(' ');
                self.write_placeholder(out, params, value.clone());
            }
            SelectorValue::Sequence(values) => {
                return Err(PreconditionError(
                    format!(
                        "Predicate `{}` on `{}` cannot be applied to a sequence of {} values",
                        predicate,
                        selector.field,
                        values.len()
                    )
                    .into(),
                )
                .into());
            }
        }
        Ok(())
    }

    /// ` WHERE a AND b ...`, nothing when `selectors` is empty.
    fn write_where(
        &self,
        out: &mut String,
        params: &mut Vec<Value>,
        selectors: &[Selector],
    ) -> Result<()> {
        for (i, selector) in selectors.iter().enumerate() {
            out.push_str(if i == 0 { " WHERE " } else { " AND " });
            self.write_selector(out, params, selector)?;
        }
        Ok(())
    }

    fn write_order(&self, out: &mut String, order: &Order) {
        self.write_column_ref(out, &order.table, &order.field);
        out.push(' ');
        out.push_str(order.direction.as_str());
    }

    fn write_order_by(&self, out: &mut String, orders: &[Order]) {
        if orders.is_empty() {
            return;
        }
        out.push_str(" ORDER BY ");
        separated_by(out, orders, |out, v| self.write_order(out, v), ", ");
    }

    fn write_page(&self, out: &mut String, page: &Page) {
        let _ = write!(out, " LIMIT {} OFFSET {}", page.limit, page.offset);
    }

    fn write_lock(&self, out: &mut String) {
        out.push_str(" FOR UPDATE");
    }

    /// ` ON DUPLICATE KEY UPDATE `c` = VALUES(`c`), ...` for each projection column.
    fn write_upsert_fragment(&self, out: &mut String, update: &[Projection]) {
        out.push_str(" ON DUPLICATE KEY UPDATE ");
        separated_by(
            out,
            update,
            |out, v| {
                self.write_identifier_quoted(out, &v.column);
                out.push_str(" = VALUES(");
                self.write_identifier_quoted(out, &v.column);
                out.push(')');
            },
            ", ",
        );
    }

    /// `SELECT <projections|*> FROM <table> [joins] [WHERE] [ORDER BY] [LIMIT/OFFSET] [FOR UPDATE]`
    fn write_get(&self, table: &str, options: &GetOptions) -> Result<Query> {
        let mut out = String::with_capacity(128);
        let mut params = Vec::new();
        out.push_str("SELECT ");
        self.write_projections(&mut out, &options.projections);
        out.push_str(" FROM ");
        self.write_identifier_quoted(&mut out, table);
        self.write_joins(&mut out, &options.joins);
        self.write_where(&mut out, &mut params, &options.selectors)?;
        self.write_order_by(&mut out, &options.orders);
        if let Some(page) = &options.page {
            self.write_page(&mut out, page);
        }
        if options.lock {
            self.write_lock(&mut out);
        }
        Ok(Query::new(out, params))
    }

    /// `SELECT COUNT(*) FROM <table> [joins] [WHERE]`
    fn write_count(&self, table: &str, options: &CountOptions) -> Result<Query> {
        let mut out = String::with_capacity(64);
        let mut params = Vec::new();
        out.push_str("SELECT COUNT(*) FROM ");
        self.write_identifier_quoted(&mut out, table);
        self.write_joins(&mut out, &options.joins);
        self.write_where(&mut out, &mut params, &options.selectors)?;
        Ok(Query::new(out, params))
    }

    /// `INSERT INTO <table> (<columns>) VALUES (?,...)`
    fn write_insert(&self, table: &str, row: ColumnValues) -> Result<Query> {
        self.write_insert_many(table, [row])
    }

    /// Multi row insert. The column list comes from the first row, every row
    /// must carry the same columns. Parameters are all the values of the first
    /// row, then all the values of the second one and so on.
    fn write_insert_many<I>(&self, table: &str, rows: I) -> Result<Query>
    where
        I: IntoIterator<Item = ColumnValues>,
    {
        let mut out = String::with_capacity(128);
        let mut params = Vec::new();
        let mut rows = rows.into_iter();
        let Some((columns, values)) = rows.next() else {
            return Err(PreconditionError::new("Cannot insert an empty list of rows").into());
        };
        if columns.is_empty() {
            return Err(PreconditionError::new("Cannot insert a row without columns").into());
        }
        check_row_shape(&columns, 0, &columns, &values)?;
        out.push_str("INSERT INTO ");
        self.write_identifier_quoted(&mut out, table);
        out.push_str(" (");
        separated_by(
            &mut out,
            columns.iter(),
            |out, v| self.write_identifier_quoted(out, v),
            ",",
        );
        out.push_str(") VALUES ");
        self.write_values_tuple(&mut out, &mut params, values);
        for (i, (row_columns, values)) in rows.enumerate() {
            check_row_shape(&columns, i + 1, &row_columns, &values)?;
            out.push(',');
            self.write_values_tuple(&mut out, &mut params, values);
        }
        Ok(Query::new(out, params))
    }

    /// `UPDATE <table> SET f = ?, ... [WHERE]`, SET values come first in the
    /// parameters, then the WHERE ones.
    fn write_update(
        &self,
        table: &str,
        fields: &[UpdateField],
        selectors: &[Selector],
    ) -> Result<Query> {
        if fields.is_empty() {
            return Err(PreconditionError::new("Cannot update without fields to set").into());
        }
        let mut out = String::with_capacity(128);
        let mut params = Vec::new();
        out.push_str("UPDATE ");
        self.write_identifier_quoted(&mut out, table);
        out.push_str(" SET ");
        separated_by(
            &mut out,
            fields,
            |out, v| {
                out.push_str(&v.field);
                out.push_str(" = ");
                self.write_placeholder(out, &mut params, v.value.clone());
            },
            ", ",
        );
        self.write_where(&mut out, &mut params, selectors)?;
        Ok(Query::new(out, params))
    }

    /// `DELETE FROM <table> [WHERE] [ORDER BY] [LIMIT n]`
    fn write_delete(
        &self,
        table: &str,
        selectors: &[Selector],
        options: &DeleteOptions,
    ) -> Result<Query> {
        let mut out = String::with_capacity(64);
        let mut params = Vec::new();
        out.push_str("DELETE FROM ");
        self.write_identifier_quoted(&mut out, table);
        self.write_where(&mut out, &mut params, selectors)?;
        self.write_order_by(&mut out, &options.orders);
        if let Some(limit) = options.limit {
            let _ = write!(out, " LIMIT {}", limit);
        }
        Ok(Query::new(out, params))
    }

    /// Multi row insert followed by the upsert fragment for `update` columns.
    fn write_upsert_many<I>(&self, table: &str, rows: I, update: &[Projection]) -> Result<Query>
    where
        I: IntoIterator<Item = ColumnValues>,
    {
        check_upsert_projections(update)?;
        let mut query = self.write_insert_many(table, rows)?;
        self.write_upsert_fragment(&mut query.sql, update);
        Ok(query)
    }
}

fn check_row_shape(
    expected: &[Cow<'static, str>],
    index: usize,
    columns: &[Cow<'static, str>],
    values: &[Value],
) -> Result<()> {
    if columns != expected {
        return Err(PreconditionError(
            format!(
                "Row {index} has columns {columns:?}, expected the ones of the first row {expected:?}"
            )
            .into(),
        )
        .into());
    }
    if values.len() != columns.len() {
        return Err(PreconditionError(
            format!(
                "Row {index} has {} values for {} columns",
                values.len(),
                columns.len()
            )
            .into(),
        )
        .into());
    }
    Ok(())
}

/// An upsert needs at least one column to update, the first one must name its
/// target and every one must carry the column it assigns.
pub(crate) fn check_upsert_projections(update: &[Projection]) -> Result<()> {
    let Some(first) = update.first() else {
        return Err(PreconditionError::new("Upsert requires at least one update projection").into());
    };
    if first.name().is_empty() {
        return Err(PreconditionError::new("The first upsert projection must have a name").into());
    }
    if let Some(i) = update.iter().position(|v| v.column.is_empty()) {
        return Err(PreconditionError::new(format!(
            "Upsert projection {i} has an empty column"
        ))
        .into());
    }
    Ok(())
}

/// The MySQL dialect, all the provided [`SqlWriter`] methods.
#[derive(Default, Clone, Copy, Debug)]
pub struct MySQLSqlWriter;

impl MySQLSqlWriter {
    pub const fn new() -> Self {
        Self
    }
}

impl SqlWriter for MySQLSqlWriter {}
