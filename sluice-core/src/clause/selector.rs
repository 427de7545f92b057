use crate::{AsValue, Value};
use std::{
    borrow::Cow,
    fmt::{self, Display},
};

/// Comparison operator of a [`Selector`].
#[derive(Default, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Predicate {
    #[default]
    Eq,
    NotEq,
    Gt,
    Ge,
    Lt,
    Le,
    In,
    NotIn,
}

impl Predicate {
    pub fn as_str(&self) -> &'static str {
        match self {
            Predicate::Eq => "=",
            Predicate::NotEq => "!=",
            Predicate::Gt => ">",
            Predicate::Ge => ">=",
            Predicate::Lt => "<",
            Predicate::Le => "<=",
            Predicate::In => "IN",
            Predicate::NotIn => "NOT IN",
        }
    }

    /// `IN` and `NOT IN`.
    pub fn is_membership(&self) -> bool {
        matches!(self, Predicate::In | Predicate::NotIn)
    }
}

impl Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Right hand side of a [`Selector`], decided when the selector is built.
#[derive(Clone, Debug, PartialEq)]
pub enum SelectorValue {
    Scalar(Value),
    Sequence(Vec<Value>),
}

impl Default for SelectorValue {
    fn default() -> Self {
        SelectorValue::Scalar(Value::Null)
    }
}

impl<T: AsValue> From<T> for SelectorValue {
    fn from(value: T) -> Self {
        SelectorValue::Scalar(value.as_value())
    }
}

impl From<Value> for SelectorValue {
    fn from(value: Value) -> Self {
        SelectorValue::Scalar(value)
    }
}

impl From<&str> for SelectorValue {
    fn from(value: &str) -> Self {
        SelectorValue::Scalar(value.into())
    }
}

impl SelectorValue {
    pub fn sequence<I>(values: I) -> Self
    where
        I: IntoIterator,
        I::Item: AsValue,
    {
        SelectorValue::Sequence(values.into_iter().map(AsValue::as_value).collect())
    }

    pub fn is_null(&self) -> bool {
        matches!(self, SelectorValue::Scalar(v) if v.is_null())
    }
}

/// A single filter condition. A list of selectors is AND-joined into a
/// `WHERE` clause.
#[derive(Default, Clone, Debug, PartialEq)]
pub struct Selector {
    /// Table qualifier, omitted from the SQL when empty.
    pub table: Cow<'static, str>,
    pub field: Cow<'static, str>,
    pub predicate: Predicate,
    pub value: SelectorValue,
}

impl Selector {
    pub fn new(
        table: impl Into<Cow<'static, str>>,
        field: impl Into<Cow<'static, str>>,
        predicate: Predicate,
        value: impl Into<SelectorValue>,
    ) -> Self {
        Self {
            table: table.into(),
            field: field.into(),
            predicate,
            value: value.into(),
        }
    }
    pub fn eq(
        table: impl Into<Cow<'static, str>>,
        field: impl Into<Cow<'static, str>>,
        value: impl Into<Value>,
    ) -> Self {
        Self::new(table, field, Predicate::Eq, value.into())
    }
    pub fn not_eq(
        table: impl Into<Cow<'static, str>>,
        field: impl Into<Cow<'static, str>>,
        value: impl Into<Value>,
    ) -> Self {
        Self::new(table, field, Predicate::NotEq, value.into())
    }
    pub fn gt(
        table: impl Into<Cow<'static, str>>,
        field: impl Into<Cow<'static, str>>,
        value: impl Into<Value>,
    ) -> Self {
        Self::new(table, field, Predicate::Gt, value.into())
    }
    pub fn ge(
        table: impl Into<Cow<'static, str>>,
        field: impl Into<Cow<'static, str>>,
        value: impl Into<Value>,
    ) -> Self {
        Self::new(table, field, Predicate::Ge, value.into())
    }
    pub fn lt(
        table: impl Into<Cow<'static, str>>,
        field: impl Into<Cow<'static, str>>,
        value: impl Into<Value>,
    ) -> Self {
        Self::new(table, field, Predicate::Lt, value.into())
    }
    pub fn le(
        table: impl Into<Cow<'static, str>>,
        field: impl Into<Cow<'static, str>>,
        value: impl Into<Value>,
    ) -> Self {
        Self::new(table, field, Predicate::Le, value.into())
    }
    pub fn is_in<I>(
        table: impl Into<Cow<'static, str>>,
        field: impl Into<Cow<'static, str>>,
        values: I,
    ) -> Self
    where
        I: IntoIterator,
        I::Item: AsValue,
    {
        Self::new(table, field, Predicate::In, SelectorValue::sequence(values))
    }
    pub fn not_in<I>(
        table: impl Into<Cow<'static, str>>,
        field: impl Into<Cow<'static, str>>,
        values: I,
    ) -> Self
    where
        I: IntoIterator,
        I::Item: AsValue,
    {
        Self::new(table, field, Predicate::NotIn, SelectorValue::sequence(values))
    }
}
