use std::borrow::Cow;

/// A column, optionally qualified by its table.
#[derive(Default, Clone, Debug, PartialEq, Eq)]
pub struct ColumnRef {
    pub table: Cow<'static, str>,
    pub column: Cow<'static, str>,
}

impl ColumnRef {
    pub fn new(
        table: impl Into<Cow<'static, str>>,
        column: impl Into<Cow<'static, str>>,
    ) -> Self {
        Self {
            table: table.into(),
            column: column.into(),
        }
    }
}

/// A selected output column, optionally table qualified and aliased.
#[derive(Default, Clone, Debug, PartialEq, Eq)]
pub struct Projection {
    pub table: Cow<'static, str>,
    pub column: Cow<'static, str>,
    pub alias: Cow<'static, str>,
}

impl Projection {
    pub fn column(column: impl Into<Cow<'static, str>>) -> Self {
        Self {
            column: column.into(),
            ..Default::default()
        }
    }
    pub fn qualified(
        table: impl Into<Cow<'static, str>>,
        column: impl Into<Cow<'static, str>>,
    ) -> Self {
        Self {
            table: table.into(),
            column: column.into(),
            ..Default::default()
        }
    }
    pub fn alias(mut self, alias: impl Into<Cow<'static, str>>) -> Self {
        self.alias = alias.into();
        self
    }
    /// Name of the output column: the alias when present, the column otherwise.
    pub fn name(&self) -> &str {
        if self.alias.is_empty() {
            &self.column
        } else {
            &self.alias
        }
    }
}
