use std::borrow::Cow;

#[derive(Default, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    #[default]
    Asc,
    Desc,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Asc => "ASC",
            Direction::Desc => "DESC",
        }
    }
}

#[derive(Default, Clone, Debug, PartialEq, Eq)]
pub struct Order {
    pub table: Cow<'static, str>,
    pub field: Cow<'static, str>,
    pub direction: Direction,
}

impl Order {
    pub fn new(
        table: impl Into<Cow<'static, str>>,
        field: impl Into<Cow<'static, str>>,
        direction: Direction,
    ) -> Self {
        Self {
            table: table.into(),
            field: field.into(),
            direction,
        }
    }
    pub fn asc(field: impl Into<Cow<'static, str>>) -> Self {
        Self::new("", field, Direction::Asc)
    }
    pub fn desc(field: impl Into<Cow<'static, str>>) -> Self {
        Self::new("", field, Direction::Desc)
    }
}

/// Pagination window. A `Page` is always rendered, even with zero values:
/// no paging is expressed by having no `Page` at all.
#[derive(Default, Clone, Copy, Debug, PartialEq, Eq)]
pub struct Page {
    pub offset: u64,
    pub limit: u64,
}

impl Page {
    pub fn new(offset: u64, limit: u64) -> Self {
        Self { offset, limit }
    }
}
