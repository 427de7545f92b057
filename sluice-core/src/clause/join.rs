use crate::ColumnRef;
use std::borrow::Cow;

#[derive(Default, Clone, Copy, Debug, PartialEq, Eq)]
pub enum JoinType {
    #[default]
    Inner,
    Left,
    Right,
    Full,
}

impl JoinType {
    pub fn as_str(&self) -> &'static str {
        match self {
            JoinType::Inner => "INNER",
            JoinType::Left => "LEFT",
            JoinType::Right => "RIGHT",
            JoinType::Full => "FULL",
        }
    }
}

/// `<join> JOIN <table> ON <left> = <right>`
#[derive(Default, Clone, Debug, PartialEq, Eq)]
pub struct Join {
    pub join: JoinType,
    pub table: Cow<'static, str>,
    pub left: ColumnRef,
    pub right: ColumnRef,
}

impl Join {
    pub fn new(
        join: JoinType,
        table: impl Into<Cow<'static, str>>,
        left: ColumnRef,
        right: ColumnRef,
    ) -> Self {
        Self {
            join,
            table: table.into(),
            left,
            right,
        }
    }
    pub fn inner(table: impl Into<Cow<'static, str>>, left: ColumnRef, right: ColumnRef) -> Self {
        Self::new(JoinType::Inner, table, left, right)
    }
    pub fn left(table: impl Into<Cow<'static, str>>, left: ColumnRef, right: ColumnRef) -> Self {
        Self::new(JoinType::Left, table, left, right)
    }
}
