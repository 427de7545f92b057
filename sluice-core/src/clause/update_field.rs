use crate::Value;
use std::borrow::Cow;

/// One `field = ?` assignment of an `UPDATE`.
#[derive(Default, Clone, Debug, PartialEq)]
pub struct UpdateField {
    pub field: Cow<'static, str>,
    pub value: Value,
}

impl UpdateField {
    pub fn new(field: impl Into<Cow<'static, str>>, value: impl Into<Value>) -> Self {
        Self {
            field: field.into(),
            value: value.into(),
        }
    }
}
