use crate::{
    AsValue, CountOptions, Error, GetOptions, Preparer, Projection, Result, RowLabeled, Selector,
    Value, count, delete, get, get_many, insert, insert_many, upsert_many,
};
use std::{borrow::Cow, future::Future, marker::PhantomData};

/// Column names of a row to write, with the values aligned by index.
pub type ColumnValues = (Vec<Cow<'static, str>>, Vec<Value>);

/// Builds entities out of fetched rows.
pub trait RowFactory<T>: Send + Sync {
    /// A fresh entity, ready to be filled by [`RowFactory::materialize`].
    fn make_empty(&self) -> T;
    fn materialize(&self, row: &RowLabeled, target: &mut T) -> Result<()>;
}

impl<T, E, M> RowFactory<T> for (E, M)
where
    E: Fn() -> T + Send + Sync,
    M: Fn(&RowLabeled, &mut T) -> Result<()> + Send + Sync,
{
    fn make_empty(&self) -> T {
        (self.0)()
    }
    fn materialize(&self, row: &RowLabeled, target: &mut T) -> Result<()> {
        (self.1)(row, target)
    }
}

/// Turns an entity into the columns and values to write.
pub trait ColumnExtractor<T>: Send + Sync {
    fn extract(&self, entity: &T) -> ColumnValues;
}

impl<T, F> ColumnExtractor<T> for F
where
    F: Fn(&T) -> ColumnValues + Send + Sync,
{
    fn extract(&self, entity: &T) -> ColumnValues {
        self(entity)
    }
}

/// A type mapped to a table. Usually derived with `#[derive(Entity)]`.
///
/// The provided methods run the generic CRUD functions against
/// [`Entity::table_name`], without an error checker.
pub trait Entity: Sized + Send + Sync {
    fn table_name() -> &'static str;
    fn column_names() -> &'static [&'static str];
    fn make_empty() -> Self;
    /// Overwrites the mapped fields with the cells of `row`. A mapped column
    /// missing from the row is an error.
    fn materialize(&mut self, row: &RowLabeled) -> Result<()>;
    fn extract(&self) -> ColumnValues;

    fn find_one<P: Preparer>(
        preparer: &mut P,
        options: &GetOptions,
    ) -> impl Future<Output = Result<Option<Self>>> + Send {
        async move {
            let codec = EntityCodec::<Self>::new();
            get(preparer, Self::table_name(), options, &codec, None).await
        }
    }

    fn find_many<P: Preparer>(
        preparer: &mut P,
        options: &GetOptions,
    ) -> impl Future<Output = Result<Vec<Self>>> + Send {
        async move {
            let codec = EntityCodec::<Self>::new();
            get_many(preparer, Self::table_name(), options, &codec, None).await
        }
    }

    fn count<P: Preparer>(
        preparer: &mut P,
        options: &CountOptions,
    ) -> impl Future<Output = Result<i64>> + Send {
        count(preparer, Self::table_name(), options, None)
    }

    fn insert_one<P: Preparer>(
        &self,
        preparer: &mut P,
    ) -> impl Future<Output = Result<i64>> + Send {
        async move {
            let codec = EntityCodec::<Self>::new();
            insert(preparer, Self::table_name(), self, &codec, None).await
        }
    }

    fn insert_many<P: Preparer>(
        preparer: &mut P,
        entities: &[Self],
    ) -> impl Future<Output = Result<i64>> + Send {
        async move {
            let codec = EntityCodec::<Self>::new();
            insert_many(preparer, Self::table_name(), entities, &codec, None).await
        }
    }

    fn upsert_many<P: Preparer>(
        preparer: &mut P,
        entities: &[Self],
        update: &[Projection],
    ) -> impl Future<Output = Result<u64>> + Send {
        async move {
            let codec = EntityCodec::<Self>::new();
            upsert_many(preparer, Self::table_name(), entities, &codec, update, None).await
        }
    }

    fn delete_where<P: Preparer>(
        preparer: &mut P,
        selectors: &[Selector],
    ) -> impl Future<Output = Result<u64>> + Send {
        async move {
            delete(
                preparer,
                Self::table_name(),
                selectors,
                &Default::default(),
                None,
            )
            .await
        }
    }
}

/// Adapter exposing any [`Entity`] through the [`RowFactory`] and
/// [`ColumnExtractor`] seams.
pub struct EntityCodec<E>(PhantomData<fn() -> E>);

impl<E> EntityCodec<E> {
    pub const fn new() -> Self {
        Self(PhantomData)
    }
}

impl<E> Default for EntityCodec<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> Clone for EntityCodec<E> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<E> Copy for EntityCodec<E> {}

impl<E: Entity> RowFactory<E> for EntityCodec<E> {
    fn make_empty(&self) -> E {
        E::make_empty()
    }
    fn materialize(&self, row: &RowLabeled, target: &mut E) -> Result<()> {
        target.materialize(row)
    }
}

impl<E: Entity> ColumnExtractor<E> for EntityCodec<E> {
    fn extract(&self, entity: &E) -> ColumnValues {
        entity.extract()
    }
}

/// Reads the cell `column` of `row`, as the derived [`Entity::materialize`] does.
pub fn column_value<T: AsValue>(row: &RowLabeled, column: &str) -> Result<T> {
    let Some(value) = row.get_column(column) else {
        return Err(Error::msg(format!(
            "Column `{column}` is missing from the row {:?}",
            row.names()
        )));
    };
    T::try_from_value(value.clone())
        .map_err(|e| e.context(format!("While reading column `{column}`")))
}
