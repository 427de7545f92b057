use crate::decode_column::{ColumnMetadata, decode_column};
use convert_case::{Case, Casing};
use quote::ToTokens;
use syn::{Fields, ItemStruct, LitStr, parse::ParseBuffer};

pub(crate) struct TableMetadata {
    pub(crate) name: String,
    pub(crate) columns: Vec<ColumnMetadata>,
    pub(crate) item: ItemStruct,
}

impl TableMetadata {
    /// Columns read from and written to the database, in declaration order.
    pub(crate) fn mapped(&self) -> impl Iterator<Item = &ColumnMetadata> + Clone {
        self.columns.iter().filter(|c| !c.skip)
    }
}

pub(crate) fn decode_table(item: ItemStruct) -> TableMetadata {
    let Fields::Named(..) = item.fields else {
        panic!("Entity can be derived only on structs with named fields");
    };
    let columns: Vec<_> = item.fields.iter().map(decode_column).collect();
    let mut name = item.ident.to_string().to_case(Case::Snake);
    if name.starts_with('_') {
        name.remove(0);
    }
    for attr in &item.attrs {
        let meta = &attr.meta;
        if !meta.path().is_ident("sluice") {
            continue;
        }
        let Ok(list) = meta.require_list() else {
            panic!("Error while parsing `sluice`, use it like: `#[sluice(attribute = value, ...)]`");
        };
        let _ = list.parse_nested_meta(|arg| {
            if arg.path.is_ident("name") {
                let Ok(v) = arg.value().and_then(ParseBuffer::parse::<LitStr>) else {
                    panic!("Error while parsing `name`, use it like: `#[sluice(name = \"my_table\")]`");
                };
                name = v.value();
            } else {
                panic!(
                    "Unknown attribute `{}` inside sluice macro",
                    arg.path.to_token_stream()
                );
            }
            Ok(())
        });
    }
    if columns.iter().all(|c| c.skip) {
        panic!("Entity `{}` must map at least one column", item.ident);
    }
    TableMetadata {
        name,
        columns,
        item,
    }
}
