mod decode_column;
mod decode_table;

use decode_table::decode_table;
use proc_macro::TokenStream;
use quote::quote;
use syn::{ItemStruct, parse_macro_input};

#[proc_macro_derive(Entity, attributes(sluice))]
pub fn derive_entity(input: TokenStream) -> TokenStream {
    let table = decode_table(parse_macro_input!(input as ItemStruct));
    let item = &table.item;
    let name = &item.ident;
    let (impl_generics, ty_generics, where_clause) = item.generics.split_for_impl();
    let table_name = &table.name;
    let column_names = table.mapped().map(|c| &c.name);
    let column_labels = table
        .mapped()
        .map(|c| {
            let name = &c.name;
            quote!(::std::borrow::Cow::Borrowed(#name))
        });
    let column_values = table.mapped().map(|c| {
        let ident = &c.ident;
        quote!(::sluice::AsValue::as_value(::std::clone::Clone::clone(&self.#ident)))
    });
    let empty_fields = table.columns.iter().map(|c| {
        let ident = &c.ident;
        quote!(#ident: ::std::default::Default::default())
    });
    let materialize = table.mapped().map(|c| {
        let ident = &c.ident;
        let ty = &c.ty;
        let column = &c.name;
        quote!(self.#ident = ::sluice::column_value::<#ty>(row, #column)?;)
    });
    quote! {
        impl #impl_generics ::sluice::Entity for #name #ty_generics #where_clause {
            fn table_name() -> &'static str {
                #table_name
            }

            fn column_names() -> &'static [&'static str] {
                &[#(#column_names),*]
            }

            fn make_empty() -> Self {
                Self {
                    #(#empty_fields,)*
                }
            }

            fn materialize(&mut self, row: &::sluice::RowLabeled) -> ::sluice::Result<()> {
                #(#materialize)*
                Ok(())
            }

            fn extract(&self) -> ::sluice::ColumnValues {
                (
                    vec![#(#column_labels),*],
                    vec![#(#column_values),*],
                )
            }
        }
    }
    .into()
}
