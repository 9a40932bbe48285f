//! Derive macro for typed table handles.
//!
//! `#[derive(Table)]` on a row struct generates a `<Struct>Table` handle
//! holding one typed `Column<T>` per field, so queries reference columns by
//! Rust field instead of by string.

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::{format_ident, quote};
use syn::{parse_macro_input, Attribute, Data, DeriveInput, Fields, Ident, LitStr, Type, Visibility};

/// Derives a typed table handle for a struct.
///
/// # Attributes
///
/// - `#[table(name = "table_name")]` - Specifies the SQL table name (optional,
///   defaults to snake_case of struct name)
///
/// # Field Attributes
///
/// - `#[column(name = "column_name")]` - Specifies the SQL column name
///   (optional, defaults to field name)
///
/// Field types must implement `fluent_sql_core::SqlType`.
///
/// # Generated Items
///
/// For a struct `Employee`, this macro generates `EmployeeTable` with:
///
/// - one public `Column<T>` field per struct field, same name and visibility
/// - `NAME` and `COLUMNS` constants
/// - `new()` (aliased by its own name) and `aliased(alias)`
/// - `relation()`, typed as `Expr<Relation<Employee>>`
/// - `all_columns()`, for `select_exprs`
/// - `AsTable` and `IntoRelation` implementations
///
/// and `Employee::table()` returning `EmployeeTable::new()`.
#[proc_macro_derive(Table, attributes(table, column))]
pub fn derive_table(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    derive_table_impl(&input)
        .unwrap_or_else(|e| e.to_compile_error())
        .into()
}

fn derive_table_impl(input: &DeriveInput) -> syn::Result<TokenStream2> {
    let struct_name = &input.ident;
    let table_name = get_table_name(&input.attrs, struct_name)?;

    if !input.generics.params.is_empty() {
        return Err(syn::Error::new_spanned(
            &input.generics,
            "Table derive does not support generic structs",
        ));
    }

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => &fields.named,
            _ => {
                return Err(syn::Error::new_spanned(
                    input,
                    "Table derive only supports structs with named fields",
                ));
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                input,
                "Table derive only supports structs",
            ));
        }
    };

    // Collect field information
    let mut column_infos: Vec<ColumnInfo> = Vec::new();
    for field in fields {
        let Some(field_name) = field.ident.clone() else {
            return Err(syn::Error::new_spanned(field, "expected a named field"));
        };
        let column_name =
            parse_column_name(&field.attrs)?.unwrap_or_else(|| field_name.to_string());
        column_infos.push(ColumnInfo {
            field_name,
            field_type: field.ty.clone(),
            visibility: field.vis.clone(),
            column_name,
        });
    }

    let table_struct_name = format_ident!("{}Table", struct_name);
    let core = quote!(::fluent_sql_core);

    let column_fields = column_infos.iter().map(|info| {
        let ColumnInfo {
            field_name,
            field_type,
            visibility,
            ..
        } = info;
        let doc = format!("The `{}` column.", info.column_name);
        quote! {
            #[doc = #doc]
            #visibility #field_name: #core::Column<#field_type>
        }
    });

    let column_inits = column_infos.iter().map(|info| {
        let field_name = &info.field_name;
        let field_type = &info.field_type;
        let column_name = &info.column_name;
        quote! {
            #field_name: table.column::<#field_type>(#column_name)
        }
    });

    let boxed_columns = column_infos.iter().map(|info| {
        let field_name = &info.field_name;
        quote! {
            #core::ScalarExpr::boxed_scalar(&self.#field_name)
        }
    });

    let all_column_names: Vec<&str> = column_infos
        .iter()
        .map(|c| c.column_name.as_str())
        .collect();

    let table_doc = format!("Typed handle on the `{table_name}` table.");

    let expanded = quote! {
        #[doc = #table_doc]
        #[derive(Debug, Clone)]
        pub struct #table_struct_name {
            __table: #core::Table,
            #(#column_fields,)*
        }

        impl #table_struct_name {
            /// The SQL table name.
            pub const NAME: &'static str = #table_name;

            /// The SQL column names, in field order.
            pub const COLUMNS: &'static [&'static str] = &[#(#all_column_names),*];

            /// Creates a handle aliased by the table name itself.
            #[must_use]
            pub fn new() -> Self {
                Self::aliased(Self::NAME)
            }

            /// Creates a handle whose columns are qualified by `alias`.
            #[must_use]
            pub fn aliased(alias: &str) -> Self {
                let table = #core::Table::new(Self::NAME, alias);
                Self {
                    #(#column_inits,)*
                    __table: table,
                }
            }

            /// Returns the table as a relation of rows.
            #[must_use]
            pub fn relation(&self) -> #core::Expr<#core::Relation<#struct_name>> {
                self.__table.relation().force_cast()
            }

            /// Returns every column, in field order.
            #[must_use]
            pub fn all_columns(&self) -> ::std::vec::Vec<#core::Expr<#core::AnyScalar>> {
                ::std::vec![#(#boxed_columns),*]
            }
        }

        impl ::std::default::Default for #table_struct_name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl #core::AsTable for #table_struct_name {
            fn as_table(&self) -> &#core::Table {
                &self.__table
            }
        }

        impl #core::IntoRelation for &#table_struct_name {
            fn into_relation(self) -> #core::Expr<#core::AnyRelation> {
                self.__table.relation()
            }
        }

        impl #struct_name {
            /// Returns a handle on the table storing this row type.
            #[must_use]
            pub fn table() -> #table_struct_name {
                #table_struct_name::new()
            }
        }
    };

    Ok(expanded)
}

struct ColumnInfo {
    field_name: Ident,
    field_type: Type,
    visibility: Visibility,
    column_name: String,
}

fn get_table_name(attrs: &[Attribute], struct_name: &Ident) -> syn::Result<String> {
    let mut table_name = None;
    for attr in attrs {
        if attr.path().is_ident("table") {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("name") {
                    let value: LitStr = meta.value()?.parse()?;
                    table_name = Some(value.value());
                    Ok(())
                } else {
                    Err(meta.error("unsupported table attribute, expected `name`"))
                }
            })?;
        }
    }
    // Default to snake_case of struct name
    Ok(table_name.unwrap_or_else(|| to_snake_case(&struct_name.to_string())))
}

fn parse_column_name(attrs: &[Attribute]) -> syn::Result<Option<String>> {
    let mut name = None;
    for attr in attrs {
        if attr.path().is_ident("column") {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("name") {
                    let value: LitStr = meta.value()?.parse()?;
                    name = Some(value.value());
                    Ok(())
                } else {
                    Err(meta.error("unsupported column attribute, expected `name`"))
                }
            })?;
        }
    }
    Ok(name)
}

fn to_snake_case(s: &str) -> String {
    let mut result = String::new();
    for (i, c) in s.chars().enumerate() {
        if c.is_uppercase() {
            if i > 0 {
                result.push('_');
            }
            result.push(c.to_ascii_lowercase());
        } else {
            result.push(c);
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_snake_case() {
        assert_eq!(to_snake_case("Employee"), "employee");
        assert_eq!(to_snake_case("PayrollEntry"), "payroll_entry");
        assert_eq!(to_snake_case("already_snake"), "already_snake");
    }

    #[test]
    fn test_table_name_attribute_overrides_default() {
        let input: DeriveInput = syn::parse_quote! {
            #[table(name = "staff")]
            struct Employee {
                id: i64,
            }
        };
        assert_eq!(get_table_name(&input.attrs, &input.ident).unwrap(), "staff");
    }

    #[test]
    fn test_unknown_column_attribute_is_an_error() {
        let input: DeriveInput = syn::parse_quote! {
            struct Employee {
                #[column(primary_key)]
                id: i64,
            }
        };
        let err = derive_table_impl(&input).unwrap_err();
        assert!(err.to_string().contains("unsupported column attribute"));
    }

    #[test]
    fn test_generic_struct_is_rejected() {
        let input: DeriveInput = syn::parse_quote! {
            struct Row<T> {
                value: T,
            }
        };
        let err = derive_table_impl(&input).unwrap_err();
        assert!(err.to_string().contains("generic"));
    }

    #[test]
    fn test_expansion_mentions_every_column() {
        let input: DeriveInput = syn::parse_quote! {
            struct Employee {
                id: i64,
                #[column(name = "full_name")]
                name: String,
            }
        };
        let expanded = derive_table_impl(&input).unwrap().to_string();
        assert!(expanded.contains("EmployeeTable"));
        assert!(expanded.contains("\"full_name\""));
        assert!(expanded.contains("\"employee\""));
    }
}
