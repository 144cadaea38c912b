use crate::ast::{Field, Input};
use crate::attr::Format;
use proc_macro2::TokenStream;
use quote::quote;
use syn::{DeriveInput, Index, Member, Result};

pub fn derive(node: &DeriveInput) -> Result<TokenStream> {
    let input = Input::from_syn(node)?;
    let name = &node.ident;
    let description = input.description();
    let formats = match &input {
        Input::Struct(input) => impl_field_format(&quote!(None), &input.fields),
        Input::Enum(input) => input
            .variants
            .iter()
            .flat_map(|variant| {
                let variant_name = variant.ident.to_string();
                impl_field_format(&quote!(Some(#variant_name)), &variant.fields)
            })
            .collect(),
    };

    Ok(quote! {
        const _: () = {
            use yamlconf::__private::{inventory, Format, MemberId, Registration, YamlFormat};

            impl YamlFormat for #name {
                fn description() -> &'static [&'static str] {
                    &[#(#description),*]
                }

                fn format(variant: Option<&str>, field: &MemberId<'_>) -> Option<Format> {
                    match (variant, field) {
                        #(#formats,)*
                        _ => None,
                    }
                }
            }

            inventory::submit! {
                Registration {
                    type_name: ::core::any::type_name::<#name>,
                    description: <#name as YamlFormat>::description,
                    format: <#name as YamlFormat>::format,
                }
            }
        };
    })
}

fn impl_field_format(variant: &TokenStream, fields: &[Field]) -> Vec<TokenStream> {
    fields
        .iter()
        .filter_map(|f| {
            let format = match f.attrs.format? {
                Format::Binary => quote! { Format::Binary },
                Format::Decimal => quote! { Format::Decimal },
                Format::Hex => quote! { Format::Hex },
                Format::Octal => quote! { Format::Octal },
            };
            Some(match &f.member {
                Member::Named(id) => {
                    let id = id.to_string();
                    quote! { (#variant, MemberId::Name(#id)) => Some(#format) }
                }
                Member::Unnamed(Index { index: i, .. }) => {
                    quote! { (#variant, MemberId::Index(#i)) => Some(#format) }
                }
            })
        })
        .collect()
}
