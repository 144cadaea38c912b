use crate::attr::{self, Attrs};
use proc_macro2::Span;
use syn::{
    Data, DataEnum, DataStruct, DeriveInput, Error, Fields, Ident, Index, LitStr, Member, Result,
};

pub enum Input<'a> {
    Struct(Struct<'a>),
    Enum(Enum<'a>),
}

pub struct Struct<'a> {
    pub attrs: Attrs<'a>,
    pub fields: Vec<Field<'a>>,
}

pub struct Field<'a> {
    pub attrs: Attrs<'a>,
    pub member: Member,
}

pub struct Enum<'a> {
    pub attrs: Attrs<'a>,
    pub variants: Vec<Variant<'a>>,
}

pub struct Variant<'a> {
    pub ident: Ident,
    pub fields: Vec<Field<'a>>,
}

impl<'a> Input<'a> {
    pub fn from_syn(node: &'a DeriveInput) -> Result<Self> {
        if !node.generics.params.is_empty() {
            return Err(Error::new_spanned(
                &node.generics,
                "YamlFormat cannot be derived for generic types",
            ));
        }
        match &node.data {
            Data::Struct(data) => Struct::from_syn(node, data).map(Input::Struct),
            Data::Enum(data) => Enum::from_syn(node, data).map(Input::Enum),
            Data::Union(_) => Err(Error::new_spanned(node, "unions are not supported")),
        }
    }

    pub fn description(&self) -> &[LitStr] {
        match self {
            Input::Struct(input) => &input.attrs.description,
            Input::Enum(input) => &input.attrs.description,
        }
    }
}

impl<'a> Struct<'a> {
    fn from_syn(node: &'a DeriveInput, data: &'a DataStruct) -> Result<Self> {
        let attrs = attr::get(&node.attrs)?;
        no_format(&attrs)?;
        let span = Span::call_site();
        let fields = Field::multiple_from_syn(&data.fields, span)?;
        Ok(Struct { attrs, fields })
    }
}

impl<'a> Enum<'a> {
    fn from_syn(node: &'a DeriveInput, data: &'a DataEnum) -> Result<Self> {
        let attrs = attr::get(&node.attrs)?;
        no_format(&attrs)?;
        let span = Span::call_site();
        let variants = data
            .variants
            .iter()
            .map(|node| Variant::from_syn(node, span))
            .collect::<Result<_>>()?;
        Ok(Enum { attrs, variants })
    }
}

impl<'a> Field<'a> {
    fn multiple_from_syn(fields: &'a Fields, span: Span) -> Result<Vec<Self>> {
        fields
            .iter()
            .enumerate()
            .map(|(i, field)| Field::from_syn(i, field, span))
            .collect()
    }

    fn from_syn(i: usize, node: &'a syn::Field, span: Span) -> Result<Self> {
        let attrs = attr::get(&node.attrs)?;
        if let Some(line) = attrs.description.first() {
            return Err(Error::new_spanned(
                line,
                "description is only supported on the type itself",
            ));
        }
        Ok(Field {
            attrs,
            member: node.ident.clone().map(Member::Named).unwrap_or_else(|| {
                Member::Unnamed(Index {
                    index: i as u32,
                    span,
                })
            }),
        })
    }
}

impl<'a> Variant<'a> {
    fn from_syn(node: &'a syn::Variant, span: Span) -> Result<Self> {
        let attrs = attr::get(&node.attrs)?;
        if let Some(attr) = attrs.yaml {
            return Err(Error::new_spanned(
                attr,
                "yaml attributes are not supported on variants",
            ));
        }
        Ok(Variant {
            ident: node.ident.clone(),
            fields: Field::multiple_from_syn(&node.fields, span)?,
        })
    }
}

fn no_format(attrs: &Attrs) -> Result<()> {
    match (attrs.format, attrs.yaml) {
        (Some(_), Some(attr)) => Err(Error::new_spanned(
            attr,
            "format is only supported on fields",
        )),
        _ => Ok(()),
    }
}
