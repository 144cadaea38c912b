//! Type metadata attached with `#[derive(YamlFormat)]`.
//!
//! The derive registers every annotated type in a process-wide registry so
//! the serializer and the [`Registered`](crate::describe::Registered)
//! description provider can find the metadata of a value whose concrete type
//! is only known as `T: Serialize`.

use once_cell::sync::Lazy;
use std::any;
use std::collections::HashMap;
pub use yamlconf_derive::*;

/// `MemberId` identifies a field of a struct or enum variant.
#[derive(Debug)]
pub enum MemberId<'a> {
    /// `Name` identifies a named field.
    Name(&'a str),
    /// `Index` identifies a tuple field.
    Index(u32),
}

/// `Format` describes how an integer field is to be written.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Format {
    /// Format an integer field as binary.
    Binary,
    /// Format an integer field as decimal.
    Decimal,
    /// Format an integer field as hexadecimal.
    Hex,
    /// Format an integer field as octal.
    Octal,
}

/// Metadata the dumper consults for a type.
///
/// Implemented by `#[derive(YamlFormat)]`:
///
/// ```
/// use serde_derive::Serialize;
/// use yamlconf::YamlFormat;
///
/// #[derive(Serialize, YamlFormat)]
/// #[yaml(description = "Status ping settings")]
/// struct Ping {
///     #[yaml(format = hex)]
///     protocol: u16,
/// }
///
/// assert_eq!(<Ping as YamlFormat>::description(), ["Status ping settings"]);
/// ```
pub trait YamlFormat {
    /// Comment lines describing the type as a whole.
    fn description() -> &'static [&'static str];
    /// Returns the format for a given field.
    fn format(variant: Option<&str>, field: &MemberId<'_>) -> Option<Format>;
}

#[doc(hidden)]
pub struct Registration {
    pub type_name: fn() -> &'static str,
    pub description: fn() -> &'static [&'static str],
    pub format: fn(Option<&str>, &MemberId<'_>) -> Option<Format>,
}
inventory::collect!(Registration);

static REGISTRY: Lazy<HashMap<&'static str, &'static Registration>> = Lazy::new(|| {
    inventory::iter::<Registration>
        .into_iter()
        .map(|registration| ((registration.type_name)(), registration))
        .collect()
});

impl Registration {
    /// Finds the registration of `T`, looking through references.
    pub fn of<T>() -> Option<&'static Registration>
    where
        T: ?Sized,
    {
        Self::lookup(any::type_name::<T>())
    }

    pub(crate) fn lookup(type_name: &str) -> Option<&'static Registration> {
        REGISTRY.get(referent(type_name)).copied()
    }

    /// Comment lines describing the registered type.
    pub fn description(&self) -> &'static [&'static str] {
        (self.description)()
    }

    /// Format of a field of the registered type.
    pub fn format(&self, variant: Option<&str>, field: &MemberId<'_>) -> Option<Format> {
        (self.format)(variant, field)
    }
}

/// Strips leading `&` and `&mut ` from a type name.
pub(crate) fn referent(type_name: &str) -> &str {
    let mut name = type_name;
    while let Some(rest) = name.strip_prefix('&') {
        name = rest.strip_prefix("mut ").unwrap_or(rest);
    }
    name
}
