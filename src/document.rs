//! Documents passed to multi-document dumps.

use crate::error::Result;
use crate::ser::{self, Representer};
use crate::yamlformat::Registration;
use serde::Serialize;
use std::any;
use std::fmt;
use yaml_rust2::Yaml;

/// A value that can be dumped as one YAML document.
///
/// Every `Serialize` type is a `Document`. The trait exists so documents of
/// different types can be passed together as `&[&dyn Document]`:
///
/// ```
/// use serde_derive::Serialize;
/// use yamlconf::{Document, Engine, YamlConf};
///
/// #[derive(Serialize)]
/// struct Motd {
///     text: &'static str,
/// }
///
/// #[derive(Serialize)]
/// struct Favicon {
///     file: &'static str,
/// }
///
/// let engine = Engine::default();
/// let conf = YamlConf::new(&engine);
/// let documents: [&dyn Document; 2] = [&Motd { text: "hello" }, &Favicon { file: "icon.png" }];
/// let yaml = conf.dump_all(&documents).unwrap();
/// assert_eq!(yaml, "\n--- text: hello\n\n--- file: icon.png\n");
/// ```
pub trait Document {
    /// Builds the node tree of this document.
    fn represent(&self, representer: &Representer) -> Result<Yaml>;

    /// Name of the concrete type behind the document.
    fn type_name(&self) -> &'static str;

    /// Metadata registered for the concrete type with `#[derive(YamlFormat)]`.
    fn registration(&self) -> Option<&'static Registration> {
        Registration::lookup(self.type_name())
    }
}

impl<T> Document for T
where
    T: ?Sized + Serialize,
{
    fn represent(&self, representer: &Representer) -> Result<Yaml> {
        ser::to_yaml(representer, self, None)
    }

    fn type_name(&self) -> &'static str {
        any::type_name::<T>()
    }
}

impl<'a> fmt::Debug for dyn Document + 'a {
    fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.debug_tuple("Document").field(&self.type_name()).finish()
    }
}
