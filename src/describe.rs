//! Per-document description lookup.
//!
//! [`YamlConf::dump_all`](crate::YamlConf::dump_all) writes a comment block
//! before each document whose [`DescriptionProvider`] returns one.

use crate::document::Document;
use crate::yamlformat::referent;
use std::any;
use std::collections::HashMap;

/// Produces the comment lines describing a document.
pub trait DescriptionProvider {
    /// Returns the description of `document`, or `None` to write no comment.
    fn describe(&self, document: &dyn Document) -> Option<Vec<String>>;
}

impl<F> DescriptionProvider for F
where
    F: Fn(&dyn Document) -> Option<Vec<String>>,
{
    fn describe(&self, document: &dyn Document) -> Option<Vec<String>> {
        self(document)
    }
}

/// Uses the descriptions attached with `#[yaml(description = "...")]`.
///
/// ```
/// use serde_derive::Serialize;
/// use yamlconf::describe::{DescriptionProvider, Registered};
/// use yamlconf::YamlFormat;
///
/// #[derive(Serialize, YamlFormat)]
/// #[yaml(description = "Players shown in the server list")]
/// struct Players {
///     max: u32,
/// }
///
/// let description = Registered.describe(&Players { max: 20 });
/// assert_eq!(description.unwrap(), ["Players shown in the server list"]);
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct Registered;

impl DescriptionProvider for Registered {
    fn describe(&self, document: &dyn Document) -> Option<Vec<String>> {
        let lines = document.registration()?.description();
        if lines.is_empty() {
            return None;
        }
        Some(lines.iter().map(|line| (*line).to_owned()).collect())
    }
}

/// Never describes a document.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoDescriptions;

impl DescriptionProvider for NoDescriptions {
    fn describe(&self, _document: &dyn Document) -> Option<Vec<String>> {
        None
    }
}

/// Descriptions kept in a table keyed by type.
#[derive(Clone, Debug, Default)]
pub struct DescriptionTable {
    lines: HashMap<&'static str, Vec<String>>,
}

impl DescriptionTable {
    /// Creates an empty table.
    pub fn new() -> Self {
        DescriptionTable::default()
    }

    /// Sets the description of documents of type `T`, replacing any earlier
    /// one.
    pub fn insert<T, I>(&mut self, lines: I) -> &mut Self
    where
        T: ?Sized,
        I: IntoIterator,
        I::Item: Into<String>,
    {
        let lines = lines.into_iter().map(Into::into).collect();
        self.lines.insert(referent(any::type_name::<T>()), lines);
        self
    }

    /// Builder form of [`insert`](DescriptionTable::insert).
    pub fn with<T, I>(mut self, lines: I) -> Self
    where
        T: ?Sized,
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.insert::<T, I>(lines);
        self
    }
}

impl DescriptionProvider for DescriptionTable {
    fn describe(&self, document: &dyn Document) -> Option<Vec<String>> {
        self.lines
            .get(referent(document.type_name()))
            .filter(|lines| !lines.is_empty())
            .cloned()
    }
}
