//! YAML engine
//!
//! An [`Engine`] bundles the [`DumpOptions`] and the [`Representer`] and
//! writes one document per call.

use crate::document::Document;
use crate::error::{self, Result};
use crate::options::{DumpOptions, Tag};
use crate::ser::Representer;
use log::trace;
use serde::ser;
use std::io;
use yaml_rust2::yaml::{Array, Hash};
use yaml_rust2::{Yaml, YamlEmitter};

/// Configured YAML serializer.
///
/// # Example
///
/// ```
/// use serde_derive::Serialize;
/// use yamlconf::{DumpOptions, Engine, LineBreak, Representer};
///
/// #[derive(Serialize)]
/// struct Point {
///     x: i32,
///     y: i32,
/// }
///
/// let options = DumpOptions {
///     line_break: LineBreak::Windows,
///     ..DumpOptions::default()
/// };
/// let engine = Engine::new(options, Representer::default());
/// let yaml = engine.to_string(&Point { x: 1, y: 2 }).unwrap();
/// assert_eq!(yaml, "x: 1\r\ny: 2\r\n");
/// ```
#[derive(Clone, Debug, Default)]
pub struct Engine {
    options: DumpOptions,
    representer: Representer,
}

impl Engine {
    /// Creates an engine from its options and representer.
    pub fn new(options: DumpOptions, representer: Representer) -> Self {
        Engine {
            options,
            representer,
        }
    }

    /// The options used when no call-scoped options are given.
    pub fn options(&self) -> &DumpOptions {
        &self.options
    }

    /// The representer mapping values to nodes.
    pub fn representer(&self) -> &Representer {
        &self.representer
    }

    /// Writes `document` into `writer` using `options` instead of the
    /// engine's own options.
    ///
    /// The output is the document body followed by one line break, preceded
    /// by a `---` line when `options.explicit_start` is set.
    pub fn write_document<W>(
        &self,
        options: &DumpOptions,
        document: &dyn Document,
        writer: &mut W,
    ) -> Result<()>
    where
        W: ?Sized + io::Write,
    {
        trace!("writing document of type {}", document.type_name());
        let node = document.represent(&self.representer)?;
        write_node(options, node, writer)
    }

    /// Serialize the given data structure as YAML into the IO stream.
    pub fn to_writer<W, T>(&self, mut writer: W, value: &T) -> Result<()>
    where
        W: io::Write,
        T: ?Sized + ser::Serialize,
    {
        let node = self.representer.represent(value)?;
        write_node(&self.options, node, &mut writer)
    }

    /// Serialize the given data structure as a YAML byte vector.
    pub fn to_vec<T>(&self, value: &T) -> Result<Vec<u8>>
    where
        T: ?Sized + ser::Serialize,
    {
        let mut vec = Vec::with_capacity(128);
        self.to_writer(&mut vec, value)?;
        Ok(vec)
    }

    /// Serialize the given data structure as a String of YAML.
    pub fn to_string<T>(&self, value: &T) -> Result<String>
    where
        T: ?Sized + ser::Serialize,
    {
        String::from_utf8(self.to_vec(value)?).map_err(error::string_utf8)
    }
}

fn write_node<W>(options: &DumpOptions, node: Yaml, writer: &mut W) -> Result<()>
where
    W: ?Sized + io::Write,
{
    let node = match options.explicit_root {
        Some(tag) => force_root(node, tag)?,
        None => node,
    };
    let text = emit(options, &node)?;
    writer.write_all(text.as_bytes()).map_err(error::io)
}

fn emit(options: &DumpOptions, node: &Yaml) -> Result<String> {
    let mut out = String::new();
    {
        let mut emitter = YamlEmitter::new(&mut out);
        emitter.compact(options.compact);
        emitter.multiline_strings(options.multiline_strings);
        emitter.dump(node).map_err(error::emitter)?;
    }

    // The emitter always opens with its own start line.
    let body = out.strip_prefix("---\n").unwrap_or(&out);

    let line_break = options.line_break.as_str();
    let mut text = String::with_capacity(body.len() + 8);
    if options.explicit_start {
        text.push_str("---");
        text.push_str(line_break);
    }
    if line_break == "\n" {
        text.push_str(body);
    } else {
        text.push_str(&body.replace('\n', line_break));
    }
    text.push_str(line_break);
    Ok(text)
}

fn force_root(node: Yaml, tag: Tag) -> Result<Yaml> {
    match (tag, node) {
        (Tag::Map, node @ Yaml::Hash(_)) | (Tag::Seq, node @ Yaml::Array(_)) => Ok(node),
        (Tag::Map, Yaml::Null) => Ok(Yaml::Hash(Hash::new())),
        (Tag::Seq, Yaml::Null) => Ok(Yaml::Array(Array::new())),
        (tag, node) => Err(error::root_tag(tag, kind(&node))),
    }
}

fn kind(node: &Yaml) -> &'static str {
    match node {
        Yaml::Real(_) => "float",
        Yaml::Integer(_) => "integer",
        Yaml::String(_) => "string",
        Yaml::Boolean(_) => "boolean",
        Yaml::Array(_) => "sequence",
        Yaml::Hash(_) => "mapping",
        Yaml::Null => "null",
        _ => "unrepresentable node",
    }
}

/// Serialize the given data structure as YAML into the IO stream, using a
/// default [`Engine`].
///
/// Serialization can fail if `T`'s implementation of `Serialize` decides to
/// return an error.
pub fn to_writer<W, T>(writer: W, value: &T) -> Result<()>
where
    W: io::Write,
    T: ?Sized + ser::Serialize,
{
    Engine::default().to_writer(writer, value)
}

/// Serialize the given data structure as a YAML byte vector, using a default
/// [`Engine`].
pub fn to_vec<T>(value: &T) -> Result<Vec<u8>>
where
    T: ?Sized + ser::Serialize,
{
    Engine::default().to_vec(value)
}

/// Serialize the given data structure as a String of YAML, using a default
/// [`Engine`].
pub fn to_string<T>(value: &T) -> Result<String>
where
    T: ?Sized + ser::Serialize,
{
    Engine::default().to_string(value)
}
