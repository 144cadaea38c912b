//! Config files with comment headers.

use crate::describe::{DescriptionProvider, Registered};
use crate::document::Document;
use crate::engine::Engine;
use crate::error::{self, Result};
use crate::options::{DumpOptions, Tag};
use log::{debug, trace, warn};
use serde::Serialize;
use std::io;

/// Written before every comment line.
pub const COMMENT_PREFIX: &str = "# ";

/// Written before every document of a multi-document dump.
pub const DOCUMENT_START: &str = "--- ";

/// Formats `lines` as a comment block.
///
/// Each line gets the [`COMMENT_PREFIX`] and is terminated by `line_break`.
/// Lines containing line breaks themselves (`\n`, `\r\n` or a lone `\r`)
/// are split so every physical line stays a comment. No lines give an empty block.
///
/// ```
/// use yamlconf::conf::comment_block;
///
/// assert_eq!(comment_block(&["a", "b"], "\n"), "# a\n# b\n");
/// assert_eq!(comment_block::<&str>(&[], "\n"), "");
/// ```
pub fn comment_block<S>(lines: &[S], line_break: &str) -> String
where
    S: AsRef<str>,
{
    let separator = format!("{}{}", line_break, COMMENT_PREFIX);
    let mut block = String::new();
    for (i, line) in lines
        .iter()
        .flat_map(|line| line.as_ref().split('\n'))
        .flat_map(|line| line.strip_suffix('\r').unwrap_or(line).split('\r'))
        .enumerate()
    {
        block.push_str(if i == 0 { COMMENT_PREFIX } else { &separator });
        block.push_str(line);
    }
    if !block.is_empty() {
        block.push_str(line_break);
    }
    block
}

/// Dumps config objects as YAML documents with comment headers.
///
/// `YamlConf` borrows an [`Engine`] and never changes its options: the
/// explicit mapping root of single-document dumps is applied to a copy made
/// for each call, so one engine can back any number of `YamlConf`s, also
/// across threads.
///
/// # Example
///
/// ```
/// use serde_derive::Serialize;
/// use yamlconf::{Engine, YamlConf};
///
/// #[derive(Serialize)]
/// struct Motd {
///     line: &'static str,
/// }
///
/// let engine = Engine::default();
/// let conf = YamlConf::new(&engine);
/// let yaml = conf
///     .dump_with_header(&["Message of the day"], &Motd { line: "hello" })
///     .unwrap();
/// assert_eq!(yaml, "# Message of the day\nline: hello\n");
/// ```
pub struct YamlConf<'e, P = Registered> {
    engine: &'e Engine,
    descriptions: P,
    line_break: &'static str,
}

impl<'e> YamlConf<'e> {
    /// Creates a dumper describing documents with [`Registered`].
    pub fn new(engine: &'e Engine) -> Self {
        YamlConf::with_descriptions(engine, Registered)
    }
}

impl<'e, P> YamlConf<'e, P>
where
    P: DescriptionProvider,
{
    /// Creates a dumper describing documents with `descriptions`.
    pub fn with_descriptions(engine: &'e Engine, descriptions: P) -> Self {
        YamlConf {
            engine,
            descriptions,
            line_break: engine.options().line_break.as_str(),
        }
    }

    /// The engine documents are written with.
    pub fn engine(&self) -> &'e Engine {
        self.engine
    }

    /// The provider of per-document descriptions.
    pub fn descriptions(&self) -> &P {
        &self.descriptions
    }

    /// Dumps `conf` as a single document with a mapping root.
    pub fn dump<T>(&self, conf: &T) -> Result<String>
    where
        T: Serialize,
    {
        self.dump_with_header(&[], conf)
    }

    /// Dumps `conf` as a single document with a mapping root, preceded by
    /// `header` as a comment block.
    pub fn dump_with_header<T>(&self, header: &[&str], conf: &T) -> Result<String>
    where
        T: Serialize,
    {
        let vec = self.save_with_header(Vec::with_capacity(128), header, conf)?;
        String::from_utf8(vec).map_err(error::string_utf8)
    }

    /// Writes `conf` into `writer` like [`dump`](YamlConf::dump) and hands
    /// the writer back.
    pub fn save<W, T>(&self, writer: W, conf: &T) -> Result<W>
    where
        W: io::Write,
        T: Serialize,
    {
        self.save_with_header(writer, &[], conf)
    }

    /// Writes `conf` into `writer` like
    /// [`dump_with_header`](YamlConf::dump_with_header) and hands the writer
    /// back.
    pub fn save_with_header<W, T>(&self, mut writer: W, header: &[&str], conf: &T) -> Result<W>
    where
        W: io::Write,
        T: Serialize,
    {
        debug!("saving one document with {} header lines", header.len());
        self.write_header(&mut writer, header)?;

        let options = DumpOptions {
            explicit_root: Some(Tag::Map),
            ..self.engine.options().clone()
        };
        self.engine.write_document(&options, conf, &mut writer)?;
        Ok(writer)
    }

    /// Dumps every element of `confs` as its own document.
    pub fn dump_all(&self, confs: &[&dyn Document]) -> Result<String> {
        self.dump_all_with_header(&[], confs)
    }

    /// Dumps every element of `confs` as its own document, preceded by
    /// `header` as a comment block.
    ///
    /// Each document starts on a new line, with its description (if the
    /// provider has one) as a comment block right before the `--- ` marker.
    pub fn dump_all_with_header(&self, header: &[&str], confs: &[&dyn Document]) -> Result<String> {
        let vec = self.save_all_with_header(Vec::with_capacity(128 * confs.len()), header, confs)?;
        String::from_utf8(vec).map_err(error::string_utf8)
    }

    /// Writes `confs` into `writer` like [`dump_all`](YamlConf::dump_all) and
    /// hands the writer back.
    pub fn save_all<W>(&self, writer: W, confs: &[&dyn Document]) -> Result<W>
    where
        W: io::Write,
    {
        self.save_all_with_header(writer, &[], confs)
    }

    /// Writes `confs` into `writer` like
    /// [`dump_all_with_header`](YamlConf::dump_all_with_header) and hands the
    /// writer back.
    ///
    /// Documents written before a failure stay in `writer`.
    pub fn save_all_with_header<W>(
        &self,
        mut writer: W,
        header: &[&str],
        confs: &[&dyn Document],
    ) -> Result<W>
    where
        W: io::Write,
    {
        debug!(
            "saving {} documents with {} header lines",
            confs.len(),
            header.len(),
        );
        self.write_header(&mut writer, header)?;

        let options = DumpOptions {
            explicit_start: false,
            ..self.engine.options().clone()
        };
        for conf in confs {
            self.write(&mut writer, self.line_break)?;
            match self.descriptions.describe(*conf) {
                Some(description) => {
                    trace!("{} has {} description lines", conf.type_name(), description.len());
                    self.write(&mut writer, &comment_block(&description, self.line_break))?;
                }
                None => trace!("{} has no description", conf.type_name()),
            }
            self.write(&mut writer, DOCUMENT_START)?;
            self.engine.write_document(&options, *conf, &mut writer)?;
        }
        Ok(writer)
    }

    fn write_header<W>(&self, writer: &mut W, header: &[&str]) -> Result<()>
    where
        W: io::Write,
    {
        self.write(writer, &comment_block(header, self.line_break))
    }

    fn write<W>(&self, writer: &mut W, text: &str) -> Result<()>
    where
        W: io::Write,
    {
        writer.write_all(text.as_bytes()).map_err(|err| {
            warn!("failed to write YAML output: {}", err);
            error::io(err)
        })
    }
}
