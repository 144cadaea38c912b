//! Engine configuration.

use std::fmt::{self, Display};

/// Line break written between lines of output.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LineBreak {
    /// `\n`
    Unix,
    /// `\r\n`
    Windows,
    /// `\r`
    Mac,
}

impl LineBreak {
    /// The literal line break sequence.
    pub fn as_str(self) -> &'static str {
        match self {
            LineBreak::Unix => "\n",
            LineBreak::Windows => "\r\n",
            LineBreak::Mac => "\r",
        }
    }
}

impl Default for LineBreak {
    fn default() -> Self {
        LineBreak::Unix
    }
}

/// Collection kind a document root can be forced to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tag {
    /// `!!map`
    Map,
    /// `!!seq`
    Seq,
}

impl Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match self {
            Tag::Map => "!!map",
            Tag::Seq => "!!seq",
        })
    }
}

/// Options controlling how the engine writes a document.
///
/// The engine never mutates its options. Callers that need a different
/// setting for one call clone the options and pass the copy to
/// [`Engine::write_document`](crate::Engine::write_document).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DumpOptions {
    /// Line break used for all emitted lines.
    pub line_break: LineBreak,
    /// Forces the root node of each document to the given collection kind.
    ///
    /// A null root becomes an empty collection. Any other root kind that does
    /// not match is an error.
    pub explicit_root: Option<Tag>,
    /// Writes a `---` line before the document.
    pub explicit_start: bool,
    /// Writes sequences nested in sequences on the same line as their dash.
    pub compact: bool,
    /// Writes strings containing line breaks as literal block scalars.
    pub multiline_strings: bool,
}

impl Default for DumpOptions {
    fn default() -> Self {
        DumpOptions {
            line_break: LineBreak::default(),
            explicit_root: None,
            explicit_start: false,
            compact: true,
            multiline_strings: false,
        }
    }
}
