//! This crate writes config objects as YAML text with comment headers and
//! multi-document framing.
//!
//! Values are represented through the [Serde] serialization framework and
//! emitted with [yaml-rust2]. [`YamlConf`] adds what plain serialization does
//! not do: a comment block before a document, one or more documents in the
//! same output, each optionally described by its own comment block.
//!
//! [Serde]: https://github.com/serde-rs/serde
//! [yaml-rust2]: https://github.com/Ethiraric/yaml-rust2
//!
//! # Examples
//!
//! ```
//! use serde_derive::Serialize;
//! use yamlconf::{Document, Engine, YamlConf, YamlFormat};
//!
//! #[derive(Serialize)]
//! struct Status {
//!     online: bool,
//! }
//!
//! #[derive(Serialize, YamlFormat)]
//! #[yaml(description = "Shown below the server name")]
//! struct Motd {
//!     text: &'static str,
//! }
//!
//! fn main() -> Result<(), yamlconf::Error> {
//!     let engine = Engine::default();
//!     let conf = YamlConf::new(&engine);
//!
//!     let s = conf.dump_with_header(&["Server status"], &Status { online: true })?;
//!     assert_eq!(s, "# Server status\nonline: true\n");
//!
//!     let documents: [&dyn Document; 2] = [&Status { online: false }, &Motd { text: "hi" }];
//!     let s = conf.dump_all_with_header(&["Config v2"], &documents)?;
//!     assert_eq!(
//!         s,
//!         "# Config v2\n\n--- online: false\n\n# Shown below the server name\n--- text: hi\n",
//!     );
//!     Ok(())
//! }
//! ```

#![doc(html_root_url = "https://docs.rs/yamlconf/0.1.0")]
#![deny(missing_docs)]
#![allow(
    // things are often more readable this way
    clippy::module_name_repetitions,
    clippy::cast_lossless,
    // noisy
    clippy::missing_errors_doc,
    clippy::must_use_candidate,
)]

// Lets code generated by yamlconf_derive name this crate from within it.
extern crate self as yamlconf;

pub use crate::conf::YamlConf;
pub use crate::document::Document;
pub use crate::engine::{to_string, to_vec, to_writer, Engine};
pub use crate::error::{Error, Result};
pub use crate::options::{DumpOptions, LineBreak, Tag};
pub use crate::ser::Representer;
pub use crate::yamlformat::{Format, MemberId, YamlFormat};

pub mod conf;
pub mod describe;
mod document;
mod engine;
mod error;
mod options;
mod ser;
pub mod yamlformat;

#[doc(hidden)]
pub mod __private {
    pub use crate::yamlformat::{Format, MemberId, Registration, YamlFormat};
    pub use inventory;
}
