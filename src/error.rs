// Copyright 2016 Serde YAML Developers
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use crate::options::Tag;
use serde::ser;
use std::error;
use std::fmt::{self, Debug, Display};
use std::io;
use std::result;
use std::string;
use yaml_rust2::EmitError;

/// An error that happened while producing YAML output.
///
/// Failures to write into the output sink are reported as this type too, with
/// the underlying `io::Error` available through [`Error::io_error`] and
/// [`std::error::Error::source`].
pub struct Error(Box<ErrorImpl>);

/// Alias for a `Result` with the error type `yamlconf::Error`.
pub type Result<T> = result::Result<T, Error>;

enum ErrorImpl {
    Message(String),
    Emit(EmitError),
    Io(io::Error),
    FromUtf8(string::FromUtf8Error),
    RootTag { expected: Tag, found: &'static str },
}

impl Error {
    /// Returns the sink failure that caused this error, if any.
    pub fn io_error(&self) -> Option<&io::Error> {
        match &*self.0 {
            ErrorImpl::Io(err) => Some(err),
            _ => None,
        }
    }

    /// Returns true if the document root did not match the forced root tag.
    pub fn is_root_mismatch(&self) -> bool {
        matches!(*self.0, ErrorImpl::RootTag { .. })
    }
}

pub(crate) fn io(err: io::Error) -> Error {
    Error(Box::new(ErrorImpl::Io(err)))
}

pub(crate) fn emitter(err: EmitError) -> Error {
    Error(Box::new(ErrorImpl::Emit(err)))
}

pub(crate) fn string_utf8(err: string::FromUtf8Error) -> Error {
    Error(Box::new(ErrorImpl::FromUtf8(err)))
}

pub(crate) fn root_tag(expected: Tag, found: &'static str) -> Error {
    Error(Box::new(ErrorImpl::RootTag { expected, found }))
}

pub(crate) fn message<T: Display>(msg: T) -> Error {
    Error(Box::new(ErrorImpl::Message(msg.to_string())))
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match &*self.0 {
            ErrorImpl::Io(err) => Some(err),
            ErrorImpl::FromUtf8(err) => Some(err),
            _ => None,
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &*self.0 {
            ErrorImpl::Message(msg) => Display::fmt(msg, f),
            ErrorImpl::Emit(err) => write!(f, "failed to emit YAML: {}", err),
            ErrorImpl::Io(err) => write!(f, "failed to write YAML output: {}", err),
            ErrorImpl::FromUtf8(err) => Display::fmt(err, f),
            ErrorImpl::RootTag { expected, found } => {
                write!(f, "expected {} at document root, found {}", expected, found)
            }
        }
    }
}

// Remove two layers of verbosity from the debug representation. Humans often
// end up seeing this representation because it is what unwrap() shows.
impl Debug for Error {
    fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        match &*self.0 {
            ErrorImpl::Message(msg) => formatter.debug_tuple("Message").field(msg).finish(),
            ErrorImpl::Emit(emit) => formatter.debug_tuple("Emit").field(emit).finish(),
            ErrorImpl::Io(io) => formatter.debug_tuple("Io").field(io).finish(),
            ErrorImpl::FromUtf8(from_utf8) => {
                formatter.debug_tuple("FromUtf8").field(from_utf8).finish()
            }
            ErrorImpl::RootTag { expected, found } => formatter
                .debug_struct("RootTag")
                .field("expected", expected)
                .field("found", found)
                .finish(),
        }
    }
}

impl ser::Error for Error {
    fn custom<T: Display>(msg: T) -> Self {
        message(msg)
    }
}
