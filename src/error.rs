//-
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! The error taxonomy exposed by this crate.
//!
//! Every fallible operation returns [`Result<T>`], a crate-local alias for
//! `core::result::Result<T, Error>`. `Error`'s variants are the concrete
//! kinds a caller can match on.

use core::fmt;

/// Crate-local `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;

/// Everything that can go wrong while parsing a pattern, resolving an
/// alphabet, or driving the generator façade.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The pattern (or the alphabet string) could not be parsed under the
    /// supported regex subset.
    Pattern(PatternError),
    /// `render_set` drew `max_iter` samples without collecting the
    /// requested number of distinct values.
    MaxIterationsReached {
        /// How many distinct samples were requested.
        requested: usize,
        /// How many distinct samples had been collected when the cap hit.
        collected: usize,
        /// The `max_iter` cap that was reached.
        max_iter: usize,
    },
    /// An argument failed validation before any work was attempted: a
    /// non-positive `n`, an `n` that exceeds `count()`, or an unknown
    /// process-config key.
    InvalidArgument {
        /// The name of the offending argument or key.
        what: &'static str,
        /// Why it was rejected.
        reason: String,
    },
}

/// A pattern (or alphabet string) that could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternError {
    /// The source string that failed to parse.
    pub source: String,
    /// Byte offset into `source` where the parser gave up.
    pub offset: usize,
    /// Human-readable explanation.
    pub message: String,
}

impl PatternError {
    pub(crate) fn new(
        source: impl Into<String>,
        offset: usize,
        message: impl Into<String>,
    ) -> Self {
        PatternError {
            source: source.into(),
            offset,
            message: message.into(),
        }
    }
}

impl fmt::Display for PatternError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid pattern at byte {}: {} (in {:?})",
            self.offset, self.message, self.source
        )
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Pattern(err) => write!(f, "{}", err),
            Error::MaxIterationsReached {
                requested,
                collected,
                max_iter,
            } => write!(
                f,
                "only collected {} of {} requested distinct samples after \
                 {} iterations",
                collected, requested, max_iter
            ),
            Error::InvalidArgument { what, reason } => {
                write!(f, "invalid value for {}: {}", what, reason)
            }
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        None
    }
}

impl From<PatternError> for Error {
    fn from(err: PatternError) -> Error {
        Error::Pattern(err)
    }
}
