//! Structured error channel for the operations that can fail.
//!
//! The branch-free primitives and calendar splitters in the rest of the
//! crate keep returning `Option<T>`/sentinel values, a boolean/sentinel
//! contract cheap enough to check at every call site (see the crate-level
//! docs). `Error` is only constructed at the handful of public operations
//! whose failure modes are richer than "out of range": TZ string parsing,
//! two-digit-year recovery, and local/UTC conversion queries.

use std::fmt;

/// A three-way error taxonomy, carried per call instead of through a
/// thread-local `errno`-style indicator.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Error {
    /// Malformed input: an unparsable TZ string, an impossible
    /// (year, month, day, weekday) tuple passed to Rellez, or an
    /// aligned-range period outside `1..=7*86400`.
    InvalidInput,
    /// A value would not fit its output type: an ISO year outside `i16`,
    /// a weekday shift past `i32::MIN`/`MAX`, a GPS/NTP remap past range.
    OutOfRange,
    /// A local wallclock query fell in a spring gap or autumn overlap and
    /// no disambiguating hint was given.
    Ambiguous,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Error::InvalidInput => "invalid input",
            Error::OutOfRange => "value out of range",
            Error::Ambiguous => "ambiguous local time without a disambiguation hint",
        })
    }
}

impl std::error::Error for Error {}

pub type Result<T> = std::result::Result<T, Error>;
