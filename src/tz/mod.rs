//! POSIX `TZ` string parsing and evaluation (component C9): parse a
//! `TZ`-style string into a [`posix::PosixZone`], then use [`context`]'s
//! `ConvCtx`/hint-based queries to convert between UTC-scale seconds and
//! local wallclock time.
pub mod context;
pub mod posix;
pub(crate) mod scan;
