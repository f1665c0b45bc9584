//! `calscale`: a compact, dependency-free civil-calendar and time-scale
//! conversion library.
//!
//! Five time abstractions are related through a common linear day count,
//! the RDN (Rata Die Number — `RDN(0001-01-01 Gregorian) == 1`):
//!
//! - the proleptic Gregorian calendar ([`gregorian`]),
//! - the proleptic Julian calendar ([`julian`]),
//! - the ISO 8601 week calendar ([`isoweek`]),
//! - a GPS/GNSS raw time stamp, truncated 10-bit week + seconds-in-week
//!   ([`gps`]),
//! - the NTP seconds-since-1900 scale ([`ntp`]).
//!
//! [`tz`] additionally parses and evaluates POSIX `TZ` strings to map
//! between UTC-scale seconds and local wallclock time, including the
//! spring-gap/autumn-overlap disambiguation a DST transition requires.
//!
//! [`arith`] holds the branch-free integer primitives ([`gregorian`],
//! [`julian`], [`isoweek`], [`daytime`], [`gps`] all build on it); [`month`]
//! is the shifted-calendar interpolation the two calendar cores share;
//! [`weekday`] is the day-of-week arithmetic [`tz::posix`] anchors its
//! transition rules on; [`rellez`] is the two-digit-year recovery shared by
//! [`gregorian`]/[`julian`] callers and [`gps::gps_full_year`].
//!
//! Every type here is a plain `Copy` value; there is no process-wide mutable
//! state, no heap allocation, and no I/O. The `narrow-div` feature swaps the
//! default native-width division at a handful of call sites for an explicit
//! Granlund-Moller division step, for 32-bit-only targets where 64-bit
//! hardware division is slow or absent — both paths are exercised by the
//! same tests and are bit-identical.

pub mod arith;
pub mod daytime;
pub mod error;
pub mod gps;
pub mod gregorian;
pub mod isoweek;
pub mod julian;
pub mod month;
pub mod ntp;
pub mod rellez;
pub mod tz;
pub mod weekday;

/// A Rata Die Number: a signed day count where `RDN(0001-01-01 Gregorian)
/// == 1` and `RDN(0001-01-01 Julian) == -1`. Used as the common currency
/// every calendar and time-scale conversion in this crate passes through.
pub type Rdn = i32;

/// `RDN` of 1900-01-01 proleptic Gregorian (spec-contractual: 693596).
pub const RDN_1900_01_01: Rdn = 693_596;
/// `RDN` of 1970-01-01 proleptic Gregorian, the Unix epoch
/// (spec-contractual: 719163).
pub const RDN_1970_01_01: Rdn = 719_163;
/// `RDN` of 1980-01-06 proleptic Gregorian, the GPS epoch
/// (spec-contractual: 722820).
pub const RDN_1980_01_06: Rdn = 722_820;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contractual_rdn_anchors() {
        assert_eq!(gregorian::date_to_rdn(1900, 1, 1), RDN_1900_01_01);
        assert_eq!(gregorian::date_to_rdn(1970, 1, 1), RDN_1970_01_01);
        assert_eq!(gregorian::date_to_rdn(1980, 1, 6), RDN_1980_01_06);
    }
}
