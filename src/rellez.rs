//! Two-digit-year recovery ("Rellez" — reversed "Zeller"), component C2,
//! shared with the GPS era-unfolding helpers in [`crate::gps`].
//!
//! Given a 2-digit year, a month/day, the ISO weekday the date actually
//! fell on, and a base year, recovers the unique full year in
//! `[base_year, base_year + period)` whose `(month, day, weekday)`
//! signature matches — the period being 400 years for the Gregorian
//! calendar and 700 for the Julian (the smallest common multiple of the
//! calendar's weekday-repeat cycle and the 100-year stride a 2-digit year
//! is constrained to).
//!
//! Candidates are generated directly at the 100-year stride implied by the
//! fixed 2-digit year, then validated against the real calendar (including
//! its century leap exceptions) and checked against the supplied weekday
//! using the already-verified [`crate::gregorian`]/[`crate::julian`] and
//! [`crate::weekday`] engines, rather than re-deriving Zeller's congruence
//! independently — the two money formulas must agree by construction, and
//! there are at most seven candidates to check.

use crate::error::{Error, Result};
use crate::weekday::Weekday;
use crate::{gregorian, julian};

fn first_candidate(y: u32, base_year: i32) -> i32 {
    let y = y as i32;
    let rem = base_year.rem_euclid(100);
    let delta = (y - rem).rem_euclid(100);
    base_year + delta
}

fn rellez_generic(
    y: u32,
    month: u32,
    day: u32,
    wday: u32,
    base_year: i32,
    period: i32,
    date_to_rdn: impl Fn(i32, u32, u32) -> Result<i32>,
    weekday_from_rdn: impl Fn(i32) -> Weekday,
) -> Result<i16> {
    if y > 99 || !(1..=12).contains(&month) || !(1..=31).contains(&day) || !(1..=7).contains(&wday)
    {
        return Err(Error::InvalidInput);
    }
    let target = Weekday::from_iso(wday as u8).ok_or(Error::InvalidInput)?;

    let first = first_candidate(y, base_year);
    let mut year = first;
    while year < base_year + period {
        if let Ok(rdn) = date_to_rdn(year, month, day) {
            if weekday_from_rdn(rdn) == target {
                return i16::try_from(year).map_err(|_| Error::OutOfRange);
            }
        }
        year += 100;
    }
    Err(Error::InvalidInput)
}

/// Recover the full Gregorian year for 2-digit year `y`, `(month, day)`,
/// and the weekday `wday` (1=Monday..7=Sunday) the date fell on, searching
/// `[base_year, base_year + 400)`.
pub fn rellez_gregorian(y: u32, month: u32, day: u32, wday: u32, base_year: i32) -> Result<i16> {
    rellez_generic(
        y,
        month,
        day,
        wday,
        base_year,
        400,
        |yr, m, d| gregorian::checked_date_to_rdn(yr, m, d),
        crate::weekday::from_rdn,
    )
}

/// Recover the full Julian year for 2-digit year `y`, `(month, day)`, and
/// the weekday `wday` (1=Monday..7=Sunday) the date fell on, searching
/// `[base_year, base_year + 700)`.
pub fn rellez_julian(y: u32, month: u32, day: u32, wday: u32, base_year: i32) -> Result<i16> {
    rellez_generic(
        y,
        month,
        day,
        wday,
        base_year,
        700,
        |yr, m, d| julian::checked_date_to_rdn(yr, m, d),
        crate::weekday::from_rdn,
    )
}
