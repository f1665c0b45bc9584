//! Proleptic Gregorian calendar core (component C2, Gregorian half).
//!
//! Everything here is anchored on the RDN (Rata Die Number): a signed
//! day count where RDN 1 is 0001-01-01 proleptic Gregorian. The leap-year
//! test and the Neri-Schneider-style `date()` split follow
//! `ariebovenberg-whenever`'s `Year`/`UnixDays` value types, re-based from
//! Unix-epoch-relative days to RDN and given the century-normalized
//! Granlund-Moller divide the `narrow-div` feature path needs.

use crate::arith::{self, GmDivisor};
use crate::error::{Error, Result};
use crate::month;
use crate::weekday::Weekday;
use crate::Rdn;

/// A civil calendar date together with its derived fields, as produced by
/// both the Gregorian and Julian splitters. `yday` and `wday` are always
/// consistent with `(year, month, day)` under the owning calendar's leap
/// rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CivilDate {
    pub year: i16,
    pub month: u8,
    pub day: u8,
    pub yday: u16,
    pub wday: Weekday,
    pub leap: bool,
}

const GM_CENTURY: GmDivisor = GmDivisor::from_parts(146097, 14, 0x8EAC4000);

/// Count of leap days among `e` elapsed years (may be negative) under the
/// Gregorian rule: every 4th year is leap, except centuries, except every
/// 4th century. Composed directly from [`arith::floor_div_u32`], which
/// already supplies the branch-free floor semantics the inclusion-exclusion
/// (`q4 - q100 + q400`) compensation needs.
pub fn leap_days(e: i32) -> i32 {
    let (q4, _) = arith::floor_div_u32(e, 4);
    let (q100, _) = arith::floor_div_u32(e, 100);
    let (q400, _) = arith::floor_div_u32(e, 400);
    q4 - q100 + q400
}

/// Whether `year` is a leap year under the proleptic Gregorian rule.
pub fn is_leap(year: i32) -> bool {
    (year % 4 == 0) && ((year % 100 != 0) || (year % 400 == 0))
}

/// RDN of the first day (`month=1, day=1`) of `year`.
pub fn year_start_rdn(year: i32) -> Rdn {
    let e = year - 1;
    (e as i64 * 365 + leap_days(e) as i64 + 1) as Rdn
}

/// Split an RDN into `(year, day_of_year, leap)`, `day_of_year` 0-based.
/// A two-phase division: a century split (optionally via the normalized
/// Granlund-Moller divisor when the `narrow-div` feature is enabled)
/// followed by a 4-year split.
pub fn rdn_to_year_day_leap(rdn: Rdn) -> (i32, u32, bool) {
    let n: i64 = (rdn as i64) * 4 - 1;
    #[cfg(feature = "narrow-div")]
    let (qc, rc): (i64, u32) = {
        let (q, r) = arith::floor_div_i64_gm(n, &GM_CENTURY);
        (q, r)
    };
    #[cfg(not(feature = "narrow-div"))]
    let (qc, rc): (i64, u32) = arith::floor_div_u32_wide(n, 146097);

    let sday = rc | 3;
    let qy = sday / 1461;
    let sday_rem = sday % 1461;
    let day_of_year = sday_rem >> 2;
    let leap = (qy % 4 == 3) && (qy <= 96 + (qc as u32 % 4));
    let year = 100 * qc as i32 + qy as i32 + 1;
    (year, day_of_year, leap)
}

/// Compose `(year, month, day)` into an RDN, via the shifted
/// (March-start) calendar.
pub fn date_to_rdn(year: i32, month: u32, day: u32) -> Rdn {
    let (year_carry, em) = month::shift_month(month);
    let ey = (year - 1) + year_carry as i32;
    let dm = month::months_to_days(em);
    (ey as i64 * 365 + leap_days(ey) as i64 + dm as i64 + day as i64 - 306) as Rdn
}

/// Build a fully-populated [`CivilDate`] from an RDN, filling `wday` via
/// [`crate::weekday::from_rdn`]. Fails with [`Error::OutOfRange`] if the
/// resulting year does not fit `i16` (`y in [INT16_MIN, INT16_MAX]`).
pub fn date_from_rdn(rdn: Rdn) -> Result<CivilDate> {
    let (year, yday, leap) = rdn_to_year_day_leap(rdn);
    if year < i16::MIN as i32 || year > i16::MAX as i32 {
        return Err(Error::OutOfRange);
    }
    let (m0, d0) = month::days_to_month(yday, leap);
    Ok(CivilDate {
        year: year as i16,
        month: (m0 + 1) as u8,
        day: (d0 + 1) as u8,
        yday: (yday + 1) as u16,
        wday: crate::weekday::from_rdn(rdn),
        leap,
    })
}

/// Length in days of `month` (1..12) in `year`.
pub fn days_in_month(year: i32, month: u32) -> u32 {
    const LENGTHS: [u32; 12] = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];
    if month == 2 && is_leap(year) {
        29
    } else {
        LENGTHS[(month - 1) as usize]
    }
}

/// Validate `(year, month, day)` and map it to an RDN, rejecting
/// impossible calendar dates with [`Error::InvalidInput`].
pub fn checked_date_to_rdn(year: i32, month: u32, day: u32) -> Result<Rdn> {
    if !(1..=12).contains(&month) {
        return Err(Error::InvalidInput);
    }
    if day < 1 || day > days_in_month(year, month) as u32 {
        return Err(Error::InvalidInput);
    }
    Ok(date_to_rdn(year, month, day))
}
