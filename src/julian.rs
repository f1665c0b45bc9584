//! Proleptic Julian calendar core (component C2, Julian half).
//!
//! Mirrors [`crate::gregorian`]'s shape exactly, differing only in the
//! leap rule (every 4th year, no century exception) and the shifted-year
//! day offset. Shares the month-interpolation helpers of
//! [`crate::month`] since the shifted (March-start) calendar layout is
//! identical between the two calendars.

use crate::arith::{self, GmDivisor};
use crate::error::{Error, Result};
use crate::gregorian::CivilDate;
use crate::month;
use crate::Rdn;

const GM_QUAD: GmDivisor = GmDivisor::from_parts(1461, 21, 0xB6A00000);

/// Count of leap days among `e` elapsed years (may be negative) under the
/// Julian rule: every 4th year is leap, no exceptions. `ASR(e, 2)` is
/// exactly `floor(e/4)` since Rust's signed `>>` is arithmetic.
pub fn leap_days(e: i32) -> i32 {
    arith::asr_i32(e, 2)
}

/// Whether `year` is a leap year under the proleptic Julian rule.
pub fn is_leap(year: i32) -> bool {
    year % 4 == 0
}

/// RDN of the first day (`month=1, day=1`) of `year` under the Julian
/// calendar.
pub fn year_start_rdn(year: i32) -> Rdn {
    let e = year - 1;
    (e as i64 * 365 + leap_days(e) as i64 + 1) as Rdn
}

/// Split an RDN into `(year, day_of_year, leap)` under the Julian
/// calendar, `day_of_year` 0-based. A single-phase division: no century
/// correction is needed since the Julian rule has none.
pub fn rdn_to_year_day_leap(rdn: Rdn) -> (i32, u32, bool) {
    let n: i64 = (rdn as i64) * 4 + 7;
    #[cfg(feature = "narrow-div")]
    let (qy, rc): (i64, u32) = arith::floor_div_i64_gm(n, &GM_QUAD);
    #[cfg(not(feature = "narrow-div"))]
    let (qy, rc): (i64, u32) = arith::floor_div_u32_wide(n, 1461);

    let day_of_year = (rc | 3) >> 2;
    let leap = qy % 4 == 3;
    (qy as i32, day_of_year, leap)
}

/// Compose `(year, month, day)` into an RDN under the Julian calendar, via
/// the shifted (March-start) calendar.
pub fn date_to_rdn(year: i32, month: u32, day: u32) -> Rdn {
    let (year_carry, em) = month::shift_month(month);
    let ey = (year - 1) + year_carry as i32;
    let dm = month::months_to_days(em);
    (ey as i64 * 365 + leap_days(ey) as i64 + dm as i64 + day as i64 - 308) as Rdn
}

/// Build a fully-populated [`CivilDate`] from an RDN under the Julian
/// calendar.
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

/// Length in days of `month` (1..12) in `year` under the Julian calendar.
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
    if day < 1 || day > days_in_month(year, month) {
        return Err(Error::InvalidInput);
    }
    Ok(date_to_rdn(year, month, day))
}
