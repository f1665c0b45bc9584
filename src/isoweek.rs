//! ISO 8601 week calendar (component C4).
//!
//! Decomposes an RDN into elapsed-years/elapsed-weeks the same way the
//! Gregorian and Julian splitters decompose it into elapsed-years/
//! elapsed-days (`other_examples`'s `radnelac` ISO week class takes an
//! unrelated Reingold-Dershowitz fixed-day approach instead), using the
//! same range-checked-smart-constructor idiom as [`crate::gregorian`] and
//! [`crate::julian`].

use crate::arith::{self, GmDivisor};
use crate::error::{Error, Result};
use crate::weekday::Weekday;
use crate::Rdn;

const GM_ISOWEEK: GmDivisor = GmDivisor::from_parts(20871, 17, 0xA30E0000);

/// An ISO 8601 week-numbering date: `{iso_year, week, wday}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeekDate {
    pub iso_year: i16,
    pub week: u8,
    pub wday: Weekday,
}

/// Cumulative ISO weeks elapsed through elapsed-year `e` (i.e. the number
/// of full ISO weeks between the system's RDN anchor and the first Monday
/// of ISO year `e+1`). Split into a century term and a fixed-point partial
/// term, carried in 64-bit to avoid intermediate overflow regardless of
/// the crate's division feature.
pub fn elapsed_weeks(e: i32) -> i64 {
    const OFF: [i64; 4] = [448, 160, 896, 608];

    let (qc, rc) = arith::floor_div_u32(e, 100);
    let (carry, _) = arith::floor_div_u32(qc + 2, 4);
    let base = qc as i64 * 5218 - carry as i64;

    let idx = qc.rem_euclid(4) as usize;
    let partial = (rc as i64 * 53431 + OFF[idx]) >> 10;

    base + partial
}

/// Number of ISO weeks in ISO year `y` (52 or 53).
pub fn weeks_in_iso_year(y: i32) -> u32 {
    (elapsed_weeks(y) - elapsed_weeks(y - 1)) as u32
}

/// RDN of the Monday that starts ISO week 1 of `iso_year`.
pub fn year_start_rdn(iso_year: i32) -> Rdn {
    (elapsed_weeks(iso_year - 1) * 7 + 1) as Rdn
}

/// Compose an ISO week date into an RDN.
pub fn date_to_rdn(iso_year: i32, week: u32, wday: Weekday) -> Rdn {
    year_start_rdn(iso_year) + (week as i32 - 1) * 7 + (wday.as_iso() as i32 - 1)
}

/// Validate `(iso_year, week, wday)` and compose it into an RDN, rejecting
/// a week number past the year's actual week count.
pub fn checked_date_to_rdn(iso_year: i32, week: u32, wday: Weekday) -> Result<Rdn> {
    if week < 1 || week > weeks_in_iso_year(iso_year) {
        return Err(Error::InvalidInput);
    }
    Ok(date_to_rdn(iso_year, week, wday))
}

/// Split an RDN into an ISO week date via a three-step decomposition:
/// day-of-week split, century split, partial-year split.
pub fn date_from_rdn(rdn: Rdn) -> Result<WeekDate> {
    let (w, d) = arith::floor_div_u32_wide(rdn as i64 - 1, 7);

    let n2 = 4 * w + 2;
    #[cfg(feature = "narrow-div")]
    let (qc, rc): (i64, u32) = arith::floor_div_i64_gm(n2, &GM_ISOWEEK);
    #[cfg(not(feature = "narrow-div"))]
    let (qc, rc): (i64, u32) = arith::floor_div_u32_wide(n2, 20871);

    const OFF2: [i64; 4] = [84, 128, 16, 62];
    let idx = qc.rem_euclid(4) as usize;
    let n3 = ((rc >> 2) as i64) * 157 + OFF2[idx];
    let (qy, w_rem) = arith::floor_div_u32_wide(n3, 8192);

    let iso_year = 100 * qc + qy + 1;
    if iso_year < i16::MIN as i64 || iso_year > i16::MAX as i64 {
        return Err(Error::OutOfRange);
    }
    let week = (w_rem / 157) + 1;
    let wday = Weekday::from_iso((d + 1) as u8).expect("day split always yields 0..=6");

    Ok(WeekDate {
        iso_year: iso_year as i16,
        week: week as u8,
        wday,
    })
}
