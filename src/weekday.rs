//! ISO weekday numbering and day-of-week shift operations (component C5).
//!
//! ISO numbering (Monday=1..Sunday=7), re-based from a Unix-days-relative
//! domain to the full `Rdn` (`i32`) domain, with explicit overflow
//! reporting in place of an `Option`-only bounds check.

use crate::arith;
use crate::error::{Error, Result};
use crate::Rdn;

/// ISO 8601 weekday numbering: Monday is 1, Sunday is 7.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Weekday {
    Monday = 1,
    Tuesday = 2,
    Wednesday = 3,
    Thursday = 4,
    Friday = 5,
    Saturday = 6,
    Sunday = 7,
}

impl Weekday {
    /// Build a `Weekday` from its ISO number (1..7). Returns `None` outside
    /// that range.
    pub const fn from_iso(n: u8) -> Option<Self> {
        Some(match n {
            1 => Weekday::Monday,
            2 => Weekday::Tuesday,
            3 => Weekday::Wednesday,
            4 => Weekday::Thursday,
            5 => Weekday::Friday,
            6 => Weekday::Saturday,
            7 => Weekday::Sunday,
            _ => return None,
        })
    }

    /// The ISO number of this weekday (1..7, Monday=1).
    pub const fn as_iso(self) -> u8 {
        self as u8
    }

    /// Build a `Weekday` from a zero-based, Sunday=0 index (the convention
    /// POSIX TZ `Mm.w.d` rules and the `rem_euclid` of most weekday math
    /// naturally produce).
    pub const fn from_sunday_zero(n: u8) -> Option<Self> {
        Self::from_iso(if n == 0 { 7 } else { n })
    }
}

/// The weekday that RDN `rdn` falls on. RDN 1 (0001-01-01 proleptic
/// Gregorian) is historically a Monday.
pub fn from_rdn(rdn: Rdn) -> Weekday {
    let r = arith::mod7(rdn.wrapping_sub(1));
    Weekday::from_iso((r + 1) as u8).expect("mod7 result is always in 0..=6")
}

fn shift_or_range_error(rdn: Rdn, shift: i32) -> Result<Rdn> {
    rdn.checked_add(shift).ok_or(Error::OutOfRange)
}

/// The RDN of the first occurrence of `target` on or after `rdn`.
pub fn on_or_after(rdn: Rdn, target: Weekday) -> Result<Rdn> {
    let cur = from_rdn(rdn).as_iso() as i32;
    let shift = arith::mod7(target.as_iso() as i32 - cur);
    shift_or_range_error(rdn, shift)
}

/// The RDN of the first occurrence of `target` strictly after `rdn`.
pub fn after(rdn: Rdn, target: Weekday) -> Result<Rdn> {
    let cur = from_rdn(rdn).as_iso() as i32;
    let shift = arith::mod7(target.as_iso() as i32 - cur);
    let shift = if shift == 0 { 7 } else { shift };
    shift_or_range_error(rdn, shift)
}

/// The RDN of the most recent occurrence of `target` on or before `rdn`.
pub fn on_or_before(rdn: Rdn, target: Weekday) -> Result<Rdn> {
    let cur = from_rdn(rdn).as_iso() as i32;
    let shift = arith::mod7(cur - target.as_iso() as i32);
    shift_or_range_error(rdn, -shift)
}

/// The RDN of the most recent occurrence of `target` strictly before
/// `rdn`.
pub fn before(rdn: Rdn, target: Weekday) -> Result<Rdn> {
    let cur = from_rdn(rdn).as_iso() as i32;
    let shift = arith::mod7(cur - target.as_iso() as i32);
    let shift = if shift == 0 { 7 } else { shift };
    shift_or_range_error(rdn, -shift)
}

/// The RDN of the occurrence of `target` nearest to `rdn` (within 3 days
/// either side); ties are broken toward the side that avoids an overflow
/// at the signed-32 boundary.
pub fn nearest(rdn: Rdn, target: Weekday) -> Result<Rdn> {
    let cur = from_rdn(rdn).as_iso() as i32;
    let fwd = arith::mod7(target.as_iso() as i32 - cur);
    let back = arith::mod7(cur - target.as_iso() as i32);
    let shift = if fwd <= back {
        if rdn.checked_add(fwd).is_some() {
            fwd
        } else {
            -back
        }
    } else if rdn.checked_sub(back).is_some() {
        -back
    } else {
        fwd
    };
    shift_or_range_error(rdn, shift)
}
