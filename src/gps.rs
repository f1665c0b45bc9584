//! GPS/GNSS raw time era mapping and two-digit-year recovery for
//! receivers (component C8).
//!
//! Grounded on `other_examples`'s `swift-nav-swiftnav-rs` `MJD`
//! modular week/tow decomposition against a reference epoch for the
//! era-unfolding shape, and on [`crate::rellez`] (shared with C2) for the
//! two-digit-year recovery `gps_full_year` uses.
//!
//! The `ls` leap-second parameter is pinned, per the design ledger, as
//! the UTC->GPS offset in seconds (`GPS = UTC + ls`); this crate bundles
//! no leap-second table and expects the caller to supply the
//! currently-published value.

use std::time::{SystemTime, UNIX_EPOCH};

use crate::error::{Error, Result};
use crate::rellez;
use crate::{gregorian, Rdn};

/// `(RDN(1980-01-06) - 1) mod (7*1024)`: the GPS epoch's phase within a
/// 1024-week era, in days.
pub const PHI_GPS_DAYS: i64 = 6019;
/// `((RDN(1980-01-06) - RDN(1970-01-01)) * 86400) mod (1024*7*86400)`: the
/// GPS epoch's phase within a 1024-week era, in seconds.
pub const PHI_GPS_SYS_SEC: i64 = 0x12D5_3D80;
/// Length of one GPS era: 1024 weeks, in seconds.
pub const GPS_ERA_SECONDS: i64 = 1024 * 604800;
/// Length of one GPS era, in days.
pub const GPS_ERA_DAYS: i64 = 1024 * 7;

/// A raw GPS time stamp as broadcast by a receiver: a 10-bit week number
/// and seconds-into-week, each cyclic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GpsRawTime {
    pub week: u16,
    pub tow: u32,
}

fn now_unix_secs() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}

/// Map a `time_t` instant `tt` to a [`GpsRawTime`], applying leap-second
/// offset `ls` (`GPS = UTC + ls`).
pub fn gps_map_time(tt: i64, ls: i32) -> GpsRawTime {
    let (_, r) = crate::arith::floor_div_u32_wide(tt, GPS_ERA_SECONDS as u32);
    let x = r as i64 - PHI_GPS_SYS_SEC + ls as i64;
    let (q, tow) = crate::arith::floor_div_u32_wide(x, 604800);
    let week = (q as u32 & 1023) as u16;
    GpsRawTime { week, tow }
}

/// Map a raw `(week, tow)` to an RDN/time-in-day pair, choosing the era
/// whose RDN falls nearest `base_rdn`. Fails with [`Error::OutOfRange`]
/// if the result would not fit `i32`.
pub fn gps_map_raw1(week: u16, tow: u32, ls: i32, base_rdn: Rdn) -> Result<(Rdn, u32)> {
    let (dcarry, time_in_day) = crate::arith::floor_div_u32(tow as i32 - ls, 86400);
    let days = (week as i64 & 1023) * 7 + dcarry as i64 + PHI_GPS_DAYS;
    let (_, offset) =
        crate::arith::floor_div_u32_wide(days + 1 - base_rdn as i64, GPS_ERA_DAYS as u32);
    let result = base_rdn as i64 + offset as i64;
    if result > i32::MAX as i64 {
        return Err(Error::OutOfRange);
    }
    Ok((result as Rdn, time_in_day))
}

/// Map a raw `(week, tow)` to a `time_t` instant, choosing the era
/// nearest `base` (or, if `base` is `None`, nearest the current time).
pub fn gps_map_raw2(week: u16, tow: u32, ls: i32, base: Option<i64>) -> i64 {
    let mut tb = base.unwrap_or_else(|| now_unix_secs() - GPS_ERA_SECONDS / 2);
    if tb < PHI_GPS_SYS_SEC {
        tb = PHI_GPS_SYS_SEC;
    }
    let r = (week as i64 & 1023) * 604800 + tow as i64 - ls as i64 + PHI_GPS_SYS_SEC - tb;
    let (_, r_mod) = crate::arith::floor_div_u32_wide(r, GPS_ERA_SECONDS as u32);
    tb + r_mod as i64
}

/// Recover the full year for a receiver-reported `(y, month, day)`, where
/// `y` is either already a full year (if `>= 1980`) or a 2-digit year
/// needing recovery. `wday`, if known, is used to disambiguate via
/// [`rellez::rellez_gregorian`] before falling back to the plain
/// `< 80 => +2000, else +1900` pivot rule.
pub fn gps_full_year(y: i32, month: u32, day: u32, wday: Option<u32>) -> i32 {
    if y >= 1980 {
        return y;
    }
    let y2 = y.rem_euclid(100) as u32;
    if let Some(wd) = wday {
        if let Ok(year) = rellez::rellez_gregorian(y2, month, day, wd, 1980) {
            if year as i32 >= 1980 {
                return year as i32;
            }
        }
    }
    if y2 < 80 {
        y2 as i32 + 2000
    } else {
        y2 as i32 + 1900
    }
}

/// Snap `rdn` into the 1024-week era nearest `base_rdn`, preserving its
/// residue modulo the era length.
pub fn gps_remap_rdn(rdn: Rdn, base_rdn: Rdn) -> Rdn {
    let (_, off) =
        crate::arith::floor_div_u32_wide(rdn as i64 - base_rdn as i64, GPS_ERA_DAYS as u32);
    (base_rdn as i64 + off as i64) as Rdn
}

/// Resolve a receiver-reported date (with possibly-ambiguous 2-digit
/// year) into an RDN, combining [`gps_full_year`] and [`gps_remap_rdn`].
pub fn gps_date_unfold(
    y: i32,
    month: u32,
    day: u32,
    wday: Option<u32>,
    base_rdn: Rdn,
) -> Result<Rdn> {
    let full_year = gps_full_year(y, month, day, wday);
    let rdn = gregorian::checked_date_to_rdn(full_year, month, day)?;
    Ok(gps_remap_rdn(rdn, base_rdn))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn s6_gps_map_raw1_era_anchor() {
        let base = crate::RDN_1980_01_06;
        assert_eq!(gps_map_raw1(0, 0, 0, base).unwrap(), (base, 0));

        let base_next_era = base + GPS_ERA_DAYS as i32;
        let r2 = gps_map_raw1(0, 0, 0, base_next_era).unwrap();
        assert_eq!(r2, (base_next_era, 0));

        let base_forward_wrap = base + GPS_ERA_DAYS as i32 - 100 * 7;
        let r3 = gps_map_raw1(0, 0, 0, base_forward_wrap).unwrap();
        assert_eq!(r3, (base_next_era, 0));
    }

    #[test]
    fn phase_constants_match_rdn_anchors() {
        let expect_days = (crate::RDN_1980_01_06 as i64 - 1).rem_euclid(GPS_ERA_DAYS);
        assert_eq!(PHI_GPS_DAYS, expect_days);

        let expect_sec = ((crate::RDN_1980_01_06 as i64 - crate::RDN_1970_01_01 as i64) * 86400)
            .rem_euclid(GPS_ERA_SECONDS);
        assert_eq!(PHI_GPS_SYS_SEC, expect_sec);
    }

    #[test]
    fn property9_era_round_trip() {
        for week in [0u16, 1, 511, 512, 1023] {
            for tow in [0u32, 1, 302399, 302400, 604799] {
                let tt = gps_map_raw2(week, tow, 0, None);
                let back = gps_map_time(tt, 0);
                assert_eq!(back, GpsRawTime { week, tow }, "week={week} tow={tow}");
            }
        }
    }

    #[test]
    fn full_year_trusts_modern_input() {
        assert_eq!(gps_full_year(2024, 1, 1, None), 2024);
    }

    #[test]
    fn full_year_pivots_two_digit_input() {
        assert_eq!(gps_full_year(5, 1, 1, None), 2005);
        assert_eq!(gps_full_year(85, 1, 1, None), 1985);
    }
}
