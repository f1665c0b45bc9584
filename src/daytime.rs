//! `time_t`-seconds ↔ (days, seconds-in-day) splitting, and day-time
//! hour/minute/second splitting with a UTC offset (component C6).
//!
//! The successive-division split that pulls hour/minute/second out of a
//! seconds count follows the same shape as [`crate::gregorian`]'s and
//! [`crate::isoweek`]'s elapsed-unit splitters, re-based from
//! Unix-epoch-relative days to RDN-relative days.

use crate::arith::{self, GmDivisor};
use crate::Rdn;

const GM_DAY: GmDivisor = GmDivisor::from_parts(86400, 15, 0xA8C00000);

/// `time_t` seconds split into `(days, seconds_in_day)`, `days` being the
/// floor-divided day count and `seconds_in_day` in `0..86400`.
pub fn time_to_days(tt: i64) -> (i64, u32) {
    #[cfg(feature = "narrow-div")]
    {
        arith::floor_div_i64_gm(tt, &GM_DAY)
    }
    #[cfg(not(feature = "narrow-div"))]
    {
        arith::floor_div_u32_wide(tt, 86400)
    }
}

/// `time_t` seconds mapped to an RDN (`time_to_days` offset by
/// `RDN(1970-01-01) = 719163`).
pub fn time_to_rdn(tt: i64) -> Rdn {
    let (days, _) = time_to_days(tt);
    (days + crate::RDN_1970_01_01 as i64) as Rdn
}

/// Split a day-relative instant `dt` (seconds) plus a UTC offset `ofs`
/// (seconds, may be negative) into a day carry and an `(hour, minute,
/// second)` triple.
pub fn day_time_split(dt: i64, ofs: i64) -> (i64, u8, u8, u8) {
    let (days, secs_in_day) = time_to_days(dt + ofs);
    let hour = secs_in_day / 3600;
    let minute = (secs_in_day / 60) % 60;
    let second = secs_in_day % 60;
    (days, hour as u8, minute as u8, second as u8)
}

/// Merge `(hour, minute, second)` back into seconds-since-midnight via
/// Horner's method.
pub fn day_time_merge(hour: u32, minute: u32, second: u32) -> u32 {
    (hour * 60 + minute) * 60 + second
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn s7_time_to_days_extremes() {
        assert_eq!(time_to_days(i64::MAX), (106751991167300, 55807));
        assert_eq!(time_to_days(i64::MIN), (-106751991167301, 30592));
    }

    #[test]
    fn time_to_rdn_epoch() {
        assert_eq!(time_to_rdn(0), crate::RDN_1970_01_01);
        assert_eq!(time_to_rdn(-1), crate::RDN_1970_01_01 - 1);
        assert_eq!(time_to_rdn(86400), crate::RDN_1970_01_01 + 1);
    }

    #[test]
    fn day_time_split_merge_round_trip() {
        for secs_in_day in [0u32, 1, 3599, 3600, 43199, 43200, 86399] {
            let (days, h, m, s) = day_time_split(secs_in_day as i64, 0);
            assert_eq!(days, 0);
            assert_eq!(day_time_merge(h as u32, m as u32, s as u32), secs_in_day);
        }
    }

    #[test]
    fn day_time_split_carries_with_offset() {
        // One second before midnight UTC, at UTC+1 it is already the next
        // day's 00:59:59.
        let (days, h, m, s) = day_time_split(86399, 3600);
        assert_eq!(days, 1);
        assert_eq!((h, m, s), (0, 59, 59));
    }

    #[test]
    fn narrow_div_path_agrees_with_wide_path() {
        for tt in [0i64, 1, -1, 86400, -86400, i64::MAX, i64::MIN, 123456789] {
            let gm = arith::floor_div_i64_gm(tt, &GM_DAY);
            let wide = arith::floor_div_u32_wide(tt, 86400);
            assert_eq!(gm, wide, "tt={tt}");
        }
    }
}
