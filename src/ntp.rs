//! NTP 32-bit seconds-since-1900 era mapping (component C7).
//!
//! Follows `other_examples`'s `swift-nav-swiftnav-rs` GPS/UTC time crate
//! for the general shape of a receiver-facing pivoted-epoch unfolding
//! routine (`MJD::to_gps_internal`'s "pick the era nearest a reference
//! instant" pattern), adapted to the simpler NTP 2^32-second wraparound.

use std::time::{SystemTime, UNIX_EPOCH};

/// `((1900-01-01 - 1970-01-01) in days) * 86400, reduced mod 2^32`: the
/// fixed phase shift between the NTP and Unix second scales.
pub const PHI_NTP: u32 = 0x7C55_8180;

fn now_unix_secs() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}

/// Unfold a 32-bit NTP seconds-since-1900 value `secs` into a full-range
/// `time_t`, choosing the 2^32-second era nearest `pivot` (or, if `pivot`
/// is `None`, nearest the current time). The result always lies within
/// `2^31` seconds of the pivot (clamped to non-negative `time_t` if that
/// would otherwise go negative).
pub fn ntp_to_time(secs: u32, pivot: Option<i64>) -> i64 {
    let pivot = pivot.unwrap_or_else(now_unix_secs);
    let mut tb = pivot - (1i64 << 31);
    if tb < 0 {
        tb = 0;
    }
    let diff = ((secs as i64) + (PHI_NTP as i64) - tb).rem_euclid(1i64 << 32);
    tb + diff
}

/// Map a `time_t` instant down onto the 32-bit wrapping NTP scale.
///
/// Implemented as the exact inverse of [`ntp_to_time`]'s era-unfolding
/// arithmetic (`tt = secs + PHI_NTP` modulo `2^32`, before era
/// disambiguation), so that `time_to_ntp(ntp_to_time(secs, Some(p))) ==
/// secs` whenever `ntp_to_time` did not need to clamp its era base.
pub fn time_to_ntp(tt: i64) -> u32 {
    (tt as u32).wrapping_sub(PHI_NTP)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn s5_ntp_epoch_offset() {
        let secs = (crate::RDN_1970_01_01 as i64 - crate::RDN_1900_01_01 as i64) * 86400;
        assert_eq!(ntp_to_time(secs as u32, Some(0)), 0);
    }

    #[test]
    fn phi_ntp_matches_documented_constant() {
        assert_eq!(PHI_NTP, 0x7C55_8180);
    }

    #[test]
    fn round_trip_within_pivot_window() {
        for &pivot in &[0i64, 1_000_000_000, 2_000_000_000, 4_000_000_000] {
            for &delta in &[-1_000_000i64, 0, 1_000_000] {
                let s = pivot + delta;
                if s < 0 {
                    continue;
                }
                let ntp = time_to_ntp(s);
                let back = ntp_to_time(ntp, Some(pivot));
                assert_eq!(back, s, "pivot={pivot} delta={delta}");
            }
        }
    }
}
