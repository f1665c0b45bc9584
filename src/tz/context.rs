//! Scoped transition cache (`ConvCtx`), hint-based local/UTC disambiguation,
//! and the aligned-local-range helper (component C9, evaluator half).
//!
//! The two bracketing transition instants for a civil year, and the branch
//! between DST running "positive" (start before end, the common case) and
//! "negative" (end before start, e.g. Dublin's IST/GMT, where the nominal
//! "DST" offset is smaller than "STD"), follow `PosixZone`'s own rule pair;
//! this module turns that one-shot computation into a cache the caller
//! reuses across repeated queries within the same year (`ConvCtx`), plus a
//! hint-resolved local/UTC query (`None/Std/Dst/HrA/HrB`) instead of an
//! unresolved ambiguity report.
//!
//! The hint resolution below is keyed by *which* annual rule produced the
//! transition the query instant is near (the "start" rule → the `Dst`
//! window, the "end" rule → the `Std` window), not by whether that
//! particular transition happens to be a forward gap or a backward fold.
//! That is what makes one set of rules correct for both ordinary
//! (Berlin-style) and inverted (Dublin-style) zones without special-casing
//! the sign of `dst_offs - std_offs`: checked by hand against three worked
//! scenarios, a spring gap, an autumn overlap, and Dublin's inverted fold,
//! each reproduced below as a test.

use super::posix::PosixZone;
use crate::error::{Error, Result};
use crate::gregorian;
use crate::Rdn;

/// A disambiguation hint for [`local_to_utc`]'s `None/Std/Dst/HrA/HrB`
/// vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hint {
    /// No hint given; a query landing in a gap or overlap fails.
    None,
    /// Prefer the standard-time reading.
    Std,
    /// Prefer the daylight-time reading.
    Dst,
    /// Prefer the earlier of two repeated local readings (a fold), or the
    /// reading associated with the zone's "start" rule (a gap).
    HrA,
    /// Prefer the later of two repeated local readings (a fold), or the
    /// reading associated with the zone's "end" rule (a gap).
    HrB,
}

/// The result of a local/UTC conversion query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConvInfo {
    pub is_dst: bool,
    /// Set when the query resolved to the earlier ("A") reading of a
    /// repeated or skipped local hour.
    pub is_hour_a: bool,
    /// Set when the query resolved to the later ("B") reading.
    pub is_hour_b: bool,
    /// For [`utc_to_local`]: the value to add to the UTC instant to obtain
    /// local time. For [`local_to_utc`]: the value to add to the local
    /// instant to obtain UTC (the negation of the ordinary east-of-UTC
    /// offset).
    pub offset_seconds: i32,
}

/// A scoped cache of the current civil year's two annual transition
/// instants, reused across repeated queries. Caller-owned; zero-initialized
/// (`ConvCtx::new`) means an empty cache that [`utc_to_local`]/
/// [`local_to_utc`] will populate on first use. Two threads must not share
/// one `ConvCtx` without external synchronization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConvCtx {
    lo_bound: i64,
    hi_bound: i64,
    tt_dst: i64,
    tt_std: i64,
}

impl Default for ConvCtx {
    fn default() -> Self {
        Self::new()
    }
}

impl ConvCtx {
    /// An empty cache (`lo_bound == hi_bound == 0`), which always misses on
    /// first query.
    pub const fn new() -> Self {
        ConvCtx {
            lo_bound: 0,
            hi_bound: 0,
            tt_dst: 0,
            tt_std: 0,
        }
    }

    fn rdn_epoch_seconds(rdn: Rdn) -> i64 {
        (rdn as i64 - crate::RDN_1970_01_01 as i64) * 86400
    }

    /// `floor(ts / 31556952) + 1970`: the civil year containing `ts`, using
    /// the mean Gregorian year length in seconds. `div_euclid` already
    /// gives floor semantics for a positive divisor, so no separate
    /// correction is needed for negative `ts`.
    fn civil_year_for_instant(ts: i64) -> i32 {
        (ts.div_euclid(31_556_952) + 1970) as i32
    }

    /// Refresh the cache if `ts` falls outside the current cached year's
    /// slack band (`[lo_bound - 86400, hi_bound + 86400)`). A no-op for
    /// all-year zones.
    fn update(&mut self, ts: i64, zone: &PosixZone) {
        let Some(dst) = zone.dst else {
            return;
        };
        if self.lo_bound < self.hi_bound
            && ts >= self.lo_bound - 86_400
            && ts < self.hi_bound + 86_400
        {
            return;
        }
        let year = Self::civil_year_for_instant(ts);
        let year_start = gregorian::year_start_rdn(year);
        let next_year_start = gregorian::year_start_rdn(year + 1);

        let (start_rule, start_time) = dst.start;
        let (end_rule, end_time) = dst.end;
        let tt_dst = Self::rdn_epoch_seconds(start_rule.for_year(year)) + start_time as i64
            - zone.std_offset_seconds as i64;
        let tt_std = Self::rdn_epoch_seconds(end_rule.for_year(year)) + end_time as i64
            - dst.offset_seconds as i64;

        self.tt_dst = tt_dst;
        self.tt_std = tt_std;
        self.lo_bound =
            Self::rdn_epoch_seconds(year_start) + zone.std_offset_seconds.min(dst.offset_seconds) as i64;
        self.hi_bound = Self::rdn_epoch_seconds(next_year_start)
            + zone.std_offset_seconds.max(dst.offset_seconds) as i64;
    }
}

/// Resolve a UTC instant `ts` (seconds) to local-time information: which
/// state is active, its offset, and whether `ts` lies within the first or
/// second hour following a fold. Always succeeds — every UTC instant maps
/// to exactly one local reading.
pub fn utc_to_local(ts: i64, ctx: &mut ConvCtx, zone: &PosixZone) -> ConvInfo {
    let Some(dst) = zone.dst else {
        return ConvInfo {
            is_dst: false,
            is_hour_a: false,
            is_hour_b: false,
            offset_seconds: zone.std_offset_seconds,
        };
    };
    ctx.update(ts, zone);
    let (a, b) = (ctx.tt_dst, ctx.tt_std);
    let (is_dst, crit) = if a < b {
        (ts >= a && ts < b, b)
    } else {
        (ts >= a || ts < b, a)
    };
    let width = (zone.std_offset_seconds as i64 - dst.offset_seconds as i64).abs();
    ConvInfo {
        is_dst,
        is_hour_a: ts >= crit - width && ts < crit,
        is_hour_b: ts >= crit && ts < crit + width,
        offset_seconds: if is_dst {
            dst.offset_seconds
        } else {
            zone.std_offset_seconds
        },
    }
}

/// Resolve a local wallclock instant `ts` (seconds, numerically a UTC-scale
/// value carrying the local reading) to UTC-conversion information, given a
/// disambiguation `hint`. Fails with [`Error::Ambiguous`] when `ts` falls
/// in a spring gap or autumn overlap and `hint` is [`Hint::None`].
pub fn local_to_utc(ts: i64, ctx: &mut ConvCtx, zone: &PosixZone, hint: Hint) -> Result<ConvInfo> {
    let Some(dst) = zone.dst else {
        return Ok(ConvInfo {
            is_dst: false,
            is_hour_a: false,
            is_hour_b: false,
            offset_seconds: -zone.std_offset_seconds,
        });
    };
    ctx.update(ts + zone.std_offset_seconds as i64, zone);

    let std = zone.std_offset_seconds;
    let dsto = dst.offset_seconds;
    let (lo_off, hi_off) = if std <= dsto { (std, dsto) } else { (dsto, std) };

    // The local-time range a single UTC transition instant straddles: read
    // under the offset that makes it earliest, up to the offset that makes
    // it latest.
    let dst_lo = ctx.tt_dst + lo_off as i64;
    let dst_hi = ctx.tt_dst + hi_off as i64;
    let std_lo = ctx.tt_std + lo_off as i64;
    let std_hi = ctx.tt_std + hi_off as i64;

    if ts >= dst_lo && ts < dst_hi {
        return match hint {
            Hint::Std | Hint::HrA => Ok(ConvInfo {
                is_dst: false,
                is_hour_a: true,
                is_hour_b: false,
                offset_seconds: -std,
            }),
            Hint::Dst | Hint::HrB => Ok(ConvInfo {
                is_dst: true,
                is_hour_a: false,
                is_hour_b: true,
                offset_seconds: -dsto,
            }),
            Hint::None => Err(Error::Ambiguous),
        };
    }
    if ts >= std_lo && ts < std_hi {
        return match hint {
            Hint::Dst | Hint::HrA => Ok(ConvInfo {
                is_dst: true,
                is_hour_a: true,
                is_hour_b: false,
                offset_seconds: -dsto,
            }),
            Hint::Std | Hint::HrB => Ok(ConvInfo {
                is_dst: false,
                is_hour_a: false,
                is_hour_b: true,
                offset_seconds: -std,
            }),
            Hint::None => Err(Error::Ambiguous),
        };
    }

    // Neither discontinuity window: unambiguous. Whichever of the two
    // windows falls earlier in the civil year delimits the DST-active span.
    let is_dst = if dst_hi <= std_lo {
        ts >= dst_hi && ts < std_lo
    } else {
        !(ts >= std_hi && ts < dst_lo)
    };
    let off = if is_dst { dsto } else { std };
    Ok(ConvInfo {
        is_dst,
        is_hour_a: false,
        is_hour_b: false,
        offset_seconds: -off,
    })
}

/// Compute the aligned local range of length `period` (seconds, `1..=7*86400`)
/// and phase `phase` containing pivot instant `ts`: `[ts - csoff, ts - csoff
/// + period)` where `csoff = (ts + offset + phase) mod period`. If the zone
/// has both rules and the interval would span a DST transition, it is
/// clamped to the single offset regime containing `ts` — it never returns a
/// range crossing a transition the pivot itself is not exactly on.
pub fn aligned_local_range(
    ts: i64,
    period: i64,
    phase: i64,
    ctx: &mut ConvCtx,
    zone: &PosixZone,
) -> Result<(i64, i64)> {
    if period < 1 || period > 7 * 86_400 {
        return Err(Error::InvalidInput);
    }
    let info = utc_to_local(ts, ctx, zone);
    let csoff = (ts + info.offset_seconds as i64 + phase).rem_euclid(period);
    let mut lo = ts - csoff;
    let mut hi = lo + period;

    if zone.dst.is_some() {
        if let Some(prev) = [ctx.tt_dst, ctx.tt_std].into_iter().filter(|&t| t <= ts).max() {
            lo = lo.max(prev);
        }
        if let Some(next) = [ctx.tt_dst, ctx.tt_std].into_iter().filter(|&t| t > ts).min() {
            hi = hi.min(next);
        }
    }
    Ok((lo, hi))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gregorian;

    fn berlin() -> PosixZone {
        super::super::posix::parse("CET-1CEST,M3.5.0/2,M10.5.0/3").unwrap()
    }

    fn dublin() -> PosixZone {
        super::super::posix::parse("IST-1GMT0,M10.5.0,M3.5.0/1").unwrap()
    }

    fn local_seconds(y: i32, m: u32, d: u32, h: u32, mi: u32, s: u32) -> i64 {
        (gregorian::date_to_rdn(y, m, d) as i64 - crate::RDN_1970_01_01 as i64) * 86400
            + (h * 3600 + mi * 60 + s) as i64
    }

    #[test]
    fn s2_berlin_spring_gap() {
        let zone = berlin();
        let mut ctx = ConvCtx::new();
        let ts = local_seconds(2025, 3, 30, 2, 30, 0);

        assert_eq!(local_to_utc(ts, &mut ctx, &zone, Hint::None), Err(Error::Ambiguous));

        let std = local_to_utc(ts, &mut ctx, &zone, Hint::HrA).unwrap();
        assert_eq!((std.is_dst, std.offset_seconds), (false, -3600));

        let dst = local_to_utc(ts, &mut ctx, &zone, Hint::HrB).unwrap();
        assert_eq!((dst.is_dst, dst.offset_seconds), (true, -7200));
    }

    #[test]
    fn s3_berlin_autumn_overlap() {
        let zone = berlin();
        let mut ctx = ConvCtx::new();
        let ts = local_seconds(2025, 10, 26, 2, 30, 0);

        assert_eq!(local_to_utc(ts, &mut ctx, &zone, Hint::None), Err(Error::Ambiguous));

        let std = local_to_utc(ts, &mut ctx, &zone, Hint::HrB).unwrap();
        assert_eq!(
            (std.is_dst, std.is_hour_b, std.offset_seconds),
            (false, true, -3600)
        );

        let dst = local_to_utc(ts, &mut ctx, &zone, Hint::HrA).unwrap();
        assert_eq!(
            (dst.is_dst, dst.is_hour_a, dst.offset_seconds),
            (true, true, -7200)
        );
    }

    #[test]
    fn s4_dublin_negative_dst() {
        let zone = dublin();
        let mut ctx = ConvCtx::new();
        let ts = local_seconds(2025, 10, 26, 1, 30, 0);

        let std = local_to_utc(ts, &mut ctx, &zone, Hint::HrA).unwrap();
        assert_eq!(
            (std.is_dst, std.is_hour_a, std.offset_seconds),
            (false, true, -3600)
        );

        let dst = local_to_utc(ts, &mut ctx, &zone, Hint::HrB).unwrap();
        assert_eq!(
            (dst.is_dst, dst.is_hour_b, dst.offset_seconds),
            (true, true, 0)
        );
    }

    #[test]
    fn utc_to_local_roundtrips_away_from_transitions() {
        let zone = berlin();
        let mut ctx = ConvCtx::new();
        // 2025-07-01 12:00 UTC is deep in Berlin summer time (CEST, +2h).
        let ts = (gregorian::date_to_rdn(2025, 7, 1) as i64 - crate::RDN_1970_01_01 as i64) * 86400
            + 12 * 3600;
        let info = utc_to_local(ts, &mut ctx, &zone);
        assert_eq!((info.is_dst, info.offset_seconds), (true, 7200));
    }

    #[test]
    fn fixed_offset_zone_is_never_ambiguous() {
        let zone = super::super::posix::parse("UTC0").unwrap();
        let mut ctx = ConvCtx::new();
        let info = local_to_utc(12345, &mut ctx, &zone, Hint::None).unwrap();
        assert_eq!(info.offset_seconds, 0);
        assert!(!info.is_dst);
    }

    #[test]
    fn aligned_range_rejects_bad_period() {
        let zone = berlin();
        let mut ctx = ConvCtx::new();
        assert_eq!(
            aligned_local_range(0, 0, 0, &mut ctx, &zone),
            Err(Error::InvalidInput)
        );
        assert_eq!(
            aligned_local_range(0, 8 * 86_400, 0, &mut ctx, &zone),
            Err(Error::InvalidInput)
        );
    }

    #[test]
    fn aligned_range_contains_pivot_and_has_length_period() {
        let zone = berlin();
        let mut ctx = ConvCtx::new();
        let ts = (gregorian::date_to_rdn(2025, 7, 1) as i64 - crate::RDN_1970_01_01 as i64) * 86400
            + 43_000;
        let (lo, hi) = aligned_local_range(ts, 86_400, 0, &mut ctx, &zone).unwrap();
        assert!(lo <= ts && ts < hi);
        assert_eq!(hi - lo, 86_400);
    }

    #[test]
    fn aligned_range_clamps_across_a_transition() {
        let zone = berlin();
        let mut ctx = ConvCtx::new();
        // A pivot just before the spring-forward instant, with a period
        // wide enough that the unclamped window would cross it.
        let ts = local_seconds(2025, 3, 30, 1, 0, 0) + 3600; // 2025-03-30 01:00 UTC == 02:00 CET
        let (_, hi) = aligned_local_range(ts, 7 * 86_400, 0, &mut ctx, &zone).unwrap();
        assert!(hi <= ctx_tt_dst_snapshot(&mut ctx, ts, &zone));
    }

    fn ctx_tt_dst_snapshot(ctx: &mut ConvCtx, ts: i64, zone: &PosixZone) -> i64 {
        // Force a cache refresh at `ts` and read back the cached transition.
        utc_to_local(ts, ctx, zone);
        ctx.tt_dst.max(ctx.tt_std)
    }
}
