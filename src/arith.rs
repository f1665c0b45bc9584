//! Branch-free arithmetic primitives (component C1).
//!
//! These are the load-bearing bit tricks the rest of the crate composes:
//! floor division with floor semantics on signed dividends, a
//! sign-preserving unsigned-to-signed cast, arithmetic right shift
//! (native and emulated), a digit-sum mod-7 reduction, and the
//! Granlund-Moller normalized division step used by the `narrow-div`
//! feature's chained 64-by-32 divide.
//!
//! Per the crate's configuration note: the default (fast) path uses
//! native wide-integer division (`div_euclid`/`rem_euclid`), letting the
//! compiler lower it per target. The `narrow-div` feature swaps in the
//! explicit Granlund-Moller path below at the same call sites; both are
//! exercised by the same tests so they stay provably bit-identical.

/// Floor-divide a signed 32-bit dividend by a positive 32-bit divisor,
/// using the branch-free XOR-mask technique: negate (via one's-complement)
/// when `n` is negative, divide the now-nonnegative magnitude, then flip
/// the quotient's bits back. Returns `(quotient, remainder)` with
/// `0 <= remainder < d`.
pub fn floor_div_u32(n: i32, d: u32) -> (i32, u32) {
    debug_assert!(d > 0);
    let m: u32 = if n < 0 { u32::MAX } else { 0 };
    let n_u = n as u32;
    let q_u = m ^ ((m ^ n_u) / d);
    let r = n_u.wrapping_sub(q_u.wrapping_mul(d));
    (sign_cast_u32_i32(q_u), r)
}

/// Floor-divide a signed 64-bit dividend by a positive 32-bit divisor using
/// the same XOR-mask technique, widened to 64 bits. `0 <= remainder < d`.
pub fn floor_div_u32_wide(n: i64, d: u32) -> (i64, u32) {
    debug_assert!(d > 0);
    let m: u64 = if n < 0 { u64::MAX } else { 0 };
    let n_u = n as u64;
    let q_u = m ^ ((m ^ n_u) / d as u64);
    let r = (n_u.wrapping_sub(q_u.wrapping_mul(d as u64))) as u32;
    (q_u as i64, r)
}

/// Sign-preserving unsigned-to-signed cast: reinterpret the bit pattern of
/// `v` as a two's-complement `i32`, without relying on `as` casts being
/// portable across targets with a different native int representation.
/// On every target Rust actually supports this is equivalent to `v as i32`,
/// but it's spelled out explicitly since the reference algorithm this
/// crate's divisions are transcribed from is itself written against C,
/// where that reinterpretation isn't guaranteed well-defined.
pub const fn sign_cast_u32_i32(v: u32) -> i32 {
    if v > i32::MAX as u32 {
        -((!v) as i32) - 1
    } else {
        v as i32
    }
}

/// Arithmetic right shift of a signed 32-bit value. Rust's `>>` on signed
/// integers is always arithmetic, so this is a thin wrapper; see
/// [`asr_emulated`] for the portable bit-trick version for platforms where
/// that isn't guaranteed.
pub const fn asr_i32(v: i32, s: u32) -> i32 {
    v >> s
}

/// Emulated arithmetic right shift, for targets whose native `>>` on signed
/// integers is implementation-defined (not true of Rust, but kept as the
/// spec's portable fallback and cross-checked against [`asr_i32`] in tests).
pub const fn asr_emulated(v: i32, s: u32) -> i32 {
    let m: u32 = if v < 0 { u32::MAX } else { 0 };
    sign_cast_u32_i32(m ^ ((m ^ (v as u32)) >> s))
}

/// Reduce a 32-bit signed value mod 7, using the identity `2^(3n) = 1 (mod 7)`
/// to fold the value into two 15-bit chunks before a final small division.
/// Always returns a value in `0..=6`.
pub fn mod7(x: i32) -> i32 {
    // Bias by 7*2^17 so the intermediate is non-negative regardless of the
    // sign of `x`, then fold the low 15 bits against the shifted-down high
    // bits (an arithmetic shift, since `x` may be negative).
    let xred = 7i32.wrapping_shl(17) + (x & 0x7FFF) + asr_i32(x, 15);
    xred.rem_euclid(7)
}

/// Add two already-reduced (`0..=6`) mod-7 residues and reduce the sum.
pub fn add_mod7(a: i32, b: i32) -> i32 {
    mod7(a + b)
}

/// Subtract two already-reduced (`0..=6`) mod-7 residues and reduce the
/// result back into `0..=6`.
pub fn sub_mod7(a: i32, b: i32) -> i32 {
    mod7(a - b)
}

/// A precomputed normalized divisor for the Granlund-Moller division step:
/// `d` shifted left by `shift` bits has its top bit set, and `v` is the
/// corresponding approximate reciprocal
/// `v = floor((2^64 - 1) / d_norm) - 2^32`.
#[derive(Debug, Clone, Copy)]
pub struct GmDivisor {
    /// The logical (un-normalized) divisor, e.g. 86400.
    pub d: u32,
    /// Left-shift amount applied to `d` (and, conceptually, the dividend)
    /// to normalize the top bit of the divisor.
    pub shift: u32,
    /// `d << shift`, with its top bit set.
    pub d_norm: u32,
    /// The precomputed approximate reciprocal of `d_norm`.
    pub v: u32,
}

impl GmDivisor {
    /// Build a normalized divisor from an arbitrary positive `d` by probing
    /// shift amounts until the top bit of `d << shift` is set. `spec.md`'s
    /// concrete call sites hard-code the resulting `(shift, d_norm, v)`
    /// triple as build-time constants instead (see `GREGORIAN_GM`,
    /// `ISOWEEK_GM`, `DAYTIME_GM`, `GPS_GM` in the relevant modules); this
    /// constructor exists for documentation, tests, and any future divisor.
    pub const fn new(d: u32) -> Self {
        debug_assert!(d > 0);
        let mut shift = 0u32;
        let mut d_norm = d;
        while d_norm & 0x8000_0000 == 0 {
            d_norm <<= 1;
            shift += 1;
        }
        let v = ((u64::MAX / d_norm as u64) - (1u64 << 32)) as u32;
        GmDivisor {
            d,
            shift,
            d_norm,
            v,
        }
    }

    /// Build from already-known `(d, shift, d_norm)` — used by the
    /// hard-coded constants elsewhere in the crate so the magic numbers
    /// quoted in spec.md §4.2/§4.4/§4.6/§4.8 appear verbatim in the source.
    pub const fn from_parts(d: u32, shift: u32, d_norm: u32) -> Self {
        let v = ((u64::MAX / d_norm as u64) - (1u64 << 32)) as u32;
        GmDivisor {
            d,
            shift,
            d_norm,
            v,
        }
    }
}

/// One Granlund-Moller normalized division step: divide the 64-bit
/// dividend `u1:u0` (with `0 <= u1 < d_norm`) by the normalized 32-bit
/// divisor `d_norm`, given its precomputed reciprocal `v`. Returns
/// `(quotient, remainder)` with `0 <= remainder < d_norm`.
pub fn gm_step(u1: u32, u0: u32, d_norm: u32, v: u32) -> (u32, u32) {
    debug_assert!(u1 < d_norm);
    let accu: u64 = (u1 as u64) * (v as u64) + (u0 as u64);
    let q0 = accu as u32;
    let mut q1 = ((accu >> 32) as u32).wrapping_add(u1).wrapping_add(1);
    let mut r = u0.wrapping_sub(q1.wrapping_mul(d_norm));
    if r > q0 {
        q1 = q1.wrapping_sub(1);
        r = r.wrapping_add(d_norm);
    }
    if r >= d_norm {
        q1 = q1.wrapping_add(1);
        r = r.wrapping_sub(d_norm);
    }
    (q1, r)
}

/// The chained 64-by-32 floor divide (`ucal_i64u32DivGM` in the original
/// source): divide a signed 64-bit dividend by the logical divisor
/// `gm.d`, via two [`gm_step`] calls over a divisor normalized by
/// `gm.shift` bits. Returns `(quotient, remainder)` with
/// `0 <= remainder < gm.d`, matching floor semantics for negative
/// dividends.
pub fn floor_div_i64_gm(n: i64, gm: &GmDivisor) -> (i64, u32) {
    // Negate (via one's complement / XOR-mask) if negative, exactly as
    // `floor_div_u32` does, so the GM steps only ever see nonnegative
    // magnitudes.
    let m: u64 = if n < 0 { u64::MAX } else { 0 };
    let n_u = n as u64;
    let x = m ^ n_u;

    // Scale the (now nonnegative) magnitude by 2^shift -- floor division
    // is invariant under scaling both operands by the same positive
    // constant -- then split the 96-bit product into three 32-bit limbs.
    let scaled: u128 = (x as u128) << gm.shift;
    let hi = (scaled >> 64) as u32;
    let mid = (scaled >> 32) as u32;
    let lo = scaled as u32;

    let (q_hi, r1) = gm_step(hi, mid, gm.d_norm, gm.v);
    let (q_lo, r2) = gm_step(r1, lo, gm.d_norm, gm.v);
    let q_u: u64 = ((q_hi as u64) << 32) | q_lo as u64;
    let q_final_u = m ^ q_u;

    let r = (n_u.wrapping_sub(q_final_u.wrapping_mul(gm.d as u64))) as u32;
    (q_final_u as i64, r)
}
