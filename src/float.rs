//! IEEE-754 float classification (component C, spec §4.3 step 1-7).
//!
//! Decides whether a finite, nonzero `f64` can be written exactly as
//! `float32`, must be written as `float64`, or (rare) fits neither and
//! would require the reserved big-float encoding. Ported line-for-line
//! from `encode_rational`/`msb_lsb` in
//! `examples/original_source/python/jxon.py`, working from the float's
//! own bit pattern instead of `float.as_integer_ratio()` (not available in
//! Rust) — spec §9's "internal rational type", scoped to exactly the
//! two's-power denominators an IEEE double can produce.
//!
//! `Zero`/`NonFinite` are handled by the caller before falling into the
//! rational path; see spec §4.3 steps 1-2, which this module does not
//! duplicate.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum FloatClass {
    F32,
    F64,
    /// Fits neither width exactly; would need the reserved big-float tag.
    Unsupported,
}

/// Classify a finite, nonzero `f64`. Callers must have already handled
/// `f == 0.0`, `f.is_nan()`, and `f.is_infinite()`.
pub(crate) fn classify(f: f64) -> FloatClass {
    debug_assert!(f != 0.0 && f.is_finite());

    let bits = f.to_bits();
    let raw_exp = ((bits >> 52) & 0x7FF) as i64;
    let frac = bits & ((1u64 << 52) - 1);

    // Reconstruct value = numerator_full * 2^(-e_full), numerator_full
    // including the implicit leading bit for normal doubles.
    let (numerator_full, e_full): (u64, i64) = if raw_exp == 0 {
        (frac, 1074)
    } else {
        (frac | (1u64 << 52), 1075 - raw_exp)
    };

    // Reduce to the unique odd numerator (as `float.as_integer_ratio()`
    // would), adjusting e to match.
    let shift = numerator_full.trailing_zeros() as i64;
    let numerator = numerator_full >> shift;
    let e = e_full - shift;

    let msb = 63 - numerator.leading_zeros() as i64;
    let lsb = numerator.trailing_zeros() as i64;
    let resolution = msb - lsb + 1;

    let fits_f32 = (resolution <= 23 && -e + 23 + lsb == -126)
        || (resolution <= 24 && (-126..=127).contains(&(-e + msb)));
    if fits_f32 {
        return FloatClass::F32;
    }

    let fits_f64 = (resolution <= 52 && -e + 52 + lsb == -1022)
        || (resolution <= 53 && (-1022..=1023).contains(&(-e + msb)));
    if fits_f64 {
        return FloatClass::F64;
    }

    FloatClass::Unsupported
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spec_examples() {
        assert_eq!(classify(1.0), FloatClass::F32);
        assert_eq!(classify(0.5), FloatClass::F32);
        assert_eq!(classify(-1.0), FloatClass::F32);
        // Minimum positive normal float32.
        assert_eq!(classify(2f64.powi(-126)), FloatClass::F32);
        // Minimum positive normal double: fits float64, not float32.
        assert_eq!(classify(2f64.powi(-1022)), FloatClass::F64);
    }

    #[test]
    fn needs_more_than_24_bits_goes_to_f64() {
        // 2^24 + 1 needs 25 bits of resolution: too wide for float32's
        // 24-bit significand, but an exact integer so trivially a double.
        let v = (1u64 << 24) as f64 + 1.0;
        assert_eq!(classify(v), FloatClass::F64);
    }

    #[test]
    fn odd_subnormal_fits_f64() {
        // The smallest positive subnormal double: numerator is already odd.
        let v = f64::from_bits(1);
        assert_eq!(classify(v), FloatClass::F64);
    }

    #[test]
    fn even_subnormal_is_unsupported() {
        // A subnormal double whose mantissa has a trailing zero bit fails
        // both the float32 and float64 exactness checks under this
        // formula — a known edge inherited from the reference algorithm
        // (spec §9); the encoder must report Unsupported rather than
        // silently rounding.
        let v = f64::from_bits(2);
        assert_eq!(classify(v), FloatClass::Unsupported);
    }

    #[test]
    fn large_integer_fits_f64_not_f32() {
        let v = (1u64 << 40) as f64 + (1u64 << 20) as f64;
        assert_eq!(classify(v), FloatClass::F64);
    }
}
