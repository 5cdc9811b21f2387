//! Cycle normalization: keeps the offset near the center copy by shifting
//! it in whole strides, which never changes what is on screen.
//!
//! The shift is exact in value but not in floating point: `offset - k·stride`
//! and the `rem_euclid` in [`phase`] each round, so the phase before and
//! after a rewrap can differ in the last bits (around `1e-12` px for
//! offsets in the thousands).  Frames are equal to well under a pixel, not
//! bit for bit.

/// Half-width of the safe band around `mid`, in strides.
pub const SAFE_BAND_STRIDES: f64 = 1.25;

/// Rewrap `offset` into the band `mid ± 1.25 * stride`.
///
/// Offsets already inside the band are returned untouched, so the function
/// is idempotent.  A non-finite offset resets to `mid`.
pub fn normalize(offset: f64, mid: f64, stride: f64) -> f64 {
    if !offset.is_finite() {
        return mid;
    }
    if !(stride.is_finite() && stride > 0.0) {
        return offset;
    }
    let band = SAFE_BAND_STRIDES * stride;
    if offset >= mid - band && offset <= mid + band {
        return offset;
    }
    offset - stride * ((offset - mid) / stride).round()
}

/// Position within the current cycle: `offset - mid` reduced modulo
/// `stride` into `[-stride / 2, stride / 2)`.
///
/// Projection reads the offset only through this value, which is what makes
/// whole-stride shifts invisible.
pub fn phase(offset: f64, mid: f64, stride: f64) -> f64 {
    if !(stride.is_finite() && stride > 0.0) || !offset.is_finite() {
        return 0.0;
    }
    let p = (offset - mid).rem_euclid(stride);
    if p >= stride / 2.0 {
        p - stride
    } else {
        p
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MID: f64 = -4800.0;
    const STRIDE: f64 = 1200.0;

    #[test]
    fn inside_band_is_untouched() {
        for offset in [MID, MID + 1499.0, MID - 1500.0, MID + 37.5] {
            assert_eq!(normalize(offset, MID, STRIDE), offset);
        }
    }

    #[test]
    fn outside_band_shifts_by_whole_strides() {
        let wrapped = normalize(5000.0, MID, STRIDE);
        assert_eq!(wrapped, -4600.0);
        assert_eq!((5000.0 - wrapped) % STRIDE, 0.0);

        assert_eq!(normalize(MID - 1600.0, MID, STRIDE), MID - 400.0);
    }

    #[test]
    fn normalize_is_idempotent() {
        for offset in [-1.0e9, -98_765.25, -4800.0, 0.0, 3.5, 12_345.0, 7.0e8] {
            let once = normalize(offset, MID, STRIDE);
            assert_eq!(normalize(once, MID, STRIDE), once, "offset {offset}");
            assert!((once - MID).abs() <= SAFE_BAND_STRIDES * STRIDE);
        }
    }

    /// Distance between two phases on the circle of circumference `STRIDE`.
    fn phase_gap(a: f64, b: f64) -> f64 {
        let d = (a - b).rem_euclid(STRIDE);
        d.min(STRIDE - d)
    }

    #[test]
    fn normalize_preserves_phase() {
        let mut offset = -9_000.123_456_7;
        while offset < 9_000.0 {
            let wrapped = normalize(offset, MID, STRIDE);
            let gap = phase_gap(phase(wrapped, MID, STRIDE), phase(offset, MID, STRIDE));
            assert!(gap < 1e-9, "offset {offset}: phase moved by {gap}");
            offset += 37.77;
        }
    }

    #[test]
    fn phase_survives_whole_stride_shifts() {
        let mut offset = -9_000.123_456_7;
        while offset < 9_000.0 {
            for k in [-3.0, -1.0, 1.0, 5.0] {
                let shifted = offset + k * STRIDE;
                let gap = phase_gap(phase(shifted, MID, STRIDE), phase(offset, MID, STRIDE));
                assert!(gap < 1e-9, "offset {offset} shifted {k} strides: {gap}");
            }
            offset += 37.77;
        }
    }

    #[test]
    fn phase_is_centered_and_periodic() {
        assert_eq!(phase(MID, MID, STRIDE), 0.0);
        assert_eq!(phase(MID + 599.0, MID, STRIDE), 599.0);
        assert_eq!(phase(MID + 600.0, MID, STRIDE), -600.0);
        assert_eq!(phase(MID - 150.0, MID, STRIDE), -150.0);
        assert_eq!(
            phase(MID + 250.0 + STRIDE, MID, STRIDE),
            phase(MID + 250.0, MID, STRIDE)
        );
    }

    #[test]
    fn degenerate_inputs_do_not_panic() {
        assert_eq!(normalize(f64::NAN, MID, STRIDE), MID);
        assert_eq!(normalize(f64::INFINITY, MID, STRIDE), MID);
        assert_eq!(normalize(123.0, MID, 0.0), 123.0);
        assert_eq!(phase(123.0, MID, 0.0), 0.0);
    }
}
