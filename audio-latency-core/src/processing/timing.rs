//! Integer conversions between nanoseconds and sample counts.
//!
//! Everything goes through 128-bit intermediates so long-running streams
//! never accumulate floating-point error.

pub const NANOS_PER_SEC: u64 = 1_000_000_000;

/// `num * mul / div`, truncating, saturating at `u64::MAX`.
pub fn mul_div_u64(num: u64, mul: u64, div: u64) -> u64 {
    let wide = u128::from(num) * u128::from(mul) / u128::from(div);
    u64::try_from(wide).unwrap_or(u64::MAX)
}

/// Signed `num * mul / div`, rounded to nearest (half away from zero).
///
/// Magnitude and sign are handled separately so negative inputs never pass
/// through unsigned arithmetic.
pub fn mul_div_round_i64(num: i64, mul: u64, div: u64) -> i64 {
    let magnitude = u128::from(num.unsigned_abs()) * u128::from(mul);
    let wide_div = u128::from(div);
    let rounded = (magnitude + wide_div / 2) / wide_div;
    let rounded = i64::try_from(rounded).unwrap_or(i64::MAX);
    if num < 0 {
        -rounded
    } else {
        rounded
    }
}

/// Duration of `frames` samples at `sample_rate`, in nanoseconds.
pub fn frames_to_ns(frames: usize, sample_rate: u32) -> u64 {
    mul_div_u64(frames as u64, NANOS_PER_SEC, u64::from(sample_rate))
}

/// Signed time difference in nanoseconds as a signed sample count.
pub fn ns_to_samples(diff_ns: i64, sample_rate: u32) -> i64 {
    mul_div_round_i64(diff_ns, u64::from(sample_rate), NANOS_PER_SEC)
}

/// Milliseconds to samples, clamped to `[min, max]`.
///
/// Negative inputs clamp to `min`; inputs too large for `usize` clamp to `max`.
pub fn ms_to_samples(ms: i64, sample_rate: u32, min: usize, max: usize) -> usize {
    let ms = u64::try_from(ms).unwrap_or(0);
    let samples = mul_div_u64(ms, u64::from(sample_rate), 1000);
    usize::try_from(samples).unwrap_or(usize::MAX).clamp(min, max)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_duration_is_exact() {
        assert_eq!(frames_to_ns(480, 48000), 10_000_000);
        assert_eq!(frames_to_ns(1024, 48000), 21_333_333);
        assert_eq!(frames_to_ns(0, 44100), 0);
    }

    #[test]
    fn no_drift_over_long_runs() {
        // 1024-frame packets at 44.1 kHz for an hour, summed as the hook does
        let packets = 44100u64 * 3600 / 1024;
        let total: u64 = (0..packets).map(|_| frames_to_ns(1024, 44100)).sum();
        let exact = mul_div_u64(packets * 1024, NANOS_PER_SEC, 44100);

        // each packet truncates by less than 1 ns
        assert!(exact - total < packets);
    }

    #[test]
    fn ns_to_samples_preserves_sign() {
        assert_eq!(ns_to_samples(5_000_000, 48000), 240);
        assert_eq!(ns_to_samples(-5_000_000, 48000), -240);
        assert_eq!(ns_to_samples(0, 48000), 0);
    }

    #[test]
    fn ns_to_samples_rounds_to_nearest() {
        // 1 sample at 48 kHz is 20833.33 ns
        assert_eq!(ns_to_samples(10_000, 48000), 0);
        assert_eq!(ns_to_samples(11_000, 48000), 1);
        assert_eq!(ns_to_samples(-11_000, 48000), -1);
        assert_eq!(ns_to_samples(31_000, 48000), 1);
        assert_eq!(ns_to_samples(32_000, 48000), 2);
    }

    #[test]
    fn extreme_differences_do_not_overflow() {
        let low = ns_to_samples(i64::MIN, 48000);
        let high = ns_to_samples(i64::MAX, 48000);
        assert!(low < 0);
        assert!(high > 0);
        assert!((low + high).abs() <= 1);
        assert_eq!(mul_div_u64(u64::MAX, u64::MAX, 1), u64::MAX);
    }

    #[test]
    fn ms_to_samples_clamps() {
        assert_eq!(ms_to_samples(33, 48000, 1, 48000), 1584);
        assert_eq!(ms_to_samples(200, 48000, 1, 48000), 9600);
        assert_eq!(ms_to_samples(0, 48000, 1, 48000), 1);
        assert_eq!(ms_to_samples(-5, 48000, 1, 48000), 1);
        assert_eq!(ms_to_samples(5000, 48000, 1, 48000), 48000);
    }

    #[test]
    fn ms_to_samples_huge_input_clamps_to_max() {
        assert_eq!(ms_to_samples(i64::MAX, 48000, 1, 48000), 48000);
        assert_eq!(ms_to_samples(i64::MAX, u32::MAX, 1, 48000), 48000);
        assert_eq!(ms_to_samples(i64::MIN, u32::MAX, 1, 48000), 1);
    }
}
