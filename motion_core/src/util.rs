//! Common time/period helpers for motion_core.

/// Number of microseconds in one second.
pub const MICROS_PER_SEC: u64 = 1_000_000;

/// Compute the period in microseconds for a given tick rate in Hz.
/// - Clamps `hz` to at least 1 to avoid division by zero.
/// - Ensures result is at least 1 microsecond.
#[inline]
pub fn period_us(hz: u32) -> u64 {
    (MICROS_PER_SEC / u64::from(hz.max(1))).max(1)
}

/// Tick period in seconds, consistent with `period_us`.
#[inline]
pub fn period_secs(hz: u32) -> f64 {
    period_us(hz) as f64 / MICROS_PER_SEC as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn period_helpers_agree() {
        assert_eq!(period_us(1000), 1_000);
        assert_eq!(period_us(0), MICROS_PER_SEC);
        assert_eq!(period_us(u32::MAX), 1);
        assert!((period_secs(100) - 0.01).abs() < 1e-12);
    }
}
