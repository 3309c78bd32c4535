#![forbid(unsafe_code)]

//! Deterministic xorshift RNG for effects.

use std::time::{SystemTime, UNIX_EPOCH};

/// Small, fast, seedable generator (xorshift32).
///
/// Not suitable for anything but visual noise.
#[derive(Debug, Clone)]
pub struct FxRng {
    state: u32,
}

impl FxRng {
    /// Seeded generator. A zero fold is replaced so the state never sticks.
    pub fn new(seed: u64) -> Self {
        let folded = (seed as u32) ^ ((seed >> 32) as u32);
        Self {
            state: if folded == 0 { 0x9E37_79B9 } else { folded },
        }
    }

    /// Seed from the wall clock.
    pub fn from_clock() -> Self {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(0x5EED);
        Self::new(nanos)
    }

    /// `seed` if given, otherwise the clock.
    pub fn from_option(seed: Option<u64>) -> Self {
        seed.map_or_else(Self::from_clock, Self::new)
    }

    #[inline]
    pub fn next_u32(&mut self) -> u32 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.state = x;
        x
    }

    /// Uniform in `[0, 1)`.
    #[inline]
    pub fn next_f64(&mut self) -> f64 {
        (self.next_u32() >> 8) as f64 / (1u32 << 24) as f64
    }

    /// True with probability `p`.
    #[inline]
    pub fn chance(&mut self, p: f64) -> bool {
        self.next_f64() < p
    }

    /// Uniform integer in `lo..=hi`. Returns `lo` when `hi < lo`.
    pub fn range_i32(&mut self, lo: i32, hi: i32) -> i32 {
        if hi <= lo {
            return lo;
        }
        let span = (hi as i64 - lo as i64 + 1) as u64;
        lo + (self.next_u32() as u64 % span) as i32
    }

    /// Uniform integer in `lo..=hi`. Returns `lo` when `hi < lo`.
    pub fn range_u16(&mut self, lo: u16, hi: u16) -> u16 {
        self.range_i32(lo as i32, hi as i32) as u16
    }

    /// Uniform index below `len`. `len` must be non-zero.
    #[inline]
    pub fn index(&mut self, len: usize) -> usize {
        debug_assert!(len > 0);
        self.next_u32() as usize % len.max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_stream() {
        let mut a = FxRng::new(42);
        let mut b = FxRng::new(42);
        for _ in 0..100 {
            assert_eq!(a.next_u32(), b.next_u32());
        }
    }

    #[test]
    fn zero_seed_does_not_stick() {
        let mut rng = FxRng::new(0);
        assert_ne!(rng.next_u32(), 0);
        assert_ne!(rng.next_u32(), 0);
    }

    #[test]
    fn ranges_are_inclusive_and_bounded() {
        let mut rng = FxRng::new(7);
        let mut seen_lo = false;
        let mut seen_hi = false;
        for _ in 0..2000 {
            let v = rng.range_i32(-3, 3);
            assert!((-3..=3).contains(&v));
            seen_lo |= v == -3;
            seen_hi |= v == 3;
        }
        assert!(seen_lo && seen_hi);
        assert_eq!(rng.range_u16(5, 2), 5);
    }

    #[test]
    fn unit_interval() {
        let mut rng = FxRng::new(99);
        for _ in 0..1000 {
            let v = rng.next_f64();
            assert!((0.0..1.0).contains(&v));
        }
    }

    #[test]
    fn chance_extremes() {
        let mut rng = FxRng::new(3);
        assert!((0..100).all(|_| !rng.chance(0.0)));
        assert!((0..100).all(|_| rng.chance(1.0)));
    }

    #[test]
    fn chance_converges() {
        let mut rng = FxRng::new(1234);
        let hits = (0..10_000).filter(|_| rng.chance(0.3)).count();
        assert!((2_700..3_300).contains(&hits), "hits = {hits}");
    }
}
