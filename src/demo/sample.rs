use chrono::Utc;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::core::Candle;
use crate::core::primitives::datetime_to_unix_millis;
use crate::error::ChartResult;

const BASE_PRICE_RANGE: std::ops::Range<f64> = 50.0..150.0;
const CLOSE_DRIFT: f64 = 5.0;
const WICK_REACH: f64 = 5.0;
const MAX_VOLUME: f64 = 100_000.0;
const SERIES_RANGE: std::ops::Range<f64> = 100.0..200.0;

/// Random demo data. Seeded generators are reproducible apart from candle
/// timestamps, which follow the wall clock.
#[derive(Debug, Clone)]
pub struct SampleGenerator {
    rng: StdRng,
    last_timestamp: Option<i64>,
}

impl SampleGenerator {
    #[must_use]
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            rng,
            last_timestamp: None,
        }
    }

    /// Candle stamped with the current wall-clock time.
    pub fn next_candle(&mut self) -> ChartResult<Candle> {
        self.candle_at(datetime_to_unix_millis(Utc::now()))
    }

    /// Random candle around a base price in `50..150`.
    ///
    /// Timestamps are strictly increasing even if `now_ms` repeats or goes
    /// backwards.
    pub fn candle_at(&mut self, now_ms: i64) -> ChartResult<Candle> {
        let timestamp = match self.last_timestamp {
            Some(last) if now_ms <= last => last.saturating_add(1),
            _ => now_ms,
        };
        self.last_timestamp = Some(timestamp);

        let open = self.rng.gen_range(BASE_PRICE_RANGE);
        let close = open + self.rng.gen_range(-CLOSE_DRIFT..CLOSE_DRIFT);
        let high = open.max(close) + self.rng.gen_range(0.0..WICK_REACH);
        let low = open.min(close) - self.rng.gen_range(0.0..WICK_REACH);
        let volume = self.rng.gen_range(0.0..MAX_VOLUME);

        Candle::new(timestamp, open, high, low, close, volume)
    }

    /// `len` samples drawn from `100..200`.
    pub fn series(&mut self, len: usize) -> Vec<f64> {
        (0..len).map(|_| self.rng.gen_range(SERIES_RANGE)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn candles_are_valid_and_in_range() {
        let mut samples = SampleGenerator::new(Some(7));
        for step in 0..200 {
            let candle = samples.candle_at(1_000 + step).expect("valid candle");
            assert!((50.0..150.0).contains(&candle.open));
            assert!((candle.close - candle.open).abs() <= CLOSE_DRIFT);
            assert!(candle.high >= candle.open.max(candle.close));
            assert!(candle.low <= candle.open.min(candle.close));
            assert!((0.0..MAX_VOLUME).contains(&candle.volume));
        }
    }

    #[test]
    fn timestamps_stay_monotonic() {
        let mut samples = SampleGenerator::new(Some(1));
        let a = samples.candle_at(5_000).expect("a").timestamp;
        let b = samples.candle_at(5_000).expect("b").timestamp;
        let c = samples.candle_at(4_000).expect("c").timestamp;
        let d = samples.candle_at(9_000).expect("d").timestamp;

        assert_eq!((a, b, c, d), (5_000, 5_001, 5_002, 9_000));
    }

    #[test]
    fn seeded_series_is_reproducible() {
        let first = SampleGenerator::new(Some(42)).series(16);
        let second = SampleGenerator::new(Some(42)).series(16);

        assert_eq!(first, second);
        assert!(first.iter().all(|value| (100.0..200.0).contains(value)));
    }
}
