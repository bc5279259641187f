use rand::{rngs::StdRng, Rng, RngCore, SeedableRng};

/// Seeded source of reproducible draws shared by every generator.
///
/// Two instances built from the same seed yield the same sequence for the
/// same calls.
pub struct SeededRandom {
    rng: StdRng,
}

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        SeededRandom { rng: StdRng::seed_from_u64(seed) }
    }

    /// Inclusive integer draw. A reversed range is treated as `max..=min`.
    pub fn int(&mut self, min: i64, max: i64) -> i64 {
        let (lo, hi) = if min <= max { (min, max) } else { (max, min) };
        self.rng.gen_range(lo..=hi)
    }

    pub fn next_u32(&mut self) -> u32 {
        self.rng.next_u32()
    }

    /// Fisher-Yates shuffle in place.
    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        for i in (1..items.len()).rev() {
            let j = self.int(0, i as i64) as usize;
            items.swap(i, j);
        }
    }

    /// `count` distinct values from `min..=max`, in draw order.
    ///
    /// The range must hold at least `count` values; otherwise every value
    /// of the range is returned.
    pub fn distinct_ints(&mut self, count: usize, min: i64, max: i64) -> Vec<i64> {
        let (lo, hi) = if min <= max { (min, max) } else { (max, min) };
        let span = (hi - lo + 1) as usize;
        let wanted = count.min(span);
        let mut out: Vec<i64> = Vec::with_capacity(wanted);
        while out.len() < wanted {
            let n = self.int(lo, hi);
            if !out.contains(&n) {
                out.push(n);
            }
        }
        out
    }
}
