use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Uniform random numbers for the generators.
///
/// Everything random in the program goes through this trait so a run can
/// be replayed from a seed, or driven from a fixed sequence in tests.
pub trait RandomSource {
    /// A value in `[0, 1)`.
    fn next_f32(&mut self) -> f32;

    /// A value between `lo` and `hi`. An inverted range is fine.
    fn range(&mut self, lo: f32, hi: f32) -> f32 {
        lo + self.next_f32() * (hi - lo)
    }

    /// An index in `0..len`. `len` must not be zero.
    fn index(&mut self, len: usize) -> usize {
        ((self.next_f32() * len as f32) as usize).min(len - 1)
    }

    fn chance(&mut self, p: f32) -> bool {
        self.next_f32() < p
    }
}

/// xorshift64* generator.
pub struct Rng {
    state: u64,
}

impl Rng {
    pub fn new(seed: u64) -> Self {
        // Zero is a fixed point of xorshift.
        let state = seed ^ 0x9E37_79B9_7F4A_7C15;

        Self {
            state: if state == 0 { 0x2545_F491_4F6C_DD1D } else { state },
        }
    }

    pub fn time_seed() -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or(Duration::from_secs(0))
            .as_nanos() as u64
    }

    pub fn advance(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x >> 12;
        x ^= x << 25;
        x ^= x >> 27;
        self.state = x;
        x.wrapping_mul(0x2545_F491_4F6C_DD1D)
    }
}

impl RandomSource for Rng {
    fn next_f32(&mut self) -> f32 {
        // 24 bits fit the f32 mantissa exactly, so the result is never 1.0
        (self.advance() >> 40) as f32 / (1u32 << 24) as f32
    }
}

/// Replays a fixed list of values, wrapping around at the end.
#[cfg(test)]
pub struct Sequence {
    values: Vec<f32>,
    at: usize,
}

#[cfg(test)]
impl Sequence {
    pub fn new(values: &[f32]) -> Self {
        assert!(!values.is_empty());
        Self {
            values: values.to_vec(),
            at: 0,
        }
    }

    pub fn constant(v: f32) -> Self {
        Self::new(&[v])
    }
}

#[cfg(test)]
impl RandomSource for Sequence {
    fn next_f32(&mut self) -> f32 {
        let v = self.values[self.at % self.values.len()];
        self.at += 1;
        v
    }
}
